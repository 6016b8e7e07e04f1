// Copyright 2025
// SPDX-License-Identifier: Apache-2.0
//
// Text redaction engine
//
// - Entity annotation behind a trait, with a rule-based default backend
// - Regex detectors for phones, emails and address fragments
// - Thesaurus-driven concept expansion for sentence-level masking

pub mod address;
pub mod annotator;
pub mod concept;
pub mod config;
pub mod engine;
pub mod gazetteer;
pub mod lexicon;
pub mod masking;
pub mod names;
pub mod patterns;
pub mod rules;
pub mod stages;

pub use annotator::{Annotation, EntityAnnotator, EntityLabel, PlaceKind};
pub use config::{Categories, Category, OverlapPolicy, RedactionConfig};
pub use engine::{RedactionEngine, RedactionOutcome};
pub use lexicon::{ConceptKeywordSet, LexicalKnowledgeBase, Thesaurus};
pub use rules::RuleAnnotator;
pub use stages::{Redacted, Redactor};
