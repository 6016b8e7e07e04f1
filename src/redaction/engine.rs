// Copyright 2025
// SPDX-License-Identifier: Apache-2.0
//
// Ordered redaction pipeline over one document

use std::borrow::Cow;
use std::sync::Arc;
use tracing::{debug, warn};

use super::address::AddressRedactor;
use super::annotator::{Annotation, EntityAnnotator};
use super::concept::ConceptRedactor;
use super::config::{Category, RedactionConfig};
use super::lexicon::{ConceptKeywordSet, LexicalKnowledgeBase, Thesaurus};
use super::names::NameRedactor;
use super::rules::RuleAnnotator;
use super::stages::{DateRedactor, EmailRedactor, PhoneRedactor, Redactor};
use crate::error::Result;
use crate::stats::RedactionCounts;

/// Censored text plus what was masked.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RedactionOutcome {
    pub text: String,
    pub counts: RedactionCounts,
}

/// Runs the enabled stages in the order Names, Dates, Phones, Addresses,
/// Emails, Concepts.
///
/// Stages that need entities get an annotation of the text they are about to
/// see. The annotator is only invoked again when an earlier stage changed the
/// text, so masked runs are never mistaken for fresh entities and later
/// stages see earlier output.
pub struct RedactionEngine {
    stages: Vec<Box<dyn Redactor>>,
    annotator: Arc<dyn EntityAnnotator>,
}

impl RedactionEngine {
    /// Engine backed by the built-in rule annotator.
    pub fn new(config: &RedactionConfig) -> Result<Self> {
        Self::with_annotator(config, Arc::new(RuleAnnotator::new()))
    }

    pub fn with_annotator(
        config: &RedactionConfig,
        annotator: Arc<dyn EntityAnnotator>,
    ) -> Result<Self> {
        config.validate()?;

        let mut stages: Vec<Box<dyn Redactor>> = Vec::new();
        for category in config.enabled() {
            let stage: Box<dyn Redactor> = match category {
                Category::Name => Box::new(NameRedactor::new(
                    &config.deny_list,
                    config.overlap_policy,
                    Arc::clone(&annotator),
                )?),
                Category::Date => Box::new(DateRedactor),
                Category::Phone => Box::new(PhoneRedactor),
                Category::Address => Box::new(AddressRedactor),
                Category::Email => Box::new(EmailRedactor),
                Category::Concept => Box::new(ConceptRedactor::new(concept_keywords(config))?),
            };
            stages.push(stage);
        }

        debug!(
            backend = annotator.backend_id(),
            stages = stages.len(),
            "redaction engine ready"
        );

        Ok(Self { stages, annotator })
    }

    /// Categories this engine applies, in order.
    pub fn categories(&self) -> Vec<Category> {
        self.stages.iter().map(|s| s.category()).collect()
    }

    pub fn redact(&self, text: &str) -> RedactionOutcome {
        let mut current = text.to_string();
        // Always describes `current` when present.
        let mut annotation: Option<Annotation> = None;
        let mut counts = RedactionCounts::default();

        for stage in &self.stages {
            if stage.requires_annotation() && annotation.is_none() {
                annotation = Some(self.annotate(&current));
            }

            let redacted = stage.redact(&current, annotation.as_ref());
            counts.record(stage.category(), redacted.count);
            debug!(category = %stage.category(), count = redacted.count, "stage applied");

            let changed = match redacted.text {
                Cow::Owned(next) if next != current => Some(next),
                _ => None,
            };
            if let Some(next) = changed {
                current = next;
                annotation = None;
            }
        }

        RedactionOutcome {
            text: current,
            counts,
        }
    }

    fn annotate(&self, text: &str) -> Annotation {
        match self.annotator.annotate(text) {
            Ok(annotation) => annotation,
            Err(e) => {
                warn!(
                    backend = self.annotator.backend_id(),
                    error = %e,
                    "annotation failed; entity stages see no entities"
                );
                Annotation::empty()
            }
        }
    }
}

/// Seed keywords, expanded through the configured thesaurus when enabled.
fn concept_keywords(config: &RedactionConfig) -> ConceptKeywordSet {
    if !config.expand_concepts {
        return ConceptKeywordSet::literal(&config.concepts);
    }

    let thesaurus = match &config.thesaurus {
        Some(path) => Thesaurus::load(path),
        None => Thesaurus::builtin(),
    };

    match thesaurus {
        Ok(thesaurus) => {
            let kb: &dyn LexicalKnowledgeBase = &thesaurus;
            ConceptKeywordSet::expand(&config.concepts, Some(kb))
        }
        Err(e) => {
            warn!(error = %e, "thesaurus unavailable; matching concept keywords literally");
            ConceptKeywordSet::literal(&config.concepts)
        }
    }
}
