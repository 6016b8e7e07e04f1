// Copyright 2025
// SPDX-License-Identifier: Apache-2.0
//
// Redaction stage contract and the pattern-driven categories

use std::borrow::Cow;

use super::annotator::{Annotation, EntityLabel};
use super::config::Category;
use super::masking::{apply_masks, is_masked, MaskSpan, MaskStyle};
use super::patterns::{CompiledPattern, EMAIL, PHONE};

/// Output of one stage: the new text and the number of spans it masked.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Redacted<'a> {
    pub text: Cow<'a, str>,
    pub count: usize,
}

impl<'a> Redacted<'a> {
    pub fn unchanged(text: &'a str) -> Self {
        Self {
            text: Cow::Borrowed(text),
            count: 0,
        }
    }

    /// Mask `spans` over `text`, reporting `count` masked units.
    pub fn masked(text: &'a str, spans: Vec<MaskSpan>, count: usize) -> Self {
        if spans.is_empty() {
            return Self::unchanged(text);
        }
        Self {
            text: apply_masks(text, spans),
            count,
        }
    }
}

/// One category handler in the redaction pipeline.
///
/// Handlers are pure: they read the current text (plus an annotation of that
/// exact text when they ask for one) and return the masked text with a count.
pub trait Redactor: Send + Sync {
    fn category(&self) -> Category;

    /// Whether the engine must hand over a fresh annotation of `text`.
    fn requires_annotation(&self) -> bool;

    fn redact<'a>(&self, text: &'a str, annotation: Option<&Annotation>) -> Redacted<'a>;
}

/// Shape spans for every entity matching `pred` that is not masked yet.
pub(crate) fn entity_spans(
    text: &str,
    annotation: &Annotation,
    pred: impl Fn(EntityLabel) -> bool,
) -> Vec<MaskSpan> {
    annotation
        .entities
        .iter()
        .filter(|e| pred(e.label))
        .filter(|e| text.get(e.start..e.end).is_some_and(|v| !is_masked(v)))
        .map(|e| MaskSpan::new(e.start, e.end, MaskStyle::Shape))
        .collect()
}

/// Spans for every match of `pattern` that is not masked yet.
pub(crate) fn pattern_spans(pattern: &CompiledPattern, text: &str) -> Vec<MaskSpan> {
    pattern
        .regex
        .find_iter(text)
        .filter(|m| !is_masked(m.as_str()))
        .map(|m| MaskSpan::new(m.start(), m.end(), pattern.style))
        .collect()
}

/// Masks DATE entities, one count per entity.
#[derive(Debug, Clone, Copy, Default)]
pub struct DateRedactor;

impl Redactor for DateRedactor {
    fn category(&self) -> Category {
        Category::Date
    }

    fn requires_annotation(&self) -> bool {
        true
    }

    fn redact<'a>(&self, text: &'a str, annotation: Option<&Annotation>) -> Redacted<'a> {
        let Some(annotation) = annotation else {
            return Redacted::unchanged(text);
        };
        let spans = entity_spans(text, annotation, |label| label == EntityLabel::Date);
        let count = spans.len();
        Redacted::masked(text, spans, count)
    }
}

/// Replaces phone numbers with a fixed-width run, one count per match.
#[derive(Debug, Clone, Copy, Default)]
pub struct PhoneRedactor;

impl Redactor for PhoneRedactor {
    fn category(&self) -> Category {
        Category::Phone
    }

    fn requires_annotation(&self) -> bool {
        false
    }

    fn redact<'a>(&self, text: &'a str, _annotation: Option<&Annotation>) -> Redacted<'a> {
        let spans = pattern_spans(&PHONE, text);
        let count = spans.len();
        Redacted::masked(text, spans, count)
    }
}

/// Masks the local part of email addresses, keeping `@domain`.
///
/// A local part the name stage already masked completely is left alone; one
/// it masked partially is finished off and counted.
#[derive(Debug, Clone, Copy, Default)]
pub struct EmailRedactor;

impl Redactor for EmailRedactor {
    fn category(&self) -> Category {
        Category::Email
    }

    fn requires_annotation(&self) -> bool {
        false
    }

    fn redact<'a>(&self, text: &'a str, _annotation: Option<&Annotation>) -> Redacted<'a> {
        let spans: Vec<MaskSpan> = EMAIL
            .captures_iter(text)
            .filter_map(|caps| caps.name("local"))
            .filter(|local| !is_masked(local.as_str()))
            .map(|local| MaskSpan::new(local.start(), local.end(), MaskStyle::Solid))
            .collect();
        let count = spans.len();
        Redacted::masked(text, spans, count)
    }
}
