// Copyright 2025
// SPDX-License-Identifier: Apache-2.0
//
// Address redaction: place entities first, then structured fragments

use std::borrow::Cow;

use super::annotator::Annotation;
use super::config::Category;
use super::masking::{apply_masks, is_masked, MaskSpan, MaskStyle};
use super::patterns::ADDRESS_PATTERNS;
use super::stages::{pattern_spans, Redacted, Redactor};

/// Masks GPE/LOC/FAC entities (with a leading house number) and then the
/// street, unit and ZIP patterns over what is left.
///
/// Every entity and every pattern match counts once.
#[derive(Debug, Clone, Copy, Default)]
pub struct AddressRedactor;

impl AddressRedactor {
    fn entity_spans(text: &str, annotation: &Annotation) -> (Vec<MaskSpan>, usize) {
        let mut spans = Vec::new();
        let mut count = 0;

        for entity in annotation.entities_with(|l| l.is_location()) {
            match text.get(entity.start..entity.end) {
                Some(value) if !is_masked(value) => {}
                _ => continue,
            }

            spans.push(MaskSpan::new(entity.start, entity.end, MaskStyle::Shape));
            count += 1;

            if let Some(number) = annotation.token_before(entity) {
                if number.like_num && !is_masked(&number.text) {
                    spans.push(MaskSpan::new(number.start, number.end, MaskStyle::Shape));
                }
            }
        }

        (spans, count)
    }
}

impl Redactor for AddressRedactor {
    fn category(&self) -> Category {
        Category::Address
    }

    fn requires_annotation(&self) -> bool {
        true
    }

    fn redact<'a>(&self, text: &'a str, annotation: Option<&Annotation>) -> Redacted<'a> {
        let (spans, mut count) = match annotation {
            Some(annotation) => Self::entity_spans(text, annotation),
            None => (Vec::new(), 0),
        };
        let mut current = apply_masks(text, spans);

        // Each fragment pattern sees the output of the previous one.
        for pattern in ADDRESS_PATTERNS.iter() {
            let spans = pattern_spans(pattern, &current);
            if spans.is_empty() {
                continue;
            }
            count += spans.len();
            let next = apply_masks(&current, spans).into_owned();
            current = Cow::Owned(next);
        }

        Redacted {
            text: current,
            count,
        }
    }
}
