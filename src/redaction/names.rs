// Copyright 2025
// SPDX-License-Identifier: Apache-2.0
//
// Person name redaction
//
// Three span sources, merged before masking:
// - PERSON entities from the annotator
// - deny-list names, matched verbatim regardless of the annotator
// - email local parts that contain or read as a person name

use regex::Regex;
use std::collections::BTreeSet;
use std::sync::Arc;
use tracing::warn;

use super::annotator::{Annotation, EntityAnnotator, EntityLabel};
use super::config::{Category, OverlapPolicy};
use super::masking::{is_masked, MaskSpan, MaskStyle};
use super::patterns::{compile_term_list, EMAIL};
use super::stages::{entity_spans, Redacted, Redactor};
use crate::error::Result;

/// Shortest name fragment searched for inside an email local part.
const MIN_LOCAL_NAME_LEN: usize = 2;

/// Names shorter than this only match a whole local-part segment, so "li"
/// hits `li.wei` but not `police`.
const MIN_SUBSTRING_NAME_LEN: usize = 4;

pub struct NameRedactor {
    deny_list: Option<Regex>,
    deny_words: Vec<String>,
    policy: OverlapPolicy,
    annotator: Arc<dyn EntityAnnotator>,
}

impl NameRedactor {
    pub fn new<S: AsRef<str>>(
        deny_list: &[S],
        policy: OverlapPolicy,
        annotator: Arc<dyn EntityAnnotator>,
    ) -> Result<Self> {
        let deny_words = deny_list
            .iter()
            .flat_map(|name| name_words(name.as_ref()))
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect();

        Ok(Self {
            deny_list: compile_term_list(deny_list)?,
            deny_words,
            policy,
            annotator,
        })
    }

    /// Lowercase words of every known name: PERSON entities plus the deny list.
    fn known_words(&self, text: &str, annotation: &Annotation) -> Vec<String> {
        let mut words: BTreeSet<String> = self.deny_words.iter().cloned().collect();
        for entity in annotation.entities_with(|l| l == EntityLabel::Person) {
            if let Some(value) = text.get(entity.start..entity.end) {
                words.extend(name_words(value));
            }
        }
        // Longest first so "johnson" is tried before "john".
        let mut words: Vec<String> = words.into_iter().collect();
        words.sort_by(|a, b| b.len().cmp(&a.len()).then(a.cmp(b)));
        words
    }

    /// Spans inside one email local part starting at byte `offset`.
    fn local_part_spans(&self, local: &str, offset: usize, known: &[String]) -> Vec<MaskSpan> {
        if is_masked(local) {
            return Vec::new();
        }

        // ASCII lowercasing keeps byte offsets intact.
        let lowered = local.to_ascii_lowercase();
        let mut spans = Vec::new();
        for word in known {
            let hits: Vec<usize> = if word.chars().count() >= MIN_SUBSTRING_NAME_LEN {
                lowered.match_indices(word.as_str()).map(|(i, _)| i).collect()
            } else {
                local_segments(&lowered)
                    .filter(|(_, segment)| *segment == word.as_str())
                    .map(|(i, _)| i)
                    .collect()
            };
            spans.extend(
                hits.into_iter()
                    .map(|i| MaskSpan::new(offset + i, offset + i + word.len(), MaskStyle::Shape)),
            );
        }

        if !spans.is_empty() {
            return spans;
        }

        if self.reads_as_person(local) {
            vec![MaskSpan::new(offset, offset + local.len(), MaskStyle::Shape)]
        } else {
            Vec::new()
        }
    }

    /// Ask the annotator whether `jane.roe42` written as "Jane Roe" is a person.
    fn reads_as_person(&self, local: &str) -> bool {
        let phrase = humanize(local);
        if phrase.is_empty() {
            return false;
        }

        match self.annotator.annotate(&phrase) {
            Ok(annotation) => annotation
                .entities_with(|l| l == EntityLabel::Person)
                .next()
                .is_some(),
            Err(e) => {
                warn!(
                    backend = self.annotator.backend_id(),
                    error = %e,
                    "annotation of email local part failed"
                );
                false
            }
        }
    }
}

impl Redactor for NameRedactor {
    fn category(&self) -> Category {
        Category::Name
    }

    fn requires_annotation(&self) -> bool {
        true
    }

    fn redact<'a>(&self, text: &'a str, annotation: Option<&Annotation>) -> Redacted<'a> {
        let empty = Annotation::empty();
        let annotation = annotation.unwrap_or(&empty);

        let mut candidates = entity_spans(text, annotation, |l| l == EntityLabel::Person);

        if let Some(deny_list) = &self.deny_list {
            candidates.extend(
                deny_list
                    .find_iter(text)
                    .filter(|m| !is_masked(m.as_str()))
                    .map(|m| MaskSpan::new(m.start(), m.end(), MaskStyle::Shape)),
            );
        }

        let known = self.known_words(text, annotation);
        for caps in EMAIL.captures_iter(text) {
            if let Some(local) = caps.name("local") {
                candidates.extend(self.local_part_spans(local.as_str(), local.start(), &known));
            }
        }

        let mut kept: Vec<MaskSpan> = Vec::with_capacity(candidates.len());
        let mut count = 0;
        for span in candidates {
            let counts = match self.policy {
                OverlapPolicy::CountAll => true,
                OverlapPolicy::CountOnce => !kept.iter().any(|k| k.overlaps(&span)),
            };
            if counts {
                count += 1;
            }
            kept.push(span);
        }

        Redacted::masked(text, kept, count)
    }
}

/// Lowercase alphabetic words of a name, skipping fragments too short to search for.
fn name_words(name: &str) -> Vec<String> {
    name.split(|c: char| !c.is_alphabetic())
        .filter(|w| w.chars().count() >= MIN_LOCAL_NAME_LEN)
        .map(str::to_lowercase)
        .collect()
}

fn is_local_separator(c: char) -> bool {
    matches!(c, '.' | '_' | '-' | '+') || c.is_ascii_digit()
}

/// Non-empty segments of a local part with their byte offsets.
fn local_segments(local: &str) -> impl Iterator<Item = (usize, &str)> {
    local
        .split(is_local_separator)
        .scan(0, |pos, segment| {
            let start = *pos;
            // Separators are all single-byte.
            *pos += segment.len() + 1;
            Some((start, segment))
        })
        .filter(|(_, segment)| !segment.is_empty())
}

/// `jane.roe42` -> `Jane Roe`
fn humanize(local: &str) -> String {
    local
        .split(is_local_separator)
        .filter(|part| !part.is_empty() && !is_masked(part))
        .map(|part| {
            let mut chars = part.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().chain(chars.flat_map(char::to_lowercase)).collect(),
                None => String::new(),
            }
        })
        .collect::<Vec<String>>()
        .join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::RedactError;
    use crate::redaction::rules::RuleAnnotator;

    struct Broken;

    impl EntityAnnotator for Broken {
        fn backend_id(&self) -> &str {
            "broken"
        }

        fn annotate(&self, _text: &str) -> Result<Annotation> {
            Err(RedactError::Annotation("model unavailable".into()))
        }
    }

    fn redactor(deny: &[&str], policy: OverlapPolicy) -> NameRedactor {
        NameRedactor::new(deny, policy, Arc::new(RuleAnnotator::new())).unwrap()
    }

    fn run(redactor: &NameRedactor, text: &str) -> (String, usize) {
        let annotation = RuleAnnotator::new().annotate(text).unwrap();
        let result = redactor.redact(text, Some(&annotation));
        (result.text.into_owned(), result.count)
    }

    #[test]
    fn test_person_shape_mask() {
        let (text, count) = run(&redactor(&[], OverlapPolicy::CountOnce), "John Doe went to the store.");
        assert_eq!(text, "████ ███ went to the store.");
        assert_eq!(count, 1);
    }

    #[test]
    fn test_deny_list_catches_missed_names() {
        let (text, count) = run(
            &redactor(&["Zorblatt"], OverlapPolicy::CountOnce),
            "Ask zorblatt about it.",
        );
        assert_eq!(text, "Ask ████████ about it.");
        assert_eq!(count, 1);
    }

    #[test]
    fn test_local_part_substring_of_known_name() {
        let (text, count) = run(
            &redactor(&[], OverlapPolicy::CountOnce),
            "Mary Smith wrote from smith_m99@example.com today.",
        );
        assert_eq!(text, "████ █████ wrote from █████_m99@example.com today.");
        assert_eq!(count, 2);
    }

    #[test]
    fn test_short_name_only_matches_whole_segment() {
        let redactor = redactor(&[], OverlapPolicy::CountOnce);

        let (text, count) = run(&redactor, "Mr. Li signed off. Ask police@example.com today.");
        assert_eq!(text, "Mr. ██ signed off. Ask police@example.com today.");
        assert_eq!(count, 1);

        let (text, count) = run(&redactor, "Mr. Li signed off. Mail li.wei@example.com today.");
        assert_eq!(text, "Mr. ██ signed off. Mail ██.wei@example.com today.");
        assert_eq!(count, 2);
    }

    #[test]
    fn test_local_segments() {
        let segments: Vec<(usize, &str)> = local_segments("li.wei__x9y").collect();
        assert_eq!(segments, vec![(0, "li"), (3, "wei"), (8, "x"), (10, "y")]);
    }

    #[test]
    fn test_local_part_read_as_person() {
        let (text, count) = run(
            &redactor(&[], OverlapPolicy::CountOnce),
            "Contact john.doe@example.com please.",
        );
        assert_eq!(text, "Contact ████████@example.com please.");
        assert_eq!(count, 1);
    }

    #[test]
    fn test_non_name_local_part_untouched() {
        let (text, count) = run(
            &redactor(&[], OverlapPolicy::CountOnce),
            "Send logs to support@example.com.",
        );
        assert_eq!(text, "Send logs to support@example.com.");
        assert_eq!(count, 0);
    }

    #[test]
    fn test_overlap_policy_only_changes_count() {
        let text = "Reach jane@example.com soon.";
        let (once_text, once) = run(&redactor(&["Jane"], OverlapPolicy::CountOnce), text);
        let (all_text, all) = run(&redactor(&["Jane"], OverlapPolicy::CountAll), text);
        assert_eq!(once_text, all_text);
        assert_eq!(once_text, "Reach ████@example.com soon.");
        assert_eq!(once, 1);
        assert_eq!(all, 2);
    }

    #[test]
    fn test_masked_names_not_recounted() {
        let redactor = redactor(&["Jane Roe"], OverlapPolicy::CountOnce);
        let (first, _) = run(&redactor, "Jane Roe met John Doe.");
        let (second, count) = run(&redactor, &first);
        assert_eq!(second, first);
        assert_eq!(count, 0);
    }

    #[test]
    fn test_annotator_failure_in_local_part_is_soft() {
        let redactor = NameRedactor::new::<&str>(&[], OverlapPolicy::CountOnce, Arc::new(Broken)).unwrap();
        let result = redactor.redact("john.doe@example.com", None);
        assert_eq!(result.count, 0);
        assert_eq!(result.text, "john.doe@example.com");
    }

    #[test]
    fn test_humanize() {
        assert_eq!(humanize("jane.roe42"), "Jane Roe");
        assert_eq!(humanize("MARY_smith+news"), "Mary Smith News");
        assert_eq!(humanize("████.doe"), "Doe");
        assert_eq!(humanize("1234"), "");
    }
}
