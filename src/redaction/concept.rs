// Copyright 2025
// SPDX-License-Identifier: Apache-2.0
//
// Concept redaction: whole sentences mentioning an expanded keyword

use regex::Regex;
use std::borrow::Cow;

use super::annotator::{Annotation, Sentence};
use super::config::Category;
use super::lexicon::ConceptKeywordSet;
use super::masking::{block_run, is_masked};
use super::patterns::compile_term_list;
use super::stages::{Redacted, Redactor};
use crate::error::Result;

/// Masks every sentence that contains one of the keywords as a whole word.
///
/// Works line by line: a line with no hit is copied verbatim, a line with a
/// hit is rebuilt from its sentences joined by single spaces. Line breaks
/// are never added or removed.
pub struct ConceptRedactor {
    keywords: ConceptKeywordSet,
    matcher: Option<Regex>,
}

impl ConceptRedactor {
    pub fn new(keywords: ConceptKeywordSet) -> Result<Self> {
        let terms: Vec<&str> = keywords.iter().collect();
        let matcher = compile_term_list(&terms)?;
        Ok(Self { keywords, matcher })
    }

    pub fn keywords(&self) -> &ConceptKeywordSet {
        &self.keywords
    }

    /// Rebuild one line; `None` when nothing on it matched.
    fn redact_line(
        &self,
        matcher: &Regex,
        line: &str,
        offset: usize,
        sentences: &[Sentence],
    ) -> Option<(String, usize)> {
        let pieces = sentence_pieces(line, offset, sentences);
        let hits: Vec<bool> = pieces
            .iter()
            .map(|p| !is_masked(p) && matcher.is_match(p))
            .collect();
        let count = hits.iter().filter(|h| **h).count();
        if count == 0 {
            return None;
        }

        let body = pieces
            .iter()
            .zip(&hits)
            .map(|(piece, hit)| if *hit { mask_sentence(piece) } else { piece.to_string() })
            .collect::<Vec<_>>()
            .join(" ");

        let content = line.trim();
        let lead = &line[..line.len() - line.trim_start().len()];
        let trail = &line[lead.len() + content.len()..];
        Some((format!("{lead}{body}{trail}"), count))
    }
}

impl Redactor for ConceptRedactor {
    fn category(&self) -> Category {
        Category::Concept
    }

    fn requires_annotation(&self) -> bool {
        true
    }

    fn redact<'a>(&self, text: &'a str, annotation: Option<&Annotation>) -> Redacted<'a> {
        let (Some(matcher), Some(annotation)) = (&self.matcher, annotation) else {
            return Redacted::unchanged(text);
        };
        if annotation.sentences.is_empty() {
            return Redacted::unchanged(text);
        }

        let mut lines = Vec::new();
        let mut count = 0;
        let mut offset = 0;
        let mut cursor = 0;
        for line in text.split('\n') {
            let sentences =
                sentences_on_line(&annotation.sentences, &mut cursor, offset, offset + line.len());
            match self.redact_line(matcher, line, offset, sentences) {
                Some((rebuilt, n)) => {
                    count += n;
                    lines.push(Cow::Owned(rebuilt));
                }
                None => lines.push(Cow::Borrowed(line)),
            }
            offset += line.len() + 1;
        }

        if count == 0 {
            return Redacted::unchanged(text);
        }

        Redacted {
            text: Cow::Owned(lines.join("\n")),
            count,
        }
    }
}

/// Sentences overlapping the byte range `start..end`.
///
/// `sentences` are ordered and disjoint, and lines are visited in order, so
/// `cursor` only moves forward.
fn sentences_on_line<'s>(
    sentences: &'s [Sentence],
    cursor: &mut usize,
    start: usize,
    end: usize,
) -> &'s [Sentence] {
    while *cursor < sentences.len() && sentences[*cursor].end <= start {
        *cursor += 1;
    }
    let rest = &sentences[*cursor..];
    let overlapping = rest.partition_point(|s| s.start < end);
    &rest[..overlapping]
}

/// Trimmed pieces of `line` cut at every sentence boundary falling inside it.
///
/// Sentences spanning several lines contribute their clipped part to each.
fn sentence_pieces<'l>(line: &'l str, offset: usize, sentences: &[Sentence]) -> Vec<&'l str> {
    let end = offset + line.len();
    let mut cuts = vec![0, line.len()];
    for sentence in sentences {
        for edge in [sentence.start, sentence.end] {
            if edge > offset && edge < end && line.is_char_boundary(edge - offset) {
                cuts.push(edge - offset);
            }
        }
    }
    cuts.sort_unstable();
    cuts.dedup();

    cuts.windows(2)
        .map(|w| line[w[0]..w[1]].trim())
        .filter(|piece| !piece.is_empty())
        .collect()
}

/// Solid run over the sentence, keeping a trailing period.
fn mask_sentence(sentence: &str) -> String {
    match sentence.strip_suffix('.') {
        Some(body) if !body.is_empty() => format!("{}.", block_run(body.chars().count())),
        _ => block_run(sentence.chars().count()),
    }
}
