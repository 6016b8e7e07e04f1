// Copyright 2025
// SPDX-License-Identifier: Apache-2.0
//
// Entity annotation contract consumed by the redaction stages

use serde::{Deserialize, Serialize};
use std::ops::Range;

use crate::error::Result;

/// Kind of place recognised by the annotator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PlaceKind {
    /// Countries, states, cities.
    Gpe,
    /// Natural locations: lakes, rivers, mountains.
    Loc,
    /// Facilities: airports, bridges, buildings.
    Fac,
}

/// Entity label attached to a token.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EntityLabel {
    Person,
    Date,
    Location(PlaceKind),
    #[default]
    None,
}

impl EntityLabel {
    pub fn is_location(&self) -> bool {
        matches!(self, EntityLabel::Location(_))
    }
}

/// Position of a token inside its entity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Iob {
    Begin,
    Inside,
    #[default]
    Outside,
}

/// A contiguous span of text produced by tokenization.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Token {
    pub index: usize,
    pub text: String,
    /// Byte offsets into the annotated text.
    pub start: usize,
    pub end: usize,
    pub label: EntityLabel,
    pub iob: Iob,
    /// Index into [`Annotation::entities`].
    pub entity: Option<usize>,
    pub like_num: bool,
    /// Index into [`Annotation::sentences`].
    pub sentence: usize,
}

/// A recognised entity covering one or more tokens.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EntitySpan {
    pub label: EntityLabel,
    pub start: usize,
    pub end: usize,
    pub tokens: Range<usize>,
}

/// A sentence as a byte range of the annotated text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Sentence {
    pub start: usize,
    pub end: usize,
}

/// Tokens, entities and sentences for one text.
///
/// Offsets are only valid against the exact text that was annotated;
/// any mutation requires a fresh annotation.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Annotation {
    pub tokens: Vec<Token>,
    pub entities: Vec<EntitySpan>,
    pub sentences: Vec<Sentence>,
}

impl Annotation {
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }

    /// Entities carrying `label`, in document order.
    pub fn entities_with<'a>(
        &'a self,
        mut pred: impl FnMut(EntityLabel) -> bool + 'a,
    ) -> impl Iterator<Item = &'a EntitySpan> + 'a {
        self.entities.iter().filter(move |e| pred(e.label))
    }

    /// Token preceding the first token of `entity`, if any.
    pub fn token_before(&self, entity: &EntitySpan) -> Option<&Token> {
        entity
            .tokens
            .start
            .checked_sub(1)
            .and_then(|i| self.tokens.get(i))
    }
}

/// Pluggable entity recognition backend.
///
/// The built-in [`RuleAnnotator`](super::rules::RuleAnnotator) needs no
/// model files; statistical backends implement this trait and are handed to
/// the engine instead.
pub trait EntityAnnotator: Send + Sync {
    /// Human-readable backend identifier (e.g. "rules").
    fn backend_id(&self) -> &str;

    /// Tokenize, segment and label `text`.
    ///
    /// Empty input yields an empty annotation, never an error.
    fn annotate(&self, text: &str) -> Result<Annotation>;
}

#[cfg(test)]
mod tests {
    use super::*;

    fn token(index: usize, text: &str, start: usize, label: EntityLabel) -> Token {
        Token {
            index,
            text: text.to_string(),
            start,
            end: start + text.len(),
            label,
            iob: Iob::Outside,
            entity: None,
            like_num: text.chars().all(|c| c.is_ascii_digit()),
            sentence: 0,
        }
    }

    #[test]
    fn test_token_before() {
        let annotation = Annotation {
            tokens: vec![
                token(0, "42", 0, EntityLabel::None),
                token(1, "Springfield", 3, EntityLabel::Location(PlaceKind::Gpe)),
            ],
            entities: vec![EntitySpan {
                label: EntityLabel::Location(PlaceKind::Gpe),
                start: 3,
                end: 14,
                tokens: 1..2,
            }],
            sentences: vec![Sentence { start: 0, end: 14 }],
        };

        let entity = &annotation.entities[0];
        let before = annotation.token_before(entity).unwrap();
        assert!(before.like_num);
        assert_eq!(annotation.entities_with(|l| l.is_location()).count(), 1);
        assert_eq!(
            annotation
                .entities_with(|l| l == EntityLabel::Person)
                .count(),
            0
        );
    }

    #[test]
    fn test_empty_annotation() {
        let annotation = Annotation::empty();
        assert!(annotation.is_empty());
        assert!(annotation.entities.is_empty());
    }
}
