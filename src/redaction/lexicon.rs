// Copyright 2025
// SPDX-License-Identifier: Apache-2.0
//
// Lexical knowledge base and concept keyword expansion

use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet, HashMap};
use std::path::Path;
use tracing::{debug, warn};

use crate::error::{RedactError, Result};

static BUILTIN_THESAURUS: &str = include_str!("../../data/thesaurus.json");

/// Source of related words for concept expansion.
///
/// Lookups are fallible: a remote or file-backed knowledge base can be
/// unavailable, in which case callers fall back to literal keywords.
pub trait LexicalKnowledgeBase: Send + Sync {
    /// Words sharing a sense with `word`.
    fn synonyms(&self, word: &str) -> Result<Vec<String>>;

    /// Words one level more general than `word`.
    fn hypernyms(&self, word: &str) -> Result<Vec<String>>;
}

/// Related words for one headword.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LexicalEntry {
    #[serde(default)]
    pub synonyms: Vec<String>,
    #[serde(default)]
    pub hypernyms: Vec<String>,
}

/// In-memory knowledge base loaded from JSON.
///
/// ```json
/// { "car": { "synonyms": ["auto", "automobile"], "hypernyms": ["motor_vehicle"] } }
/// ```
#[derive(Debug, Clone, Default)]
pub struct Thesaurus {
    entries: HashMap<String, LexicalEntry>,
}

impl Thesaurus {
    /// Thesaurus shipped with the binary.
    pub fn builtin() -> Result<Self> {
        Self::from_json(BUILTIN_THESAURUS)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let raw = std::fs::read_to_string(path).map_err(|e| {
            RedactError::KnowledgeBase(format!("cannot read thesaurus {}: {}", path.display(), e))
        })?;
        Self::from_json(&raw)
    }

    /// Headwords that normalize to the same key are merged.
    pub fn from_json(raw: &str) -> Result<Self> {
        let parsed: BTreeMap<String, LexicalEntry> = serde_json::from_str(raw)
            .map_err(|e| RedactError::KnowledgeBase(format!("malformed thesaurus: {e}")))?;

        let mut entries: HashMap<String, LexicalEntry> = HashMap::with_capacity(parsed.len());
        for (word, entry) in parsed {
            let merged = entries.entry(normalize(&word)).or_default();
            merge_words(&mut merged.synonyms, entry.synonyms);
            merge_words(&mut merged.hypernyms, entry.hypernyms);
        }

        Ok(Self { entries })
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl LexicalKnowledgeBase for Thesaurus {
    fn synonyms(&self, word: &str) -> Result<Vec<String>> {
        Ok(self
            .entries
            .get(&normalize(word))
            .map(|e| e.synonyms.clone())
            .unwrap_or_default())
    }

    fn hypernyms(&self, word: &str) -> Result<Vec<String>> {
        Ok(self
            .entries
            .get(&normalize(word))
            .map(|e| e.hypernyms.clone())
            .unwrap_or_default())
    }
}

fn merge_words(into: &mut Vec<String>, words: Vec<String>) {
    for word in words {
        if !into.contains(&word) {
            into.push(word);
        }
    }
}

/// Case-fold, turn lemma underscores into spaces, collapse whitespace.
fn normalize(word: &str) -> String {
    word.replace('_', " ")
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
        .to_lowercase()
}

/// Seed keywords plus their lexical expansions, case-folded.
///
/// Ordered, so the same seeds and knowledge base always yield the same set.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ConceptKeywordSet {
    keywords: BTreeSet<String>,
}

impl ConceptKeywordSet {
    /// Seeds only, no expansion.
    pub fn literal<S: AsRef<str>>(seeds: &[S]) -> Self {
        let keywords = seeds
            .iter()
            .map(|s| normalize(s.as_ref()))
            .filter(|s| !s.is_empty())
            .collect();
        Self { keywords }
    }

    /// Seeds plus synonyms and one level of hypernyms from `kb`.
    ///
    /// A failed lookup keeps the literal seed and logs a warning.
    pub fn expand<S: AsRef<str>>(seeds: &[S], kb: Option<&dyn LexicalKnowledgeBase>) -> Self {
        let mut set = Self::literal(seeds);
        let Some(kb) = kb else {
            return set;
        };

        let literal: Vec<String> = set.keywords.iter().cloned().collect();
        for seed in &literal {
            match related(kb, seed) {
                Ok(words) => {
                    debug!(seed = %seed, related = words.len(), "expanded concept keyword");
                    set.keywords
                        .extend(words.iter().map(|w| normalize(w)).filter(|w| !w.is_empty()));
                }
                Err(e) => {
                    warn!(seed = %seed, error = %e, "knowledge base lookup failed; matching literally");
                }
            }
        }
        set
    }

    pub fn contains(&self, word: &str) -> bool {
        self.keywords.contains(&normalize(word))
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.keywords.iter().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.keywords.len()
    }

    pub fn is_empty(&self) -> bool {
        self.keywords.is_empty()
    }
}

fn related(kb: &dyn LexicalKnowledgeBase, word: &str) -> Result<Vec<String>> {
    let mut words = kb.synonyms(word)?;
    words.extend(kb.hypernyms(word)?);
    Ok(words)
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Unavailable;

    impl LexicalKnowledgeBase for Unavailable {
        fn synonyms(&self, _word: &str) -> Result<Vec<String>> {
            Err(RedactError::KnowledgeBase("offline".into()))
        }

        fn hypernyms(&self, _word: &str) -> Result<Vec<String>> {
            Err(RedactError::KnowledgeBase("offline".into()))
        }
    }

    #[test]
    fn test_builtin_parses() {
        let thesaurus = Thesaurus::builtin().unwrap();
        assert!(!thesaurus.is_empty());
        assert!(thesaurus.synonyms("Car").unwrap().contains(&"automobile".to_string()));
    }

    #[test]
    fn test_unknown_word_is_empty() {
        let thesaurus = Thesaurus::builtin().unwrap();
        assert!(thesaurus.synonyms("enron").unwrap().is_empty());
        assert!(thesaurus.hypernyms("enron").unwrap().is_empty());
    }

    #[test]
    fn test_malformed_json() {
        let err = Thesaurus::from_json("[1, 2]").unwrap_err();
        assert!(matches!(err, RedactError::KnowledgeBase(_)));
    }

    #[test]
    fn test_headwords_differing_by_case_are_merged() {
        let raw = r#"{"Car": {"synonyms": ["auto"]}, "car": {"synonyms": ["wagon", "auto"]}}"#;
        let expected = vec!["auto", "car", "wagon"];

        for _ in 0..32 {
            let thesaurus = Thesaurus::from_json(raw).unwrap();
            assert_eq!(thesaurus.len(), 1);
            assert_eq!(thesaurus.synonyms("car").unwrap(), vec!["auto", "wagon"]);

            let set = ConceptKeywordSet::expand(&["car"], Some(&thesaurus));
            assert_eq!(set.iter().collect::<Vec<_>>(), expected);
        }
    }

    #[test]
    fn test_literal_is_case_folded() {
        let set = ConceptKeywordSet::literal(&["Enron", "  Energy   Sector "]);
        let words: Vec<&str> = set.iter().collect();
        assert_eq!(words, vec!["energy sector", "enron"]);
    }

    #[test]
    fn test_expand_adds_synonyms_and_hypernyms() {
        let thesaurus = Thesaurus::from_json(
            r#"{"car": {"synonyms": ["auto", "Motorcar"], "hypernyms": ["motor_vehicle"]}}"#,
        )
        .unwrap();
        let set = ConceptKeywordSet::expand(&["CAR"], Some(&thesaurus));
        let words: Vec<&str> = set.iter().collect();
        assert_eq!(words, vec!["auto", "car", "motor vehicle", "motorcar"]);
    }

    #[test]
    fn test_expand_is_superset_of_literal() {
        let thesaurus = Thesaurus::builtin().unwrap();
        let seeds = ["fraud", "merger", "enron"];
        let literal = ConceptKeywordSet::literal(&seeds);
        let expanded = ConceptKeywordSet::expand(&seeds, Some(&thesaurus));
        assert!(literal.iter().all(|w| expanded.contains(w)));
        assert!(expanded.len() > literal.len());
    }

    #[test]
    fn test_expand_is_deterministic() {
        let thesaurus = Thesaurus::builtin().unwrap();
        let a = ConceptKeywordSet::expand(&["money", "gas"], Some(&thesaurus));
        let b = ConceptKeywordSet::expand(&["gas", "money"], Some(&thesaurus));
        assert_eq!(a, b);
    }

    #[test]
    fn test_unavailable_falls_back_to_literal() {
        let set = ConceptKeywordSet::expand(&["fraud"], Some(&Unavailable));
        assert_eq!(set, ConceptKeywordSet::literal(&["fraud"]));
    }
}
