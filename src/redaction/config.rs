// Copyright 2025
// SPDX-License-Identifier: Apache-2.0
//
// Configuration types for the redaction engine

use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::{Path, PathBuf};

use crate::error::{RedactError, Result};

/// Redaction categories, in the fixed order the engine applies them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Category {
    Name,
    Date,
    Phone,
    Address,
    Email,
    Concept,
}

impl Category {
    /// Every category in pipeline order.
    pub const ALL: [Category; 6] = [
        Category::Name,
        Category::Date,
        Category::Phone,
        Category::Address,
        Category::Email,
        Category::Concept,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Category::Name => "name",
            Category::Date => "date",
            Category::Phone => "phone",
            Category::Address => "address",
            Category::Email => "email",
            Category::Concept => "concept",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// How overlapping name matches inside one pass are counted.
///
/// Masking is identical under both policies; only the NAME counter differs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum OverlapPolicy {
    /// A match overlapping an already counted match adds nothing.
    #[default]
    CountOnce,
    /// Every match counts, even when it covers text another match covered.
    CountAll,
}

/// Category toggles.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Categories {
    pub names: bool,
    pub dates: bool,
    pub phones: bool,
    pub address: bool,
    pub emails: bool,
}

impl Categories {
    pub fn any(&self) -> bool {
        self.names || self.dates || self.phones || self.address || self.emails
    }

    /// OR the toggles of `other` into `self`.
    pub fn enable_from(&mut self, other: Categories) {
        self.names |= other.names;
        self.dates |= other.dates;
        self.phones |= other.phones;
        self.address |= other.address;
        self.emails |= other.emails;
    }
}

/// Full configuration for one redaction run.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct RedactionConfig {
    pub categories: Categories,

    /// Seed keywords for concept redaction.
    pub concepts: Vec<String>,

    /// Names masked verbatim wherever they appear, regardless of the annotator.
    pub deny_list: Vec<String>,

    pub overlap_policy: OverlapPolicy,

    /// Expand concept keywords with synonyms and hypernyms.
    pub expand_concepts: bool,

    /// JSON thesaurus replacing the built-in one.
    pub thesaurus: Option<PathBuf>,
}

impl Default for RedactionConfig {
    fn default() -> Self {
        Self {
            categories: Categories::default(),
            concepts: Vec::new(),
            deny_list: Vec::new(),
            overlap_policy: OverlapPolicy::CountOnce,
            expand_concepts: true,
            thesaurus: None,
        }
    }
}

impl RedactionConfig {
    /// Load a configuration from a TOML file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let raw = std::fs::read_to_string(path).map_err(|e| {
            RedactError::Configuration(format!("cannot read config {}: {}", path.display(), e))
        })?;
        Self::from_toml(&raw)
    }

    pub fn from_toml(raw: &str) -> Result<Self> {
        Ok(toml::from_str(raw)?)
    }

    /// Categories the engine will run, in pipeline order.
    pub fn enabled(&self) -> Vec<Category> {
        Category::ALL
            .into_iter()
            .filter(|category| match category {
                Category::Name => self.categories.names,
                Category::Date => self.categories.dates,
                Category::Phone => self.categories.phones,
                Category::Address => self.categories.address,
                Category::Email => self.categories.emails,
                Category::Concept => !self.concepts.is_empty(),
            })
            .collect()
    }

    /// Reject configurations that would do nothing or carry unusable input.
    pub fn validate(&self) -> Result<()> {
        if !self.categories.any() && self.concepts.is_empty() {
            return Err(RedactError::Configuration(
                "nothing to redact: enable at least one category or pass --concept".to_string(),
            ));
        }

        if self.concepts.iter().any(|c| c.trim().is_empty()) {
            return Err(RedactError::Configuration(
                "concept keywords must not be blank".to_string(),
            ));
        }

        if self.deny_list.iter().any(|n| n.trim().is_empty()) {
            return Err(RedactError::Configuration(
                "deny-list names must not be blank".to_string(),
            ));
        }

        Ok(())
    }
}
