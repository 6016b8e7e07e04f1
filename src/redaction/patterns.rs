// Copyright 2025
// SPDX-License-Identifier: Apache-2.0
//
// Regex patterns for the annotation-independent categories
// and builders for the configurable word lists

use once_cell::sync::Lazy;
use regex::{Regex, RegexBuilder};

use super::masking::MaskStyle;
use crate::error::{RedactError, Result};

/// Width of the run that replaces any phone number.
pub const PHONE_MASK_WIDTH: usize = 12;
/// Width of the run that replaces a street fragment.
pub const STREET_MASK_WIDTH: usize = 20;
/// Width of the run that replaces a unit designator.
pub const UNIT_MASK_WIDTH: usize = 10;
/// Width of the run that replaces a ZIP code.
pub const ZIP_MASK_WIDTH: usize = 5;

/// Pattern definition (pattern, description, mask style)
pub type PatternDef = (&'static str, &'static str, MaskStyle);

/// Compiled pattern with metadata
#[derive(Debug, Clone)]
pub struct CompiledPattern {
    pub regex: Regex,
    pub description: &'static str,
    pub style: MaskStyle,
}

fn compile_defs(defs: &[PatternDef]) -> Vec<CompiledPattern> {
    defs.iter()
        .map(|(pattern, description, style)| CompiledPattern {
            regex: Regex::new(pattern).expect("built-in pattern should compile"),
            description,
            style: *style,
        })
        .collect()
}

// (DDD) DDD-DDDD, DDD-DDD-DDDD, DDD.DDD.DDDD, DDDD DDD DDDD and unseparated runs
pub static PHONE: Lazy<CompiledPattern> = Lazy::new(|| CompiledPattern {
    regex: Regex::new(r"(?:\(\d{3}\)[-. ]?|\b\d{3,4}[-. ]?)\d{3}[-. ]?\d{4}\b")
        .expect("phone pattern should compile"),
    description: "US phone number",
    style: MaskStyle::Fixed(PHONE_MASK_WIDTH),
});

// Local part may already hold blocks from the name pass.
pub static EMAIL: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?P<local>[A-Za-z0-9._%+\-█]+)@(?P<domain>[A-Za-z0-9.\-]+\.[A-Za-z]{2,})\b")
        .expect("email pattern should compile")
});

/// Structured address fragments, applied in this order.
static ADDRESS_DEFS: &[PatternDef] = &[
    (
        r"\b\d{1,6}[ \t]+(?:[A-Za-z][A-Za-z'.\-]*[ \t]+){1,3}(?:(?:Street|Avenue|Road|Boulevard|Lane|Drive|Court|Place|Terrace|Parkway|Circle|Highway|Way)\b|(?:St|Ave|Rd|Blvd|Ln|Dr|Ct|Pl|Pkwy|Hwy)(?:\.|\b))",
        "Street number and name",
        MaskStyle::Fixed(STREET_MASK_WIDTH),
    ),
    (
        r"\b(?:Apt|Apartment|Suite|Ste|Unit|Floor|Fl|Room|Rm)\.?[ \t]*#?[ \t]*\d+[A-Za-z]?\b",
        "Unit or apartment designator",
        MaskStyle::Fixed(UNIT_MASK_WIDTH),
    ),
    (
        r"\b\d{5}(?:-\d{4})?\b",
        "ZIP or ZIP+4 code",
        MaskStyle::Fixed(ZIP_MASK_WIDTH),
    ),
];

pub static ADDRESS_PATTERNS: Lazy<Vec<CompiledPattern>> = Lazy::new(|| compile_defs(ADDRESS_DEFS));

/// Wrap a literal term with word boundaries where its ends are word characters.
fn word_bounded(term: &str) -> String {
    let body = term
        .split_whitespace()
        .map(regex::escape)
        .collect::<Vec<_>>()
        .join(r"\s+");

    let is_word = |c: Option<char>| c.is_some_and(|c| c.is_alphanumeric() || c == '_');
    let prefix = if is_word(term.chars().next()) { r"\b" } else { "" };
    let suffix = if is_word(term.chars().last()) { r"\b" } else { "" };
    format!("{prefix}{body}{suffix}")
}

/// Case-insensitive whole-word alternation over `terms`.
///
/// Longer terms are tried first so `Jane Roe` wins over `Jane`.
/// Returns `None` for an empty list.
pub fn compile_term_list<S: AsRef<str>>(terms: &[S]) -> Result<Option<Regex>> {
    let mut cleaned: Vec<&str> = terms
        .iter()
        .map(|t| t.as_ref().trim())
        .filter(|t| !t.is_empty())
        .collect();

    if cleaned.is_empty() {
        return Ok(None);
    }

    cleaned.sort_by(|a, b| b.len().cmp(&a.len()).then(a.cmp(b)));
    cleaned.dedup();

    let alternation = cleaned
        .iter()
        .map(|t| word_bounded(t))
        .collect::<Vec<_>>()
        .join("|");

    RegexBuilder::new(&format!("(?:{alternation})"))
        .case_insensitive(true)
        .build()
        .map(Some)
        .map_err(|e| RedactError::Pattern(format!("failed to compile term list: {e}")))
}
