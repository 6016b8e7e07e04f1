// Copyright 2025
// SPDX-License-Identifier: Apache-2.0
//
// Rule-based entity annotator
//
// Deterministic stand-in for a statistical NER model:
// - Regex tokenizer; block runs are single unlabeled tokens
// - Punctuation-driven sentence segmentation with abbreviation handling
// - Gazetteer and shape rules for dates, person names and places

use once_cell::sync::Lazy;
use regex::Regex;
use std::ops::Range;

use super::annotator::{
    Annotation, EntityAnnotator, EntityLabel, EntitySpan, Iob, PlaceKind, Sentence, Token,
};
use super::gazetteer::{
    ABBREVIATIONS, AMBIGUOUS_MONTHS, DEICTICS, FACILITY_SUFFIXES, FIRST_NAMES, FUNCTION_WORDS,
    MONTHS, NATURAL_PREFIXES, NATURAL_SUFFIXES, NUMBER_WORDS, PERIODS, PLACE_INDEX,
    RELATIVE_DAYS, TEMPORAL_PREPOSITIONS, TITLES, WEEKDAYS,
};
use super::masking::BLOCK;
use crate::error::Result;

static TOKEN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"█+|[\p{L}\p{N}]+(?:['’./\-][\p{L}\p{N}]+)*|\S").expect("token pattern should compile")
});

static NUMERIC_DATE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^(?:\d{1,2}[/.\-]\d{1,2}[/.\-](?:\d{4}|\d{2})|\d{4}-\d{1,2}-\d{1,2})$")
        .expect("numeric date pattern should compile")
});

static DAY: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^(?:[1-9]|0[1-9]|[12]\d|3[01])(?:st|nd|rd|th)?$").expect("day pattern should compile")
});

static YEAR: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^(?:1[5-9]|20)\d{2}$").expect("year pattern should compile"));

static DECADE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^(?:1[5-9]|20)\d0s$").expect("decade pattern should compile"));

static NUMBER: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\d+(?:[.,]\d+)*$").expect("number pattern should compile"));

/// Built-in annotator backed by gazetteers and shape rules.
#[derive(Debug, Clone, Copy, Default)]
pub struct RuleAnnotator;

impl RuleAnnotator {
    pub fn new() -> Self {
        Self
    }
}

impl EntityAnnotator for RuleAnnotator {
    fn backend_id(&self) -> &str {
        "rules"
    }

    fn annotate(&self, text: &str) -> Result<Annotation> {
        if text.trim().is_empty() {
            return Ok(Annotation::empty());
        }

        let spans = tokenize(text);
        let sentences = segment(text, &spans);

        let mut labeler = Labeler::new(text, &spans, &sentences);
        labeler.tag_dates();
        labeler.tag_persons();
        labeler.tag_places();

        Ok(labeler.finish())
    }
}

// ============================================================================
// Tokenization
// ============================================================================

fn tokenize(text: &str) -> Vec<Range<usize>> {
    let mut spans = Vec::new();
    for m in TOKEN.find_iter(text) {
        let word = m.as_str();
        // "John's" -> "John" + "'s"
        let stem = ["'s", "’s"]
            .iter()
            .find(|suffix| word.len() > suffix.len() && word.ends_with(*suffix))
            .map(|suffix| word.len() - suffix.len());

        match stem {
            Some(len) => {
                spans.push(m.start()..m.start() + len);
                spans.push(m.start() + len..m.end());
            }
            None => spans.push(m.range()),
        }
    }
    spans
}

// ============================================================================
// Sentence segmentation
// ============================================================================

fn is_terminal(word: &str) -> bool {
    matches!(word, "." | "!" | "?" | "…")
}

fn is_closer(word: &str) -> bool {
    is_terminal(word) || matches!(word, "\"" | "'" | "”" | "’" | ")" | "]")
}

fn opens_sentence(word: &str) -> bool {
    word.chars().next().is_some_and(|c| {
        c.is_uppercase() || c.is_ascii_digit() || c == BLOCK || "\"'“‘([".contains(c)
    })
}

fn has_blank_line(gap: &str) -> bool {
    gap.matches('\n').count() >= 2
}

/// A period that belongs to the preceding word rather than ending the sentence.
fn is_abbreviation_period(text: &str, spans: &[Range<usize>], i: usize) -> bool {
    if &text[spans[i].clone()] != "." || i == 0 || spans[i - 1].end != spans[i].start {
        return false;
    }
    let prev = &text[spans[i - 1].clone()];
    let single_initial = prev.chars().count() == 1 && prev.chars().all(char::is_uppercase);
    let dotted = prev.contains('.') && prev.chars().all(|c| c.is_alphabetic() || c == '.');
    single_initial || dotted || ABBREVIATIONS.contains(prev.to_lowercase().as_str())
}

/// Group tokens into sentences, returned as token index ranges.
fn segment(text: &str, spans: &[Range<usize>]) -> Vec<Range<usize>> {
    let mut sentences = Vec::new();
    let mut start = 0;
    let mut i = 0;

    while i < spans.len() {
        let word = &text[spans[i].clone()];
        let mut boundary = None;

        if is_terminal(word) && !is_abbreviation_period(text, spans, i) {
            let mut last = i;
            while last + 1 < spans.len()
                && spans[last + 1].start == spans[last].end
                && is_closer(&text[spans[last + 1].clone()])
            {
                last += 1;
            }
            let ends = match spans.get(last + 1) {
                None => true,
                Some(next) => opens_sentence(&text[next.clone()]),
            };
            if ends {
                boundary = Some(last);
            }
        }

        if boundary.is_none()
            && i + 1 < spans.len()
            && has_blank_line(&text[spans[i].end..spans[i + 1].start])
        {
            boundary = Some(i);
        }

        match boundary {
            Some(last) => {
                sentences.push(start..last + 1);
                start = last + 1;
                i = last + 1;
            }
            None => i += 1,
        }
    }

    if start < spans.len() {
        sentences.push(start..spans.len());
    }
    sentences
}

// ============================================================================
// Entity labeling
// ============================================================================

fn is_name_part(word: &str) -> bool {
    let mut chars = word.chars();
    let starts_upper = chars.next().is_some_and(char::is_uppercase);
    starts_upper
        && word.chars().all(|c| c.is_alphabetic() || c == '-' || c == '\'')
        && !FUNCTION_WORDS.contains(word)
        && !TITLES.contains(word)
        && !MONTHS.contains(word)
        && !WEEKDAYS.contains(word)
        && !NATURAL_SUFFIXES.contains(word)
        && !FACILITY_SUFFIXES.contains(word)
}

fn is_initial(word: &str) -> bool {
    word.chars().count() == 1 && word.chars().all(char::is_uppercase)
}

fn is_like_num(word: &str) -> bool {
    NUMBER.is_match(word) || NUMBER_WORDS.contains(word.to_lowercase().as_str())
}

struct Labeler<'a> {
    text: &'a str,
    spans: &'a [Range<usize>],
    sentences: &'a [Range<usize>],
    sentence_of: Vec<usize>,
    taken: Vec<bool>,
    entities: Vec<(EntityLabel, Range<usize>)>,
}

impl<'a> Labeler<'a> {
    fn new(text: &'a str, spans: &'a [Range<usize>], sentences: &'a [Range<usize>]) -> Self {
        let mut sentence_of = vec![0; spans.len()];
        for (idx, sentence) in sentences.iter().enumerate() {
            for slot in &mut sentence_of[sentence.clone()] {
                *slot = idx;
            }
        }

        Self {
            text,
            spans,
            sentences,
            sentence_of,
            taken: vec![false; spans.len()],
            entities: Vec::new(),
        }
    }

    fn len(&self) -> usize {
        self.spans.len()
    }

    fn word(&self, i: usize) -> &'a str {
        &self.text[self.spans[i].clone()]
    }

    fn lower(&self, i: usize) -> String {
        self.word(i).to_lowercase()
    }

    /// Tokens `a` and `a + 1` are on one line, separated by spaces at most.
    fn inline(&self, a: usize) -> bool {
        self.text[self.spans[a].end..self.spans[a + 1].start]
            .chars()
            .all(|c| c == ' ' || c == '\t')
    }

    fn touching(&self, a: usize) -> bool {
        self.spans[a].end == self.spans[a + 1].start
    }

    fn free(&self, i: usize) -> bool {
        i < self.len() && !self.taken[i]
    }

    fn mark(&mut self, label: EntityLabel, range: Range<usize>) -> bool {
        if range.is_empty()
            || range.end > self.len()
            || self.sentence_of[range.start] != self.sentence_of[range.end - 1]
            || range.clone().any(|k| self.taken[k])
        {
            return false;
        }
        for k in range.clone() {
            self.taken[k] = true;
        }
        self.entities.push((label, range));
        true
    }

    /// Extend over up to `max` name parts starting at `j`, within the sentence of `anchor`.
    fn name_run(&self, anchor: usize, j: usize, max: usize) -> usize {
        let sentence = self.sentence_of[anchor];
        let mut end = j;
        let mut parts = 0;

        while parts < max
            && self.free(end)
            && self.sentence_of[end] == sentence
            && end > 0
            && self.inline(end - 1)
        {
            let word = self.word(end);
            if is_initial(word) && self.free(end + 1) && self.word(end + 1) == "." && self.touching(end) {
                end += 2;
            } else if is_name_part(word) {
                end += 1;
            } else {
                break;
            }
            parts += 1;
        }
        end
    }

    /// Walk backwards over up to `max` name parts ending just before `i`.
    fn name_run_back(&self, i: usize, max: usize) -> usize {
        let sentence = self.sentence_of[i];
        let mut start = i;
        while start > 0
            && i - start < max
            && self.free(start - 1)
            && self.sentence_of[start - 1] == sentence
            && self.inline(start - 1)
            && is_name_part(self.word(start - 1))
        {
            start -= 1;
        }
        start
    }

    // ------------------------------------------------------------------ dates

    fn tag_dates(&mut self) {
        let mut i = 0;
        while i < self.len() {
            if let Some(range) = self.date_at(i) {
                let end = range.end;
                if self.mark(EntityLabel::Date, range) {
                    i = end;
                    continue;
                }
            }
            i += 1;
        }
    }

    fn date_at(&self, i: usize) -> Option<Range<usize>> {
        let word = self.word(i);
        let lower = self.lower(i);

        if NUMERIC_DATE.is_match(word) || DECADE.is_match(word) {
            return Some(i..i + 1);
        }
        if RELATIVE_DAYS.contains(lower.as_str()) {
            return Some(i..i + 1);
        }
        if WEEKDAYS.contains(word) || word.strip_suffix('s').is_some_and(|w| WEEKDAYS.contains(w)) {
            return Some(i..i + 1);
        }
        if DEICTICS.contains(lower.as_str())
            && i + 1 < self.len()
            && self.inline(i)
            && PERIODS.contains(self.lower(i + 1).as_str())
        {
            return Some(i..i + 2);
        }
        if MONTHS.contains(word) {
            return self.month_date(i);
        }
        if YEAR.is_match(word) && i > 0 && TEMPORAL_PREPOSITIONS.contains(self.lower(i - 1).as_str()) {
            return Some(i..i + 1);
        }
        None
    }

    fn month_date(&self, i: usize) -> Option<Range<usize>> {
        let n = self.len();
        let mut start = i;
        let mut end = i + 1;

        if i >= 1 && DAY.is_match(self.word(i - 1)) {
            start = i - 1;
        } else if i >= 2 && self.lower(i - 1) == "of" && DAY.is_match(self.word(i - 2)) {
            start = i - 2;
        }

        if end < n && DAY.is_match(self.word(end)) {
            end += 1;
        }
        if end < n && YEAR.is_match(self.word(end)) {
            end += 1;
        } else if end + 1 < n && self.word(end) == "," && YEAR.is_match(self.word(end + 1)) {
            end += 2;
        }

        if AMBIGUOUS_MONTHS.contains(self.word(i)) && end - start == 1 {
            return None;
        }
        Some(start..end)
    }

    // ---------------------------------------------------------------- persons

    fn tag_persons(&mut self) {
        for i in 0..self.len() {
            if !self.free(i) {
                continue;
            }
            let word = self.word(i);

            if TITLES.contains(word) {
                let mut j = i + 1;
                if self.free(j) && self.word(j) == "." && self.touching(i) {
                    j += 1;
                }
                if j < self.len() {
                    let end = self.name_run(i, j, 3);
                    if end > j {
                        self.mark(EntityLabel::Person, j..end);
                    }
                }
            } else if FIRST_NAMES.contains(word) {
                let end = if i + 1 < self.len() {
                    self.name_run(i, i + 1, 3)
                } else {
                    i + 1
                };
                self.mark(EntityLabel::Person, i..end);
            }
        }
    }

    // ----------------------------------------------------------------- places

    fn tag_places(&mut self) {
        // Natural features and facilities before the gazetteer, so
        // "Lake Michigan" is one location rather than a lake plus a state.
        for i in 0..self.len() {
            if self.free(i) && NATURAL_PREFIXES.contains(self.word(i)) && i + 1 < self.len() {
                let end = self.name_run(i, i + 1, 3);
                if end > i + 1 {
                    self.mark(EntityLabel::Location(PlaceKind::Loc), i..end);
                }
            }
        }

        for i in 0..self.len() {
            let word = self.word(i);
            let kind = if NATURAL_SUFFIXES.contains(word) {
                PlaceKind::Loc
            } else if FACILITY_SUFFIXES.contains(word) {
                PlaceKind::Fac
            } else {
                continue;
            };
            if !self.free(i) {
                continue;
            }
            let start = self.name_run_back(i, 3);
            if start < i {
                self.mark(EntityLabel::Location(kind), start..i + 1);
            }
        }

        let mut i = 0;
        while i < self.len() {
            match self.gazetteer_match(i) {
                Some(len) if self.mark(EntityLabel::Location(PlaceKind::Gpe), i..i + len) => i += len,
                _ => i += 1,
            }
        }
    }

    fn gazetteer_match(&self, i: usize) -> Option<usize> {
        let candidates = PLACE_INDEX.get(self.word(i))?;
        candidates
            .iter()
            .find(|parts| {
                i + parts.len() <= self.len()
                    && parts
                        .iter()
                        .enumerate()
                        .all(|(k, part)| self.word(i + k) == *part && (k == 0 || self.inline(i + k - 1)))
            })
            .map(|parts| parts.len())
    }

    // ----------------------------------------------------------------- output

    fn finish(mut self) -> Annotation {
        self.entities.sort_by_key(|(_, range)| range.start);

        let mut tokens: Vec<Token> = self
            .spans
            .iter()
            .enumerate()
            .map(|(index, span)| {
                let text = &self.text[span.clone()];
                Token {
                    index,
                    text: text.to_string(),
                    start: span.start,
                    end: span.end,
                    label: EntityLabel::None,
                    iob: Iob::Outside,
                    entity: None,
                    like_num: is_like_num(text),
                    sentence: self.sentence_of[index],
                }
            })
            .collect();

        let entities = self
            .entities
            .iter()
            .enumerate()
            .map(|(idx, (label, range))| {
                for k in range.clone() {
                    let token = &mut tokens[k];
                    token.label = *label;
                    token.entity = Some(idx);
                    token.iob = if k == range.start { Iob::Begin } else { Iob::Inside };
                }
                EntitySpan {
                    label: *label,
                    start: self.spans[range.start].start,
                    end: self.spans[range.end - 1].end,
                    tokens: range.clone(),
                }
            })
            .collect();

        let sentences = self
            .sentences
            .iter()
            .map(|range| Sentence {
                start: self.spans[range.start].start,
                end: self.spans[range.end - 1].end,
            })
            .collect();

        Annotation {
            tokens,
            entities,
            sentences,
        }
    }
}
