// Copyright 2025
// SPDX-License-Identifier: Apache-2.0
//
// Block-character masking of text spans

use std::borrow::Cow;

/// Character used to obscure redacted text.
pub const BLOCK: char = '█';

/// How a span is turned into block characters.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MaskStyle {
    /// One block per character, whitespace included.
    Solid,
    /// One block per non-whitespace character; whitespace is kept so
    /// `John Doe` becomes `████ ███`.
    Shape,
    /// A run of constant width, independent of the matched length.
    Fixed(usize),
}

/// A byte range of the current text to be masked.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MaskSpan {
    pub start: usize,
    pub end: usize,
    pub style: MaskStyle,
}

impl MaskSpan {
    pub fn new(start: usize, end: usize, style: MaskStyle) -> Self {
        Self { start, end, style }
    }

    pub fn overlaps(&self, other: &MaskSpan) -> bool {
        self.start < other.end && other.start < self.end
    }
}

/// A run of `len` block characters.
pub fn block_run(len: usize) -> String {
    std::iter::repeat(BLOCK).take(len).collect()
}

/// Mask a single value according to `style`.
pub fn mask_value(value: &str, style: MaskStyle) -> String {
    match style {
        MaskStyle::Solid => block_run(value.chars().count()),
        MaskStyle::Shape => value
            .chars()
            .map(|c| if c.is_whitespace() { c } else { BLOCK })
            .collect(),
        MaskStyle::Fixed(width) => block_run(width),
    }
}

/// True when `value` holds at least one block and nothing but blocks and whitespace.
///
/// Already-masked text is never masked or counted again.
pub fn is_masked(value: &str) -> bool {
    value.contains(BLOCK) && value.chars().all(|c| c == BLOCK || c.is_whitespace())
}

/// Sort spans and fold overlapping ones together.
///
/// A merged span keeps the style of its leftmost member.
pub fn merge_spans(mut spans: Vec<MaskSpan>) -> Vec<MaskSpan> {
    spans.sort_by(|a, b| a.start.cmp(&b.start).then(b.end.cmp(&a.end)));

    let mut merged: Vec<MaskSpan> = Vec::with_capacity(spans.len());
    for span in spans {
        match merged.last_mut() {
            Some(last) if span.start < last.end => {
                last.end = last.end.max(span.end);
            }
            _ => merged.push(span),
        }
    }
    merged
}

/// Apply masking spans to `text`.
///
/// Spans are merged first so no character is masked twice, then replaced
/// from the end of the text backwards so earlier offsets stay valid.
/// Spans that fall outside the text or off a char boundary are ignored.
pub fn apply_masks(text: &str, spans: Vec<MaskSpan>) -> Cow<'_, str> {
    let valid: Vec<MaskSpan> = spans
        .into_iter()
        .filter(|s| {
            s.start < s.end
                && s.end <= text.len()
                && text.is_char_boundary(s.start)
                && text.is_char_boundary(s.end)
        })
        .collect();

    if valid.is_empty() {
        return Cow::Borrowed(text);
    }

    let mut result = text.to_string();
    for span in merge_spans(valid).into_iter().rev() {
        let masked = mask_value(&text[span.start..span.end], span.style);
        result.replace_range(span.start..span.end, &masked);
    }

    Cow::Owned(result)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_block_run() {
        assert_eq!(block_run(3), "███");
        assert_eq!(block_run(0), "");
    }

    #[test]
    fn test_shape_keeps_whitespace() {
        assert_eq!(mask_value("John Doe", MaskStyle::Shape), "████ ███");
        assert_eq!(mask_value("New York City", MaskStyle::Solid).chars().count(), 13);
    }

    #[test]
    fn test_fixed_ignores_length() {
        assert_eq!(mask_value("(555) 123-4567", MaskStyle::Fixed(12)), block_run(12));
        assert_eq!(mask_value("1", MaskStyle::Fixed(5)), block_run(5));
    }

    #[test]
    fn test_is_masked() {
        assert!(is_masked("████ ███"));
        assert!(!is_masked("████.smith"));
        assert!(!is_masked("   "));
        assert!(!is_masked(""));
    }

    #[test]
    fn test_apply_masks_empty() {
        let text = "Nothing to hide";
        let result = apply_masks(text, Vec::new());
        assert!(matches!(result, Cow::Borrowed(_)));
        assert_eq!(result, text);
    }

    #[test]
    fn test_apply_masks_multibyte_offsets() {
        // Second span sits after a three-byte block character.
        let text = "█ Ana met Bob";
        let ana = text.find("Ana").unwrap();
        let bob = text.find("Bob").unwrap();
        let result = apply_masks(
            text,
            vec![
                MaskSpan::new(ana, ana + 3, MaskStyle::Shape),
                MaskSpan::new(bob, bob + 3, MaskStyle::Shape),
            ],
        );
        assert_eq!(result, "█ ███ met ███");
    }

    #[test]
    fn test_overlapping_spans_merge() {
        let text = "john.doe@example.com";
        let result = apply_masks(
            text,
            vec![
                MaskSpan::new(0, 8, MaskStyle::Shape),
                MaskSpan::new(0, 4, MaskStyle::Shape),
            ],
        );
        assert_eq!(result, "████████@example.com");
    }

    #[test]
    fn test_invalid_spans_ignored() {
        let text = "█abc";
        // Offset 1 is inside the block character.
        let result = apply_masks(text, vec![MaskSpan::new(1, 4, MaskStyle::Solid)]);
        assert_eq!(result, text);
    }

    #[test]
    fn test_merge_spans_adjacent_stay_separate() {
        let merged = merge_spans(vec![
            MaskSpan::new(5, 8, MaskStyle::Fixed(5)),
            MaskSpan::new(0, 5, MaskStyle::Fixed(20)),
        ]);
        assert_eq!(merged.len(), 2);
        assert_eq!(merged[0].start, 0);
    }
}
