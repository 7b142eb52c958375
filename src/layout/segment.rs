//! Text Segmenter - Split a text run around a selection.
//!
//! The builder renders a selectable document as up to three adjacent runs:
//! text before the selection, the selection itself (highlighted), and text
//! after it. Segments borrow from the source text and are rebuilt every frame.

use std::ops::Range;

/// A contiguous run of the source text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TextSegment<'a> {
    pub text: &'a str,
    /// Character range in the source text.
    pub range: (usize, usize),
    pub highlighted: bool,
}

impl TextSegment<'_> {
    pub fn char_len(&self) -> usize {
        self.range.1 - self.range.0
    }
}

/// Byte range of the characters `start..end` of `text`.
///
/// Both offsets are clamped to the character count; `end < start` yields an
/// empty range at `start`.
pub fn char_range_to_bytes(text: &str, start: usize, end: usize) -> Range<usize> {
    let byte_at = |chars: usize| {
        text.char_indices()
            .nth(chars)
            .map(|(offset, _)| offset)
            .unwrap_or(text.len())
    };
    let from = byte_at(start);
    let to = byte_at(end.max(start));
    from..to
}

/// Split `text` at the selection `start..end` (either order).
///
/// An empty selection yields one plain segment covering the whole text.
/// Otherwise empty runs are omitted, so the result has one to three segments
/// and exactly one of them is highlighted. Concatenating the segments always
/// reproduces `text`.
pub fn segment_text(text: &str, start: usize, end: usize) -> Vec<TextSegment<'_>> {
    let len = text.chars().count();
    let (start, end) = if start > end { (end, start) } else { (start, end) };
    let start = start.min(len);
    let end = end.min(len);

    if start == end {
        return vec![TextSegment {
            text,
            range: (0, len),
            highlighted: false,
        }];
    }

    let bytes = char_range_to_bytes(text, start, end);
    let pieces = [
        (0, start, 0..bytes.start, false),
        (start, end, bytes.clone(), true),
        (end, len, bytes.end..text.len(), false),
    ];

    pieces
        .into_iter()
        .filter(|(from, to, _, _)| from < to)
        .map(|(from, to, byte_range, highlighted)| TextSegment {
            text: &text[byte_range],
            range: (from, to),
            highlighted,
        })
        .collect()
}
