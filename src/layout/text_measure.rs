//! Text Measurement
//!
//! The viewer core needs two things from a text backend: how far each
//! character advances the pen, and how tall a line is. Everything else
//! (intrinsic sizing for layout, wrapping for the rasterizer, pointer to
//! character mapping for selection) is derived from those here.
//!
//! Two backends ship with the crate:
//! - [`FixedAdvance`]: every character is the same width.
//! - [`CellMetrics`]: terminal cells, with East Asian wide characters taking
//!   two cells and control characters none (via `unicode-width`).

use std::ops::Range;

use unicode_width::UnicodeWidthChar;

use super::tree::TextConfig;

// =============================================================================
// Metrics Backend
// =============================================================================

/// Glyph metrics supplied by the host's font backend.
///
/// Advances must be non-negative so that measured width is monotonic in
/// character count.
pub trait TextMetrics {
    /// Horizontal advance of one character.
    fn char_advance(&self, ch: char, config: &TextConfig) -> f32;

    /// Height of one line of text.
    fn line_height(&self, config: &TextConfig) -> f32;

    /// Total advance of `text` on a single line (newlines have no width).
    fn measure(&self, text: &str, config: &TextConfig) -> f32 {
        text.chars()
            .filter(|&c| c != '\n')
            .map(|c| self.char_advance(c, config))
            .sum()
    }
}

/// Every character advances by the same amount.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FixedAdvance {
    pub advance: f32,
    pub line_height: f32,
}

impl FixedAdvance {
    pub const fn new(advance: f32, line_height: f32) -> Self {
        Self { advance, line_height }
    }
}

impl Default for FixedAdvance {
    /// Ten units per character on thirty-unit lines.
    fn default() -> Self {
        Self::new(10.0, 30.0)
    }
}

impl TextMetrics for FixedAdvance {
    fn char_advance(&self, ch: char, _config: &TextConfig) -> f32 {
        if ch == '\n' { 0.0 } else { self.advance }
    }

    fn line_height(&self, _config: &TextConfig) -> f32 {
        self.line_height
    }
}

/// Monospace terminal cells scaled to layout units.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CellMetrics {
    pub cell_width: f32,
    pub cell_height: f32,
}

impl CellMetrics {
    pub const fn new(cell_width: f32, cell_height: f32) -> Self {
        Self { cell_width, cell_height }
    }
}

impl Default for CellMetrics {
    fn default() -> Self {
        Self::new(8.0, 16.0)
    }
}

impl TextMetrics for CellMetrics {
    fn char_advance(&self, ch: char, _config: &TextConfig) -> f32 {
        char_cells(ch) as f32 * self.cell_width
    }

    fn line_height(&self, _config: &TextConfig) -> f32 {
        self.cell_height
    }
}

/// Width of a character in terminal cells.
pub fn char_cells(ch: char) -> u16 {
    ch.width().unwrap_or(0) as u16
}

/// Width of a string in terminal cells.
pub fn string_cells(s: &str) -> u16 {
    s.chars().fold(0u16, |acc, c| acc.saturating_add(char_cells(c)))
}

// =============================================================================
// Wrapping
// =============================================================================

/// Split `text` into lines no wider than `max_width`.
///
/// Breaks at explicit newlines and, within a line, before the first
/// character that would overflow (character wrapping). A line always holds at
/// least one character so wrapping makes progress. Returned ranges are byte
/// ranges into `text` and exclude the newline characters.
pub fn wrap_lines(
    text: &str,
    max_width: f32,
    metrics: &dyn TextMetrics,
    config: &TextConfig,
) -> Vec<Range<usize>> {
    let mut lines = Vec::new();
    if text.is_empty() {
        return lines;
    }

    let mut line_start = 0usize;
    let mut line_width = 0f32;

    for (offset, ch) in text.char_indices() {
        if ch == '\n' {
            lines.push(line_start..offset);
            line_start = offset + ch.len_utf8();
            line_width = 0.0;
            continue;
        }

        let advance = metrics.char_advance(ch, config);
        if line_width + advance > max_width && offset > line_start {
            lines.push(line_start..offset);
            line_start = offset;
            line_width = 0.0;
        }
        line_width += advance;
    }

    if line_start < text.len() {
        lines.push(line_start..text.len());
    }

    lines
}

/// Size of `text` when wrapped to `max_width`: the widest line and the total
/// height of all lines.
pub fn measure_wrapped(
    text: &str,
    max_width: f32,
    metrics: &dyn TextMetrics,
    config: &TextConfig,
) -> (f32, f32) {
    let lines = wrap_lines(text, max_width, metrics, config);
    let width = lines
        .iter()
        .map(|range| metrics.measure(&text[range.clone()], config))
        .fold(0f32, f32::max);
    let height = lines.len() as f32 * metrics.line_height(config);
    (width, height)
}
