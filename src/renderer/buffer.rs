//! FrameBuffer and command rasterization.
//!
//! The FrameBuffer is a 2D grid of Cells that represents what should be displayed
//! on the terminal. `rasterize` turns a frame's render commands into cells:
//!
//! - **Scaling**: layout units map to cells through `CellMetrics`; box edges
//!   round to the nearest cell boundary.
//! - **Alpha blending**: rectangle colors blend over the existing background.
//! - **Clipping**: scissor commands push and pop a clip rectangle.
//! - **Wide characters**: a wide glyph's second cell holds `'\0'` and is
//!   skipped on output.
//!
//! Corner radii have no terminal equivalent and are ignored.

use crate::layout::text_measure::{CellMetrics, char_cells, wrap_lines};
use crate::layout::tree::TextConfig;
use crate::pipeline::render_command::{RenderCommand, RenderCommandKind};
use crate::types::{Attr, BoundingBox, Cell, Rgba};

/// Marker stored in the cell covered by the right half of a wide glyph.
pub const CONTINUATION: char = '\0';

/// Text at or above this size is drawn bold.
const BOLD_FONT_SIZE: u16 = 24;

// =============================================================================
// Cell rectangles
// =============================================================================

/// Half-open rectangle of cells. Coordinates may be negative or past the
/// buffer before clipping.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CellRect {
    pub x0: i32,
    pub y0: i32,
    pub x1: i32,
    pub y1: i32,
}

impl CellRect {
    /// Cells covered by a layout-unit box.
    pub fn from_box(bounds: &BoundingBox, cell: &CellMetrics) -> Self {
        Self {
            x0: (bounds.x / cell.cell_width).round() as i32,
            y0: (bounds.y / cell.cell_height).round() as i32,
            x1: ((bounds.x + bounds.width) / cell.cell_width).round() as i32,
            y1: ((bounds.y + bounds.height) / cell.cell_height).round() as i32,
        }
    }

    pub fn intersect(&self, other: &CellRect) -> CellRect {
        CellRect {
            x0: self.x0.max(other.x0),
            y0: self.y0.max(other.y0),
            x1: self.x1.min(other.x1),
            y1: self.y1.min(other.y1),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.x1 <= self.x0 || self.y1 <= self.y0
    }

    #[inline]
    pub fn contains(&self, x: i32, y: i32) -> bool {
        x >= self.x0 && x < self.x1 && y >= self.y0 && y < self.y1
    }
}

// =============================================================================
// FrameBuffer
// =============================================================================

/// A 2D buffer of terminal cells.
///
/// Uses flat storage with row-major indexing: `index = y * width + x`
#[derive(Debug, Clone, PartialEq)]
pub struct FrameBuffer {
    width: u16,
    height: u16,
    cells: Vec<Cell>,
}

impl FrameBuffer {
    /// Create a new buffer filled with default cells.
    pub fn new(width: u16, height: u16) -> Self {
        let size = width as usize * height as usize;
        Self {
            width,
            height,
            cells: vec![Cell::default(); size],
        }
    }

    #[inline]
    pub fn width(&self) -> u16 {
        self.width
    }

    #[inline]
    pub fn height(&self) -> u16 {
        self.height
    }

    /// The whole buffer as a clip rectangle.
    pub fn bounds(&self) -> CellRect {
        CellRect {
            x0: 0,
            y0: 0,
            x1: self.width as i32,
            y1: self.height as i32,
        }
    }

    #[inline]
    fn index(&self, x: u16, y: u16) -> usize {
        y as usize * self.width as usize + x as usize
    }

    /// Check if coordinates are in bounds.
    #[inline]
    pub fn in_bounds(&self, x: u16, y: u16) -> bool {
        x < self.width && y < self.height
    }

    /// Get a cell reference (returns None if out of bounds).
    #[inline]
    pub fn get(&self, x: u16, y: u16) -> Option<&Cell> {
        if self.in_bounds(x, y) {
            self.cells.get(self.index(x, y))
        } else {
            None
        }
    }

    /// Get a mutable cell reference (returns None if out of bounds).
    #[inline]
    pub fn get_mut(&mut self, x: u16, y: u16) -> Option<&mut Cell> {
        if self.in_bounds(x, y) {
            let idx = self.index(x, y);
            self.cells.get_mut(idx)
        } else {
            None
        }
    }

    fn cell_mut(&mut self, x: i32, y: i32) -> Option<&mut Cell> {
        let x = u16::try_from(x).ok()?;
        let y = u16::try_from(y).ok()?;
        self.get_mut(x, y)
    }

    /// Get raw cells slice.
    #[inline]
    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    /// Clear the entire buffer to default cells.
    pub fn clear(&mut self) {
        self.cells.fill(Cell::default());
    }

    /// Characters of row `y`, continuation cells dropped. Mainly for tests.
    pub fn row_text(&self, y: u16) -> String {
        (0..self.width)
            .filter_map(|x| self.get(x, y))
            .map(|cell| cell.char)
            .filter(|&c| c != CONTINUATION)
            .collect()
    }

    // -------------------------------------------------------------------------
    // Drawing
    // -------------------------------------------------------------------------

    /// Blend `color` over the background of every cell in `rect ∩ clip`.
    pub fn fill_rect(&mut self, rect: CellRect, color: Rgba, clip: &CellRect) {
        let area = rect.intersect(clip).intersect(&self.bounds());
        if area.is_empty() || color.is_transparent() {
            return;
        }
        for y in area.y0..area.y1 {
            for x in area.x0..area.x1 {
                if let Some(cell) = self.cell_mut(x, y) {
                    cell.bg = Rgba::blend(color, cell.bg);
                }
            }
        }
    }

    /// Write one line of text starting at (`x`, `y`), keeping backgrounds.
    pub fn draw_line(&mut self, x: i32, y: i32, text: &str, fg: Rgba, attrs: Attr, clip: &CellRect) {
        let mut col = x;
        for ch in text.chars() {
            let width = char_cells(ch) as i32;
            if width == 0 {
                continue;
            }
            // Wide glyphs are all-or-nothing
            if (0..width).all(|dx| clip.contains(col + dx, y)) {
                if let Some(cell) = self.cell_mut(col, y) {
                    cell.char = ch;
                    cell.fg = fg;
                    cell.attrs = attrs;
                }
                for dx in 1..width {
                    if let Some(cell) = self.cell_mut(col + dx, y) {
                        cell.char = CONTINUATION;
                        cell.fg = fg;
                        cell.attrs = attrs;
                    }
                }
            }
            col += width;
        }
    }

    /// Draw a frame's commands in order.
    pub fn rasterize(&mut self, commands: &[RenderCommand], cell: &CellMetrics) {
        let mut clips: Vec<CellRect> = vec![self.bounds()];

        for command in commands {
            let rect = CellRect::from_box(&command.bounding_box, cell);
            let clip = clips.last().copied().unwrap_or_else(|| self.bounds());

            match &command.kind {
                RenderCommandKind::Rectangle { color, .. } => self.fill_rect(rect, *color, &clip),
                RenderCommandKind::Text {
                    text,
                    font_id,
                    font_size,
                    color,
                } => {
                    let config = TextConfig::new(*font_id, *font_size, *color);
                    let attrs = if *font_size >= BOLD_FONT_SIZE { Attr::BOLD } else { Attr::NONE };
                    let area = rect.intersect(&clip);
                    // Half-cell rounding can shave a column off a fitted box
                    let wrap_width = command.bounding_box.width + cell.cell_width / 2.0;
                    for (line, range) in wrap_lines(text, wrap_width, cell, &config).into_iter().enumerate() {
                        let y = rect.y0 + line as i32;
                        if y >= area.y1 {
                            break;
                        }
                        self.draw_line(rect.x0, y, &text[range], *color, attrs, &area);
                    }
                }
                RenderCommandKind::ScissorStart => clips.push(rect.intersect(&clip)),
                RenderCommandKind::ScissorEnd => {
                    if clips.len() > 1 {
                        clips.pop();
                    }
                }
            }
        }
    }
}
