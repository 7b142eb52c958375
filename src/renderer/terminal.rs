//! Differential terminal renderer.
//!
//! Compares the current frame to the previous frame and only outputs cells
//! that have changed. Output goes through crossterm's `queue!` so a whole
//! frame reaches the terminal in one flush.
//!
//! # Algorithm
//!
//! 1. For each cell in the new frame:
//!    - If previous frame exists and cell is unchanged: skip
//!    - Otherwise: move there (unless already there), set colors and
//!      attributes that differ from the last written cell, print
//! 2. Flush output buffer (single syscall)
//! 3. Store current frame as previous for next comparison

use std::io::Write;

use crossterm::cursor::{Hide, MoveTo, Show};
use crossterm::event::{DisableMouseCapture, EnableMouseCapture};
use crossterm::style::{Attribute, Color, Print, ResetColor, SetAttribute, SetBackgroundColor, SetForegroundColor};
use crossterm::terminal::{
    self, Clear, ClearType, EnterAlternateScreen, LeaveAlternateScreen,
};
use crossterm::{execute, queue};

use super::buffer::{CONTINUATION, FrameBuffer};
use crate::error::Result;
use crate::types::{Attr, Cell, Rgba};

fn to_color(color: Rgba) -> Color {
    Color::Rgb {
        r: color.r,
        g: color.g,
        b: color.b,
    }
}

/// Differential renderer for fullscreen mode.
pub struct TerminalRenderer<W: Write> {
    out: W,
    previous: Option<FrameBuffer>,
}

impl<W: Write> TerminalRenderer<W> {
    pub fn new(out: W) -> Self {
        Self { out, previous: None }
    }

    /// Raw mode, alternate screen, mouse capture, hidden cursor.
    pub fn enter(&mut self) -> Result<()> {
        terminal::enable_raw_mode()?;
        execute!(self.out, EnterAlternateScreen, EnableMouseCapture, Hide, Clear(ClearType::All))?;
        self.previous = None;
        Ok(())
    }

    /// Undo everything `enter` did.
    pub fn leave(&mut self) -> Result<()> {
        execute!(self.out, ResetColor, Show, DisableMouseCapture, LeaveAlternateScreen)?;
        terminal::disable_raw_mode()?;
        Ok(())
    }

    /// Forget the previous frame so the next render repaints everything.
    pub fn invalidate(&mut self) {
        self.previous = None;
    }

    /// Render a frame, outputting only changed cells.
    ///
    /// Returns true if any cells were changed.
    pub fn render(&mut self, buffer: &FrameBuffer) -> Result<bool> {
        let same_size = self
            .previous
            .as_ref()
            .is_some_and(|prev| prev.width() == buffer.width() && prev.height() == buffer.height());

        let mut has_changes = false;
        let mut cursor: Option<(u16, u16)> = None;
        let mut last: Option<Cell> = None;

        for y in 0..buffer.height() {
            for x in 0..buffer.width() {
                let Some(cell) = buffer.get(x, y) else {
                    continue;
                };
                if cell.char == CONTINUATION {
                    continue;
                }

                let unchanged = same_size
                    && self
                        .previous
                        .as_ref()
                        .and_then(|prev| prev.get(x, y))
                        .is_some_and(|prev| prev == cell);
                if unchanged {
                    continue;
                }
                has_changes = true;

                if cursor != Some((x, y)) {
                    queue!(self.out, MoveTo(x, y))?;
                }
                self.write_cell(cell, last.as_ref())?;
                last = Some(*cell);

                let advance = if x + 1 < buffer.width()
                    && buffer.get(x + 1, y).is_some_and(|next| next.char == CONTINUATION)
                {
                    2
                } else {
                    1
                };
                cursor = Some((x + advance, y));
            }
        }

        if has_changes {
            queue!(self.out, ResetColor, SetAttribute(Attribute::Reset))?;
        }
        self.out.flush()?;
        self.previous = Some(buffer.clone());
        Ok(has_changes)
    }

    fn write_cell(&mut self, cell: &Cell, last: Option<&Cell>) -> Result<()> {
        if last.is_none_or(|l| l.attrs != cell.attrs) {
            queue!(self.out, SetAttribute(Attribute::Reset))?;
            if cell.attrs.contains(Attr::BOLD) {
                queue!(self.out, SetAttribute(Attribute::Bold))?;
            }
            if cell.attrs.contains(Attr::DIM) {
                queue!(self.out, SetAttribute(Attribute::Dim))?;
            }
            if cell.attrs.contains(Attr::UNDERLINE) {
                queue!(self.out, SetAttribute(Attribute::Underlined))?;
            }
            if cell.attrs.contains(Attr::INVERSE) {
                queue!(self.out, SetAttribute(Attribute::Reverse))?;
            }
            // Reset clears colors too
            queue!(
                self.out,
                SetForegroundColor(to_color(cell.fg)),
                SetBackgroundColor(to_color(cell.bg))
            )?;
        } else {
            if last.is_none_or(|l| l.fg != cell.fg) {
                queue!(self.out, SetForegroundColor(to_color(cell.fg)))?;
            }
            if last.is_none_or(|l| l.bg != cell.bg) {
                queue!(self.out, SetBackgroundColor(to_color(cell.bg)))?;
            }
        }
        queue!(self.out, Print(cell.char))?;
        Ok(())
    }

    /// The writer, mainly for inspecting output in tests.
    pub fn writer(&self) -> &W {
        &self.out
    }

    pub fn writer_mut(&mut self) -> &mut W {
        &mut self.out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn output(renderer: &TerminalRenderer<Vec<u8>>) -> String {
        String::from_utf8_lossy(renderer.writer()).into_owned()
    }

    #[test]
    fn test_first_render_writes_everything() {
        let mut buf = FrameBuffer::new(3, 1);
        buf.get_mut(0, 0).unwrap().char = 'a';
        buf.get_mut(1, 0).unwrap().char = 'b';
        buf.get_mut(2, 0).unwrap().char = 'c';

        let mut renderer = TerminalRenderer::new(Vec::new());
        assert!(renderer.render(&buf).unwrap());
        assert!(output(&renderer).contains("abc"));
    }

    #[test]
    fn test_unchanged_frame_writes_nothing() {
        let buf = FrameBuffer::new(4, 2);
        let mut renderer = TerminalRenderer::new(Vec::new());
        renderer.render(&buf).unwrap();
        renderer.writer_mut().clear();

        assert!(!renderer.render(&buf).unwrap());
        assert!(renderer.writer().is_empty());
    }

    #[test]
    fn test_only_changed_cell_written() {
        let mut buf = FrameBuffer::new(4, 1);
        let mut renderer = TerminalRenderer::new(Vec::new());
        renderer.render(&buf).unwrap();
        renderer.writer_mut().clear();

        buf.get_mut(2, 0).unwrap().char = 'z';
        assert!(renderer.render(&buf).unwrap());

        let out = output(&renderer);
        assert!(out.contains('z'));
        // 1-based column 3 in the cursor move
        assert!(out.contains("\x1b[1;3H"));
    }

    #[test]
    fn test_invalidate_repaints() {
        let buf = FrameBuffer::new(2, 1);
        let mut renderer = TerminalRenderer::new(Vec::new());
        renderer.render(&buf).unwrap();
        renderer.invalidate();
        assert!(renderer.render(&buf).unwrap());
    }
}
