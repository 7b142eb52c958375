//! Input Module - Event conversion and polling
//!
//! Bridges crossterm's event system with the viewer's pointer model.
//! Terminal mouse events arrive in cells; the viewer lays out in its own
//! units, so `PointerMapper` scales each event to the centre of its cell and
//! remembers whether the left button is held between events.
//!
//! # API
//!
//! - `PointerMapper::convert_mouse_event` - crossterm MouseEvent to `InputEvent`
//! - `poll_event` - Non-blocking event check with timeout
//!
//! # Example
//!
//! ```ignore
//! use lion_viewer::state::input::{poll_event, InputEvent, PointerMapper};
//! use std::time::Duration;
//!
//! let mut mapper = PointerMapper::default();
//! loop {
//!     if let Ok(Some(InputEvent::Pointer(pointer))) = poll_event(Duration::from_millis(16), &mut mapper) {
//!         viewer.dispatch(pointer, &mut clipboard);
//!     }
//! }
//! ```

use crossterm::event::{
    Event as CrosstermEvent, KeyCode, KeyEventKind, MouseButton as CrosstermMouseButton,
    MouseEvent as CrosstermMouseEvent, MouseEventKind, poll, read,
};
use std::time::Duration;

use super::pointer::PointerInput;
use crate::layout::text_measure::CellMetrics;
use crate::types::Point;

/// Lines moved per wheel notch.
const SCROLL_LINES: f32 = 3.0;

// =============================================================================
// INPUT EVENT ENUM
// =============================================================================

/// Unified event type for the viewer
#[derive(Debug, Clone, PartialEq)]
pub enum InputEvent {
    /// Pointer sample in layout units
    Pointer(PointerInput),
    /// Wheel motion: vertical pan in layout units, positive moves content down
    Scroll(f32),
    /// Key press
    Key(KeyCode),
    /// Terminal resize event (new width, height)
    Resize(u16, u16),
    /// No event or unhandled event type
    None,
}

// =============================================================================
// MOUSE EVENT CONVERSION
// =============================================================================

/// Turns cell-based mouse events into pointer samples.
#[derive(Debug, Clone, Default)]
pub struct PointerMapper {
    cell: CellMetrics,
    position: Point,
    is_down: bool,
}

impl PointerMapper {
    pub fn new(cell: CellMetrics) -> Self {
        Self {
            cell,
            position: Point::default(),
            is_down: false,
        }
    }

    /// Last sample produced, for frames without mouse activity.
    pub fn current(&self) -> PointerInput {
        PointerInput {
            position: self.position,
            is_down: self.is_down,
        }
    }

    /// Centre of terminal cell (`column`, `row`) in layout units.
    pub fn cell_center(&self, column: u16, row: u16) -> Point {
        Point::new(
            column as f32 * self.cell.cell_width + self.cell.cell_width / 2.0,
            row as f32 * self.cell.cell_height + self.cell.cell_height / 2.0,
        )
    }

    /// Convert crossterm MouseEvent to our InputEvent.
    ///
    /// Only the left button drives the pointer; other buttons just move it.
    pub fn convert_mouse_event(&mut self, event: CrosstermMouseEvent) -> InputEvent {
        self.position = self.cell_center(event.column, event.row);

        match event.kind {
            MouseEventKind::Down(CrosstermMouseButton::Left)
            | MouseEventKind::Drag(CrosstermMouseButton::Left) => self.is_down = true,
            MouseEventKind::Up(CrosstermMouseButton::Left) => self.is_down = false,
            MouseEventKind::ScrollUp => {
                return InputEvent::Scroll(SCROLL_LINES * self.cell.cell_height);
            }
            MouseEventKind::ScrollDown => {
                return InputEvent::Scroll(-SCROLL_LINES * self.cell.cell_height);
            }
            _ => {}
        }

        InputEvent::Pointer(self.current())
    }

    /// Convert any crossterm event.
    pub fn convert_event(&mut self, event: CrosstermEvent) -> InputEvent {
        match event {
            CrosstermEvent::Mouse(mouse) => self.convert_mouse_event(mouse),
            CrosstermEvent::Key(key) if key.kind != KeyEventKind::Release => InputEvent::Key(key.code),
            CrosstermEvent::Resize(w, h) => InputEvent::Resize(w, h),
            _ => InputEvent::None,
        }
    }
}

// =============================================================================
// EVENT POLLING
// =============================================================================

/// Poll for an event with timeout.
/// Returns None if no event within timeout.
pub fn poll_event(timeout: Duration, mapper: &mut PointerMapper) -> std::io::Result<Option<InputEvent>> {
    if poll(timeout)? {
        Ok(Some(mapper.convert_event(read()?)))
    } else {
        Ok(None)
    }
}

// =============================================================================
// TESTS
// =============================================================================
