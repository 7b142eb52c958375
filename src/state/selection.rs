//! Selection Module - Drag-to-select over a single run of text
//!
//! `TextSelection` holds two character offsets and whether a drag is in
//! progress. The offsets are kept raw (start may be past end after a
//! leftward drag); readers normalize when they need an ordered range.
//!
//! ```text
//!   Idle ──PressedThisFrame──► Dragging ──ReleasedThisFrame──► Idle
//!                               │    ▲
//!                               └────┘ Pressed: end follows pointer
//! ```

use std::ops::Range;

use tracing::debug;

use super::pointer::PointerPhase;
use crate::layout::segment::char_range_to_bytes;
use crate::layout::text_measure::TextMetrics;
use crate::layout::tree::TextConfig;

// =============================================================================
// State
// =============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct TextSelection {
    pub is_selecting: bool,
    pub start: usize,
    pub end: usize,
}

impl TextSelection {
    pub fn new() -> Self {
        Self::default()
    }

    /// Advance the state machine with this frame's pointer phase and the
    /// character offset under the pointer.
    pub fn on_pointer(&mut self, phase: PointerPhase, index: usize) {
        match phase {
            PointerPhase::PressedThisFrame => {
                self.is_selecting = true;
                self.start = index;
                self.end = index;
                debug!(index, "selection started");
            }
            PointerPhase::Pressed if self.is_selecting => {
                self.end = index;
            }
            PointerPhase::ReleasedThisFrame => {
                if self.is_selecting {
                    debug!(start = self.start, end = self.end, "selection finished");
                }
                self.is_selecting = false;
            }
            PointerPhase::Pressed | PointerPhase::Released => {}
        }
    }

    /// Ordered character range of the selection.
    pub fn normalized(&self) -> Range<usize> {
        self.start.min(self.end)..self.start.max(self.end)
    }

    pub fn is_empty(&self) -> bool {
        self.start == self.end
    }

    pub fn clear(&mut self) {
        *self = Self::default();
    }

    /// Selected part of `text`, or `None` when nothing is selected.
    ///
    /// Offsets past the end of `text` are clamped.
    pub fn selected_text<'a>(&self, text: &'a str) -> Option<&'a str> {
        let range = self.normalized();
        let bytes = char_range_to_bytes(text, range.start, range.end);
        if bytes.is_empty() {
            None
        } else {
            Some(&text[bytes])
        }
    }
}

// =============================================================================
// Pointer → character offset
// =============================================================================

/// Character offset under a pointer `x` units from the left edge of `text`.
///
/// Counts leading characters whose cumulative advance stays within `x`, so
/// the result is always in `0..=char_count`.
pub fn index_at(text: &str, x: f32, metrics: &dyn TextMetrics, config: &TextConfig) -> usize {
    if x <= 0.0 {
        return 0;
    }

    let mut advance = 0f32;
    let mut count = 0usize;
    for ch in text.chars() {
        advance += metrics.char_advance(ch, config);
        if advance > x {
            break;
        }
        count += 1;
    }
    count
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layout::text_measure::FixedAdvance;
    use proptest::prelude::*;

    fn index(text: &str, x: f32) -> usize {
        index_at(text, x, &FixedAdvance::new(10.0, 30.0), &TextConfig::default())
    }

    #[test]
    fn test_press_drag_release() {
        let mut sel = TextSelection::new();

        sel.on_pointer(PointerPhase::PressedThisFrame, 5);
        assert!(sel.is_selecting);
        assert_eq!((sel.start, sel.end), (5, 5));

        sel.on_pointer(PointerPhase::Pressed, 8);
        sel.on_pointer(PointerPhase::Pressed, 11);
        assert_eq!((sel.start, sel.end), (5, 11));

        sel.on_pointer(PointerPhase::ReleasedThisFrame, 11);
        assert!(!sel.is_selecting);
        assert_eq!((sel.start, sel.end), (5, 11));
    }

    #[test]
    fn test_leftward_drag_keeps_raw_order() {
        let mut sel = TextSelection::new();
        sel.on_pointer(PointerPhase::PressedThisFrame, 9);
        sel.on_pointer(PointerPhase::Pressed, 2);
        sel.on_pointer(PointerPhase::ReleasedThisFrame, 2);

        assert_eq!((sel.start, sel.end), (9, 2));
        assert_eq!(sel.normalized(), 2..9);
    }

    #[test]
    fn test_pressed_without_drag_ignored() {
        let mut sel = TextSelection::new();
        sel.on_pointer(PointerPhase::Pressed, 7);
        sel.on_pointer(PointerPhase::Released, 3);
        assert_eq!(sel, TextSelection::default());
    }

    #[test]
    fn test_selection_survives_idle() {
        let mut sel = TextSelection::new();
        sel.on_pointer(PointerPhase::PressedThisFrame, 1);
        sel.on_pointer(PointerPhase::Pressed, 4);
        sel.on_pointer(PointerPhase::ReleasedThisFrame, 4);
        sel.on_pointer(PointerPhase::Pressed, 20);

        assert_eq!(sel.normalized(), 1..4);
    }

    #[test]
    fn test_selected_text() {
        let sel = TextSelection {
            is_selecting: false,
            start: 4,
            end: 1,
        };
        assert_eq!(sel.selected_text("Hello"), Some("ell"));
        assert_eq!(TextSelection::new().selected_text("Hello"), None);
    }

    #[test]
    fn test_selected_text_clamps_and_respects_chars() {
        let sel = TextSelection {
            is_selecting: false,
            start: 1,
            end: 50,
        };
        assert_eq!(sel.selected_text("héllo"), Some("éllo"));

        let past = TextSelection {
            is_selecting: false,
            start: 10,
            end: 20,
        };
        assert_eq!(past.selected_text("short"), None);
    }

    #[test]
    fn test_clear() {
        let mut sel = TextSelection {
            is_selecting: true,
            start: 2,
            end: 3,
        };
        sel.clear();
        assert!(sel.is_empty());
        assert!(!sel.is_selecting);
    }

    #[test]
    fn test_index_at_fixed_advance() {
        assert_eq!(index("Hello world", 35.0), 3);
        assert_eq!(index("Hello world", 30.0), 3);
        assert_eq!(index("Hello world", 9.9), 0);
        assert_eq!(index("Hello world", -5.0), 0);
        assert_eq!(index("Hello", 10_000.0), 5);
        assert_eq!(index("", 50.0), 0);
    }

    proptest! {
        #[test]
        fn index_at_is_clamped(text in "[a-z ]{0,40}", x in -100f32..1000.0) {
            let i = index(&text, x);
            prop_assert!(i <= text.chars().count());
        }

        #[test]
        fn index_at_is_monotonic(text in "[a-z ]{0,40}", a in 0f32..500.0, b in 0f32..500.0) {
            let (lo, hi) = if a <= b { (a, b) } else { (b, a) };
            prop_assert!(index(&text, lo) <= index(&text, hi));
        }

        #[test]
        fn pointer_sequence_stays_in_text(
            text in "[a-z ]{0,40}",
            steps in prop::collection::vec((0usize..4, -50f32..600.0), 1..30),
        ) {
            const PHASES: [PointerPhase; 4] = [
                PointerPhase::PressedThisFrame,
                PointerPhase::Pressed,
                PointerPhase::ReleasedThisFrame,
                PointerPhase::Released,
            ];
            let len = text.chars().count();
            let mut sel = TextSelection::new();
            for (phase, x) in steps {
                sel.on_pointer(PHASES[phase], index(&text, x));
                prop_assert!(sel.start <= len && sel.end <= len);
                prop_assert!(sel.normalized().end <= len);
            }
        }
    }
}
