//! Pointer Module - Per-frame pointer state
//!
//! The input source reports where the pointer is and whether the primary
//! button is held. `PointerTracker` turns that raw flag into a phase that
//! distinguishes the frame a press or release happened from the frames after.
//!
//! ```text
//!   down:  Released → PressedThisFrame → Pressed → Pressed ...
//!   up:    Pressed  → ReleasedThisFrame → Released → Released ...
//! ```

use crate::types::Point;

// =============================================================================
// TYPES
// =============================================================================

/// Button state of the pointer for one frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PointerPhase {
    /// Button went down since the previous frame.
    PressedThisFrame,
    /// Button is held and was already held last frame.
    Pressed,
    /// Button went up since the previous frame.
    ReleasedThisFrame,
    /// Button is up and was already up last frame.
    #[default]
    Released,
}

impl PointerPhase {
    /// Whether the button is currently held.
    pub const fn is_down(&self) -> bool {
        matches!(self, Self::PressedThisFrame | Self::Pressed)
    }
}

/// Raw pointer sample supplied by the input source once per frame.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct PointerInput {
    /// Position in layout units.
    pub position: Point,
    /// Whether the primary button is held.
    pub is_down: bool,
}

impl PointerInput {
    pub const fn new(x: f32, y: f32, is_down: bool) -> Self {
        Self {
            position: Point::new(x, y),
            is_down,
        }
    }
}

/// Pointer event handed to interaction callbacks.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct PointerData {
    pub position: Point,
    pub phase: PointerPhase,
}

// =============================================================================
// TRACKER
// =============================================================================

/// Derives `PointerPhase` transitions from consecutive raw samples.
#[derive(Debug, Clone, Default)]
pub struct PointerTracker {
    current: PointerData,
}

impl PointerTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Pointer data computed by the last `update`.
    pub fn current(&self) -> PointerData {
        self.current
    }

    /// Feed this frame's sample and return the resulting pointer data.
    pub fn update(&mut self, input: PointerInput) -> PointerData {
        let previous = self.current.phase;
        let phase = if input.is_down {
            match previous {
                PointerPhase::PressedThisFrame | PointerPhase::Pressed => PointerPhase::Pressed,
                PointerPhase::ReleasedThisFrame | PointerPhase::Released => {
                    PointerPhase::PressedThisFrame
                }
            }
        } else {
            match previous {
                PointerPhase::ReleasedThisFrame | PointerPhase::Released => PointerPhase::Released,
                PointerPhase::PressedThisFrame | PointerPhase::Pressed => {
                    PointerPhase::ReleasedThisFrame
                }
            }
        };

        self.current = PointerData {
            position: input.position,
            phase,
        };
        self.current
    }
}
