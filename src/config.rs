//! Viewer configuration.
//!
//! Built once by the host and handed to [`Viewer::new`](crate::Viewer::new).

/// Default capacity of the per-frame interaction arena, in bytes.
pub const DEFAULT_ARENA_CAPACITY: usize = 1024;

/// Session configuration of a [`Viewer`](crate::Viewer).
#[derive(Debug, Clone, PartialEq)]
pub struct ViewerConfig {
    /// Bytes available to interaction records each frame.
    pub arena_capacity: usize,
    /// Initial vertical pan applied to every render command.
    pub y_offset: f32,
    /// Index of the only document that supports text selection.
    pub selectable_document: usize,
    /// Clear the text selection whenever the selected document changes.
    pub reset_selection_on_switch: bool,
}

impl Default for ViewerConfig {
    fn default() -> Self {
        Self {
            arena_capacity: DEFAULT_ARENA_CAPACITY,
            y_offset: 0.0,
            selectable_document: 0,
            reset_selection_on_switch: true,
        }
    }
}

impl ViewerConfig {
    pub fn with_arena_capacity(mut self, capacity: usize) -> Self {
        self.arena_capacity = capacity;
        self
    }

    pub fn with_y_offset(mut self, y_offset: f32) -> Self {
        self.y_offset = y_offset;
        self
    }

    pub fn with_selectable_document(mut self, index: usize) -> Self {
        self.selectable_document = index;
        self
    }

    pub fn with_reset_selection_on_switch(mut self, reset: bool) -> Self {
        self.reset_selection_on_switch = reset;
        self
    }
}
