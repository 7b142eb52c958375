//! Error types for the viewer core.

use thiserror::Error;

/// Errors surfaced by the viewer core.
///
/// Out-of-range pointer positions and document indices are not errors: they
/// are clamped or ignored where they occur.
#[derive(Debug, Error)]
pub enum ViewerError {
    /// The frame arena cannot satisfy an allocation this frame.
    #[error("frame arena exhausted: requested {requested} bytes at offset {offset} of {capacity}")]
    ArenaExhausted {
        requested: usize,
        offset: usize,
        capacity: usize,
    },

    /// A document collection needs at least one document.
    #[error("document collection is empty")]
    EmptyCollection,

    /// The configured selectable document is not in the collection.
    #[error("selectable document {index} is out of range for {len} documents")]
    InvalidSelectableDocument { index: usize, len: usize },

    /// The layout engine rejected the element tree.
    #[error("layout failed: {0}")]
    Layout(#[from] taffy::TaffyError),

    /// Terminal output failed.
    #[error("terminal I/O failed: {0}")]
    Io(#[from] std::io::Error),
}

/// Result alias used across the crate.
pub type Result<T> = std::result::Result<T, ViewerError>;
