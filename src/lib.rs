//! # lion-viewer
//!
//! Immediate-mode core of an interactive document viewer.
//!
//! ## Architecture
//!
//! Every frame the whole screen is declared from scratch. Nothing in the UI
//! tree survives a frame; what persists is a small amount of explicit state
//! owned by a [`Viewer`]: the selected document, sidebar visibility, the pan
//! offset and the text selection.
//!
//! ```text
//! build_frame: arena reset → declare tree → taffy layout → render commands
//! dispatch:    pointer phase → element under pointer → interaction record
//! ```
//!
//! Interaction records are plain data stored in a fixed-capacity frame
//! arena. Dispatch resolves the element under the pointer through the
//! interaction registry and lets its record mutate the viewer's state,
//! which the next build picks up.
//!
//! ## Modules
//!
//! - [`types`] - Core types (Rgba, BoundingBox, sizing, Cell)
//! - [`engine`] - Frame arena, element ids, interaction registry and records
//! - [`state`] - Pointer phases, text selection, clipboard, terminal input
//! - [`layout`] - Element tree, Taffy bridge, text metrics and segmentation
//! - [`pipeline`] - Frame builder, screen widgets, render commands, `Viewer`
//! - [`renderer`] - Reference terminal rasterizer

pub mod config;
pub mod document;
pub mod engine;
pub mod error;
pub mod layout;
pub mod pipeline;
pub mod renderer;
pub mod state;
pub mod types;

// Re-export commonly used items
pub use types::*;

pub use config::{DEFAULT_ARENA_CAPACITY, ViewerConfig};
pub use document::{Document, DocumentCollection};
pub use error::{Result, ViewerError};

pub use engine::{
    ArenaHandle, ArenaOffset, ElementId, FrameArena, HitRegion, InteractionRecord, InteractionRegistry,
};

pub use layout::{
    CellMetrics, ElementDecl, FixedAdvance, LayoutTree, TextConfig, TextMetrics, TextSegment,
    segment_text,
};

pub use pipeline::{RenderCommand, RenderCommandKind, Viewer, ViewerState};

pub use renderer::{FrameBuffer, TerminalRenderer};

pub use state::{
    ClipboardSink, InputEvent, MemoryClipboard, PointerData, PointerInput, PointerMapper,
    PointerPhase, PointerTracker, TextSelection, index_at,
};
