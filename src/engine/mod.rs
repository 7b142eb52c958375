//! Viewer Engine - Per-frame storage and interaction bookkeeping.
//!
//! The engine manages the data that lives for exactly one frame:
//! - Arena: fixed-capacity bump allocator for interaction records
//! - Element: stable ids that name elements across frames
//! - Registry: hover registrations, element boxes, pointer-over set
//! - Interaction: the records themselves and how they handle the pointer
//!
//! # Lifetime
//!
//! ```text
//! frame N build:    arena.reset() → on_hover(id, record) → boxes recorded
//! frame N dispatch: pointer-over → target → record.on_hover(...)
//! frame N+1 build:  arena.reset() invalidates every frame-N handle
//! ```

pub mod arena;
pub mod element;
pub mod interaction;
pub mod registry;

pub use arena::{ArenaHandle, ArenaOffset, FrameArena};
pub use element::ElementId;
pub use interaction::{
    CopySelection, DispatchContext, DragSelect, HoverHandler, InteractionRecord, SelectDocument,
    ToggleSidebar,
};
pub use registry::{HitRegion, InteractionRegistry};
