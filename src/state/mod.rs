//! State Module - Pointer, selection and clipboard state
//!
//! - **Pointer** - Phase derivation from raw button samples
//! - **Selection** - Drag-to-select state machine, pointer to character offset
//! - **Clipboard** - Sink for copied text
//! - **Input** - crossterm event conversion and mouse capture

pub mod clipboard;
pub mod input;
pub mod pointer;
pub mod selection;

pub use clipboard::{ClipboardSink, MemoryClipboard};
pub use input::{InputEvent, PointerMapper};
pub use pointer::{PointerData, PointerInput, PointerPhase, PointerTracker};
pub use selection::{TextSelection, index_at};
