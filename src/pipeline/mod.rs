//! Frame Pipeline
//!
//! This module connects the viewer's state to the render command list.
//!
//! # Pipeline Architecture
//!
//! ```text
//! ViewerState + TextSelection → widgets::build → taffy layout → emit → y offset
//! ```
//!
//! ## Data Flow
//!
//! 1. **build** - Declares the screen into the layout tree, registering interactions
//! 2. **layout** - Computes absolute boxes for every node
//! 3. **emit** - Walks the tree in paint order producing render commands
//! 4. **dispatch** - Runs the record under the pointer, mutating state for the next build

pub mod render_command;
pub mod ui;
pub mod viewer;
pub mod widgets;

pub use render_command::{EmittedFrame, RenderCommand, RenderCommandKind};
pub use ui::Ui;
pub use viewer::{Viewer, ViewerState};
