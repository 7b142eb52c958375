//! Reference terminal rasterizer.
//!
//! The viewer core only produces render commands. This module draws them
//! into a cell grid and writes the grid to a terminal, which is what the
//! demo uses; other hosts bring their own rasterizer.

pub mod buffer;
pub mod terminal;

pub use buffer::{CellRect, FrameBuffer};
pub use terminal::TerminalRenderer;
