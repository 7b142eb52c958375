//! Viewer Layout Module
//!
//! Flexbox layout computation for the element tree using Taffy.
//!
//! # Architecture
//!
//! The layout module uses [Taffy](https://github.com/DioxusLabs/taffy) for
//! W3C-compliant flexbox computation. Each frame:
//!
//! 1. The builder fills a [`LayoutTree`] with elements and text runs
//! 2. The bridge converts element sizing to Taffy styles
//! 3. Text leaves are measured through the host's [`TextMetrics`]
//! 4. Taffy's parent-relative locations become absolute boxes
//!
//! Text segmentation around the selection also lives here, since it decides
//! what text runs the tree contains.

pub mod segment;
pub mod taffy_bridge;
pub mod text_measure;
pub mod tree;

pub use segment::{TextSegment, char_range_to_bytes, segment_text};
pub use taffy_bridge::compute_layout;
pub use text_measure::{CellMetrics, FixedAdvance, TextMetrics, measure_wrapped, wrap_lines};
pub use tree::{ElementDecl, Floating, LayoutConfig, LayoutTree, TextConfig};
