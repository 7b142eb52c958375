//! Element identity.
//!
//! Elements built during a frame have no identity beyond the frame unless
//! they are given an `ElementId`. Ids are how interactions, bounding boxes and
//! the pointer-over set find the same element across consecutive frames.

use std::fmt;

/// Stable name of a UI element: a static label plus an index for repeated
/// elements such as list rows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ElementId {
    label: &'static str,
    index: u32,
}

impl ElementId {
    /// Id of a unique element.
    pub const fn new(label: &'static str) -> Self {
        Self { label, index: 0 }
    }

    /// Id of the `index`-th element sharing `label`.
    pub const fn indexed(label: &'static str, index: u32) -> Self {
        Self { label, index }
    }

    pub const fn label(&self) -> &'static str {
        self.label
    }

    pub const fn index(&self) -> u32 {
        self.index
    }
}

impl fmt::Display for ElementId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.index == 0 {
            f.write_str(self.label)
        } else {
            write!(f, "{}[{}]", self.label, self.index)
        }
    }
}
