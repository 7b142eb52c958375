//! Clipboard Module - Where copied selections go
//!
//! The viewer never talks to a system clipboard itself. The host passes a
//! [`ClipboardSink`] to each dispatch; the copy control writes the selected
//! text into it.
//!
//! [`MemoryClipboard`] is an in-process buffer for hosts without a system
//! clipboard, and for tests.
//!
//! # Example
//!
//! ```ignore
//! use lion_viewer::state::clipboard::{ClipboardSink, MemoryClipboard};
//!
//! let mut clipboard = MemoryClipboard::new();
//! clipboard.set_text("Hello, World!");
//! assert_eq!(clipboard.paste(), Some("Hello, World!"));
//! ```

// =============================================================================
// Sink
// =============================================================================

/// Destination for copied text.
pub trait ClipboardSink {
    fn set_text(&mut self, text: &str);
}

// =============================================================================
// Internal Buffer
// =============================================================================

/// Clipboard that keeps the most recent copy in memory.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MemoryClipboard {
    buffer: Option<String>,
    copies: usize,
}

impl MemoryClipboard {
    pub fn new() -> Self {
        Self::default()
    }

    /// Most recently copied text.
    pub fn paste(&self) -> Option<&str> {
        self.buffer.as_deref()
    }

    pub fn has_content(&self) -> bool {
        self.buffer.is_some()
    }

    /// How many copies were received, including repeats of the same text.
    pub fn copy_count(&self) -> usize {
        self.copies
    }

    pub fn clear(&mut self) {
        self.buffer = None;
    }
}

impl ClipboardSink for MemoryClipboard {
    /// Empty strings are ignored (clipboard not modified).
    fn set_text(&mut self, text: &str) {
        if text.is_empty() {
            return;
        }
        self.buffer = Some(text.to_string());
        self.copies += 1;
    }
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_copy_paste() {
        let mut clipboard = MemoryClipboard::new();
        clipboard.set_text("Hello");
        assert_eq!(clipboard.paste(), Some("Hello"));
    }

    #[test]
    fn test_copy_overwrites() {
        let mut clipboard = MemoryClipboard::new();
        clipboard.set_text("First");
        clipboard.set_text("Second");
        assert_eq!(clipboard.paste(), Some("Second"));
        assert_eq!(clipboard.copy_count(), 2);
    }

    #[test]
    fn test_empty_copy_ignored() {
        let mut clipboard = MemoryClipboard::new();
        clipboard.set_text("Keep");
        clipboard.set_text("");
        assert_eq!(clipboard.paste(), Some("Keep"));
        assert_eq!(clipboard.copy_count(), 1);
    }

    #[test]
    fn test_clear() {
        let mut clipboard = MemoryClipboard::new();
        assert!(!clipboard.has_content());
        clipboard.set_text("x");
        assert!(clipboard.has_content());
        clipboard.clear();
        assert!(!clipboard.has_content());
        assert_eq!(clipboard.paste(), None);
    }
}
