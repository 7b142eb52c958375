//! Interaction records - what a hovered element does with the pointer.
//!
//! During the build, each interactive element stores one record in the frame
//! arena and registers its handle. At dispatch the record is copied back out
//! and asked to handle the pointer through [`HoverHandler`]. Records hold only
//! plain data (indices, font settings); everything they mutate is reached
//! through the [`DispatchContext`] built for that one call.

use tracing::debug;

use crate::config::ViewerConfig;
use crate::document::DocumentCollection;
use crate::layout::text_measure::TextMetrics;
use crate::layout::tree::TextConfig;
use crate::pipeline::viewer::ViewerState;
use crate::state::clipboard::ClipboardSink;
use crate::state::pointer::{PointerData, PointerPhase};
use crate::state::selection::{TextSelection, index_at};
use crate::types::BoundingBox;

// =============================================================================
// Context
// =============================================================================

/// Mutable view of the viewer handed to a record during dispatch.
pub struct DispatchContext<'a> {
    pub state: &'a mut ViewerState,
    pub selection: &'a mut TextSelection,
    pub documents: &'a DocumentCollection,
    pub clipboard: &'a mut dyn ClipboardSink,
    pub metrics: &'a dyn TextMetrics,
    pub config: &'a ViewerConfig,
    /// Box of the element the record was registered on.
    pub bounds: BoundingBox,
}

/// Behavior attached to an element for one frame.
pub trait HoverHandler {
    fn on_hover(&self, pointer: &PointerData, cx: &mut DispatchContext<'_>);
}

// =============================================================================
// Records
// =============================================================================

/// Sidebar item: switch to another document on press.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SelectDocument {
    pub requested: usize,
}

impl HoverHandler for SelectDocument {
    fn on_hover(&self, pointer: &PointerData, cx: &mut DispatchContext<'_>) {
        if pointer.phase != PointerPhase::PressedThisFrame {
            return;
        }
        if !cx.documents.contains_index(self.requested) {
            return;
        }

        let previous = cx.state.selected_document;
        if cx.state.select_document(self.requested, cx.documents) && previous != self.requested {
            debug!(from = previous, to = self.requested, "document selected");
            if cx.config.reset_selection_on_switch {
                cx.selection.clear();
            }
        }
    }
}

/// Header control that shows or hides the sidebar.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ToggleSidebar;

impl HoverHandler for ToggleSidebar {
    fn on_hover(&self, pointer: &PointerData, cx: &mut DispatchContext<'_>) {
        if pointer.phase == PointerPhase::PressedThisFrame {
            cx.state.toggle_sidebar();
            debug!(visible = cx.state.sidebar_visible, "sidebar toggled");
        }
    }
}

/// Text of the selectable document: drag to select.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DragSelect {
    pub document: usize,
    pub text: TextConfig,
}

impl HoverHandler for DragSelect {
    fn on_hover(&self, pointer: &PointerData, cx: &mut DispatchContext<'_>) {
        let Some(document) = cx.documents.get(self.document) else {
            return;
        };
        let x = pointer.position.x - cx.bounds.x;
        let index = index_at(&document.contents, x, cx.metrics, &self.text);
        cx.selection.on_pointer(pointer.phase, index);
    }
}

/// Copy control: put the selected text on the clipboard.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CopySelection {
    pub document: usize,
}

impl HoverHandler for CopySelection {
    fn on_hover(&self, pointer: &PointerData, cx: &mut DispatchContext<'_>) {
        if pointer.phase != PointerPhase::PressedThisFrame {
            return;
        }
        let Some(document) = cx.documents.get(self.document) else {
            return;
        };
        if let Some(text) = cx.selection.selected_text(&document.contents) {
            debug!(chars = text.chars().count(), "selection copied");
            cx.clipboard.set_text(text);
        }
    }
}

/// Any record that can live in the frame arena.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum InteractionRecord {
    SelectDocument(SelectDocument),
    ToggleSidebar(ToggleSidebar),
    DragSelect(DragSelect),
    CopySelection(CopySelection),
}

impl HoverHandler for InteractionRecord {
    fn on_hover(&self, pointer: &PointerData, cx: &mut DispatchContext<'_>) {
        match self {
            Self::SelectDocument(record) => record.on_hover(pointer, cx),
            Self::ToggleSidebar(record) => record.on_hover(pointer, cx),
            Self::DragSelect(record) => record.on_hover(pointer, cx),
            Self::CopySelection(record) => record.on_hover(pointer, cx),
        }
    }
}

impl From<SelectDocument> for InteractionRecord {
    fn from(record: SelectDocument) -> Self {
        Self::SelectDocument(record)
    }
}

impl From<ToggleSidebar> for InteractionRecord {
    fn from(record: ToggleSidebar) -> Self {
        Self::ToggleSidebar(record)
    }
}

impl From<DragSelect> for InteractionRecord {
    fn from(record: DragSelect) -> Self {
        Self::DragSelect(record)
    }
}

impl From<CopySelection> for InteractionRecord {
    fn from(record: CopySelection) -> Self {
        Self::CopySelection(record)
    }
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::document::Document;
    use crate::layout::text_measure::FixedAdvance;
    use crate::state::clipboard::MemoryClipboard;
    use crate::types::Point;

    struct Fixture {
        state: ViewerState,
        selection: TextSelection,
        documents: DocumentCollection,
        clipboard: MemoryClipboard,
        metrics: FixedAdvance,
        config: ViewerConfig,
    }

    impl Fixture {
        fn new() -> Self {
            let documents = DocumentCollection::new(vec![
                Document::new("One", "Hello world"),
                Document::new("Two", "Second"),
                Document::new("Three", "Third"),
            ])
            .unwrap();
            Self {
                state: ViewerState::default(),
                selection: TextSelection::new(),
                documents,
                clipboard: MemoryClipboard::new(),
                metrics: FixedAdvance::new(10.0, 30.0),
                config: ViewerConfig::default(),
            }
        }

        fn run(&mut self, record: impl Into<InteractionRecord>, x: f32, phase: PointerPhase) {
            let record = record.into();
            let mut cx = DispatchContext {
                state: &mut self.state,
                selection: &mut self.selection,
                documents: &self.documents,
                clipboard: &mut self.clipboard,
                metrics: &self.metrics,
                config: &self.config,
                bounds: BoundingBox::new(100.0, 0.0, 500.0, 30.0),
            };
            let pointer = PointerData {
                position: Point::new(x, 10.0),
                phase,
            };
            record.on_hover(&pointer, &mut cx);
        }
    }

    #[test]
    fn test_select_document_on_press_only() {
        let mut fx = Fixture::new();
        fx.run(SelectDocument { requested: 2 }, 0.0, PointerPhase::Released);
        assert_eq!(fx.state.selected_document, 0);

        fx.run(SelectDocument { requested: 2 }, 0.0, PointerPhase::PressedThisFrame);
        assert_eq!(fx.state.selected_document, 2);
    }

    #[test]
    fn test_select_document_out_of_range_ignored() {
        let mut fx = Fixture::new();
        fx.run(SelectDocument { requested: 99 }, 0.0, PointerPhase::PressedThisFrame);
        assert_eq!(fx.state.selected_document, 0);
    }

    #[test]
    fn test_select_document_resets_selection() {
        let mut fx = Fixture::new();
        fx.selection = TextSelection { is_selecting: false, start: 1, end: 4 };
        fx.run(SelectDocument { requested: 1 }, 0.0, PointerPhase::PressedThisFrame);
        assert!(fx.selection.is_empty());
    }

    #[test]
    fn test_select_document_keeps_selection_when_configured() {
        let mut fx = Fixture::new();
        fx.config = ViewerConfig::default().with_reset_selection_on_switch(false);
        fx.selection = TextSelection { is_selecting: false, start: 1, end: 4 };
        fx.run(SelectDocument { requested: 1 }, 0.0, PointerPhase::PressedThisFrame);
        assert_eq!(fx.selection.normalized(), 1..4);
    }

    #[test]
    fn test_toggle_sidebar() {
        let mut fx = Fixture::new();
        assert!(fx.state.sidebar_visible);
        fx.run(ToggleSidebar, 0.0, PointerPhase::PressedThisFrame);
        assert!(!fx.state.sidebar_visible);
        fx.run(ToggleSidebar, 0.0, PointerPhase::Pressed);
        assert!(!fx.state.sidebar_visible);
        fx.run(ToggleSidebar, 0.0, PointerPhase::PressedThisFrame);
        assert!(fx.state.sidebar_visible);
    }

    #[test]
    fn test_drag_select_relative_to_element() {
        let mut fx = Fixture::new();
        let drag = DragSelect { document: 0, text: TextConfig::default() };

        fx.run(drag, 135.0, PointerPhase::PressedThisFrame);
        assert_eq!((fx.selection.start, fx.selection.end), (3, 3));

        fx.run(drag, 172.0, PointerPhase::Pressed);
        fx.run(drag, 172.0, PointerPhase::ReleasedThisFrame);
        assert_eq!(fx.selection.normalized(), 3..7);
        assert!(!fx.selection.is_selecting);

        // Left of the element clamps to the start
        fx.run(drag, 20.0, PointerPhase::PressedThisFrame);
        assert_eq!(fx.selection.start, 0);
    }

    #[test]
    fn test_copy_selection() {
        let mut fx = Fixture::new();
        fx.selection = TextSelection { is_selecting: false, start: 7, end: 1 };

        fx.run(CopySelection { document: 0 }, 0.0, PointerPhase::Pressed);
        assert_eq!(fx.clipboard.paste(), None);

        fx.run(CopySelection { document: 0 }, 0.0, PointerPhase::PressedThisFrame);
        assert_eq!(fx.clipboard.paste(), Some("ello w"));
    }

    #[test]
    fn test_copy_empty_selection_does_nothing() {
        let mut fx = Fixture::new();
        fx.run(CopySelection { document: 0 }, 0.0, PointerPhase::PressedThisFrame);
        assert!(!fx.clipboard.has_content());
    }
}
