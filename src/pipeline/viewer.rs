//! Viewer - the per-session context object.
//!
//! Owns everything that lives across frames (documents, UI state, the text
//! selection, the arena and registry) and runs the two halves of a frame:
//!
//! ```text
//!   build_frame(viewport)            dispatch(pointer, clipboard)
//!   ─────────────────────            ────────────────────────────
//!   arena.reset()                    pointer phase update
//!   registry.begin_frame()           pointer-over from last boxes
//!   widgets::build(ui, model)        pick target element
//!   taffy layout                     record.on_hover(...)
//!   emit commands, apply y offset        → ViewerState / TextSelection /
//!   record hit regions                     clipboard, seen next build
//! ```

use tracing::{debug, warn};

use crate::config::ViewerConfig;
use crate::document::DocumentCollection;
use crate::engine::arena::FrameArena;
use crate::engine::interaction::{DispatchContext, HoverHandler, InteractionRecord};
use crate::engine::registry::InteractionRegistry;
use crate::error::{Result, ViewerError};
use crate::layout::taffy_bridge::compute_layout;
use crate::layout::text_measure::TextMetrics;
use crate::layout::tree::LayoutTree;
use crate::state::clipboard::ClipboardSink;
use crate::state::pointer::{PointerData, PointerInput, PointerTracker};
use crate::state::selection::TextSelection;
use crate::types::Viewport;

use super::render_command::{RenderCommand, emit};
use super::ui::Ui;
use super::widgets::{self, FrameModel};

// =============================================================================
// ViewerState
// =============================================================================

/// UI state that survives between frames.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ViewerState {
    pub selected_document: usize,
    pub sidebar_visible: bool,
    /// Vertical pan applied to every render command.
    pub y_offset: f32,
}

impl Default for ViewerState {
    fn default() -> Self {
        Self {
            selected_document: 0,
            sidebar_visible: true,
            y_offset: 0.0,
        }
    }
}

impl ViewerState {
    /// Select `index` if it is a valid document. Returns whether it was.
    pub fn select_document(&mut self, index: usize, documents: &DocumentCollection) -> bool {
        if !documents.contains_index(index) {
            return false;
        }
        self.selected_document = index;
        true
    }

    pub fn toggle_sidebar(&mut self) {
        self.sidebar_visible = !self.sidebar_visible;
    }
}

// =============================================================================
// Viewer
// =============================================================================

pub struct Viewer {
    documents: DocumentCollection,
    config: ViewerConfig,
    state: ViewerState,
    selection: TextSelection,
    arena: FrameArena<InteractionRecord>,
    registry: InteractionRegistry,
    tree: LayoutTree,
    pointer: PointerTracker,
    metrics: Box<dyn TextMetrics>,
}

impl Viewer {
    /// Create a viewer for `documents`.
    ///
    /// Fails if the configured selectable document is not in the collection.
    pub fn new(
        documents: DocumentCollection,
        config: ViewerConfig,
        metrics: Box<dyn TextMetrics>,
    ) -> Result<Self> {
        if !documents.contains_index(config.selectable_document) {
            return Err(ViewerError::InvalidSelectableDocument {
                index: config.selectable_document,
                len: documents.len(),
            });
        }

        let state = ViewerState {
            y_offset: config.y_offset,
            ..ViewerState::default()
        };

        Ok(Self {
            arena: FrameArena::new(config.arena_capacity),
            documents,
            config,
            state,
            selection: TextSelection::new(),
            registry: InteractionRegistry::new(),
            tree: LayoutTree::new(),
            pointer: PointerTracker::new(),
            metrics,
        })
    }

    pub fn documents(&self) -> &DocumentCollection {
        &self.documents
    }

    pub fn config(&self) -> &ViewerConfig {
        &self.config
    }

    pub fn state(&self) -> &ViewerState {
        &self.state
    }

    pub fn selection(&self) -> &TextSelection {
        &self.selection
    }

    pub fn registry(&self) -> &InteractionRegistry {
        &self.registry
    }

    /// Bytes of the frame arena used by the last build.
    pub fn arena_used(&self) -> usize {
        self.arena.used()
    }

    pub fn set_y_offset(&mut self, y_offset: f32) {
        self.state.y_offset = y_offset;
    }

    /// Move the view by `dy`.
    pub fn pan(&mut self, dy: f32) {
        self.state.y_offset += dy;
    }

    /// Build, lay out and emit one frame.
    ///
    /// An `ArenaExhausted` error aborts the frame; the registry then only
    /// holds what was registered before the failure.
    pub fn build_frame(&mut self, viewport: Viewport) -> Result<Vec<RenderCommand>> {
        self.arena.reset();
        self.registry.begin_frame();
        self.tree.clear();

        let model = FrameModel {
            state: &self.state,
            documents: &self.documents,
            selection: &self.selection,
            selectable_document: self.config.selectable_document,
        };
        widgets::build(
            &mut Ui::new(&mut self.tree, &mut self.arena, &mut self.registry),
            &model,
        )?;

        let boxes = compute_layout(&self.tree, viewport, self.metrics.as_ref())?;
        let mut frame = emit(&self.tree, &boxes);
        frame.apply_y_offset(self.state.y_offset);

        for root in &frame.floating_roots {
            self.registry.record_floating_root(*root);
        }
        for region in &frame.elements {
            self.registry.record_region(*region);
        }

        debug!(
            commands = frame.commands.len(),
            elements = frame.elements.len(),
            arena_used = self.arena.used(),
            "frame built"
        );
        Ok(frame.commands)
    }

    /// Feed this frame's pointer sample and run the targeted element's record.
    ///
    /// State changes take effect in the next `build_frame`.
    pub fn dispatch(&mut self, input: PointerInput, clipboard: &mut dyn ClipboardSink) -> PointerData {
        let pointer = self.pointer.update(input);
        self.registry.update_pointer_over(pointer.position);

        let Some((id, handle)) = self.registry.dispatch_target(&pointer) else {
            return pointer;
        };
        let Some(record) = self.arena.get(handle).copied() else {
            warn!(element = %id, generation = handle.generation(), "stale interaction record");
            return pointer;
        };

        let mut cx = DispatchContext {
            state: &mut self.state,
            selection: &mut self.selection,
            documents: &self.documents,
            clipboard,
            metrics: self.metrics.as_ref(),
            config: &self.config,
            bounds: self.registry.bounds_of(id).unwrap_or_default(),
        };
        record.on_hover(&pointer, &mut cx);
        pointer
    }
}
