//! Frame builder.
//!
//! `Ui` is what layout code writes against: nested `element` calls mirror
//! the element tree, `text` adds a run, and `on_hover` stores an interaction
//! record for the element being declared. It borrows the frame's tree, arena
//! and registry for the duration of one build.

use crate::engine::arena::FrameArena;
use crate::engine::element::ElementId;
use crate::engine::interaction::InteractionRecord;
use crate::engine::registry::InteractionRegistry;
use crate::error::Result;
use crate::layout::tree::{ElementDecl, LayoutTree, TextConfig};

pub struct Ui<'f> {
    tree: &'f mut LayoutTree,
    arena: &'f mut FrameArena<InteractionRecord>,
    registry: &'f mut InteractionRegistry,
}

impl<'f> Ui<'f> {
    pub fn new(
        tree: &'f mut LayoutTree,
        arena: &'f mut FrameArena<InteractionRecord>,
        registry: &'f mut InteractionRegistry,
    ) -> Self {
        Self { tree, arena, registry }
    }

    /// Declare an element and build its children inside `children`.
    ///
    /// The element is closed even when `children` fails, so the tree stays
    /// balanced for the caller.
    pub fn element<F>(&mut self, decl: ElementDecl, children: F) -> Result<()>
    where
        F: FnOnce(&mut Self) -> Result<()>,
    {
        self.tree.open(decl);
        let result = children(self);
        self.tree.close();
        result
    }

    /// Declare an element without children.
    pub fn leaf(&mut self, decl: ElementDecl) {
        self.tree.open(decl);
        self.tree.close();
    }

    pub fn text(&mut self, text: impl Into<String>, config: TextConfig) {
        self.tree.text(text, config);
    }

    /// Store `record` in the frame arena and attach it to `id` for this frame.
    pub fn on_hover(&mut self, id: ElementId, record: impl Into<InteractionRecord>) -> Result<()> {
        let handle = self.arena.alloc(record.into())?;
        self.registry.register_hover(id, handle);
        Ok(())
    }

    /// Whether the pointer was over `id` at the last dispatch.
    pub fn pointer_over(&self, id: ElementId) -> bool {
        self.registry.pointer_over(id)
    }

    /// Whether the pointer was over the innermost open element.
    ///
    /// Anonymous elements are never hovered.
    pub fn hovered(&self) -> bool {
        self.tree
            .current()
            .and_then(|index| self.tree.node(index))
            .and_then(|node| node.id())
            .is_some_and(|id| self.registry.pointer_over(id))
    }
}
