//! Render commands - the flat draw list handed to the rasterizer.
//!
//! Commands are emitted in paint order: a pre-order walk of the element tree
//! where each element's background comes before its children. Floating
//! subtrees are held back and emitted after everything else so they paint
//! on top. Scroll containers bracket their children with scissor commands.
//!
//! Alongside the commands, every named element gets a [`HitRegion`] carrying
//! the scroll clip it is drawn under and the floating layer it belongs to,
//! so hit testing matches what is on screen.

use crate::engine::element::ElementId;
use crate::engine::registry::HitRegion;
use crate::layout::tree::{LayoutTree, NodeKind};
use crate::types::{BoundingBox, Rgba};

// =============================================================================
// Types
// =============================================================================

#[derive(Debug, Clone, PartialEq)]
pub enum RenderCommandKind {
    Rectangle {
        color: Rgba,
        corner_radius: f32,
    },
    Text {
        text: String,
        font_id: u16,
        font_size: u16,
        color: Rgba,
    },
    /// Clip following commands to the bounding box until the matching end.
    ScissorStart,
    ScissorEnd,
}

#[derive(Debug, Clone, PartialEq)]
pub struct RenderCommand {
    pub bounding_box: BoundingBox,
    pub id: Option<ElementId>,
    pub kind: RenderCommandKind,
}

impl RenderCommand {
    pub fn text(&self) -> Option<&str> {
        match &self.kind {
            RenderCommandKind::Text { text, .. } => Some(text),
            _ => None,
        }
    }
}

/// Commands of one frame plus the region of every named element, both in
/// paint order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct EmittedFrame {
    pub commands: Vec<RenderCommand>,
    pub elements: Vec<HitRegion>,
    /// Root box of each floating subtree; layer `n` is at index `n - 1`.
    pub floating_roots: Vec<BoundingBox>,
}

impl EmittedFrame {
    /// Move everything down by `dy` (up when negative).
    pub fn apply_y_offset(&mut self, dy: f32) {
        if dy == 0.0 {
            return;
        }
        for command in &mut self.commands {
            command.bounding_box = command.bounding_box.offset_y(dy);
        }
        for region in &mut self.elements {
            region.bounds = region.bounds.offset_y(dy);
            region.clip = region.clip.map(|clip| clip.offset_y(dy));
        }
        for root in &mut self.floating_roots {
            *root = root.offset_y(dy);
        }
    }
}

// =============================================================================
// Emission
// =============================================================================

/// Walk `tree` with its computed `boxes` and produce the frame's draw list.
pub fn emit(tree: &LayoutTree, boxes: &[BoundingBox]) -> EmittedFrame {
    let mut walk = Walk {
        tree,
        boxes,
        frame: EmittedFrame::default(),
        deferred: Vec::new(),
    };

    for &root in tree.roots() {
        walk.node(root, None, 0);
    }

    // Floating subtrees may defer floats of their own. They escape every
    // scroll clip and each one opens a new layer.
    let mut next = 0;
    while next < walk.deferred.len() {
        let index = walk.deferred[next];
        next += 1;
        let root = boxes.get(index).copied().unwrap_or_default();
        walk.frame.floating_roots.push(root);
        let layer = walk.frame.floating_roots.len();
        walk.subtree(index, None, layer);
    }

    walk.frame
}

struct Walk<'t> {
    tree: &'t LayoutTree,
    boxes: &'t [BoundingBox],
    frame: EmittedFrame,
    deferred: Vec<usize>,
}

impl Walk<'_> {
    fn node(&mut self, index: usize, clip: Option<BoundingBox>, layer: usize) {
        let Some(node) = self.tree.node(index) else {
            return;
        };
        if node.element().is_some_and(|decl| decl.floating.is_some()) {
            self.deferred.push(index);
            return;
        }
        self.subtree(index, clip, layer);
    }

    fn subtree(&mut self, index: usize, clip: Option<BoundingBox>, layer: usize) {
        let tree = self.tree;
        let (Some(node), Some(&bounds)) = (tree.node(index), self.boxes.get(index)) else {
            return;
        };

        match &node.kind {
            NodeKind::Text { text, config } => {
                self.frame.commands.push(RenderCommand {
                    bounding_box: bounds,
                    id: None,
                    kind: RenderCommandKind::Text {
                        text: text.clone(),
                        font_id: config.font_id,
                        font_size: config.font_size,
                        color: config.color,
                    },
                });
            }
            NodeKind::Element(decl) => {
                if let Some(id) = decl.id {
                    self.frame
                        .elements
                        .push(HitRegion::new(id, bounds).clipped(clip).on_layer(layer));
                }

                if !decl.background.is_transparent() {
                    self.frame.commands.push(RenderCommand {
                        bounding_box: bounds,
                        id: decl.id,
                        kind: RenderCommandKind::Rectangle {
                            color: decl.background,
                            corner_radius: decl.corner_radius,
                        },
                    });
                }

                let child_clip = if decl.scroll_vertical {
                    self.frame.commands.push(RenderCommand {
                        bounding_box: bounds,
                        id: decl.id,
                        kind: RenderCommandKind::ScissorStart,
                    });
                    Some(match clip {
                        Some(outer) => outer.intersect(&bounds).unwrap_or_default(),
                        None => bounds,
                    })
                } else {
                    clip
                };

                for &child in &node.children {
                    self.node(child, child_clip, layer);
                }

                if decl.scroll_vertical {
                    self.frame.commands.push(RenderCommand {
                        bounding_box: bounds,
                        id: decl.id,
                        kind: RenderCommandKind::ScissorEnd,
                    });
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layout::tree::{ElementDecl, Floating, TextConfig};

    const A: ElementId = ElementId::new("A");
    const MENU: ElementId = ElementId::new("Menu");
    const B: ElementId = ElementId::new("B");

    fn boxes(tree: &LayoutTree) -> Vec<BoundingBox> {
        (0..tree.len())
            .map(|i| BoundingBox::new(0.0, i as f32 * 10.0, 100.0, 10.0))
            .collect()
    }

    fn kinds(frame: &EmittedFrame) -> Vec<&str> {
        frame
            .commands
            .iter()
            .map(|c| match &c.kind {
                RenderCommandKind::Rectangle { .. } => "rect",
                RenderCommandKind::Text { .. } => "text",
                RenderCommandKind::ScissorStart => "scissor-start",
                RenderCommandKind::ScissorEnd => "scissor-end",
            })
            .collect()
    }

    #[test]
    fn test_preorder_background_before_children() {
        let mut tree = LayoutTree::new();
        tree.open(ElementDecl::new().id(A).background(Rgba::rgb(1, 2, 3)));
        tree.text("hello", TextConfig::default());
        tree.close();

        let frame = emit(&tree, &boxes(&tree));
        assert_eq!(kinds(&frame), vec!["rect", "text"]);
        assert_eq!(frame.commands[0].id, Some(A));
        assert_eq!(frame.commands[1].text(), Some("hello"));
        assert_eq!(frame.elements, vec![HitRegion::new(A, boxes(&tree)[0])]);
    }

    #[test]
    fn test_transparent_background_emits_nothing() {
        let mut tree = LayoutTree::new();
        tree.open(ElementDecl::new().id(A));
        tree.close();

        let frame = emit(&tree, &boxes(&tree));
        assert!(frame.commands.is_empty());
        assert_eq!(frame.elements.len(), 1);
    }

    #[test]
    fn test_floating_emitted_last() {
        let mut tree = LayoutTree::new();
        tree.open(ElementDecl::new().background(Rgba::WHITE));
        tree.open(ElementDecl::new().id(A).background(Rgba::WHITE));
        tree.open(ElementDecl::new().id(MENU).background(Rgba::BLACK).floating(Floating::default()));
        tree.close();
        tree.close();
        tree.open(ElementDecl::new().id(B).background(Rgba::WHITE));
        tree.close();
        tree.close();

        let frame = emit(&tree, &boxes(&tree));
        let ids: Vec<_> = frame.commands.iter().map(|c| c.id).collect();
        assert_eq!(ids, vec![None, Some(A), Some(B), Some(MENU)]);
        let order: Vec<_> = frame.elements.iter().map(|region| (region.id, region.layer)).collect();
        assert_eq!(order, vec![(A, 0), (B, 0), (MENU, 1)]);
        assert_eq!(frame.floating_roots, vec![boxes(&tree)[2]]);
    }

    #[test]
    fn test_scroll_container_scissors() {
        let mut tree = LayoutTree::new();
        tree.open(ElementDecl::new().id(A).background(Rgba::WHITE).scroll_vertical());
        tree.text("body", TextConfig::default());
        tree.close();

        let frame = emit(&tree, &boxes(&tree));
        assert_eq!(kinds(&frame), vec!["rect", "scissor-start", "text", "scissor-end"]);
    }

    #[test]
    fn test_scroll_clip_carried_to_descendants() {
        let mut tree = LayoutTree::new();
        tree.open(ElementDecl::new().id(A).scroll_vertical());
        tree.open(ElementDecl::new().scroll_vertical());
        tree.open(ElementDecl::new().id(B));
        tree.close();
        tree.close();
        tree.open(ElementDecl::new().id(MENU).floating(Floating::default()));
        tree.close();
        tree.close();

        let boxes = boxes(&tree);
        let frame = emit(&tree, &boxes);

        // Rows are stacked 10 apart, so the nested clips do not overlap
        assert_eq!(frame.elements[0].clip, None);
        assert_eq!(frame.elements[1].id, B);
        assert_eq!(frame.elements[1].clip, Some(BoundingBox::default()));
        assert_eq!(frame.elements[2].id, MENU);
        assert_eq!(frame.elements[2].clip, None);
        assert_eq!(frame.elements[2].layer, 1);
    }

    #[test]
    fn test_apply_y_offset() {
        let mut tree = LayoutTree::new();
        tree.open(ElementDecl::new().id(A).background(Rgba::WHITE));
        tree.close();

        let mut frame = emit(&tree, &boxes(&tree));
        frame.apply_y_offset(-25.0);
        assert_eq!(frame.commands[0].bounding_box.y, -25.0);
        assert_eq!(frame.elements[0].bounds.y, -25.0);
    }
}
