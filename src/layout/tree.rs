//! Declarative element tree for one frame.
//!
//! The builder opens and closes elements in document order; text runs are
//! leaves. Nodes live in a flat `Vec` and reference each other by index, the
//! same parent/children shape the layout bridge feeds to taffy.

use crate::engine::element::ElementId;
use crate::types::{ChildAlignment, Dimension, FlexDirection, Padding, Point, Rgba, Sizing};

// =============================================================================
// Configuration
// =============================================================================

/// Font and color of a text run.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TextConfig {
    pub font_id: u16,
    pub font_size: u16,
    pub color: Rgba,
}

impl Default for TextConfig {
    fn default() -> Self {
        Self {
            font_id: 0,
            font_size: 24,
            color: Rgba::WHITE,
        }
    }
}

impl TextConfig {
    pub const fn new(font_id: u16, font_size: u16, color: Rgba) -> Self {
        Self { font_id, font_size, color }
    }
}

/// How an element arranges its children.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct LayoutConfig {
    pub direction: FlexDirection,
    pub sizing: Sizing,
    pub padding: Padding,
    pub child_gap: f32,
    /// Vertical placement of children.
    pub child_alignment: ChildAlignment,
}

/// Attach the element's top-left corner to its parent's bottom-left corner,
/// outside normal flow.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Floating {
    pub offset: Point,
}

/// Everything about an element except its children.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ElementDecl {
    pub id: Option<ElementId>,
    pub layout: LayoutConfig,
    pub background: Rgba,
    pub corner_radius: f32,
    pub floating: Option<Floating>,
    /// Clip children vertically and let them overflow the box.
    pub scroll_vertical: bool,
}

impl Default for ElementDecl {
    fn default() -> Self {
        Self {
            id: None,
            layout: LayoutConfig::default(),
            background: Rgba::TRANSPARENT,
            corner_radius: 0.0,
            floating: None,
            scroll_vertical: false,
        }
    }
}

impl ElementDecl {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn id(mut self, id: ElementId) -> Self {
        self.id = Some(id);
        self
    }

    pub fn direction(mut self, direction: FlexDirection) -> Self {
        self.layout.direction = direction;
        self
    }

    pub fn sizing(mut self, sizing: Sizing) -> Self {
        self.layout.sizing = sizing;
        self
    }

    pub fn width(mut self, width: Dimension) -> Self {
        self.layout.sizing.width = width;
        self
    }

    pub fn height(mut self, height: Dimension) -> Self {
        self.layout.sizing.height = height;
        self
    }

    pub fn padding(mut self, padding: Padding) -> Self {
        self.layout.padding = padding;
        self
    }

    pub fn child_gap(mut self, gap: f32) -> Self {
        self.layout.child_gap = gap;
        self
    }

    pub fn align(mut self, alignment: ChildAlignment) -> Self {
        self.layout.child_alignment = alignment;
        self
    }

    pub fn background(mut self, color: Rgba) -> Self {
        self.background = color;
        self
    }

    pub fn corner_radius(mut self, radius: f32) -> Self {
        self.corner_radius = radius;
        self
    }

    pub fn floating(mut self, floating: Floating) -> Self {
        self.floating = Some(floating);
        self
    }

    pub fn scroll_vertical(mut self) -> Self {
        self.scroll_vertical = true;
        self
    }
}

// =============================================================================
// Tree
// =============================================================================

#[derive(Debug, Clone, PartialEq)]
pub enum NodeKind {
    Element(ElementDecl),
    Text { text: String, config: TextConfig },
}

#[derive(Debug, Clone, PartialEq)]
pub struct LayoutNode {
    pub kind: NodeKind,
    pub parent: Option<usize>,
    pub children: Vec<usize>,
}

impl LayoutNode {
    pub fn element(&self) -> Option<&ElementDecl> {
        match &self.kind {
            NodeKind::Element(decl) => Some(decl),
            NodeKind::Text { .. } => None,
        }
    }

    pub fn id(&self) -> Option<ElementId> {
        self.element().and_then(|decl| decl.id)
    }
}

/// Flat element tree built with open/close calls.
#[derive(Debug, Default)]
pub struct LayoutTree {
    nodes: Vec<LayoutNode>,
    roots: Vec<usize>,
    open: Vec<usize>,
}

impl LayoutTree {
    pub fn new() -> Self {
        Self::default()
    }

    /// Remove every node. Called at the start of each frame.
    pub fn clear(&mut self) {
        self.nodes.clear();
        self.roots.clear();
        self.open.clear();
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn node(&self, index: usize) -> Option<&LayoutNode> {
        self.nodes.get(index)
    }

    pub fn nodes(&self) -> &[LayoutNode] {
        &self.nodes
    }

    /// Top-level elements in declaration order.
    pub fn roots(&self) -> &[usize] {
        &self.roots
    }

    /// Innermost element that is still open.
    pub fn current(&self) -> Option<usize> {
        self.open.last().copied()
    }

    /// Open an element; subsequent nodes become its children until `close`.
    pub fn open(&mut self, decl: ElementDecl) -> usize {
        let index = self.push(NodeKind::Element(decl));
        self.open.push(index);
        index
    }

    /// Close the innermost open element.
    pub fn close(&mut self) {
        self.open.pop();
    }

    /// Add a text leaf to the innermost open element.
    pub fn text(&mut self, text: impl Into<String>, config: TextConfig) -> usize {
        self.push(NodeKind::Text {
            text: text.into(),
            config,
        })
    }

    /// Find the node declared with `id`.
    pub fn find(&self, id: ElementId) -> Option<usize> {
        self.nodes.iter().position(|node| node.id() == Some(id))
    }

    fn push(&mut self, kind: NodeKind) -> usize {
        let index = self.nodes.len();
        let parent = self.current();
        self.nodes.push(LayoutNode {
            kind,
            parent,
            children: Vec::new(),
        });
        match parent {
            Some(p) => self.nodes[p].children.push(index),
            None => self.roots.push(index),
        }
        index
    }
}
