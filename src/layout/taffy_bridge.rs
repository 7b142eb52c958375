//! Taffy Bridge - Integration with Taffy layout engine
//!
//! Converts the frame's element tree to Taffy styles, runs flexbox layout
//! with text measured through the host's metrics backend, and returns an
//! absolute bounding box for every node.
//!
//! Sizing modes map onto flexbox like this:
//! - `Fit` → `auto` size, the content decides
//! - `Grow` along the parent's main axis → `flex-grow: 1` from a zero basis
//! - `Grow` along the parent's cross axis → `align-self: stretch`
//! - `Grow` on a root → the viewport length
//! - `Fixed(n)` → `n`, never shrunk
//!
//! Floating elements are absolutely positioned at 100% of the parent's
//! height, so their top-left sits on the parent's bottom-left.

use taffy::{
    AlignItems as TaffyAlignItems, AlignSelf as TaffyAlignSelf, AvailableSpace,
    Dimension as TaffyDimension, Display, FlexDirection as TaffyFlexDirection,
    JustifyContent as TaffyJustifyContent, LengthPercentage, LengthPercentageAuto, NodeId,
    Overflow as TaffyOverflow, Position as TaffyPosition, Rect, Size, Style, TaffyTree,
};

use crate::error::Result;
use crate::types::{BoundingBox, ChildAlignment, Dimension, FlexDirection, Viewport};

use super::text_measure::{TextMetrics, measure_wrapped};
use super::tree::{ElementDecl, LayoutTree, NodeKind, TextConfig};

// =============================================================================
// ENUM CONVERSIONS
// =============================================================================

fn to_taffy_flex_direction(dir: FlexDirection) -> TaffyFlexDirection {
    match dir {
        FlexDirection::LeftToRight => TaffyFlexDirection::Row,
        FlexDirection::TopToBottom => TaffyFlexDirection::Column,
    }
}

fn to_taffy_align_items(align: ChildAlignment) -> TaffyAlignItems {
    match align {
        ChildAlignment::Start => TaffyAlignItems::FlexStart,
        ChildAlignment::Center => TaffyAlignItems::Center,
        ChildAlignment::End => TaffyAlignItems::FlexEnd,
    }
}

fn to_taffy_justify_content(align: ChildAlignment) -> TaffyJustifyContent {
    match align {
        ChildAlignment::Start => TaffyJustifyContent::FlexStart,
        ChildAlignment::Center => TaffyJustifyContent::Center,
        ChildAlignment::End => TaffyJustifyContent::FlexEnd,
    }
}

/// Size along one axis when the element is not growing through flex.
fn to_taffy_dimension(dim: Dimension, root_length: Option<f32>) -> TaffyDimension {
    match (dim, root_length) {
        (Dimension::Fixed(n), _) => TaffyDimension::Length(n),
        (Dimension::Grow, Some(length)) => TaffyDimension::Length(length),
        (Dimension::Grow, None) | (Dimension::Fit, _) => TaffyDimension::Auto,
    }
}

// =============================================================================
// STYLE BUILDING
// =============================================================================

/// Build a Taffy Style for an element.
///
/// `parent` is the direction of the enclosing element, `None` for roots.
fn build_style(decl: &ElementDecl, parent: Option<FlexDirection>, viewport: Viewport) -> Style {
    let layout = &decl.layout;
    let is_root = parent.is_none();
    let (root_width, root_height) = if is_root {
        (Some(viewport.width), Some(viewport.height))
    } else {
        (None, None)
    };

    let mut style = Style {
        display: Display::Flex,
        flex_direction: to_taffy_flex_direction(layout.direction),

        size: Size {
            width: to_taffy_dimension(layout.sizing.width, root_width),
            height: to_taffy_dimension(layout.sizing.height, root_height),
        },

        padding: Rect {
            left: LengthPercentage::Length(layout.padding.left),
            right: LengthPercentage::Length(layout.padding.right),
            top: LengthPercentage::Length(layout.padding.top),
            bottom: LengthPercentage::Length(layout.padding.bottom),
        },

        gap: Size {
            width: LengthPercentage::Length(layout.child_gap),
            height: LengthPercentage::Length(layout.child_gap),
        },

        ..Default::default()
    };

    // Child alignment is vertical: cross axis of a row, main axis of a column
    if layout.direction.is_row() {
        style.align_items = Some(to_taffy_align_items(layout.child_alignment));
    } else {
        style.align_items = Some(TaffyAlignItems::FlexStart);
        style.justify_content = Some(to_taffy_justify_content(layout.child_alignment));
    }

    if let Some(parent_direction) = parent {
        let (main, cross) = if parent_direction.is_row() {
            (layout.sizing.width, layout.sizing.height)
        } else {
            (layout.sizing.height, layout.sizing.width)
        };

        match main {
            Dimension::Grow => {
                style.flex_grow = 1.0;
                style.flex_shrink = 1.0;
                style.flex_basis = TaffyDimension::Length(0.0);
            }
            Dimension::Fixed(_) => style.flex_shrink = 0.0,
            Dimension::Fit => {}
        }

        if cross == Dimension::Grow {
            style.align_self = Some(TaffyAlignSelf::Stretch);
        }
    }

    if let Some(floating) = decl.floating {
        style.position = TaffyPosition::Absolute;
        style.inset = Rect {
            left: LengthPercentageAuto::Length(floating.offset.x),
            right: LengthPercentageAuto::Auto,
            top: LengthPercentageAuto::Percent(1.0),
            bottom: LengthPercentageAuto::Auto,
        };
        style.margin.top = LengthPercentageAuto::Length(floating.offset.y);
    }

    if decl.scroll_vertical {
        style.overflow = taffy::Point {
            x: TaffyOverflow::Visible,
            y: TaffyOverflow::Scroll,
        };
        style.scrollbar_width = 0.0;
    }

    style
}

// =============================================================================
// TEXT MEASUREMENT
// =============================================================================

/// Measure function for text leaves.
fn measure_text(
    text: &str,
    config: &TextConfig,
    metrics: &dyn TextMetrics,
    known_dimensions: Size<Option<f32>>,
    available_space: Size<AvailableSpace>,
) -> Size<f32> {
    if text.is_empty() {
        return Size::ZERO;
    }

    // Width to wrap at
    let max_width = known_dimensions.width.unwrap_or(match available_space.width {
        AvailableSpace::Definite(w) => w,
        AvailableSpace::MinContent => 0.0,
        AvailableSpace::MaxContent => f32::INFINITY,
    });

    let (width, height) = measure_wrapped(text, max_width, metrics, config);

    Size {
        width: known_dimensions.width.unwrap_or(width),
        height: known_dimensions.height.unwrap_or(height),
    }
}

// =============================================================================
// MAIN ENTRY POINT
// =============================================================================

/// Compute absolute bounding boxes for every node of `tree`.
///
/// The result is indexed like `tree.nodes()`.
pub fn compute_layout(
    tree: &LayoutTree,
    viewport: Viewport,
    metrics: &dyn TextMetrics,
) -> Result<Vec<BoundingBox>> {
    let nodes = tree.nodes();
    if nodes.is_empty() {
        return Ok(Vec::new());
    }

    let mut taffy: TaffyTree<usize> = TaffyTree::new();
    let mut node_ids: Vec<NodeId> = Vec::with_capacity(nodes.len());

    // First pass: one Taffy node per element or text run
    for (index, node) in nodes.iter().enumerate() {
        let parent_direction = node
            .parent
            .and_then(|p| nodes.get(p))
            .and_then(|p| p.element())
            .map(|decl| decl.layout.direction);

        let node_id = match &node.kind {
            NodeKind::Element(decl) => taffy.new_leaf(build_style(decl, parent_direction, viewport))?,
            NodeKind::Text { .. } => {
                let style = Style {
                    flex_shrink: 1.0,
                    ..Default::default()
                };
                taffy.new_leaf_with_context(style, index)?
            }
        };
        node_ids.push(node_id);
    }

    // Second pass: parent-child relationships, in declaration order
    for (index, node) in nodes.iter().enumerate() {
        for &child in &node.children {
            taffy.add_child(node_ids[index], node_ids[child])?;
        }
    }

    let available = Size {
        width: AvailableSpace::Definite(viewport.width),
        height: AvailableSpace::Definite(viewport.height),
    };

    let mut measure_fn = |known_dimensions: Size<Option<f32>>,
                          available_space: Size<AvailableSpace>,
                          _node_id: NodeId,
                          context: Option<&mut usize>,
                          _style: &Style| {
        let Some(&mut index) = context else {
            return Size::ZERO;
        };
        match nodes.get(index).map(|node| &node.kind) {
            Some(NodeKind::Text { text, config }) => {
                measure_text(text, config, metrics, known_dimensions, available_space)
            }
            _ => Size::ZERO,
        }
    };

    for &root in tree.roots() {
        taffy.compute_layout_with_measure(node_ids[root], available, &mut measure_fn)?;
    }

    // Extract results. Parents precede children, so their boxes are final.
    let mut boxes = vec![BoundingBox::default(); nodes.len()];
    for (index, node) in nodes.iter().enumerate() {
        let layout = taffy.layout(node_ids[index])?;
        let (origin_x, origin_y) = match node.parent {
            Some(p) => (boxes[p].x, boxes[p].y),
            None => (0.0, 0.0),
        };
        boxes[index] = BoundingBox::new(
            origin_x + layout.location.x,
            origin_y + layout.location.y,
            layout.size.width,
            layout.size.height,
        );
    }

    Ok(boxes)
}
