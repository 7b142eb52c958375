//! Interaction Registry - Per-frame hover registrations and hit testing.
//!
//! Three tables, with different lifetimes:
//! - hover registrations: element → arena handle, rebuilt every frame
//! - element bounds: recorded after layout, in paint order, rebuilt every frame
//! - pointer-over set: recomputed at dispatch and kept across the next build,
//!   so the builder can ask "was the pointer over X" while laying out the frame
//!
//! Hit testing respects what is actually painted. A region only counts when
//! the point is also inside the scroll clip it was drawn under, and a
//! floating layer that contains the point hides every layer painted before
//! it, so an open menu swallows the pointer instead of the list below it.
//!
//! Dispatch picks one target: the topmost registered element under the
//! pointer. An element that receives `PressedThisFrame` captures the pointer
//! and keeps receiving events until its `ReleasedThisFrame`, even when the
//! pointer leaves its box mid-drag.

use std::collections::HashMap;

use tracing::trace;

use super::arena::ArenaHandle;
use super::element::ElementId;
use crate::state::pointer::{PointerData, PointerPhase};
use crate::types::{BoundingBox, Point};

// =============================================================================
// Hit regions
// =============================================================================

/// Where a named element was painted.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HitRegion {
    pub id: ElementId,
    pub bounds: BoundingBox,
    /// Scroll clip the element was drawn under, if any.
    pub clip: Option<BoundingBox>,
    /// 0 for the main tree, `n` for the `n`-th floating subtree.
    pub layer: usize,
}

impl HitRegion {
    /// Unclipped region in the main tree.
    pub const fn new(id: ElementId, bounds: BoundingBox) -> Self {
        Self {
            id,
            bounds,
            clip: None,
            layer: 0,
        }
    }

    pub const fn clipped(mut self, clip: Option<BoundingBox>) -> Self {
        self.clip = clip;
        self
    }

    pub const fn on_layer(mut self, layer: usize) -> Self {
        self.layer = layer;
        self
    }

    /// Whether `point` hits the visible part of the region.
    pub fn contains(&self, point: Point) -> bool {
        self.bounds.contains(point) && self.clip.is_none_or(|clip| clip.contains(point))
    }
}

// =============================================================================
// Registry
// =============================================================================

#[derive(Debug, Default)]
pub struct InteractionRegistry {
    hover: HashMap<ElementId, ArenaHandle>,
    regions: Vec<HitRegion>,
    /// Root box of each floating layer, layer `n` at index `n - 1`.
    floating_roots: Vec<BoundingBox>,
    pointer_over: Vec<ElementId>,
    captured: Option<ElementId>,
}

impl InteractionRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Drop last frame's registrations and boxes. The pointer-over set and
    /// any pointer capture survive.
    pub fn begin_frame(&mut self) {
        self.hover.clear();
        self.regions.clear();
        self.floating_roots.clear();
    }

    // -------------------------------------------------------------------------
    // Build phase
    // -------------------------------------------------------------------------

    /// Associate `handle` with `element` for this frame.
    ///
    /// Returns the handle it replaced, if the element was already registered.
    pub fn register_hover(&mut self, element: ElementId, handle: ArenaHandle) -> Option<ArenaHandle> {
        self.hover.insert(element, handle)
    }

    /// Number of elements with a hover registration this frame.
    pub fn hover_count(&self) -> usize {
        self.hover.len()
    }

    pub fn hover_handle(&self, element: ElementId) -> Option<ArenaHandle> {
        self.hover.get(&element).copied()
    }

    /// Record where an element was painted. Call in paint order.
    pub fn record_region(&mut self, region: HitRegion) {
        self.regions.push(region);
    }

    /// Record the root box of the next floating layer, returning its layer.
    pub fn record_floating_root(&mut self, bounds: BoundingBox) -> usize {
        self.floating_roots.push(bounds);
        self.floating_roots.len()
    }

    /// Box recorded for `element` this frame.
    pub fn bounds_of(&self, element: ElementId) -> Option<BoundingBox> {
        self.regions
            .iter()
            .rev()
            .find(|region| region.id == element)
            .map(|region| region.bounds)
    }

    // -------------------------------------------------------------------------
    // Pointer-over
    // -------------------------------------------------------------------------

    /// Recompute which elements contain `point`, bottom to top.
    ///
    /// Layers below the topmost floating layer containing `point` are
    /// skipped.
    pub fn update_pointer_over(&mut self, point: Point) {
        let floor = self
            .floating_roots
            .iter()
            .rposition(|root| root.contains(point))
            .map_or(0, |index| index + 1);

        self.pointer_over.clear();
        for region in &self.regions {
            if region.layer >= floor && region.contains(point) && !self.pointer_over.contains(&region.id) {
                self.pointer_over.push(region.id);
            }
        }
        trace!(
            x = point.x,
            y = point.y,
            floor,
            over = self.pointer_over.len(),
            "pointer over updated"
        );
    }

    /// Whether the pointer was over `element` at the last update.
    pub fn pointer_over(&self, element: ElementId) -> bool {
        self.pointer_over.contains(&element)
    }

    /// Elements under the pointer at the last update, bottom to top.
    pub fn pointer_over_ids(&self) -> &[ElementId] {
        &self.pointer_over
    }

    // -------------------------------------------------------------------------
    // Dispatch
    // -------------------------------------------------------------------------

    pub fn captured(&self) -> Option<ElementId> {
        self.captured
    }

    /// Resolve which registered element receives `pointer`.
    ///
    /// Call after [`update_pointer_over`](Self::update_pointer_over) for the
    /// same pointer position.
    pub fn dispatch_target(&mut self, pointer: &PointerData) -> Option<(ElementId, ArenaHandle)> {
        let target = match (self.captured, pointer.phase) {
            (Some(id), PointerPhase::Pressed | PointerPhase::ReleasedThisFrame) => Some(id),
            _ => self.topmost_registered(),
        };

        match pointer.phase {
            PointerPhase::PressedThisFrame => self.captured = target,
            PointerPhase::ReleasedThisFrame | PointerPhase::Released => self.captured = None,
            PointerPhase::Pressed => {}
        }

        let id = target?;
        match self.hover.get(&id) {
            Some(handle) => Some((id, *handle)),
            None => {
                // Captured element was not rebuilt this frame.
                self.captured = None;
                None
            }
        }
    }

    fn topmost_registered(&self) -> Option<ElementId> {
        self.pointer_over
            .iter()
            .rev()
            .find(|id| self.hover.contains_key(id))
            .copied()
    }
}

// =============================================================================
// Tests
// =============================================================================
