//! Core types for lion-viewer.
//!
//! These are the plain values every stage of the frame shares: colors and
//! geometry for render commands, the sizing vocabulary for the declarative
//! tree, and the cell type the reference rasterizer writes into.

// =============================================================================
// Color
// =============================================================================

/// RGBA color with 8-bit channels (0-255).
///
/// Alpha 255 = fully opaque, 0 = fully transparent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Rgba {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Rgba {
    /// Create a new RGBA color.
    pub const fn new(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    /// Create an opaque RGB color.
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self::new(r, g, b, 255)
    }

    pub const TRANSPARENT: Self = Self::new(0, 0, 0, 0);
    pub const BLACK: Self = Self::rgb(0, 0, 0);
    pub const WHITE: Self = Self::rgb(255, 255, 255);

    /// Same color with a different alpha.
    pub const fn with_alpha(self, a: u8) -> Self {
        Self { a, ..self }
    }

    #[inline]
    pub const fn is_opaque(&self) -> bool {
        self.a == 255
    }

    #[inline]
    pub const fn is_transparent(&self) -> bool {
        self.a == 0
    }

    /// Alpha blend `src` over `dst` (Porter-Duff "over").
    #[inline]
    pub fn blend(src: Self, dst: Self) -> Self {
        if src.is_opaque() {
            return src;
        }
        if src.is_transparent() {
            return dst;
        }

        let sa = src.a as u32;
        let da = dst.a as u32;
        let inv_sa = 255 - sa;

        // out_a = src_a + dst_a * (1 - src_a)
        let out_a = sa + da * inv_sa / 255;
        if out_a == 0 {
            return Self::TRANSPARENT;
        }

        let channel = |s: u8, d: u8| -> u8 {
            let v = (s as u32 * sa + d as u32 * da * inv_sa / 255) / out_a;
            v.min(255) as u8
        };

        Self {
            r: channel(src.r, dst.r),
            g: channel(src.g, dst.g),
            b: channel(src.b, dst.b),
            a: out_a.min(255) as u8,
        }
    }
}

// =============================================================================
// Geometry
// =============================================================================

/// A point in layout units.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Point {
    pub x: f32,
    pub y: f32,
}

impl Point {
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }
}

/// An axis-aligned box in layout units.
///
/// Every render command carries one; the interaction registry hit-tests
/// against the same boxes.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct BoundingBox {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl BoundingBox {
    pub const fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self { x, y, width, height }
    }

    /// Check if a point is inside this box. Edges on the right and bottom
    /// belong to the neighbour.
    #[inline]
    pub fn contains(&self, point: Point) -> bool {
        point.x >= self.x
            && point.x < self.x + self.width
            && point.y >= self.y
            && point.y < self.y + self.height
    }

    /// Compute intersection of two boxes.
    pub fn intersect(&self, other: &BoundingBox) -> Option<BoundingBox> {
        let x1 = self.x.max(other.x);
        let y1 = self.y.max(other.y);
        let x2 = (self.x + self.width).min(other.x + other.width);
        let y2 = (self.y + self.height).min(other.y + other.height);

        if x2 > x1 && y2 > y1 {
            Some(BoundingBox::new(x1, y1, x2 - x1, y2 - y1))
        } else {
            None
        }
    }

    /// The same box moved down by `dy`.
    #[inline]
    pub fn offset_y(self, dy: f32) -> Self {
        Self { y: self.y + dy, ..self }
    }
}

/// Size of the area a frame is laid out into.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Viewport {
    pub width: f32,
    pub height: f32,
}

impl Viewport {
    pub const fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }
}

// =============================================================================
// Sizing
// =============================================================================

/// How an element is sized along one axis.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum Dimension {
    /// Shrink-wrap the content.
    #[default]
    Fit,
    /// Take the remaining space of the parent.
    Grow,
    /// Exactly this many layout units.
    Fixed(f32),
}

/// Per-axis sizing of an element.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Sizing {
    pub width: Dimension,
    pub height: Dimension,
}

impl Sizing {
    /// Grow along both axes.
    pub const GROW: Self = Self {
        width: Dimension::Grow,
        height: Dimension::Grow,
    };

    pub const fn new(width: Dimension, height: Dimension) -> Self {
        Self { width, height }
    }
}

/// Inner spacing of an element, in layout units.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Padding {
    pub left: f32,
    pub right: f32,
    pub top: f32,
    pub bottom: f32,
}

impl Padding {
    pub const fn new(left: f32, right: f32, top: f32, bottom: f32) -> Self {
        Self { left, right, top, bottom }
    }

    /// Same padding on all four sides.
    pub const fn all(value: f32) -> Self {
        Self::new(value, value, value, value)
    }

    /// Horizontal and vertical padding.
    pub const fn xy(x: f32, y: f32) -> Self {
        Self::new(x, x, y, y)
    }
}

/// Direction children are laid out in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FlexDirection {
    #[default]
    LeftToRight,
    TopToBottom,
}

impl FlexDirection {
    pub const fn is_row(&self) -> bool {
        matches!(self, Self::LeftToRight)
    }
}

/// Cross-axis placement of children that do not grow.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ChildAlignment {
    #[default]
    Start,
    Center,
    End,
}

// =============================================================================
// Cell Attributes (bitflags)
// =============================================================================

bitflags::bitflags! {
    /// Text attributes of a rasterized cell.
    ///
    /// Combine with bitwise OR: `Attr::BOLD | Attr::UNDERLINE`
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
    pub struct Attr: u8 {
        const NONE = 0;
        const BOLD = 1 << 0;
        const DIM = 1 << 1;
        const UNDERLINE = 1 << 2;
        const INVERSE = 1 << 3;
    }
}

// =============================================================================
// Cell - The unit the reference rasterizer writes
// =============================================================================

/// A single terminal cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Cell {
    pub char: char,
    pub fg: Rgba,
    pub bg: Rgba,
    pub attrs: Attr,
}

impl Default for Cell {
    fn default() -> Self {
        Self {
            char: ' ',
            fg: Rgba::WHITE,
            bg: Rgba::BLACK,
            attrs: Attr::NONE,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_blend_opaque_and_transparent() {
        let dst = Rgba::rgb(10, 20, 30);
        assert_eq!(Rgba::blend(Rgba::WHITE, dst), Rgba::WHITE);
        assert_eq!(Rgba::blend(Rgba::TRANSPARENT, dst), dst);
    }

    #[test]
    fn test_blend_half_alpha() {
        let out = Rgba::blend(Rgba::new(255, 255, 0, 128), Rgba::BLACK);
        assert_eq!(out.a, 255);
        assert!(out.r > 120 && out.r < 135);
        assert_eq!(out.b, 0);
    }

    #[test]
    fn test_bounding_box_contains() {
        let bb = BoundingBox::new(10.0, 10.0, 20.0, 5.0);
        assert!(bb.contains(Point::new(10.0, 10.0)));
        assert!(bb.contains(Point::new(29.9, 14.9)));
        assert!(!bb.contains(Point::new(30.0, 12.0)));
        assert!(!bb.contains(Point::new(15.0, 15.0)));
    }

    #[test]
    fn test_bounding_box_intersect() {
        let a = BoundingBox::new(0.0, 0.0, 10.0, 10.0);
        let b = BoundingBox::new(5.0, 5.0, 10.0, 10.0);
        assert_eq!(a.intersect(&b), Some(BoundingBox::new(5.0, 5.0, 5.0, 5.0)));

        let c = BoundingBox::new(20.0, 20.0, 1.0, 1.0);
        assert_eq!(a.intersect(&c), None);
    }

    #[test]
    fn test_offset_y() {
        let bb = BoundingBox::new(1.0, 2.0, 3.0, 4.0).offset_y(-10.0);
        assert_eq!(bb, BoundingBox::new(1.0, -8.0, 3.0, 4.0));
    }
}
