//! 2D view-space types.

use serde::{Deserialize, Serialize};

/// A point in a view's 2D coordinate space (y grows downward).
///
/// A plain serde type rather than nalgebra's `Point2`, so view state can be
/// serialized without nalgebra's serde feature.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Point2D {
    /// X coordinate.
    pub x: f64,
    /// Y coordinate.
    pub y: f64,
}

impl Point2D {
    /// Origin point (0, 0).
    pub const ORIGIN: Self = Self { x: 0.0, y: 0.0 };

    /// Create a new 2D point.
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Distance to another point.
    pub fn distance(&self, other: &Self) -> f64 {
        (self.x - other.x).hypot(self.y - other.y)
    }

    /// This point shifted by `(dx, dy)`.
    pub fn offset(&self, dx: f64, dy: f64) -> Self {
        Self::new(self.x + dx, self.y + dy)
    }
}

impl Default for Point2D {
    fn default() -> Self {
        Self::ORIGIN
    }
}

impl From<busway_math::Point2> for Point2D {
    fn from(p: busway_math::Point2) -> Self {
        Self { x: p.x, y: p.y }
    }
}

impl From<Point2D> for busway_math::Point2 {
    fn from(p: Point2D) -> Self {
        busway_math::Point2::new(p.x, p.y)
    }
}

/// Axis-aligned rectangle in view space.
///
/// `left <= right` and `top <= bottom` for a well-formed rectangle. Inverted
/// rectangles are representable; operations on them degenerate rather than
/// fail.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Rect2D {
    /// Minimum X.
    pub left: f64,
    /// Minimum Y.
    pub top: f64,
    /// Maximum X.
    pub right: f64,
    /// Maximum Y.
    pub bottom: f64,
}

impl Rect2D {
    /// Create from edges.
    pub fn new(left: f64, top: f64, right: f64, bottom: f64) -> Self {
        Self {
            left,
            top,
            right,
            bottom,
        }
    }

    /// Create from a top-left corner and a size.
    pub fn from_origin_size(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self::new(x, y, x + width, y + height)
    }

    /// Width (negative when inverted).
    pub fn width(&self) -> f64 {
        self.right - self.left
    }

    /// Height (negative when inverted).
    pub fn height(&self) -> f64 {
        self.bottom - self.top
    }

    /// Center point.
    pub fn center(&self) -> Point2D {
        Point2D::new(
            (self.left + self.right) / 2.0,
            (self.top + self.bottom) / 2.0,
        )
    }

    /// Whether the rectangle has no area (zero or inverted extent).
    pub fn is_degenerate(&self) -> bool {
        self.width() <= 0.0 || self.height() <= 0.0
    }

    /// Whether the point lies inside or on the boundary.
    pub fn contains(&self, p: &Point2D) -> bool {
        p.x >= self.left && p.x <= self.right && p.y >= self.top && p.y <= self.bottom
    }

    /// Closest point of the rectangle to `p`.
    ///
    /// Clamps `x` into `[left, right]` and `y` into `[top, bottom]`. The
    /// lower bound wins when the rectangle is inverted, so the result is
    /// always a single well-defined point.
    pub fn clamp_point(&self, p: &Point2D) -> Point2D {
        Point2D::new(
            self.left.max(self.right.min(p.x)),
            self.top.max(self.bottom.min(p.y)),
        )
    }
}
