//! Leader lines between an anchor dot and its text box.

use serde::Serialize;

use crate::{Point2D, Rect2D};

/// Largest gap tolerated between a rendered leader end and the point it
/// should touch, in view units.
pub const ALIGNMENT_TOLERANCE: f64 = 1.5;

/// A leader line in view space.
///
/// Renderers typically draw it as a zero-height element of width
/// [`Leader::length`] placed at `start` and rotated by
/// [`Leader::angle_deg`].
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Leader {
    /// Anchor center.
    pub start: Point2D,
    /// Nearest point of the box to the anchor center.
    pub end: Point2D,
}

/// Compute the leader from an anchor center to a box.
///
/// The start is the anchor itself. The end is the anchor clamped into the
/// box, so it lies on the boundary for anchors outside the box and collapses
/// onto the anchor for anchors inside it.
pub fn compute_leader(anchor: Point2D, rect: Rect2D) -> Leader {
    Leader {
        start: anchor,
        end: rect.clamp_point(&anchor),
    }
}

impl Leader {
    /// Euclidean length.
    pub fn length(&self) -> f64 {
        self.start.distance(&self.end)
    }

    /// Angle of the line from `start` to `end`, in degrees.
    ///
    /// Measured with `atan2(dy, dx)` in view space, so positive angles turn
    /// clockwise on screen.
    pub fn angle_deg(&self) -> f64 {
        (self.end.y - self.start.y)
            .atan2(self.end.x - self.start.x)
            .to_degrees()
    }

    /// End point rebuilt from `start`, length and angle, the way a renderer
    /// places a rotated line.
    pub fn reconstructed_end(&self) -> Point2D {
        let theta = self.angle_deg().to_radians();
        let len = self.length();
        self.start.offset(len * theta.cos(), len * theta.sin())
    }

    /// Whether start and end coincide (anchor inside the box).
    pub fn is_degenerate(&self) -> bool {
        self.length() < f64::EPSILON
    }

    /// Whether the rendered line touches both the anchor and the box within
    /// [`ALIGNMENT_TOLERANCE`].
    pub fn is_aligned(&self, anchor: &Point2D, rect: &Rect2D) -> bool {
        let target = rect.clamp_point(anchor);
        self.start.distance(anchor) < ALIGNMENT_TOLERANCE
            && self.reconstructed_end().distance(&target) < ALIGNMENT_TOLERANCE
    }
}
