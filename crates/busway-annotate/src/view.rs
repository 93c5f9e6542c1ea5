//! View identifiers and orthographic view projections.

use std::fmt;

use busway_math::{Point3, Vec3};
use serde::{Deserialize, Serialize};

use crate::Point2D;

/// Opaque, host-chosen name of a view.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ViewId(String);

impl ViewId {
    /// Create a view id.
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    /// The id as text.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for ViewId {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

impl From<String> for ViewId {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl fmt::Display for ViewId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Direction of an orthographic view.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum ViewDirection {
    /// Plan view: looking down along -Z (XY plane visible).
    #[default]
    Top,
    /// Looking up along +Z (XY plane visible, mirrored).
    Bottom,
    /// Looking along +Y (XZ plane visible).
    Front,
    /// Looking along -Y (XZ plane visible, mirrored).
    Back,
    /// Side view: looking along -X (YZ plane visible).
    Side,
    /// Looking along +X (YZ plane visible, mirrored).
    Left,
}

impl ViewDirection {
    /// Unit vector pointing from the viewer toward the model.
    pub fn view_vector(&self) -> Vec3 {
        match self {
            ViewDirection::Top => Vec3::new(0.0, 0.0, -1.0),
            ViewDirection::Bottom => Vec3::new(0.0, 0.0, 1.0),
            ViewDirection::Front => Vec3::new(0.0, 1.0, 0.0),
            ViewDirection::Back => Vec3::new(0.0, -1.0, 0.0),
            ViewDirection::Side => Vec3::new(-1.0, 0.0, 0.0),
            ViewDirection::Left => Vec3::new(1.0, 0.0, 0.0),
        }
    }

    /// Model direction that points up on screen.
    pub fn up_vector(&self) -> Vec3 {
        match self {
            ViewDirection::Top => Vec3::new(0.0, 1.0, 0.0),
            ViewDirection::Bottom => Vec3::new(0.0, -1.0, 0.0),
            _ => Vec3::new(0.0, 0.0, 1.0),
        }
    }

    /// Model direction that points right on screen.
    pub fn right_vector(&self) -> Vec3 {
        self.view_vector().cross(&self.up_vector())
    }
}

/// Orthographic projection from model space into a view's 2D space.
///
/// View space follows screen convention: x grows right, y grows down, and
/// `origin` is where the model origin lands.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ViewProjection {
    /// Which way the view looks.
    pub direction: ViewDirection,
    /// View units per model unit.
    pub scale: f64,
    /// View-space position of the model origin.
    pub origin: Point2D,
}

impl ViewProjection {
    /// Projection with unit scale and the model origin at the view origin.
    pub fn new(direction: ViewDirection) -> Self {
        Self {
            direction,
            scale: 1.0,
            origin: Point2D::ORIGIN,
        }
    }

    /// Same projection with another scale.
    pub fn with_scale(mut self, scale: f64) -> Self {
        self.scale = scale;
        self
    }

    /// Same projection with another origin.
    pub fn with_origin(mut self, origin: Point2D) -> Self {
        self.origin = origin;
        self
    }

    /// Project a model point into view space.
    pub fn project(&self, p: &Point3) -> Point2D {
        let right = self.direction.right_vector();
        let up = self.direction.up_vector();
        Point2D::new(
            self.origin.x + self.scale * p.coords.dot(&right),
            self.origin.y - self.scale * p.coords.dot(&up),
        )
    }

    /// Depth of a model point along the view direction (larger is farther).
    pub fn depth(&self, p: &Point3) -> f64 {
        p.coords.dot(&self.direction.view_vector())
    }
}

/// A view registered with the annotation store.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ViewSpec {
    /// View name.
    pub id: ViewId,
    /// How model points map into the view.
    pub projection: ViewProjection,
}

impl ViewSpec {
    /// A view with the given projection.
    pub fn new(id: impl Into<ViewId>, projection: ViewProjection) -> Self {
        Self {
            id: id.into(),
            projection,
        }
    }

    /// A view with unit scale looking along `direction`.
    pub fn standard(id: impl Into<ViewId>, direction: ViewDirection) -> Self {
        Self::new(id, ViewProjection::new(direction))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const ALL: [ViewDirection; 6] = [
        ViewDirection::Top,
        ViewDirection::Bottom,
        ViewDirection::Front,
        ViewDirection::Back,
        ViewDirection::Side,
        ViewDirection::Left,
    ];

    #[test]
    fn test_frames_are_orthonormal() {
        for dir in ALL {
            let (v, u, r) = (dir.view_vector(), dir.up_vector(), dir.right_vector());
            assert!((r.norm() - 1.0).abs() < 1e-12, "{dir:?}");
            assert!(v.dot(&u).abs() < 1e-12);
            assert!(v.dot(&r).abs() < 1e-12);
            assert!(u.dot(&r).abs() < 1e-12);
        }
    }

    #[test]
    fn test_standard_screen_axes() {
        assert_eq!(ViewDirection::Top.right_vector(), Vec3::x());
        assert_eq!(ViewDirection::Front.right_vector(), Vec3::x());
        assert_eq!(ViewDirection::Side.right_vector(), Vec3::y());
    }

    #[test]
    fn test_project_flips_y() {
        let proj = ViewProjection::new(ViewDirection::Front)
            .with_scale(0.1)
            .with_origin(Point2D::new(400.0, 300.0));
        let p = proj.project(&Point3::new(1000.0, 555.0, 2000.0));
        assert!((p.x - 500.0).abs() < 1e-9);
        assert!((p.y - 100.0).abs() < 1e-9);
        assert!((proj.depth(&Point3::new(0.0, 555.0, 0.0)) - 555.0).abs() < 1e-12);
    }

    #[test]
    fn test_view_id_serializes_as_string() {
        let id = ViewId::from("top");
        assert_eq!(serde_json::to_string(&id).unwrap(), "\"top\"");
        assert_eq!(id.to_string(), "top");
    }
}
