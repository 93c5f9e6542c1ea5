//! Solid list and the hand-off to whatever materializes solids.

use busway_math::{Axis, Direction, Point2, Point3};
use serde::Serialize;

use crate::{BoxSolid, ExtrudedSolid};

/// A solid produced for one route vertex or straight run.
#[derive(Debug, Clone, PartialEq)]
pub enum Solid {
    /// Elbow at a vertex.
    Extruded(ExtrudedSolid),
    /// Straight run.
    Box(BoxSolid),
}

/// Receiver for solid materialization.
///
/// The argument order mirrors the host primitives: an extrusion takes the
/// polygon, the thickness, then orientation; a box takes origin, length,
/// width, height, then style.
pub trait SolidSink {
    /// Materialize an extruded polygon.
    fn extrude(&mut self, polygon: &[Point2], thickness: f64, solid: &ExtrudedSolid);

    /// Materialize an axis-aligned box.
    #[allow(clippy::too_many_arguments)]
    fn solid_box(
        &mut self,
        origin: Point3,
        direction: Direction,
        length: f64,
        width: f64,
        height: f64,
        width_axis: Axis,
        style: &str,
    );
}

impl Solid {
    /// Hand this solid to a sink.
    pub fn emit<S: SolidSink + ?Sized>(&self, sink: &mut S) {
        match self {
            Solid::Extruded(e) => sink.extrude(&e.polygon, e.thickness, e),
            Solid::Box(b) => sink.solid_box(
                b.origin,
                b.direction,
                b.length,
                b.width,
                b.height,
                b.width_axis,
                &b.style,
            ),
        }
    }

    /// Model-space vertices of the solid.
    pub fn vertices(&self) -> Vec<Point3> {
        match self {
            Solid::Extruded(e) => e.vertices_3d(),
            Solid::Box(b) => b.corners(),
        }
    }

    /// Axis-aligned bounds of the solid.
    pub fn bounds(&self) -> Bounds3 {
        let mut bounds = Bounds3::empty();
        for p in self.vertices() {
            bounds.include_point(&p);
        }
        bounds
    }

    /// Whether this is an elbow.
    pub fn is_elbow(&self) -> bool {
        matches!(self, Solid::Extruded(_))
    }

    /// Plain serializable form.
    pub fn to_record(&self) -> SolidRecord {
        match self {
            Solid::Extruded(e) => SolidRecord::Extrusion {
                origin: to_array(&e.origin),
                x_dir: [e.x_dir.x, e.x_dir.y, e.x_dir.z],
                y_dir: [e.y_dir.x, e.y_dir.y, e.y_dir.z],
                normal: [e.normal.x, e.normal.y, e.normal.z],
                polygon: e.polygon.iter().map(|p| [p.x, p.y]).collect(),
                thickness: e.thickness,
            },
            Solid::Box(b) => SolidRecord::Box {
                origin: to_array(&b.origin),
                direction: b.direction,
                length: b.length,
                width: b.width,
                height: b.height,
                width_axis: b.width_axis,
                style: b.style.clone(),
            },
        }
    }
}

impl From<ExtrudedSolid> for Solid {
    fn from(e: ExtrudedSolid) -> Self {
        Solid::Extruded(e)
    }
}

impl From<BoxSolid> for Solid {
    fn from(b: BoxSolid) -> Self {
        Solid::Box(b)
    }
}

fn to_array(p: &Point3) -> [f64; 3] {
    [p.x, p.y, p.z]
}

/// Serializable solid description.
///
/// Uses plain arrays so export does not depend on nalgebra's serde support.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum SolidRecord {
    /// Extruded elbow footprint.
    Extrusion {
        /// Plane origin.
        origin: [f64; 3],
        /// Local X axis.
        x_dir: [f64; 3],
        /// Local Y axis.
        y_dir: [f64; 3],
        /// Extrusion axis.
        normal: [f64; 3],
        /// Footprint in local coordinates.
        polygon: Vec<[f64; 2]>,
        /// Thickness along `normal`, centered on the plane.
        thickness: f64,
    },
    /// Straight-run box.
    Box {
        /// Start of the centerline.
        origin: [f64; 3],
        /// Run direction.
        direction: Direction,
        /// Length along the run.
        length: f64,
        /// Cross-section width.
        width: f64,
        /// Cross-section height.
        height: f64,
        /// Axis the width lies along.
        width_axis: Axis,
        /// Style tag.
        style: String,
    },
}

/// Axis-aligned 3D bounding box.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bounds3 {
    /// Minimum corner.
    pub min: Point3,
    /// Maximum corner.
    pub max: Point3,
}

impl Bounds3 {
    /// Bounds containing nothing.
    pub fn empty() -> Self {
        Self {
            min: Point3::new(f64::INFINITY, f64::INFINITY, f64::INFINITY),
            max: Point3::new(f64::NEG_INFINITY, f64::NEG_INFINITY, f64::NEG_INFINITY),
        }
    }

    /// Grow to include a point.
    pub fn include_point(&mut self, p: &Point3) {
        self.min = self.min.inf(p);
        self.max = self.max.sup(p);
    }

    /// Grow to include other bounds.
    pub fn include(&mut self, other: &Bounds3) {
        if other.is_valid() {
            self.include_point(&other.min);
            self.include_point(&other.max);
        }
    }

    /// Whether any point has been included.
    pub fn is_valid(&self) -> bool {
        self.min.x <= self.max.x && self.min.y <= self.max.y && self.min.z <= self.max.z
    }

    /// Extent along each axis.
    pub fn size(&self) -> [f64; 3] {
        [
            self.max.x - self.min.x,
            self.max.y - self.min.y,
            self.max.z - self.min.z,
        ]
    }
}

impl Default for Bounds3 {
    fn default() -> Self {
        Self::empty()
    }
}

/// Bounds of a solid list.
pub fn bounds_of(solids: &[Solid]) -> Bounds3 {
    let mut bounds = Bounds3::empty();
    for s in solids {
        bounds.include(&s.bounds());
    }
    bounds
}

/// One call captured by [`RecordingSink`].
#[derive(Debug, Clone, PartialEq)]
pub enum RecordedCall {
    /// An `extrude` call.
    Extrude {
        /// Polygon argument.
        polygon: Vec<Point2>,
        /// Thickness argument.
        thickness: f64,
    },
    /// A `solid_box` call.
    Box {
        /// Origin argument.
        origin: Point3,
        /// Direction argument.
        direction: Direction,
        /// Length argument.
        length: f64,
        /// Width argument.
        width: f64,
        /// Height argument.
        height: f64,
        /// Style argument.
        style: String,
    },
}

/// A sink that records every call it receives, in order.
#[derive(Debug, Clone, Default)]
pub struct RecordingSink {
    /// Calls received so far.
    pub calls: Vec<RecordedCall>,
}

impl SolidSink for RecordingSink {
    fn extrude(&mut self, polygon: &[Point2], thickness: f64, _solid: &ExtrudedSolid) {
        self.calls.push(RecordedCall::Extrude {
            polygon: polygon.to_vec(),
            thickness,
        });
    }

    fn solid_box(
        &mut self,
        origin: Point3,
        direction: Direction,
        length: f64,
        width: f64,
        height: f64,
        _width_axis: Axis,
        style: &str,
    ) {
        self.calls.push(RecordedCall::Box {
            origin,
            direction,
            length,
            width,
            height,
            style: style.to_string(),
        });
    }
}
