//! Corner (elbow) solids.
//!
//! An elbow is an L-shaped footprint lying in the turn plane, extruded
//! symmetrically along the plane normal. The local frame at the vertex is
//! `x = dir_in`, `y = dir_out`, `normal = x × y`, so every turn builds the
//! same footprint shape and only the embedding differs.

use busway_math::{Dir3, Direction, Point2, Point3, Tolerance, Vec3};
use tracing::trace;

use crate::elbow::{classify_turn, is_collinear, ElbowCuts, TurnPlane};
use crate::{CrossSection, Result, SolidsError};

/// A planar polygon extruded along its plane normal.
///
/// The extrusion is centered on the plane: it spans `[-thickness / 2,
/// +thickness / 2]` along `normal`.
#[derive(Debug, Clone, PartialEq)]
pub struct ExtrudedSolid {
    /// Origin of the local plane (the route vertex).
    pub origin: Point3,
    /// Local X axis (incoming run direction).
    pub x_dir: Dir3,
    /// Local Y axis (outgoing run direction).
    pub y_dir: Dir3,
    /// Plane normal, `x_dir × y_dir`.
    pub normal: Dir3,
    /// Closed footprint in local plane coordinates, counter-clockwise about `normal`.
    pub polygon: Vec<Point2>,
    /// Extrusion thickness along `normal`.
    pub thickness: f64,
    /// Classification of the turn that produced this solid.
    pub plane: TurnPlane,
}

impl ExtrudedSolid {
    /// Map a local 2D point into model space on the mid-plane.
    pub fn to_3d(&self, p: Point2) -> Point3 {
        self.origin + p.x * self.x_dir.as_ref() + p.y * self.y_dir.as_ref()
    }

    /// Both polygon rings in model space: bottom ring first, then top ring.
    pub fn vertices_3d(&self) -> Vec<Point3> {
        let half: Vec3 = self.normal.as_ref() * (self.thickness / 2.0);
        let mid: Vec<Point3> = self.polygon.iter().map(|p| self.to_3d(*p)).collect();
        mid.iter()
            .map(|p| p - half)
            .chain(mid.iter().map(|p| p + half))
            .collect()
    }

    /// Signed area of the footprint (positive for counter-clockwise).
    pub fn footprint_area(&self) -> f64 {
        signed_area(&self.polygon)
    }
}

/// Build the elbow solid at `vertex` for a turn from `dir_in` to `dir_out`.
///
/// The footprint half-extent is half of the cross-section dimension that lies
/// in the turn plane (width for horizontal turns, height for vertical ones).
/// The extrusion thickness is the other dimension: height for horizontal
/// turns, width for vertical turns.
pub fn build_elbow_solid(
    vertex: Point3,
    dir_in: Direction,
    dir_out: Direction,
    cuts: ElbowCuts,
    section: CrossSection,
) -> Result<ExtrudedSolid> {
    if is_collinear(dir_in, dir_out) {
        return Err(SolidsError::CollinearTurn(dir_in, dir_out));
    }

    let plane = classify_turn(dir_in, dir_out);
    let (half, thickness) = match plane {
        TurnPlane::Horizontal => (section.half_width(), section.height),
        TurnPlane::Vertical => (section.half_height(), section.width),
    };

    let x = dir_in.unit_vector();
    let y = dir_out.unit_vector();
    let normal = Dir3::new_normalize(x.cross(&y));

    let polygon = corner_footprint(cuts, half);
    trace!(
        %dir_in,
        %dir_out,
        ?plane,
        thickness,
        vertices = polygon.len(),
        "built elbow footprint"
    );

    Ok(ExtrudedSolid {
        origin: vertex,
        x_dir: dir_in.dir3(),
        y_dir: dir_out.dir3(),
        normal,
        polygon,
        thickness,
        plane,
    })
}

/// L-shaped corner footprint in local coordinates.
///
/// Covers the incoming leg `[-a, h] × [-h, h]` and the outgoing leg
/// `[-h, h] × [-h, b]`, with each leg at least `h` long so the duct is never
/// notched. Redundant vertices are dropped, so legs no longer than `h`
/// collapse to a rectangle.
pub fn corner_footprint(cuts: ElbowCuts, half: f64) -> Vec<Point2> {
    let a = cuts.a.max(half);
    let b = cuts.b.max(half);
    let ring = vec![
        Point2::new(-a, -half),
        Point2::new(half, -half),
        Point2::new(half, b),
        Point2::new(-half, b),
        Point2::new(-half, half),
        Point2::new(-a, half),
    ];
    simplify_ring(ring)
}

/// Remove repeated and collinear vertices from a closed ring.
fn simplify_ring(mut ring: Vec<Point2>) -> Vec<Point2> {
    let tol = Tolerance::DEFAULT;
    loop {
        let n = ring.len();
        if n < 3 {
            return ring;
        }
        let redundant = (0..n).find(|&i| {
            let prev = ring[(i + n - 1) % n];
            let cur = ring[i];
            let next = ring[(i + 1) % n];
            if tol.points2_equal(&prev, &cur) {
                return true;
            }
            let d1 = cur - prev;
            let d2 = next - cur;
            tol.is_zero(d1.perp(&d2))
        });
        match redundant {
            Some(i) => {
                ring.remove(i);
            }
            None => return ring,
        }
    }
}

fn signed_area(ring: &[Point2]) -> f64 {
    let n = ring.len();
    (0..n)
        .map(|i| {
            let p = ring[i];
            let q = ring[(i + 1) % n];
            p.x * q.y - q.x * p.y
        })
        .sum::<f64>()
        / 2.0
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use busway_math::Direction::*;

    fn cuts(a: f64, b: f64) -> ElbowCuts {
        ElbowCuts { a, b }
    }

    fn section(w: f64, h: f64) -> CrossSection {
        CrossSection::new(w, h).unwrap()
    }

    fn local_y_extents(solid: &ExtrudedSolid) -> Vec<f64> {
        solid
            .polygon
            .iter()
            .map(|p| p.y.abs())
            .filter(|v| *v != 0.0)
            .collect()
    }

    #[test]
    fn test_horizontal_uses_height_for_thickness() {
        let solid = build_elbow_solid(
            Point3::origin(),
            PosX,
            PosY,
            cuts(100.0, 150.0),
            section(200.0, 120.0),
        )
        .unwrap();
        assert_eq!(solid.thickness, 120.0);
        assert_eq!(solid.plane, TurnPlane::Horizontal);
        assert!(local_y_extents(&solid).contains(&100.0));
    }

    #[test]
    fn test_vertical_uses_width_for_thickness() {
        let solid = build_elbow_solid(
            Point3::origin(),
            PosX,
            PosZ,
            cuts(80.0, 120.0),
            section(220.0, 140.0),
        )
        .unwrap();
        assert_eq!(solid.thickness, 220.0);
        assert_eq!(solid.plane, TurnPlane::Vertical);
        assert!(local_y_extents(&solid).contains(&70.0));
    }

    #[test]
    fn test_thickness_rule_all_turns() {
        let sec = section(300.0, 90.0);
        for din in Direction::ALL {
            for dout in Direction::ALL {
                if is_collinear(din, dout) {
                    continue;
                }
                let solid =
                    build_elbow_solid(Point3::origin(), din, dout, cuts(270.0, 270.0), sec)
                        .unwrap();
                let expected = if din.has_z() || dout.has_z() {
                    300.0
                } else {
                    90.0
                };
                assert_eq!(solid.thickness, expected, "{din} -> {dout}");
            }
        }
    }

    #[test]
    fn test_collinear_rejected() {
        let err = build_elbow_solid(
            Point3::origin(),
            PosY,
            NegY,
            cuts(270.0, 270.0),
            section(100.0, 100.0),
        );
        assert_eq!(err, Err(SolidsError::CollinearTurn(PosY, NegY)));
    }

    #[test]
    fn test_footprint_is_l_shape() {
        let ring = corner_footprint(cuts(270.0, 270.0), 100.0);
        assert_eq!(ring.len(), 6);
        // Two 370 x 200 legs overlapping in a 200 x 200 square.
        assert_relative_eq!(signed_area(&ring), 2.0 * 370.0 * 200.0 - 200.0 * 200.0);
    }

    #[test]
    fn test_short_cuts_collapse_to_rectangle() {
        let ring = corner_footprint(cuts(50.0, 50.0), 100.0);
        assert_eq!(ring.len(), 4);
        assert_relative_eq!(signed_area(&ring), 200.0 * 200.0);

        let ring = corner_footprint(cuts(100.0, 150.0), 100.0);
        assert_eq!(ring.len(), 4);
    }

    #[test]
    fn test_normal_and_vertices() {
        let solid = build_elbow_solid(
            Point3::new(1000.0, 0.0, 0.0),
            PosX,
            PosY,
            cuts(270.0, 270.0),
            section(200.0, 120.0),
        )
        .unwrap();
        assert_relative_eq!(solid.normal.z, 1.0);

        let verts = solid.vertices_3d();
        assert_eq!(verts.len(), 12);
        let zs: Vec<f64> = verts.iter().map(|p| p.z).collect();
        assert!(zs[..6].iter().all(|z| (*z + 60.0).abs() < 1e-9));
        assert!(zs[6..].iter().all(|z| (*z - 60.0).abs() < 1e-9));
        // Outer corner of the bend sits at (vertex.x + h, -h).
        assert!(verts
            .iter()
            .any(|p| (p.x - 1100.0).abs() < 1e-9 && (p.y + 100.0).abs() < 1e-9));
    }

    #[test]
    fn test_vertical_turn_plane_normal() {
        let solid = build_elbow_solid(
            Point3::origin(),
            PosX,
            PosZ,
            cuts(320.0, 320.0),
            section(220.0, 140.0),
        )
        .unwrap();
        // +X × +Z = -Y
        assert_relative_eq!(solid.normal.y, -1.0);
        assert!(solid.footprint_area() > 0.0);
    }
}
