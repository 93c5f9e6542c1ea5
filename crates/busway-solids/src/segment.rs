//! Straight segment solids.

use busway_math::{Axis, Direction, Point3, Vec3};

use crate::{CrossSection, Result, SolidsError};

/// Default style tag for busway boxes.
pub const BUS_COLOR: &str = "#3C6EDC";

/// An axis-aligned box covering one straight run.
///
/// The box starts at `origin` on the run's centerline and extends `length`
/// along `direction`. Its cross-section is centered on the centerline, with
/// `width` measured along `width_axis` and `height` along the remaining axis.
#[derive(Debug, Clone, PartialEq)]
pub struct BoxSolid {
    /// Start of the run centerline.
    pub origin: Point3,
    /// Run direction.
    pub direction: Direction,
    /// Length along `direction`.
    pub length: f64,
    /// Cross-section width.
    pub width: f64,
    /// Cross-section height.
    pub height: f64,
    /// Axis the width is measured along. Perpendicular to `direction`.
    pub width_axis: Axis,
    /// Renderer style tag.
    pub style: String,
}

/// Axis the width of a run is measured along when nothing else decides it.
///
/// Horizontal runs keep their height vertical. Risers measure width along Y.
pub fn default_width_axis(direction: Direction) -> Axis {
    match direction.axis() {
        Axis::X => Axis::Y,
        Axis::Y => Axis::X,
        Axis::Z => Axis::Y,
    }
}

/// Build the box for a straight run.
///
/// `width` and `height` are forwarded exactly as given; vertical and
/// horizontal runs share the same parameter order.
pub fn build_segment_solid(
    origin: Point3,
    direction: Direction,
    length: f64,
    section: CrossSection,
) -> Result<BoxSolid> {
    if length.is_nan() || length <= 0.0 || length.is_infinite() {
        return Err(SolidsError::DegenerateSegment(length));
    }
    Ok(BoxSolid {
        origin,
        direction,
        length,
        width: section.width,
        height: section.height,
        width_axis: default_width_axis(direction),
        style: BUS_COLOR.to_string(),
    })
}

impl BoxSolid {
    /// Override the width axis. Ignored when `axis` is the run axis.
    pub fn with_width_axis(mut self, axis: Axis) -> Self {
        if axis != self.direction.axis() {
            self.width_axis = axis;
        }
        self
    }

    /// Override the style tag.
    pub fn with_style(mut self, style: impl Into<String>) -> Self {
        self.style = style.into();
        self
    }

    /// Axis the height is measured along.
    pub fn height_axis(&self) -> Axis {
        let run = self.direction.axis();
        Axis::ALL
            .into_iter()
            .find(|a| *a != run && *a != self.width_axis)
            .unwrap_or(Axis::Z)
    }

    /// End of the run centerline.
    pub fn end(&self) -> Point3 {
        busway_math::advance(&self.origin, self.direction, self.length)
    }

    /// The eight corners of the box in model space.
    pub fn corners(&self) -> Vec<Point3> {
        let w: Vec3 = self.width_axis.unit() * (self.width / 2.0);
        let h: Vec3 = self.height_axis().unit() * (self.height / 2.0);
        let mut out = Vec::with_capacity(8);
        for end in [self.origin, self.end()] {
            for (sw, sh) in [(-1.0, -1.0), (1.0, -1.0), (1.0, 1.0), (-1.0, 1.0)] {
                out.push(end + w * sw + h * sh);
            }
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use busway_math::Direction::*;

    #[test]
    fn test_vertical_segment_forwards_section() {
        let section = CrossSection::new(200.0, 120.0).unwrap();
        let b = build_segment_solid(Point3::origin(), PosZ, 500.0, section).unwrap();
        assert_eq!(b.width, 200.0);
        assert_eq!(b.height, 120.0);
        assert_eq!(b.length, 500.0);
        assert_eq!(b.style, BUS_COLOR);
    }

    #[test]
    fn test_parameter_order_direction_independent() {
        let section = CrossSection::new(310.0, 95.0).unwrap();
        for dir in Direction::ALL {
            let b = build_segment_solid(Point3::origin(), dir, 42.0, section).unwrap();
            assert_eq!((b.width, b.height), (310.0, 95.0), "{dir}");
            assert_ne!(b.width_axis, dir.axis());
        }
    }

    #[test]
    fn test_degenerate_length() {
        let section = CrossSection::new(100.0, 100.0).unwrap();
        for len in [0.0, -5.0, f64::NAN] {
            assert!(matches!(
                build_segment_solid(Point3::origin(), PosX, len, section),
                Err(SolidsError::DegenerateSegment(_))
            ));
        }
    }

    #[test]
    fn test_corners_span_box() {
        let section = CrossSection::new(200.0, 120.0).unwrap();
        let b = build_segment_solid(Point3::new(0.0, 0.0, 0.0), PosX, 1000.0, section).unwrap();
        assert_eq!(b.height_axis(), Axis::Z);
        let corners = b.corners();
        assert_eq!(corners.len(), 8);
        let max_y = corners.iter().map(|p| p.y).fold(f64::MIN, f64::max);
        let max_z = corners.iter().map(|p| p.z).fold(f64::MIN, f64::max);
        let max_x = corners.iter().map(|p| p.x).fold(f64::MIN, f64::max);
        assert_eq!(max_y, 100.0);
        assert_eq!(max_z, 60.0);
        assert_eq!(max_x, 1000.0);
    }

    #[test]
    fn test_width_axis_override() {
        let section = CrossSection::new(200.0, 120.0).unwrap();
        let b = build_segment_solid(Point3::origin(), NegZ, 300.0, section)
            .unwrap()
            .with_width_axis(Axis::X);
        assert_eq!(b.width_axis, Axis::X);
        assert_eq!(b.height_axis(), Axis::Y);

        // The run axis cannot carry the width.
        let b = b.with_width_axis(Axis::Z);
        assert_eq!(b.width_axis, Axis::X);
    }
}
