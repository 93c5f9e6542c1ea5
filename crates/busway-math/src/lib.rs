#![warn(missing_docs)]

//! Math types for busway route geometry.
//!
//! Thin wrappers around nalgebra plus the signed-axis direction vocabulary
//! (`+X`, `-X`, `+Y`, `-Y`, `+Z`, `-Z`) that routes are written in.

use std::fmt;
use std::str::FromStr;

use nalgebra::{Unit, Vector2, Vector3};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// A point in 3D model space.
pub type Point3 = nalgebra::Point3<f64>;

/// A vector in 3D space.
pub type Vec3 = Vector3<f64>;

/// A unit (normalized) direction vector in 3D space.
pub type Dir3 = Unit<Vector3<f64>>;

/// A point in a 2D local plane.
pub type Point2 = nalgebra::Point2<f64>;

/// A vector in 2D space.
pub type Vec2 = Vector2<f64>;

/// Errors from parsing or validating math primitives.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MathError {
    /// The text is not one of the six direction labels.
    #[error("invalid direction label: {0:?}")]
    InvalidDirection(String),

    /// The text is not one of the three axis names.
    #[error("invalid axis name: {0:?}")]
    InvalidAxis(String),
}

/// One of the three orthogonal model axes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Axis {
    /// The X axis.
    X,
    /// The Y axis.
    Y,
    /// The Z (vertical) axis.
    Z,
}

impl Axis {
    /// All three axes in index order.
    pub const ALL: [Axis; 3] = [Axis::X, Axis::Y, Axis::Z];

    /// Component index of this axis in a coordinate triple.
    pub fn index(self) -> usize {
        match self {
            Axis::X => 0,
            Axis::Y => 1,
            Axis::Z => 2,
        }
    }

    /// Positive unit vector along this axis.
    pub fn unit(self) -> Vec3 {
        match self {
            Axis::X => Vec3::x(),
            Axis::Y => Vec3::y(),
            Axis::Z => Vec3::z(),
        }
    }

    /// Whether this is the vertical axis.
    pub fn is_vertical(self) -> bool {
        self == Axis::Z
    }
}

impl fmt::Display for Axis {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Axis::X => "X",
            Axis::Y => "Y",
            Axis::Z => "Z",
        };
        f.write_str(name)
    }
}

impl FromStr for Axis {
    type Err = MathError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "X" => Ok(Axis::X),
            "Y" => Ok(Axis::Y),
            "Z" => Ok(Axis::Z),
            _ => Err(MathError::InvalidAxis(s.to_string())),
        }
    }
}

/// A signed-axis direction label.
///
/// Every label maps to a unit vector with exactly one non-zero component
/// whose sign matches the label. Labels are written `+X`, `-Y`, and so on;
/// a bare axis name such as `Z` is read as the positive direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum Direction {
    /// `+X`
    PosX,
    /// `-X`
    NegX,
    /// `+Y`
    PosY,
    /// `-Y`
    NegY,
    /// `+Z`
    PosZ,
    /// `-Z`
    NegZ,
}

impl Direction {
    /// All six labels.
    pub const ALL: [Direction; 6] = [
        Direction::PosX,
        Direction::NegX,
        Direction::PosY,
        Direction::NegY,
        Direction::PosZ,
        Direction::NegZ,
    ];

    /// Build a direction from an axis and a sign (`true` for positive).
    pub fn new(axis: Axis, positive: bool) -> Self {
        match (axis, positive) {
            (Axis::X, true) => Direction::PosX,
            (Axis::X, false) => Direction::NegX,
            (Axis::Y, true) => Direction::PosY,
            (Axis::Y, false) => Direction::NegY,
            (Axis::Z, true) => Direction::PosZ,
            (Axis::Z, false) => Direction::NegZ,
        }
    }

    /// The axis this direction runs along.
    pub fn axis(self) -> Axis {
        match self {
            Direction::PosX | Direction::NegX => Axis::X,
            Direction::PosY | Direction::NegY => Axis::Y,
            Direction::PosZ | Direction::NegZ => Axis::Z,
        }
    }

    /// Sign of the direction, `1.0` or `-1.0`, independent of the axis.
    pub fn sign(self) -> f64 {
        match self {
            Direction::PosX | Direction::PosY | Direction::PosZ => 1.0,
            Direction::NegX | Direction::NegY | Direction::NegZ => -1.0,
        }
    }

    /// Signed unit vector for this label.
    pub fn unit_vector(self) -> Vec3 {
        self.axis().unit() * self.sign()
    }

    /// Unit direction, for building local frames.
    pub fn dir3(self) -> Dir3 {
        Dir3::new_unchecked(self.unit_vector())
    }

    /// The label on the same axis with the opposite sign.
    pub fn opposite(self) -> Self {
        Direction::new(self.axis(), self.sign() < 0.0)
    }

    /// Whether this label runs along the vertical axis.
    pub fn has_z(self) -> bool {
        self.axis().is_vertical()
    }

    /// Canonical text form (`+X`, `-Z`, ...).
    pub fn label(self) -> &'static str {
        match self {
            Direction::PosX => "+X",
            Direction::NegX => "-X",
            Direction::PosY => "+Y",
            Direction::NegY => "-Y",
            Direction::PosZ => "+Z",
            Direction::NegZ => "-Z",
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for Direction {
    type Err = MathError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let t = s.trim();
        let (positive, rest) = match t.as_bytes().first() {
            Some(b'+') => (true, &t[1..]),
            Some(b'-') => (false, &t[1..]),
            _ => (true, t),
        };
        if rest.starts_with(char::is_whitespace) {
            return Err(MathError::InvalidDirection(s.to_string()));
        }
        let axis = rest
            .parse::<Axis>()
            .map_err(|_| MathError::InvalidDirection(s.to_string()))?;
        Ok(Direction::new(axis, positive))
    }
}

impl TryFrom<String> for Direction {
    type Error = MathError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<Direction> for String {
    fn from(d: Direction) -> Self {
        d.label().to_string()
    }
}

/// Advance `point` by `distance` along `direction`.
///
/// Exactly one coordinate changes, by `direction.sign() * distance`. A
/// negative distance moves toward the opposite-signed label of the same axis.
pub fn advance(point: &Point3, direction: Direction, distance: f64) -> Point3 {
    point + direction.unit_vector() * distance
}

/// Tolerance constants for geometric comparisons.
#[derive(Debug, Clone, Copy)]
pub struct Tolerance {
    /// Linear distance tolerance in mm.
    pub linear: f64,
    /// Angular tolerance in radians.
    pub angular: f64,
}

impl Tolerance {
    /// Default tolerances (1e-6 mm linear, 1e-9 rad angular).
    pub const DEFAULT: Self = Self {
        linear: 1e-6,
        angular: 1e-9,
    };

    /// Check if two points are coincident within tolerance.
    pub fn points_equal(&self, a: &Point3, b: &Point3) -> bool {
        (a - b).norm() < self.linear
    }

    /// Check if two 2D points are coincident within tolerance.
    pub fn points2_equal(&self, a: &Point2, b: &Point2) -> bool {
        (a - b).norm() < self.linear
    }

    /// Check if a scalar distance is effectively zero.
    pub fn is_zero(&self, d: f64) -> bool {
        d.abs() < self.linear
    }
}

impl Default for Tolerance {
    fn default() -> Self {
        Self::DEFAULT
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_advance_along_axes() {
        let p = advance(&Point3::origin(), Direction::PosX, 5.0);
        assert_eq!(p, Point3::new(5.0, 0.0, 0.0));

        let p = advance(&Point3::new(10.0, 20.0, 30.0), Direction::NegY, 7.0);
        assert_eq!(p, Point3::new(10.0, 13.0, 30.0));

        let p = advance(&Point3::new(3.0, 4.0, 5.0), Direction::NegZ, 2.0);
        assert_eq!(p, Point3::new(3.0, 4.0, 3.0));
    }

    #[test]
    fn test_advance_changes_one_coordinate() {
        let start = Point3::new(1.5, -2.0, 8.0);
        for dir in Direction::ALL {
            for d in [-12.5, -1.0, 0.0, 0.25, 400.0] {
                let p = advance(&start, dir, d);
                for axis in Axis::ALL {
                    let i = axis.index();
                    if axis == dir.axis() {
                        assert_relative_eq!(p[i] - start[i], dir.sign() * d);
                    } else {
                        assert_eq!(p[i], start[i]);
                    }
                }
            }
        }
    }

    #[test]
    fn test_negative_distance_matches_opposite() {
        let start = Point3::new(4.0, 4.0, 4.0);
        for dir in Direction::ALL {
            let a = advance(&start, dir, -3.0);
            let b = advance(&start, dir.opposite(), 3.0);
            assert!(Tolerance::DEFAULT.points_equal(&a, &b));
        }
    }

    #[test]
    fn test_unit_vector_invariant() {
        for dir in Direction::ALL {
            let v = dir.unit_vector();
            assert_relative_eq!(v.norm(), 1.0);
            let nonzero = v.iter().filter(|c| **c != 0.0).count();
            assert_eq!(nonzero, 1);
            assert_eq!(v[dir.axis().index()], dir.sign());
        }
    }

    #[test]
    fn test_parse_labels() {
        assert_eq!("+X".parse::<Direction>().unwrap(), Direction::PosX);
        assert_eq!("-z".parse::<Direction>().unwrap(), Direction::NegZ);
        assert_eq!(" Y ".parse::<Direction>().unwrap(), Direction::PosY);
        for dir in Direction::ALL {
            assert_eq!(dir.label().parse::<Direction>().unwrap(), dir);
        }
    }

    #[test]
    fn test_parse_rejects_unknown() {
        for bad in ["", "+", "+W", "XY", "++X", "+ X", "- z"] {
            assert!(matches!(
                bad.parse::<Direction>(),
                Err(MathError::InvalidDirection(_))
            ));
        }
    }

    #[test]
    fn test_opposite_and_z() {
        assert_eq!(Direction::PosY.opposite(), Direction::NegY);
        assert_eq!(Direction::NegZ.opposite(), Direction::PosZ);
        assert!(Direction::NegZ.has_z());
        assert!(!Direction::PosX.has_z());
    }
}
