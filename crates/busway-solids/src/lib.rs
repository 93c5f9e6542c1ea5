#![warn(missing_docs)]

//! Solid construction for busway runs.
//!
//! Turns route vertices and straight runs into solids:
//!
//! - **Elbow cuts**: how far the adjoining straights are shortened at a turn,
//!   from a radius-keyed table (horizontal turns) or a fixed constant
//!   (vertical turns).
//! - **Corner solids**: an L-shaped footprint in the turn plane, extruded by
//!   the cross-section dimension perpendicular to that plane.
//! - **Segment solids**: axis-aligned boxes for the straight portions.
//!
//! Solids are plain data. Handing them to a renderer goes through the
//! [`SolidSink`] trait.
//!
//! # Example
//!
//! ```
//! use busway_math::{Direction, Point3};
//! use busway_solids::{build_elbow_solid, CrossSection, ElbowTable};
//!
//! let table = ElbowTable::default();
//! let cuts = table.resolve(1000, Direction::PosX, Direction::PosY).unwrap();
//! assert_eq!(cuts.a, 270.0);
//!
//! let section = CrossSection::new(200.0, 120.0).unwrap();
//! let elbow = build_elbow_solid(
//!     Point3::origin(),
//!     Direction::PosX,
//!     Direction::PosY,
//!     cuts,
//!     section,
//! )
//! .unwrap();
//! assert_eq!(elbow.thickness, 120.0);
//! ```

mod corner;
mod elbow;
mod section;
mod segment;
mod solid;

pub use corner::{build_elbow_solid, corner_footprint, ExtrudedSolid};
pub use elbow::{classify_turn, is_collinear, ElbowCuts, ElbowTable, TurnPlane};
pub use elbow::{DEFAULT_HORIZONTAL_CUTS, DEFAULT_VERTICAL_CUT};
pub use section::CrossSection;
pub use segment::{build_segment_solid, default_width_axis, BoxSolid, BUS_COLOR};
pub use solid::{bounds_of, Bounds3, RecordedCall, RecordingSink, Solid, SolidRecord, SolidSink};

use busway_math::Direction;
use thiserror::Error;

/// Errors from solid construction.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum SolidsError {
    /// The bend radius has no entry in the horizontal elbow table.
    #[error("no horizontal elbow cut configured for radius {0}")]
    UnknownRadius(u32),

    /// Incoming and outgoing directions lie on the same axis.
    #[error("directions {0} and {1} are collinear; no turn plane exists")]
    CollinearTurn(Direction, Direction),

    /// A horizontal table key is not a whole-number radius.
    #[error("invalid radius key {0:?} in elbow table")]
    InvalidRadiusKey(String),

    /// An elbow cut length is not positive and finite.
    #[error("invalid elbow cut length {0}")]
    InvalidCut(f64),

    /// A straight segment has zero or negative length.
    #[error("degenerate segment of length {0}")]
    DegenerateSegment(f64),

    /// A cross-section dimension is not positive and finite.
    #[error("invalid cross-section {width} x {height}")]
    InvalidSection {
        /// Requested width.
        width: f64,
        /// Requested height.
        height: f64,
    },
}

/// Result type for solid construction.
pub type Result<T> = std::result::Result<T, SolidsError>;
