#![warn(missing_docs)]

//! Run compiler for busway routes.
//!
//! A route is an origin plus an ordered list of `(direction, distance)`
//! moves. Compiling it walks the moves, places an elbow at every vertex where
//! the direction changes, and fills the straight portions between elbows
//! with boxes.
//!
//! # Example
//!
//! ```
//! use busway_math::{Direction, Point3};
//! use busway_route::{compile_run, Route, RouteConfig};
//!
//! let route = Route::new(Point3::origin())
//!     .go(Direction::PosX, 3000.0)
//!     .go(Direction::PosY, 2000.0);
//! let run = compile_run(&route, &RouteConfig::default()).unwrap();
//! assert_eq!(run.elbow_count(), 1);
//! assert_eq!(run.segment_count(), 2);
//! ```

mod compile;
mod config;
mod route;

pub use compile::{compile_run, CompiledRun};
pub use config::{RouteConfig, RouteFile, DEFAULT_RADIUS};
pub use route::{Move, Route};

use busway_math::Direction;
use busway_solids::SolidsError;
use thiserror::Error;

/// Errors from compiling or loading a route.
#[derive(Debug, Error)]
pub enum RouteError {
    /// Building an elbow or segment failed.
    #[error(transparent)]
    Solids(#[from] SolidsError),

    /// A move runs straight back along the previous one.
    #[error("move {index} reverses direction ({from} then {to})")]
    Reversal {
        /// Index of the reversing move after normalization.
        index: usize,
        /// Direction of the previous move.
        from: Direction,
        /// Direction of the reversing move.
        to: Direction,
    },

    /// A straight is shorter than the elbow cuts at its two ends.
    #[error("segment {index} is {length} long but its elbows need {required}")]
    SegmentTooShort {
        /// Index of the move after normalization.
        index: usize,
        /// Length of the move.
        length: f64,
        /// Sum of the cuts at both ends.
        required: f64,
    },

    /// The route file could not be parsed.
    #[error("invalid route file: {0}")]
    Parse(#[from] toml::de::Error),

    /// The route file could not be read.
    #[error("failed to read route file: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type for route operations.
pub type Result<T> = std::result::Result<T, RouteError>;
