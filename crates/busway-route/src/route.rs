//! Route definition and move normalization.

use busway_math::{Direction, Point3, Tolerance};
use busway_solids::CrossSection;
use serde::Deserialize;

use crate::{Result, RouteError};

/// One straight move of a route.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
pub struct Move {
    /// Direction of travel.
    #[serde(rename = "dir")]
    pub direction: Direction,
    /// Distance travelled. Negative values travel the opposite way.
    #[serde(rename = "len", alias = "distance")]
    pub distance: f64,
    /// Cross-section for this move only.
    #[serde(default)]
    pub section: Option<CrossSection>,
}

impl Move {
    /// A move using the run's default cross-section.
    pub fn new(direction: Direction, distance: f64) -> Self {
        Self {
            direction,
            distance,
            section: None,
        }
    }

    /// Override the cross-section for this move.
    pub fn with_section(mut self, section: CrossSection) -> Self {
        self.section = Some(section);
        self
    }
}

/// An origin and an ordered list of moves.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(from = "RawRoute")]
pub struct Route {
    /// Start point of the run.
    pub origin: Point3,
    /// Moves in travel order.
    pub moves: Vec<Move>,
}

#[derive(Deserialize)]
struct RawRoute {
    #[serde(default)]
    origin: [f64; 3],
    #[serde(default)]
    moves: Vec<Move>,
}

impl From<RawRoute> for Route {
    fn from(raw: RawRoute) -> Self {
        let [x, y, z] = raw.origin;
        Self {
            origin: Point3::new(x, y, z),
            moves: raw.moves,
        }
    }
}

impl Route {
    /// An empty route starting at `origin`.
    pub fn new(origin: Point3) -> Self {
        Self {
            origin,
            moves: Vec::new(),
        }
    }

    /// Append a move.
    pub fn go(mut self, direction: Direction, distance: f64) -> Self {
        self.moves.push(Move::new(direction, distance));
        self
    }

    /// Append a move with its own cross-section.
    pub fn go_with(mut self, direction: Direction, distance: f64, section: CrossSection) -> Self {
        self.moves
            .push(Move::new(direction, distance).with_section(section));
        self
    }

    /// Moves in canonical form.
    ///
    /// Negative distances flip the direction, zero-length moves are dropped,
    /// and consecutive moves in the same direction with the same section are
    /// merged. A move that doubles straight back is rejected.
    pub fn normalized_moves(&self) -> Result<Vec<Move>> {
        let tol = Tolerance::DEFAULT;
        let mut out: Vec<Move> = Vec::with_capacity(self.moves.len());

        for m in &self.moves {
            if tol.is_zero(m.distance) {
                continue;
            }
            let m = if m.distance < 0.0 {
                Move {
                    direction: m.direction.opposite(),
                    distance: -m.distance,
                    section: m.section,
                }
            } else {
                *m
            };

            let index = out.len();
            if let Some(last) = out.last_mut() {
                if last.direction == m.direction && last.section == m.section {
                    last.distance += m.distance;
                    continue;
                }
                if last.direction == m.direction.opposite() {
                    return Err(RouteError::Reversal {
                        index,
                        from: last.direction,
                        to: m.direction,
                    });
                }
            }
            out.push(m);
        }

        Ok(out)
    }
}
