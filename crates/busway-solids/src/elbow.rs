//! Turn classification and elbow cut lengths.

use std::collections::BTreeMap;

use busway_math::Direction;
use serde::Deserialize;

use crate::{Result, SolidsError};

/// Cut length used for both legs of every vertical elbow.
pub const DEFAULT_VERTICAL_CUT: f64 = 320.0;

/// Horizontal elbow cut lengths shipped by default, keyed by bend radius.
pub const DEFAULT_HORIZONTAL_CUTS: &[(u32, f64)] = &[(1000, 270.0)];

/// Plane a turn lies in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TurnPlane {
    /// Neither direction has a Z component.
    Horizontal,
    /// At least one direction runs along Z.
    Vertical,
}

/// Classify a turn. Total over all direction pairs.
pub fn classify_turn(dir_in: Direction, dir_out: Direction) -> TurnPlane {
    if dir_in.has_z() || dir_out.has_z() {
        TurnPlane::Vertical
    } else {
        TurnPlane::Horizontal
    }
}

/// Whether two directions share an axis (straight-through or reversal).
pub fn is_collinear(dir_in: Direction, dir_out: Direction) -> bool {
    dir_in.axis() == dir_out.axis()
}

/// Distances the incoming (`a`) and outgoing (`b`) straights are shortened
/// at a vertex to leave room for the elbow.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ElbowCuts {
    /// Cut on the incoming side.
    pub a: f64,
    /// Cut on the outgoing side.
    pub b: f64,
}

impl ElbowCuts {
    /// Symmetric cuts.
    pub fn symmetric(len: f64) -> Self {
        Self { a: len, b: len }
    }
}

/// Immutable elbow cut configuration.
///
/// Horizontal turns look up the bend radius; vertical turns always use the
/// fixed vertical cut.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(try_from = "RawElbowTable")]
pub struct ElbowTable {
    vertical: f64,
    horizontal: BTreeMap<u32, f64>,
}

/// Table as written in TOML, where map keys are always strings.
#[derive(Deserialize)]
struct RawElbowTable {
    #[serde(default = "default_vertical")]
    vertical: f64,
    #[serde(default)]
    horizontal: BTreeMap<String, f64>,
}

fn default_vertical() -> f64 {
    DEFAULT_VERTICAL_CUT
}

impl TryFrom<RawElbowTable> for ElbowTable {
    type Error = SolidsError;

    fn try_from(raw: RawElbowTable) -> Result<Self> {
        let mut horizontal = BTreeMap::new();
        for (key, cut) in raw.horizontal {
            let radius = key
                .trim()
                .parse::<u32>()
                .map_err(|_| SolidsError::InvalidRadiusKey(key.clone()))?;
            horizontal.insert(radius, cut);
        }
        Self::new(raw.vertical, horizontal)
    }
}

fn check_cut(cut: f64) -> Result<()> {
    if cut.is_finite() && cut > 0.0 {
        Ok(())
    } else {
        Err(SolidsError::InvalidCut(cut))
    }
}

impl Default for ElbowTable {
    fn default() -> Self {
        Self {
            vertical: DEFAULT_VERTICAL_CUT,
            horizontal: DEFAULT_HORIZONTAL_CUTS.iter().copied().collect(),
        }
    }
}

impl ElbowTable {
    /// Build a table from a vertical cut and radius-keyed horizontal cuts.
    ///
    /// Every cut must be positive and finite.
    pub fn new(vertical: f64, horizontal: BTreeMap<u32, f64>) -> Result<Self> {
        check_cut(vertical)?;
        for cut in horizontal.values() {
            check_cut(*cut)?;
        }
        Ok(Self {
            vertical,
            horizontal,
        })
    }

    /// The fixed vertical cut length.
    pub fn vertical(&self) -> f64 {
        self.vertical
    }

    /// Horizontal cut for a radius, if configured.
    pub fn horizontal(&self, radius: u32) -> Option<f64> {
        self.horizontal.get(&radius).copied()
    }

    /// Configured radii in ascending order.
    pub fn radii(&self) -> impl Iterator<Item = u32> + '_ {
        self.horizontal.keys().copied()
    }

    /// Resolve the cuts for a turn at the given bend radius.
    ///
    /// Vertical turns ignore `radius`. Horizontal turns fail with
    /// [`SolidsError::UnknownRadius`] when the radius is missing; there is
    /// no fallback value.
    pub fn resolve(&self, radius: u32, dir_in: Direction, dir_out: Direction) -> Result<ElbowCuts> {
        if is_collinear(dir_in, dir_out) {
            return Err(SolidsError::CollinearTurn(dir_in, dir_out));
        }
        match classify_turn(dir_in, dir_out) {
            TurnPlane::Vertical => Ok(ElbowCuts::symmetric(self.vertical)),
            TurnPlane::Horizontal => self
                .horizontal(radius)
                .map(ElbowCuts::symmetric)
                .ok_or(SolidsError::UnknownRadius(radius)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use busway_math::Direction::*;

    #[test]
    fn test_horizontal_from_lookup() {
        let table = ElbowTable::default();
        assert_eq!(
            table.resolve(1000, PosX, PosY).unwrap(),
            ElbowCuts { a: 270.0, b: 270.0 }
        );
    }

    #[test]
    fn test_vertical_ignores_radius() {
        let table = ElbowTable::default();
        assert_eq!(
            table.resolve(1000, PosX, PosZ).unwrap(),
            ElbowCuts { a: 320.0, b: 320.0 }
        );
        // Radius not in the table is irrelevant for vertical turns.
        assert_eq!(
            table.resolve(42, NegZ, NegY).unwrap(),
            ElbowCuts { a: 320.0, b: 320.0 }
        );
    }

    #[test]
    fn test_every_pair_classified() {
        let table = ElbowTable::default();
        for din in Direction::ALL {
            for dout in Direction::ALL {
                if is_collinear(din, dout) {
                    assert!(matches!(
                        table.resolve(1000, din, dout),
                        Err(SolidsError::CollinearTurn(..))
                    ));
                    continue;
                }
                let cuts = table.resolve(1000, din, dout).unwrap();
                assert_eq!(cuts.a, cuts.b);
                let expected = match classify_turn(din, dout) {
                    TurnPlane::Horizontal => 270.0,
                    TurnPlane::Vertical => 320.0,
                };
                assert_eq!(cuts.a, expected);
            }
        }
    }

    #[test]
    fn test_unknown_radius_is_error() {
        let table = ElbowTable::default();
        assert_eq!(
            table.resolve(750, PosY, NegX),
            Err(SolidsError::UnknownRadius(750))
        );
    }

    #[test]
    fn test_classification() {
        assert_eq!(classify_turn(PosX, NegY), TurnPlane::Horizontal);
        assert_eq!(classify_turn(PosZ, PosX), TurnPlane::Vertical);
        assert_eq!(classify_turn(NegY, NegZ), TurnPlane::Vertical);
    }

    #[test]
    fn test_deserialize_string_radius_keys() {
        let table: ElbowTable = serde_json::from_str(
            r#"{"vertical": 300, "horizontal": {"600": 180, "1000": 270}}"#,
        )
        .unwrap();
        assert_eq!(table.vertical(), 300.0);
        assert_eq!(table.radii().collect::<Vec<_>>(), vec![600, 1000]);
        assert_eq!(table.horizontal(600), Some(180.0));

        let bad = serde_json::from_str::<ElbowTable>(r#"{"horizontal": {"wide": 1}}"#);
        assert!(bad.is_err());
    }

    #[test]
    fn test_rejects_non_positive_cuts() {
        let bad = serde_json::from_str::<ElbowTable>(
            r#"{"vertical": -500, "horizontal": {"1000": 270}}"#,
        );
        assert!(bad.is_err());
        let bad = serde_json::from_str::<ElbowTable>(r#"{"horizontal": {"1000": -400}}"#);
        assert!(bad.is_err());
        let bad = serde_json::from_str::<ElbowTable>(r#"{"horizontal": {"1000": 0}}"#);
        assert!(bad.is_err());

        assert!(matches!(
            ElbowTable::new(f64::NAN, BTreeMap::new()),
            Err(SolidsError::InvalidCut(c)) if c.is_nan()
        ));
        assert!(ElbowTable::new(320.0, BTreeMap::from([(600, f64::INFINITY)])).is_err());
        assert!(ElbowTable::new(320.0, BTreeMap::from([(600, 180.0)])).is_ok());
    }

    #[test]
    fn test_deserialize_defaults_vertical() {
        let table: ElbowTable = serde_json::from_str(r#"{"horizontal": {"1000": 270}}"#).unwrap();
        assert_eq!(table.vertical(), DEFAULT_VERTICAL_CUT);
    }
}
