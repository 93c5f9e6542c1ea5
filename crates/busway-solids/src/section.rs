//! Rectangular duct cross-section.

use serde::{Deserialize, Serialize};

use crate::{Result, SolidsError};

/// The `(width, height)` profile of the busway.
///
/// Width is measured across the run horizontally, height vertically (for a
/// horizontal run). Both are positive and finite.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawSection")]
pub struct CrossSection {
    /// Horizontal extent across the run.
    pub width: f64,
    /// Vertical extent across the run.
    pub height: f64,
}

#[derive(Deserialize)]
struct RawSection {
    width: f64,
    height: f64,
}

impl TryFrom<RawSection> for CrossSection {
    type Error = SolidsError;

    fn try_from(raw: RawSection) -> Result<Self> {
        CrossSection::new(raw.width, raw.height)
    }
}

impl CrossSection {
    /// Create a validated cross-section.
    pub fn new(width: f64, height: f64) -> Result<Self> {
        let ok = |v: f64| v.is_finite() && v > 0.0;
        if !ok(width) || !ok(height) {
            return Err(SolidsError::InvalidSection { width, height });
        }
        Ok(Self { width, height })
    }

    /// Half of the width.
    pub fn half_width(&self) -> f64 {
        self.width / 2.0
    }

    /// Half of the height.
    pub fn half_height(&self) -> f64 {
        self.height / 2.0
    }
}
