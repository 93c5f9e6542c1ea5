//! Route configuration and TOML route files.
//!
//! ```toml
//! [config]
//! radius = 1000
//! section = { width = 200, height = 120 }
//!
//! [config.elbows]
//! vertical = 320
//! horizontal = { "1000" = 270 }
//!
//! [route]
//! origin = [0, 0, 0]
//! moves = [
//!     { dir = "+X", len = 3000 },
//!     { dir = "+Z", len = 1500 },
//! ]
//! ```

use std::path::Path;

use busway_solids::{CrossSection, ElbowTable};
use serde::Deserialize;

use crate::{Result, Route};

/// Bend radius selected when nothing else is configured.
pub const DEFAULT_RADIUS: u32 = 1000;

/// Everything the compiler reads besides the route itself.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct RouteConfig {
    /// Currently selected bend radius, the key into the horizontal elbow table.
    pub radius: u32,
    /// Default cross-section for every move without an override.
    pub section: CrossSection,
    /// Elbow cut lengths.
    pub elbows: ElbowTable,
}

impl Default for RouteConfig {
    fn default() -> Self {
        Self {
            radius: DEFAULT_RADIUS,
            section: CrossSection {
                width: 200.0,
                height: 120.0,
            },
            elbows: ElbowTable::default(),
        }
    }
}

impl RouteConfig {
    /// Parse a bare configuration table (no `[config]` header).
    pub fn from_toml(text: &str) -> Result<Self> {
        Ok(toml::from_str(text)?)
    }

    /// Same config with another bend radius selected.
    pub fn with_radius(mut self, radius: u32) -> Self {
        self.radius = radius;
        self
    }

    /// Same config with another default cross-section.
    pub fn with_section(mut self, section: CrossSection) -> Self {
        self.section = section;
        self
    }
}

/// A route file: configuration plus the route.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct RouteFile {
    /// Compiler configuration. Missing fields use defaults.
    #[serde(default)]
    pub config: RouteConfig,
    /// The route to compile.
    pub route: Route,
}

impl RouteFile {
    /// Parse a route file from TOML text.
    pub fn from_toml(text: &str) -> Result<Self> {
        Ok(toml::from_str(text)?)
    }

    /// Read and parse a route file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let text = std::fs::read_to_string(path)?;
        Self::from_toml(&text)
    }
}
