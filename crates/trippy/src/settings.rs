//! Session settings.

use serde::{Deserialize, Serialize};
use trippy_math::{CoordKind, Tolerance};

use crate::error::{Result, TrippyError};

/// Geometry session parameters.
///
/// Missing TOML keys fall back to the defaults.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Samples per side used by `Session::edge`.
    pub edge_resolution: usize,
    /// Coordinate kind of the root frame.
    pub root_kind: CoordKind,
    /// Cylinder roots at or below this distance are skipped.
    pub solver_min_distance: f64,
    /// Comparison tolerances.
    pub tolerance: Tolerance,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            edge_resolution: 20,
            root_kind: CoordKind::Cylindrical,
            solver_min_distance: 1e-9,
            tolerance: Tolerance::DEFAULT,
        }
    }
}

impl Settings {
    /// Parse settings from TOML and validate them.
    pub fn from_toml_str(s: &str) -> Result<Self> {
        let settings: Settings = toml::from_str(s)?;
        settings.validate()?;
        Ok(settings)
    }

    /// Validate settings.
    pub fn validate(&self) -> Result<()> {
        if !(self.tolerance.linear > 0.0 && self.tolerance.linear.is_finite()) {
            return Err(TrippyError::InvalidSettings(
                "tolerance.linear must be positive".into(),
            ));
        }
        if !(self.tolerance.angular > 0.0 && self.tolerance.angular.is_finite()) {
            return Err(TrippyError::InvalidSettings(
                "tolerance.angular must be positive".into(),
            ));
        }
        if self.edge_resolution < 2 {
            return Err(TrippyError::InvalidSettings(
                "edge_resolution must be at least 2".into(),
            ));
        }
        if !(self.solver_min_distance >= 0.0 && self.solver_min_distance.is_finite()) {
            return Err(TrippyError::InvalidSettings(
                "solver_min_distance must be non-negative".into(),
            ));
        }
        Ok(())
    }
}
