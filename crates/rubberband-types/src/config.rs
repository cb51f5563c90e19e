//! Overscroll configuration.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::axis::Axis;
use crate::error::{Result, RubberbandError};

/// Configuration surface of an overscroll controller.
///
/// Loadable from TOML; every field has a default so partial files work.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OverscrollConfig {
    /// The axis the controller governs.
    pub axis: Axis,
    /// Multiplied by the viewport extent to derive the maximum rendered
    /// overscroll distance. Must not be negative.
    pub overscroll_distance_factor: f32,
    /// Minimum fling velocity (units per second) below which a fling that
    /// reaches the content boundary does not bounce.
    pub min_fling_velocity: f64,
}

impl Default for OverscrollConfig {
    fn default() -> Self {
        Self {
            axis: Axis::Vertical,
            overscroll_distance_factor: 1.0,
            min_fling_velocity: 50.0,
        }
    }
}

impl OverscrollConfig {
    /// Reject invalid values synchronously, before any controller exists.
    pub fn validate(&self) -> Result<()> {
        if self.overscroll_distance_factor < 0.0 {
            return Err(RubberbandError::Config(format!(
                "overscroll_distance_factor cannot be negative: {}",
                self.overscroll_distance_factor
            )));
        }
        if !self.min_fling_velocity.is_finite() || self.min_fling_velocity < 0.0 {
            return Err(RubberbandError::Config(format!(
                "min_fling_velocity must be finite and non-negative: {}",
                self.min_fling_velocity
            )));
        }
        Ok(())
    }

    /// Parse and validate a TOML document.
    pub fn from_toml_str(s: &str) -> Result<Self> {
        let config: Self = toml::from_str(s)?;
        config.validate()?;
        Ok(config)
    }

    /// Load and validate a TOML config file.
    pub fn load(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path)?;
        Self::from_toml_str(&text)
    }
}
