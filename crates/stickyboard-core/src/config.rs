//! Engine configuration.

use crate::error::{ManipulationError, ManipulationResult};
use serde::{Deserialize, Serialize};

/// Default minimum width/height of any resized object, in canvas units.
pub const MIN_SIZE: f64 = 20.0;
/// Default minimum hit extent for connectors, in canvas units.
///
/// Only used for hit-testing; a connector's visual length may be shorter.
pub const MIN_LINE_HIT: f64 = 36.0;
/// Default handle hit tolerance in stage pixels.
pub const HANDLE_HIT_TOLERANCE: f64 = 10.0;
/// Default rotation snap increment in degrees.
pub const ROTATION_SNAP_DEGREES: f64 = 15.0;

/// Tunables for the manipulation engine.
///
/// Every field has a default, so a partial JSON object is a valid config.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Minimum width/height enforced by the resize engine.
    pub min_size: f64,
    /// Minimum hit extent for connectors.
    pub min_line_hit: f64,
    /// Handle hit tolerance in stage pixels (divided by viewport scale).
    pub handle_hit_tolerance: f64,
    /// Rotation snap increment used while the snap modifier is held.
    pub rotation_snap_degrees: f64,
    /// Lower bound for viewport scale.
    pub min_scale: f64,
    /// Upper bound for viewport scale.
    pub max_scale: f64,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            min_size: MIN_SIZE,
            min_line_hit: MIN_LINE_HIT,
            handle_hit_tolerance: HANDLE_HIT_TOLERANCE,
            rotation_snap_degrees: ROTATION_SNAP_DEGREES,
            min_scale: 0.1,
            max_scale: 10.0,
        }
    }
}

impl EngineConfig {
    /// Parse a config from JSON and validate it.
    pub fn from_json(json: &str) -> ManipulationResult<Self> {
        let config: Self =
            serde_json::from_str(json).map_err(|e| ManipulationError::InvalidConfig(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Check that the values are usable.
    pub fn validate(&self) -> ManipulationResult<()> {
        if !(self.min_size > 0.0) {
            return Err(ManipulationError::InvalidConfig(format!(
                "min_size must be positive, got {}",
                self.min_size
            )));
        }
        if self.min_line_hit < self.min_size {
            return Err(ManipulationError::InvalidConfig(format!(
                "min_line_hit ({}) must be at least min_size ({})",
                self.min_line_hit, self.min_size
            )));
        }
        if !(self.min_scale > 0.0 && self.min_scale < self.max_scale) {
            return Err(ManipulationError::InvalidConfig(format!(
                "scale range [{}, {}] is empty",
                self.min_scale, self.max_scale
            )));
        }
        if self.handle_hit_tolerance < 0.0 || self.rotation_snap_degrees < 0.0 {
            return Err(ManipulationError::InvalidConfig(
                "tolerances must not be negative".to_string(),
            ));
        }
        Ok(())
    }

    /// Effective minimum size for an object, honoring a per-object override.
    pub fn min_size_for(&self, min_override: Option<f64>) -> f64 {
        match min_override {
            Some(min) if min > 0.0 => min,
            _ => self.min_size,
        }
    }
}
