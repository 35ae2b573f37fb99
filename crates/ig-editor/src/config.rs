//! Editor configuration.

use serde::{Deserialize, Serialize};
use std::time::Duration;
use thiserror::Error;

/// Tunables for the mutation engine, viewport, and auto-save.
///
/// Every field has a serde default, so a partial JSON file only overrides
/// what it names.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EditorConfig {
    /// Quiet period before a bound template is auto-saved.
    pub autosave_delay_ms: u64,
    pub zoom_min: f64,
    pub zoom_max: f64,
    /// Increment used by zoom in / zoom out.
    pub zoom_step: f64,
    /// Multiplier applied per wheel notch.
    pub wheel_zoom_factor: f64,
    /// Space kept around the frame by fit-to-view, per axis.
    pub fit_padding: f64,
    /// Floor for interactive resizes.
    pub min_object_size: f64,
    /// Position offset of a duplicated object, per axis.
    pub duplicate_offset: f64,
}

impl Default for EditorConfig {
    fn default() -> Self {
        Self {
            autosave_delay_ms: 1500,
            zoom_min: 0.1,
            zoom_max: 3.0,
            zoom_step: 0.1,
            wheel_zoom_factor: 1.08,
            fit_padding: 80.0,
            min_object_size: ig_core::MIN_OBJECT_SIZE,
            duplicate_offset: 20.0,
        }
    }
}

#[derive(Debug, Error, PartialEq)]
pub enum ConfigError {
    #[error("zoom bounds {min}..{max} must be finite, positive and ordered")]
    ZoomBounds { min: f64, max: f64 },
    #[error("`{field}` has unusable value {value}")]
    BadValue { field: &'static str, value: f64 },
}

impl EditorConfig {
    pub fn autosave_delay(&self) -> Duration {
        Duration::from_millis(self.autosave_delay_ms)
    }

    pub(crate) fn zoom_bounds_valid(&self) -> bool {
        self.zoom_min.is_finite()
            && self.zoom_max.is_finite()
            && self.zoom_min > 0.0
            && self.zoom_min <= self.zoom_max
    }

    /// Reject values the viewport and tools cannot work with.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !self.zoom_bounds_valid() {
            return Err(ConfigError::ZoomBounds {
                min: self.zoom_min,
                max: self.zoom_max,
            });
        }
        for (field, value) in [
            ("zoom_step", self.zoom_step),
            ("wheel_zoom_factor", self.wheel_zoom_factor),
        ] {
            if !(value.is_finite() && value > 0.0) {
                return Err(ConfigError::BadValue { field, value });
            }
        }
        for (field, value) in [
            ("fit_padding", self.fit_padding),
            ("min_object_size", self.min_object_size),
            ("duplicate_offset", self.duplicate_offset),
        ] {
            if !value.is_finite() {
                return Err(ConfigError::BadValue { field, value });
            }
        }
        Ok(())
    }
}
