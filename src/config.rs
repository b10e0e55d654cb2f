//! Engine configuration: initial style and per-tool scaling.
//!
//! The host may pass a JSON object when constructing the engine. Every field
//! is optional and falls back to the defaults below; unknown keys are ignored.

#[cfg(test)]
#[path = "config_test.rs"]
mod config_test;

use serde::{Deserialize, Serialize};

use crate::input::Tool;

/// Error returned by [`Config::from_json`].
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// The text is not a JSON object matching the config shape.
    #[error("invalid config: {0}")]
    Json(#[from] serde_json::Error),
    /// The brush size range is empty or not positive.
    #[error("invalid brush size range: {min}..={max}")]
    InvalidBrushRange { min: f64, max: f64 },
}

/// Engine configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Config {
    /// Tool active at startup.
    pub tool: Tool,
    pub stroke_color: String,
    /// `null` starts with fill disabled.
    pub fill_color: Option<String>,
    pub brush_size: f64,
    pub min_brush_size: f64,
    pub max_brush_size: f64,
    /// Pencil line width per unit of brush size.
    pub pencil_scale: f64,
    /// Brush line width per unit of brush size.
    pub brush_scale: f64,
    /// Eraser line width per unit of brush size.
    pub eraser_scale: f64,
    /// Text font size per unit of brush size.
    pub text_scale: f64,
    /// Opaque color exported images are flattened onto.
    pub background: String,
    /// Browser console log level (`error`, `warn`, `info`, `debug`, `trace`).
    pub log_level: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            tool: Tool::Pencil,
            stroke_color: "#000000".into(),
            fill_color: Some("#ffffff".into()),
            brush_size: 5.0,
            min_brush_size: 1.0,
            max_brush_size: 40.0,
            pencil_scale: 1.0,
            brush_scale: 2.0,
            eraser_scale: 2.0,
            text_scale: 4.0,
            background: "#ffffff".into(),
            log_level: "info".into(),
        }
    }
}

impl Config {
    /// Parse a JSON config object, filling gaps with defaults.
    ///
    /// # Errors
    ///
    /// Returns `Err` if the JSON is malformed or the brush range is invalid.
    pub fn from_json(text: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    /// Check the brush range.
    ///
    /// # Errors
    ///
    /// Returns `Err` unless `0 < min <= max`.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let (min, max) = (self.min_brush_size, self.max_brush_size);
        if min > 0.0 && min <= max && max.is_finite() {
            Ok(())
        } else {
            Err(ConfigError::InvalidBrushRange { min, max })
        }
    }

    /// Clamp `size` into the configured brush range.
    #[must_use]
    pub fn clamp_brush_size(&self, size: f64) -> f64 {
        if size.is_nan() {
            return self.min_brush_size;
        }
        size.max(self.min_brush_size).min(self.max_brush_size)
    }

    /// Parsed log level, `Info` when unrecognised.
    #[must_use]
    pub fn log_level(&self) -> log::Level {
        self.log_level.parse().unwrap_or(log::Level::Info)
    }
}
