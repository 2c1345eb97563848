//! Guidance canvas configuration.
//!
//! Collects every tunable threshold of the canvas into one structure so
//! nothing hides as a magic number in the interaction or render code.
//! Supports JSON and TOML files; the extension decides the format.

use crate::constants;
use crate::error::{ConfigError, Error, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::debug;

/// Tunables for zoom, hit-testing, handle placement and track generation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GuidanceConfig {
    /// Lower zoom bound; zoom is clamped, never rejected.
    pub zoom_min: f64,
    /// Upper zoom bound.
    pub zoom_max: f64,
    /// Wheel zoom step: each notch multiplies zoom by `1 ± zoom_intensity`.
    pub zoom_intensity: f64,
    /// Zoom button step: multiply or divide zoom by this factor.
    pub zoom_button_factor: f64,
    /// Pointer-to-handle distance (screen px) that counts as a hit.
    pub handle_hit_radius_px: f64,
    /// Drawn handle radius in screen px.
    pub handle_radius_px: f64,
    /// World distance from the machine projection to the handle.
    pub lookahead_distance: f64,
    /// Tracks are generated for indices `-track_window..=track_window`.
    pub track_window: i32,
    /// Each track extends this far both ways from its origin.
    pub track_half_length: f64,
    /// Number of tracks past the current one styled as "next up".
    pub next_up_count: i32,
}

impl Default for GuidanceConfig {
    fn default() -> Self {
        Self {
            zoom_min: constants::ZOOM_MIN,
            zoom_max: constants::ZOOM_MAX,
            zoom_intensity: constants::ZOOM_INTENSITY,
            zoom_button_factor: constants::ZOOM_BUTTON_FACTOR,
            handle_hit_radius_px: constants::HANDLE_HIT_RADIUS_PX,
            handle_radius_px: constants::HANDLE_RADIUS_PX,
            lookahead_distance: constants::LOOKAHEAD_DISTANCE,
            track_window: constants::TRACK_WINDOW,
            track_half_length: constants::TRACK_HALF_LENGTH,
            next_up_count: constants::NEXT_UP_COUNT,
        }
    }
}

impl GuidanceConfig {
    /// Create new config with defaults
    pub fn new() -> Self {
        Self::default()
    }

    /// Load config from file (JSON or TOML)
    pub fn load_from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;

        let config: Self = match Format::of(path)? {
            Format::Json => serde_json::from_str(&content)?,
            Format::Toml => toml::from_str(&content)?,
        };

        config.validate()?;
        debug!("Loaded guidance config from {}", path.display());
        Ok(config)
    }

    /// Save config to file (JSON or TOML)
    pub fn save_to_file(&self, path: &Path) -> Result<()> {
        self.validate()?;

        let content = match Format::of(path)? {
            Format::Json => serde_json::to_string_pretty(self)?,
            Format::Toml => toml::to_string_pretty(self)?,
        };

        std::fs::write(path, content)?;
        Ok(())
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<()> {
        if !(self.zoom_min.is_finite() && self.zoom_min > 0.0) {
            return Err(Error::invalid_config("zoom_min", "must be > 0"));
        }
        if !self.zoom_max.is_finite() || self.zoom_max < self.zoom_min {
            return Err(Error::invalid_config(
                "zoom_max",
                format!("must be finite and >= zoom_min ({})", self.zoom_min),
            ));
        }
        if !(self.zoom_intensity > 0.0 && self.zoom_intensity < 1.0) {
            return Err(Error::invalid_config(
                "zoom_intensity",
                "must be between 0 and 1 (exclusive)",
            ));
        }
        if !(self.zoom_button_factor.is_finite() && self.zoom_button_factor > 1.0) {
            return Err(Error::invalid_config("zoom_button_factor", "must be > 1"));
        }
        if !(self.handle_hit_radius_px > 0.0) {
            return Err(Error::invalid_config("handle_hit_radius_px", "must be > 0"));
        }
        if !(self.handle_radius_px > 0.0) {
            return Err(Error::invalid_config("handle_radius_px", "must be > 0"));
        }
        if !self.lookahead_distance.is_finite() {
            return Err(Error::invalid_config("lookahead_distance", "must be finite"));
        }
        if self.track_window < 0 {
            return Err(Error::invalid_config("track_window", "must be >= 0"));
        }
        if !(self.track_half_length.is_finite() && self.track_half_length > 0.0) {
            return Err(Error::invalid_config("track_half_length", "must be > 0"));
        }
        if self.next_up_count < 0 {
            return Err(Error::invalid_config("next_up_count", "must be >= 0"));
        }
        Ok(())
    }
}

enum Format {
    Json,
    Toml,
}

impl Format {
    fn of(path: &Path) -> Result<Self> {
        match path.extension().and_then(|ext| ext.to_str()) {
            Some("json") => Ok(Self::Json),
            Some("toml") => Ok(Self::Toml),
            other => Err(ConfigError::UnsupportedFormat(other.unwrap_or("").to_string()).into()),
        }
    }
}
