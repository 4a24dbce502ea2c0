//! Editor configuration.

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Configuration errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Could not determine config directory")]
    NoConfigDir,
    #[error("IO error: {0}")]
    Io(String),
    #[error("Invalid config: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Tunables for picking, copying and drawing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EditorConfig {
    /// Maximum pointer distance (px) at which a shape is picked.
    pub pick_radius: f64,
    /// Offset (px) added to every coordinate of a copy.
    pub copy_offset: f64,
    /// Initial canvas width.
    pub canvas_width: u32,
    /// Initial canvas height.
    pub canvas_height: u32,
    /// Stroke width for shapes.
    pub stroke_width: f64,
    /// Stroke width for highlighted shapes.
    pub highlight_stroke_width: f64,
    /// Corner radius for round-cornered rectangles.
    pub round_corner_radius: f64,
}

impl Default for EditorConfig {
    fn default() -> Self {
        Self {
            pick_radius: 10.0,
            copy_offset: 15.0,
            canvas_width: 800,
            canvas_height: 600,
            stroke_width: 1.0,
            highlight_stroke_width: 3.0,
            round_corner_radius: 8.0,
        }
    }
}

impl EditorConfig {
    /// Default config file location.
    ///
    /// On Linux: `~/.config/tracery/config.json`
    pub fn default_path() -> Result<PathBuf, ConfigError> {
        let base = dirs::config_dir().ok_or(ConfigError::NoConfigDir)?;
        Ok(base.join("tracery").join("config.json"))
    }

    /// Parse a config from JSON. Missing fields take their defaults.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn to_json(&self) -> Result<String, ConfigError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Load a config file. A missing file yields the defaults.
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        if !path.exists() {
            return Ok(Self::default());
        }
        let json = fs::read_to_string(path)
            .map_err(|e| ConfigError::Io(format!("Failed to read {}: {}", path.display(), e)))?;
        Self::from_json(&json)
    }

    /// Load from the default location, falling back to defaults on any error.
    pub fn load_or_default() -> Self {
        let path = match Self::default_path() {
            Ok(path) => path,
            Err(e) => {
                log::warn!("{}, using default config", e);
                return Self::default();
            }
        };
        match Self::load_from(&path) {
            Ok(config) => {
                log::debug!("Loaded config from {:?}", path);
                config
            }
            Err(e) => {
                log::warn!("Ignoring config {:?}: {}", path, e);
                Self::default()
            }
        }
    }
}
