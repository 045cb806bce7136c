//! Game settings
//!
//! Canvas dimensions, tick rate and RNG seed. Loaded from JSON on native,
//! supplied by the page on the web.

use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Default settings file looked up by [`Settings::load`]
pub const SETTINGS_FILE: &str = "slingshot.json";

#[derive(Error, Debug)]
pub enum SettingsError {
    #[error("failed to read settings: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to parse settings: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("invalid canvas size {width}x{height}")]
    InvalidCanvas { width: f32, height: f32 },
    #[error("ticks_per_second must be non-zero")]
    InvalidTickRate,
}

/// Simulation settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Canvas width in pixels
    pub canvas_width: f32,
    /// Canvas height in pixels
    pub canvas_height: f32,
    /// Simulation ticks per second (the host's refresh rate)
    pub ticks_per_second: u32,
    /// Fixed RNG seed; `None` lets the host pick one
    pub seed: Option<u64>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            canvas_width: 1920.0,
            canvas_height: 1080.0,
            ticks_per_second: 60,
            seed: None,
        }
    }
}

impl Settings {
    /// Settings for a canvas of the given size, everything else default
    pub fn with_canvas(width: f32, height: f32) -> Self {
        Self {
            canvas_width: width,
            canvas_height: height,
            ..Self::default()
        }
    }

    /// Check the values make a playable board
    pub fn validate(&self) -> Result<(), SettingsError> {
        let bad = |v: f32| !v.is_finite() || v <= 0.0;
        if bad(self.canvas_width) || bad(self.canvas_height) {
            return Err(SettingsError::InvalidCanvas {
                width: self.canvas_width,
                height: self.canvas_height,
            });
        }
        if self.ticks_per_second == 0 {
            return Err(SettingsError::InvalidTickRate);
        }
        Ok(())
    }

    /// Parse settings from a JSON string. Missing fields take defaults.
    pub fn from_json(json: &str) -> Result<Self, SettingsError> {
        let settings: Settings = serde_json::from_str(json)?;
        settings.validate()?;
        Ok(settings)
    }

    pub fn to_json(&self) -> Result<String, SettingsError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Load settings from a JSON file
    pub fn load_from(path: impl AsRef<Path>) -> Result<Self, SettingsError> {
        let json = std::fs::read_to_string(path.as_ref())?;
        let settings = Self::from_json(&json)?;
        log::info!("Loaded settings from {}", path.as_ref().display());
        Ok(settings)
    }

    /// Load `slingshot.json` from the working directory, falling back to defaults
    pub fn load() -> Self {
        let path = Path::new(SETTINGS_FILE);
        if !path.exists() {
            log::info!("Using default settings");
            return Self::default();
        }
        match Self::load_from(path) {
            Ok(settings) => settings,
            Err(e) => {
                log::warn!("Ignoring {}: {}", SETTINGS_FILE, e);
                Self::default()
            }
        }
    }
}
