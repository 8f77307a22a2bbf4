//! Game settings
//!
//! Stored as JSON; every field falls back to its default when missing.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::consts::TICK_RATE_HZ;

/// How the ship's soft ceiling is detected
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum CeilingRule {
    /// Push back only when y lands exactly on the ceiling line (rarely fires)
    #[default]
    ExactMatch,
    /// Push back whenever y is at or above the ceiling line
    Threshold,
}

impl CeilingRule {
    pub fn as_str(&self) -> &'static str {
        match self {
            CeilingRule::ExactMatch => "ExactMatch",
            CeilingRule::Threshold => "Threshold",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "exactmatch" | "exact" => Some(CeilingRule::ExactMatch),
            "threshold" => Some(CeilingRule::Threshold),
            _ => None,
        }
    }
}

/// Failure to load or save settings
#[derive(thiserror::Error, Debug)]
pub enum SettingsError {
    #[error("settings I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("settings parse error: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("tick rate must be positive and finite, got {0}")]
    InvalidTickRate(f32),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Host scheduler rate (ticks per second)
    pub tick_rate_hz: f32,
    /// Spawner seed; `None` lets the host pick one
    pub seed: Option<u64>,
    pub ceiling: CeilingRule,
    /// Drop asteroids once they are fully past the left edge
    pub prune_offscreen: bool,
    /// Show the title label on startup
    pub show_title: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            tick_rate_hz: TICK_RATE_HZ,
            seed: None,
            ceiling: CeilingRule::ExactMatch,
            prune_offscreen: true,
            show_title: true,
        }
    }
}

impl Settings {
    /// Seconds between ticks
    pub fn tick_interval(&self) -> f32 {
        1.0 / self.tick_rate_hz
    }

    pub fn from_json(json: &str) -> Result<Self, SettingsError> {
        let settings: Settings = serde_json::from_str(json)?;
        settings.validate()?;
        Ok(settings)
    }

    pub fn to_json(&self) -> Result<String, SettingsError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    fn validate(&self) -> Result<(), SettingsError> {
        if !self.tick_rate_hz.is_finite() || self.tick_rate_hz <= 0.0 {
            return Err(SettingsError::InvalidTickRate(self.tick_rate_hz));
        }
        Ok(())
    }

    /// Load settings from a JSON file
    pub fn load(path: impl AsRef<Path>) -> Result<Self, SettingsError> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path)?;
        let settings = Self::from_json(&json)?;
        log::info!("Loaded settings from {}", path.display());
        Ok(settings)
    }

    /// Save settings to a JSON file
    pub fn save(&self, path: impl AsRef<Path>) -> Result<(), SettingsError> {
        let path = path.as_ref();
        std::fs::write(path, self.to_json()?)?;
        log::info!("Settings saved to {}", path.display());
        Ok(())
    }
}
