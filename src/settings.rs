//! Simulation settings with persistence
//!
//! Settings are read from `~/.config/skater/settings.toml`, or from a path
//! given on the command line.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{ensure, Context};
use serde::{Deserialize, Serialize};
use skater_core::TimeConfig;
use skater_game::{InputScript, SkaterConfig};
use skater_physics::SkateMovementConfig;
use tracing::{info, warn};

/// All simulation settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SkaterSettings {
    #[serde(default)]
    pub skater: SkaterConfig,
    #[serde(default)]
    pub movement: SkateMovementConfig,
    #[serde(default)]
    pub time: TimeConfig,
    #[serde(default)]
    pub simulation: SimulationSettings,
    #[serde(default = "InputScript::carve_demo")]
    pub scenario: InputScript,
}

impl Default for SkaterSettings {
    fn default() -> Self {
        Self {
            skater: SkaterConfig::default(),
            movement: SkateMovementConfig::default(),
            time: TimeConfig::default(),
            simulation: SimulationSettings::default(),
            scenario: InputScript::carve_demo(),
        }
    }
}

impl SkaterSettings {
    /// Get the config directory path
    fn config_dir() -> Option<PathBuf> {
        dirs::config_dir().map(|p| p.join("skater"))
    }

    /// Get the settings file path
    fn settings_path() -> Option<PathBuf> {
        Self::config_dir().map(|p| p.join("settings.toml"))
    }

    /// Load settings from the config directory, or return defaults if not found
    pub fn load() -> Self {
        let Some(path) = Self::settings_path() else {
            warn!("Could not determine config directory");
            return Self::default();
        };

        if !path.exists() {
            info!("No settings file found, using defaults");
            return Self::default();
        }

        match Self::load_from(&path) {
            Ok(settings) => settings,
            Err(e) => {
                warn!("{:#}, using defaults", e);
                Self::default()
            }
        }
    }

    /// Load settings from an explicit path
    pub fn load_from(path: &Path) -> anyhow::Result<Self> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read settings file {:?}", path))?;
        let settings = Self::parse(&content)
            .with_context(|| format!("Failed to parse settings file {:?}", path))?;
        info!("Loaded settings from {:?}", path);
        Ok(settings)
    }

    /// Parse settings from TOML text
    pub fn parse(content: &str) -> anyhow::Result<Self> {
        Ok(toml::from_str(content)?)
    }

    /// Reject settings the simulation cannot run with
    pub fn validate(&self) -> anyhow::Result<()> {
        self.skater.validate().context("Invalid skater configuration")?;
        self.movement
            .validate()
            .context("Invalid movement configuration")?;
        self.time.validate().context("Invalid time configuration")?;
        ensure!(
            self.time.time_scale > 0.0,
            "time scale must be positive for a headless run"
        );
        ensure!(
            self.simulation.frame_delta > 0.0,
            "frame delta must be positive, got {}",
            self.simulation.frame_delta
        );
        ensure!(
            self.simulation.log_interval > 0.0,
            "log interval must be positive, got {}",
            self.simulation.log_interval
        );
        Ok(())
    }
}

/// Headless run settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SimulationSettings {
    /// Extra simulated seconds after the scenario ends
    pub settle_time: f32,
    /// Simulated duration of one outer frame
    pub frame_delta: f32,
    /// Seconds between telemetry log lines
    pub log_interval: f32,
    /// Feet height the skater spawns at
    pub spawn_height: f32,
}

impl Default for SimulationSettings {
    fn default() -> Self {
        Self {
            settle_time: 1.0,
            frame_delta: 0.02,
            log_interval: 0.5,
            spawn_height: 10.0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_valid() {
        let settings = SkaterSettings::default();
        assert!(settings.validate().is_ok());
        assert!(!settings.scenario.segments.is_empty());
    }

    #[test]
    fn test_partial_file() {
        let settings = SkaterSettings::parse(
            r#"
            [skater]
            turn_rate = 180.0

            [simulation]
            log_interval = 1.0
            "#,
        )
        .unwrap();

        assert_eq!(settings.skater.turn_rate, 180.0);
        assert_eq!(settings.skater.max_speed, 1200.0);
        assert_eq!(settings.simulation.log_interval, 1.0);
        assert_eq!(settings.scenario, InputScript::carve_demo());
    }

    #[test]
    fn test_negative_skater_value_fails_validation() {
        let settings = SkaterSettings::parse("[skater]\nbrake_deceleration = -5.0\n").unwrap();
        let error = settings.validate().unwrap_err();
        assert!(format!("{:#}", error).contains("brake_deceleration"));
    }

    #[test]
    fn test_negative_movement_value_fails_validation() {
        let settings = SkaterSettings::parse("[movement]\nskin_width = -2.0\n").unwrap();
        let error = settings.validate().unwrap_err();
        let message = format!("{:#}", error);
        assert!(message.contains("Invalid movement configuration"));
        assert!(message.contains("skin_width"));
    }

    #[test]
    fn test_zero_time_scale_fails_validation() {
        let settings = SkaterSettings::parse("[time]\ntime_scale = 0.0\n").unwrap();
        assert!(settings.validate().is_err());
    }

    #[test]
    fn test_missing_file_is_an_error() {
        let result = SkaterSettings::load_from(Path::new("/nonexistent/skater/settings.toml"));
        assert!(result.is_err());
    }
}
