//! Time system for the skater simulation
//!
//! Tracks frame delta time and slices it into fixed simulation ticks.

use serde::{Deserialize, Serialize};

/// Configuration for game time
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct TimeConfig {
    /// How many in-game seconds pass per real second
    pub time_scale: f32,
    /// Fixed timestep for the locomotion tick (in seconds)
    pub fixed_timestep: f32,
    /// Maximum delta time to prevent spiral of death
    pub max_delta_time: f32,
}

impl Default for TimeConfig {
    fn default() -> Self {
        Self {
            time_scale: 1.0,
            fixed_timestep: 1.0 / 60.0,
            max_delta_time: 0.25,
        }
    }
}

impl TimeConfig {
    /// Check that the clock can actually advance
    pub fn validate(&self) -> Result<(), TimeConfigError> {
        if !(self.fixed_timestep.is_finite() && self.fixed_timestep > 0.0) {
            return Err(TimeConfigError::InvalidTimestep(self.fixed_timestep));
        }
        if !(self.time_scale.is_finite() && self.time_scale >= 0.0) {
            return Err(TimeConfigError::InvalidTimeScale(self.time_scale));
        }
        if !(self.max_delta_time.is_finite() && self.max_delta_time > 0.0) {
            return Err(TimeConfigError::InvalidMaxDelta(self.max_delta_time));
        }
        Ok(())
    }
}

/// Errors for an unusable time configuration
#[derive(Debug, Clone, thiserror::Error)]
pub enum TimeConfigError {
    #[error("fixed timestep must be positive, got {0}")]
    InvalidTimestep(f32),

    #[error("time scale must be non-negative, got {0}")]
    InvalidTimeScale(f32),

    #[error("max delta time must be positive, got {0}")]
    InvalidMaxDelta(f32),
}

/// Game time tracking
#[derive(Debug, Clone)]
pub struct GameTime {
    /// Configuration
    pub config: TimeConfig,
    /// Time since simulation start in seconds
    pub total_time: f64,
    /// Delta time for this frame (clamped)
    pub delta_time: f32,
    /// Unscaled delta time
    pub unscaled_delta_time: f32,
    /// Frame counter
    pub frame_count: u64,
    /// Fixed ticks consumed so far
    pub tick_count: u64,
    /// Accumulated time for fixed timestep
    fixed_accumulator: f32,
}

impl Default for GameTime {
    fn default() -> Self {
        Self::new(TimeConfig::default())
    }
}

impl GameTime {
    /// Create a new game time with custom config
    pub fn new(config: TimeConfig) -> Self {
        Self {
            config,
            total_time: 0.0,
            delta_time: 0.0,
            unscaled_delta_time: 0.0,
            frame_count: 0,
            tick_count: 0,
            fixed_accumulator: 0.0,
        }
    }

    /// Update the game time with the raw delta from the previous frame
    pub fn update(&mut self, raw_delta: f32) {
        self.unscaled_delta_time = raw_delta.clamp(0.0, self.config.max_delta_time);
        self.frame_count += 1;

        self.delta_time = self.unscaled_delta_time * self.config.time_scale;
        self.total_time += self.delta_time as f64;
        self.fixed_accumulator += self.delta_time;
    }

    /// Get the number of fixed timesteps to process this frame
    pub fn fixed_steps(&mut self) -> u32 {
        let mut steps = 0;
        while self.fixed_accumulator >= self.config.fixed_timestep {
            self.fixed_accumulator -= self.config.fixed_timestep;
            steps += 1;
        }
        self.tick_count += steps as u64;
        steps
    }

    /// Simulated time covered by the fixed ticks consumed so far
    pub fn simulated_time(&self) -> f64 {
        self.tick_count as f64 * self.config.fixed_timestep as f64
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_game_time() {
        let mut time = GameTime::default();
        time.update(0.016);

        assert!(time.delta_time > 0.0);
        assert_eq!(time.frame_count, 1);

        time.config.time_scale = 0.5;
        time.update(0.016);
        assert!((time.delta_time - 0.008).abs() < 1e-6);
        assert_eq!(time.frame_count, 2);
    }

    #[test]
    fn test_fixed_steps_accumulate() {
        let mut time = GameTime::new(TimeConfig {
            fixed_timestep: 0.1,
            ..Default::default()
        });

        time.update(0.05);
        assert_eq!(time.fixed_steps(), 0);

        time.update(0.2);
        assert_eq!(time.fixed_steps(), 2);
        assert_eq!(time.tick_count, 2);
        assert!((time.simulated_time() - 0.2).abs() < 1e-6);
    }

    #[test]
    fn test_delta_is_clamped() {
        let mut time = GameTime::default();
        time.update(5.0);
        assert_eq!(time.delta_time, time.config.max_delta_time);

        time.update(-1.0);
        assert_eq!(time.delta_time, 0.0);
    }

    #[test]
    fn test_validate_rejects_zero_timestep() {
        let config = TimeConfig {
            fixed_timestep: 0.0,
            ..Default::default()
        };
        assert!(matches!(
            config.validate(),
            Err(TimeConfigError::InvalidTimestep(_))
        ));
        assert!(TimeConfig::default().validate().is_ok());
    }
}
