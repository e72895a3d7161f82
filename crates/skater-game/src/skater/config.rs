//! Skater configuration and deadzone constants

use serde::{Deserialize, Serialize};

use super::state::DecelerationProfile;

/// Minimum smoothed turn value that rotates the skater (prevents micro-jitter)
pub const TURN_DEADZONE: f32 = 0.01;

/// Minimum throttle magnitude that registers as accelerating or braking
pub const INPUT_DEADZONE: f32 = 0.1;

/// Design-time skater configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SkaterConfig {
    /// Top speed in world units per second
    pub max_speed: f32,
    /// Ground friction handed to the movement integrator
    pub base_friction: f32,
    /// Braking deceleration while accelerating
    pub accelerate_deceleration: f32,
    /// Braking deceleration while braking
    pub brake_deceleration: f32,
    /// Braking deceleration while coasting
    pub coast_deceleration: f32,
    /// Yaw rate in degrees per second at full turn
    pub turn_rate: f32,
    /// Steering smoothing rate (higher = snappier)
    pub steering_interp_speed: f32,
    /// Follow camera distance, carried for camera rigs
    pub camera_arm_length: f32,
}

impl Default for SkaterConfig {
    fn default() -> Self {
        Self {
            max_speed: 1200.0,
            base_friction: 0.5,
            accelerate_deceleration: 100.0,
            brake_deceleration: 2048.0,
            coast_deceleration: 50.0,
            turn_rate: 100.0,
            steering_interp_speed: 5.0,
            camera_arm_length: 300.0,
        }
    }
}

impl SkaterConfig {
    /// Per-mode braking deceleration values
    pub fn deceleration_profile(&self) -> DecelerationProfile {
        DecelerationProfile {
            accelerating: self.accelerate_deceleration,
            braking: self.brake_deceleration,
            coasting: self.coast_deceleration,
        }
    }

    /// Reject negative or non-finite values
    pub fn validate(&self) -> Result<(), ConfigError> {
        let fields = [
            ("max_speed", self.max_speed),
            ("base_friction", self.base_friction),
            ("accelerate_deceleration", self.accelerate_deceleration),
            ("brake_deceleration", self.brake_deceleration),
            ("coast_deceleration", self.coast_deceleration),
            ("turn_rate", self.turn_rate),
            ("steering_interp_speed", self.steering_interp_speed),
            ("camera_arm_length", self.camera_arm_length),
        ];

        for (field, value) in fields {
            if !value.is_finite() {
                return Err(ConfigError::NotFinite { field, value });
            }
            if value < 0.0 {
                return Err(ConfigError::Negative { field, value });
            }
        }
        Ok(())
    }
}

/// Errors for an invalid skater configuration
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ConfigError {
    #[error("{field} must be non-negative, got {value}")]
    Negative { field: &'static str, value: f32 },

    #[error("{field} must be finite, got {value}")]
    NotFinite { field: &'static str, value: f32 },
}
