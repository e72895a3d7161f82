//! Movement modes and their deceleration profile

use serde::{Deserialize, Serialize};

/// What the skater is doing with the throttle.
///
/// Drives which braking deceleration the movement integrator uses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum MovementMode {
    /// Throttle inside the deadzone, rolling freely
    #[default]
    Coasting,
    /// Pushing forward
    Accelerating,
    /// Pulling back to slow down
    Braking,
}

impl MovementMode {
    /// Resolve the mode for a throttle value against a symmetric deadzone
    pub fn classify(throttle: f32, deadzone: f32) -> Self {
        if throttle > deadzone {
            MovementMode::Accelerating
        } else if throttle < -deadzone {
            MovementMode::Braking
        } else {
            MovementMode::Coasting
        }
    }

    /// Display name
    pub fn name(&self) -> &'static str {
        match self {
            MovementMode::Coasting => "Coasting",
            MovementMode::Accelerating => "Accelerating",
            MovementMode::Braking => "Braking",
        }
    }
}

/// Braking deceleration to hand the integrator for each mode
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DecelerationProfile {
    pub accelerating: f32,
    pub braking: f32,
    pub coasting: f32,
}

impl DecelerationProfile {
    /// Deceleration for `mode`
    pub fn for_mode(&self, mode: MovementMode) -> f32 {
        match mode {
            MovementMode::Accelerating => self.accelerating,
            MovementMode::Braking => self.braking,
            MovementMode::Coasting => self.coasting,
        }
    }
}
