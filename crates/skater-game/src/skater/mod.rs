//! Skater locomotion module
//!
//! Steering, carving and movement modes for a skating actor, plus the input
//! sources that feed it.

mod config;
mod controller;
mod hooks;
mod player;
mod script;
mod state;

pub use config::{ConfigError, SkaterConfig, INPUT_DEADZONE, TURN_DEADZONE};
pub use controller::LocomotionController;
pub use hooks::{LocomotionHooks, NoHooks};
pub use player::PlayerInput;
pub use script::{InputScript, InputSegment, ScriptedInput};
pub use state::{DecelerationProfile, MovementMode};

/// A locomotion controller driving the rapier-backed skate movement
pub type Skater = LocomotionController<skater_physics::SkateMovement>;
