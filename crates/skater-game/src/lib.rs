//! Skater Game - Locomotion logic for skating actors
//!
//! Provides the locomotion controller, its movement modes, and input handling.

pub mod input;
pub mod skater;

pub use input::{InputAction, InputBindings, InputHandler, InputState};
pub use skater::{
    ConfigError, DecelerationProfile, InputScript, InputSegment, LocomotionController,
    LocomotionHooks, MovementMode, NoHooks, PlayerInput, ScriptedInput, Skater, SkaterConfig,
    INPUT_DEADZONE, TURN_DEADZONE,
};
