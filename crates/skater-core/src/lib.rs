//! Skater Core - Core types and utilities shared by the skater crates
//!
//! This crate provides the foundational pieces the other crates build on:
//! - Mathematical primitives (re-exported from glam)
//! - Actor identity and yaw heading types
//! - Frame-rate independent interpolation
//! - Fixed timestep game clock
//! - The contract a ground movement integrator exposes to controllers

pub mod interp;
pub mod movement;
pub mod time;
pub mod types;

pub use glam::{Quat, Vec2, Vec3};
pub use interp::exp_interp;
pub use movement::MovementIntegrator;
pub use time::{GameTime, TimeConfig, TimeConfigError};
pub use types::{ActorId, Heading};
