//! Contract between locomotion controllers and the ground movement integrator

use glam::Vec3;

/// A ground movement integrator.
///
/// The integrator owns position, collision, slopes and gravity. Controllers
/// only read its telemetry and write the handful of values below; they hold it
/// through a weak handle and must tolerate it disappearing between frames.
pub trait MovementIntegrator {
    /// Current velocity in world units per second
    fn velocity(&self) -> Vec3;

    /// Overwrite the current velocity
    fn set_velocity(&mut self, velocity: Vec3);

    /// Whether the integrator is walking on the ground (not falling)
    fn is_moving_on_ground(&self) -> bool;

    /// Deceleration applied while there is no movement input
    fn braking_deceleration(&self) -> f32;

    /// Set the deceleration applied while there is no movement input
    fn set_braking_deceleration(&mut self, deceleration: f32);

    /// Request movement along `direction` scaled by `scale` for the next step
    fn add_movement_input(&mut self, direction: Vec3, scale: f32);

    /// Top ground speed
    fn max_speed(&self) -> f32;

    /// Set the top ground speed
    fn set_max_speed(&mut self, max_speed: f32);

    /// Ground friction coefficient
    fn ground_friction(&self) -> f32;

    /// Set the ground friction coefficient
    fn set_ground_friction(&mut self, friction: f32);
}
