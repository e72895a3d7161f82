//! Skate movement integrator using rapier3d's kinematic character controller

use glam::Vec3;
use rapier3d::control::{CharacterAutostep, CharacterLength, KinematicCharacterController};
use rapier3d::prelude::*;
use serde::{Deserialize, Serialize};
use skater_core::MovementIntegrator;
use tracing::trace;

/// Skate movement configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SkateMovementConfig {
    /// Capsule radius (default: 42cm)
    pub radius: f32,
    /// Capsule half height including the hemispheres (default: 96cm)
    pub half_height: f32,
    /// Maximum walkable slope angle in degrees (default: 45)
    pub max_slope_angle: f32,
    /// Step height for curbs and ledges (default: 45cm)
    pub step_height: f32,
    /// Skin width for collision detection (default: 2cm)
    pub skin_width: f32,
    /// Maximum ground snap distance when rolling down slopes
    pub ground_snap_distance: f32,
    /// Acceleration at full movement input
    pub max_acceleration: f32,
    /// Initial upward speed of a jump
    pub jump_velocity: f32,
    /// Gravity multiplier (1.0 = world gravity)
    pub gravity_scale: f32,
    /// Below this speed braking stops the skater outright
    pub brake_to_stop_speed: f32,
}

impl SkateMovementConfig {
    /// Reject shapes and rates rapier cannot work with
    pub fn validate(&self) -> Result<(), MovementConfigError> {
        let positive = [("radius", self.radius), ("half_height", self.half_height)];
        for (field, value) in positive {
            if !value.is_finite() {
                return Err(MovementConfigError::NotFinite { field, value });
            }
            if value <= 0.0 {
                return Err(MovementConfigError::NotPositive { field, value });
            }
        }

        let non_negative = [
            ("max_slope_angle", self.max_slope_angle),
            ("step_height", self.step_height),
            ("skin_width", self.skin_width),
            ("ground_snap_distance", self.ground_snap_distance),
            ("max_acceleration", self.max_acceleration),
            ("jump_velocity", self.jump_velocity),
            ("gravity_scale", self.gravity_scale),
            ("brake_to_stop_speed", self.brake_to_stop_speed),
        ];
        for (field, value) in non_negative {
            if !value.is_finite() {
                return Err(MovementConfigError::NotFinite { field, value });
            }
            if value < 0.0 {
                return Err(MovementConfigError::Negative { field, value });
            }
        }

        if self.half_height < self.radius {
            return Err(MovementConfigError::CapsuleTooShort {
                half_height: self.half_height,
                radius: self.radius,
            });
        }
        Ok(())
    }
}

/// Errors for an invalid skate movement configuration
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum MovementConfigError {
    #[error("{field} must be positive, got {value}")]
    NotPositive { field: &'static str, value: f32 },

    #[error("{field} must be non-negative, got {value}")]
    Negative { field: &'static str, value: f32 },

    #[error("{field} must be finite, got {value}")]
    NotFinite { field: &'static str, value: f32 },

    #[error("capsule half height {half_height} is shorter than its radius {radius}")]
    CapsuleTooShort { half_height: f32, radius: f32 },
}

impl Default for SkateMovementConfig {
    fn default() -> Self {
        Self {
            radius: 42.0,
            half_height: 96.0,
            max_slope_angle: 45.0,
            step_height: 45.0,
            skin_width: 2.0,
            ground_snap_distance: 20.0,
            max_acceleration: 2048.0,
            jump_velocity: 420.0,
            gravity_scale: 1.0,
            brake_to_stop_speed: 10.0,
        }
    }
}

/// Kinematic ground movement for a skater.
///
/// Movement input is accumulated between ticks and consumed by [`update`].
/// While grounded the velocity turns toward the input with ground friction and
/// accelerates; without input it brakes with `braking_deceleration` plus
/// friction. While airborne only gravity acts.
///
/// [`update`]: SkateMovement::update
pub struct SkateMovement {
    /// Configuration
    pub config: SkateMovementConfig,
    /// Current feet position
    pub position: Vec3,
    /// Horizontal velocity (X, Z only)
    horizontal_velocity: Vec3,
    /// Vertical velocity (jumping/falling)
    vertical_velocity: f32,
    /// Whether the capsule is resting on walkable ground
    grounded: bool,
    /// Top ground speed
    max_speed: f32,
    /// Ground friction coefficient
    ground_friction: f32,
    /// Deceleration applied without movement input
    braking_deceleration: f32,
    /// Movement input accumulated since the last update
    pending_input: Vec3,
    /// The collider handle for this skater
    collider_handle: Option<ColliderHandle>,
    /// Rapier's kinematic character controller
    controller: KinematicCharacterController,
}

impl SkateMovement {
    /// Create a new skate movement with default config
    pub fn new() -> Self {
        Self::with_config(SkateMovementConfig::default())
    }

    /// Create a new skate movement with custom config
    pub fn with_config(config: SkateMovementConfig) -> Self {
        let mut controller = KinematicCharacterController::default();
        controller.max_slope_climb_angle = config.max_slope_angle.to_radians();
        controller.min_slope_slide_angle = config.max_slope_angle.to_radians();
        controller.autostep = Some(CharacterAutostep {
            max_height: CharacterLength::Absolute(config.step_height),
            min_width: CharacterLength::Relative(0.5),
            include_dynamic_bodies: false,
        });
        controller.snap_to_ground = Some(CharacterLength::Absolute(config.ground_snap_distance));
        controller.offset = CharacterLength::Absolute(config.skin_width);

        Self {
            config,
            position: Vec3::ZERO,
            horizontal_velocity: Vec3::ZERO,
            vertical_velocity: 0.0,
            grounded: false,
            max_speed: 600.0,
            ground_friction: 8.0,
            braking_deceleration: 2048.0,
            pending_input: Vec3::ZERO,
            collider_handle: None,
            controller,
        }
    }

    /// Spawn the skater in the physics world with its feet at `position`
    pub fn spawn(&mut self, physics: &mut crate::PhysicsWorld, position: Vec3) -> ColliderHandle {
        self.position = position;
        self.horizontal_velocity = Vec3::ZERO;
        self.vertical_velocity = 0.0;
        self.grounded = false;

        let collider = ColliderBuilder::capsule_y(self.cylinder_half_height(), self.config.radius)
            .translation(self.collider_translation())
            .friction(0.0)
            .restitution(0.0)
            .build();

        let handle = physics.add_static_collider(collider);
        self.collider_handle = Some(handle);
        handle
    }

    /// Advance the skater by one tick
    pub fn update(&mut self, physics: &mut crate::PhysicsWorld, dt: f32) {
        let input = std::mem::take(&mut self.pending_input).clamp_length_max(1.0);

        if self.grounded {
            self.horizontal_velocity = if input.length_squared() > 0.0 {
                self.accelerate(input, dt)
            } else {
                apply_braking(
                    self.horizontal_velocity,
                    dt,
                    self.ground_friction,
                    self.braking_deceleration,
                    self.config.brake_to_stop_speed,
                )
            };
            self.vertical_velocity = self.vertical_velocity.max(0.0);
        } else {
            self.vertical_velocity -= physics.gravity_magnitude() * self.config.gravity_scale * dt;
        }

        let mut translation = (self.horizontal_velocity + Vec3::Y * self.vertical_velocity) * dt;
        if self.grounded && self.vertical_velocity <= 0.0 {
            // Keep the capsule pressed onto the ground so contact is re-detected.
            translation.y -= self.config.skin_width;
        }

        let was_grounded = self.grounded;
        self.move_character(physics, translation, dt);

        if self.grounded && self.vertical_velocity < 0.0 {
            self.vertical_velocity = 0.0;
        }
        if was_grounded != self.grounded {
            trace!(grounded = self.grounded, position = ?self.position, "ground contact changed");
        }
    }

    /// Start a jump; returns `false` while airborne
    pub fn jump(&mut self) -> bool {
        if !self.grounded {
            return false;
        }
        self.vertical_velocity = self.config.jump_velocity;
        self.grounded = false;
        true
    }

    /// Set the skater's position directly (teleport), dropping all velocity.
    ///
    /// Ground contact is lost until the next [`update`](Self::update) finds
    /// ground under the new position.
    pub fn teleport(&mut self, physics: &mut crate::PhysicsWorld, position: Vec3) {
        self.position = position;
        self.horizontal_velocity = Vec3::ZERO;
        self.vertical_velocity = 0.0;
        self.grounded = false;
        self.pending_input = Vec3::ZERO;
        self.sync_collider(physics);
    }

    /// Check if standing on ground
    pub fn is_grounded(&self) -> bool {
        self.grounded
    }

    fn accelerate(&self, input: Vec3, dt: f32) -> Vec3 {
        let direction = input.normalize_or_zero();
        let speed = self.horizontal_velocity.length();

        // Friction bleeds velocity that is not along the input direction.
        let turn = (dt * self.ground_friction).min(1.0);
        let mut velocity =
            self.horizontal_velocity - (self.horizontal_velocity - direction * speed) * turn;

        velocity += input * self.config.max_acceleration * dt;
        velocity.clamp_length_max(self.max_speed)
    }

    fn move_character(&mut self, physics: &mut crate::PhysicsWorld, desired: Vec3, dt: f32) {
        let Some(collider_handle) = self.collider_handle else {
            self.position += desired;
            return;
        };

        let Some(collider) = physics.collider_set.get(collider_handle) else {
            return;
        };

        let shape = collider.shape();
        let center = self.collider_translation();
        let current_pos = Isometry::translation(center.x, center.y, center.z);

        let movement = self.controller.move_shape(
            dt,
            &physics.rigid_body_set,
            &physics.collider_set,
            &physics.query_pipeline,
            shape,
            &current_pos,
            vector![desired.x, desired.y, desired.z],
            QueryFilter::default().exclude_collider(collider_handle),
            |_| {},
        );

        self.grounded = movement.grounded;

        let effective = movement.translation;
        self.position += Vec3::new(effective.x, effective.y, effective.z);
        self.sync_collider(physics);
    }

    fn sync_collider(&self, physics: &mut crate::PhysicsWorld) {
        if let Some(handle) = self.collider_handle {
            if let Some(collider) = physics.collider_set.get_mut(handle) {
                collider.set_translation(self.collider_translation());
            }
        }
    }

    fn collider_translation(&self) -> Vector<Real> {
        vector![
            self.position.x,
            self.position.y + self.config.half_height,
            self.position.z
        ]
    }

    fn cylinder_half_height(&self) -> f32 {
        (self.config.half_height - self.config.radius).max(0.01)
    }
}

impl Default for SkateMovement {
    fn default() -> Self {
        Self::new()
    }
}

impl MovementIntegrator for SkateMovement {
    fn velocity(&self) -> Vec3 {
        Vec3::new(
            self.horizontal_velocity.x,
            self.vertical_velocity,
            self.horizontal_velocity.z,
        )
    }

    fn set_velocity(&mut self, velocity: Vec3) {
        self.horizontal_velocity = Vec3::new(velocity.x, 0.0, velocity.z);
        self.vertical_velocity = velocity.y;
    }

    fn is_moving_on_ground(&self) -> bool {
        self.grounded
    }

    fn braking_deceleration(&self) -> f32 {
        self.braking_deceleration
    }

    fn set_braking_deceleration(&mut self, deceleration: f32) {
        self.braking_deceleration = deceleration;
    }

    fn add_movement_input(&mut self, direction: Vec3, scale: f32) {
        self.pending_input += Vec3::new(direction.x, 0.0, direction.z) * scale;
    }

    fn max_speed(&self) -> f32 {
        self.max_speed
    }

    fn set_max_speed(&mut self, max_speed: f32) {
        self.max_speed = max_speed;
    }

    fn ground_friction(&self) -> f32 {
        self.ground_friction
    }

    fn set_ground_friction(&mut self, friction: f32) {
        self.ground_friction = friction;
    }
}

/// Slow a ground velocity by friction and a constant deceleration.
///
/// Never reverses direction: the result is zero once braking would carry the
/// velocity past rest or below `stop_speed`.
fn apply_braking(
    velocity: Vec3,
    dt: f32,
    friction: f32,
    deceleration: f32,
    stop_speed: f32,
) -> Vec3 {
    if velocity == Vec3::ZERO || dt <= 0.0 || (friction <= 0.0 && deceleration <= 0.0) {
        return velocity;
    }

    let reverse = -friction * velocity - deceleration * velocity.normalize();
    let braked = velocity + reverse * dt;

    if braked.dot(velocity) <= 0.0 || braked.length() < stop_speed {
        Vec3::ZERO
    } else {
        braked
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::PhysicsWorld;

    #[test]
    fn test_skate_movement_config() {
        let config = SkateMovementConfig::default();
        assert_eq!(config.radius, 42.0);
        assert_eq!(config.half_height, 96.0);
        assert_eq!(config.max_slope_angle, 45.0);
    }

    #[test]
    fn test_default_config_is_valid() {
        assert!(SkateMovementConfig::default().validate().is_ok());
    }

    #[test]
    fn test_negative_step_height_is_rejected() {
        let config = SkateMovementConfig {
            step_height: -5.0,
            ..Default::default()
        };
        assert_eq!(
            config.validate(),
            Err(MovementConfigError::Negative {
                field: "step_height",
                value: -5.0
            })
        );
    }

    #[test]
    fn test_zero_radius_is_rejected() {
        let config = SkateMovementConfig {
            radius: 0.0,
            ..Default::default()
        };
        assert!(matches!(
            config.validate(),
            Err(MovementConfigError::NotPositive { field: "radius", .. })
        ));
    }

    #[test]
    fn test_capsule_shorter_than_radius_is_rejected() {
        let config = SkateMovementConfig {
            radius: 50.0,
            half_height: 30.0,
            ..Default::default()
        };
        assert!(matches!(
            config.validate(),
            Err(MovementConfigError::CapsuleTooShort { .. })
        ));
    }

    #[test]
    fn test_braking_slows_without_reversing() {
        let velocity = Vec3::new(300.0, 0.0, 0.0);
        let slowed = apply_braking(velocity, 0.1, 0.5, 50.0, 10.0);
        assert!(slowed.x < 300.0);
        assert!(slowed.x > 0.0);

        let stopped = apply_braking(velocity, 1.0, 0.5, 2048.0, 10.0);
        assert_eq!(stopped, Vec3::ZERO);
    }

    #[test]
    fn test_stronger_deceleration_stops_sooner() {
        let velocity = Vec3::new(0.0, 0.0, -500.0);
        let coast = apply_braking(velocity, 0.1, 0.5, 50.0, 10.0);
        let brake = apply_braking(velocity, 0.1, 0.5, 2048.0, 10.0);
        assert!(brake.length() < coast.length());
    }

    #[test]
    fn test_braking_without_coefficients_keeps_velocity() {
        let velocity = Vec3::new(120.0, 0.0, 40.0);
        assert_eq!(apply_braking(velocity, 0.1, 0.0, 0.0, 10.0), velocity);
    }

    #[test]
    fn test_accelerate_is_capped_at_max_speed() {
        let mut movement = SkateMovement::new();
        movement.set_max_speed(1200.0);
        movement.set_velocity(Vec3::new(0.0, 0.0, -1190.0));

        let velocity = movement.accelerate(Vec3::NEG_Z, 0.1);
        assert!((velocity.length() - 1200.0).abs() < 1e-2);
    }

    #[test]
    fn test_movement_input_is_flattened() {
        let mut movement = SkateMovement::new();
        movement.add_movement_input(Vec3::new(0.0, 1.0, -1.0), 0.5);
        assert_eq!(movement.pending_input, Vec3::new(0.0, 0.0, -0.5));
    }

    #[test]
    fn test_velocity_round_trips_through_trait() {
        let mut movement = SkateMovement::new();
        movement.set_velocity(Vec3::new(100.0, -20.0, 5.0));
        assert_eq!(movement.velocity(), Vec3::new(100.0, -20.0, 5.0));
    }

    #[test]
    fn test_jump_requires_ground() {
        let mut movement = SkateMovement::new();
        assert!(!movement.jump());

        movement.grounded = true;
        assert!(movement.jump());
        assert!(!movement.is_grounded());
        assert_eq!(movement.velocity().y, movement.config.jump_velocity);
    }

    #[test]
    fn test_falls_onto_ground() {
        let mut physics = PhysicsWorld::new();
        physics.create_ground(0.0);
        physics.update_query_pipeline();

        let mut movement = SkateMovement::new();
        movement.spawn(&mut physics, Vec3::new(0.0, 50.0, 0.0));

        for _ in 0..120 {
            movement.update(&mut physics, 1.0 / 60.0);
        }

        assert!(movement.is_grounded());
        assert!(movement.position.y < 10.0);
        assert!(movement.position.y > -1.0);
    }

    #[test]
    fn test_teleport_clears_ground_contact() {
        let mut physics = PhysicsWorld::new();
        physics.create_ground(0.0);
        physics.update_query_pipeline();

        let mut movement = SkateMovement::new();
        movement.spawn(&mut physics, Vec3::new(0.0, 20.0, 0.0));
        for _ in 0..60 {
            movement.update(&mut physics, 1.0 / 60.0);
        }
        assert!(movement.is_moving_on_ground());

        movement.add_movement_input(Vec3::NEG_Z, 1.0);
        movement.teleport(&mut physics, Vec3::new(0.0, 5000.0, 0.0));

        assert!(!movement.is_moving_on_ground());
        assert!(!movement.jump());
        assert_eq!(movement.velocity(), Vec3::ZERO);
        assert_eq!(movement.pending_input, Vec3::ZERO);
        assert_eq!(movement.position, Vec3::new(0.0, 5000.0, 0.0));

        movement.update(&mut physics, 1.0 / 60.0);
        assert!(!movement.is_grounded());
        assert!(movement.velocity().y < 0.0);
    }
}
