//! Skater Physics - Ground movement integration using rapier3d
//!
//! Provides the collision world and the kinematic skate movement integrator
//! that locomotion controllers drive through [`skater_core::MovementIntegrator`].
//! World units are centimeters.

mod skate_movement;

pub use skate_movement::{MovementConfigError, SkateMovement, SkateMovementConfig};

use glam::Vec3;
use nalgebra::{Unit, UnitQuaternion};
use rapier3d::prelude::*;

/// Physics world configuration
#[derive(Debug, Clone)]
pub struct PhysicsConfig {
    /// Gravity vector (default: -980 cm/s² on Y axis)
    pub gravity: Vec3,
}

impl Default for PhysicsConfig {
    fn default() -> Self {
        Self {
            gravity: Vec3::new(0.0, -980.0, 0.0),
        }
    }
}

/// The static collision world skaters move through.
///
/// Skaters are kinematic, so there is no dynamics pipeline: the world only
/// stores colliders and the query pipeline their shape casts run against.
pub struct PhysicsWorld {
    /// Configuration
    pub config: PhysicsConfig,

    /// Rigid body storage (empty, required by rapier's queries)
    pub rigid_body_set: RigidBodySet,
    /// Collider storage
    pub collider_set: ColliderSet,

    /// Query pipeline used by character shape casts
    query_pipeline: QueryPipeline,
}

impl PhysicsWorld {
    /// Create a new physics world with default configuration
    pub fn new() -> Self {
        Self::with_config(PhysicsConfig::default())
    }

    /// Create a new physics world with custom configuration
    pub fn with_config(config: PhysicsConfig) -> Self {
        Self {
            config,
            rigid_body_set: RigidBodySet::new(),
            collider_set: ColliderSet::new(),
            query_pipeline: QueryPipeline::new(),
        }
    }

    /// Refresh the query pipeline after colliders were added or moved
    pub fn update_query_pipeline(&mut self) {
        self.query_pipeline.update(&self.collider_set);
    }

    /// Downward gravity magnitude
    pub fn gravity_magnitude(&self) -> f32 {
        -self.config.gravity.y
    }

    /// Add a static collider (ground, ramps, rails)
    pub fn add_static_collider(&mut self, collider: Collider) -> ColliderHandle {
        self.collider_set.insert(collider)
    }

    /// Create a ground plane collider
    pub fn create_ground(&mut self, y: f32) -> ColliderHandle {
        let normal = Unit::new_normalize(vector![0.0, 1.0, 0.0]);
        let ground = ColliderBuilder::halfspace(normal)
            .translation(vector![0.0, y, 0.0])
            .friction(0.7)
            .restitution(0.0)
            .build();
        self.add_static_collider(ground)
    }

    /// Create a static box collider, optionally pitched into a ramp
    pub fn create_static_box(
        &mut self,
        half_extents: Vec3,
        position: Vec3,
        pitch_degrees: f32,
    ) -> ColliderHandle {
        let rotation = UnitQuaternion::from_euler_angles(pitch_degrees.to_radians(), 0.0, 0.0);
        let collider = ColliderBuilder::cuboid(half_extents.x, half_extents.y, half_extents.z)
            .position(Isometry::from_parts(
                vector![position.x, position.y, position.z].into(),
                rotation,
            ))
            .friction(0.7)
            .build();
        self.add_static_collider(collider)
    }
}

impl Default for PhysicsWorld {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_physics_world_creation() {
        let world = PhysicsWorld::new();
        assert_eq!(world.config.gravity, Vec3::new(0.0, -980.0, 0.0));
        assert_eq!(world.gravity_magnitude(), 980.0);
    }

    #[test]
    fn test_ground_creation() {
        let mut world = PhysicsWorld::new();
        let ground = world.create_ground(0.0);
        assert!(world.collider_set.get(ground).is_some());
        assert_eq!(world.collider_set.len(), 1);
    }

    #[test]
    fn test_ramp_creation() {
        let mut world = PhysicsWorld::new();
        let ramp = world.create_static_box(
            Vec3::new(200.0, 10.0, 400.0),
            Vec3::new(0.0, 50.0, -1000.0),
            15.0,
        );
        let collider = world.collider_set.get(ramp).expect("ramp collider");
        assert!((collider.translation().z + 1000.0).abs() < 1e-3);
    }
}
