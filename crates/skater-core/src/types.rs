//! Core types used throughout the skater crates

use std::fmt;

use glam::{Quat, Vec3};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Unique identifier for a simulated actor
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ActorId(pub Uuid);

impl ActorId {
    /// Create a new random actor ID
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for ActorId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for ActorId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Yaw-only orientation of an actor, in degrees.
///
/// The world is Y-up and an actor with zero yaw faces `-Z`. Positive yaw turns
/// the actor clockwise when seen from above, so `+1` steering turns right.
/// Pitch and roll are never represented.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Heading {
    yaw_degrees: f32,
}

impl Heading {
    /// Create a heading from a yaw angle in degrees
    pub fn from_degrees(yaw_degrees: f32) -> Self {
        Self { yaw_degrees }
    }

    /// Yaw angle in degrees (unwrapped, may exceed 360)
    pub fn yaw_degrees(&self) -> f32 {
        self.yaw_degrees
    }

    /// Rotate by `delta_degrees` of yaw
    pub fn rotate(&mut self, delta_degrees: f32) {
        self.yaw_degrees += delta_degrees;
    }

    /// Rotation quaternion for this heading
    pub fn rotation(&self) -> Quat {
        Self::yaw_rotation(self.yaw_degrees)
    }

    /// Forward direction on the ground plane
    pub fn forward(&self) -> Vec3 {
        self.rotation() * -Vec3::Z
    }

    /// Right direction on the ground plane
    pub fn right(&self) -> Vec3 {
        self.rotation() * Vec3::X
    }

    /// Rotate a vector by a yaw delta using the same convention as headings
    pub fn rotate_vector(delta_degrees: f32, vector: Vec3) -> Vec3 {
        Self::yaw_rotation(delta_degrees) * vector
    }

    fn yaw_rotation(yaw_degrees: f32) -> Quat {
        // Clockwise from above is a negative rotation about +Y.
        Quat::from_rotation_y(-yaw_degrees.to_radians())
    }
}
