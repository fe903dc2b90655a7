//! Kinematic body component.
//!
//! The [`RigidBody`] component stores the velocity an actor wants to move at.
//! The movement system integrates it into
//! [`MapPosition`](super::mapposition::MapPosition) every frame.
//!
//! `speed_scale` lets gimmicks slow an actor down without touching its
//! intended velocity (a player pushing a block walks slower). The `frozen`
//! flag disables integration entirely while the position is driven from
//! elsewhere.

use bevy_ecs::prelude::Component;
use glam::Vec3;

/// Kinematic body storing velocity and a speed multiplier.
///
/// # Example
/// ```ignore
/// let mut rb = RigidBody::new();
/// rb.velocity = Vec3::new(200.0, 0.0, 0.0);
/// rb.speed_scale = 0.5; // pushing something heavy
/// ```
#[derive(Component, Clone, Debug)]
pub struct RigidBody {
    /// Intended velocity in world units per second.
    pub velocity: Vec3,
    /// Multiplier applied to `velocity` during integration.
    pub speed_scale: f32,
    /// When true, the movement system skips this entity.
    pub frozen: bool,
}

impl Default for RigidBody {
    fn default() -> Self {
        Self::new()
    }
}

impl RigidBody {
    /// Create a RigidBody at rest with a speed scale of 1.
    pub fn new() -> Self {
        Self {
            velocity: Vec3::ZERO,
            speed_scale: 1.0,
            frozen: false,
        }
    }

    pub fn with_velocity(velocity: Vec3) -> Self {
        Self {
            velocity,
            ..Self::new()
        }
    }

    /// Displacement this body covers in `dt` seconds.
    pub fn displacement(&self, dt: f32) -> Vec3 {
        if self.frozen {
            return Vec3::ZERO;
        }
        self.velocity * self.speed_scale * dt
    }

    pub fn freeze(&mut self) {
        self.frozen = true;
    }

    pub fn unfreeze(&mut self) {
        self.frozen = false;
    }
}
