use bevy_ecs::prelude::Component;
use glam::{Quat, Vec3};

/// Yaw around the world Z axis, in degrees.
#[derive(Component, Clone, Copy, Debug, Default, PartialEq)]
pub struct Rotation {
    pub degrees: f32,
}

impl Rotation {
    pub fn new(degrees: f32) -> Self {
        Self { degrees }
    }

    pub fn quat(&self) -> Quat {
        Quat::from_rotation_z(self.degrees.to_radians())
    }

    /// Unit vector the entity is facing on the ground plane.
    pub fn forward(&self) -> Vec3 {
        let r = self.degrees.to_radians();
        Vec3::new(r.cos(), r.sin(), 0.0)
    }
}
