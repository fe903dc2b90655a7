//! World-space position of an entity.
//!
//! Every gimmick, actor, and door carries a [`MapPosition`]. Gimmick systems
//! read it to compute per-frame displacements and write it back as a
//! teleport; riders and pushed blocks receive the same displacement as an
//! offset.

use bevy_ecs::prelude::Component;
use glam::Vec3;

/// Pivot of an entity in world units (Z up).
#[derive(Component, Clone, Copy, Debug, PartialEq)]
pub struct MapPosition {
    pub pos: Vec3,
}

impl MapPosition {
    pub fn new(x: f32, y: f32, z: f32) -> Self {
        Self {
            pos: Vec3::new(x, y, z),
        }
    }

    pub fn from_vec(pos: Vec3) -> Self {
        Self { pos }
    }

    /// Move by a world-space offset.
    pub fn translate(&mut self, delta: Vec3) {
        self.pos += delta;
    }
}
