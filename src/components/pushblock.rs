//! Push block and pusher components.
//!
//! A [`PushBlock`] follows the displacement of the entity pushing it. It can
//! only be pushed from the face opposite its `push_dir` normal, within
//! `push_angle` degrees. [`Pushable`] is the capability tag ray queries look
//! for when a [`Pusher`] searches for something to push.
//!
//! The [`Pusher`] side owns the push session: it finds a target by ray,
//! checks eligibility, starts and stops the session on its push intent, and
//! forwards its own horizontal displacement to the block every frame.

use bevy_ecs::prelude::{Component, Entity};
use glam::{Quat, Vec3};
use log::debug;

pub const DEFAULT_PUSH_ANGLE: f32 = 45.0;
pub const DEFAULT_PUSH_POWER: f32 = 100.0;
pub const DEFAULT_PUSH_DISTANCE: f32 = 150.0;
pub const DEFAULT_PUSH_SPEED_SCALE: f32 = 0.5;

/// Capability tag: entities a pusher's ray may lock onto.
#[derive(Component, Debug, Clone, Copy, Default)]
pub struct Pushable;

#[derive(Component, Debug, Clone)]
pub struct PushBlock {
    /// Local-space normal of the pushable face.
    pub push_dir: Vec3,
    /// Tolerance cone half-angle in degrees, within `[0, 180]`.
    pub push_angle: f32,
    pub push_power: f32,
    pub pusher: Option<Entity>,
    pub being_pushed: bool,
}

impl Default for PushBlock {
    fn default() -> Self {
        Self::new()
    }
}

impl PushBlock {
    pub fn new() -> Self {
        Self {
            push_dir: Vec3::X,
            push_angle: DEFAULT_PUSH_ANGLE,
            push_power: DEFAULT_PUSH_POWER,
            pusher: None,
            being_pushed: false,
        }
    }

    pub fn with_push_dir(mut self, dir: Vec3) -> Self {
        self.push_dir = dir;
        self
    }

    pub fn with_push_angle(mut self, degrees: f32) -> Self {
        self.push_angle = degrees.clamp(0.0, 180.0);
        self
    }

    /// Whether an entity at `entity_pos` stands inside the push cone of a
    /// block at `block_pos` rotated by `rotation`.
    pub fn can_be_pushed_from(&self, block_pos: Vec3, rotation: Quat, entity_pos: Vec3) -> bool {
        let mut to_entity = entity_pos - block_pos;
        to_entity.z = 0.0;
        let Some(to_entity) = to_entity.try_normalize() else {
            return false;
        };

        let mut world_dir = rotation * self.push_dir;
        world_dir.z = 0.0;
        let world_dir = world_dir.normalize_or_zero();

        let dot = to_entity.dot(world_dir);
        let angle = (-dot).clamp(-1.0, 1.0).acos().to_degrees();
        let can_push = angle <= self.push_angle;
        debug!(
            "Push check: angle={:.1}, tolerance={:.1}, can_push={}",
            angle, self.push_angle, can_push
        );
        can_push
    }

    pub fn start_pushing(&mut self, pusher: Entity) {
        self.being_pushed = true;
        self.pusher = Some(pusher);
    }

    pub fn stop_pushing(&mut self) {
        self.being_pushed = false;
        self.pusher = None;
    }

    /// Portion of `delta` to apply given an optional blocking hit fraction.
    pub fn clamp_to_hit(delta: Vec3, hit_fraction: Option<f32>) -> Vec3 {
        match hit_fraction {
            Some(t) => delta * t.clamp(0.0, 1.0),
            None => delta,
        }
    }
}

/// An entity that can push blocks (the player).
#[derive(Component, Debug, Clone)]
pub struct Pusher {
    /// Reach of the forward ray.
    pub push_distance: f32,
    /// Speed multiplier while pushing.
    pub push_speed_scale: f32,
    pub target_block: Option<Entity>,
    pub pushing: bool,
    /// Push input held.
    pub wants_push: bool,
    /// Position at the end of the previous frame.
    pub prev_position: Option<Vec3>,
}

impl Default for Pusher {
    fn default() -> Self {
        Self::new()
    }
}

impl Pusher {
    pub fn new() -> Self {
        Self {
            push_distance: DEFAULT_PUSH_DISTANCE,
            push_speed_scale: DEFAULT_PUSH_SPEED_SCALE,
            target_block: None,
            pushing: false,
            wants_push: false,
            prev_position: None,
        }
    }

    /// Horizontal displacement since the last frame; records `current`.
    pub fn take_displacement(&mut self, current: Vec3) -> Vec3 {
        let prev = self.prev_position.replace(current).unwrap_or(current);
        let mut delta = current - prev;
        delta.z = 0.0;
        delta
    }
}
