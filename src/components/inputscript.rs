//! Scripted input for headless runs.
//!
//! An [`InputScript`] is a list of keyframes. From each keyframe's `at`
//! time onward the actor moves with `velocity`, faces `yaw` degrees and holds
//! (or releases) the push input, until the next keyframe takes over.

use bevy_ecs::prelude::Component;
use glam::Vec3;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct InputKey {
    /// World time in seconds the keyframe becomes active.
    pub at: f32,
    #[serde(default)]
    pub velocity: Vec3,
    #[serde(default)]
    pub yaw: f32,
    #[serde(default)]
    pub push: bool,
}

#[derive(Component, Debug, Clone, Default)]
pub struct InputScript {
    /// Sorted by `at`.
    pub keys: Vec<InputKey>,
}

impl InputScript {
    pub fn new(mut keys: Vec<InputKey>) -> Self {
        keys.sort_by(|a, b| a.at.total_cmp(&b.at));
        Self { keys }
    }

    /// Keyframe in effect at `time`, if any has started.
    pub fn active(&self, time: f32) -> Option<&InputKey> {
        self.keys.iter().rev().find(|k| k.at <= time)
    }
}
