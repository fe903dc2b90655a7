//! Collapsing floor component.
//!
//! A [`CollapsingFloor`] starts shaking the first time something enters its
//! trigger volume, drops out of the world after `delete_delay` seconds and
//! comes back at its original pose after a further `respawn_delay`.
//!
//! # Lifecycle
//!
//! ```text
//! Idle --contact--> Shaking --delete_delay--> Fallen --respawn_delay--> Idle
//! ```
//!
//! The floor entity is pooled rather than destroyed: going `Fallen` inserts
//! [`Dormant`](super::dormant::Dormant) and coming back runs
//! [`CollapsingFloor::reset_to_initial_state`] and bumps `generation`, so each
//! comeback is a fresh instance with only the original pose carried over.
//!
//! There is no path that cancels a fall once shaking has begun.

use bevy_ecs::prelude::Component;
use glam::Vec3;

pub const DEFAULT_SHAKE_AMPLITUDE: f32 = 5.0;
pub const DEFAULT_SHAKE_FREQUENCY: f32 = 20.0;
pub const DEFAULT_DELETE_DELAY: f32 = 2.0;
pub const DEFAULT_RESPAWN_DELAY: f32 = 0.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CollapseState {
    #[default]
    Idle,
    /// Jittering in place, fall already scheduled.
    Shaking,
    /// Out of the world, comeback scheduled.
    Fallen,
}

#[derive(Component, Debug, Clone)]
pub struct CollapsingFloor {
    pub original_position: Vec3,
    pub shake_amplitude: f32,
    pub shake_frequency: f32,
    pub delete_delay: f32,
    pub respawn_delay: f32,
    pub state: CollapseState,
    pub shake_timer: f32,
    /// Incremented on each comeback.
    pub generation: u32,
}

impl CollapsingFloor {
    pub fn new(original_position: Vec3) -> Self {
        Self {
            original_position,
            shake_amplitude: DEFAULT_SHAKE_AMPLITUDE,
            shake_frequency: DEFAULT_SHAKE_FREQUENCY,
            delete_delay: DEFAULT_DELETE_DELAY,
            respawn_delay: DEFAULT_RESPAWN_DELAY,
            state: CollapseState::Idle,
            shake_timer: 0.0,
            generation: 0,
        }
    }

    pub fn with_shake(mut self, amplitude: f32, frequency: f32) -> Self {
        self.shake_amplitude = amplitude;
        self.shake_frequency = frequency;
        self
    }

    pub fn with_delays(mut self, delete_delay: f32, respawn_delay: f32) -> Self {
        self.delete_delay = delete_delay;
        self.respawn_delay = respawn_delay;
        self
    }

    pub fn is_shaking(&self) -> bool {
        self.state == CollapseState::Shaking
    }

    /// First contact. Returns true when this contact started the collapse.
    pub fn begin_shaking(&mut self) -> bool {
        if self.state != CollapseState::Idle {
            return false;
        }
        self.state = CollapseState::Shaking;
        self.shake_timer = 0.0;
        true
    }

    /// Advance the shake and return the position to show this frame.
    pub fn shake(&mut self, dt: f32) -> Vec3 {
        self.shake_timer += dt;
        let phase = self.shake_timer * self.shake_frequency;
        let offset = Vec3::new(
            phase.sin() * self.shake_amplitude,
            phase.cos() * self.shake_amplitude,
            0.0,
        );
        self.original_position + offset
    }

    pub fn fall(&mut self) {
        self.state = CollapseState::Fallen;
    }

    /// Return to the state a freshly placed floor has.
    pub fn reset_to_initial_state(&mut self) {
        self.state = CollapseState::Idle;
        self.shake_timer = 0.0;
        self.generation = self.generation.wrapping_add(1);
    }
}
