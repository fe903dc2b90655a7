//! One-shot deferred callback component.
//!
//! A [`Timer`] counts elapsed time each frame. Once `elapsed >= duration`,
//! [`update_timers`](crate::systems::time::update_timers) removes the
//! component and triggers a [`TimerEvent`](crate::events::timer::TimerEvent)
//! carrying the timer's [`TimerSignal`]. Observers decide what the signal
//! means for the entity.
//!
//! A duration of zero fires on the next update, not synchronously. Timers
//! cannot be cancelled once armed other than by removing the component.

use bevy_ecs::prelude::Component;

/// What a fired timer asks its entity to do.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TimerSignal {
    /// Collapsing floor drops out of the world.
    DeleteFloor,
    /// Collapsing floor comes back at its original pose.
    RespawnFloor,
}

#[derive(Component, Debug, Clone)]
pub struct Timer {
    pub duration: f32,
    pub elapsed: f32,
    pub signal: TimerSignal,
}

impl Timer {
    pub fn new(duration: f32, signal: TimerSignal) -> Self {
        Timer {
            duration: duration.max(0.0),
            elapsed: 0.0,
            signal,
        }
    }

    /// Accumulate `dt`; returns true once the timer has run out.
    pub fn tick(&mut self, dt: f32) -> bool {
        self.elapsed += dt;
        self.elapsed >= self.duration
    }

    pub fn reset(&mut self) {
        self.elapsed = 0.0;
    }
}
