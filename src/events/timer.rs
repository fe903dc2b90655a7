//! Timer expiration events.
//!
//! When a [`Timer`](crate::components::timer::Timer) component reaches its
//! duration, a [`TimerEvent`] is triggered for the entity. Observers match on
//! the [`TimerSignal`] to run the deferred step.
//!
//! # Example
//!
//! ```ignore
//! world.add_observer(|trigger: On<TimerEvent>, mut commands: Commands| {
//!     match trigger.event().signal {
//!         TimerSignal::DeleteFloor => { /* drop the floor */ }
//!         TimerSignal::RespawnFloor => { /* bring it back */ }
//!     }
//! });
//! ```
//!
//! # Related
//!
//! - [`crate::components::timer::Timer`] – the timer component
//! - [`crate::systems::time::update_timers`] – the system that emits these events

use bevy_ecs::prelude::*;

use crate::components::timer::TimerSignal;

/// Event emitted when a timer expires.
#[derive(Event, Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimerEvent {
    /// The entity whose timer expired.
    pub entity: Entity,
    /// The signal configured on the timer.
    pub signal: TimerSignal,
}
