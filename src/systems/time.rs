//! Time systems.
//!
//! - [`update_world_time`] – advance the shared
//!   [`WorldTime`](crate::resources::worldtime::WorldTime) resource once per
//!   frame, applying `time_scale` to the provided delta
//! - [`update_timers`] – advance one-shot [`Timer`] components and trigger a
//!   [`TimerEvent`] for each one that runs out
use bevy_ecs::prelude::*;

use crate::components::timer::Timer;
use crate::events::timer::TimerEvent;
use crate::resources::worldtime::WorldTime;

/// Update elapsed and delta seconds on the `WorldTime` resource.
///
/// `dt` is expected to be the unscaled frame delta in seconds. The system
/// applies the current `time_scale` and writes both `elapsed` and `delta`.
pub fn update_world_time(world: &mut World, dt: f32) {
    let mut wt = world.resource_mut::<WorldTime>();
    let scaled_dt = dt * wt.time_scale;
    wt.elapsed += scaled_dt;
    wt.delta = scaled_dt;
    wt.frame_count += 1;
}

/// Accumulate delta time on every [`Timer`] and fire the expired ones.
///
/// An expired timer is removed before its event is triggered, so an observer
/// may arm a new timer on the same entity.
pub fn update_timers(
    world_time: Res<WorldTime>,
    mut query: Query<(Entity, &mut Timer)>,
    mut commands: Commands,
) {
    for (entity, mut timer) in query.iter_mut() {
        if timer.tick(world_time.delta) {
            commands.entity(entity).remove::<Timer>();
            commands.trigger(TimerEvent {
                entity,
                signal: timer.signal,
            });
        }
    }
}
