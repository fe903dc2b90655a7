//! Moving platform systems.
//!
//! - [`moving_platform_system`] – advance every platform and carry its riders
//! - [`platform_rider_enter_observer`] – start tracking a body on the platform
//! - [`platform_rider_exit_observer`] – stop tracking it
//!
//! Riders are moved by exactly the displacement the platform made this
//! frame, after the platform itself. Riders that no longer exist are
//! skipped; they leave the set through the overlap end event.

use bevy_ecs::prelude::*;
use log::debug;

use crate::components::dormant::Dormant;
use crate::components::drive::is_nearly_zero;
use crate::components::mapposition::MapPosition;
use crate::components::platform::MovingPlatform;
use crate::events::overlap::{OverlapBeginEvent, OverlapEndEvent};
use crate::resources::worldtime::WorldTime;

pub fn moving_platform_system(
    time: Res<WorldTime>,
    mut platforms: Query<(Entity, &mut MovingPlatform), Without<Dormant>>,
    mut positions: Query<&mut MapPosition>,
) {
    for (entity, mut platform) in platforms.iter_mut() {
        let Ok(mut position) = positions.get_mut(entity) else {
            continue;
        };
        let current = position.pos;
        let next = platform.step(current, time.delta);
        position.pos = next;

        let delta = next - current;
        if !platform.carry_riders || is_nearly_zero(delta) {
            continue;
        }
        for rider in platform.riders.iter() {
            if let Ok(mut rider_pos) = positions.get_mut(*rider) {
                rider_pos.translate(delta);
            }
        }
    }
}

pub fn platform_rider_enter_observer(
    trigger: On<OverlapBeginEvent>,
    mut platforms: Query<&mut MovingPlatform>,
    bodies: Query<(), With<MapPosition>>,
) {
    let event = trigger.event();
    if !bodies.contains(event.other) {
        return;
    }
    let Ok(mut platform) = platforms.get_mut(event.trigger) else {
        return;
    };
    if platform.add_rider(event.trigger, event.other) {
        debug!("Platform {:?} picked up rider {:?}", event.trigger, event.other);
    }
}

pub fn platform_rider_exit_observer(
    trigger: On<OverlapEndEvent>,
    mut platforms: Query<&mut MovingPlatform>,
) {
    let event = trigger.event();
    let Ok(mut platform) = platforms.get_mut(event.trigger) else {
        return;
    };
    if platform.remove_rider(event.trigger, event.other) {
        debug!("Platform {:?} dropped rider {:?}", event.trigger, event.other);
    }
}
