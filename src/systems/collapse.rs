//! Collapsing floor systems.
//!
//! Lifecycle of a floor, driven by overlap and timer events:
//!
//! 1. [`collapse_trigger_observer`]: the first body to enter an idle floor
//!    starts the shake and arms a `DeleteFloor` timer.
//! 2. [`collapse_shake_system`]: while shaking, the floor jitters around its
//!    original pose every frame.
//! 3. [`collapse_timer_observer`] on `DeleteFloor`: the floor falls, goes
//!    [`Dormant`] and arms a `RespawnFloor` timer.
//! 4. [`collapse_timer_observer`] on `RespawnFloor`: the same entity is reset
//!    to its initial state at its original pose and leaves the dormant state,
//!    whether or not a body stands in its volume.
//!
//! The entity is never despawned; its `generation` counts the respawns.

use bevy_ecs::prelude::*;
use log::{debug, info};

use crate::components::collapsingfloor::{CollapseState, CollapsingFloor};
use crate::components::dormant::Dormant;
use crate::components::mapposition::MapPosition;
use crate::components::rotation::Rotation;
use crate::components::timer::{Timer, TimerSignal};
use crate::events::overlap::OverlapBeginEvent;
use crate::events::timer::TimerEvent;
use crate::resources::worldtime::WorldTime;

pub fn collapse_trigger_observer(
    trigger: On<OverlapBeginEvent>,
    mut floors: Query<&mut CollapsingFloor, Without<Dormant>>,
    bodies: Query<(), With<MapPosition>>,
    mut commands: Commands,
) {
    let event = trigger.event();
    if event.trigger == event.other || !bodies.contains(event.other) {
        return;
    }
    let Ok(mut floor) = floors.get_mut(event.trigger) else {
        return;
    };
    if floor.begin_shaking() {
        info!(
            "Floor {:?} shaking, falls in {:.2}s",
            event.trigger, floor.delete_delay
        );
        commands
            .entity(event.trigger)
            .insert(Timer::new(floor.delete_delay, TimerSignal::DeleteFloor));
    }
}

pub fn collapse_shake_system(
    time: Res<WorldTime>,
    mut floors: Query<(&mut CollapsingFloor, &mut MapPosition), Without<Dormant>>,
) {
    for (mut floor, mut position) in floors.iter_mut() {
        if floor.is_shaking() {
            position.pos = floor.shake(time.delta);
        }
    }
}

pub fn collapse_timer_observer(
    trigger: On<TimerEvent>,
    mut floors: Query<(&mut CollapsingFloor, &mut MapPosition, Option<&mut Rotation>)>,
    mut commands: Commands,
) {
    let event = trigger.event();
    let Ok((mut floor, mut position, rotation)) = floors.get_mut(event.entity) else {
        return;
    };
    match event.signal {
        TimerSignal::DeleteFloor => {
            if floor.state != CollapseState::Shaking {
                debug!("Floor {:?} got DeleteFloor while {:?}", event.entity, floor.state);
                return;
            }
            floor.fall();
            position.pos = floor.original_position;
            info!(
                "Floor {:?} fell, respawns in {:.2}s",
                event.entity, floor.respawn_delay
            );
            commands.entity(event.entity).insert((
                Dormant,
                Timer::new(floor.respawn_delay, TimerSignal::RespawnFloor),
            ));
        }
        TimerSignal::RespawnFloor => {
            floor.reset_to_initial_state();
            position.pos = floor.original_position;
            if let Some(mut rotation) = rotation {
                rotation.degrees = 0.0;
            }
            info!(
                "Floor {:?} respawned (generation {})",
                event.entity, floor.generation
            );
            commands.entity(event.entity).remove::<Dormant>();
        }
    }
}
