//! Pressure button systems.
//!
//! Two overlap observers maintain each button's occupancy and report its
//! edges to the sequence manager; [`button_target_system`] drives the
//! optional target entity every frame.

use bevy_ecs::prelude::*;
use log::info;

use crate::components::button::{ButtonEdge, PressureButton};
use crate::components::mapposition::MapPosition;
use crate::events::button::{ButtonPressedEvent, ButtonReleasedEvent};
use crate::events::overlap::{OverlapBeginEvent, OverlapEndEvent};
use crate::resources::worldtime::WorldTime;

pub fn button_enter_observer(
    trigger: On<OverlapBeginEvent>,
    mut buttons: Query<&mut PressureButton>,
    bodies: Query<(), With<MapPosition>>,
    mut commands: Commands,
) {
    let event = trigger.event();
    if event.trigger == event.other || !bodies.contains(event.other) {
        return;
    }
    let Ok(mut button) = buttons.get_mut(event.trigger) else {
        return;
    };
    if button.enter() == Some(ButtonEdge::Pressed) {
        info!("Button {:?} pressed by {:?}", event.trigger, event.other);
        if let Some(manager) = button.manager {
            commands.trigger(ButtonPressedEvent {
                manager,
                button: event.trigger,
            });
        }
    }
}

/// The other entity may already be gone here, so only self pairs are
/// filtered out.
pub fn button_exit_observer(
    trigger: On<OverlapEndEvent>,
    mut buttons: Query<&mut PressureButton>,
    mut commands: Commands,
) {
    let event = trigger.event();
    if event.trigger == event.other {
        return;
    }
    let Ok(mut button) = buttons.get_mut(event.trigger) else {
        return;
    };
    if button.exit() == Some(ButtonEdge::Released) {
        info!("Button {:?} released", event.trigger);
        if let Some(manager) = button.manager {
            commands.trigger(ButtonReleasedEvent {
                manager,
                button: event.trigger,
            });
        }
    }
}

/// Move each button's target toward its pressed or rest pose.
///
/// The target's pose on the first frame is taken as its rest pose. A
/// released button with `return_to_original` unset leaves its target where
/// it is.
pub fn button_target_system(
    time: Res<WorldTime>,
    mut buttons: Query<&mut PressureButton>,
    mut positions: Query<&mut MapPosition>,
) {
    for mut button in buttons.iter_mut() {
        let Some(target) = button.target else {
            continue;
        };
        let Ok(mut position) = positions.get_mut(target) else {
            continue;
        };
        button.drive.capture(position.pos);
        if let Some(engaged) = button.drive_goal() {
            position.pos = button.drive.step(position.pos, engaged, time.delta);
        }
    }
}
