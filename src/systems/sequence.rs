//! Button sequence systems.
//!
//! - [`attach_sequence_buttons`] – point every listed button at its sequence
//!   when the sequence is added
//! - [`sequence_button_pressed_observer`] – judge a press and report the
//!   outcome through [`SequenceSolvedEvent`] or [`SequenceFailedEvent`]
//! - [`sequence_button_released_observer`] – releases are only logged
//! - [`sequence_door_system`] – drive the door toward its open or closed pose

use bevy_ecs::prelude::*;
use log::{debug, info, warn};

use crate::components::button::PressureButton;
use crate::components::mapposition::MapPosition;
use crate::components::sequence::{ButtonSequence, SequenceOutcome};
use crate::events::button::{ButtonPressedEvent, ButtonReleasedEvent};
use crate::events::sequence::{SequenceFailedEvent, SequenceSolvedEvent};
use crate::resources::worldtime::WorldTime;

pub fn attach_sequence_buttons(
    sequences: Query<(Entity, &ButtonSequence), Added<ButtonSequence>>,
    mut buttons: Query<&mut PressureButton>,
) {
    for (manager, sequence) in sequences.iter() {
        for button in sequence.buttons.iter() {
            match buttons.get_mut(*button) {
                Ok(mut b) => b.set_manager(manager),
                Err(_) => warn!(
                    "Sequence {:?} lists {:?}, which is not a button",
                    manager, button
                ),
            }
        }
        if sequence.door.is_none() {
            warn!("Sequence {:?} has no door", manager);
        }
    }
}

pub fn sequence_button_pressed_observer(
    trigger: On<ButtonPressedEvent>,
    mut sequences: Query<&mut ButtonSequence>,
    mut commands: Commands,
) {
    let event = trigger.event();
    if event.manager == event.button {
        return;
    }
    let Ok(mut sequence) = sequences.get_mut(event.manager) else {
        return;
    };
    match sequence.on_button_pressed(event.button) {
        SequenceOutcome::Ignored => {
            debug!("Sequence {:?} already solved, ignoring {:?}", event.manager, event.button);
        }
        SequenceOutcome::Advanced => {
            info!(
                "Sequence {:?}: correct button, step {}/{}",
                event.manager,
                sequence.current_step,
                sequence.buttons.len()
            );
        }
        SequenceOutcome::Solved => {
            info!("Sequence {:?} solved, opening door", event.manager);
            commands.trigger(SequenceSolvedEvent {
                manager: event.manager,
            });
        }
        SequenceOutcome::Failed(failure) => {
            info!(
                "Sequence {:?}: wrong button {:?}, expected step {}, attempted index {:?}",
                event.manager, event.button, failure.expected_step, failure.attempted_index
            );
            commands.trigger(SequenceFailedEvent {
                manager: event.manager,
                button: event.button,
                expected_step: failure.expected_step,
                attempted_index: failure.attempted_index,
            });
        }
    }
}

pub fn sequence_button_released_observer(
    trigger: On<ButtonReleasedEvent>,
    sequences: Query<&ButtonSequence>,
) {
    let event = trigger.event();
    if let Ok(sequence) = sequences.get(event.manager) {
        debug!(
            "Sequence {:?}: button {:?} released at step {}",
            event.manager, event.button, sequence.current_step
        );
    }
}

pub fn sequence_door_system(
    time: Res<WorldTime>,
    mut sequences: Query<&mut ButtonSequence>,
    mut positions: Query<&mut MapPosition>,
) {
    for mut sequence in sequences.iter_mut() {
        let Some(door) = sequence.door else {
            continue;
        };
        let Ok(mut position) = positions.get_mut(door) else {
            continue;
        };
        let open = sequence.door_open;
        position.pos = sequence.door_drive.step(position.pos, open, time.delta);
    }
}
