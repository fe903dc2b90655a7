//! Ordered button sequence (the puzzle manager).
//!
//! A [`ButtonSequence`] lists the buttons that must be pressed, in order, to
//! open its door. Each press reported by a button is checked against the
//! expected button at `current_step`:
//!
//! - match: the step advances; reaching the end solves the sequence and
//!   opens the door,
//! - mismatch: the press is a failure; the attempted button's index in the
//!   sequence is recorded for diagnostics.
//!
//! # Failure policy
//!
//! With `reset_on_failure` set (the default) a failure sends the sequence back
//! to step 0. With it unset, progress is kept and only the failure is
//! recorded. Failures never move the door.
//!
//! # Solving again
//!
//! A solved sequence ignores further presses unless `reset_after_success` is
//! set, in which case progress is reset right after solving and the door
//! stays open.

use bevy_ecs::prelude::{Component, Entity};
use glam::Vec3;

use super::drive::TargetDrive;

pub const DEFAULT_DOOR_OFFSET: Vec3 = Vec3::new(400.0, 0.0, 0.0);
pub const DEFAULT_DOOR_SPEED: f32 = 200.0;

/// Result of feeding one press to the sequence.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SequenceOutcome {
    /// Already solved and not re-armable.
    Ignored,
    /// Correct button, more to go.
    Advanced,
    /// Correct final button.
    Solved,
    Failed(SequenceFailure),
}

/// Diagnostics for a wrong press.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SequenceFailure {
    /// Step that was expected when the wrong button came in.
    pub expected_step: usize,
    /// Position of the pressed button in the sequence, `None` if it is not
    /// part of it.
    pub attempted_index: Option<usize>,
}

#[derive(Component, Debug, Clone)]
pub struct ButtonSequence {
    pub buttons: Vec<Entity>,
    pub current_step: usize,
    pub completed: bool,
    pub door: Option<Entity>,
    pub door_drive: TargetDrive,
    pub door_open: bool,
    pub reset_on_failure: bool,
    pub reset_after_success: bool,
    pub last_failure: Option<SequenceFailure>,
    pub failures: u32,
}

impl ButtonSequence {
    pub fn new(buttons: Vec<Entity>) -> Self {
        Self {
            buttons,
            current_step: 0,
            completed: false,
            door: None,
            door_drive: TargetDrive::new(DEFAULT_DOOR_OFFSET, DEFAULT_DOOR_SPEED),
            door_open: false,
            reset_on_failure: true,
            reset_after_success: false,
            last_failure: None,
            failures: 0,
        }
    }

    pub fn with_door(mut self, door: Entity, offset: Vec3, speed: f32) -> Self {
        self.door = Some(door);
        self.door_drive = TargetDrive::new(offset, speed);
        self
    }

    pub fn with_reset_on_failure(mut self, value: bool) -> Self {
        self.reset_on_failure = value;
        self
    }

    pub fn with_reset_after_success(mut self, value: bool) -> Self {
        self.reset_after_success = value;
        self
    }

    pub fn expected(&self) -> Option<Entity> {
        self.buttons.get(self.current_step).copied()
    }

    /// Feed a press from `button`.
    pub fn on_button_pressed(&mut self, button: Entity) -> SequenceOutcome {
        if self.completed && !self.reset_after_success {
            return SequenceOutcome::Ignored;
        }

        if self.expected() == Some(button) {
            self.current_step += 1;
            if self.current_step >= self.buttons.len() {
                self.completed = true;
                self.door_open = true;
                if self.reset_after_success {
                    self.reset_sequence();
                }
                return SequenceOutcome::Solved;
            }
            return SequenceOutcome::Advanced;
        }

        let failure = SequenceFailure {
            expected_step: self.current_step,
            attempted_index: self.buttons.iter().position(|b| *b == button),
        };
        self.last_failure = Some(failure);
        self.failures += 1;
        if self.reset_on_failure {
            self.reset_sequence();
        }
        SequenceOutcome::Failed(failure)
    }

    /// Back to the first step. Leaves the door as it is.
    pub fn reset_sequence(&mut self) {
        self.current_step = 0;
        self.completed = false;
    }
}
