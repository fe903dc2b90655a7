//! Sequence outcome events.
//!
//! Triggered by the sequence observer after a press has been judged, so that
//! other parts of a game (sounds, effects, scoring) can react without the
//! sequence knowing about them.

use bevy_ecs::prelude::*;

/// All buttons were pressed in order.
#[derive(Event, Debug, Clone, Copy, PartialEq, Eq)]
pub struct SequenceSolvedEvent {
    pub manager: Entity,
}

/// A button was pressed out of order.
#[derive(Event, Debug, Clone, Copy, PartialEq, Eq)]
pub struct SequenceFailedEvent {
    pub manager: Entity,
    pub button: Entity,
    /// Step that was expected.
    pub expected_step: usize,
    /// Position of the pressed button in the sequence, if it belongs to it.
    pub attempted_index: Option<usize>,
}
