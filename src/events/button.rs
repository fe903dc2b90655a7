//! Button edge notifications sent to a sequence manager.
//!
//! A [`PressureButton`](crate::components::button::PressureButton) with a
//! manager triggers [`ButtonPressedEvent`] on its 0→1 occupancy edge and
//! [`ButtonReleasedEvent`] on its 1→0 edge. Intermediate occupancy changes
//! produce nothing.

use bevy_ecs::prelude::*;

#[derive(Event, Debug, Clone, Copy, PartialEq, Eq)]
pub struct ButtonPressedEvent {
    /// The sequence the button reports to.
    pub manager: Entity,
    pub button: Entity,
}

#[derive(Event, Debug, Clone, Copy, PartialEq, Eq)]
pub struct ButtonReleasedEvent {
    pub manager: Entity,
    pub button: Entity,
}
