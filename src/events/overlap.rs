//! Overlap notifications emitted by the overlap detector.
//!
//! [`overlap_detector`](crate::systems::overlap::overlap_detector) compares
//! the trigger volumes of gimmicks with the bodies of every other entity each
//! frame. When a pair starts intersecting it triggers [`OverlapBeginEvent`];
//! when it stops (or either side disappears or goes dormant) it triggers
//! [`OverlapEndEvent`].
//!
//! Observers must still check that `other` is alive and is not the trigger
//! entity itself: an entity may be despawned between the detector run and
//! the observer run.
//!
//! # Related
//!
//! - [`crate::components::boxcollider::TriggerVolume`] – the watched zone
//! - [`crate::resources::overlappairs::OverlapPairs`] – pairs seen last frame

use bevy_ecs::prelude::*;

/// A body entered a trigger volume.
#[derive(Event, Debug, Clone, Copy, PartialEq, Eq)]
pub struct OverlapBeginEvent {
    /// Entity owning the trigger volume.
    pub trigger: Entity,
    /// Entity whose body entered.
    pub other: Entity,
}

/// A body left a trigger volume.
#[derive(Event, Debug, Clone, Copy, PartialEq, Eq)]
pub struct OverlapEndEvent {
    pub trigger: Entity,
    pub other: Entity,
}
