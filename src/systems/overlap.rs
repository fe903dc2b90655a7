//! Overlap detection between trigger volumes and bodies.
//!
//! Each frame [`overlap_detector`] tests every [`TriggerVolume`] against every
//! [`BoxCollider`] of another entity, skipping [`Dormant`] entities on both
//! sides. The result is diffed against the pairs seen last frame, stored in
//! [`OverlapPairs`]:
//!
//! - pairs that disappeared trigger [`OverlapEndEvent`] (this includes pairs
//!   whose entity was despawned or went dormant),
//! - new pairs trigger [`OverlapBeginEvent`].
//!
//! End events are triggered before begin events, each batch in entity order.

use bevy_ecs::prelude::*;
use rustc_hash::FxHashSet;

use crate::components::boxcollider::{BoxCollider, TriggerVolume};
use crate::components::dormant::Dormant;
use crate::components::mapposition::MapPosition;
use crate::events::overlap::{OverlapBeginEvent, OverlapEndEvent};
use crate::resources::overlappairs::OverlapPairs;

pub fn overlap_detector(
    triggers: Query<(Entity, &MapPosition, &TriggerVolume), Without<Dormant>>,
    bodies: Query<(Entity, &MapPosition, &BoxCollider), Without<Dormant>>,
    mut pairs: ResMut<OverlapPairs>,
    mut commands: Commands,
) {
    let mut current: FxHashSet<(Entity, Entity)> = FxHashSet::default();
    for (trigger, trigger_pos, volume) in triggers.iter() {
        for (other, other_pos, body) in bodies.iter() {
            if trigger == other {
                continue;
            }
            if volume.contains_body(trigger_pos.pos, body, other_pos.pos) {
                current.insert((trigger, other));
            }
        }
    }

    let mut ended: Vec<(Entity, Entity)> = pairs.pairs.difference(&current).copied().collect();
    ended.sort();
    for (trigger, other) in ended {
        commands.trigger(OverlapEndEvent { trigger, other });
    }

    let mut begun: Vec<(Entity, Entity)> = current.difference(&pairs.pairs).copied().collect();
    begun.sort();
    for (trigger, other) in begun {
        commands.trigger(OverlapBeginEvent { trigger, other });
    }

    pairs.pairs = current;
}
