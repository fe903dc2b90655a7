//! Overlap pairs seen on the previous frame.
//!
//! The overlap detector diffs the pairs it finds each frame against this set
//! to decide which begin/end events to trigger.

use bevy_ecs::prelude::{Entity, Resource};
use rustc_hash::FxHashSet;

/// Set of `(trigger, other)` pairs currently intersecting.
#[derive(Debug, Clone, Default, Resource)]
pub struct OverlapPairs {
    pub pairs: FxHashSet<(Entity, Entity)>,
}

impl OverlapPairs {
    pub fn contains(&self, trigger: Entity, other: Entity) -> bool {
        self.pairs.contains(&(trigger, other))
    }

    pub fn len(&self) -> usize {
        self.pairs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }
}
