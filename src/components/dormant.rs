//! Dormant entity marker component.
//!
//! An entity with [`Dormant`] is out of the world without being despawned:
//! overlap detection, ray queries and swept moves all skip it. Pooled
//! gimmicks (the collapsing floor) go dormant instead of being destroyed and
//! come back by removing the marker.

use bevy_ecs::prelude::Component;

#[derive(Component, Clone, Copy, Debug, Default)]
pub struct Dormant;
