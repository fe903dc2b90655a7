use bevy_ecs::prelude::*;

use crate::components::dormant::Dormant;
use crate::components::mapposition::MapPosition;
use crate::components::rigidbody::RigidBody;
use crate::resources::worldtime::WorldTime;

pub fn movement(
    mut query: Query<(&mut MapPosition, &RigidBody), Without<Dormant>>,
    time: Res<WorldTime>,
) {
    for (mut position, rigidbody) in query.iter_mut() {
        position.translate(rigidbody.displacement(time.delta));
    }
}
