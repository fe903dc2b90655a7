//! Scripted input.
//!
//! Applies the active [`InputScript`] keyframe of each actor: velocity on its
//! [`RigidBody`], facing on its [`Rotation`] and the push intent on its
//! [`Pusher`]. Runs first in the frame, before movement.

use bevy_ecs::prelude::*;

use crate::components::inputscript::InputScript;
use crate::components::pushblock::Pusher;
use crate::components::rigidbody::RigidBody;
use crate::components::rotation::Rotation;
use crate::resources::worldtime::WorldTime;

pub fn input_script_system(
    time: Res<WorldTime>,
    mut query: Query<(
        &InputScript,
        &mut RigidBody,
        Option<&mut Rotation>,
        Option<&mut Pusher>,
    )>,
) {
    for (script, mut rigidbody, rotation, pusher) in query.iter_mut() {
        let Some(key) = script.active(time.elapsed) else {
            continue;
        };
        rigidbody.velocity = key.velocity;
        if let Some(mut rotation) = rotation {
            rotation.degrees = key.yaw;
        }
        if let Some(mut pusher) = pusher {
            pusher.wants_push = key.push;
        }
    }
}
