//! Push block systems.
//!
//! A push runs in three chained steps every frame:
//!
//! 1. [`pusher_detect_system`] – a pusher that is not pushing casts a ray
//!    along its facing and locks onto the first hit if it is [`Pushable`].
//! 2. [`push_session_system`] – holding push on an eligible target starts a
//!    session (the pusher slows down, the block records its pusher);
//!    letting go ends it.
//! 3. [`push_follow_system`] – the pusher's horizontal displacement since
//!    last frame is forwarded to its block as a swept move against [`Solid`]
//!    colliders. A blocking hit shortens the move to the hit fraction.
//!
//! Pusher and block never block each other during the sweep.

use bevy_ecs::prelude::*;
use glam::{Quat, Vec3};
use log::{debug, info};

use crate::components::boxcollider::{BoxCollider, Solid};
use crate::components::dormant::Dormant;
use crate::components::drive::is_nearly_zero;
use crate::components::mapposition::MapPosition;
use crate::components::pushblock::{PushBlock, Pushable, Pusher};
use crate::components::rigidbody::RigidBody;
use crate::components::rotation::Rotation;

/// Nearest collider hit by a ray, as `(entity, distance)`.
pub fn raycast<'a>(
    colliders: impl IntoIterator<Item = (Entity, &'a MapPosition, &'a BoxCollider)>,
    origin: Vec3,
    dir: Vec3,
    max_distance: f32,
    ignore: &[Entity],
) -> Option<(Entity, f32)> {
    colliders
        .into_iter()
        .filter(|(entity, _, _)| !ignore.contains(entity))
        .filter_map(|(entity, position, collider)| {
            collider
                .ray_hit(position.pos, origin, dir, max_distance)
                .map(|distance| (entity, distance))
        })
        .min_by(|a, b| a.1.total_cmp(&b.1))
}

/// Portion of `delta` a block at `block_pos` can travel before hitting one
/// of `obstacles`.
pub fn move_with_pusher<'a>(
    block_pos: Vec3,
    collider: &BoxCollider,
    delta: Vec3,
    obstacles: impl IntoIterator<Item = (Entity, &'a MapPosition, &'a BoxCollider)>,
    ignore: &[Entity],
) -> Vec3 {
    let hit = obstacles
        .into_iter()
        .filter(|(entity, _, _)| !ignore.contains(entity))
        .filter_map(|(_, position, other)| collider.sweep(block_pos, delta, other, position.pos))
        .min_by(|a, b| a.total_cmp(b));
    PushBlock::clamp_to_hit(delta, hit)
}

pub fn pusher_detect_system(
    mut pushers: Query<(Entity, &MapPosition, &Rotation, &mut Pusher)>,
    colliders: Query<(Entity, &MapPosition, &BoxCollider), Without<Dormant>>,
    pushables: Query<(), With<Pushable>>,
) {
    for (entity, position, rotation, mut pusher) in pushers.iter_mut() {
        if pusher.pushing {
            continue;
        }
        let hit = raycast(
            colliders.iter(),
            position.pos,
            rotation.forward(),
            pusher.push_distance,
            &[entity],
        );
        let target = hit
            .map(|(hit_entity, _)| hit_entity)
            .filter(|hit_entity| pushables.contains(*hit_entity));
        if target != pusher.target_block {
            debug!("Pusher {:?} target now {:?}", entity, target);
            pusher.target_block = target;
        }
    }
}

pub fn push_session_system(
    mut pushers: Query<(Entity, &MapPosition, &mut Pusher, Option<&mut RigidBody>)>,
    mut blocks: Query<(&MapPosition, Option<&Rotation>, &mut PushBlock), Without<Dormant>>,
) {
    for (entity, position, mut pusher, rigidbody) in pushers.iter_mut() {
        if pusher.pushing {
            let block_gone = pusher
                .target_block
                .is_none_or(|block| !blocks.contains(block));
            if pusher.wants_push && !block_gone {
                continue;
            }
            pusher.pushing = false;
            if let Some(block) = pusher.target_block {
                if let Ok((_, _, mut push_block)) = blocks.get_mut(block) {
                    push_block.stop_pushing();
                }
            }
            if let Some(mut rigidbody) = rigidbody {
                rigidbody.speed_scale = 1.0;
            }
            info!("Pusher {:?} stopped pushing {:?}", entity, pusher.target_block);
            continue;
        }

        if !pusher.wants_push {
            continue;
        }
        let Some(block) = pusher.target_block else {
            continue;
        };
        let Ok((block_pos, block_rot, mut push_block)) = blocks.get_mut(block) else {
            continue;
        };
        if push_block.being_pushed && push_block.pusher != Some(entity) {
            continue;
        }
        let rotation = block_rot.map_or(Quat::IDENTITY, |r| r.quat());
        if !push_block.can_be_pushed_from(block_pos.pos, rotation, position.pos) {
            continue;
        }
        pusher.pushing = true;
        push_block.start_pushing(entity);
        if let Some(mut rigidbody) = rigidbody {
            rigidbody.speed_scale = pusher.push_speed_scale;
        }
        info!("Pusher {:?} started pushing {:?}", entity, block);
    }
}

pub fn push_follow_system(
    mut pushers: Query<(Entity, &MapPosition, &mut Pusher), Without<PushBlock>>,
    mut bodies: ParamSet<(
        Query<(Entity, &MapPosition, &BoxCollider), (With<Solid>, Without<Dormant>)>,
        Query<(&mut MapPosition, &BoxCollider, &PushBlock), (With<PushBlock>, Without<Pusher>)>,
    )>,
) {
    let mut moves: Vec<(Entity, Entity, Vec3)> = Vec::new();
    for (entity, position, mut pusher) in pushers.iter_mut() {
        let delta = pusher.take_displacement(position.pos);
        if !pusher.pushing || is_nearly_zero(delta) {
            continue;
        }
        if let Some(block) = pusher.target_block {
            moves.push((entity, block, delta));
        }
    }

    for (pusher, block, delta) in moves {
        let (block_pos, collider) = {
            let blocks = bodies.p1();
            let Ok((position, collider, push_block)) = blocks.get(block) else {
                continue;
            };
            if push_block.pusher != Some(pusher) {
                continue;
            }
            (position.pos, *collider)
        };
        let allowed = move_with_pusher(
            block_pos,
            &collider,
            delta,
            bodies.p0().iter(),
            &[block, pusher],
        );
        if allowed != delta {
            debug!("Block {:?} blocked, moved {:?} of {:?}", block, allowed, delta);
        }
        if let Ok((mut position, _, _)) = bodies.p1().get_mut(block) {
            position.translate(allowed);
        }
    }
}
