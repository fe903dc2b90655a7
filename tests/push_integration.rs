//! Push block integration tests: ray detection, eligibility, push sessions
//! and swept follow moves against solid colliders.

use bevy_ecs::prelude::*;
use glam::Vec3;

use stagegimmicks::components::boxcollider::{BoxCollider, Solid};
use stagegimmicks::components::dormant::Dormant;
use stagegimmicks::components::mapposition::MapPosition;
use stagegimmicks::components::pushblock::{PushBlock, Pushable, Pusher};
use stagegimmicks::components::rigidbody::RigidBody;
use stagegimmicks::components::rotation::Rotation;
use stagegimmicks::resources::worldtime::WorldTime;
use stagegimmicks::systems::movement::movement;
use stagegimmicks::systems::push::{
    move_with_pusher, push_follow_system, push_session_system, pusher_detect_system, raycast,
};
use stagegimmicks::systems::time::update_world_time;

const EPSILON: f32 = 1e-2;

fn approx_eq(a: f32, b: f32) -> bool {
    (a - b).abs() < EPSILON
}

fn make_world() -> World {
    let mut world = World::new();
    world.insert_resource(WorldTime::default());
    world
}

fn push_schedule() -> Schedule {
    let mut schedule = Schedule::default();
    schedule.add_systems(
        (
            movement,
            pusher_detect_system,
            push_session_system,
            push_follow_system,
        )
            .chain(),
    );
    schedule
}

fn tick(world: &mut World, schedule: &mut Schedule) {
    update_world_time(world, 0.1);
    schedule.run(world);
}

fn spawn_block(world: &mut World, position: Vec3) -> Entity {
    world
        .spawn((
            MapPosition::from_vec(position),
            Rotation::default(),
            BoxCollider::new(50.0, 50.0, 50.0),
            Solid,
            Pushable,
            PushBlock::new(),
        ))
        .id()
}

fn spawn_wall(world: &mut World, x: f32) -> Entity {
    world
        .spawn((
            MapPosition::new(x, 0.0, 50.0),
            BoxCollider::new(20.0, 200.0, 50.0),
            Solid,
        ))
        .id()
}

fn spawn_pusher(world: &mut World, position: Vec3, yaw: f32, velocity: Vec3) -> Entity {
    let mut pusher = Pusher::new();
    pusher.wants_push = true;
    world
        .spawn((
            MapPosition::from_vec(position),
            Rotation::new(yaw),
            BoxCollider::new(30.0, 30.0, 50.0),
            RigidBody::with_velocity(velocity),
            pusher,
        ))
        .id()
}

#[test]
fn pusher_moves_block_until_the_wall() {
    let mut world = make_world();
    let mut schedule = push_schedule();
    let block = spawn_block(&mut world, Vec3::new(0.0, 0.0, 50.0));
    spawn_wall(&mut world, 300.0);
    let player = spawn_pusher(&mut world, Vec3::new(-150.0, 0.0, 50.0), 0.0, Vec3::new(100.0, 0.0, 0.0));

    tick(&mut world, &mut schedule);
    let pusher = world.get::<Pusher>(player).unwrap();
    assert_eq!(pusher.target_block, Some(block));
    assert!(pusher.pushing);
    assert!(approx_eq(world.get::<RigidBody>(player).unwrap().speed_scale, 0.5));
    let push_block = world.get::<PushBlock>(block).unwrap();
    assert!(push_block.being_pushed);
    assert_eq!(push_block.pusher, Some(player));
    // The session starts after this frame's move.
    assert!(approx_eq(world.get::<MapPosition>(block).unwrap().pos.x, 0.0));

    tick(&mut world, &mut schedule);
    assert!(approx_eq(world.get::<MapPosition>(block).unwrap().pos.x, 5.0));

    for _ in 0..60 {
        tick(&mut world, &mut schedule);
    }
    // Wall face at x=280, block half extent 50.
    let block_pos = world.get::<MapPosition>(block).unwrap().pos;
    assert!(approx_eq(block_pos.x, 230.0));
    assert!(approx_eq(block_pos.y, 0.0));
    assert!(approx_eq(block_pos.z, 50.0));
}

#[test]
fn letting_go_ends_the_session() {
    let mut world = make_world();
    let mut schedule = push_schedule();
    let block = spawn_block(&mut world, Vec3::new(0.0, 0.0, 50.0));
    let player = spawn_pusher(&mut world, Vec3::new(-150.0, 0.0, 50.0), 0.0, Vec3::new(100.0, 0.0, 0.0));

    for _ in 0..5 {
        tick(&mut world, &mut schedule);
    }
    world.get_mut::<Pusher>(player).unwrap().wants_push = false;
    tick(&mut world, &mut schedule);

    assert!(!world.get::<Pusher>(player).unwrap().pushing);
    assert!(approx_eq(world.get::<RigidBody>(player).unwrap().speed_scale, 1.0));
    let push_block = world.get::<PushBlock>(block).unwrap();
    assert!(!push_block.being_pushed);
    assert_eq!(push_block.pusher, None);

    let parked = world.get::<MapPosition>(block).unwrap().pos;
    tick(&mut world, &mut schedule);
    assert_eq!(world.get::<MapPosition>(block).unwrap().pos, parked);
}

#[test]
fn side_approach_is_not_eligible() {
    let mut world = make_world();
    let mut schedule = push_schedule();
    let block = spawn_block(&mut world, Vec3::new(0.0, 0.0, 50.0));
    // Standing on -Y, facing +Y: 90 degrees off the push face.
    let player = spawn_pusher(&mut world, Vec3::new(0.0, -150.0, 50.0), 90.0, Vec3::ZERO);

    for _ in 0..3 {
        tick(&mut world, &mut schedule);
    }

    let pusher = world.get::<Pusher>(player).unwrap();
    assert_eq!(pusher.target_block, Some(block));
    assert!(!pusher.pushing);
    assert!(!world.get::<PushBlock>(block).unwrap().being_pushed);
    assert!(approx_eq(world.get::<RigidBody>(player).unwrap().speed_scale, 1.0));
}

#[test]
fn ray_ignores_non_pushable_hits() {
    let mut world = make_world();
    let mut schedule = push_schedule();
    spawn_wall(&mut world, 0.0);
    let player = spawn_pusher(&mut world, Vec3::new(-100.0, 0.0, 50.0), 0.0, Vec3::ZERO);

    tick(&mut world, &mut schedule);

    let pusher = world.get::<Pusher>(player).unwrap();
    assert_eq!(pusher.target_block, None);
    assert!(!pusher.pushing);
}

#[test]
fn wall_in_front_of_block_hides_it() {
    let mut world = make_world();
    let mut schedule = push_schedule();
    spawn_block(&mut world, Vec3::new(100.0, 0.0, 50.0));
    spawn_wall(&mut world, 0.0);
    let player = spawn_pusher(&mut world, Vec3::new(-100.0, 0.0, 50.0), 0.0, Vec3::ZERO);

    tick(&mut world, &mut schedule);

    assert_eq!(world.get::<Pusher>(player).unwrap().target_block, None);
}

#[test]
fn dormant_block_is_not_detected() {
    let mut world = make_world();
    let mut schedule = push_schedule();
    let block = spawn_block(&mut world, Vec3::new(0.0, 0.0, 50.0));
    world.entity_mut(block).insert(Dormant);
    let player = spawn_pusher(&mut world, Vec3::new(-150.0, 0.0, 50.0), 0.0, Vec3::ZERO);

    tick(&mut world, &mut schedule);

    assert_eq!(world.get::<Pusher>(player).unwrap().target_block, None);
}

#[test]
fn out_of_reach_block_is_not_detected() {
    let mut world = make_world();
    let mut schedule = push_schedule();
    spawn_block(&mut world, Vec3::new(0.0, 0.0, 50.0));
    let player = spawn_pusher(&mut world, Vec3::new(-300.0, 0.0, 50.0), 0.0, Vec3::ZERO);

    tick(&mut world, &mut schedule);

    assert_eq!(world.get::<Pusher>(player).unwrap().target_block, None);
}

#[test]
fn raycast_returns_nearest_hit() {
    let mut world = World::new();
    let near = world.spawn_empty().id();
    let far = world.spawn_empty().id();
    let me = world.spawn_empty().id();
    let collider = BoxCollider::new(10.0, 10.0, 10.0);
    let near_pos = MapPosition::new(50.0, 0.0, 0.0);
    let far_pos = MapPosition::new(120.0, 0.0, 0.0);
    let my_pos = MapPosition::new(0.0, 0.0, 0.0);
    let colliders = vec![
        (far, &far_pos, &collider),
        (me, &my_pos, &collider),
        (near, &near_pos, &collider),
    ];

    let hit = raycast(colliders.clone(), Vec3::ZERO, Vec3::X, 200.0, &[me]);
    let (entity, distance) = hit.unwrap();
    assert_eq!(entity, near);
    assert!(approx_eq(distance, 40.0));

    assert!(raycast(colliders.clone(), Vec3::ZERO, Vec3::X, 30.0, &[me]).is_none());
    assert!(raycast(colliders, Vec3::ZERO, Vec3::Y, 200.0, &[me]).is_none());
}

#[test]
fn move_with_pusher_clamps_to_the_first_obstacle() {
    let mut world = World::new();
    let block = world.spawn_empty().id();
    let wall = world.spawn_empty().id();
    let pusher = world.spawn_empty().id();
    let collider = BoxCollider::new(10.0, 10.0, 10.0);
    let wall_collider = BoxCollider::new(5.0, 50.0, 50.0);
    let wall_pos = MapPosition::new(30.0, 0.0, 0.0);
    let pusher_pos = MapPosition::new(8.0, 0.0, 0.0);
    let obstacles = vec![(wall, &wall_pos, &wall_collider), (pusher, &pusher_pos, &collider)];

    // Gap of 15 between the block face and the wall.
    let allowed = move_with_pusher(Vec3::ZERO, &collider, Vec3::new(20.0, 0.0, 0.0), obstacles.clone(), &[block, pusher]);
    assert!(approx_eq(allowed.x, 15.0));

    let free = move_with_pusher(Vec3::ZERO, &collider, Vec3::new(-20.0, 0.0, 0.0), obstacles, &[block, pusher]);
    assert!(approx_eq(free.x, -20.0));
}
