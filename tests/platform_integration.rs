//! Moving platform integration tests: motion driven by the schedule and
//! riders tracked through overlap events.

use bevy_ecs::prelude::*;
use glam::Vec3;

use stagegimmicks::components::boxcollider::{BoxCollider, TriggerVolume};
use stagegimmicks::components::mapposition::MapPosition;
use stagegimmicks::components::platform::{MotionPattern, MovingPlatform};
use stagegimmicks::resources::overlappairs::OverlapPairs;
use stagegimmicks::resources::worldtime::WorldTime;
use stagegimmicks::systems::overlap::overlap_detector;
use stagegimmicks::systems::platform::{
    moving_platform_system, platform_rider_enter_observer, platform_rider_exit_observer,
};
use stagegimmicks::systems::time::update_world_time;

const EPSILON: f32 = 1e-3;

fn approx_eq(a: f32, b: f32) -> bool {
    (a - b).abs() < EPSILON
}

fn make_world() -> World {
    let mut world = World::new();
    world.insert_resource(WorldTime::default());
    world.insert_resource(OverlapPairs::default());
    world.add_observer(platform_rider_enter_observer);
    world.add_observer(platform_rider_exit_observer);
    world.flush();
    world
}

fn tick(world: &mut World, schedule: &mut Schedule, dt: f32) {
    update_world_time(world, dt);
    schedule.run(world);
}

fn platform_schedule() -> Schedule {
    let mut schedule = Schedule::default();
    schedule.add_systems((moving_platform_system, overlap_detector).chain());
    schedule
}

/// Platform at the origin moving +X at 50 units/s; slab top at z=10 with a
/// 20 unit standing zone above it.
fn spawn_platform(world: &mut World, carry: bool) -> Entity {
    let platform = MovingPlatform::initialize(Vec3::ZERO, MotionPattern::HorizontalX, 100.0, Vec3::ZERO)
        .with_speed(50.0)
        .with_carry_riders(carry);
    world
        .spawn((
            MapPosition::new(0.0, 0.0, 0.0),
            BoxCollider::new(50.0, 50.0, 10.0),
            TriggerVolume::new(50.0, 50.0, 10.0).with_offset(Vec3::new(0.0, 0.0, 20.0)),
            platform,
        ))
        .id()
}

fn spawn_rider(world: &mut World) -> Entity {
    world
        .spawn((MapPosition::new(0.0, 0.0, 30.0), BoxCollider::new(10.0, 10.0, 20.0)))
        .id()
}

#[test]
fn platform_carries_rider_by_its_displacement() {
    let mut world = make_world();
    let mut schedule = platform_schedule();
    let platform = spawn_platform(&mut world, true);
    let rider = spawn_rider(&mut world);

    // The rider is picked up at the end of the first frame.
    tick(&mut world, &mut schedule, 0.1);
    assert!(world.get::<MovingPlatform>(platform).unwrap().riders.contains(&rider));
    assert!(approx_eq(world.get::<MapPosition>(rider).unwrap().pos.x, 0.0));

    for _ in 0..4 {
        tick(&mut world, &mut schedule, 0.1);
    }

    let platform_x = world.get::<MapPosition>(platform).unwrap().pos.x;
    let rider_pos = world.get::<MapPosition>(rider).unwrap().pos;
    assert!(approx_eq(platform_x, 25.0));
    assert!(approx_eq(rider_pos.x, 20.0));
    assert!(approx_eq(rider_pos.z, 30.0));
}

#[test]
fn platform_without_carry_leaves_rider_in_place() {
    let mut world = make_world();
    let mut schedule = platform_schedule();
    let platform = spawn_platform(&mut world, false);
    let rider = spawn_rider(&mut world);

    for _ in 0..5 {
        tick(&mut world, &mut schedule, 0.1);
    }

    assert!(world.get::<MovingPlatform>(platform).unwrap().riders.contains(&rider));
    assert!(approx_eq(world.get::<MapPosition>(rider).unwrap().pos.x, 0.0));
}

#[test]
fn rider_stepping_off_is_dropped() {
    let mut world = make_world();
    let mut schedule = platform_schedule();
    let platform = spawn_platform(&mut world, true);
    let rider = spawn_rider(&mut world);

    tick(&mut world, &mut schedule, 0.1);
    world.get_mut::<MapPosition>(rider).unwrap().pos = Vec3::new(0.0, 500.0, 30.0);
    tick(&mut world, &mut schedule, 0.1);

    assert!(world.get::<MovingPlatform>(platform).unwrap().riders.is_empty());
    let before = world.get::<MapPosition>(rider).unwrap().pos;
    tick(&mut world, &mut schedule, 0.1);
    assert_eq!(world.get::<MapPosition>(rider).unwrap().pos, before);
}

#[test]
fn despawned_rider_is_skipped_then_removed() {
    let mut world = make_world();
    let mut schedule = platform_schedule();
    let platform = spawn_platform(&mut world, true);
    let rider = spawn_rider(&mut world);

    tick(&mut world, &mut schedule, 0.1);
    world.despawn(rider);
    tick(&mut world, &mut schedule, 0.1);

    assert!(world.get::<MovingPlatform>(platform).unwrap().riders.is_empty());
    assert!(approx_eq(world.get::<MapPosition>(platform).unwrap().pos.x, 10.0));
}

#[test]
fn platform_does_not_ride_itself() {
    let mut world = make_world();
    let mut schedule = platform_schedule();
    // Zone centred on the platform's own body.
    let entity = world
        .spawn((
            MapPosition::new(0.0, 0.0, 0.0),
            BoxCollider::new(50.0, 50.0, 10.0),
            TriggerVolume::new(50.0, 50.0, 10.0),
            MovingPlatform::initialize(Vec3::ZERO, MotionPattern::VerticalZ, 100.0, Vec3::ZERO),
        ))
        .id();

    tick(&mut world, &mut schedule, 0.1);

    assert!(world.get::<MovingPlatform>(entity).unwrap().riders.is_empty());
    assert!(world.resource::<OverlapPairs>().is_empty());
}

#[test]
fn platform_dwells_then_returns() {
    let mut world = make_world();
    let mut schedule = platform_schedule();
    let entity = world
        .spawn((
            MapPosition::new(0.0, 0.0, 0.0),
            MovingPlatform::initialize(Vec3::ZERO, MotionPattern::HorizontalX, 10.0, Vec3::ZERO)
                .with_speed(100.0)
                .with_wait_time(0.45),
        ))
        .id();

    // Arrives in one frame, then dwells for five frames.
    tick(&mut world, &mut schedule, 0.1);
    assert!(approx_eq(world.get::<MapPosition>(entity).unwrap().pos.x, 10.0));
    for _ in 0..5 {
        tick(&mut world, &mut schedule, 0.1);
    }
    assert!(approx_eq(world.get::<MapPosition>(entity).unwrap().pos.x, 10.0));
    assert_eq!(world.get::<MovingPlatform>(entity).unwrap().direction, -1);

    tick(&mut world, &mut schedule, 0.05);
    assert!(approx_eq(world.get::<MapPosition>(entity).unwrap().pos.x, 5.0));
}
