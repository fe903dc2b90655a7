//! Level setup and the per-frame schedule.
//!
//! [`spawn_level`] turns a [`LevelLayout`] into entities, filling unset
//! per-gimmick values from the [`GimmickConfig`]. [`register_observers`]
//! installs every event observer and [`build_schedule`] chains the frame:
//!
//! 1. attach new sequences to their buttons
//! 2. fire expired timers
//! 3. apply scripted input, then integrate movement
//! 4. push detection, push sessions, block follow
//! 5. platforms (carrying riders), floor shake
//! 6. button targets and sequence doors
//! 7. overlap detection, whose events are handled before the frame ends

use bevy_ecs::observer::Observer;
use bevy_ecs::prelude::*;
use glam::Vec3;
use log::info;

use crate::components::boxcollider::{BoxCollider, Solid, TriggerVolume};
use crate::components::button::PressureButton;
use crate::components::collapsingfloor::CollapsingFloor;
use crate::components::dormant::Dormant;
use crate::components::inputscript::InputScript;
use crate::components::mapposition::MapPosition;
use crate::components::platform::MovingPlatform;
use crate::components::pushblock::{PushBlock, Pushable, Pusher};
use crate::components::rigidbody::RigidBody;
use crate::components::rotation::Rotation;
use crate::components::sequence::ButtonSequence;
use crate::resources::gimmickconfig::GimmickConfig;
use crate::resources::levellayout::LevelLayout;
use crate::resources::overlappairs::OverlapPairs;
use crate::resources::worldtime::WorldTime;
use crate::systems::button::{button_enter_observer, button_exit_observer, button_target_system};
use crate::systems::collapse::{
    collapse_shake_system, collapse_timer_observer, collapse_trigger_observer,
};
use crate::systems::inputscript::input_script_system;
use crate::systems::movement::movement;
use crate::systems::overlap::overlap_detector;
use crate::systems::platform::{
    moving_platform_system, platform_rider_enter_observer, platform_rider_exit_observer,
};
use crate::systems::push::{push_follow_system, push_session_system, pusher_detect_system};
use crate::systems::sequence::{
    attach_sequence_buttons, sequence_button_pressed_observer, sequence_button_released_observer,
    sequence_door_system,
};
use crate::systems::time::{update_timers, update_world_time};

/// Height of the zone above a platform, floor or button that detects bodies
/// standing on it.
const STAND_ZONE_HEIGHT: f32 = 20.0;

/// Entities created for a level, in layout order.
#[derive(Debug, Clone, Default)]
pub struct LevelEntities {
    pub actors: Vec<Entity>,
    pub solids: Vec<Entity>,
    pub doors: Vec<Entity>,
    pub platforms: Vec<Entity>,
    pub floors: Vec<Entity>,
    pub buttons: Vec<Entity>,
    pub sequences: Vec<Entity>,
    pub push_blocks: Vec<Entity>,
}

/// Zone sitting on top of a box with the given half extents.
fn stand_zone(half_extents: Vec3) -> TriggerVolume {
    let half_height = STAND_ZONE_HEIGHT * 0.5;
    TriggerVolume::new(half_extents.x, half_extents.y, half_height)
        .with_offset(Vec3::new(0.0, 0.0, half_extents.z + half_height))
}

fn body(half_extents: Vec3) -> BoxCollider {
    BoxCollider::new(half_extents.x, half_extents.y, half_extents.z)
}

/// Create a world holding the resources every system expects.
pub fn setup_world(config: &GimmickConfig) -> World {
    let mut world = World::new();
    world.insert_resource(WorldTime::default().with_time_scale(config.time_scale));
    world.insert_resource(OverlapPairs::default());
    world.insert_resource(config.clone());
    world
}

/// Spawn every entity described by `layout`.
pub fn spawn_level(world: &mut World, layout: &LevelLayout, config: &GimmickConfig) -> LevelEntities {
    let mut spawned = LevelEntities::default();

    for solid in layout.solids.iter() {
        let entity = world
            .spawn((MapPosition::from_vec(solid.position), body(solid.half_extents), Solid))
            .id();
        spawned.solids.push(entity);
    }

    for door in layout.doors.iter() {
        let entity = world
            .spawn((MapPosition::from_vec(door.position), body(door.half_extents), Solid))
            .id();
        spawned.doors.push(entity);
    }

    for desc in layout.platforms.iter() {
        let platform = MovingPlatform::initialize(
            desc.position,
            desc.pattern,
            desc.distance.unwrap_or(config.platform_distance),
            desc.custom_offset.unwrap_or(Vec3::new(0.0, config.platform_distance, 0.0)),
        )
        .with_speed(desc.speed.unwrap_or(config.platform_speed))
        .with_wait_time(desc.wait_time.unwrap_or(config.platform_wait_time))
        .with_carry_riders(desc.carry_riders.unwrap_or(config.platform_carry_riders))
        .with_auto_start(desc.auto_start.unwrap_or(config.platform_auto_start));
        let entity = world
            .spawn((
                MapPosition::from_vec(desc.position),
                body(desc.half_extents),
                stand_zone(desc.half_extents),
                Solid,
                platform,
            ))
            .id();
        spawned.platforms.push(entity);
    }

    for desc in layout.floors.iter() {
        let floor = CollapsingFloor::new(desc.position)
            .with_shake(
                desc.shake_amplitude.unwrap_or(config.shake_amplitude),
                desc.shake_frequency.unwrap_or(config.shake_frequency),
            )
            .with_delays(
                desc.delete_delay.unwrap_or(config.delete_delay),
                desc.respawn_delay.unwrap_or(config.respawn_delay),
            );
        let entity = world
            .spawn((
                MapPosition::from_vec(desc.position),
                Rotation::default(),
                body(desc.half_extents),
                stand_zone(desc.half_extents),
                Solid,
                floor,
            ))
            .id();
        spawned.floors.push(entity);
    }

    for desc in layout.buttons.iter() {
        let mut button = PressureButton::new().with_return_to_original(
            desc.return_to_original
                .unwrap_or(config.button_return_to_original),
        );
        button.press_depth = desc.press_depth.unwrap_or(config.button_press_depth);
        if let Some(door) = desc.target.and_then(|i| spawned.doors.get(i)) {
            button = button.with_target(
                *door,
                desc.move_offset.unwrap_or(config.button_move_offset),
                desc.move_speed.unwrap_or(config.button_move_speed),
            );
        }
        let entity = world
            .spawn((
                MapPosition::from_vec(desc.position),
                stand_zone(desc.half_extents),
                button,
            ))
            .id();
        spawned.buttons.push(entity);
    }

    for desc in layout.sequences.iter() {
        let buttons: Vec<Entity> = desc
            .buttons
            .iter()
            .filter_map(|i| spawned.buttons.get(*i).copied())
            .collect();
        let mut sequence = ButtonSequence::new(buttons)
            .with_reset_on_failure(desc.reset_on_failure.unwrap_or(config.reset_on_failure))
            .with_reset_after_success(
                desc.reset_after_success
                    .unwrap_or(config.reset_after_success),
            );
        if let Some(door) = desc.door.and_then(|i| spawned.doors.get(i)) {
            sequence = sequence.with_door(
                *door,
                desc.door_offset.unwrap_or(config.door_offset),
                desc.door_speed.unwrap_or(config.door_speed),
            );
        }
        spawned.sequences.push(world.spawn(sequence).id());
    }

    for desc in layout.push_blocks.iter() {
        let block = PushBlock::new()
            .with_push_dir(desc.push_dir.unwrap_or(Vec3::X))
            .with_push_angle(desc.push_angle.unwrap_or(config.push_angle));
        let entity = world
            .spawn((
                MapPosition::from_vec(desc.position),
                Rotation::new(desc.yaw),
                body(desc.half_extents),
                Solid,
                Pushable,
                block,
            ))
            .id();
        spawned.push_blocks.push(entity);
    }

    for desc in layout.actors.iter() {
        let mut actor = world.spawn((
            MapPosition::from_vec(desc.position),
            Rotation::new(desc.yaw),
            body(desc.half_extents),
            RigidBody::new(),
        ));
        if !desc.script.is_empty() {
            actor.insert(InputScript::new(desc.script.clone()));
        }
        if desc.pusher {
            let mut pusher = Pusher::new();
            pusher.push_distance = desc.push_distance.unwrap_or(config.push_distance);
            pusher.push_speed_scale = config.push_speed_scale;
            actor.insert(pusher);
        }
        spawned.actors.push(actor.id());
    }

    info!(
        "Spawned level '{}': {} actors, {} platforms, {} floors, {} buttons, {} sequences, {} push blocks",
        layout.name,
        spawned.actors.len(),
        spawned.platforms.len(),
        spawned.floors.len(),
        spawned.buttons.len(),
        spawned.sequences.len(),
        spawned.push_blocks.len()
    );
    spawned
}

/// Register every gimmick observer.
pub fn register_observers(world: &mut World) {
    world.spawn(Observer::new(platform_rider_enter_observer));
    world.spawn(Observer::new(platform_rider_exit_observer));
    world.spawn(Observer::new(collapse_trigger_observer));
    world.spawn(Observer::new(collapse_timer_observer));
    world.spawn(Observer::new(button_enter_observer));
    world.spawn(Observer::new(button_exit_observer));
    world.spawn(Observer::new(sequence_button_pressed_observer));
    world.spawn(Observer::new(sequence_button_released_observer));
    // Ensure the observers are registered before any system triggers events.
    world.flush();
}

/// The per-frame schedule, in a fixed order.
pub fn build_schedule() -> Schedule {
    let mut update = Schedule::default();
    update.add_systems(
        (
            attach_sequence_buttons,
            update_timers,
            input_script_system,
            movement,
            pusher_detect_system,
            push_session_system,
            push_follow_system,
            moving_platform_system,
            collapse_shake_system,
            button_target_system,
            sequence_door_system,
            overlap_detector,
        )
            .chain(),
    );
    update
}

/// Advance `frames` frames of `delta` seconds each.
pub fn run_frames(world: &mut World, schedule: &mut Schedule, frames: u32, delta: f32) {
    for _ in 0..frames {
        update_world_time(world, delta);
        schedule.run(world);
        world.clear_trackers();
    }
}

/// Log where every gimmick ended up.
pub fn log_summary(world: &World, entities: &LevelEntities) {
    let time = *world.resource::<WorldTime>();
    info!(
        "Ran {} frames, {:.2}s simulated",
        time.frame_count, time.elapsed
    );
    for entity in entities.platforms.iter() {
        if let (Some(pos), Some(platform)) = (
            world.get::<MapPosition>(*entity),
            world.get::<MovingPlatform>(*entity),
        ) {
            info!(
                "Platform {:?} at {:?} carrying {} riders",
                entity,
                pos.pos,
                platform.riders.len()
            );
        }
    }
    for entity in entities.floors.iter() {
        if let Some(floor) = world.get::<CollapsingFloor>(*entity) {
            info!(
                "Floor {:?} {:?}, generation {}, dormant {}",
                entity,
                floor.state,
                floor.generation,
                world.get::<Dormant>(*entity).is_some()
            );
        }
    }
    for entity in entities.sequences.iter() {
        if let Some(sequence) = world.get::<ButtonSequence>(*entity) {
            info!(
                "Sequence {:?} step {}/{}, door open {}, failures {}",
                entity,
                sequence.current_step,
                sequence.buttons.len(),
                sequence.door_open,
                sequence.failures
            );
        }
    }
    for entity in entities.push_blocks.iter() {
        if let Some(pos) = world.get::<MapPosition>(*entity) {
            info!("Push block {:?} at {:?}", entity, pos.pos);
        }
    }
}
