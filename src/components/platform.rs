//! Moving platform component.
//!
//! A [`MovingPlatform`] either shuttles between its start pose and an end
//! pose derived from its [`MotionPattern`], dwelling at each end, or orbits
//! its start pose on one of the three axis planes.
//!
//! # How It Works
//!
//! 1. [`MovingPlatform::initialize`] records the start pose and derives the
//!    end pose (or orbit centre) once. It is never recomputed.
//! 2. Every frame [`moving_platform_system`] calls [`MovingPlatform::step`]
//!    with the current position and applies the resulting displacement to
//!    the platform and, when `carry_riders` is set, to every rider.
//! 3. Overlap observers keep the rider set up to date.
//!
//! Riders are a membership set only; the platform never owns them and skips
//! riders that no longer exist.
//!
//! [`moving_platform_system`]: crate::systems::platform::moving_platform_system

use std::f32::consts::TAU;

use bevy_ecs::prelude::{Component, Entity};
use glam::Vec3;
use rustc_hash::FxHashSet;
use serde::{Deserialize, Serialize};

use super::drive::{ARRIVAL_EPSILON, move_towards};

pub const DEFAULT_DISTANCE: f32 = 500.0;
pub const DEFAULT_SPEED: f32 = 200.0;
pub const DEFAULT_WAIT_TIME: f32 = 1.0;

/// Shape of a platform's path.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum MotionPattern {
    HorizontalX,
    #[default]
    HorizontalY,
    VerticalZ,
    DiagonalXY,
    DiagonalXZ,
    DiagonalYZ,
    CircleXY,
    CircleXZ,
    CircleYZ,
    /// End pose is start plus a caller-supplied offset.
    Custom,
}

impl MotionPattern {
    pub fn is_circular(self) -> bool {
        matches!(self, Self::CircleXY | Self::CircleXZ | Self::CircleYZ)
    }

    /// Offset from start to end pose. `None` for orbits.
    pub fn end_offset(self, distance: f32, custom_offset: Vec3) -> Option<Vec3> {
        let half = distance / std::f32::consts::SQRT_2;
        match self {
            Self::HorizontalX => Some(Vec3::new(distance, 0.0, 0.0)),
            Self::HorizontalY => Some(Vec3::new(0.0, distance, 0.0)),
            Self::VerticalZ => Some(Vec3::new(0.0, 0.0, distance)),
            Self::DiagonalXY => Some(Vec3::new(half, half, 0.0)),
            Self::DiagonalXZ => Some(Vec3::new(half, 0.0, half)),
            Self::DiagonalYZ => Some(Vec3::new(0.0, half, half)),
            Self::Custom => Some(custom_offset),
            Self::CircleXY | Self::CircleXZ | Self::CircleYZ => None,
        }
    }

    /// Point on the orbit plane at `angle`, relative to the centre.
    fn orbit_offset(self, angle: f32, radius: f32) -> Vec3 {
        let (s, c) = angle.sin_cos();
        match self {
            Self::CircleXY => Vec3::new(c * radius, s * radius, 0.0),
            Self::CircleXZ => Vec3::new(c * radius, 0.0, s * radius),
            Self::CircleYZ => Vec3::new(0.0, c * radius, s * radius),
            _ => Vec3::ZERO,
        }
    }
}

#[derive(Component, Debug, Clone)]
pub struct MovingPlatform {
    pub pattern: MotionPattern,
    /// Travel distance, or orbit radius for circular patterns.
    pub distance: f32,
    pub custom_offset: Vec3,
    /// Units per second along the path.
    pub speed: f32,
    /// Dwell at each end before reversing. Ignored by orbits.
    pub wait_time: f32,
    pub auto_start: bool,
    pub carry_riders: bool,
    pub start_position: Vec3,
    pub end_position: Option<Vec3>,
    pub circle_center: Vec3,
    /// Orbit phase in radians, kept in `[0, 2π)`.
    pub circle_angle: f32,
    /// +1 heading to the end pose, -1 heading back to the start pose.
    pub direction: i8,
    pub waiting: bool,
    pub wait_timer: f32,
    pub riders: FxHashSet<Entity>,
}

impl MovingPlatform {
    /// Build a platform at `start` and derive its end pose from `pattern`.
    pub fn initialize(start: Vec3, pattern: MotionPattern, distance: f32, custom_offset: Vec3) -> Self {
        let mut platform = Self {
            pattern,
            distance,
            custom_offset,
            speed: DEFAULT_SPEED,
            wait_time: DEFAULT_WAIT_TIME,
            auto_start: true,
            carry_riders: true,
            start_position: start,
            end_position: None,
            circle_center: start,
            circle_angle: 0.0,
            direction: 1,
            waiting: false,
            wait_timer: 0.0,
            riders: FxHashSet::default(),
        };
        platform.end_position = pattern.end_offset(distance, custom_offset).map(|o| start + o);
        platform
    }

    pub fn with_speed(mut self, speed: f32) -> Self {
        self.speed = speed;
        self
    }

    pub fn with_wait_time(mut self, wait_time: f32) -> Self {
        self.wait_time = wait_time;
        self
    }

    pub fn with_carry_riders(mut self, carry: bool) -> Self {
        self.carry_riders = carry;
        self
    }

    /// A platform that does not auto start dwells once before its first
    /// departure toward the end pose.
    pub fn with_auto_start(mut self, auto_start: bool) -> Self {
        self.auto_start = auto_start;
        if !auto_start && !self.pattern.is_circular() {
            self.waiting = true;
            self.wait_timer = 0.0;
            self.direction = -1;
        }
        self
    }

    /// Where the linear motion is currently heading.
    pub fn current_target(&self) -> Vec3 {
        if self.direction == 1 {
            self.end_position.unwrap_or(self.start_position)
        } else {
            self.start_position
        }
    }

    /// Advance one frame from `current`, returning the new position.
    pub fn step(&mut self, current: Vec3, dt: f32) -> Vec3 {
        if self.pattern.is_circular() {
            self.step_circular(dt)
        } else {
            self.step_linear(current, dt)
        }
    }

    fn step_linear(&mut self, current: Vec3, dt: f32) -> Vec3 {
        if self.waiting {
            self.wait_timer += dt;
            if self.wait_timer >= self.wait_time {
                self.waiting = false;
                self.wait_timer = 0.0;
                self.direction = -self.direction;
            }
            return current;
        }

        let target = self.current_target();
        let next = move_towards(current, target, self.speed * dt);
        if next.distance(target) < ARRIVAL_EPSILON {
            self.waiting = true;
            self.wait_timer = 0.0;
            return target;
        }
        next
    }

    fn step_circular(&mut self, dt: f32) -> Vec3 {
        let angular_speed = self.speed / self.distance;
        self.circle_angle = (self.circle_angle + angular_speed * dt).rem_euclid(TAU);
        // rem_euclid can round up to exactly TAU for tiny negative inputs.
        if self.circle_angle >= TAU {
            self.circle_angle = 0.0;
        }
        self.circle_center + self.pattern.orbit_offset(self.circle_angle, self.distance)
    }

    /// Track an entity standing on the platform. Returns true if it was new.
    pub fn add_rider(&mut self, me: Entity, other: Entity) -> bool {
        if other == me {
            return false;
        }
        self.riders.insert(other)
    }

    /// Stop tracking an entity. Returns true if it was tracked.
    pub fn remove_rider(&mut self, me: Entity, other: Entity) -> bool {
        if other == me {
            return false;
        }
        self.riders.remove(&other)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPSILON: f32 = 1e-3;

    fn vec_approx_eq(a: Vec3, b: Vec3) -> bool {
        (a - b).abs().max_element() < EPSILON
    }

    #[test]
    fn test_axis_patterns_add_distance() {
        let start = Vec3::new(10.0, 20.0, 30.0);
        let x = MovingPlatform::initialize(start, MotionPattern::HorizontalX, 500.0, Vec3::ZERO);
        let y = MovingPlatform::initialize(start, MotionPattern::HorizontalY, 500.0, Vec3::ZERO);
        let z = MovingPlatform::initialize(start, MotionPattern::VerticalZ, 500.0, Vec3::ZERO);
        assert_eq!(x.end_position, Some(Vec3::new(510.0, 20.0, 30.0)));
        assert_eq!(y.end_position, Some(Vec3::new(10.0, 520.0, 30.0)));
        assert_eq!(z.end_position, Some(Vec3::new(10.0, 20.0, 530.0)));
    }

    #[test]
    fn test_diagonal_patterns_split_distance() {
        let h = 100.0 / 2.0_f32.sqrt();
        let xy = MovingPlatform::initialize(Vec3::ZERO, MotionPattern::DiagonalXY, 100.0, Vec3::ZERO);
        let xz = MovingPlatform::initialize(Vec3::ZERO, MotionPattern::DiagonalXZ, 100.0, Vec3::ZERO);
        let yz = MovingPlatform::initialize(Vec3::ZERO, MotionPattern::DiagonalYZ, 100.0, Vec3::ZERO);
        assert!(vec_approx_eq(xy.end_position.unwrap(), Vec3::new(h, h, 0.0)));
        assert!(vec_approx_eq(xz.end_position.unwrap(), Vec3::new(h, 0.0, h)));
        assert!(vec_approx_eq(yz.end_position.unwrap(), Vec3::new(0.0, h, h)));
        assert!((xy.end_position.unwrap().length() - 100.0).abs() < EPSILON);
    }

    #[test]
    fn test_custom_pattern_uses_offset() {
        let p = MovingPlatform::initialize(
            Vec3::new(1.0, 1.0, 1.0),
            MotionPattern::Custom,
            999.0,
            Vec3::new(0.0, -50.0, 25.0),
        );
        assert_eq!(p.end_position, Some(Vec3::new(1.0, -49.0, 26.0)));
    }

    #[test]
    fn test_circular_pattern_records_center() {
        let start = Vec3::new(5.0, 6.0, 7.0);
        let p = MovingPlatform::initialize(start, MotionPattern::CircleXZ, 100.0, Vec3::ZERO);
        assert_eq!(p.end_position, None);
        assert_eq!(p.circle_center, start);
        assert_eq!(p.circle_angle, 0.0);
    }

    #[test]
    fn test_end_pose_is_stable_across_steps() {
        let mut p = MovingPlatform::initialize(Vec3::ZERO, MotionPattern::HorizontalX, 100.0, Vec3::ZERO);
        let end = p.end_position;
        let mut pos = Vec3::ZERO;
        for _ in 0..100 {
            pos = p.step(pos, 0.1);
        }
        assert_eq!(p.end_position, end);
    }

    #[test]
    fn test_linear_step_never_overshoots() {
        let mut p = MovingPlatform::initialize(Vec3::ZERO, MotionPattern::HorizontalX, 100.0, Vec3::ZERO)
            .with_speed(30.0);
        let mut pos = Vec3::ZERO;
        let mut prior = 100.0_f32;
        for _ in 0..3 {
            pos = p.step(pos, 1.0);
            let remaining = pos.distance(Vec3::new(100.0, 0.0, 0.0));
            assert!((remaining - (prior - 30.0).max(0.0)).abs() < EPSILON);
            prior = remaining;
        }
        assert!(!p.waiting);
        pos = p.step(pos, 1.0);
        assert_eq!(pos, Vec3::new(100.0, 0.0, 0.0));
        assert!(p.waiting);
    }

    #[test]
    fn test_snaps_inside_arrival_epsilon() {
        let mut p = MovingPlatform::initialize(Vec3::ZERO, MotionPattern::HorizontalX, 100.0, Vec3::ZERO)
            .with_speed(99.5);
        let pos = p.step(Vec3::ZERO, 1.0);
        assert_eq!(pos, Vec3::new(100.0, 0.0, 0.0));
        assert!(p.waiting);
        assert_eq!(p.wait_timer, 0.0);
    }

    #[test]
    fn test_direction_flips_after_wait() {
        let mut p = MovingPlatform::initialize(Vec3::ZERO, MotionPattern::HorizontalX, 10.0, Vec3::ZERO)
            .with_speed(100.0)
            .with_wait_time(1.0);
        let mut pos = p.step(Vec3::ZERO, 0.5);
        assert!(p.waiting);
        pos = p.step(pos, 0.5);
        assert!(p.waiting);
        assert_eq!(p.direction, 1);
        pos = p.step(pos, 0.5);
        assert!(!p.waiting);
        assert_eq!(p.direction, -1);
        assert_eq!(pos, Vec3::new(10.0, 0.0, 0.0));
        pos = p.step(pos, 0.05);
        assert!(vec_approx_eq(pos, Vec3::new(5.0, 0.0, 0.0)));
    }

    #[test]
    fn test_no_auto_start_dwells_then_departs_toward_end() {
        let mut p = MovingPlatform::initialize(Vec3::ZERO, MotionPattern::HorizontalX, 100.0, Vec3::ZERO)
            .with_wait_time(1.0)
            .with_auto_start(false);
        assert!(p.waiting);
        let mut pos = p.step(Vec3::ZERO, 1.0);
        assert_eq!(pos, Vec3::ZERO);
        assert_eq!(p.direction, 1);
        pos = p.step(pos, 0.1);
        assert!(pos.x > 0.0);
    }

    #[test]
    fn test_circular_keeps_radius_and_phase_range() {
        let center = Vec3::new(100.0, 200.0, 300.0);
        for pattern in [MotionPattern::CircleXY, MotionPattern::CircleXZ, MotionPattern::CircleYZ] {
            let mut p = MovingPlatform::initialize(center, pattern, 50.0, Vec3::ZERO).with_speed(400.0);
            let mut pos = center;
            for _ in 0..500 {
                pos = p.step(pos, 0.033);
                assert!((pos.distance(center) - 50.0).abs() < EPSILON);
                assert!(p.circle_angle >= 0.0 && p.circle_angle < TAU);
            }
            assert!(!p.waiting);
        }
    }

    #[test]
    fn test_circular_plane_axes() {
        let mut p = MovingPlatform::initialize(Vec3::ZERO, MotionPattern::CircleYZ, 10.0, Vec3::ZERO)
            .with_speed(10.0 * std::f32::consts::FRAC_PI_2);
        // Quarter turn in one second.
        let pos = p.step(Vec3::ZERO, 1.0);
        assert!(vec_approx_eq(pos, Vec3::new(0.0, 0.0, 10.0)));
    }

    #[test]
    fn test_rider_membership() {
        let mut world = bevy_ecs::world::World::new();
        let me = world.spawn_empty().id();
        let other = world.spawn_empty().id();
        let mut p = MovingPlatform::initialize(Vec3::ZERO, MotionPattern::HorizontalX, 10.0, Vec3::ZERO);
        assert!(!p.add_rider(me, me));
        assert!(p.add_rider(me, other));
        assert!(!p.add_rider(me, other));
        assert_eq!(p.riders.len(), 1);
        assert!(p.remove_rider(me, other));
        assert!(!p.remove_rider(me, other));
        assert!(p.riders.is_empty());
    }
}
