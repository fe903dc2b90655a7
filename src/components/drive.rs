//! Constant-rate drive toward a goal pose.
//!
//! [`TargetDrive`] caches the two poses a driven object travels between (a
//! door opened by a button, a gate opened by a solved sequence) and moves it
//! at a fixed speed. [`move_towards`] is the shared interpolation law, also
//! used by moving platforms.

use glam::Vec3;
use log::info;

/// Component-wise tolerance below which a displacement counts as no motion.
pub const NEARLY_ZERO: f32 = 1e-4;

/// Distance under which a driven object counts as arrived.
pub const ARRIVAL_EPSILON: f32 = 1.0;

/// Move from `current` toward `target` by at most `max_step`.
///
/// Never overshoots: if the remaining distance is within `max_step`, the
/// result is exactly `target`. A non-positive step leaves `current` alone
/// unless it is already at the target.
pub fn move_towards(current: Vec3, target: Vec3, max_step: f32) -> Vec3 {
    let delta = target - current;
    let dist = delta.length();
    if dist <= max_step || dist == 0.0 {
        return target;
    }
    if max_step <= 0.0 {
        return current;
    }
    current + delta / dist * max_step
}

pub fn is_nearly_zero(v: Vec3) -> bool {
    v.abs().max_element() <= NEARLY_ZERO
}

/// Poses and speed of an object driven between "rest" and "moved".
#[derive(Debug, Clone, PartialEq)]
pub struct TargetDrive {
    /// Offset from the rest pose to the moved pose.
    pub offset: Vec3,
    /// Units per second.
    pub speed: f32,
    /// Rest and moved poses, captured the first time the target is seen.
    pub poses: Option<(Vec3, Vec3)>,
    /// Whether the last step ended on the goal; logs once per arrival.
    pub reached: bool,
}

impl TargetDrive {
    pub fn new(offset: Vec3, speed: f32) -> Self {
        Self {
            offset,
            speed,
            poses: None,
            reached: false,
        }
    }

    /// Capture rest/moved poses from the target's current position.
    /// Later calls keep the first capture.
    pub fn capture(&mut self, rest: Vec3) -> (Vec3, Vec3) {
        *self.poses.get_or_insert((rest, rest + self.offset))
    }

    /// Step `current` toward the moved pose (`engaged`) or back to rest.
    pub fn step(&mut self, current: Vec3, engaged: bool, dt: f32) -> Vec3 {
        let (rest, moved) = self.capture(current);
        let goal = if engaged { moved } else { rest };
        let next = move_towards(current, goal, self.speed * dt);
        if next.distance(goal) < ARRIVAL_EPSILON {
            if !self.reached {
                info!("Driven target reached {:?}", goal);
                self.reached = true;
            }
        } else {
            self.reached = false;
        }
        next
    }
}
