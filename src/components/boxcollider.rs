//! Axis-aligned box colliders and the geometric queries built on them.
//!
//! [`BoxCollider`] is the body of an entity: it is what trigger volumes
//! detect, what rays hit, and what blocks swept moves. [`TriggerVolume`] is
//! the zone a gimmick watches for overlaps and never blocks anything.
//! [`Solid`] marks colliders that stop swept moves.

use bevy_ecs::prelude::Component;
use glam::Vec3;

/// Axis-aligned box around an entity position.
#[derive(Debug, Clone, Copy, PartialEq, Component)]
pub struct BoxCollider {
    pub half_extents: Vec3,
    pub offset: Vec3,
}

/// Overlap zone attached to a gimmick.
#[derive(Debug, Clone, Copy, PartialEq, Component)]
pub struct TriggerVolume {
    pub half_extents: Vec3,
    pub offset: Vec3,
}

/// Marks a collider that blocks swept moves.
#[derive(Debug, Clone, Copy, Default, Component)]
pub struct Solid;

/// Returns (min, max) of a box centred at `position + offset`.
fn bounds(half_extents: Vec3, offset: Vec3, position: Vec3) -> (Vec3, Vec3) {
    let center = position + offset;
    let h = half_extents.abs();
    (center - h, center + h)
}

/// Strict AABB overlap; touching faces do not count.
fn strictly_overlaps(a: (Vec3, Vec3), b: (Vec3, Vec3)) -> bool {
    a.0.x < b.1.x
        && a.1.x > b.0.x
        && a.0.y < b.1.y
        && a.1.y > b.0.y
        && a.0.z < b.1.z
        && a.1.z > b.0.z
}

impl BoxCollider {
    pub fn new(half_x: f32, half_y: f32, half_z: f32) -> Self {
        Self {
            half_extents: Vec3::new(half_x, half_y, half_z),
            offset: Vec3::ZERO,
        }
    }

    pub fn with_offset(mut self, offset: Vec3) -> Self {
        self.offset = offset;
        self
    }

    pub fn aabb(&self, position: Vec3) -> (Vec3, Vec3) {
        bounds(self.half_extents, self.offset, position)
    }

    pub fn overlaps(&self, position: Vec3, other: &Self, other_position: Vec3) -> bool {
        strictly_overlaps(self.aabb(position), other.aabb(other_position))
    }

    /// Distance along `dir` (unit length) at which a ray from `origin` enters
    /// this box, if it does so within `max_distance`.
    ///
    /// A ray that starts inside the box reports a hit at distance 0.
    pub fn ray_hit(&self, position: Vec3, origin: Vec3, dir: Vec3, max_distance: f32) -> Option<f32> {
        let (min, max) = self.aabb(position);
        let mut t_enter = 0.0_f32;
        let mut t_exit = max_distance;
        for axis in 0..3 {
            let o = origin[axis];
            let d = dir[axis];
            if d.abs() < f32::EPSILON {
                if o < min[axis] || o > max[axis] {
                    return None;
                }
                continue;
            }
            let inv = 1.0 / d;
            let mut t0 = (min[axis] - o) * inv;
            let mut t1 = (max[axis] - o) * inv;
            if t0 > t1 {
                std::mem::swap(&mut t0, &mut t1);
            }
            t_enter = t_enter.max(t0);
            t_exit = t_exit.min(t1);
            if t_enter > t_exit {
                return None;
            }
        }
        Some(t_enter)
    }

    /// Time of impact, as a fraction of `delta` in `[0, 1)`, of this box
    /// moving by `delta` from `position` into `other` at `other_position`.
    ///
    /// Boxes that only touch, or that already overlap at the start, are not
    /// reported (the latter so a block can always be pulled free).
    pub fn sweep(
        &self,
        position: Vec3,
        delta: Vec3,
        other: &BoxCollider,
        other_position: Vec3,
    ) -> Option<f32> {
        let a = self.aabb(position);
        let b = other.aabb(other_position);
        if strictly_overlaps(a, b) {
            return None;
        }
        let mut t_enter = f32::NEG_INFINITY;
        let mut t_exit = f32::INFINITY;
        for axis in 0..3 {
            let d = delta[axis];
            if d == 0.0 {
                // No motion on this axis: must already be strictly inside the slab.
                if !(a.0[axis] < b.1[axis] && a.1[axis] > b.0[axis]) {
                    return None;
                }
                continue;
            }
            let (enter, exit) = if d > 0.0 {
                ((b.0[axis] - a.1[axis]) / d, (b.1[axis] - a.0[axis]) / d)
            } else {
                ((b.1[axis] - a.0[axis]) / d, (b.0[axis] - a.1[axis]) / d)
            };
            t_enter = t_enter.max(enter);
            t_exit = t_exit.min(exit);
        }
        if t_enter >= t_exit || t_exit <= 0.0 || !(0.0..1.0).contains(&t_enter) {
            return None;
        }
        Some(t_enter)
    }
}

impl TriggerVolume {
    pub fn new(half_x: f32, half_y: f32, half_z: f32) -> Self {
        Self {
            half_extents: Vec3::new(half_x, half_y, half_z),
            offset: Vec3::ZERO,
        }
    }

    pub fn with_offset(mut self, offset: Vec3) -> Self {
        self.offset = offset;
        self
    }

    pub fn aabb(&self, position: Vec3) -> (Vec3, Vec3) {
        bounds(self.half_extents, self.offset, position)
    }

    /// Whether a body collider at `body_position` is inside this zone.
    pub fn contains_body(&self, position: Vec3, body: &BoxCollider, body_position: Vec3) -> bool {
        strictly_overlaps(self.aabb(position), body.aabb(body_position))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPSILON: f32 = 1e-5;

    fn approx_eq(a: f32, b: f32) -> bool {
        (a - b).abs() < EPSILON
    }

    #[test]
    fn test_overlap_is_strict() {
        let a = BoxCollider::new(1.0, 1.0, 1.0);
        let b = BoxCollider::new(1.0, 1.0, 1.0);
        assert!(a.overlaps(Vec3::ZERO, &b, Vec3::new(1.5, 0.0, 0.0)));
        assert!(!a.overlaps(Vec3::ZERO, &b, Vec3::new(2.0, 0.0, 0.0)));
    }

    #[test]
    fn test_offset_moves_bounds() {
        let a = BoxCollider::new(1.0, 1.0, 1.0).with_offset(Vec3::new(0.0, 0.0, 5.0));
        let (min, max) = a.aabb(Vec3::ZERO);
        assert!(approx_eq(min.z, 4.0));
        assert!(approx_eq(max.z, 6.0));
    }

    #[test]
    fn test_ray_hits_box_in_front() {
        let b = BoxCollider::new(10.0, 10.0, 10.0);
        let hit = b.ray_hit(Vec3::new(100.0, 0.0, 0.0), Vec3::ZERO, Vec3::X, 150.0);
        assert!(approx_eq(hit.unwrap(), 90.0));
    }

    #[test]
    fn test_ray_misses_box_out_of_range() {
        let b = BoxCollider::new(10.0, 10.0, 10.0);
        assert!(b.ray_hit(Vec3::new(200.0, 0.0, 0.0), Vec3::ZERO, Vec3::X, 150.0).is_none());
        assert!(b.ray_hit(Vec3::new(-100.0, 0.0, 0.0), Vec3::ZERO, Vec3::X, 150.0).is_none());
    }

    #[test]
    fn test_ray_parallel_outside_slab_misses() {
        let b = BoxCollider::new(10.0, 10.0, 10.0);
        assert!(b.ray_hit(Vec3::new(50.0, 30.0, 0.0), Vec3::ZERO, Vec3::X, 150.0).is_none());
    }

    #[test]
    fn test_sweep_reports_fraction_before_contact() {
        let mover = BoxCollider::new(1.0, 1.0, 1.0);
        let wall = BoxCollider::new(1.0, 1.0, 1.0);
        // Gap of 2 units between faces, moving 4 units.
        let t = mover
            .sweep(Vec3::ZERO, Vec3::new(4.0, 0.0, 0.0), &wall, Vec3::new(4.0, 0.0, 0.0))
            .unwrap();
        assert!(approx_eq(t, 0.5));
    }

    #[test]
    fn test_sweep_ignores_touching_on_static_axis() {
        // Block resting on a floor slides along it without being blocked.
        let block = BoxCollider::new(1.0, 1.0, 1.0);
        let floor = BoxCollider::new(50.0, 50.0, 1.0);
        let hit = block.sweep(
            Vec3::new(0.0, 0.0, 2.0),
            Vec3::new(5.0, 0.0, 0.0),
            &floor,
            Vec3::ZERO,
        );
        assert!(hit.is_none());
    }

    #[test]
    fn test_sweep_out_of_reach_is_none() {
        let mover = BoxCollider::new(1.0, 1.0, 1.0);
        let wall = BoxCollider::new(1.0, 1.0, 1.0);
        let hit = mover.sweep(Vec3::ZERO, Vec3::new(1.0, 0.0, 0.0), &wall, Vec3::new(10.0, 0.0, 0.0));
        assert!(hit.is_none());
    }

    #[test]
    fn test_sweep_moving_away_is_none() {
        let mover = BoxCollider::new(1.0, 1.0, 1.0);
        let wall = BoxCollider::new(1.0, 1.0, 1.0);
        let hit = mover.sweep(Vec3::ZERO, Vec3::new(-5.0, 0.0, 0.0), &wall, Vec3::new(3.0, 0.0, 0.0));
        assert!(hit.is_none());
    }

    #[test]
    fn test_trigger_contains_body() {
        let zone = TriggerVolume::new(50.0, 50.0, 20.0).with_offset(Vec3::new(0.0, 0.0, 20.0));
        let body = BoxCollider::new(10.0, 10.0, 40.0);
        assert!(zone.contains_body(Vec3::ZERO, &body, Vec3::new(0.0, 0.0, 60.0)));
        assert!(!zone.contains_body(Vec3::ZERO, &body, Vec3::new(0.0, 0.0, 100.0)));
    }
}
