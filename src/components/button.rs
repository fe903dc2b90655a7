//! Pressure button component.
//!
//! A [`PressureButton`] counts the bodies standing in its trigger volume. It
//! is pressed while that count is above zero and reports only the edges
//! (0→1 pressed, 1→0 released) to its sequence manager, if it has one.
//!
//! A button may also drive a target (a door or block) between a rest pose
//! and `rest + offset` through a [`TargetDrive`]. With
//! `return_to_original` unset, the target stays wherever it is once the
//! button is released.

use bevy_ecs::prelude::{Component, Entity};
use glam::Vec3;

use super::drive::TargetDrive;

pub const DEFAULT_MOVE_OFFSET: Vec3 = Vec3::new(400.0, 0.0, 0.0);
pub const DEFAULT_MOVE_SPEED: f32 = 300.0;
pub const DEFAULT_PRESS_DEPTH: f32 = 10.0;

/// Occupancy transition produced by an enter/exit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ButtonEdge {
    Pressed,
    Released,
}

#[derive(Component, Debug, Clone)]
pub struct PressureButton {
    /// Bodies currently inside the trigger volume.
    pub occupancy: u32,
    pub pressed: bool,
    pub manager: Option<Entity>,
    pub target: Option<Entity>,
    pub drive: TargetDrive,
    pub return_to_original: bool,
    /// How far the cap sinks while pressed.
    pub press_depth: f32,
    /// Cap offset from its rest pose.
    pub visual_offset: Vec3,
}

impl Default for PressureButton {
    fn default() -> Self {
        Self::new()
    }
}

impl PressureButton {
    pub fn new() -> Self {
        Self {
            occupancy: 0,
            pressed: false,
            manager: None,
            target: None,
            drive: TargetDrive::new(DEFAULT_MOVE_OFFSET, DEFAULT_MOVE_SPEED),
            return_to_original: true,
            press_depth: DEFAULT_PRESS_DEPTH,
            visual_offset: Vec3::ZERO,
        }
    }

    pub fn with_target(mut self, target: Entity, offset: Vec3, speed: f32) -> Self {
        self.target = Some(target);
        self.drive = TargetDrive::new(offset, speed);
        self
    }

    pub fn with_return_to_original(mut self, value: bool) -> Self {
        self.return_to_original = value;
        self
    }

    pub fn set_manager(&mut self, manager: Entity) {
        self.manager = Some(manager);
    }

    pub fn is_pressed(&self) -> bool {
        self.pressed
    }

    /// A body entered the trigger volume.
    pub fn enter(&mut self) -> Option<ButtonEdge> {
        self.occupancy += 1;
        if self.pressed {
            return None;
        }
        self.pressed = true;
        self.visual_offset.z -= self.press_depth;
        Some(ButtonEdge::Pressed)
    }

    /// A body left the trigger volume.
    pub fn exit(&mut self) -> Option<ButtonEdge> {
        self.occupancy = self.occupancy.saturating_sub(1);
        if self.occupancy > 0 || !self.pressed {
            return None;
        }
        self.pressed = false;
        self.visual_offset.z += self.press_depth;
        Some(ButtonEdge::Released)
    }

    /// Whether the target should be driven this frame, and toward which pose.
    /// `Some(true)` means the pressed pose, `Some(false)` the rest pose.
    pub fn drive_goal(&self) -> Option<bool> {
        if self.pressed {
            Some(true)
        } else if self.return_to_original {
            Some(false)
        } else {
            None
        }
    }
}
