//! ECS components for entities.
//!
//! This module groups all component types that can be attached to entities in
//! a level: positions and colliders shared by every participant, plus the
//! state of each gimmick.
//!
//! Submodules overview:
//! - [`boxcollider`] – axis-aligned bodies, trigger volumes and the `Solid` tag
//! - [`button`] – pressure button with occupancy count and optional driven target
//! - [`collapsingfloor`] – floor that shakes, falls and comes back
//! - [`dormant`] – marker for pooled entities currently out of the world
//! - [`drive`] – constant-rate drive toward a goal pose
//! - [`inputscript`] – keyframed input for headless runs
//! - [`mapposition`] – world-space position (pivot) for an entity
//! - [`platform`] – moving platform with motion patterns and riders
//! - [`pushblock`] – push block, `Pushable` capability and the `Pusher` side
//! - [`rigidbody`] – kinematic body storing velocity
//! - [`rotation`] – yaw around the vertical axis
//! - [`sequence`] – ordered button sequence that opens a door
//! - [`timer`] – one-shot deferred callback

pub mod boxcollider;
pub mod button;
pub mod collapsingfloor;
pub mod dormant;
pub mod drive;
pub mod inputscript;
pub mod mapposition;
pub mod platform;
pub mod pushblock;
pub mod rigidbody;
pub mod rotation;
pub mod sequence;
pub mod timer;
