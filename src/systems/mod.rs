//! Engine systems and observers.
//!
//! This module groups all ECS systems that advance the simulation, plus the
//! observers that react to overlap, timer, button and sequence events.
//!
//! Submodules overview
//! - [`button`] – button occupancy observers and target drive
//! - [`collapse`] – collapsing floor shake, fall and respawn
//! - [`inputscript`] – apply scripted input to actors
//! - [`movement`] – integrate positions from rigid body velocities and time
//! - [`overlap`] – trigger volume overlap detection and event emission
//! - [`platform`] – moving platforms and rider tracking
//! - [`push`] – ray detection, push sessions and swept block moves
//! - [`sequence`] – button sequence judging and door drive
//! - [`time`] – update simulation time and delta, process timers

pub mod button;
pub mod collapse;
pub mod inputscript;
pub mod movement;
pub mod overlap;
pub mod platform;
pub mod push;
pub mod sequence;
pub mod time;
