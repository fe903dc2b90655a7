//! ECS resources made available to systems.
//!
//! This module groups the long-lived data injected into the ECS world and
//! accessed by systems during execution.
//!
//! Overview
//! - `gimmickconfig` – default tuning for every gimmick, loaded from INI
//! - `levellayout` – serializable description of a level's entities
//! - `overlappairs` – trigger/body pairs intersecting on the previous frame
//! - `worldtime` – simulation time and delta
pub mod gimmickconfig;
pub mod levellayout;
pub mod overlappairs;
pub mod worldtime;
