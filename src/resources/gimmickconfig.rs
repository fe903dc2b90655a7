//! Gimmick configuration resource.
//!
//! Author-time defaults for every gimmick, loaded from an INI configuration
//! file. Values set per entity in a level layout override these; anything a
//! layout leaves out falls back to them. Read-only once the level runs.
//!
//! # Configuration File Format
//!
//! ```ini
//! [simulation]
//! frames = 600
//! delta = 0.016666
//! time_scale = 1.0
//!
//! [platform]
//! distance = 500
//! speed = 200
//! wait_time = 1.0
//! auto_start = true
//! carry_riders = true
//!
//! [collapse]
//! shake_amplitude = 5
//! shake_frequency = 20
//! delete_delay = 2
//! respawn_delay = 0
//!
//! [button]
//! move_offset_x = 400
//! move_offset_y = 0
//! move_offset_z = 0
//! move_speed = 300
//! return_to_original = true
//! press_depth = 10
//!
//! [sequence]
//! door_offset_x = 400
//! door_offset_y = 0
//! door_offset_z = 0
//! door_speed = 200
//! reset_on_failure = true
//! reset_after_success = false
//!
//! [push]
//! push_angle = 45
//! push_power = 100
//! push_distance = 150
//! push_speed_scale = 0.5
//! ```

use bevy_ecs::prelude::*;
use configparser::ini::Ini;
use glam::Vec3;
use log::info;
use std::path::PathBuf;
use thiserror::Error;

use crate::components::button::{DEFAULT_MOVE_OFFSET, DEFAULT_MOVE_SPEED, DEFAULT_PRESS_DEPTH};
use crate::components::collapsingfloor::{
    DEFAULT_DELETE_DELAY, DEFAULT_RESPAWN_DELAY, DEFAULT_SHAKE_AMPLITUDE, DEFAULT_SHAKE_FREQUENCY,
};
use crate::components::platform::{DEFAULT_DISTANCE, DEFAULT_SPEED, DEFAULT_WAIT_TIME};
use crate::components::pushblock::{
    DEFAULT_PUSH_ANGLE, DEFAULT_PUSH_DISTANCE, DEFAULT_PUSH_POWER, DEFAULT_PUSH_SPEED_SCALE,
};
use crate::components::sequence::{DEFAULT_DOOR_OFFSET, DEFAULT_DOOR_SPEED};

const DEFAULT_FRAMES: u32 = 600;
const DEFAULT_DELTA: f32 = 1.0 / 60.0;
const DEFAULT_TIME_SCALE: f32 = 1.0;
const DEFAULT_CONFIG_PATH: &str = "./gimmicks.ini";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to load config file {path}: {reason}")]
    Load { path: PathBuf, reason: String },
    #[error("failed to parse config: {0}")]
    Parse(String),
    #[error("failed to save config file {path}: {source}")]
    Save {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Gimmick configuration resource.
#[derive(Resource, Debug, Clone, PartialEq)]
pub struct GimmickConfig {
    /// Frames a headless run advances.
    pub frames: u32,
    /// Fixed frame delta in seconds.
    pub delta: f32,
    pub time_scale: f32,

    pub platform_distance: f32,
    pub platform_speed: f32,
    pub platform_wait_time: f32,
    pub platform_auto_start: bool,
    pub platform_carry_riders: bool,

    pub shake_amplitude: f32,
    pub shake_frequency: f32,
    pub delete_delay: f32,
    pub respawn_delay: f32,

    pub button_move_offset: Vec3,
    pub button_move_speed: f32,
    pub button_return_to_original: bool,
    pub button_press_depth: f32,

    pub door_offset: Vec3,
    pub door_speed: f32,
    pub reset_on_failure: bool,
    pub reset_after_success: bool,

    pub push_angle: f32,
    pub push_power: f32,
    pub push_distance: f32,
    pub push_speed_scale: f32,

    /// Path to the configuration file.
    pub config_path: PathBuf,
}

impl Default for GimmickConfig {
    fn default() -> Self {
        Self::new()
    }
}

fn read_f32(config: &Ini, section: &str, key: &str, slot: &mut f32) {
    if let Some(v) = config.getfloat(section, key).ok().flatten() {
        *slot = v as f32;
    }
}

fn read_bool(config: &Ini, section: &str, key: &str, slot: &mut bool) {
    if let Some(v) = config.getbool(section, key).ok().flatten() {
        *slot = v;
    }
}

fn read_vec3(config: &Ini, section: &str, prefix: &str, slot: &mut Vec3) {
    read_f32(config, section, &format!("{prefix}_x"), &mut slot.x);
    read_f32(config, section, &format!("{prefix}_y"), &mut slot.y);
    read_f32(config, section, &format!("{prefix}_z"), &mut slot.z);
}

fn write_vec3(config: &mut Ini, section: &str, prefix: &str, v: Vec3) {
    config.set(section, &format!("{prefix}_x"), Some(v.x.to_string()));
    config.set(section, &format!("{prefix}_y"), Some(v.y.to_string()));
    config.set(section, &format!("{prefix}_z"), Some(v.z.to_string()));
}

impl GimmickConfig {
    /// Create a new configuration with the authored default values.
    pub fn new() -> Self {
        Self {
            frames: DEFAULT_FRAMES,
            delta: DEFAULT_DELTA,
            time_scale: DEFAULT_TIME_SCALE,
            platform_distance: DEFAULT_DISTANCE,
            platform_speed: DEFAULT_SPEED,
            platform_wait_time: DEFAULT_WAIT_TIME,
            platform_auto_start: true,
            platform_carry_riders: true,
            shake_amplitude: DEFAULT_SHAKE_AMPLITUDE,
            shake_frequency: DEFAULT_SHAKE_FREQUENCY,
            delete_delay: DEFAULT_DELETE_DELAY,
            respawn_delay: DEFAULT_RESPAWN_DELAY,
            button_move_offset: DEFAULT_MOVE_OFFSET,
            button_move_speed: DEFAULT_MOVE_SPEED,
            button_return_to_original: true,
            button_press_depth: DEFAULT_PRESS_DEPTH,
            door_offset: DEFAULT_DOOR_OFFSET,
            door_speed: DEFAULT_DOOR_SPEED,
            reset_on_failure: true,
            reset_after_success: false,
            push_angle: DEFAULT_PUSH_ANGLE,
            push_power: DEFAULT_PUSH_POWER,
            push_distance: DEFAULT_PUSH_DISTANCE,
            push_speed_scale: DEFAULT_PUSH_SPEED_SCALE,
            config_path: PathBuf::from(DEFAULT_CONFIG_PATH),
        }
    }

    /// Create a new configuration with a custom config file path.
    pub fn with_path(path: impl Into<PathBuf>) -> Self {
        Self {
            config_path: path.into(),
            ..Self::new()
        }
    }

    /// Load configuration from the INI file.
    ///
    /// Missing values retain their current (default) values.
    pub fn load_from_file(&mut self) -> Result<(), ConfigError> {
        let mut config = Ini::new();
        config.load(&self.config_path).map_err(|reason| ConfigError::Load {
            path: self.config_path.clone(),
            reason,
        })?;
        self.apply(&config);
        info!("Loaded gimmick config from {:?}", self.config_path);
        Ok(())
    }

    /// Load configuration from INI text.
    pub fn load_from_str(&mut self, text: &str) -> Result<(), ConfigError> {
        let mut config = Ini::new();
        config.read(text.to_string()).map_err(ConfigError::Parse)?;
        self.apply(&config);
        Ok(())
    }

    fn apply(&mut self, config: &Ini) {
        // [simulation] section
        if let Some(frames) = config.getuint("simulation", "frames").ok().flatten() {
            self.frames = frames as u32;
        }
        read_f32(config, "simulation", "delta", &mut self.delta);
        read_f32(config, "simulation", "time_scale", &mut self.time_scale);

        // [platform] section
        read_f32(config, "platform", "distance", &mut self.platform_distance);
        read_f32(config, "platform", "speed", &mut self.platform_speed);
        read_f32(config, "platform", "wait_time", &mut self.platform_wait_time);
        read_bool(config, "platform", "auto_start", &mut self.platform_auto_start);
        read_bool(config, "platform", "carry_riders", &mut self.platform_carry_riders);

        // [collapse] section
        read_f32(config, "collapse", "shake_amplitude", &mut self.shake_amplitude);
        read_f32(config, "collapse", "shake_frequency", &mut self.shake_frequency);
        read_f32(config, "collapse", "delete_delay", &mut self.delete_delay);
        read_f32(config, "collapse", "respawn_delay", &mut self.respawn_delay);

        // [button] section
        read_vec3(config, "button", "move_offset", &mut self.button_move_offset);
        read_f32(config, "button", "move_speed", &mut self.button_move_speed);
        read_bool(config, "button", "return_to_original", &mut self.button_return_to_original);
        read_f32(config, "button", "press_depth", &mut self.button_press_depth);

        // [sequence] section
        read_vec3(config, "sequence", "door_offset", &mut self.door_offset);
        read_f32(config, "sequence", "door_speed", &mut self.door_speed);
        read_bool(config, "sequence", "reset_on_failure", &mut self.reset_on_failure);
        read_bool(config, "sequence", "reset_after_success", &mut self.reset_after_success);

        // [push] section
        read_f32(config, "push", "push_angle", &mut self.push_angle);
        read_f32(config, "push", "push_power", &mut self.push_power);
        read_f32(config, "push", "push_distance", &mut self.push_distance);
        read_f32(config, "push", "push_speed_scale", &mut self.push_speed_scale);
        self.push_angle = self.push_angle.clamp(0.0, 180.0);
    }

    /// Save configuration to the INI file.
    ///
    /// Creates the file if it doesn't exist.
    pub fn save_to_file(&self) -> Result<(), ConfigError> {
        let mut config = Ini::new();

        config.set("simulation", "frames", Some(self.frames.to_string()));
        config.set("simulation", "delta", Some(self.delta.to_string()));
        config.set("simulation", "time_scale", Some(self.time_scale.to_string()));

        config.set("platform", "distance", Some(self.platform_distance.to_string()));
        config.set("platform", "speed", Some(self.platform_speed.to_string()));
        config.set("platform", "wait_time", Some(self.platform_wait_time.to_string()));
        config.set("platform", "auto_start", Some(self.platform_auto_start.to_string()));
        config.set("platform", "carry_riders", Some(self.platform_carry_riders.to_string()));

        config.set("collapse", "shake_amplitude", Some(self.shake_amplitude.to_string()));
        config.set("collapse", "shake_frequency", Some(self.shake_frequency.to_string()));
        config.set("collapse", "delete_delay", Some(self.delete_delay.to_string()));
        config.set("collapse", "respawn_delay", Some(self.respawn_delay.to_string()));

        write_vec3(&mut config, "button", "move_offset", self.button_move_offset);
        config.set("button", "move_speed", Some(self.button_move_speed.to_string()));
        config.set(
            "button",
            "return_to_original",
            Some(self.button_return_to_original.to_string()),
        );
        config.set("button", "press_depth", Some(self.button_press_depth.to_string()));

        write_vec3(&mut config, "sequence", "door_offset", self.door_offset);
        config.set("sequence", "door_speed", Some(self.door_speed.to_string()));
        config.set("sequence", "reset_on_failure", Some(self.reset_on_failure.to_string()));
        config.set(
            "sequence",
            "reset_after_success",
            Some(self.reset_after_success.to_string()),
        );

        config.set("push", "push_angle", Some(self.push_angle.to_string()));
        config.set("push", "push_power", Some(self.push_power.to_string()));
        config.set("push", "push_distance", Some(self.push_distance.to_string()));
        config.set("push", "push_speed_scale", Some(self.push_speed_scale.to_string()));

        config
            .write(&self.config_path)
            .map_err(|source| ConfigError::Save {
                path: self.config_path.clone(),
                source,
            })?;

        info!("Saved gimmick config to {:?}", self.config_path);

        Ok(())
    }
}
