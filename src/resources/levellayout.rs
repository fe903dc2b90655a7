//! Level layout description.
//!
//! A [`LevelLayout`] lists every entity of a level in plain data so it can be
//! stored as JSON and turned into ECS entities by
//! [`spawn_level`](crate::game::spawn_level). Per-gimmick tuning fields are
//! optional; anything left out falls back to the
//! [`GimmickConfig`](crate::resources::gimmickconfig::GimmickConfig) values.
//!
//! Cross references (a sequence's buttons, a button's or sequence's door) are
//! indices into the corresponding lists and are checked by
//! [`LevelLayout::validate`].
//!
//! Vectors are written as `[x, y, z]` arrays.

use std::fs;
use std::path::{Path, PathBuf};

use glam::Vec3;
use log::info;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::components::inputscript::InputKey;
use crate::components::platform::MotionPattern;

#[derive(Debug, Error)]
pub enum LevelError {
    #[error("failed to read level file {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to write level file {path}: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid level json: {0}")]
    Json(#[from] serde_json::Error),
    #[error("{what} {index} refers to missing {kind} {target}")]
    BadReference {
        what: &'static str,
        index: usize,
        kind: &'static str,
        target: usize,
    },
}

fn default_actor_extents() -> Vec3 {
    Vec3::new(30.0, 30.0, 50.0)
}

fn default_block_extents() -> Vec3 {
    Vec3::new(50.0, 50.0, 50.0)
}

fn default_slab_extents() -> Vec3 {
    Vec3::new(100.0, 100.0, 10.0)
}

fn default_button_extents() -> Vec3 {
    Vec3::new(50.0, 50.0, 5.0)
}

/// A body that walks around: the player, or any scripted walker.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ActorDesc {
    pub position: Vec3,
    #[serde(default = "default_actor_extents")]
    pub half_extents: Vec3,
    #[serde(default)]
    pub yaw: f32,
    /// Keyframed input. Empty means the actor stands still.
    #[serde(default)]
    pub script: Vec<InputKey>,
    /// Whether the actor can push blocks.
    #[serde(default)]
    pub pusher: bool,
    #[serde(default)]
    pub push_distance: Option<f32>,
}

/// A static wall or floor piece that blocks pushed blocks.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SolidDesc {
    pub position: Vec3,
    #[serde(default = "default_block_extents")]
    pub half_extents: Vec3,
}

/// A solid moved by a button or sequence.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DoorDesc {
    pub position: Vec3,
    #[serde(default = "default_block_extents")]
    pub half_extents: Vec3,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlatformDesc {
    pub position: Vec3,
    #[serde(default = "default_slab_extents")]
    pub half_extents: Vec3,
    #[serde(default)]
    pub pattern: MotionPattern,
    #[serde(default)]
    pub distance: Option<f32>,
    #[serde(default)]
    pub custom_offset: Option<Vec3>,
    #[serde(default)]
    pub speed: Option<f32>,
    #[serde(default)]
    pub wait_time: Option<f32>,
    #[serde(default)]
    pub auto_start: Option<bool>,
    #[serde(default)]
    pub carry_riders: Option<bool>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FloorDesc {
    pub position: Vec3,
    #[serde(default = "default_slab_extents")]
    pub half_extents: Vec3,
    #[serde(default)]
    pub shake_amplitude: Option<f32>,
    #[serde(default)]
    pub shake_frequency: Option<f32>,
    #[serde(default)]
    pub delete_delay: Option<f32>,
    #[serde(default)]
    pub respawn_delay: Option<f32>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ButtonDesc {
    pub position: Vec3,
    #[serde(default = "default_button_extents")]
    pub half_extents: Vec3,
    /// Door index this button drives directly.
    #[serde(default)]
    pub target: Option<usize>,
    #[serde(default)]
    pub move_offset: Option<Vec3>,
    #[serde(default)]
    pub move_speed: Option<f32>,
    #[serde(default)]
    pub return_to_original: Option<bool>,
    #[serde(default)]
    pub press_depth: Option<f32>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SequenceDesc {
    /// Button indices in the order they must be pressed.
    pub buttons: Vec<usize>,
    #[serde(default)]
    pub door: Option<usize>,
    #[serde(default)]
    pub door_offset: Option<Vec3>,
    #[serde(default)]
    pub door_speed: Option<f32>,
    #[serde(default)]
    pub reset_on_failure: Option<bool>,
    #[serde(default)]
    pub reset_after_success: Option<bool>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PushBlockDesc {
    pub position: Vec3,
    #[serde(default = "default_block_extents")]
    pub half_extents: Vec3,
    #[serde(default)]
    pub yaw: f32,
    /// Local normal of the pushable face.
    #[serde(default)]
    pub push_dir: Option<Vec3>,
    #[serde(default)]
    pub push_angle: Option<f32>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LevelLayout {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub actors: Vec<ActorDesc>,
    #[serde(default)]
    pub solids: Vec<SolidDesc>,
    #[serde(default)]
    pub doors: Vec<DoorDesc>,
    #[serde(default)]
    pub platforms: Vec<PlatformDesc>,
    #[serde(default)]
    pub floors: Vec<FloorDesc>,
    #[serde(default)]
    pub buttons: Vec<ButtonDesc>,
    #[serde(default)]
    pub sequences: Vec<SequenceDesc>,
    #[serde(default)]
    pub push_blocks: Vec<PushBlockDesc>,
}

impl LevelLayout {
    /// Read and validate a layout from a JSON file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, LevelError> {
        let path = path.as_ref();
        let text = fs::read_to_string(path).map_err(|source| LevelError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        let layout = Self::from_json_str(&text)?;
        info!(
            "Loaded level '{}' from {:?}: {} actors, {} platforms, {} floors, {} buttons, {} push blocks",
            layout.name,
            path,
            layout.actors.len(),
            layout.platforms.len(),
            layout.floors.len(),
            layout.buttons.len(),
            layout.push_blocks.len()
        );
        Ok(layout)
    }

    pub fn from_json_str(text: &str) -> Result<Self, LevelError> {
        let layout: LevelLayout = serde_json::from_str(text)?;
        layout.validate()?;
        Ok(layout)
    }

    pub fn to_json_string(&self) -> Result<String, LevelError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn save(&self, path: impl AsRef<Path>) -> Result<(), LevelError> {
        let path = path.as_ref();
        let text = self.to_json_string()?;
        fs::write(path, text).map_err(|source| LevelError::Write {
            path: path.to_path_buf(),
            source,
        })?;
        info!("Saved level '{}' to {:?}", self.name, path);
        Ok(())
    }

    /// Check that every index reference points at an existing entry.
    pub fn validate(&self) -> Result<(), LevelError> {
        for (index, button) in self.buttons.iter().enumerate() {
            if let Some(target) = button.target.filter(|t| *t >= self.doors.len()) {
                return Err(LevelError::BadReference {
                    what: "button",
                    index,
                    kind: "door",
                    target,
                });
            }
        }
        for (index, sequence) in self.sequences.iter().enumerate() {
            if let Some(&target) = sequence.buttons.iter().find(|b| **b >= self.buttons.len()) {
                return Err(LevelError::BadReference {
                    what: "sequence",
                    index,
                    kind: "button",
                    target,
                });
            }
            if let Some(target) = sequence.door.filter(|t| *t >= self.doors.len()) {
                return Err(LevelError::BadReference {
                    what: "sequence",
                    index,
                    kind: "door",
                    target,
                });
            }
        }
        Ok(())
    }

    /// A small level with one of each gimmick, laid out in lanes along X.
    ///
    /// - lane y=-1000: a rider on a shuttling platform
    /// - lane y=-500: a walker stepping onto a collapsing floor
    /// - lane y=1000: a walker crossing three sequence buttons in order
    /// - lane y=2000: a pusher shoving a block into a wall
    pub fn demo() -> Self {
        let walk = |at: f32, vx: f32| InputKey {
            at,
            velocity: Vec3::new(vx, 0.0, 0.0),
            yaw: 0.0,
            push: false,
        };
        let push = |at: f32, vx: f32, held: bool| InputKey {
            at,
            velocity: Vec3::new(vx, 0.0, 0.0),
            yaw: 0.0,
            push: held,
        };
        let actor = |position: Vec3, script: Vec<InputKey>, pusher: bool| ActorDesc {
            position,
            half_extents: default_actor_extents(),
            yaw: 0.0,
            script,
            pusher,
            push_distance: None,
        };

        LevelLayout {
            name: "demo".to_string(),
            actors: vec![
                actor(Vec3::new(0.0, -1000.0, 60.0), Vec::new(), false),
                actor(
                    Vec3::new(300.0, -500.0, 60.0),
                    vec![walk(0.0, 200.0), walk(1.5, 0.0)],
                    false,
                ),
                actor(
                    Vec3::new(-300.0, 1000.0, 55.0),
                    vec![walk(0.0, 300.0), walk(3.5, 0.0)],
                    false,
                ),
                actor(
                    Vec3::new(-150.0, 2000.0, 50.0),
                    vec![push(0.0, 100.0, true), push(8.0, 0.0, false)],
                    true,
                ),
            ],
            solids: vec![SolidDesc {
                position: Vec3::new(400.0, 2000.0, 50.0),
                half_extents: Vec3::new(20.0, 200.0, 50.0),
            }],
            doors: vec![DoorDesc {
                position: Vec3::new(1000.0, 1000.0, 100.0),
                half_extents: Vec3::new(20.0, 100.0, 100.0),
            }],
            platforms: vec![PlatformDesc {
                position: Vec3::new(0.0, -1000.0, 0.0),
                half_extents: default_slab_extents(),
                pattern: MotionPattern::HorizontalX,
                distance: Some(400.0),
                custom_offset: None,
                speed: None,
                wait_time: None,
                auto_start: None,
                carry_riders: None,
            }],
            floors: vec![FloorDesc {
                position: Vec3::new(600.0, -500.0, 0.0),
                half_extents: default_slab_extents(),
                shake_amplitude: None,
                shake_frequency: None,
                delete_delay: None,
                respawn_delay: Some(3.0),
            }],
            buttons: [0.0, 300.0, 600.0]
                .into_iter()
                .map(|x| ButtonDesc {
                    position: Vec3::new(x, 1000.0, 0.0),
                    half_extents: default_button_extents(),
                    target: None,
                    move_offset: None,
                    move_speed: None,
                    return_to_original: None,
                    press_depth: None,
                })
                .collect(),
            sequences: vec![SequenceDesc {
                buttons: vec![0, 1, 2],
                door: Some(0),
                door_offset: Some(Vec3::new(0.0, 0.0, 300.0)),
                door_speed: None,
                reset_on_failure: None,
                reset_after_success: None,
            }],
            push_blocks: vec![PushBlockDesc {
                position: Vec3::new(0.0, 2000.0, 50.0),
                half_extents: default_block_extents(),
                yaw: 0.0,
                push_dir: None,
                push_angle: None,
            }],
        }
    }
}
