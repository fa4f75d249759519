//! Configuration loading and typed config structures for the room engine.
//!
//! The canonical configuration lives in `eunoia-config.yaml` next to the
//! engine binary. This module defines strongly-typed structs that mirror the
//! YAML structure, and a loader that reads and validates the file. Every
//! field has a default, so an empty file yields the stock room.

use std::path::Path;
use std::time::Duration;

use eunoia_room::{RoomError, RoomLayout, default_furniture};
use eunoia_types::{Action, FurnitureItem, GridBounds, Tile};
use serde::Deserialize;

/// Errors that can occur when loading configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// Failed to read the configuration file from disk.
    #[error("failed to read config file: {source}")]
    Io {
        /// The underlying I/O error.
        #[from]
        source: std::io::Error,
    },

    /// Failed to parse YAML content.
    #[error("failed to parse config YAML: {source}")]
    Yaml {
        /// The underlying YAML parse error.
        source: serde_yml::Error,
    },

    /// A value parsed but is out of range.
    #[error("invalid configuration: {reason}")]
    Invalid {
        /// Explanation of what is wrong.
        reason: String,
    },
}

impl From<serde_yml::Error> for ConfigError {
    fn from(source: serde_yml::Error) -> Self {
        Self::Yaml { source }
    }
}

/// Overrides `backend.chat_url`.
const ENV_CHAT_URL: &str = "EUNOIA_CHAT_URL";

/// Overrides `backend.user_id`.
const ENV_USER_ID: &str = "EUNOIA_USER_ID";

fn env_lookup(key: &str) -> Option<String> {
    std::env::var(key).ok()
}

/// Top-level engine configuration.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct EngineConfig {
    /// Room geometry and furniture.
    #[serde(default)]
    pub room: RoomConfig,

    /// Movement speeds and tolerances.
    #[serde(default)]
    pub movement: MovementConfig,

    /// Pose timing.
    #[serde(default)]
    pub poses: PoseConfig,

    /// Coping-exercise navigation.
    #[serde(default)]
    pub coping: CopingConfig,

    /// Chat backend connection.
    #[serde(default)]
    pub backend: BackendConfig,

    /// Logging configuration.
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl EngineConfig {
    /// Load configuration from a YAML file at the given path.
    ///
    /// Environment variables override YAML values for the backend:
    /// - `EUNOIA_CHAT_URL` overrides `backend.chat_url`
    /// - `EUNOIA_USER_ID` overrides `backend.user_id`
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Io`] if the file cannot be read,
    /// [`ConfigError::Yaml`] if the content is not valid YAML, or
    /// [`ConfigError::Invalid`] if a value is out of range.
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        serde_yml::from_str::<Self>(&contents)?.finish(env_lookup)
    }

    /// Default configuration with environment overrides applied, for when
    /// no configuration file exists.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Invalid`] if a value is out of range.
    pub fn from_env_defaults() -> Result<Self, ConfigError> {
        Self::default().finish(env_lookup)
    }

    /// Parse configuration from a YAML string.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Yaml`] if the string is not valid YAML, or
    /// [`ConfigError::Invalid`] if a value is out of range.
    pub fn parse(yaml: &str) -> Result<Self, ConfigError> {
        serde_yml::from_str::<Self>(yaml)?.finish(env_lookup)
    }

    /// Apply overrides from `lookup` and validate.
    fn finish(mut self, lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        self.backend.apply_overrides(lookup);
        self.validate()?;
        Ok(self)
    }

    /// Check value ranges that serde cannot express.
    fn validate(&self) -> Result<(), ConfigError> {
        let m = &self.movement;
        // Increments longer than a tile could hop over a one-tile obstacle.
        if !(m.step_per_frame > 0.0 && m.step_per_frame <= 1.0) {
            return Err(ConfigError::Invalid {
                reason: format!(
                    "movement.step_per_frame must be in (0, 1], got {}",
                    m.step_per_frame
                ),
            });
        }
        if !(m.arrival_tolerance.is_finite()
            && m.arrival_tolerance > 0.0
            && m.arrival_tolerance < 0.5)
        {
            return Err(ConfigError::Invalid {
                reason: format!(
                    "movement.arrival_tolerance must be in (0, 0.5), got {}",
                    m.arrival_tolerance
                ),
            });
        }
        if m.frame_interval_ms == 0 {
            return Err(ConfigError::Invalid {
                reason: "movement.frame_interval_ms must be at least 1".to_owned(),
            });
        }
        if let Some(action) = self.poses.persistent.iter().find(|a| !a.is_pose()) {
            return Err(ConfigError::Invalid {
                reason: format!("poses.persistent lists {action}, which is not a pose"),
            });
        }
        Ok(())
    }
}

/// Room geometry and furniture.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct RoomConfig {
    /// Grid extent in tiles.
    #[serde(default = "default_grid_size")]
    pub grid_size: i32,

    /// Lowest walkable coordinate.
    #[serde(default = "default_walkable_min")]
    pub walkable_min: i32,

    /// Highest walkable coordinate.
    #[serde(default = "default_walkable_max")]
    pub walkable_max: i32,

    /// Character start tile.
    #[serde(default = "default_start")]
    pub start: Tile,

    /// Furniture list; the stock furniture is used when omitted.
    #[serde(default)]
    pub furniture: Option<Vec<FurnitureItem>>,
}

impl RoomConfig {
    /// Validate and build the room this configuration describes.
    ///
    /// # Errors
    ///
    /// Returns [`RoomError`] if the layout breaks a structural rule.
    pub fn build_layout(&self) -> Result<RoomLayout, RoomError> {
        let furniture = self.furniture.clone().unwrap_or_else(default_furniture);
        RoomLayout::new(
            self.grid_size,
            GridBounds::new(self.walkable_min, self.walkable_max),
            self.start,
            furniture,
        )
    }
}

impl Default for RoomConfig {
    fn default() -> Self {
        Self {
            grid_size: default_grid_size(),
            walkable_min: default_walkable_min(),
            walkable_max: default_walkable_max(),
            start: default_start(),
            furniture: None,
        }
    }
}

/// Movement speeds and tolerances.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
pub struct MovementConfig {
    /// Tiles advanced per frame during continuous travel.
    #[serde(default = "default_step_per_frame")]
    pub step_per_frame: f64,

    /// Distance, in tiles, at which a position counts as arrived.
    #[serde(default = "default_arrival_tolerance")]
    pub arrival_tolerance: f64,

    /// How long a single key-press step shows the walking animation.
    #[serde(default = "default_stride_ms")]
    pub stride_ms: u64,

    /// Host frame interval.
    #[serde(default = "default_frame_interval_ms")]
    pub frame_interval_ms: u64,
}

impl MovementConfig {
    /// Stride window as a [`Duration`].
    pub const fn stride(&self) -> Duration {
        Duration::from_millis(self.stride_ms)
    }

    /// Frame interval as a [`Duration`].
    pub const fn frame_interval(&self) -> Duration {
        Duration::from_millis(self.frame_interval_ms)
    }
}

impl Default for MovementConfig {
    fn default() -> Self {
        Self {
            step_per_frame: default_step_per_frame(),
            arrival_tolerance: default_arrival_tolerance(),
            stride_ms: default_stride_ms(),
            frame_interval_ms: default_frame_interval_ms(),
        }
    }
}

/// Pose timing.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct PoseConfig {
    /// How long a non-persistent pose lasts before reverting to idle.
    #[serde(default = "default_pose_duration_ms")]
    pub duration_ms: u64,

    /// Poses that never expire on their own.
    #[serde(default = "default_persistent_poses")]
    pub persistent: Vec<Action>,
}

impl Default for PoseConfig {
    fn default() -> Self {
        Self {
            duration_ms: default_pose_duration_ms(),
            persistent: default_persistent_poses(),
        }
    }
}

/// Coping-exercise navigation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub struct CopingConfig {
    /// Delay between a breathing instruction and the navigation request.
    #[serde(default = "default_navigation_delay_ms")]
    pub navigation_delay_ms: u64,
}

impl CopingConfig {
    /// Navigation delay as a [`Duration`].
    pub const fn navigation_delay(&self) -> Duration {
        Duration::from_millis(self.navigation_delay_ms)
    }
}

impl Default for CopingConfig {
    fn default() -> Self {
        Self {
            navigation_delay_ms: default_navigation_delay_ms(),
        }
    }
}

/// Chat backend connection.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct BackendConfig {
    /// Endpoint accepting `{ "message", "userId" }` and answering with an
    /// instruction.
    #[serde(default = "default_chat_url")]
    pub chat_url: String,

    /// User identifier sent with every message.
    #[serde(default = "default_user_id")]
    pub user_id: String,

    /// Request timeout.
    #[serde(default = "default_backend_timeout_ms")]
    pub timeout_ms: u64,

    /// Answer locally with canned replies instead of calling the backend.
    #[serde(default)]
    pub offline: bool,
}

impl BackendConfig {
    /// Apply `EUNOIA_CHAT_URL` and `EUNOIA_USER_ID` as returned by `lookup`.
    fn apply_overrides(&mut self, lookup: impl Fn(&str) -> Option<String>) {
        if let Some(url) = lookup(ENV_CHAT_URL) {
            self.chat_url = url;
        }
        if let Some(user) = lookup(ENV_USER_ID) {
            self.user_id = user;
        }
    }

    /// Request timeout as a [`Duration`].
    pub const fn timeout(&self) -> Duration {
        Duration::from_millis(self.timeout_ms)
    }
}

impl Default for BackendConfig {
    fn default() -> Self {
        Self {
            chat_url: default_chat_url(),
            user_id: default_user_id(),
            timeout_ms: default_backend_timeout_ms(),
            offline: false,
        }
    }
}

/// Logging configuration.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct LoggingConfig {
    /// Log level (trace, debug, info, warn, error). `RUST_LOG` wins if set.
    #[serde(default = "default_log_level")]
    pub level: String,

    /// Emit JSON lines instead of human-readable output.
    #[serde(default)]
    pub json: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            json: false,
        }
    }
}

// ---------------------------------------------------------------------------
// Default value functions
// ---------------------------------------------------------------------------

const fn default_grid_size() -> i32 {
    eunoia_room::GRID_SIZE
}

const fn default_walkable_min() -> i32 {
    2
}

const fn default_walkable_max() -> i32 {
    18
}

const fn default_start() -> Tile {
    eunoia_room::START_TILE
}

const fn default_step_per_frame() -> f64 {
    0.05
}

const fn default_arrival_tolerance() -> f64 {
    0.1
}

const fn default_stride_ms() -> u64 {
    200
}

const fn default_frame_interval_ms() -> u64 {
    16
}

const fn default_pose_duration_ms() -> u64 {
    5000
}

fn default_persistent_poses() -> Vec<Action> {
    vec![Action::Sitting, Action::Sleeping, Action::Breathing]
}

const fn default_navigation_delay_ms() -> u64 {
    2000
}

fn default_chat_url() -> String {
    "http://localhost:8080/api/chat/send".to_owned()
}

fn default_user_id() -> String {
    "anonymous".to_owned()
}

const fn default_backend_timeout_ms() -> u64 {
    10_000
}

fn default_log_level() -> String {
    "info".to_owned()
}
