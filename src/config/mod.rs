//! Tunable gameplay constants, loaded from an optional RON file.
//!
//! Every field carries a default so a partial (or missing) file still
//! yields a complete configuration.

use bevy::prelude::*;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;

pub const DEFAULT_CONFIG_PATH: &str = "meadowlite.ron";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("could not read config {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("malformed config {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: ron::error::SpannedError,
    },
    #[error("invalid config value: {0}")]
    Invalid(String),
}

#[derive(Resource, Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    // ── World geometry ──
    pub cols: i32,
    pub rows: i32,
    pub tile_px: f32,
    pub reach_tiles: i32,

    // ── Clock ──
    /// In-game minutes per real second.
    pub minutes_per_second: f32,

    // ── Energy curve ──
    pub max_energy: u32,
    pub max_hp: u32,
    pub base_energy: u32,
    pub energy_per_farming_level: u32,
    pub house_upgrade_energy_bonus: u32,
    pub hoe_energy_cost: u32,
    pub watering_energy_cost: u32,
    pub low_energy_threshold: u32,
    pub low_energy_speed_factor: f32,

    // ── Movement ──
    pub walk_speed: f32,
    pub npc_walk_speed: f32,

    // ── Action cooldowns (seconds) ──
    pub tool_cooldown_base: f32,
    pub tool_cooldown_min: f32,
    pub tool_cooldown_per_level: f32,
    pub item_cooldown: f32,

    // ── Fishing ──
    pub fishing_duration: f32,
    pub fishing_tolerance: f32,
    pub fishing_bonus_tolerance: f32,
    pub fishing_cursor_speed: f32,
    pub fishing_fish_drift: f32,
    pub fishing_reward_xp: u32,

    // ── Session ──
    pub seed: u64,
    pub save_path: PathBuf,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            cols: 40,
            rows: 22,
            tile_px: 32.0,
            reach_tiles: 2,
            minutes_per_second: 8.0,
            max_energy: 300,
            max_hp: 100,
            base_energy: 270,
            energy_per_farming_level: 2,
            house_upgrade_energy_bonus: 2,
            hoe_energy_cost: 2,
            watering_energy_cost: 1,
            low_energy_threshold: 40,
            low_energy_speed_factor: 0.8,
            walk_speed: 220.0,
            npc_walk_speed: 60.0,
            tool_cooldown_base: 0.18,
            tool_cooldown_min: 0.12,
            tool_cooldown_per_level: 0.005,
            item_cooldown: 0.18,
            fishing_duration: 4.0,
            fishing_tolerance: 0.08,
            fishing_bonus_tolerance: 0.10,
            fishing_cursor_speed: 0.5,
            fishing_fish_drift: 0.4,
            fishing_reward_xp: 6,
            seed: 42,
            save_path: PathBuf::from("saves/meadowlite.json"),
        }
    }
}

impl GameConfig {
    /// Scene width in pixels.
    pub fn scene_width(&self) -> f32 {
        self.cols as f32 * self.tile_px
    }

    /// Scene height in pixels.
    pub fn scene_height(&self) -> f32 {
        self.rows as f32 * self.tile_px
    }

    /// Cooldown applied after a successful tool use, shortened by farming skill.
    pub fn tool_cooldown(&self, farming_level: u8) -> f32 {
        (self.tool_cooldown_base - farming_level as f32 * self.tool_cooldown_per_level)
            .max(self.tool_cooldown_min)
    }

    /// Morning energy after a night's sleep.
    pub fn morning_energy(&self, farming_level: u8, house_upgraded: bool) -> u32 {
        let mut energy = self.base_energy + farming_level as u32 * self.energy_per_farming_level;
        if house_upgraded {
            energy += self.house_upgrade_energy_bonus;
        }
        energy.min(self.max_energy)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.cols < 24 || self.rows < 16 {
            return Err(ConfigError::Invalid(format!(
                "grid {}x{} is too small for the farm layout (min 24x16)",
                self.cols, self.rows
            )));
        }
        if self.tile_px <= 0.0 || self.minutes_per_second < 0.0 {
            return Err(ConfigError::Invalid(
                "tile_px must be positive and minutes_per_second non-negative".into(),
            ));
        }
        if self.fishing_duration <= 0.0 {
            return Err(ConfigError::Invalid("fishing_duration must be positive".into()));
        }
        Ok(())
    }

    pub fn from_ron_str(text: &str, path: &Path) -> Result<Self, ConfigError> {
        let config: GameConfig = ron::from_str(text).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })?;
        config.validate()?;
        Ok(config)
    }

    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_ron_str(&text, path)
    }

    /// Loads the config file if present, otherwise returns defaults.
    /// A broken file is reported and ignored.
    pub fn load_or_default(path: &Path) -> Self {
        if !path.exists() {
            info!("[Config] No config at {}, using defaults", path.display());
            return Self::default();
        }
        match Self::load(path) {
            Ok(config) => {
                info!("[Config] Loaded {}", path.display());
                config
            }
            Err(err) => {
                warn!("[Config] {err}; falling back to defaults");
                Self::default()
            }
        }
    }
}
