//! Gameplay configuration loaded from external RON file.
//!
//! Allows tweaking the playfield, spawn rate and feedback timings without
//! recompilation.

use bevy::prelude::*;
use serde::Deserialize;
use std::fs;

/// Gameplay configuration loaded from assets/data/config.ron.
#[derive(Resource, Clone, Debug, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    // Playfield (half extents of the visible area, world units)
    pub cam_width: f32,
    pub cam_height: f32,
    // Spawning
    pub enemy_spawn_per_second: f32,
    /// Distance outside the top edge at which enemies appear
    pub enemy_default_padding: f32,
    // Feedback
    /// Seconds a struck part stays tinted red
    pub damage_flash_duration: f32,
    /// Fixed seed for enemy randomness (None = seed from entropy)
    pub rng_seed: Option<u64>,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            cam_width: 30.0,
            cam_height: 40.0,
            enemy_spawn_per_second: 0.5,
            enemy_default_padding: 1.5,
            damage_flash_duration: 0.1,
            rng_seed: None,
        }
    }
}

impl GameConfig {
    pub const PATH: &'static str = "assets/data/config.ron";

    /// Load config from RON file.
    pub fn load() -> Self {
        match fs::read_to_string(Self::PATH) {
            Ok(contents) => match Self::from_ron(&contents) {
                Ok(config) => {
                    info!("Loaded game config from {}", Self::PATH);
                    config
                }
                Err(e) => {
                    error!("Failed to parse {}: {}. Using defaults.", Self::PATH, e);
                    Self::default()
                }
            },
            Err(e) => {
                warn!("Could not read {}: {}. Using defaults.", Self::PATH, e);
                Self::default()
            }
        }
    }

    /// Parse config from a RON string. Missing fields take their defaults.
    pub fn from_ron(contents: &str) -> Result<Self, ron::error::SpannedError> {
        ron::from_str(contents)
    }

    /// Seconds between enemy spawns.
    pub fn spawn_interval(&self) -> f32 {
        1.0 / self.enemy_spawn_per_second.max(f32::EPSILON)
    }
}

/// System to load game config at startup.
pub fn load_game_config(mut commands: Commands) {
    let config = GameConfig::load();
    commands.insert_resource(config);
}
