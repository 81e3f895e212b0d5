//! Space Shmup - enemy behaviour for a vertical arcade shooter in Bevy.
//!
//! Enemies descend from the top of the playfield, either weaving on a sine
//! wave or hopping between eased waypoints, and are shot apart part by part.
//!
//! # Architecture
//!
//! The game is organized into plugins, each handling a specific aspect:
//!
//! - **Core**: Game states, global events, config, easing helpers
//! - **World**: Playfield bounds and camera
//! - **Combat**: Weapon table, projectile impact detection
//! - **Enemies**: Definitions, movement, part damage, spawning
//! - **Scoring**: Score and high score
//! - **UI**: HUD and pause overlay

pub mod combat;
pub mod core;
pub mod enemies;
pub mod scoring;
pub mod ui;
pub mod world;

use bevy::prelude::*;

/// Main game plugin that adds all sub-plugins.
pub struct ShmupPlugin;

impl Plugin for ShmupPlugin {
    fn build(&self, app: &mut App) {
        app
            // Core systems (must be first)
            .add_plugins(core::CorePlugin)

            // Playfield and camera
            .add_plugins(world::WorldPlugin)

            // Impact detection
            .add_plugins(combat::CombatPlugin)

            // Enemy systems
            .add_plugins(enemies::EnemyPlugin)

            // Score keeping
            .add_plugins(scoring::ScoringPlugin)

            // UI systems
            .add_plugins(ui::UiPlugin);
    }
}
