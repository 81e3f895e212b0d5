//! Enemy plugin - registers all enemy systems.

use bevy::prelude::*;

use super::data::{load_enemy_definitions, EnemyRegistry};
use super::spawning::{setup_spawning, spawn_enemies_over_time};
use super::systems::{self, EnemySet};
use crate::combat::CombatSet;
use crate::core::GameState;
use crate::world::update_bounds_checks;

/// Enemy plugin - handles enemy spawning, movement, damage and destruction.
pub struct EnemyPlugin;

impl Plugin for EnemyPlugin {
    fn build(&self, app: &mut App) {
        app
            .init_resource::<EnemyRegistry>()
            // Config is loaded in PreStartup, so the timer can read it here
            .add_systems(Startup, (load_enemy_definitions, setup_spawning))
            .configure_sets(
                Update,
                (
                    EnemySet::Spawn,
                    EnemySet::Movement,
                    EnemySet::Bounds,
                    EnemySet::Damage,
                    EnemySet::Feedback,
                )
                    .chain()
                    .run_if(in_state(GameState::InGame)),
            )
            .configure_sets(Update, EnemySet::Damage.after(CombatSet::Detect))
            .add_systems(Update, spawn_enemies_over_time.in_set(EnemySet::Spawn))
            .add_systems(Update, systems::move_enemies.in_set(EnemySet::Movement))
            .add_systems(
                Update,
                (update_bounds_checks, systems::cull_departed_enemies)
                    .chain()
                    .in_set(EnemySet::Bounds),
            )
            .add_systems(Update, systems::resolve_impacts.in_set(EnemySet::Damage))
            .add_systems(Update, systems::update_damage_flash.in_set(EnemySet::Feedback));
    }
}
