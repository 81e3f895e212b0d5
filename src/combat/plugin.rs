//! Combat plugin - weapon table and projectile impact detection.

use bevy::prelude::*;

use super::systems;
use super::weapons::{load_weapon_definitions, WeaponDefinitions};

/// Combat plugin - loads weapon definitions and turns physics collisions
/// into impact events.
pub struct CombatPlugin;

impl Plugin for CombatPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<WeaponDefinitions>()
            .add_systems(Startup, load_weapon_definitions);

        systems::setup_combat_systems(app);
    }
}
