//! Weapon definitions - damage per projectile type, loaded from RON.

use bevy::prelude::*;
use serde::Deserialize;
use std::collections::HashMap;
use std::fs;

/// Projectile types the hero can fire.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Deserialize)]
pub enum WeaponType {
    #[default]
    Blaster,
    Spread,
    Phaser,
    Missile,
    Laser,
}

/// Stats for a single weapon type.
#[derive(Debug, Clone, Deserialize)]
pub struct WeaponDefinition {
    /// Damage dealt to an enemy part per projectile hit
    pub damage_on_hit: f32,
}

/// Resource holding the weapon table, keyed by projectile type.
#[derive(Resource, Debug, Clone)]
pub struct WeaponDefinitions {
    pub definitions: HashMap<WeaponType, WeaponDefinition>,
}

impl Default for WeaponDefinitions {
    fn default() -> Self {
        let entry = |damage_on_hit| WeaponDefinition { damage_on_hit };

        Self {
            definitions: HashMap::from([
                (WeaponType::Blaster, entry(1.0)),
                (WeaponType::Spread, entry(1.0)),
                (WeaponType::Phaser, entry(0.5)),
                (WeaponType::Missile, entry(10.0)),
                (WeaponType::Laser, entry(0.25)),
            ]),
        }
    }
}

impl WeaponDefinitions {
    pub const PATH: &'static str = "assets/data/weapons.ron";

    /// Get the definition for a projectile type.
    pub fn get(&self, weapon: WeaponType) -> Option<&WeaponDefinition> {
        self.definitions.get(&weapon)
    }

    /// Damage dealt by one projectile of the given type.
    ///
    /// Types missing from the table deal no damage.
    pub fn damage_for(&self, weapon: WeaponType) -> f32 {
        match self.get(weapon) {
            Some(definition) => definition.damage_on_hit,
            None => {
                warn!("No weapon definition for {:?}, dealing no damage", weapon);
                0.0
            }
        }
    }

    /// Parse a weapon table from a RON map.
    pub fn from_ron(contents: &str) -> Result<Self, ron::error::SpannedError> {
        let definitions = ron::from_str::<HashMap<WeaponType, WeaponDefinition>>(contents)?;
        Ok(Self { definitions })
    }

    /// Load the weapon table from RON file, falling back to the built-in table.
    pub fn load() -> Self {
        match fs::read_to_string(Self::PATH) {
            Ok(contents) => match Self::from_ron(&contents) {
                Ok(weapons) => {
                    info!(
                        "Loaded {} weapon definitions from {}",
                        weapons.definitions.len(),
                        Self::PATH
                    );
                    weapons
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
}

/// System to load weapon definitions at startup.
pub fn load_weapon_definitions(mut commands: Commands) {
    commands.insert_resource(WeaponDefinitions::load());
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn default_table_covers_every_type() {
        let weapons = WeaponDefinitions::default();
        for weapon in [
            WeaponType::Blaster,
            WeaponType::Spread,
            WeaponType::Phaser,
            WeaponType::Missile,
            WeaponType::Laser,
        ] {
            assert!(weapons.get(weapon).is_some(), "{weapon:?} missing");
        }
    }

    #[test]
    fn shipped_table_matches_built_in_damage() {
        let contents = fs::read_to_string(WeaponDefinitions::PATH).unwrap();
        let shipped = WeaponDefinitions::from_ron(&contents).unwrap();
        let built_in = WeaponDefinitions::default();
        for (weapon, definition) in &built_in.definitions {
            assert_relative_eq!(shipped.damage_for(*weapon), definition.damage_on_hit);
        }
    }

    #[test]
    fn missing_type_deals_no_damage() {
        let weapons = WeaponDefinitions::from_ron("{ Blaster: (damage_on_hit: 2.0) }").unwrap();
        assert_relative_eq!(weapons.damage_for(WeaponType::Blaster), 2.0);
        assert_relative_eq!(weapons.damage_for(WeaponType::Missile), 0.0);
    }
}
