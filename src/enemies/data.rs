//! Enemy data loading from RON files.

use bevy::prelude::*;
use serde::Deserialize;
use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

use super::error::{DataLoadError, DefinitionError};
use super::parts::PartRegistry;

/// How an enemy type moves.
#[derive(Deserialize, Clone, Debug, PartialEq)]
pub enum MovementDefinition {
    /// Straight down at constant speed.
    Descend { speed: f32 },
    /// Sine wave sideways while descending.
    Oscillate {
        speed: f32,
        /// Seconds for a full sine wave
        wave_frequency: f32,
        /// Sine wave amplitude in world units
        wave_width: f32,
        /// Maximum yaw in degrees
        wave_rot_y: f32,
    },
    /// Eased hops between random on-screen points.
    Eased {
        /// Seconds per hop
        duration: f32,
    },
}

/// One destructible part of a multi-part enemy.
#[derive(Deserialize, Clone, Debug, PartialEq)]
pub struct PartDefinition {
    pub name: String,
    pub health: f32,
    /// Parts that must be destroyed before this one takes damage
    #[serde(default)]
    pub protected_by: Vec<String>,
    /// Offset from the enemy's centre (x, y)
    #[serde(default)]
    pub offset: (f32, f32),
    /// Edge length of the part's cube
    #[serde(default = "default_part_size")]
    pub size: f32,
    /// Overrides the enemy colour for this part
    #[serde(default)]
    pub color: Option<(f32, f32, f32)>,
}

fn default_part_size() -> f32 {
    2.0
}

impl Default for PartDefinition {
    fn default() -> Self {
        Self {
            name: String::new(),
            health: 10.0,
            protected_by: Vec::new(),
            offset: (0.0, 0.0),
            size: default_part_size(),
            color: None,
        }
    }
}

/// How an enemy takes damage.
#[derive(Deserialize, Clone, Debug, PartialEq)]
pub enum HullDefinition {
    /// Destroyed by the first hit.
    Single { size: f32 },
    /// Built from parts with their own health.
    Parted { parts: Vec<PartDefinition> },
}

/// Enemy definition loaded from RON file.
#[derive(Deserialize, Clone, Debug, PartialEq)]
pub struct EnemyDefinition {
    pub name: String,
    /// Points awarded when the whole enemy is destroyed
    pub score: u32,
    /// Bounds-check radius
    pub radius: f32,
    pub color: (f32, f32, f32),
    pub movement: MovementDefinition,
    pub hull: HullDefinition,
}

impl EnemyDefinition {
    /// Parse a definition from RON and check it can be spawned.
    pub fn from_ron(contents: &str, path: &str) -> Result<Self, DataLoadError> {
        let definition = ron::from_str::<Self>(contents).map_err(|e| DataLoadError::ParseError {
            path: path.to_string(),
            details: e.to_string(),
        })?;

        definition
            .validate()
            .map_err(|source| DataLoadError::InvalidDefinition {
                path: path.to_string(),
                source,
            })?;
        Ok(definition)
    }

    /// Check everything that can be checked before spawn time.
    pub fn validate(&self) -> Result<(), DefinitionError> {
        match self.movement {
            MovementDefinition::Oscillate { wave_frequency, .. }
                if !(wave_frequency.is_finite() && wave_frequency > 0.0) =>
            {
                return Err(DefinitionError::InvalidWaveFrequency(wave_frequency));
            }
            MovementDefinition::Eased { duration }
                if !(duration.is_finite() && duration > 0.0) =>
            {
                return Err(DefinitionError::InvalidDuration(duration));
            }
            _ => {}
        }

        if let HullDefinition::Parted { parts } = &self.hull {
            PartRegistry::new(parts)?;
        }
        Ok(())
    }
}

/// Resource holding all loaded enemy definitions.
#[derive(Resource, Default)]
pub struct EnemyRegistry {
    /// Keyed by file stem; ordered so seeded spawns are reproducible
    pub definitions: BTreeMap<String, EnemyDefinition>,
}

impl EnemyRegistry {
    /// Get the n-th type name and definition, in type-name order.
    pub fn nth(&self, index: usize) -> Option<(&str, &EnemyDefinition)> {
        self.definitions
            .iter()
            .nth(index)
            .map(|(enemy_type, definition)| (enemy_type.as_str(), definition))
    }

    pub fn len(&self) -> usize {
        self.definitions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.definitions.is_empty()
    }
}

/// Read and validate a single enemy definition file.
pub fn load_definition_file(path: &Path) -> Result<EnemyDefinition, DataLoadError> {
    let display = path.display().to_string();
    if !path.exists() {
        return Err(DataLoadError::FileNotFound(display));
    }

    let contents = fs::read_to_string(path).map_err(|e| DataLoadError::ReadError {
        path: display.clone(),
        details: e.to_string(),
    })?;
    EnemyDefinition::from_ron(&contents, &display)
}

/// Load all enemy definitions from the assets/data/enemies/ directory.
pub fn load_enemy_definitions(mut registry: ResMut<EnemyRegistry>) {
    let enemies_dir = Path::new("assets/data/enemies");

    if !enemies_dir.exists() {
        warn!("Enemy definitions directory not found: {:?}", enemies_dir);
        return;
    }

    let Ok(entries) = fs::read_dir(enemies_dir) else {
        warn!("Failed to read enemy definitions directory");
        return;
    };

    for entry in entries.flatten() {
        let path = entry.path();

        if path.extension().is_some_and(|ext| ext == "ron") {
            let enemy_type = path
                .file_stem()
                .and_then(|s| s.to_str())
                .unwrap_or("unknown")
                .to_string();

            match load_definition_file(&path) {
                Ok(definition) => {
                    info!("Loaded enemy definition: {} ({})", definition.name, enemy_type);
                    registry.definitions.insert(enemy_type, definition);
                }
                Err(e) => {
                    error!("Skipping enemy definition: {}", e);
                }
            }
        }
    }

    info!(
        "Loaded {} enemy definitions",
        registry.definitions.len()
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    const FORTRESS: &str = r#"(
        name: "Fortress",
        score: 300,
        radius: 4.0,
        color: (0.4, 0.4, 0.5),
        movement: Eased(duration: 4.0),
        hull: Parted(parts: [
            (name: "hull", health: 100.0),
            (name: "core", health: 50.0, protected_by: ["hull"], offset: (0.0, 1.0), size: 1.0),
        ]),
    )"#;

    #[test]
    fn parses_parted_enemy() {
        let definition = EnemyDefinition::from_ron(FORTRESS, "fortress.ron").unwrap();
        assert_eq!(definition.score, 300);
        assert_eq!(definition.movement, MovementDefinition::Eased { duration: 4.0 });

        let HullDefinition::Parted { parts } = &definition.hull else {
            panic!("expected parted hull");
        };
        assert_eq!(parts.len(), 2);
        assert!(parts[0].protected_by.is_empty());
        assert_eq!(parts[0].size, 2.0);
        assert_eq!(parts[1].protected_by, vec!["hull".to_string()]);
        assert_eq!(parts[1].offset, (0.0, 1.0));
    }

    #[test]
    fn parses_oscillating_enemy() {
        let definition = EnemyDefinition::from_ron(
            r#"(
                name: "Sine Drone",
                score: 100,
                radius: 2.5,
                color: (0.8, 0.3, 0.3),
                movement: Oscillate(speed: 10.0, wave_frequency: 2.0, wave_width: 4.0, wave_rot_y: 45.0),
                hull: Single(size: 2.0),
            )"#,
            "sine_drone.ron",
        )
        .unwrap();
        assert_eq!(definition.hull, HullDefinition::Single { size: 2.0 });
    }

    #[test]
    fn zero_wave_frequency_fails_validation() {
        let source = FORTRESS.replace("Eased(duration: 4.0)", "Oscillate(speed: 1.0, wave_frequency: 0.0, wave_width: 4.0, wave_rot_y: 45.0)");
        let err = EnemyDefinition::from_ron(&source, "bad.ron").unwrap_err();
        assert!(matches!(
            err,
            DataLoadError::InvalidDefinition {
                source: DefinitionError::InvalidWaveFrequency(_),
                ..
            }
        ));
    }

    #[test]
    fn unknown_protector_fails_validation() {
        let source = FORTRESS.replace(r#"["hull"]"#, r#"["shield"]"#);
        let err = EnemyDefinition::from_ron(&source, "bad.ron").unwrap_err();
        assert!(err.to_string().contains("unknown part 'shield'"));
    }

    #[test]
    fn malformed_file_is_a_parse_error() {
        let err = EnemyDefinition::from_ron("(name: 3)", "broken.ron").unwrap_err();
        assert!(matches!(err, DataLoadError::ParseError { .. }));
    }

    #[rstest]
    #[case("sine_drone", 100)]
    #[case("fortress", 300)]
    #[case("scout", 50)]
    fn shipped_definitions_load(#[case] enemy_type: &str, #[case] score: u32) {
        let path = format!("assets/data/enemies/{enemy_type}.ron");
        let definition = load_definition_file(Path::new(&path)).unwrap();
        assert_eq!(definition.score, score);
    }

    #[test]
    fn missing_file_is_reported() {
        let err = load_definition_file(Path::new("assets/data/enemies/does_not_exist.ron")).unwrap_err();
        assert!(matches!(err, DataLoadError::FileNotFound(_)));
    }
}
