//! Enemies module - enemy definitions, movement, part damage and spawning.

mod components;
mod damage;
pub mod data;
mod error;
pub mod movement;
pub mod parts;
mod plugin;
mod spawning;
mod systems;

pub use components::*;
pub use damage::{Hull, ImpactOutcome};
pub use data::EnemyRegistry;
pub use error::{DataLoadError, DefinitionError, ImpactError};
pub use plugin::EnemyPlugin;
pub use spawning::{spawn_enemy, EnemyRng, EnemySpawnTimer};
pub use systems::{EnemySet, ShipLifecycle};
