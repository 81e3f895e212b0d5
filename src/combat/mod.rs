//! Combat module - projectiles, weapon definitions and impact detection.

mod components;
mod plugin;
mod systems;
mod weapons;

pub use components::*;
pub use plugin::CombatPlugin;
pub use systems::{collect_projectile_impacts, CombatSet};
pub use weapons::*;
