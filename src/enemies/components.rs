//! Enemy-related components.

use bevy::prelude::*;

use super::parts::PartId;

/// Marker component for all enemies.
#[derive(Component)]
pub struct Enemy;

/// Enemy type identifier (matches RON file stem).
#[derive(Component, Clone, Debug)]
pub struct EnemyType(pub String);

/// Points awarded when this enemy is destroyed by the hero.
#[derive(Component, Clone, Copy, Debug, PartialEq, Eq)]
pub struct Bounty(pub u32);

/// Child entity rendering one part of a multi-part enemy.
#[derive(Component, Clone, Copy, Debug)]
pub struct PartVisual(pub PartId);

/// Resting colour of a part's material, restored after a damage flash.
#[derive(Component, Clone, Copy, Debug)]
pub struct PartTint(pub Color);

/// A part is showing damage until `ends_at` (seconds of game time).
#[derive(Component, Clone, Copy, Debug, PartialEq)]
pub struct DamageFlash {
    pub ends_at: f32,
}

impl DamageFlash {
    pub const COLOR: Color = Color::srgb(1.0, 0.0, 0.0);

    pub fn is_over(&self, now: f32) -> bool {
        now >= self.ends_at
    }
}
