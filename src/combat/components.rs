//! Combat-related components.

use bevy::prelude::*;

use super::weapons::WeaponType;

/// A hero projectile in flight.
///
/// Projectiles are spawned by the hero's weapon; enemies only ever read the
/// type and discard the entity on impact.
#[derive(Component, Debug, Clone, Copy)]
pub struct Projectile {
    pub weapon: WeaponType,
}

impl Projectile {
    pub fn new(weapon: WeaponType) -> Self {
        Self { weapon }
    }
}
