//! Global events used for cross-system communication.
//!
//! The collision adapter sends `ImpactEvent`s, the enemy damage system
//! resolves them and reports whole-ship destruction with `ShipDestroyed`.
//! Scoring and any later listeners (power-up drops, explosions) hang off
//! these events instead of reaching into each other.

use bevy::prelude::*;

use crate::combat::WeaponType;

/// Sent when a hero projectile touches a collider belonging to an enemy.
#[derive(Event, Debug, Clone, Copy)]
pub struct ImpactEvent {
    /// Root entity of the enemy that was hit
    pub enemy: Entity,
    /// The projectile entity (discarded once the impact is resolved)
    pub projectile: Entity,
    /// Projectile type, used to look up damage
    pub weapon: WeaponType,
    /// Contact surfaces in the order the collision source reported them.
    /// The struck part is resolved from the first, then the second.
    pub contacts: [Entity; 2],
}

/// Sent when an enemy has been completely destroyed by the hero.
///
/// Enemies that drift off the bottom of the playfield do not send this.
#[derive(Event, Debug, Clone)]
pub struct ShipDestroyed {
    /// The enemy entity (already queued for despawn)
    pub enemy: Entity,
    /// Definition name of the enemy
    pub name: String,
    /// Where it died
    pub position: Vec3,
    /// Points awarded for the kill
    pub bounty: u32,
}
