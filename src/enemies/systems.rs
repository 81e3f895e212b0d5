//! Enemy systems - per-frame movement, bounds, impact handling and damage
//! feedback.

use std::collections::HashSet;

use bevy::ecs::system::SystemParam;
use bevy::prelude::*;
use bevy_rapier3d::prelude::Collider;

use super::components::{Bounty, DamageFlash, Enemy, EnemyType, PartTint};
use super::damage::{Hull, ImpactOutcome};
use super::movement::Movement;
use super::spawning::EnemyRng;
use crate::combat::WeaponDefinitions;
use crate::core::{GameConfig, ImpactEvent, ShipDestroyed};
use crate::scoring::ScoreBoard;
use crate::world::{BoundsCheck, PlayfieldBounds};

/// System set ordering for enemies within a frame.
#[derive(SystemSet, Debug, Clone, PartialEq, Eq, Hash)]
pub enum EnemySet {
    Spawn,
    Movement,
    Bounds,
    Damage,
    Feedback,
}

/// Everything an enemy needs to report its own end: despawning, the
/// destruction event, the score board, and disposal of the projectiles
/// that hit it.
#[derive(SystemParam)]
pub struct ShipLifecycle<'w, 's> {
    commands: Commands<'w, 's>,
    destroyed: EventWriter<'w, ShipDestroyed>,
    score: ResMut<'w, ScoreBoard>,
}

impl ShipLifecycle<'_, '_> {
    pub fn discard_projectile(&mut self, projectile: Entity) {
        if let Some(entity) = self.commands.get_entity(projectile) {
            entity.despawn_recursive();
        }
    }

    pub fn flash(&mut self, visual: Entity, ends_at: f32) {
        if let Some(mut entity) = self.commands.get_entity(visual) {
            entity.insert(DamageFlash { ends_at });
        }
    }

    /// Hide a destroyed part and stop it from taking further hits.
    pub fn deactivate_part(&mut self, visual: Entity) {
        if let Some(mut entity) = self.commands.get_entity(visual) {
            entity.insert(Visibility::Hidden).remove::<Collider>();
        }
    }

    pub fn report_destroyed(&mut self, enemy: Entity, name: &str, position: Vec3, bounty: u32) {
        self.commands.entity(enemy).despawn_recursive();
        self.destroyed.send(ShipDestroyed {
            enemy,
            name: name.to_string(),
            position,
            bounty,
        });

        let update = self.score.award(bounty);
        info!("{} destroyed, score {}", name, update.score);
        if update.new_high_score {
            info!("New high score: {}", update.score);
        }
    }
}

/// Move every enemy according to its movement policy.
pub fn move_enemies(
    time: Res<Time>,
    bounds: Res<PlayfieldBounds>,
    mut rng: ResMut<EnemyRng>,
    mut query: Query<(&mut Movement, &mut Transform, &BoundsCheck)>,
) {
    let now = time.elapsed_secs();

    for (mut movement, mut transform, check) in query.iter_mut() {
        let sample = movement.sample(now, bounds.safe_area(check.radius), &mut rng.0);
        transform.translation = sample.position;
        transform.rotation = sample.rotation();
    }
}

/// Despawn enemies that have left through the bottom of the playfield.
///
/// Escaping is not a kill: no score, no `ShipDestroyed`.
pub fn cull_departed_enemies(
    mut commands: Commands,
    query: Query<(Entity, &BoundsCheck, Option<&EnemyType>), With<Enemy>>,
) {
    for (entity, check, enemy_type) in query.iter() {
        if check.off_down {
            let enemy_type = enemy_type.map_or("unknown", |t| t.0.as_str());
            debug!("{:?} ({}) left the playfield", entity, enemy_type);
            commands.entity(entity).despawn_recursive();
        }
    }
}

/// Resolve projectile impacts against enemy hulls.
///
/// Every impact spends its projectile, whether or not it did damage. A
/// projectile reported more than once in a frame only counts the first time.
pub fn resolve_impacts(
    mut impacts: EventReader<ImpactEvent>,
    mut enemies: Query<(&mut Hull, &BoundsCheck, &Bounty, &Transform, Option<&Name>), With<Enemy>>,
    weapons: Res<WeaponDefinitions>,
    config: Res<GameConfig>,
    time: Res<Time>,
    mut lifecycle: ShipLifecycle,
) {
    let now = time.elapsed_secs();
    let mut spent = HashSet::new();

    for impact in impacts.read() {
        if !spent.insert(impact.projectile) {
            continue;
        }
        lifecycle.discard_projectile(impact.projectile);

        let Ok((mut hull, check, bounty, transform, name)) = enemies.get_mut(impact.enemy) else {
            continue;
        };

        let damage = weapons.damage_for(impact.weapon);
        let outcome = match hull.resolve_impact(check.is_on_screen, &impact.contacts, damage) {
            Ok(outcome) => outcome,
            Err(e) => {
                warn!("Impact on {:?} not applied: {}", impact.enemy, e);
                continue;
            }
        };

        match outcome {
            ImpactOutcome::Ignored => {}
            ImpactOutcome::Protected { part, protector } => {
                debug!("{:?}: part {:?} shielded by {:?}", impact.enemy, part, protector);
            }
            ImpactOutcome::Applied { .. } | ImpactOutcome::PartDestroyed { .. } => {
                let visual = outcome
                    .damaged_part()
                    .and_then(|id| hull.parts()?.get(id)?.visual());
                if let Some(visual) = visual {
                    lifecycle.flash(visual, now + config.damage_flash_duration);
                    if outcome.destroys_part() {
                        lifecycle.deactivate_part(visual);
                    }
                }
            }
            ImpactOutcome::EntityDestroyed { .. } => {
                let name = name.map_or("Enemy", Name::as_str);
                lifecycle.report_destroyed(impact.enemy, name, transform.translation, bounty.0);
            }
        }
    }
}

/// Tint flashing parts red and restore them once the flash is over.
pub fn update_damage_flash(
    mut commands: Commands,
    time: Res<Time>,
    mut materials: ResMut<Assets<StandardMaterial>>,
    flashing: Query<(Entity, &DamageFlash, &PartTint, &MeshMaterial3d<StandardMaterial>)>,
) {
    let now = time.elapsed_secs();

    for (entity, flash, tint, material) in flashing.iter() {
        let over = flash.is_over(now);
        let color = if over { tint.0 } else { DamageFlash::COLOR };

        if let Some(material) = materials.get_mut(&material.0) {
            if material.base_color != color {
                material.base_color = color;
            }
        }
        if over {
            commands.entity(entity).remove::<DamageFlash>();
        }
    }
}
