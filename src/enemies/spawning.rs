//! Enemy spawning - builds enemy entities from their definitions and drops
//! new ones in at the top of the playfield on a timer.

use bevy::prelude::*;
use bevy_rapier3d::prelude::*;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use super::components::{Bounty, Enemy, EnemyType, PartTint, PartVisual};
use super::damage::Hull;
use super::data::{
    EnemyDefinition, EnemyRegistry, HullDefinition, MovementDefinition, PartDefinition,
};
use super::error::DefinitionError;
use super::movement::{Descent, EasedPath, Movement, Oscillation};
use super::parts::{PartId, PartRegistry};
use crate::core::GameConfig;
use crate::world::{BoundsCheck, PlayfieldBounds};

/// Random source for enemy placement and waypoints.
#[derive(Resource)]
pub struct EnemyRng(pub StdRng);

impl Default for EnemyRng {
    fn default() -> Self {
        Self(StdRng::from_entropy())
    }
}

impl EnemyRng {
    pub fn from_seed(seed: Option<u64>) -> Self {
        match seed {
            Some(seed) => Self(StdRng::seed_from_u64(seed)),
            None => Self::default(),
        }
    }
}

/// Repeating timer between enemy spawns.
#[derive(Resource)]
pub struct EnemySpawnTimer(pub Timer);

impl EnemySpawnTimer {
    pub fn from_config(config: &GameConfig) -> Self {
        Self(Timer::from_seconds(config.spawn_interval(), TimerMode::Repeating))
    }
}

/// Set up the spawn timer and random source from config.
pub fn setup_spawning(mut commands: Commands, config: Res<GameConfig>) {
    if let Some(seed) = config.rng_seed {
        info!("Seeding enemy randomness with {}", seed);
    }
    commands.insert_resource(EnemyRng::from_seed(config.rng_seed));
    commands.insert_resource(EnemySpawnTimer::from_config(&config));
}

/// Build the movement policy for a fresh enemy.
pub fn build_movement(
    definition: &EnemyDefinition,
    position: Vec3,
    now: f32,
    bounds: &PlayfieldBounds,
    rng: &mut impl Rng,
) -> Result<Movement, DefinitionError> {
    let movement = match definition.movement {
        MovementDefinition::Descend { speed } => {
            Movement::Descend(Descent::new(position, now, speed))
        }
        MovementDefinition::Oscillate {
            speed,
            wave_frequency,
            wave_width,
            wave_rot_y,
        } => Movement::Oscillate(Oscillation::new(
            Descent::new(position, now, speed),
            wave_frequency,
            wave_width,
            wave_rot_y,
        )?),
        MovementDefinition::Eased { duration } => Movement::Eased(EasedPath::new(
            position,
            now,
            duration,
            bounds.safe_area(definition.radius),
            rng,
        )?),
    };
    Ok(movement)
}

fn srgb((r, g, b): (f32, f32, f32)) -> Color {
    Color::srgb(r, g, b)
}

/// Colliders must report hits against kinematic projectiles.
fn hit_detection() -> (ActiveEvents, ActiveCollisionTypes) {
    (
        ActiveEvents::COLLISION_EVENTS,
        ActiveCollisionTypes::default() | ActiveCollisionTypes::KINEMATIC_KINEMATIC,
    )
}

/// Validated hull, ready to spawn.
enum Body<'a> {
    Single(f32),
    Parted(PartRegistry, &'a [PartDefinition]),
}

/// Spawn an enemy of the given type at `position`.
///
/// Single-hull enemies carry their mesh and collider on the root entity;
/// multi-part enemies get one child per part, and each child's entity is
/// recorded in the part registry so impacts can be matched back to parts.
#[allow(clippy::too_many_arguments)]
pub fn spawn_enemy(
    commands: &mut Commands,
    meshes: &mut Assets<Mesh>,
    materials: &mut Assets<StandardMaterial>,
    enemy_type: &str,
    definition: &EnemyDefinition,
    position: Vec3,
    now: f32,
    bounds: &PlayfieldBounds,
    rng: &mut impl Rng,
) -> Result<Entity, DefinitionError> {
    let movement = build_movement(definition, position, now, bounds, rng)?;
    let body = match &definition.hull {
        HullDefinition::Single { size } => Body::Single(*size),
        HullDefinition::Parted { parts } => Body::Parted(PartRegistry::new(parts)?, parts),
    };
    let color = srgb(definition.color);

    let mut root = commands.spawn((
        Enemy,
        EnemyType(enemy_type.to_string()),
        Name::new(definition.name.clone()),
        Bounty(definition.score),
        BoundsCheck::new(definition.radius),
        movement,
        Transform::from_translation(position),
        Visibility::default(),
        RigidBody::KinematicPositionBased,
    ));

    match body {
        Body::Single(size) => {
            root.insert((
                Hull::single(),
                Mesh3d(meshes.add(Cuboid::from_length(size))),
                MeshMaterial3d(materials.add(color)),
                Collider::cuboid(size / 2.0, size / 2.0, size / 2.0),
                hit_detection(),
            ));
        }
        Body::Parted(mut registry, parts) => {
            let ids: Vec<PartId> = registry.iter().map(|(id, _)| id).collect();
            let mut visuals = Vec::with_capacity(parts.len());

            root.with_children(|builder| {
                for (id, part) in ids.into_iter().zip(parts) {
                    let tint = part.color.map_or(color, srgb);
                    let half = part.size / 2.0;
                    let visual = builder
                        .spawn((
                            PartVisual(id),
                            PartTint(tint),
                            Name::new(part.name.clone()),
                            Mesh3d(meshes.add(Cuboid::from_length(part.size))),
                            MeshMaterial3d(materials.add(tint)),
                            Transform::from_xyz(part.offset.0, part.offset.1, 0.0),
                            Collider::cuboid(half, half, half),
                            hit_detection(),
                        ))
                        .id();
                    visuals.push((id, visual));
                }
            });

            for (id, visual) in visuals {
                registry.attach_visual(id, visual);
            }
            root.insert(Hull::parted(registry));
        }
    }

    Ok(root.id())
}

/// Drop a random enemy in above the top edge whenever the timer fires.
#[allow(clippy::too_many_arguments)]
pub fn spawn_enemies_over_time(
    mut commands: Commands,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<StandardMaterial>>,
    time: Res<Time>,
    mut timer: ResMut<EnemySpawnTimer>,
    mut rng: ResMut<EnemyRng>,
    registry: Res<EnemyRegistry>,
    config: Res<GameConfig>,
    bounds: Res<PlayfieldBounds>,
) {
    timer.0.tick(time.delta());
    if !timer.0.just_finished() || registry.is_empty() {
        return;
    }

    let index = rng.0.gen_range(0..registry.len());
    let Some((enemy_type, definition)) = registry.nth(index) else {
        return;
    };

    let half_width = (bounds.cam_width - config.enemy_default_padding).max(0.0);
    let x = if half_width > 0.0 {
        rng.0.gen_range(-half_width..=half_width)
    } else {
        0.0
    };
    let position = Vec3::new(x, bounds.cam_height + config.enemy_default_padding, 0.0);

    match spawn_enemy(
        &mut commands,
        &mut meshes,
        &mut materials,
        enemy_type,
        definition,
        position,
        time.elapsed_secs(),
        &bounds,
        &mut rng.0,
    ) {
        Ok(entity) => debug!("Spawned {} {:?} at {}", definition.name, entity, position),
        Err(e) => error!("Failed to spawn {}: {}", enemy_type, e),
    }
}
