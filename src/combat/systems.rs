//! Combat systems - turn physics contacts into impact events.

use bevy::prelude::*;
use bevy_rapier3d::prelude::*;

use super::components::Projectile;
use crate::core::{GameState, ImpactEvent};
use crate::enemies::Enemy;

/// System set ordering for combat.
#[derive(SystemSet, Debug, Clone, PartialEq, Eq, Hash)]
pub enum CombatSet {
    /// Collision events are converted into impact events
    Detect,
}

/// Configure combat systems.
pub fn setup_combat_systems(app: &mut App) {
    app.configure_sets(Update, CombatSet::Detect.run_if(in_state(GameState::InGame)))
        .add_systems(Update, collect_projectile_impacts.in_set(CombatSet::Detect));
}

/// Read rapier collision events and emit an `ImpactEvent` for every new
/// contact between a projectile and a collider that belongs to an enemy.
///
/// The collider may sit on the enemy root (single-hull enemies) or on one of
/// its part children, so the root is found through `Parent`.
pub fn collect_projectile_impacts(
    mut collisions: EventReader<CollisionEvent>,
    projectiles: Query<&Projectile>,
    enemies: Query<(), With<Enemy>>,
    parents: Query<&Parent>,
    mut impacts: EventWriter<ImpactEvent>,
) {
    for collision in collisions.read() {
        let &CollisionEvent::Started(first, second, _) = collision else {
            continue;
        };

        let (projectile, weapon, other) = match (projectiles.get(first), projectiles.get(second)) {
            (Ok(p), Err(_)) => (first, p.weapon, second),
            (Err(_), Ok(p)) => (second, p.weapon, first),
            // Projectile on projectile, or nothing we care about
            _ => continue,
        };

        let enemy = if enemies.contains(other) {
            other
        } else {
            match parents.get(other) {
                Ok(parent) if enemies.contains(parent.get()) => parent.get(),
                _ => continue,
            }
        };

        impacts.send(ImpactEvent {
            enemy,
            projectile,
            weapon,
            contacts: [first, second],
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::combat::WeaponType;
    use bevy_rapier3d::rapier::geometry::CollisionEventFlags;

    #[derive(Resource, Default)]
    struct Received(Vec<ImpactEvent>);

    fn record_impacts(mut events: EventReader<ImpactEvent>, mut received: ResMut<Received>) {
        received.0.extend(events.read().copied());
    }

    fn impact_test_app() -> App {
        let mut app = App::new();
        app.add_plugins(MinimalPlugins)
            .add_event::<CollisionEvent>()
            .add_event::<ImpactEvent>()
            .init_resource::<Received>()
            .add_systems(Update, (collect_projectile_impacts, record_impacts).chain());
        app
    }

    #[test]
    fn part_collider_resolves_to_enemy_root() {
        let mut app = impact_test_app();
        let enemy = app.world_mut().spawn(Enemy).id();
        let part = app.world_mut().spawn_empty().set_parent(enemy).id();
        let projectile = app
            .world_mut()
            .spawn(Projectile::new(WeaponType::Missile))
            .id();

        app.world_mut().send_event(CollisionEvent::Started(
            part,
            projectile,
            CollisionEventFlags::empty(),
        ));
        app.update();

        let received = &app.world().resource::<Received>().0;
        assert_eq!(received.len(), 1);
        let impact = received[0];
        assert_eq!(impact.enemy, enemy);
        assert_eq!(impact.projectile, projectile);
        assert_eq!(impact.weapon, WeaponType::Missile);
        assert_eq!(impact.contacts, [part, projectile]);
    }

    #[test]
    fn unrelated_collisions_are_dropped() {
        let mut app = impact_test_app();
        let wall = app.world_mut().spawn_empty().id();
        let projectile = app.world_mut().spawn(Projectile::new(WeaponType::Blaster)).id();
        let enemy = app.world_mut().spawn(Enemy).id();

        app.world_mut().send_event(CollisionEvent::Started(
            wall,
            projectile,
            CollisionEventFlags::empty(),
        ));
        app.world_mut().send_event(CollisionEvent::Stopped(
            enemy,
            projectile,
            CollisionEventFlags::empty(),
        ));
        app.update();

        assert!(app.world().resource::<Received>().0.is_empty());
    }
}
