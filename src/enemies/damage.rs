//! Impact resolution for enemy hulls.
//!
//! `Hull::resolve_impact` is the whole damage state machine: it decides
//! whether a hit counts, which part it struck, whether that part is still
//! shielded by others, and whether the enemy is now destroyed. It only
//! mutates part health and the hull's destroyed flag; despawning, scoring
//! and visual feedback are left to the caller, driven by the outcome.

use bevy::prelude::*;

use super::error::ImpactError;
use super::parts::{PartId, PartRegistry};

/// What an impact did.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ImpactOutcome {
    /// Off screen, or the enemy was already destroyed
    Ignored,
    /// `part` is shielded by the still intact `protector`
    Protected { part: PartId, protector: PartId },
    /// `part` lost health but survives
    Applied { part: PartId },
    /// `part` was destroyed; other parts remain
    PartDestroyed { part: PartId },
    /// The whole enemy is destroyed. `part` is the part that took the final
    /// hit, absent for single-hull enemies.
    EntityDestroyed { part: Option<PartId> },
}

impl ImpactOutcome {
    /// The part that took damage, if any.
    pub fn damaged_part(&self) -> Option<PartId> {
        match *self {
            Self::Applied { part } | Self::PartDestroyed { part } => Some(part),
            Self::EntityDestroyed { part } => part,
            Self::Ignored | Self::Protected { .. } => None,
        }
    }

    /// Whether the damaged part reached zero health.
    pub fn destroys_part(&self) -> bool {
        matches!(
            self,
            Self::PartDestroyed { .. } | Self::EntityDestroyed { part: Some(_) }
        )
    }
}

/// Damage model of an enemy.
#[derive(Clone, Debug, PartialEq)]
pub enum HullKind {
    /// Any valid hit destroys the enemy.
    Single,
    /// Independently destructible parts.
    Parted(PartRegistry),
}

/// Damage state of an enemy.
#[derive(Component, Clone, Debug, PartialEq)]
pub struct Hull {
    kind: HullKind,
    destroyed: bool,
}

impl Hull {
    pub fn single() -> Self {
        Self {
            kind: HullKind::Single,
            destroyed: false,
        }
    }

    pub fn parted(parts: PartRegistry) -> Self {
        Self {
            kind: HullKind::Parted(parts),
            destroyed: false,
        }
    }

    pub fn parts(&self) -> Option<&PartRegistry> {
        match &self.kind {
            HullKind::Parted(parts) => Some(parts),
            HullKind::Single => None,
        }
    }

    pub fn parts_mut(&mut self) -> Option<&mut PartRegistry> {
        match &mut self.kind {
            HullKind::Parted(parts) => Some(parts),
            HullKind::Single => None,
        }
    }

    pub fn is_destroyed(&self) -> bool {
        self.destroyed
    }

    /// Resolve one projectile impact.
    ///
    /// `contacts` are the colliding surfaces in the order the collision
    /// source reported them; the struck part is looked up from the first,
    /// then the second. Failing both is a `PartNotFound` error.
    pub fn resolve_impact(
        &mut self,
        on_screen: bool,
        contacts: &[Entity],
        damage: f32,
    ) -> Result<ImpactOutcome, ImpactError> {
        if self.destroyed || !on_screen {
            return Ok(ImpactOutcome::Ignored);
        }

        let parts = match &mut self.kind {
            HullKind::Single => {
                self.destroyed = true;
                return Ok(ImpactOutcome::EntityDestroyed { part: None });
            }
            HullKind::Parted(parts) => parts,
        };

        let part = contacts
            .iter()
            .take(2)
            .find_map(|&contact| parts.find_by_visual(contact))
            .ok_or_else(|| {
                let first = contacts.first().copied().unwrap_or(Entity::PLACEHOLDER);
                let second = contacts.get(1).copied().unwrap_or(Entity::PLACEHOLDER);
                ImpactError::PartNotFound(first, second)
            })?;

        // Its collider may outlive it by a frame
        if parts.is_destroyed(part) {
            return Ok(ImpactOutcome::Ignored);
        }

        if let Some(protector) = parts.first_surviving_protector(part) {
            return Ok(ImpactOutcome::Protected { part, protector });
        }

        parts.damage(part, damage);

        if !parts.is_destroyed(part) {
            return Ok(ImpactOutcome::Applied { part });
        }

        if parts.all_destroyed() {
            self.destroyed = true;
            Ok(ImpactOutcome::EntityDestroyed { part: Some(part) })
        } else {
            Ok(ImpactOutcome::PartDestroyed { part })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::enemies::parts::tests::part;
    use approx::assert_relative_eq;

    const HULL_VISUAL: Entity = Entity::from_raw(10);
    const CORE_VISUAL: Entity = Entity::from_raw(11);
    const PROJECTILE: Entity = Entity::from_raw(50);

    /// Two parts: the core is shielded by the hull.
    fn boss() -> (Hull, PartId, PartId) {
        let mut parts = PartRegistry::new(&[
            part("hull", 100.0, &[]),
            part("core", 50.0, &["hull"]),
        ])
        .unwrap();
        let hull = parts.find_by_name("hull").unwrap();
        let core = parts.find_by_name("core").unwrap();
        parts.attach_visual(hull, HULL_VISUAL);
        parts.attach_visual(core, CORE_VISUAL);
        (Hull::parted(parts), hull, core)
    }

    fn health(hull: &Hull, id: PartId) -> f32 {
        hull.parts().unwrap().get(id).unwrap().health()
    }

    #[test]
    fn protected_core_then_destroyed_boss() {
        let (mut boss, hull, core) = boss();

        let outcome = boss.resolve_impact(true, &[CORE_VISUAL, PROJECTILE], 60.0);
        assert_eq!(outcome, Ok(ImpactOutcome::Protected { part: core, protector: hull }));
        assert_relative_eq!(health(&boss, core), 50.0);

        let outcome = boss.resolve_impact(true, &[HULL_VISUAL, PROJECTILE], 100.0);
        assert_eq!(outcome, Ok(ImpactOutcome::PartDestroyed { part: hull }));
        assert_relative_eq!(health(&boss, hull), 0.0);

        let outcome = boss.resolve_impact(true, &[CORE_VISUAL, PROJECTILE], 60.0);
        assert_eq!(outcome, Ok(ImpactOutcome::EntityDestroyed { part: Some(core) }));
        assert_relative_eq!(health(&boss, core), -10.0);
        assert!(boss.parts().unwrap().all_destroyed());
        assert!(boss.is_destroyed());
    }

    #[test]
    fn damage_that_leaves_health_is_applied() {
        let (mut boss, hull, _) = boss();
        let outcome = boss.resolve_impact(true, &[HULL_VISUAL, PROJECTILE], 30.0);
        assert_eq!(outcome, Ok(ImpactOutcome::Applied { part: hull }));
        assert_relative_eq!(health(&boss, hull), 70.0);
        assert_eq!(outcome.unwrap().damaged_part(), Some(hull));
        assert!(!outcome.unwrap().destroys_part());
    }

    #[test]
    fn off_screen_impacts_are_ignored() {
        let (mut boss, hull, core) = boss();
        let outcome = boss.resolve_impact(false, &[HULL_VISUAL, PROJECTILE], 500.0);
        assert_eq!(outcome, Ok(ImpactOutcome::Ignored));
        assert_relative_eq!(health(&boss, hull), 100.0);
        assert_relative_eq!(health(&boss, core), 50.0);
    }

    #[test]
    fn struck_part_falls_back_to_second_contact() {
        let (mut boss, hull, _) = boss();
        let outcome = boss.resolve_impact(true, &[PROJECTILE, HULL_VISUAL], 1.0);
        assert_eq!(outcome, Ok(ImpactOutcome::Applied { part: hull }));
    }

    #[test]
    fn unmatched_contacts_are_a_lookup_miss() {
        let (mut boss, hull, _) = boss();
        let stray = Entity::from_raw(77);
        let outcome = boss.resolve_impact(true, &[stray, PROJECTILE], 1.0);
        assert_eq!(outcome, Err(ImpactError::PartNotFound(stray, PROJECTILE)));
        assert_relative_eq!(health(&boss, hull), 100.0);
        assert!(!boss.is_destroyed());
    }

    #[test]
    fn destroyed_part_takes_no_further_hits() {
        let (mut boss, hull, core) = boss();
        let outcome = boss.resolve_impact(true, &[HULL_VISUAL, PROJECTILE], 100.0);
        assert_eq!(outcome, Ok(ImpactOutcome::PartDestroyed { part: hull }));

        let outcome = boss.resolve_impact(true, &[HULL_VISUAL, PROJECTILE], 100.0);
        assert_eq!(outcome, Ok(ImpactOutcome::Ignored));
        assert_relative_eq!(health(&boss, hull), 0.0);
        assert_relative_eq!(health(&boss, core), 50.0);
        assert!(!boss.is_destroyed());
    }

    #[test]
    fn destruction_happens_once() {
        let (mut boss, hull, core) = boss();
        boss.resolve_impact(true, &[HULL_VISUAL], 100.0).unwrap();
        boss.resolve_impact(true, &[CORE_VISUAL], 50.0).unwrap();
        assert!(boss.is_destroyed());

        let outcome = boss.resolve_impact(true, &[CORE_VISUAL], 50.0);
        assert_eq!(outcome, Ok(ImpactOutcome::Ignored));
        assert_relative_eq!(health(&boss, core), 0.0);
        assert_relative_eq!(health(&boss, hull), 0.0);
    }

    #[test]
    fn single_hull_dies_on_first_hit() {
        let mut drone = Hull::single();
        let outcome = drone.resolve_impact(true, &[PROJECTILE], 0.0);
        assert_eq!(outcome, Ok(ImpactOutcome::EntityDestroyed { part: None }));
        assert!(!outcome.unwrap().destroys_part());
        assert_eq!(drone.resolve_impact(true, &[PROJECTILE], 1.0), Ok(ImpactOutcome::Ignored));
    }

    #[test]
    fn single_hull_off_screen_survives() {
        let mut drone = Hull::single();
        assert_eq!(drone.resolve_impact(false, &[PROJECTILE], 1.0), Ok(ImpactOutcome::Ignored));
        assert!(!drone.is_destroyed());
        assert!(drone.parts().is_none());
    }

    #[test]
    fn protection_waits_for_every_protector() {
        let mut parts = PartRegistry::new(&[
            part("left", 5.0, &[]),
            part("right", 5.0, &[]),
            part("core", 5.0, &["left", "right"]),
        ])
        .unwrap();
        let ids: Vec<_> = ["left", "right", "core"]
            .iter()
            .map(|name| parts.find_by_name(name).unwrap())
            .collect();
        for (n, &id) in ids.iter().enumerate() {
            parts.attach_visual(id, Entity::from_raw(n as u32));
        }
        let mut boss = Hull::parted(parts);
        let (left, right, core) = (ids[0], ids[1], ids[2]);
        let core_visual = Entity::from_raw(2);

        boss.resolve_impact(true, &[Entity::from_raw(0)], 5.0).unwrap();
        assert_eq!(
            boss.resolve_impact(true, &[core_visual], 5.0),
            Ok(ImpactOutcome::Protected { part: core, protector: right })
        );
        boss.resolve_impact(true, &[Entity::from_raw(1)], 5.0).unwrap();
        assert_eq!(
            boss.resolve_impact(true, &[core_visual], 5.0),
            Ok(ImpactOutcome::EntityDestroyed { part: Some(core) })
        );
        assert!(boss.parts().unwrap().is_destroyed(left));
    }
}
