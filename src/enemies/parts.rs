//! Destructible parts of a multi-part enemy.
//!
//! Parts protect each other: a part listed in another part's `protected_by`
//! must be destroyed before that part takes damage. Protector names are
//! resolved to indices when the registry is built, and the protection graph
//! is checked for cycles so that every part can eventually be reached.

use bevy::prelude::*;

use super::data::PartDefinition;
use super::error::DefinitionError;

/// Index of a part within its registry.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct PartId(usize);

impl PartId {
    pub fn index(self) -> usize {
        self.0
    }
}

/// A single destructible part.
#[derive(Clone, Debug, PartialEq)]
pub struct Part {
    name: String,
    health: f32,
    protected_by: Vec<PartId>,
    /// Child entity that renders this part and carries its collider
    visual: Option<Entity>,
}

impl Part {
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn health(&self) -> f32 {
        self.health
    }

    pub fn protected_by(&self) -> &[PartId] {
        &self.protected_by
    }

    pub fn visual(&self) -> Option<Entity> {
        self.visual
    }

    pub fn is_destroyed(&self) -> bool {
        self.health <= 0.0
    }
}

/// The parts of one enemy, in definition order.
#[derive(Clone, Debug, PartialEq)]
pub struct PartRegistry {
    parts: Vec<Part>,
}

impl PartRegistry {
    pub fn new(definitions: &[PartDefinition]) -> Result<Self, DefinitionError> {
        if definitions.is_empty() {
            return Err(DefinitionError::NoParts);
        }

        for (index, definition) in definitions.iter().enumerate() {
            if !definition.health.is_finite() {
                return Err(DefinitionError::InvalidHealth {
                    part: definition.name.clone(),
                    health: definition.health,
                });
            }
            if definitions[..index].iter().any(|d| d.name == definition.name) {
                return Err(DefinitionError::DuplicatePart(definition.name.clone()));
            }
        }

        let resolve = |part: &PartDefinition, protector: &String| {
            if *protector == part.name {
                return Err(DefinitionError::SelfProtected(part.name.clone()));
            }
            definitions
                .iter()
                .position(|d| d.name == *protector)
                .map(PartId)
                .ok_or_else(|| DefinitionError::UnknownProtector {
                    part: part.name.clone(),
                    protector: protector.clone(),
                })
        };

        let parts = definitions
            .iter()
            .map(|definition| {
                let protected_by = definition
                    .protected_by
                    .iter()
                    .map(|protector| resolve(definition, protector))
                    .collect::<Result<Vec<_>, _>>()?;
                Ok(Part {
                    name: definition.name.clone(),
                    health: definition.health,
                    protected_by,
                    visual: None,
                })
            })
            .collect::<Result<Vec<_>, DefinitionError>>()?;

        let registry = Self { parts };
        registry.check_acyclic()?;
        Ok(registry)
    }

    fn check_acyclic(&self) -> Result<(), DefinitionError> {
        #[derive(Clone, Copy, PartialEq)]
        enum Mark {
            Unvisited,
            InProgress,
            Done,
        }

        fn visit(
            registry: &PartRegistry,
            id: PartId,
            marks: &mut [Mark],
        ) -> Result<(), DefinitionError> {
            match marks[id.0] {
                Mark::Done => return Ok(()),
                Mark::InProgress => {
                    return Err(DefinitionError::ProtectionCycle(
                        registry.parts[id.0].name.clone(),
                    ))
                }
                Mark::Unvisited => {}
            }
            marks[id.0] = Mark::InProgress;
            for &protector in &registry.parts[id.0].protected_by {
                visit(registry, protector, marks)?;
            }
            marks[id.0] = Mark::Done;
            Ok(())
        }

        let mut marks = vec![Mark::Unvisited; self.parts.len()];
        (0..self.parts.len()).try_for_each(|index| visit(self, PartId(index), &mut marks))
    }

    pub fn len(&self) -> usize {
        self.parts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.parts.is_empty()
    }

    pub fn get(&self, id: PartId) -> Option<&Part> {
        self.parts.get(id.0)
    }

    pub fn iter(&self) -> impl Iterator<Item = (PartId, &Part)> {
        self.parts.iter().enumerate().map(|(index, part)| (PartId(index), part))
    }

    pub fn find_by_name(&self, name: &str) -> Option<PartId> {
        self.parts.iter().position(|p| p.name == name).map(PartId)
    }

    pub fn find_by_visual(&self, visual: Entity) -> Option<PartId> {
        self.parts
            .iter()
            .position(|p| p.visual == Some(visual))
            .map(PartId)
    }

    /// Record the entity that renders a part, once it has been spawned.
    pub fn attach_visual(&mut self, id: PartId, visual: Entity) {
        if let Some(part) = self.parts.get_mut(id.0) {
            part.visual = Some(visual);
        }
    }

    /// A missing part counts as destroyed.
    pub fn is_destroyed(&self, id: PartId) -> bool {
        self.get(id).map_or(true, Part::is_destroyed)
    }

    pub fn is_destroyed_by_name(&self, name: &str) -> bool {
        self.find_by_name(name).map_or(true, |id| self.is_destroyed(id))
    }

    pub fn is_destroyed_by_visual(&self, visual: Entity) -> bool {
        self.find_by_visual(visual).map_or(true, |id| self.is_destroyed(id))
    }

    pub fn all_destroyed(&self) -> bool {
        self.parts.iter().all(Part::is_destroyed)
    }

    /// The first listed protector of `id` that is still intact, if any.
    pub fn first_surviving_protector(&self, id: PartId) -> Option<PartId> {
        self.get(id)?
            .protected_by
            .iter()
            .copied()
            .find(|&protector| !self.is_destroyed(protector))
    }

    /// Subtract damage from a part and return its remaining health.
    ///
    /// Negative amounts are ignored; parts are never healed.
    pub fn damage(&mut self, id: PartId, amount: f32) -> Option<f32> {
        let part = self.parts.get_mut(id.0)?;
        part.health -= amount.max(0.0);
        Some(part.health)
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use rstest::rstest;

    pub(crate) fn part(name: &str, health: f32, protected_by: &[&str]) -> PartDefinition {
        PartDefinition {
            name: name.to_string(),
            health,
            protected_by: protected_by.iter().map(|s| s.to_string()).collect(),
            ..default()
        }
    }

    fn fortress() -> PartRegistry {
        PartRegistry::new(&[
            part("wing_l", 10.0, &[]),
            part("wing_r", 10.0, &[]),
            part("cockpit", 20.0, &["wing_l", "wing_r"]),
            part("core", 40.0, &["cockpit"]),
        ])
        .unwrap()
    }

    #[test]
    fn protectors_resolve_to_indices() {
        let registry = fortress();
        let cockpit = registry.find_by_name("cockpit").unwrap();
        assert_eq!(
            registry.get(cockpit).unwrap().protected_by(),
            &[PartId(0), PartId(1)]
        );
        assert_eq!(registry.len(), 4);
    }

    #[test]
    fn missing_lookups_count_as_destroyed() {
        let registry = fortress();
        assert!(registry.is_destroyed_by_name("turret"));
        assert!(registry.is_destroyed_by_visual(Entity::from_raw(99)));
        assert!(registry.is_destroyed(PartId(17)));
        assert!(!registry.is_destroyed_by_name("core"));
    }

    #[test]
    fn visuals_are_matched_exactly() {
        let mut registry = fortress();
        let core = registry.find_by_name("core").unwrap();
        let visual = Entity::from_raw(42);
        registry.attach_visual(core, visual);

        assert_eq!(registry.find_by_visual(visual), Some(core));
        assert_eq!(registry.find_by_visual(Entity::from_raw(43)), None);
        assert!(!registry.is_destroyed_by_visual(visual));
    }

    #[test]
    fn first_surviving_protector_follows_list_order() {
        let mut registry = fortress();
        let cockpit = registry.find_by_name("cockpit").unwrap();
        let wing_l = registry.find_by_name("wing_l").unwrap();
        let wing_r = registry.find_by_name("wing_r").unwrap();

        assert_eq!(registry.first_surviving_protector(cockpit), Some(wing_l));
        registry.damage(wing_l, 10.0);
        assert_eq!(registry.first_surviving_protector(cockpit), Some(wing_r));
        registry.damage(wing_r, 25.0);
        assert_eq!(registry.first_surviving_protector(cockpit), None);
    }

    #[test]
    fn all_destroyed_only_when_every_part_is_down() {
        let mut registry = fortress();
        let ids: Vec<_> = registry.iter().map(|(id, _)| id).collect();
        for (n, &id) in ids.iter().enumerate() {
            assert!(!registry.all_destroyed(), "after {n} parts");
            registry.damage(id, 1000.0);
        }
        assert!(registry.all_destroyed());
    }

    #[test]
    fn damage_never_heals() {
        let mut registry = fortress();
        let core = registry.find_by_name("core").unwrap();
        assert_eq!(registry.damage(core, -5.0), Some(40.0));
        assert_eq!(registry.damage(core, 15.0), Some(25.0));
        assert_relative_eq!(registry.get(core).unwrap().health(), 25.0);
        assert_eq!(registry.damage(PartId(9), 1.0), None);
    }

    #[rstest]
    #[case(vec![], DefinitionError::NoParts)]
    #[case(
        vec![part("a", 1.0, &[]), part("a", 2.0, &[])],
        DefinitionError::DuplicatePart("a".into())
    )]
    #[case(
        vec![part("a", 1.0, &["ghost"])],
        DefinitionError::UnknownProtector { part: "a".into(), protector: "ghost".into() }
    )]
    #[case(vec![part("a", 1.0, &["a"])], DefinitionError::SelfProtected("a".into()))]
    #[case(
        vec![part("a", 1.0, &["b"]), part("b", 1.0, &["c"]), part("c", 1.0, &["a"])],
        DefinitionError::ProtectionCycle("a".into())
    )]
    #[case(
        vec![part("a", f32::INFINITY, &[])],
        DefinitionError::InvalidHealth { part: "a".into(), health: f32::INFINITY }
    )]
    fn invalid_registries_are_rejected(
        #[case] definitions: Vec<PartDefinition>,
        #[case] expected: DefinitionError,
    ) {
        assert_eq!(PartRegistry::new(&definitions), Err(expected));
    }
}
