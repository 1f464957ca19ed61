//! Advisor registry for managing entity strategies.
//!
//! The [`AdvisorRegistry`] implements the Registry pattern to manage
//! advisors, supporting flexible entity-to-advisor mappings.
//!
//! # Design
//!
//! - **Advisor instances**: Stored by `AdvisorKind`, shared across entities
//! - **Entity mappings**: Each entity can be bound to a specific `AdvisorKind`
//! - **Fallback chain**: Entity mapping → Default advisor
//! - **Runtime changes**: Entities can switch advisors dynamically

use std::collections::HashMap;

use turn_core::EntityId;

use super::errors::{AdvisorError, AdvisorKind};
use super::providers::{AdviceContext, Advisor, IdleAdvisor, WaitAdvisor};
use crate::arena::ArenaCommand;

/// Registry for managing advisors with entity-specific bindings.
///
/// ```text
/// AdvisorRegistry
/// ├── advisors: HashMap<AdvisorKind, Advisor>  (advisor instances)
/// ├── entity_mappings: HashMap<EntityId, AdvisorKind>  (entity bindings)
/// └── default_kind: AdvisorKind  (fallback)
/// ```
pub struct AdvisorRegistry {
    advisors: HashMap<AdvisorKind, Box<dyn Advisor>>,

    /// Entity-to-advisor mappings (sparse - only non-default entities)
    entity_mappings: HashMap<EntityId, AdvisorKind>,

    default_kind: AdvisorKind,
}

impl AdvisorRegistry {
    /// Creates an empty registry falling back to the wait advisor.
    pub fn new() -> Self {
        Self {
            advisors: HashMap::new(),
            entity_mappings: HashMap::new(),
            default_kind: AdvisorKind::Wait,
        }
    }

    /// Creates a registry with the idle and wait advisors registered.
    pub fn with_defaults() -> Self {
        let mut registry = Self::new();
        registry.register(AdvisorKind::Idle, IdleAdvisor);
        registry.register(AdvisorKind::Wait, WaitAdvisor);
        registry
    }

    /// Register an advisor for a specific kind, replacing any previous one.
    pub fn register(&mut self, kind: AdvisorKind, advisor: impl Advisor + 'static) {
        self.advisors.insert(kind, Box::new(advisor));
    }

    /// Remove the advisor for a specific kind.
    ///
    /// Entities bound to this kind fail to resolve until rebound.
    pub fn unregister(&mut self, kind: AdvisorKind) -> Option<Box<dyn Advisor>> {
        self.advisors.remove(&kind)
    }

    /// Bind an entity to a specific advisor kind.
    pub fn bind_entity(&mut self, entity: EntityId, kind: AdvisorKind) {
        self.entity_mappings.insert(entity, kind);
    }

    /// Unbind an entity, reverting it to the default advisor.
    ///
    /// Returns the previous advisor kind if it was bound.
    pub fn unbind_entity(&mut self, entity: EntityId) -> Option<AdvisorKind> {
        self.entity_mappings.remove(&entity)
    }

    pub fn set_default(&mut self, kind: AdvisorKind) {
        self.default_kind = kind;
    }

    pub fn default_kind(&self) -> AdvisorKind {
        self.default_kind
    }

    /// Returns the explicitly bound kind, or the default if not bound.
    pub fn kind_for(&self, entity: EntityId) -> AdvisorKind {
        self.entity_mappings
            .get(&entity)
            .copied()
            .unwrap_or(self.default_kind)
    }

    pub fn has(&self, kind: AdvisorKind) -> bool {
        self.advisors.contains_key(&kind)
    }

    pub fn is_entity_bound(&self, entity: EntityId) -> bool {
        self.entity_mappings.contains_key(&entity)
    }

    pub fn advisor_count(&self) -> usize {
        self.advisors.len()
    }

    pub fn binding_count(&self) -> usize {
        self.entity_mappings.len()
    }

    /// Resolves the entity's advisor and asks it for commands.
    ///
    /// # Errors
    ///
    /// Returns `AdvisorError::NotRegistered` if the resolved kind has no
    /// registered advisor, or whatever the advisor itself fails with.
    pub fn advise(&mut self, ctx: &AdviceContext<'_>) -> Result<Vec<ArenaCommand>, AdvisorError> {
        let kind = self.kind_for(ctx.entity);
        let advisor = self
            .advisors
            .get_mut(&kind)
            .ok_or(AdvisorError::NotRegistered { kind })?;

        let commands = advisor.advise(ctx)?;
        tracing::trace!(
            target: "turn_runtime::advisors",
            advisor = advisor.name(),
            entity = %ctx.entity,
            count = commands.len(),
            "Advisor decided"
        );
        Ok(commands)
    }
}

impl Default for AdvisorRegistry {
    fn default() -> Self {
        Self::with_defaults()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::arena::{ArenaActor, ArenaState, RegionId};

    fn ctx(state: &ArenaState, entity: EntityId) -> AdviceContext<'_> {
        AdviceContext {
            entity,
            turn: 0,
            spare_energy: 1.0,
            state,
        }
    }

    #[test]
    fn unbound_entities_use_default_kind() {
        let mut registry = AdvisorRegistry::with_defaults();
        let state = ArenaState::new(RegionId(0), EntityId::PLAYER)
            .with_actor(ArenaActor::new(EntityId(1), "rat"));

        assert_eq!(registry.kind_for(EntityId(1)), AdvisorKind::Wait);
        let commands = registry.advise(&ctx(&state, EntityId(1))).unwrap();
        assert_eq!(commands, vec![ArenaCommand::Wait]);
    }

    #[test]
    fn bindings_override_default_and_can_be_removed() {
        let mut registry = AdvisorRegistry::with_defaults();
        let state = ArenaState::new(RegionId(0), EntityId::PLAYER);
        registry.bind_entity(EntityId::PLAYER, AdvisorKind::Idle);

        assert!(registry.advise(&ctx(&state, EntityId::PLAYER)).unwrap().is_empty());
        assert_eq!(registry.unbind_entity(EntityId::PLAYER), Some(AdvisorKind::Idle));
        assert!(!registry.is_entity_bound(EntityId::PLAYER));
    }

    #[test]
    fn missing_advisor_is_reported() {
        let mut registry = AdvisorRegistry::new();
        let state = ArenaState::new(RegionId(0), EntityId::PLAYER);

        let err = registry.advise(&ctx(&state, EntityId(3))).unwrap_err();
        assert_eq!(
            err,
            AdvisorError::NotRegistered {
                kind: AdvisorKind::Wait
            }
        );
    }
}
