//! Boundary between the scheduler and the world it drives.

use crate::action::Action;
use crate::state::EntityId;

/// Errors raised while an entity decides what to do this turn.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum IntentError {
    #[error("advisor for {entity} failed: {reason}")]
    Advisor { entity: EntityId, reason: String },

    #[error("entity {0} is not on the map")]
    UnknownEntity(EntityId),
}

/// The active map as seen by the scheduler.
///
/// Implementors own their entities and whatever advisors decide for them. The
/// scheduler only enumerates entities, asks each for intentions, and invokes
/// the returned actions against the map.
pub trait TurnMap {
    type Action: Action<Self>;

    /// Entities currently present, in enumeration order.
    ///
    /// Ties in priority keep this order.
    fn turn_takers(&self) -> Vec<EntityId>;

    /// Whether the entity is still present on the map.
    fn contains(&self, entity: EntityId) -> bool;

    /// Harvest priority; lower values decide and act earlier.
    fn priority(&self, entity: EntityId) -> f64;

    /// Returns the actions the entity wants to take this turn.
    ///
    /// `spare_energy` is `1 - debt`. Implementations decide here and must not
    /// mutate world state; mutation happens only when actions are invoked.
    fn collect_intentions(
        &mut self,
        entity: EntityId,
        turn: u64,
        spare_energy: f64,
    ) -> Result<Vec<Self::Action>, IntentError>;

    /// Whether the entity is flagged dead.
    fn is_dead(&self, entity: EntityId) -> bool;
}
