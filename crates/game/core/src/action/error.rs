//! Action invocation errors.

use crate::state::EntityId;

/// Errors an action can surface when invoked by the scheduler.
///
/// Failures are isolated to the acting entity: the scheduler logs them and
/// moves on to the next entity in the sub-tick.
#[derive(Clone, Debug, PartialEq, thiserror::Error)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ActionError {
    /// The action could not be carried out in the current world state.
    #[error("action rejected: {0}")]
    Rejected(String),

    /// The acting entity is no longer present on the map.
    #[error("actor {0} is not on the map")]
    ActorMissing(EntityId),

    /// The action returned a cost that is negative, infinite or NaN.
    #[error("invalid action cost {0}")]
    InvalidCost(f64),
}

impl ActionError {
    pub fn rejected(reason: impl Into<String>) -> Self {
        Self::Rejected(reason.into())
    }
}
