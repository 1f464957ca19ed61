//! Deferred units of work executed by the scheduler.
//!
//! Actions are tagged command values: the map decides *what* an entity wants
//! to do when intentions are collected, and the scheduler later invokes each
//! command exactly once, in FIFO order per entity. Invocation performs one
//! atomic change to the map and reports how long it took.
//!
//! # Cost semantics
//!
//! - `1.0` consumes exactly one turn
//! - `0.2` lets five such actions fit in the time of one turn
//! - `> 1.0` keeps the entity unavailable for several turns
//! - `0.0` is instantaneous; the entity stays eligible on the next sub-tick

mod context;
mod error;

pub use context::ActionContext;
pub use error::ActionError;

/// A command that mutates the map `M` and returns its cost in turns.
pub trait Action<M: ?Sized> {
    /// Performs the action and returns its cost.
    fn invoke(self, ctx: &mut ActionContext<'_, M>) -> Result<f64, ActionError>;
}

/// Checks a cost returned by an action.
pub fn validate_cost(cost: f64) -> Result<f64, ActionError> {
    if cost.is_finite() && cost >= 0.0 {
        Ok(cost)
    } else {
        Err(ActionError::InvalidCost(cost))
    }
}
