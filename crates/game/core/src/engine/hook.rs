//! Observer hooks fired around each turn.
//!
//! Observers are notified synchronously, in registration order, before the
//! scheduler proceeds.

use crate::engine::ActionRecord;
use crate::state::EntityId;

/// Turn lifecycle listener.
pub trait TurnObserver: Send {
    /// Returns a human-readable name for this observer (used in logging).
    fn name(&self) -> &'static str {
        "observer"
    }

    /// Fired once per harvest with the index of the turn about to drain.
    fn on_turn_started(&mut self, turn: u64);

    /// Fired once per completed drain with the clock value at its end.
    fn on_turn_ended(&mut self, clock: f64);

    /// Fired after every successfully invoked action.
    fn on_action(&mut self, _record: &ActionRecord) {}

    /// Fired when the player died and the drain was aborted.
    fn on_fatal(&mut self, _entity: EntityId) {}
}

/// Day/night sink fed with the sub-tick progress of each completed drain.
pub trait DayCycle: Send {
    fn advance(&mut self, progress: f64);
}
