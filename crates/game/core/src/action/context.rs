use crate::state::{AccumulatorTable, EntityId};

/// Mutable view handed to an action while it is being invoked.
///
/// Gives the action access to the map it mutates and to the single
/// cancellation primitive the scheduler honours: resetting the accumulator
/// table (e.g. when the player leaves the map mid-turn).
pub struct ActionContext<'a, M: ?Sized> {
    map: &'a mut M,
    accumulators: &'a mut AccumulatorTable,
    actor: EntityId,
    turn: u64,
    reset_requested: bool,
}

impl<'a, M: ?Sized> ActionContext<'a, M> {
    pub fn new(
        map: &'a mut M,
        accumulators: &'a mut AccumulatorTable,
        actor: EntityId,
        turn: u64,
    ) -> Self {
        Self {
            map,
            accumulators,
            actor,
            turn,
            reset_requested: false,
        }
    }

    /// Entity performing the action.
    pub fn actor(&self) -> EntityId {
        self.actor
    }

    /// Index of the turn being drained.
    pub fn turn(&self) -> u64 {
        self.turn
    }

    pub fn map(&self) -> &M {
        self.map
    }

    pub fn map_mut(&mut self) -> &mut M {
        self.map
    }

    /// Current debt of any entity, `0.0` if it was never scheduled.
    pub fn debt_of(&self, entity: EntityId) -> f64 {
        self.accumulators.get_or_default(entity)
    }

    /// Wipes every accumulator and cuts the current sub-tick short.
    ///
    /// The acting entity is re-armed with exactly the cost this action returns
    /// and the scheduler does not chain another turn after this one.
    pub fn reset_accumulators(&mut self) {
        self.accumulators.reset();
        self.reset_requested = true;
    }

    /// Whether this invocation raised the reset signal.
    pub fn reset_requested(&self) -> bool {
        self.reset_requested
    }
}
