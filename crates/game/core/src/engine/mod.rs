//! Energy-based turn scheduler.
//!
//! The [`Scheduler`] drives simulation time for every entity on the active
//! map. A turn moves through three phases:
//!
//! - **Harvesting**: every present entity, ordered by priority, is asked for
//!   its intentions given its spare energy
//! - **Draining**: a fixed-step sub-tick loop decays every accumulator and lets
//!   each entity with zero debt invoke its next queued action
//! - **Finalizing**: the day cycle and observers are notified and the player's
//!   remaining debt decides whether another turn follows immediately
//!
//! Chained turns are driven by [`Scheduler::advance`], which loops instead of
//! recursing.

mod errors;
mod hook;
mod report;
mod turns;

#[cfg(test)]
mod tests;

pub use errors::SchedulerError;
pub use hook::{DayCycle, TurnObserver};
pub use report::{ActionRecord, SchedulerPhase, TurnOutcome, TurnReport};

use crate::config::SchedulerConfig;
use crate::map::TurnMap;
use crate::state::{AccumulatorTable, EntityId, TurnClock};

/// Owns the accumulator table, the clock and the turn lifecycle hooks.
pub struct Scheduler {
    config: SchedulerConfig,
    player: EntityId,
    clock: TurnClock,
    accumulators: AccumulatorTable,
    phase: SchedulerPhase,
    player_delay: f64,
    halted: bool,
    observers: Vec<Box<dyn TurnObserver>>,
    day_cycle: Option<Box<dyn DayCycle>>,
}

impl Scheduler {
    /// Creates a scheduler for the given distinguished entity.
    pub fn new(config: SchedulerConfig, player: EntityId) -> Result<Self, SchedulerError> {
        config.validate()?;

        Ok(Self {
            config,
            player,
            clock: TurnClock::new(),
            accumulators: AccumulatorTable::new(),
            phase: SchedulerPhase::Idle,
            player_delay: 0.0,
            halted: false,
            observers: Vec::new(),
            day_cycle: None,
        })
    }

    pub fn config(&self) -> &SchedulerConfig {
        &self.config
    }

    /// The locally controlled entity governing early exit and game over.
    pub fn player(&self) -> EntityId {
        self.player
    }

    /// Hands control to another entity, e.g. after possession.
    pub fn set_player(&mut self, player: EntityId) {
        self.player = player;
    }

    /// Current clock value in turns.
    pub fn clock(&self) -> f64 {
        self.clock.current_time()
    }

    pub fn current_turn(&self) -> u64 {
        self.clock.current_turn()
    }

    pub fn accumulators(&self) -> &AccumulatorTable {
        &self.accumulators
    }

    /// Player debt captured at the end of the last finalized turn.
    pub fn current_player_delay(&self) -> f64 {
        self.player_delay
    }

    pub fn phase(&self) -> SchedulerPhase {
        self.phase
    }

    /// True once the player died; no further turns will run.
    pub fn is_halted(&self) -> bool {
        self.halted
    }

    /// Wipes every accumulator between turns, e.g. on a map transition.
    pub fn reset_accumulator(&mut self) {
        self.accumulators.reset();
    }

    pub fn add_observer(&mut self, observer: impl TurnObserver + 'static) {
        self.observers.push(Box::new(observer));
    }

    pub fn set_day_cycle(&mut self, day_cycle: impl DayCycle + 'static) {
        self.day_cycle = Some(Box::new(day_cycle));
    }

    /// Runs turns until the player no longer owes time.
    ///
    /// Each turn is finalized before the next begins. Stops after a reset, a
    /// turn that leaves the player with zero debt, or the player's death. A
    /// chain longer than `max_chained_turns` is handed back early with the
    /// player still in debt; calling `advance` again resumes it.
    pub fn advance<M: TurnMap>(&mut self, map: &mut M) -> Result<Vec<TurnReport>, SchedulerError> {
        let mut reports = Vec::new();

        loop {
            let report = self.run_turn(map)?;
            let continues = report.continues();
            reports.push(report);

            if !continues {
                return Ok(reports);
            }

            if reports.len() >= self.config.max_chained_turns {
                tracing::debug!(
                    target: "turn_core::scheduler",
                    turns = reports.len(),
                    player_delay = self.player_delay,
                    "Turn chain reached its bound, yielding with time still owed"
                );
                return Ok(reports);
            }

            tracing::debug!(
                target: "turn_core::scheduler",
                player_delay = self.player_delay,
                "Player still owes time, chaining another turn"
            );
        }
    }
}
