use strum::{AsRefStr, Display};

use crate::state::EntityId;

/// Where the scheduler currently is within a turn.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Display, AsRefStr)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(serialize_all = "snake_case")]
pub enum SchedulerPhase {
    #[default]
    Idle,
    Harvesting,
    Draining,
    Finalizing,
}

/// How a single turn ended.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Display)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(serialize_all = "snake_case")]
pub enum TurnOutcome {
    /// The drain finished (fully or through the player early exit) and the
    /// turn was finalized.
    Completed,
    /// The player died mid-drain; nothing was finalized.
    PlayerDied,
}

/// One successfully invoked action.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ActionRecord {
    pub entity: EntityId,
    /// Zero-based sub-tick of the drain the action ran in.
    pub sub_tick: u32,
    /// Cost returned by the action.
    pub cost: f64,
    /// Entity debt right after the action was charged.
    pub accumulator: f64,
}

/// Summary of one Harvesting → Draining → Finalizing pass.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TurnReport {
    pub turn: u64,
    /// Clock value once the turn began.
    pub started_at: f64,
    /// Clock value when draining stopped.
    pub ended_at: f64,
    /// Number of sub-ticks that were processed.
    pub sub_ticks: u32,
    /// Sub-tick progress handed to the day cycle.
    pub progress: f64,
    /// The drain stopped because the player had nothing left to do.
    pub ended_early: bool,
    /// The accumulator table was reset during this turn.
    pub reset: bool,
    /// Player debt captured at finalization.
    pub player_delay: f64,
    pub outcome: TurnOutcome,
    pub actions: Vec<ActionRecord>,
}

impl TurnReport {
    pub(crate) fn new(turn: u64, started_at: f64) -> Self {
        Self {
            turn,
            started_at,
            ended_at: started_at,
            sub_ticks: 0,
            progress: 0.0,
            ended_early: false,
            reset: false,
            player_delay: 0.0,
            outcome: TurnOutcome::Completed,
            actions: Vec::new(),
        }
    }

    /// Whether another turn should run immediately without new input.
    pub fn continues(&self) -> bool {
        self.outcome == TurnOutcome::Completed && !self.reset && self.player_delay > 0.0
    }

    /// Actions performed by a given entity, in execution order.
    pub fn actions_of(&self, entity: EntityId) -> impl Iterator<Item = &ActionRecord> + '_ {
        self.actions.iter().filter(move |r| r.entity == entity)
    }
}
