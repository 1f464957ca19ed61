//! Event types for different topics.

use serde::{Deserialize, Serialize};
use turn_core::{ActionRecord, EntityId};

/// Events related to turn management (lightweight)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum TurnEvent {
    /// Intentions are being harvested for this turn.
    Started { turn: u64 },
    /// The drain completed; carries the clock at its end.
    Ended { clock: f64 },
    /// The player died mid-drain and the scheduler halted.
    PlayerDied { entity: EntityId },
}

/// Events related to individual actions.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum ActionEvent {
    /// An action ran and its actor was re-armed.
    Executed {
        entity: EntityId,
        sub_tick: u32,
        cost: f64,
        accumulator: f64,
    },
}

impl From<&ActionRecord> for ActionEvent {
    fn from(record: &ActionRecord) -> Self {
        ActionEvent::Executed {
            entity: record.entity,
            sub_tick: record.sub_tick,
            cost: record.cost,
            accumulator: record.accumulator,
        }
    }
}
