//! Scheduling state owned by the scheduler: identities, the turn clock and the
//! accumulator table.

mod accumulator;
mod clock;
mod common;

pub use accumulator::AccumulatorTable;
pub use clock::TurnClock;
pub use common::{EntityId, round_to};
