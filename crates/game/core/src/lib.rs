//! Deterministic, energy-based turn scheduling.
//!
//! `turn-core` decides, for every turn, which entities act, in what order and
//! how much of the shared time budget each action consumes. Entities carry a
//! debt in the [`AccumulatorTable`]; the [`Scheduler`] decays every debt in
//! fixed sub-tick steps and lets an entity invoke its next queued action once
//! its debt reaches zero.
//!
//! The world is reached only through the [`TurnMap`] trait, so the same
//! scheduler drives any map that can enumerate entities and turn their
//! intentions into [`Action`] commands.
pub mod action;
pub mod config;
pub mod engine;
pub mod map;
pub mod state;

pub use action::{Action, ActionContext, ActionError};
pub use config::{ConfigError, SchedulerConfig};
pub use engine::{
    ActionRecord, DayCycle, Scheduler, SchedulerError, SchedulerPhase, TurnObserver, TurnOutcome,
    TurnReport,
};
pub use map::{IntentError, TurnMap};
pub use state::{AccumulatorTable, EntityId, TurnClock};
