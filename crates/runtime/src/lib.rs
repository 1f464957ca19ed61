//! Runtime orchestration around the turn scheduler.
//!
//! This crate wires a reference arena map, intent sourcing and a topic-based
//! event bus around [`turn_core::Scheduler`]. Consumers embed [`Runtime`] to
//! drive turns, feed player input and subscribe to events.
//!
//! Modules are organized by responsibility:
//! - [`runtime`] hosts the orchestrator and builder
//! - [`api`] exposes the types downstream clients interact with
//! - [`arena`] is the map the scheduler drives
//! - [`intents`] buffers explicit per-entity commands between turns
//! - [`providers`] contains the stock advisors and input sources
//! - [`events`] provides topic-based event bus for flexible event routing
pub mod api;
pub mod arena;
pub mod events;
pub mod intents;
pub mod providers;
pub mod runtime;

pub use api::{
    Advisor, AdvisorError, AdvisorKind, AdvisorRegistry, InputProvider, Result, RuntimeError,
};
pub use arena::{Arena, ArenaActor, ArenaCommand, ArenaState, DayNight, DayPhase, RegionId};
pub use events::{ActionEvent, BusObserver, Event, EventBus, Topic, TurnEvent};
pub use intents::IntentQueue;
pub use providers::{ChannelInput, ChaseAdvisor, ScriptedAdvisor, ScriptedInput};
pub use runtime::{Runtime, RuntimeBuilder, RuntimeConfig};
