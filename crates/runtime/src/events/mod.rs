//! Topic-based event bus for runtime events.
//!
//! Scheduler notifications are republished here so consumers can subscribe
//! only to the topics they need.

mod bus;
mod observer;
mod types;

pub use bus::{Event, EventBus, Topic};
pub use observer::BusObserver;
pub use types::{ActionEvent, TurnEvent};
