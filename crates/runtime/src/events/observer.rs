use turn_core::{ActionRecord, EntityId, TurnObserver};

use super::bus::{Event, EventBus};
use super::types::{ActionEvent, TurnEvent};

/// Bridges scheduler notifications onto the event bus.
pub struct BusObserver {
    bus: EventBus,
}

impl BusObserver {
    pub fn new(bus: EventBus) -> Self {
        Self { bus }
    }
}

impl TurnObserver for BusObserver {
    fn name(&self) -> &'static str {
        "event_bus"
    }

    fn on_turn_started(&mut self, turn: u64) {
        self.bus.publish(Event::Turn(TurnEvent::Started { turn }));
    }

    fn on_turn_ended(&mut self, clock: f64) {
        self.bus.publish(Event::Turn(TurnEvent::Ended { clock }));
    }

    fn on_action(&mut self, record: &ActionRecord) {
        self.bus.publish(Event::Action(ActionEvent::from(record)));
    }

    fn on_fatal(&mut self, entity: EntityId) {
        self.bus.publish(Event::Turn(TurnEvent::PlayerDied { entity }));
    }
}
