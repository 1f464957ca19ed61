//! Per-entity queue of explicit intentions.
//!
//! Direct input handling (a key press, a scripted fixture) pushes commands here
//! ahead of time. When the scheduler harvests an entity, queued commands are
//! handed over first and the entity's advisor is only consulted once the
//! queue is empty.

use std::collections::{HashMap, VecDeque};

use turn_core::EntityId;

#[derive(Clone, Debug)]
pub struct IntentQueue<A> {
    queues: HashMap<EntityId, VecDeque<A>>,
}

impl<A> IntentQueue<A> {
    pub fn new() -> Self {
        Self {
            queues: HashMap::new(),
        }
    }

    /// Appends a command to the back of the entity's queue.
    pub fn push(&mut self, entity: EntityId, intent: A) {
        self.queues.entry(entity).or_default().push_back(intent);
    }

    pub fn extend(&mut self, entity: EntityId, intents: impl IntoIterator<Item = A>) {
        self.queues.entry(entity).or_default().extend(intents);
    }

    /// Returns true if the entity has queued commands.
    pub fn has_pending(&self, entity: EntityId) -> bool {
        self.queues.get(&entity).is_some_and(|q| !q.is_empty())
    }

    pub fn len(&self, entity: EntityId) -> usize {
        self.queues.get(&entity).map_or(0, VecDeque::len)
    }

    /// Total number of queued commands across all entities.
    pub fn total(&self) -> usize {
        self.queues.values().map(VecDeque::len).sum()
    }

    /// Removes and returns every queued command for the entity, in FIFO order.
    pub fn drain(&mut self, entity: EntityId) -> Vec<A> {
        self.queues
            .get_mut(&entity)
            .map(|q| q.drain(..).collect())
            .unwrap_or_default()
    }

    /// Drops the entity's queue, e.g. when it leaves the map.
    pub fn clear(&mut self, entity: EntityId) {
        self.queues.remove(&entity);
    }

    /// Drops every queue, e.g. when the active map changes.
    pub fn clear_all(&mut self) {
        self.queues.clear();
    }

    /// Hands over queued commands, falling back to `advise` when none are queued.
    pub fn collect_with<E>(
        &mut self,
        entity: EntityId,
        advise: impl FnOnce() -> Result<Vec<A>, E>,
    ) -> Result<Vec<A>, E> {
        if self.has_pending(entity) {
            Ok(self.drain(entity))
        } else {
            advise()
        }
    }
}

impl<A> Default for IntentQueue<A> {
    fn default() -> Self {
        Self::new()
    }
}
