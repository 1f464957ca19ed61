use serde::{Deserialize, Serialize};
use turn_core::EntityId;

use super::actor::{ArenaActor, RegionId};

/// World data of the arena: every actor across every region, plus which
/// region is currently active.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ArenaState {
    actors: Vec<ArenaActor>,
    active_region: RegionId,
    player: EntityId,
}

impl ArenaState {
    pub fn new(active_region: RegionId, player: EntityId) -> Self {
        Self {
            actors: Vec::new(),
            active_region,
            player,
        }
    }

    pub fn with_actor(mut self, actor: ArenaActor) -> Self {
        self.insert(actor);
        self
    }

    /// Adds an actor, replacing any actor with the same id.
    pub fn insert(&mut self, actor: ArenaActor) {
        match self.actors.iter_mut().find(|a| a.id == actor.id) {
            Some(existing) => *existing = actor,
            None => self.actors.push(actor),
        }
    }

    pub fn player(&self) -> EntityId {
        self.player
    }

    pub fn player_actor(&self) -> Option<&ArenaActor> {
        self.actor(self.player)
    }

    pub fn active_region(&self) -> RegionId {
        self.active_region
    }

    pub fn set_active_region(&mut self, region: RegionId) {
        self.active_region = region;
    }

    pub fn actor(&self, id: EntityId) -> Option<&ArenaActor> {
        self.actors.iter().find(|a| a.id == id)
    }

    pub fn actor_mut(&mut self, id: EntityId) -> Option<&mut ArenaActor> {
        self.actors.iter_mut().find(|a| a.id == id)
    }

    pub fn actors(&self) -> &[ArenaActor] {
        &self.actors
    }

    /// Alive and standing in the active region.
    pub fn is_present(&self, id: EntityId) -> bool {
        self.actor(id)
            .is_some_and(|a| a.alive && a.region == self.active_region)
    }

    /// Actors taking part in scheduling, in spawn order.
    pub fn present(&self) -> impl Iterator<Item = &ArenaActor> + '_ {
        self.actors
            .iter()
            .filter(|a| a.alive && a.region == self.active_region)
    }

    /// Whether a living actor other than `except` stands on the tile.
    pub fn is_occupied(&self, region: RegionId, position: i32, except: EntityId) -> bool {
        self.actors
            .iter()
            .any(|a| a.id != except && a.alive && a.region == region && a.position == position)
    }
}
