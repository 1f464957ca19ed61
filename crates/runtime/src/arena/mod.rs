//! Reference map driven by the scheduler.
//!
//! A small multi-region arena: actors stand on a one-dimensional track per
//! region, act at speed-scaled costs and are advised by registered
//! strategies. Only actors that are alive and in the active region take part
//! in a turn.

mod actor;
mod command;
mod day;
mod state;

pub use actor::{ArenaActor, RegionId};
pub use command::ArenaCommand;
pub use day::{DayNight, DayPhase};
pub use state::ArenaState;

use turn_core::{EntityId, IntentError, TurnMap};

use crate::api::{AdviceContext, AdvisorKind, AdvisorRegistry, RuntimeError};
use crate::intents::IntentQueue;

/// Arena world: state, explicit intents and advisors.
pub struct Arena {
    state: ArenaState,
    intents: IntentQueue<ArenaCommand>,
    advisors: AdvisorRegistry,
}

impl Arena {
    /// Creates an arena with the default advisors; the player is bound to the
    /// idle advisor so it only acts on explicit input.
    pub fn new(state: ArenaState) -> Self {
        let mut advisors = AdvisorRegistry::with_defaults();
        advisors.bind_entity(state.player(), AdvisorKind::Idle);
        Self::with_advisors(state, advisors)
    }

    pub fn with_advisors(state: ArenaState, advisors: AdvisorRegistry) -> Self {
        Self {
            state,
            intents: IntentQueue::new(),
            advisors,
        }
    }

    pub fn state(&self) -> &ArenaState {
        &self.state
    }

    pub fn state_mut(&mut self) -> &mut ArenaState {
        &mut self.state
    }

    pub fn intents(&self) -> &IntentQueue<ArenaCommand> {
        &self.intents
    }

    pub fn intents_mut(&mut self) -> &mut IntentQueue<ArenaCommand> {
        &mut self.intents
    }

    pub fn advisors(&self) -> &AdvisorRegistry {
        &self.advisors
    }

    pub fn advisors_mut(&mut self) -> &mut AdvisorRegistry {
        &mut self.advisors
    }

    /// Adds an actor and binds it to an advisor kind.
    pub fn spawn(&mut self, actor: ArenaActor, kind: AdvisorKind) -> EntityId {
        let id = actor.id;
        self.advisors.bind_entity(id, kind);
        self.state.insert(actor);
        id
    }

    /// Queues an explicit command for an actor.
    pub fn queue(&mut self, entity: EntityId, command: ArenaCommand) -> Result<(), RuntimeError> {
        if self.state.actor(entity).is_none() {
            return Err(RuntimeError::UnknownEntity(entity));
        }
        self.intents.push(entity, command);
        Ok(())
    }
}

impl TurnMap for Arena {
    type Action = ArenaCommand;

    fn turn_takers(&self) -> Vec<EntityId> {
        self.state.present().map(|a| a.id).collect()
    }

    fn contains(&self, entity: EntityId) -> bool {
        self.state.is_present(entity)
    }

    fn priority(&self, entity: EntityId) -> f64 {
        self.state
            .actor(entity)
            .map_or(f64::INFINITY, ArenaActor::priority)
    }

    fn collect_intentions(
        &mut self,
        entity: EntityId,
        turn: u64,
        spare_energy: f64,
    ) -> Result<Vec<ArenaCommand>, IntentError> {
        if !self.state.is_present(entity) {
            return Err(IntentError::UnknownEntity(entity));
        }

        let Self {
            state,
            intents,
            advisors,
        } = self;

        intents.collect_with(entity, || {
            let ctx = AdviceContext {
                entity,
                turn,
                spare_energy,
                state: &*state,
            };
            advisors
                .advise(&ctx)
                .map_err(|error| IntentError::Advisor {
                    entity,
                    reason: error.to_string(),
                })
        })
    }

    fn is_dead(&self, entity: EntityId) -> bool {
        self.state.actor(entity).is_some_and(|a| !a.alive)
    }
}
