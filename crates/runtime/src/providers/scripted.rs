//! Scripted fixtures: replayed advisor plans and player input.

use std::collections::{HashMap, VecDeque};

use async_trait::async_trait;
use tokio::sync::{Mutex, mpsc};
use turn_core::EntityId;

use crate::api::{AdviceContext, Advisor, AdvisorError, InputProvider, Result, RuntimeError};
use crate::arena::{ArenaCommand, ArenaState};

/// Replays a fixed plan per entity, one batch of commands per turn.
///
/// Once an entity's plan runs out it proposes nothing.
#[derive(Debug, Default)]
pub struct ScriptedAdvisor {
    plans: HashMap<EntityId, VecDeque<Vec<ArenaCommand>>>,
}

impl ScriptedAdvisor {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends one turn's worth of commands to the entity's plan.
    pub fn then(mut self, entity: EntityId, commands: Vec<ArenaCommand>) -> Self {
        self.plans.entry(entity).or_default().push_back(commands);
        self
    }

    /// Turns left in the entity's plan.
    pub fn remaining(&self, entity: EntityId) -> usize {
        self.plans.get(&entity).map_or(0, VecDeque::len)
    }
}

impl Advisor for ScriptedAdvisor {
    fn name(&self) -> &'static str {
        "scripted"
    }

    fn advise(
        &mut self,
        ctx: &AdviceContext<'_>,
    ) -> std::result::Result<Vec<ArenaCommand>, AdvisorError> {
        Ok(self
            .plans
            .get_mut(&ctx.entity)
            .and_then(VecDeque::pop_front)
            .unwrap_or_default())
    }
}

/// Player input replayed from a fixed list.
#[derive(Debug, Default)]
pub struct ScriptedInput {
    commands: Mutex<VecDeque<ArenaCommand>>,
}

impl ScriptedInput {
    pub fn new(commands: impl IntoIterator<Item = ArenaCommand>) -> Self {
        Self {
            commands: Mutex::new(commands.into_iter().collect()),
        }
    }
}

#[async_trait]
impl InputProvider for ScriptedInput {
    async fn next_command(
        &self,
        _entity: EntityId,
        _state: &ArenaState,
    ) -> Result<Option<ArenaCommand>> {
        Ok(self.commands.lock().await.pop_front())
    }
}

/// Player input arriving over a channel (terminal, network, UI thread).
pub struct ChannelInput {
    rx: Mutex<mpsc::Receiver<ArenaCommand>>,
}

impl ChannelInput {
    /// Creates the provider together with the sender used to feed it.
    pub fn new(buffer: usize) -> (Self, mpsc::Sender<ArenaCommand>) {
        let (tx, rx) = mpsc::channel(buffer.max(1));
        (Self { rx: Mutex::new(rx) }, tx)
    }
}

#[async_trait]
impl InputProvider for ChannelInput {
    async fn next_command(
        &self,
        _entity: EntityId,
        _state: &ArenaState,
    ) -> Result<Option<ArenaCommand>> {
        // recv only yields None once every sender is gone
        let mut rx = self.rx.lock().await;
        rx.recv().await.map(Some).ok_or(RuntimeError::InputClosed)
    }
}
