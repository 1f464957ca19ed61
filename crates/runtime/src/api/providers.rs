//! Abstractions for sourcing entity intent.
//!
//! [`Advisor`]s decide what non-player entities (and idle players) want to
//! do when the scheduler harvests intentions. They run synchronously inside
//! the harvest. [`InputProvider`]s are the asynchronous counterpart for the
//! player: input is awaited by the calling frame *before* a turn starts, never
//! inside the scheduler.
use async_trait::async_trait;
use turn_core::EntityId;

use super::errors::{AdvisorError, Result};
use crate::arena::{ArenaCommand, ArenaState};

/// Read-only view handed to an advisor.
#[derive(Debug, Clone, Copy)]
pub struct AdviceContext<'a> {
    pub entity: EntityId,
    pub turn: u64,
    /// `1 - debt`: how much of the coming turn the entity can still spend.
    pub spare_energy: f64,
    pub state: &'a ArenaState,
}

/// Strategy deciding which commands an entity queues for a turn.
pub trait Advisor: Send {
    /// Returns a human-readable name for this advisor (used in logging).
    fn name(&self) -> &'static str;

    /// Decides the entity's commands for this turn. Must not mutate the world.
    fn advise(
        &mut self,
        ctx: &AdviceContext<'_>,
    ) -> std::result::Result<Vec<ArenaCommand>, AdvisorError>;
}

/// Advisor that never proposes anything.
pub struct IdleAdvisor;

impl Advisor for IdleAdvisor {
    fn name(&self) -> &'static str {
        "idle"
    }

    fn advise(
        &mut self,
        _ctx: &AdviceContext<'_>,
    ) -> std::result::Result<Vec<ArenaCommand>, AdvisorError> {
        Ok(Vec::new())
    }
}

/// Advisor that always waits a full turn.
/// Useful for testing or as a fallback.
pub struct WaitAdvisor;

impl Advisor for WaitAdvisor {
    fn name(&self) -> &'static str {
        "wait"
    }

    fn advise(
        &mut self,
        _ctx: &AdviceContext<'_>,
    ) -> std::result::Result<Vec<ArenaCommand>, AdvisorError> {
        Ok(vec![ArenaCommand::Wait])
    }
}

/// Asynchronous source of player commands (UI, network, scripted fixtures).
#[async_trait]
pub trait InputProvider: Send + Sync {
    /// Waits for the next command of `entity`.
    ///
    /// Returns `Ok(None)` when the source is exhausted.
    async fn next_command(
        &self,
        entity: EntityId,
        state: &ArenaState,
    ) -> Result<Option<ArenaCommand>>;
}
