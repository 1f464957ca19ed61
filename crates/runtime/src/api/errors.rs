//! Unified error types surfaced by the runtime API.
//!
//! Wraps scheduler failures, advisor lookups and input channel problems so
//! clients can bubble them up with consistent context.
use thiserror::Error;
use turn_core::{EntityId, SchedulerError};

pub type Result<T> = std::result::Result<T, RuntimeError>;

#[derive(Debug, Error)]
pub enum RuntimeError {
    #[error(transparent)]
    Scheduler(#[from] SchedulerError),

    #[error("player input channel closed")]
    InputClosed,

    #[error("game over: player {0} is dead")]
    GameOver(EntityId),

    #[error("entity {0} is not part of the arena")]
    UnknownEntity(EntityId),

    #[error("runtime requires a player actor before building")]
    MissingPlayer,
}

/// Errors raised by advisors while deciding intentions.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AdvisorError {
    #[error("{kind} advisor not registered")]
    NotRegistered { kind: AdvisorKind },

    #[error("actor {0} is not in the arena")]
    UnknownActor(EntityId),

    #[error("{0}")]
    Failed(String),
}

/// Families of advisors an entity can be bound to.
#[derive(
    Debug, Copy, Clone, PartialEq, Eq, Hash, strum::Display, strum::EnumString, strum::AsRefStr,
)]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
pub enum AdvisorKind {
    /// Never proposes anything; the entity acts only on explicit intents.
    Idle,
    /// Always waits a full turn.
    Wait,
    /// Closes in on the player and strikes when adjacent.
    Chase,
    /// Replays per-entity scripts.
    Scripted,
}
