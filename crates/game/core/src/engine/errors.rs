//! Error types for the scheduler.

use crate::config::ConfigError;

/// Errors surfaced while running turns.
#[derive(Clone, Debug, PartialEq, thiserror::Error)]
pub enum SchedulerError {
    #[error("invalid scheduler config: {0}")]
    InvalidConfig(#[from] ConfigError),

    #[error("scheduler halted: the player is dead")]
    Halted,
}
