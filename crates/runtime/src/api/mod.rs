//! Public runtime API surface.
//!
//! This module gathers the types exposed to consumers of the runtime crate so
//! other layers can stay focused on orchestration.

pub mod errors;
pub mod providers;
pub mod registry;

pub use errors::{AdvisorError, AdvisorKind, Result, RuntimeError};
pub use providers::{AdviceContext, Advisor, IdleAdvisor, InputProvider, WaitAdvisor};
pub use registry::AdvisorRegistry;
