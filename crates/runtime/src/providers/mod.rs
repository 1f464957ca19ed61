//! Advisor and input implementations for different entity behaviors.

pub mod chase;
pub mod scripted;

pub use chase::ChaseAdvisor;
pub use scripted::{ChannelInput, ScriptedAdvisor, ScriptedInput};
