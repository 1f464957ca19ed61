use serde::{Deserialize, Serialize};
use tracing::{debug, info};
use turn_core::{Action, ActionContext, ActionError, EntityId};

use super::Arena;
use super::actor::RegionId;

/// Commands an arena actor can queue.
///
/// Each variant has a base cost in turns that is scaled by the actor's speed
/// when invoked.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, strum::Display, strum::AsRefStr)]
#[strum(serialize_all = "snake_case")]
pub enum ArenaCommand {
    /// Pass a full turn.
    Wait,
    /// Move one tile in the direction of `delta`.
    Step { delta: i32 },
    /// Melee attack on an adjacent actor.
    Strike { target: EntityId },
    /// Sidestep in place; a fifth of a turn.
    Dodge,
    /// Leave for another region. When the player travels the active map
    /// changes and all accumulators are reset.
    Travel { region: RegionId },
    /// Recover for several turns.
    Rest { turns: u8 },
}

impl ArenaCommand {
    pub const FULL_TURN: f64 = 1.0;
    pub const DODGE_COST: f64 = 0.2;

    /// Cost before speed scaling.
    pub fn base_cost(&self) -> f64 {
        match self {
            ArenaCommand::Dodge => Self::DODGE_COST,
            ArenaCommand::Rest { turns } => f64::from(*turns),
            ArenaCommand::Wait
            | ArenaCommand::Step { .. }
            | ArenaCommand::Strike { .. }
            | ArenaCommand::Travel { .. } => Self::FULL_TURN,
        }
    }
}

impl Action<Arena> for ArenaCommand {
    fn invoke(self, ctx: &mut ActionContext<'_, Arena>) -> Result<f64, ActionError> {
        let entity = ctx.actor();
        let state = ctx.map_mut().state_mut();
        let actor = state
            .actor(entity)
            .filter(|a| a.alive)
            .cloned()
            .ok_or(ActionError::ActorMissing(entity))?;
        let cost = actor.scale_cost(self.base_cost());

        let mut reset = false;
        match &self {
            ArenaCommand::Wait | ArenaCommand::Dodge | ArenaCommand::Rest { .. } => {}
            ArenaCommand::Step { delta } => {
                if *delta == 0 {
                    return Err(ActionError::rejected("step without direction"));
                }
                let destination = actor.position + delta.signum();
                if state.is_occupied(actor.region, destination, entity) {
                    return Err(ActionError::rejected(format!(
                        "tile {destination} is occupied"
                    )));
                }
                if let Some(actor) = state.actor_mut(entity) {
                    actor.position = destination;
                }
            }
            ArenaCommand::Strike { target } => {
                let victim = state
                    .actor(*target)
                    .filter(|v| v.alive && v.id != entity && v.region == actor.region)
                    .ok_or_else(|| ActionError::rejected(format!("no target {target} in reach")))?;
                if (victim.position - actor.position).abs() > 1 {
                    return Err(ActionError::rejected(format!("{target} is out of reach")));
                }
                if let Some(victim) = state.actor_mut(*target)
                    && victim.take_damage(actor.power)
                {
                    info!(
                        target: "turn_runtime::arena",
                        attacker = %entity,
                        victim = %target,
                        "Actor slain"
                    );
                }
            }
            ArenaCommand::Travel { region } => {
                if let Some(traveller) = state.actor_mut(entity) {
                    traveller.region = *region;
                    traveller.position = 0;
                }
                if entity == state.player() {
                    state.set_active_region(*region);
                    reset = true;
                }
            }
        }

        debug!(
            target: "turn_runtime::arena",
            entity = %entity,
            command = %self,
            cost,
            "Command applied"
        );

        if reset {
            ctx.map_mut().intents_mut().clear_all();
            ctx.reset_accumulators();
        }
        Ok(cost)
    }
}
