//! Advisor that hunts the player.

use turn_core::EntityId;

use crate::api::{AdviceContext, Advisor, AdvisorError};
use crate::arena::ArenaCommand;

/// Closes in on the player and strikes once adjacent.
///
/// Entities still owing a full turn or more propose nothing: they could not
/// act before the turn ends anyway. Entities with only part of a turn to
/// spare dodge instead of committing to a full action.
#[derive(Debug)]
pub struct ChaseAdvisor {
    /// Spare energy below which the cheap dodge is preferred.
    pub hesitation: f64,
}

impl ChaseAdvisor {
    pub fn new() -> Self {
        Self { hesitation: 0.5 }
    }
}

impl Default for ChaseAdvisor {
    fn default() -> Self {
        Self::new()
    }
}

impl Advisor for ChaseAdvisor {
    fn name(&self) -> &'static str {
        "chase"
    }

    fn advise(&mut self, ctx: &AdviceContext<'_>) -> Result<Vec<ArenaCommand>, AdvisorError> {
        if ctx.spare_energy <= 0.0 {
            return Ok(Vec::new());
        }

        let me = ctx
            .state
            .actor(ctx.entity)
            .ok_or(AdvisorError::UnknownActor(ctx.entity))?;

        let player: EntityId = ctx.state.player();
        let Some(prey) = ctx
            .state
            .player_actor()
            .filter(|p| p.alive && p.region == me.region && p.id != me.id)
        else {
            return Ok(vec![ArenaCommand::Wait]);
        };

        if ctx.spare_energy < self.hesitation {
            return Ok(vec![ArenaCommand::Dodge]);
        }

        let gap = prey.position - me.position;
        if gap.abs() <= 1 {
            Ok(vec![ArenaCommand::Strike { target: player }])
        } else {
            Ok(vec![ArenaCommand::Step { delta: gap.signum() }])
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::arena::{ArenaActor, ArenaState, RegionId};

    fn state(goblin_at: i32) -> ArenaState {
        ArenaState::new(RegionId(0), EntityId::PLAYER)
            .with_actor(ArenaActor::new(EntityId::PLAYER, "hero").at(0))
            .with_actor(ArenaActor::new(EntityId(1), "goblin").at(goblin_at))
    }

    fn advise(state: &ArenaState, spare_energy: f64) -> Vec<ArenaCommand> {
        let ctx = AdviceContext {
            entity: EntityId(1),
            turn: 0,
            spare_energy,
            state,
        };
        ChaseAdvisor::new().advise(&ctx).unwrap()
    }

    #[test]
    fn steps_toward_distant_player() {
        assert_eq!(advise(&state(4), 1.0), vec![ArenaCommand::Step { delta: -1 }]);
        assert_eq!(advise(&state(-3), 1.0), vec![ArenaCommand::Step { delta: 1 }]);
    }

    #[test]
    fn strikes_adjacent_player() {
        assert_eq!(
            advise(&state(1), 1.0),
            vec![ArenaCommand::Strike {
                target: EntityId::PLAYER
            }]
        );
    }

    #[test]
    fn spare_energy_shapes_the_choice() {
        assert_eq!(advise(&state(4), 0.3), vec![ArenaCommand::Dodge]);
        assert!(advise(&state(4), -0.2).is_empty());
    }

    #[test]
    fn waits_when_player_is_elsewhere() {
        let mut state = state(4);
        if let Some(hero) = state.actor_mut(EntityId::PLAYER) {
            hero.region = RegionId(9);
        }
        assert_eq!(advise(&state, 1.0), vec![ArenaCommand::Wait]);
    }
}
