use std::collections::{HashMap, HashSet, VecDeque};
use std::sync::{Arc, Mutex};

use super::*;
use crate::action::{Action, ActionContext, ActionError};
use crate::config::SchedulerConfig;
use crate::map::{IntentError, TurnMap};
use crate::state::EntityId;

const PLAYER: EntityId = EntityId::PLAYER;
const GOBLIN: EntityId = EntityId(1);
const ORC: EntityId = EntityId(2);

fn approx(a: f64, b: f64) -> bool {
    (a - b).abs() < 1e-9
}

#[derive(Clone, Debug)]
enum Cmd {
    /// Does nothing but take time.
    Act(f64),
    /// Increments the shared counter and logs the value it observed.
    Bump(f64),
    /// Moves the actor to another map, wiping accumulators.
    Travel(f64),
    /// Wipes accumulators, then fails.
    TravelBlocked,
    KillPlayer(f64),
    Remove(EntityId, f64),
    Fail,
}

#[derive(Default)]
struct TestMap {
    order: Vec<EntityId>,
    priorities: HashMap<EntityId, f64>,
    plans: HashMap<EntityId, VecDeque<Vec<Cmd>>>,
    failing: HashSet<EntityId>,
    absent: HashSet<EntityId>,
    player_dead: bool,
    counter: i64,
    observed: Vec<(EntityId, i64)>,
    spare: Vec<(EntityId, f64)>,
}

impl TestMap {
    fn spawn(mut self, entity: EntityId, priority: f64) -> Self {
        self.order.push(entity);
        self.priorities.insert(entity, priority);
        self
    }

    fn plan(mut self, entity: EntityId, actions: Vec<Cmd>) -> Self {
        self.plans.entry(entity).or_default().push_back(actions);
        self
    }
}

impl Action<TestMap> for Cmd {
    fn invoke(self, ctx: &mut ActionContext<'_, TestMap>) -> Result<f64, ActionError> {
        let actor = ctx.actor();
        match self {
            Cmd::Act(cost) => Ok(cost),
            Cmd::Bump(cost) => {
                let map = ctx.map_mut();
                map.counter += 1;
                let seen = map.counter;
                map.observed.push((actor, seen));
                Ok(cost)
            }
            Cmd::Travel(cost) => {
                ctx.reset_accumulators();
                Ok(cost)
            }
            Cmd::TravelBlocked => {
                ctx.reset_accumulators();
                Err(ActionError::rejected("gate is shut"))
            }
            Cmd::KillPlayer(cost) => {
                ctx.map_mut().player_dead = true;
                Ok(cost)
            }
            Cmd::Remove(target, cost) => {
                ctx.map_mut().absent.insert(target);
                Ok(cost)
            }
            Cmd::Fail => Err(ActionError::rejected("blocked")),
        }
    }
}

impl TurnMap for TestMap {
    type Action = Cmd;

    fn turn_takers(&self) -> Vec<EntityId> {
        self.order
            .iter()
            .copied()
            .filter(|id| !self.absent.contains(id))
            .collect()
    }

    fn contains(&self, entity: EntityId) -> bool {
        self.order.contains(&entity) && !self.absent.contains(&entity)
    }

    fn priority(&self, entity: EntityId) -> f64 {
        self.priorities.get(&entity).copied().unwrap_or(0.0)
    }

    fn collect_intentions(
        &mut self,
        entity: EntityId,
        _turn: u64,
        spare_energy: f64,
    ) -> Result<Vec<Cmd>, IntentError> {
        self.spare.push((entity, spare_energy));
        if self.failing.contains(&entity) {
            return Err(IntentError::Advisor {
                entity,
                reason: "advisor panicked".to_string(),
            });
        }
        Ok(self
            .plans
            .get_mut(&entity)
            .and_then(VecDeque::pop_front)
            .unwrap_or_default())
    }

    fn is_dead(&self, entity: EntityId) -> bool {
        entity == PLAYER && self.player_dead
    }
}

#[derive(Clone, Default)]
struct Recorder(Arc<Mutex<Vec<String>>>);

impl Recorder {
    fn events(&self) -> Vec<String> {
        self.0.lock().unwrap().clone()
    }
}

impl TurnObserver for Recorder {
    fn on_turn_started(&mut self, turn: u64) {
        self.0.lock().unwrap().push(format!("start:{turn}"));
    }

    fn on_turn_ended(&mut self, clock: f64) {
        self.0.lock().unwrap().push(format!("end:{clock}"));
    }

    fn on_fatal(&mut self, entity: EntityId) {
        self.0.lock().unwrap().push(format!("fatal:{entity}"));
    }
}

#[derive(Clone, Default)]
struct Sundial(Arc<Mutex<Vec<f64>>>);

impl DayCycle for Sundial {
    fn advance(&mut self, progress: f64) {
        self.0.lock().unwrap().push(progress);
    }
}

fn scheduler() -> Scheduler {
    Scheduler::new(SchedulerConfig::with_time_dilation(0.1), PLAYER).unwrap()
}

#[test]
fn full_turn_action_charges_one_turn_and_advances_clock() {
    let mut map = TestMap::default()
        .spawn(PLAYER, 0.0)
        .plan(PLAYER, vec![Cmd::Act(1.0)]);
    let mut scheduler = scheduler();
    let before = scheduler.current_turn();

    let report = scheduler.run_turn(&mut map).unwrap();

    assert_eq!(report.actions.len(), 1);
    assert_eq!(report.actions[0].accumulator, 1.0);
    assert_eq!(report.actions[0].sub_tick, 0);
    assert_eq!(report.sub_ticks, 11);
    assert!(!report.ended_early);
    assert_eq!(scheduler.current_turn(), before + 1);
    assert_eq!(scheduler.accumulators().get_or_default(PLAYER), 0.0);
    assert!(!report.continues());
}

#[test]
fn fast_action_is_charged_with_step_adjustment() {
    let mut map = TestMap::default()
        .spawn(PLAYER, 0.0)
        .plan(PLAYER, vec![Cmd::Act(0.2)]);
    let mut scheduler = scheduler();

    let report = scheduler.run_turn(&mut map).unwrap();

    assert!(approx(report.actions[0].accumulator, 0.12));
}

#[test]
fn idle_entity_keeps_zero_debt() {
    let mut map = TestMap::default()
        .spawn(PLAYER, 0.0)
        .spawn(GOBLIN, 1.0)
        .plan(PLAYER, vec![Cmd::Act(1.0)]);
    let mut scheduler = scheduler();

    scheduler.run_turn(&mut map).unwrap();

    assert!(scheduler.accumulators().contains(GOBLIN));
    assert_eq!(scheduler.accumulators().get_or_default(GOBLIN), 0.0);
}

#[test]
fn lower_priority_value_acts_first_and_later_entities_see_its_effects() {
    // Enumerated orc-first, but the goblin has the lower priority value.
    let mut map = TestMap::default()
        .spawn(PLAYER, 0.0)
        .spawn(ORC, 2.0)
        .spawn(GOBLIN, 1.0)
        .plan(PLAYER, vec![Cmd::Act(1.0)])
        .plan(ORC, vec![Cmd::Bump(1.0)])
        .plan(GOBLIN, vec![Cmd::Bump(1.0)]);
    let mut scheduler = scheduler();

    let report = scheduler.run_turn(&mut map).unwrap();

    assert_eq!(map.observed, vec![(GOBLIN, 1), (ORC, 2)]);
    let order: Vec<_> = report.actions.iter().map(|r| r.entity).collect();
    assert_eq!(order, vec![PLAYER, GOBLIN, ORC]);
}

#[test]
fn equal_priorities_keep_enumeration_order() {
    let mut map = TestMap::default()
        .spawn(PLAYER, 0.0)
        .spawn(ORC, 1.0)
        .spawn(GOBLIN, 1.0)
        .plan(PLAYER, vec![Cmd::Act(1.0)])
        .plan(ORC, vec![Cmd::Bump(1.0)])
        .plan(GOBLIN, vec![Cmd::Bump(1.0)]);
    let mut scheduler = scheduler();

    scheduler.run_turn(&mut map).unwrap();

    assert_eq!(map.observed, vec![(ORC, 1), (GOBLIN, 2)]);
}

#[test]
fn idle_player_ends_drain_before_anything_runs() {
    let mut map = TestMap::default()
        .spawn(PLAYER, 0.0)
        .spawn(GOBLIN, 1.0)
        .plan(GOBLIN, vec![Cmd::Act(1.0)]);
    let mut scheduler = scheduler();

    let report = scheduler.run_turn(&mut map).unwrap();

    assert!(report.ended_early);
    assert_eq!(report.sub_ticks, 0);
    assert!(report.actions.is_empty());
    assert_eq!(scheduler.clock(), 0.0);
}

#[test]
fn drain_stops_once_player_settles_its_debt() {
    let mut map = TestMap::default()
        .spawn(PLAYER, 0.0)
        .spawn(GOBLIN, 1.0)
        .plan(PLAYER, vec![Cmd::Act(0.2)])
        .plan(GOBLIN, vec![Cmd::Act(1.0), Cmd::Act(1.0)]);
    let mut scheduler = scheduler();

    let report = scheduler.run_turn(&mut map).unwrap();

    // 0.12 debt is gone after two decays; the third sub-tick sees an idle player.
    assert!(report.ended_early);
    assert_eq!(report.sub_ticks, 3);
    assert_eq!(report.actions_of(GOBLIN).count(), 1);
    assert!(approx(report.progress, 0.3));
}

#[test]
fn zero_cost_actions_run_on_consecutive_sub_ticks() {
    let mut map = TestMap::default()
        .spawn(PLAYER, 0.0)
        .plan(PLAYER, vec![Cmd::Act(0.0), Cmd::Act(0.0), Cmd::Act(1.0)]);
    let mut scheduler = scheduler();

    let report = scheduler.run_turn(&mut map).unwrap();

    let ticks: Vec<_> = report.actions.iter().map(|r| r.sub_tick).collect();
    assert_eq!(ticks, vec![0, 1, 2]);
    assert_eq!(report.actions[0].accumulator, 0.0);
}

#[test]
fn reset_rearms_actor_with_raw_cost_and_skips_rest_of_sub_tick() {
    let mut map = TestMap::default()
        .spawn(PLAYER, 0.0)
        .spawn(GOBLIN, 1.0)
        .plan(PLAYER, vec![Cmd::Travel(0.5)])
        .plan(GOBLIN, vec![Cmd::Act(1.0)]);
    let mut scheduler = scheduler();

    let report = scheduler.run_turn(&mut map).unwrap();

    let travel = report.actions_of(PLAYER).next().unwrap();
    assert_eq!(travel.accumulator, 0.5);
    let goblin = report.actions_of(GOBLIN).next().unwrap();
    assert_eq!(goblin.sub_tick, 1);
    assert!(report.reset);
    assert!(!scheduler.accumulators().was_reset());
}

#[test]
fn reset_suppresses_turn_chaining() {
    let mut map = TestMap::default()
        .spawn(PLAYER, 0.0)
        .plan(PLAYER, vec![Cmd::Travel(3.0)]);
    let mut scheduler = scheduler();

    let reports = scheduler.advance(&mut map).unwrap();

    assert_eq!(reports.len(), 1);
    assert!(reports[0].player_delay > 0.0);
    assert!(!reports[0].continues());
}

#[test]
fn owed_time_chains_another_turn_without_input() {
    let mut map = TestMap::default()
        .spawn(PLAYER, 0.0)
        .plan(PLAYER, vec![Cmd::Act(1.35)]);
    let mut scheduler = scheduler();

    let reports = scheduler.advance(&mut map).unwrap();

    assert_eq!(reports.len(), 2);
    assert!(approx(reports[0].player_delay, 0.385));
    assert_eq!(reports[1].turn, reports[0].turn + 1);
    assert!(reports[1].ended_early);
    assert_eq!(reports[1].sub_ticks, 4);
    assert_eq!(scheduler.current_player_delay(), 0.0);

    // Second harvest saw the leftover debt as reduced spare energy.
    let (_, spare) = map.spare.iter().filter(|(id, _)| *id == PLAYER).nth(1).unwrap();
    assert!(approx(*spare, 1.0 - 0.385));
}

#[test]
fn settled_player_does_not_chain() {
    let mut map = TestMap::default()
        .spawn(PLAYER, 0.0)
        .plan(PLAYER, vec![Cmd::Act(1.0)]);
    let mut scheduler = scheduler();

    let reports = scheduler.advance(&mut map).unwrap();

    assert_eq!(reports.len(), 1);
    assert_eq!(reports[0].player_delay, 0.0);
}

#[test]
fn player_death_aborts_drain_and_halts() {
    let recorder = Recorder::default();
    let sundial = Sundial::default();
    let mut map = TestMap::default()
        .spawn(PLAYER, 0.0)
        .spawn(GOBLIN, 1.0)
        .spawn(ORC, 2.0)
        .plan(PLAYER, vec![Cmd::Act(1.0)])
        .plan(GOBLIN, vec![Cmd::Act(0.4), Cmd::KillPlayer(1.0)])
        .plan(ORC, vec![Cmd::Act(0.4), Cmd::Act(1.0)]);
    let mut scheduler = scheduler();
    scheduler.add_observer(recorder.clone());
    scheduler.set_day_cycle(sundial.clone());

    let report = scheduler.run_turn(&mut map).unwrap();

    assert_eq!(report.outcome, TurnOutcome::PlayerDied);
    assert_eq!(report.sub_ticks, 4);
    let kill = report.actions_of(GOBLIN).nth(1).unwrap();
    assert_eq!(kill.sub_tick, 4);
    assert_eq!(report.actions_of(ORC).count(), 1);

    assert_eq!(recorder.events(), vec!["start:0".to_string(), "fatal:#0".to_string()]);
    assert!(sundial.0.lock().unwrap().is_empty());
    assert!(scheduler.is_halted());
    assert_eq!(scheduler.phase(), SchedulerPhase::Idle);
    assert_eq!(scheduler.run_turn(&mut map), Err(SchedulerError::Halted));
}

#[test]
fn failing_advisor_only_empties_its_own_queue() {
    let mut map = TestMap::default()
        .spawn(PLAYER, 0.0)
        .spawn(GOBLIN, 1.0)
        .spawn(ORC, 2.0)
        .plan(PLAYER, vec![Cmd::Act(1.0)])
        .plan(ORC, vec![Cmd::Act(1.0)]);
    map.failing.insert(GOBLIN);
    let mut scheduler = scheduler();

    let report = scheduler.run_turn(&mut map).unwrap();

    assert_eq!(report.actions_of(GOBLIN).count(), 0);
    assert_eq!(report.actions_of(ORC).count(), 1);
    assert!(scheduler.accumulators().contains(GOBLIN));
}

#[test]
fn failed_action_consumes_no_time() {
    let mut map = TestMap::default()
        .spawn(PLAYER, 0.0)
        .plan(PLAYER, vec![Cmd::Fail, Cmd::Act(1.0)]);
    let mut scheduler = scheduler();

    let report = scheduler.run_turn(&mut map).unwrap();

    assert_eq!(report.actions.len(), 1);
    assert_eq!(report.actions[0].sub_tick, 1);
}

#[test]
fn removed_entity_is_skipped_mid_turn() {
    let mut map = TestMap::default()
        .spawn(PLAYER, 0.0)
        .spawn(GOBLIN, 1.0)
        .plan(PLAYER, vec![Cmd::Remove(GOBLIN, 1.0)])
        .plan(GOBLIN, vec![Cmd::Act(1.0)]);
    let mut scheduler = scheduler();

    let report = scheduler.run_turn(&mut map).unwrap();

    assert_eq!(report.actions_of(GOBLIN).count(), 0);
    // Accumulator entries survive removal.
    assert!(scheduler.accumulators().contains(GOBLIN));
}

#[test]
fn observers_and_day_cycle_see_completed_turns() {
    let recorder = Recorder::default();
    let sundial = Sundial::default();
    let mut map = TestMap::default()
        .spawn(PLAYER, 0.0)
        .plan(PLAYER, vec![Cmd::Act(1.0)])
        .plan(PLAYER, vec![Cmd::Act(1.0)]);
    let mut scheduler = scheduler();
    scheduler.add_observer(recorder.clone());
    scheduler.set_day_cycle(sundial.clone());

    scheduler.run_turn(&mut map).unwrap();
    scheduler.run_turn(&mut map).unwrap();

    assert_eq!(
        recorder.events(),
        vec!["start:0", "end:1.1", "start:1", "end:2.1"]
    );
    assert_eq!(*sundial.0.lock().unwrap(), vec![1.0, 1.0]);
    assert_eq!(scheduler.phase(), SchedulerPhase::Idle);
}

#[test]
fn external_reset_suppresses_chain_of_next_turn() {
    let mut map = TestMap::default()
        .spawn(PLAYER, 0.0)
        .plan(PLAYER, vec![Cmd::Act(1.0)])
        .plan(PLAYER, vec![Cmd::Act(2.0)]);
    let mut scheduler = scheduler();

    scheduler.run_turn(&mut map).unwrap();
    scheduler.reset_accumulator();
    let report = scheduler.run_turn(&mut map).unwrap();

    assert!(report.reset);
    assert!(report.player_delay > 0.0);
    assert!(!report.continues());
}

#[test]
fn rejects_invalid_config() {
    let result = Scheduler::new(SchedulerConfig::with_time_dilation(0.0), PLAYER);
    assert!(matches!(result, Err(SchedulerError::InvalidConfig(_))));

    let uneven = Scheduler::new(SchedulerConfig::with_time_dilation(0.3), PLAYER);
    assert!(matches!(uneven, Err(SchedulerError::InvalidConfig(_))));
}

#[test]
fn coarse_step_still_advances_one_turn_per_turn() {
    let mut map = TestMap::default()
        .spawn(PLAYER, 0.0)
        .plan(PLAYER, vec![Cmd::Act(1.0)])
        .plan(PLAYER, vec![Cmd::Act(1.0)]);
    let mut scheduler = Scheduler::new(SchedulerConfig::with_time_dilation(0.25), PLAYER).unwrap();

    let first = scheduler.run_turn(&mut map).unwrap();
    let second = scheduler.run_turn(&mut map).unwrap();

    assert_eq!(first.turn, 0);
    assert_eq!(second.turn, 1);
    assert_eq!(first.sub_ticks, 5);
    assert_eq!(scheduler.current_turn(), 2);
}

#[test]
fn long_debt_chain_yields_at_bound_and_resumes() {
    let config = SchedulerConfig {
        max_chained_turns: 3,
        ..SchedulerConfig::new()
    };
    let mut map = TestMap::default()
        .spawn(PLAYER, 0.0)
        .plan(PLAYER, vec![Cmd::Act(10.0)]);
    let mut scheduler = Scheduler::new(config, PLAYER).unwrap();

    let first = scheduler.advance(&mut map).unwrap();
    assert_eq!(first.len(), 3);
    assert!(first.last().unwrap().continues());
    assert!(approx(scheduler.current_player_delay(), 7.7));

    let mut turns = first.len();
    let mut calls = 1;
    while scheduler.current_player_delay() > 0.0 {
        turns += scheduler.advance(&mut map).unwrap().len();
        calls += 1;
        assert!(calls < 10, "debt never settled");
    }

    // 10.9 owed: 1.0 paid off in the first turn, 1.1 in each later one
    assert_eq!(turns, 10);
    assert_eq!(calls, 4);
    assert_eq!(scheduler.accumulators().get_or_default(PLAYER), 0.0);
}

#[test]
fn failed_action_that_reset_still_cuts_sub_tick_short() {
    let mut map = TestMap::default()
        .spawn(GOBLIN, 0.0)
        .spawn(PLAYER, 1.0)
        .spawn(ORC, 2.0)
        .plan(GOBLIN, vec![Cmd::Act(1.0)])
        .plan(PLAYER, vec![Cmd::TravelBlocked, Cmd::Act(1.0)])
        .plan(ORC, vec![Cmd::Act(1.0)]);
    let mut scheduler = scheduler();

    let report = scheduler.run_turn(&mut map).unwrap();

    assert!(report.reset);
    assert_eq!(report.actions_of(GOBLIN).next().unwrap().sub_tick, 0);
    assert_eq!(report.actions_of(PLAYER).next().unwrap().sub_tick, 1);
    assert_eq!(report.actions_of(ORC).next().unwrap().sub_tick, 1);
    // the goblin's debt was wiped and never charged again
    assert!(!scheduler.accumulators().contains(GOBLIN));
}

#[test]
fn handing_control_to_another_entity_moves_early_exit() {
    let mut map = TestMap::default()
        .spawn(PLAYER, 0.0)
        .spawn(GOBLIN, 1.0)
        .plan(PLAYER, vec![Cmd::Act(1.0)]);
    let mut scheduler = scheduler();

    scheduler.set_player(GOBLIN);
    let report = scheduler.run_turn(&mut map).unwrap();

    assert_eq!(scheduler.player(), GOBLIN);
    assert!(report.ended_early);
    assert_eq!(report.sub_ticks, 0);
    assert!(report.actions.is_empty());
}
