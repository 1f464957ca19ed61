use std::collections::VecDeque;

use tracing::{debug, error, info, warn};

use crate::action::{Action, ActionContext, validate_cost};
use crate::map::TurnMap;
use crate::state::{EntityId, round_to};

use super::{ActionRecord, Scheduler, SchedulerError, SchedulerPhase, TurnOutcome, TurnReport};

/// Actions harvested from one entity for the current turn.
struct PendingQueue<A> {
    entity: EntityId,
    queue: VecDeque<A>,
}

/// Why the sub-tick loop stopped.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum DrainEnd {
    Exhausted,
    PlayerIdle,
    PlayerDied,
}

/// Turn execution methods for Scheduler.
impl Scheduler {
    /// Runs a single Harvesting → Draining → Finalizing pass.
    ///
    /// Returns the report even when the player died; in that case nothing was
    /// finalized and every later call fails with [`SchedulerError::Halted`].
    pub fn run_turn<M: TurnMap>(&mut self, map: &mut M) -> Result<TurnReport, SchedulerError> {
        if self.halted {
            return Err(SchedulerError::Halted);
        }

        let step = self.config.time_dilation;
        let precision = self.config.step_precision;

        self.clock.begin_turn(step, precision);
        let turn = self.clock.current_turn();
        let mut report = TurnReport::new(turn, self.clock.current_time());

        self.phase = SchedulerPhase::Harvesting;
        for observer in self.observers.iter_mut() {
            observer.on_turn_started(turn);
        }
        let mut pending = self.harvest(map, turn);

        self.phase = SchedulerPhase::Draining;
        let end = self.drain(map, &mut pending, &mut report);
        report.ended_at = self.clock.current_time();

        let leftover: usize = pending.iter().map(|p| p.queue.len()).sum();
        if leftover > 0 {
            debug!(
                target: "turn_core::scheduler",
                turn,
                leftover,
                "Discarding actions not drained this turn"
            );
        }

        if end == DrainEnd::PlayerDied {
            self.halted = true;
            self.phase = SchedulerPhase::Idle;
            report.outcome = TurnOutcome::PlayerDied;

            error!(
                target: "turn_core::scheduler",
                turn,
                player = %self.player,
                sub_tick = report.sub_ticks,
                "Player died, aborting drain"
            );
            for observer in self.observers.iter_mut() {
                observer.on_fatal(self.player);
            }
            return Ok(report);
        }

        self.phase = SchedulerPhase::Finalizing;
        self.finalize(&mut report);
        self.phase = SchedulerPhase::Idle;

        info!(
            target: "turn_core::scheduler",
            turn,
            clock = report.ended_at,
            sub_ticks = report.sub_ticks,
            actions = report.actions.len(),
            ended_early = report.ended_early,
            player_delay = report.player_delay,
            "Turn finished"
        );

        Ok(report)
    }

    /// Asks every present entity for its intentions, lowest priority first.
    ///
    /// A failing entity gets an empty queue; the others are unaffected.
    fn harvest<M: TurnMap>(&mut self, map: &mut M, turn: u64) -> Vec<PendingQueue<M::Action>> {
        let mut takers: Vec<(EntityId, f64)> = map
            .turn_takers()
            .into_iter()
            .map(|entity| (entity, map.priority(entity)))
            .collect();
        // sort_by is stable: equal priorities keep enumeration order
        takers.sort_by(|a, b| a.1.total_cmp(&b.1));

        let mut pending = Vec::with_capacity(takers.len());
        for (entity, _) in takers {
            self.accumulators.touch(entity);
            let spare_energy = 1.0 - self.accumulators.get_or_default(entity);

            let queue = match map.collect_intentions(entity, turn, spare_energy) {
                Ok(actions) => VecDeque::from(actions),
                Err(error) => {
                    warn!(
                        target: "turn_core::scheduler",
                        turn,
                        entity = %entity,
                        error = %error,
                        "Failed to collect intentions, entity skips this turn"
                    );
                    VecDeque::new()
                }
            };

            pending.push(PendingQueue { entity, queue });
        }

        pending
    }

    /// Sub-tick loop: `t` runs from 0 to 1 inclusive in steps of the time
    /// dilation.
    fn drain<M: TurnMap>(
        &mut self,
        map: &mut M,
        pending: &mut [PendingQueue<M::Action>],
        report: &mut TurnReport,
    ) -> DrainEnd {
        let step = self.config.time_dilation;
        let precision = self.config.step_precision;
        let mut t = 0.0;
        let mut end = DrainEnd::Exhausted;

        'sub_ticks: while t <= 1.0 {
            if map.is_dead(self.player) {
                end = DrainEnd::PlayerDied;
                break;
            }
            if self.player_is_idle(pending) {
                report.ended_early = true;
                end = DrainEnd::PlayerIdle;
                break;
            }

            self.accumulators.decay(step, precision);

            for slot in pending.iter_mut() {
                if slot.queue.is_empty() || self.accumulators.get_or_default(slot.entity) > 0.0 {
                    continue;
                }
                if !map.contains(slot.entity) {
                    debug!(
                        target: "turn_core::scheduler",
                        entity = %slot.entity,
                        "Entity left the map, skipping its queue"
                    );
                    continue;
                }
                let Some(action) = slot.queue.pop_front() else {
                    continue;
                };

                let mut ctx =
                    ActionContext::new(map, &mut self.accumulators, slot.entity, report.turn);
                let result = action.invoke(&mut ctx).and_then(validate_cost);
                let reset = ctx.reset_requested();

                match result {
                    Ok(cost) => {
                        let accumulator = if reset {
                            self.accumulators.set(slot.entity, cost);
                            cost
                        } else {
                            self.accumulators.charge(slot.entity, cost, step)
                        };
                        let record = ActionRecord {
                            entity: slot.entity,
                            sub_tick: report.sub_ticks,
                            cost,
                            accumulator,
                        };
                        debug!(
                            target: "turn_core::scheduler",
                            entity = %record.entity,
                            sub_tick = record.sub_tick,
                            cost,
                            accumulator,
                            "Action invoked"
                        );
                        for observer in self.observers.iter_mut() {
                            observer.on_action(&record);
                        }
                        report.actions.push(record);
                    }
                    Err(error) => {
                        warn!(
                            target: "turn_core::scheduler",
                            entity = %slot.entity,
                            sub_tick = report.sub_ticks,
                            error = %error,
                            "Action failed, no time consumed"
                        );
                    }
                }

                if map.is_dead(self.player) {
                    end = DrainEnd::PlayerDied;
                    break 'sub_ticks;
                }
                if reset {
                    info!(
                        target: "turn_core::scheduler",
                        entity = %slot.entity,
                        sub_tick = report.sub_ticks,
                        "Accumulators reset, cutting sub-tick short"
                    );
                    break;
                }
            }

            t = round_to(t + step, precision);
            self.clock.advance(step, precision);
            report.sub_ticks += 1;
        }

        report.progress = t.min(1.0);
        end
    }

    /// Player has nothing queued and owes no time.
    fn player_is_idle<A>(&self, pending: &[PendingQueue<A>]) -> bool {
        let queued = pending
            .iter()
            .find(|slot| slot.entity == self.player)
            .is_some_and(|slot| !slot.queue.is_empty());

        !queued && self.accumulators.get_or_default(self.player) == 0.0
    }

    fn finalize(&mut self, report: &mut TurnReport) {
        if let Some(day_cycle) = self.day_cycle.as_mut() {
            day_cycle.advance(report.progress);
        }

        let clock = self.clock.current_time();
        for observer in self.observers.iter_mut() {
            observer.on_turn_ended(clock);
        }

        self.player_delay = self.accumulators.get_or_default(self.player);
        report.player_delay = self.player_delay;
        report.reset = self.accumulators.was_reset();
        self.accumulators.clear_reset_flag();
    }
}
