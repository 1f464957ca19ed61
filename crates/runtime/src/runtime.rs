//! High-level runtime orchestrator.
//!
//! The runtime owns the scheduler, the arena and the event bus, and exposes a
//! builder-based API for clients to drive the simulation. Player input is
//! awaited here, between turns, so the scheduler itself never blocks.

use std::env;

use tokio::sync::broadcast;
use turn_core::{EntityId, Scheduler, SchedulerConfig, TurnObserver, TurnOutcome, TurnReport};

use crate::api::{InputProvider, Result, RuntimeError};
use crate::arena::{Arena, ArenaCommand, DayNight};
use crate::events::{BusObserver, Event, EventBus, Topic};

/// Runtime configuration shared across the orchestrator and the scheduler.
#[derive(Debug, Clone)]
pub struct RuntimeConfig {
    pub scheduler: SchedulerConfig,
    pub event_buffer_size: usize,
    /// Turns per full day/night cycle.
    pub day_length: f64,
}

impl Default for RuntimeConfig {
    fn default() -> Self {
        Self {
            scheduler: SchedulerConfig::default(),
            event_buffer_size: 100,
            day_length: DayNight::DEFAULT_DAY_LENGTH,
        }
    }
}

impl RuntimeConfig {
    /// Construct configuration from process environment variables.
    ///
    /// Environment variables:
    /// - `TURN_TIME_DILATION` - Sub-tick size as a fraction of a turn (default: 0.1)
    /// - `TURN_STEP_PRECISION` - Decimal places for clock rounding (default: 4)
    /// - `TURN_MAX_CHAIN` - Turns one advance may chain before yielding (default: 64)
    /// - `TURN_EVENT_BUFFER` - Per-topic event buffer (default: 100)
    /// - `TURN_DAY_LENGTH` - Turns per day/night cycle (default: 24)
    ///
    /// Unparseable values are ignored; the scheduler validates the rest.
    pub fn from_env() -> Self {
        let mut config = Self::default();

        if let Some(dilation) = read_env::<f64>("TURN_TIME_DILATION") {
            config.scheduler.time_dilation = dilation;
        }
        if let Some(precision) = read_env::<u32>("TURN_STEP_PRECISION") {
            config.scheduler.step_precision = precision;
        }
        if let Some(depth) = read_env::<usize>("TURN_MAX_CHAIN") {
            config.scheduler.max_chained_turns = depth;
        }
        if let Some(capacity) = read_env::<usize>("TURN_EVENT_BUFFER") {
            config.event_buffer_size = capacity.max(1);
        }
        if let Some(length) = read_env::<f64>("TURN_DAY_LENGTH")
            && length > 0.0
        {
            config.day_length = length;
        }

        config
    }
}

fn read_env<T>(key: &str) -> Option<T>
where
    T: std::str::FromStr,
{
    env::var(key).ok()?.parse().ok()
}

/// Main runtime that orchestrates the simulation
pub struct Runtime {
    scheduler: Scheduler,
    arena: Arena,
    events: EventBus,
    day: DayNight,
    config: RuntimeConfig,
}

impl Runtime {
    /// Create a new runtime builder
    pub fn builder() -> RuntimeBuilder {
        RuntimeBuilder::new()
    }

    pub fn config(&self) -> &RuntimeConfig {
        &self.config
    }

    pub fn scheduler(&self) -> &Scheduler {
        &self.scheduler
    }

    pub fn arena(&self) -> &Arena {
        &self.arena
    }

    pub fn arena_mut(&mut self) -> &mut Arena {
        &mut self.arena
    }

    pub fn day(&self) -> &DayNight {
        &self.day
    }

    pub fn player(&self) -> EntityId {
        self.scheduler.player()
    }

    /// Subscribe to one event topic
    pub fn subscribe(&self, topic: Topic) -> broadcast::Receiver<Event> {
        self.events.subscribe(topic)
    }

    pub fn events(&self) -> &EventBus {
        &self.events
    }

    pub fn add_observer(&mut self, observer: impl TurnObserver + 'static) {
        self.scheduler.add_observer(observer);
    }

    /// True once the player died or vanished from the arena.
    pub fn is_over(&self) -> bool {
        self.scheduler.is_halted()
            || self
                .arena
                .state()
                .player_actor()
                .is_none_or(|player| !player.alive)
    }

    /// Queues an explicit command; it is consumed at the next harvest.
    pub fn queue_intent(&mut self, entity: EntityId, command: ArenaCommand) -> Result<()> {
        self.arena.queue(entity, command)
    }

    /// Runs turns until the player owes no more time.
    pub fn advance(&mut self) -> Result<Vec<TurnReport>> {
        if self.is_over() {
            return Err(RuntimeError::GameOver(self.player()));
        }

        let reports = self.scheduler.advance(&mut self.arena)?;

        if let Some(last) = reports.last()
            && last.outcome == TurnOutcome::PlayerDied
        {
            tracing::info!(
                target: "turn_runtime",
                turn = last.turn,
                "Player died, runtime is over"
            );
        }

        Ok(reports)
    }

    /// Execute a single player step
    ///
    /// Awaits one command from `input` when the player has nothing queued and
    /// owes no time, then advances. An exhausted input source ends the run.
    pub async fn step(&mut self, input: &dyn InputProvider) -> Result<Vec<TurnReport>> {
        if self.is_over() {
            return Err(RuntimeError::GameOver(self.player()));
        }

        if self.awaits_input() {
            let player = self.player();
            let command = input
                .next_command(player, self.arena.state())
                .await?
                .ok_or(RuntimeError::InputClosed)?;

            tracing::debug!(target: "turn_runtime", %player, ?command, "Player command received");
            self.arena.queue(player, command)?;
        }

        self.advance()
    }

    /// Run until the game ends or input runs dry
    pub async fn run(&mut self, input: &dyn InputProvider) -> Result<()> {
        loop {
            match self.step(input).await {
                Ok(_) => {}
                Err(RuntimeError::GameOver(_) | RuntimeError::InputClosed) => return Ok(()),
                Err(error) => return Err(error),
            }
        }
    }

    fn awaits_input(&self) -> bool {
        let player = self.player();
        !self.arena.intents().has_pending(player)
            && self.scheduler.accumulators().get_or_default(player) <= 0.0
    }
}

/// Builder for [`Runtime`] with flexible configuration.
pub struct RuntimeBuilder {
    config: RuntimeConfig,
    arena: Option<Arena>,
}

impl RuntimeBuilder {
    fn new() -> Self {
        Self {
            config: RuntimeConfig::default(),
            arena: None,
        }
    }

    /// Override runtime configuration
    pub fn config(mut self, config: RuntimeConfig) -> Self {
        self.config = config;
        self
    }

    /// Provide the arena to simulate
    pub fn arena(mut self, arena: Arena) -> Self {
        self.arena = Some(arena);
        self
    }

    /// Build the runtime
    pub fn build(self) -> Result<Runtime> {
        let arena = self.arena.ok_or(RuntimeError::MissingPlayer)?;
        let player = arena
            .state()
            .player_actor()
            .map(|actor| actor.id)
            .ok_or(RuntimeError::MissingPlayer)?;

        let events = EventBus::with_capacity(self.config.event_buffer_size);
        let day = DayNight::new(self.config.day_length);

        let mut scheduler = Scheduler::new(self.config.scheduler.clone(), player)?;
        scheduler.add_observer(BusObserver::new(events.clone()));
        scheduler.set_day_cycle(day.clone());

        tracing::info!(
            target: "turn_runtime",
            %player,
            time_dilation = self.config.scheduler.time_dilation,
            "Runtime built"
        );

        Ok(Runtime {
            scheduler,
            arena,
            events,
            day,
            config: self.config,
        })
    }
}
