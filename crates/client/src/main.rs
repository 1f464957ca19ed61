//! Terminal client entry point.
//!
//! Reads one command per line from stdin, drives the runtime and prints every
//! bus event as a JSON line on stdout. Logs go to stderr.

mod input;

use anyhow::Result;
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::sync::broadcast::error::RecvError;
use turn_core::EntityId;
use turn_runtime::{
    AdvisorKind, Arena, ArenaActor, ArenaState, ChannelInput, ChaseAdvisor, RegionId, Runtime,
    RuntimeConfig, Topic,
};

use input::{InputHandler, LineAction};

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::INFO.into()),
        )
        .with_writer(std::io::stderr)
        .init();

    let config = RuntimeConfig::from_env();
    tracing::info!("Starting turn client");
    tracing::debug!(?config, "Runtime configuration");

    let goblin = EntityId(1);
    let mut runtime = Runtime::builder()
        .config(config)
        .arena(build_arena(goblin))
        .build()?;

    for topic in [Topic::Turn, Topic::Action] {
        let mut rx = runtime.subscribe(topic);
        tokio::spawn(async move {
            loop {
                match rx.recv().await {
                    Ok(event) => match serde_json::to_string(&event) {
                        Ok(line) => println!("{line}"),
                        Err(error) => tracing::warn!(%error, "Failed to encode event"),
                    },
                    Err(RecvError::Lagged(skipped)) => {
                        tracing::warn!(?topic, skipped, "Event printer lagged");
                    }
                    Err(RecvError::Closed) => break,
                }
            }
        });
    }

    let (provider, tx) = ChannelInput::new(8);
    let handler = InputHandler::new(goblin);
    tokio::spawn(async move {
        let mut lines = BufReader::new(tokio::io::stdin()).lines();
        while let Ok(Some(line)) = lines.next_line().await {
            match handler.handle_line(&line) {
                LineAction::Quit => break,
                LineAction::Submit(command) => {
                    if tx.send(command).await.is_err() {
                        break;
                    }
                }
                LineAction::None => {
                    tracing::debug!(line = %line.trim(), "Ignoring unrecognised input");
                }
            }
        }
    });

    runtime.run(&provider).await?;

    if runtime.is_over() {
        tracing::info!(clock = runtime.scheduler().clock(), "Game over");
    } else {
        tracing::info!(
            clock = runtime.scheduler().clock(),
            phase = %runtime.day().phase(),
            "Input closed, shutting down"
        );
    }

    Ok(())
}

fn build_arena(goblin: EntityId) -> Arena {
    let state = ArenaState::new(RegionId(0), EntityId::PLAYER)
        .with_actor(ArenaActor::new(EntityId::PLAYER, "hero").with_power(3));

    let mut arena = Arena::new(state);
    arena
        .advisors_mut()
        .register(AdvisorKind::Chase, ChaseAdvisor::new());
    arena.spawn(
        ArenaActor::new(goblin, "goblin").with_speed(80).at(6),
        AdvisorKind::Chase,
    );
    arena.spawn(
        ArenaActor::new(EntityId(2), "bat")
            .with_speed(150)
            .with_health(3)
            .at(-5),
        AdvisorKind::Chase,
    );
    arena.spawn(
        ArenaActor::new(EntityId(3), "shade").in_region(RegionId(1)).at(3),
        AdvisorKind::Wait,
    );
    arena
}
