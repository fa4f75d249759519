//! Host binary for the Eunoia room.
//!
//! Wires the room session to a fixed-timestep frame loop, console input,
//! and the chat backend. The session itself is passive; this binary owns
//! the clock and feeds it.
//!
//! # Startup Sequence
//!
//! 1. Load configuration from `eunoia-config.yaml` (defaults if absent)
//! 2. Initialize structured logging (tracing)
//! 3. Build and validate the room layout
//! 4. Create the room session and chat backend
//! 5. Run the frame loop until `/quit` or end of input

mod backend;
mod console;
mod error;

use std::path::Path;

use eunoia_core::config::{EngineConfig, LoggingConfig};
use eunoia_core::session::RoomSession;
use eunoia_types::{Instruction, RoomEvent};
use tokio::io::{AsyncBufReadExt as _, BufReader};
use tokio::sync::mpsc;
use tokio::time::{Instant, MissedTickBehavior};
use tracing::{debug, info, warn};
use tracing_subscriber::EnvFilter;

use crate::backend::ChatBackend;
use crate::console::{ConsoleCommand, ParseError};
use crate::error::EngineError;

/// Path of the configuration file, relative to the working directory.
const CONFIG_PATH: &str = "eunoia-config.yaml";

/// Replies waiting to be applied.
const REPLY_QUEUE: usize = 8;

/// Application entry point.
///
/// # Errors
///
/// Returns an error if configuration, room validation, or the frame loop
/// fails.
#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // 1. Load configuration.
    let (config, from_file) = load_config()?;

    // 2. Initialize structured logging.
    init_tracing(&config.logging);
    info!("eunoia-engine starting");
    if from_file {
        info!(path = CONFIG_PATH, "Configuration loaded");
    } else {
        info!("Config file not found, using defaults");
    }

    // 3. Build the room.
    let layout = config.room.build_layout().map_err(EngineError::from)?;
    info!(
        grid_size = layout.grid_size(),
        furniture = layout.furniture_list().len(),
        "Room layout validated"
    );

    // 4. Session and backend.
    let session = RoomSession::new(layout, &config);
    let backend = ChatBackend::from_config(&config.backend).map_err(EngineError::from)?;
    info!(
        backend = backend.name(),
        chat_url = %config.backend.chat_url,
        frame_interval_ms = config.movement.frame_interval_ms,
        "Entering frame loop"
    );

    // 5. Run.
    let session = run(session, backend, &config).await?;
    info!(
        frames = session.frame(),
        elapsed = ?session.elapsed(),
        "eunoia-engine shutdown complete"
    );
    Ok(())
}

/// Load `eunoia-config.yaml` if present, otherwise the defaults. Environment
/// overrides apply either way. The flag reports whether the file was found.
fn load_config() -> Result<(EngineConfig, bool), EngineError> {
    let path = Path::new(CONFIG_PATH);
    if path.exists() {
        Ok((EngineConfig::from_file(path)?, true))
    } else {
        Ok((EngineConfig::from_env_defaults()?, false))
    }
}

/// Install the global subscriber. `RUST_LOG` wins over the configured level.
fn init_tracing(logging: &LoggingConfig) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&logging.level));
    if logging.json {
        tracing_subscriber::fmt()
            .json()
            .with_env_filter(filter)
            .with_target(true)
            .init();
    } else {
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_target(true)
            .init();
    }
}

/// Drive the session until the console closes, then hand it back.
///
/// Chat requests run on their own tasks so the room keeps animating while
/// a reply is pending; finished replies come back over a channel.
async fn run(
    mut session: RoomSession,
    backend: ChatBackend,
    config: &EngineConfig,
) -> Result<RoomSession, EngineError> {
    let mut ticker = tokio::time::interval(config.movement.frame_interval());
    ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);
    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    let (reply_tx, mut reply_rx) = mpsc::channel::<Instruction>(REPLY_QUEUE);
    let mut last_frame = Instant::now();

    loop {
        tokio::select! {
            now = ticker.tick() => {
                let elapsed = now.saturating_duration_since(last_frame);
                last_frame = now;
                let report = session.step(elapsed)?;
                log_events(&report.events);
            }
            Some(instruction) = reply_rx.recv() => {
                log_events(&session.apply_instruction(&instruction));
            }
            line = lines.next_line() => {
                let Some(line) = line? else {
                    info!("Console closed");
                    break;
                };
                match ConsoleCommand::parse(&line) {
                    Ok(ConsoleCommand::Quit) => break,
                    Ok(ConsoleCommand::Chat(message)) => {
                        spawn_chat(&backend, message, reply_tx.clone());
                    }
                    Ok(command) => apply_command(&mut session, command),
                    Err(ParseError::Empty) => {}
                    Err(e) => warn!(error = %e, "Ignoring console line"),
                }
            }
        }
    }

    Ok(session)
}

/// Apply a non-chat console command to the session.
fn apply_command(session: &mut RoomSession, command: ConsoleCommand) {
    let events = match command {
        ConsoleCommand::Input(input) => session.handle_input(input),
        ConsoleCommand::Goto(target) => match session.set_target(Some(target)) {
            Ok(events) => events,
            Err(e) => {
                warn!(error = %e, "Cannot walk there");
                return;
            }
        },
        ConsoleCommand::Stop => match session.set_target(None) {
            Ok(events) => events,
            Err(e) => {
                warn!(error = %e, "Cannot stop");
                return;
            }
        },
        ConsoleCommand::Trigger(action) => session.trigger(action),
        ConsoleCommand::Look => {
            let view = session.view();
            info!(
                position = %view.position,
                display = %view.display_position,
                direction = ?view.direction,
                mirrored = view.mirrored,
                action = %view.action,
                prompt = session.prompt().unwrap_or(""),
                "Character"
            );
            return;
        }
        ConsoleCommand::Quit | ConsoleCommand::Chat(_) => return,
    };
    log_events(&events);
}

/// Send a chat message on its own task and queue the reply.
fn spawn_chat(backend: &ChatBackend, message: String, replies: mpsc::Sender<Instruction>) {
    let backend = backend.clone();
    tokio::spawn(async move {
        let instruction = backend.send(&message).await;
        if replies.send(instruction).await.is_err() {
            debug!("Reply arrived after shutdown, dropping");
        }
    });
}

/// Log the events the front-end would react to.
fn log_events(events: &[RoomEvent]) {
    for event in events {
        match event {
            RoomEvent::Speak { text } => info!(text = %text, "Pet says"),
            RoomEvent::NavigateToExercises { request } => info!(
                category = ?request.category,
                query = ?request.query,
                "Open coping exercises"
            ),
            RoomEvent::Arrived { position } => debug!(%position, "Arrived"),
            RoomEvent::Blocked { position, target } => {
                info!(%position, %target, "Path blocked");
            }
            RoomEvent::ActionChanged { from, to } => debug!(%from, %to, "Action changed"),
            RoomEvent::PromptChanged { prompt } => match prompt {
                Some(prompt) => info!(prompt = %prompt, "Prompt"),
                None => debug!("Prompt cleared"),
            },
        }
    }
}
