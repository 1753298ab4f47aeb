//! Tic-Tac-Two - terminal front end
//!
//! Interactive play against people or the planner, and batch simulation.

#![warn(missing_docs)]

mod cli;
mod orchestrator;
mod players;
mod simulate;
mod ui;

use anyhow::{Context, Result};
use clap::Parser;
use cli::{Cli, Command, OutputFormat};
use orchestrator::{Finish, Orchestrator};
use players::{AiPlayer, HumanPlayer, Player as _, SharedInput};
use std::io::BufRead;
use std::path::Path;
use std::sync::Arc;
use tictactwo_engine::{Controller, GameConfig, GameMode, GameSession, Planner, Player};
use tokio::sync::{Mutex, mpsc};
use tokio::time::Duration;
use tracing::{info, instrument};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file
    dotenvy::dotenv().ok();

    let cli = Cli::parse();
    init_tracing(cli.verbose);
    let config = load_config(cli.config.as_deref())?;

    match cli.command {
        Command::Play {
            mode,
            x,
            o,
            seed,
            tick_ms,
            think_ms,
        } => run_play(config, mode, x, o, seed, tick_ms, think_ms).await,
        Command::Simulate {
            games,
            seed,
            max_moves,
            format,
        } => run_simulate(&config, games, seed, max_moves, format),
    }
}

/// Logs go to stderr so they never interleave with the board on stdout.
fn init_tracing(verbose: bool) {
    let default = if verbose {
        "info,tictactwo=debug,tictactwo_engine=debug"
    } else {
        "warn,tictactwo=info,tictactwo_engine=info"
    };
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default)))
        .with_writer(std::io::stderr)
        .init();
}

fn load_config(path: Option<&Path>) -> Result<GameConfig> {
    match path {
        Some(path) => GameConfig::from_file(path)
            .with_context(|| format!("Failed to load config from {}", path.display())),
        None => Ok(GameConfig::default()),
    }
}

/// Run an interactive game
#[instrument(skip(config))]
async fn run_play(
    config: GameConfig,
    mode: GameMode,
    x: Option<Controller>,
    o: Option<Controller>,
    seed: Option<u64>,
    tick_ms: u64,
    think_ms: u64,
) -> Result<()> {
    let mut controllers = mode.controllers();
    if let Some(x) = x {
        controllers.x = x;
    }
    if let Some(o) = o {
        controllers.o = o;
    }
    let planner = match seed {
        Some(seed) => Planner::seeded(seed),
        None => Planner::from_entropy(),
    };
    let session = GameSession::new(config, controllers, planner)?;

    let input = spawn_stdin_reader();
    let think = Duration::from_millis(think_ms);
    let make_player = |player: Player| -> Box<dyn players::Player> {
        match *controllers.get(player) {
            Controller::Human => Box::new(HumanPlayer::new(format!("Human {}", player), input.clone())),
            Controller::Ai => Box::new(AiPlayer::new(format!("AI {}", player), think)),
        }
    };
    let player_x = make_player(Player::X);
    let player_o = make_player(Player::O);
    println!("{} vs {} (type h for help)", player_x.name(), player_o.name());

    let mut orchestrator =
        Orchestrator::new(session, player_x, player_o, Duration::from_millis(tick_ms));
    match orchestrator.run().await? {
        Finish::Won(winner) => println!("{} wins!", winner),
        Finish::Quit => println!("Bye."),
    }
    info!(moves = orchestrator.session().history().len(), "Game finished");
    Ok(())
}

/// Forwards stdin lines to the human players.
fn spawn_stdin_reader() -> SharedInput {
    let (tx, rx) = mpsc::unbounded_channel();
    std::thread::spawn(move || {
        let stdin = std::io::stdin();
        for line in stdin.lock().lines() {
            let Ok(line) = line else { break };
            if tx.send(line).is_err() {
                break;
            }
        }
    });
    Arc::new(Mutex::new(rx))
}

/// Run a batch of AI-vs-AI games
fn run_simulate(
    config: &GameConfig,
    games: u32,
    seed: u64,
    max_moves: u32,
    format: OutputFormat,
) -> Result<()> {
    let report = simulate::simulate(config, games, seed, max_moves)?;
    match format {
        OutputFormat::Text => println!("{}", report.to_text()),
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&report)?),
    }
    Ok(())
}
