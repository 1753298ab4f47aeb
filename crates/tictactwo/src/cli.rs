//! Command-line interface for tictactwo.

use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;
use tictactwo_engine::{Controller, GameMode};

/// Tic-Tac-Two - tic-tac-toe inside a movable window
#[derive(Parser, Debug)]
#[command(name = "tictactwo")]
#[command(about = "Play Tic-Tac-Two in the terminal against people or the planner", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Game configuration file (TOML). Defaults are used when omitted.
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Log engine decisions at debug level
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Subcommand to run
    #[command(subcommand)]
    pub command: Command,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Play an interactive game
    Play {
        /// Who controls each side
        #[arg(short, long, default_value = "human-vs-ai")]
        mode: GameMode,

        /// Override the controller for X
        #[arg(long)]
        x: Option<Controller>,

        /// Override the controller for O
        #[arg(long)]
        o: Option<Controller>,

        /// Seed for the planner's random choices
        #[arg(long)]
        seed: Option<u64>,

        /// Milliseconds per clock tick
        #[arg(long, default_value = "1000")]
        tick_ms: u64,

        /// Milliseconds the AI waits before moving
        #[arg(long, default_value = "600")]
        think_ms: u64,
    },

    /// Play many AI-vs-AI games and report the results
    Simulate {
        /// Number of games
        #[arg(short = 'n', long, default_value = "100")]
        games: u32,

        /// Seed of the first game; game `i` uses `seed + i`
        #[arg(long, default_value = "0")]
        seed: u64,

        /// Moves after which an unfinished game is abandoned
        #[arg(long, default_value = "200")]
        max_moves: u32,

        /// Report format
        #[arg(long, value_enum, default_value = "text")]
        format: OutputFormat,
    },
}

/// How reports are printed.
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    /// Human-readable lines
    Text,
    /// A single JSON object
    Json,
}
