//! Human player reading commands from the terminal.

use super::{Intent, Player};
use anyhow::{Result, anyhow, bail};
use std::sync::Arc;
use tictactwo_engine::{Coord, Direction, Move, Snapshot};
use tokio::sync::{Mutex, mpsc};
use tracing::debug;

/// Terminal lines shared by every human at the keyboard.
pub type SharedInput = Arc<Mutex<mpsc::UnboundedReceiver<String>>>;

/// Parses one line of input into an intent.
pub fn parse_command(line: &str) -> Result<Intent> {
    let mut words = line.split_whitespace();
    let Some(command) = words.next() else {
        bail!("Empty command (type h for help)");
    };
    let numbers = |words: std::str::SplitWhitespace<'_>| -> Result<Vec<usize>> {
        words
            .map(|w| w.parse::<usize>().map_err(|_| anyhow!("'{}' is not a cell index", w)))
            .collect()
    };

    let intent = match command.to_ascii_lowercase().as_str() {
        "p" | "place" => match numbers(words)?[..] {
            [row, col] => Intent::Play(Move::Place {
                at: Coord::new(row, col),
            }),
            _ => bail!("Usage: p <row> <col>"),
        },
        "m" | "move" => match numbers(words)?[..] {
            [from_row, from_col, to_row, to_col] => Intent::Play(Move::Relocate {
                from: Coord::new(from_row, from_col),
                to: Coord::new(to_row, to_col),
            }),
            _ => bail!("Usage: m <row> <col> <row> <col>"),
        },
        "s" | "select" => match numbers(words)?[..] {
            [row, col] => Intent::Select(Coord::new(row, col)),
            _ => bail!("Usage: s <row> <col>"),
        },
        "t" | "to" => match numbers(words)?[..] {
            [row, col] => Intent::RelocateSelected(Coord::new(row, col)),
            _ => bail!("Usage: t <row> <col>"),
        },
        "g" | "grid" | "shift" => {
            let name = words.next().ok_or_else(|| anyhow!("Usage: g <direction>"))?;
            let direction: Direction = name
                .parse()
                .map_err(|_| anyhow!("Unknown direction '{}'", name))?;
            Intent::shift(direction)
        }
        "c" | "clear" => Intent::ClearSelection,
        "r" | "restart" => Intent::Restart,
        "h" | "help" | "?" => Intent::Help,
        "q" | "quit" | "exit" => Intent::Quit,
        other => bail!("Unknown command '{}' (type h for help)", other),
    };
    Ok(intent)
}

/// Human player fed by lines of terminal input.
///
/// Two humans at one terminal share the same input; only the side to move
/// reads from it.
pub struct HumanPlayer {
    name: String,
    input_rx: SharedInput,
}

impl HumanPlayer {
    /// Creates a new human player.
    pub fn new(name: impl Into<String>, input_rx: SharedInput) -> Self {
        Self {
            name: name.into(),
            input_rx,
        }
    }
}

#[async_trait::async_trait]
impl Player for HumanPlayer {
    async fn next_intent(&mut self, _snapshot: &Snapshot) -> Result<Intent> {
        // Wait for a line that parses; report the rest.
        let mut input = self.input_rx.lock().await;
        while let Some(line) = input.recv().await {
            match parse_command(&line) {
                Ok(intent) => {
                    debug!(player = %self.name, ?intent, "Command parsed");
                    return Ok(intent);
                }
                Err(e) => println!("{}", e),
            }
        }

        Ok(Intent::Quit)
    }

    fn name(&self) -> &str {
        &self.name
    }
}
