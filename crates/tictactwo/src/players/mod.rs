//! Player trait and implementations.

mod ai;
mod human;

pub use ai::AiPlayer;
pub use human::{HumanPlayer, SharedInput};

use anyhow::Result;
use tictactwo_engine::{Coord, Direction, Move, Snapshot};

/// What a player wants to do next.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Intent {
    /// Apply a move.
    Play(Move),
    /// Select a piece for a later relocation.
    Select(Coord),
    /// Relocate the selected piece.
    RelocateSelected(Coord),
    /// Forget the selected piece.
    ClearSelection,
    /// Let the planner choose the move.
    Plan,
    /// Start a new game.
    Restart,
    /// Print the command summary.
    Help,
    /// Leave the game.
    Quit,
}

impl Intent {
    /// Window shift shorthand.
    pub fn shift(direction: Direction) -> Self {
        Intent::Play(Move::ShiftWindow { direction })
    }
}

/// Trait for players that produce intents.
#[async_trait::async_trait]
pub trait Player: Send {
    /// Waits for this player's next intent.
    ///
    /// Must be cancel-safe: the orchestrator races it against the clock.
    async fn next_intent(&mut self, snapshot: &Snapshot) -> Result<Intent>;

    /// Returns the player's display name.
    fn name(&self) -> &str;
}
