//! First-class move types.
//!
//! Moves are domain events: they describe what a player intends and can be
//! validated, logged and replayed independently of how they are applied.

use crate::types::{Coord, Direction, Player};
use serde::{Deserialize, Serialize};

/// A move in Tic-Tac-Two.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "kebab-case")]
pub enum Move {
    /// Put a new piece on an empty cell inside the window.
    Place {
        /// Target cell.
        at: Coord,
    },
    /// Move one of the mover's pieces to an empty cell inside the window.
    Relocate {
        /// Cell holding the piece.
        from: Coord,
        /// Empty target cell.
        to: Coord,
    },
    /// Move the window one step.
    ShiftWindow {
        /// Direction of travel.
        direction: Direction,
    },
}

impl std::fmt::Display for Move {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Move::Place { at } => write!(f, "place at {}", at),
            Move::Relocate { from, to } => write!(f, "move {} -> {}", from, to),
            Move::ShiftWindow { direction } => write!(f, "shift window {}", direction),
        }
    }
}

/// What an accepted move led to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Outcome {
    /// Play continues with `next` to move.
    Continue {
        /// Player to move next.
        next: Player,
    },
    /// The game ended with a winner.
    Won(Player),
}

impl Outcome {
    /// Returns the winner if there is one.
    pub fn winner(&self) -> Option<Player> {
        match self {
            Outcome::Won(player) => Some(*player),
            Outcome::Continue { .. } => None,
        }
    }
}

/// An accepted move together with its result.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Applied {
    /// Player who made the move.
    pub player: Player,
    /// The move itself.
    pub mv: Move,
    /// Resulting state transition.
    pub outcome: Outcome,
}

impl std::fmt::Display for Applied {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.player, self.mv)?;
        if let Outcome::Won(winner) = self.outcome {
            write!(f, " ({} wins)", winner)?;
        }
        Ok(())
    }
}
