//! Error types for board access and move validation.

use crate::types::{Direction, Player};
use derive_more::{Display, Error};

/// Coordinate outside the board.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, Error)]
#[display("Cell ({row}, {col}) is outside the board")]
pub struct BoardError {
    /// Offending row.
    pub row: usize,
    /// Offending column.
    pub col: usize,
}

/// Reason a move was rejected.
///
/// Every variant is a recoverable, local rejection: the game state is left
/// exactly as it was before the attempt.
#[derive(Debug, Clone, PartialEq, Eq, Display)]
pub enum MoveError {
    /// The game already has a winner.
    #[display("Game is already over")]
    GameOver,

    /// Coordinate outside the board.
    #[display("Cell ({row}, {col}) is outside the board")]
    OutOfRange {
        /// Offending row.
        row: usize,
        /// Offending column.
        col: usize,
    },

    /// Target cell outside the active window.
    #[display("Cell ({row}, {col}) is outside the grid")]
    OutOfWindow {
        /// Offending row.
        row: usize,
        /// Offending column.
        col: usize,
    },

    /// Target cell already holds a piece.
    #[display("Cell ({row}, {col}) is already occupied")]
    CellOccupied {
        /// Offending row.
        row: usize,
        /// Offending column.
        col: usize,
    },

    /// Source cell holds no piece.
    #[display("Cell ({row}, {col}) is empty")]
    CellEmpty {
        /// Offending row.
        row: usize,
        /// Offending column.
        col: usize,
    },

    /// Source cell holds the opponent's piece.
    #[display("Cell ({row}, {col}) holds your opponent's piece")]
    NotOwner {
        /// Offending row.
        row: usize,
        /// Offending column.
        col: usize,
    },

    /// The mover has placed all of their pieces.
    #[display("No pieces left for {player}; move a piece or the grid instead")]
    NoPiecesLeft {
        /// The player without pieces.
        player: Player,
    },

    /// Relocation and window moves are not unlocked yet.
    #[display("Moving pieces or the grid is not allowed yet")]
    PhaseLocked,

    /// The window would leave the board.
    #[display("Cannot move the grid {direction}")]
    OutOfBounds {
        /// Requested direction.
        direction: Direction,
    },

    /// Diagonal window moves are disabled by configuration.
    #[display("Diagonal grid moves are disabled ({direction})")]
    DirectionDisabled {
        /// Requested direction.
        direction: Direction,
    },

    /// Relocation of the selected piece requested without a selection.
    #[display("No piece selected")]
    NoSelection,

    /// The mover has no legal move at all.
    #[display("No legal move available")]
    NoLegalMove,

    /// An invariant was violated (postcondition failure).
    #[display("Invariant violation: {_0}")]
    InvariantViolation(String),
}

impl std::error::Error for MoveError {}

impl From<BoardError> for MoveError {
    fn from(err: BoardError) -> Self {
        MoveError::OutOfRange {
            row: err.row,
            col: err.col,
        }
    }
}
