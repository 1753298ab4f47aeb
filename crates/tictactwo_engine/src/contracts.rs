//! Contract-based validation for Tic-Tac-Two moves.
//!
//! Preconditions decide whether a move may be applied; postconditions check
//! that an applied move left the engine in a consistent state.

use crate::action::Move;
use crate::error::MoveError;
use crate::invariants::{EngineInvariants, InvariantSet};
use crate::rules::RulesEngine;
use crate::types::{Coord, Direction};
use tracing::{instrument, warn};

/// A contract defines preconditions and postconditions for state transitions.
pub trait Contract<S, A> {
    /// Checks preconditions before applying the action.
    fn pre(state: &S, action: &A) -> Result<(), MoveError>;

    /// Checks postconditions after applying the action.
    fn post(before: &S, after: &S) -> Result<(), MoveError>;
}

/// Precondition: nobody has won yet.
pub struct GameInProgress;

impl GameInProgress {
    /// Rejects any move once the game is over.
    pub fn check(engine: &RulesEngine) -> Result<(), MoveError> {
        if engine.turn().is_game_over() {
            Err(MoveError::GameOver)
        } else {
            Ok(())
        }
    }
}

/// Precondition: the target cell is on the board and inside the window.
pub struct InsideWindow;

impl InsideWindow {
    /// Validates the target coordinate.
    pub fn check(engine: &RulesEngine, at: Coord) -> Result<(), MoveError> {
        let Coord { row, col } = at;
        if !engine.board().in_bounds(row, col) {
            return Err(MoveError::OutOfRange { row, col });
        }
        if !engine.window().contains(row, col) {
            return Err(MoveError::OutOfWindow { row, col });
        }
        Ok(())
    }
}

/// Precondition: the target cell is empty.
pub struct CellIsEmpty;

impl CellIsEmpty {
    /// Validates that nothing occupies `at`.
    pub fn check(engine: &RulesEngine, at: Coord) -> Result<(), MoveError> {
        if engine.board().get(at.row, at.col)?.is_empty() {
            Ok(())
        } else {
            Err(MoveError::CellOccupied {
                row: at.row,
                col: at.col,
            })
        }
    }
}

/// Precondition: the mover still has pieces to place.
pub struct HasPiecesLeft;

impl HasPiecesLeft {
    /// Validates the mover's piece counter.
    pub fn check(engine: &RulesEngine) -> Result<(), MoveError> {
        let player = engine.turn().current_player();
        if engine.turn().pieces_left(player) == 0 {
            Err(MoveError::NoPiecesLeft { player })
        } else {
            Ok(())
        }
    }
}

/// Precondition: the configured unlock policy is satisfied.
pub struct PhaseUnlocked;

impl PhaseUnlocked {
    /// Validates the relocation / window-move gate.
    pub fn check(engine: &RulesEngine) -> Result<(), MoveError> {
        if engine.relocation_unlocked() {
            Ok(())
        } else {
            Err(MoveError::PhaseLocked)
        }
    }
}

/// Precondition: the source cell holds the mover's piece.
pub struct OwnsPiece;

impl OwnsPiece {
    /// Validates the relocation source.
    pub fn check(engine: &RulesEngine, from: Coord) -> Result<(), MoveError> {
        let Coord { row, col } = from;
        match engine.board().get(row, col)?.player() {
            None => Err(MoveError::CellEmpty { row, col }),
            Some(owner) if owner != engine.turn().current_player() => {
                Err(MoveError::NotOwner { row, col })
            }
            Some(_) => Ok(()),
        }
    }
}

/// Precondition: the window can move in the requested direction.
pub struct ShiftAllowed;

impl ShiftAllowed {
    /// Validates the direction against configuration and board edges.
    pub fn check(engine: &RulesEngine, direction: Direction) -> Result<(), MoveError> {
        if direction.is_diagonal() && !engine.config().diagonal_shifts {
            return Err(MoveError::DirectionDisabled { direction });
        }
        if engine.window().shifted(direction).is_none() {
            return Err(MoveError::OutOfBounds { direction });
        }
        Ok(())
    }
}

/// Composite precondition for every move kind.
///
/// Checks run in a fixed order so the reported reason is predictable:
/// game over first, then geometry, then occupancy, then counters and phase.
pub struct LegalMove;

impl LegalMove {
    /// Validates all preconditions for `mv`.
    #[instrument(skip(engine))]
    pub fn check(engine: &RulesEngine, mv: &Move) -> Result<(), MoveError> {
        GameInProgress::check(engine)?;
        match *mv {
            Move::Place { at } => {
                InsideWindow::check(engine, at)?;
                CellIsEmpty::check(engine, at)?;
                HasPiecesLeft::check(engine)?;
            }
            Move::Relocate { from, to } => {
                PhaseUnlocked::check(engine)?;
                OwnsPiece::check(engine, from)?;
                InsideWindow::check(engine, to)?;
                CellIsEmpty::check(engine, to)?;
            }
            Move::ShiftWindow { direction } => {
                PhaseUnlocked::check(engine)?;
                ShiftAllowed::check(engine, direction)?;
            }
        }
        Ok(())
    }
}

/// Contract for all moves.
///
/// Postconditions:
/// - Engine invariants hold
/// - The turn passed to the opponent unless the move ended the game
pub struct MoveContract;

impl Contract<RulesEngine, Move> for MoveContract {
    fn pre(engine: &RulesEngine, mv: &Move) -> Result<(), MoveError> {
        LegalMove::check(engine, mv)
    }

    fn post(before: &RulesEngine, after: &RulesEngine) -> Result<(), MoveError> {
        EngineInvariants::check_all(after).map_err(|violations| {
            let descriptions = violations
                .iter()
                .map(|v| v.description.as_str())
                .collect::<Vec<_>>()
                .join("; ");
            warn!(%descriptions, "Postcondition failed");
            MoveError::InvariantViolation(format!("Postcondition failed: {}", descriptions))
        })?;

        let expected = before.turn().current_player().opponent();
        if !after.turn().is_game_over() && after.turn().current_player() != expected {
            warn!(?expected, "Turn did not alternate");
            return Err(MoveError::InvariantViolation(
                "Postcondition failed: players alternate turns".to_string(),
            ));
        }
        Ok(())
    }
}
