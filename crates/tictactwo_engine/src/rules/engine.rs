//! Stateful rules engine: validates and applies moves atomically.

use super::win::{check_win, window_winner};
use crate::action::{Applied, Move, Outcome};
use crate::board::{Board, Window};
use crate::config::{ConfigError, GameConfig};
use crate::contracts::{Contract, GameInProgress, LegalMove, MoveContract, OwnsPiece};
use crate::error::MoveError;
use crate::state::{Snapshot, TurnState};
use crate::types::{Cell, Coord, Direction, Player};
use tracing::{debug, info, instrument, warn};

/// Tic-Tac-Two rules engine.
///
/// Owns the board, the window and the turn state. Every operation is
/// atomic: it is either fully applied or rejected with a [`MoveError`]
/// and no change.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RulesEngine {
    pub(crate) config: GameConfig,
    pub(crate) board: Board,
    pub(crate) window: Window,
    pub(crate) turn: TurnState,
    /// Set by a window shift; the next place/relocate rescans the window.
    pub(crate) rescan_window: bool,
}

impl RulesEngine {
    /// Creates a game from a validated configuration.
    #[instrument(skip(config), fields(name = %config.name))]
    pub fn new(config: GameConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        let window = config
            .initial_window()
            .ok_or_else(|| ConfigError::new("Window does not fit on the board".to_string()))?;
        info!(
            board = ?(config.board_width, config.board_height),
            window = %window.origin(),
            "Creating rules engine"
        );
        Ok(Self {
            board: Board::new(config.board_width, config.board_height),
            window,
            turn: TurnState::new(&config),
            rescan_window: false,
            config,
        })
    }

    /// Rebuilds an engine from a snapshot, for simulation.
    pub fn from_snapshot(snapshot: &Snapshot) -> Self {
        Self {
            config: snapshot.config().clone(),
            board: snapshot.board().clone_snapshot(),
            window: *snapshot.window(),
            turn: snapshot.turn().clone(),
            rescan_window: false,
        }
    }

    /// Returns the configuration.
    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    /// Returns the board.
    pub fn board(&self) -> &Board {
        &self.board
    }

    /// Returns the window.
    pub fn window(&self) -> &Window {
        &self.window
    }

    /// Returns the turn state.
    pub fn turn(&self) -> &TurnState {
        &self.turn
    }

    /// Pieces `player` has placed so far.
    pub fn placed(&self, player: Player) -> u32 {
        self.config
            .pieces_per_player
            .saturating_sub(self.turn.pieces_left(player))
    }

    /// Whether relocation and window moves are available.
    pub fn relocation_unlocked(&self) -> bool {
        self.config.unlock.is_unlocked(
            self.turn.move_count,
            self.placed(Player::X),
            self.placed(Player::O),
        )
    }

    /// Returns an owned, read-only copy of the current state.
    pub fn snapshot(&self) -> Snapshot {
        Snapshot::new(
            self.config.clone(),
            self.board.clone_snapshot(),
            self.window,
            self.turn.clone(),
        )
    }

    /// Checks whether the piece at `(row, col)` completes a line for `player`
    /// inside the current window.
    pub fn check_win(&self, row: usize, col: usize, player: Player) -> bool {
        check_win(
            &self.board,
            &self.window,
            Coord::new(row, col),
            player,
            self.config.win_length,
        )
    }

    /// Places the mover's piece at `(row, col)`.
    pub fn place(&mut self, row: usize, col: usize) -> Result<Applied, MoveError> {
        self.apply(Move::Place {
            at: Coord::new(row, col),
        })
    }

    /// Moves the mover's piece from `(from_row, from_col)` to `(to_row, to_col)`.
    pub fn relocate(
        &mut self,
        from_row: usize,
        from_col: usize,
        to_row: usize,
        to_col: usize,
    ) -> Result<Applied, MoveError> {
        self.apply(Move::Relocate {
            from: Coord::new(from_row, from_col),
            to: Coord::new(to_row, to_col),
        })
    }

    /// Moves the window one step in `direction`.
    pub fn shift_window(&mut self, direction: Direction) -> Result<Applied, MoveError> {
        self.apply(Move::ShiftWindow { direction })
    }

    /// Returns true if `mv` would be accepted right now.
    pub fn is_legal(&self, mv: &Move) -> bool {
        LegalMove::check(self, mv).is_ok()
    }

    /// Validates and applies a move.
    #[instrument(skip(self), fields(player = %self.turn.current_player))]
    pub fn apply(&mut self, mv: Move) -> Result<Applied, MoveError> {
        if let Err(error) = MoveContract::pre(self, &mv) {
            warn!(%error, %mv, "Move rejected");
            return Err(error);
        }

        #[cfg(debug_assertions)]
        let before = self.clone();

        let player = self.turn.current_player;
        let outcome = match mv {
            Move::Place { at } => {
                self.board.set(at.row, at.col, Cell::Occupied(player))?;
                *self.turn.pieces_left.get_mut(player) -= 1;
                self.settle(at, player)
            }
            Move::Relocate { from, to } => {
                self.board.set(to.row, to.col, Cell::Occupied(player))?;
                self.board.set(from.row, from.col, Cell::Empty)?;
                self.settle(to, player)
            }
            Move::ShiftWindow { direction } => {
                let (d_row, d_col) = direction.delta();
                self.window.shift(d_row, d_col);
                self.rescan_window = true;
                self.advance()
            }
        };
        self.turn.selected = None;

        #[cfg(debug_assertions)]
        if let Err(error) = MoveContract::post(&before, self) {
            *self = before;
            return Err(error);
        }

        info!(%mv, ?outcome, "Move applied");
        Ok(Applied {
            player,
            mv,
            outcome,
        })
    }

    /// Runs win detection after a piece landed on `at`, then ends the turn.
    fn settle(&mut self, at: Coord, player: Player) -> Outcome {
        let k = self.config.win_length;
        let winner = if check_win(&self.board, &self.window, at, player, k) {
            Some(player)
        } else if self.rescan_window {
            window_winner(&self.board, &self.window, player, k)
        } else {
            None
        };
        self.rescan_window = false;

        match winner {
            Some(winner) => {
                info!(%winner, "Game won");
                self.turn.winner = Some(winner);
                self.turn.game_over = true;
                Outcome::Won(winner)
            }
            None => self.advance(),
        }
    }

    fn advance(&mut self) -> Outcome {
        self.turn.switch_player();
        self.turn.move_count += 1;
        Outcome::Continue {
            next: self.turn.current_player,
        }
    }

    /// Marks the mover's piece at `at` for a later relocation.
    #[instrument(skip(self))]
    pub fn select(&mut self, at: Coord) -> Result<(), MoveError> {
        GameInProgress::check(self)?;
        OwnsPiece::check(self, at)?;
        debug!(%at, "Piece selected");
        self.turn.selected = Some(at);
        Ok(())
    }

    /// Forgets the selected piece.
    pub fn clear_selection(&mut self) {
        self.turn.selected = None;
    }

    /// Enumerates every legal move for the mover.
    ///
    /// Order is deterministic: placements (row-major), then relocations
    /// (source row-major, then target row-major), then window shifts.
    pub fn legal_moves(&self) -> Vec<Move> {
        if self.turn.game_over {
            return Vec::new();
        }
        let player = self.turn.current_player;
        let empty = self.window.empty_cells(&self.board);
        let mut moves = Vec::new();

        if self.turn.pieces_left(player) > 0 {
            moves.extend(empty.iter().map(|&at| Move::Place { at }));
        }

        if self.relocation_unlocked() {
            for from in self.board.coords() {
                if !self.board.at(from).is_some_and(|c| c.is(player)) {
                    continue;
                }
                moves.extend(empty.iter().map(|&to| Move::Relocate { from, to }));
            }
            moves.extend(
                Direction::enabled(self.config.diagonal_shifts)
                    .filter(|&direction| self.window.shifted(direction).is_some())
                    .map(|direction| Move::ShiftWindow { direction }),
            );
        }

        debug_assert!(moves.iter().all(|mv| self.is_legal(mv)));
        moves
    }
}
