//! Turn bookkeeping and read-only snapshots.

use crate::board::{Board, Window};
use crate::config::GameConfig;
use crate::types::{Coord, PerPlayer, Player};
use derive_getters::Getters;
use serde::{Deserialize, Serialize};

/// Whose turn it is and how far the game has progressed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TurnState {
    pub(crate) current_player: Player,
    pub(crate) pieces_left: PerPlayer<u32>,
    pub(crate) move_count: u32,
    pub(crate) selected: Option<Coord>,
    pub(crate) winner: Option<Player>,
    pub(crate) game_over: bool,
}

impl TurnState {
    pub(crate) fn new(config: &GameConfig) -> Self {
        Self {
            current_player: config.first_player,
            pieces_left: PerPlayer::both(config.pieces_per_player),
            move_count: 0,
            selected: None,
            winner: None,
            game_over: false,
        }
    }

    /// Player to move.
    pub fn current_player(&self) -> Player {
        self.current_player
    }

    /// Pieces `player` may still place.
    pub fn pieces_left(&self, player: Player) -> u32 {
        *self.pieces_left.get(player)
    }

    /// Total accepted moves so far.
    pub fn move_count(&self) -> u32 {
        self.move_count
    }

    /// Piece picked for relocation, if any.
    pub fn selected(&self) -> Option<Coord> {
        self.selected
    }

    /// Winner, once the game is over.
    pub fn winner(&self) -> Option<Player> {
        self.winner
    }

    /// True once a player has won.
    pub fn is_game_over(&self) -> bool {
        self.game_over
    }

    pub(crate) fn switch_player(&mut self) {
        self.current_player = self.current_player.opponent();
    }
}

/// Immutable copy of everything a renderer or planner needs.
///
/// A snapshot owns its data, so it can be handed to deferred work without
/// borrowing the live game.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Getters)]
pub struct Snapshot {
    /// Configuration the game was created with.
    config: GameConfig,
    /// Board contents.
    board: Board,
    /// Current window.
    window: Window,
    /// Turn bookkeeping.
    turn: TurnState,
}

impl Snapshot {
    pub(crate) fn new(config: GameConfig, board: Board, window: Window, turn: TurnState) -> Self {
        Self {
            config,
            board,
            window,
            turn,
        }
    }

    /// Player to move.
    pub fn current_player(&self) -> Player {
        self.turn.current_player
    }

    /// Pieces `player` may still place.
    pub fn pieces_left(&self, player: Player) -> u32 {
        self.turn.pieces_left(player)
    }

    /// Pieces `player` has placed.
    pub fn placed(&self, player: Player) -> u32 {
        self.config
            .pieces_per_player
            .saturating_sub(self.pieces_left(player))
    }

    /// Whether relocation and window moves are available.
    pub fn relocation_unlocked(&self) -> bool {
        self.config.unlock.is_unlocked(
            self.turn.move_count,
            self.placed(Player::X),
            self.placed(Player::O),
        )
    }

    /// Empty cells inside the window, in row-major order.
    pub fn empty_cells_in_window(&self) -> Vec<Coord> {
        self.window.empty_cells(&self.board)
    }

    /// `player`'s pieces inside the window.
    pub fn pieces_in_window(&self, player: Player) -> Vec<Coord> {
        self.window
            .coords()
            .filter(|c| self.board.at(*c).is_some_and(|cell| cell.is(player)))
            .collect()
    }

    /// `player`'s pieces anywhere on the board.
    pub fn pieces_on_board(&self, player: Player) -> Vec<Coord> {
        self.board
            .coords()
            .filter(|c| self.board.at(*c).is_some_and(|cell| cell.is(player)))
            .collect()
    }

    /// True once a player has won.
    pub fn is_game_over(&self) -> bool {
        self.turn.game_over
    }
}
