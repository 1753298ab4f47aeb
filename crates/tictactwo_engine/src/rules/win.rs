//! Win detection scoped to the window.

use super::lines::{AXES, count_direction, longest_run};
use crate::board::{Board, Window};
use crate::types::{Coord, Player};
use tracing::instrument;

/// Checks whether the piece at `at` completes a line of `win_length` for `player`.
///
/// Only cells inside `window` count. Returns false if `at` is outside the
/// window or does not hold `player`'s piece.
#[instrument(skip(board, window))]
pub fn check_win(
    board: &Board,
    window: &Window,
    at: Coord,
    player: Player,
    win_length: usize,
) -> bool {
    if !window.contains_coord(at) || !board.at(at).is_some_and(|c| c.is(player)) {
        return false;
    }
    longest_run(board, window, at, player, win_length) >= win_length
}

/// Scans the whole window for a line of `win_length` belonging to `player`.
#[instrument(skip(board, window))]
pub fn window_has_line(board: &Board, window: &Window, player: Player, win_length: usize) -> bool {
    let need = win_length.saturating_sub(1);
    window.coords().any(|start| {
        board.at(start).is_some_and(|c| c.is(player))
            && AXES
                .iter()
                .any(|&axis| count_direction(board, window, start, player, axis, need) >= need)
    })
}

/// Returns the player with a line in the window, checking `first` before its opponent.
pub fn window_winner(
    board: &Board,
    window: &Window,
    first: Player,
    win_length: usize,
) -> Option<Player> {
    [first, first.opponent()]
        .into_iter()
        .find(|&player| window_has_line(board, window, player, win_length))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Cell;

    #[test]
    fn test_no_winner_empty_board() {
        let board = Board::new(5, 5);
        let window = Window::centered(3, 3, 5, 5).unwrap();
        assert_eq!(window_winner(&board, &window, Player::X, 3), None);
        assert!(!check_win(&board, &window, Coord::new(2, 2), Player::X, 3));
    }

    #[test]
    fn test_winner_column() {
        let mut board = Board::new(5, 5);
        for row in 1..4 {
            board.set(row, 3, Cell::Occupied(Player::O)).unwrap();
        }
        let window = Window::centered(3, 3, 5, 5).unwrap();
        assert!(check_win(&board, &window, Coord::new(2, 3), Player::O, 3));
        assert_eq!(window_winner(&board, &window, Player::X, 3), Some(Player::O));
    }

    #[test]
    fn test_line_outside_window_does_not_count() {
        let mut board = Board::new(5, 5);
        for col in 0..3 {
            board.set(0, col, Cell::Occupied(Player::X)).unwrap();
        }
        let window = Window::centered(3, 3, 5, 5).unwrap();
        assert!(!check_win(&board, &window, Coord::new(0, 1), Player::X, 3));
        assert!(!window_has_line(&board, &window, Player::X, 3));

        let top_left = Window::new(Coord::new(0, 0), 3, 3, 5, 5).unwrap();
        assert!(check_win(&board, &top_left, Coord::new(0, 1), Player::X, 3));
        assert!(window_has_line(&board, &top_left, Player::X, 3));
    }

    #[test]
    fn test_straddling_line_does_not_count() {
        let mut board = Board::new(5, 5);
        for col in 2..5 {
            board.set(2, col, Cell::Occupied(Player::X)).unwrap();
        }
        let window = Window::centered(3, 3, 5, 5).unwrap();
        assert!(!check_win(&board, &window, Coord::new(2, 2), Player::X, 3));
        assert!(!window_has_line(&board, &window, Player::X, 3));
    }

    #[test]
    fn test_win_length_one() {
        let mut board = Board::new(3, 3);
        board.set(0, 0, Cell::Occupied(Player::X)).unwrap();
        let window = Window::centered(3, 3, 3, 3).unwrap();
        assert!(check_win(&board, &window, Coord::new(0, 0), Player::X, 1));
        assert!(window_has_line(&board, &window, Player::X, 1));
        assert!(!window_has_line(&board, &window, Player::O, 1));
    }
}
