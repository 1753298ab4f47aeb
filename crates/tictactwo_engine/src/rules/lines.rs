//! Window-scoped run counting shared by win detection and the planner.

use crate::board::{Board, Window};
use crate::types::{Coord, Player};

/// The four line axes: horizontal, vertical and both diagonals.
pub const AXES: [(isize, isize); 4] = [(0, 1), (1, 0), (1, 1), (1, -1)];

/// Counts `player`'s consecutive pieces from `at` (exclusive) along `(d_row, d_col)`.
///
/// Counting stops at the first cell that is off the board, outside the
/// window or not `player`'s, and after at most `max_steps` cells.
pub fn count_direction(
    board: &Board,
    window: &Window,
    at: Coord,
    player: Player,
    (d_row, d_col): (isize, isize),
    max_steps: usize,
) -> usize {
    let mut count = 0;
    let mut cursor = at;
    while count < max_steps {
        let Some(next) = cursor.offset(d_row, d_col) else {
            break;
        };
        let owned = window.contains_coord(next) && board.at(next).is_some_and(|c| c.is(player));
        if !owned {
            break;
        }
        count += 1;
        cursor = next;
    }
    count
}

/// Length of the run through `at` along one axis, counting `at` itself.
///
/// Each side contributes at most `reach` cells.
pub fn run_through(
    board: &Board,
    window: &Window,
    at: Coord,
    player: Player,
    (d_row, d_col): (isize, isize),
    reach: usize,
) -> usize {
    1 + count_direction(board, window, at, player, (d_row, d_col), reach)
        + count_direction(board, window, at, player, (-d_row, -d_col), reach)
}

/// Longest run through `at` on any axis, each side reaching `win_length - 1` cells.
pub fn longest_run(
    board: &Board,
    window: &Window,
    at: Coord,
    player: Player,
    win_length: usize,
) -> usize {
    let reach = win_length.saturating_sub(1);
    AXES.iter()
        .map(|&axis| run_through(board, window, at, player, axis, reach))
        .max()
        .unwrap_or(1)
}
