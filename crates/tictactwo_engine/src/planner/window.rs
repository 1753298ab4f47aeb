//! Window-shift candidates.

use crate::board::Window;
use crate::state::Snapshot;
use crate::types::{Direction, Player};

/// Mover's pieces minus the opponent's pieces inside `window`.
pub(crate) fn balance(snapshot: &Snapshot, window: &Window, mover: Player) -> i32 {
    let board = snapshot.board();
    window.count(board, mover) as i32 - window.count(board, mover.opponent()) as i32
}

/// Legal shift direction with the best piece balance, first in
/// [`Direction`] order on ties.
pub(crate) fn best_shift(snapshot: &Snapshot) -> Option<(Direction, i32)> {
    let mover = snapshot.current_player();
    let mut best: Option<(Direction, i32)> = None;
    for direction in Direction::enabled(snapshot.config().diagonal_shifts) {
        let Some(moved) = snapshot.window().shifted(direction) else {
            continue;
        };
        let score = balance(snapshot, &moved, mover);
        if best.is_none_or(|(_, highest)| score > highest) {
            best = Some((direction, score));
        }
    }
    best
}
