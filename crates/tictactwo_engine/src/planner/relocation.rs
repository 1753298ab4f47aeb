//! Relocation candidates for pieces already inside the window.

use super::WIN_SCORE;
use crate::board::Board;
use crate::rules::check_win;
use crate::rules::lines::longest_run;
use crate::state::Snapshot;
use crate::types::{Cell, Coord};

/// Score of moving the mover's piece from `from` to `to` on `scratch`.
///
/// A winning move scores [`WIN_SCORE`]; otherwise the longest run through
/// `to`. The scratch board is restored before returning.
fn score_relocation(snapshot: &Snapshot, scratch: &mut Board, from: Coord, to: Coord) -> Option<i32> {
    let player = snapshot.current_player();
    let window = snapshot.window();
    let k = snapshot.config().win_length;

    scratch.set(from.row, from.col, Cell::Empty).ok()?;
    let score = scratch
        .set(to.row, to.col, Cell::Occupied(player))
        .ok()
        .map(|()| {
            if check_win(scratch, window, to, player, k) {
                WIN_SCORE
            } else {
                longest_run(scratch, window, to, player, k) as i32
            }
        });
    scratch.set(to.row, to.col, Cell::Empty).ok()?;
    scratch.set(from.row, from.col, Cell::Occupied(player)).ok()?;
    score
}

/// Best `(from, to)` pair among the mover's pieces inside the window and
/// the empty window cells, first in scan order on ties.
pub(crate) fn best_relocation(snapshot: &Snapshot, scratch: &mut Board) -> Option<(Coord, Coord, i32)> {
    let targets = snapshot.empty_cells_in_window();
    let mut best: Option<(Coord, Coord, i32)> = None;
    for from in snapshot.pieces_in_window(snapshot.current_player()) {
        for &to in &targets {
            let Some(score) = score_relocation(snapshot, scratch, from, to) else {
                continue;
            };
            if best.is_none_or(|(_, _, highest)| score > highest) {
                best = Some((from, to, score));
            }
        }
    }
    best
}
