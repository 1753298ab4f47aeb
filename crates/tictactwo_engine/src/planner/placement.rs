//! Placement candidates: immediate win, block and positional score.

use super::with_piece;
use crate::board::Board;
use crate::rules::check_win;
use crate::rules::lines::longest_run;
use crate::state::Snapshot;
use crate::types::{Coord, Player};
use tracing::debug;

/// First empty window cell where placing `player` wins outright.
pub(crate) fn winning_cell(snapshot: &Snapshot, scratch: &mut Board, player: Player) -> Option<Coord> {
    let window = snapshot.window();
    let k = snapshot.config().win_length;
    snapshot.empty_cells_in_window().into_iter().find(|&at| {
        with_piece(scratch, at, player, |board| check_win(board, window, at, player, k))
            .unwrap_or(false)
    })
}

/// Longest run `player` would own through `at` after placing there.
pub(crate) fn run_if_placed(snapshot: &Snapshot, scratch: &mut Board, at: Coord, player: Player) -> usize {
    let window = snapshot.window();
    let k = snapshot.config().win_length;
    with_piece(scratch, at, player, |board| longest_run(board, window, at, player, k)).unwrap_or(0)
}

/// Empty cell with the highest score, first in scan order on ties.
///
/// Cells scoring no more than `floor` are ignored.
fn best_cell(
    snapshot: &Snapshot,
    scratch: &mut Board,
    player: Player,
    floor: usize,
) -> Option<(Coord, usize)> {
    let mut best: Option<(Coord, usize)> = None;
    let mut highest = floor;
    for at in snapshot.empty_cells_in_window() {
        let score = run_if_placed(snapshot, scratch, at, player);
        if score > highest {
            highest = score;
            best = Some((at, score));
        }
    }
    best
}

/// Cell where the opponent would come within one piece of winning.
///
/// Returns the highest-threat cell when that threat reaches `K - 1`.
pub(crate) fn blocking_cell(snapshot: &Snapshot, scratch: &mut Board) -> Option<(Coord, usize)> {
    let opponent = snapshot.current_player().opponent();
    let need = snapshot.config().win_length.saturating_sub(1);
    let (at, threat) = best_cell(snapshot, scratch, opponent, 0)?;
    debug!(%at, threat, need, "Highest opponent threat");
    (threat >= need).then_some((at, threat))
}

/// Best positional placement for the mover.
pub(crate) fn best_placement(snapshot: &Snapshot, scratch: &mut Board) -> Option<(Coord, usize)> {
    best_cell(snapshot, scratch, snapshot.current_player(), 0)
}
