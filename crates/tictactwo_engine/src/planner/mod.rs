//! Heuristic move planner.
//!
//! The planner reads a [`Snapshot`] and proposes one move. It never touches
//! a live game: every simulation runs on a scratch copy of the board. All
//! randomness comes from the planner's own seeded generator, so the same
//! snapshot and seed always yield the same proposal.

mod placement;
mod relocation;
mod window;

use crate::action::Move;
use crate::board::Board;
use crate::rules::RulesEngine;
use crate::state::Snapshot;
use crate::types::{Cell, Coord, Player};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};
use tracing::{debug, instrument};

/// Score assigned to a relocation or placement that wins on the spot.
pub const WIN_SCORE: i32 = 1000;

/// Candidates scoring below this are not worth playing over a random move.
pub const MIN_VIABLE_SCORE: i32 = 1;

/// Which decision stage produced a proposal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, strum::Display)]
#[serde(rename_all = "kebab-case")]
#[strum(serialize_all = "kebab-case")]
pub enum Stage {
    /// Placement that wins immediately.
    ImmediateWin,
    /// Placement that stops an opponent line.
    Block,
    /// Placement extending the mover's longest run.
    Positional,
    /// Window shift improving the piece balance.
    WindowShift,
    /// Moving an existing piece.
    Relocation,
    /// Uniform random legal move.
    Fallback,
}

/// A move suggested by the planner.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProposedMove {
    /// The move to play.
    pub mv: Move,
    /// Heuristic score of the move.
    pub score: i32,
    /// Stage that chose it.
    pub stage: Stage,
}

impl ProposedMove {
    fn new(mv: Move, score: i32, stage: Stage) -> Self {
        Self { mv, score, stage }
    }
}

impl std::fmt::Display for ProposedMove {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} ({}, score {})", self.mv, self.stage, self.score)
    }
}

/// Sets `at` to `player` on `board`, runs `f`, then restores the cell.
///
/// Returns `None` if `at` is off the board.
pub(crate) fn with_piece<R>(
    board: &mut Board,
    at: Coord,
    player: Player,
    f: impl FnOnce(&Board) -> R,
) -> Option<R> {
    let previous = board.at(at)?;
    board.set(at.row, at.col, Cell::Occupied(player)).ok()?;
    let result = f(board);
    board.set(at.row, at.col, previous).ok()?;
    Some(result)
}

/// Heuristic planner with an isolated random source.
#[derive(Debug, Clone)]
pub struct Planner {
    rng: StdRng,
}

impl Planner {
    /// Creates a planner whose random choices are fixed by `seed`.
    pub fn seeded(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }

    /// Creates a planner seeded from the operating system.
    pub fn from_entropy() -> Self {
        Self {
            rng: StdRng::from_os_rng(),
        }
    }

    /// Proposes a move for the player to move in `snapshot`.
    ///
    /// Returns `None` when the game is over or the mover has no legal move.
    #[instrument(skip(self, snapshot), fields(player = %snapshot.current_player()))]
    pub fn plan(&mut self, snapshot: &Snapshot) -> Option<ProposedMove> {
        if snapshot.is_game_over() {
            return None;
        }

        let mover = snapshot.current_player();
        let unlocked = snapshot.relocation_unlocked();
        let mut scratch = snapshot.board().clone_snapshot();
        let can_place =
            snapshot.pieces_left(mover) > 0 && !snapshot.empty_cells_in_window().is_empty();

        if !can_place {
            debug!("Placement unavailable, weighing shift against relocation");
            let proposal = unlocked
                .then(|| best_movement(snapshot, &mut scratch, None))
                .flatten();
            return proposal.or_else(|| self.fallback(snapshot));
        }

        if let Some(at) = placement::winning_cell(snapshot, &mut scratch, mover) {
            debug!(%at, "Immediate win");
            return Some(ProposedMove::new(Move::Place { at }, WIN_SCORE, Stage::ImmediateWin));
        }

        if let Some((at, threat)) = placement::blocking_cell(snapshot, &mut scratch) {
            debug!(%at, threat, "Blocking opponent");
            return Some(ProposedMove::new(Move::Place { at }, threat as i32, Stage::Block));
        }

        let positional = placement::best_placement(snapshot, &mut scratch)
            .map(|(at, score)| ProposedMove::new(Move::Place { at }, score as i32, Stage::Positional));

        if unlocked {
            let to_beat = positional.map(|p| p.score);
            if let Some(movement) = best_movement(snapshot, &mut scratch, to_beat) {
                return Some(movement);
            }
        }

        match positional {
            Some(proposal) if proposal.score >= MIN_VIABLE_SCORE => {
                debug!(%proposal, "Positional placement");
                Some(proposal)
            }
            _ => self.fallback(snapshot),
        }
    }

    /// Picks a uniformly random legal move, preferring placements, then
    /// relocations, then window shifts.
    #[instrument(skip(self, snapshot))]
    pub fn fallback(&mut self, snapshot: &Snapshot) -> Option<ProposedMove> {
        let legal = RulesEngine::from_snapshot(snapshot).legal_moves();
        let preferred = legal.iter().map(kind_rank).min()?;
        let pool: Vec<Move> = legal
            .into_iter()
            .filter(|mv| kind_rank(mv) == preferred)
            .collect();

        let mv = pool[self.rng.random_range(0..pool.len())];
        debug!(%mv, candidates = pool.len(), "Random fallback");
        Some(ProposedMove::new(mv, 0, Stage::Fallback))
    }
}

fn kind_rank(mv: &Move) -> u8 {
    match mv {
        Move::Place { .. } => 0,
        Move::Relocate { .. } => 1,
        Move::ShiftWindow { .. } => 2,
    }
}

/// Best of the window-shift and relocation candidates.
///
/// With `to_beat` set, a candidate must score strictly above it (and a
/// shift must also be positive). Without it, the shift must reach
/// [`MIN_VIABLE_SCORE`]. Ties between the two favour relocation.
fn best_movement(snapshot: &Snapshot, scratch: &mut Board, to_beat: Option<i32>) -> Option<ProposedMove> {
    let shift = window::best_shift(snapshot)
        .map(|(direction, score)| {
            ProposedMove::new(Move::ShiftWindow { direction }, score, Stage::WindowShift)
        })
        .filter(|s| s.score >= MIN_VIABLE_SCORE && to_beat.is_none_or(|p| s.score > p));
    let relocation = relocation::best_relocation(snapshot, scratch)
        .map(|(from, to, score)| {
            ProposedMove::new(Move::Relocate { from, to }, score, Stage::Relocation)
        })
        .filter(|r| to_beat.is_none_or(|p| r.score > p));

    let chosen = match (shift, relocation) {
        (Some(shift), Some(relocation)) if shift.score > relocation.score => Some(shift),
        (_, Some(relocation)) => Some(relocation),
        (shift, None) => shift,
    };
    if let Some(proposal) = chosen {
        debug!(%proposal, "Movement chosen");
    }
    chosen
}
