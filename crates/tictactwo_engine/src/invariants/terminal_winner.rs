//! Terminal winner invariant: a finished game always names its winner.

use super::Invariant;
use crate::RulesEngine;

/// Invariant: `game_over` holds exactly when a winner is recorded.
pub struct TerminalWinnerInvariant;

impl Invariant<RulesEngine> for TerminalWinnerInvariant {
    fn holds(engine: &RulesEngine) -> bool {
        engine.turn().is_game_over() == engine.turn().winner().is_some()
    }

    fn description() -> &'static str {
        "Game over implies a winner and vice versa"
    }
}
