//! Piece accounting invariant: pieces on the board match pieces spent.

use super::Invariant;
use crate::{Player, RulesEngine};

/// Invariant: for each player, pieces on the board + pieces left = pieces configured.
///
/// Relocation moves a piece without creating one, so the board count always
/// equals the number placed.
pub struct PieceAccountingInvariant;

impl Invariant<RulesEngine> for PieceAccountingInvariant {
    fn holds(engine: &RulesEngine) -> bool {
        let total = engine.config().pieces_per_player as usize;
        [Player::X, Player::O].into_iter().all(|player| {
            let on_board = engine.board().count(player);
            let left = engine.turn().pieces_left(player) as usize;
            on_board + left == total
        })
    }

    fn description() -> &'static str {
        "Placed pieces plus remaining pieces equal the configured total"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::GameConfig;

    #[test]
    fn test_holds_after_placements() {
        let mut engine = RulesEngine::new(GameConfig::default()).unwrap();
        assert!(PieceAccountingInvariant::holds(&engine));
        engine.place(2, 2).unwrap();
        engine.place(1, 1).unwrap();
        assert!(PieceAccountingInvariant::holds(&engine));
        assert_eq!(engine.turn().pieces_left(Player::X), 5);
        assert_eq!(engine.turn().pieces_left(Player::O), 5);
    }
}
