//! Window bounds invariant: the window never leaves the board.

use super::Invariant;
use crate::RulesEngine;

/// Invariant: the window rectangle lies inside the board rectangle.
pub struct WindowBoundsInvariant;

impl Invariant<RulesEngine> for WindowBoundsInvariant {
    fn holds(engine: &RulesEngine) -> bool {
        let (width, height) = engine.board().dimensions();
        let window = engine.window();
        window.right() <= width && window.bottom() <= height
    }

    fn description() -> &'static str {
        "Window lies inside the board"
    }
}
