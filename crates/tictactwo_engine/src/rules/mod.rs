//! Game rules for Tic-Tac-Two.
//!
//! Pure functions over a board and window live in `lines` and `win`; the
//! stateful [`RulesEngine`] validates and applies moves.

mod engine;
pub mod lines;
pub mod win;

pub use engine::RulesEngine;
pub use win::{check_win, window_has_line, window_winner};
