//! Tic-Tac-Two game engine.
//!
//! Tic-Tac-Two is tic-tac-toe played inside a movable window on a larger
//! board. Lines only count inside the window. After an opening phase each
//! side may also relocate one of its pieces or shift the window instead of
//! placing a new piece.
//!
//! # Architecture
//!
//! - **Board**: cell storage and window geometry
//! - **Rules**: [`RulesEngine`] validates and applies moves atomically
//! - **Contracts / invariants**: pre- and postconditions checked on every move
//! - **Clock**: tick-driven [`MoveClock`] with a single expiry per countdown
//! - **Planner**: snapshot-based heuristic AI with a seeded random source
//! - **Session**: [`GameSession`] ties the above together for a host
//!
//! # Example
//!
//! ```
//! use tictactwo_engine::{GameConfig, GameMode, GameSession, Planner};
//!
//! let mut session =
//!     GameSession::with_mode(GameConfig::default(), GameMode::HumanVsAi, Planner::seeded(7))?;
//! session.place(2, 2)?;
//! assert!(session.is_ai_turn());
//! session.play_ai_turn()?;
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

#![warn(missing_docs)]
#![forbid(unsafe_code)]

// Private module declarations
mod action;
mod board;
mod clock;
mod config;
mod contracts;
mod error;
mod invariants;
mod planner;
mod rules;
mod session;
mod state;
mod types;

// Crate-level exports - Core types
pub use types::{Cell, Coord, Direction, PerPlayer, Player};

// Crate-level exports - Board and window
pub use board::{Board, Window};

// Crate-level exports - Configuration
pub use config::{ConfigError, GameConfig, UnlockPolicy};

// Crate-level exports - Errors
pub use error::{BoardError, MoveError};

// Crate-level exports - Moves and state
pub use action::{Applied, Move, Outcome};
pub use state::{Snapshot, TurnState};

// Crate-level exports - Rules
pub use rules::{RulesEngine, check_win, window_has_line, window_winner};

// Crate-level exports - Validation
pub use contracts::{Contract, LegalMove, MoveContract};
pub use invariants::{
    EngineInvariants, Invariant, InvariantSet, InvariantViolation, PieceAccountingInvariant,
    TerminalWinnerInvariant, WindowBoundsInvariant,
};

// Crate-level exports - Clock, planner and session
pub use clock::{ClockEvent, MoveClock};
pub use planner::{MIN_VIABLE_SCORE, Planner, ProposedMove, Stage, WIN_SCORE};
pub use session::{Controller, GameMode, GameSession, HistoryEntry, MoveSource};
