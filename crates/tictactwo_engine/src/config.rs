//! Game configuration and validation.

use crate::board::Window;
use crate::types::{Coord, Player};
use derive_more::{Display, Error};
use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::{debug, info, instrument, warn};

/// When relocating pieces and moving the window become available.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "policy", rename_all = "kebab-case")]
pub enum UnlockPolicy {
    /// Unlocked once the total number of accepted moves reaches `threshold`.
    MoveCount {
        /// Moves required.
        threshold: u32,
    },
    /// Unlocked once each player has placed at least `per_player` pieces.
    PiecesPlaced {
        /// Pieces each side must have placed.
        per_player: u32,
    },
}

impl Default for UnlockPolicy {
    fn default() -> Self {
        UnlockPolicy::MoveCount { threshold: 4 }
    }
}

impl UnlockPolicy {
    /// Evaluates the policy against the move counter and pieces placed by each side.
    pub fn is_unlocked(&self, move_count: u32, placed_x: u32, placed_o: u32) -> bool {
        match *self {
            UnlockPolicy::MoveCount { threshold } => move_count >= threshold,
            UnlockPolicy::PiecesPlaced { per_player } => {
                placed_x >= per_player && placed_o >= per_player
            }
        }
    }
}

/// Immutable parameters of a game.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    /// Display name.
    pub name: String,
    /// Board columns.
    pub board_width: usize,
    /// Board rows.
    pub board_height: usize,
    /// Window columns.
    pub window_width: usize,
    /// Window rows.
    pub window_height: usize,
    /// Consecutive pieces needed to win (K).
    pub win_length: usize,
    /// Pieces each player may place.
    pub pieces_per_player: u32,
    /// Gate for relocation and window moves.
    pub unlock: UnlockPolicy,
    /// Whether the window may move diagonally.
    pub diagonal_shifts: bool,
    /// Initial top-left corner of the window; centred when absent.
    pub window_origin: Option<Coord>,
    /// Player who moves first.
    pub first_player: Player,
    /// Ticks a player has for each move.
    pub clock_ticks: u32,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            name: "TIC TAC TWO".to_string(),
            board_width: 5,
            board_height: 5,
            window_width: 3,
            window_height: 3,
            win_length: 3,
            pieces_per_player: 6,
            unlock: UnlockPolicy::default(),
            diagonal_shifts: true,
            window_origin: None,
            first_player: Player::X,
            clock_ticks: 15,
        }
    }
}

impl GameConfig {
    /// Loads configuration from a TOML file and validates it.
    #[instrument(skip(path), fields(path = %path.as_ref().display()))]
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        debug!("Loading game config from file");
        let content = std::fs::read_to_string(path.as_ref())
            .map_err(|e| ConfigError::new(format!("Failed to read config file: {}", e)))?;
        let config = Self::from_toml(&content)?;
        info!(name = %config.name, "Game config loaded");
        Ok(config)
    }

    /// Parses configuration from TOML text and validates it.
    #[instrument(skip(content))]
    pub fn from_toml(content: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(content)
            .map_err(|e| ConfigError::new(format!("Failed to parse config: {}", e)))?;
        config.validate()?;
        Ok(config)
    }

    /// Checks the configuration for values no game can be built from.
    #[instrument(skip(self), fields(name = %self.name))]
    pub fn validate(&self) -> Result<(), ConfigError> {
        let dims = [
            ("board_width", self.board_width),
            ("board_height", self.board_height),
            ("window_width", self.window_width),
            ("window_height", self.window_height),
            ("win_length", self.win_length),
        ];
        if let Some((field, _)) = dims.iter().find(|(_, v)| *v == 0) {
            warn!(field, "Non-positive dimension");
            return Err(ConfigError::new(format!("{} must be positive", field)));
        }
        if self.window_width > self.board_width || self.window_height > self.board_height {
            warn!("Window larger than board");
            return Err(ConfigError::new(format!(
                "Window {}x{} does not fit on board {}x{}",
                self.window_width, self.window_height, self.board_width, self.board_height
            )));
        }
        if self.win_length > self.window_width.max(self.window_height) {
            warn!(win_length = self.win_length, "Win length exceeds window");
            return Err(ConfigError::new(format!(
                "win_length {} exceeds window size {}x{}",
                self.win_length, self.window_width, self.window_height
            )));
        }
        if self.clock_ticks == 0 {
            return Err(ConfigError::new("clock_ticks must be positive".to_string()));
        }
        if self.initial_window().is_none() {
            return Err(ConfigError::new(format!(
                "Window origin {:?} places the window off the board",
                self.window_origin
            )));
        }
        if !self.unlock_reachable() {
            warn!(unlock = ?self.unlock, "Unlock gate can never be reached");
            return Err(ConfigError::new(format!(
                "Unlock gate {:?} is never reached: at most {} placements fit before the window fills or pieces run out",
                self.unlock,
                self.max_opening_placements()
            )));
        }
        Ok(())
    }

    /// Placements possible before the first stall of a locked game.
    ///
    /// While locked only placements are legal, so play stops once the
    /// window is full or the players run out of pieces.
    fn max_opening_placements(&self) -> u32 {
        let window_cells = u32::try_from(self.window_width.saturating_mul(self.window_height))
            .unwrap_or(u32::MAX);
        window_cells.min(self.pieces_per_player.saturating_mul(2))
    }

    /// Whether the opening can reach the unlock gate.
    fn unlock_reachable(&self) -> bool {
        let placements = self.max_opening_placements();
        match self.unlock {
            UnlockPolicy::MoveCount { threshold } => threshold <= placements,
            // Sides alternate, so the second player has placed half.
            UnlockPolicy::PiecesPlaced { per_player } => per_player <= placements / 2,
        }
    }

    /// Builds the starting window.
    pub fn initial_window(&self) -> Option<Window> {
        match self.window_origin {
            Some(origin) => Window::new(
                origin,
                self.window_width,
                self.window_height,
                self.board_width,
                self.board_height,
            ),
            None => Window::centered(
                self.window_width,
                self.window_height,
                self.board_width,
                self.board_height,
            ),
        }
    }
}

/// Configuration error.
#[derive(Debug, Clone, Display, Error)]
#[display("Config error: {} at {}:{}", message, file, line)]
pub struct ConfigError {
    /// Error message.
    pub message: String,
    /// Line number where error occurred.
    pub line: u32,
    /// Source file where error occurred.
    pub file: &'static str,
}

impl ConfigError {
    /// Creates a new configuration error.
    #[track_caller]
    pub fn new(message: String) -> Self {
        let loc = std::panic::Location::caller();
        Self {
            message,
            line: loc.line(),
            file: loc.file(),
        }
    }
}
