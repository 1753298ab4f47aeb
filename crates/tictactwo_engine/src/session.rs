//! A single game: rules engine, move clock, planner and who controls each side.

use crate::action::{Applied, Move};
use crate::clock::{ClockEvent, MoveClock};
use crate::config::{ConfigError, GameConfig};
use crate::error::MoveError;
use crate::planner::{Planner, ProposedMove};
use crate::rules::RulesEngine;
use crate::state::Snapshot;
use crate::types::{Coord, Direction, PerPlayer, Player};
use serde::{Deserialize, Serialize};
use strum::{EnumIter, EnumString};
use tracing::{debug, info, instrument, warn};

/// Who chooses moves for one side.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, EnumString, strum::Display,
)]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
#[serde(rename_all = "lowercase")]
pub enum Controller {
    /// Moves come from a person.
    Human,
    /// Moves come from the planner.
    Ai,
}

/// Pairing of controllers for X and O.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Default,
    Serialize,
    Deserialize,
    EnumIter,
    EnumString,
    strum::Display,
)]
#[strum(serialize_all = "kebab-case", ascii_case_insensitive)]
#[serde(rename_all = "kebab-case")]
pub enum GameMode {
    /// Two people at one terminal.
    HumanVsHuman,
    /// Person plays X, planner plays O.
    #[default]
    HumanVsAi,
    /// Planner plays X, person plays O.
    AiVsHuman,
    /// Planner on both sides.
    AiVsAi,
}

impl GameMode {
    /// Controllers for X and O in this mode.
    pub fn controllers(self) -> PerPlayer<Controller> {
        let (x, o) = match self {
            GameMode::HumanVsHuman => (Controller::Human, Controller::Human),
            GameMode::HumanVsAi => (Controller::Human, Controller::Ai),
            GameMode::AiVsHuman => (Controller::Ai, Controller::Human),
            GameMode::AiVsAi => (Controller::Ai, Controller::Ai),
        };
        PerPlayer { x, o }
    }
}

/// Where an applied move came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, strum::Display)]
#[serde(rename_all = "kebab-case")]
#[strum(serialize_all = "kebab-case")]
pub enum MoveSource {
    /// Submitted by the side to move.
    Player,
    /// Proposed by the planner on the AI's turn.
    Planner,
    /// Chosen automatically when the clock ran out.
    ClockExpiry,
}

/// One entry of the move history.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct HistoryEntry {
    /// The move as applied.
    pub applied: Applied,
    /// Who chose it.
    pub source: MoveSource,
}

type ExpiryHook = Box<dyn FnMut(&Snapshot) + Send>;

/// A live game session.
///
/// Every accepted move restarts the clock, and the clock stops for good
/// once the game is won. Intents are applied one at a time; the host is
/// responsible for serialising them.
pub struct GameSession {
    engine: RulesEngine,
    clock: MoveClock,
    controllers: PerPlayer<Controller>,
    planner: Planner,
    history: Vec<HistoryEntry>,
    on_expire: Option<ExpiryHook>,
}

impl GameSession {
    /// Starts a new session and its clock.
    #[instrument(skip(config, planner), fields(name = %config.name))]
    pub fn new(
        config: GameConfig,
        controllers: PerPlayer<Controller>,
        planner: Planner,
    ) -> Result<Self, ConfigError> {
        let clock = MoveClock::new(config.clock_ticks);
        let engine = RulesEngine::new(config)?;
        let mut session = Self {
            engine,
            clock,
            controllers,
            planner,
            history: Vec::new(),
            on_expire: None,
        };
        session.clock.start();
        info!(x = %controllers.x, o = %controllers.o, "Session started");
        Ok(session)
    }

    /// Starts a session for the given mode.
    pub fn with_mode(config: GameConfig, mode: GameMode, planner: Planner) -> Result<Self, ConfigError> {
        Self::new(config, mode.controllers(), planner)
    }

    /// Read-only copy of the current game state.
    pub fn snapshot(&self) -> Snapshot {
        self.engine.snapshot()
    }

    /// The underlying rules engine.
    pub fn engine(&self) -> &RulesEngine {
        &self.engine
    }

    /// The move clock.
    pub fn clock(&self) -> &MoveClock {
        &self.clock
    }

    /// Registers a host callback fired once whenever the clock expires.
    ///
    /// It runs after the fallback move has been applied and receives the
    /// resulting state, so a host can redraw from it.
    pub fn on_clock_expire(&mut self, callback: impl FnMut(&Snapshot) + Send + 'static) {
        self.on_expire = Some(Box::new(callback));
    }

    /// Applied moves, oldest first.
    pub fn history(&self) -> &[HistoryEntry] {
        &self.history
    }

    /// The most recent applied move.
    pub fn last_move(&self) -> Option<&HistoryEntry> {
        self.history.last()
    }

    /// Controller of `player`.
    pub fn controller(&self, player: Player) -> Controller {
        *self.controllers.get(player)
    }

    /// True when the game is running and the side to move is the planner.
    pub fn is_ai_turn(&self) -> bool {
        let turn = self.engine.turn();
        !turn.is_game_over() && self.controller(turn.current_player()) == Controller::Ai
    }

    /// Places the mover's piece at `(row, col)`.
    pub fn place(&mut self, row: usize, col: usize) -> Result<Applied, MoveError> {
        self.submit(
            Move::Place {
                at: Coord::new(row, col),
            },
            MoveSource::Player,
        )
    }

    /// Moves the mover's piece between two cells.
    pub fn relocate(
        &mut self,
        from_row: usize,
        from_col: usize,
        to_row: usize,
        to_col: usize,
    ) -> Result<Applied, MoveError> {
        self.submit(
            Move::Relocate {
                from: Coord::new(from_row, from_col),
                to: Coord::new(to_row, to_col),
            },
            MoveSource::Player,
        )
    }

    /// Moves the window one step.
    pub fn shift_window(&mut self, direction: Direction) -> Result<Applied, MoveError> {
        self.submit(Move::ShiftWindow { direction }, MoveSource::Player)
    }

    /// Applies any move on behalf of the side to move.
    pub fn apply(&mut self, mv: Move) -> Result<Applied, MoveError> {
        self.submit(mv, MoveSource::Player)
    }

    /// Marks the mover's piece at `(row, col)` for relocation.
    pub fn select_piece(&mut self, row: usize, col: usize) -> Result<(), MoveError> {
        self.engine.select(Coord::new(row, col))
    }

    /// Relocates the selected piece to `(row, col)`.
    pub fn relocate_selected(&mut self, row: usize, col: usize) -> Result<Applied, MoveError> {
        let from = self.engine.turn().selected().ok_or(MoveError::NoSelection)?;
        self.relocate(from.row, from.col, row, col)
    }

    /// Forgets the selected piece.
    pub fn clear_selection(&mut self) {
        self.engine.clear_selection();
    }

    /// Asks the planner for a move without applying it.
    pub fn plan_move(&mut self) -> Option<ProposedMove> {
        let snapshot = self.engine.snapshot();
        self.planner.plan(&snapshot)
    }

    /// Plays the planner's move for the side to move.
    #[instrument(skip(self))]
    pub fn play_ai_turn(&mut self) -> Result<Applied, MoveError> {
        if self.engine.turn().is_game_over() {
            return Err(MoveError::GameOver);
        }
        let proposal = self.plan_move().ok_or(MoveError::NoLegalMove)?;
        debug!(%proposal, "Planner proposal");
        self.submit(proposal.mv, MoveSource::Planner)
    }

    /// Advances the move clock by one tick.
    ///
    /// On expiry the side to move forfeits its choice: a human side gets a
    /// random legal move, an AI side gets the planner's move.
    #[instrument(skip(self))]
    pub fn clock_tick(&mut self) -> ClockEvent {
        let event = self.clock.tick();
        if event == ClockEvent::Expired {
            self.play_fallback();
            if let Some(callback) = self.on_expire.as_mut() {
                callback(&self.engine.snapshot());
            }
        }
        event
    }

    fn play_fallback(&mut self) {
        let snapshot = self.engine.snapshot();
        let player = snapshot.current_player();
        let proposal = match self.controller(player) {
            Controller::Human => self.planner.fallback(&snapshot),
            Controller::Ai => self.planner.plan(&snapshot),
        };
        let Some(proposal) = proposal else {
            warn!(%player, "Clock expired with no legal move");
            return;
        };
        info!(%player, %proposal, "Clock expired, playing fallback move");
        if let Err(error) = self.submit(proposal.mv, MoveSource::ClockExpiry) {
            warn!(%error, "Fallback move rejected");
            self.restart_clock();
        }
    }

    /// Starts over, optionally with a new configuration.
    ///
    /// Discards history and selection and restarts the clock. On a
    /// configuration error the current game is left untouched.
    #[instrument(skip(self, config))]
    pub fn reset(&mut self, config: Option<GameConfig>) -> Result<(), ConfigError> {
        let config = config.unwrap_or_else(|| self.engine.config().clone());
        let ticks = config.clock_ticks;
        self.engine = RulesEngine::new(config)?;
        self.clock.set_duration(ticks);
        self.history.clear();
        self.clock.start();
        info!("Session reset");
        Ok(())
    }

    fn submit(&mut self, mv: Move, source: MoveSource) -> Result<Applied, MoveError> {
        let applied = self.engine.apply(mv)?;
        self.history.push(HistoryEntry { applied, source });
        self.restart_clock();
        Ok(applied)
    }

    fn restart_clock(&mut self) {
        self.clock.stop();
        if !self.engine.turn().is_game_over() {
            self.clock.start();
        }
    }
}

impl std::fmt::Debug for GameSession {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GameSession")
            .field("engine", &self.engine)
            .field("clock", &self.clock)
            .field("controllers", &self.controllers)
            .field("planner", &self.planner)
            .field("history", &self.history)
            .field("on_expire", &self.on_expire.is_some())
            .finish()
    }
}
