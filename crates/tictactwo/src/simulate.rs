//! Batch AI-vs-AI play.

use serde::Serialize;
use tictactwo_engine::{ConfigError, GameConfig, GameMode, GameSession, MoveError, Planner, Player};
use tracing::{debug, info, instrument};

/// Totals over a batch of simulated games.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct SimulationReport {
    /// Games played.
    pub games: u32,
    /// Games won by X.
    pub x_wins: u32,
    /// Games won by O.
    pub o_wins: u32,
    /// Games abandoned at the move limit or with no legal move.
    pub unfinished: u32,
    /// Mean number of moves applied per game.
    pub average_moves: f64,
}

impl SimulationReport {
    /// Human-readable summary lines.
    pub fn to_text(&self) -> String {
        format!(
            "games: {}\nX wins: {}\nO wins: {}\nunfinished: {}\naverage moves: {:.1}",
            self.games, self.x_wins, self.o_wins, self.unfinished, self.average_moves
        )
    }
}

/// Plays `games` planner-vs-planner games; game `i` is seeded with `seed + i`.
#[instrument(skip(config), fields(name = %config.name))]
pub fn simulate(
    config: &GameConfig,
    games: u32,
    seed: u64,
    max_moves: u32,
) -> Result<SimulationReport, ConfigError> {
    let mut report = SimulationReport {
        games,
        ..SimulationReport::default()
    };
    let mut total_moves: u64 = 0;

    for game in 0..games {
        let planner = Planner::seeded(seed.wrapping_add(u64::from(game)));
        let mut session = GameSession::with_mode(config.clone(), GameMode::AiVsAi, planner)?;

        for _ in 0..max_moves {
            match session.play_ai_turn() {
                Ok(_) => {}
                Err(MoveError::GameOver) | Err(MoveError::NoLegalMove) => break,
                Err(e) => {
                    debug!(game, error = %e, "Planner move rejected");
                    break;
                }
            }
        }

        total_moves += session.history().len() as u64;
        match session.snapshot().turn().winner() {
            Some(Player::X) => report.x_wins += 1,
            Some(Player::O) => report.o_wins += 1,
            None => report.unfinished += 1,
        }
    }

    if games > 0 {
        report.average_moves = total_moves as f64 / f64::from(games);
    }
    info!(
        x_wins = report.x_wins,
        o_wins = report.o_wins,
        unfinished = report.unfinished,
        "Simulation complete"
    );
    Ok(report)
}
