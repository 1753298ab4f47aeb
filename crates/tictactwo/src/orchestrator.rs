//! Game orchestration between players, the clock and the terminal.

use crate::players::{Intent, Player};
use crate::ui;
use anyhow::Result;
use tictactwo_engine::{ClockEvent, GameSession, PerPlayer, Player as Mark};
use tokio::time::{Duration, MissedTickBehavior, interval};
use tracing::{debug, info, instrument};

/// How a played game ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Finish {
    /// A player completed a line.
    Won(Mark),
    /// Someone quit.
    Quit,
}

/// Orchestrates gameplay between two players.
///
/// One intent is handled at a time. While a player is deciding, the clock
/// keeps ticking; an expiry plays a fallback move and the player is asked
/// again for the next turn.
pub struct Orchestrator {
    session: GameSession,
    players: PerPlayer<Box<dyn Player>>,
    tick: Duration,
}

impl Orchestrator {
    /// Creates a new orchestrator.
    pub fn new(
        session: GameSession,
        player_x: Box<dyn Player>,
        player_o: Box<dyn Player>,
        tick: Duration,
    ) -> Self {
        Self {
            session,
            players: PerPlayer {
                x: player_x,
                o: player_o,
            },
            tick,
        }
    }

    /// Runs the game loop until someone wins or quits.
    #[instrument(skip(self), fields(tick_ms = self.tick.as_millis() as u64))]
    pub async fn run(&mut self) -> Result<Finish> {
        info!(
            x = self.players.x.name(),
            o = self.players.o.name(),
            "Starting game orchestration"
        );
        let Self {
            session,
            players,
            tick,
        } = self;

        let mut ticker = interval(*tick);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
        // The first tick completes immediately.
        ticker.tick().await;
        redraw(session);

        loop {
            let snapshot = session.snapshot();
            if let Some(winner) = snapshot.turn().winner() {
                info!(%winner, "Game over");
                return Ok(Finish::Won(winner));
            }

            let mover = snapshot.current_player();
            let player = players.get_mut(mover);

            tokio::select! {
                intent = player.next_intent(&snapshot) => {
                    if !handle(session, intent?)? {
                        return Ok(Finish::Quit);
                    }
                    redraw(session);
                }
                _ = ticker.tick() => {
                    match session.clock_tick() {
                        ClockEvent::Expired => {
                            println!("Time is up for {}!", mover);
                            redraw(session);
                        }
                        event => debug!(?event, "Clock tick"),
                    }
                }
            }
        }
    }

    /// The session being played.
    pub fn session(&self) -> &GameSession {
        &self.session
    }
}

/// Applies one intent. Returns false when the player quits.
fn handle(session: &mut GameSession, intent: Intent) -> Result<bool> {
    let result = match intent {
        Intent::Play(mv) => session.apply(mv).map(|_| ()),
        Intent::Select(at) => session.select_piece(at.row, at.col),
        Intent::RelocateSelected(at) => session.relocate_selected(at.row, at.col).map(|_| ()),
        Intent::ClearSelection => {
            session.clear_selection();
            Ok(())
        }
        Intent::Plan => session.play_ai_turn().map(|_| ()),
        Intent::Restart => {
            session.reset(None)?;
            println!("New game.");
            Ok(())
        }
        Intent::Help => {
            println!("{}", ui::HELP);
            Ok(())
        }
        Intent::Quit => return Ok(false),
    };
    // Rejections are shown to the player as-is.
    if let Err(e) = result {
        println!("{}", e);
    }
    Ok(true)
}

fn redraw(session: &GameSession) {
    println!();
    println!(
        "{}",
        ui::render(
            &session.snapshot(),
            session.clock().remaining(),
            session.last_move()
        )
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::players::AiPlayer;
    use tictactwo_engine::{GameConfig, GameMode, Planner};

    #[tokio::test(start_paused = true)]
    async fn test_ai_vs_ai_plays_until_a_win() {
        // A single piece wins, so the first planner move ends the game.
        let config = GameConfig {
            win_length: 1,
            ..GameConfig::default()
        };
        let session =
            GameSession::with_mode(config, GameMode::AiVsAi, Planner::seeded(17)).unwrap();
        let mut orchestrator = Orchestrator::new(
            session,
            Box::new(AiPlayer::new("AI X", Duration::from_millis(10))),
            Box::new(AiPlayer::new("AI O", Duration::from_millis(10))),
            Duration::from_millis(1000),
        );
        let finish = tokio::time::timeout(Duration::from_secs(60), orchestrator.run())
            .await
            .expect("game should end before the timeout")
            .unwrap();

        assert_eq!(finish, Finish::Won(Mark::X));
        let history = orchestrator.session().history();
        assert_eq!(history.len(), 1);
        assert_eq!(history[0].source, tictactwo_engine::MoveSource::Planner);
    }

    #[test]
    fn test_handle_reports_rejection_and_quit() {
        let mut session =
            GameSession::with_mode(GameConfig::default(), GameMode::HumanVsHuman, Planner::seeded(1))
                .unwrap();
        let outside = Intent::Play(tictactwo_engine::Move::Place {
            at: tictactwo_engine::Coord::new(0, 0),
        });
        assert!(handle(&mut session, outside).unwrap());
        assert!(session.history().is_empty());
        assert!(!handle(&mut session, Intent::Quit).unwrap());
    }
}
