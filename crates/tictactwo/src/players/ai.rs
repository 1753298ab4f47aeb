//! AI player: pauses to "think", then hands the turn to the planner.

use super::{Intent, Player};
use anyhow::Result;
use derive_new::new;
use tictactwo_engine::Snapshot;
use tokio::time::{Duration, Instant, sleep_until};
use tracing::debug;

/// AI player whose moves come from the session's planner.
///
/// The thinking deadline survives cancellation, so racing this player
/// against the clock does not restart its delay.
#[derive(Debug, new)]
pub struct AiPlayer {
    #[new(into)]
    name: String,
    think: Duration,
    #[new(default)]
    deadline: Option<Instant>,
}

#[async_trait::async_trait]
impl Player for AiPlayer {
    async fn next_intent(&mut self, snapshot: &Snapshot) -> Result<Intent> {
        let deadline = *self.deadline.get_or_insert_with(|| Instant::now() + self.think);
        debug!(ai = %self.name, player = %snapshot.current_player(), "AI thinking");
        sleep_until(deadline).await;
        self.deadline = None;
        Ok(Intent::Plan)
    }

    fn name(&self) -> &str {
        &self.name
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tictactwo_engine::{GameConfig, RulesEngine};

    #[tokio::test(start_paused = true)]
    async fn test_waits_then_plans() {
        let snapshot = RulesEngine::new(GameConfig::default()).unwrap().snapshot();
        let mut ai = AiPlayer::new("AI", Duration::from_millis(500));
        let started = Instant::now();
        assert_eq!(ai.next_intent(&snapshot).await.unwrap(), Intent::Plan);
        assert!(started.elapsed() >= Duration::from_millis(500));
        assert_eq!(ai.name(), "AI");
    }

    #[tokio::test(start_paused = true)]
    async fn test_deadline_survives_cancellation() {
        let snapshot = RulesEngine::new(GameConfig::default()).unwrap().snapshot();
        let mut ai = AiPlayer::new("AI", Duration::from_millis(500));
        let started = Instant::now();
        let cut_short =
            tokio::time::timeout(Duration::from_millis(300), ai.next_intent(&snapshot)).await;
        assert!(cut_short.is_err());
        ai.next_intent(&snapshot).await.unwrap();
        let elapsed = started.elapsed();
        assert!(elapsed >= Duration::from_millis(500));
        assert!(elapsed < Duration::from_millis(800));
    }
}
