//! Per-move countdown driven by external ticks.
//!
//! The clock owns no real time. A host calls [`MoveClock::tick`] from its
//! own timer; the clock only counts.

use serde::{Deserialize, Serialize};
use tracing::{debug, info, instrument};

/// Result of a single tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "event", rename_all = "kebab-case")]
pub enum ClockEvent {
    /// The clock is stopped (or already expired); nothing happened.
    Idle,
    /// Still counting down.
    Ticking {
        /// Ticks left before expiry.
        remaining: u32,
    },
    /// Reached zero on this tick. Reported once per `start`.
    Expired,
}

type ExpiryCallback = Box<dyn FnMut() + Send>;

/// Countdown for the player to move.
pub struct MoveClock {
    duration: u32,
    remaining: u32,
    running: bool,
    on_expire: Option<ExpiryCallback>,
}

impl MoveClock {
    /// Creates a stopped clock that counts `duration` ticks once started.
    pub fn new(duration: u32) -> Self {
        Self {
            duration,
            remaining: duration,
            running: false,
            on_expire: None,
        }
    }

    /// Registers a callback invoked exactly once per expiry.
    pub fn on_expire(&mut self, callback: impl FnMut() + Send + 'static) {
        self.on_expire = Some(Box::new(callback));
    }

    /// Resets the countdown to its full duration and starts it.
    #[instrument(skip(self), fields(duration = self.duration))]
    pub fn start(&mut self) {
        self.remaining = self.duration;
        self.running = true;
        debug!("Clock started");
    }

    /// Halts the countdown without firing expiry.
    pub fn stop(&mut self) {
        if self.running {
            debug!(remaining = self.remaining, "Clock stopped");
        }
        self.running = false;
    }

    /// Advances the countdown by one tick.
    pub fn tick(&mut self) -> ClockEvent {
        if !self.running {
            return ClockEvent::Idle;
        }
        self.remaining = self.remaining.saturating_sub(1);
        if self.remaining > 0 {
            return ClockEvent::Ticking {
                remaining: self.remaining,
            };
        }

        self.running = false;
        info!("Move clock expired");
        if let Some(callback) = self.on_expire.as_mut() {
            callback();
        }
        ClockEvent::Expired
    }

    /// Stops the clock and changes the length of later countdowns.
    pub fn set_duration(&mut self, duration: u32) {
        self.stop();
        self.duration = duration;
        self.remaining = duration;
    }

    /// Ticks left in the current countdown.
    pub fn remaining(&self) -> u32 {
        self.remaining
    }

    /// Configured length of a countdown.
    pub fn duration(&self) -> u32 {
        self.duration
    }

    /// Whether the clock is counting down.
    pub fn is_running(&self) -> bool {
        self.running
    }
}

impl std::fmt::Debug for MoveClock {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MoveClock")
            .field("duration", &self.duration)
            .field("remaining", &self.remaining)
            .field("running", &self.running)
            .field("on_expire", &self.on_expire.is_some())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use std::sync::atomic::{AtomicU32, Ordering};

    #[test]
    fn test_stopped_clock_is_idle() {
        let mut clock = MoveClock::new(3);
        assert_eq!(clock.tick(), ClockEvent::Idle);
        assert_eq!(clock.remaining(), 3);
    }

    #[test]
    fn test_counts_down_to_expiry() {
        let mut clock = MoveClock::new(3);
        clock.start();
        assert_eq!(clock.tick(), ClockEvent::Ticking { remaining: 2 });
        assert_eq!(clock.tick(), ClockEvent::Ticking { remaining: 1 });
        assert_eq!(clock.tick(), ClockEvent::Expired);
        assert!(!clock.is_running());
        assert_eq!(clock.tick(), ClockEvent::Idle);
    }

    #[test]
    fn test_callback_fires_once() {
        let fired = Arc::new(AtomicU32::new(0));
        let counter = Arc::clone(&fired);
        let mut clock = MoveClock::new(2);
        clock.on_expire(move || {
            counter.fetch_add(1, Ordering::SeqCst);
        });
        clock.start();
        for _ in 0..10 {
            clock.tick();
        }
        assert_eq!(fired.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_stop_prevents_expiry_and_start_resets() {
        let mut clock = MoveClock::new(2);
        clock.start();
        clock.tick();
        clock.stop();
        assert_eq!(clock.tick(), ClockEvent::Idle);
        clock.start();
        assert_eq!(clock.remaining(), 2);
        assert_eq!(clock.tick(), ClockEvent::Ticking { remaining: 1 });
    }
}
