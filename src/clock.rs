//! Session wall clock.
//!
//! Wall time is read once at session start; later readings add the elapsed
//! `tokio::time::Instant`. Sample timestamps therefore never go backwards,
//! and follow virtual time under a paused test runtime.

use chrono::{DateTime, TimeDelta, Utc};
use tokio::time::Instant;

#[derive(Debug, Clone, Copy)]
pub struct SessionClock {
    wall: DateTime<Utc>,
    mono: Instant,
}

impl SessionClock {
    /// Anchor at the current wall time.
    pub fn start() -> Self {
        Self::starting_at(Utc::now())
    }

    /// Anchor at `wall`. Must be called inside a tokio runtime when time is paused.
    pub fn starting_at(wall: DateTime<Utc>) -> Self {
        Self {
            wall,
            mono: Instant::now(),
        }
    }

    pub fn now(&self) -> DateTime<Utc> {
        let elapsed = TimeDelta::from_std(self.mono.elapsed()).unwrap_or_default();
        self.wall + elapsed
    }
}
