//! Timer state snapshot and its transitions

use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Fixed countdown step
pub const TICK: Duration = Duration::from_millis(1000);

/// Default session length (25 minutes)
pub const DEFAULT_SESSION: Duration = Duration::from_millis(1_500_000);

/// Immutable snapshot of the countdown.
///
/// A new value replaces the old one on every transition, so observers always
/// see `remaining_ms` together with its matching `running` flag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimerState {
    pub remaining_ms: u64,
    pub running: bool,
}

/// Coarse phase of the countdown derived from a snapshot
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TimerPhase {
    Idle,
    Running,
    Expired,
}

impl TimerState {
    /// Create a fresh, not-running state holding the full session
    pub fn fresh(session_ms: u64) -> Self {
        Self {
            remaining_ms: session_ms,
            running: false,
        }
    }

    /// Copy of this state with a different running flag.
    ///
    /// An expired state can never be marked running.
    pub fn with_running(self, running: bool) -> Self {
        Self {
            remaining_ms: self.remaining_ms,
            running: running && self.remaining_ms > 0,
        }
    }

    /// State after one tick of `tick_ms`. Reaching zero stops the timer.
    pub fn ticked(self, tick_ms: u64) -> Self {
        let remaining_ms = self.remaining_ms.saturating_sub(tick_ms);
        Self {
            remaining_ms,
            running: remaining_ms > 0,
        }
    }

    /// Check if the countdown has reached zero
    pub fn is_expired(&self) -> bool {
        self.remaining_ms == 0
    }

    pub fn phase(&self) -> TimerPhase {
        if self.is_expired() {
            TimerPhase::Expired
        } else if self.running {
            TimerPhase::Running
        } else {
            TimerPhase::Idle
        }
    }

    pub fn remaining(&self) -> Duration {
        Duration::from_millis(self.remaining_ms)
    }
}

impl Default for TimerState {
    fn default() -> Self {
        Self::fresh(DEFAULT_SESSION.as_millis() as u64)
    }
}
