//! Countdown decrement background task

use std::{sync::Arc, time::Duration};
use tokio::time::{interval_at, Instant, MissedTickBehavior};
use tracing::{debug, info};

use crate::state::TimerChannel;

/// Decrement the published timer once per `tick` until it reaches zero.
///
/// The first decrement happens one full tick after the task starts. The tick
/// that brings the timer to zero also clears its running flag, after which
/// the task ends. Cancellation is only observed at the tick wait.
pub async fn countdown_task(channel: Arc<TimerChannel>, tick: Duration) {
    let tick_ms = tick.as_millis() as u64;
    debug!("Countdown task started at {}ms", channel.current().remaining_ms);

    let mut interval = interval_at(Instant::now() + tick, tick);
    interval.set_missed_tick_behavior(MissedTickBehavior::Delay);

    loop {
        if channel.current().is_expired() {
            break;
        }

        interval.tick().await;

        let next = channel.update(|state| state.ticked(tick_ms));
        debug!("Timer tick: {}ms remaining", next.remaining_ms);

        if next.is_expired() {
            info!("Session countdown finished");
            break;
        }
    }
}
