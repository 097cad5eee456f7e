//! Countdown timer engine: control surface over the decrement task

use std::{sync::Arc, time::Duration};

use futures::stream::{self, Stream};
use tokio::{
    sync::{broadcast::error::RecvError, Mutex},
    task::JoinHandle,
};
use tracing::{debug, error, info, warn};

use super::{timer_state::TICK, TimerChannel, TimerState};
use crate::tasks::countdown_task;

/// Owns the timer snapshot and at most one live decrement task.
///
/// Every control operation holds the task slot for its whole duration, so
/// controls are serialized against each other. Operations that stop the
/// countdown abort the task and wait for it to finish before publishing,
/// which keeps a late tick from overwriting their state.
#[derive(Debug)]
pub struct TimerEngine {
    session_ms: u64,
    tick: Duration,
    channel: Arc<TimerChannel>,
    task: Mutex<Option<JoinHandle<()>>>,
}

impl TimerEngine {
    /// Create an idle engine holding a full session of `session_length`
    pub fn new(session_length: Duration) -> Self {
        let session_ms = u64::try_from(session_length.as_millis()).unwrap_or(u64::MAX);
        Self {
            session_ms,
            tick: TICK,
            channel: Arc::new(TimerChannel::new(TimerState::fresh(session_ms))),
            task: Mutex::new(None),
        }
    }

    pub fn session_length(&self) -> Duration {
        Duration::from_millis(self.session_ms)
    }

    /// Latest published snapshot
    pub fn current_state(&self) -> TimerState {
        self.channel.current()
    }

    /// Stream yielding the current snapshot first, then every later change.
    ///
    /// Each call creates an independent subscription. The stream ends when
    /// the engine is dropped. An observer that falls more than 128 snapshots
    /// behind skips the oldest ones and continues from the earliest retained.
    pub fn observe(&self) -> impl Stream<Item = TimerState> + Send + 'static {
        let (current, rx) = self.channel.subscribe();

        stream::unfold((Some(current), rx), |(pending, mut rx)| async move {
            if let Some(state) = pending {
                return Some((state, (None, rx)));
            }
            loop {
                match rx.recv().await {
                    Ok(state) => return Some((state, (None, rx))),
                    Err(RecvError::Lagged(skipped)) => {
                        warn!("Timer observer lagged, skipped {} snapshots", skipped);
                    }
                    Err(RecvError::Closed) => return None,
                }
            }
        })
    }

    /// Start counting down. No-op if already running or expired.
    pub async fn start(&self) {
        let mut slot = self.task.lock().await;
        self.start_locked(&mut slot);
    }

    /// Resume a paused countdown
    pub async fn resume(&self) {
        self.start().await;
    }

    /// Pause the countdown, keeping the remaining time. No-op if not running.
    pub async fn pause(&self) {
        let mut slot = self.task.lock().await;
        self.pause_locked(&mut slot).await;
    }

    /// Pause when running, otherwise start.
    ///
    /// Drives a single start/stop button.
    pub async fn toggle(&self) {
        let mut slot = self.task.lock().await;
        if is_live(&slot) {
            self.pause_locked(&mut slot).await;
        } else {
            self.start_locked(&mut slot);
        }
    }

    /// Cancel any countdown and return to a full, idle session
    pub async fn reset(&self) {
        let mut slot = self.task.lock().await;
        if let Some(handle) = slot.take() {
            reap(handle).await;
        }
        self.channel.publish(TimerState::fresh(self.session_ms));
        info!("Timer reset to {}ms", self.session_ms);
    }

    fn start_locked(&self, slot: &mut Option<JoinHandle<()>>) {
        if is_live(slot) {
            debug!("Start ignored, countdown already running");
            return;
        }

        let current = self.channel.current();
        if current.is_expired() {
            debug!("Start ignored, timer expired; reset first");
            return;
        }

        let started = self.channel.update(|state| state.with_running(true));
        debug_assert!(started.running);
        debug_assert!(started.remaining_ms <= self.session_ms);

        *slot = Some(tokio::spawn(countdown_task(
            Arc::clone(&self.channel),
            self.tick,
        )));
        info!("Timer started with {}ms remaining", started.remaining_ms);
    }

    async fn pause_locked(&self, slot: &mut Option<JoinHandle<()>>) {
        if let Some(handle) = slot.take() {
            reap(handle).await;
        }

        if !self.channel.current().running {
            debug!("Pause ignored, timer not running");
            return;
        }

        let paused = self.channel.update(|state| state.with_running(false));
        info!("Timer paused with {}ms remaining", paused.remaining_ms);
    }
}

impl Default for TimerEngine {
    fn default() -> Self {
        Self::new(super::timer_state::DEFAULT_SESSION)
    }
}

impl Drop for TimerEngine {
    fn drop(&mut self) {
        if let Some(handle) = self.task.get_mut().take() {
            handle.abort();
        }
    }
}

fn is_live(slot: &Option<JoinHandle<()>>) -> bool {
    slot.as_ref().is_some_and(|handle| !handle.is_finished())
}

/// Abort the decrement task and wait until it can no longer publish
async fn reap(handle: JoinHandle<()>) {
    handle.abort();
    match handle.await {
        Ok(()) => {}
        Err(e) if e.is_cancelled() => debug!("Countdown task cancelled"),
        Err(e) => error!("Countdown task failed: {}", e),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use futures::StreamExt;
    use tokio::time::{sleep, timeout};

    const SECOND: Duration = Duration::from_millis(1000);

    fn engine(session_ms: u64) -> TimerEngine {
        TimerEngine::new(Duration::from_millis(session_ms))
    }

    fn state(remaining_ms: u64, running: bool) -> TimerState {
        TimerState { remaining_ms, running }
    }

    #[tokio::test(start_paused = true)]
    async fn observes_every_tick_until_expiry() {
        let engine = engine(3000);
        let mut states = Box::pin(engine.observe());

        assert_eq!(states.next().await, Some(state(3000, false)));
        engine.start().await;

        let mut seen = Vec::new();
        for _ in 0..4 {
            seen.push(states.next().await.expect("snapshot"));
        }
        assert_eq!(
            seen,
            vec![
                state(3000, true),
                state(2000, true),
                state(1000, true),
                state(0, false),
            ]
        );

        // No autonomous decrement after expiry
        assert!(timeout(SECOND * 5, states.next()).await.is_err());
        assert_eq!(engine.current_state(), state(0, false));
    }

    #[tokio::test(start_paused = true)]
    async fn double_start_spawns_one_countdown() {
        let engine = engine(10_000);
        engine.start().await;
        engine.start().await;

        sleep(SECOND * 3 + Duration::from_millis(500)).await;
        assert_eq!(engine.current_state(), state(7000, true));
    }

    #[tokio::test(start_paused = true)]
    async fn concurrent_starts_spawn_one_countdown() {
        let engine = Arc::new(engine(10_000));
        let handles: Vec<_> = (0..8)
            .map(|_| {
                let engine = Arc::clone(&engine);
                tokio::spawn(async move { engine.start().await })
            })
            .collect();
        for handle in handles {
            handle.await.expect("start task");
        }

        sleep(SECOND * 2 + Duration::from_millis(500)).await;
        assert_eq!(engine.current_state(), state(8000, true));
    }

    #[tokio::test(start_paused = true)]
    async fn pause_preserves_remaining() {
        let engine = engine(10_000);
        engine.start().await;
        sleep(SECOND * 2 + Duration::from_millis(500)).await;

        engine.pause().await;
        assert_eq!(engine.current_state(), state(8000, false));

        sleep(SECOND * 5).await;
        assert_eq!(engine.current_state(), state(8000, false));
    }

    #[tokio::test(start_paused = true)]
    async fn resume_continues_from_paused_time() {
        let engine = engine(10_000);
        engine.start().await;
        sleep(SECOND + Duration::from_millis(500)).await;
        engine.pause().await;

        engine.resume().await;
        assert_eq!(engine.current_state(), state(9000, true));
        sleep(SECOND + Duration::from_millis(100)).await;
        assert_eq!(engine.current_state(), state(8000, true));
    }

    #[tokio::test(start_paused = true)]
    async fn pause_when_idle_publishes_nothing() {
        let engine = engine(5000);
        let mut states = Box::pin(engine.observe());
        assert_eq!(states.next().await, Some(state(5000, false)));

        engine.pause().await;
        assert!(timeout(SECOND, states.next()).await.is_err());
    }

    #[tokio::test(start_paused = true)]
    async fn toggle_alternates_between_running_and_paused() {
        let engine = engine(10_000);

        engine.toggle().await;
        assert!(engine.current_state().running);

        sleep(SECOND + Duration::from_millis(500)).await;
        engine.toggle().await;
        assert_eq!(engine.current_state(), state(9000, false));

        engine.toggle().await;
        assert_eq!(engine.current_state(), state(9000, true));
    }

    #[tokio::test(start_paused = true)]
    async fn reset_mid_countdown_discards_pending_ticks() {
        let engine = engine(3000);
        let mut states = Box::pin(engine.observe());
        engine.start().await;
        sleep(SECOND + Duration::from_millis(200)).await;

        engine.reset().await;
        assert_eq!(engine.current_state(), state(3000, false));

        let mut seen = Vec::new();
        while let Ok(Some(s)) = timeout(SECOND * 5, states.next()).await {
            seen.push(s);
        }
        assert_eq!(
            seen,
            vec![
                state(3000, false),
                state(3000, true),
                state(2000, true),
                state(3000, false),
            ]
        );
    }

    #[tokio::test(start_paused = true)]
    async fn reset_returns_to_fresh_state_from_every_phase() {
        let engine = engine(2000);

        engine.reset().await;
        assert_eq!(engine.current_state(), state(2000, false));

        engine.start().await;
        sleep(SECOND + Duration::from_millis(500)).await;
        engine.reset().await;
        assert_eq!(engine.current_state(), state(2000, false));

        engine.start().await;
        sleep(SECOND * 3).await;
        assert!(engine.current_state().is_expired());
        engine.reset().await;
        assert_eq!(engine.current_state(), state(2000, false));
    }

    #[tokio::test(start_paused = true)]
    async fn start_after_expiry_requires_reset() {
        let engine = engine(1000);
        engine.start().await;
        sleep(SECOND * 2).await;
        assert_eq!(engine.current_state(), state(0, false));

        engine.start().await;
        assert_eq!(engine.current_state(), state(0, false));

        engine.reset().await;
        engine.start().await;
        assert_eq!(engine.current_state(), state(1000, true));
    }

    #[tokio::test(start_paused = true)]
    async fn observers_are_independent() {
        let engine = engine(2000);
        let first = engine.observe();
        engine.start().await;
        let mut second = Box::pin(engine.observe());

        assert_eq!(second.next().await, Some(state(2000, true)));
        drop(first);
        assert_eq!(second.next().await, Some(state(1000, true)));
    }

    #[tokio::test]
    async fn oversized_session_saturates_instead_of_truncating() {
        let engine = TimerEngine::new(Duration::MAX);
        assert_eq!(engine.current_state(), state(u64::MAX, false));

        let one_day = Duration::from_secs(24 * 60 * 60);
        assert_eq!(TimerEngine::new(one_day).session_length(), one_day);
    }

    #[tokio::test]
    async fn default_engine_uses_a_25_minute_session() {
        let engine = TimerEngine::default();
        assert_eq!(engine.session_length(), Duration::from_secs(25 * 60));
        assert_eq!(engine.current_state(), state(1_500_000, false));
    }
}
