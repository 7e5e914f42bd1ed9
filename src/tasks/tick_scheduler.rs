//! Tick scheduler background task
//!
//! The scheduler keeps a tick source armed exactly while the timer is
//! running and feeds each tick into the shared state. The source is
//! injected: [`IntervalTicks`] in production, [`ManualTicks`] in tests.

use std::{sync::Arc, time::Duration};
use async_trait::async_trait;
use tokio::{
    sync::{mpsc, watch},
    time::{interval_at, Instant, Interval, MissedTickBehavior},
};
use tracing::{debug, error, info, trace};

use crate::{
    services::PhaseAlert,
    state::{AppState, TickOutcome},
};

/// A periodic source of ticks that can be started and cancelled
#[async_trait]
pub trait TickSource: Send {
    /// Start producing ticks. The first tick arrives one period later.
    fn arm(&mut self);

    /// Stop producing ticks and discard any that are pending
    fn disarm(&mut self);

    /// Wait for the next tick. Never resolves while disarmed.
    async fn tick(&mut self);
}

/// Wall-clock tick source backed by a tokio interval
#[derive(Debug)]
pub struct IntervalTicks {
    period: Duration,
    interval: Option<Interval>,
}

impl IntervalTicks {
    pub fn new(period: Duration) -> Self {
        Self { period, interval: None }
    }

    /// One tick per second
    pub fn every_second() -> Self {
        Self::new(Duration::from_secs(1))
    }
}

#[async_trait]
impl TickSource for IntervalTicks {
    fn arm(&mut self) {
        let mut interval = interval_at(Instant::now() + self.period, self.period);
        interval.set_missed_tick_behavior(MissedTickBehavior::Delay);
        self.interval = Some(interval);
    }

    fn disarm(&mut self) {
        self.interval = None;
    }

    async fn tick(&mut self) {
        match self.interval.as_mut() {
            Some(interval) => {
                interval.tick().await;
            }
            None => std::future::pending().await,
        }
    }
}

/// Tick source driven by hand through a [`ManualTickHandle`]
#[derive(Debug)]
pub struct ManualTicks {
    rx: mpsc::UnboundedReceiver<()>,
    armed_tx: watch::Sender<bool>,
}

/// Sends ticks into a [`ManualTicks`] and observes whether it is armed
#[derive(Debug, Clone)]
pub struct ManualTickHandle {
    tx: mpsc::UnboundedSender<()>,
    armed_rx: watch::Receiver<bool>,
}

impl ManualTicks {
    pub fn new() -> (Self, ManualTickHandle) {
        let (tx, rx) = mpsc::unbounded_channel();
        let (armed_tx, armed_rx) = watch::channel(false);
        (Self { rx, armed_tx }, ManualTickHandle { tx, armed_rx })
    }

    fn drain(&mut self) {
        while self.rx.try_recv().is_ok() {}
    }
}

#[async_trait]
impl TickSource for ManualTicks {
    fn arm(&mut self) {
        self.drain();
        self.armed_tx.send_replace(true);
    }

    fn disarm(&mut self) {
        self.drain();
        self.armed_tx.send_replace(false);
    }

    async fn tick(&mut self) {
        let armed = *self.armed_tx.borrow();
        if !armed {
            return std::future::pending().await;
        }
        if self.rx.recv().await.is_none() {
            std::future::pending::<()>().await;
        }
    }
}

impl ManualTickHandle {
    /// Queue one tick; returns `false` if the source is gone
    pub fn tick(&self) -> bool {
        self.tx.send(()).is_ok()
    }

    pub fn is_armed(&self) -> bool {
        *self.armed_rx.borrow()
    }

    /// Wait until the source is armed (or disarmed)
    pub async fn wait_armed(&mut self, armed: bool) {
        // An error means the source was dropped; nothing left to wait for
        let _ = self.armed_rx.wait_for(|state| *state == armed).await;
    }
}

/// Background task that ticks the session once per period while running
pub async fn tick_scheduler_task<S, A>(state: Arc<AppState>, mut ticks: S, alert: A)
where
    S: TickSource,
    A: PhaseAlert,
{
    info!("Starting tick scheduler task");

    let mut updates = state.subscribe();
    let mut armed = false;

    loop {
        let running = updates.borrow_and_update().running;
        if running != armed {
            if running {
                debug!("Timer running, arming tick source");
                ticks.arm();
            } else {
                debug!("Timer not running, disarming tick source");
                ticks.disarm();
            }
            armed = running;
        }

        tokio::select! {
            biased;

            changed = updates.changed() => {
                if changed.is_err() {
                    info!("State channel closed, stopping tick scheduler");
                    break;
                }
            }

            _ = ticks.tick(), if armed => {
                match state.tick() {
                    Ok(Some(TickOutcome::PhaseChanged { from, to })) => alert.phase_ended(from, to),
                    Ok(Some(outcome)) => trace!("Tick: {:?}", outcome),
                    Ok(None) => debug!("Tick dropped, timer no longer running"),
                    Err(e) => error!("Failed to apply tick: {}", e),
                }
            }
        }
    }

    ticks.disarm();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test(start_paused = true)]
    async fn interval_ticks_wait_one_period_after_arming() {
        let mut ticks = IntervalTicks::every_second();
        ticks.arm();

        let start = Instant::now();
        ticks.tick().await;
        assert_eq!(start.elapsed(), Duration::from_secs(1));
        ticks.tick().await;
        assert_eq!(start.elapsed(), Duration::from_secs(2));
    }

    #[tokio::test(start_paused = true)]
    async fn disarmed_interval_never_ticks() {
        let mut ticks = IntervalTicks::every_second();
        ticks.arm();
        ticks.disarm();

        let waited = tokio::time::timeout(Duration::from_secs(5), ticks.tick()).await;
        assert!(waited.is_err());
    }

    #[tokio::test]
    async fn manual_ticks_discard_pending_on_rearm() {
        let (mut ticks, handle) = ManualTicks::new();
        assert!(!handle.is_armed());

        handle.tick();
        ticks.arm();
        assert!(handle.is_armed());
        let stale = tokio::time::timeout(Duration::from_millis(20), ticks.tick()).await;
        assert!(stale.is_err());

        handle.tick();
        ticks.tick().await;
    }
}
