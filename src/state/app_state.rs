//! Main application state management

use std::{
    sync::Mutex,
    time::Instant,
};
use chrono::{DateTime, Utc};
use tokio::sync::watch;
use tracing::{debug, info, warn};

use super::{Direction, Phase, RunTransition, SessionController, StateError, TickOutcome};

/// Last action and phase change bookkeeping for status reporting
#[derive(Debug, Default)]
struct Activity {
    last_action: Option<String>,
    last_action_time: Option<DateTime<Utc>>,
    last_phase_change: Option<DateTime<Utc>>,
    phase_changes: u64,
}

/// Snapshot of the bookkeeping kept next to the controller
#[derive(Debug, Clone)]
pub struct ActivitySnapshot {
    pub last_action: Option<String>,
    pub last_action_time: Option<DateTime<Utc>>,
    pub last_phase_change: Option<DateTime<Utc>>,
    pub phase_changes: u64,
}

/// Shared application state owning the single session controller
#[derive(Debug)]
pub struct AppState {
    controller: Mutex<SessionController>,
    activity: Mutex<Activity>,
    /// Server metadata
    pub start_time: Instant,
    pub port: u16,
    pub host: String,
    /// Controller snapshots, published after every change
    update_tx: watch::Sender<SessionController>,
}

impl AppState {
    /// Create a new AppState around an idle controller
    pub fn new(port: u16, host: String, controller: SessionController) -> Self {
        let (update_tx, _) = watch::channel(controller.clone());

        Self {
            controller: Mutex::new(controller),
            activity: Mutex::new(Activity::default()),
            start_time: Instant::now(),
            port,
            host,
            update_tx,
        }
    }

    /// Subscribe to controller snapshots
    pub fn subscribe(&self) -> watch::Receiver<SessionController> {
        self.update_tx.subscribe()
    }

    /// Apply an operation to the controller, record it and publish the result
    fn apply<T, F>(&self, action: &str, op: F) -> Result<(T, SessionController), StateError>
    where
        F: FnOnce(&mut SessionController) -> T,
    {
        let mut controller = self.controller.lock()
            .map_err(|_| StateError::LockPoisoned("session controller"))?;

        let outcome = op(&mut controller);
        let snapshot = controller.clone();
        // Publish while still holding the lock so snapshots stay ordered
        self.update_tx.send_replace(snapshot.clone());
        drop(controller);

        match self.activity.lock() {
            Ok(mut activity) => {
                activity.last_action = Some(action.to_string());
                activity.last_action_time = Some(Utc::now());
            }
            Err(_) => warn!("Failed to record last action: activity lock poisoned"),
        }

        Ok((outcome, snapshot))
    }

    /// Step the focus duration, returning whether it changed
    pub fn adjust_focus(&self, direction: Direction) -> Result<(bool, SessionController), StateError> {
        let action = match direction {
            Direction::Increase => "increase-focus",
            Direction::Decrease => "decrease-focus",
        };
        let (changed, snapshot) = self.apply(action, |c| c.adjust_focus(direction))?;
        if changed {
            info!("Focus duration set to {} minutes", snapshot.focus_minutes);
        } else {
            debug!("Focus duration unchanged ({:?} ignored)", direction);
        }
        Ok((changed, snapshot))
    }

    /// Step the break duration, returning whether it changed
    pub fn adjust_break(&self, direction: Direction) -> Result<(bool, SessionController), StateError> {
        let action = match direction {
            Direction::Increase => "increase-break",
            Direction::Decrease => "decrease-break",
        };
        let (changed, snapshot) = self.apply(action, |c| c.adjust_break(direction))?;
        if changed {
            info!("Break duration set to {} minutes", snapshot.break_minutes);
        } else {
            debug!("Break duration unchanged ({:?} ignored)", direction);
        }
        Ok((changed, snapshot))
    }

    /// Play or pause the timer
    pub fn toggle_run(&self) -> Result<(RunTransition, SessionController), StateError> {
        let (transition, snapshot) = self.apply("play-pause", SessionController::toggle_run)?;
        info!("Timer {:?}", transition);
        Ok((transition, snapshot))
    }

    /// Stop the timer and discard the session
    pub fn stop(&self) -> Result<SessionController, StateError> {
        let ((), snapshot) = self.apply("stop", SessionController::stop)?;
        info!("Timer stopped");
        Ok(snapshot)
    }

    /// Advance the countdown by one second (scheduler only).
    ///
    /// Returns `None` without touching the controller when the timer is not
    /// running, so a tick racing a pause or stop is dropped.
    pub fn tick(&self) -> Result<Option<TickOutcome>, StateError> {
        let mut controller = self.controller.lock()
            .map_err(|_| StateError::LockPoisoned("session controller"))?;

        if !controller.running {
            return Ok(None);
        }
        let outcome = controller.tick();
        self.update_tx.send_replace(controller.clone());
        drop(controller);

        if let TickOutcome::PhaseChanged { from, to } = outcome {
            self.record_phase_change(from, to);
        }
        Ok(Some(outcome))
    }

    fn record_phase_change(&self, from: Phase, to: Phase) {
        info!("Phase changed: {} -> {}", from.label(), to.label());
        match self.activity.lock() {
            Ok(mut activity) => {
                activity.last_phase_change = Some(Utc::now());
                activity.phase_changes += 1;
            }
            Err(_) => warn!("Failed to record phase change: activity lock poisoned"),
        }
    }

    /// Get a copy of the current controller state
    pub fn get_controller(&self) -> Result<SessionController, StateError> {
        self.controller.lock()
            .map(|controller| controller.clone())
            .map_err(|_| StateError::LockPoisoned("session controller"))
    }

    /// Get last action and phase change information
    pub fn get_activity(&self) -> Result<ActivitySnapshot, StateError> {
        let activity = self.activity.lock()
            .map_err(|_| StateError::LockPoisoned("activity"))?;
        Ok(ActivitySnapshot {
            last_action: activity.last_action.clone(),
            last_action_time: activity.last_action_time,
            last_phase_change: activity.last_phase_change,
            phase_changes: activity.phase_changes,
        })
    }

    /// Calculate server uptime as a formatted string
    pub fn get_uptime(&self) -> String {
        let duration = self.start_time.elapsed();
        let hours = duration.as_secs() / 3600;
        let minutes = (duration.as_secs() % 3600) / 60;
        let seconds = duration.as_secs() % 60;

        if hours > 0 {
            format!("{}h {}m {}s", hours, minutes, seconds)
        } else if minutes > 0 {
            format!("{}m {}s", minutes, seconds)
        } else {
            format!("{}s", seconds)
        }
    }
}
