use std::{
    sync::{Arc, Mutex},
    time::Duration,
};

use tokio::{task::JoinHandle, time::timeout};

use pomodoro_server::{
    services::PhaseAlert,
    state::{AppState, Phase, SessionController},
    tasks::{tick_scheduler_task, IntervalTicks, ManualTickHandle, ManualTicks},
};

#[derive(Clone, Default)]
struct RecordingAlert {
    fired: Arc<Mutex<Vec<(Phase, Phase)>>>,
}

impl PhaseAlert for RecordingAlert {
    fn phase_ended(&self, from: Phase, to: Phase) {
        self.fired.lock().unwrap().push((from, to));
    }
}

struct Harness {
    state: Arc<AppState>,
    ticks: ManualTickHandle,
    alert: RecordingAlert,
    task: JoinHandle<()>,
}

impl Harness {
    fn start(focus: u32, brk: u32) -> Self {
        let state = Arc::new(AppState::new(0, "127.0.0.1".to_string(), SessionController::with_durations(focus, brk)));
        let (source, ticks) = ManualTicks::new();
        let alert = RecordingAlert::default();
        let task = tokio::spawn(tick_scheduler_task(Arc::clone(&state), source, alert.clone()));
        Self { state, ticks, alert, task }
    }

    async fn wait_armed(&mut self, armed: bool) {
        timeout(Duration::from_secs(5), self.ticks.wait_armed(armed))
            .await
            .expect("scheduler did not follow the running flag");
    }

    /// Send one tick and wait until the scheduler has applied it
    async fn tick(&self) {
        let mut updates = self.state.subscribe();
        let _ = updates.borrow_and_update();
        assert!(self.ticks.tick());
        timeout(Duration::from_secs(5), updates.changed())
            .await
            .expect("tick was not applied")
            .unwrap();
    }

    fn remaining(&self) -> Option<u32> {
        self.state.get_controller().unwrap().seconds_remaining()
    }
}

impl Drop for Harness {
    fn drop(&mut self) {
        self.task.abort();
    }
}

#[tokio::test]
async fn scheduler_arms_only_while_running() {
    let mut h = Harness::start(25, 5);
    assert!(!h.ticks.is_armed());

    h.state.toggle_run().unwrap();
    h.wait_armed(true).await;

    h.state.toggle_run().unwrap();
    h.wait_armed(false).await;

    h.state.toggle_run().unwrap();
    h.wait_armed(true).await;

    h.state.stop().unwrap();
    h.wait_armed(false).await;
}

#[tokio::test]
async fn ticks_count_down_and_pause_holds_time() {
    let mut h = Harness::start(25, 5);
    h.state.toggle_run().unwrap();
    h.wait_armed(true).await;

    for _ in 0..3 {
        h.tick().await;
    }
    assert_eq!(h.remaining(), Some(1497));

    h.state.toggle_run().unwrap();
    h.wait_armed(false).await;

    // ticks sent while paused are discarded
    h.ticks.tick();
    h.ticks.tick();
    tokio::time::sleep(Duration::from_millis(20)).await;
    assert_eq!(h.remaining(), Some(1497));

    h.state.toggle_run().unwrap();
    h.wait_armed(true).await;
    assert_eq!(h.remaining(), Some(1497));

    h.tick().await;
    assert_eq!(h.remaining(), Some(1496));
}

#[tokio::test]
async fn alert_fires_once_per_phase_change() {
    let mut h = Harness::start(5, 1);
    h.state.toggle_run().unwrap();
    h.wait_armed(true).await;

    for _ in 0..=300 {
        h.tick().await;
    }
    assert_eq!(*h.alert.fired.lock().unwrap(), vec![(Phase::Focusing, Phase::OnBreak)]);
    assert_eq!(h.remaining(), Some(60));

    for _ in 0..=60 {
        h.tick().await;
    }
    assert_eq!(
        *h.alert.fired.lock().unwrap(),
        vec![(Phase::Focusing, Phase::OnBreak), (Phase::OnBreak, Phase::Focusing)]
    );
    assert_eq!(h.remaining(), Some(300));
}

#[tokio::test(start_paused = true)]
async fn interval_source_ticks_once_per_second() {
    let state = Arc::new(AppState::new(0, "127.0.0.1".to_string(), SessionController::new()));
    let task = tokio::spawn(tick_scheduler_task(
        Arc::clone(&state),
        IntervalTicks::every_second(),
        RecordingAlert::default(),
    ));

    state.toggle_run().unwrap();
    tokio::time::sleep(Duration::from_millis(10_500)).await;
    assert_eq!(state.get_controller().unwrap().seconds_remaining(), Some(1490));

    state.toggle_run().unwrap();
    tokio::time::sleep(Duration::from_secs(30)).await;
    assert_eq!(state.get_controller().unwrap().seconds_remaining(), Some(1490));

    task.abort();
}
