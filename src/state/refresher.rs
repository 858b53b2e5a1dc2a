use crate::state::messages::UiEvent;
use std::time::Duration;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tokio::time::{MissedTickBehavior, interval};

/// Periodic listing refresh. Emits `RefreshTick`; the UI loop turns each tick
/// into a silent background request.
pub struct PeriodicRefresher {
    ui_events: mpsc::Sender<UiEvent>,
    period: Duration,
}

impl PeriodicRefresher {
    pub fn new(ui_events: mpsc::Sender<UiEvent>, period: Duration) -> Self {
        Self { ui_events, period }
    }

    pub fn start(self) -> RefresherHandle {
        RefresherHandle {
            task: tokio::spawn(self.run()),
        }
    }

    async fn run(self) {
        let mut refresh_interval = interval(self.period);
        refresh_interval.set_missed_tick_behavior(MissedTickBehavior::Delay);
        // Skip the immediate first tick so startup loading isn't double-triggered.
        refresh_interval.tick().await;

        loop {
            refresh_interval.tick().await;
            if self.ui_events.send(UiEvent::RefreshTick).await.is_err() {
                break;
            }
        }
    }
}

/// Owner of the running refresher. Stopping or dropping it cancels the timer.
pub struct RefresherHandle {
    task: JoinHandle<()>,
}

impl RefresherHandle {
    /// Cancel the timer and wait until the task is gone.
    pub async fn stop(mut self) {
        self.task.abort();
        let _ = (&mut self.task).await;
    }

    pub fn is_running(&self) -> bool {
        !self.task.is_finished()
    }
}

impl Drop for RefresherHandle {
    fn drop(&mut self) {
        self.task.abort();
    }
}
