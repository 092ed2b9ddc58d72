use std::sync::Arc;
use std::time::Duration;

use parking_lot::Mutex;
use tokio::sync::{mpsc, watch};
use tokio::task::JoinHandle;
use tokio::time::{Instant, sleep_until};

use crate::models::{PresentedServersSummary, ServerSessions, SmpServerSubs};
use crate::ui::UiEvent;

use super::ServersSummaryProvider;

/// Periodically refreshes the servers summary behind the subscription
/// indicator. The timer task lives until [`stop`](Self::stop) or drop.
/// Every fetch asks for the remote host set last.
pub struct ServersSummaryPoller {
    interval: Duration,
    latest: Arc<Mutex<Option<PresentedServersSummary>>>,
    remote_host: watch::Sender<Option<i64>>,
    task: Option<JoinHandle<()>>,
}

impl ServersSummaryPoller {
    pub const FETCH_INTERVAL: Duration = Duration::from_secs(1);

    pub fn new() -> Self {
        Self::with_interval(Self::FETCH_INTERVAL)
    }

    pub fn with_interval(interval: Duration) -> Self {
        Self {
            interval,
            latest: Arc::new(Mutex::new(None)),
            remote_host: watch::Sender::new(None),
            task: None,
        }
    }

    /// Fetches once right away, then every interval. Does nothing if the
    /// timer is already running.
    pub fn start(
        &mut self,
        provider: Arc<dyn ServersSummaryProvider>,
        remote_host_id: Option<i64>,
        event_tx: mpsc::Sender<UiEvent>,
    ) {
        if self.is_running() {
            tracing::debug!("Servers summary timer already running");
            return;
        }
        tracing::debug!(?remote_host_id, interval = ?self.interval, "Starting servers summary timer");
        self.remote_host.send_replace(remote_host_id);
        self.task = Some(tokio::spawn(Self::main_loop(
            provider,
            self.remote_host.subscribe(),
            self.interval,
            self.latest.clone(),
            event_tx,
        )));
    }

    /// Switch the host the following fetches ask about.
    pub fn set_remote_host(&self, remote_host_id: Option<i64>) {
        tracing::debug!(?remote_host_id, "Servers summary host changed");
        self.remote_host.send_replace(remote_host_id);
    }

    pub fn remote_host(&self) -> Option<i64> {
        *self.remote_host.borrow()
    }

    pub fn stop(&mut self) {
        if let Some(task) = self.task.take() {
            tracing::debug!("Stopping servers summary timer");
            task.abort();
        }
    }

    pub fn is_running(&self) -> bool {
        self.task.as_ref().is_some_and(|t| !t.is_finished())
    }

    pub fn latest(&self) -> Option<PresentedServersSummary> {
        self.latest.lock().clone()
    }

    /// Totals for the indicator; zeros until the first summary arrives.
    pub fn totals(&self) -> (SmpServerSubs, ServerSessions) {
        self.latest
            .lock()
            .as_ref()
            .map(|s| (s.totals().subs, s.totals().sessions))
            .unwrap_or_default()
    }

    async fn main_loop(
        provider: Arc<dyn ServersSummaryProvider>,
        remote_host: watch::Receiver<Option<i64>>,
        interval: Duration,
        latest: Arc<Mutex<Option<PresentedServersSummary>>>,
        event_tx: mpsc::Sender<UiEvent>,
    ) {
        let mut next_tick = Instant::now();
        loop {
            sleep_until(next_tick).await;
            next_tick = Instant::now() + interval;
            let remote_host_id = *remote_host.borrow();
            let summary = match provider.get_agent_servers_summary(remote_host_id).await {
                Ok(v) => v,
                Err(err) => {
                    tracing::warn!(?err, "Failed to get servers summary");
                    continue;
                }
            };
            tracing::trace!(subs = ?summary.totals().subs, "Servers summary updated");
            *latest.lock() = Some(summary.clone());
            match event_tx.try_send(UiEvent::ServersSummary(summary)) {
                Ok(()) => {}
                Err(mpsc::error::TrySendError::Full(_)) => {
                    tracing::warn!("UI event queue is full, dropping servers summary");
                }
                Err(mpsc::error::TrySendError::Closed(_)) => {
                    tracing::debug!("UI event channel closed, stopping servers summary timer");
                    return;
                }
            }
        }
    }
}

impl Default for ServersSummaryPoller {
    fn default() -> Self {
        Self::new()
    }
}

impl Drop for ServersSummaryPoller {
    fn drop(&mut self) {
        self.stop();
    }
}
