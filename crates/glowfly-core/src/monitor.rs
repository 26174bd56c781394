// ── Board session & pollers ──
//
// Full lifecycle for one board connection: the one-shot config load,
// the two periodic pollers, and the watch channels their snapshots are
// published through. The status and task pollers are independent (they
// back two different pages of the firmware's dashboard) and are never
// synchronized with each other or with user-triggered updates.

use std::sync::{Arc, OnceLock};
use std::time::Duration;

use tokio::sync::{watch, Mutex};
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;
use tracing::{debug, warn};

use glowfly_api::{DeviceClient, DeviceConfig, DeviceStatus, TaskReport};

use crate::error::CoreError;

/// Cadence of the device-status poller, matching the dashboard's status page.
pub const STATUS_POLL_INTERVAL: Duration = Duration::from_secs(120);

/// Cadence of the task-telemetry poller, matching the dashboard's stats page.
pub const TASK_POLL_INTERVAL: Duration = Duration::from_secs(60);

/// Snapshot of one polled surface.
///
/// A failed poll raises `error` but leaves `data` alone — stale
/// telemetry stays on screen until the next successful tick replaces
/// it wholesale.
#[derive(Debug, Clone)]
pub struct PollState<T> {
    pub data: Option<Arc<T>>,
    pub error: Option<String>,
}

impl<T> Default for PollState<T> {
    fn default() -> Self {
        Self {
            data: None,
            error: None,
        }
    }
}

impl<T> PollState<T> {
    /// True when the last poll failed.
    pub fn has_error(&self) -> bool {
        self.error.is_some()
    }
}

/// Session facade for one pixel board.
///
/// Cheaply cloneable via `Arc`. [`connect()`](Self::connect) loads the
/// configuration and spawns the pollers; [`shutdown()`](Self::shutdown)
/// cancels and joins them.
#[derive(Clone)]
pub struct Monitor {
    inner: Arc<MonitorInner>,
}

struct MonitorInner {
    client: DeviceClient,
    /// Loaded once at connect, read-only after. Stays empty when the
    /// load fails — lookups then degrade to their placeholder values.
    config: OnceLock<Arc<DeviceConfig>>,
    status: watch::Sender<PollState<DeviceStatus>>,
    tasks: watch::Sender<PollState<TaskReport>>,
    cancel: CancellationToken,
    task_handles: Mutex<Vec<JoinHandle<()>>>,
}

impl Monitor {
    /// Create a monitor. Does not touch the network — call
    /// [`connect()`](Self::connect) to load config and start polling.
    pub fn new(client: DeviceClient) -> Self {
        let (status, _) = watch::channel(PollState::default());
        let (tasks, _) = watch::channel(PollState::default());

        Self {
            inner: Arc::new(MonitorInner {
                client,
                config: OnceLock::new(),
                status,
                tasks,
                cancel: CancellationToken::new(),
                task_handles: Mutex::new(Vec::new()),
            }),
        }
    }

    /// The underlying device client.
    pub fn client(&self) -> &DeviceClient {
        &self.inner.client
    }

    /// Load the device configuration and spawn both pollers.
    ///
    /// The config fetch is attempted exactly once, with no retry. Its
    /// failure is non-fatal: effect/holiday lookups degrade to their
    /// placeholders and the session stays up.
    pub async fn connect(&self) {
        self.load_config().await;

        let mut handles = self.inner.task_handles.lock().await;
        let cancel = self.inner.cancel.clone();

        let monitor = self.clone();
        let c = cancel.clone();
        handles.push(tokio::spawn(status_poll_task(monitor, c)));

        let monitor = self.clone();
        handles.push(tokio::spawn(task_poll_task(monitor, cancel)));
    }

    /// One-shot config load; leaves the cache empty on failure.
    pub async fn load_config(&self) {
        match self.inner.client.get_config().await {
            Ok(config) => {
                debug!(
                    board = %config.board_name,
                    effects = config.fx.len(),
                    "device configuration loaded"
                );
                let _ = self.inner.config.set(Arc::new(config));
            }
            Err(e) => {
                warn!(error = %e, "config load failed; lookups will degrade");
            }
        }
    }

    /// The loaded configuration, if the one-shot load succeeded.
    pub fn config(&self) -> Option<Arc<DeviceConfig>> {
        self.inner.config.get().cloned()
    }

    /// Stop the pollers and wait for them to finish.
    pub async fn shutdown(&self) {
        self.inner.cancel.cancel();
        let mut handles = self.inner.task_handles.lock().await;
        for handle in handles.drain(..) {
            let _ = handle.await;
        }
        debug!("monitor shut down");
    }

    // ── One poll tick per surface ────────────────────────────────────

    /// Poll `status.json` once and publish the result.
    pub async fn refresh_status(&self) {
        match self.inner.client.get_status().await {
            Ok(status) => {
                self.inner.status.send_replace(PollState {
                    data: Some(Arc::new(status)),
                    error: None,
                });
            }
            Err(e) => {
                warn!(error = %e, "status poll failed");
                let user_facing = CoreError::from(e).to_string();
                self.inner
                    .status
                    .send_modify(|state| state.error = Some(user_facing));
            }
        }
    }

    /// Poll `tasks.json` once and publish the result.
    pub async fn refresh_tasks(&self) {
        match self.inner.client.get_tasks().await {
            Ok(report) => {
                self.inner.tasks.send_replace(PollState {
                    data: Some(Arc::new(report)),
                    error: None,
                });
            }
            Err(e) => {
                warn!(error = %e, "task poll failed");
                let user_facing = CoreError::from(e).to_string();
                self.inner
                    .tasks
                    .send_modify(|state| state.error = Some(user_facing));
            }
        }
    }

    // ── Snapshot / subscription accessors ────────────────────────────

    pub fn status_snapshot(&self) -> PollState<DeviceStatus> {
        self.inner.status.borrow().clone()
    }

    pub fn tasks_snapshot(&self) -> PollState<TaskReport> {
        self.inner.tasks.borrow().clone()
    }

    pub fn subscribe_status(&self) -> watch::Receiver<PollState<DeviceStatus>> {
        self.inner.status.subscribe()
    }

    pub fn subscribe_tasks(&self) -> watch::Receiver<PollState<TaskReport>> {
        self.inner.tasks.subscribe()
    }
}

// ── Poll tasks ──────────────────────────────────────────────────────
//
// `tokio::time::interval` completes its first tick immediately, which
// gives the contract's "once at startup, then every N seconds" without
// a separate initial call.

async fn status_poll_task(monitor: Monitor, cancel: CancellationToken) {
    let mut interval = tokio::time::interval(STATUS_POLL_INTERVAL);

    loop {
        tokio::select! {
            biased;
            () = cancel.cancelled() => break,
            _ = interval.tick() => monitor.refresh_status().await,
        }
    }
}

async fn task_poll_task(monitor: Monitor, cancel: CancellationToken) {
    let mut interval = tokio::time::interval(TASK_POLL_INTERVAL);

    loop {
        tokio::select! {
            biased;
            () = cancel.cancelled() => break,
            _ = interval.tick() => monitor.refresh_tasks().await,
        }
    }
}
