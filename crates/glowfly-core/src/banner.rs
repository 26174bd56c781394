// ── Transient status banner ──
//
// One success/error message at a time, published through a watch
// channel and cleared after a fixed delay. Exactly one clear timer is
// pending at any moment: posting a new message aborts the previous
// timer before scheduling its own, so a stale timer can never wipe a
// newer message.

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::{watch, Mutex};
use tokio::task::JoinHandle;

/// How long a banner stays visible before auto-clearing.
pub const BANNER_CLEAR_DELAY: Duration = Duration::from_secs(5);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BannerSeverity {
    Success,
    Error,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BannerMessage {
    pub severity: BannerSeverity,
    pub text: String,
}

impl BannerMessage {
    pub fn success(text: impl Into<String>) -> Self {
        Self {
            severity: BannerSeverity::Success,
            text: text.into(),
        }
    }

    pub fn error(text: impl Into<String>) -> Self {
        Self {
            severity: BannerSeverity::Error,
            text: text.into(),
        }
    }
}

/// The banner itself. Cheap to clone; clones share the message channel
/// and the pending clear timer.
#[derive(Clone)]
pub struct StatusBanner {
    message: watch::Sender<Option<BannerMessage>>,
    clear_timer: Arc<Mutex<Option<JoinHandle<()>>>>,
}

impl StatusBanner {
    pub fn new() -> Self {
        let (message, _) = watch::channel(None);
        Self {
            message,
            clear_timer: Arc::new(Mutex::new(None)),
        }
    }

    /// Show a message and (re)start the auto-clear delay.
    pub async fn show(&self, msg: BannerMessage) {
        self.message.send_replace(Some(msg));

        let mut timer = self.clear_timer.lock().await;
        if let Some(prev) = timer.take() {
            prev.abort();
        }

        let sender = self.message.clone();
        *timer = Some(tokio::spawn(async move {
            tokio::time::sleep(BANNER_CLEAR_DELAY).await;
            sender.send_replace(None);
        }));
    }

    /// Current message, if one is showing.
    pub fn current(&self) -> Option<BannerMessage> {
        self.message.borrow().clone()
    }

    /// Subscribe to banner changes.
    pub fn subscribe(&self) -> watch::Receiver<Option<BannerMessage>> {
        self.message.subscribe()
    }
}

impl Default for StatusBanner {
    fn default() -> Self {
        Self::new()
    }
}
