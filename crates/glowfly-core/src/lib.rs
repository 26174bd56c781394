//! Session layer between `glowfly-api` and UI consumers.
//!
//! This crate owns the behavior of the board console that isn't wire
//! mechanics or rendering:
//!
//! - **[`Monitor`]** — session facade: [`connect()`](Monitor::connect)
//!   performs the one-shot config load, then spawns the two background
//!   pollers (status every 120 s, tasks every 60 s) that publish
//!   [`PollState`] snapshots through `watch` channels. A poll failure
//!   raises an error flag but retains the last good data.
//!
//! - **[`Dispatcher`]** — optimistic configuration writes. Each control
//!   keeps its last device-acknowledged value; a failed write rolls the
//!   control back and posts an error banner, a successful one commits
//!   and posts a success banner.
//!
//! - **[`StatusBanner`]** — the transient success/error message with a
//!   single cancellable auto-clear timer.
//!
//! - **[`catalog`]** — read-only lookups against the one-shot
//!   [`DeviceConfig`](glowfly_api::DeviceConfig) (effect descriptions,
//!   holiday display names) with explicit fallbacks.
//!
//! - **[`units`]** — the pure numeric/string transforms shared by every
//!   presentation surface (brightness gamma mapping, truncation,
//!   histogram bucket labels).

pub mod banner;
pub mod catalog;
pub mod dispatch;
pub mod error;
pub mod monitor;
pub mod units;

// ── Primary re-exports ──────────────────────────────────────────────
pub use banner::{BannerMessage, BannerSeverity, StatusBanner, BANNER_CLEAR_DELAY};
pub use dispatch::{ConfirmedControls, ControlState, ControlValue, Dispatcher, UpdateOutcome};
pub use error::CoreError;
pub use monitor::{Monitor, PollState, STATUS_POLL_INTERVAL, TASK_POLL_INTERVAL};
