// ── Update dispatcher ──
//
// Optimistic configuration writes with rollback. Each control keeps the
// last value the device acknowledged; a write runs the per-control
// state machine Idle → Pending → {Confirmed, RolledBack}. A control is
// never left showing a value the device has not acknowledged: failures
// hand back the last-confirmed value (selects) or the negated attempt
// (toggles), and every terminal transition posts a banner.

use tokio::sync::Mutex;
use tracing::debug;

use glowfly_api::models::FxUpdate;
use glowfly_api::{DeviceClient, DeviceConfig, DeviceStatus, Error};

use crate::banner::{BannerMessage, StatusBanner};
use crate::units;

/// Per-interaction control states, for consumers that surface them.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ControlState {
    Idle,
    Pending,
    Confirmed,
    RolledBack,
}

/// The value a control should display after an update attempt.
///
/// `None` inside a variant means the control had no device-confirmed
/// value yet (nothing to roll back to).
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ControlValue {
    Effect(Option<u16>),
    Auto(bool),
    Holiday(Option<String>),
    BrightnessPercent(Option<u8>),
    Sleep(bool),
}

/// Terminal result of one update attempt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UpdateOutcome {
    /// New value matched the last-confirmed one; no request was made.
    Unchanged,
    /// Device acknowledged the write; show `display`.
    Confirmed { display: ControlValue },
    /// Write failed; roll the control back to `display`.
    RolledBack { display: ControlValue },
}

impl UpdateOutcome {
    pub fn state(&self) -> ControlState {
        match self {
            Self::Unchanged => ControlState::Idle,
            Self::Confirmed { .. } => ControlState::Confirmed,
            Self::RolledBack { .. } => ControlState::RolledBack,
        }
    }
}

/// Last device-acknowledged value per control.
#[derive(Debug, Clone, Default)]
pub struct ConfirmedControls {
    pub effect: Option<u16>,
    pub auto: Option<bool>,
    pub holiday: Option<String>,
    pub brightness_raw: Option<u8>,
    pub sleep_enabled: Option<bool>,
}

/// Routes user-triggered configuration changes to `PUT /fx`.
pub struct Dispatcher {
    client: DeviceClient,
    banner: StatusBanner,
    confirmed: Mutex<ConfirmedControls>,
}

impl Dispatcher {
    pub fn new(client: DeviceClient, banner: StatusBanner) -> Self {
        Self {
            client,
            banner,
            confirmed: Mutex::new(ConfirmedControls::default()),
        }
    }

    /// Seed confirmed values from the one-shot configuration (the
    /// controls the config page reflects on load).
    pub async fn seed_from_config(&self, config: &DeviceConfig) {
        let mut confirmed = self.confirmed.lock().await;
        confirmed.effect = Some(config.cur_effect);
        confirmed.auto = Some(config.auto);
        confirmed.holiday = Some(config.holiday.clone());
    }

    /// Seed confirmed values from a status snapshot (brightness and
    /// sleep only appear in telemetry).
    pub async fn seed_from_status(&self, status: &DeviceStatus) {
        let mut confirmed = self.confirmed.lock().await;
        confirmed.effect = Some(status.fx.index);
        confirmed.auto = Some(status.fx.auto);
        confirmed.holiday = Some(status.fx.holiday.clone());
        confirmed.brightness_raw = Some(status.fx.brightness);
        confirmed.sleep_enabled = Some(status.fx.sleep_enabled);
    }

    /// Snapshot of the confirmed values.
    pub async fn confirmed(&self) -> ConfirmedControls {
        self.confirmed.lock().await.clone()
    }

    // ── Controls ─────────────────────────────────────────────────────

    /// Select an effect by registry index. No-op when the index matches
    /// the last-confirmed one.
    pub async fn set_effect(&self, index: u16) -> UpdateOutcome {
        {
            let confirmed = self.confirmed.lock().await;
            if confirmed.effect == Some(index) {
                return UpdateOutcome::Unchanged;
            }
        }

        debug!(index, "effect update pending");
        match self.client.apply(&FxUpdate::Effect { effect: index }).await {
            Ok(ack) => {
                let applied = ack.updates.effect.unwrap_or(index);
                let mut confirmed = self.confirmed.lock().await;
                confirmed.effect = Some(applied);
                drop(confirmed);

                self.banner
                    .show(BannerMessage::success("Effect update successful"))
                    .await;
                UpdateOutcome::Confirmed {
                    display: ControlValue::Effect(Some(applied)),
                }
            }
            Err(e) => {
                self.fail_banner("Effect", &e).await;
                let confirmed = self.confirmed.lock().await;
                UpdateOutcome::RolledBack {
                    display: ControlValue::Effect(confirmed.effect),
                }
            }
        }
    }

    /// Toggle the automatic effects loop.
    pub async fn set_auto(&self, enable: bool) -> UpdateOutcome {
        {
            let confirmed = self.confirmed.lock().await;
            if confirmed.auto == Some(enable) {
                return UpdateOutcome::Unchanged;
            }
        }

        debug!(enable, "auto-mode update pending");
        match self.client.apply(&FxUpdate::Auto { auto: enable }).await {
            Ok(ack) => {
                let applied = ack.updates.auto.unwrap_or(enable);
                let mut confirmed = self.confirmed.lock().await;
                confirmed.auto = Some(applied);
                drop(confirmed);

                let verb = if applied { "enabled" } else { "disabled" };
                self.banner
                    .show(BannerMessage::success(format!(
                        "Automatic effects loop {verb} successfully"
                    )))
                    .await;
                UpdateOutcome::Confirmed {
                    display: ControlValue::Auto(applied),
                }
            }
            Err(e) => {
                self.fail_banner("Automatic effects loop", &e).await;
                // Toggles roll back to the opposite of what was attempted.
                UpdateOutcome::RolledBack {
                    display: ControlValue::Auto(!enable),
                }
            }
        }
    }

    /// Select a holiday theme (the `"None"` sentinel selects automatic).
    pub async fn set_holiday(&self, holiday: &str) -> UpdateOutcome {
        {
            let confirmed = self.confirmed.lock().await;
            if confirmed.holiday.as_deref() == Some(holiday) {
                return UpdateOutcome::Unchanged;
            }
        }

        debug!(holiday, "holiday update pending");
        let update = FxUpdate::Holiday {
            holiday: holiday.to_owned(),
        };
        match self.client.apply(&update).await {
            Ok(ack) => {
                let applied = ack
                    .updates
                    .holiday
                    .unwrap_or_else(|| holiday.to_owned());
                let mut confirmed = self.confirmed.lock().await;
                confirmed.holiday = Some(applied.clone());
                drop(confirmed);

                self.banner
                    .show(BannerMessage::success("Holiday update successful"))
                    .await;
                UpdateOutcome::Confirmed {
                    display: ControlValue::Holiday(Some(applied)),
                }
            }
            Err(e) => {
                self.fail_banner("Holiday", &e).await;
                let confirmed = self.confirmed.lock().await;
                UpdateOutcome::RolledBack {
                    display: ControlValue::Holiday(confirmed.holiday.clone()),
                }
            }
        }
    }

    /// Set brightness from a user-facing percent.
    ///
    /// The device may clamp or quantize the raw value it is sent, so on
    /// success the display percent is recomputed from the raw value the
    /// device echoed back, never from the request.
    pub async fn set_brightness_percent(&self, percent: u8) -> UpdateOutcome {
        let requested_raw = units::brightness_percent_to_raw(percent);
        {
            let confirmed = self.confirmed.lock().await;
            if confirmed.brightness_raw == Some(requested_raw) {
                return UpdateOutcome::Unchanged;
            }
        }

        debug!(percent, raw = requested_raw, "brightness update pending");
        let update = FxUpdate::Brightness {
            brightness: requested_raw,
        };
        match self.client.apply(&update).await {
            Ok(ack) => {
                let applied_raw = ack.updates.brightness.unwrap_or(requested_raw);
                let mut confirmed = self.confirmed.lock().await;
                confirmed.brightness_raw = Some(applied_raw);
                drop(confirmed);

                let display_percent = units::brightness_raw_to_percent(applied_raw);
                self.banner
                    .show(BannerMessage::success(format!(
                        "Brightness update successful ({display_percent}%)"
                    )))
                    .await;
                UpdateOutcome::Confirmed {
                    display: ControlValue::BrightnessPercent(Some(display_percent)),
                }
            }
            Err(e) => {
                self.fail_banner("Brightness", &e).await;
                let confirmed = self.confirmed.lock().await;
                UpdateOutcome::RolledBack {
                    display: ControlValue::BrightnessPercent(
                        confirmed
                            .brightness_raw
                            .map(units::brightness_raw_to_percent),
                    ),
                }
            }
        }
    }

    /// Toggle the sleep schedule.
    pub async fn set_sleep_enabled(&self, enable: bool) -> UpdateOutcome {
        {
            let confirmed = self.confirmed.lock().await;
            if confirmed.sleep_enabled == Some(enable) {
                return UpdateOutcome::Unchanged;
            }
        }

        debug!(enable, "sleep-schedule update pending");
        let update = FxUpdate::SleepEnabled {
            sleep_enabled: enable,
        };
        match self.client.apply(&update).await {
            Ok(ack) => {
                let applied = ack.updates.sleep_enabled.unwrap_or(enable);
                let mut confirmed = self.confirmed.lock().await;
                confirmed.sleep_enabled = Some(applied);
                drop(confirmed);

                let verb = if applied { "enabled" } else { "disabled" };
                self.banner
                    .show(BannerMessage::success(format!(
                        "Sleep schedule {verb} successfully"
                    )))
                    .await;
                UpdateOutcome::Confirmed {
                    display: ControlValue::Sleep(applied),
                }
            }
            Err(e) => {
                self.fail_banner("Sleep schedule", &e).await;
                UpdateOutcome::RolledBack {
                    display: ControlValue::Sleep(!enable),
                }
            }
        }
    }

    // ── Helpers ──────────────────────────────────────────────────────

    /// Error banner in the dashboard's phrasing: control name, the
    /// transport status, and the error text.
    async fn fail_banner(&self, control: &str, err: &Error) {
        self.banner
            .show(BannerMessage::error(format!(
                "{control} update has failed: {} - {err}",
                err.status_text()
            )))
            .await;
    }
}
