// Wire models for the pixel board's JSON surface.
//
// Field names follow the firmware contract (camelCase, with a few
// all-caps oddballs like `MAC` and `IP`). Payloads are replaced
// wholesale on every poll — there are no merge semantics, so nothing
// here needs identity or versioning.

use serde::{Deserialize, Serialize};

// ── config.json ─────────────────────────────────────────────────────

/// One entry of the effect registry.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EffectInfo {
    pub registry_index: u16,
    pub name: String,
    pub description: String,
}

/// Device configuration: effect registry, holiday list, board identity
/// and build metadata. Loaded once at session start, read-only after.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeviceConfig {
    pub cur_effect: u16,
    pub cur_effect_name: String,
    pub board_name: String,
    pub board_uid: String,
    pub fw_version: String,
    pub fw_branch: String,
    pub build_time: String,
    #[serde(rename = "MAC")]
    pub mac: String,
    pub clean_boot: bool,
    pub watchdog_reboots_count: u32,
    #[serde(default)]
    pub last_watchdog_reboot: Option<String>,
    pub auto: bool,
    pub holiday: String,
    pub holiday_list: Vec<String>,
    pub fx: Vec<EffectInfo>,
}

// ── status.json ─────────────────────────────────────────────────────

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WifiStatus {
    #[serde(rename = "IP")]
    pub ip: String,
    pub bars: u8,
    pub rssi: i32,
    #[serde(default)]
    pub cur_version: Option<String>,
    #[serde(default)]
    pub latest_version: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FxStatus {
    pub count: u16,
    pub name: String,
    pub index: u16,
    pub asleep: bool,
    pub auto: bool,
    pub sleep_enabled: bool,
    pub holiday: String,
    pub brightness: u8,
    pub brightness_locked: bool,
    pub audio_threshold: u16,
    pub total_audio_bumps: u32,
    #[serde(default)]
    pub audio_hist: Vec<u32>,
    #[serde(default)]
    pub past_effects: Vec<u16>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AlarmInfo {
    pub time_long: u64,
    pub time_fmt: String,
    #[serde(rename = "type")]
    pub alarm_type: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TimeStatus {
    /// Raw sync state from the firmware; `2` means synchronized.
    pub ntp_sync: u8,
    pub date: String,
    pub time: String,
    pub dst: bool,
    pub holiday: String,
    /// Drift figures are in milliseconds (average is ms/hour).
    pub last_drift: i32,
    pub average_drift: i32,
    pub total_drift: i32,
    pub sync_size: u16,
    #[serde(default)]
    pub alarms: Vec<AlarmInfo>,
}

/// Snapshot of current device telemetry, polled from `status.json`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeviceStatus {
    pub board_temp: f64,
    pub board_min_temp: f64,
    pub board_max_temp: f64,
    pub chip_temp: f64,
    pub vcc: f64,
    pub min_vcc: f64,
    pub max_vcc: f64,
    #[serde(default)]
    pub mbed_version: Option<String>,
    pub up_time: u64,
    pub overall_status: String,
    pub wifi: WifiStatus,
    pub fx: FxStatus,
    pub time: TimeStatus,
}

impl TimeStatus {
    /// The firmware reports sync state as a small integer; only `2`
    /// counts as synchronized.
    pub fn is_ntp_synced(&self) -> bool {
        self.ntp_sync == 2
    }
}

// ── tasks.json ──────────────────────────────────────────────────────

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HeapStats {
    pub free_stack: u64,
    pub stack_pointer: u64,
    pub total_heap: u64,
    pub free_heap: u64,
    pub log_min_buffer_space: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TaskInfo {
    pub task_number: u16,
    pub name: String,
    pub state: String,
    pub cur_priority: u8,
    pub base_priority: u8,
    pub core_affinity: u32,
    pub stack_high_water_mark: u32,
    pub run_time: u64,
    pub run_time_pct: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TaskTable {
    pub sys_total_run_time: u64,
    pub tasks_total_run_time: u64,
    #[serde(default)]
    pub items: Vec<TaskInfo>,
}

/// Task/runtime telemetry, polled from `tasks.json`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TaskReport {
    pub date: String,
    pub time: String,
    pub board_name: String,
    pub board_uid: String,
    pub fw_version: String,
    pub fw_branch: String,
    pub build_time: String,
    pub millis: u64,
    pub cycles32: u64,
    pub cycles64: u64,
    pub heap: HeapStats,
    pub tasks: TaskTable,
}

// ── PUT /fx ─────────────────────────────────────────────────────────

/// A single-field configuration write.
///
/// The firmware expects partial-update semantics: the body carries only
/// the one changed field and the server merges it. The untagged repr
/// serializes each variant as exactly that one field.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum FxUpdate {
    Effect { effect: u16 },
    Auto { auto: bool },
    Holiday { holiday: String },
    Brightness { brightness: u8 },
    SleepEnabled {
        #[serde(rename = "sleepEnabled")]
        sleep_enabled: bool,
    },
}

impl FxUpdate {
    /// Human label for log lines and banner text.
    pub fn control_name(&self) -> &'static str {
        match self {
            Self::Effect { .. } => "effect",
            Self::Auto { .. } => "auto",
            Self::Holiday { .. } => "holiday",
            Self::Brightness { .. } => "brightness",
            Self::SleepEnabled { .. } => "sleep",
        }
    }
}

/// Values the device actually applied, echoed back from `PUT /fx`.
///
/// The device may clamp or quantize what it was sent (brightness in
/// particular), so consumers must re-derive display state from these,
/// not from the requested values.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdatedFields {
    #[serde(default)]
    pub effect: Option<u16>,
    #[serde(default)]
    pub auto: Option<bool>,
    #[serde(default)]
    pub holiday: Option<String>,
    #[serde(default)]
    pub brightness: Option<u8>,
    #[serde(default)]
    pub brightness_locked: Option<bool>,
    #[serde(default)]
    pub sleep_enabled: Option<bool>,
}

/// Response envelope of `PUT /fx`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct FxUpdateAck {
    #[serde(default)]
    pub updates: UpdatedFields,
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn fx_update_serializes_exactly_one_field() {
        let body = serde_json::to_value(FxUpdate::Brightness { brightness: 192 }).unwrap();
        assert_eq!(body, serde_json::json!({ "brightness": 192 }));

        let body = serde_json::to_value(FxUpdate::SleepEnabled {
            sleep_enabled: true,
        })
        .unwrap();
        assert_eq!(body, serde_json::json!({ "sleepEnabled": true }));

        let body = serde_json::to_value(FxUpdate::Holiday {
            holiday: "Halloween".into(),
        })
        .unwrap();
        assert_eq!(body, serde_json::json!({ "holiday": "Halloween" }));
    }

    #[test]
    fn ack_tolerates_partial_updates_object() {
        let ack: FxUpdateAck =
            serde_json::from_str(r#"{"updates":{"brightness":128,"brightnessLocked":false}}"#)
                .unwrap();
        assert_eq!(ack.updates.brightness, Some(128));
        assert_eq!(ack.updates.brightness_locked, Some(false));
        assert_eq!(ack.updates.effect, None);
    }
}
