#![allow(clippy::unwrap_used)]
// Scenario tests for the monitor and dispatcher against a mock board.

use serde_json::json;
use url::Url;
use wiremock::matchers::{body_json, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use glowfly_api::DeviceClient;
use glowfly_core::banner::BannerSeverity;
use glowfly_core::{ControlState, ControlValue, Dispatcher, Monitor, StatusBanner, UpdateOutcome};

// ── Helpers ─────────────────────────────────────────────────────────

async fn setup() -> (MockServer, DeviceClient) {
    let server = MockServer::start().await;
    let base_url = Url::parse(&server.uri()).unwrap();
    let client = DeviceClient::with_client(reqwest::Client::new(), base_url);
    (server, client)
}

fn status_body(brightness: u8) -> serde_json::Value {
    json!({
        "boardTemp": 38.5, "boardMinTemp": 22.1, "boardMaxTemp": 41.0,
        "chipTemp": 44.2,
        "vcc": 3.28, "minVcc": 3.21, "maxVcc": 3.32,
        "upTime": 864_000_u64,
        "overallStatus": "ok",
        "wifi": { "IP": "192.168.0.10", "bars": 3, "rssi": -62 },
        "fx": {
            "count": 24, "name": "FxC2", "index": 3,
            "asleep": false, "auto": true, "sleepEnabled": true,
            "holiday": "Halloween", "brightness": brightness,
            "brightnessLocked": false,
            "audioThreshold": 950, "totalAudioBumps": 17,
            "audioHist": [4, 9, 2], "pastEffects": [1, 5, 3]
        },
        "time": {
            "ntpSync": 2, "date": "2025-10-30", "time": "19:42:07", "dst": true,
            "holiday": "Halloween",
            "lastDrift": -12, "averageDrift": -8, "totalDrift": -96, "syncSize": 12,
            "alarms": []
        }
    })
}

// ── Dispatcher scenarios ────────────────────────────────────────────

#[tokio::test]
async fn auto_toggle_failure_rolls_back_and_reports_status() {
    let (server, client) = setup().await;

    Mock::given(method("PUT"))
        .and(path("/fx"))
        .respond_with(ResponseTemplate::new(503).set_body_string("effect task busy"))
        .mount(&server)
        .await;

    let banner = StatusBanner::new();
    let dispatcher = Dispatcher::new(client, banner.clone());

    // Attempting to turn auto ON fails — the toggle must read false again.
    let outcome = dispatcher.set_auto(true).await;

    assert_eq!(outcome.state(), ControlState::RolledBack);
    assert_eq!(
        outcome,
        UpdateOutcome::RolledBack {
            display: ControlValue::Auto(false)
        }
    );

    let msg = banner.current().unwrap();
    assert_eq!(msg.severity, BannerSeverity::Error);
    assert!(msg.text.contains("HTTP 503"), "banner text: {}", msg.text);
    assert!(
        msg.text.contains("Automatic effects loop update has failed"),
        "banner text: {}",
        msg.text
    );
}

#[tokio::test]
async fn brightness_display_comes_from_the_echoed_raw_value() {
    let (server, client) = setup().await;

    // Request 71% (raw 129 by the gamma formula); device quantizes to 128.
    Mock::given(method("PUT"))
        .and(path("/fx"))
        .and(body_json(json!({ "brightness": 129 })))
        .respond_with(ResponseTemplate::new(200).set_body_json(
            json!({ "updates": { "brightness": 128, "brightnessLocked": false } }),
        ))
        .expect(1)
        .mount(&server)
        .await;

    let banner = StatusBanner::new();
    let dispatcher = Dispatcher::new(client, banner.clone());

    let outcome = dispatcher.set_brightness_percent(71).await;

    // 128 maps back to 71% — but through the echoed value, not the request.
    let expected = glowfly_core::units::brightness_raw_to_percent(128);
    assert_eq!(
        outcome,
        UpdateOutcome::Confirmed {
            display: ControlValue::BrightnessPercent(Some(expected))
        }
    );

    let confirmed = dispatcher.confirmed().await;
    assert_eq!(confirmed.brightness_raw, Some(128));

    let msg = banner.current().unwrap();
    assert_eq!(msg.severity, BannerSeverity::Success);
}

#[tokio::test]
async fn unchanged_effect_is_a_noop() {
    let (server, client) = setup().await;

    // No PUT mock mounted: any request would 404 and fail the test below.
    Mock::given(method("GET"))
        .and(path("/status.json"))
        .respond_with(ResponseTemplate::new(200).set_body_json(status_body(224)))
        .mount(&server)
        .await;

    let banner = StatusBanner::new();
    let dispatcher = Dispatcher::new(client.clone(), banner);

    let status = client.get_status().await.unwrap();
    dispatcher.seed_from_status(&status).await;

    let outcome = dispatcher.set_effect(3).await;
    assert_eq!(outcome, UpdateOutcome::Unchanged);
    assert_eq!(outcome.state(), ControlState::Idle);
}

#[tokio::test]
async fn effect_rollback_restores_last_confirmed_index() {
    let (server, client) = setup().await;

    Mock::given(method("GET"))
        .and(path("/status.json"))
        .respond_with(ResponseTemplate::new(200).set_body_json(status_body(224)))
        .mount(&server)
        .await;
    Mock::given(method("PUT"))
        .and(path("/fx"))
        .respond_with(ResponseTemplate::new(500).set_body_string("nope"))
        .mount(&server)
        .await;

    let banner = StatusBanner::new();
    let dispatcher = Dispatcher::new(client.clone(), banner);

    let status = client.get_status().await.unwrap();
    dispatcher.seed_from_status(&status).await;

    let outcome = dispatcher.set_effect(7).await;
    assert_eq!(
        outcome,
        UpdateOutcome::RolledBack {
            display: ControlValue::Effect(Some(3))
        }
    );

    // The confirmed value is untouched by the failure.
    assert_eq!(dispatcher.confirmed().await.effect, Some(3));
}

// ── Poller scenarios ────────────────────────────────────────────────

#[tokio::test]
async fn poll_failure_keeps_stale_data_and_raises_the_indicator() {
    let (server, client) = setup().await;

    Mock::given(method("GET"))
        .and(path("/status.json"))
        .respond_with(ResponseTemplate::new(200).set_body_json(status_body(224)))
        .mount(&server)
        .await;

    let monitor = Monitor::new(client);

    monitor.refresh_status().await;
    let state = monitor.status_snapshot();
    assert!(!state.has_error());
    let first = state.data.clone().unwrap();
    assert_eq!(first.fx.brightness, 224);

    // Board goes away: the indicator comes up, the data stays.
    server.reset().await;
    Mock::given(method("GET"))
        .and(path("/status.json"))
        .respond_with(ResponseTemplate::new(500).set_body_string("oops"))
        .mount(&server)
        .await;

    monitor.refresh_status().await;
    let state = monitor.status_snapshot();
    assert!(state.has_error());
    assert_eq!(state.data.clone().unwrap().fx.brightness, 224);

    // Next successful tick replaces the snapshot and clears the error.
    server.reset().await;
    Mock::given(method("GET"))
        .and(path("/status.json"))
        .respond_with(ResponseTemplate::new(200).set_body_json(status_body(128)))
        .mount(&server)
        .await;

    monitor.refresh_status().await;
    let state = monitor.status_snapshot();
    assert!(!state.has_error());
    assert_eq!(state.data.unwrap().fx.brightness, 128);
}

#[tokio::test]
async fn failed_config_load_degrades_lookups() {
    let (server, client) = setup().await;

    Mock::given(method("GET"))
        .and(path("/config.json"))
        .respond_with(ResponseTemplate::new(500).set_body_string("flash read error"))
        .mount(&server)
        .await;

    let monitor = Monitor::new(client);
    monitor.load_config().await;

    let config = monitor.config();
    assert!(config.is_none());
    let label = glowfly_core::catalog::effect_label(config.as_deref(), 3);
    assert_eq!(label, "N/A");
}
