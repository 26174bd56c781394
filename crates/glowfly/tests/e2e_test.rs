//! End-to-end tests driving the `glowfly` binary against a mock board.
#![allow(clippy::unwrap_used)]

use assert_cmd::cargo::cargo_bin_cmd;
use predicates::prelude::*;
use serde_json::json;
use wiremock::matchers::{body_json, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

// ── Fixtures ────────────────────────────────────────────────────────

fn config_body() -> serde_json::Value {
    json!({
        "curEffect": 3,
        "curEffectName": "FxC2",
        "boardName": "pixel-den",
        "boardUid": "E66038B7134F",
        "fwVersion": "1.5.2",
        "fwBranch": "main",
        "buildTime": "Jun 15 2025 10:30:00",
        "MAC": "AA:BB:CC:00:11:22",
        "cleanBoot": true,
        "watchdogRebootsCount": 2,
        "lastWatchdogReboot": "2025-05-30 03:12:44",
        "auto": true,
        "holiday": "None",
        "holidayList": ["None", "Halloween", "Thanksgiving", "Christmas"],
        "fx": [
            {"registryIndex": 0, "name": "FxA1", "description": "Sleep light"},
            {"registryIndex": 3, "name": "FxC2", "description": "Rainbow march"}
        ]
    })
}

fn status_body() -> serde_json::Value {
    json!({
        "boardTemp": 38.5, "boardMinTemp": 22.1, "boardMaxTemp": 41.0,
        "chipTemp": 44.2,
        "vcc": 3.28, "minVcc": 3.21, "maxVcc": 3.32,
        "mbedVersion": "6.17.0",
        "upTime": 864_000_u64,
        "overallStatus": "ok",
        "wifi": {
            "IP": "192.168.0.10", "bars": 3, "rssi": -62,
            "curVersion": "1.4.8", "latestVersion": "1.5.0"
        },
        "fx": {
            "count": 24, "name": "FxC2", "index": 3,
            "asleep": false, "auto": true, "sleepEnabled": true,
            "holiday": "None", "brightness": 224, "brightnessLocked": false,
            "audioThreshold": 950, "totalAudioBumps": 17,
            "audioHist": [4, 9, 2, 1, 0, 1],
            "pastEffects": [1, 5, 3]
        },
        "time": {
            "ntpSync": 2, "date": "2025-10-30", "time": "19:42:07", "dst": true,
            "holiday": "Halloween",
            "lastDrift": -12, "averageDrift": -8, "totalDrift": -96, "syncSize": 12,
            "alarms": []
        }
    })
}

/// Run the binary against the mock board, color disabled for stable output.
fn glowfly_at(server: &MockServer) -> assert_cmd::Command {
    let mut cmd = cargo_bin_cmd!("glowfly");
    cmd.env("HOME", "/tmp/glowfly-e2e-test-nonexistent")
        .env("XDG_CONFIG_HOME", "/tmp/glowfly-e2e-test-nonexistent")
        .env_remove("GLOWFLY_PROFILE")
        .env_remove("GLOWFLY_OUTPUT")
        .args(["--device", &server.uri(), "--color", "never"]);
    cmd
}

// ── Scenarios ───────────────────────────────────────────────────────

#[tokio::test(flavor = "multi_thread")]
async fn test_status_renders_derived_values() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/config.json"))
        .respond_with(ResponseTemplate::new(200).set_body_json(config_body()))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/status.json"))
        .respond_with(ResponseTemplate::new(200).set_body_json(status_body()))
        .mount(&server)
        .await;

    let assert = tokio::task::spawn_blocking(move || {
        glowfly_at(&server).arg("status").assert().success().stdout(
            // 38.5 C is 101.3 F; raw 224 reads as 94%; "None" shows as
            // Automatic; ntpSync 2 reads as synced; 864000 s is 10 days.
            predicate::str::contains("101.3 °F")
                .and(predicate::str::contains("94%"))
                .and(predicate::str::contains("Automatic"))
                .and(predicate::str::contains("NTP synced: true"))
                .and(predicate::str::contains("10d 00:00:00"))
                .and(predicate::str::contains("Rainbow march"))
                .and(predicate::str::contains(">1000")),
        )
    })
    .await
    .unwrap();
    drop(assert);
}

#[tokio::test(flavor = "multi_thread")]
async fn test_status_output_formats_bypass_table_text() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/config.json"))
        .respond_with(ResponseTemplate::new(200).set_body_json(config_body()))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/status.json"))
        .respond_with(ResponseTemplate::new(200).set_body_json(status_body()))
        .mount(&server)
        .await;

    tokio::task::spawn_blocking(move || {
        // Plain mode is just the current effect identifier.
        glowfly_at(&server)
            .args(["status", "--output", "plain"])
            .assert()
            .success()
            .stdout("FxC2 [3]\n");

        // Structured modes serialize the wire payload, not the report text.
        glowfly_at(&server)
            .args(["status", "--output", "json-compact"])
            .assert()
            .success()
            .stdout(
                predicate::str::contains("\"upTime\":864000")
                    .and(predicate::str::contains("°F").not()),
            );
    })
    .await
    .unwrap();
}

#[tokio::test(flavor = "multi_thread")]
async fn test_set_brightness_reports_echoed_percent() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/status.json"))
        .respond_with(ResponseTemplate::new(200).set_body_json(status_body()))
        .mount(&server)
        .await;
    // 71% maps to raw 129; the board clamps to 128, which reads back as 71%.
    Mock::given(method("PUT"))
        .and(path("/fx"))
        .and(body_json(json!({"brightness": 129})))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!({"updates": {"brightness": 128, "brightnessLocked": false}})),
        )
        .expect(1)
        .mount(&server)
        .await;

    tokio::task::spawn_blocking(move || {
        glowfly_at(&server)
            .args(["set", "brightness", "71"])
            .assert()
            .success()
            .stdout(predicate::str::contains("Brightness update successful (71%)"));
    })
    .await
    .unwrap();
}

#[tokio::test(flavor = "multi_thread")]
async fn test_set_auto_failure_exits_with_update_error() {
    let server = MockServer::start().await;
    // Status reports auto=true, so "off" is a real change.
    Mock::given(method("GET"))
        .and(path("/status.json"))
        .respond_with(ResponseTemplate::new(200).set_body_json(status_body()))
        .mount(&server)
        .await;
    Mock::given(method("PUT"))
        .and(path("/fx"))
        .respond_with(ResponseTemplate::new(503).set_body_string("effect engine busy"))
        .mount(&server)
        .await;

    tokio::task::spawn_blocking(move || {
        let output = glowfly_at(&server)
            .args(["set", "auto", "off"])
            .output()
            .unwrap();
        assert_eq!(output.status.code(), Some(4), "Expected update-failed exit");
        let stderr = String::from_utf8_lossy(&output.stderr);
        assert!(
            stderr.contains("HTTP 503"),
            "Expected the transport status in the error:\n{stderr}"
        );
    })
    .await
    .unwrap();
}

#[tokio::test(flavor = "multi_thread")]
async fn test_set_unchanged_value_sends_no_write() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/status.json"))
        .respond_with(ResponseTemplate::new(200).set_body_json(status_body()))
        .mount(&server)
        .await;
    // No PUT mock mounted: a write would 404 and fail the command.

    tokio::task::spawn_blocking(move || {
        glowfly_at(&server)
            .args(["set", "auto", "on"])
            .assert()
            .success()
            .stdout(predicate::str::contains("nothing to do"));
    })
    .await
    .unwrap();
}

#[tokio::test(flavor = "multi_thread")]
async fn test_set_holiday_rejects_names_not_in_the_list() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/status.json"))
        .respond_with(ResponseTemplate::new(200).set_body_json(status_body()))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/config.json"))
        .respond_with(ResponseTemplate::new(200).set_body_json(config_body()))
        .mount(&server)
        .await;

    tokio::task::spawn_blocking(move || {
        let output = glowfly_at(&server)
            .args(["set", "holiday", "Festivus"])
            .output()
            .unwrap();
        assert_eq!(output.status.code(), Some(2));
        let stderr = String::from_utf8_lossy(&output.stderr);
        assert!(stderr.contains("Festivus"), "stderr:\n{stderr}");
    })
    .await
    .unwrap();
}

#[tokio::test(flavor = "multi_thread")]
async fn test_effects_marks_the_current_one() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/config.json"))
        .respond_with(ResponseTemplate::new(200).set_body_json(config_body()))
        .mount(&server)
        .await;

    tokio::task::spawn_blocking(move || {
        glowfly_at(&server)
            .arg("effects")
            .assert()
            .success()
            .stdout(
                predicate::str::contains("FxA1")
                    .and(predicate::str::contains("FxC2"))
                    .and(predicate::str::contains("*")),
            );
    })
    .await
    .unwrap();
}

#[tokio::test(flavor = "multi_thread")]
async fn test_unreachable_board_exits_with_connection_error() {
    // Point at a closed port; the GET fails at the transport layer.
    let mut cmd = cargo_bin_cmd!("glowfly");
    let output = cmd
        .env("HOME", "/tmp/glowfly-e2e-test-nonexistent")
        .env("XDG_CONFIG_HOME", "/tmp/glowfly-e2e-test-nonexistent")
        .args(["--device", "http://127.0.0.1:9", "status"])
        .output()
        .unwrap();
    assert_eq!(output.status.code(), Some(3), "Expected connection exit");
}
