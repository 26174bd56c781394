//! `glowfly status` -- one telemetry snapshot, rendered like the
//! dashboard's status page plus the audio diagnostics.

use std::fmt::Write as _;

use owo_colors::OwoColorize;

use glowfly_api::{DeviceClient, DeviceStatus};
use glowfly_core::{catalog, units};

use crate::cli::GlobalOpts;
use crate::error::CliError;
use crate::output::{print_output, render_report, should_color};

/// Bucket width of the firmware's audio-level histogram.
const AUDIO_BUCKET_WIDTH: u32 = 10;

pub async fn handle(client: &DeviceClient, global: &GlobalOpts) -> Result<(), CliError> {
    // The effect registry enriches the current-effect line; its absence
    // only degrades the label, never the command.
    let config = client.get_config().await.ok();
    let status = client.get_status().await?;

    let color = should_color(&global.color);
    let rendered = render_report(
        &global.output,
        &status,
        || detail(&status, config.as_ref(), color),
        || format!("{} [{}]", status.fx.name, status.fx.index),
    );
    print_output(&rendered, global.quiet);
    Ok(())
}

pub(crate) fn detail(
    status: &DeviceStatus,
    config: Option<&glowfly_api::DeviceConfig>,
    color: bool,
) -> String {
    let mut out = String::new();

    let healthy = status.overall_status.eq_ignore_ascii_case("ok");
    let overall = if color && !healthy {
        status.overall_status.red().to_string()
    } else if color {
        status.overall_status.green().to_string()
    } else {
        status.overall_status.clone()
    };
    let _ = writeln!(out, "Overall:      {overall}");
    let _ = writeln!(out, "Uptime:       {}", format_uptime(status.up_time));
    let _ = writeln!(
        out,
        "Board temp:   {:.1} °C ({:.1} °F)  [min {:.1}, max {:.1}]",
        status.board_temp,
        units::celsius_to_fahrenheit(status.board_temp),
        status.board_min_temp,
        status.board_max_temp
    );
    let _ = writeln!(out, "Chip temp:    {:.1} °C", status.chip_temp);
    let _ = writeln!(
        out,
        "Vcc:          {:.2} V  [min {:.2}, max {:.2}]",
        status.vcc, status.min_vcc, status.max_vcc
    );

    let _ = writeln!(out, "\nWiFi");
    let _ = writeln!(out, "  IP:         {}", status.wifi.ip);
    let _ = writeln!(
        out,
        "  Signal:     {} bars ({} dBm)",
        status.wifi.bars, status.wifi.rssi
    );

    let _ = writeln!(out, "\nEffects");
    let _ = writeln!(out, "  Total:      {} effects", status.fx.count);
    let description =
        catalog::describe_effect(config, status.fx.index).unwrap_or(catalog::UNKNOWN_EFFECT);
    let _ = writeln!(
        out,
        "  Current:    {} [{}] - {}",
        status.fx.name, status.fx.index, description
    );
    let _ = writeln!(
        out,
        "  Colors:     {}",
        catalog::holiday_display_name(&status.fx.holiday)
    );
    let _ = writeln!(out, "  Auto loop:  {}", status.fx.auto);
    let brightness = units::brightness_raw_to_percent(status.fx.brightness);
    let locked = if status.fx.brightness_locked {
        " (locked)"
    } else {
        ""
    };
    let _ = writeln!(out, "  Brightness: {brightness}%{locked}");
    let _ = writeln!(out, "  Sleep:      {}", status.fx.sleep_enabled);
    let _ = writeln!(out, "  Asleep:     {}", status.fx.asleep);

    let _ = writeln!(out, "\nTime");
    let _ = writeln!(out, "  NTP synced: {}", status.time.is_ntp_synced());
    let _ = writeln!(
        out,
        "  Current:    {} {}",
        status.time.date, status.time.time
    );
    let _ = writeln!(out, "  Holiday:    {}", status.time.holiday);
    let _ = writeln!(
        out,
        "  Drift:      last {} ms, avg {} ms/h (total {} ms over {} syncs)",
        status.time.last_drift,
        status.time.average_drift,
        status.time.total_drift,
        status.time.sync_size
    );
    for alarm in &status.time.alarms {
        let _ = writeln!(out, "  Alarm:      {} ({})", alarm.time_fmt, alarm.alarm_type);
    }

    if !status.fx.audio_hist.is_empty() {
        let _ = writeln!(
            out,
            "\nAudio  ({} bumps, threshold {})",
            status.fx.total_audio_bumps, status.fx.audio_threshold
        );
        out.push_str(&histogram(
            u32::from(status.fx.audio_threshold),
            &status.fx.audio_hist,
        ));
    }

    out
}

/// Text rendering of the audio-level histogram, one bucket per line.
fn histogram(threshold_base: u32, buckets: &[u32]) -> String {
    let max = buckets.iter().copied().max().unwrap_or(0).max(1);
    let mut out = String::new();
    for (i, &count) in buckets.iter().enumerate() {
        let is_last = i + 1 == buckets.len();
        let index = u32::try_from(i).unwrap_or(u32::MAX);
        let label = units::histogram_label(threshold_base, index, AUDIO_BUCKET_WIDTH, is_last);
        let bar_len = usize::try_from(u64::from(count) * 40 / u64::from(max)).unwrap_or(40);
        let _ = writeln!(out, "  {label:>6} | {:<40} {count}", "#".repeat(bar_len));
    }
    out
}

/// Uptime seconds as `Nd HH:MM:SS`.
fn format_uptime(seconds: u64) -> String {
    let days = seconds / 86_400;
    let hours = (seconds % 86_400) / 3600;
    let minutes = (seconds % 3600) / 60;
    let secs = seconds % 60;
    if days > 0 {
        format!("{days}d {hours:02}:{minutes:02}:{secs:02}")
    } else {
        format!("{hours:02}:{minutes:02}:{secs:02}")
    }
}
