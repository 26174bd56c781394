//! `glowfly watch` -- live session against one board.
//!
//! Runs the monitor the way the dashboard pages do: an immediate poll
//! of each surface, then the fixed cadences. A failed poll prints the
//! error indicator while the last good snapshot stays current.

use owo_colors::OwoColorize;

use glowfly_api::{DeviceClient, DeviceStatus, TaskReport};
use glowfly_core::{Monitor, PollState};

use crate::cli::{GlobalOpts, WatchArgs, WatchSurface};
use crate::commands::{status, tasks};
use crate::error::CliError;
use crate::output::should_color;

pub async fn handle(
    client: &DeviceClient,
    args: WatchArgs,
    global: &GlobalOpts,
) -> Result<(), CliError> {
    let monitor = Monitor::new(client.clone());
    monitor.connect().await;

    let mut status_rx = monitor.subscribe_status();
    let mut tasks_rx = monitor.subscribe_tasks();
    let color = should_color(&global.color);

    loop {
        tokio::select! {
            _ = tokio::signal::ctrl_c() => break,

            changed = status_rx.changed(), if args.only != Some(WatchSurface::Tasks) => {
                if changed.is_err() {
                    break;
                }
                let state = status_rx.borrow_and_update().clone();
                if !global.quiet {
                    print_status(&monitor, &state, color);
                }
            }

            changed = tasks_rx.changed(), if args.only != Some(WatchSurface::Status) => {
                if changed.is_err() {
                    break;
                }
                let state = tasks_rx.borrow_and_update().clone();
                if !global.quiet {
                    print_tasks(&state, color);
                }
            }
        }
    }

    monitor.shutdown().await;
    Ok(())
}

fn print_indicator(surface: &str, error: &str, color: bool) {
    let line = format!("! {surface} poll failed: {error} (showing stale data)");
    if color {
        eprintln!("{}", line.red());
    } else {
        eprintln!("{line}");
    }
}

fn print_status(monitor: &Monitor, state: &PollState<DeviceStatus>, color: bool) {
    if let Some(ref error) = state.error {
        print_indicator("status", error, color);
    }
    if let Some(ref data) = state.data {
        let config = monitor.config();
        println!("── status ──────────────────────────────────────");
        println!("{}", status::detail(data, config.as_deref(), color));
    }
}

fn print_tasks(state: &PollState<TaskReport>, color: bool) {
    if let Some(ref error) = state.error {
        print_indicator("tasks", error, color);
    }
    if let Some(ref data) = state.data {
        println!("── tasks ───────────────────────────────────────");
        println!("{}", tasks::detail(data));
    }
}
