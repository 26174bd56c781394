//! `glowfly info` -- board identity and build metadata from the
//! one-shot configuration payload.

use std::fmt::Write as _;

use owo_colors::OwoColorize;

use glowfly_api::{DeviceClient, DeviceConfig};

use crate::cli::GlobalOpts;
use crate::error::CliError;
use crate::output::{print_output, render_report, should_color};

pub async fn handle(client: &DeviceClient, global: &GlobalOpts) -> Result<(), CliError> {
    let config = client.get_config().await?;

    let color = should_color(&global.color);
    let rendered = render_report(
        &global.output,
        &config,
        || detail(&config, color),
        || config.board_name.clone(),
    );
    print_output(&rendered, global.quiet);
    Ok(())
}

fn detail(config: &DeviceConfig, color: bool) -> String {
    let mut out = String::new();

    let _ = writeln!(out, "Board:       {}", config.board_name);
    let _ = writeln!(out, "UID:         {}", config.board_uid);
    let _ = writeln!(out, "MAC:         {}", config.mac);
    let _ = writeln!(
        out,
        "Firmware:    {} [{}]",
        config.fw_version, config.fw_branch
    );
    let _ = writeln!(out, "Built:       {}", config.build_time);

    let boot = if config.clean_boot {
        "clean".to_owned()
    } else if color {
        "watchdog".red().to_string()
    } else {
        "watchdog".to_owned()
    };
    let _ = writeln!(out, "Last boot:   {boot}");
    let _ = writeln!(
        out,
        "WDT reboots: {}",
        config.watchdog_reboots_count
    );
    if let Some(ref last) = config.last_watchdog_reboot {
        let _ = writeln!(out, "Last WDT:    {last}");
    }
    let _ = write!(
        out,
        "Effects:     {} registered, current {} [{}]",
        config.fx.len(),
        config.cur_effect_name,
        config.cur_effect
    );

    out
}
