//! `glowfly set` -- single-field configuration writes.
//!
//! Each invocation seeds the dispatcher from a fresh status snapshot,
//! so unchanged-value no-ops and rollbacks work exactly as they do in
//! a long-lived session.

use owo_colors::OwoColorize;

use glowfly_api::DeviceClient;
use glowfly_core::{catalog, BannerSeverity, Dispatcher, StatusBanner, UpdateOutcome};

use crate::cli::{GlobalOpts, SetArgs, SetCommand};
use crate::error::CliError;
use crate::output::should_color;

pub async fn handle(
    client: &DeviceClient,
    args: SetArgs,
    global: &GlobalOpts,
) -> Result<(), CliError> {
    let banner = StatusBanner::new();
    let dispatcher = Dispatcher::new(client.clone(), banner.clone());

    // Seed last-confirmed values so an unchanged write is a no-op.
    let status = client.get_status().await?;
    dispatcher.seed_from_status(&status).await;

    let (control, outcome) = match args.command {
        SetCommand::Effect { index } => {
            let config = client.get_config().await?;
            if catalog::find_effect(&config, index).is_none() {
                return Err(CliError::UnknownEffect(index));
            }
            ("effect", dispatcher.set_effect(index).await)
        }
        SetCommand::Auto { state } => ("auto", dispatcher.set_auto(state.into()).await),
        SetCommand::Holiday { name } => {
            let config = client.get_config().await?;
            if !config.holiday_list.iter().any(|h| h == &name) {
                return Err(CliError::UnknownHoliday(name));
            }
            ("holiday", dispatcher.set_holiday(&name).await)
        }
        SetCommand::Brightness { percent } => (
            "brightness",
            dispatcher.set_brightness_percent(percent).await,
        ),
        SetCommand::Sleep { state } => ("sleep", dispatcher.set_sleep_enabled(state.into()).await),
    };

    report(control, &outcome, &banner, global)
}

/// Print the banner the way the dashboard would show it, and turn a
/// rollback into a failing exit.
fn report(
    control: &str,
    outcome: &UpdateOutcome,
    banner: &StatusBanner,
    global: &GlobalOpts,
) -> Result<(), CliError> {
    match outcome {
        UpdateOutcome::Unchanged => {
            if !global.quiet {
                println!("{control} already set; nothing to do");
            }
            Ok(())
        }
        UpdateOutcome::Confirmed { .. } => {
            if let Some(msg) = banner.current() {
                if !global.quiet {
                    if should_color(&global.color) && msg.severity == BannerSeverity::Success {
                        println!("{}", msg.text.green());
                    } else {
                        println!("{}", msg.text);
                    }
                }
            }
            Ok(())
        }
        UpdateOutcome::RolledBack { display: restored } => {
            let detail = banner
                .current()
                .map_or_else(String::new, |msg| msg.text);
            tracing::debug!(?restored, "control rolled back");
            Err(CliError::UpdateFailed {
                control: control.to_owned(),
                detail,
            })
        }
    }
}
