//! `glowfly effects` -- the board's effect registry.

use tabled::Tabled;

use glowfly_api::DeviceClient;
use glowfly_core::units;

use crate::cli::GlobalOpts;
use crate::error::CliError;
use crate::output::{print_output, render_list};

/// Column width descriptions are truncated to in table output.
const DESCRIPTION_WIDTH: usize = 60;

#[derive(Tabled)]
struct EffectRow {
    #[tabled(rename = "Index")]
    index: u16,
    #[tabled(rename = "Name")]
    name: String,
    #[tabled(rename = "Description")]
    description: String,
    #[tabled(rename = "Current")]
    current: String,
}

pub async fn handle(client: &DeviceClient, global: &GlobalOpts) -> Result<(), CliError> {
    let config = client.get_config().await?;
    let current = config.cur_effect;

    let rendered = render_list(
        &global.output,
        &config.fx,
        |e| EffectRow {
            index: e.registry_index,
            name: e.name.clone(),
            description: units::truncate(&e.description, DESCRIPTION_WIDTH),
            current: if e.registry_index == current {
                "*".into()
            } else {
                String::new()
            },
        },
        |e| format!("{} {}", e.registry_index, e.name),
    );
    print_output(&rendered, global.quiet);
    Ok(())
}
