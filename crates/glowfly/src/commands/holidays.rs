//! `glowfly holidays` -- the selectable holiday color themes.

use tabled::Tabled;

use glowfly_api::DeviceClient;
use glowfly_core::catalog;

use crate::cli::GlobalOpts;
use crate::error::CliError;
use crate::output::{print_output, render_list};

#[derive(Tabled)]
struct HolidayRow {
    #[tabled(rename = "Theme")]
    theme: String,
    #[tabled(rename = "Current")]
    current: String,
}

pub async fn handle(client: &DeviceClient, global: &GlobalOpts) -> Result<(), CliError> {
    let config = client.get_config().await?;

    let rendered = render_list(
        &global.output,
        &config.holiday_list,
        |name| HolidayRow {
            // The "None" sentinel reads as "Automatic" everywhere users
            // see it; the wire value is unchanged.
            theme: catalog::holiday_display_name(name).to_owned(),
            current: if *name == config.holiday {
                "*".into()
            } else {
                String::new()
            },
        },
        std::clone::Clone::clone,
    );
    print_output(&rendered, global.quiet);
    Ok(())
}
