//! Command dispatch: bridges CLI args -> device client -> output formatting.

pub mod config_cmd;
pub mod effects;
pub mod holidays;
pub mod info;
pub mod set;
pub mod status;
pub mod tasks;
pub mod watch;

use glowfly_api::DeviceClient;

use crate::cli::{Command, GlobalOpts};
use crate::error::CliError;

/// Dispatch a device-bound command to the appropriate handler.
pub async fn dispatch(
    cmd: Command,
    client: &DeviceClient,
    global: &GlobalOpts,
) -> Result<(), CliError> {
    match cmd {
        Command::Status => status::handle(client, global).await,
        Command::Tasks => tasks::handle(client, global).await,
        Command::Info => info::handle(client, global).await,
        Command::Effects => effects::handle(client, global).await,
        Command::Holidays => holidays::handle(client, global).await,
        Command::Set(args) => set::handle(client, args, global).await,
        Command::Watch(args) => watch::handle(client, args, global).await,
        // Config and Completions are handled before dispatch
        Command::Config(_) | Command::Completions(_) => unreachable!(),
    }
}
