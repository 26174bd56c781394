//! Config subcommand handlers.

use crate::cli::{ConfigArgs, ConfigCommand, GlobalOpts};
use crate::config;
use crate::error::CliError;
use crate::output::{print_output, render_report};

pub fn handle(args: ConfigArgs, global: &GlobalOpts) -> Result<(), CliError> {
    match args.command {
        ConfigCommand::Init { force } => {
            let path = config::init_config(force)?;
            if !global.quiet {
                println!("wrote starter config to {}", path.display());
            }
            Ok(())
        }

        ConfigCommand::Show => {
            let cfg = config::load_config()?;
            let rendered = render_report(
                &global.output,
                &cfg,
                || toml::to_string_pretty(&cfg).unwrap_or_default(),
                || cfg.devices.keys().cloned().collect::<Vec<_>>().join("\n"),
            );
            print_output(&rendered, global.quiet);
            Ok(())
        }

        ConfigCommand::Path => {
            println!("{}", config::config_path().display());
            Ok(())
        }
    }
}
