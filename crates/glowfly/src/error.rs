//! CLI error type with diagnostic output and exit codes.

use miette::Diagnostic;
use thiserror::Error;

#[derive(Debug, Error, Diagnostic)]
pub enum CliError {
    #[error("no device selected")]
    #[diagnostic(
        code(glowfly::no_device),
        help("pass --device <URL>, set GLOWFLY_DEVICE, or add a default_device to the config file")
    )]
    NoDevice,

    #[error("unknown device profile '{0}'")]
    #[diagnostic(
        code(glowfly::unknown_profile),
        help("run `glowfly config show` to list the configured profiles")
    )]
    UnknownProfile(String),

    #[error("invalid device URL '{url}'")]
    #[diagnostic(
        code(glowfly::invalid_url),
        help("the device URL must be absolute, e.g. http://192.168.0.10")
    )]
    InvalidUrl {
        url: String,
        #[source]
        source: url::ParseError,
    },

    #[error("no effect with registry index {0}")]
    #[diagnostic(
        code(glowfly::unknown_effect),
        help("run `glowfly effects` to list the board's registry")
    )]
    UnknownEffect(u16),

    #[error("unknown holiday theme '{0}'")]
    #[diagnostic(
        code(glowfly::unknown_holiday),
        help("run `glowfly holidays` to list the board's themes")
    )]
    UnknownHoliday(String),

    #[error("could not reach the board")]
    #[diagnostic(
        code(glowfly::connection),
        help("check the device URL and that the board is on the network")
    )]
    Connection(#[source] glowfly_api::Error),

    #[error("the board rejected the request")]
    #[diagnostic(code(glowfly::rejected))]
    Rejected(#[source] glowfly_api::Error),

    #[error("{control} update has failed: {detail}")]
    #[diagnostic(
        code(glowfly::update_failed),
        help("the previous setting has been restored")
    )]
    UpdateFailed { control: String, detail: String },

    #[error("configuration error")]
    #[diagnostic(code(glowfly::config))]
    Config(#[source] figment::Error),

    #[error("config file already exists at {0}")]
    #[diagnostic(
        code(glowfly::config_exists),
        help("pass --force to overwrite it")
    )]
    ConfigExists(String),

    #[error(transparent)]
    #[diagnostic(code(glowfly::io))]
    Io(#[from] std::io::Error),
}

impl CliError {
    /// Process exit code for this error.
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::NoDevice
            | Self::UnknownProfile(_)
            | Self::InvalidUrl { .. }
            | Self::UnknownEffect(_)
            | Self::UnknownHoliday(_) => 2,
            Self::Connection(_) => 3,
            Self::Rejected(_) | Self::UpdateFailed { .. } => 4,
            Self::Config(_) | Self::ConfigExists(_) => 5,
            Self::Io(_) => 1,
        }
    }
}

impl From<glowfly_api::Error> for CliError {
    fn from(err: glowfly_api::Error) -> Self {
        if err.is_transient() {
            Self::Connection(err)
        } else {
            Self::Rejected(err)
        }
    }
}
