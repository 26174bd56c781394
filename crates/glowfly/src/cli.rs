//! Clap derive structures for the `glowfly` CLI.
//!
//! Defines the command tree, global flags, and shared option enums.

use clap::{Args, Parser, Subcommand, ValueEnum};
use clap_complete::Shell;

// ── Top-Level CLI ────────────────────────────────────────────────────

/// glowfly -- console for LightFx LED pixel boards
#[derive(Debug, Parser)]
#[command(
    name = "glowfly",
    version,
    about = "Inspect and control LightFx pixel boards from the command line",
    long_about = "Talks to the pixel board firmware's HTTP surface: status and task\n\
        telemetry, effect registry, and configuration writes (effect, auto\n\
        mode, holiday theme, brightness, sleep schedule).",
    propagate_version = true,
    subcommand_required = true,
    arg_required_else_help = true
)]
pub struct Cli {
    #[command(flatten)]
    pub global: GlobalOpts,

    #[command(subcommand)]
    pub command: Command,
}

// ── Global Options ───────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct GlobalOpts {
    /// Board base URL (e.g. http://192.168.0.10)
    #[arg(long, short = 'd', env = "GLOWFLY_DEVICE", global = true)]
    pub device: Option<String>,

    /// Named device profile from the config file
    #[arg(long, short = 'p', env = "GLOWFLY_PROFILE", global = true)]
    pub profile: Option<String>,

    /// Output format
    #[arg(
        long,
        short = 'o',
        env = "GLOWFLY_OUTPUT",
        default_value = "table",
        global = true
    )]
    pub output: OutputFormat,

    /// When to use color output
    #[arg(long, default_value = "auto", global = true)]
    pub color: ColorMode,

    /// Request timeout in seconds
    #[arg(long, env = "GLOWFLY_TIMEOUT", default_value = "10", global = true)]
    pub timeout: u64,

    /// Increase verbosity (-v, -vv, -vvv)
    #[arg(long, short = 'v', action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress non-error output
    #[arg(long, short = 'q', global = true)]
    pub quiet: bool,
}

// ── Output & Color Enums ─────────────────────────────────────────────

#[derive(Debug, Clone, ValueEnum)]
pub enum OutputFormat {
    /// Pretty table (default, interactive)
    Table,
    /// Pretty-printed JSON
    Json,
    /// Compact single-line JSON
    JsonCompact,
    /// YAML
    Yaml,
    /// Plain text, one value per line (scripting)
    Plain,
}

#[derive(Debug, Clone, ValueEnum)]
pub enum ColorMode {
    /// Auto-detect (color if terminal is interactive)
    Auto,
    /// Always emit color codes
    Always,
    /// Never emit color codes
    Never,
}

/// On/off argument for the boolean controls.
#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum Switch {
    On,
    Off,
}

impl From<Switch> for bool {
    fn from(s: Switch) -> Self {
        matches!(s, Switch::On)
    }
}

// ── Top-Level Command Enum ───────────────────────────────────────────

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Show the current telemetry snapshot
    #[command(alias = "st")]
    Status,

    /// Show the task runtime table and memory figures
    #[command(alias = "t")]
    Tasks,

    /// Show board identity and build information
    #[command(alias = "i")]
    Info,

    /// List the effect registry
    #[command(alias = "fx")]
    Effects,

    /// List the holiday themes
    Holidays,

    /// Change a board setting
    Set(SetArgs),

    /// Poll the board continuously, like the dashboard pages do
    Watch(WatchArgs),

    /// Manage the glowfly config file
    Config(ConfigArgs),

    /// Generate shell completions
    Completions(CompletionsArgs),
}

// ── set ──────────────────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct SetArgs {
    #[command(subcommand)]
    pub command: SetCommand,
}

#[derive(Debug, Subcommand)]
pub enum SetCommand {
    /// Select an effect by registry index
    Effect {
        /// Registry index of the effect
        index: u16,
    },

    /// Enable or disable the automatic effects loop
    Auto { state: Switch },

    /// Select a holiday theme ("None" selects automatic)
    Holiday {
        /// Theme name from `glowfly holidays`
        name: String,
    },

    /// Set brightness as a percentage
    Brightness {
        /// Perceptual brightness, 0-100
        #[arg(value_parser = clap::value_parser!(u8).range(0..=100))]
        percent: u8,
    },

    /// Enable or disable the sleep schedule
    Sleep { state: Switch },
}

// ── watch ────────────────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct WatchArgs {
    /// Only watch one surface
    #[arg(long, value_enum)]
    pub only: Option<WatchSurface>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum WatchSurface {
    Status,
    Tasks,
}

// ── config ───────────────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub command: ConfigCommand,
}

#[derive(Debug, Subcommand)]
pub enum ConfigCommand {
    /// Write a starter config file
    Init {
        /// Overwrite an existing file
        #[arg(long)]
        force: bool,
    },

    /// Print the resolved configuration
    Show,

    /// Print the config file path
    Path,
}

// ── completions ──────────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct CompletionsArgs {
    /// Shell to generate completions for
    pub shell: Shell,
}
