//! Config file handling for the CLI.
//!
//! TOML device profiles merged with environment overrides, plus the
//! resolution step that turns CLI flags + config into a connection target.

use std::collections::HashMap;
use std::path::PathBuf;
use std::time::Duration;

use directories::ProjectDirs;
use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use glowfly_api::TransportConfig;
use serde::{Deserialize, Serialize};
use url::Url;

use crate::cli::GlobalOpts;
use crate::error::CliError;

// ── TOML config structs ─────────────────────────────────────────────

/// Top-level TOML configuration.
#[derive(Debug, Default, Deserialize, Serialize)]
pub struct Config {
    /// Device profile used when no --device / --profile is given.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub default_device: Option<String>,

    /// Global defaults.
    #[serde(default)]
    pub defaults: Defaults,

    /// Named device profiles.
    #[serde(default)]
    pub devices: HashMap<String, DeviceProfile>,
}

#[derive(Debug, Deserialize, Serialize)]
pub struct Defaults {
    #[serde(default = "default_timeout")]
    pub timeout: u64,
}

impl Default for Defaults {
    fn default() -> Self {
        Self {
            timeout: default_timeout(),
        }
    }
}

fn default_timeout() -> u64 {
    10
}

/// A named pixel board.
#[derive(Debug, Deserialize, Serialize)]
pub struct DeviceProfile {
    /// Board base URL (e.g., "http://192.168.0.10").
    pub url: String,

    /// Override request timeout in seconds.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub timeout: Option<u64>,
}

// ── Config file path ────────────────────────────────────────────────

/// Resolve the config file path via XDG / platform conventions.
pub fn config_path() -> PathBuf {
    ProjectDirs::from("io", "glowfly", "glowfly").map_or_else(
        || {
            let mut p = dirs_fallback();
            p.push("config.toml");
            p
        },
        |dirs| dirs.config_dir().join("config.toml"),
    )
}

fn dirs_fallback() -> PathBuf {
    let mut p = PathBuf::from(std::env::var("HOME").unwrap_or_else(|_| ".".into()));
    p.push(".config");
    p.push("glowfly");
    p
}

// ── Config loading ──────────────────────────────────────────────────

/// Load the full Config from file + environment.
pub fn load_config() -> Result<Config, CliError> {
    let figment = Figment::new()
        .merge(Serialized::defaults(Config::default()))
        .merge(Toml::file(config_path()))
        .merge(Env::prefixed("GLOWFLY_CFG_").split("_"));

    figment.extract().map_err(CliError::Config)
}

/// Load config, returning a default if the file doesn't exist.
pub fn load_config_or_default() -> Config {
    load_config().unwrap_or_default()
}

// ── Config saving ───────────────────────────────────────────────────

const STARTER_CONFIG: &str = r#"# glowfly configuration
#
# default_device = "livingroom"
#
# [devices.livingroom]
# url = "http://192.168.0.10"
# timeout = 10
"#;

/// Write a starter config file to the canonical path.
pub fn init_config(force: bool) -> Result<PathBuf, CliError> {
    let path = config_path();
    if path.exists() && !force {
        return Err(CliError::ConfigExists(path.display().to_string()));
    }
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    std::fs::write(&path, STARTER_CONFIG)?;
    Ok(path)
}

// ── Target resolution ───────────────────────────────────────────────

/// A fully resolved connection target.
#[derive(Debug)]
pub struct Target {
    pub url: Url,
    pub transport: TransportConfig,
}

/// Resolve the board to talk to: `--device` wins, then `--profile`,
/// then the config file's `default_device`.
pub fn resolve_target(opts: &GlobalOpts, config: &Config) -> Result<Target, CliError> {
    let (raw_url, profile_timeout) = if let Some(ref device) = opts.device {
        (device.clone(), None)
    } else {
        let name = opts
            .profile
            .clone()
            .or_else(|| config.default_device.clone())
            .ok_or(CliError::NoDevice)?;
        let profile = config
            .devices
            .get(&name)
            .ok_or_else(|| CliError::UnknownProfile(name))?;
        (profile.url.clone(), profile.timeout)
    };

    let url: Url = raw_url.parse().map_err(|source| CliError::InvalidUrl {
        url: raw_url.clone(),
        source,
    })?;

    let timeout_secs = if opts.timeout != default_timeout() {
        opts.timeout
    } else {
        profile_timeout.unwrap_or(config.defaults.timeout)
    };

    Ok(Target {
        url,
        transport: TransportConfig {
            timeout: Duration::from_secs(timeout_secs),
        },
    })
}
