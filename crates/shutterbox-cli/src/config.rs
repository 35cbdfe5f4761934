//! Device profile persistence and resolution.
//!
//! TOML profiles under the user config dir (figment: defaults + file +
//! `SHUTTERBOX_CFG_*` env overrides), translated to
//! `shutterbox_core::DeviceConfig`. `SHUTTERBOX_CONFIG` points at an
//! alternate config file, which also keeps tests away from the real one.

use std::collections::BTreeMap;
use std::path::PathBuf;
use std::time::Duration;

use directories::ProjectDirs;
use figment::{
    providers::{Env, Format, Serialized, Toml},
    Figment,
};
use serde::{Deserialize, Serialize};

use shutterbox_core::DeviceConfig;

use crate::cli::GlobalOpts;
use crate::error::CliError;

// ── Persisted config ────────────────────────────────────────────────

/// Top-level TOML configuration.
#[derive(Debug, Default, Deserialize, Serialize)]
pub struct Config {
    /// Profile used when `--device` is not given.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub default_device: Option<String>,

    /// Named device profiles.
    #[serde(default)]
    pub devices: BTreeMap<String, DeviceProfile>,
}

/// One configured device: the persisted `{host, port}` pair plus the
/// identity recorded at add time.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct DeviceProfile {
    pub host: String,

    #[serde(default = "default_port")]
    pub port: u16,

    /// Stable device identifier captured during validation; used to
    /// reject configuring the same physical device under two names.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub unique_id: Option<String>,

    /// Device-reported name, for display only.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub device_name: Option<String>,
}

fn default_port() -> u16 {
    shutterbox_core::config::DEFAULT_PORT
}

// ── Load / save ─────────────────────────────────────────────────────

/// Path of the config file: `SHUTTERBOX_CONFIG` override, else the
/// platform config dir.
pub fn config_path() -> PathBuf {
    if let Some(path) = std::env::var_os("SHUTTERBOX_CONFIG") {
        return PathBuf::from(path);
    }
    ProjectDirs::from("", "", "shutterbox")
        .map(|dirs| dirs.config_dir().join("config.toml"))
        .unwrap_or_else(|| PathBuf::from(".shutterbox.toml"))
}

pub fn load_config() -> Result<Config, CliError> {
    let config = Figment::from(Serialized::defaults(Config::default()))
        .merge(Toml::file(config_path()))
        .merge(Env::prefixed("SHUTTERBOX_CFG_"))
        .extract()?;
    Ok(config)
}

pub fn save_config(config: &Config) -> Result<(), CliError> {
    let path = config_path();
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    std::fs::write(&path, toml::to_string_pretty(config)?)?;
    Ok(())
}

// ── Resolution ──────────────────────────────────────────────────────

/// Resolve the target device from CLI flags and saved profiles.
///
/// `--host` bypasses profiles entirely; otherwise `--device`, then the
/// configured default, then a sole configured profile.
pub fn resolve_device(global: &GlobalOpts) -> Result<DeviceConfig, CliError> {
    if let Some(ref host) = global.host {
        let mut config = DeviceConfig::new(host.clone());
        if let Some(port) = global.port {
            config = config.with_port(port);
        }
        config.timeout = Duration::from_secs(global.timeout);
        return Ok(config);
    }

    let config = load_config()?;

    let name = match global.device.clone().or_else(|| config.default_device.clone()) {
        Some(name) => name,
        // A single configured device is unambiguous.
        None if config.devices.len() == 1 => config
            .devices
            .keys()
            .next()
            .cloned()
            .ok_or(CliError::NoDevice)?,
        None => return Err(CliError::NoDevice),
    };

    let profile = config
        .devices
        .get(&name)
        .ok_or(CliError::ProfileNotFound { name })?;

    let mut device = DeviceConfig::new(profile.host.clone()).with_port(profile.port);
    if let Some(port) = global.port {
        device = device.with_port(port);
    }
    device.timeout = Duration::from_secs(global.timeout);
    Ok(device)
}
