//! Device profile management: the config/options flow of this tool.
//!
//! `add` performs the same validation a setup form would: reach the
//! device, check it is actually a shutterBox, then persist `{host, port}`
//! keyed by a stable unique id so the same physical device cannot be
//! configured twice.

use std::time::Duration;

use owo_colors::OwoColorize;
use tabled::settings::Style;
use tabled::{Table, Tabled};

use shutterbox_core::setup;

use crate::cli::{DevicesArgs, DevicesCommand, GlobalOpts};
use crate::config::{self, DeviceProfile};
use crate::error::CliError;

pub async fn handle(args: DevicesArgs, global: &GlobalOpts) -> Result<(), CliError> {
    match args.command {
        DevicesCommand::Add { name } => add(name, global).await,
        DevicesCommand::Remove { name } => remove(&name, global),
        DevicesCommand::List => list(),
    }
}

async fn add(name: String, global: &GlobalOpts) -> Result<(), CliError> {
    let Some(host) = global.host.clone() else {
        return Err(CliError::Validation {
            field: "host".into(),
            reason: "required: shutterbox devices add <name> --host <ip>".into(),
        });
    };
    let port = global.port.unwrap_or(shutterbox_core::config::DEFAULT_PORT);

    let mut cfg = config::load_config()?;

    if cfg.devices.contains_key(&name) {
        return Err(CliError::ProfileExists { name });
    }

    // Validate reachability and identity before persisting anything.
    let timeout = Duration::from_secs(global.timeout);
    let info = setup::validate_device(&host, port, timeout).await?;
    let unique_id = setup::unique_id(&info, &host);

    if let Some((existing, _)) = cfg
        .devices
        .iter()
        .find(|(_, profile)| profile.unique_id.as_deref() == Some(unique_id.as_str()))
    {
        return Err(CliError::DuplicateDevice {
            existing: existing.clone(),
            unique_id,
        });
    }

    cfg.devices.insert(
        name.clone(),
        DeviceProfile {
            host,
            port,
            unique_id: Some(unique_id),
            device_name: info.device_name.clone(),
        },
    );
    if cfg.default_device.is_none() {
        cfg.default_device = Some(name.clone());
    }
    config::save_config(&cfg)?;

    if !global.quiet {
        eprintln!("Added '{name}' ({})", info.name());
    }
    Ok(())
}

fn remove(name: &str, global: &GlobalOpts) -> Result<(), CliError> {
    let mut cfg = config::load_config()?;

    if cfg.devices.remove(name).is_none() {
        return Err(CliError::ProfileNotFound { name: name.into() });
    }
    if cfg.default_device.as_deref() == Some(name) {
        cfg.default_device = cfg.devices.keys().next().cloned();
    }
    config::save_config(&cfg)?;

    if !global.quiet {
        eprintln!("Removed '{name}'");
    }
    Ok(())
}

#[derive(Tabled)]
struct DeviceRow {
    #[tabled(rename = "NAME")]
    name: String,
    #[tabled(rename = "HOST")]
    host: String,
    #[tabled(rename = "PORT")]
    port: u16,
    #[tabled(rename = "DEVICE")]
    device: String,
    #[tabled(rename = "ID")]
    id: String,
}

fn list() -> Result<(), CliError> {
    let cfg = config::load_config()?;

    if cfg.devices.is_empty() {
        println!("No devices configured. Add one with: shutterbox devices add <name> --host <ip>");
        return Ok(());
    }

    let default = cfg.default_device.as_deref();
    let rows: Vec<DeviceRow> = cfg
        .devices
        .iter()
        .map(|(name, profile)| DeviceRow {
            name: if default == Some(name.as_str()) {
                format!("{name} {}", "(default)".dimmed())
            } else {
                name.clone()
            },
            host: profile.host.clone(),
            port: profile.port,
            device: profile.device_name.clone().unwrap_or_default(),
            id: profile.unique_id.clone().unwrap_or_default(),
        })
        .collect();

    let mut table = Table::new(rows);
    table.with(Style::blank());
    println!("{table}");
    Ok(())
}
