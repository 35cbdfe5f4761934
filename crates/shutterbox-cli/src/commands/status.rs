//! `shutterbox status` -- one-shot state fetch.

use owo_colors::OwoColorize;

use shutterbox_core::DeviceConfig;

use crate::cli::GlobalOpts;
use crate::error::CliError;

use super::{connect_oneshot, format_state};

pub async fn handle(device: DeviceConfig, global: &GlobalOpts) -> Result<(), CliError> {
    let cover = connect_oneshot(device).await?;

    let info = cover.device_info();
    if !global.quiet {
        println!(
            "{} ({})",
            info.name().bold(),
            cover.unique_id().dimmed()
        );
        if let Some(fw) = info.firmware_version.as_deref() {
            println!("firmware: {fw}");
        }
    }
    println!("{}", format_state(&cover));

    Ok(())
}
