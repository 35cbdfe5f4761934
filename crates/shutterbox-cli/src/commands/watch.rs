//! `shutterbox watch` -- long-running poll loop printing state changes.

use std::time::Duration;

use owo_colors::OwoColorize;

use shutterbox_core::{Cover, DeviceConfig};

use crate::cli::GlobalOpts;
use crate::error::CliError;

use super::format_state;

pub async fn handle(
    device: DeviceConfig,
    interval: u64,
    global: &GlobalOpts,
) -> Result<(), CliError> {
    let device = device.with_poll_interval(Duration::from_secs(interval.max(1)));
    let cover = Cover::connect(device).await?;

    if !global.quiet {
        println!(
            "Watching {} every {interval}s, Ctrl-C to stop",
            cover.device_info().name().bold()
        );
    }
    println!("{}", format_state(&cover));

    let mut state_rx = cover.subscribe_state();
    let mut avail_rx = cover.subscribe_availability();

    loop {
        tokio::select! {
            _ = tokio::signal::ctrl_c() => break,
            changed = state_rx.changed() => {
                if changed.is_err() {
                    break;
                }
                println!("{}", format_state(&cover));
            }
            changed = avail_rx.changed() => {
                if changed.is_err() {
                    break;
                }
                if *avail_rx.borrow_and_update() {
                    println!("{}", "device back online".green());
                } else {
                    println!("{}", "device unavailable, keeping last state".red());
                }
            }
        }
    }

    cover.shutdown().await;
    Ok(())
}
