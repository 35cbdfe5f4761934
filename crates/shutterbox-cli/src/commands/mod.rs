//! Command dispatch: bridges CLI args -> cover entity calls -> output.

pub mod control;
pub mod devices;
pub mod status;
pub mod watch;

use std::time::Duration;

use owo_colors::OwoColorize;

use shutterbox_core::{Cover, CoverMotion, DeviceConfig};

use crate::cli::{Command, GlobalOpts};
use crate::error::CliError;

/// Dispatch a device-bound command to the appropriate handler.
pub async fn dispatch(
    cmd: Command,
    device: DeviceConfig,
    global: &GlobalOpts,
) -> Result<(), CliError> {
    match cmd {
        Command::Status => status::handle(device, global).await,
        Command::Open
        | Command::Close
        | Command::Stop
        | Command::Position { .. }
        | Command::Tilt(_) => control::handle(cmd, device, global).await,
        Command::Watch { interval } => watch::handle(device, interval, global).await,
        // Devices and Completions are handled before dispatch
        Command::Devices(_) | Command::Completions { .. } => unreachable!(),
    }
}

/// Connect for a single request-response cycle: background polling off.
pub(crate) async fn connect_oneshot(device: DeviceConfig) -> Result<Cover, CliError> {
    let device = device.with_poll_interval(Duration::ZERO);
    Ok(Cover::connect(device).await?)
}

/// Render the cover's derived state on one line.
pub(crate) fn format_state(cover: &Cover) -> String {
    let motion = cover.motion();
    let motion = match motion {
        CoverMotion::Open | CoverMotion::Opening => motion.green().to_string(),
        CoverMotion::Closed | CoverMotion::Closing => motion.yellow().to_string(),
        CoverMotion::Unknown => motion.dimmed().to_string(),
    };

    let position = cover
        .position()
        .map_or_else(|| "unknown".into(), |p| format!("{p}% open"));
    let tilt = cover
        .tilt_position()
        .map_or_else(|| "unknown".into(), |t| format!("{t}%"));

    format!("{motion}  position: {position}  tilt: {tilt}")
}
