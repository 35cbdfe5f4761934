//! Movement commands: open, close, stop, position, tilt.

use shutterbox_core::DeviceConfig;

use crate::cli::{Command, GlobalOpts, TiltArgs};
use crate::error::CliError;

use super::{connect_oneshot, format_state};

pub async fn handle(
    cmd: Command,
    device: DeviceConfig,
    global: &GlobalOpts,
) -> Result<(), CliError> {
    let cover = connect_oneshot(device).await?;

    match cmd {
        Command::Open => cover.open().await?,
        Command::Close => cover.close().await?,
        Command::Stop => cover.stop().await?,
        Command::Position { position } => cover.set_position(position).await?,
        Command::Tilt(args) => tilt(&cover, args).await?,
        _ => unreachable!(),
    }

    // The command response carries the settled state inline.
    if !global.quiet {
        println!("{}", format_state(&cover));
    }
    Ok(())
}

async fn tilt(cover: &shutterbox_core::Cover, args: TiltArgs) -> Result<(), CliError> {
    if args.open {
        cover.open_tilt().await?;
    } else if args.close {
        cover.close_tilt().await?;
    } else if let Some(position) = args.position {
        cover.set_tilt_position(position).await?;
    }
    Ok(())
}
