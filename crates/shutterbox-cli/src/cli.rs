//! Argument definitions for the `shutterbox` binary.

use clap::{Args, Parser, Subcommand};
use clap_complete::Shell;

#[derive(Debug, Parser)]
#[command(
    name = "shutterbox",
    version,
    about = "Control BleBox shutterBox roller shutters with tilt from the command line"
)]
pub struct Cli {
    #[command(flatten)]
    pub global: GlobalOpts,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Args)]
pub struct GlobalOpts {
    /// Named device profile from the config file
    #[arg(short, long, global = true, env = "SHUTTERBOX_DEVICE")]
    pub device: Option<String>,

    /// Device IP address or hostname (bypasses profiles)
    #[arg(long, global = true, env = "SHUTTERBOX_HOST")]
    pub host: Option<String>,

    /// Device HTTP port
    #[arg(long, global = true, env = "SHUTTERBOX_PORT")]
    pub port: Option<u16>,

    /// Per-request timeout in seconds
    #[arg(long, global = true, default_value_t = 10)]
    pub timeout: u64,

    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Suppress non-essential output
    #[arg(short, long, global = true)]
    pub quiet: bool,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Show the current cover state
    Status,

    /// Open the cover
    Open,

    /// Close the cover
    Close,

    /// Stop cover movement
    Stop,

    /// Move the cover to a position (percent open)
    Position {
        #[arg(value_parser = clap::value_parser!(u8).range(0..=100))]
        position: u8,
    },

    /// Control the slat tilt
    Tilt(TiltArgs),

    /// Poll the device and print state changes as they happen
    Watch {
        /// Poll interval in seconds
        #[arg(long, default_value_t = 30)]
        interval: u64,
    },

    /// Manage configured device profiles
    Devices(DevicesArgs),

    /// Generate shell completions
    Completions {
        #[arg(value_enum)]
        shell: Shell,
    },
}

#[derive(Debug, Args)]
pub struct TiltArgs {
    /// Tilt position 0-100
    #[arg(
        value_parser = clap::value_parser!(u8).range(0..=100),
        required_unless_present_any = ["open", "close"]
    )]
    pub position: Option<u8>,

    /// Fully open the tilt
    #[arg(long, conflicts_with = "position")]
    pub open: bool,

    /// Fully close the tilt
    #[arg(long, conflicts_with_all = ["position", "open"])]
    pub close: bool,
}

#[derive(Debug, Args)]
pub struct DevicesArgs {
    #[command(subcommand)]
    pub command: DevicesCommand,
}

#[derive(Debug, Subcommand)]
pub enum DevicesCommand {
    /// Validate a device and save it as a named profile
    ///
    /// The device address comes from the global --host/--port flags:
    /// shutterbox devices add bedroom --host 192.168.1.50
    Add {
        /// Profile name
        name: String,
    },

    /// Remove a device profile
    Remove {
        /// Profile name
        name: String,
    },

    /// List configured devices
    List,
}
