//! CLI error types with miette diagnostics.
//!
//! Maps `CoreError` variants into user-facing errors with actionable help
//! text. Diagnostic codes reuse the stable form-error identifiers
//! (`cannot_connect`, `no_device_info`, `invalid_device_type`).

use miette::Diagnostic;
use thiserror::Error;

use shutterbox_core::CoreError;

/// Exit codes for process termination.
pub mod exit_code {
    pub const GENERAL: i32 = 1;
    pub const USAGE: i32 = 2;
    pub const NOT_FOUND: i32 = 4;
    pub const CONFLICT: i32 = 6;
    pub const CONNECTION: i32 = 7;
}

#[derive(Debug, Error, Diagnostic)]
pub enum CliError {
    // ── Device validation ────────────────────────────────────────────
    #[error("Could not connect to device: {reason}")]
    #[diagnostic(
        code(shutterbox::cannot_connect),
        help(
            "Check that the device is powered and reachable on your network.\n\
             Try: shutterbox status --host <ip>"
        )
    )]
    CannotConnect { reason: String },

    #[error("Device responded but returned no device info")]
    #[diagnostic(
        code(shutterbox::no_device_info),
        help("The address answers HTTP but does not look like a BleBox device.")
    )]
    NoDeviceInfo,

    #[error("Device identifies as {found:?}, not a shutterBox")]
    #[diagnostic(
        code(shutterbox::invalid_device_type),
        help("This integration only supports the shutterBox product line.")
    )]
    InvalidDeviceType { found: String },

    // ── Runtime ──────────────────────────────────────────────────────
    #[error("State update failed: {reason}")]
    #[diagnostic(code(shutterbox::update_failed))]
    UpdateFailed { reason: String },

    // ── Profiles ─────────────────────────────────────────────────────
    #[error("Device profile '{name}' not found")]
    #[diagnostic(
        code(shutterbox::profile_not_found),
        help("Run: shutterbox devices list")
    )]
    ProfileNotFound { name: String },

    #[error("No device configured")]
    #[diagnostic(
        code(shutterbox::no_device),
        help(
            "Add one with: shutterbox devices add <name> --host <ip>\n\
             Or pass --host directly."
        )
    )]
    NoDevice,

    #[error("Device already configured as '{existing}' (id {unique_id})")]
    #[diagnostic(
        code(shutterbox::duplicate_device),
        help("Each physical device can only be configured once. Remove the existing profile first.")
    )]
    DuplicateDevice { existing: String, unique_id: String },

    #[error("A profile named '{name}' already exists")]
    #[diagnostic(
        code(shutterbox::profile_exists),
        help("Remove it first with: shutterbox devices remove {name}")
    )]
    ProfileExists { name: String },

    // ── Validation / unknown ─────────────────────────────────────────
    #[error("Invalid value for {field}: {reason}")]
    #[diagnostic(code(shutterbox::validation))]
    Validation { field: String, reason: String },

    #[error("Unexpected failure: {0}")]
    #[diagnostic(code(shutterbox::unknown))]
    Unknown(String),

    // ── Config persistence ───────────────────────────────────────────
    #[error(transparent)]
    #[diagnostic(code(shutterbox::config))]
    Config(Box<figment::Error>),

    #[error("Failed to write config: {0}")]
    #[diagnostic(code(shutterbox::config))]
    ConfigWrite(#[from] toml::ser::Error),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl From<figment::Error> for CliError {
    fn from(err: figment::Error) -> Self {
        Self::Config(Box::new(err))
    }
}

impl CliError {
    /// Map this error to an exit code for process termination.
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::CannotConnect { .. } => exit_code::CONNECTION,
            Self::ProfileNotFound { .. } | Self::NoDevice => exit_code::NOT_FOUND,
            Self::DuplicateDevice { .. } | Self::ProfileExists { .. } => exit_code::CONFLICT,
            Self::Validation { .. } => exit_code::USAGE,
            _ => exit_code::GENERAL,
        }
    }
}

// ── CoreError → CliError mapping ─────────────────────────────────────

impl From<CoreError> for CliError {
    fn from(err: CoreError) -> Self {
        match err {
            CoreError::ConnectionFailed { reason } => CliError::CannotConnect { reason },

            CoreError::NoDeviceInfo => CliError::NoDeviceInfo,

            CoreError::InvalidDeviceType { found } => CliError::InvalidDeviceType { found },

            CoreError::UpdateFailed { reason } => CliError::UpdateFailed { reason },

            CoreError::Config { message } => CliError::Validation {
                field: "device".into(),
                reason: message,
            },

            CoreError::Internal(message) => CliError::Unknown(message),
        }
    }
}
