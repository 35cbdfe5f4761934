// ── Core error types ──
//
// User-facing errors from shutterbox-core. Consumers never see reqwest
// or serde failures directly; the `From<shutterbox_api::Error>` impl
// translates transport-layer errors into domain-appropriate variants
// while preserving the stable form-error key for setup flows.

use thiserror::Error;

/// Unified error type for the core crate.
#[derive(Debug, Error)]
pub enum CoreError {
    // ── Setup / connection errors ────────────────────────────────────
    #[error("Cannot connect to device: {reason}")]
    ConnectionFailed { reason: String },

    #[error("Device returned no device info")]
    NoDeviceInfo,

    #[error("Device is not a shutterBox (reports {found:?})")]
    InvalidDeviceType { found: String },

    // ── Runtime errors ───────────────────────────────────────────────
    /// A periodic or on-demand state refresh failed. Non-fatal: the
    /// last-good cached state is retained.
    #[error("State update failed: {reason}")]
    UpdateFailed { reason: String },

    // ── Configuration errors ─────────────────────────────────────────
    #[error("Configuration error: {message}")]
    Config { message: String },

    // ── Internal errors ──────────────────────────────────────────────
    #[error("Internal error: {0}")]
    Internal(String),
}

impl CoreError {
    /// Stable field-error key for setup forms.
    ///
    /// Matches the identifiers carried by `shutterbox_api::Error`:
    /// `cannot_connect`, `no_device_info`, `invalid_device_type`, with
    /// everything else collapsing to `unknown`.
    pub fn form_error_key(&self) -> &'static str {
        match self {
            Self::ConnectionFailed { .. } => "cannot_connect",
            Self::NoDeviceInfo => "no_device_info",
            Self::InvalidDeviceType { .. } => "invalid_device_type",
            Self::UpdateFailed { .. } | Self::Config { .. } | Self::Internal(_) => "unknown",
        }
    }
}

// ── Conversion from transport-layer errors ───────────────────────────

impl From<shutterbox_api::Error> for CoreError {
    fn from(err: shutterbox_api::Error) -> Self {
        match err {
            shutterbox_api::Error::CannotConnect(e) => CoreError::ConnectionFailed {
                reason: e.to_string(),
            },
            shutterbox_api::Error::NoDeviceInfo => CoreError::NoDeviceInfo,
            shutterbox_api::Error::InvalidDeviceType { found } => {
                CoreError::InvalidDeviceType { found }
            }
            shutterbox_api::Error::InvalidUrl(e) => CoreError::Config {
                message: format!("invalid device address: {e}"),
            },
            shutterbox_api::Error::Deserialization { message, body: _ } => {
                CoreError::Internal(format!("Deserialization error: {message}"))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::CoreError;

    #[test]
    fn form_error_keys_match_setup_identifiers() {
        let err = CoreError::from(shutterbox_api::Error::NoDeviceInfo);
        assert_eq!(err.form_error_key(), "no_device_info");

        let err = CoreError::from(shutterbox_api::Error::InvalidDeviceType {
            found: "switchBox".into(),
        });
        assert_eq!(err.form_error_key(), "invalid_device_type");

        let err = CoreError::Internal("boom".into());
        assert_eq!(err.form_error_key(), "unknown");
    }
}
