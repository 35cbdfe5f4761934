use thiserror::Error;

/// Top-level error type for the `shutterbox-api` crate.
///
/// A closed set of failure modes for the device's local HTTP API.
/// Each variant maps to a stable message identifier via
/// [`message_id`](Error::message_id) so upper layers can key user-facing
/// text (form errors, diagnostics) without string-matching error output.
#[derive(Debug, Error)]
pub enum Error {
    // ── Transport ───────────────────────────────────────────────────
    /// Could not reach the device: timeout, connection refused, DNS
    /// failure. Any transport-level failure lands here.
    #[error("Cannot connect to device: {0}")]
    CannotConnect(#[source] reqwest::Error),

    /// The endpoint URL could not be constructed.
    #[error("Invalid device URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    // ── Device identity ─────────────────────────────────────────────
    /// The device responded but `/api/device/state` lacked a usable
    /// `device` object.
    #[error("Device returned no device info")]
    NoDeviceInfo,

    /// The device identifies as a different product line.
    #[error("Expected a shutterBox, device identifies as {found:?}")]
    InvalidDeviceType { found: String },

    // ── Data ────────────────────────────────────────────────────────
    /// JSON deserialization failed, with the raw body for debugging.
    #[error("Deserialization error: {message}")]
    Deserialization { message: String, body: String },
}

impl Error {
    /// Stable machine-readable identifier for UI display.
    ///
    /// The three setup-validation failures keep their fixed ids; anything
    /// else reports `unknown`.
    pub fn message_id(&self) -> &'static str {
        match self {
            Self::CannotConnect(_) => "cannot_connect",
            Self::NoDeviceInfo => "no_device_info",
            Self::InvalidDeviceType { .. } => "invalid_device_type",
            Self::InvalidUrl(_) | Self::Deserialization { .. } => "unknown",
        }
    }

    /// Returns `true` if this is a transport failure that may clear up
    /// on the next poll (device rebooting, Wi-Fi blip).
    pub fn is_transient(&self) -> bool {
        matches!(self, Self::CannotConnect(_))
    }
}

impl From<reqwest::Error> for Error {
    fn from(err: reqwest::Error) -> Self {
        Self::CannotConnect(err)
    }
}

#[cfg(test)]
mod tests {
    use super::Error;

    #[test]
    fn message_ids_are_stable() {
        assert_eq!(Error::NoDeviceInfo.message_id(), "no_device_info");
        assert_eq!(
            Error::InvalidDeviceType {
                found: "lightBox".into()
            }
            .message_id(),
            "invalid_device_type"
        );
        assert_eq!(
            Error::Deserialization {
                message: "eof".into(),
                body: String::new()
            }
            .message_id(),
            "unknown"
        );
    }
}
