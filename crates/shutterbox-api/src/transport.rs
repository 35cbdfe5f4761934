// Shared transport configuration for building reqwest::Client instances.
//
// The device speaks plain HTTP on the local network, so there is no TLS
// knob here -- only the per-request timeout. One built client is shared
// per configured device and reused across all calls.

use std::time::Duration;

use crate::error::Error;

/// Per-request timeout for all device calls.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

/// Transport configuration for building HTTP clients.
#[derive(Debug, Clone)]
pub struct TransportConfig {
    pub timeout: Duration,
}

impl Default for TransportConfig {
    fn default() -> Self {
        Self {
            timeout: DEFAULT_TIMEOUT,
        }
    }
}

impl TransportConfig {
    /// Override the per-request timeout.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Build a `reqwest::Client` from this config.
    pub fn build_client(&self) -> Result<reqwest::Client, Error> {
        reqwest::Client::builder()
            .timeout(self.timeout)
            .user_agent(concat!("shutterbox-rs/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(Error::CannotConnect)
    }
}
