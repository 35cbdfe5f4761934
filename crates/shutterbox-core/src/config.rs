// ── Runtime connection configuration ──
//
// Describes *how* to reach one shutterBox device. Carries connection
// tuning but never touches disk -- the CLI resolves profiles/env/flags
// into a `DeviceConfig` and hands it in.

use std::time::Duration;

/// Default device HTTP port.
pub const DEFAULT_PORT: u16 = 80;

/// Default background poll interval (matches the firmware's settle time
/// for a full travel; more frequent polling gains nothing).
pub const DEFAULT_POLL_INTERVAL: Duration = Duration::from_secs(30);

/// Configuration for connecting to a single shutterBox device.
///
/// Immutable for the lifetime of a configured instance; reconfiguration
/// replaces the whole client and entity bindings.
#[derive(Debug, Clone)]
pub struct DeviceConfig {
    /// Device IP address or hostname on the local network.
    pub host: String,
    /// Device HTTP port.
    pub port: u16,
    /// Per-request timeout.
    pub timeout: Duration,
    /// Background poll interval. Zero disables background polling.
    pub poll_interval: Duration,
}

impl DeviceConfig {
    /// Config for a device at `host` with default port, timeout, and
    /// poll interval.
    pub fn new(host: impl Into<String>) -> Self {
        Self {
            host: host.into(),
            port: DEFAULT_PORT,
            timeout: shutterbox_api::transport::DEFAULT_TIMEOUT,
            poll_interval: DEFAULT_POLL_INTERVAL,
        }
    }

    pub fn with_port(mut self, port: u16) -> Self {
        self.port = port;
        self
    }

    pub fn with_poll_interval(mut self, poll_interval: Duration) -> Self {
        self.poll_interval = poll_interval;
        self
    }
}
