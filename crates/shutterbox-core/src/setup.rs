//! Setup-time device validation.
//!
//! The config-collection front end (CLI `devices add`) calls
//! [`validate_device`] with the submitted host/port before anything is
//! persisted. Typed failures carry a stable form-error key via
//! [`CoreError::form_error_key`](crate::CoreError::form_error_key).

use std::time::Duration;

use tracing::debug;

use shutterbox_api::{DeviceInfo, ShutterboxClient, TransportConfig};

use crate::error::CoreError;

/// Validate reachability and device identity with a transient client.
///
/// Success returns the device identity to persist; failure aborts setup.
pub async fn validate_device(
    host: &str,
    port: u16,
    timeout: Duration,
) -> Result<DeviceInfo, CoreError> {
    let transport = TransportConfig::default().with_timeout(timeout);
    let client = ShutterboxClient::new(host, port, &transport)?;
    let info = client.device_info().await?;
    debug!(device = info.name(), host, "device validated");
    Ok(info)
}

/// Stable unique identifier for a configured device instance.
///
/// Prefers the firmware-reported device id; old firmware omits it, in
/// which case the configured host address stands in. Used to reject
/// configuring the same physical device twice.
pub fn unique_id(info: &DeviceInfo, host: &str) -> String {
    info.id.clone().unwrap_or_else(|| host.to_owned())
}

#[cfg(test)]
mod tests {
    use shutterbox_api::DeviceInfo;

    use super::unique_id;

    fn info(id: Option<&str>) -> DeviceInfo {
        DeviceInfo {
            device_name: Some("Living Room".into()),
            device_type: "shutterBox".into(),
            id: id.map(str::to_owned),
            firmware_version: None,
            hardware_version: None,
        }
    }

    #[test]
    fn unique_id_prefers_device_id() {
        assert_eq!(unique_id(&info(Some("f12a29130ce")), "192.168.1.50"), "f12a29130ce");
    }

    #[test]
    fn unique_id_falls_back_to_host() {
        assert_eq!(unique_id(&info(None), "192.168.1.50"), "192.168.1.50");
    }
}
