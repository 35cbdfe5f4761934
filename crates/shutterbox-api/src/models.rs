// Wire models for the shutterBox firmware API.
//
// The firmware is loose about which fields it includes (older revisions
// omit `id`, positions report -1 when the motor has not been calibrated),
// so everything below is optional-tolerant. Validation of the fields that
// actually matter happens in the client, not in serde.

use serde::{Deserialize, Serialize};

/// Device identity from `/api/device/state`.
///
/// Fetched once at setup and kept for the lifetime of a configured
/// device instance. `firmware_version`/`hardware_version` are carried
/// for display only.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct DeviceInfo {
    #[serde(default)]
    pub device_name: Option<String>,

    /// Product line identifier; must be `"shutterBox"`.
    #[serde(rename = "type", default)]
    pub device_type: String,

    /// Stable device identifier. Older firmware omits it; callers fall
    /// back to the configured host address.
    #[serde(default)]
    pub id: Option<String>,

    #[serde(rename = "fv", default)]
    pub firmware_version: Option<String>,

    #[serde(rename = "hv", default)]
    pub hardware_version: Option<String>,
}

impl DeviceInfo {
    /// Display name, falling back to the product line when unnamed.
    pub fn name(&self) -> &str {
        self.device_name.as_deref().unwrap_or("shutterBox")
    }
}

/// A position/tilt pair as reported by the device.
///
/// `position` is device-space "percent closed"; `-1` means unknown
/// (uncalibrated motor). `tilt` is 0-100 as-is.
#[derive(Debug, Clone, Copy, Default, Deserialize, Serialize, PartialEq, Eq)]
pub struct ShutterPos {
    #[serde(default)]
    pub position: Option<i32>,
    #[serde(default)]
    pub tilt: Option<i32>,
}

/// Shutter state from `/api/shutter/state` (and from command responses,
/// which return the updated state inline).
///
/// `desired_pos` reflects the last commanded/settled value and is the
/// authoritative display position; `current_pos` may lag mid-travel.
#[derive(Debug, Clone, Default, Deserialize, Serialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct ShutterState {
    /// Raw numeric motion code. See `shutterbox-core`'s mapper for the
    /// code-to-semantics table.
    #[serde(default)]
    pub state: Option<i32>,

    #[serde(default)]
    pub current_pos: Option<ShutterPos>,

    #[serde(default)]
    pub desired_pos: Option<ShutterPos>,
}

/// Envelope for `/api/device/state`.
#[derive(Debug, Deserialize)]
pub(crate) struct DeviceStateEnvelope {
    #[serde(default)]
    pub device: Option<serde_json::Value>,
}

/// Envelope for `/api/shutter/state` and command responses.
#[derive(Debug, Deserialize)]
pub(crate) struct ShutterStateEnvelope {
    #[serde(default)]
    pub shutter: Option<ShutterState>,
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn device_info_tolerates_sparse_payloads() {
        let info: DeviceInfo = serde_json::from_str(r#"{"type":"lightBox"}"#).expect("parse");
        assert_eq!(info.device_type, "lightBox");
        assert_eq!(info.device_name, None);
        assert_eq!(info.id, None);
        assert_eq!(info.name(), "shutterBox");
    }

    #[test]
    fn shutter_state_parses_nested_positions() {
        let state: ShutterState = serde_json::from_str(
            r#"{"state":2,"currentPos":{"position":92,"tilt":100},"desiredPos":{"position":92,"tilt":100}}"#,
        )
        .expect("parse");
        assert_eq!(state.state, Some(2));
        let desired = state.desired_pos.expect("desiredPos");
        assert_eq!(desired.position, Some(92));
        assert_eq!(desired.tilt, Some(100));
    }

    #[test]
    fn shutter_state_tolerates_missing_fields() {
        let state: ShutterState = serde_json::from_str(r#"{"state":1}"#).expect("parse");
        assert_eq!(state.state, Some(1));
        assert_eq!(state.current_pos, None);
        assert_eq!(state.desired_pos, None);
    }
}
