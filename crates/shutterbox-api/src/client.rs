// shutterBox HTTP client
//
// The firmware's REST surface is non-uniform: reads live under /api/,
// commands embed the verb in the path (/s/u/, /s/d/, ...), and tilt
// shares one endpoint for direction and position. So this is a flat
// enumeration of fixed routes rather than a generic verb/resource layer.

use tracing::debug;
use url::Url;

use crate::error::Error;
use crate::models::{DeviceInfo, DeviceStateEnvelope, ShutterState, ShutterStateEnvelope};
use crate::transport::TransportConfig;
use crate::DEVICE_TYPE_SHUTTERBOX;

/// Raw HTTP client for one shutterBox device.
///
/// Holds a single `reqwest::Client` (connection reuse across calls) bound
/// to the device's base URL. Stateless beyond that: responses are returned
/// to the caller, never cached here.
#[derive(Debug)]
pub struct ShutterboxClient {
    http: reqwest::Client,
    base_url: Url,
}

impl ShutterboxClient {
    /// Create a client for a device at `http://{host}:{port}/`.
    pub fn new(host: &str, port: u16, transport: &TransportConfig) -> Result<Self, Error> {
        let base_url = Url::parse(&format!("http://{host}:{port}/"))?;
        let http = transport.build_client()?;
        Ok(Self { http, base_url })
    }

    /// Create a client with a pre-built `reqwest::Client`.
    ///
    /// Useful in tests where the base URL points at a mock server.
    pub fn from_reqwest(base_url: &str, http: reqwest::Client) -> Result<Self, Error> {
        let base_url = Url::parse(base_url)?;
        Ok(Self { http, base_url })
    }

    /// The device base URL.
    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    // ── Reads ────────────────────────────────────────────────────────

    /// Fetch and validate device identity from `/api/device/state`.
    ///
    /// Fails with [`Error::NoDeviceInfo`] when the response lacks a usable
    /// `device` object and [`Error::InvalidDeviceType`] when the device is
    /// not a shutterBox. Never silently coerces a wrong product.
    pub async fn device_info(&self) -> Result<DeviceInfo, Error> {
        let body = self.get_text("api/device/state").await?;

        let envelope: DeviceStateEnvelope = parse_json(&body)?;
        let device = match envelope.device {
            Some(value) if !is_empty_object(&value) => value,
            _ => return Err(Error::NoDeviceInfo),
        };

        let info: DeviceInfo =
            serde_json::from_value(device).map_err(|e| Error::Deserialization {
                message: e.to_string(),
                body,
            })?;

        if info.device_type != DEVICE_TYPE_SHUTTERBOX {
            return Err(Error::InvalidDeviceType {
                found: info.device_type,
            });
        }

        Ok(info)
    }

    /// Fetch the current shutter state from `/api/shutter/state`.
    ///
    /// `None` means the response carried no `shutter` object -- "no state
    /// available", not an error.
    pub async fn shutter_state(&self) -> Result<Option<ShutterState>, Error> {
        let body = self.get_text("api/shutter/state").await?;
        parse_shutter(&body)
    }

    // ── Commands ─────────────────────────────────────────────────────
    //
    // All commands share `command()`, so command responses parse with
    // exactly the same semantics as a polled state fetch.

    /// Start opening the cover.
    pub async fn open(&self) -> Result<Option<ShutterState>, Error> {
        self.command("s/u/").await
    }

    /// Start closing the cover.
    pub async fn close(&self) -> Result<Option<ShutterState>, Error> {
        self.command("s/d/").await
    }

    /// Stop cover movement.
    pub async fn stop(&self) -> Result<Option<ShutterState>, Error> {
        self.command("s/s/").await
    }

    /// Move to a device-space position (percent closed), clamped to 100.
    pub async fn set_position(&self, position: u8) -> Result<Option<ShutterState>, Error> {
        let position = position.min(100);
        self.command(&format!("s/p/{position}/")).await
    }

    /// Fully open the tilt.
    pub async fn open_tilt(&self) -> Result<Option<ShutterState>, Error> {
        self.command("s/t/100").await
    }

    /// Fully close the tilt.
    pub async fn close_tilt(&self) -> Result<Option<ShutterState>, Error> {
        self.command("s/t/0").await
    }

    /// Set the tilt position, clamped to 100.
    pub async fn set_tilt_position(&self, position: u8) -> Result<Option<ShutterState>, Error> {
        let position = position.min(100);
        self.command(&format!("s/t/{position}")).await
    }

    // ── Request helpers ──────────────────────────────────────────────

    /// Issue a command GET and parse the inline state from the response.
    async fn command(&self, path: &str) -> Result<Option<ShutterState>, Error> {
        let body = self.get_text(path).await?;
        parse_shutter(&body)
    }

    /// Send a GET request and return the response body.
    async fn get_text(&self, path: &str) -> Result<String, Error> {
        let url = self.base_url.join(path)?;
        debug!("GET {}", url);

        let resp = self.http.get(url).send().await.map_err(Error::CannotConnect)?;
        resp.text().await.map_err(Error::CannotConnect)
    }
}

/// Parse a shutter-state envelope. Empty bodies and envelopes without a
/// `shutter` key both mean "no state available".
fn parse_shutter(body: &str) -> Result<Option<ShutterState>, Error> {
    if body.trim().is_empty() {
        return Ok(None);
    }
    let envelope: ShutterStateEnvelope = parse_json(body)?;
    Ok(envelope.shutter)
}

fn parse_json<T: serde::de::DeserializeOwned>(body: &str) -> Result<T, Error> {
    serde_json::from_str(body).map_err(|e| Error::Deserialization {
        message: e.to_string(),
        body: body.to_owned(),
    })
}

fn is_empty_object(value: &serde_json::Value) -> bool {
    match value {
        serde_json::Value::Object(map) => map.is_empty(),
        serde_json::Value::Null => true,
        _ => false,
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::parse_shutter;

    #[test]
    fn empty_body_is_no_state() {
        assert_eq!(parse_shutter("").expect("parse"), None);
        assert_eq!(parse_shutter("  \n").expect("parse"), None);
    }

    #[test]
    fn envelope_without_shutter_is_no_state() {
        assert_eq!(parse_shutter(r#"{"light":{}}"#).expect("parse"), None);
    }

    #[test]
    fn malformed_body_is_an_error() {
        assert!(parse_shutter("not json").is_err());
    }
}
