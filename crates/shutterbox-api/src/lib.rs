// shutterbox-api: Async Rust client for the BleBox shutterBox local HTTP API

pub mod client;
pub mod error;
pub mod models;
pub mod transport;

pub use client::ShutterboxClient;
pub use error::Error;
pub use models::{DeviceInfo, ShutterPos, ShutterState};
pub use transport::TransportConfig;

/// Device type reported by shutterBox firmware in `/api/device/state`.
pub const DEVICE_TYPE_SHUTTERBOX: &str = "shutterBox";
