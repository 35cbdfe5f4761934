// shutterbox-core: Cover entity and state mapping between shutterbox-api
// and consumers (CLI, tests).

pub mod config;
pub mod cover;
pub mod error;
pub mod setup;
pub mod state;

// ── Primary re-exports ──────────────────────────────────────────────
pub use config::DeviceConfig;
pub use cover::Cover;
pub use error::CoreError;
pub use state::CoverMotion;

// Re-export wire models at the crate root for ergonomics.
pub use shutterbox_api::{DeviceInfo, ShutterPos, ShutterState};
