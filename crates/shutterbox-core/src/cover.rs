// ── Cover entity ──
//
// One owned, mutable "last known state" cell per configured device,
// visible to both the polling task and command handlers. Published
// through a `watch` channel so consumers observe every overwrite.
// A per-instance mutex serializes fetch-then-apply sections, so a
// command's settled response is never clobbered by a stale poll that
// was already in flight.

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::{watch, Mutex};
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

use shutterbox_api::{DeviceInfo, ShutterState, ShutterboxClient, TransportConfig};

use crate::config::DeviceConfig;
use crate::error::CoreError;
use crate::state::CoverMotion;

/// A connected shutterBox cover.
///
/// Cheaply cloneable via `Arc`. Holds the device client, the identity
/// fetched at setup, and the last-known shutter state. Created with
/// [`connect`](Cover::connect), torn down with [`shutdown`](Cover::shutdown).
#[derive(Clone, Debug)]
pub struct Cover {
    inner: Arc<CoverInner>,
}

#[derive(Debug)]
struct CoverInner {
    client: ShutterboxClient,
    info: DeviceInfo,
    config: DeviceConfig,
    state: watch::Sender<Option<ShutterState>>,
    available: watch::Sender<bool>,
    update_lock: Mutex<()>,
    cancel: CancellationToken,
    poll_handle: std::sync::Mutex<Option<JoinHandle<()>>>,
}

impl Cover {
    /// Connect to the device described by `config`.
    ///
    /// Validates device identity, performs the initial state refresh, and
    /// spawns the background poll task (unless the poll interval is zero).
    pub async fn connect(config: DeviceConfig) -> Result<Self, CoreError> {
        let transport = TransportConfig::default().with_timeout(config.timeout);
        let client = ShutterboxClient::new(&config.host, config.port, &transport)?;
        let info = client.device_info().await?;

        let cover = Self::from_parts(client, info, config);
        cover.refresh().await?;
        cover.spawn_polling();

        info!(
            device = cover.inner.info.name(),
            host = %cover.inner.config.host,
            "connected to shutterBox"
        );
        Ok(cover)
    }

    /// Assemble a cover from an existing client and device identity,
    /// without the initial refresh or poll task.
    ///
    /// The building block behind [`connect`](Cover::connect); also the
    /// entry point for tests that point the client at a mock server.
    pub fn from_parts(client: ShutterboxClient, info: DeviceInfo, config: DeviceConfig) -> Self {
        let (state, _) = watch::channel(None);
        let (available, _) = watch::channel(true);

        Self {
            inner: Arc::new(CoverInner {
                client,
                info,
                config,
                state,
                available,
                update_lock: Mutex::new(()),
                cancel: CancellationToken::new(),
                poll_handle: std::sync::Mutex::new(None),
            }),
        }
    }

    // ── Identity ─────────────────────────────────────────────────────

    /// Device identity fetched at setup.
    pub fn device_info(&self) -> &DeviceInfo {
        &self.inner.info
    }

    /// Stable identifier for this configured instance: the device id,
    /// falling back to the host address for old firmware.
    pub fn unique_id(&self) -> String {
        crate::setup::unique_id(&self.inner.info, &self.inner.config.host)
    }

    // ── Derived reads ────────────────────────────────────────────────

    /// Snapshot of the last-known shutter state.
    pub fn state(&self) -> Option<ShutterState> {
        self.inner.state.borrow().clone()
    }

    /// Whether the last state refresh succeeded.
    pub fn available(&self) -> bool {
        *self.inner.available.borrow()
    }

    /// Semantic motion state from the raw device code.
    pub fn motion(&self) -> CoverMotion {
        CoverMotion::from_code(self.state().and_then(|s| s.state))
    }

    /// Percent open, derived from the device's "percent closed" report.
    ///
    /// Uses `desiredPos` -- the device quirk is that "desired" reflects
    /// the last commanded/settled value, making it the authoritative
    /// display position. `-1` (uncalibrated) reads as absent, never zero.
    pub fn position(&self) -> Option<u8> {
        let raw = self.state()?.desired_pos?.position?;
        if !(0..=100).contains(&raw) {
            return None;
        }
        u8::try_from(100 - raw).ok()
    }

    /// Tilt position, verbatim from `desiredPos`.
    pub fn tilt_position(&self) -> Option<u8> {
        let tilt = self.state()?.desired_pos?.tilt?;
        u8::try_from(tilt).ok()
    }

    pub fn is_closed(&self) -> bool {
        self.motion() == CoverMotion::Closed
    }

    pub fn is_closing(&self) -> bool {
        self.motion() == CoverMotion::Closing
    }

    pub fn is_opening(&self) -> bool {
        self.motion() == CoverMotion::Opening
    }

    // ── State observation ────────────────────────────────────────────

    /// Subscribe to state-cell overwrites.
    pub fn subscribe_state(&self) -> watch::Receiver<Option<ShutterState>> {
        self.inner.state.subscribe()
    }

    /// Subscribe to availability transitions.
    pub fn subscribe_availability(&self) -> watch::Receiver<bool> {
        self.inner.available.subscribe()
    }

    // ── Commands ─────────────────────────────────────────────────────
    //
    // Each command forwards to the client, then overwrites the cached
    // state with the response (clearing it when the response carries no
    // state). Errors propagate to the caller; no retry.

    pub async fn open(&self) -> Result<(), CoreError> {
        let _guard = self.inner.update_lock.lock().await;
        let state = self.inner.client.open().await?;
        self.apply_state(state);
        Ok(())
    }

    pub async fn close(&self) -> Result<(), CoreError> {
        let _guard = self.inner.update_lock.lock().await;
        let state = self.inner.client.close().await?;
        self.apply_state(state);
        Ok(())
    }

    pub async fn stop(&self) -> Result<(), CoreError> {
        let _guard = self.inner.update_lock.lock().await;
        let state = self.inner.client.stop().await?;
        self.apply_state(state);
        Ok(())
    }

    /// Move to `position` percent open. Inverted to device-space
    /// "percent closed" before sending: 80% open is sent as 20.
    pub async fn set_position(&self, position: u8) -> Result<(), CoreError> {
        let device_position = 100 - position.min(100);
        let _guard = self.inner.update_lock.lock().await;
        let state = self.inner.client.set_position(device_position).await?;
        self.apply_state(state);
        Ok(())
    }

    pub async fn open_tilt(&self) -> Result<(), CoreError> {
        let _guard = self.inner.update_lock.lock().await;
        let state = self.inner.client.open_tilt().await?;
        self.apply_state(state);
        Ok(())
    }

    pub async fn close_tilt(&self) -> Result<(), CoreError> {
        let _guard = self.inner.update_lock.lock().await;
        let state = self.inner.client.close_tilt().await?;
        self.apply_state(state);
        Ok(())
    }

    /// Set tilt position; device tilt space is not inverted.
    pub async fn set_tilt_position(&self, position: u8) -> Result<(), CoreError> {
        let _guard = self.inner.update_lock.lock().await;
        let state = self.inner.client.set_tilt_position(position).await?;
        self.apply_state(state);
        Ok(())
    }

    // ── Polling ──────────────────────────────────────────────────────

    /// Fetch the current state and overwrite the cache.
    ///
    /// On failure the previous cached state is retained and the entity
    /// is flagged unavailable until the next successful refresh.
    pub async fn refresh(&self) -> Result<(), CoreError> {
        let _guard = self.inner.update_lock.lock().await;
        match self.inner.client.shutter_state().await {
            Ok(state) => {
                self.apply_state(state);
                Ok(())
            }
            Err(e) => {
                self.set_available(false);
                Err(CoreError::UpdateFailed {
                    reason: e.to_string(),
                })
            }
        }
    }

    /// Shut down the background poll task.
    pub async fn shutdown(&self) {
        self.inner.cancel.cancel();
        let handle = match self.inner.poll_handle.lock() {
            Ok(mut guard) => guard.take(),
            Err(_) => None,
        };
        if let Some(handle) = handle {
            let _ = handle.await;
        }
        debug!("cover shut down");
    }

    // ── Internals ────────────────────────────────────────────────────

    /// Overwrite the state cell and notify subscribers. Must only be
    /// called under `update_lock`.
    fn apply_state(&self, state: Option<ShutterState>) {
        // send_replace updates the cell even with no subscribers.
        self.inner.state.send_replace(state);
        self.set_available(true);
    }

    fn set_available(&self, available: bool) {
        self.inner
            .available
            .send_if_modified(|current| {
                if *current == available {
                    false
                } else {
                    *current = available;
                    true
                }
            });
    }

    fn spawn_polling(&self) {
        let period = self.inner.config.poll_interval;
        if period.is_zero() {
            return;
        }

        let cover = self.clone();
        let cancel = self.inner.cancel.clone();
        let handle = tokio::spawn(poll_task(cover, period, cancel));

        if let Ok(mut guard) = self.inner.poll_handle.lock() {
            *guard = Some(handle);
        }
    }
}

/// Periodically refresh state from the device.
async fn poll_task(cover: Cover, period: Duration, cancel: CancellationToken) {
    let mut interval = tokio::time::interval(period);
    interval.tick().await; // consume the immediate first tick

    loop {
        tokio::select! {
            biased;
            _ = cancel.cancelled() => break,
            _ = interval.tick() => {
                if let Err(e) = cover.refresh().await {
                    warn!(error = %e, "periodic state refresh failed");
                }
            }
        }
    }
}
