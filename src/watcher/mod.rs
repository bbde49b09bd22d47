//! Optical disc watcher.
//!
//! A run goes through `Starting -> Enumerating -> Idle -> Stopped`:
//!
//! - **Starting** opens the hardware session and creates the category node.
//!   Failure here ends the run with an error and nothing is enumerated.
//! - **Enumerating** runs once. Each attached device is classified and, when
//!   that yields a request, dispatched to the playlist. A failing device is
//!   logged and skipped.
//! - **Idle** sleeps one poll interval per cycle and checks the cancellation
//!   token between cycles. Devices are not re-enumerated.
//! - **Stopped** closes the hardware session.

mod events;

pub use events::{WatchEvent, WatchState};

use std::sync::Arc;

use tokio::sync::{broadcast, watch};
use tokio_util::sync::CancellationToken;

use discwatch_common::Result;

use crate::classifier::DeviceClassifier;
use crate::config::WatchConfig;
use crate::dispatcher::Dispatcher;
use crate::hal::{DeviceHandle, HardwareInfo, HardwareSession};
use crate::playlist::PlaylistHost;
use crate::request::InsertionRequest;

/// Summary of the enumeration pass.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ScanReport {
    /// Devices listed by the hardware session.
    pub devices: usize,
    /// Requests that made it into the playlist, in device order.
    pub inserted: Vec<InsertionRequest>,
    /// Devices that produced no request.
    pub ignored: usize,
    /// Devices whose classification or insertion failed.
    pub failed: usize,
}

/// Closes the hardware session when dropped, including when a `run` future
/// is dropped before reaching `Stopped`.
struct SessionGuard(Box<dyn HardwareSession>);

impl AsRef<dyn HardwareSession> for SessionGuard {
    fn as_ref(&self) -> &(dyn HardwareSession + 'static) {
        self.0.as_ref()
    }
}

impl Drop for SessionGuard {
    fn drop(&mut self) {
        self.0.close();
    }
}

/// Watches for optical discs and adds them to the host playlist.
pub struct DeviceWatcher {
    config: WatchConfig,
    hardware: Arc<dyn HardwareInfo>,
    playlist_host: Arc<dyn PlaylistHost>,
    classifier: DeviceClassifier,
    state_tx: watch::Sender<WatchState>,
    event_tx: broadcast::Sender<WatchEvent>,
}

impl DeviceWatcher {
    pub fn new(
        config: WatchConfig,
        hardware: Arc<dyn HardwareInfo>,
        playlist_host: Arc<dyn PlaylistHost>,
    ) -> Self {
        let classifier = DeviceClassifier::new(config.audio_cd_label.clone());
        let (state_tx, _) = watch::channel(WatchState::Starting);
        let (event_tx, _) = broadcast::channel(64);

        Self {
            config,
            hardware,
            playlist_host,
            classifier,
            state_tx,
            event_tx,
        }
    }

    /// Current lifecycle state.
    pub fn state(&self) -> WatchState {
        *self.state_tx.borrow()
    }

    /// Receiver that observes lifecycle transitions.
    pub fn watch_state(&self) -> watch::Receiver<WatchState> {
        self.state_tx.subscribe()
    }

    /// Subscribe to watcher events.
    pub fn subscribe(&self) -> broadcast::Receiver<WatchEvent> {
        self.event_tx.subscribe()
    }

    /// Run the watcher until `cancel` fires.
    ///
    /// Returns the enumeration report, or the startup error if the hardware
    /// session or playlist could not be acquired.
    pub async fn run(&self, cancel: CancellationToken) -> Result<ScanReport> {
        self.set_state(WatchState::Starting);

        let (session, dispatcher) = match self.start() {
            Ok(started) => started,
            Err(e) => {
                tracing::error!(error = %e, "Disc watcher failed to start");
                self.set_state(WatchState::Stopped);
                return Err(e);
            }
        };

        self.set_state(WatchState::Enumerating);
        let report = self.enumerate(session.as_ref(), &dispatcher);
        tracing::info!(
            devices = report.devices,
            inserted = report.inserted.len(),
            ignored = report.ignored,
            failed = report.failed,
            "Device enumeration complete"
        );

        self.set_state(WatchState::Idle);
        self.idle(&cancel).await;

        drop(session);
        self.set_state(WatchState::Stopped);
        tracing::info!("Disc watcher stopped");

        Ok(report)
    }

    fn start(&self) -> Result<(SessionGuard, Dispatcher)> {
        let session = SessionGuard(self.hardware.open()?);
        tracing::debug!(backend = self.hardware.name(), "Opened hardware session");

        let playlist = match self.playlist_host.find_playlist() {
            Ok(playlist) => playlist,
            Err(e) => {
                tracing::warn!(error = %e, "Unable to find playlist, cancelling disc watching");
                return Err(e);
            }
        };

        let node = playlist
            .lock()
            .create_category_node(&self.config.category);
        drop(playlist);

        Ok((session, Dispatcher::new(Arc::clone(&self.playlist_host), node)))
    }

    fn enumerate(&self, session: &dyn HardwareSession, dispatcher: &Dispatcher) -> ScanReport {
        let devices = match session.list_devices() {
            Ok(devices) => devices,
            Err(e) => {
                tracing::warn!(error = %e, "Failed to list devices");
                return ScanReport::default();
            }
        };

        let mut report = ScanReport {
            devices: devices.len(),
            ..ScanReport::default()
        };

        for device in devices {
            self.process_device(session, dispatcher, device, &mut report);
        }

        report
    }

    fn process_device(
        &self,
        session: &dyn HardwareSession,
        dispatcher: &Dispatcher,
        device: DeviceHandle,
        report: &mut ScanReport,
    ) {
        let request = match self.classifier.classify(session, &device) {
            Ok(Some(request)) => request,
            Ok(None) => {
                tracing::trace!(device = %device, "No playlist entry for device");
                report.ignored += 1;
                self.broadcast(WatchEvent::DeviceIgnored { device });
                return;
            }
            Err(e) => {
                tracing::warn!(device = %device, error = %e, "Failed to classify device");
                report.failed += 1;
                self.broadcast(WatchEvent::DeviceFailed {
                    device,
                    error: e.to_string(),
                });
                return;
            }
        };

        match dispatcher.dispatch(&request) {
            Ok(item_id) => {
                tracing::info!(
                    device = %device,
                    uri = %request.uri,
                    name = %request.display_name,
                    "Added disc to playlist"
                );
                self.broadcast(WatchEvent::ItemInserted {
                    device,
                    item_id,
                    uri: request.uri.clone(),
                    display_name: request.display_name.clone(),
                });
                report.inserted.push(request);
            }
            Err(e) => {
                tracing::warn!(
                    device = %device,
                    uri = %request.uri,
                    error = %e,
                    "Failed to add disc to playlist"
                );
                report.failed += 1;
                self.broadcast(WatchEvent::DeviceFailed {
                    device,
                    error: e.to_string(),
                });
            }
        }
    }

    async fn idle(&self, cancel: &CancellationToken) {
        let interval = self.config.poll_interval();

        while !cancel.is_cancelled() {
            tokio::select! {
                biased;

                _ = cancel.cancelled() => break,
                _ = tokio::time::sleep(interval) => {
                    tracing::trace!("Disc watcher idle cycle");
                }
            }
        }
    }

    fn set_state(&self, state: WatchState) {
        self.state_tx.send_replace(state);
        tracing::debug!(%state, "Disc watcher state changed");
        self.broadcast(WatchEvent::StateChanged { state });
    }

    fn broadcast(&self, event: WatchEvent) {
        if self.event_tx.send(event).is_err() {
            tracing::trace!("No subscribers for watcher event");
        }
    }
}
