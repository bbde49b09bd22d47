//! Shared test harness for watcher integration tests.
//!
//! [`TestHarness`] wires a [`MemoryHardware`] device table and a shared
//! [`MemoryPlaylist`] into a [`DeviceWatcher`] with a short poll interval.

#![allow(dead_code)]

use std::sync::Arc;

use parking_lot::Mutex;
use tokio_util::sync::CancellationToken;

use discwatch::config::WatchConfig;
use discwatch::hal::{
    DeviceRecord, MemoryHardware, BLOCK_DEVICE, DISC_TYPE, HAS_AUDIO, VOLUME_LABEL,
};
use discwatch::playlist::{MemoryPlaylist, MemoryPlaylistHost, PlaylistItem};
use discwatch::watcher::{DeviceWatcher, ScanReport};

pub struct TestHarness {
    pub hardware: Arc<MemoryHardware>,
    pub playlist: Arc<Mutex<MemoryPlaylist>>,
    pub host: Arc<MemoryPlaylistHost>,
    pub watcher: Arc<DeviceWatcher>,
}

impl TestHarness {
    pub fn new(devices: Vec<DeviceRecord>) -> Self {
        Self::with_parts(MemoryHardware::new(devices), MemoryPlaylist::new())
    }

    pub fn with_parts(hardware: MemoryHardware, playlist: MemoryPlaylist) -> Self {
        let hardware = Arc::new(hardware);
        let playlist = Arc::new(Mutex::new(playlist));
        let host = Arc::new(MemoryPlaylistHost::new(playlist.clone()));
        let config = WatchConfig {
            poll_interval_ms: 10,
            ..WatchConfig::default()
        };
        let watcher = Arc::new(DeviceWatcher::new(config, hardware.clone(), host.clone()));

        Self {
            hardware,
            playlist,
            host,
            watcher,
        }
    }

    /// Run the watcher with an already-cancelled token: enumerate, then stop.
    pub async fn run_once(&self) -> discwatch_common::Result<ScanReport> {
        let cancel = CancellationToken::new();
        cancel.cancel();
        self.watcher.run(cancel).await
    }

    /// Items under the default "Devices" category node.
    pub fn device_items(&self) -> Vec<PlaylistItem> {
        self.playlist
            .lock()
            .node_by_name("Devices")
            .map(|node| node.items.clone())
            .unwrap_or_default()
    }
}

pub fn dvd(udi: &str, block_device: &str, label: Option<&str>) -> DeviceRecord {
    let device = DeviceRecord::new(udi)
        .with(DISC_TYPE, "dvd_rom")
        .with(BLOCK_DEVICE, block_device);
    match label {
        Some(label) => device.with(VOLUME_LABEL, label),
        None => device,
    }
}

pub fn cd(udi: &str, block_device: &str, has_audio: bool) -> DeviceRecord {
    DeviceRecord::new(udi)
        .with(DISC_TYPE, "cd_rom")
        .with(BLOCK_DEVICE, block_device)
        .with(HAS_AUDIO, has_audio)
}
