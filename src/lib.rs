//! Discwatch - optical disc detection for media player playlists
//!
//! Reads attached devices from a hardware-info service, classifies optical
//! discs, and appends `dvd://` and `cdda://` entries to a dedicated category
//! node of the host playlist.

pub mod classifier;
pub mod config;
pub mod dispatcher;
pub mod hal;
pub mod playlist;
pub mod request;
pub mod watcher;

pub use classifier::{DeviceClassifier, DiscType};
pub use request::InsertionRequest;
pub use watcher::{DeviceWatcher, ScanReport, WatchEvent, WatchState};
