use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::time::Duration;

use crate::request::AUDIO_CD_LABEL;

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct Config {
    #[serde(default)]
    pub watch: WatchConfig,

    #[serde(default)]
    pub hardware: HardwareConfig,

    #[serde(default)]
    pub playlist: PlaylistConfig,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct WatchConfig {
    /// Idle cycle length in milliseconds
    #[serde(default = "default_poll_interval")]
    pub poll_interval_ms: u64,

    /// Name of the playlist node that receives detected discs
    #[serde(default = "default_category")]
    pub category: String,

    /// Display name for audio CDs
    #[serde(default = "default_audio_cd_label")]
    pub audio_cd_label: String,
}

impl WatchConfig {
    pub fn poll_interval(&self) -> Duration {
        Duration::from_millis(self.poll_interval_ms)
    }
}

fn default_poll_interval() -> u64 {
    1000
}

fn default_category() -> String {
    "Devices".to_string()
}

fn default_audio_cd_label() -> String {
    AUDIO_CD_LABEL.to_string()
}

impl Default for WatchConfig {
    fn default() -> Self {
        Self {
            poll_interval_ms: default_poll_interval(),
            category: default_category(),
            audio_cd_label: default_audio_cd_label(),
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct HardwareConfig {
    /// JSON device snapshot to read devices from
    #[serde(default)]
    pub snapshot: Option<PathBuf>,
}

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct PlaylistConfig {
    /// Write the category node as M3U here when the watcher stops
    #[serde(default)]
    pub export: Option<PathBuf>,

    /// Maximum number of items the playlist accepts (unlimited if unset)
    #[serde(default)]
    pub capacity: Option<usize>,
}
