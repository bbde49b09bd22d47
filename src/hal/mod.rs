//! Hardware-info collaborator.
//!
//! The watcher never talks to a device bus directly. It opens a
//! [`HardwareSession`] through a [`HardwareInfo`] backend and reads device
//! properties by well-known key. Lookups that can miss return `Option`, so a
//! missing property is an ordinary branch rather than an error path.

pub mod memory;
pub mod snapshot;

pub use memory::{DeviceRecord, MemoryHardware};
pub use snapshot::DeviceSnapshot;

use discwatch_common::Result;
use serde::{Deserialize, Serialize};

/// Optical media classification reported for a mounted disc.
pub const DISC_TYPE: &str = "volume.disc.type";
/// Whether the disc carries audio tracks.
pub const HAS_AUDIO: &str = "volume.disc.has_audio";
/// Device file addressing the drive, e.g. `/dev/sr0`.
pub const BLOCK_DEVICE: &str = "block.device";
/// Filesystem label of the mounted volume.
pub const VOLUME_LABEL: &str = "volume.label";

/// Opaque device identifier handed out by a hardware session.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DeviceHandle(String);

impl DeviceHandle {
    pub fn new(udi: impl Into<String>) -> Self {
        Self(udi.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for DeviceHandle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// A single device property value.
///
/// Values of any other shape land in `Other` and read as absent through the
/// typed accessors.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum PropertyValue {
    Bool(bool),
    Int(i64),
    Double(f64),
    String(String),
    StrList(Vec<String>),
    Other(serde_json::Value),
}

impl From<&str> for PropertyValue {
    fn from(value: &str) -> Self {
        Self::String(value.to_string())
    }
}

impl From<String> for PropertyValue {
    fn from(value: String) -> Self {
        Self::String(value)
    }
}

impl From<bool> for PropertyValue {
    fn from(value: bool) -> Self {
        Self::Bool(value)
    }
}

impl From<i64> for PropertyValue {
    fn from(value: i64) -> Self {
        Self::Int(value)
    }
}

/// A source of hardware sessions.
pub trait HardwareInfo: Send + Sync {
    /// Human-readable name identifying this backend.
    fn name(&self) -> &'static str;

    /// Open a session against the hardware-info service.
    ///
    /// Fails with [`discwatch_common::Error::Unavailable`] when the service
    /// cannot be reached. Callers treat that as non-retriable.
    fn open(&self) -> Result<Box<dyn HardwareSession>>;
}

/// An open connection to the hardware-info service.
pub trait HardwareSession: Send {
    /// Handles of every device currently known to the service.
    fn list_devices(&self) -> Result<Vec<DeviceHandle>>;

    /// Read a property as a string. `None` when the property is absent or is
    /// not a string.
    fn string_property(&self, device: &DeviceHandle, key: &str) -> Option<String>;

    /// Read a property as a boolean. Absent or non-boolean values read as
    /// `false`.
    fn bool_property(&self, device: &DeviceHandle, key: &str) -> bool;

    /// Whether the device exposes the property at all.
    fn has_property(&self, device: &DeviceHandle, key: &str) -> bool;

    /// Release the session. Closing an already closed session does nothing.
    fn close(&mut self) {}
}
