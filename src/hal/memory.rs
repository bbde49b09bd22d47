//! In-memory hardware backend.
//!
//! Holds a fixed device table. Used for device snapshots loaded from disk and
//! by the test suite, which can also mark the backend unavailable to exercise
//! startup failures.

use parking_lot::RwLock;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use discwatch_common::{Error, Result};

use super::{DeviceHandle, HardwareInfo, HardwareSession, PropertyValue};

/// One device and its property bag.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DeviceRecord {
    pub udi: DeviceHandle,
    #[serde(default)]
    pub properties: BTreeMap<String, PropertyValue>,
}

impl DeviceRecord {
    pub fn new(udi: impl Into<String>) -> Self {
        Self {
            udi: DeviceHandle::new(udi),
            properties: BTreeMap::new(),
        }
    }

    /// Builder-style property setter.
    pub fn with(mut self, key: &str, value: impl Into<PropertyValue>) -> Self {
        self.properties.insert(key.to_string(), value.into());
        self
    }

    fn get(&self, key: &str) -> Option<&PropertyValue> {
        self.properties.get(key)
    }
}

/// Hardware backend backed by a device table in memory.
#[derive(Debug, Default)]
pub struct MemoryHardware {
    devices: Arc<RwLock<Vec<DeviceRecord>>>,
    unavailable: Option<String>,
    open_sessions: Arc<AtomicUsize>,
}

impl MemoryHardware {
    pub fn new(devices: Vec<DeviceRecord>) -> Self {
        Self {
            devices: Arc::new(RwLock::new(devices)),
            unavailable: None,
            open_sessions: Arc::new(AtomicUsize::new(0)),
        }
    }

    /// A backend whose `open` always fails with the given reason.
    pub fn unavailable(reason: impl Into<String>) -> Self {
        Self {
            unavailable: Some(reason.into()),
            ..Self::default()
        }
    }

    /// Add a device. Visible to sessions opened before or after the call.
    pub fn insert(&self, device: DeviceRecord) {
        self.devices.write().push(device);
    }

    /// Remove a device by handle, returning whether it was present.
    pub fn remove(&self, udi: &DeviceHandle) -> bool {
        let mut devices = self.devices.write();
        let before = devices.len();
        devices.retain(|d| &d.udi != udi);
        devices.len() != before
    }

    /// Number of sessions opened and not yet closed.
    pub fn open_sessions(&self) -> usize {
        self.open_sessions.load(Ordering::SeqCst)
    }
}

impl HardwareInfo for MemoryHardware {
    fn name(&self) -> &'static str {
        "memory"
    }

    fn open(&self) -> Result<Box<dyn HardwareSession>> {
        if let Some(reason) = &self.unavailable {
            return Err(Error::unavailable(reason.clone()));
        }

        self.open_sessions.fetch_add(1, Ordering::SeqCst);
        Ok(Box::new(MemorySession {
            devices: Arc::clone(&self.devices),
            open_sessions: Arc::clone(&self.open_sessions),
            closed: false,
        }))
    }
}

struct MemorySession {
    devices: Arc<RwLock<Vec<DeviceRecord>>>,
    open_sessions: Arc<AtomicUsize>,
    closed: bool,
}

impl MemorySession {
    fn lookup<T>(
        &self,
        device: &DeviceHandle,
        key: &str,
        f: impl FnOnce(&PropertyValue) -> T,
    ) -> Option<T> {
        let devices = self.devices.read();
        devices
            .iter()
            .find(|d| &d.udi == device)
            .and_then(|d| d.get(key))
            .map(f)
    }
}

impl HardwareSession for MemorySession {
    fn list_devices(&self) -> Result<Vec<DeviceHandle>> {
        Ok(self.devices.read().iter().map(|d| d.udi.clone()).collect())
    }

    fn string_property(&self, device: &DeviceHandle, key: &str) -> Option<String> {
        self.lookup(device, key, |value| match value {
            PropertyValue::String(s) => Some(s.clone()),
            _ => None,
        })
        .flatten()
    }

    fn bool_property(&self, device: &DeviceHandle, key: &str) -> bool {
        self.lookup(device, key, |value| matches!(value, PropertyValue::Bool(true)))
            .unwrap_or(false)
    }

    fn has_property(&self, device: &DeviceHandle, key: &str) -> bool {
        self.lookup(device, key, |_| ()).is_some()
    }

    fn close(&mut self) {
        if !self.closed {
            self.closed = true;
            self.open_sessions.fetch_sub(1, Ordering::SeqCst);
        }
    }
}
