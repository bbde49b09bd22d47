//! Device snapshots stored as JSON.
//!
//! A snapshot is a point-in-time dump of the hardware-info service:
//!
//! ```json
//! {
//!   "devices": [
//!     {
//!       "udi": "/org/freedesktop/Hal/devices/volume_label_MOVIE",
//!       "properties": {
//!         "volume.disc.type": "dvd_rom",
//!         "block.device": "/dev/sr0",
//!         "volume.label": "MOVIE"
//!       }
//!     }
//!   ]
//! }
//! ```

use serde::{Deserialize, Serialize};
use std::path::Path;

use discwatch_common::{Error, Result};

use super::{DeviceRecord, MemoryHardware};

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DeviceSnapshot {
    #[serde(default)]
    pub devices: Vec<DeviceRecord>,
}

impl DeviceSnapshot {
    pub fn from_json(json: &str) -> Result<Self> {
        serde_json::from_str(json)
            .map_err(|e| Error::validation(format!("device snapshot parse error: {e}")))
    }

    /// Read and parse a snapshot file.
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let snapshot = Self::from_json(&content)?;
        tracing::debug!(
            path = %path.display(),
            devices = snapshot.devices.len(),
            "Loaded device snapshot"
        );
        Ok(snapshot)
    }

    pub fn into_hardware(self) -> MemoryHardware {
        MemoryHardware::new(self.devices)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::hal::{HardwareInfo, PropertyValue, DISC_TYPE, HAS_AUDIO};

    const SNAPSHOT: &str = r#"{
        "devices": [
            {
                "udi": "/org/freedesktop/Hal/devices/volume_sr1",
                "properties": {
                    "volume.disc.type": "cd_rom",
                    "volume.disc.has_audio": true,
                    "block.device": "/dev/sr1",
                    "volume.size": 734003200
                }
            },
            { "udi": "/org/freedesktop/Hal/devices/computer" }
        ]
    }"#;

    #[test]
    fn test_parse_snapshot() {
        let snapshot = DeviceSnapshot::from_json(SNAPSHOT).unwrap();
        assert_eq!(snapshot.devices.len(), 2);

        let disc = &snapshot.devices[0];
        assert_eq!(disc.properties[DISC_TYPE], PropertyValue::from("cd_rom"));
        assert_eq!(disc.properties[HAS_AUDIO], PropertyValue::Bool(true));
        assert_eq!(disc.properties["volume.size"], PropertyValue::Int(734003200));

        assert!(snapshot.devices[1].properties.is_empty());
    }

    #[test]
    fn test_untyped_properties_do_not_reject_snapshot() {
        let snapshot = DeviceSnapshot::from_json(
            r#"{
                "devices": [
                    {
                        "udi": "/org/freedesktop/Hal/devices/computer",
                        "properties": {
                            "info.capabilities": ["volume", "block"],
                            "power.ratio": 0.5,
                            "info.extra": { "nested": null }
                        }
                    },
                    {
                        "udi": "/org/freedesktop/Hal/devices/volume_sr0",
                        "properties": {
                            "volume.disc.type": "dvd_rom",
                            "block.device": "/dev/sr0"
                        }
                    }
                ]
            }"#,
        )
        .unwrap();

        let computer = &snapshot.devices[0].properties;
        assert_eq!(
            computer["info.capabilities"],
            PropertyValue::StrList(vec!["volume".into(), "block".into()])
        );
        assert_eq!(computer["power.ratio"], PropertyValue::Double(0.5));
        assert!(matches!(computer["info.extra"], PropertyValue::Other(_)));

        let hardware = snapshot.into_hardware();
        let session = hardware.open().unwrap();
        let dvd = crate::hal::DeviceHandle::new("/org/freedesktop/Hal/devices/volume_sr0");
        assert_eq!(session.string_property(&dvd, DISC_TYPE).as_deref(), Some("dvd_rom"));
    }

    #[test]
    fn test_empty_document_is_valid() {
        let snapshot = DeviceSnapshot::from_json("{}").unwrap();
        assert!(snapshot.devices.is_empty());
    }

    #[test]
    fn test_malformed_snapshot() {
        let err = DeviceSnapshot::from_json("{ devices: ").unwrap_err();
        assert!(matches!(err, Error::Validation(_)));
    }

    #[test]
    fn test_load_missing_file() {
        let err = DeviceSnapshot::load(Path::new("/nonexistent/devices.json")).unwrap_err();
        assert!(matches!(err, Error::Io { .. }));
    }

    #[test]
    fn test_load_into_hardware() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("devices.json");
        std::fs::write(&path, SNAPSHOT).unwrap();

        let hardware = DeviceSnapshot::load(&path).unwrap().into_hardware();
        let session = hardware.open().unwrap();
        assert_eq!(session.list_devices().unwrap().len(), 2);
    }
}
