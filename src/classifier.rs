//! Device classification.
//!
//! Maps a device's current property set to at most one
//! [`InsertionRequest`]. Classification reads properties on demand and keeps
//! no state between calls, so classifying the same unchanged device twice
//! always gives the same answer.
//!
//! ## Decision table
//!
//! | `volume.disc.type` | `volume.disc.has_audio` | Result                     |
//! |--------------------|-------------------------|----------------------------|
//! | absent             | -                       | no action                  |
//! | `dvd_rom`          | -                       | `dvd://<block.device>`     |
//! | `cd_rom`           | true                    | `cdda://<block.device>`    |
//! | `cd_rom`           | false / absent          | no action                  |
//! | anything else      | -                       | no action                  |

use serde::Serialize;

use discwatch_common::{Error, Result};

use crate::hal::{
    DeviceHandle, HardwareInfo, HardwareSession, BLOCK_DEVICE, DISC_TYPE, HAS_AUDIO, VOLUME_LABEL,
};
use crate::request::{InsertionRequest, AUDIO_CD_LABEL};

/// Optical media kind parsed from the `volume.disc.type` property.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DiscType {
    DvdRom,
    CdRom,
    /// Blank media, unrecognized formats, and the empty string.
    Other(String),
}

impl From<&str> for DiscType {
    fn from(value: &str) -> Self {
        match value {
            "dvd_rom" => Self::DvdRom,
            "cd_rom" => Self::CdRom,
            other => Self::Other(other.to_string()),
        }
    }
}

/// Classifier for optical disc devices.
#[derive(Debug, Clone)]
pub struct DeviceClassifier {
    audio_cd_label: String,
}

impl Default for DeviceClassifier {
    fn default() -> Self {
        Self::new(AUDIO_CD_LABEL)
    }
}

impl DeviceClassifier {
    /// Create a classifier that names audio CDs with `audio_cd_label`.
    pub fn new(audio_cd_label: impl Into<String>) -> Self {
        Self {
            audio_cd_label: audio_cd_label.into(),
        }
    }

    /// Decide whether and how a device should be added to the playlist.
    ///
    /// Returns `Ok(None)` for devices that produce no entry. Returns
    /// [`Error::PropertyMissing`] when the device advertises a disc but a
    /// property needed to build the entry cannot be read; callers skip that
    /// device and move on.
    pub fn classify(
        &self,
        session: &dyn HardwareSession,
        device: &DeviceHandle,
    ) -> Result<Option<InsertionRequest>> {
        if !session.has_property(device, DISC_TYPE) {
            return Ok(None);
        }

        let disc_type = session
            .string_property(device, DISC_TYPE)
            .ok_or_else(|| Error::property_missing(device.as_str(), DISC_TYPE))?;

        match DiscType::from(disc_type.as_str()) {
            DiscType::DvdRom => {
                let block_device = self.block_device(session, device)?;
                // An unlabeled DVD is still playable.
                let label = session
                    .string_property(device, VOLUME_LABEL)
                    .unwrap_or_default();
                Ok(Some(InsertionRequest::dvd(&block_device, label)))
            }
            DiscType::CdRom => {
                if !session.bool_property(device, HAS_AUDIO) {
                    return Ok(None);
                }
                let block_device = self.block_device(session, device)?;
                Ok(Some(InsertionRequest::audio_cd(
                    &block_device,
                    self.audio_cd_label.as_str(),
                )))
            }
            DiscType::Other(other) => {
                tracing::trace!(device = %device, disc_type = %other, "Unhandled disc type");
                Ok(None)
            }
        }
    }

    fn block_device(
        &self,
        session: &dyn HardwareSession,
        device: &DeviceHandle,
    ) -> Result<String> {
        session
            .string_property(device, BLOCK_DEVICE)
            .ok_or_else(|| Error::property_missing(device.as_str(), BLOCK_DEVICE))
    }
}

/// Outcome of classifying one device without touching a playlist.
#[derive(Debug, Clone, Serialize)]
pub struct ScanEntry {
    pub device: DeviceHandle,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub request: Option<InsertionRequest>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

/// Classify every attached device once.
///
/// Opens and closes its own session. Per-device failures are recorded in the
/// returned entries; only a failure to open the session or list devices is
/// returned as an error.
pub fn classify_all(
    hardware: &dyn HardwareInfo,
    classifier: &DeviceClassifier,
) -> Result<Vec<ScanEntry>> {
    let mut session = hardware.open()?;
    let devices = match session.list_devices() {
        Ok(devices) => devices,
        Err(e) => {
            session.close();
            return Err(e);
        }
    };

    let entries = devices
        .into_iter()
        .map(|device| match classifier.classify(session.as_ref(), &device) {
            Ok(request) => ScanEntry {
                device,
                request,
                error: None,
            },
            Err(e) => ScanEntry {
                device,
                request: None,
                error: Some(e.to_string()),
            },
        })
        .collect();

    session.close();
    Ok(entries)
}
