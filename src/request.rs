//! Playlist insertion requests produced by the classifier.

use serde::{Deserialize, Serialize};

/// URI scheme for DVD playback.
pub const DVD_SCHEME: &str = "dvd://";
/// URI scheme for audio CD playback.
pub const CDDA_SCHEME: &str = "cdda://";
/// Display name used for audio CDs, which carry no reliable volume label.
pub const AUDIO_CD_LABEL: &str = "Audio CD";

/// A playable entry to append to the playlist.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InsertionRequest {
    /// Scheme-prefixed locator, e.g. `dvd:///dev/sr0`.
    pub uri: String,
    /// Human label shown in the playlist.
    pub display_name: String,
}

impl InsertionRequest {
    pub fn dvd(block_device: &str, label: impl Into<String>) -> Self {
        Self {
            uri: format!("{DVD_SCHEME}{block_device}"),
            display_name: label.into(),
        }
    }

    pub fn audio_cd(block_device: &str, label: impl Into<String>) -> Self {
        Self {
            uri: format!("{CDDA_SCHEME}{block_device}"),
            display_name: label.into(),
        }
    }
}

impl std::fmt::Display for InsertionRequest {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} ({})", self.uri, self.display_name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dvd_uri_keeps_absolute_path() {
        let req = InsertionRequest::dvd("/dev/sr0", "MOVIE");
        assert_eq!(req.uri, "dvd:///dev/sr0");
        assert_eq!(req.display_name, "MOVIE");
    }

    #[test]
    fn test_audio_cd_uri() {
        let req = InsertionRequest::audio_cd("/dev/sr1", AUDIO_CD_LABEL);
        assert_eq!(req.uri, "cdda:///dev/sr1");
        assert_eq!(req.display_name, "Audio CD");
    }

    #[test]
    fn test_display() {
        let req = InsertionRequest::dvd("/dev/sr0", "");
        assert_eq!(req.to_string(), "dvd:///dev/sr0 ()");
    }
}
