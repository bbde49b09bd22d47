//! Watcher lifecycle states and broadcast events.

use serde::{Deserialize, Serialize};

use discwatch_common::ItemId;

use crate::hal::DeviceHandle;

/// Lifecycle of a [`super::DeviceWatcher`] run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WatchState {
    Starting,
    Enumerating,
    Idle,
    Stopped,
}

impl std::fmt::Display for WatchState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Self::Starting => "starting",
            Self::Enumerating => "enumerating",
            Self::Idle => "idle",
            Self::Stopped => "stopped",
        };
        f.write_str(s)
    }
}

/// Something the watcher did.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum WatchEvent {
    StateChanged {
        state: WatchState,
    },
    ItemInserted {
        device: DeviceHandle,
        item_id: ItemId,
        uri: String,
        display_name: String,
    },
    DeviceIgnored {
        device: DeviceHandle,
    },
    DeviceFailed {
        device: DeviceHandle,
        error: String,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_event_serialization() {
        let event = WatchEvent::StateChanged {
            state: WatchState::Idle,
        };
        let json = serde_json::to_value(&event).unwrap();
        assert_eq!(json["type"], "state_changed");
        assert_eq!(json["state"], "idle");

        let event = WatchEvent::DeviceFailed {
            device: DeviceHandle::new("/org/freedesktop/Hal/devices/volume_sr0"),
            error: "missing".into(),
        };
        let json = serde_json::to_value(&event).unwrap();
        assert_eq!(json["type"], "device_failed");
        assert_eq!(json["device"], "/org/freedesktop/Hal/devices/volume_sr0");
    }
}
