//! Persisted per-device feature state.
//!
//! Feature toggles a user sets on the phone survive restarts through a
//! key/value store organised in families: `SCCP/<device id>` for device
//! features and `SCCP/message` for the system-wide display message.

use std::collections::HashMap;

use parking_lot::RwLock;
use tracing::debug;

use crate::convert::parse_int;
use crate::model::{Device, DndMode};

/// Family holding the system display message.
pub const MESSAGE_FAMILY: &str = "SCCP/message";

pub const KEY_DND: &str = "dnd";
pub const KEY_MONITOR: &str = "monitor";
pub const KEY_PRIVACY: &str = "privacy";
pub const KEY_LAST_DIALED: &str = "lastDialedNumber";
pub const KEY_MESSAGE_TEXT: &str = "text";
pub const KEY_MESSAGE_TIMEOUT: &str = "timeout";

/// Family key of a device.
pub fn device_family(device_id: &str) -> String {
    format!("SCCP/{device_id}")
}

/// Key/value persistence for feature state.
pub trait FeatureStore: Send + Sync {
    fn get(&self, family: &str, key: &str) -> Option<String>;
    fn put(&self, family: &str, key: &str, value: &str);
    fn delete(&self, family: &str, key: &str);
}

/// In-process [`FeatureStore`].
#[derive(Debug, Default)]
pub struct MemoryFeatureStore {
    entries: RwLock<HashMap<(String, String), String>>,
}

impl MemoryFeatureStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.entries.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.read().is_empty()
    }
}

impl FeatureStore for MemoryFeatureStore {
    fn get(&self, family: &str, key: &str) -> Option<String> {
        self.entries
            .read()
            .get(&(family.to_string(), key.to_string()))
            .cloned()
    }

    fn put(&self, family: &str, key: &str, value: &str) {
        self.entries
            .write()
            .insert((family.to_string(), key.to_string()), value.to_string());
    }

    fn delete(&self, family: &str, key: &str) {
        self.entries
            .write()
            .remove(&(family.to_string(), key.to_string()));
    }
}

/// Runtime feature state of a device.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FeatureStatus {
    pub dnd: DndMode,
    pub monitor: bool,
    pub privacy: u32,
    pub last_dialed_number: String,
}

/// Load the stored feature state of `device`.
///
/// Do-not-disturb and privacy are only restored when the device offers
/// the feature.
pub fn restore_features(store: &dyn FeatureStore, device: &mut Device) {
    let family = device_family(&device.id);
    let mut status = FeatureStatus::default();

    if device.dnd_feature {
        status.dnd = match store.get(&family, KEY_DND) {
            Some(value) if value.eq_ignore_ascii_case("silent") => DndMode::Silent,
            Some(_) => DndMode::Reject,
            None => DndMode::Off,
        };
    }
    status.monitor = store.get(&family, KEY_MONITOR).is_some();
    if device.privacy.enabled {
        status.privacy = store
            .get(&family, KEY_PRIVACY)
            .and_then(|value| parse_int(&value))
            .and_then(|value| u32::try_from(value).ok())
            .unwrap_or(0);
    }
    status.last_dialed_number = store.get(&family, KEY_LAST_DIALED).unwrap_or_default();

    debug!(device = %device.id, ?status, "restored feature status");
    device.status = status;
}

/// Write the feature state of `device` back, deleting unset keys.
pub fn persist_features(store: &dyn FeatureStore, device: &Device) {
    let family = device_family(&device.id);
    let status = &device.status;

    match status.dnd {
        DndMode::Off => store.delete(&family, KEY_DND),
        DndMode::Silent => store.put(&family, KEY_DND, "silent"),
        DndMode::Reject | DndMode::User => store.put(&family, KEY_DND, "reject"),
    }
    if status.monitor {
        store.put(&family, KEY_MONITOR, "on");
    } else {
        store.delete(&family, KEY_MONITOR);
    }
    if status.privacy == 0 {
        store.delete(&family, KEY_PRIVACY);
    } else {
        store.put(&family, KEY_PRIVACY, &status.privacy.to_string());
    }
    if status.last_dialed_number.is_empty() {
        store.delete(&family, KEY_LAST_DIALED);
    } else {
        store.put(&family, KEY_LAST_DIALED, &status.last_dialed_number);
    }
}

/// How a stored system message is shown on the phones.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SystemMessage {
    /// Timed priority notification.
    PriorityNotify { text: String, timeout: u32 },
    /// Permanent idle-screen message.
    Idle { text: String },
}

impl SystemMessage {
    pub fn text(&self) -> &str {
        match self {
            SystemMessage::PriorityNotify { text, .. } | SystemMessage::Idle { text } => text,
        }
    }
}

/// Stored system message, if any.
pub fn restore_system_message(store: &dyn FeatureStore) -> Option<SystemMessage> {
    let text = store.get(MESSAGE_FAMILY, KEY_MESSAGE_TEXT)?;
    if text.is_empty() {
        return None;
    }
    let timeout = store
        .get(MESSAGE_FAMILY, KEY_MESSAGE_TIMEOUT)
        .and_then(|value| parse_int(&value))
        .and_then(|value| u32::try_from(value).ok())
        .unwrap_or(0);
    Some(if timeout > 0 {
        SystemMessage::PriorityNotify { text, timeout }
    } else {
        SystemMessage::Idle { text }
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn device() -> Device {
        let mut device = Device::new("SEP001122334455");
        device.dnd_feature = true;
        device.privacy.enabled = true;
        device
    }

    #[test]
    fn dnd_restore_rules() {
        let store = MemoryFeatureStore::new();
        let mut phone = device();
        let family = device_family(&phone.id);

        restore_features(&store, &mut phone);
        assert_eq!(phone.status.dnd, DndMode::Off);

        store.put(&family, KEY_DND, "SILENT");
        restore_features(&store, &mut phone);
        assert_eq!(phone.status.dnd, DndMode::Silent);

        store.put(&family, KEY_DND, "on");
        restore_features(&store, &mut phone);
        assert_eq!(phone.status.dnd, DndMode::Reject);
    }

    #[test]
    fn persist_then_restore() {
        let store = MemoryFeatureStore::new();
        let mut phone = device();
        phone.status = FeatureStatus {
            dnd: DndMode::Silent,
            monitor: true,
            privacy: 1,
            last_dialed_number: "1234".to_string(),
        };
        persist_features(&store, &phone);
        assert_eq!(store.len(), 4);

        let mut restored = device();
        restore_features(&store, &mut restored);
        assert_eq!(restored.status, phone.status);

        restored.status = FeatureStatus::default();
        persist_features(&store, &restored);
        assert!(store.is_empty());
    }

    #[test]
    fn privacy_needs_feature() {
        let store = MemoryFeatureStore::new();
        let mut phone = device();
        phone.privacy.enabled = false;
        store.put(&device_family(&phone.id), KEY_PRIVACY, "1");
        restore_features(&store, &mut phone);
        assert_eq!(phone.status.privacy, 0);
    }

    #[test]
    fn system_message_kind_follows_timeout() {
        let store = MemoryFeatureStore::new();
        assert_eq!(restore_system_message(&store), None);

        store.put(MESSAGE_FAMILY, KEY_MESSAGE_TEXT, "Maintenance at 22:00");
        assert_eq!(
            restore_system_message(&store),
            Some(SystemMessage::Idle {
                text: "Maintenance at 22:00".to_string()
            })
        );

        store.put(MESSAGE_FAMILY, KEY_MESSAGE_TIMEOUT, "10");
        assert!(matches!(
            restore_system_message(&store),
            Some(SystemMessage::PriorityNotify { timeout: 10, .. })
        ));
    }
}
