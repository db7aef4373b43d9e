//! Per-device send-mode state shared between selects and lights.

use std::collections::{BTreeMap, HashMap};
use std::sync::{Arc, RwLock};

use log::debug;

use crate::types::SendMode;

/// Shared handle to one device's send mode.
///
/// The select entity writes through it and every light of the device reads
/// through it, so a change is visible to all of them at once.
#[derive(Debug, Clone, Default)]
pub struct SendModeHandle(Arc<RwLock<SendMode>>);

impl SendModeHandle {
    pub fn new(mode: SendMode) -> Self {
        SendModeHandle(Arc::new(RwLock::new(mode)))
    }

    pub fn get(&self) -> SendMode {
        match self.0.read() {
            Ok(guard) => *guard,
            Err(poisoned) => *poisoned.into_inner(),
        }
    }

    pub fn set(&self, mode: SendMode) {
        match self.0.write() {
            Ok(mut guard) => *guard = mode,
            Err(poisoned) => *poisoned.into_inner() = mode,
        }
    }

    /// Check if both handles point at the same device state.
    pub fn same_as(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.0, &other.0)
    }
}

/// Maps a device identifier to its send-mode handle.
///
/// Populated while entities are set up and consulted when lights are bound.
///
/// # Example
///
/// ```
/// use miot_light_rs::{SendMode, SendModeRegistry};
///
/// let mut registry = SendModeRegistry::new();
/// let handle = registry.register("123456");
/// handle.set(SendMode::Together);
/// assert_eq!(registry.get("123456").unwrap().get(), SendMode::Together);
/// assert!(registry.get("654321").is_none());
/// ```
#[derive(Debug, Clone, Default)]
pub struct SendModeRegistry {
    devices: HashMap<String, SendModeHandle>,
}

impl SendModeRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Return the device's handle, creating it with the default mode on first use.
    pub fn register(&mut self, device_id: &str) -> SendModeHandle {
        self.devices
            .entry(device_id.to_string())
            .or_insert_with(|| {
                debug!("registered command send mode for device {device_id}");
                SendModeHandle::default()
            })
            .clone()
    }

    pub fn get(&self, device_id: &str) -> Option<SendModeHandle> {
        self.devices.get(device_id).cloned()
    }

    pub fn remove(&mut self, device_id: &str) -> Option<SendModeHandle> {
        self.devices.remove(device_id)
    }

    pub fn len(&self) -> usize {
        self.devices.len()
    }

    pub fn is_empty(&self) -> bool {
        self.devices.is_empty()
    }

    /// Current label of every registered device, for persistence.
    pub fn snapshot(&self) -> BTreeMap<String, String> {
        self.devices
            .iter()
            .map(|(id, handle)| (id.clone(), handle.get().label().to_string()))
            .collect()
    }

    /// Apply persisted labels to registered devices.
    ///
    /// Unknown devices and unrecognized labels are ignored. Returns the number
    /// of devices updated.
    pub fn restore_all(&self, saved: &BTreeMap<String, String>) -> usize {
        let mut restored = 0;
        for (id, label) in saved {
            let (Some(handle), Some(mode)) = (self.devices.get(id), SendMode::create(label)) else {
                continue;
            };
            handle.set(mode);
            restored += 1;
        }
        restored
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_register_is_idempotent() {
        let mut registry = SendModeRegistry::new();
        let a = registry.register("dev");
        let b = registry.register("dev");
        assert!(a.same_as(&b));
        assert_eq!(registry.len(), 1);
        assert_eq!(a.get(), SendMode::OneByOne);
    }

    #[test]
    fn test_snapshot_and_restore() {
        let mut registry = SendModeRegistry::new();
        registry.register("a").set(SendMode::Together);
        registry.register("b");

        let saved = registry.snapshot();
        assert_eq!(saved["a"], "Send Together");
        assert_eq!(saved["b"], "Send One by One");

        let mut fresh = SendModeRegistry::new();
        fresh.register("a");
        fresh.register("b");
        let mut saved = saved;
        saved.insert("b".into(), "Send Sideways".into());
        saved.insert("c".into(), "Send Together".into());

        assert_eq!(fresh.restore_all(&saved), 1);
        assert_eq!(fresh.get("a").unwrap().get(), SendMode::Together);
        assert_eq!(fresh.get("b").unwrap().get(), SendMode::OneByOne);
    }
}
