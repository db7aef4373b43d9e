//! The per-device "Command Send Mode" select entity.

use std::sync::Arc;

use log::debug;
use serde::{Deserialize, Serialize};
use strum_macros::Display;

use crate::device::{EntityState, StatePublisher};
use crate::registry::SendModeHandle;
use crate::types::SendMode;

/// Where the platform lists an entity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Display)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum EntityCategory {
    Config,
    Diagnostic,
}

/// Chooses how a device's lights order their writes on turn-on.
///
/// Lights of devices such as bathroom heaters and drying racks get one too;
/// every device with at least one light has exactly one select.
pub struct SendModeSelect {
    device_id: String,
    entity_id: String,
    handle: SendModeHandle,
    publisher: Arc<dyn StatePublisher>,
}

impl std::fmt::Debug for SendModeSelect {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SendModeSelect")
            .field("device_id", &self.device_id)
            .field("entity_id", &self.entity_id)
            .field("current_option", &self.current_option())
            .finish()
    }
}

impl SendModeSelect {
    pub const NAME: &'static str = "Command Send Mode";

    pub fn new(device_id: &str, handle: SendModeHandle, publisher: Arc<dyn StatePublisher>) -> Self {
        SendModeSelect {
            device_id: device_id.to_string(),
            entity_id: format!("select.light_{device_id}_command_send_mode"),
            handle,
            publisher,
        }
    }

    pub fn name(&self) -> &str {
        Self::NAME
    }

    pub fn entity_id(&self) -> &str {
        &self.entity_id
    }

    /// Same as the entity id, so renaming the entity keeps the binding.
    pub fn unique_id(&self) -> &str {
        &self.entity_id
    }

    /// Identifier of the device this select is attached to.
    pub fn device_id(&self) -> &str {
        &self.device_id
    }

    pub fn entity_category(&self) -> EntityCategory {
        EntityCategory::Config
    }

    pub fn handle(&self) -> &SendModeHandle {
        &self.handle
    }

    pub fn options(&self) -> Vec<&'static str> {
        SendMode::labels()
    }

    pub fn current_option(&self) -> &'static str {
        self.handle.get().label()
    }

    /// Change the send mode. Labels outside [`options`](Self::options) are ignored.
    ///
    /// Returns `true` if the option was accepted.
    ///
    /// # Examples
    ///
    /// ```
    /// use std::sync::Arc;
    /// use miot_light_rs::{NoopPublisher, SendModeHandle, SendModeSelect};
    ///
    /// let mut select = SendModeSelect::new("42", SendModeHandle::default(), Arc::new(NoopPublisher));
    /// assert!(select.select_option("Send Together"));
    /// assert!(!select.select_option("Send Later"));
    /// assert_eq!(select.current_option(), "Send Together");
    /// ```
    pub fn select_option(&mut self, option: &str) -> bool {
        let Some(mode) = SendMode::create(option) else {
            debug!("ignoring unknown option {option:?}, {}", self.entity_id);
            return false;
        };
        self.handle.set(mode);
        self.publish_state();
        true
    }

    /// Restore the last persisted option; anything unrecognized keeps the current one.
    pub fn restore(&mut self, last_state: Option<&str>) {
        if let Some(mode) = last_state.and_then(SendMode::create) {
            self.handle.set(mode);
        }
    }

    pub fn state(&self) -> EntityState {
        EntityState::Select {
            current_option: self.current_option().to_string(),
        }
    }

    fn publish_state(&self) {
        self.publisher.publish(&self.entity_id, &self.state());
    }
}
