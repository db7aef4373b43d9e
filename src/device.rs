//! Collaborator traits the host platform implements.

use std::future::Future;

use serde::Serialize;
use serde_json::Value;

use crate::errors::Error;
use crate::property::{MiotProperty, PropertyWrite};
use crate::status::LightState;

type Result<T> = std::result::Result<T, Error>;

/// Access to a device's cached property values and its write path.
///
/// Implementations own retries, timeouts and message framing. A successful
/// write is expected to update the value returned by [`get_value`].
///
/// [`get_value`]: PropertyTransport::get_value
pub trait PropertyTransport: Send + Sync {
    /// Last known value of `prop`, without a network round-trip.
    fn get_value(&self, prop: &MiotProperty) -> Option<Value>;

    /// Write one property.
    fn set_value(&self, prop: &MiotProperty, value: Value) -> impl Future<Output = Result<()>> + Send;

    /// Write several properties, in the given order, as one message when the
    /// device protocol allows it.
    fn set_values(&self, writes: &[PropertyWrite]) -> impl Future<Output = Result<()>> + Send;
}

/// Observable entity state pushed to the platform.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "domain", rename_all = "snake_case")]
pub enum EntityState {
    Light(LightState),
    Select { current_option: String },
}

/// Receives entity state whenever it should become visible on the platform.
pub trait StatePublisher: Send + Sync {
    fn publish(&self, unique_id: &str, state: &EntityState);
}

/// Publisher that drops every update, for hosts that poll instead.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoopPublisher;

impl StatePublisher for NoopPublisher {
    fn publish(&self, _unique_id: &str, _state: &EntityState) {}
}
