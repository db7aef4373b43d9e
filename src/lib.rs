//! # miot_light_rs
//!
//! Maps the light-related properties of Xiaomi MIoT devices onto a generic
//! light entity, plus a per-device "Command Send Mode" select that decides how
//! a turn-on command is broken into property writes.
//!
//! The crate does not talk to devices itself. The host supplies a
//! [`PropertyTransport`] that reads cached values and writes properties, and a
//! [`StatePublisher`] that receives entity state.
//!
//! ## Quick Start
//!
//! ```
//! use std::sync::Arc;
//! use serde_json::Value;
//! use miot_light_rs::{
//!     Brightness, DeviceInfo, Error, MiotProperty, NoopPublisher, PropertyTransport,
//!     PropertyWrite, SendModeRegistry, TurnOnRequest, setup_device,
//! };
//!
//! struct Offline;
//!
//! impl PropertyTransport for Offline {
//!     fn get_value(&self, _prop: &MiotProperty) -> Option<Value> {
//!         None
//!     }
//!     async fn set_value(&self, _prop: &MiotProperty, _value: Value) -> Result<(), Error> {
//!         Ok(())
//!     }
//!     async fn set_values(&self, _writes: &[PropertyWrite]) -> Result<(), Error> {
//!         Ok(())
//!     }
//! }
//!
//! let device = DeviceInfo::from_json(r#"{
//!     "did": "123456",
//!     "device_id": "cn_1_123456",
//!     "lights": [{
//!         "unique_id": "light.desk_s2",
//!         "name": "Desk Lamp",
//!         "props": [
//!             {"siid": 2, "piid": 1, "name": "on", "format": "bool"},
//!             {"siid": 2, "piid": 2, "name": "brightness", "format": "uint8",
//!              "value-range": [1, 100, 1]}
//!         ]
//!     }]
//! }"#).unwrap();
//!
//! let mut registry = SendModeRegistry::new();
//! let mut entities = setup_device(&device, Arc::new(Offline), Arc::new(NoopPublisher), &mut registry);
//!
//! entities.send_mode.as_mut().unwrap().select_option("Send Together");
//! let light = &mut entities.lights[0];
//! futures::executor::block_on(light.turn_on(&TurnOnRequest::from(&Brightness::new(128)))).unwrap();
//! assert_eq!(light.history().summary().batch_count, 1);
//! ```
//!
//! ## Send Modes
//!
//! - **Send One by One** (default): every attribute is its own write, the on
//!   property first
//! - **Send Turn On First**: a single batch that starts with the on property
//! - **Send Together**: a single batch that ends with the on property
//!
//! In the batched modes a brightness decrease is written before the color
//! attributes and an increase after them.

mod device;
mod errors;
mod history;
mod light;
mod plan;
mod projection;
mod property;
mod registry;
mod request;
mod select;
mod setup;
mod status;
mod types;

// Re-export public API
pub use device::{EntityState, NoopPublisher, PropertyTransport, StatePublisher};
pub use errors::Error;
pub use history::{CommandHistory, CommandKind, HistoryEntry, HistorySummary, RecordedWrite};
pub use light::Light;
pub use plan::{Dispatch, SendPlan};
pub use projection::{LightProjection, LightProperty, ProjectionBuilder, VALUE_RANGE_MODE_COUNT_MAX};
pub use property::{
    MiotProperty, ModeMap, PropertyWrite, ValueFormat, ValueList, ValueListItem, ValueRange,
};
pub use registry::{SendModeHandle, SendModeRegistry};
pub use request::TurnOnRequest;
pub use select::{EntityCategory, SendModeSelect};
pub use setup::{DeviceEntities, DeviceInfo, LightEntityData, setup_device, setup_devices};
pub use status::LightState;
pub use types::{Brightness, BrightnessScale, Color, ColorMode, Kelvin, KelvinRange, SendMode};
