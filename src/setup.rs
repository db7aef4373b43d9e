//! Entity creation for devices that expose lights.

use std::sync::Arc;

use log::{debug, warn};
use serde::{Deserialize, Serialize};

use crate::device::{PropertyTransport, StatePublisher};
use crate::errors::Error;
use crate::light::Light;
use crate::property::MiotProperty;
use crate::registry::SendModeRegistry;
use crate::select::SendModeSelect;

type Result<T> = std::result::Result<T, Error>;

/// The properties of one light-capable service of a device.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LightEntityData {
    pub unique_id: String,
    pub name: String,
    pub props: Vec<MiotProperty>,
}

impl LightEntityData {
    pub fn from_json(json: &str) -> Result<Self> {
        serde_json::from_str(json).map_err(Error::JsonLoad)
    }
}

/// A device and the light entities it exposes.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DeviceInfo {
    /// MIoT device id; group devices start with `group.`
    pub did: String,
    /// Identifier the platform registers the device under.
    pub device_id: String,
    #[serde(default)]
    pub lights: Vec<LightEntityData>,
}

impl DeviceInfo {
    /// # Examples
    ///
    /// ```
    /// use miot_light_rs::DeviceInfo;
    ///
    /// let device = DeviceInfo::from_json(r#"{
    ///     "did": "123456",
    ///     "device_id": "cn_1_123456",
    ///     "lights": [{
    ///         "unique_id": "light.desk_s2",
    ///         "name": "Desk Lamp",
    ///         "props": [
    ///             {"siid": 2, "piid": 1, "name": "on", "format": "bool"},
    ///             {"siid": 2, "piid": 2, "name": "brightness", "format": "uint8",
    ///              "value-range": [1, 100, 1]}
    ///         ]
    ///     }]
    /// }"#).unwrap();
    /// assert_eq!(device.lights[0].props.len(), 2);
    /// ```
    pub fn from_json(json: &str) -> Result<Self> {
        serde_json::from_str(json).map_err(Error::JsonLoad)
    }
}

/// Entities created for one device.
pub struct DeviceEntities<D> {
    pub lights: Vec<Light<D>>,
    pub send_mode: Option<SendModeSelect>,
}

impl<D> std::fmt::Debug for DeviceEntities<D> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DeviceEntities")
            .field("lights", &self.lights)
            .field("send_mode", &self.send_mode)
            .finish()
    }
}

/// Create the lights of `device` and, if it has any, its send-mode select.
///
/// The select's handle is registered in `registry` under the device id and
/// every light is bound to it before being returned.
pub fn setup_device<D: PropertyTransport>(
    device: &DeviceInfo,
    transport: Arc<D>,
    publisher: Arc<dyn StatePublisher>,
    registry: &mut SendModeRegistry,
) -> DeviceEntities<D> {
    if device.lights.is_empty() {
        return DeviceEntities {
            lights: Vec::new(),
            send_mode: None,
        };
    }

    let handle = registry.register(&device.device_id);
    let select = SendModeSelect::new(&device.device_id, handle, publisher.clone());

    let mut lights = Vec::with_capacity(device.lights.len());
    for data in &device.lights {
        let mut light = Light::new(
            &device.did,
            &device.device_id,
            data,
            transport.clone(),
            publisher.clone(),
        );
        if !light.bind_from(registry) {
            warn!("no command send mode for {}, {}", device.device_id, light.unique_id());
        }
        if light.supported_color_modes().is_empty() {
            debug!("light {} exposes no color mode", light.unique_id());
        }
        lights.push(light);
    }

    DeviceEntities {
        lights,
        send_mode: Some(select),
    }
}

/// Run [`setup_device`] over every device, pairing each with its transport.
pub fn setup_devices<D: PropertyTransport>(
    devices: impl IntoIterator<Item = (DeviceInfo, Arc<D>)>,
    publisher: Arc<dyn StatePublisher>,
    registry: &mut SendModeRegistry,
) -> Vec<DeviceEntities<D>> {
    devices
        .into_iter()
        .map(|(device, transport)| setup_device(&device, transport, publisher.clone(), registry))
        .collect()
}
