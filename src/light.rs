//! Light entity adapter.

use std::collections::BTreeSet;
use std::sync::Arc;

use log::{debug, error};
use serde_json::{Value, json};

use crate::device::{EntityState, PropertyTransport, StatePublisher};
use crate::errors::Error;
use crate::history::CommandHistory;
use crate::plan::{Dispatch, SendPlan};
use crate::projection::LightProjection;
use crate::property::{MiotProperty, PropertyWrite};
use crate::registry::{SendModeHandle, SendModeRegistry};
use crate::request::TurnOnRequest;
use crate::setup::LightEntityData;
use crate::status::LightState;
use crate::types::{Brightness, Color, ColorMode, Kelvin, KelvinRange};

type Result<T> = std::result::Result<T, Error>;

/// A MIoT device facet exposed as a generic light.
///
/// A light is created unbound and must be [bound](Light::bind) to its device's
/// send-mode handle before [`turn_on`](Light::turn_on) will write anything.
pub struct Light<D> {
    unique_id: String,
    name: String,
    device_id: String,
    group: bool,
    projection: LightProjection,
    color_mode: Option<ColorMode>,
    send_mode: Option<SendModeHandle>,
    transport: Arc<D>,
    publisher: Arc<dyn StatePublisher>,
    history: CommandHistory,
}

impl<D> std::fmt::Debug for Light<D> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Light")
            .field("unique_id", &self.unique_id)
            .field("device_id", &self.device_id)
            .field("projection", &self.projection)
            .field("color_mode", &self.color_mode)
            .field("bound", &self.send_mode.is_some())
            .finish()
    }
}

impl<D: PropertyTransport> Light<D> {
    const GROUP_ICON: &'static str = "mdi:lightbulb-group";

    /// Build the light from its entity data. `did` is the MIoT device id and
    /// `device_id` the identifier the send mode is registered under.
    pub fn new(
        did: &str,
        device_id: &str,
        data: &LightEntityData,
        transport: Arc<D>,
        publisher: Arc<dyn StatePublisher>,
    ) -> Self {
        let projection = LightProjection::from_properties(&data.props, &data.unique_id);
        Light {
            unique_id: data.unique_id.clone(),
            name: data.name.clone(),
            device_id: device_id.to_string(),
            group: did.starts_with("group."),
            color_mode: projection.color_mode(),
            projection,
            send_mode: None,
            transport,
            publisher,
            history: CommandHistory::new(),
        }
    }

    /// Attach the device's send-mode handle.
    pub fn bind(&mut self, handle: SendModeHandle) {
        self.send_mode = Some(handle);
    }

    /// Look the device up in `registry` and bind to it.
    ///
    /// Returns `false`, leaving the light unbound, if the device has no entry.
    pub fn bind_from(&mut self, registry: &SendModeRegistry) -> bool {
        match registry.get(&self.device_id) {
            Some(handle) => {
                self.bind(handle);
                true
            }
            None => false,
        }
    }

    pub fn is_bound(&self) -> bool {
        self.send_mode.is_some()
    }

    pub fn unique_id(&self) -> &str {
        &self.unique_id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn device_id(&self) -> &str {
        &self.device_id
    }

    pub fn icon(&self) -> Option<&'static str> {
        self.group.then_some(Self::GROUP_ICON)
    }

    pub fn projection(&self) -> &LightProjection {
        &self.projection
    }

    pub fn supported_color_modes(&self) -> &BTreeSet<ColorMode> {
        self.projection.supported_color_modes()
    }

    /// The current color mode, reflecting the last color write before the
    /// device confirms it.
    pub fn color_mode(&self) -> Option<ColorMode> {
        self.color_mode
    }

    pub fn kelvin_range(&self) -> Option<KelvinRange> {
        self.projection.kelvin_range()
    }

    pub fn supports_effect(&self) -> bool {
        self.projection.supports_effect()
    }

    pub fn effect_list(&self) -> Vec<&str> {
        self.projection.effect_list()
    }

    pub fn history(&self) -> &CommandHistory {
        &self.history
    }

    pub fn clear_history(&mut self) {
        self.history.clear();
    }

    /// Whether the light is on.
    ///
    /// Some gateway indicator lights report on/off as `1`/`0` rather than a
    /// boolean; those compare equal to `1`.
    pub fn is_on(&self) -> Option<bool> {
        match self.value(self.projection.on())? {
            Value::Bool(on) => Some(on),
            Value::Number(n) => Some(n.as_i64() == Some(1)),
            _ => None,
        }
    }

    pub fn brightness(&self) -> Option<Brightness> {
        let raw = self.value(self.projection.brightness())?.as_i64()?;
        let scale = self.projection.brightness_scale()?;
        Some(Brightness::from_native(scale, raw))
    }

    pub fn color_temp_kelvin(&self) -> Option<Kelvin> {
        let raw = self.value(self.projection.color_temp())?.as_u64()?;
        u32::try_from(raw).ok().map(Kelvin::new)
    }

    pub fn rgb_color(&self) -> Option<Color> {
        let raw = self.value(self.projection.color())?.as_u64()?;
        Some(Color::from_packed((raw & 0xFF_FFFF) as u32))
    }

    pub fn effect(&self) -> Option<String> {
        let raw = self.value(self.projection.mode())?.as_i64()?;
        self.projection
            .mode_map()?
            .label_for(raw)
            .map(String::from)
    }

    pub fn state(&self) -> LightState {
        LightState {
            is_on: self.is_on(),
            brightness: self.brightness(),
            color_mode: self.color_mode,
            color_temp_kelvin: self.color_temp_kelvin(),
            rgb_color: self.rgb_color(),
            effect: self.effect(),
        }
    }

    /// Turn the light on, applying the requested attributes in the order the
    /// device's send mode calls for.
    ///
    /// Fails without writing anything if the light is not bound. Transport
    /// errors stop the sequence; writes already sent are not rolled back.
    pub async fn turn_on(&mut self, request: &TurnOnRequest) -> Result<()> {
        let Some(handle) = &self.send_mode else {
            error!("light command_send_mode not found, {}", self.unique_id);
            return Err(Error::send_mode_unbound(&self.unique_id, &self.device_id));
        };

        let plan = SendPlan::build(&self.projection, handle.get(), request, self.brightness());
        debug!(
            "turn on {} with {}, {} dispatches",
            self.unique_id,
            plan.mode(),
            plan.dispatches().len()
        );

        for dispatch in plan.dispatches() {
            self.dispatch(dispatch).await?;
        }
        if let Some(mode) = plan.color_mode() {
            self.color_mode = Some(mode);
        }
        self.publish_state();
        Ok(())
    }

    /// Turn the light off. Does nothing for lights without an on property.
    pub async fn turn_off(&mut self) -> Result<()> {
        let Some(on) = self.projection.on() else {
            return Ok(());
        };
        let write = PropertyWrite::new(on, on.format.switch_value(false));
        self.dispatch(&Dispatch::Single(write)).await?;
        self.publish_state();
        Ok(())
    }

    /// Returns diagnostics including capabilities, state and history.
    pub fn diagnostics(&self) -> Value {
        let p = &self.projection;
        json!({
            "unique_id": self.unique_id,
            "device_id": self.device_id,
            "bound": self.is_bound(),
            "send_mode": self.send_mode.as_ref().map(|h| h.get().label()),
            "properties": {
                "on": p.on().map(MiotProperty::label),
                "brightness": p.brightness().map(MiotProperty::label),
                "color_temperature": p.color_temp().map(MiotProperty::label),
                "color": p.color().map(MiotProperty::label),
                "mode": p.mode().map(MiotProperty::label),
            },
            "brightness_scale": p.brightness_scale(),
            "kelvin_range": p.kelvin_range(),
            "supported_color_modes": p.supported_color_modes(),
            "effect_list": p.effect_list(),
            "state": self.state(),
            "history": self.history.summary(),
        })
    }

    fn value(&self, prop: Option<&MiotProperty>) -> Option<Value> {
        self.transport.get_value(prop?)
    }

    async fn dispatch(&mut self, dispatch: &Dispatch) -> Result<()> {
        self.history.record(dispatch);
        let res = match dispatch {
            Dispatch::Single(write) => {
                debug!("set {} = {}, {}", write.prop.label(), write.value, self.unique_id);
                self.transport.set_value(&write.prop, write.value.clone()).await
            }
            Dispatch::Batch(writes) => {
                debug!("set {} properties in one batch, {}", writes.len(), self.unique_id);
                self.transport.set_values(writes).await
            }
        };
        if let Err(e) = &res {
            error!("write failed, {}, {}", self.unique_id, e);
            self.history.record_error(&e.to_string());
        }
        res
    }

    fn publish_state(&self) {
        self.publisher
            .publish(&self.unique_id, &EntityState::Light(self.state()));
    }
}
