//! Resolves which device properties serve which lighting capability.

use std::collections::BTreeSet;

use log::{debug, error, info};

use crate::property::{MiotProperty, ModeMap};
use crate::types::{BrightnessScale, ColorMode, KelvinRange};

/// Range-encoded modes with more steps than this are not offered as effects.
pub const VALUE_RANGE_MODE_COUNT_MAX: i64 = 30;

/// The lighting role a property plays, decided by its semantic name.
#[derive(Debug, Clone, Copy)]
pub enum LightProperty<'a> {
    On(&'a MiotProperty),
    Brightness(&'a MiotProperty),
    ColorTemperature(&'a MiotProperty),
    Color(&'a MiotProperty),
    Mode(&'a MiotProperty),
}

impl<'a> LightProperty<'a> {
    /// Returns None for properties that play no part in lighting.
    pub fn classify(prop: &'a MiotProperty) -> Option<Self> {
        match prop.name.as_str() {
            "on" => Some(LightProperty::On(prop)),
            "brightness" => Some(LightProperty::Brightness(prop)),
            "color-temperature" => Some(LightProperty::ColorTemperature(prop)),
            "color" => Some(LightProperty::Color(prop)),
            "mode" => Some(LightProperty::Mode(prop)),
            _ => None,
        }
    }
}

/// The resolved view of a light's properties.
///
/// Built once with [`ProjectionBuilder`] and never changed afterwards.
#[derive(Debug, Clone, Default)]
pub struct LightProjection {
    pub(crate) on: Option<MiotProperty>,
    pub(crate) brightness: Option<MiotProperty>,
    pub(crate) brightness_scale: Option<BrightnessScale>,
    pub(crate) color_temp: Option<MiotProperty>,
    pub(crate) kelvin_range: Option<KelvinRange>,
    pub(crate) color: Option<MiotProperty>,
    pub(crate) mode: Option<MiotProperty>,
    pub(crate) mode_map: Option<ModeMap>,
    pub(crate) supported_color_modes: BTreeSet<ColorMode>,
    pub(crate) color_mode: Option<ColorMode>,
}

impl LightProjection {
    /// Scan `props` in order and build the projection.
    ///
    /// # Examples
    ///
    /// ```
    /// use miot_light_rs::{ColorMode, LightProjection, MiotProperty, ValueFormat, ValueRange};
    ///
    /// let props = vec![
    ///     MiotProperty::new(2, 1, "on", ValueFormat::Bool),
    ///     MiotProperty::new(2, 2, "brightness", ValueFormat::Uint8)
    ///         .with_range(ValueRange::new(1, 100, 1)),
    /// ];
    /// let projection = LightProjection::from_properties(&props, "light.desk");
    /// assert_eq!(projection.color_mode(), Some(ColorMode::Brightness));
    /// assert!(!projection.supports_effect());
    /// ```
    pub fn from_properties(props: &[MiotProperty], entity: &str) -> Self {
        props
            .iter()
            .filter_map(LightProperty::classify)
            .fold(ProjectionBuilder::new(entity), ProjectionBuilder::with)
            .build()
    }

    pub fn on(&self) -> Option<&MiotProperty> {
        self.on.as_ref()
    }

    pub fn brightness(&self) -> Option<&MiotProperty> {
        self.brightness.as_ref()
    }

    pub fn brightness_scale(&self) -> Option<BrightnessScale> {
        self.brightness_scale
    }

    pub fn color_temp(&self) -> Option<&MiotProperty> {
        self.color_temp.as_ref()
    }

    pub fn kelvin_range(&self) -> Option<KelvinRange> {
        self.kelvin_range
    }

    pub fn color(&self) -> Option<&MiotProperty> {
        self.color.as_ref()
    }

    pub fn mode(&self) -> Option<&MiotProperty> {
        self.mode.as_ref()
    }

    pub fn mode_map(&self) -> Option<&ModeMap> {
        self.mode_map.as_ref()
    }

    pub fn supported_color_modes(&self) -> &BTreeSet<ColorMode> {
        &self.supported_color_modes
    }

    /// The color mode implied by the properties, before any write.
    pub fn color_mode(&self) -> Option<ColorMode> {
        self.color_mode
    }

    pub fn supports_effect(&self) -> bool {
        self.mode.is_some() && self.mode_map.as_ref().is_some_and(|m| !m.is_empty())
    }

    pub fn effect_list(&self) -> Vec<&str> {
        self.mode_map
            .as_ref()
            .map(|m| m.labels().collect())
            .unwrap_or_default()
    }
}

/// Accumulates candidate properties, validating each before it is accepted.
#[derive(Debug)]
pub struct ProjectionBuilder {
    entity: String,
    projection: LightProjection,
}

impl ProjectionBuilder {
    pub fn new(entity: &str) -> Self {
        ProjectionBuilder {
            entity: entity.to_string(),
            projection: LightProjection::default(),
        }
    }

    /// Fold one classified property into the projection.
    pub fn with(self, prop: LightProperty<'_>) -> Self {
        match prop {
            LightProperty::On(p) => self.with_on(p),
            LightProperty::Brightness(p) => self.with_brightness(p),
            LightProperty::ColorTemperature(p) => self.with_color_temp(p),
            LightProperty::Color(p) => self.with_color(p),
            LightProperty::Mode(p) => self.with_mode(p),
        }
    }

    /// Freeze into the final projection, filling in the fallback color mode.
    pub fn build(self) -> LightProjection {
        let mut projection = self.projection;
        if projection.supported_color_modes.is_empty() {
            let fallback = if projection.brightness.is_some() {
                Some(ColorMode::Brightness)
            } else if projection.on.is_some() {
                Some(ColorMode::OnOff)
            } else {
                None
            };
            if let Some(mode) = fallback {
                projection.supported_color_modes.insert(mode);
                projection.color_mode = Some(mode);
            }
        }
        projection
    }

    fn duplicate(&self, taken: bool, prop: &MiotProperty) -> bool {
        if taken {
            debug!(
                "duplicate {} property ignored, {}, {}",
                prop.name,
                self.entity,
                prop.label()
            );
        }
        taken
    }

    fn with_on(mut self, prop: &MiotProperty) -> Self {
        if !self.duplicate(self.projection.on.is_some(), prop) {
            self.projection.on = Some(prop.clone());
        }
        self
    }

    fn with_brightness(mut self, prop: &MiotProperty) -> Self {
        if self.duplicate(self.projection.brightness.is_some(), prop) {
            return self;
        }
        match (&prop.value_range, &prop.value_list) {
            (Some(range), _) => {
                let Some(scale) = BrightnessScale::checked(range.min, range.max) else {
                    info!("invalid brightness value_range {}, {}", range, self.entity);
                    return self;
                };
                self.projection.brightness_scale = Some(scale);
                self.projection.brightness = Some(prop.clone());
            }
            (None, Some(list)) if self.projection.mode_map.is_none() && !list.is_empty() => {
                self.projection.mode_map = Some(list.to_map());
                self.projection.mode = Some(prop.clone());
            }
            _ => info!("invalid brightness format, {}", self.entity),
        }
        self
    }

    fn with_color_temp(mut self, prop: &MiotProperty) -> Self {
        if self.duplicate(self.projection.color_temp.is_some(), prop) {
            return self;
        }
        let Some(range) = &prop.value_range else {
            info!("invalid color-temperature value_range format, {}", self.entity);
            return self;
        };
        self.projection.kelvin_range = Some(KelvinRange {
            min: u32::try_from(range.min).unwrap_or(0),
            max: u32::try_from(range.max).unwrap_or(0),
        });
        self.projection.supported_color_modes.insert(ColorMode::ColorTemp);
        self.projection.color_mode = Some(ColorMode::ColorTemp);
        self.projection.color_temp = Some(prop.clone());
        self
    }

    fn with_color(mut self, prop: &MiotProperty) -> Self {
        if self.duplicate(self.projection.color.is_some(), prop) {
            return self;
        }
        self.projection.supported_color_modes.insert(ColorMode::Rgb);
        self.projection.color_mode = Some(ColorMode::Rgb);
        self.projection.color = Some(prop.clone());
        self
    }

    fn with_mode(mut self, prop: &MiotProperty) -> Self {
        if let Some(taken) = &self.projection.mode {
            info!(
                "mode already provided by {}, skipping {}, {}",
                taken.label(),
                prop.label(),
                self.entity
            );
            return self;
        }
        let mode_map = match (&prop.value_list, &prop.value_range) {
            (Some(list), _) => Some(list.to_map()),
            (None, Some(range)) => {
                let map = ModeMap::from_range(range, VALUE_RANGE_MODE_COUNT_MAX);
                if map.is_none() {
                    error!(
                        "too many mode values, {}, {}, {}",
                        self.entity, prop.name, range
                    );
                }
                map
            }
            (None, None) => None,
        };
        match mode_map {
            Some(map) if !map.is_empty() => {
                self.projection.mode_map = Some(map);
                self.projection.mode = Some(prop.clone());
            }
            _ => info!("invalid mode format, {}", self.entity),
        }
        self
    }
}
