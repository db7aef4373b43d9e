//! Ordering of property writes when a light is turned on.

use log::warn;
use serde::Serialize;
use serde_json::Value;

use crate::projection::LightProjection;
use crate::property::PropertyWrite;
use crate::request::TurnOnRequest;
use crate::types::{Brightness, ColorMode, SendMode};

/// One message handed to the property transport.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", content = "writes", rename_all = "snake_case")]
pub enum Dispatch {
    Single(PropertyWrite),
    Batch(Vec<PropertyWrite>),
}

impl Dispatch {
    pub fn writes(&self) -> &[PropertyWrite] {
        match self {
            Dispatch::Single(w) => std::slice::from_ref(w),
            Dispatch::Batch(ws) => ws,
        }
    }
}

/// The ordered writes that turn a light on with the requested attributes.
#[derive(Debug, Clone, PartialEq)]
pub struct SendPlan {
    mode: SendMode,
    dispatches: Vec<Dispatch>,
    color_mode: Option<ColorMode>,
}

/// Raw writes for each requested attribute, before ordering.
struct Writes {
    on: Option<PropertyWrite>,
    effect: Option<PropertyWrite>,
    brightness: Option<PropertyWrite>,
    color_temp: Option<PropertyWrite>,
    color: Option<PropertyWrite>,
}

impl SendPlan {
    /// Build the plan for `request`.
    ///
    /// `current` is the light's cached brightness. Brightness is moved ahead of
    /// the color writes only when it is known, non-zero and not below the
    /// requested value; an unknown brightness always goes last.
    pub fn build(
        projection: &LightProjection,
        mode: SendMode,
        request: &TurnOnRequest,
        current: Option<Brightness>,
    ) -> Self {
        let writes = Writes::convert(projection, request);
        let brightness_first = match (request.brightness, current) {
            (Some(new), Some(old)) => old.value() > 0 && new <= old,
            _ => false,
        };

        let mut color_mode = None;
        if writes.color_temp.is_some() {
            color_mode = Some(ColorMode::ColorTemp);
        }
        if writes.color.is_some() {
            color_mode = Some(ColorMode::Rgb);
        }

        let Writes {
            on,
            effect,
            brightness,
            color_temp,
            color,
        } = writes;

        let dispatches = match mode {
            SendMode::Together | SendMode::TurnOnFirst => {
                let (first, last) = if brightness_first {
                    (brightness, None)
                } else {
                    (None, brightness)
                };
                let ordered = [effect, first, color_temp, color, last];
                let batch: Vec<_> = if mode == SendMode::Together {
                    ordered.into_iter().chain([on]).flatten().collect()
                } else {
                    [on].into_iter().chain(ordered).flatten().collect()
                };
                if batch.is_empty() {
                    Vec::new()
                } else {
                    vec![Dispatch::Batch(batch)]
                }
            }
            SendMode::OneByOne => [on, brightness, color_temp, color, effect]
                .into_iter()
                .flatten()
                .map(Dispatch::Single)
                .collect(),
        };

        SendPlan {
            mode,
            dispatches,
            color_mode,
        }
    }

    pub fn mode(&self) -> SendMode {
        self.mode
    }

    pub fn dispatches(&self) -> &[Dispatch] {
        &self.dispatches
    }

    /// Every write in dispatch order.
    pub fn writes(&self) -> impl Iterator<Item = &PropertyWrite> {
        self.dispatches.iter().flat_map(Dispatch::writes)
    }

    /// The color mode the light reports once the plan has been sent.
    pub fn color_mode(&self) -> Option<ColorMode> {
        self.color_mode
    }

    pub fn is_empty(&self) -> bool {
        self.dispatches.is_empty()
    }
}

impl Writes {
    fn convert(projection: &LightProjection, request: &TurnOnRequest) -> Self {
        let on = projection
            .on()
            .map(|p| PropertyWrite::new(p, p.format.switch_value(true)));

        let effect = request.effect.as_deref().and_then(|label| {
            let write = projection.mode().zip(projection.mode_map()).and_then(|(p, map)| {
                map.value_for(label)
                    .map(|raw| PropertyWrite::new(p, Value::from(raw)))
            });
            if write.is_none() {
                warn!("unsupported effect {label:?}, skipped");
            }
            write
        });

        let brightness = request.brightness.and_then(|b| {
            let write = projection
                .brightness()
                .zip(projection.brightness_scale())
                .map(|(p, scale)| PropertyWrite::new(p, Value::from(b.to_native(scale))));
            if write.is_none() {
                warn!("light has no brightness property, brightness skipped");
            }
            write
        });

        let color_temp = request.color_temp_kelvin.and_then(|k| {
            let write = projection
                .color_temp()
                .map(|p| PropertyWrite::new(p, Value::from(k.kelvin())));
            if write.is_none() {
                warn!("light has no color-temperature property, color temperature skipped");
            }
            write
        });

        let color = request.rgb_color.and_then(|c| {
            let write = projection
                .color()
                .map(|p| PropertyWrite::new(p, Value::from(c.packed())));
            if write.is_none() {
                warn!("light has no color property, rgb color skipped");
            }
            write
        });

        Writes {
            on,
            effect,
            brightness,
            color_temp,
            color,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::property::{MiotProperty, ValueFormat, ValueList, ValueListItem, ValueRange};
    use crate::types::{Color, Kelvin};
    use serde_json::json;

    fn projection(on_format: ValueFormat) -> LightProjection {
        let props = vec![
            MiotProperty::new(2, 1, "on", on_format),
            MiotProperty::new(2, 2, "brightness", ValueFormat::Uint8).with_range(ValueRange::new(1, 100, 1)),
            MiotProperty::new(2, 3, "color-temperature", ValueFormat::Uint32)
                .with_range(ValueRange::new(2700, 6500, 1)),
            MiotProperty::new(2, 4, "color", ValueFormat::Uint32),
            MiotProperty::new(2, 5, "mode", ValueFormat::Uint8).with_list(ValueList::new(vec![
                ValueListItem {
                    value: 0,
                    description: "Day".into(),
                },
                ValueListItem {
                    value: 1,
                    description: "Night".into(),
                },
            ])),
        ];
        LightProjection::from_properties(&props, "light.test")
    }

    fn names(plan: &SendPlan) -> Vec<&str> {
        plan.writes().map(PropertyWrite::name).collect()
    }

    #[test]
    fn test_together_with_brightness_decrease() {
        let mut request = TurnOnRequest::new();
        request
            .effect("Night")
            .color_temp(&Kelvin::new(3000))
            .brightness(&Brightness::new(100));

        let plan = SendPlan::build(
            &projection(ValueFormat::Bool),
            SendMode::Together,
            &request,
            Some(Brightness::new(200)),
        );

        assert_eq!(plan.dispatches().len(), 1);
        assert!(matches!(plan.dispatches()[0], Dispatch::Batch(_)));
        assert_eq!(names(&plan), vec!["mode", "brightness", "color-temperature", "on"]);
        assert_eq!(plan.color_mode(), Some(ColorMode::ColorTemp));
    }

    #[test]
    fn test_together_with_brightness_increase() {
        let mut request = TurnOnRequest::new();
        request
            .color(&Color::rgb(255, 0, 0))
            .brightness(&Brightness::new(250));

        let plan = SendPlan::build(
            &projection(ValueFormat::Bool),
            SendMode::Together,
            &request,
            Some(Brightness::new(20)),
        );

        assert_eq!(names(&plan), vec!["color", "brightness", "on"]);
        assert_eq!(plan.writes().next().unwrap().value, json!(0xFF0000));
        assert_eq!(plan.color_mode(), Some(ColorMode::Rgb));
    }

    #[test]
    fn test_unknown_brightness_goes_last() {
        let mut request = TurnOnRequest::new();
        request
            .color_temp(&Kelvin::new(3000))
            .brightness(&Brightness::new(1));

        for current in [None, Some(Brightness::new(0))] {
            let plan = SendPlan::build(&projection(ValueFormat::Bool), SendMode::Together, &request, current);
            assert_eq!(names(&plan), vec!["color-temperature", "brightness", "on"]);
        }
    }

    #[test]
    fn test_turn_on_first() {
        let mut request = TurnOnRequest::new();
        request
            .effect("Day")
            .color_temp(&Kelvin::new(5000))
            .brightness(&Brightness::new(255));

        let plan = SendPlan::build(
            &projection(ValueFormat::Bool),
            SendMode::TurnOnFirst,
            &request,
            Some(Brightness::new(255)),
        );

        assert_eq!(plan.dispatches().len(), 1);
        assert_eq!(names(&plan), vec!["on", "mode", "brightness", "color-temperature"]);
        let values: Vec<_> = plan.writes().map(|w| w.value.clone()).collect();
        assert_eq!(values, vec![json!(true), json!(0), json!(100), json!(5000)]);
    }

    #[test]
    fn test_one_by_one_brightness_increase() {
        let request = TurnOnRequest::from(&Brightness::new(255));
        let plan = SendPlan::build(
            &projection(ValueFormat::Bool),
            SendMode::OneByOne,
            &request,
            Some(Brightness::new(10)),
        );

        assert_eq!(plan.dispatches().len(), 2);
        assert!(plan.dispatches().iter().all(|d| matches!(d, Dispatch::Single(_))));
        assert_eq!(names(&plan), vec!["on", "brightness"]);
    }

    #[test]
    fn test_one_by_one_full_order() {
        let mut request = TurnOnRequest::new();
        request
            .effect("Night")
            .color(&Color::rgb(1, 2, 3))
            .color_temp(&Kelvin::new(3000))
            .brightness(&Brightness::new(1));

        let plan = SendPlan::build(
            &projection(ValueFormat::Bool),
            SendMode::OneByOne,
            &request,
            Some(Brightness::new(255)),
        );

        assert_eq!(
            names(&plan),
            vec!["on", "brightness", "color-temperature", "color", "mode"]
        );
        assert_eq!(plan.color_mode(), Some(ColorMode::Rgb));
    }

    #[test]
    fn test_integer_on_sentinel() {
        let plan = SendPlan::build(
            &projection(ValueFormat::Uint8),
            SendMode::Together,
            &TurnOnRequest::new(),
            None,
        );
        assert_eq!(plan.writes().next().unwrap().value, json!(1));
    }

    #[test]
    fn test_unknown_effect_and_missing_capability_skipped() {
        let props = vec![MiotProperty::new(2, 1, "on", ValueFormat::Bool)];
        let on_only = LightProjection::from_properties(&props, "light.test");
        let mut request = TurnOnRequest::new();
        request.effect("Party").color(&Color::rgb(0, 0, 255));

        let plan = SendPlan::build(&on_only, SendMode::Together, &request, None);
        assert_eq!(names(&plan), vec!["on"]);
        assert!(plan.color_mode().is_none());
    }

    #[test]
    fn test_nothing_to_send() {
        let plan = SendPlan::build(
            &LightProjection::default(),
            SendMode::Together,
            &TurnOnRequest::new(),
            None,
        );
        assert!(plan.is_empty());
    }
}
