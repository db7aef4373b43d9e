//! Light state snapshots.

use serde::{Deserialize, Serialize};

use crate::types::{Brightness, Color, ColorMode, Kelvin};

/// The attribute values a light currently reports.
#[serde_with::skip_serializing_none]
#[derive(Debug, Serialize, Deserialize, Clone, Default, PartialEq)]
pub struct LightState {
    pub(crate) is_on: Option<bool>,
    pub(crate) brightness: Option<Brightness>,
    pub(crate) color_mode: Option<ColorMode>,
    pub(crate) color_temp_kelvin: Option<Kelvin>,
    pub(crate) rgb_color: Option<Color>,
    pub(crate) effect: Option<String>,
}

impl LightState {
    pub fn is_on(&self) -> Option<bool> {
        self.is_on
    }

    pub fn brightness(&self) -> Option<Brightness> {
        self.brightness
    }

    pub fn color_mode(&self) -> Option<ColorMode> {
        self.color_mode
    }

    pub fn color_temp_kelvin(&self) -> Option<Kelvin> {
        self.color_temp_kelvin
    }

    pub fn rgb_color(&self) -> Option<Color> {
        self.rgb_color
    }

    pub fn effect(&self) -> Option<&str> {
        self.effect.as_deref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_serialize_skips_unknown() {
        let state = LightState {
            is_on: Some(true),
            brightness: Some(Brightness::new(128)),
            color_mode: Some(ColorMode::ColorTemp),
            color_temp_kelvin: Some(Kelvin::new(4000)),
            ..Default::default()
        };
        assert_eq!(
            serde_json::to_value(&state).unwrap(),
            json!({
                "is_on": true,
                "brightness": 128,
                "color_mode": "color_temp",
                "color_temp_kelvin": 4000,
            })
        );
    }
}
