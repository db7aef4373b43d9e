//! Attributes requested when turning a light on.

use serde::{Deserialize, Serialize};

use crate::types::{Brightness, Color, Kelvin};

/// Normalized attributes to apply while turning a light on.
///
/// Every attribute is optional; an empty request only switches the light on.
///
/// # Creating Requests
///
/// 1. **From a single attribute** using the [`From`] trait:
///    ```
///    use miot_light_rs::{Kelvin, TurnOnRequest};
///    let request = TurnOnRequest::from(&Kelvin::new(4000));
///    ```
///
/// 2. **Builder pattern** for combining attributes:
///    ```
///    use std::str::FromStr;
///    use miot_light_rs::{Brightness, Color, TurnOnRequest};
///    let mut request = TurnOnRequest::new();
///    request.brightness(&Brightness::new(200));
///    request.color(&Color::from_str("255,128,0").unwrap());
///    ```
#[serde_with::skip_serializing_none]
#[derive(Default, Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct TurnOnRequest {
    pub(crate) brightness: Option<Brightness>,
    pub(crate) color_temp_kelvin: Option<Kelvin>,
    pub(crate) rgb_color: Option<Color>,
    pub(crate) effect: Option<String>,
}

impl TurnOnRequest {
    /// Create a new empty request.
    ///
    /// # Examples
    ///
    /// ```
    /// use miot_light_rs::TurnOnRequest;
    ///
    /// assert!(TurnOnRequest::new().is_empty());
    /// ```
    pub fn new() -> Self {
        Self::default()
    }

    /// Check if no attribute is set.
    pub fn is_empty(&self) -> bool {
        self.brightness.is_none()
            && self.color_temp_kelvin.is_none()
            && self.rgb_color.is_none()
            && self.effect.is_none()
    }

    pub fn brightness(&mut self, brightness: &Brightness) -> &mut Self {
        self.brightness = Some(*brightness);
        self
    }

    pub fn color_temp(&mut self, kelvin: &Kelvin) -> &mut Self {
        self.color_temp_kelvin = Some(*kelvin);
        self
    }

    pub fn color(&mut self, color: &Color) -> &mut Self {
        self.rgb_color = Some(*color);
        self
    }

    /// Set the effect by its label, as listed in the light's effect list.
    pub fn effect(&mut self, effect: &str) -> &mut Self {
        self.effect = Some(effect.to_string());
        self
    }

    pub fn get_brightness(&self) -> Option<Brightness> {
        self.brightness
    }

    pub fn get_color_temp(&self) -> Option<Kelvin> {
        self.color_temp_kelvin
    }

    pub fn get_color(&self) -> Option<Color> {
        self.rgb_color
    }

    pub fn get_effect(&self) -> Option<&str> {
        self.effect.as_deref()
    }
}

impl From<&Brightness> for TurnOnRequest {
    fn from(brightness: &Brightness) -> Self {
        let mut r = TurnOnRequest::new();
        r.brightness(brightness);
        r
    }
}

impl From<&Kelvin> for TurnOnRequest {
    fn from(kelvin: &Kelvin) -> Self {
        let mut r = TurnOnRequest::new();
        r.color_temp(kelvin);
        r
    }
}

impl From<&Color> for TurnOnRequest {
    fn from(color: &Color) -> Self {
        let mut r = TurnOnRequest::new();
        r.color(color);
        r
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_builder_chains() {
        let mut request = TurnOnRequest::new();
        request
            .brightness(&Brightness::new(10))
            .color_temp(&Kelvin::new(3000))
            .effect("Night");

        assert!(!request.is_empty());
        assert_eq!(request.get_brightness(), Some(Brightness::new(10)));
        assert_eq!(request.get_effect(), Some("Night"));
        assert!(request.get_color().is_none());
    }

    #[test]
    fn test_serialize_skips_unset() {
        let request = TurnOnRequest::from(&Kelvin::new(3000));
        assert_eq!(
            serde_json::to_value(&request).unwrap(),
            json!({"color_temp_kelvin": 3000})
        );
    }
}
