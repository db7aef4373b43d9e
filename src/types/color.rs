//! RGB color representation.

use serde::{Deserialize, Serialize};
use std::str::FromStr;

use crate::errors::Error;

/// An RGB color with red, green, and blue components (0-255 each).
///
/// Devices carry the color as one packed 24-bit integer: red in bits 16-23,
/// green in bits 8-15 and blue in bits 0-7.
#[derive(Default, Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq)]
pub struct Color {
    pub(crate) red: u8,
    pub(crate) green: u8,
    pub(crate) blue: u8,
}

impl Color {
    /// Create a color with the given RGB values.
    pub fn rgb(red: u8, green: u8, blue: u8) -> Self {
        Self { red, green, blue }
    }

    /// Create a default color (black: 0,0,0).
    pub fn new() -> Self {
        Self::default()
    }

    pub fn red(&self) -> u8 {
        self.red
    }

    pub fn green(&self) -> u8 {
        self.green
    }

    pub fn blue(&self) -> u8 {
        self.blue
    }

    /// Pack into the device's 24-bit integer.
    ///
    /// # Examples
    ///
    /// ```
    /// use miot_light_rs::Color;
    ///
    /// assert_eq!(Color::rgb(0x12, 0x34, 0x56).packed(), 0x123456);
    /// ```
    pub fn packed(&self) -> u32 {
        (u32::from(self.red) << 16) | (u32::from(self.green) << 8) | u32::from(self.blue)
    }

    /// Unpack from the device's 24-bit integer; bits above 23 are ignored.
    ///
    /// # Examples
    ///
    /// ```
    /// use miot_light_rs::Color;
    ///
    /// assert_eq!(Color::from_packed(0xFF8000), Color::rgb(255, 128, 0));
    /// ```
    pub fn from_packed(rgb: u32) -> Self {
        Self {
            red: ((rgb >> 16) & 0xFF) as u8,
            green: ((rgb >> 8) & 0xFF) as u8,
            blue: (rgb & 0xFF) as u8,
        }
    }
}

impl FromStr for Color {
    type Err = Error;

    /// Parse from comma-separated string (e.g., "255,128,0").
    fn from_str(s: &str) -> Result<Self, Error> {
        let parts = s
            .split(',')
            .map(|c| c.trim().parse::<u8>())
            .collect::<Result<Vec<_>, _>>()
            .map_err(|_| Error::InvalidColorString(s.to_string()))?;
        match parts[..] {
            [r, g, b] => Ok(Self::rgb(r, g, b)),
            _ => Err(Error::InvalidColorString(s.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pack_unpack() {
        for r in (0..=255u8).step_by(15) {
            for g in (0..=255u8).step_by(17) {
                for b in [0u8, 1, 127, 128, 254, 255] {
                    let color = Color::rgb(r, g, b);
                    assert_eq!(Color::from_packed(color.packed()), color);
                }
            }
        }
    }

    #[test]
    fn test_from_str() {
        assert_eq!(Color::from_str("255, 128,0").unwrap(), Color::rgb(255, 128, 0));
        assert!(Color::from_str("255,128").is_err());
        assert!(Color::from_str("256,0,0").is_err());
    }
}
