//! Color temperature.

use serde::{Deserialize, Serialize};

/// Correlated color temperature in Kelvin.
///
/// MIoT devices report color temperature in Kelvin already, so the value is
/// passed through without rescaling.
#[derive(Default, Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
#[serde(transparent)]
pub struct Kelvin {
    pub(crate) kelvin: u32,
}

impl Kelvin {
    pub fn new(kelvin: u32) -> Self {
        Kelvin { kelvin }
    }

    /// Get the kelvin value.
    pub fn kelvin(&self) -> u32 {
        self.kelvin
    }
}

/// Color temperature range (Kelvin) a light accepts.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct KelvinRange {
    pub min: u32,
    pub max: u32,
}

impl KelvinRange {
    /// # Examples
    ///
    /// ```
    /// use miot_light_rs::{Kelvin, KelvinRange};
    ///
    /// let range = KelvinRange { min: 2700, max: 6500 };
    /// assert!(range.contains(Kelvin::new(4000)));
    /// assert!(!range.contains(Kelvin::new(7000)));
    /// ```
    pub fn contains(&self, kelvin: Kelvin) -> bool {
        (self.min..=self.max).contains(&kelvin.kelvin)
    }
}
