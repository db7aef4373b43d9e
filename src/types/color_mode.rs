//! Color modes a light can report.

use serde::{Deserialize, Serialize};
use strum_macros::{Display, EnumString};

/// How the light's current color is expressed.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, Display, EnumString,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum ColorMode {
    /// Only on/off
    #[serde(rename = "onoff")]
    #[strum(serialize = "onoff")]
    OnOff,
    /// Dimmable, no color
    Brightness,
    /// Tunable white
    ColorTemp,
    /// Full color
    Rgb,
}
