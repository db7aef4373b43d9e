//! Turn-on write ordering strategies.

use serde::{Deserialize, Serialize};
use strum::IntoEnumIterator;
use strum_macros::{Display, EnumIter, EnumString, IntoStaticStr};

/// Order in which a light's properties are written when it is turned on.
///
/// Some devices apply one property per command and drop the rest, some need
/// every property in a single message, and some only listen once they are on.
#[derive(
    Debug,
    Default,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    EnumIter,
    IntoStaticStr,
)]
pub enum SendMode {
    /// Each property is a separate write, the on property first.
    #[default]
    #[serde(rename = "Send One by One")]
    #[strum(serialize = "Send One by One")]
    OneByOne,
    /// One batch with the on property at the front.
    #[serde(rename = "Send Turn On First")]
    #[strum(serialize = "Send Turn On First")]
    TurnOnFirst,
    /// One batch with the on property at the back.
    #[serde(rename = "Send Together")]
    #[strum(serialize = "Send Together")]
    Together,
}

impl SendMode {
    /// The user-facing label.
    ///
    /// # Examples
    ///
    /// ```
    /// use miot_light_rs::SendMode;
    ///
    /// assert_eq!(SendMode::default().label(), "Send One by One");
    /// assert_eq!(SendMode::create("Send Together"), Some(SendMode::Together));
    /// assert_eq!(SendMode::create("Send Eventually"), None);
    /// ```
    pub fn label(&self) -> &'static str {
        self.into()
    }

    /// Returns None if the label is not one of the three strategies.
    pub fn create(label: &str) -> Option<Self> {
        label.parse().ok()
    }

    /// All labels, in option order.
    pub fn labels() -> Vec<&'static str> {
        SendMode::iter().map(|m| m.label()).collect()
    }
}
