//! MIoT property metadata as published by the MIoT-Spec instance registry.

use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::Value;
use strum_macros::{Display, EnumString};

use crate::errors::Error;

/// Declared value format of a property.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Display, EnumString)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum ValueFormat {
    Bool,
    Uint8,
    Uint16,
    Uint32,
    Int8,
    Int16,
    Int32,
    Int64,
    Float,
    String,
}

impl ValueFormat {
    /// Raw value meaning "on" (or "off") for a property of this format.
    ///
    /// Boolean properties take `true`/`false`; everything else takes `1`/`0`.
    ///
    /// # Examples
    ///
    /// ```
    /// use serde_json::json;
    /// use miot_light_rs::ValueFormat;
    ///
    /// assert_eq!(ValueFormat::Bool.switch_value(true), json!(true));
    /// assert_eq!(ValueFormat::Uint8.switch_value(false), json!(0));
    /// ```
    pub fn switch_value(&self, on: bool) -> Value {
        match self {
            ValueFormat::Bool => Value::Bool(on),
            _ => Value::from(u8::from(on)),
        }
    }
}

/// Numeric range `[min, max, step]` of a property.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "Vec<i64>", into = "[i64; 3]")]
pub struct ValueRange {
    pub min: i64,
    pub max: i64,
    pub step: i64,
}

impl ValueRange {
    pub fn new(min: i64, max: i64, step: i64) -> Self {
        ValueRange { min, max, step }
    }

    /// Number of steps between `min` and `max`, or `None` for a non-positive step
    /// or a span that does not fit in an `i64`.
    pub fn step_count(&self) -> Option<i64> {
        if self.step <= 0 {
            return None;
        }
        Some(self.max.checked_sub(self.min)? / self.step)
    }
}

impl TryFrom<Vec<i64>> for ValueRange {
    type Error = Error;

    fn try_from(values: Vec<i64>) -> Result<Self, Error> {
        if let [min, max, step] = values[..] {
            return Ok(ValueRange { min, max, step });
        }
        Err(Error::InvalidValueRange(values))
    }
}

impl From<ValueRange> for [i64; 3] {
    fn from(range: ValueRange) -> Self {
        [range.min, range.max, range.step]
    }
}

impl fmt::Display for ValueRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}, {}, {}]", self.min, self.max, self.step)
    }
}

/// One entry of a value-list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValueListItem {
    pub value: i64,
    pub description: String,
}

/// Enumerated raw values, each paired with a display label.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ValueList {
    items: Vec<ValueListItem>,
}

impl ValueList {
    pub fn new(items: Vec<ValueListItem>) -> Self {
        ValueList { items }
    }

    pub fn items(&self) -> &[ValueListItem] {
        &self.items
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn descriptions(&self) -> Vec<&str> {
        self.items.iter().map(|i| i.description.as_str()).collect()
    }

    /// Raw value for a display label.
    pub fn from_label(&self, label: &str) -> Option<i64> {
        self.items
            .iter()
            .find(|i| i.description == label)
            .map(|i| i.value)
    }

    /// Display label for a raw value.
    pub fn label_for(&self, value: i64) -> Option<&str> {
        self.items
            .iter()
            .find(|i| i.value == value)
            .map(|i| i.description.as_str())
    }

    /// Converts the list into a [`ModeMap`], keeping the declared order.
    ///
    /// # Examples
    ///
    /// ```
    /// use miot_light_rs::{ValueList, ValueListItem};
    ///
    /// let list = ValueList::new(vec![
    ///     ValueListItem { value: 0, description: "Reading".into() },
    ///     ValueListItem { value: 1, description: "Night".into() },
    /// ]);
    /// let map = list.to_map();
    /// assert_eq!(map.label_for(1), Some("Night"));
    /// assert_eq!(map.value_for("Reading"), Some(0));
    /// ```
    pub fn to_map(&self) -> ModeMap {
        ModeMap::new(
            self.items
                .iter()
                .map(|i| (i.value, i.description.clone()))
                .collect(),
        )
    }
}

/// Ordered mapping from a raw mode value to its effect label.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ModeMap {
    entries: Vec<(i64, String)>,
}

impl ModeMap {
    pub fn new(entries: Vec<(i64, String)>) -> Self {
        ModeMap { entries }
    }

    /// Synthesizes `"mode <value>"` labels for every step of `range` below `max`.
    ///
    /// Returns `None` when the step is not positive, when the span overflows or
    /// when the range holds more than `max_count` steps; a partial map is never
    /// produced.
    pub fn from_range(range: &ValueRange, max_count: i64) -> Option<Self> {
        let count = range.step_count()?;
        if count > max_count {
            return None;
        }
        let step = usize::try_from(range.step).ok()?;
        Some(ModeMap::new(
            (range.min..range.max)
                .step_by(step)
                .map(|v| (v, format!("mode {v}")))
                .collect(),
        ))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn label_for(&self, value: i64) -> Option<&str> {
        self.entries
            .iter()
            .find(|(v, _)| *v == value)
            .map(|(_, label)| label.as_str())
    }

    pub fn value_for(&self, label: &str) -> Option<i64> {
        self.entries
            .iter()
            .find(|(_, l)| l == label)
            .map(|(v, _)| *v)
    }

    pub fn labels(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(_, label)| label.as_str())
    }

    pub fn values(&self) -> impl Iterator<Item = i64> + '_ {
        self.entries.iter().map(|(v, _)| *v)
    }
}

/// A single MIoT property as described by its MIoT-Spec instance.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MiotProperty {
    pub siid: u32,
    pub piid: u32,
    pub name: String,
    pub format: ValueFormat,
    #[serde(rename = "value-range", default, skip_serializing_if = "Option::is_none")]
    pub value_range: Option<ValueRange>,
    #[serde(rename = "value-list", default, skip_serializing_if = "Option::is_none")]
    pub value_list: Option<ValueList>,
}

impl MiotProperty {
    pub fn new(siid: u32, piid: u32, name: &str, format: ValueFormat) -> Self {
        MiotProperty {
            siid,
            piid,
            name: name.to_string(),
            format,
            value_range: None,
            value_list: None,
        }
    }

    pub fn with_range(mut self, range: ValueRange) -> Self {
        self.value_range = Some(range);
        self
    }

    pub fn with_list(mut self, list: ValueList) -> Self {
        self.value_list = Some(list);
        self
    }

    /// Short `name(siid.piid)` form used in logs.
    pub fn label(&self) -> String {
        format!("{}({}.{})", self.name, self.siid, self.piid)
    }
}

/// A property together with the raw value to write to it.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PropertyWrite {
    pub prop: MiotProperty,
    pub value: Value,
}

impl PropertyWrite {
    pub fn new(prop: &MiotProperty, value: Value) -> Self {
        PropertyWrite {
            prop: prop.clone(),
            value,
        }
    }

    pub fn name(&self) -> &str {
        &self.prop.name
    }
}
