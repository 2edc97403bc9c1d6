//! Typed per-zone configuration values.

use regex::Regex;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::sync::OnceLock;

/// A single configuration value.
///
/// Serialized untagged so that persisted layouts keep the plain JSON shape
/// (`true`, `3`, `"kitchen"`).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ConfigValue {
    /// Boolean toggle
    Bool(bool),
    /// Numeric value
    Number(f64),
    /// Free text, select option or color string
    Text(String),
}

impl ConfigValue {
    /// Returns the string payload for text/select/color values.
    #[must_use]
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::Text(s) => Some(s),
            _ => None,
        }
    }

    /// Returns the boolean payload.
    #[must_use]
    pub const fn as_bool(&self) -> Option<bool> {
        match self {
            Self::Bool(b) => Some(*b),
            _ => None,
        }
    }

    /// Returns the numeric payload.
    #[must_use]
    pub const fn as_f64(&self) -> Option<f64> {
        match self {
            Self::Number(n) => Some(*n),
            _ => None,
        }
    }

    /// Parses a raw command-line string into the value kind a field expects.
    ///
    /// Returns `None` when the string cannot represent that kind.
    #[must_use]
    pub fn parse_for(field_type: FieldType, raw: &str) -> Option<Self> {
        match field_type {
            FieldType::Boolean => match raw.to_ascii_lowercase().as_str() {
                "true" | "yes" | "on" | "1" => Some(Self::Bool(true)),
                "false" | "no" | "off" | "0" => Some(Self::Bool(false)),
                _ => None,
            },
            FieldType::Number => raw.parse::<f64>().ok().map(Self::Number),
            FieldType::Text | FieldType::Select | FieldType::Color => {
                Some(Self::Text(raw.to_string()))
            }
        }
    }
}

impl fmt::Display for ConfigValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Bool(b) => write!(f, "{b}"),
            Self::Number(n) => write!(f, "{n}"),
            Self::Text(s) => f.write_str(s),
        }
    }
}

impl From<&str> for ConfigValue {
    fn from(value: &str) -> Self {
        Self::Text(value.to_string())
    }
}

impl From<bool> for ConfigValue {
    fn from(value: bool) -> Self {
        Self::Bool(value)
    }
}

impl From<f64> for ConfigValue {
    fn from(value: f64) -> Self {
        Self::Number(value)
    }
}

/// Type of a configuration schema field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FieldType {
    /// Free text
    Text,
    /// Numeric input
    Number,
    /// On/off toggle
    Boolean,
    /// One of a fixed option list
    Select,
    /// Hex color (#RGB or #RRGGBB)
    Color,
}

/// One typed field of a component's configuration schema.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConfigField {
    /// Config map key
    pub key: String,
    /// Label shown in the property editor
    pub label: String,
    /// Value type
    #[serde(rename = "type")]
    pub field_type: FieldType,
    /// Value used when a zone is created
    pub default_value: ConfigValue,
    /// Allowed values for `select` fields
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub options: Option<Vec<String>>,
}

impl ConfigField {
    /// Checks whether `value` is a legal value for this field.
    #[must_use]
    pub fn accepts(&self, value: &ConfigValue) -> bool {
        match (self.field_type, value) {
            (FieldType::Boolean, ConfigValue::Bool(_)) => true,
            (FieldType::Number, ConfigValue::Number(n)) => n.is_finite(),
            (FieldType::Text, ConfigValue::Text(_)) => true,
            (FieldType::Select, ConfigValue::Text(s)) => self
                .options
                .as_ref()
                .is_some_and(|options| options.iter().any(|o| o == s)),
            (FieldType::Color, ConfigValue::Text(s)) => is_hex_color(s),
            _ => false,
        }
    }
}

/// Matches `#RRGGBB` or `#RGB`.
fn is_hex_color(value: &str) -> bool {
    static HEX_COLOR: OnceLock<Option<Regex>> = OnceLock::new();
    HEX_COLOR
        .get_or_init(|| Regex::new(r"^#([0-9A-Fa-f]{6}|[0-9A-Fa-f]{3})$").ok())
        .as_ref()
        .is_some_and(|re| re.is_match(value))
}

/// Configuration map of one zone, keyed by schema field key.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ZoneConfig(BTreeMap<String, ConfigValue>);

impl ZoneConfig {
    /// Creates an empty config.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Gets a value by key.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&ConfigValue> {
        self.0.get(key)
    }

    /// Gets a string value by key.
    #[must_use]
    pub fn get_str(&self, key: &str) -> Option<&str> {
        self.get(key).and_then(ConfigValue::as_str)
    }

    /// Sets a value, replacing any previous one.
    pub fn insert(&mut self, key: impl Into<String>, value: ConfigValue) {
        self.0.insert(key.into(), value);
    }

    /// Removes a value.
    pub fn remove(&mut self, key: &str) -> Option<ConfigValue> {
        self.0.remove(key)
    }

    /// Iterates entries in key order.
    pub fn iter(&self) -> impl Iterator<Item = (&String, &ConfigValue)> {
        self.0.iter()
    }

    /// Number of entries.
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Whether the config has no entries.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl FromIterator<(String, ConfigValue)> for ZoneConfig {
    fn from_iter<T: IntoIterator<Item = (String, ConfigValue)>>(iter: T) -> Self {
        Self(iter.into_iter().collect())
    }
}
