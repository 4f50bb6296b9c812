//! Flat key-value settings object.
//!
//! [`Settings`] mirrors the configuration object a host passes to a filter:
//! string keys mapped to loosely typed values, plus a separate layer of
//! defaults that answer for any key the user has not set. Only user values
//! are serialized; defaults are reinstalled by the filter on load.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::error::ConfigError;

/// A single setting value.
///
/// Deserialization is untagged, so `1` becomes [`SettingValue::Int`],
/// `1.5` becomes [`SettingValue::Float`], and so on.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum SettingValue {
    /// Boolean flag.
    Bool(bool),
    /// Integer value.
    Int(i64),
    /// Floating-point value.
    Float(f64),
    /// Free-form text.
    Text(String),
}

impl SettingValue {
    /// Returns the integer if this is an [`Int`](Self::Int).
    pub fn as_int(&self) -> Option<i64> {
        match self {
            Self::Int(v) => Some(*v),
            _ => None,
        }
    }

    /// Short type name for diagnostics.
    pub fn type_name(&self) -> &'static str {
        match self {
            Self::Bool(_) => "bool",
            Self::Int(_) => "int",
            Self::Float(_) => "float",
            Self::Text(_) => "text",
        }
    }
}

impl From<i64> for SettingValue {
    fn from(v: i64) -> Self {
        Self::Int(v)
    }
}

impl From<f64> for SettingValue {
    fn from(v: f64) -> Self {
        Self::Float(v)
    }
}

impl From<bool> for SettingValue {
    fn from(v: bool) -> Self {
        Self::Bool(v)
    }
}

impl From<&str> for SettingValue {
    fn from(v: &str) -> Self {
        Self::Text(v.to_string())
    }
}

impl From<String> for SettingValue {
    fn from(v: String) -> Self {
        Self::Text(v)
    }
}

/// Host configuration object: user values layered over defaults.
///
/// # Example
///
/// ```rust
/// use rematrix_config::Settings;
///
/// let mut settings = Settings::new();
/// settings.set_default_int("route 0", 0);
/// assert_eq!(settings.get_int("route 0"), Some(0));
///
/// settings.set_int("route 0", 1);
/// assert_eq!(settings.get_int("route 0"), Some(1));
///
/// // A wrongly typed user value falls back to the default.
/// settings.set("route 0", "left");
/// assert_eq!(settings.get_int("route 0"), Some(0));
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Settings {
    values: BTreeMap<String, SettingValue>,
    #[serde(skip)]
    defaults: BTreeMap<String, SettingValue>,
}

impl Settings {
    /// Creates an empty settings object.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets a user value.
    pub fn set(&mut self, key: impl Into<String>, value: impl Into<SettingValue>) {
        self.values.insert(key.into(), value.into());
    }

    /// Sets an integer user value.
    pub fn set_int(&mut self, key: impl Into<String>, value: i64) {
        self.set(key, value);
    }

    /// Sets the default for a key. User values still take precedence.
    pub fn set_default(&mut self, key: impl Into<String>, value: impl Into<SettingValue>) {
        self.defaults.insert(key.into(), value.into());
    }

    /// Sets an integer default.
    pub fn set_default_int(&mut self, key: impl Into<String>, value: i64) {
        self.set_default(key, value);
    }

    /// The effective value for a key: the user value, else the default.
    pub fn get(&self, key: &str) -> Option<&SettingValue> {
        self.values.get(key).or_else(|| self.defaults.get(key))
    }

    /// The user value for a key, ignoring defaults.
    pub fn user_value(&self, key: &str) -> Option<&SettingValue> {
        self.values.get(key)
    }

    /// The default for a key.
    pub fn default_value(&self, key: &str) -> Option<&SettingValue> {
        self.defaults.get(key)
    }

    /// Effective integer value for a key.
    ///
    /// A user value of the wrong type is skipped in favor of the default.
    pub fn get_int(&self, key: &str) -> Option<i64> {
        self.values
            .get(key)
            .and_then(SettingValue::as_int)
            .or_else(|| self.defaults.get(key).and_then(SettingValue::as_int))
    }

    /// Returns `true` if the user has set this key.
    pub fn has_user_value(&self, key: &str) -> bool {
        self.values.contains_key(key)
    }

    /// Removes a user value, returning it. The default (if any) remains.
    pub fn remove(&mut self, key: &str) -> Option<SettingValue> {
        self.values.remove(key)
    }

    /// Number of user values.
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Returns `true` if no user values are set.
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Iterates over user values in key order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &SettingValue)> {
        self.values.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// Serializes the user values as a JSON object (host state blob).
    pub fn to_json(&self) -> Result<String, ConfigError> {
        Ok(serde_json::to_string(self)?)
    }

    /// Restores user values from a JSON object. Defaults start empty.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(json)?)
    }
}
