use std::collections::BTreeMap;

/// A typed parameter value.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(
    feature = "serde-derive",
    derive(serde::Serialize, serde::Deserialize)
)]
pub enum Value {
    Bool(bool),
    Int(i64),
    Float(f64),
    Text(String),
}

impl From<bool> for Value {
    fn from(value: bool) -> Self {
        Self::Bool(value)
    }
}

impl From<i64> for Value {
    fn from(value: i64) -> Self {
        Self::Int(value)
    }
}

impl From<f64> for Value {
    fn from(value: f64) -> Self {
        Self::Float(value)
    }
}

impl From<&str> for Value {
    fn from(value: &str) -> Self {
        Self::Text(value.to_string())
    }
}

impl From<String> for Value {
    fn from(value: String) -> Self {
        Self::Text(value)
    }
}

/// Named parameters attached to a callback at registration time.
///
/// A [`FnCallback`](crate::FnCallback) hands its own bag to the wrapped
/// closure on every dispatch, so values set here (counters, thresholds,
/// labels) stay visible and mutable for the life of the registration.
#[derive(Debug, Clone, Default, PartialEq)]
#[cfg_attr(
    feature = "serde-derive",
    derive(serde::Serialize, serde::Deserialize)
)]
#[cfg_attr(feature = "serde-derive", serde(transparent))]
pub struct Params(BTreeMap<String, Value>);

impl Params {
    /// Creates an empty bag.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a parameter, builder style.
    #[must_use]
    pub fn with(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.set(key, value);
        self
    }

    /// Inserts or replaces a parameter.
    pub fn set(&mut self, key: impl Into<String>, value: impl Into<Value>) {
        self.0.insert(key.into(), value.into());
    }

    /// Returns the raw value for `key`, if present.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.0.get(key)
    }

    /// Returns the boolean at `key`, if present and a boolean.
    #[must_use]
    pub fn get_bool(&self, key: &str) -> Option<bool> {
        match self.0.get(key) {
            Some(Value::Bool(value)) => Some(*value),
            _ => None,
        }
    }

    /// Returns the integer at `key`, if present and an integer.
    #[must_use]
    pub fn get_int(&self, key: &str) -> Option<i64> {
        match self.0.get(key) {
            Some(Value::Int(value)) => Some(*value),
            _ => None,
        }
    }

    /// Returns the float at `key`, if present and a float.
    #[must_use]
    pub fn get_float(&self, key: &str) -> Option<f64> {
        match self.0.get(key) {
            Some(Value::Float(value)) => Some(*value),
            _ => None,
        }
    }

    /// Returns the text at `key`, if present and text.
    #[must_use]
    pub fn get_text(&self, key: &str) -> Option<&str> {
        match self.0.get(key) {
            Some(Value::Text(value)) => Some(value.as_str()),
            _ => None,
        }
    }

    /// Removes and returns the value at `key`.
    pub fn remove(&mut self, key: &str) -> Option<Value> {
        self.0.remove(key)
    }

    /// Number of parameters in the bag.
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Whether the bag is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}
