use std::collections::btree_map;
use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::{MessageError, Result};

/// 2^64 and 2^63 as exact doubles. `u64::MAX as f64` rounds up to 2^64.
const U64_LIMIT: f64 = 18_446_744_073_709_551_616.0;
const I64_LIMIT: f64 = 9_223_372_036_854_775_808.0;

/// Key/value arguments carried by requests and replies.
///
/// Keys are kept sorted so the encoded form of a given set of parameters is
/// always the same byte sequence. Accessors are typed and never fall back to
/// a default: a missing key or a value of another type is an error.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Parameters {
    entries: BTreeMap<String, Value>,
}

impl Parameters {
    /// Create an empty parameter set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style insert.
    pub fn with(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.entries.insert(key.into(), value.into());
        self
    }

    /// Insert a value, returning the previous value for the key.
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<Value>) -> Option<Value> {
        self.entries.insert(key.into(), value.into())
    }

    /// Remove a value.
    pub fn remove(&mut self, key: &str) -> Option<Value> {
        self.entries.remove(key)
    }

    pub fn contains(&self, key: &str) -> bool {
        self.entries.contains_key(key)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Keys in sorted order.
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }

    pub fn iter(&self) -> btree_map::Iter<'_, String, Value> {
        self.entries.iter()
    }

    /// Raw value for a key.
    pub fn value(&self, key: &str) -> Result<&Value> {
        self.entries
            .get(key)
            .ok_or_else(|| MessageError::MissingParameter(key.to_string()))
    }

    /// Unsigned integer value.
    ///
    /// Integral floats are accepted since some peers encode every number as
    /// a double. Floats at or above 2^64 are a type error.
    pub fn uint64_value(&self, key: &str) -> Result<u64> {
        let value = self.value(key)?;
        if let Some(n) = value.as_u64() {
            return Ok(n);
        }
        match value.as_f64() {
            Some(f) if f.fract() == 0.0 && f >= 0.0 && f < U64_LIMIT => Ok(f as u64),
            _ => Err(type_error(key, "unsigned integer", value)),
        }
    }

    /// Signed integer value.
    pub fn int64_value(&self, key: &str) -> Result<i64> {
        let value = self.value(key)?;
        if let Some(n) = value.as_i64() {
            return Ok(n);
        }
        match value.as_f64() {
            Some(f) if f.fract() == 0.0 && f >= -I64_LIMIT && f < I64_LIMIT => Ok(f as i64),
            _ => Err(type_error(key, "signed integer", value)),
        }
    }

    pub fn float64_value(&self, key: &str) -> Result<f64> {
        let value = self.value(key)?;
        value
            .as_f64()
            .ok_or_else(|| type_error(key, "number", value))
    }

    pub fn bool_value(&self, key: &str) -> Result<bool> {
        let value = self.value(key)?;
        value
            .as_bool()
            .ok_or_else(|| type_error(key, "bool", value))
    }

    pub fn string_value(&self, key: &str) -> Result<&str> {
        let value = self.value(key)?;
        value
            .as_str()
            .ok_or_else(|| type_error(key, "string", value))
    }

    /// Nested key/value object.
    pub fn nested_value(&self, key: &str) -> Result<Parameters> {
        let value = self.value(key)?;
        match value {
            Value::Object(map) => Ok(map
                .iter()
                .map(|(k, v)| (k.clone(), v.clone()))
                .collect()),
            other => Err(type_error(key, "object", other)),
        }
    }

    /// List of strings. Every element must be a string.
    pub fn string_list(&self, key: &str) -> Result<Vec<String>> {
        let value = self.value(key)?;
        let items = value
            .as_array()
            .ok_or_else(|| type_error(key, "array", value))?;
        items
            .iter()
            .map(|item| {
                item.as_str()
                    .map(str::to_string)
                    .ok_or_else(|| type_error(key, "array of strings", item))
            })
            .collect()
    }
}

impl FromIterator<(String, Value)> for Parameters {
    fn from_iter<I: IntoIterator<Item = (String, Value)>>(iter: I) -> Self {
        Self {
            entries: iter.into_iter().collect(),
        }
    }
}

impl<'a> IntoIterator for &'a Parameters {
    type Item = (&'a String, &'a Value);
    type IntoIter = btree_map::Iter<'a, String, Value>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}

impl From<Parameters> for Value {
    fn from(params: Parameters) -> Self {
        Value::Object(params.entries.into_iter().collect())
    }
}

fn type_error(key: &str, expected: &'static str, found: &Value) -> MessageError {
    MessageError::ParameterType {
        key: key.to_string(),
        expected,
        found: value_kind(found),
    }
}

fn value_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "bool",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
