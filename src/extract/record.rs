//! Flat output records produced by the extraction pipeline.

use std::collections::BTreeMap;
use std::fmt;

use serde::Serialize;

/// A single scalar field value.
///
/// The empty string is the "missing" sentinel; numeric fields that survive
/// extraction keep their integer type so downstream filtering can use them
/// without re-parsing.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum FieldValue {
    Str(String),
    Int(i64),
}

impl FieldValue {
    /// The empty-string missing sentinel.
    pub fn empty() -> Self {
        FieldValue::Str(String::new())
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            FieldValue::Str(s) => Some(s),
            FieldValue::Int(_) => None,
        }
    }

    pub fn as_i64(&self) -> Option<i64> {
        match self {
            FieldValue::Int(i) => Some(*i),
            FieldValue::Str(_) => None,
        }
    }
}

impl fmt::Display for FieldValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FieldValue::Str(s) => write!(f, "{s}"),
            FieldValue::Int(i) => write!(f, "{i}"),
        }
    }
}

impl From<String> for FieldValue {
    fn from(s: String) -> Self {
        FieldValue::Str(s)
    }
}

impl From<&str> for FieldValue {
    fn from(s: &str) -> Self {
        FieldValue::Str(s.to_string())
    }
}

impl From<i64> for FieldValue {
    fn from(i: i64) -> Self {
        FieldValue::Int(i)
    }
}

/// A flat, schema-stable record for one content item.
///
/// Built incrementally by the extraction pipeline; every field the pipeline
/// names is always written, so consumers never see a missing key. Once the
/// pipeline finishes, the record is only read.
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct OutputRecord {
    #[serde(flatten)]
    fields: BTreeMap<String, FieldValue>,
}

impl OutputRecord {
    pub fn new() -> Self {
        Self::default()
    }

    /// Write a field, replacing any previous value.
    pub fn set(&mut self, key: impl Into<String>, value: impl Into<FieldValue>) {
        self.fields.insert(key.into(), value.into());
    }

    pub fn get(&self, key: &str) -> Option<&FieldValue> {
        self.fields.get(key)
    }

    /// Read a field as text; missing or numeric fields read as `None`.
    pub fn get_str(&self, key: &str) -> Option<&str> {
        self.fields.get(key).and_then(FieldValue::as_str)
    }

    /// The raw creation epoch, when extraction found a usable one.
    pub fn create_timestamp(&self) -> Option<i64> {
        self.fields.get("create_timestamp").and_then(FieldValue::as_i64)
    }

    /// Project the record onto an ordered key list.
    ///
    /// Keys the record does not carry project to the empty sentinel, so the
    /// output row always has exactly `keys.len()` values in key order.
    pub fn project(&self, keys: &[String]) -> Vec<FieldValue> {
        keys.iter()
            .map(|key| self.fields.get(key).cloned().unwrap_or_else(FieldValue::empty))
            .collect()
    }

    /// Iterate over all fields in key order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &FieldValue)> {
        self.fields.iter().map(|(k, v)| (k.as_str(), v))
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}
