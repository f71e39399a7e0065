use crate::extract::ExtractError;
use serde::ser::{Serialize, SerializeMap, Serializer};

/// Sentinel stored in a field that could not be extracted
pub const NOT_AVAILABLE: &str = "NA";

/// Value of one record field
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize)]
#[serde(untagged)]
pub enum FieldValue {
    Text(String),
    List(Vec<String>),
}

impl FieldValue {
    pub fn not_available() -> Self {
        Self::Text(NOT_AVAILABLE.to_string())
    }

    pub fn is_not_available(&self) -> bool {
        matches!(self, Self::Text(text) if text == NOT_AVAILABLE)
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            Self::Text(text) => Some(text),
            Self::List(_) => None,
        }
    }

    /// Single-cell rendering for tabular export; lists are joined with `", "`
    pub fn to_cell(&self) -> String {
        match self {
            Self::Text(text) => text.clone(),
            Self::List(items) => items.join(", "),
        }
    }
}

impl From<String> for FieldValue {
    fn from(value: String) -> Self {
        Self::Text(value)
    }
}

impl From<&str> for FieldValue {
    fn from(value: &str) -> Self {
        Self::Text(value.to_string())
    }
}

impl From<Vec<String>> for FieldValue {
    fn from(value: Vec<String>) -> Self {
        Self::List(value)
    }
}

/// Ordered mapping from field name to value
///
/// The key set is not fixed: pages expose different fields, and the info
/// tables are copied over key by key. Insertion order is kept so exports list
/// columns the way the page listed them.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Record {
    fields: Vec<(String, FieldValue)>,
}

impl Record {
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets a field, replacing an existing value in place
    pub fn insert(&mut self, name: impl Into<String>, value: impl Into<FieldValue>) {
        let name = name.into();
        let value = value.into();
        match self.fields.iter_mut().find(|(key, _)| *key == name) {
            Some((_, slot)) => *slot = value,
            None => self.fields.push((name, value)),
        }
    }

    /// Runs `extract` and stores its value under `name`
    ///
    /// On failure the cause is logged with the field name and the field is set to
    /// [`NOT_AVAILABLE`]; the error never propagates.
    pub fn field<V, F>(&mut self, name: &str, extract: F)
    where
        V: Into<FieldValue>,
        F: FnOnce() -> Result<V, ExtractError>,
    {
        match extract() {
            Ok(value) => self.insert(name, value),
            Err(e) => {
                tracing::warn!("Error when fetching {}: {}", name, e);
                self.insert(name, FieldValue::not_available());
            }
        }
    }

    pub fn get(&self, name: &str) -> Option<&FieldValue> {
        self.fields
            .iter()
            .find(|(key, _)| key == name)
            .map(|(_, value)| value)
    }

    /// Text value of a field; None for missing or list fields
    pub fn text(&self, name: &str) -> Option<&str> {
        self.get(name).and_then(FieldValue::as_text)
    }

    pub fn remove(&mut self, name: &str) -> Option<FieldValue> {
        let index = self.fields.iter().position(|(key, _)| key == name)?;
        Some(self.fields.remove(index).1)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.get(name).is_some()
    }

    /// Copies every field of `other` into this record, overwriting shared keys
    pub fn merge(&mut self, other: Record) {
        for (name, value) in other.fields {
            self.insert(name, value);
        }
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.fields.iter().map(|(key, _)| key.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &FieldValue)> {
        self.fields.iter().map(|(key, value)| (key.as_str(), value))
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

impl Serialize for Record {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.fields.len()))?;
        for (key, value) in &self.fields {
            map.serialize_entry(key, value)?;
        }
        map.end()
    }
}
