//! Partial lead form produced by smart paste.

use std::collections::BTreeMap;

use serde::Serialize;
use serde_json::Value;
use tracing::debug;

use crate::models::lead::LeadField;

/// A set of field values to overlay onto the form. Absent fields are untouched on merge.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct LeadPatch(BTreeMap<LeadField, String>);

impl LeadPatch {
    /// Builds a patch from an extraction reply.
    ///
    /// Keys that are not field names and values that are not strings are
    /// dropped. A reply that is not a JSON object yields `None`.
    pub fn from_json(value: Value) -> Option<Self> {
        let Value::Object(map) = value else {
            return None;
        };

        let mut patch = LeadPatch::default();
        for (key, value) in map {
            match (key.parse::<LeadField>(), value) {
                (Ok(field), Value::String(text)) => patch.set(field, text),
                (Ok(field), other) => debug!("Ignoring non-string value for {field}: {other}"),
                (Err(e), _) => debug!("Ignoring extracted key: {e}"),
            }
        }
        Some(patch)
    }

    pub fn set(&mut self, field: LeadField, value: impl Into<String>) {
        self.0.insert(field, value.into());
    }

    #[cfg(test)]
    pub fn get(&self, field: LeadField) -> Option<&str> {
        self.0.get(&field).map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (LeadField, &str)> {
        self.0.iter().map(|(field, value)| (*field, value.as_str()))
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}
