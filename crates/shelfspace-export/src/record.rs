//! Records: one row of tabular data
//!
//! A [`Record`] is an ordered field-name → [`Scalar`] map. Insertion order is
//! iteration order, so the first record of a set fixes the column order.

use indexmap::IndexMap;
use serde::Serialize;
use serde_json::Value as JsonValue;

use crate::value::Scalar;

/// Errors converting caller data into records
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RecordError {
    /// Top-level value did not serialize to a map
    #[error("record must serialize to an object, got {0}")]
    NotAnObject(&'static str),

    /// A field held a null, array or nested object
    #[error("field '{field}' is not a scalar ({kind})")]
    NonScalar { field: String, kind: &'static str },

    /// Serializer failure
    #[error("serialization failed: {0}")]
    Serialization(String),
}

/// One row of tabular data
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Record {
    fields: IndexMap<String, Scalar>,
}

impl Record {
    /// Create an empty record
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style insert
    #[inline]
    #[must_use]
    pub fn with(mut self, name: impl Into<String>, value: impl Into<Scalar>) -> Self {
        self.insert(name, value);
        self
    }

    /// Insert or replace a field
    ///
    /// Replacing keeps the field's original position.
    pub fn insert(&mut self, name: impl Into<String>, value: impl Into<Scalar>) -> Option<Scalar> {
        self.fields.insert(name.into(), value.into())
    }

    /// Look up a field
    #[inline]
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&Scalar> {
        self.fields.get(name)
    }

    /// Whether the record has a field
    #[inline]
    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.fields.contains_key(name)
    }

    /// Field names in insertion order
    pub fn field_names(&self) -> impl Iterator<Item = &str> {
        self.fields.keys().map(String::as_str)
    }

    /// Fields in insertion order
    pub fn iter(&self) -> impl Iterator<Item = (&str, &Scalar)> {
        self.fields.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// Number of fields
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    /// Check if empty
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Build a record from any serializable struct or map
    ///
    /// Field order follows serialization order, which for derived structs is
    /// declaration order.
    ///
    /// # Errors
    /// Returns error if the value is not a map of scalars
    pub fn from_serialize<T: Serialize + ?Sized>(value: &T) -> Result<Self, RecordError> {
        let json =
            serde_json::to_value(value).map_err(|e| RecordError::Serialization(e.to_string()))?;
        let JsonValue::Object(map) = json else {
            return Err(RecordError::NotAnObject(json_kind(&json)));
        };

        let mut record = Self::new();
        for (field, value) in map {
            let scalar = json_to_scalar(&field, value)?;
            record.fields.insert(field, scalar);
        }
        Ok(record)
    }
}

impl<K: Into<String>, V: Into<Scalar>> FromIterator<(K, V)> for Record {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self {
            fields: iter
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }
}

fn json_to_scalar(field: &str, value: JsonValue) -> Result<Scalar, RecordError> {
    match value {
        JsonValue::String(s) => Ok(Scalar::Text(s)),
        JsonValue::Bool(b) => Ok(Scalar::Bool(b)),
        JsonValue::Number(n) => {
            if let Some(i) = n.as_i64() {
                Ok(Scalar::Integer(i))
            } else {
                // u64 beyond i64::MAX and all non-integers land here
                n.as_f64().map(Scalar::Number).ok_or_else(|| RecordError::NonScalar {
                    field: field.to_string(),
                    kind: "number",
                })
            }
        }
        other => Err(RecordError::NonScalar {
            field: field.to_string(),
            kind: json_kind(&other),
        }),
    }
}

fn json_kind(value: &JsonValue) -> &'static str {
    match value {
        JsonValue::Null => "null",
        JsonValue::Bool(_) => "bool",
        JsonValue::Number(_) => "number",
        JsonValue::String(_) => "string",
        JsonValue::Array(_) => "array",
        JsonValue::Object(_) => "object",
    }
}
