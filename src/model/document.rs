use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Name of the privileged identifier field.
pub const ID_FIELD: &str = "_id";

/// One field value of a schema-less document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(from = "serde_json::Value", into = "serde_json::Value")]
pub enum FieldValue {
    Null,
    Bool(bool),
    Number(serde_json::Number),
    String(String),
    /// Nested object or array, kept as JSON and shown serialized.
    Structured(serde_json::Value),
}

impl FieldValue {
    /// Text shown in a table cell: null is empty, structured values are compact JSON.
    pub fn cell_text(&self) -> String {
        match self {
            FieldValue::Null => String::new(),
            FieldValue::Bool(b) => b.to_string(),
            FieldValue::Number(n) => n.to_string(),
            FieldValue::String(s) => s.clone(),
            FieldValue::Structured(v) => v.to_string(),
        }
    }

    pub fn is_structured(&self) -> bool {
        matches!(self, FieldValue::Structured(_))
    }
}

impl From<serde_json::Value> for FieldValue {
    fn from(value: serde_json::Value) -> Self {
        match value {
            serde_json::Value::Null => FieldValue::Null,
            serde_json::Value::Bool(b) => FieldValue::Bool(b),
            serde_json::Value::Number(n) => FieldValue::Number(n),
            serde_json::Value::String(s) => FieldValue::String(s),
            other => FieldValue::Structured(other),
        }
    }
}

impl From<FieldValue> for serde_json::Value {
    fn from(value: FieldValue) -> Self {
        match value {
            FieldValue::Null => serde_json::Value::Null,
            FieldValue::Bool(b) => serde_json::Value::Bool(b),
            FieldValue::Number(n) => serde_json::Value::Number(n),
            FieldValue::String(s) => serde_json::Value::String(s),
            FieldValue::Structured(v) => v,
        }
    }
}

/// A schema-less record. Field order is irrelevant; columns are derived per page.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Document {
    pub fields: BTreeMap<String, FieldValue>,
}

impl Document {
    pub fn get(&self, field: &str) -> Option<&FieldValue> {
        self.fields.get(field)
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.fields.keys().map(String::as_str)
    }

    /// The identifier used to address this document for deletion.
    pub fn id(&self) -> Option<String> {
        match self.fields.get(ID_FIELD)? {
            FieldValue::Null => None,
            value => Some(value.cell_text()),
        }
    }
}

impl<K: Into<String>> FromIterator<(K, FieldValue)> for Document {
    fn from_iter<I: IntoIterator<Item = (K, FieldValue)>>(iter: I) -> Self {
        Self {
            fields: iter.into_iter().map(|(k, v)| (k.into(), v)).collect(),
        }
    }
}
