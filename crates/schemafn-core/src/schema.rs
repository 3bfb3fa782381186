//! # Schema Values
//!
//! A [`Schema`] is a declarative description of the shape a value must
//! satisfy, expressed as a JSON Schema (draft 2020-12) document.
//!
//! ## Sequence Schemas
//!
//! Argument lists are validated as JSON arrays. A schema is
//! *sequence-shaped* when it is an object schema with `"type": "array"`.
//! Tuples are sequence schemas whose positional elements live under
//! `prefixItems`; the number of those elements is the tuple length.

use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// A JSON Schema document.
///
/// Cheap to clone relative to the work done with it: schemas are built once
/// at definition time and then only read.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Schema(Value);

impl Schema {
    /// Wrap a JSON value as a schema.
    ///
    /// No compilation happens here. Use `schemafn_schema::check` or build an
    /// explainer to find out whether the document is a valid JSON Schema.
    pub fn from_value(value: Value) -> Self {
        Self(value)
    }

    /// The canonical "accept anything" sentinel: the boolean schema `true`.
    pub fn any() -> Self {
        Self(Value::Bool(true))
    }

    /// Whether this is exactly the "anything" sentinel.
    ///
    /// `{}` also accepts every value but is not the sentinel.
    pub fn is_any(&self) -> bool {
        matches!(self.0, Value::Bool(true))
    }

    /// Whether this schema describes a sequence (`"type": "array"`).
    pub fn is_sequence(&self) -> bool {
        self.keyword("type").and_then(Value::as_str) == Some("array")
    }

    /// Number of top-level tuple elements, or `None` for non-sequence schemas.
    ///
    /// A sequence without `prefixItems` has zero tuple elements.
    pub fn tuple_len(&self) -> Option<usize> {
        if !self.is_sequence() {
            return None;
        }
        match self.keyword("prefixItems") {
            Some(Value::Array(items)) => Some(items.len()),
            Some(_) => None,
            None => Some(0),
        }
    }

    /// Look up a top-level keyword of an object schema.
    pub fn keyword(&self, name: &str) -> Option<&Value> {
        self.0.as_object().and_then(|obj| obj.get(name))
    }

    /// Borrow the underlying JSON document.
    pub fn as_value(&self) -> &Value {
        &self.0
    }

    /// Consume the schema and return the underlying JSON document.
    pub fn into_value(self) -> Value {
        self.0
    }
}

impl Default for Schema {
    fn default() -> Self {
        Self::any()
    }
}

impl From<Value> for Schema {
    fn from(value: Value) -> Self {
        Self(value)
    }
}

impl fmt::Display for Schema {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_any_is_boolean_true() {
        assert_eq!(Schema::any().as_value(), &json!(true));
        assert!(Schema::any().is_any());
        assert!(Schema::default().is_any());
    }

    #[test]
    fn test_empty_object_is_not_the_sentinel() {
        assert!(!Schema::from_value(json!({})).is_any());
    }

    #[test]
    fn test_is_sequence() {
        assert!(Schema::from_value(json!({"type": "array"})).is_sequence());
        assert!(
            Schema::from_value(json!({"type": "array", "items": {"type": "integer"}})).is_sequence()
        );
        assert!(!Schema::from_value(json!({"type": "integer"})).is_sequence());
        assert!(!Schema::any().is_sequence());
    }

    #[test]
    fn test_tuple_len() {
        let tuple = Schema::from_value(json!({
            "type": "array",
            "prefixItems": [{"type": "integer"}, {"type": "string"}],
            "items": false
        }));
        assert_eq!(tuple.tuple_len(), Some(2));
        assert_eq!(Schema::from_value(json!({"type": "array"})).tuple_len(), Some(0));
        assert_eq!(Schema::from_value(json!({"type": "string"})).tuple_len(), None);
    }

    #[test]
    fn test_deserialize_transparent() {
        let schema: Schema = serde_json::from_value(json!({"type": "integer"})).unwrap();
        assert_eq!(schema.keyword("type"), Some(&json!("integer")));
        assert_eq!(schema.to_string(), r#"{"type":"integer"}"#);
    }
}
