//! # Explainers
//!
//! Compiled validators that report *why* a value fails a schema.
//!
//! An [`Explainer`] wraps a `jsonschema` validator built for draft 2020-12.
//! Checking a conforming value takes the validator's boolean fast path and
//! allocates nothing; only a failing value pays for collecting violations.
//!
//! ## Structured Explanations
//!
//! Every violation carries the JSON Pointer of the offending position in
//! the value, the JSON Pointer of the schema keyword that rejected it, and
//! a human-readable message.

use std::fmt;

use jsonschema::{Draft, Validator};
use schemafn_core::{Schema, SchemaError};
use serde_json::Value;

/// A single violation with structured context.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Violation {
    /// JSON Pointer path to the violating position in the value.
    pub instance_path: String,
    /// JSON Pointer path within the schema that triggered the error.
    pub schema_path: String,
    /// Human-readable description of the violation.
    pub message: String,
}

impl fmt::Display for Violation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.instance_path.is_empty() {
            write!(f, "  (root): {}", self.message)
        } else {
            write!(f, "  {}: {}", self.instance_path, self.message)
        }
    }
}

/// Why a value failed a schema.
#[derive(Debug, Clone, PartialEq)]
pub struct Explanation {
    value: Value,
    violations: Vec<Violation>,
}

impl Explanation {
    /// The value that was rejected.
    pub fn value(&self) -> &Value {
        &self.value
    }

    /// Returns a slice of all violations.
    pub fn violations(&self) -> &[Violation] {
        &self.violations
    }

    /// Returns the number of violations.
    pub fn len(&self) -> usize {
        self.violations.len()
    }

    /// Returns true if there are no violations.
    pub fn is_empty(&self) -> bool {
        self.violations.is_empty()
    }
}

impl fmt::Display for Explanation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, v) in self.violations.iter().enumerate() {
            if i > 0 {
                writeln!(f)?;
            }
            write!(f, "{v}")?;
        }
        Ok(())
    }
}

/// A compiled validator for one schema.
///
/// `Send + Sync`: one explainer serves every thread that calls through it.
pub struct Explainer {
    validator: Validator,
}

impl Explainer {
    /// Compile an explainer for `schema`.
    ///
    /// # Errors
    ///
    /// Returns `SchemaError::Malformed` if the document is not a valid
    /// draft 2020-12 JSON Schema.
    pub fn new(schema: &Schema) -> Result<Self, SchemaError> {
        let mut opts = jsonschema::options();
        opts.with_draft(Draft::Draft202012);
        let validator = opts
            .build(schema.as_value())
            .map_err(|e| SchemaError::Malformed {
                schema: schema.to_string(),
                reason: e.to_string(),
            })?;
        Ok(Self { validator })
    }

    /// Whether `value` conforms. Never allocates.
    pub fn is_valid(&self, value: &Value) -> bool {
        self.validator.is_valid(value)
    }

    /// Explain why `value` does not conform, or `None` if it does.
    pub fn explain(&self, value: &Value) -> Option<Explanation> {
        if self.validator.is_valid(value) {
            return None;
        }
        let violations = self
            .validator
            .iter_errors(value)
            .map(|e| Violation {
                instance_path: e.instance_path.to_string(),
                schema_path: e.schema_path.to_string(),
                message: e.to_string(),
            })
            .collect();
        Some(Explanation {
            value: value.clone(),
            violations,
        })
    }
}

impl fmt::Debug for Explainer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Explainer").finish_non_exhaustive()
    }
}

/// Check that `schema` compiles, discarding the validator.
///
/// # Errors
///
/// Returns `SchemaError::Malformed` if it does not.
pub fn check(schema: &Schema) -> Result<(), SchemaError> {
    Explainer::new(schema).map(|_| ())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_valid_value_has_no_explanation() {
        let explainer = Explainer::new(&Schema::from_value(json!({"type": "integer"}))).unwrap();
        assert!(explainer.explain(&json!(42)).is_none());
        assert!(explainer.is_valid(&json!(42)));
    }

    #[test]
    fn test_invalid_value_is_explained() {
        let explainer = Explainer::new(&Schema::from_value(json!({"type": "integer"}))).unwrap();
        let explanation = explainer.explain(&json!("forty-two")).unwrap();
        assert_eq!(explanation.value(), &json!("forty-two"));
        assert!(!explanation.is_empty());
        assert_eq!(explanation.violations()[0].instance_path, "");
        assert!(explanation.to_string().starts_with("  (root): "));
    }

    #[test]
    fn test_instance_path_points_at_element() {
        let schema = Schema::from_value(json!({
            "type": "array",
            "prefixItems": [{"type": "integer"}, {"type": "string"}],
            "items": false
        }));
        let explainer = Explainer::new(&schema).unwrap();
        let explanation = explainer.explain(&json!([1, 2])).unwrap();
        assert!(explanation
            .violations()
            .iter()
            .any(|v| v.instance_path == "/1"));
    }

    #[test]
    fn test_any_accepts_everything() {
        let explainer = Explainer::new(&Schema::any()).unwrap();
        for value in [json!(null), json!(1), json!("s"), json!([1, {"a": []}])] {
            assert!(explainer.explain(&value).is_none());
        }
    }

    #[test]
    fn test_malformed_schema_is_rejected() {
        let err = check(&Schema::from_value(json!({"type": 12}))).unwrap_err();
        assert!(matches!(err, SchemaError::Malformed { .. }));
    }
}
