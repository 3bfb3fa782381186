//! # Tuple and Sequence Construction
//!
//! Builds the array schemas that describe argument lists.
//!
//! ## Layout
//!
//! A tuple of `n` elements is
//!
//! ```json
//! {"type": "array", "prefixItems": [e0, ..., en-1], "minItems": n, "items": false}
//! ```
//!
//! where each element `ei` is `{"allOf": [schema], ...attributes}`. Wrapping
//! in `allOf` keeps the element's attributes (its binding name, carried as
//! `"title"`) from colliding with keywords of the element schema itself.
//! `prefixItems` is omitted for the empty tuple, since the draft 2020-12
//! meta-schema requires it to be non-empty.
//!
//! ## Concatenation
//!
//! A variadic argument list is a tuple head followed by a sequence tail.
//! [`concat`] appends the tail's positional elements to the head, adopts the
//! tail's `items` as the open-ended trailer, and offsets `minItems` and
//! `maxItems` by the head length. Only those keywords can be spliced; any
//! other array keyword on the tail is rejected.

use schemafn_core::{Schema, SchemaError};
use serde_json::{Map, Value};

/// Attribute map attached to one tuple element.
pub type Attributes = Map<String, Value>;

/// Keywords a sequence tail may carry and still be spliced onto a tuple.
const SPLICEABLE_KEYWORDS: &[&str] = &[
    "type",
    "prefixItems",
    "items",
    "minItems",
    "maxItems",
    "title",
    "description",
    "$comment",
];

/// Build a closed tuple schema from ordered `(schema, attributes)` pairs.
pub fn tuple(elements: Vec<(Schema, Attributes)>) -> Schema {
    let len = elements.len();
    let prefix: Vec<Value> = elements
        .into_iter()
        .map(|(schema, attributes)| element(schema, attributes))
        .collect();
    closed_array(prefix, Value::Bool(false), len, None)
}

/// Build the open-ended sequence `{"type": "array", "items": schema}`.
pub fn sequence_of(schema: Schema) -> Schema {
    let mut obj = Map::new();
    obj.insert("type".into(), Value::from("array"));
    obj.insert("items".into(), schema.into_value());
    Schema::from_value(Value::Object(obj))
}

/// Splice a sequence-shaped `tail` onto the tuple `head`.
///
/// # Errors
///
/// Returns `SchemaError::NotATuple` if either side is not sequence-shaped,
/// and `SchemaError::UnsupportedSequence` if the tail carries an array
/// keyword that has no meaning once spliced.
pub fn concat(head: &Schema, tail: &Schema) -> Result<Schema, SchemaError> {
    let head_items = prefix_items(head)?;
    let tail_items = prefix_items(tail)?;

    if let Some(obj) = tail.as_value().as_object() {
        if let Some(keyword) = obj
            .keys()
            .find(|k| !SPLICEABLE_KEYWORDS.contains(&k.as_str()))
        {
            return Err(SchemaError::UnsupportedSequence {
                keyword: keyword.clone(),
                schema: tail.to_string(),
            });
        }
    }

    let offset = head_items.len();
    let min = offset + count_keyword(tail, "minItems")?.unwrap_or(0);
    let max = count_keyword(tail, "maxItems")?.map(|m| offset + m);
    let trailer = tail.keyword("items").cloned().unwrap_or(Value::Bool(true));

    let mut prefix = head_items;
    prefix.extend(tail_items);
    Ok(closed_array(prefix, trailer, min, max))
}

fn element(schema: Schema, mut attributes: Attributes) -> Value {
    attributes.insert("allOf".into(), Value::Array(vec![schema.into_value()]));
    Value::Object(attributes)
}

fn closed_array(prefix: Vec<Value>, items: Value, min: usize, max: Option<usize>) -> Schema {
    let mut obj = Map::new();
    obj.insert("type".into(), Value::from("array"));
    if !prefix.is_empty() {
        obj.insert("prefixItems".into(), Value::Array(prefix));
    }
    obj.insert("minItems".into(), Value::from(min));
    if let Some(max) = max {
        obj.insert("maxItems".into(), Value::from(max));
    }
    obj.insert("items".into(), items);
    Schema::from_value(Value::Object(obj))
}

fn prefix_items(schema: &Schema) -> Result<Vec<Value>, SchemaError> {
    if !schema.is_sequence() {
        return Err(SchemaError::NotATuple {
            schema: schema.to_string(),
        });
    }
    match schema.keyword("prefixItems") {
        None => Ok(Vec::new()),
        Some(Value::Array(items)) => Ok(items.clone()),
        Some(_) => Err(SchemaError::NotATuple {
            schema: schema.to_string(),
        }),
    }
}

fn count_keyword(schema: &Schema, keyword: &str) -> Result<Option<usize>, SchemaError> {
    match schema.keyword(keyword) {
        None => Ok(None),
        Some(v) => v
            .as_u64()
            .and_then(|n| usize::try_from(n).ok())
            .map(Some)
            .ok_or_else(|| SchemaError::Malformed {
                schema: schema.to_string(),
                reason: format!("'{keyword}' must be a non-negative integer"),
            }),
    }
}
