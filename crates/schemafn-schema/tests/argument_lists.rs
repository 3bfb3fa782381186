//! Integration tests: argument-list schemas built by the engine validate
//! JSON arrays the way a call site expects.

use proptest::prelude::*;
use schemafn_core::Schema;
use schemafn_schema::{concat, sequence_of, tuple, Attributes, Explainer};
use serde_json::{json, Value};

fn int() -> Schema {
    Schema::from_value(json!({"type": "integer"}))
}

fn ints(n: usize) -> Schema {
    tuple((0..n).map(|_| (int(), Attributes::new())).collect())
}

#[test]
fn test_empty_tuple_accepts_only_empty_list() {
    let explainer = Explainer::new(&tuple(Vec::new())).unwrap();
    assert!(explainer.explain(&json!([])).is_none());
    assert!(explainer.explain(&json!([1])).is_some());
}

#[test]
fn test_tuple_rejects_short_and_long_lists() {
    let explainer = Explainer::new(&ints(2)).unwrap();
    assert!(explainer.explain(&json!([1, 2])).is_none());
    assert!(explainer.explain(&json!([1])).is_some());
    assert!(explainer.explain(&json!([1, 2, 3])).is_some());
}

#[test]
fn test_variadic_tail_accepts_any_count_of_matching_items() {
    let tail = sequence_of(Schema::from_value(json!({"type": "string"})));
    let schema = concat(&ints(1), &tail).unwrap();
    let explainer = Explainer::new(&schema).unwrap();
    assert!(explainer.explain(&json!([1])).is_none());
    assert!(explainer.explain(&json!([1, "a", "b"])).is_none());
    assert!(explainer.explain(&json!([1, "a", 2])).is_some());
    assert!(explainer.explain(&json!([])).is_some());
}

#[test]
fn test_shaped_tail_requires_its_elements() {
    let schema = concat(&ints(1), &ints(2)).unwrap();
    let explainer = Explainer::new(&schema).unwrap();
    assert!(explainer.explain(&json!([1, 2, 3])).is_none());
    assert!(explainer.explain(&json!([1, 2])).is_some());
    assert!(explainer.explain(&json!([1, 2, 3, 4])).is_some());
}

proptest! {
    #[test]
    fn prop_concat_of_tuples_is_tuple_of_summed_length(head in 0usize..6, tail in 0usize..6) {
        let joined = concat(&ints(head), &ints(tail)).unwrap();
        prop_assert_eq!(joined.tuple_len(), Some(head + tail));
        prop_assert_eq!(joined.keyword("minItems"), Some(&json!(head + tail)));

        let explainer = Explainer::new(&joined).unwrap();
        let exact = Value::Array((0..head + tail).map(|i| json!(i)).collect());
        prop_assert!(explainer.explain(&exact).is_none());
    }
}
