//! Integration tests: the calling contract of compiled functions.
//!
//! Nothing in this file touches the runtime toggle, which stays at its
//! default (on) for the whole test binary.

use std::collections::BTreeSet;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use proptest::prelude::*;
use schemafn_compile::{
    ArgumentDecl, ArityBody, CallError, CompileConfig, Compiler, DefinitionError, Direction,
    FormError, FunctionDef, ValidationDecision,
};
use schemafn_core::{Schema, SchemaError, TypeToken};
use schemafn_schema::{tuple, Explainer, SchemaRegistry, TypeSchemaRegistry};
use serde_json::{json, Value};

fn compiler() -> Compiler {
    Compiler::new(CompileConfig::enabled()).with_registry(Arc::new(TypeSchemaRegistry::new()))
}

fn int() -> Value {
    json!({"type": "integer"})
}

fn add() -> FunctionDef {
    FunctionDef::new("add", int()).arity(ArityBody::new(
        vec![
            ArgumentDecl::named("x").with_schema(int()),
            ArgumentDecl::named("y").with_schema(int()),
        ],
        |args| {
            let x = args[0].as_i64().ok_or("x")?;
            let y = args[1].as_i64().ok_or("y")?;
            Ok(json!(x + y))
        },
    ))
}

fn arity_of(n: usize) -> ArityBody {
    let args = (0..n).map(|i| ArgumentDecl::named(format!("a{i}"))).collect();
    ArityBody::new(args, |_| Ok(Value::Null))
}

#[test]
fn test_wrapper_is_transparent_on_success() {
    let (validated, _) = compiler().compile(add().always_validate()).unwrap();
    let (bare, _) = compiler().compile(add().never_validate()).unwrap();
    for (x, y) in [(0, 0), (1, 2), (-5, 3), (i64::MAX - 1, 1)] {
        let args = vec![json!(x), json!(y)];
        assert_eq!(
            validated.call(args.clone()).unwrap(),
            bare.call(args).unwrap()
        );
    }
}

#[test]
fn test_non_integer_argument_is_input_error() {
    let (inc, _) = compiler()
        .compile(
            FunctionDef::new("inc", int())
                .always_validate()
                .arity(ArityBody::new(
                    vec![ArgumentDecl::named("x").with_schema(int())],
                    |args| Ok(json!(args[0].as_i64().unwrap_or_default() + 1)),
                )),
        )
        .unwrap();
    let err = inc.call(vec![json!("1")]).unwrap_err();
    let validation = err.as_validation().expect("validation error");
    assert_eq!(validation.direction(), Direction::Input);
    assert!(validation
        .explanation()
        .violations()
        .iter()
        .any(|v| v.instance_path == "/0"));
}

#[test]
fn test_bad_output_raised_after_side_effects() {
    let effects = Arc::new(AtomicUsize::new(0));
    let seen = Arc::clone(&effects);
    let def = FunctionDef::new("broken", int())
        .always_validate()
        .arity(ArityBody::new(vec![], move |_| {
            seen.fetch_add(1, Ordering::SeqCst);
            Ok(json!("not a number"))
        }));
    let (broken, schema) = compiler().compile(def).unwrap();
    let err = broken.call(vec![]).unwrap_err();
    let validation = err.as_validation().expect("validation error");
    assert_eq!(validation.direction(), Direction::Output);
    assert_eq!(validation.schema(), schema.output());
    assert_eq!(validation.explanation().value(), &json!("not a number"));
    assert_eq!(effects.load(Ordering::SeqCst), 1);
}

#[test]
fn test_two_arities_of_two_rejected() {
    let def = FunctionDef::new("f", Schema::any())
        .arity(ArityBody::new(
            vec![
                ArgumentDecl::named("a").with_schema(int()),
                ArgumentDecl::named("b").with_schema(int()),
            ],
            |_| Ok(Value::Null),
        ))
        .arity(ArityBody::new(
            vec![
                ArgumentDecl::named("s").with_schema(json!({"type": "string"})),
                ArgumentDecl::named("t"),
            ],
            |_| Ok(Value::Null),
        ));
    let err = compiler().compile(def).unwrap_err();
    assert_eq!(err, DefinitionError::DuplicateArity { arity: 2 });
    assert!(err.to_string().contains("arities must be distinct"));
}

#[test]
fn test_dispatch_table_sorted() {
    let def = FunctionDef::new("f", Schema::any())
        .arity(arity_of(3))
        .arity(arity_of(1));
    let (_, schema) = compiler().compile(def).unwrap();
    assert_eq!(schema.arities(), vec![1, 3]);
}

#[test]
fn test_zero_argument_arity_is_empty_tuple() {
    let (f, schema) = compiler()
        .compile(FunctionDef::new("nullary", Schema::any()).arity(arity_of(0)))
        .unwrap();
    let input = schema.input(0).expect("arity 0");
    assert_eq!(input, &tuple(Vec::new()));
    assert!(Explainer::new(input).unwrap().explain(&json!([])).is_none());
    assert_eq!(f.call(Vec::new()).unwrap(), Value::Null);
}

#[test]
fn test_conditional_validates_while_toggle_on() {
    let (add, _) = compiler().compile(add()).unwrap();
    assert_eq!(add.decision(), ValidationDecision::Conditional);
    let err = add.call(vec![json!(1), json!("2")]).unwrap_err();
    assert!(matches!(err, CallError::Validation(_)));
}

#[test]
fn test_type_tag_resolved_at_definition() {
    let registry = Arc::new(TypeSchemaRegistry::new());
    registry.store(
        TypeToken::named("Point"),
        Schema::from_value(json!({
            "type": "object",
            "required": ["x", "y"],
            "properties": {"x": {"type": "number"}, "y": {"type": "number"}}
        })),
    );
    let compiler = Compiler::new(CompileConfig::enabled()).with_registry(registry);
    let def = FunctionDef::new("norm1", json!({"type": "number"}))
        .always_validate()
        .arity(ArityBody::new(
            vec![ArgumentDecl::named("p").with_type(TypeToken::named("Point"))],
            |args| {
                let x = args[0]["x"].as_f64().unwrap_or_default();
                let y = args[0]["y"].as_f64().unwrap_or_default();
                Ok(json!(x.abs() + y.abs()))
            },
        ));
    let (norm1, _) = compiler.compile(def).unwrap();
    assert_eq!(norm1.call(vec![json!({"x": 3, "y": -4})]).unwrap(), json!(7.0));
    assert!(norm1.call(vec![json!({"x": 3})]).is_err());
}

#[test]
fn test_shaped_rest_validates_tail() {
    let def = FunctionDef::new("pairs", int())
        .always_validate()
        .arity(ArityBody::new(
            vec![
                ArgumentDecl::named("k").with_schema(json!({"type": "string"})),
                ArgumentDecl::rest_nested(vec![
                    ArgumentDecl::named("a").with_schema(int()),
                    ArgumentDecl::named("b").with_schema(int()),
                ]),
            ],
            |args| Ok(json!(args.len())),
        ));
    let (pairs, _) = compiler().compile(def).unwrap();
    assert_eq!(pairs.call(vec![json!("k"), json!(1), json!(2)]).unwrap(), json!(3));
    assert!(pairs.call(vec![json!("k"), json!(1)]).is_err());
    assert!(pairs.call(vec![json!("k"), json!(1), json!("2")]).is_err());
}

#[test]
fn test_destructured_slot_with_two_rest_bindings_rejected() {
    let def = FunctionDef::new("f", Schema::any()).arity(ArityBody::new(
        vec![ArgumentDecl::nested(vec![ArgumentDecl::rest("a"), ArgumentDecl::rest("b")])],
        |_| Ok(Value::Null),
    ));
    let err = compiler().compile(def).unwrap_err();
    assert!(matches!(err, DefinitionError::Form(FormError::BadRestBinding(_))));
    assert!(err.to_string().starts_with("bad rest-argument binding"));
}

#[test]
fn test_schema_engine_error_reaches_compile_unchanged() {
    let def = FunctionDef::new("uniq", Schema::any()).arity(ArityBody::new(
        vec![ArgumentDecl::rest("xs").with_schema(json!({"type": "array", "uniqueItems": true}))],
        |_| Ok(Value::Null),
    ));
    let err = compiler().compile(def).unwrap_err();
    match err {
        DefinitionError::Schema(SchemaError::UnsupportedSequence { keyword, .. }) => {
            assert_eq!(keyword, "uniqueItems");
        }
        other => panic!("expected UnsupportedSequence, got {other:?}"),
    }
}

#[test]
fn test_shaped_rest_arity_counts() {
    let def = FunctionDef::new("pairs", Schema::any()).arity(ArityBody::new(
        vec![
            ArgumentDecl::named("k"),
            ArgumentDecl::rest_nested(vec![ArgumentDecl::named("a"), ArgumentDecl::named("b")]),
        ],
        |_| Ok(Value::Null),
    ));
    let (pairs, schema) = compiler().compile(def).unwrap();
    assert_eq!(pairs.arities()[0].arity(), 1);
    assert_eq!(schema.arities(), vec![3]);
    assert!(schema.input(3).is_some());
    assert!(schema.input(1).is_none());
}

proptest! {
    #[test]
    fn prop_dispatch_table_is_ascending(
        counts in proptest::collection::btree_set(0usize..8, 1..6)
    ) {
        let mut order: Vec<usize> = counts.iter().copied().collect();
        order.reverse();
        let def = order
            .iter()
            .fold(FunctionDef::new("f", Schema::any()), |def, &n| def.arity(arity_of(n)));
        let (_, schema) = compiler().compile(def).unwrap();
        prop_assert_eq!(schema.arities(), counts.iter().copied().collect::<Vec<_>>());
    }

    #[test]
    fn prop_repeated_arity_always_rejected(counts in proptest::collection::vec(0usize..4, 2..6)) {
        let distinct: BTreeSet<usize> = counts.iter().copied().collect();
        let def = counts
            .iter()
            .fold(FunctionDef::new("f", Schema::any()), |def, &n| def.arity(arity_of(n)));
        let result = compiler().compile(def);
        if distinct.len() == counts.len() {
            prop_assert!(result.is_ok());
        } else {
            prop_assert!(
                matches!(result, Err(DefinitionError::DuplicateArity { .. })),
                "expected duplicate arity error"
            );
        }
    }
}
