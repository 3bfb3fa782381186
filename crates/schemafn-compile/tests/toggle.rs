//! Integration tests: the process-wide validation toggle.
//!
//! Every test here flips global state, so each one holds `TOGGLE_LOCK` and
//! restores the toggle before releasing it.

use std::sync::{Arc, Mutex, MutexGuard};

use schemafn_compile::{
    set_validation_enabled, validation_enabled, ArgumentDecl, ArityBody, CompileConfig,
    CompiledFn, Compiler, FunctionDef,
};
use schemafn_schema::TypeSchemaRegistry;
use serde_json::{json, Value};

static TOGGLE_LOCK: Mutex<()> = Mutex::new(());

fn lock() -> MutexGuard<'static, ()> {
    let guard = TOGGLE_LOCK.lock().unwrap_or_else(|e| e.into_inner());
    set_validation_enabled(true);
    guard
}

fn identity(def: FunctionDef) -> CompiledFn {
    Compiler::new(CompileConfig::enabled())
        .with_registry(Arc::new(TypeSchemaRegistry::new()))
        .compile(def)
        .unwrap()
        .0
}

fn int_identity() -> FunctionDef {
    FunctionDef::new("id", json!({"type": "integer"})).arity(ArityBody::new(
        vec![ArgumentDecl::named("x").with_schema(json!({"type": "integer"}))],
        |args| Ok(args[0].clone()),
    ))
}

#[test]
fn test_default_is_enabled() {
    let _guard = lock();
    assert!(validation_enabled());
}

#[test]
fn test_disabling_skips_conditional_validation() {
    let _guard = lock();
    let id = identity(int_identity());

    assert!(id.call(vec![json!("x")]).is_err());

    assert!(set_validation_enabled(false));
    assert_eq!(id.call(vec![json!("x")]).unwrap(), json!("x"));

    assert!(!set_validation_enabled(true));
    assert!(id.call(vec![json!("x")]).is_err());
}

#[test]
fn test_always_validate_ignores_toggle() {
    let _guard = lock();
    let id = identity(int_identity().always_validate());

    set_validation_enabled(false);
    let result = id.call(vec![json!("x")]);
    set_validation_enabled(true);

    assert!(result.unwrap_err().as_validation().is_some());
}

#[test]
fn test_never_validate_ignores_toggle() {
    let _guard = lock();
    let id = identity(int_identity().never_validate());

    assert_eq!(id.call(vec![json!("x")]).unwrap(), json!("x"));
    set_validation_enabled(false);
    assert_eq!(id.call(vec![json!("x")]).unwrap(), json!("x"));
    set_validation_enabled(true);
}

#[test]
fn test_disabled_toggle_skips_output_validation() {
    let _guard = lock();
    let liar = identity(FunctionDef::new("liar", json!({"type": "string"})).arity(
        ArityBody::new(vec![], |_| Ok(Value::from(1))),
    ));

    assert!(liar.call(vec![]).is_err());
    set_validation_enabled(false);
    let result = liar.call(vec![]);
    set_validation_enabled(true);
    assert_eq!(result.unwrap(), json!(1));
}

#[test]
fn test_concurrent_calls_during_flips() {
    let _guard = lock();
    let id = Arc::new(identity(int_identity()));

    let callers: Vec<_> = (0..4)
        .map(|_| {
            let id = Arc::clone(&id);
            std::thread::spawn(move || {
                for i in 0..200 {
                    assert_eq!(id.call(vec![json!(i)]).unwrap(), json!(i));
                    // Either outcome is acceptable while the toggle is in flux.
                    let _ = id.call(vec![json!("x")]);
                }
            })
        })
        .collect();

    for i in 0..50 {
        set_validation_enabled(i % 2 == 0);
    }
    for caller in callers {
        caller.join().unwrap();
    }
    set_validation_enabled(true);
    assert!(id.call(vec![json!("x")]).is_err());
}
