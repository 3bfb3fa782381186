//! # schemafn-compile — Function Schema Compiler
//!
//! Given a function declaration (an output schema and one body per arity,
//! each with its argument declarations), derives the function's calling
//! contract as a [`FunctionSchema`] and produces a [`CompiledFn`] that
//! validates calls against it when validation is in effect.
//!
//! ## Pipeline
//!
//! 1. **Decision** ([`decision`]): tags and [`CompileConfig`] freeze a
//!    [`ValidationDecision`] for the function.
//! 2. **Form** ([`form`]): each arity's declarations become an input tuple
//!    schema.
//! 3. **Arity** ([`arity`]): each body is wrapped according to the decision.
//! 4. **Compose** ([`function`]): input schemas and the output schema become
//!    one function schema with a sorted dispatch table.
//!
//! At call time only the [`toggle`] is consulted, and only by wrappers
//! compiled with the `Conditional` decision.
//!
//! ## Example
//!
//! ```
//! use schemafn_compile::{compile, ArgumentDecl, ArityBody, FunctionDef};
//! use serde_json::json;
//!
//! let def = FunctionDef::new("inc", json!({"type": "integer"}))
//!     .always_validate()
//!     .arity(ArityBody::new(
//!         vec![ArgumentDecl::named("x").with_schema(json!({"type": "integer"}))],
//!         |args| Ok(json!(args[0].as_i64().unwrap_or_default() + 1)),
//!     ));
//! let (inc, schema) = compile(def).unwrap();
//! assert_eq!(schema.arities(), vec![1]);
//! assert_eq!(inc.call(vec![json!(1)]).unwrap(), json!(2));
//! assert!(inc.call(vec![json!("one")]).is_err());
//! ```
//!
//! ## Crate Policy
//!
//! - Invocation never logs and never swallows a `ValidationError`.
//! - Definition-time failures abort the whole function.

pub mod arity;
pub mod binding;
pub mod compiled;
pub mod config;
pub mod decision;
pub mod error;
pub mod form;
pub mod function;
pub mod toggle;

pub use arity::{compile_arity, ArityBody, CompiledArity};
pub use binding::{Annotation, ArgumentBinding, ArgumentDecl, Pattern, Role};
pub use compiled::{compile, CompiledFn, Compiler, FunctionDef};
pub use config::CompileConfig;
pub use decision::{FunctionOptions, ValidationDecision};
pub use error::{
    AssertionKind, BodyError, CallError, DefinitionError, Direction, FormError, ValidationError,
};
pub use form::{build_form, ArgumentForm};
pub use function::FunctionSchema;
pub use toggle::{set_validation_enabled, validation_enabled};
