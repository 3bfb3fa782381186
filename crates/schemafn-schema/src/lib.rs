//! # schemafn-schema — Schema Engine
//!
//! The schema operations the function compiler consumes. Nothing here knows
//! about functions, arities, or validation toggles.
//!
//! ## Construction (`tuple`)
//!
//! - [`tuple`] builds a closed tuple schema from `(schema, attributes)` pairs.
//! - [`concat`] splices a sequence-shaped tail onto a tuple head, giving the
//!   input schema of a variadic arity.
//! - [`sequence_of`] builds an open-ended homogeneous sequence.
//!
//! ## Explanation (`explain`, `cell`)
//!
//! An [`Explainer`] is a compiled validator that yields a structured
//! [`Explanation`] for values that do not conform. [`ExplainerCell`] memoizes
//! one explainer per schema without locking readers once it is built.
//!
//! ## Type Registry (`registry`)
//!
//! [`SchemaRegistry`] is the `store`/`lookup` contract for associating type
//! tokens with schemas; [`TypeSchemaRegistry`] is the in-process map.
//!
//! ## Crate Policy
//!
//! - Depends only on `schemafn-core` internally.
//! - Schema compilation failures surface as `SchemaError` and are never
//!   rewritten by callers.

pub mod cell;
pub mod explain;
pub mod registry;
pub mod tuple;

pub use cell::ExplainerCell;
pub use explain::{check, Explainer, Explanation, Violation};
pub use registry::{SchemaRegistry, TypeSchemaRegistry};
pub use tuple::{concat, sequence_of, tuple, Attributes};
