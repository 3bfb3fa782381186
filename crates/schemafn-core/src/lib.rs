//! # schemafn-core — Foundational Types
//!
//! The leaf of the workspace DAG. Defines the value types every other
//! crate speaks in: schemas, type tokens, and schema-level errors.
//!
//! ## Key Design Principles
//!
//! 1. **Schemas are data.** A [`Schema`] is a JSON Schema (draft 2020-12)
//!    document held as a `serde_json::Value`. Compilation into a validator
//!    happens in `schemafn-schema`, never here.
//!
//! 2. **One "anything" sentinel.** [`Schema::any`] is the boolean schema
//!    `true`. Binding rules that special-case "no declared schema" compare
//!    against that exact value, not against schemas that merely accept
//!    everything.
//!
//! 3. **Stable type identity.** [`TypeToken`] keys the type-to-schema
//!    registry by `TypeId` for Rust types or by name for declared types.
//!
//! ## Crate Policy
//!
//! - No dependencies on other `schemafn-*` crates.
//! - No `unsafe` code.
//! - No `panic!()` or `.unwrap()` outside tests.

pub mod error;
pub mod schema;
pub mod token;

pub use error::SchemaError;
pub use schema::Schema;
pub use token::TypeToken;
