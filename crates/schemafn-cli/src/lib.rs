//! # schemafn-cli — Command Line Interface
//!
//! Provides the `schemafn` binary, which reads YAML declaration files (see
//! [`declaration`]) and runs them through the function schema compiler.
//!
//! ## Subcommands
//!
//! - `schemafn inspect` — Print each function's derived schema.
//! - `schemafn check` — Validate a recorded call against a declaration.
//!
//! ```bash
//! schemafn -v inspect functions.yaml
//! schemafn check functions.yaml --function add --args '[1, 2]' --result 3
//! ```

pub mod check;
pub mod declaration;
pub mod inspect;
