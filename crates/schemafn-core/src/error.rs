//! # Error Types — Schema Engine Errors
//!
//! Errors raised while building or compiling schemas. Higher layers wrap
//! these unchanged (`#[from]`), so the message a caller sees is the one
//! produced here.

use thiserror::Error;

/// Error produced by schema construction or compilation.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SchemaError {
    /// The document is not a valid JSON Schema.
    #[error("malformed schema {schema}: {reason}")]
    Malformed {
        /// Compact JSON rendering of the offending schema.
        schema: String,
        /// Reason reported by the validator compiler.
        reason: String,
    },

    /// A sequence schema used a keyword that cannot be spliced onto a tuple.
    #[error("unsupported keyword '{keyword}' in sequence schema {schema}")]
    UnsupportedSequence {
        /// The keyword that blocked concatenation.
        keyword: String,
        /// Compact JSON rendering of the sequence schema.
        schema: String,
    },

    /// A tuple schema was required but something else was supplied.
    #[error("expected tuple schema, got {schema}")]
    NotATuple {
        /// Compact JSON rendering of the offending schema.
        schema: String,
    },
}
