//! # Error Types — Definition and Invocation Failures
//!
//! Two phases, two families:
//!
//! - **Definition time.** [`FormError`] for malformed argument bindings and
//!   [`DefinitionError`] for everything that aborts compiling a function.
//!   None of these are retryable; a function is either fully compiled or not
//!   compiled at all.
//! - **Invocation time.** [`CallError`] for a failed call. A
//!   [`ValidationError`] is raised only while validation is in effect for
//!   the call and reaches the caller unmodified.

use std::fmt;

use schemafn_core::{Schema, SchemaError};
use schemafn_schema::Explanation;
use thiserror::Error;

/// Error returned by a function body.
pub type BodyError = Box<dyn std::error::Error + Send + Sync>;

/// Malformed argument binding.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum FormError {
    /// More than one rest binding, or a rest binding that is not last.
    #[error("bad rest-argument binding: {0}")]
    BadRestBinding(String),

    /// A rest binding declared a schema that is not sequence-shaped.
    #[error("expected sequence schema for rest args, got {schema}")]
    RestSchemaNotSequence {
        /// Compact JSON rendering of the declared schema.
        schema: String,
    },
}

/// Error that aborts compilation of a function.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DefinitionError {
    /// Malformed argument binding.
    #[error(transparent)]
    Form(#[from] FormError),

    /// Schema engine failure, propagated unchanged.
    #[error(transparent)]
    Schema(#[from] SchemaError),

    /// Two arities have the same number of regular arguments.
    #[error("arities must be distinct: arity {arity} declared more than once")]
    DuplicateArity {
        /// The repeated arity.
        arity: usize,
    },

    /// A type tag has no schema in the registry.
    #[error("no schema registered for type '{token}' on argument '{argument}'")]
    MissingSchema {
        /// Name of the type token.
        token: String,
        /// Name of the annotated argument.
        argument: String,
    },

    /// A rest-bearing arity was declared alongside other arities.
    #[error("variadic arity cannot take part in multi-arity dispatch ({arities} arities declared)")]
    VariadicMultiArity {
        /// Number of arities declared by the function.
        arities: usize,
    },

    /// Both never-validate and always-validate were requested.
    #[error("function cannot be tagged both never-validate and always-validate")]
    ConflictingTags,

    /// The function has no implementation bodies.
    #[error("function declares no arities")]
    NoArities,
}

/// Which side of a call failed validation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    /// The argument list.
    Input,
    /// The returned value.
    Output,
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Input => f.write_str("input"),
            Self::Output => f.write_str("output"),
        }
    }
}

/// A call's arguments or result did not conform to the function schema.
#[derive(Error, Debug, Clone, PartialEq)]
#[error("invalid {direction} for schema {schema}:\n{explanation}")]
pub struct ValidationError {
    direction: Direction,
    schema: Schema,
    explanation: Explanation,
}

impl ValidationError {
    /// Build a validation error.
    pub fn new(direction: Direction, schema: Schema, explanation: Explanation) -> Self {
        Self {
            direction,
            schema,
            explanation,
        }
    }

    /// Whether the input or the output failed.
    pub fn direction(&self) -> Direction {
        self.direction
    }

    /// The schema that rejected the value.
    pub fn schema(&self) -> &Schema {
        &self.schema
    }

    /// Structured explanation of the failure.
    pub fn explanation(&self) -> &Explanation {
        &self.explanation
    }
}

/// Pre-condition or post-condition.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AssertionKind {
    /// Checked against the arguments before the body runs.
    Pre,
    /// Checked against the result after the body runs.
    Post,
}

impl fmt::Display for AssertionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Pre => f.write_str("pre-condition"),
            Self::Post => f.write_str("post-condition"),
        }
    }
}

/// Error returned by invoking a compiled function.
#[derive(Error, Debug)]
pub enum CallError {
    /// Input or output validation failed.
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// No declared arity accepts the number of arguments supplied.
    #[error("function '{function}' has no arity accepting {count} arguments")]
    ArityMismatch {
        /// Function name.
        function: String,
        /// Number of arguments supplied.
        count: usize,
    },

    /// An inlined pre- or post-condition did not hold.
    #[error("{kind} failed: {description}")]
    Assertion {
        /// Which condition failed.
        kind: AssertionKind,
        /// Description given when the condition was declared.
        description: String,
    },

    /// The body returned an error.
    #[error("function body failed: {0}")]
    Body(#[source] BodyError),

    /// An explainer could not be compiled.
    #[error(transparent)]
    Schema(#[from] SchemaError),
}

impl CallError {
    /// The validation error, if this is one.
    pub fn as_validation(&self) -> Option<&ValidationError> {
        match self {
            Self::Validation(e) => Some(e),
            _ => None,
        }
    }
}
