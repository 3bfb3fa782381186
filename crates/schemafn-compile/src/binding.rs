//! # Argument Declarations and Bindings
//!
//! [`ArgumentDecl`] is what a caller declares for one argument slot: a
//! binding pattern, an optional annotation, and whether the slot is regular
//! or captures the rest of the call's arguments. The form builder resolves
//! each declaration into an immutable [`ArgumentBinding`].

use schemafn_core::{Schema, TypeToken};

/// Whether a slot binds one argument or all remaining ones.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Role {
    /// Binds exactly one positional argument.
    Regular,
    /// Binds zero or more trailing arguments as a sequence.
    Rest,
}

/// How an argument slot is bound.
#[derive(Debug, Clone, PartialEq)]
pub enum Pattern {
    /// A plain identifier.
    Name(String),
    /// A destructured argument list. Names are synthesized for the slot
    /// itself; on a rest slot without a declared schema the nested list
    /// shapes the variadic tail.
    Nested(Vec<ArgumentDecl>),
}

/// Declared schema of an argument slot.
#[derive(Debug, Clone, PartialEq)]
pub enum Annotation {
    /// An explicit schema.
    Schema(Schema),
    /// A type tag, resolved through the type schema registry.
    Type(TypeToken),
}

/// One declared argument slot.
#[derive(Debug, Clone, PartialEq)]
pub struct ArgumentDecl {
    /// Binding pattern.
    pub pattern: Pattern,
    /// Declared schema; `None` means "anything".
    pub annotation: Option<Annotation>,
    /// Regular or rest.
    pub role: Role,
}

impl ArgumentDecl {
    /// A regular argument bound to `name`, accepting anything.
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            pattern: Pattern::Name(name.into()),
            annotation: None,
            role: Role::Regular,
        }
    }

    /// A regular argument destructured into `inner`.
    pub fn nested(inner: Vec<ArgumentDecl>) -> Self {
        Self {
            pattern: Pattern::Nested(inner),
            annotation: None,
            role: Role::Regular,
        }
    }

    /// A rest argument bound to `name`.
    pub fn rest(name: impl Into<String>) -> Self {
        Self::named(name).into_rest()
    }

    /// A rest argument whose tail is shaped by `inner`.
    pub fn rest_nested(inner: Vec<ArgumentDecl>) -> Self {
        Self::nested(inner).into_rest()
    }

    /// Annotate with an explicit schema.
    pub fn with_schema(mut self, schema: impl Into<Schema>) -> Self {
        self.annotation = Some(Annotation::Schema(schema.into()));
        self
    }

    /// Annotate with a type tag.
    pub fn with_type(mut self, token: TypeToken) -> Self {
        self.annotation = Some(Annotation::Type(token));
        self
    }

    /// Turn this declaration into a rest slot.
    pub fn into_rest(mut self) -> Self {
        self.role = Role::Rest;
        self
    }

    /// Whether this is a rest slot.
    pub fn is_rest(&self) -> bool {
        self.role == Role::Rest
    }

    /// The declared identifier, if the pattern is a plain name.
    pub fn name(&self) -> Option<&str> {
        match &self.pattern {
            Pattern::Name(name) => Some(name),
            Pattern::Nested(_) => None,
        }
    }
}

/// A resolved argument slot. Immutable once derived.
#[derive(Debug, Clone, PartialEq)]
pub struct ArgumentBinding {
    /// Declared or synthesized (`arg<index>`) identifier.
    pub name: String,
    /// Resolved schema.
    pub schema: Schema,
    /// Position in the declaration list.
    pub position: usize,
    /// Regular or rest.
    pub role: Role,
}
