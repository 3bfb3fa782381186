//! # Type Tokens
//!
//! Stable keys for associating runtime types with schemas.

use std::any::TypeId;
use std::fmt;

/// Identity of a type in the type-to-schema registry.
///
/// Rust types are keyed by `TypeId`; the type name is carried only for
/// display. Declaration files refer to types by name instead.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum TypeToken {
    /// A Rust type.
    Rust {
        /// Runtime identity of the type.
        id: TypeId,
        /// `std::any::type_name` of the type, for display.
        name: &'static str,
    },
    /// A type known only by name.
    Named(String),
}

impl TypeToken {
    /// Token for the Rust type `T`.
    pub fn of<T: ?Sized + 'static>() -> Self {
        Self::Rust {
            id: TypeId::of::<T>(),
            name: std::any::type_name::<T>(),
        }
    }

    /// Token for a named type.
    pub fn named(name: impl Into<String>) -> Self {
        Self::Named(name.into())
    }

    /// Human-readable name of the token.
    pub fn name(&self) -> &str {
        match self {
            Self::Rust { name, .. } => name,
            Self::Named(name) => name,
        }
    }
}

impl fmt::Display for TypeToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
