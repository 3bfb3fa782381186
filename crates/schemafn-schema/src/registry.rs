//! # Type Schema Registry
//!
//! Associates type tokens with schemas so that declarations can annotate an
//! argument with a type instead of spelling out its schema.
//!
//! The compiler depends only on the [`SchemaRegistry`] contract. The
//! provided [`TypeSchemaRegistry`] retains entries strongly until they are
//! removed; a registry that needs weaker retention implements the trait
//! itself.

use std::collections::HashMap;
use std::sync::{Arc, OnceLock};

use parking_lot::RwLock;
use schemafn_core::{Schema, TypeToken};

/// Store/lookup contract for type-to-schema association.
pub trait SchemaRegistry: Send + Sync {
    /// Associate `schema` with `token`, returning the schema it replaced.
    fn store(&self, token: TypeToken, schema: Schema) -> Option<Schema>;

    /// Look up the schema associated with `token`.
    fn lookup(&self, token: &TypeToken) -> Option<Schema>;
}

/// Thread-safe, cloneable in-memory registry.
///
/// Clones share the same entries. The lock is `parking_lot`, so a
/// panicking writer does not poison the registry.
#[derive(Debug, Default, Clone)]
pub struct TypeSchemaRegistry {
    entries: Arc<RwLock<HashMap<TypeToken, Schema>>>,
}

impl TypeSchemaRegistry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// The process-wide registry.
    pub fn global() -> &'static TypeSchemaRegistry {
        static GLOBAL: OnceLock<TypeSchemaRegistry> = OnceLock::new();
        GLOBAL.get_or_init(TypeSchemaRegistry::new)
    }

    /// Remove the entry for `token`, returning its schema.
    pub fn remove(&self, token: &TypeToken) -> Option<Schema> {
        self.entries.write().remove(token)
    }

    /// Number of registered types.
    pub fn len(&self) -> usize {
        self.entries.read().len()
    }

    /// Whether no types are registered.
    pub fn is_empty(&self) -> bool {
        self.entries.read().is_empty()
    }
}

impl SchemaRegistry for TypeSchemaRegistry {
    fn store(&self, token: TypeToken, schema: Schema) -> Option<Schema> {
        tracing::debug!(token = %token, "registering type schema");
        self.entries.write().insert(token, schema)
    }

    fn lookup(&self, token: &TypeToken) -> Option<Schema> {
        self.entries.read().get(token).cloned()
    }
}
