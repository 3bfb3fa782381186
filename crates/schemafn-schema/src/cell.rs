//! # Explainer Memo Cell
//!
//! Builds an [`Explainer`] on first use and keeps it for the life of the
//! cell.
//!
//! ## Concurrency
//!
//! Threads that miss the cache compile their own explainer outside any lock
//! and then offer it to the `OnceLock`. The first offer wins; later offers
//! are dropped and the caller receives the stored instance. Explainers for
//! the same schema are interchangeable, so losing the race only costs the
//! redundant compile. Once the cell is populated, reads are a single atomic
//! load with no locking and no allocation.

use std::sync::OnceLock;

use schemafn_core::{Schema, SchemaError};
use serde_json::Value;

use crate::explain::{Explainer, Explanation};

/// A schema paired with its lazily compiled explainer.
#[derive(Debug)]
pub struct ExplainerCell {
    schema: Schema,
    explainer: OnceLock<Explainer>,
}

impl ExplainerCell {
    /// Create an empty cell for `schema`. Nothing is compiled yet.
    pub fn new(schema: Schema) -> Self {
        Self {
            schema,
            explainer: OnceLock::new(),
        }
    }

    /// The schema this cell explains.
    pub fn schema(&self) -> &Schema {
        &self.schema
    }

    /// Whether the explainer has been compiled.
    pub fn is_built(&self) -> bool {
        self.explainer.get().is_some()
    }

    /// Return the explainer, compiling it on first use.
    ///
    /// # Errors
    ///
    /// Propagates `SchemaError` from compilation. A failed compile leaves the
    /// cell empty.
    pub fn get(&self) -> Result<&Explainer, SchemaError> {
        if let Some(explainer) = self.explainer.get() {
            return Ok(explainer);
        }
        let built = Explainer::new(&self.schema)?;
        Ok(self.explainer.get_or_init(|| built))
    }

    /// Explain `value` against the cell's schema.
    ///
    /// # Errors
    ///
    /// Propagates `SchemaError` if the explainer cannot be compiled.
    pub fn explain(&self, value: &Value) -> Result<Option<Explanation>, SchemaError> {
        Ok(self.get()?.explain(value))
    }
}
