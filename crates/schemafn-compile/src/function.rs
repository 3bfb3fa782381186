//! # Function Schema Composer
//!
//! Aggregates the input schema of every arity and the output schema into one
//! [`FunctionSchema`].
//!
//! ## Invariants
//!
//! - The arity of an input schema is its number of top-level tuple elements.
//! - Arities are pairwise distinct. A repeat aborts composition.
//! - The dispatch table is sorted by ascending arity.
//! - A function with exactly one arity stores the pair directly instead of a
//!   table. Lookups behave the same either way.

use schemafn_core::{Schema, SchemaError};

use crate::error::DefinitionError;

#[derive(Debug, Clone, PartialEq)]
enum Dispatch {
    Single { arity: usize, input: Schema },
    Table(Vec<(usize, Schema)>),
}

/// The calling contract of a compiled function. Immutable once built.
#[derive(Debug, Clone, PartialEq)]
pub struct FunctionSchema {
    output: Schema,
    dispatch: Dispatch,
}

impl FunctionSchema {
    /// Compose a function schema from the output schema and the input schema
    /// of each declared arity, in declaration order.
    ///
    /// # Errors
    ///
    /// - `DefinitionError::NoArities` if `inputs` is empty.
    /// - `DefinitionError::Schema` if an input is not a tuple schema.
    /// - `DefinitionError::DuplicateArity` if two inputs share an arity.
    pub fn compose(output: Schema, inputs: Vec<Schema>) -> Result<Self, DefinitionError> {
        let mut entries = inputs
            .into_iter()
            .map(|input| Ok((arity_of(&input)?, input)))
            .collect::<Result<Vec<_>, DefinitionError>>()?;

        if entries.len() == 1 {
            if let Some((arity, input)) = entries.pop() {
                return Ok(Self {
                    output,
                    dispatch: Dispatch::Single { arity, input },
                });
            }
        }
        if entries.is_empty() {
            return Err(DefinitionError::NoArities);
        }

        entries.sort_by_key(|(arity, _)| *arity);
        if let Some(pair) = entries.windows(2).find(|w| w[0].0 == w[1].0) {
            return Err(DefinitionError::DuplicateArity { arity: pair[0].0 });
        }

        Ok(Self {
            output,
            dispatch: Dispatch::Table(entries),
        })
    }

    /// The output schema.
    pub fn output(&self) -> &Schema {
        &self.output
    }

    /// Whether the function has exactly one arity.
    pub fn is_single(&self) -> bool {
        matches!(self.dispatch, Dispatch::Single { .. })
    }

    /// Declared arities in ascending order.
    ///
    /// An arity here is the number of top-level tuple elements of the input
    /// schema. For a variadic arity whose rest slot is shaped (`[k & [a b]]`)
    /// that includes the elements the tail splices in, so it can exceed
    /// [`CompiledArity::arity`](crate::CompiledArity::arity), which counts
    /// regular arguments only. Variadic arities only occur in single-arity
    /// functions, where dispatch never consults this table.
    pub fn arities(&self) -> Vec<usize> {
        self.entries().map(|(arity, _)| arity).collect()
    }

    /// `(arity, input schema)` pairs in ascending arity order.
    pub fn entries(&self) -> impl Iterator<Item = (usize, &Schema)> + '_ {
        let entries: Box<dyn Iterator<Item = (usize, &Schema)> + '_> = match &self.dispatch {
            Dispatch::Single { arity, input } => Box::new(std::iter::once((*arity, input))),
            Dispatch::Table(table) => Box::new(table.iter().map(|(arity, input)| (*arity, input))),
        };
        entries
    }

    /// Input schema of the given arity, keyed as in [`arities`](Self::arities).
    pub fn input(&self, arity: usize) -> Option<&Schema> {
        match &self.dispatch {
            Dispatch::Single { arity: a, input } => (*a == arity).then_some(input),
            Dispatch::Table(table) => table
                .binary_search_by_key(&arity, |(a, _)| *a)
                .ok()
                .map(|i| &table[i].1),
        }
    }
}

fn arity_of(input: &Schema) -> Result<usize, DefinitionError> {
    input.tuple_len().ok_or_else(|| {
        SchemaError::NotATuple {
            schema: input.to_string(),
        }
        .into()
    })
}
