//! # Schema Form Builder
//!
//! Turns one arity's argument declarations into its input schema.
//!
//! ## Rules
//!
//! - Each regular argument becomes a tuple element `(schema, {"title": name})`.
//!   A slot without a plain name is called `arg<index>`.
//! - A rest argument must be the last declaration, and there is at most one.
//! - A rest argument declared without a schema is shaped by its pattern: a
//!   nested argument list is built recursively into the tail, a plain name
//!   takes any number of values of any shape.
//! - A rest argument with a declared schema uses it verbatim as the tail. It
//!   must be sequence-shaped.
//! - The input schema is the regular tuple with the tail, if any, spliced on.

use schemafn_core::Schema;
use schemafn_schema::{concat, sequence_of, tuple, Attributes, SchemaRegistry};
use serde_json::Value;

use crate::binding::{Annotation, ArgumentBinding, ArgumentDecl, Pattern, Role};
use crate::error::{DefinitionError, FormError};

/// The resolved argument list of one arity.
#[derive(Debug, Clone, PartialEq)]
pub struct ArgumentForm {
    /// Regular bindings in declaration order.
    pub regular: Vec<ArgumentBinding>,
    /// The rest binding, if declared.
    pub rest: Option<ArgumentBinding>,
    /// Input schema of the whole argument list.
    pub input: Schema,
}

impl ArgumentForm {
    /// Number of regular arguments.
    pub fn arity(&self) -> usize {
        self.regular.len()
    }

    /// Whether a rest binding is present.
    pub fn is_variadic(&self) -> bool {
        self.rest.is_some()
    }
}

/// Build the argument form for `decls`, resolving type tags via `registry`.
///
/// # Errors
///
/// - `FormError::BadRestBinding` for more than one rest slot or a rest slot
///   that is not last, in the top-level list or any nested one.
/// - `FormError::RestSchemaNotSequence` for a rest slot whose declared
///   schema is not sequence-shaped.
/// - `DefinitionError::MissingSchema` for a type tag the registry does not know.
/// - `DefinitionError::Schema` if the tail cannot be spliced.
pub fn build_form(
    decls: &[ArgumentDecl],
    registry: &dyn SchemaRegistry,
) -> Result<ArgumentForm, DefinitionError> {
    check_rest_placement(decls)?;

    let mut regular = Vec::with_capacity(decls.len());
    let mut rest = None;
    let mut rest_tail = None;

    for (position, decl) in decls.iter().enumerate() {
        let name = binding_name(decl, position);
        let schema = resolve(decl, &name, registry)?;
        match decl.role {
            Role::Regular => regular.push(ArgumentBinding {
                name,
                schema,
                position,
                role: Role::Regular,
            }),
            Role::Rest => {
                rest_tail = Some(rest_tail_schema(decl, &schema, registry)?);
                rest = Some(ArgumentBinding {
                    name,
                    schema,
                    position,
                    role: Role::Rest,
                });
            }
        }
    }

    let head = tuple(
        regular
            .iter()
            .map(|b| (b.schema.clone(), title(&b.name)))
            .collect(),
    );
    let input = match rest_tail {
        Some(tail) => concat(&head, &tail)?,
        None => head,
    };

    Ok(ArgumentForm {
        regular,
        rest,
        input,
    })
}

/// At most one rest slot, and only in last position. Applies to every nested
/// argument list as well, since a destructured slot is an argument list too.
fn check_rest_placement(decls: &[ArgumentDecl]) -> Result<(), FormError> {
    let rest_count = decls.iter().filter(|d| d.is_rest()).count();
    if rest_count > 1 {
        return Err(FormError::BadRestBinding(format!(
            "{rest_count} rest bindings declared, at most one allowed"
        )));
    }
    if let Some(pos) = decls.iter().position(ArgumentDecl::is_rest) {
        if pos + 1 != decls.len() {
            return Err(FormError::BadRestBinding(format!(
                "rest binding at position {pos} is followed by regular arguments"
            )));
        }
    }
    for decl in decls {
        if let Pattern::Nested(inner) = &decl.pattern {
            check_rest_placement(inner)?;
        }
    }
    Ok(())
}

fn binding_name(decl: &ArgumentDecl, position: usize) -> String {
    decl.name()
        .map(str::to_owned)
        .unwrap_or_else(|| format!("arg{position}"))
}

fn resolve(
    decl: &ArgumentDecl,
    name: &str,
    registry: &dyn SchemaRegistry,
) -> Result<Schema, DefinitionError> {
    match &decl.annotation {
        None => Ok(Schema::any()),
        Some(Annotation::Schema(schema)) => Ok(schema.clone()),
        Some(Annotation::Type(token)) => {
            registry
                .lookup(token)
                .ok_or_else(|| DefinitionError::MissingSchema {
                    token: token.to_string(),
                    argument: name.to_owned(),
                })
        }
    }
}

fn rest_tail_schema(
    decl: &ArgumentDecl,
    declared: &Schema,
    registry: &dyn SchemaRegistry,
) -> Result<Schema, DefinitionError> {
    if declared.is_any() {
        return match &decl.pattern {
            Pattern::Nested(inner) => Ok(build_form(inner, registry)?.input),
            Pattern::Name(_) => Ok(sequence_of(Schema::any())),
        };
    }
    if declared.is_sequence() {
        Ok(declared.clone())
    } else {
        Err(FormError::RestSchemaNotSequence {
            schema: declared.to_string(),
        }
        .into())
    }
}

fn title(name: &str) -> Attributes {
    let mut attrs = Attributes::new();
    attrs.insert("title".into(), Value::from(name));
    attrs
}
