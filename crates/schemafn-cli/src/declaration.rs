//! # Declaration Files
//!
//! YAML documents describing functions for the CLI to compile.
//!
//! ```yaml
//! types:
//!   Point:
//!     type: object
//!     required: [x, y]
//! functions:
//!   - name: translate
//!     output: {type: object}
//!     arities:
//!       - args:
//!           - {name: p, type: Point}
//!           - {name: dx, schema: {type: number}}
//!         rest: {name: more}
//! ```
//!
//! A slot has a `name` or a nested `args` list, and at most one of
//! `schema` (explicit) or `type` (looked up among `types`).

use std::collections::BTreeMap;
use std::path::Path;

use anyhow::{bail, Context, Result};
use schemafn_compile::{ArgumentDecl, ArityBody, FunctionDef, FunctionOptions, Role};
use schemafn_core::{Schema, TypeToken};
use schemafn_schema::SchemaRegistry;
use serde::Deserialize;
use serde_json::Value;

/// A parsed declaration file.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct DeclarationFile {
    /// Named types available to `type:` annotations.
    #[serde(default)]
    pub types: BTreeMap<String, Schema>,
    /// Declared functions.
    pub functions: Vec<FunctionDecl>,
}

/// One declared function.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct FunctionDecl {
    /// Function name.
    pub name: String,
    /// Output schema; anything when omitted.
    #[serde(default)]
    pub output: Option<Schema>,
    /// Never-validate tag.
    #[serde(default)]
    pub never_validate: bool,
    /// Always-validate tag.
    #[serde(default)]
    pub always_validate: bool,
    /// Declared arities.
    pub arities: Vec<ArityDecl>,
}

/// One declared arity.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ArityDecl {
    /// Regular argument slots.
    #[serde(default)]
    pub args: Vec<SlotDecl>,
    /// Rest slot.
    #[serde(default)]
    pub rest: Option<SlotDecl>,
}

/// One argument slot.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SlotDecl {
    /// Binding name.
    #[serde(default)]
    pub name: Option<String>,
    /// Explicit schema.
    #[serde(default)]
    pub schema: Option<Schema>,
    /// Type tag.
    #[serde(default, rename = "type")]
    pub type_tag: Option<String>,
    /// Nested argument list.
    #[serde(default)]
    pub args: Option<Vec<SlotDecl>>,
}

impl DeclarationFile {
    /// Load and parse a declaration file.
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("cannot read {}", path.display()))?;
        serde_yaml::from_str(&content)
            .with_context(|| format!("invalid declaration file {}", path.display()))
    }

    /// Store every named type in `registry`.
    pub fn register_types(&self, registry: &dyn SchemaRegistry) {
        for (name, schema) in &self.types {
            registry.store(TypeToken::named(name.clone()), schema.clone());
        }
    }

    /// Find a function by name.
    pub fn function(&self, name: &str) -> Option<&FunctionDecl> {
        self.functions.iter().find(|f| f.name == name)
    }
}

impl FunctionDecl {
    /// Build a function definition whose every arity returns `result`.
    pub fn to_def(&self, result: Value) -> Result<FunctionDef> {
        let output = self.output.clone().unwrap_or_default();
        let mut def = FunctionDef::new(self.name.clone(), output).with_options(FunctionOptions {
            never_validate: self.never_validate,
            always_validate: self.always_validate,
        });
        for (i, arity) in self.arities.iter().enumerate() {
            let mut args = arity
                .args
                .iter()
                .map(|slot| slot.to_decl(Role::Regular))
                .collect::<Result<Vec<_>>>()
                .with_context(|| format!("function '{}', arity #{i}", self.name))?;
            if let Some(rest) = &arity.rest {
                args.push(
                    rest.to_decl(Role::Rest)
                        .with_context(|| format!("function '{}', arity #{i}", self.name))?,
                );
            }
            let result = result.clone();
            def = def.arity(ArityBody::new(args, move |_| Ok(result.clone())));
        }
        Ok(def)
    }
}

impl SlotDecl {
    fn to_decl(&self, role: Role) -> Result<ArgumentDecl> {
        let mut decl = match (&self.name, &self.args) {
            (Some(_), Some(_)) => bail!("slot cannot have both 'name' and 'args'"),
            (Some(name), None) => ArgumentDecl::named(name.clone()),
            (None, Some(inner)) => ArgumentDecl::nested(
                inner
                    .iter()
                    .map(|slot| slot.to_decl(Role::Regular))
                    .collect::<Result<Vec<_>>>()?,
            ),
            (None, None) => bail!("slot needs a 'name' or nested 'args'"),
        };
        decl = match (&self.schema, &self.type_tag) {
            (Some(_), Some(_)) => bail!("slot cannot have both 'schema' and 'type'"),
            (Some(schema), None) => decl.with_schema(schema.clone()),
            (None, Some(tag)) => decl.with_type(TypeToken::named(tag.clone())),
            (None, None) => decl,
        };
        if role == Role::Rest {
            decl = decl.into_rest();
        }
        Ok(decl)
    }
}
