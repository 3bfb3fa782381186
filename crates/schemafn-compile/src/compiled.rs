//! # Function Compilation
//!
//! Entry point tying the pieces together: decide validation, compile each
//! arity, compose the function schema, and return the callable with it.
//!
//! Compilation is all-or-nothing. Any `DefinitionError` aborts the whole
//! function.

use std::sync::Arc;

use schemafn_core::Schema;
use schemafn_schema::{check, SchemaRegistry, TypeSchemaRegistry};
use serde_json::Value;

use crate::arity::{compile_arity, ArityBody, CompiledArity};
use crate::config::CompileConfig;
use crate::decision::{FunctionOptions, ValidationDecision};
use crate::error::{CallError, DefinitionError};
use crate::function::FunctionSchema;

/// Declaration of a function: output schema, arities, and validation tags.
#[derive(Debug)]
pub struct FunctionDef {
    name: String,
    output: Schema,
    arities: Vec<ArityBody>,
    options: FunctionOptions,
}

impl FunctionDef {
    /// Start a declaration with the given name and output schema.
    pub fn new(name: impl Into<String>, output: impl Into<Schema>) -> Self {
        Self {
            name: name.into(),
            output: output.into(),
            arities: Vec::new(),
            options: FunctionOptions::default(),
        }
    }

    /// Add an arity.
    pub fn arity(mut self, body: ArityBody) -> Self {
        self.arities.push(body);
        self
    }

    /// Tag the function never-validate.
    pub fn never_validate(mut self) -> Self {
        self.options.never_validate = true;
        self
    }

    /// Tag the function always-validate.
    pub fn always_validate(mut self) -> Self {
        self.options.always_validate = true;
        self
    }

    /// Replace the validation tags.
    pub fn with_options(mut self, options: FunctionOptions) -> Self {
        self.options = options;
        self
    }

    /// The function name.
    pub fn name(&self) -> &str {
        &self.name
    }
}

/// Compiles declarations under one configuration and type registry.
#[derive(Clone)]
pub struct Compiler {
    config: CompileConfig,
    registry: Arc<dyn SchemaRegistry>,
}

impl Compiler {
    /// A compiler using `config` and the process-wide type registry.
    pub fn new(config: CompileConfig) -> Self {
        Self {
            config,
            registry: Arc::new(TypeSchemaRegistry::global().clone()),
        }
    }

    /// Resolve type tags through `registry` instead.
    pub fn with_registry(mut self, registry: Arc<dyn SchemaRegistry>) -> Self {
        self.registry = registry;
        self
    }

    /// The configuration in effect.
    pub fn config(&self) -> &CompileConfig {
        &self.config
    }

    /// Compile `def` into a callable and its function schema.
    ///
    /// # Errors
    ///
    /// Any `DefinitionError`: conflicting tags, no arities, malformed
    /// bindings, unknown type tags, a variadic arity among several, malformed
    /// schemas, or repeated arities.
    pub fn compile(
        &self,
        def: FunctionDef,
    ) -> Result<(CompiledFn, Arc<FunctionSchema>), DefinitionError> {
        let FunctionDef {
            name,
            output,
            arities,
            options,
        } = def;

        let decision = ValidationDecision::decide(options, &self.config)?;
        if arities.is_empty() {
            return Err(DefinitionError::NoArities);
        }
        let count = arities.len();

        check(&output)?;
        let mut compiled = Vec::with_capacity(count);
        for body in arities {
            let arity = compile_arity(
                body,
                &output,
                decision,
                &self.config,
                self.registry.as_ref(),
            )?;
            if count > 1 && arity.is_variadic() {
                return Err(DefinitionError::VariadicMultiArity { arities: count });
            }
            check(arity.input_schema())?;
            compiled.push(arity);
        }

        let inputs = compiled.iter().map(|a| a.input_schema().clone()).collect();
        let schema = Arc::new(FunctionSchema::compose(output, inputs)?);
        compiled.sort_by_key(CompiledArity::arity);

        tracing::debug!(
            function = %name,
            %decision,
            arities = ?schema.arities(),
            "compiled function"
        );

        let function = CompiledFn {
            name,
            decision,
            arities: compiled,
            schema: Arc::clone(&schema),
        };
        Ok((function, schema))
    }
}

impl Default for Compiler {
    fn default() -> Self {
        Self::new(CompileConfig::default())
    }
}

impl std::fmt::Debug for Compiler {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Compiler")
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

/// Compile `def` with the default configuration and the process-wide registry.
///
/// # Errors
///
/// See [`Compiler::compile`].
pub fn compile(def: FunctionDef) -> Result<(CompiledFn, Arc<FunctionSchema>), DefinitionError> {
    Compiler::default().compile(def)
}

/// A compiled function: one wrapper per arity plus its frozen decision.
#[derive(Debug)]
pub struct CompiledFn {
    name: String,
    decision: ValidationDecision,
    arities: Vec<CompiledArity>,
    schema: Arc<FunctionSchema>,
}

impl CompiledFn {
    /// Call the function with `args`.
    ///
    /// # Errors
    ///
    /// `CallError::ArityMismatch` if no arity accepts `args.len()`, otherwise
    /// whatever the selected arity's wrapper returns.
    pub fn call(&self, args: Vec<Value>) -> Result<Value, CallError> {
        let count = args.len();
        match self.arities.iter().find(|a| a.accepts(count)) {
            Some(arity) => arity.invoke(args),
            None => Err(CallError::ArityMismatch {
                function: self.name.clone(),
                count,
            }),
        }
    }

    /// The function name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The validation decision frozen at definition time.
    pub fn decision(&self) -> ValidationDecision {
        self.decision
    }

    /// The function schema.
    pub fn schema(&self) -> &FunctionSchema {
        &self.schema
    }

    /// Compiled arities in ascending order.
    pub fn arities(&self) -> &[CompiledArity] {
        &self.arities
    }
}
