//! # Arity Compiler
//!
//! Compiles one implementation body into a callable wrapper.
//!
//! ## Wrappers
//!
//! - **Direct** (`Off`): the implementation itself. No validation branch
//!   exists, so the runtime toggle cannot affect it.
//! - **Checked** (`Always`, `Conditional`): per call, decide once whether
//!   validation is in effect (`Always` ⇒ yes, `Conditional` ⇒ read the
//!   toggle). If it is, validate the argument list before the body runs and
//!   the result after it returns. An invalid argument list stops the call
//!   before the body. An invalid result is reported after the body's side
//!   effects have already happened.
//!
//! Each checked wrapper owns two explainer cells, one per direction, compiled
//! on first use.
//!
//! ## Inlined Assertions
//!
//! Pre-conditions over the arguments and post-conditions over the result are
//! folded into the implementation when the compile configuration enables
//! assertions. They belong to the body, so they run whatever the validation
//! decision is.

use std::fmt;
use std::sync::Arc;

use schemafn_core::Schema;
use schemafn_schema::{ExplainerCell, SchemaRegistry};
use serde_json::Value;

use crate::binding::ArgumentDecl;
use crate::config::CompileConfig;
use crate::decision::ValidationDecision;
use crate::error::{
    AssertionKind, BodyError, CallError, DefinitionError, Direction, ValidationError,
};
use crate::form::{build_form, ArgumentForm};
use crate::toggle;

type BodyFn = Arc<dyn Fn(&[Value]) -> Result<Value, BodyError> + Send + Sync>;
type PreCheck = Arc<dyn Fn(&[Value]) -> bool + Send + Sync>;
type PostCheck = Arc<dyn Fn(&[Value], &Value) -> bool + Send + Sync>;
type Implementation = Arc<dyn Fn(&[Value]) -> Result<Value, CallError> + Send + Sync>;

struct Condition<F> {
    description: String,
    check: F,
}

/// One declared arity: its argument declarations and implementation.
pub struct ArityBody {
    args: Vec<ArgumentDecl>,
    body: BodyFn,
    pre: Vec<Condition<PreCheck>>,
    post: Vec<Condition<PostCheck>>,
}

impl ArityBody {
    /// Declare an arity with the given argument slots and body.
    pub fn new<F>(args: Vec<ArgumentDecl>, body: F) -> Self
    where
        F: Fn(&[Value]) -> Result<Value, BodyError> + Send + Sync + 'static,
    {
        Self {
            args,
            body: Arc::new(body),
            pre: Vec::new(),
            post: Vec::new(),
        }
    }

    /// Add a pre-condition over the arguments.
    pub fn pre<F>(mut self, description: impl Into<String>, check: F) -> Self
    where
        F: Fn(&[Value]) -> bool + Send + Sync + 'static,
    {
        self.pre.push(Condition {
            description: description.into(),
            check: Arc::new(check),
        });
        self
    }

    /// Add a post-condition over the arguments and the result.
    pub fn post<F>(mut self, description: impl Into<String>, check: F) -> Self
    where
        F: Fn(&[Value], &Value) -> bool + Send + Sync + 'static,
    {
        self.post.push(Condition {
            description: description.into(),
            check: Arc::new(check),
        });
        self
    }

    /// The declared argument slots.
    pub fn args(&self) -> &[ArgumentDecl] {
        &self.args
    }
}

impl fmt::Debug for ArityBody {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ArityBody")
            .field("args", &self.args)
            .field("pre", &self.pre.len())
            .field("post", &self.post.len())
            .finish_non_exhaustive()
    }
}

enum Wrapper {
    Direct(Implementation),
    Checked(Box<Checked>),
}

struct Checked {
    always: bool,
    implementation: Implementation,
    input: ExplainerCell,
    output: ExplainerCell,
}

/// A compiled arity: its resolved argument form and its wrapper.
pub struct CompiledArity {
    form: ArgumentForm,
    wrapper: Wrapper,
}

impl CompiledArity {
    /// Number of regular arguments.
    ///
    /// This is the dispatch count. Elements spliced in by a shaped rest tail
    /// are not counted, unlike in [`FunctionSchema::arities`](crate::FunctionSchema::arities).
    pub fn arity(&self) -> usize {
        self.form.arity()
    }

    /// Whether the arity has a rest binding.
    pub fn is_variadic(&self) -> bool {
        self.form.is_variadic()
    }

    /// The resolved argument form.
    pub fn form(&self) -> &ArgumentForm {
        &self.form
    }

    /// The arity's input schema.
    pub fn input_schema(&self) -> &Schema {
        &self.form.input
    }

    /// Whether the wrapper is the bare implementation.
    pub fn is_direct(&self) -> bool {
        matches!(self.wrapper, Wrapper::Direct(_))
    }

    /// Whether this arity can be called with `count` arguments.
    pub fn accepts(&self, count: usize) -> bool {
        if self.is_variadic() {
            count >= self.arity()
        } else {
            count == self.arity()
        }
    }

    /// Call the wrapper.
    ///
    /// # Errors
    ///
    /// `CallError::Validation` when validation is in effect and the arguments
    /// or result do not conform; otherwise whatever the implementation
    /// returns.
    pub fn invoke(&self, args: Vec<Value>) -> Result<Value, CallError> {
        let checked = match &self.wrapper {
            Wrapper::Direct(implementation) => return implementation(args.as_slice()),
            Wrapper::Checked(checked) => checked,
        };

        if !(checked.always || toggle::validation_enabled()) {
            return (checked.implementation)(args.as_slice());
        }

        let args = Value::Array(args);
        if let Some(explanation) = checked.input.explain(&args)? {
            return Err(ValidationError::new(
                Direction::Input,
                checked.input.schema().clone(),
                explanation,
            )
            .into());
        }

        let slice = args.as_array().map(Vec::as_slice).unwrap_or_default();
        let result = (checked.implementation)(slice)?;

        if let Some(explanation) = checked.output.explain(&result)? {
            return Err(ValidationError::new(
                Direction::Output,
                checked.output.schema().clone(),
                explanation,
            )
            .into());
        }
        Ok(result)
    }
}

impl fmt::Debug for CompiledArity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let wrapper = match &self.wrapper {
            Wrapper::Direct(_) => "direct",
            Wrapper::Checked(c) if c.always => "always",
            Wrapper::Checked(_) => "conditional",
        };
        f.debug_struct("CompiledArity")
            .field("form", &self.form)
            .field("wrapper", &wrapper)
            .finish()
    }
}

/// Compile one arity against the function's output schema and decision.
///
/// # Errors
///
/// Propagates `DefinitionError` from building the argument form.
pub fn compile_arity(
    body: ArityBody,
    output: &Schema,
    decision: ValidationDecision,
    config: &CompileConfig,
    registry: &dyn SchemaRegistry,
) -> Result<CompiledArity, DefinitionError> {
    let form = build_form(&body.args, registry)?;
    let implementation = inline_assertions(body, config.assertions);

    let wrapper = match decision {
        ValidationDecision::Off => Wrapper::Direct(implementation),
        ValidationDecision::Always | ValidationDecision::Conditional => {
            Wrapper::Checked(Box::new(Checked {
                always: decision == ValidationDecision::Always,
                implementation,
                input: ExplainerCell::new(form.input.clone()),
                output: ExplainerCell::new(output.clone()),
            }))
        }
    };

    tracing::debug!(
        arity = form.arity(),
        variadic = form.is_variadic(),
        %decision,
        "compiled arity"
    );
    Ok(CompiledArity { form, wrapper })
}

fn inline_assertions(body: ArityBody, assertions: bool) -> Implementation {
    let ArityBody { body, pre, post, .. } = body;
    if !assertions || (pre.is_empty() && post.is_empty()) {
        return Arc::new(move |args: &[Value]| body(args).map_err(CallError::Body));
    }
    Arc::new(move |args: &[Value]| {
        if let Some(failed) = pre.iter().find(|c| !(c.check)(args)) {
            return Err(CallError::Assertion {
                kind: AssertionKind::Pre,
                description: failed.description.clone(),
            });
        }
        let result = body(args).map_err(CallError::Body)?;
        if let Some(failed) = post.iter().find(|c| !(c.check)(args, &result)) {
            return Err(CallError::Assertion {
                kind: AssertionKind::Post,
                description: failed.description.clone(),
            });
        }
        Ok(result)
    })
}
