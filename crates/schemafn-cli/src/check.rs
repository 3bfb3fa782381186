//! # Check Subcommand
//!
//! Replays one recorded call against a declared function with validation
//! forced on. The function body is a stand-in that returns `--result`
//! (default `null`), so both the arguments and the claimed result are
//! checked against the derived schemas.
//!
//! ```bash
//! schemafn check functions.yaml --function add --args '[1, 2]' --result 3
//! ```
//!
//! Exit code 0 when the call conforms, 1 on a validation or arity failure.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::{anyhow, Context, Result};
use clap::Args;
use schemafn_compile::{CallError, CompileConfig, Compiler, FunctionOptions};
use schemafn_schema::TypeSchemaRegistry;
use serde_json::Value;

use crate::declaration::DeclarationFile;

/// Arguments for the check subcommand.
#[derive(Args, Debug)]
pub struct CheckArgs {
    /// Declaration file (YAML).
    pub file: PathBuf,

    /// Name of the declared function.
    #[arg(long)]
    pub function: String,

    /// Arguments as a JSON array.
    #[arg(long)]
    pub args: String,

    /// Result the call produced, as JSON.
    #[arg(long)]
    pub result: Option<String>,
}

/// Replay a call and return `None` if it conforms, or the call failure.
///
/// # Errors
///
/// Unreadable files, unknown functions, malformed JSON, and definition
/// errors. Contract violations are not errors here: they are the outcome.
pub fn check_call(
    path: &Path,
    function: &str,
    args: Value,
    result: Value,
) -> Result<Option<CallError>> {
    let file = DeclarationFile::load(path)?;
    let decl = file
        .function(function)
        .ok_or_else(|| anyhow!("no function named '{function}' in {}", path.display()))?;

    let registry = Arc::new(TypeSchemaRegistry::new());
    file.register_types(registry.as_ref());

    let def = decl.to_def(result)?.with_options(FunctionOptions {
        never_validate: false,
        always_validate: true,
    });
    let (compiled, _) = Compiler::new(CompileConfig::enabled())
        .with_registry(registry)
        .compile(def)
        .with_context(|| format!("cannot compile '{function}'"))?;

    let Value::Array(args) = args else {
        return Err(anyhow!("--args must be a JSON array, got {args}"));
    };
    Ok(compiled.call(args).err())
}

/// Execute the check subcommand.
pub fn run_check(args: &CheckArgs) -> Result<u8> {
    let call_args: Value =
        serde_json::from_str(&args.args).context("--args is not valid JSON")?;
    let result: Value = match &args.result {
        Some(raw) => serde_json::from_str(raw).context("--result is not valid JSON")?,
        None => Value::Null,
    };

    match check_call(&args.file, &args.function, call_args, result)? {
        None => {
            println!("OK: call to '{}' conforms", args.function);
            Ok(0)
        }
        Some(e) => {
            println!("FAIL: {e}");
            Ok(1)
        }
    }
}
