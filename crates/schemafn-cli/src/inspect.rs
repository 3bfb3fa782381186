//! # Inspect Subcommand
//!
//! Compiles every function in a declaration file and prints the derived
//! function schema: the validation decision, the output schema, and one
//! input tuple per arity.
//!
//! ```bash
//! schemafn inspect functions.yaml
//! schemafn inspect functions.yaml --json
//! ```
//!
//! Definition errors are reported per function; the exit code is 1 if any
//! function failed to compile.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::Result;
use clap::Args;
use schemafn_compile::{CompileConfig, Compiler, FunctionSchema, ValidationDecision};
use schemafn_schema::TypeSchemaRegistry;
use serde_json::{json, Value};

use crate::declaration::DeclarationFile;

/// Arguments for the inspect subcommand.
#[derive(Args, Debug)]
pub struct InspectArgs {
    /// Declaration file (YAML).
    pub file: PathBuf,

    /// Print one JSON document instead of the text report.
    #[arg(long)]
    pub json: bool,
}

/// Outcome of compiling one declared function.
#[derive(Debug)]
pub struct FunctionReport {
    /// Function name.
    pub name: String,
    /// Decision and schema, or the definition error.
    pub outcome: Result<(ValidationDecision, Arc<FunctionSchema>), anyhow::Error>,
}

impl FunctionReport {
    fn to_json(&self) -> Value {
        match &self.outcome {
            Ok((decision, schema)) => json!({
                "name": self.name,
                "decision": decision.to_string(),
                "output": schema.output().as_value(),
                "arities": schema
                    .entries()
                    .map(|(arity, input)| json!({"arity": arity, "input": input.as_value()}))
                    .collect::<Vec<_>>(),
            }),
            Err(e) => json!({"name": self.name, "error": format!("{e:#}")}),
        }
    }
}

/// Compile every function declared in `path` under `config`.
///
/// Types declared in the file go into a fresh registry, so files never see
/// each other's types.
pub fn inspect_file(path: &Path, config: CompileConfig) -> Result<Vec<FunctionReport>> {
    let file = DeclarationFile::load(path)?;
    let registry = Arc::new(TypeSchemaRegistry::new());
    file.register_types(registry.as_ref());
    let compiler = Compiler::new(config).with_registry(registry);

    let reports = file
        .functions
        .iter()
        .map(|decl| {
            let outcome = decl.to_def(Value::Null).and_then(|def| {
                compiler
                    .compile(def)
                    .map(|(f, schema)| (f.decision(), schema))
                    .map_err(anyhow::Error::from)
            });
            if let Err(e) = &outcome {
                tracing::warn!(function = %decl.name, "definition rejected: {e:#}");
            }
            FunctionReport {
                name: decl.name.clone(),
                outcome,
            }
        })
        .collect();
    Ok(reports)
}

/// Execute the inspect subcommand.
pub fn run_inspect(args: &InspectArgs) -> Result<u8> {
    let config = CompileConfig::from_env();
    tracing::debug!(?config, file = %args.file.display(), "inspecting declarations");
    let reports = inspect_file(&args.file, config)?;
    let failed = reports.iter().filter(|r| r.outcome.is_err()).count();

    if args.json {
        let doc: Vec<Value> = reports.iter().map(FunctionReport::to_json).collect();
        println!("{}", serde_json::to_string_pretty(&doc)?);
    } else {
        for report in &reports {
            match &report.outcome {
                Ok((decision, schema)) => {
                    println!("{} (validation: {decision})", report.name);
                    println!("  output: {}", schema.output());
                    for (arity, input) in schema.entries() {
                        println!("  arity {arity}: {input}");
                    }
                }
                Err(e) => println!("{} FAILED: {e:#}", report.name),
            }
        }
        println!();
        println!("{} function(s), {failed} failed", reports.len());
    }

    Ok(u8::from(failed > 0))
}
