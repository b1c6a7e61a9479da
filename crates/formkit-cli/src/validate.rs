//! # Validate Subcommand
//!
//! Checks a document against a schema and prints one diagnostic per
//! nonconformant position, anchored at the line and column of the offending
//! field in the document text.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Args;

use formkit_engine::validate;
use formkit_sync::{diagnostics, from_text};

use crate::config::CliConfig;

/// Arguments for the `formkit validate` subcommand.
#[derive(Args, Debug)]
pub struct ValidateArgs {
    /// Schema file (JSON source encoding).
    #[arg(value_name = "SCHEMA")]
    pub schema: PathBuf,

    /// Document to check.
    #[arg(value_name = "DOC")]
    pub document: PathBuf,

    /// Print diagnostics as a JSON array instead of text lines.
    #[arg(long)]
    pub json: bool,
}

/// Execute the validate subcommand.
///
/// Returns exit code: 0 when the document conforms, 1 when it is malformed
/// or (with `fail_on_errors`) does not conform.
pub fn run_validate(args: &ValidateArgs, config: &CliConfig) -> Result<u8> {
    let schema = crate::read_schema(&args.schema)?;
    let text = crate::read_text(&args.document)?;

    let value = match from_text(&text) {
        Ok(value) => value,
        Err(err) => {
            println!("PARSE ERROR: {}: {}", args.document.display(), err);
            return Ok(1);
        }
    };

    let errors = validate(&schema, &value);
    tracing::info!(
        document = %args.document.display(),
        errors = errors.len(),
        "validated document"
    );
    let found = diagnostics(&text, &errors);

    if args.json {
        let rendered =
            serde_json::to_string_pretty(&found).context("failed to encode diagnostics")?;
        println!("{rendered}");
    } else if found.is_empty() {
        println!("OK: {}", args.document.display());
    } else {
        for diagnostic in &found {
            println!("{}:{}", args.document.display(), diagnostic.render());
        }
        println!("\n{} error(s) in {}", found.len(), args.document.display());
    }

    if !errors.is_empty() && config.fail_on_errors {
        Ok(1)
    } else {
        Ok(0)
    }
}
