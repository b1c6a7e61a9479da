//! # Init and Fmt Subcommands
//!
//! `init` prints the synthesized default record for a schema; `fmt`
//! re-prints an existing document in canonical layout.

use std::path::PathBuf;

use anyhow::Result;
use clap::Args;

use formkit_engine::synthesize;
use formkit_sync::{from_text, to_text_with};

use crate::config::CliConfig;

/// Arguments for the `formkit init` subcommand.
#[derive(Args, Debug)]
pub struct InitArgs {
    /// Schema file (JSON source encoding).
    #[arg(value_name = "SCHEMA")]
    pub schema: PathBuf,

    /// Write the record to this file instead of stdout.
    #[arg(long, short)]
    pub output: Option<PathBuf>,
}

/// Arguments for the `formkit fmt` subcommand.
#[derive(Args, Debug)]
pub struct FmtArgs {
    /// Document to re-print.
    #[arg(value_name = "DOC")]
    pub document: PathBuf,

    /// Rewrite the document in place.
    #[arg(long)]
    pub write: bool,
}

/// Execute the init subcommand.
pub fn run_init(args: &InitArgs, config: &CliConfig) -> Result<u8> {
    let schema = crate::read_schema(&args.schema)?;
    let text = to_text_with(&synthesize(&schema), &config.text_options());

    match &args.output {
        Some(path) => {
            crate::edit::write_document(path, &text)?;
            tracing::info!(path = %path.display(), "wrote default record");
        }
        None => println!("{text}"),
    }
    Ok(0)
}

/// Execute the fmt subcommand.
///
/// Returns exit code: 0 on success, 1 when the document is malformed.
pub fn run_fmt(args: &FmtArgs, config: &CliConfig) -> Result<u8> {
    let text = crate::read_text(&args.document)?;
    let value = match from_text(&text) {
        Ok(value) => value,
        Err(err) => {
            println!("PARSE ERROR: {}: {}", args.document.display(), err);
            return Ok(1);
        }
    };
    let formatted = to_text_with(&value, &config.text_options());

    if args.write {
        crate::edit::write_document(&args.document, &formatted)?;
    } else {
        println!("{formatted}");
    }
    Ok(0)
}
