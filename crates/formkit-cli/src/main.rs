//! # formkit CLI entry point
//!
//! Parses command-line arguments and dispatches to subcommand handlers.

use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use formkit_cli::config::CliConfig;
use formkit_cli::edit::{run_append, run_remove, run_set, AppendArgs, RemoveArgs, SetArgs};
use formkit_cli::init::{run_fmt, run_init, FmtArgs, InitArgs};
use formkit_cli::validate::{run_validate, ValidateArgs};

/// Schema-driven record toolkit.
///
/// Synthesizes default records from a schema, validates documents with
/// located diagnostics, and applies path edits to JSON files.
#[derive(Parser, Debug)]
#[command(name = "formkit", version, about, long_about = None)]
struct Cli {
    /// Enable verbose output. Repeat for more verbosity (-v, -vv, -vvv).
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// Path to a YAML configuration file.
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Spaces per nesting level in printed documents.
    #[arg(long, global = true)]
    indent: Option<usize>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Print the default record for a schema.
    Init(InitArgs),

    /// Check a document against a schema.
    Validate(ValidateArgs),

    /// Re-print a document in canonical layout.
    Fmt(FmtArgs),

    /// Replace the value at a path.
    Set(SetArgs),

    /// Append an element to the list at a path.
    Append(AppendArgs),

    /// Remove an element from the list at a path.
    Remove(RemoveArgs),
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let filter = match cli.verbose {
        0 => EnvFilter::new("warn"),
        1 => EnvFilter::new("info"),
        2 => EnvFilter::new("debug"),
        _ => EnvFilter::new("trace"),
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();

    let mut config = match CliConfig::load(cli.config.as_deref()) {
        Ok(config) => config,
        Err(e) => {
            tracing::error!("{e:#}");
            return ExitCode::from(2);
        }
    };
    if let Some(indent) = cli.indent {
        config.indent = indent;
    }

    let result = match cli.command {
        Commands::Init(args) => run_init(&args, &config),
        Commands::Validate(args) => run_validate(&args, &config),
        Commands::Fmt(args) => run_fmt(&args, &config),
        Commands::Set(args) => run_set(&args, &config),
        Commands::Append(args) => run_append(&args, &config),
        Commands::Remove(args) => run_remove(&args, &config),
    };

    match result {
        Ok(code) => ExitCode::from(code),
        Err(e) => {
            tracing::error!("{e:#}");
            ExitCode::from(2)
        }
    }
}
