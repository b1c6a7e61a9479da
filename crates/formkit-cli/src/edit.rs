//! # Edit Subcommands
//!
//! `set`, `append`, and `remove` apply one path-addressed change to a JSON
//! document and print the result (or rewrite the file with `--write`).
//!
//! The CLI uses the strict mutation entry points: a path that cannot be
//! reached is reported and exits 1 instead of silently printing the
//! document unchanged.

use std::path::{Path as FsPath, PathBuf};

use anyhow::{bail, Context, Result};
use clap::Args;

use formkit_core::{Path, PathError, SchemaNode, Value};
use formkit_engine::{try_append_to_list, try_remove_from_list, try_set_at_path, NewElement};
use formkit_sync::{from_text, to_text_with};

use crate::config::CliConfig;

/// Arguments for the `formkit set` subcommand.
#[derive(Args, Debug)]
pub struct SetArgs {
    /// Document to edit.
    #[arg(value_name = "DOC")]
    pub document: PathBuf,

    /// Dotted path of the field, e.g. `address.street` or `hobbies.0.name`.
    #[arg(value_name = "PATH")]
    pub path: String,

    /// New value as JSON. Text that is not JSON is taken as a plain string.
    #[arg(value_name = "VALUE")]
    pub value: String,

    /// Rewrite the document in place.
    #[arg(long)]
    pub write: bool,
}

/// Arguments for the `formkit append` subcommand.
#[derive(Args, Debug)]
pub struct AppendArgs {
    /// Document to edit.
    #[arg(value_name = "DOC")]
    pub document: PathBuf,

    /// Dotted path of the list.
    #[arg(value_name = "PATH")]
    pub path: String,

    /// Schema used to synthesize the new element.
    #[arg(long, conflicts_with = "value")]
    pub schema: Option<PathBuf>,

    /// Element to append, as JSON.
    #[arg(long)]
    pub value: Option<String>,

    /// Rewrite the document in place.
    #[arg(long)]
    pub write: bool,
}

/// Arguments for the `formkit remove` subcommand.
#[derive(Args, Debug)]
pub struct RemoveArgs {
    /// Document to edit.
    #[arg(value_name = "DOC")]
    pub document: PathBuf,

    /// Dotted path of the list.
    #[arg(value_name = "PATH")]
    pub path: String,

    /// Position of the element to drop.
    #[arg(value_name = "INDEX")]
    pub index: usize,

    /// Rewrite the document in place.
    #[arg(long)]
    pub write: bool,
}

/// Execute the set subcommand.
pub fn run_set(args: &SetArgs, config: &CliConfig) -> Result<u8> {
    let Some(root) = load_document(&args.document)? else {
        return Ok(1);
    };
    let path = Path::parse(&args.path);
    let result = try_set_at_path(&root, &path, parse_value_arg(&args.value));
    finish(&args.document, args.write, result, config)
}

/// Execute the append subcommand.
pub fn run_append(args: &AppendArgs, config: &CliConfig) -> Result<u8> {
    let Some(root) = load_document(&args.document)? else {
        return Ok(1);
    };
    let path = Path::parse(&args.path);

    let schema: Option<SchemaNode> = args.schema.as_deref().map(crate::read_schema).transpose()?;
    let element: NewElement<'_> = match (&args.value, &schema) {
        (Some(raw), _) => NewElement::Value(parse_value_arg(raw)),
        (None, Some(schema)) => match schema.resolve(&path).and_then(SchemaNode::element) {
            Some(element) => NewElement::Default(element),
            None => bail!("schema has no array at '{path}'"),
        },
        (None, None) => bail!("append needs --value or --schema"),
    };

    let result = try_append_to_list(&root, &path, element);
    finish(&args.document, args.write, result, config)
}

/// Execute the remove subcommand.
pub fn run_remove(args: &RemoveArgs, config: &CliConfig) -> Result<u8> {
    let Some(root) = load_document(&args.document)? else {
        return Ok(1);
    };
    let path = Path::parse(&args.path);
    let result = try_remove_from_list(&root, &path, args.index);
    finish(&args.document, args.write, result, config)
}

/// Write document text, ending the file with a newline.
pub fn write_document(path: &FsPath, text: &str) -> Result<()> {
    std::fs::write(path, format!("{text}\n"))
        .with_context(|| format!("cannot write {}", path.display()))
}

/// Read and parse the document. Prints and returns `None` when malformed.
fn load_document(path: &FsPath) -> Result<Option<Value>> {
    let text = crate::read_text(path)?;
    match from_text(&text) {
        Ok(value) => Ok(Some(value)),
        Err(err) => {
            println!("PARSE ERROR: {}: {}", path.display(), err);
            Ok(None)
        }
    }
}

/// JSON when it parses, otherwise the raw text as a string.
fn parse_value_arg(raw: &str) -> Value {
    from_text(raw).unwrap_or_else(|_| {
        tracing::debug!(raw, "value argument is not JSON, using it as a string");
        Value::String(raw.to_string())
    })
}

fn finish(
    document: &FsPath,
    write: bool,
    result: Result<Value, PathError>,
    config: &CliConfig,
) -> Result<u8> {
    let value = match result {
        Ok(value) => value,
        Err(err) => {
            println!("ERROR: {err}");
            return Ok(1);
        }
    };
    let text = to_text_with(&value, &config.text_options());
    if write {
        write_document(document, &text)?;
        tracing::info!(path = %document.display(), "document updated");
    } else {
        println!("{text}");
    }
    Ok(0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn value_argument_falls_back_to_string() {
        assert_eq!(parse_value_arg("42"), Value::Number(42.0));
        assert_eq!(parse_value_arg("\"Main St\""), Value::from("Main St"));
        assert_eq!(parse_value_arg("Main St"), Value::from("Main St"));
        assert_eq!(parse_value_arg("true"), Value::Bool(true));
    }
}
