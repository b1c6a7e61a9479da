//! # formkit-cli: Command-Line Front End
//!
//! Provides the `formkit` binary. The engine crates never touch the file
//! system; this crate reads schema and document files, hands their text to
//! the engine, and prints the results.
//!
//! ## Subcommands
//!
//! - `formkit init SCHEMA`: print the default record for a schema.
//! - `formkit validate SCHEMA DOC`: print located diagnostics.
//! - `formkit fmt DOC`: re-print a document in canonical layout.
//! - `formkit set DOC PATH VALUE`: replace one field.
//! - `formkit append DOC PATH`: add a list element.
//! - `formkit remove DOC PATH INDEX`: drop a list element.
//!
//! ```bash
//! formkit init user.schema.json > user.json
//! formkit set user.json address.street '"Main St"' --write
//! formkit validate user.schema.json user.json
//! ```
//!
//! Exit codes: 0 on success, 1 when a document is malformed, fails
//! validation, or an edit cannot be applied, 2 on operational errors.

pub mod config;
pub mod edit;
pub mod init;
pub mod validate;

use std::path::Path;

use anyhow::{Context, Result};

use formkit_core::SchemaNode;

/// Read and parse a schema file.
pub fn read_schema(path: &Path) -> Result<SchemaNode> {
    let text = read_text(path)?;
    SchemaNode::parse(&text).with_context(|| format!("invalid schema {}", path.display()))
}

/// Read a whole text file.
pub fn read_text(path: &Path) -> Result<String> {
    std::fs::read_to_string(path).with_context(|| format!("cannot read {}", path.display()))
}
