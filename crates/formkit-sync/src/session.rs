//! # Edit Session
//!
//! [`EditSession`] holds what an editor shows for one record: the schema, the
//! current value, the text view of it, and the parse error of the last text
//! edit if it failed.
//!
//! ## Consistency
//!
//! - Field edits (`set_field`, `append`, `remove`) install a new value and
//!   re-render the text, discarding any pending parse error.
//! - Text edits always keep the typed text. Well-formed text installs the
//!   parsed value; malformed text leaves the last good value in place and
//!   records the [`ParseError`], so the user can see and fix it.
//! - A new schema replaces the value wholesale with its synthesized default.
//!
//! The session only ever swaps whole values; it never edits a tree in place.

use formkit_core::{ParseError, Path, SchemaError, SchemaNode, Value};
use formkit_engine::{
    append_to_list, remove_from_list, set_at_path, synthesize, validate, ErrorSet,
};

use crate::locate::{diagnostics, Diagnostic};
use crate::text::{from_text, to_text_with, TextOptions};

/// The caller-held revision slot for one record.
#[derive(Debug, Clone)]
pub struct EditSession {
    schema: SchemaNode,
    value: Value,
    text: String,
    parse_error: Option<ParseError>,
    options: TextOptions,
    revision: u64,
}

impl EditSession {
    /// Start from the synthesized default of `schema`.
    pub fn new(schema: SchemaNode) -> Self {
        Self::with_options(schema, TextOptions::default())
    }

    /// Start from the synthesized default of `schema`, printing with `options`.
    pub fn with_options(schema: SchemaNode, options: TextOptions) -> Self {
        let value = synthesize(&schema);
        let text = to_text_with(&value, &options);
        Self {
            schema,
            value,
            text,
            parse_error: None,
            options,
            revision: 0,
        }
    }

    /// Start from schema source text.
    ///
    /// # Errors
    ///
    /// Returns [`SchemaError`] if the schema text is not well-formed JSON.
    pub fn from_schema_text(schema_text: &str) -> Result<Self, SchemaError> {
        Ok(Self::new(SchemaNode::parse(schema_text)?))
    }

    pub fn schema(&self) -> &SchemaNode {
        &self.schema
    }

    /// The last good value.
    pub fn value(&self) -> &Value {
        &self.value
    }

    /// The text view, possibly holding a malformed edit.
    pub fn text(&self) -> &str {
        &self.text
    }

    /// The parse error of the last text edit, if it failed.
    pub fn parse_error(&self) -> Option<&ParseError> {
        self.parse_error.as_ref()
    }

    /// Number of times a changed value has been installed.
    pub fn revision(&self) -> u64 {
        self.revision
    }

    /// Replace the value at `path`.
    pub fn set_field(&mut self, path: &Path, value: Value) {
        let next = if self.value.pointer(path) == Some(&value) {
            self.value.clone()
        } else {
            set_at_path(&self.value, path, value)
        };
        self.install(next);
    }

    /// Append the default element to the array at `path`.
    ///
    /// Does nothing when the schema has no array at `path`.
    pub fn append(&mut self, path: &Path) {
        let Some(element) = self.schema.resolve(path).and_then(SchemaNode::element) else {
            tracing::debug!(path = %path, "no array schema at path, append skipped");
            return;
        };
        let next = append_to_list(&self.value, path, element);
        self.install(next);
    }

    /// Append `element` to the list at `path`.
    pub fn append_value(&mut self, path: &Path, element: Value) {
        let next = append_to_list(&self.value, path, element);
        self.install(next);
    }

    /// Remove the element at `index` from the list at `path`.
    pub fn remove(&mut self, path: &Path, index: usize) {
        let next = remove_from_list(&self.value, path, index);
        self.install(next);
    }

    /// Take a text edit.
    ///
    /// # Errors
    ///
    /// Returns the [`ParseError`] when `text` is malformed. The text is kept
    /// either way; the value only changes on success.
    pub fn edit_text(&mut self, text: impl Into<String>) -> Result<(), ParseError> {
        self.text = text.into();
        match from_text(&self.text) {
            Ok(value) => {
                self.parse_error = None;
                if value != self.value {
                    self.value = value;
                    self.revision += 1;
                }
                Ok(())
            }
            Err(err) => {
                self.parse_error = Some(err.clone());
                Err(err)
            }
        }
    }

    /// Install a new schema and start over from its default value.
    pub fn replace_schema(&mut self, schema: SchemaNode) {
        let value = synthesize(&schema);
        self.schema = schema;
        self.install(value);
    }

    /// Validate the current value against the schema.
    pub fn errors(&self) -> ErrorSet {
        validate(&self.schema, &self.value)
    }

    /// Validation errors anchored in the current text.
    pub fn diagnostics(&self) -> Vec<Diagnostic> {
        diagnostics(&self.text, &self.errors())
    }

    /// Install a value produced by a field edit and re-render the text.
    ///
    /// Mutators hand back the current tree when they change nothing, so
    /// identity is enough to tell a real edit from a no-op.
    fn install(&mut self, value: Value) {
        if !same_tree(&value, &self.value) {
            self.value = value;
            self.revision += 1;
        }
        self.text = to_text_with(&self.value, &self.options);
        self.parse_error = None;
    }
}

/// Shared containers, or equal leaves. Never walks a tree.
fn same_tree(a: &Value, b: &Value) -> bool {
    match (a, b) {
        (Value::Array(_) | Value::Object(_), _) | (_, Value::Array(_) | Value::Object(_)) => {
            a.ptr_eq(b)
        }
        _ => a == b,
    }
}
