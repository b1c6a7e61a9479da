//! # Conformance Validation
//!
//! Walks a value against a schema and records every position whose shape
//! disagrees with the schema. Nothing is raised: the result is an
//! [`ErrorSet`], empty exactly when the value conforms.
//!
//! ## Rules
//!
//! | Schema | Conforms when | Otherwise |
//! |---|---|---|
//! | boolean | boolean | `Expected a boolean` |
//! | number | number | `Expected a number` |
//! | string | string | `Expected a string` |
//! | date | empty string, `YYYY-MM-DD`, or RFC 3339 timestamp | `Expected a valid date string` |
//! | object | mapping; then every schema field is checked at `path.field` | `Expected an object` |
//! | array | list; then every element is checked at `path.index` | `Expected an array` |
//!
//! A missing field is checked as an absent value, so it shows up as the
//! mismatch of the field's own kind one level down. Fields present in the
//! value but not in the schema are ignored.
//!
//! Recursion follows the schema, and each value position is visited at most
//! once, so no two rules ever report the same path.

use std::fmt;

use chrono::{DateTime, NaiveDate};
use serde::ser::SerializeMap;
use serde::{Serialize, Serializer};
use thiserror::Error;

use formkit_core::{LeafKind, Path, SchemaNode, Value};

/// Calendar-date layout stored by date fields.
const DATE_FORMAT: &str = "%Y-%m-%d";

/// The ways a value position can disagree with its schema.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Mismatch {
    #[error("Expected a boolean")]
    Boolean,
    #[error("Expected a number")]
    Number,
    #[error("Expected a string")]
    String,
    #[error("Expected a valid date string")]
    Date,
    #[error("Expected an object")]
    Object,
    #[error("Expected an array")]
    Array,
}

impl Mismatch {
    /// The mismatch reported for a leaf of `kind`.
    pub fn for_leaf(kind: LeafKind) -> Self {
        match kind {
            LeafKind::Boolean => Mismatch::Boolean,
            LeafKind::Number => Mismatch::Number,
            LeafKind::String => Mismatch::String,
            LeafKind::Date => Mismatch::Date,
        }
    }

    /// The human-readable message.
    pub fn message(self) -> &'static str {
        match self {
            Mismatch::Boolean => "Expected a boolean",
            Mismatch::Number => "Expected a number",
            Mismatch::String => "Expected a string",
            Mismatch::Date => "Expected a valid date string",
            Mismatch::Object => "Expected an object",
            Mismatch::Array => "Expected an array",
        }
    }
}

/// One nonconformant position.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Violation {
    /// Where the value disagrees with the schema.
    pub path: Path,
    /// How it disagrees.
    pub mismatch: Mismatch,
}

impl Violation {
    pub fn message(&self) -> &'static str {
        self.mismatch.message()
    }
}

impl fmt::Display for Violation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.path.is_root() {
            write!(f, "(root): {}", self.mismatch)
        } else {
            write!(f, "{}: {}", self.path, self.mismatch)
        }
    }
}

/// Path-keyed nonconformances, in traversal order.
///
/// Keys are unique: inserting at a path already present replaces its entry.
/// Serializes as a JSON object from canonical path to message.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ErrorSet {
    violations: Vec<Violation>,
}

impl ErrorSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the number of nonconformant positions.
    pub fn len(&self) -> usize {
        self.violations.len()
    }

    /// Returns true if the value conforms.
    pub fn is_empty(&self) -> bool {
        self.violations.is_empty()
    }

    /// Record a mismatch at `path`, replacing any entry already there.
    pub fn insert(&mut self, path: Path, mismatch: Mismatch) {
        match self.violations.iter_mut().find(|v| v.path == path) {
            Some(existing) => existing.mismatch = mismatch,
            None => self.violations.push(Violation { path, mismatch }),
        }
    }

    /// Message recorded at the canonical dotted path, if any.
    pub fn get(&self, path: &str) -> Option<&'static str> {
        let path = Path::parse(path);
        self.violations
            .iter()
            .find(|v| v.path == path)
            .map(Violation::message)
    }

    pub fn contains(&self, path: &str) -> bool {
        self.get(path).is_some()
    }

    /// Returns a slice of all violations.
    pub fn violations(&self) -> &[Violation] {
        &self.violations
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Violation> {
        self.violations.iter()
    }

    /// Canonical paths in traversal order.
    pub fn paths(&self) -> impl Iterator<Item = &Path> {
        self.violations.iter().map(|v| &v.path)
    }

    /// Append a violation whose path is known to be new.
    ///
    /// Traversal never revisits a position, so `check` skips the duplicate
    /// scan that [`insert`](Self::insert) performs.
    fn record(&mut self, path: Path, mismatch: Mismatch) {
        self.violations.push(Violation { path, mismatch });
    }

    /// Fold `other` into this set.
    pub fn extend(&mut self, other: ErrorSet) {
        for violation in other.violations {
            self.insert(violation.path, violation.mismatch);
        }
    }

    /// Consumes self and returns the inner Vec.
    pub fn into_inner(self) -> Vec<Violation> {
        self.violations
    }
}

impl<'a> IntoIterator for &'a ErrorSet {
    type Item = &'a Violation;
    type IntoIter = std::slice::Iter<'a, Violation>;

    fn into_iter(self) -> Self::IntoIter {
        self.violations.iter()
    }
}

impl fmt::Display for ErrorSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, v) in self.violations.iter().enumerate() {
            if i > 0 {
                writeln!(f)?;
            }
            write!(f, "{v}")?;
        }
        Ok(())
    }
}

impl Serialize for ErrorSet {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.violations.len()))?;
        for v in &self.violations {
            map.serialize_entry(&v.path.to_string(), v.message())?;
        }
        map.end()
    }
}

/// Validate `value` against `node` from the root.
pub fn validate(node: &SchemaNode, value: &Value) -> ErrorSet {
    validate_at(node, value, &Path::root())
}

/// Validate `value` against `node`, reporting paths below `path`.
///
/// Used to check a subtree in place: errors carry their full path from the
/// enclosing record.
pub fn validate_at(node: &SchemaNode, value: &Value, path: &Path) -> ErrorSet {
    let mut errors = ErrorSet::new();
    check(node, Some(value), path, &mut errors);
    errors
}

fn check(node: &SchemaNode, value: Option<&Value>, path: &Path, errors: &mut ErrorSet) {
    match node {
        SchemaNode::Leaf(kind) => {
            if !leaf_conforms(*kind, value) {
                errors.record(path.clone(), Mismatch::for_leaf(*kind));
            }
        }
        SchemaNode::Object(fields) => match value {
            Some(Value::Object(map)) => {
                for (name, child) in fields {
                    check(child, map.get(name), &path.child_key(name), errors);
                }
            }
            _ => errors.record(path.clone(), Mismatch::Object),
        },
        SchemaNode::Array(element) => match value {
            Some(Value::Array(items)) => {
                for (index, item) in items.iter().enumerate() {
                    check(element, Some(item), &path.child_index(index), errors);
                }
            }
            _ => errors.record(path.clone(), Mismatch::Array),
        },
    }
}

fn leaf_conforms(kind: LeafKind, value: Option<&Value>) -> bool {
    match (kind, value) {
        (LeafKind::Boolean, Some(Value::Bool(_))) => true,
        (LeafKind::Number, Some(Value::Number(_))) => true,
        (LeafKind::String, Some(Value::String(_))) => true,
        (LeafKind::Date, Some(Value::String(s))) => is_valid_date(s),
        _ => false,
    }
}

/// Returns true for an unset date (`""`), a `YYYY-MM-DD` calendar date, or
/// an RFC 3339 timestamp.
pub fn is_valid_date(s: &str) -> bool {
    s.is_empty()
        || NaiveDate::parse_from_str(s, DATE_FORMAT).is_ok()
        || DateTime::parse_from_rfc3339(s).is_ok()
}
