//! # Error Types: Structured Error Hierarchy
//!
//! Defines the error types used throughout formkit. All errors use
//! `thiserror` for derive-based `Display` and `Error` implementations.
//!
//! ## Design
//!
//! - Schema conformance problems are not errors at all: they are collected
//!   into an error set by the validator and returned as a value.
//! - Malformed text (schema source or serialized value) is a recoverable
//!   error; callers keep their last good tree.
//! - Path errors only surface from the strict mutation entry points. The
//!   lenient entry points turn them into "return the input unchanged".

use thiserror::Error;

/// Top-level error type for formkit.
#[derive(Error, Debug)]
pub enum FormkitError {
    /// The schema source text could not be read as a schema.
    #[error("schema error: {0}")]
    Schema(#[from] SchemaError),

    /// A mutation addressed a position that does not exist.
    #[error("path error: {0}")]
    Path(#[from] PathError),

    /// Serialized value text is not well-formed.
    #[error("parse error: {0}")]
    Parse(#[from] ParseError),
}

/// Error reading a schema from its JSON source encoding.
#[derive(Error, Debug)]
pub enum SchemaError {
    /// The schema text is not well-formed JSON.
    #[error("invalid schema JSON at line {line}, column {column}: {message}")]
    Malformed {
        /// Parser message.
        message: String,
        /// 1-based line reported by the parser.
        line: usize,
        /// 1-based column reported by the parser.
        column: usize,
    },
}

impl From<serde_json::Error> for SchemaError {
    fn from(err: serde_json::Error) -> Self {
        Self::Malformed {
            message: err.to_string(),
            line: err.line(),
            column: err.column(),
        }
    }
}

/// Serialized value text is not well-formed.
///
/// The position is whatever the JSON parser reported; it is informational
/// only and is not tied to any path in the value tree.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("{message}")]
pub struct ParseError {
    /// Parser message, including the position it failed at.
    pub message: String,
    /// 1-based line reported by the parser.
    pub line: usize,
    /// 1-based column reported by the parser.
    pub column: usize,
}

impl From<serde_json::Error> for ParseError {
    fn from(err: serde_json::Error) -> Self {
        Self {
            message: err.to_string(),
            line: err.line(),
            column: err.column(),
        }
    }
}

/// A mutation could not reach the addressed position.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PathError {
    /// An index segment points past the end of a list.
    #[error("index {index} is out of range for list of length {len} at '{path}'")]
    IndexOutOfRange {
        /// Path of the list.
        path: String,
        /// Requested index.
        index: usize,
        /// Current list length.
        len: usize,
    },

    /// A list operation found something other than a list.
    #[error("expected a list at '{path}', found {found}")]
    NotAList {
        /// Path that was expected to hold a list.
        path: String,
        /// Kind of value actually found.
        found: &'static str,
    },

    /// A field-name segment was applied to a list.
    #[error("cannot select field '{key}' of the list at '{path}'")]
    KeyOnList {
        /// Path of the list.
        path: String,
        /// Field name that was requested.
        key: String,
    },

    /// The path continues below a leaf value.
    #[error("cannot descend into {found} at '{path}'")]
    NotAContainer {
        /// Path of the leaf.
        path: String,
        /// Kind of value found.
        found: &'static str,
    },

    /// The path has more segments than a value may nest.
    #[error("path has {depth} segments, more than the limit of {limit}")]
    TooDeep {
        /// Number of segments in the path.
        depth: usize,
        /// See [`MAX_PATH_DEPTH`](crate::path::MAX_PATH_DEPTH).
        limit: usize,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_error_keeps_parser_position() {
        let err = serde_json::from_str::<serde_json::Value>("{\n  \"a\": }").unwrap_err();
        let parse = ParseError::from(err);
        assert_eq!(parse.line, 2);
        assert!(parse.column > 0);
        assert!(!parse.message.is_empty());
    }

    #[test]
    fn path_error_messages_name_the_path() {
        let err = PathError::IndexOutOfRange {
            path: "hobbies".into(),
            index: 3,
            len: 1,
        };
        assert_eq!(
            err.to_string(),
            "index 3 is out of range for list of length 1 at 'hobbies'"
        );
    }

    #[test]
    fn umbrella_wraps_sources() {
        let err: FormkitError = PathError::NotAContainer {
            path: "age".into(),
            found: "number",
        }
        .into();
        assert!(err.to_string().starts_with("path error:"));
    }
}
