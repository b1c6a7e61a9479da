//! # Error Location
//!
//! Maps a path reported by the validator to a line and column of the
//! serialized text, so an editor can anchor the diagnostic.
//!
//! This is a text search, not a position-tracking parse: the last segment
//! of the path is rendered as a quoted field name and the first line
//! containing it wins. When the same field name appears at several depths
//! the anchor may land on an earlier occurrence. Paths ending in a list
//! index and the root path have no field name and are never located.

use std::fmt;

use serde::Serialize;

use formkit_core::{Path, Segment};
use formkit_engine::ErrorSet;

/// A 1-based line, and the column just before a quoted field name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub struct Position {
    pub line: usize,
    /// Column immediately before the quoted field name, counted in
    /// characters. Equals the 0-based offset of the opening quote.
    pub column: usize,
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.line, self.column)
    }
}

/// Find the first line of `text` naming the last field of `path`.
///
/// Returns `None` for the root path, for paths ending in an index, and when
/// the field name does not occur in the text (for example while the text is
/// out of step with the value the path came from).
pub fn locate(text: &str, path: &Path) -> Option<Position> {
    let key = match path.last()? {
        Segment::Key(key) => key,
        Segment::Index(_) => return None,
    };
    // The key as it appears in JSON text, quotes and escapes included.
    let needle = serde_json::to_string(key).ok()?;

    text.lines().enumerate().find_map(|(index, line)| {
        let byte = line.find(&needle)?;
        Some(Position {
            line: index + 1,
            column: line[..byte].chars().count(),
        })
    })
}

/// A validation error anchored in serialized text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Diagnostic {
    pub path: Path,
    pub message: String,
    /// Where the field sits in the text, when it could be found.
    pub position: Option<Position>,
}

impl Diagnostic {
    /// Deterministic single-line rendering:
    /// `line:column path: message`, or `-:- path: message` when unanchored.
    pub fn render(&self) -> String {
        let at = match self.position {
            Some(position) => position.to_string(),
            None => "-:-".to_string(),
        };
        let path = if self.path.is_root() {
            "(root)".to_string()
        } else {
            self.path.to_string()
        };
        format!("{at} {path}: {}", self.message)
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.render())
    }
}

/// Anchor every entry of `errors` in `text`, keeping the error order.
pub fn diagnostics(text: &str, errors: &ErrorSet) -> Vec<Diagnostic> {
    errors
        .iter()
        .map(|violation| Diagnostic {
            path: violation.path.clone(),
            message: violation.message().to_string(),
            position: locate(text, &violation.path),
        })
        .collect()
}
