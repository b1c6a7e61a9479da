//! # Paths: Dotted Addresses Into a Value Tree
//!
//! A [`Path`] is a sequence of [`Segment`]s. Field-name segments navigate
//! mappings; index segments navigate lists. The canonical rendering joins
//! segments with `.` (`hobbies.0.stringField`) and the empty path is the
//! root.
//!
//! Parsing treats a token as an index only when it is the canonical decimal
//! rendering of a `usize` (`0`, `17`, but not `007` or `-1`), so
//! `Path::parse(p).to_string() == p` holds for every canonical path.

use std::borrow::Cow;
use std::convert::Infallible;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Deepest path the mutators accept. Matches the nesting limit of the JSON
/// text parser.
pub const MAX_PATH_DEPTH: usize = 128;

/// One step of a [`Path`].
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Segment {
    /// Field name in a mapping.
    Key(String),
    /// Position in a list.
    Index(usize),
}

impl Segment {
    /// Parse a single dotted token.
    pub fn parse(token: &str) -> Self {
        match token.parse::<usize>() {
            Ok(index) if index.to_string() == token => Segment::Index(index),
            _ => Segment::Key(token.to_string()),
        }
    }

    /// The segment as a mapping key. Index segments use their decimal form.
    pub fn as_key(&self) -> Cow<'_, str> {
        match self {
            Segment::Key(key) => Cow::Borrowed(key),
            Segment::Index(index) => Cow::Owned(index.to_string()),
        }
    }
}

impl fmt::Display for Segment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Segment::Key(key) => f.write_str(key),
            Segment::Index(index) => write!(f, "{index}"),
        }
    }
}

impl From<&str> for Segment {
    fn from(key: &str) -> Self {
        Segment::Key(key.to_string())
    }
}

impl From<usize> for Segment {
    fn from(index: usize) -> Self {
        Segment::Index(index)
    }
}

/// Address of a position inside a value tree.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Path(Vec<Segment>);

impl Path {
    /// The empty path, addressing the whole value.
    pub fn root() -> Self {
        Self(Vec::new())
    }

    /// Parse the canonical dotted form. The empty string is the root.
    pub fn parse(dotted: &str) -> Self {
        if dotted.is_empty() {
            return Self::root();
        }
        Self(dotted.split('.').map(Segment::parse).collect())
    }

    /// Returns the segments in order from the root.
    pub fn segments(&self) -> &[Segment] {
        &self.0
    }

    /// Returns true for the root path.
    pub fn is_root(&self) -> bool {
        self.0.is_empty()
    }

    /// Number of segments.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Returns true for the root path.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// The final segment, if any.
    pub fn last(&self) -> Option<&Segment> {
        self.0.last()
    }

    /// The path without its final segment. The root has no parent.
    pub fn parent(&self) -> Option<Path> {
        let (_, init) = self.0.split_last()?;
        Some(Self(init.to_vec()))
    }

    /// The first `len` segments of this path.
    pub fn prefix(&self, len: usize) -> Path {
        Self(self.0[..len.min(self.0.len())].to_vec())
    }

    /// Extend by one segment.
    pub fn child(&self, segment: impl Into<Segment>) -> Path {
        let mut segments = self.0.clone();
        segments.push(segment.into());
        Self(segments)
    }

    /// Extend by a field name.
    pub fn child_key(&self, key: &str) -> Path {
        self.child(Segment::Key(key.to_string()))
    }

    /// Extend by a list index.
    pub fn child_index(&self, index: usize) -> Path {
        self.child(Segment::Index(index))
    }

    /// Append a segment in place.
    pub fn push(&mut self, segment: impl Into<Segment>) {
        self.0.push(segment.into());
    }

    /// Returns true if `prefix` is this path or one of its ancestors.
    pub fn starts_with(&self, prefix: &Path) -> bool {
        self.0.starts_with(&prefix.0)
    }
}

impl fmt::Display for Path {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, segment) in self.0.iter().enumerate() {
            if i > 0 {
                f.write_str(".")?;
            }
            write!(f, "{segment}")?;
        }
        Ok(())
    }
}

impl FromStr for Path {
    type Err = Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self::parse(s))
    }
}

impl From<&str> for Path {
    fn from(dotted: &str) -> Self {
        Self::parse(dotted)
    }
}

impl From<Vec<Segment>> for Path {
    fn from(segments: Vec<Segment>) -> Self {
        Self(segments)
    }
}

impl FromIterator<Segment> for Path {
    fn from_iter<I: IntoIterator<Item = Segment>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

impl Serialize for Path {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for Path {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let dotted = String::deserialize(deserializer)?;
        Ok(Self::parse(&dotted))
    }
}
