//! # Schema Model
//!
//! A [`SchemaNode`] describes the shape of a record: leaves of one of four
//! [`LeafKind`]s, objects with ordered named fields, and arrays with a single
//! element schema shared by every element.
//!
//! ## Source Encoding
//!
//! Schemas are written as JSON:
//!
//! ```json
//! {
//!   "isActive": "boolean",
//!   "joinDate": "date",
//!   "address": { "street": "string", "number": "number" },
//!   "hobbies": [ { "stringField": "string" } ]
//! }
//! ```
//!
//! A string names a leaf kind, an object is an object node (key order is
//! kept), and an array's first element is the element schema.
//!
//! ## Default Policy
//!
//! Any well-formed JSON yields a schema; nothing is rejected on shape:
//!
//! | Source | Resolved as |
//! |---|---|
//! | `"array"` | array of string |
//! | unknown leaf name, number, boolean, null | string leaf |
//! | `[]` | array of string |
//! | `[a, b, ...]` | array of `a`; the rest is ignored |
//!
//! Each fallback is logged at `warn`.

use serde_json::Value as Json;

use crate::error::SchemaError;
use crate::path::{Path, Segment};

/// The primitive field kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LeafKind {
    Boolean,
    String,
    Number,
    /// A calendar date held as a `YYYY-MM-DD` string.
    Date,
}

impl LeafKind {
    /// All leaf kinds, in declaration order.
    pub const ALL: [LeafKind; 4] = [
        LeafKind::Boolean,
        LeafKind::String,
        LeafKind::Number,
        LeafKind::Date,
    ];

    /// The name used in schema source text.
    pub fn name(self) -> &'static str {
        match self {
            LeafKind::Boolean => "boolean",
            LeafKind::String => "string",
            LeafKind::Number => "number",
            LeafKind::Date => "date",
        }
    }

    /// Look up a kind by its source name. Names are case-sensitive.
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|kind| kind.name() == name)
    }
}

/// A node of a schema tree.
#[derive(Debug, Clone, PartialEq)]
pub enum SchemaNode {
    /// A primitive field.
    Leaf(LeafKind),
    /// Named fields in display order. Names are unique.
    Object(Vec<(String, SchemaNode)>),
    /// A list whose every element has the boxed schema.
    Array(Box<SchemaNode>),
}

impl SchemaNode {
    pub fn boolean() -> Self {
        SchemaNode::Leaf(LeafKind::Boolean)
    }

    pub fn string() -> Self {
        SchemaNode::Leaf(LeafKind::String)
    }

    pub fn number() -> Self {
        SchemaNode::Leaf(LeafKind::Number)
    }

    pub fn date() -> Self {
        SchemaNode::Leaf(LeafKind::Date)
    }

    /// Array node over `element`.
    pub fn array(element: SchemaNode) -> Self {
        SchemaNode::Array(Box::new(element))
    }

    /// Object node from `(name, schema)` pairs.
    ///
    /// A repeated name keeps its first position and takes the last schema,
    /// matching how JSON objects resolve duplicate keys.
    pub fn object<K, I>(fields: I) -> Self
    where
        K: Into<String>,
        I: IntoIterator<Item = (K, SchemaNode)>,
    {
        let mut out: Vec<(String, SchemaNode)> = Vec::new();
        for (name, node) in fields {
            let name = name.into();
            match out.iter_mut().find(|(existing, _)| *existing == name) {
                Some((_, slot)) => *slot = node,
                None => out.push((name, node)),
            }
        }
        SchemaNode::Object(out)
    }

    /// Parse schema source text.
    ///
    /// # Errors
    ///
    /// Returns [`SchemaError::Malformed`] only when `text` is not well-formed
    /// JSON. Every well-formed document yields a schema.
    pub fn parse(text: &str) -> Result<Self, SchemaError> {
        let json: Json = serde_json::from_str(text)?;
        Ok(Self::from_json(&json))
    }

    /// Build a schema from an already parsed JSON source document.
    pub fn from_json(json: &Json) -> Self {
        match json {
            Json::String(name) => match LeafKind::from_name(name) {
                Some(kind) => SchemaNode::Leaf(kind),
                None if name == "array" => {
                    tracing::warn!("legacy \"array\" leaf read as an array of strings");
                    SchemaNode::array(SchemaNode::string())
                }
                None => {
                    tracing::warn!(kind = %name, "unknown leaf kind, using string");
                    SchemaNode::string()
                }
            },
            Json::Object(fields) => SchemaNode::object(
                fields
                    .iter()
                    .map(|(name, node)| (name.as_str(), Self::from_json(node))),
            ),
            Json::Array(items) => {
                let element = match items.as_slice() {
                    [] => {
                        tracing::warn!("array schema without an element, using string");
                        SchemaNode::string()
                    }
                    [first, rest @ ..] => {
                        if !rest.is_empty() {
                            tracing::warn!(
                                ignored = rest.len(),
                                "array schema lists several elements, using the first"
                            );
                        }
                        Self::from_json(first)
                    }
                };
                SchemaNode::array(element)
            }
            Json::Null | Json::Bool(_) | Json::Number(_) => {
                tracing::warn!(source = %json, "schema node is not a kind name, using string");
                SchemaNode::string()
            }
        }
    }

    /// Render back to the JSON source encoding.
    pub fn to_source(&self) -> Json {
        match self {
            SchemaNode::Leaf(kind) => Json::String(kind.name().to_string()),
            SchemaNode::Object(fields) => Json::Object(
                fields
                    .iter()
                    .map(|(name, node)| (name.clone(), node.to_source()))
                    .collect(),
            ),
            SchemaNode::Array(element) => Json::Array(vec![element.to_source()]),
        }
    }

    /// `"object"`, `"array"`, or the leaf kind name.
    pub fn kind_name(&self) -> &'static str {
        match self {
            SchemaNode::Leaf(kind) => kind.name(),
            SchemaNode::Object(_) => "object",
            SchemaNode::Array(_) => "array",
        }
    }

    pub fn as_leaf(&self) -> Option<LeafKind> {
        match self {
            SchemaNode::Leaf(kind) => Some(*kind),
            _ => None,
        }
    }

    /// Fields of an object node, in order.
    pub fn fields(&self) -> Option<&[(String, SchemaNode)]> {
        match self {
            SchemaNode::Object(fields) => Some(fields),
            _ => None,
        }
    }

    /// A named field of an object node.
    pub fn field(&self, name: &str) -> Option<&SchemaNode> {
        self.fields()?
            .iter()
            .find(|(field, _)| field == name)
            .map(|(_, node)| node)
    }

    /// Element schema of an array node.
    pub fn element(&self) -> Option<&SchemaNode> {
        match self {
            SchemaNode::Array(element) => Some(element),
            _ => None,
        }
    }

    /// The schema governing the value at `path`.
    ///
    /// Field segments select object fields; any index segment selects the
    /// element schema of an array.
    pub fn resolve(&self, path: &Path) -> Option<&SchemaNode> {
        path.segments()
            .iter()
            .try_fold(self, |node, segment| match (node, segment) {
                (SchemaNode::Object(_), segment) => node.field(&segment.as_key()),
                (SchemaNode::Array(element), Segment::Index(_)) => Some(&**element),
                _ => None,
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    const SAMPLE: &str = r#"{
        "isActive": "boolean",
        "username": "string",
        "age": "number",
        "joinDate": "date",
        "address": {"street": "string", "number": "number"},
        "hobbies": [{"stringField": "string"}]
    }"#;

    #[test]
    fn parses_all_node_kinds_in_order() {
        let schema = SchemaNode::parse(SAMPLE).unwrap();
        let names: Vec<&str> = schema
            .fields()
            .unwrap()
            .iter()
            .map(|(name, _)| name.as_str())
            .collect();
        assert_eq!(
            names,
            vec!["isActive", "username", "age", "joinDate", "address", "hobbies"]
        );
        assert_eq!(schema.field("isActive"), Some(&SchemaNode::boolean()));
        assert_eq!(schema.field("joinDate"), Some(&SchemaNode::date()));
        assert_eq!(
            schema.field("hobbies"),
            Some(&SchemaNode::array(SchemaNode::object([(
                "stringField",
                SchemaNode::string()
            )])))
        );
    }

    #[test]
    fn malformed_json_is_rejected() {
        let err = SchemaNode::parse("{\"age\": ").unwrap_err();
        assert!(matches!(err, SchemaError::Malformed { .. }));
    }

    #[test]
    fn default_policy_never_rejects_shapes() {
        let schema = SchemaNode::from_json(&json!({
            "legacy": "array",
            "odd": "colour",
            "num": 7,
            "empty": [],
            "many": ["number", "boolean"],
        }));
        assert_eq!(
            schema.field("legacy"),
            Some(&SchemaNode::array(SchemaNode::string()))
        );
        assert_eq!(schema.field("odd"), Some(&SchemaNode::string()));
        assert_eq!(schema.field("num"), Some(&SchemaNode::string()));
        assert_eq!(
            schema.field("empty"),
            Some(&SchemaNode::array(SchemaNode::string()))
        );
        assert_eq!(
            schema.field("many"),
            Some(&SchemaNode::array(SchemaNode::number()))
        );
    }

    #[test]
    fn leaf_names_are_case_sensitive() {
        assert_eq!(LeafKind::from_name("date"), Some(LeafKind::Date));
        assert_eq!(LeafKind::from_name("Date"), None);
        for kind in LeafKind::ALL {
            assert_eq!(LeafKind::from_name(kind.name()), Some(kind));
        }
    }

    #[test]
    fn source_rendering_round_trips() {
        let schema = SchemaNode::parse(SAMPLE).unwrap();
        assert_eq!(SchemaNode::from_json(&schema.to_source()), schema);
    }

    #[test]
    fn duplicate_field_keeps_first_position() {
        let schema = SchemaNode::object([
            ("a", SchemaNode::string()),
            ("b", SchemaNode::number()),
            ("a", SchemaNode::boolean()),
        ]);
        assert_eq!(
            schema,
            SchemaNode::Object(vec![
                ("a".into(), SchemaNode::boolean()),
                ("b".into(), SchemaNode::number()),
            ])
        );
    }

    #[test]
    fn resolve_walks_objects_and_arrays() {
        let schema = SchemaNode::parse(SAMPLE).unwrap();
        assert_eq!(
            schema.resolve(&Path::parse("address.number")),
            Some(&SchemaNode::number())
        );
        assert_eq!(
            schema.resolve(&Path::parse("hobbies.3.stringField")),
            Some(&SchemaNode::string())
        );
        assert_eq!(
            schema.resolve(&Path::parse("hobbies")).and_then(SchemaNode::element),
            Some(&SchemaNode::object([("stringField", SchemaNode::string())]))
        );
        assert_eq!(schema.resolve(&Path::parse("hobbies.stringField")), None);
        assert_eq!(schema.resolve(&Path::parse("age.x")), None);
        assert_eq!(schema.resolve(&Path::root()), Some(&schema));
    }

    #[test]
    fn kind_names() {
        assert_eq!(SchemaNode::number().kind_name(), "number");
        assert_eq!(SchemaNode::object::<&str, _>([]).kind_name(), "object");
        assert_eq!(SchemaNode::array(SchemaNode::date()).kind_name(), "array");
    }
}
