//! # Value Synthesis
//!
//! Builds the default value for a schema: `false`, `0`, and `""` for the
//! leaves, one synthesized entry per field for objects, and an empty list
//! for arrays. Arrays never get placeholder elements; elements are added
//! one at a time through [`append_to_list`](crate::append_to_list).

use formkit_core::{LeafKind, Map, SchemaNode, Value};

/// Default value for `node`. Always conforms to `node`.
pub fn synthesize(node: &SchemaNode) -> Value {
    match node {
        SchemaNode::Leaf(kind) => default_leaf(*kind),
        SchemaNode::Object(fields) => {
            let mut map = Map::with_capacity(fields.len());
            for (name, child) in fields {
                map.insert(name.clone(), synthesize(child));
            }
            Value::object(map)
        }
        SchemaNode::Array(_) => Value::array(Vec::new()),
    }
}

/// Default value for a leaf kind. Dates start unset.
pub fn default_leaf(kind: LeafKind) -> Value {
    match kind {
        LeafKind::Boolean => Value::Bool(false),
        LeafKind::Number => Value::Number(0.0),
        LeafKind::String | LeafKind::Date => Value::String(String::new()),
    }
}
