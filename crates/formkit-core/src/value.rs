//! # Value Tree: Immutable, Structurally Shared Record Data
//!
//! [`Value`] is the data being edited and validated. It is an explicit
//! tagged union: boolean, number, string (plain strings and date strings
//! alike), ordered list, ordered mapping, plus `Null`, which only ever enters
//! through hand-edited text and never conforms to any schema node.
//!
//! ## Sharing
//!
//! Lists and mappings sit behind an `Arc`. Cloning a `Value` is cheap and
//! never deep-copies a subtree, so an edit can rebuild only the ancestors of
//! the edited position and carry every sibling over as-is.
//! [`Value::ptr_eq`] exposes that sharing for change detection.
//!
//! ## Numbers
//!
//! Numbers are `f64`. Integral values serialize without a fractional part
//! (`0`, not `0.0`) so that synthesized defaults read naturally. Non-finite
//! numbers serialize as `null`.

use std::fmt;
use std::sync::Arc;

use serde::de::{self, MapAccess, SeqAccess, Visitor};
use serde::ser::{SerializeMap, SerializeSeq};
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::path::{Path, Segment};

/// Largest magnitude at which every integer is exactly representable in `f64`.
const MAX_SAFE_INTEGER: f64 = 9_007_199_254_740_992.0;

/// A node of the record being edited.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    /// Explicit null from serialized text.
    Null,
    /// Boolean leaf.
    Bool(bool),
    /// Numeric leaf.
    Number(f64),
    /// String leaf; also carries `YYYY-MM-DD` dates.
    String(String),
    /// Ordered list.
    Array(Arc<Vec<Value>>),
    /// Ordered mapping from field name to value.
    Object(Arc<Map>),
}

impl Value {
    /// Build a list value.
    pub fn array(items: Vec<Value>) -> Self {
        Value::Array(Arc::new(items))
    }

    /// Build a mapping value.
    pub fn object(map: Map) -> Self {
        Value::Object(Arc::new(map))
    }

    /// An empty mapping.
    pub fn empty_object() -> Self {
        Value::object(Map::new())
    }

    /// Name of the runtime shape, for diagnostics.
    pub fn kind_name(&self) -> &'static str {
        match self {
            Value::Null => "null",
            Value::Bool(_) => "boolean",
            Value::Number(_) => "number",
            Value::String(_) => "string",
            Value::Array(_) => "array",
            Value::Object(_) => "object",
        }
    }

    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Value::Bool(b) => Some(*b),
            _ => None,
        }
    }

    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Value::Number(n) => Some(*n),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::String(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_array(&self) -> Option<&[Value]> {
        match self {
            Value::Array(items) => Some(items.as_slice()),
            _ => None,
        }
    }

    pub fn as_object(&self) -> Option<&Map> {
        match self {
            Value::Object(map) => Some(map),
            _ => None,
        }
    }

    /// Look up a field of a mapping value.
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.as_object()?.get(key)
    }

    /// Follow `path` from this value.
    ///
    /// Index segments select list elements; against a mapping they are read
    /// as their decimal field name. Returns `None` as soon as a segment does
    /// not resolve.
    pub fn pointer(&self, path: &Path) -> Option<&Value> {
        path.segments()
            .iter()
            .try_fold(self, |node, segment| match (node, segment) {
                (Value::Object(map), segment) => map.get(&segment.as_key()),
                (Value::Array(items), Segment::Index(index)) => items.get(*index),
                _ => None,
            })
    }

    /// Returns true when both values are the same shared list or mapping.
    ///
    /// Leaves are never pointer-equal; compare them with `==`.
    pub fn ptr_eq(&self, other: &Value) -> bool {
        match (self, other) {
            (Value::Array(a), Value::Array(b)) => Arc::ptr_eq(a, b),
            (Value::Object(a), Value::Object(b)) => Arc::ptr_eq(a, b),
            _ => false,
        }
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::Bool(b)
    }
}

impl From<f64> for Value {
    fn from(n: f64) -> Self {
        Value::Number(n)
    }
}

impl From<i64> for Value {
    fn from(n: i64) -> Self {
        Value::Number(n as f64)
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::String(s.to_string())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::String(s)
    }
}

impl From<Vec<Value>> for Value {
    fn from(items: Vec<Value>) -> Self {
        Value::array(items)
    }
}

impl From<Map> for Value {
    fn from(map: Map) -> Self {
        Value::object(map)
    }
}

impl From<serde_json::Value> for Value {
    fn from(json: serde_json::Value) -> Self {
        match json {
            serde_json::Value::Null => Value::Null,
            serde_json::Value::Bool(b) => Value::Bool(b),
            serde_json::Value::Number(n) => Value::Number(n.as_f64().unwrap_or(f64::NAN)),
            serde_json::Value::String(s) => Value::String(s),
            serde_json::Value::Array(items) => {
                Value::array(items.into_iter().map(Value::from).collect())
            }
            serde_json::Value::Object(fields) => Value::object(
                fields
                    .into_iter()
                    .map(|(key, value)| (key, Value::from(value)))
                    .collect(),
            ),
        }
    }
}

impl From<&Value> for serde_json::Value {
    fn from(value: &Value) -> Self {
        match value {
            Value::Null => serde_json::Value::Null,
            Value::Bool(b) => serde_json::Value::Bool(*b),
            Value::Number(n) => number_to_json(*n),
            Value::String(s) => serde_json::Value::String(s.clone()),
            Value::Array(items) => {
                serde_json::Value::Array(items.iter().map(serde_json::Value::from).collect())
            }
            Value::Object(map) => serde_json::Value::Object(
                map.iter()
                    .map(|(key, value)| (key.to_string(), serde_json::Value::from(value)))
                    .collect(),
            ),
        }
    }
}

/// Integral values within the safe range become JSON integers.
fn as_integer(n: f64) -> Option<i64> {
    (n.is_finite() && n.fract() == 0.0 && n.abs() < MAX_SAFE_INTEGER).then_some(n as i64)
}

fn number_to_json(n: f64) -> serde_json::Value {
    match as_integer(n) {
        Some(i) => serde_json::Value::from(i),
        None => serde_json::Number::from_f64(n)
            .map(serde_json::Value::Number)
            .unwrap_or(serde_json::Value::Null),
    }
}

impl Serialize for Value {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Value::Null => serializer.serialize_unit(),
            Value::Bool(b) => serializer.serialize_bool(*b),
            Value::Number(n) => match as_integer(*n) {
                Some(i) => serializer.serialize_i64(i),
                None => serializer.serialize_f64(*n),
            },
            Value::String(s) => serializer.serialize_str(s),
            Value::Array(items) => {
                let mut seq = serializer.serialize_seq(Some(items.len()))?;
                for item in items.iter() {
                    seq.serialize_element(item)?;
                }
                seq.end()
            }
            Value::Object(map) => {
                let mut out = serializer.serialize_map(Some(map.len()))?;
                for (key, value) in map.iter() {
                    out.serialize_entry(key, value)?;
                }
                out.end()
            }
        }
    }
}

impl<'de> Deserialize<'de> for Value {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_any(ValueVisitor)
    }
}

struct ValueVisitor;

impl<'de> Visitor<'de> for ValueVisitor {
    type Value = Value;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("a JSON value")
    }

    fn visit_bool<E: de::Error>(self, b: bool) -> Result<Value, E> {
        Ok(Value::Bool(b))
    }

    fn visit_i64<E: de::Error>(self, n: i64) -> Result<Value, E> {
        Ok(Value::Number(n as f64))
    }

    fn visit_u64<E: de::Error>(self, n: u64) -> Result<Value, E> {
        Ok(Value::Number(n as f64))
    }

    fn visit_f64<E: de::Error>(self, n: f64) -> Result<Value, E> {
        Ok(Value::Number(n))
    }

    fn visit_str<E: de::Error>(self, s: &str) -> Result<Value, E> {
        Ok(Value::String(s.to_string()))
    }

    fn visit_string<E: de::Error>(self, s: String) -> Result<Value, E> {
        Ok(Value::String(s))
    }

    fn visit_unit<E: de::Error>(self) -> Result<Value, E> {
        Ok(Value::Null)
    }

    fn visit_none<E: de::Error>(self) -> Result<Value, E> {
        Ok(Value::Null)
    }

    fn visit_some<D: Deserializer<'de>>(self, deserializer: D) -> Result<Value, D::Error> {
        Value::deserialize(deserializer)
    }

    fn visit_seq<A: SeqAccess<'de>>(self, mut seq: A) -> Result<Value, A::Error> {
        let mut items = Vec::with_capacity(seq.size_hint().unwrap_or(0));
        while let Some(item) = seq.next_element()? {
            items.push(item);
        }
        Ok(Value::array(items))
    }

    fn visit_map<A: MapAccess<'de>>(self, mut access: A) -> Result<Value, A::Error> {
        let mut map = Map::new();
        while let Some((key, value)) = access.next_entry::<String, Value>()? {
            map.insert(key, value);
        }
        Ok(Value::object(map))
    }
}

/// Insertion-ordered mapping from field name to [`Value`].
///
/// Records are small, so lookups scan linearly. Re-inserting an existing key
/// replaces its value in place and keeps its position.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Map {
    entries: Vec<(String, Value)>,
}

impl Map {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            entries: Vec::with_capacity(capacity),
        }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    fn position(&self, key: &str) -> Option<usize> {
        self.entries.iter().position(|(k, _)| k == key)
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.position(key).is_some()
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.entries.iter().find(|(k, _)| k == key).map(|(_, v)| v)
    }

    pub fn get_mut(&mut self, key: &str) -> Option<&mut Value> {
        self.entries
            .iter_mut()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v)
    }

    /// Insert or replace. Returns the previous value for an existing key.
    pub fn insert(&mut self, key: impl Into<String>, value: Value) -> Option<Value> {
        let key = key.into();
        match self.position(&key) {
            Some(index) => Some(std::mem::replace(&mut self.entries[index].1, value)),
            None => {
                self.entries.push((key, value));
                None
            }
        }
    }

    /// Returns the value for `key`, appending `default()` first if absent.
    pub fn get_or_insert_with(&mut self, key: &str, default: impl FnOnce() -> Value) -> &mut Value {
        let index = match self.position(key) {
            Some(index) => index,
            None => {
                self.entries.push((key.to_string(), default()));
                self.entries.len() - 1
            }
        };
        &mut self.entries[index].1
    }

    /// Remove a field, preserving the order of the others.
    pub fn remove(&mut self, key: &str) -> Option<Value> {
        let index = self.position(key)?;
        Some(self.entries.remove(index).1)
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(k, _)| k.as_str())
    }

    pub fn values(&self) -> impl Iterator<Item = &Value> {
        self.entries.iter().map(|(_, v)| v)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v))
    }
}

impl FromIterator<(String, Value)> for Map {
    fn from_iter<I: IntoIterator<Item = (String, Value)>>(iter: I) -> Self {
        let mut map = Map::new();
        for (key, value) in iter {
            map.insert(key, value);
        }
        map
    }
}

impl<'a> FromIterator<(&'a str, Value)> for Map {
    fn from_iter<I: IntoIterator<Item = (&'a str, Value)>>(iter: I) -> Self {
        iter.into_iter()
            .map(|(key, value)| (key.to_string(), value))
            .collect()
    }
}

impl IntoIterator for Map {
    type Item = (String, Value);
    type IntoIter = std::vec::IntoIter<(String, Value)>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.into_iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn sample() -> Value {
        Value::from(json!({
            "username": "ada",
            "age": 36,
            "address": {"street": "Elm", "number": 4},
            "hobbies": [{"stringField": "chess"}]
        }))
    }

    #[test]
    fn json_conversion_preserves_field_order() {
        let value = sample();
        let keys: Vec<&str> = value.as_object().unwrap().keys().collect();
        assert_eq!(keys, vec!["username", "age", "address", "hobbies"]);
    }

    #[test]
    fn integral_numbers_serialize_without_fraction() {
        let value = Value::from(json!({"n": 0, "f": 1.5}));
        assert_eq!(serde_json::to_string(&value).unwrap(), r#"{"n":0,"f":1.5}"#);
    }

    #[test]
    fn non_finite_numbers_serialize_as_null() {
        let value = Value::Number(f64::INFINITY);
        assert_eq!(serde_json::to_string(&value).unwrap(), "null");
        assert_eq!(serde_json::Value::from(&value), serde_json::Value::Null);
    }

    #[test]
    fn deserialize_keeps_source_order() {
        let value: Value = serde_json::from_str(r#"{"z": 1, "a": [true, null], "m": "x"}"#).unwrap();
        let map = value.as_object().unwrap();
        assert_eq!(map.keys().collect::<Vec<_>>(), vec!["z", "a", "m"]);
        assert_eq!(
            map.get("a").unwrap().as_array().unwrap(),
            &[Value::Bool(true), Value::Null]
        );
    }

    #[test]
    fn pointer_follows_keys_and_indices() {
        let value = sample();
        assert_eq!(
            value.pointer(&Path::parse("address.street")),
            Some(&Value::from("Elm"))
        );
        assert_eq!(
            value.pointer(&Path::parse("hobbies.0.stringField")),
            Some(&Value::from("chess"))
        );
        assert_eq!(value.pointer(&Path::parse("hobbies.1")), None);
        assert_eq!(value.pointer(&Path::parse("age.x")), None);
        assert_eq!(value.pointer(&Path::root()), Some(&value));
    }

    #[test]
    fn index_segment_reads_numeric_field_names() {
        let value = Value::from(json!({"0": "zero"}));
        assert_eq!(value.pointer(&Path::parse("0")), Some(&Value::from("zero")));
    }

    #[test]
    fn clones_share_composites() {
        let value = sample();
        let copy = value.clone();
        assert!(value.ptr_eq(&copy));
        assert!(!Value::from(1i64).ptr_eq(&Value::from(1i64)));
    }

    #[test]
    fn map_insert_replaces_in_place() {
        let mut map: Map = [("a", Value::from(1i64)), ("b", Value::from(2i64))]
            .into_iter()
            .collect();
        assert_eq!(map.insert("a", Value::from(9i64)), Some(Value::from(1i64)));
        assert_eq!(map.keys().collect::<Vec<_>>(), vec!["a", "b"]);
        assert_eq!(map.get("a"), Some(&Value::from(9i64)));
        assert_eq!(map.remove("a"), Some(Value::from(9i64)));
        assert_eq!(map.keys().collect::<Vec<_>>(), vec!["b"]);
    }

    #[test]
    fn get_or_insert_appends_once() {
        let mut map = Map::new();
        *map.get_or_insert_with("x", Value::empty_object) = Value::from(true);
        map.get_or_insert_with("x", || Value::Null);
        assert_eq!(map.len(), 1);
        assert_eq!(map.get("x"), Some(&Value::Bool(true)));
    }

    #[test]
    fn kind_names() {
        assert_eq!(Value::Null.kind_name(), "null");
        assert_eq!(Value::from(false).kind_name(), "boolean");
        assert_eq!(Value::from(3.5).kind_name(), "number");
        assert_eq!(Value::from("s").kind_name(), "string");
        assert_eq!(Value::array(vec![]).kind_name(), "array");
        assert_eq!(Value::empty_object().kind_name(), "object");
    }
}
