//! # Path Mutation: Copy-on-Path-Write Edits
//!
//! Every operation takes a value by reference and returns a new value with a
//! single change applied. The input is never modified.
//!
//! ## Sharing
//!
//! The result starts as a clone of the input root, which only bumps
//! reference counts. Descending along the path, each list or mapping is
//! taken with `Arc::make_mut`: because the input still holds a reference,
//! that shallow-copies exactly one container per level. Everything off the
//! path stays shared with the input, so an edit costs O(depth) container
//! copies, and `Value::ptr_eq` still holds for every untouched subtree.
//!
//! ## Failure Policy
//!
//! A missing (or `null`) intermediate position on the path becomes an empty
//! mapping before descent continues, so hand-typed partial values can be
//! filled in field by field. Anything else that blocks the path is a
//! [`PathError`]:
//!
//! - an index past the end of a list (lists never grow here; use
//!   [`append_to_list`]),
//! - a field name applied to a list,
//! - a path that continues below a leaf,
//! - a path longer than [`MAX_PATH_DEPTH`] segments.
//!
//! The `try_*` functions return that error. The plain functions log it at
//! `debug` and return the input unchanged, which keeps an editor showing a
//! value no matter what path it is handed.

use std::sync::Arc;

use formkit_core::{Path, PathError, SchemaNode, Segment, Value, MAX_PATH_DEPTH};

use crate::synthesize::synthesize;

/// The element to add with [`append_to_list`].
#[derive(Debug, Clone)]
pub enum NewElement<'a> {
    /// Append this value as given.
    Value(Value),
    /// Append the synthesized default of this element schema.
    Default(&'a SchemaNode),
}

impl NewElement<'_> {
    fn into_value(self) -> Value {
        match self {
            NewElement::Value(value) => value,
            NewElement::Default(schema) => synthesize(schema),
        }
    }
}

impl From<Value> for NewElement<'_> {
    fn from(value: Value) -> Self {
        NewElement::Value(value)
    }
}

impl<'a> From<&'a SchemaNode> for NewElement<'a> {
    fn from(schema: &'a SchemaNode) -> Self {
        NewElement::Default(schema)
    }
}

/// Replace the value at `path`. The empty path replaces the whole value.
///
/// Unreachable paths leave the value unchanged (see the module docs).
pub fn set_at_path(root: &Value, path: &Path, new_value: Value) -> Value {
    lenient(root, path, try_set_at_path(root, path, new_value))
}

/// Append one element to the list at `path`.
///
/// A missing list is treated as empty and created. `element` is either a
/// [`Value`] or a `&SchemaNode` whose default is synthesized.
pub fn append_to_list<'a>(root: &Value, path: &Path, element: impl Into<NewElement<'a>>) -> Value {
    lenient(root, path, try_append_to_list(root, path, element))
}

/// Remove the element at `index` from the list at `path`.
pub fn remove_from_list(root: &Value, path: &Path, index: usize) -> Value {
    lenient(root, path, try_remove_from_list(root, path, index))
}

fn lenient(root: &Value, path: &Path, result: Result<Value, PathError>) -> Value {
    result.unwrap_or_else(|err| {
        tracing::debug!(path = %path, error = %err, "mutation skipped, value left unchanged");
        root.clone()
    })
}

/// Replace the value at `path`, reporting unreachable positions.
///
/// # Errors
///
/// Returns [`PathError`] when an index is out of range, a field name is
/// applied to a list, or the path continues below a leaf.
pub fn try_set_at_path(root: &Value, path: &Path, new_value: Value) -> Result<Value, PathError> {
    check_depth(path)?;
    let mut out = root.clone();
    write(&mut out, path, new_value)?;
    Ok(out)
}

/// Append one element to the list at `path`, reporting failures.
///
/// # Errors
///
/// Returns [`PathError::NotAList`] when something other than a list (or
/// nothing) sits at `path`, and any error [`try_set_at_path`] reports on the
/// way there.
pub fn try_append_to_list<'a>(
    root: &Value,
    path: &Path,
    element: impl Into<NewElement<'a>>,
) -> Result<Value, PathError> {
    check_depth(path)?;
    let mut items = list_at(root, path)?;
    items.push(element.into().into_value());
    try_set_at_path(root, path, Value::array(items))
}

/// Remove the element at `index` from the list at `path`, reporting failures.
///
/// # Errors
///
/// Returns [`PathError::IndexOutOfRange`] when `index` is past the end and
/// [`PathError::NotAList`] when `path` does not hold a list.
pub fn try_remove_from_list(root: &Value, path: &Path, index: usize) -> Result<Value, PathError> {
    check_depth(path)?;
    let mut items = match root.pointer(path) {
        Some(Value::Array(items)) => items.as_ref().clone(),
        other => {
            return Err(PathError::NotAList {
                path: path.to_string(),
                found: other.map_or("nothing", Value::kind_name),
            })
        }
    };
    if index >= items.len() {
        return Err(PathError::IndexOutOfRange {
            path: path.to_string(),
            index,
            len: items.len(),
        });
    }
    items.remove(index);
    try_set_at_path(root, path, Value::array(items))
}

/// Shallow copy of the list at `path`; missing or null counts as empty.
fn list_at(root: &Value, path: &Path) -> Result<Vec<Value>, PathError> {
    match root.pointer(path) {
        Some(Value::Array(items)) => Ok(items.as_ref().clone()),
        None | Some(Value::Null) => Ok(Vec::new()),
        Some(other) => Err(PathError::NotAList {
            path: path.to_string(),
            found: other.kind_name(),
        }),
    }
}

/// Reject paths longer than [`MAX_PATH_DEPTH`].
fn check_depth(path: &Path) -> Result<(), PathError> {
    if path.len() > MAX_PATH_DEPTH {
        return Err(PathError::TooDeep {
            depth: path.len(),
            limit: MAX_PATH_DEPTH,
        });
    }
    Ok(())
}

/// Write `new_value` at `path` below `root`, one container per segment.
fn write(root: &mut Value, path: &Path, new_value: Value) -> Result<(), PathError> {
    let mut slot = root;
    for (depth, segment) in path.segments().iter().enumerate() {
        if slot.is_null() {
            *slot = Value::empty_object();
        }
        slot = match slot {
            Value::Object(map) => {
                Arc::make_mut(map).get_or_insert_with(&segment.as_key(), || Value::Null)
            }
            Value::Array(items) => match segment {
                Segment::Index(index) => {
                    let len = items.len();
                    if *index >= len {
                        return Err(PathError::IndexOutOfRange {
                            path: path.prefix(depth).to_string(),
                            index: *index,
                            len,
                        });
                    }
                    &mut Arc::make_mut(items)[*index]
                }
                Segment::Key(key) => {
                    return Err(PathError::KeyOnList {
                        path: path.prefix(depth).to_string(),
                        key: key.clone(),
                    })
                }
            },
            leaf => {
                return Err(PathError::NotAContainer {
                    path: path.prefix(depth).to_string(),
                    found: leaf.kind_name(),
                })
            }
        };
    }
    *slot = new_value;
    Ok(())
}
