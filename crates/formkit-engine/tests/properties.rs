//! Property tests for the engine: synthesized values conform, mutations are
//! local, and the validator reports each broken position exactly once.

use formkit_core::{LeafKind, Path, SchemaNode, Value};
use formkit_engine::{set_at_path, synthesize, validate};
use proptest::prelude::*;

fn leaf_kind() -> impl Strategy<Value = LeafKind> {
    prop::sample::select(LeafKind::ALL.to_vec())
}

fn schema() -> impl Strategy<Value = SchemaNode> {
    leaf_kind()
        .prop_map(SchemaNode::Leaf)
        .prop_recursive(4, 32, 5, |inner| {
            prop_oneof![
                inner.clone().prop_map(SchemaNode::array),
                prop::collection::btree_map("[a-z]{1,6}", inner, 0..5)
                    .prop_map(SchemaNode::object),
            ]
        })
}

/// Object-only schemas, so that every leaf has a value position after
/// synthesis.
fn record_schema() -> impl Strategy<Value = SchemaNode> {
    leaf_kind()
        .prop_map(SchemaNode::Leaf)
        .prop_recursive(3, 24, 4, |inner| {
            prop::collection::btree_map("[a-z]{1,6}", inner, 1..4).prop_map(SchemaNode::object)
        })
}

fn value() -> impl Strategy<Value = Value> {
    let leaf = prop_oneof![
        any::<bool>().prop_map(Value::Bool),
        (-1000i64..1000).prop_map(Value::from),
        "[a-z]{0,6}".prop_map(Value::String),
    ];
    leaf.prop_recursive(4, 48, 5, |inner| {
        prop_oneof![
            prop::collection::vec(inner.clone(), 0..5).prop_map(Value::array),
            prop::collection::btree_map("[a-c]", inner, 0..4)
                .prop_map(|fields| Value::object(fields.into_iter().collect())),
        ]
    })
}

/// Every position of a value tree, root first.
fn positions(value: &Value, at: Path, out: &mut Vec<Path>) {
    out.push(at.clone());
    match value {
        Value::Object(map) => {
            for (key, child) in map.iter() {
                positions(child, at.child_key(key), out);
            }
        }
        Value::Array(items) => {
            for (index, child) in items.iter().enumerate() {
                positions(child, at.child_index(index), out);
            }
        }
        _ => {}
    }
}

/// Leaf paths of an object-only schema.
fn leaf_paths(node: &SchemaNode, at: Path, out: &mut Vec<(Path, LeafKind)>) {
    match node {
        SchemaNode::Leaf(kind) => out.push((at, *kind)),
        SchemaNode::Object(fields) => {
            for (name, child) in fields {
                leaf_paths(child, at.child_key(name), out);
            }
        }
        SchemaNode::Array(_) => {}
    }
}

/// A value that never conforms to a leaf of `kind`.
fn wrong_leaf(kind: LeafKind) -> Value {
    match kind {
        LeafKind::Boolean | LeafKind::String | LeafKind::Date => Value::Number(1.0),
        LeafKind::Number => Value::from("one"),
    }
}

proptest! {
    #[test]
    fn synthesized_values_conform(s in schema()) {
        let errors = validate(&s, &synthesize(&s));
        prop_assert!(errors.is_empty(), "unexpected errors: {}", errors);
    }

    #[test]
    fn synthesis_is_deterministic(s in schema()) {
        prop_assert_eq!(synthesize(&s), synthesize(&s));
    }

    #[test]
    fn mutation_is_local(v in value(), pick in any::<prop::sample::Index>(), x in "[a-z]{1,4}") {
        let mut all = Vec::new();
        positions(&v, Path::root(), &mut all);
        let target = pick.get(&all).clone();

        let out = set_at_path(&v, &target, Value::String(x.clone()));
        prop_assert_eq!(out.pointer(&target), Some(&Value::String(x)));

        for other in &all {
            if other.starts_with(&target) || target.starts_with(other) {
                continue;
            }
            prop_assert_eq!(out.pointer(other), v.pointer(other), "changed {}", other);
        }
    }

    #[test]
    fn one_broken_leaf_is_one_error(s in record_schema(), pick in any::<prop::sample::Index>()) {
        let mut leaves = Vec::new();
        leaf_paths(&s, Path::root(), &mut leaves);
        prop_assume!(!leaves.is_empty());
        let (path, kind) = pick.get(&leaves).clone();

        let broken = set_at_path(&synthesize(&s), &path, wrong_leaf(kind));
        let errors = validate(&s, &broken);
        prop_assert_eq!(errors.len(), 1);
        prop_assert_eq!(&errors.violations()[0].path, &path);
    }

    #[test]
    fn reported_paths_are_unique_and_resolve_in_schema(s in schema(), v in value()) {
        let errors = validate(&s, &v);
        let mut seen = std::collections::HashSet::new();
        for violation in &errors {
            prop_assert!(seen.insert(violation.path.clone()), "duplicate {}", violation.path);
            prop_assert!(s.resolve(&violation.path).is_some());
        }
    }
}
