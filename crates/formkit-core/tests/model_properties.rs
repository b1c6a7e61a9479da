//! Property tests for the core model: canonical path rendering and JSON
//! conversion of value trees.

use formkit_core::{Path, Segment, Value};
use proptest::prelude::*;

fn segment() -> impl Strategy<Value = Segment> {
    prop_oneof![
        "[a-zA-Z_][a-zA-Z0-9_]{0,8}".prop_map(Segment::Key),
        (0usize..50).prop_map(Segment::Index),
    ]
}

/// Float-free values so that equality is exact.
fn value() -> impl Strategy<Value = Value> {
    let leaf = prop_oneof![
        Just(Value::Null),
        any::<bool>().prop_map(Value::Bool),
        (-1_000_000i64..1_000_000).prop_map(Value::from),
        "[a-zA-Z0-9 ]{0,12}".prop_map(Value::String),
    ];
    leaf.prop_recursive(4, 48, 6, |inner| {
        prop_oneof![
            prop::collection::vec(inner.clone(), 0..6).prop_map(Value::array),
            prop::collection::btree_map("[a-z]{1,6}", inner, 0..6)
                .prop_map(|fields| Value::object(fields.into_iter().collect())),
        ]
    })
}

proptest! {
    /// Rendering then parsing a path gives the same segments.
    #[test]
    fn path_display_parse_round_trip(segments in prop::collection::vec(segment(), 0..6)) {
        let path: Path = segments.into_iter().collect();
        prop_assert_eq!(Path::parse(&path.to_string()), path);
    }

    /// Every path starts with each of its prefixes.
    #[test]
    fn prefixes_are_ancestors(segments in prop::collection::vec(segment(), 0..6), cut in 0usize..6) {
        let path: Path = segments.into_iter().collect();
        prop_assert!(path.starts_with(&path.prefix(cut)));
    }

    /// Converting through `serde_json::Value` is lossless.
    #[test]
    fn json_value_conversion_is_lossless(v in value()) {
        let json = serde_json::Value::from(&v);
        prop_assert_eq!(Value::from(json), v);
    }
}
