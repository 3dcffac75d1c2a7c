#![allow(clippy::unwrap_used, clippy::expect_used)]

use containstate_core::{contains, MismatchKind};
use proptest::prelude::*;
use serde_json::{Map, Value as Json};

fn config() -> ProptestConfig {
    ProptestConfig {
        cases: 256,
        ..ProptestConfig::default()
    }
}

fn arb_leaf() -> impl Strategy<Value = Json> {
    prop_oneof![
        Just(Json::Null),
        any::<bool>().prop_map(Json::from),
        any::<i64>().prop_map(Json::from),
        r"[a-z0-9 ]{0,8}".prop_map(Json::from),
    ]
}

fn arb_json() -> impl Strategy<Value = Json> {
    arb_leaf().prop_recursive(4, 48, 6, |inner| {
        prop_oneof![
            proptest::collection::vec(inner.clone(), 0..6).prop_map(Json::Array),
            proptest::collection::btree_map(r"[a-z]{1,6}", inner, 0..6)
                .prop_map(|map| Json::Object(map.into_iter().collect())),
        ]
    })
}

fn arb_object() -> impl Strategy<Value = Map<String, Json>> {
    proptest::collection::btree_map(r"[a-z]{1,6}", arb_json(), 1..8)
        .prop_map(|map| map.into_iter().collect())
}

proptest! {
    #![proptest_config(config())]

    #[test]
    fn prop_every_value_contains_itself(value in arb_json()) {
        prop_assert!(contains(&value, &value).unwrap().is_success());
    }

    #[test]
    fn prop_comparison_is_deterministic(a in arb_json(), b in arb_json()) {
        prop_assert_eq!(contains(&a, &b).unwrap(), contains(&a, &b).unwrap());
    }

    #[test]
    fn prop_attribute_subset_is_contained(object in arb_object(), keep in any::<u64>()) {
        let subset: Map<String, Json> = object
            .iter()
            .enumerate()
            .filter(|(i, _)| keep & (1 << (i % 64)) != 0)
            .map(|(_, (k, v))| (k.clone(), v.clone()))
            .collect();

        let actual = Json::Object(object);
        prop_assert!(contains(&actual, &Json::Object(subset)).unwrap().is_success());
    }

    #[test]
    fn prop_added_attribute_is_missing(object in arb_object(), extra in arb_json()) {
        let mut expected = object.clone();
        expected.insert("zz_added".to_string(), extra);

        let result = contains(&Json::Object(object), &Json::Object(expected)).unwrap();
        prop_assert_eq!(
            result.kind(),
            Some(&MismatchKind::MissingAttribute { name: "zz_added".to_string() })
        );
        prop_assert!(result.location().unwrap().is_root());
    }

    #[test]
    fn prop_prefix_length_asymmetry(
        items in proptest::collection::vec(arb_json(), 1..10),
        cut in any::<prop::sample::Index>(),
    ) {
        let prefix_len = cut.index(items.len());
        let full = Json::Array(items.clone());
        let prefix = Json::Array(items[..prefix_len].to_vec());

        let too_long = contains(&full, &prefix).unwrap();
        prop_assert_eq!(
            too_long.kind(),
            Some(&MismatchKind::ActualTooLong { expected_len: prefix_len })
        );

        let too_short = contains(&prefix, &full).unwrap();
        prop_assert_eq!(
            too_short.kind(),
            Some(&MismatchKind::ActualTooShort { actual_len: prefix_len })
        );
    }

    #[test]
    fn prop_distinct_scalars_mismatch_where_they_differ(a in any::<i64>(), b in any::<i64>()) {
        prop_assume!(a != b);
        let result = contains(&vec![a], &vec![b]).unwrap();
        prop_assert_eq!(result.kind(), Some(&MismatchKind::ValueMismatch));
        prop_assert_eq!(result.location().unwrap().to_string(), "/0");
    }
}
