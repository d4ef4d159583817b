// Copyright (c) 2025 - Cowboy AI, Inc.
//! Property-Based Tests for Deep Equality
//!
//! These properties pin down the comparator's behavior for arbitrary value
//! trees, including NaN leaves and trees compared across representations.

use immutable_harness::value::{freeze, Value};
use immutable_harness::is_equal;
use proptest::prelude::*;

use crate::fixtures::{leaf, value_tree};

proptest! {
    /// Property: Every tree equals itself
    ///
    /// NaN leaves must not break reflexivity.
    #[test]
    fn prop_equality_is_reflexive(tree in value_tree()) {
        prop_assert!(is_equal(&tree, &tree.clone()));
    }

    /// Property: Equality is symmetric
    #[test]
    fn prop_equality_is_symmetric(a in value_tree(), b in value_tree()) {
        prop_assert_eq!(is_equal(&a, &b), is_equal(&b, &a));
    }

    /// Property: Freezing preserves equality
    ///
    /// A mutable tree equals its frozen form, in both argument orders.
    #[test]
    fn prop_freeze_preserves_equality(tree in value_tree()) {
        let frozen = freeze(&tree);

        prop_assert!(is_equal(&tree, &frozen));
        prop_assert!(is_equal(&frozen, &tree));
        prop_assert!(is_equal(&frozen.as_mutable(), &tree));
    }

    /// Property: A differing leaf makes trees unequal
    #[test]
    fn prop_leaf_difference_is_detected(tree in value_tree()) {
        let left = Value::sequence([tree.clone(), Value::from(1)]);
        let right = Value::sequence([tree, Value::from(2)]);

        prop_assert!(!is_equal(&left, &right));
    }

    /// Property: Different lengths make sequences unequal
    #[test]
    fn prop_length_difference_is_detected(
        items in prop::collection::vec(leaf(), 0..8),
        extra in leaf()
    ) {
        let shorter = Value::Sequence(items.clone());
        let mut longer_items = items;
        longer_items.push(extra);
        let longer = Value::Sequence(longer_items);

        prop_assert!(!is_equal(&shorter, &longer));
        prop_assert!(!is_equal(&longer, &shorter));
    }

    /// Property: An extra key on either side makes structures unequal
    ///
    /// This holds even when the extra key maps to the absence value.
    #[test]
    fn prop_extra_key_is_detected(tree in value_tree()) {
        let base = Value::structure([("a", tree.clone())]);
        let wider = Value::structure([("a", tree), ("b", Value::Null)]);

        prop_assert!(!is_equal(&base, &wider));
        prop_assert!(!is_equal(&wider, &base));
    }

    /// Property: Absence only equals absence
    #[test]
    fn prop_null_only_equals_null(tree in value_tree()) {
        prop_assert_eq!(is_equal(&Value::Null, &tree), tree.is_null());
        prop_assert_eq!(is_equal(&tree, &Value::Null), tree.is_null());
    }
}
