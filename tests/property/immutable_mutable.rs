// Copyright (c) 2025 - Cowboy AI, Inc.
//! Property-Based Tests for Mutable/Immutable Parity
//!
//! Every non-mutating method must give the same answer on a mutable value and
//! on its frozen counterpart. The first half drives the checks with proptest
//! directly; the second half drives them with the harness's own runners.

use immutable_harness::generator::{immutable_array_generator, strategy};
use immutable_harness::value::{freeze, ImmutableValue, Value};
use immutable_harness::{check, check_immutable_mutable, is_equal, returns_immutable};
use proptest::prelude::*;

use crate::fixtures::{leaf, leaf_sequence, leaf_structure};

proptest! {
    /// Property: slice agrees for any bounds, in range or not
    #[test]
    fn prop_slice_agrees(
        list in leaf_sequence(),
        start in -12i32..12,
        end in -12i32..12
    ) {
        let frozen = freeze(&list);
        let args = [Value::from(start), Value::from(end)];

        prop_assert!(returns_immutable("slice", &frozen, &list, &args).unwrap());
    }

    /// Property: concat agrees for arbitrary arguments
    #[test]
    fn prop_concat_agrees(list in leaf_sequence(), more in leaf_sequence(), single in leaf()) {
        let frozen = freeze(&list);
        let args = [more, single];

        prop_assert!(returns_immutable("concat", &frozen, &list, &args).unwrap());
    }

    /// Property: lookups agree, NaN needles included
    #[test]
    fn prop_lookups_agree(list in leaf_sequence(), needle in leaf()) {
        let frozen = freeze(&list);

        for method in ["indexOf", "includes"] {
            prop_assert!(returns_immutable(method, &frozen, &list, &[needle.clone()]).unwrap());
        }
        for method in ["join", "length", "first", "last"] {
            prop_assert!(returns_immutable(method, &frozen, &list, &[]).unwrap());
        }
    }

    /// Property: structure updates agree and never touch the frozen original
    #[test]
    fn prop_structure_updates_agree(
        record in leaf_structure(),
        key in "[a-e]",
        value in leaf()
    ) {
        let frozen = freeze(&record);
        let before = frozen.clone();

        let set_args = [Value::from(key.as_str()), value];
        prop_assert!(returns_immutable("set", &frozen, &record, &set_args).unwrap());
        let without_args = [Value::from(key.as_str())];
        prop_assert!(returns_immutable("without", &frozen, &record, &without_args).unwrap());
        prop_assert!(returns_immutable("merge", &frozen, &record, &[record.clone()]).unwrap());

        prop_assert!(is_equal(&frozen, &before));
    }
}

#[test]
fn test_runner_feeds_frozen_arrays() {
    let completed = check_immutable_mutable(50, strategy(leaf_sequence()))
        .run(|frozen: ImmutableValue, values: Vec<Value>| -> anyhow::Result<()> {
            assert!(is_equal(&frozen, &values[0]));
            assert!(returns_immutable("slice", &frozen, &values[0], &[Value::from(1)])?);
            assert!(returns_immutable("join", &frozen, &values[0], &[Value::from("|")])?);
            Ok(())
        })
        .unwrap();

    assert_eq!(completed, 50);
}

#[test]
fn test_runner_appends_extra_generators() {
    let mut runner = check_immutable_mutable(25, strategy(leaf_sequence()));

    let completed = runner
        .run_with(
            |frozen: ImmutableValue, values: Vec<Value>| -> anyhow::Result<()> {
                assert_eq!(values.len(), 2);
                let args = std::slice::from_ref(&values[1]);
                assert!(returns_immutable("concat", &frozen, &values[0], args)?);
                Ok(())
            },
            strategy(leaf_sequence()).into(),
        )
        .unwrap();

    assert_eq!(completed, 25);
}

#[test]
fn test_immutable_array_generator_round_trips() {
    let generator = immutable_array_generator(leaf(), 0..6);

    let completed = check(30, generator, |values: Vec<ImmutableValue>| -> anyhow::Result<()> {
        let frozen = &values[0];
        assert!(frozen.len().unwrap() < 6);
        assert!(is_equal(frozen, &frozen.as_mutable()));
        Ok(())
    })
    .unwrap();

    assert_eq!(completed, 30);
}
