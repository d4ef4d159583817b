// Copyright (c) 2025 - Cowboy AI, Inc.
//! Test Fixtures for immutable-harness
//!
//! Provides fixed value trees and proptest strategies shared by the
//! integration tests.
//!
//! # Design Principles
//! - Fixed fixtures are built from JSON literals so they read like data
//! - NaN cannot be written in JSON, so NaN fixtures are built by hand
//! - Strategies stay shallow to keep runs fast

#![allow(dead_code)]

use immutable_harness::value::Value;
use proptest::prelude::*;
use serde_json::json;

/// A nested record touching every shape
pub fn nested_record() -> Value {
    Value::from(json!({
        "id": 7,
        "tags": ["a", "b"],
        "owner": {"name": "ops", "active": true},
        "parent": null
    }))
}

/// A sequence holding NaN next to ordinary numbers
pub fn nan_sequence() -> Value {
    Value::sequence([Value::from(1), Value::Number(f64::NAN), Value::from(3)])
}

/// Arbitrary scalar or absence, NaN included
pub fn leaf() -> impl Strategy<Value = Value> {
    prop_oneof![
        Just(Value::Null),
        any::<bool>().prop_map(Value::Bool),
        (-1.0e6f64..1.0e6).prop_map(Value::Number),
        Just(Value::Number(f64::NAN)),
        "[a-z]{0,6}".prop_map(Value::Text),
    ]
}

/// Arbitrary value tree a few levels deep
pub fn value_tree() -> impl Strategy<Value = Value> {
    leaf().prop_recursive(3, 24, 4, |inner| {
        prop_oneof![
            prop::collection::vec(inner.clone(), 0..4).prop_map(Value::Sequence),
            prop::collection::btree_map("[a-z]{1,3}", inner, 0..4).prop_map(Value::Structure),
        ]
    })
}

/// Arbitrary sequence of leaves
pub fn leaf_sequence() -> impl Strategy<Value = Value> {
    prop::collection::vec(leaf(), 0..10).prop_map(Value::Sequence)
}

/// Arbitrary structure of leaves
pub fn leaf_structure() -> impl Strategy<Value = Value> {
    prop::collection::btree_map("[a-e]", leaf(), 0..5).prop_map(Value::Structure)
}
