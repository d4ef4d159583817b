// Copyright (c) 2025 - Cowboy AI, Inc.
//! Structural Deep Equality
//!
//! [`is_equal`] compares two value trees by shape and content. Both operands
//! are classified with [`Structural::shape`] and the comparison dispatches on
//! the pair of shapes:
//!
//! | expected | actual | rule |
//! |---|---|---|
//! | Sequence | Sequence | same length, element-wise recursion |
//! | Keyed / Absence | Keyed / Absence | absence only equals absence; otherwise symmetric key check |
//! | anything else | | strict scalar equality, NaN equals NaN |
//!
//! The two operands may use different representations, so a mutable
//! [`Value`](crate::value::Value) can be compared directly against an
//! [`ImmutableValue`](crate::value::ImmutableValue).

use crate::value::{Shape, Structural};
use std::collections::BTreeMap;
use tracing::trace;

/// Deep structural equality with NaN-aware scalars
///
/// # Examples
///
/// ```rust
/// use immutable_harness::{is_equal, value::Value};
///
/// let a = Value::sequence([Value::Number(f64::NAN), Value::from(1)]);
/// let b = a.clone();
/// assert!(is_equal(&a, &b));
/// assert!(!is_equal(&Value::sequence([1, 2, 3]), &Value::sequence([1, 2])));
/// ```
pub fn is_equal<A, B>(expected: &A, actual: &B) -> bool
where
    A: Structural,
    B: Structural,
{
    match (expected.shape(), actual.shape()) {
        (Shape::Sequence(left), Shape::Sequence(right)) => sequences_equal(&left, &right),
        (Shape::Absence, Shape::Absence) => true,
        (Shape::Absence, Shape::Keyed(_)) | (Shape::Keyed(_), Shape::Absence) => false,
        (Shape::Keyed(left), Shape::Keyed(right)) => {
            // Both directions are checked so extra keys on either side are caught.
            keys_covered(&left, &right) && keys_covered(&right, &left)
        }
        (Shape::Scalar(left), Shape::Scalar(right)) => left.nan_aware_eq(&right),
        (left, right) => {
            trace!(expected = left.name(), actual = right.name(), "shape mismatch");
            false
        }
    }
}

fn sequences_equal<A, B>(left: &[&A], right: &[&B]) -> bool
where
    A: Structural,
    B: Structural,
{
    if left.len() != right.len() {
        trace!(expected = left.len(), actual = right.len(), "sequence length mismatch");
        return false;
    }

    left.iter()
        .zip(right.iter())
        .all(|(l, r)| is_equal(*l, *r))
}

/// Every key of `from` must exist in `into` with an equal value
fn keys_covered<A, B>(from: &BTreeMap<&str, &A>, into: &BTreeMap<&str, &B>) -> bool
where
    A: Structural,
    B: Structural,
{
    from.iter().all(|(key, value)| match into.get(key) {
        Some(other) => is_equal(*value, *other),
        None => {
            trace!(key = %key, "key missing on one side");
            false
        }
    })
}
