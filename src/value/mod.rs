// Copyright (c) 2025 - Cowboy AI, Inc.
//! Value Trees and Shape Classification
//!
//! This module defines the mutable [`Value`] tree that generators produce and
//! test bodies manipulate, together with the [`Structural`] trait used to
//! classify any tree-like value into exactly one [`Shape`] before comparing it.
//!
//! # Shapes
//!
//! ```text
//! Value / ImmutableValue
//!   ├── Absence    (Null)
//!   ├── Scalar     (Bool, Number, Text)
//!   ├── Sequence   (ordered, indexable)
//!   └── Keyed      (string keys → values)
//! ```
//!
//! Classification happens once per node, so comparison code dispatches on a
//! tag instead of probing concrete types.
//!
//! # Immutable Counterpart
//!
//! [`ImmutableValue`] mirrors [`Value`] on top of `im` persistent collections.
//! See [`immutable`] for the conversion functions.

pub mod immutable;

pub use immutable::{freeze, Freeze, ImmutableValue};

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// Mutable value tree
///
/// Numbers are `f64` so that NaN can appear in generated data.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Value {
    /// The absence value
    #[default]
    Null,
    /// Boolean scalar
    Bool(bool),
    /// Numeric scalar (may be NaN)
    Number(f64),
    /// String scalar
    Text(String),
    /// Ordered sequence
    Sequence(Vec<Value>),
    /// Keyed structure with ordered keys
    Structure(BTreeMap<String, Value>),
}

impl Value {
    /// Build a structure from key/value pairs
    pub fn structure<K, I>(entries: I) -> Self
    where
        K: Into<String>,
        I: IntoIterator<Item = (K, Value)>,
    {
        Value::Structure(entries.into_iter().map(|(k, v)| (k.into(), v)).collect())
    }

    /// Build a sequence from anything convertible to values
    pub fn sequence<V, I>(items: I) -> Self
    where
        V: Into<Value>,
        I: IntoIterator<Item = V>,
    {
        Value::Sequence(items.into_iter().map(Into::into).collect())
    }

    /// Whether this is the absence value
    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    /// Numeric content, if this is a number
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Value::Number(n) => Some(*n),
            _ => None,
        }
    }

    /// String content, if this is text
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::Text(s) => Some(s),
            _ => None,
        }
    }

    /// Elements, if this is a sequence
    pub fn as_sequence(&self) -> Option<&[Value]> {
        match self {
            Value::Sequence(items) => Some(items),
            _ => None,
        }
    }

    /// Entries, if this is a structure
    pub fn as_structure(&self) -> Option<&BTreeMap<String, Value>> {
        match self {
            Value::Structure(map) => Some(map),
            _ => None,
        }
    }

    /// Convert to JSON; NaN and infinities become `null`
    pub fn to_json(&self) -> serde_json::Value {
        match self {
            Value::Null => serde_json::Value::Null,
            Value::Bool(b) => serde_json::Value::Bool(*b),
            Value::Number(n) => serde_json::Number::from_f64(*n)
                .map(serde_json::Value::Number)
                .unwrap_or(serde_json::Value::Null),
            Value::Text(s) => serde_json::Value::String(s.clone()),
            Value::Sequence(items) => {
                serde_json::Value::Array(items.iter().map(Value::to_json).collect())
            }
            Value::Structure(map) => serde_json::Value::Object(
                map.iter().map(|(k, v)| (k.clone(), v.to_json())).collect(),
            ),
        }
    }
}

/// Compact JSON-like text; non-finite numbers print as `NaN` / `inf` at any depth
impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Number(n) if !n.is_finite() => write!(f, "{}", n),
            Value::Sequence(items) => {
                f.write_str("[")?;
                for (i, item) in items.iter().enumerate() {
                    if i > 0 {
                        f.write_str(",")?;
                    }
                    write!(f, "{}", item)?;
                }
                f.write_str("]")
            }
            Value::Structure(map) => {
                f.write_str("{")?;
                for (i, (key, value)) in map.iter().enumerate() {
                    if i > 0 {
                        f.write_str(",")?;
                    }
                    write!(f, "{}:{}", serde_json::Value::from(key.as_str()), value)?;
                }
                f.write_str("}")
            }
            scalar => write!(f, "{}", scalar.to_json()),
        }
    }
}

impl From<serde_json::Value> for Value {
    fn from(json: serde_json::Value) -> Self {
        match json {
            serde_json::Value::Null => Value::Null,
            serde_json::Value::Bool(b) => Value::Bool(b),
            serde_json::Value::Number(n) => Value::Number(n.as_f64().unwrap_or(f64::NAN)),
            serde_json::Value::String(s) => Value::Text(s),
            serde_json::Value::Array(items) => {
                Value::Sequence(items.into_iter().map(Value::from).collect())
            }
            serde_json::Value::Object(map) => {
                Value::Structure(map.into_iter().map(|(k, v)| (k, Value::from(v))).collect())
            }
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

impl From<i32> for Value {
    fn from(n: i32) -> Self {
        Value::Number(f64::from(n))
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::Text(s.to_string())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::Text(s)
    }
}

impl From<Vec<Value>> for Value {
    fn from(items: Vec<Value>) -> Self {
        Value::Sequence(items)
    }
}

/// Scalar leaf borrowed from a value tree
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Scalar<'a> {
    Bool(bool),
    Number(f64),
    Text(&'a str),
}

impl Scalar<'_> {
    /// Strict equality, except that two NaNs compare equal
    pub fn nan_aware_eq(&self, other: &Scalar<'_>) -> bool {
        match (self, other) {
            (Scalar::Number(a), Scalar::Number(b)) => a == b || (a.is_nan() && b.is_nan()),
            (Scalar::Bool(a), Scalar::Bool(b)) => a == b,
            (Scalar::Text(a), Scalar::Text(b)) => a == b,
            _ => false,
        }
    }
}

/// The one kind a value node belongs to
#[derive(Debug)]
pub enum Shape<'a, T> {
    Absence,
    Scalar(Scalar<'a>),
    Sequence(Vec<&'a T>),
    Keyed(BTreeMap<&'a str, &'a T>),
}

impl<T> Shape<'_, T> {
    /// Human-readable name of the shape
    pub fn name(&self) -> &'static str {
        match self {
            Shape::Absence => "absent",
            Shape::Scalar(_) => "scalar",
            Shape::Sequence(_) => "sequence",
            Shape::Keyed(_) => "keyed",
        }
    }
}

/// Tree-like values that can be classified into a [`Shape`]
pub trait Structural: Sized {
    /// Classify this node and borrow its children
    fn shape(&self) -> Shape<'_, Self>;
}

impl Structural for Value {
    fn shape(&self) -> Shape<'_, Self> {
        match self {
            Value::Null => Shape::Absence,
            Value::Bool(b) => Shape::Scalar(Scalar::Bool(*b)),
            Value::Number(n) => Shape::Scalar(Scalar::Number(*n)),
            Value::Text(s) => Shape::Scalar(Scalar::Text(s)),
            Value::Sequence(items) => Shape::Sequence(items.iter().collect()),
            Value::Structure(map) => Shape::Keyed(map.iter().map(|(k, v)| (k.as_str(), v)).collect()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_from_json_preserves_structure() {
        let value = Value::from(json!({"a": [1, "two", null], "b": true}));

        let expected = Value::structure([
            (
                "a",
                Value::Sequence(vec![Value::Number(1.0), Value::from("two"), Value::Null]),
            ),
            ("b", Value::Bool(true)),
        ]);
        assert_eq!(value, expected);
    }

    #[test]
    fn test_shape_classifies_each_variant() {
        assert_eq!(Value::Null.shape().name(), "absent");
        assert_eq!(Value::from(1.5).shape().name(), "scalar");
        assert_eq!(Value::sequence([1, 2]).shape().name(), "sequence");
        assert_eq!(Value::structure([("k", Value::Null)]).shape().name(), "keyed");
    }

    #[test]
    fn test_nan_scalars_compare_equal() {
        assert!(Scalar::Number(f64::NAN).nan_aware_eq(&Scalar::Number(f64::NAN)));
        assert!(!Scalar::Number(f64::NAN).nan_aware_eq(&Scalar::Number(1.0)));
        assert!(!Scalar::Number(1.0).nan_aware_eq(&Scalar::Text("1")));
    }

    #[test]
    fn test_to_json_maps_nan_to_null() {
        let value = Value::sequence([Value::Number(f64::NAN), Value::Number(2.0)]);
        assert_eq!(value.to_json(), json!([null, 2.0]));
    }

    #[test]
    fn test_display_keeps_nested_non_finite_numbers() {
        let value = Value::structure([
            ("a", Value::sequence([Value::Number(f64::NAN), Value::from(1)])),
            ("b", Value::Number(f64::INFINITY)),
            ("c", Value::from("x")),
        ]);

        assert_eq!(value.to_string(), r#"{"a":[NaN,1.0],"b":inf,"c":"x"}"#);
        assert_eq!(Value::Null.to_string(), "null");
    }

    #[test]
    fn test_untagged_deserialization() {
        let value: Value = serde_json::from_str(r#"{"xs": [1, 2], "name": "n"}"#).unwrap();
        assert_eq!(value, Value::from(json!({"xs": [1, 2], "name": "n"})));
    }
}
