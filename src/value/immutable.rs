// Copyright (c) 2025 - Cowboy AI, Inc.
//! Immutable Value Trees
//!
//! [`ImmutableValue`] is the persistent counterpart of [`Value`]. Containers
//! are `im::Vector` and `im::OrdMap`, so cloning is O(1) and every "update"
//! returns a new tree sharing structure with the original.
//!
//! Conversion from the mutable form is a deep freeze:
//!
//! ```rust
//! use immutable_harness::value::{freeze, Value};
//!
//! let mutable = Value::sequence([1, 2, 3]);
//! let frozen = freeze(&mutable);
//! assert_eq!(frozen.as_mutable(), mutable);
//! ```

use super::{Scalar, Shape, Structural, Value};

/// Persistent value tree
#[derive(Debug, Clone, PartialEq, Default)]
pub enum ImmutableValue {
    #[default]
    Null,
    Bool(bool),
    Number(f64),
    Text(String),
    Sequence(im::Vector<ImmutableValue>),
    Structure(im::OrdMap<String, ImmutableValue>),
}

impl ImmutableValue {
    /// Thaw back into a mutable tree
    pub fn as_mutable(&self) -> Value {
        match self {
            ImmutableValue::Null => Value::Null,
            ImmutableValue::Bool(b) => Value::Bool(*b),
            ImmutableValue::Number(n) => Value::Number(*n),
            ImmutableValue::Text(s) => Value::Text(s.clone()),
            ImmutableValue::Sequence(items) => {
                Value::Sequence(items.iter().map(ImmutableValue::as_mutable).collect())
            }
            ImmutableValue::Structure(map) => Value::Structure(
                map.iter()
                    .map(|(k, v)| (k.clone(), v.as_mutable()))
                    .collect(),
            ),
        }
    }

    /// Number of elements or entries; `None` for scalars and absence
    pub fn len(&self) -> Option<usize> {
        match self {
            ImmutableValue::Sequence(items) => Some(items.len()),
            ImmutableValue::Structure(map) => Some(map.len()),
            _ => None,
        }
    }

    /// Whether this is an empty container
    pub fn is_empty(&self) -> bool {
        self.len() == Some(0)
    }
}

/// Conversion into an immutable counterpart
pub trait Freeze {
    /// The immutable form
    type Frozen;

    /// Produce the immutable form without consuming the original
    fn freeze(&self) -> Self::Frozen;
}

impl Freeze for Value {
    type Frozen = ImmutableValue;

    fn freeze(&self) -> ImmutableValue {
        match self {
            Value::Null => ImmutableValue::Null,
            Value::Bool(b) => ImmutableValue::Bool(*b),
            Value::Number(n) => ImmutableValue::Number(*n),
            Value::Text(s) => ImmutableValue::Text(s.clone()),
            Value::Sequence(items) => {
                ImmutableValue::Sequence(items.iter().map(Freeze::freeze).collect())
            }
            Value::Structure(map) => ImmutableValue::Structure(
                map.iter().map(|(k, v)| (k.clone(), v.freeze())).collect(),
            ),
        }
    }
}

// Freezing an already immutable tree is a structural-sharing clone.
impl Freeze for ImmutableValue {
    type Frozen = ImmutableValue;

    fn freeze(&self) -> ImmutableValue {
        self.clone()
    }
}

impl<T: Clone> Freeze for Vec<T> {
    type Frozen = im::Vector<T>;

    fn freeze(&self) -> im::Vector<T> {
        self.iter().cloned().collect()
    }
}

/// Deep-freeze a value into its immutable form
pub fn freeze<T: Freeze + ?Sized>(value: &T) -> T::Frozen {
    value.freeze()
}

impl From<Value> for ImmutableValue {
    fn from(value: Value) -> Self {
        value.freeze()
    }
}

impl From<&ImmutableValue> for Value {
    fn from(value: &ImmutableValue) -> Self {
        value.as_mutable()
    }
}

impl Structural for ImmutableValue {
    fn shape(&self) -> Shape<'_, Self> {
        match self {
            ImmutableValue::Null => Shape::Absence,
            ImmutableValue::Bool(b) => Shape::Scalar(Scalar::Bool(*b)),
            ImmutableValue::Number(n) => Shape::Scalar(Scalar::Number(*n)),
            ImmutableValue::Text(s) => Shape::Scalar(Scalar::Text(s)),
            ImmutableValue::Sequence(items) => Shape::Sequence(items.iter().collect()),
            ImmutableValue::Structure(map) => {
                Shape::Keyed(map.iter().map(|(k, v)| (k.as_str(), v)).collect())
            }
        }
    }
}
