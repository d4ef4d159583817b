// Copyright (c) 2025 - Cowboy AI, Inc.
//! Named Methods and the Divergence Checker
//!
//! Mutable and immutable trees expose the same set of non-mutating methods,
//! looked up by name through [`Invoke`]. [`returns_immutable`] calls one
//! method on both forms and checks that the results agree once the mutable
//! result is frozen.
//!
//! # Methods
//!
//! Sequences:
//! - `slice(start?, end?)` - negative offsets count from the end
//! - `concat(items...)` - sequence arguments are flattened one level
//! - `indexOf(x)` / `includes(x)` - deep equality lookup
//! - `join(separator?)` - defaults to `","`
//! - `length`, `first`, `last`
//!
//! Structures:
//! - `keys`, `values`
//! - `get(key)`, `has(key)`
//! - `set(key, value)`, `without(keys...)`, `merge(structure)`

use crate::equality::is_equal;
use crate::errors::{HarnessError, HarnessResult};
use crate::value::{Freeze, ImmutableValue, Scalar, Shape, Structural, Value};

/// Values whose methods can be called by name
pub trait Invoke: Structural {
    /// Call `method` with positional `args`
    fn invoke(&self, method: &str, args: &[Value]) -> HarnessResult<Self>;
}

/// Whether `method` gives structurally equal results on both forms
///
/// The mutable result is frozen before comparing. Errors from either call
/// are returned unchanged.
///
/// ```rust
/// use immutable_harness::{freeze, returns_immutable, value::Value};
///
/// let mutable = Value::sequence([1, 2, 3, 4]);
/// let frozen = freeze(&mutable);
/// let args = [Value::from(1), Value::from(2)];
/// assert!(returns_immutable("slice", &frozen, &mutable, &args).unwrap());
/// ```
pub fn returns_immutable<I, M>(
    method: &str,
    immutable: &I,
    mutable: &M,
    args: &[Value],
) -> HarnessResult<bool>
where
    I: Invoke,
    M: Invoke + Freeze,
    M::Frozen: Structural,
{
    let mutable_result = mutable.invoke(method, args)?;
    let immutable_result = immutable.invoke(method, args)?;

    Ok(is_equal(&immutable_result, &mutable_result.freeze()))
}

impl Invoke for Value {
    fn invoke(&self, method: &str, args: &[Value]) -> HarnessResult<Self> {
        match self {
            Value::Sequence(items) => match method {
                "slice" => {
                    let (start, end) = slice_bounds(method, args, items.len())?;
                    Ok(Value::Sequence(items[start..end].to_vec()))
                }
                "concat" => {
                    let mut joined = items.clone();
                    for arg in args {
                        match arg {
                            Value::Sequence(more) => joined.extend(more.iter().cloned()),
                            other => joined.push(other.clone()),
                        }
                    }
                    Ok(Value::Sequence(joined))
                }
                "indexOf" => Ok(index_result(index_of(method, args, items.iter())?)),
                "includes" => Ok(Value::Bool(index_of(method, args, items.iter())?.is_some())),
                "join" => Ok(Value::Text(join(method, args, items.iter())?)),
                "length" => Ok(Value::Number(items.len() as f64)),
                "first" => Ok(items.first().cloned().unwrap_or_default()),
                "last" => Ok(items.last().cloned().unwrap_or_default()),
                _ => Err(unknown(method, self)),
            },
            Value::Structure(map) => match method {
                "keys" => Ok(Value::sequence(map.keys().map(String::as_str))),
                "values" => Ok(Value::Sequence(map.values().cloned().collect())),
                "get" => Ok(map.get(key_arg(method, args, 0)?).cloned().unwrap_or_default()),
                "has" => Ok(Value::Bool(map.contains_key(key_arg(method, args, 0)?))),
                "set" => {
                    let key = key_arg(method, args, 0)?;
                    let mut updated = map.clone();
                    updated.insert(key.to_string(), args.get(1).cloned().unwrap_or_default());
                    Ok(Value::Structure(updated))
                }
                "without" => {
                    let mut remaining = map.clone();
                    for key in key_list(method, args)? {
                        remaining.remove(key);
                    }
                    Ok(Value::Structure(remaining))
                }
                "merge" => {
                    let mut merged = map.clone();
                    for (key, value) in merge_source(method, args)? {
                        merged.insert(key.clone(), value.clone());
                    }
                    Ok(Value::Structure(merged))
                }
                _ => Err(unknown(method, self)),
            },
            _ => Err(unknown(method, self)),
        }
    }
}

impl Invoke for ImmutableValue {
    fn invoke(&self, method: &str, args: &[Value]) -> HarnessResult<Self> {
        match self {
            ImmutableValue::Sequence(items) => match method {
                "slice" => {
                    let (start, end) = slice_bounds(method, args, items.len())?;
                    let mut shared = items.clone();
                    Ok(ImmutableValue::Sequence(shared.slice(start..end)))
                }
                "concat" => {
                    let mut joined = items.clone();
                    for arg in args {
                        match arg.freeze() {
                            ImmutableValue::Sequence(more) => joined.append(more),
                            other => joined.push_back(other),
                        }
                    }
                    Ok(ImmutableValue::Sequence(joined))
                }
                "indexOf" => Ok(index_result(index_of(method, args, items.iter())?).freeze()),
                "includes" => Ok(ImmutableValue::Bool(
                    index_of(method, args, items.iter())?.is_some(),
                )),
                "join" => Ok(ImmutableValue::Text(join(method, args, items.iter())?)),
                "length" => Ok(ImmutableValue::Number(items.len() as f64)),
                "first" => Ok(items.front().cloned().unwrap_or_default()),
                "last" => Ok(items.back().cloned().unwrap_or_default()),
                _ => Err(unknown(method, self)),
            },
            ImmutableValue::Structure(map) => match method {
                "keys" => Ok(ImmutableValue::Sequence(
                    map.keys().map(|k| ImmutableValue::Text(k.clone())).collect(),
                )),
                "values" => Ok(ImmutableValue::Sequence(map.values().cloned().collect())),
                "get" => Ok(map.get(key_arg(method, args, 0)?).cloned().unwrap_or_default()),
                "has" => Ok(ImmutableValue::Bool(map.contains_key(key_arg(method, args, 0)?))),
                "set" => {
                    let key = key_arg(method, args, 0)?;
                    let value = args.get(1).map(Freeze::freeze).unwrap_or_default();
                    Ok(ImmutableValue::Structure(map.update(key.to_string(), value)))
                }
                "without" => {
                    let mut remaining = map.clone();
                    for key in key_list(method, args)? {
                        remaining.remove(key);
                    }
                    Ok(ImmutableValue::Structure(remaining))
                }
                "merge" => {
                    let mut merged = map.clone();
                    for (key, value) in merge_source(method, args)? {
                        merged.insert(key.clone(), value.freeze());
                    }
                    Ok(ImmutableValue::Structure(merged))
                }
                _ => Err(unknown(method, self)),
            },
            _ => Err(unknown(method, self)),
        }
    }
}

fn unknown<T: Structural>(method: &str, receiver: &T) -> HarnessError {
    HarnessError::UnknownMethod {
        method: method.to_string(),
        shape: receiver.shape().name(),
    }
}

/// Resolve `slice(start?, end?)` into a clamped half-open range
///
/// A missing end means the sequence length; an explicit absence value counts
/// as zero.
fn slice_bounds(method: &str, args: &[Value], len: usize) -> HarnessResult<(usize, usize)> {
    let start = match optional_number(method, args, 0)? {
        Some(position) => relative_index(position, len),
        None => 0,
    };
    let end = match optional_number(method, args, 1)? {
        Some(position) => relative_index(position, len),
        None => len,
    };

    Ok((start, end.max(start)))
}

fn relative_index(position: f64, len: usize) -> usize {
    let len = len as f64;
    let position = if position.is_nan() { 0.0 } else { position.trunc() };
    let resolved = if position < 0.0 {
        (len + position).max(0.0)
    } else {
        position.min(len)
    };
    resolved as usize
}

fn optional_number(method: &str, args: &[Value], index: usize) -> HarnessResult<Option<f64>> {
    match args.get(index) {
        None => Ok(None),
        Some(Value::Null) => Ok(Some(0.0)),
        Some(Value::Number(n)) => Ok(Some(*n)),
        Some(other) => Err(HarnessError::method_argument(
            method,
            format!("argument {} must be a number, got {}", index, other),
        )),
    }
}

fn key_arg<'a>(method: &str, args: &'a [Value], index: usize) -> HarnessResult<&'a str> {
    args.get(index).and_then(Value::as_str).ok_or_else(|| {
        HarnessError::method_argument(method, format!("argument {} must be a string key", index))
    })
}

/// Keys given either as separate arguments or as one sequence argument
fn key_list<'a>(method: &str, args: &'a [Value]) -> HarnessResult<Vec<&'a str>> {
    let keys: &[Value] = match args {
        [Value::Sequence(items)] => items.as_slice(),
        _ => args,
    };

    keys.iter()
        .map(|key| {
            key.as_str().ok_or_else(|| {
                HarnessError::method_argument(method, format!("{} is not a string key", key))
            })
        })
        .collect()
}

fn merge_source<'a>(
    method: &str,
    args: &'a [Value],
) -> HarnessResult<&'a std::collections::BTreeMap<String, Value>> {
    args.first()
        .and_then(Value::as_structure)
        .ok_or_else(|| HarnessError::method_argument(method, "expected a structure to merge"))
}

fn index_of<'a, T>(
    method: &str,
    args: &[Value],
    mut items: impl Iterator<Item = &'a T>,
) -> HarnessResult<Option<usize>>
where
    T: Structural + 'a,
{
    let needle = args
        .first()
        .ok_or_else(|| HarnessError::method_argument(method, "missing search value"))?;

    Ok(items.position(|item| is_equal(item, needle)))
}

fn index_result(found: Option<usize>) -> Value {
    Value::Number(found.map_or(-1.0, |index| index as f64))
}

fn join<'a, T>(
    method: &str,
    args: &[Value],
    items: impl Iterator<Item = &'a T>,
) -> HarnessResult<String>
where
    T: Structural + 'a,
{
    let separator = match args.first() {
        None | Some(Value::Null) => ",",
        Some(Value::Text(s)) => s.as_str(),
        Some(other) => {
            return Err(HarnessError::method_argument(
                method,
                format!("separator must be a string, got {}", other),
            ))
        }
    };

    Ok(items.map(render).collect::<Vec<_>>().join(separator))
}

/// Text form of an element inside `join`; absence renders as empty
fn render<T: Structural>(item: &T) -> String {
    match item.shape() {
        Shape::Absence => String::new(),
        Shape::Scalar(Scalar::Bool(b)) => b.to_string(),
        Shape::Scalar(Scalar::Number(n)) => n.to_string(),
        Shape::Scalar(Scalar::Text(s)) => s.to_string(),
        Shape::Sequence(items) => items.into_iter().map(render).collect::<Vec<_>>().join(","),
        Shape::Keyed(entries) => {
            let fields: Vec<String> = entries
                .into_iter()
                .map(|(key, value)| format!("{}:{}", key, render(value)))
                .collect();
            format!("{{{}}}", fields.join(","))
        }
    }
}
