// Copyright (c) 2025 - Cowboy AI, Inc.
//! Serializable Generator Specs
//!
//! A [`GeneratorSpec`] describes a value generator as data, so checks can be
//! configured from JSON:
//!
//! ```json
//! {
//!   "type": "array",
//!   "element": { "type": "number", "min": -10, "max": 10, "nan": true },
//!   "max_len": 5
//! }
//! ```
//!
//! Specs compile to proptest strategies; [`GeneratorSpec::generator`] wraps
//! the strategy in a [`StrategyGenerator`].

use proptest::prelude::*;
use proptest::strategy::{BoxedStrategy, Union};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use super::{Generator, ImmutableArrayGenerator, StrategyGenerator};
use crate::config::CheckConfig;
use crate::errors::{HarnessError, HarnessResult};
use crate::value::{Freeze, ImmutableValue, Value};

/// Data description of a value generator
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum GeneratorSpec {
    /// Always the absence value
    Null,

    /// Uniform booleans
    Boolean,

    /// Floating point numbers in `min..=max`, optionally mixed with NaN
    Number {
        #[serde(default = "default_min")]
        min: f64,
        #[serde(default = "default_max")]
        max: f64,
        #[serde(default)]
        nan: bool,
    },

    /// Whole numbers in `min..=max`
    Integer {
        #[serde(default = "default_int_min")]
        min: i64,
        #[serde(default = "default_int_max")]
        max: i64,
    },

    /// Lowercase ASCII strings
    Text {
        #[serde(default)]
        min_len: usize,
        #[serde(default = "default_max_len")]
        max_len: usize,
    },

    /// Sequences of `element`
    Array {
        element: Box<GeneratorSpec>,
        #[serde(default)]
        min_len: usize,
        #[serde(default = "default_max_len")]
        max_len: usize,
    },

    /// Structures with a fixed key set
    Object { fields: BTreeMap<String, GeneratorSpec> },

    /// Always the same value
    Constant { value: Value },

    /// Any one of the options
    OneOf { options: Vec<GeneratorSpec> },
}

fn default_min() -> f64 {
    -1000.0
}

fn default_max() -> f64 {
    1000.0
}

fn default_int_min() -> i64 {
    -1000
}

fn default_int_max() -> i64 {
    1000
}

fn default_max_len() -> usize {
    8
}

impl GeneratorSpec {
    /// Parse a spec from JSON; a malformed spec is a usage error
    pub fn from_json(json: &serde_json::Value) -> HarnessResult<Self> {
        serde_json::from_value(json.clone())
            .map_err(|e| HarnessError::InvalidSpec(format!("{}: {}", json, e)))
    }

    /// Compile into a proptest strategy
    pub fn strategy(&self) -> HarnessResult<BoxedStrategy<Value>> {
        let compiled = match self {
            GeneratorSpec::Null => Just(Value::Null).boxed(),
            GeneratorSpec::Boolean => any::<bool>().prop_map(Value::Bool).boxed(),
            GeneratorSpec::Number { min, max, nan } => {
                check_bounds("number", *min <= *max, min, max)?;
                let finite = (*min..=*max).prop_map(Value::Number);
                if *nan {
                    prop_oneof![
                        9 => finite,
                        1 => Just(Value::Number(f64::NAN)),
                    ]
                    .boxed()
                } else {
                    finite.boxed()
                }
            }
            GeneratorSpec::Integer { min, max } => {
                check_bounds("integer", min <= max, min, max)?;
                (*min..=*max).prop_map(|n| Value::Number(n as f64)).boxed()
            }
            GeneratorSpec::Text { min_len, max_len } => {
                check_bounds("text length", min_len <= max_len, min_len, max_len)?;
                prop::collection::vec(prop::char::range('a', 'z'), *min_len..=*max_len)
                    .prop_map(|chars| Value::Text(chars.into_iter().collect()))
                    .boxed()
            }
            GeneratorSpec::Array {
                element,
                min_len,
                max_len,
            } => {
                check_bounds("array length", min_len <= max_len, min_len, max_len)?;
                prop::collection::vec(element.strategy()?, *min_len..=*max_len)
                    .prop_map(Value::Sequence)
                    .boxed()
            }
            GeneratorSpec::Object { fields } => {
                let mut record: BoxedStrategy<BTreeMap<String, Value>> =
                    Just(BTreeMap::new()).boxed();

                for (key, spec) in fields {
                    let key = key.clone();
                    record = (record, spec.strategy()?)
                        .prop_map(move |(mut map, value)| {
                            map.insert(key.clone(), value);
                            map
                        })
                        .boxed();
                }

                record.prop_map(Value::Structure).boxed()
            }
            GeneratorSpec::Constant { value } => Just(value.clone()).boxed(),
            GeneratorSpec::OneOf { options } => {
                if options.is_empty() {
                    return Err(HarnessError::InvalidSpec(
                        "one_of requires at least one option".to_string(),
                    ));
                }
                let strategies = options
                    .iter()
                    .map(GeneratorSpec::strategy)
                    .collect::<HarnessResult<Vec<_>>>()?;
                Union::new(strategies).boxed()
            }
        };

        Ok(compiled)
    }

    /// Compile into a generator seeded from `config`
    pub fn generator(
        &self,
        config: &CheckConfig,
    ) -> HarnessResult<StrategyGenerator<BoxedStrategy<Value>>> {
        Ok(StrategyGenerator::from_config(self.strategy()?, config))
    }

    /// Compile into a generator of frozen values
    pub fn immutable_generator(
        &self,
        config: &CheckConfig,
    ) -> HarnessResult<impl Generator<Output = ImmutableValue>> {
        Ok(self.generator(config)?.map(|value| value.freeze()))
    }
}

/// Build an [`ImmutableArrayGenerator`] from an `array` spec
pub fn immutable_array_generator_from_spec(
    spec: &GeneratorSpec,
    config: &CheckConfig,
) -> HarnessResult<ImmutableArrayGenerator<BoxedStrategy<Value>>> {
    match spec {
        GeneratorSpec::Array {
            element,
            min_len,
            max_len,
        } => {
            check_bounds("array length", min_len <= max_len, min_len, max_len)?;
            Ok(super::immutable_array_generator_with(
                element.strategy()?,
                *min_len..=*max_len,
                config,
            ))
        }
        other => Err(HarnessError::InvalidSpec(format!(
            "expected an array spec, got {:?}",
            other
        ))),
    }
}

fn check_bounds<T: std::fmt::Display>(what: &str, ordered: bool, min: T, max: T) -> HarnessResult<()> {
    if ordered {
        Ok(())
    } else {
        Err(HarnessError::InvalidSpec(format!(
            "{} range is empty: min {} > max {}",
            what, min, max
        )))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::equality::is_equal;
    use serde_json::json;

    fn parse(json: serde_json::Value) -> GeneratorSpec {
        GeneratorSpec::from_json(&json).unwrap()
    }

    #[test]
    fn test_defaults_are_filled_in() {
        assert_eq!(
            parse(json!({"type": "text"})),
            GeneratorSpec::Text {
                min_len: 0,
                max_len: 8
            }
        );
    }

    #[test]
    fn test_integer_values_stay_in_range() {
        let mut gen = parse(json!({"type": "integer", "min": -3, "max": 3}))
            .generator(&CheckConfig::default())
            .unwrap();

        for _ in 0..100 {
            let n = gen.generate().unwrap().as_f64().unwrap();
            assert!((-3.0..=3.0).contains(&n));
            assert_eq!(n.fract(), 0.0);
        }
    }

    #[test]
    fn test_object_has_exactly_declared_keys() {
        let mut gen = parse(json!({
            "type": "object",
            "fields": {
                "flag": {"type": "boolean"},
                "name": {"type": "text", "min_len": 1, "max_len": 3}
            }
        }))
        .generator(&CheckConfig::default())
        .unwrap();

        let value = gen.generate().unwrap();
        let keys: Vec<&str> = value
            .as_structure()
            .unwrap()
            .keys()
            .map(String::as_str)
            .collect();
        assert_eq!(keys, vec!["flag", "name"]);
    }

    #[test]
    fn test_nan_numbers_eventually_appear() {
        let mut gen = parse(json!({"type": "number", "nan": true}))
            .generator(&CheckConfig::default().with_seed(1))
            .unwrap();

        let saw_nan = (0..500).any(|_| gen.generate().unwrap().as_f64().unwrap().is_nan());
        assert!(saw_nan);
    }

    #[test]
    fn test_inverted_range_is_rejected() {
        let err = parse(json!({"type": "integer", "min": 5, "max": 1}))
            .strategy()
            .unwrap_err();
        assert!(matches!(err, HarnessError::InvalidSpec(_)));
    }

    #[test]
    fn test_empty_one_of_is_rejected() {
        let err = parse(json!({"type": "one_of", "options": []}))
            .strategy()
            .unwrap_err();
        assert!(err.to_string().contains("one_of"));
    }

    #[test]
    fn test_unknown_type_is_invalid_spec() {
        let err = GeneratorSpec::from_json(&json!({"type": "matrix"})).unwrap_err();
        assert!(matches!(err, HarnessError::InvalidSpec(_)));
    }

    #[test]
    fn test_array_spec_builds_immutable_generator() {
        let spec = parse(json!({
            "type": "array",
            "element": {"type": "constant", "value": 7},
            "min_len": 2,
            "max_len": 2
        }));

        let mut gen = immutable_array_generator_from_spec(&spec, &CheckConfig::default()).unwrap();
        let frozen = gen.generate().unwrap();

        assert!(is_equal(&frozen, &Value::from(json!([7, 7]))));
    }

    #[test]
    fn test_non_array_spec_is_rejected_by_array_adapter() {
        let result =
            immutable_array_generator_from_spec(&GeneratorSpec::Boolean, &CheckConfig::default());
        assert!(result.is_err());
    }

    #[test]
    fn test_immutable_generator_freezes_any_spec() {
        let spec = parse(json!({"type": "constant", "value": {"a": [1]}}));
        let mut gen = spec.immutable_generator(&CheckConfig::default()).unwrap();
        assert!(is_equal(&gen.generate().unwrap(), &Value::from(json!({"a": [1]}))));
    }
}
