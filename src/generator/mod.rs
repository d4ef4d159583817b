// Copyright (c) 2025 - Cowboy AI, Inc.
//! Value Generators
//!
//! A [`Generator`] produces one fresh value per call. Generators are the
//! inputs of [`check`](crate::runner::check): each run asks every generator
//! in a [`GeneratorSet`] for one value, in order.
//!
//! # Sources
//!
//! - [`from_fn`] / [`try_from_fn`] - wrap a closure
//! - [`StrategyGenerator`] - draw from any proptest `Strategy`
//! - [`spec::GeneratorSpec`] - serde-described generators compiled to strategies
//! - [`immutable_array_generator`] - proptest arrays frozen into `ImmutableValue`
//!
//! # Example
//!
//! ```rust
//! use immutable_harness::generator::{from_fn, Generator};
//!
//! let mut counter = 0;
//! let mut gen = from_fn(move || {
//!     counter += 1;
//!     counter
//! });
//! assert_eq!(gen.generate().unwrap(), 1);
//! assert_eq!(gen.generate().unwrap(), 2);
//! ```

pub mod spec;

pub use spec::{immutable_array_generator_from_spec, GeneratorSpec};

use proptest::collection::{vec, SizeRange, VecStrategy};
use proptest::strategy::{Strategy, ValueTree};
use proptest::test_runner::TestRunner;
use std::fmt;

use crate::config::CheckConfig;
use crate::errors::{HarnessError, HarnessResult};
use crate::value::{Freeze, ImmutableValue, Value};

/// Producer of one fresh value per call
pub trait Generator {
    /// The type of value produced
    type Output;

    /// Produce the next value
    fn generate(&mut self) -> HarnessResult<Self::Output>;

    /// Transform every produced value
    fn map<U, F>(self, f: F) -> MapGenerator<Self, F>
    where
        Self: Sized,
        F: FnMut(Self::Output) -> U,
    {
        MapGenerator { inner: self, f }
    }

    /// Erase the concrete generator type
    fn boxed(self) -> BoxedGenerator<Self::Output>
    where
        Self: Sized + 'static,
    {
        Box::new(self)
    }
}

/// Type-erased generator
pub type BoxedGenerator<T> = Box<dyn Generator<Output = T>>;

impl<G: Generator + ?Sized> Generator for Box<G> {
    type Output = G::Output;

    fn generate(&mut self) -> HarnessResult<Self::Output> {
        (**self).generate()
    }
}

/// Generator backed by an infallible closure
pub struct FnGenerator<F>(F);

/// Wrap a closure as a generator
pub fn from_fn<T, F>(f: F) -> FnGenerator<F>
where
    F: FnMut() -> T,
{
    FnGenerator(f)
}

impl<T, F> Generator for FnGenerator<F>
where
    F: FnMut() -> T,
{
    type Output = T;

    fn generate(&mut self) -> HarnessResult<T> {
        Ok((self.0)())
    }
}

/// Generator backed by a fallible closure
pub struct TryFnGenerator<F>(F);

/// Wrap a fallible closure as a generator
pub fn try_from_fn<T, F>(f: F) -> TryFnGenerator<F>
where
    F: FnMut() -> HarnessResult<T>,
{
    TryFnGenerator(f)
}

impl<T, F> Generator for TryFnGenerator<F>
where
    F: FnMut() -> HarnessResult<T>,
{
    type Output = T;

    fn generate(&mut self) -> HarnessResult<T> {
        (self.0)()
    }
}

/// Generator drawing from a proptest strategy
///
/// Each call builds a new value tree and takes its current (unshrunk) value.
pub struct StrategyGenerator<S> {
    strategy: S,
    runner: TestRunner,
}

impl<S: Strategy> StrategyGenerator<S> {
    /// Draw from `strategy` with a randomly seeded runner
    pub fn new(strategy: S) -> Self {
        Self {
            strategy,
            runner: TestRunner::default(),
        }
    }

    /// Draw from `strategy` with the runner described by `config`
    pub fn from_config(strategy: S, config: &CheckConfig) -> Self {
        Self {
            strategy,
            runner: config.test_runner(),
        }
    }
}

impl<S: Strategy> Generator for StrategyGenerator<S> {
    type Output = S::Value;

    fn generate(&mut self) -> HarnessResult<S::Value> {
        let tree = self.strategy.new_tree(&mut self.runner)?;
        Ok(tree.current())
    }
}

impl<S: fmt::Debug> fmt::Debug for StrategyGenerator<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("StrategyGenerator")
            .field("strategy", &self.strategy)
            .finish_non_exhaustive()
    }
}

/// Draw from a proptest strategy
pub fn strategy<S: Strategy>(strategy: S) -> StrategyGenerator<S> {
    StrategyGenerator::new(strategy)
}

/// Generator adapter returned by [`Generator::map`]
pub struct MapGenerator<G, F> {
    inner: G,
    f: F,
}

impl<G, F, U> Generator for MapGenerator<G, F>
where
    G: Generator,
    F: FnMut(G::Output) -> U,
{
    type Output = U;

    fn generate(&mut self) -> HarnessResult<U> {
        let value = self.inner.generate()?;
        Ok((self.f)(value))
    }
}

/// Generator of proptest arrays converted to their immutable form
pub struct ImmutableArrayGenerator<S: Strategy<Value = Value>> {
    arrays: StrategyGenerator<VecStrategy<S>>,
}

impl<S: Strategy<Value = Value>> Generator for ImmutableArrayGenerator<S> {
    type Output = ImmutableValue;

    fn generate(&mut self) -> HarnessResult<ImmutableValue> {
        let mutable = Value::Sequence(self.arrays.generate()?);
        Ok(mutable.freeze())
    }
}

/// Arrays of `element` with a length in `size`, frozen on every call
///
/// Array generation is delegated entirely to `proptest::collection::vec`.
pub fn immutable_array_generator<S>(
    element: S,
    size: impl Into<SizeRange>,
) -> ImmutableArrayGenerator<S>
where
    S: Strategy<Value = Value>,
{
    ImmutableArrayGenerator {
        arrays: StrategyGenerator::new(vec(element, size)),
    }
}

/// Like [`immutable_array_generator`] but seeded from `config`
pub fn immutable_array_generator_with<S>(
    element: S,
    size: impl Into<SizeRange>,
    config: &CheckConfig,
) -> ImmutableArrayGenerator<S>
where
    S: Strategy<Value = Value>,
{
    ImmutableArrayGenerator {
        arrays: StrategyGenerator::from_config(vec(element, size), config),
    }
}

/// Ordered list of generators for one check
///
/// A single generator converts into a one-element set.
pub struct GeneratorSet<T> {
    generators: Vec<BoxedGenerator<T>>,
}

impl<T> GeneratorSet<T> {
    /// A set of exactly one generator
    pub fn single(generator: BoxedGenerator<T>) -> Self {
        Self {
            generators: vec![generator],
        }
    }

    /// A set from an ordered list
    pub fn sequence(generators: Vec<BoxedGenerator<T>>) -> Self {
        Self { generators }
    }

    /// Append generators after the existing ones
    pub fn extend(&mut self, more: GeneratorSet<T>) {
        self.generators.extend(more.generators);
    }

    /// Number of generators
    pub fn len(&self) -> usize {
        self.generators.len()
    }

    /// Whether the set has no generators
    pub fn is_empty(&self) -> bool {
        self.generators.is_empty()
    }

    /// Draw one value from every generator, in order
    pub fn generate_all(&mut self) -> HarnessResult<Vec<T>> {
        self.generators.iter_mut().map(|g| g.generate()).collect()
    }
}

impl GeneratorSet<Value> {
    /// Build generators from a JSON description
    ///
    /// An object is one [`GeneratorSpec`]; an array is a list of them. Any
    /// other JSON value is rejected before generation starts.
    pub fn from_json(json: &serde_json::Value, config: &CheckConfig) -> HarnessResult<Self> {
        let specs: Vec<&serde_json::Value> = match json {
            serde_json::Value::Object(_) => vec![json],
            serde_json::Value::Array(items) => items.iter().collect(),
            other => return Err(HarnessError::InvalidGenerators(other.to_string())),
        };

        let generators = specs
            .into_iter()
            .enumerate()
            .map(|(position, raw)| -> HarnessResult<BoxedGenerator<Value>> {
                let spec = GeneratorSpec::from_json(raw)?;
                let stream = CheckConfig {
                    seed: config.seed.map(|seed| seed.wrapping_add(position as u64)),
                    ..config.clone()
                };
                Ok(spec.generator(&stream)?.boxed())
            })
            .collect::<HarnessResult<Vec<BoxedGenerator<Value>>>>()?;

        Ok(Self::sequence(generators))
    }
}

impl<T> From<BoxedGenerator<T>> for GeneratorSet<T> {
    fn from(generator: BoxedGenerator<T>) -> Self {
        Self::single(generator)
    }
}

impl<T> From<Vec<BoxedGenerator<T>>> for GeneratorSet<T> {
    fn from(generators: Vec<BoxedGenerator<T>>) -> Self {
        Self::sequence(generators)
    }
}

impl<T, F> From<FnGenerator<F>> for GeneratorSet<T>
where
    F: FnMut() -> T + 'static,
{
    fn from(generator: FnGenerator<F>) -> Self {
        Self::single(generator.boxed())
    }
}

impl<T, F> From<TryFnGenerator<F>> for GeneratorSet<T>
where
    F: FnMut() -> HarnessResult<T> + 'static,
{
    fn from(generator: TryFnGenerator<F>) -> Self {
        Self::single(generator.boxed())
    }
}

impl<S> From<StrategyGenerator<S>> for GeneratorSet<S::Value>
where
    S: Strategy + 'static,
{
    fn from(generator: StrategyGenerator<S>) -> Self {
        Self::single(generator.boxed())
    }
}

impl<S> From<ImmutableArrayGenerator<S>> for GeneratorSet<ImmutableValue>
where
    S: Strategy<Value = Value> + 'static,
{
    fn from(generator: ImmutableArrayGenerator<S>) -> Self {
        Self::single(generator.boxed())
    }
}

impl<T> fmt::Debug for GeneratorSet<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GeneratorSet")
            .field("len", &self.generators.len())
            .finish()
    }
}
