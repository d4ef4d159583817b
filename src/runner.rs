// Copyright (c) 2025 - Cowboy AI, Inc.
//! Randomized Check Runners
//!
//! [`check`] is the base primitive: it runs a test body a fixed number of
//! times, feeding it one freshly generated value per generator, and then
//! asserts that exactly the requested number of runs completed.
//!
//! [`check_immutable_mutable`] builds on it. The first generated value of each
//! run is treated as the mutable input; its frozen form is passed to the
//! callback ahead of all generated values.
//!
//! ```text
//! generators ──► [v0, v1, ...] ──► body(values)          check
//!                     │
//!                     └─ freeze(v0) ──► callback(frozen, [v0, v1, ...])
//!                                                        check_immutable_mutable
//! ```
//!
//! # Failure Model
//!
//! A generator error or a body error stops the loop. The run-count
//! post-condition then fails with [`HarnessError::IncompleteRuns`], carrying the
//! original error as its source. Panics are not caught.

use std::time::Instant;
use tracing::{debug, info, warn};

use crate::config::CheckConfig;
use crate::errors::{HarnessError, HarnessResult};
use crate::generator::GeneratorSet;
use crate::value::Freeze;

/// Run `body` exactly `runs` times with values from `generators`
///
/// Returns the number of completed runs, which always equals `runs` on
/// success.
///
/// # Examples
///
/// ```rust
/// use immutable_harness::{check, generator::from_fn};
///
/// let completed = check(5, from_fn(|| 1), |values: Vec<i32>| {
///     assert_eq!(values, vec![1]);
///     Ok::<_, anyhow::Error>(())
/// })
/// .unwrap();
/// assert_eq!(completed, 5);
/// ```
pub fn check<T, B, E>(
    runs: usize,
    generators: impl Into<GeneratorSet<T>>,
    body: B,
) -> HarnessResult<usize>
where
    B: FnMut(Vec<T>) -> Result<(), E>,
    E: Into<anyhow::Error>,
{
    check_with(&CheckConfig::with_runs(runs), generators, body)
}

/// [`check`] with run count, deadline and seed taken from `config`
pub fn check_with<T, B, E>(
    config: &CheckConfig,
    generators: impl Into<GeneratorSet<T>>,
    body: B,
) -> HarnessResult<usize>
where
    B: FnMut(Vec<T>) -> Result<(), E>,
    E: Into<anyhow::Error>,
{
    let mut generators = generators.into();
    check_from(config, || generators.generate_all(), body)
}

/// The run loop shared by every runner
///
/// `produce` yields the positional values of one run.
fn check_from<T, P, B, E>(
    config: &CheckConfig,
    mut produce: P,
    mut body: B,
) -> HarnessResult<usize>
where
    P: FnMut() -> HarnessResult<Vec<T>>,
    B: FnMut(Vec<T>) -> Result<(), E>,
    E: Into<anyhow::Error>,
{
    let requested = config.runs;
    let started = Instant::now();
    let mut completed = 0;
    let mut cause: Option<anyhow::Error> = None;

    while completed < requested {
        let values = match produce() {
            Ok(values) => values,
            Err(e) => {
                cause = Some(e.into());
                break;
            }
        };

        if let Err(e) = body(values) {
            cause = Some(e.into());
            break;
        }

        completed += 1;
        debug!(run = completed, requested, "run completed");

        if let Some(deadline) = config.deadline {
            let elapsed = started.elapsed();
            if completed < requested && elapsed > deadline {
                warn!(requested, completed, ?elapsed, "check deadline exceeded");
                return Err(HarnessError::DeadlineExceeded {
                    requested,
                    completed,
                    elapsed,
                });
            }
        }
    }

    if completed != requested {
        warn!(requested, completed, ?cause, "run count post-condition failed");
        return Err(HarnessError::IncompleteRuns {
            requested,
            completed,
            cause,
        });
    }

    info!(runs = completed, elapsed = ?started.elapsed(), "check completed");
    Ok(completed)
}

/// Reusable runner comparing mutable values against their frozen form
///
/// Created by [`check_immutable_mutable`]; each call to [`run`](Self::run)
/// or [`run_with`](Self::run_with) performs one full check.
pub struct ImmutableMutableRunner<T> {
    config: CheckConfig,
    base: GeneratorSet<T>,
}

/// Bind a run count and base generators for mutable/immutable checks
///
/// ```rust
/// use immutable_harness::{check_immutable_mutable, is_equal, generator::from_fn};
/// use immutable_harness::value::Value;
///
/// let mut runner = check_immutable_mutable(10, from_fn(|| Value::sequence([1, 2])));
/// let completed = runner
///     .run(|frozen, values| {
///         assert!(is_equal(&frozen, &values[0]));
///         Ok::<_, anyhow::Error>(())
///     })
///     .unwrap();
/// assert_eq!(completed, 10);
/// ```
pub fn check_immutable_mutable<T>(
    runs: usize,
    generators: impl Into<GeneratorSet<T>>,
) -> ImmutableMutableRunner<T>
where
    T: Freeze,
{
    ImmutableMutableRunner::with_config(CheckConfig::with_runs(runs), generators)
}

impl<T: Freeze> ImmutableMutableRunner<T> {
    /// Bind a full configuration and base generators
    pub fn with_config(config: CheckConfig, generators: impl Into<GeneratorSet<T>>) -> Self {
        Self {
            config,
            base: generators.into(),
        }
    }

    /// Run `callback(frozen, values)` with the base generators only
    pub fn run<C, E>(&mut self, callback: C) -> HarnessResult<usize>
    where
        C: FnMut(T::Frozen, Vec<T>) -> Result<(), E>,
        E: Into<anyhow::Error>,
    {
        self.run_with(callback, GeneratorSet::sequence(Vec::new()))
    }

    /// Run `callback(frozen, values)` with `extra` generators appended
    ///
    /// `values` holds every generated value in generator order; the frozen
    /// argument is the immutable form of `values[0]`.
    pub fn run_with<C, E>(
        &mut self,
        mut callback: C,
        mut extra: GeneratorSet<T>,
    ) -> HarnessResult<usize>
    where
        C: FnMut(T::Frozen, Vec<T>) -> Result<(), E>,
        E: Into<anyhow::Error>,
    {
        if self.base.is_empty() && extra.is_empty() {
            return Err(HarnessError::InvalidGenerators("[]".to_string()));
        }

        let base = &mut self.base;
        let produce = || -> HarnessResult<Vec<T>> {
            let mut values = base.generate_all()?;
            values.extend(extra.generate_all()?);
            Ok(values)
        };

        check_from(&self.config, produce, |values: Vec<T>| -> anyhow::Result<()> {
            // Non-empty: at least one generator contributes per run.
            let frozen = values[0].freeze();
            callback(frozen, values).map_err(Into::into)
        })
    }

    /// Number of base generators
    pub fn base_len(&self) -> usize {
        self.base.len()
    }
}
