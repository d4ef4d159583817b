// Copyright (c) 2025 - Cowboy AI, Inc.
//! Check configuration

use proptest::test_runner::{Config as ProptestConfig, RngAlgorithm, TestRng, TestRunner};
use serde::{Deserialize, Serialize};
use std::time::Duration;

use crate::errors::{HarnessError, HarnessResult};

/// Runs per check when nothing else is configured
pub const DEFAULT_RUNS: usize = 100;

/// Nominal per-check time budget
pub const DEFAULT_TIMEOUT: Duration = Duration::from_millis(3000);

/// Environment variable overriding the run count
pub const RUNS_ENV: &str = "IMMUTABLE_HARNESS_RUNS";

/// Environment variable setting a deadline in milliseconds
pub const TIMEOUT_ENV: &str = "IMMUTABLE_HARNESS_TIMEOUT_MS";

/// Environment variable seeding strategy generators
pub const SEED_ENV: &str = "IMMUTABLE_HARNESS_SEED";

/// Configuration for a randomized check
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CheckConfig {
    /// Number of runs to execute
    #[serde(default = "default_runs")]
    pub runs: usize,

    /// Wall-clock budget for the whole check; `None` means unbounded
    #[serde(default)]
    pub deadline: Option<Duration>,

    /// Seed for deterministic value generation
    #[serde(default)]
    pub seed: Option<u64>,
}

fn default_runs() -> usize {
    DEFAULT_RUNS
}

impl Default for CheckConfig {
    fn default() -> Self {
        Self {
            runs: DEFAULT_RUNS,
            deadline: None,
            seed: None,
        }
    }
}

impl CheckConfig {
    /// Configuration for a fixed number of runs
    pub fn with_runs(runs: usize) -> Self {
        Self {
            runs,
            ..Self::default()
        }
    }

    /// Bound the check by a deadline
    pub fn with_deadline(mut self, deadline: Duration) -> Self {
        self.deadline = Some(deadline);
        self
    }

    /// Bound the check by [`DEFAULT_TIMEOUT`]
    pub fn with_default_timeout(self) -> Self {
        self.with_deadline(DEFAULT_TIMEOUT)
    }

    /// Generate values deterministically from `seed`
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Load configuration from environment variables
    ///
    /// Unset variables keep their defaults; unparsable ones are an error.
    pub fn from_env() -> HarnessResult<Self> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Load configuration through an arbitrary variable lookup
    pub fn from_lookup<F>(lookup: F) -> HarnessResult<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();

        if let Some(runs) = parse_var::<usize, _>(&lookup, RUNS_ENV)? {
            config.runs = runs;
        }
        if let Some(millis) = parse_var::<u64, _>(&lookup, TIMEOUT_ENV)? {
            config.deadline = Some(Duration::from_millis(millis));
        }
        config.seed = parse_var::<u64, _>(&lookup, SEED_ENV)?;

        Ok(config)
    }

    /// A proptest runner honoring the configured seed
    pub fn test_runner(&self) -> TestRunner {
        match self.seed {
            Some(seed) => {
                let mut bytes = [0u8; 32];
                for chunk in bytes.chunks_mut(8) {
                    chunk.copy_from_slice(&seed.to_le_bytes());
                }
                let rng = TestRng::from_seed(RngAlgorithm::ChaCha, &bytes);
                TestRunner::new_with_rng(ProptestConfig::default(), rng)
            }
            None => TestRunner::default(),
        }
    }
}

fn parse_var<T, F>(lookup: &F, name: &str) -> HarnessResult<Option<T>>
where
    T: std::str::FromStr,
    T::Err: std::fmt::Display,
    F: Fn(&str) -> Option<String>,
{
    match lookup(name) {
        None => Ok(None),
        Some(raw) => raw
            .trim()
            .parse()
            .map(Some)
            .map_err(|e| HarnessError::Configuration(format!("{}={:?}: {}", name, raw, e))),
    }
}
