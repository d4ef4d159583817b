// Copyright (c) 2025 - Cowboy AI, Inc.
//! Tracing setup for test binaries

use tracing_subscriber::EnvFilter;

/// Default filter when `RUST_LOG` is unset
pub const DEFAULT_FILTER: &str = "warn";

/// Install a test-friendly `tracing` subscriber
///
/// Output goes through the test writer so it is captured per test. Safe to
/// call from every test; only the first call installs a subscriber.
pub fn init_test_logging() {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_test_writer()
        .try_init();
}
