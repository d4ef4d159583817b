// Copyright (c) 2025 - Cowboy AI, Inc.
//! Failure Probes
//!
//! Probes run an operation only to classify how it fails. The result of a
//! successful operation is discarded.

use crate::errors::Classified;
use std::panic::{self, UnwindSafe};

/// Whether `operation` fails with an error of the given kind
///
/// Returns `false` when the operation succeeds or fails with a different
/// kind; the mismatching error is discarded.
///
/// # Examples
///
/// ```rust
/// use immutable_harness::{throws_exception, ErrorKind, HarnessError};
///
/// let failing = || -> Result<(), HarnessError> {
///     Err(HarnessError::InvalidGenerators("7".into()))
/// };
/// assert!(throws_exception(ErrorKind::Usage, failing));
/// assert!(!throws_exception(ErrorKind::Method, failing));
/// ```
pub fn throws_exception<T, E, F>(kind: E::Kind, operation: F) -> bool
where
    E: Classified,
    F: FnOnce() -> Result<T, E>,
{
    throws_matching(|err: &E| err.kind() == kind, operation)
}

/// Whether `operation` fails with an error accepted by `predicate`
pub fn throws_matching<T, E, P, F>(predicate: P, operation: F) -> bool
where
    P: FnOnce(&E) -> bool,
    F: FnOnce() -> Result<T, E>,
{
    match operation() {
        Ok(_) => false,
        Err(err) => predicate(&err),
    }
}

/// Whether `operation` panics
///
/// The panic is caught and not re-raised. The default panic hook still
/// prints the message.
pub fn panics<T, F>(operation: F) -> bool
where
    F: FnOnce() -> T + UnwindSafe,
{
    panic::catch_unwind(operation).is_err()
}

/// Return the argument unchanged
pub fn identity<T>(value: T) -> T {
    value
}
