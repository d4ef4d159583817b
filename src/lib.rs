//! Property-based test support for immutable data structures
//!
//! This crate provides the helpers used to validate an immutable-data
//! library: structural deep equality, error-kind probes, and randomized
//! runners that check a mutable value and its frozen counterpart side by side.
//!
//! The immutable representation is built on `im` persistent collections and
//! randomized inputs come from `proptest` strategies.

pub mod config;
pub mod equality;
pub mod errors;
pub mod generator;
pub mod logging;
pub mod methods;
pub mod probe;
pub mod runner;
pub mod value;

// Re-export the flat helper surface
pub use config::CheckConfig;
pub use equality::is_equal;
pub use errors::{Classified, ErrorKind, HarnessError, HarnessResult};
pub use generator::{immutable_array_generator, Generator, GeneratorSet, GeneratorSpec};
pub use methods::{returns_immutable, Invoke};
pub use probe::{identity, throws_exception, throws_matching};
pub use runner::{check, check_immutable_mutable, check_with, ImmutableMutableRunner};
pub use value::{freeze, Freeze, ImmutableValue, Value};
