// Copyright (c) 2025 - Cowboy AI, Inc.
//! Property-Based Tests Entry Point
//!
//! This test suite uses proptest to verify the properties that must hold for
//! deep equality and for mutable/immutable method parity.

mod fixtures;
mod property;
