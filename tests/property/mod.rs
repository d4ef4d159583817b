// Copyright (c) 2025 - Cowboy AI, Inc.
//! Property-Based Tests Module
//!
//! This module contains property-based tests using proptest to verify the
//! comparator and the mutable/immutable runners.

mod equality;
mod immutable_mutable;
