//! # Grid Test Utilities
//!
//! Shared testing utilities for all crates:
//! - Fixture builders (grid configs, test elements)
//! - Occupancy-map consistency harness
//! - Property-based testing strategies

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod consistency;
pub mod fixtures;
pub mod strategies;

/// Re-export proptest for convenience.
pub use proptest;
