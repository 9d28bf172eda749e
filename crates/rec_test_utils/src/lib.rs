//! # Recording Validator Test Utilities
//!
//! Shared testing utilities for all crates:
//! - Synthetic recording writers
//! - Complete reference datasets in temporary directories
//! - Property-based testing strategies

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod fixtures;
pub mod strategies;

/// Re-export proptest for convenience.
pub use proptest;
