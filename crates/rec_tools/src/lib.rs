//! # Recording Validator Tools
//!
//! Command-line tools for recording datasets:
//! - Dataset validation
//! - Checklist listing

#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![warn(clippy::all, clippy::pedantic)]

pub mod validate;
