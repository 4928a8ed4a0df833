//! Shared utilities for the Jargo build tool.
//!
//! This crate provides cross-cutting concerns used by all other Jargo crates:
//! error types, filesystem helpers, content fingerprints, and terminal
//! progress indicators.

pub mod errors;
pub mod fs;
pub mod hash;
pub mod progress;
