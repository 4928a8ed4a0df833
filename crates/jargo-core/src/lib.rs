//! Core data types for the Jargo build tool.
//!
//! This crate defines the fundamental types that represent a Jargo project:
//! the [`artifact::Artifact`] value flowing through resolution, manifest
//! parsing, decomposition of declared version literals, and global user
//! configuration.
//!
//! This crate is intentionally free of network I/O.

/// File name of the project manifest.
pub const MANIFEST_FILE: &str = "Jargo.toml";

/// Per-project state directory (resolved graph, POM cache).
pub const STATE_DIR: &str = ".jargo";

pub mod artifact;
pub mod config;
pub mod dependency;
pub mod manifest;
pub mod version;
