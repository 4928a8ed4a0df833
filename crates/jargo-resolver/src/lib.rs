//! Dependency resolution engine.
//!
//! Declared dependencies are sanitized and validated, expanded into their
//! transitive closure by the [`explorer`], ordered dependencies-first by the
//! [`topo`] analyzer, reduced to one version per `(group, artifact)` by
//! [`arbitrate`], and the resulting [`dependency_graph::DependencyGraph`] is
//! persisted so later runs can skip re-resolution.
//!
//! Every outside capability (declarations, version listings, POM metadata,
//! storage) is a trait in [`provider`] or [`store`], handed to the
//! [`resolver::Resolver`] by the caller. [`maven`] holds the repository-backed
//! implementations.

pub mod arbitrate;
pub mod conflict;
pub mod dependency_graph;
pub mod error;
pub mod explorer;
pub mod graph;
pub mod ids;
pub mod maven;
pub mod provider;
pub mod resolver;
pub mod store;
pub mod topo;
pub mod visit;

pub use error::ResolveError;
pub use resolver::{Resolution, ResolveMode, Resolver};
