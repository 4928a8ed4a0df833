use miette::Diagnostic;
use thiserror::Error;

/// Why a resolution failed. Every variant is fatal to the `resolve` call
/// that produced it.
#[derive(Debug, Error, Diagnostic)]
pub enum ResolveError {
    /// A `[dependencies]` key or version could not be turned into an artifact.
    #[error("Malformed dependency declaration: {message}")]
    #[diagnostic(help(
        "Dependencies are declared as \"group/artifact\" = \"major[.minor[.patch]]\" in Jargo.toml"
    ))]
    MalformedDeclaration { message: String },

    /// The declared version is not published, or the listing could not be fetched.
    #[error("Invalid version `{version}` for {key}: {message}")]
    #[diagnostic(help("Run `jargo dep {key}` to see the available versions"))]
    InvalidVersion {
        key: String,
        version: String,
        message: String,
    },

    /// Metadata for an artifact could not be located or read.
    #[error("Failed to read dependency metadata for {artifact}: {message}")]
    Metadata { artifact: String, message: String },

    #[error("Cyclic dependency: {}", .cycle.join(" -> "))]
    CyclicDependency { cycle: Vec<String> },

    #[error("No dependency graph on record")]
    #[diagnostic(help("Run `jargo update` to resolve dependencies first"))]
    MissingGraph,

    #[error("Dependency graph persistence failed: {message}")]
    Persistence { message: String },
}
