use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::version::{self, VersionComponents, VersionLiteralError};

/// A dependency specification in `Jargo.toml`.
///
/// Keys are `group/artifact`; the value is either a bare version string or a
/// table with a `version` field.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Dependency {
    Short(String),
    Detailed(DetailedDependency),
}

/// A dependency written as a table.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DetailedDependency {
    pub version: String,
}

impl Dependency {
    /// The declared version literal.
    pub fn version(&self) -> &str {
        match self {
            Dependency::Short(v) => v,
            Dependency::Detailed(d) => &d.version,
        }
    }

    /// Decompose the declared version into its components.
    pub fn components(&self) -> Result<VersionComponents, VersionLiteralError> {
        version::decompose(self.version())
    }
}

/// Declared direct dependencies: `group/artifact` key to version components.
pub type DeclaredDependencies = BTreeMap<String, VersionComponents>;

/// A declared dependency whose version literal could not be decomposed.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("dependency `{key}`: {source}")]
pub struct DeclarationError {
    pub key: String,
    #[source]
    pub source: VersionLiteralError,
}
