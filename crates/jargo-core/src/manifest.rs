use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::Path;

use crate::dependency::{DeclarationError, DeclaredDependencies, Dependency};

/// The parsed representation of a `Jargo.toml` file.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Manifest {
    pub package: PackageMetadata,

    #[serde(default)]
    pub dependencies: BTreeMap<String, Dependency>,

    #[serde(default)]
    pub repositories: BTreeMap<String, RepositoryEntry>,
}

/// Package identity and metadata from the `[package]` section.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PackageMetadata {
    pub name: String,
    pub version: String,
    #[serde(default)]
    pub group: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
}

/// A Maven repository reference, either a URL string or a detailed configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RepositoryEntry {
    Url(String),
    Detailed {
        url: String,
        #[serde(default)]
        username: Option<String>,
        #[serde(default)]
        password: Option<String>,
    },
}

impl Manifest {
    /// Load and parse a `Jargo.toml` file from the given path.
    pub fn from_path(path: &Path) -> miette::Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            jargo_util::errors::JargoError::Manifest {
                message: format!("Failed to read {}: {e}", path.display()),
            }
        })?;
        Self::from_str(&content)
    }

    /// Parse a `Jargo.toml` from a string.
    #[allow(clippy::should_implement_trait)]
    pub fn from_str(content: &str) -> miette::Result<Self> {
        toml::from_str(content).map_err(|e| {
            jargo_util::errors::JargoError::Manifest {
                message: format!("Failed to parse Jargo.toml: {e}"),
            }
            .into()
        })
    }

    /// Direct dependencies with each version split into its components.
    ///
    /// Keys are passed through untouched; validating their `group/artifact`
    /// shape is left to the resolver.
    pub fn declared_dependencies(&self) -> Result<DeclaredDependencies, DeclarationError> {
        self.dependencies
            .iter()
            .map(|(key, dep)| {
                let components = dep.components().map_err(|source| DeclarationError {
                    key: key.clone(),
                    source,
                })?;
                Ok((key.clone(), components))
            })
            .collect()
    }
}
