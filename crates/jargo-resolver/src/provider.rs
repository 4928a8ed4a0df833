//! Capabilities the resolver consumes from the rest of the tool.

use std::fmt;

use jargo_core::artifact::Artifact;
use jargo_core::dependency::{DeclarationError, DeclaredDependencies};
use jargo_core::manifest::Manifest;
use thiserror::Error;

/// Failure of a capability call.
///
/// `NotFound` is kept apart from `Failed` so the snapshot fallback can match
/// on it instead of inspecting messages.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ProviderError {
    #[error("{0} not found")]
    NotFound(String),
    #[error("{0}")]
    Failed(String),
}

/// Source of the project's direct dependency declarations.
pub trait DeclarationSource {
    /// `group/artifact` key to version components.
    fn declared_dependencies(&self) -> Result<DeclaredDependencies, DeclarationError>;
}

impl DeclarationSource for Manifest {
    fn declared_dependencies(&self) -> Result<DeclaredDependencies, DeclarationError> {
        Manifest::declared_dependencies(self)
    }
}

/// Lists the published versions of an artifact.
pub trait VersionLister {
    /// Free-form text mentioning every known version; callers only test
    /// whether a version occurs in it.
    fn query_versions(&self, group: &str, artifact: &str) -> Result<String, ProviderError>;
}

/// Where an artifact's own metadata lives.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Locator {
    pub artifact: Artifact,
    pub location: String,
}

impl fmt::Display for Locator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.location)
    }
}

/// A `group:artifact` pattern pruned from a dependency's subtree.
/// `*` in either part matches anything.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Exclusion {
    pub group: String,
    pub artifact: String,
}

impl Exclusion {
    pub fn new(group: impl Into<String>, artifact: impl Into<String>) -> Self {
        Self {
            group: group.into(),
            artifact: artifact.into(),
        }
    }

    pub fn matches(&self, artifact: &Artifact) -> bool {
        (self.group == "*" || self.group == artifact.group_id())
            && (self.artifact == "*" || self.artifact == artifact.artifact_id())
    }
}

impl fmt::Display for Exclusion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.group, self.artifact)
    }
}

/// A dependency an artifact declares, with the exclusions that apply to
/// everything below it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransitiveDependency {
    pub artifact: Artifact,
    pub exclusions: Vec<Exclusion>,
}

impl From<Artifact> for TransitiveDependency {
    fn from(artifact: Artifact) -> Self {
        Self {
            artifact,
            exclusions: Vec::new(),
        }
    }
}

/// Locates and reads the dependencies an artifact itself declares.
pub trait MetadataProvider {
    fn locate(&self, group: &str, artifact: &str, version: &str) -> Result<Locator, ProviderError>;

    /// `Ok(None)` and `Ok(Some(vec![]))` both mean "no dependencies".
    fn fetch_dependencies(
        &self,
        locator: &Locator,
    ) -> Result<Option<Vec<TransitiveDependency>>, ProviderError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn exclusion_wildcards() {
        let slf4j = Artifact::new("org.slf4j", "slf4j-api", "1.7.25");
        assert!(Exclusion::new("org.slf4j", "slf4j-api").matches(&slf4j));
        assert!(Exclusion::new("org.slf4j", "*").matches(&slf4j));
        assert!(Exclusion::new("*", "*").matches(&slf4j));
        assert!(!Exclusion::new("org.slf4j", "slf4j-simple").matches(&slf4j));
        assert!(!Exclusion::new("*", "jul-to-slf4j").matches(&slf4j));
    }
}
