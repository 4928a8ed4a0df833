use std::fmt;

use serde::{Deserialize, Serialize};

/// One resolvable dependency: Maven coordinates plus an exact version.
///
/// Two artifacts with the same [`Artifact::identity`] but different versions
/// are the same library requested at different versions.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Artifact {
    group_id: String,
    artifact_id: String,
    version: String,
}

impl Artifact {
    pub fn new(
        group_id: impl Into<String>,
        artifact_id: impl Into<String>,
        version: impl Into<String>,
    ) -> Self {
        Self {
            group_id: group_id.into(),
            artifact_id: artifact_id.into(),
            version: version.into(),
        }
    }

    pub fn group_id(&self) -> &str {
        &self.group_id
    }

    pub fn artifact_id(&self) -> &str {
        &self.artifact_id
    }

    pub fn version(&self) -> &str {
        &self.version
    }

    /// `(group, artifact)` pair used for version arbitration.
    pub fn identity(&self) -> (&str, &str) {
        (&self.group_id, &self.artifact_id)
    }

    /// `group/artifact` key, the form used in `[dependencies]`.
    pub fn key(&self) -> String {
        format!("{}/{}", self.group_id, self.artifact_id)
    }

    /// Whether the version carries a `SNAPSHOT` qualifier.
    pub fn is_snapshot(&self) -> bool {
        self.version.to_ascii_uppercase().contains("SNAPSHOT")
    }
}

impl fmt::Display for Artifact {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}:{}", self.group_id, self.artifact_id, self.version)
    }
}

/// Split a `group/artifact` key into its two parts.
///
/// Returns `None` unless there are exactly two non-empty segments.
pub fn split_key(key: &str) -> Option<(&str, &str)> {
    let mut parts = key.split('/');
    let group = parts.next()?;
    let artifact = parts.next()?;
    if parts.next().is_some() || group.is_empty() || artifact.is_empty() {
        return None;
    }
    Some((group, artifact))
}
