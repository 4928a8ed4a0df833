//! Resolution orchestration: sanitize, validate, build, analyse, arbitrate, persist.

use std::fmt;

use jargo_core::artifact::{self, Artifact};
use jargo_core::dependency::DeclaredDependencies;
use jargo_core::version::{SemverKey, VersionComponents};

use crate::arbitrate::arbitrate;
use crate::conflict::ConflictReport;
use crate::dependency_graph::DependencyGraph;
use crate::error::ResolveError;
use crate::explorer::Explorer;
use crate::ids::IdGenerator;
use crate::provider::{DeclarationSource, MetadataProvider, VersionLister};
use crate::store::{GraphStore, StoreError};

/// What a call to [`Resolver::resolve`] does before analysing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResolveMode {
    /// Reuse the stored graph; no declarations are read, nothing is fetched.
    Analyse,
    /// Build a fresh graph from the declarations.
    CreateAndAnalyse,
    /// Rebuild after the declarations changed. Currently a full rebuild,
    /// identical to [`ResolveMode::CreateAndAnalyse`].
    UpdateAndAnalyse,
}

impl fmt::Display for ResolveMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            ResolveMode::Analyse => "analyse",
            ResolveMode::CreateAndAnalyse => "create",
            ResolveMode::UpdateAndAnalyse => "update",
        })
    }
}

/// The result of a successful resolution.
#[derive(Debug, Clone)]
pub struct Resolution {
    /// One artifact per `(group, artifact)`, dependencies before dependents.
    pub artifacts: Vec<Artifact>,
    /// Versions dropped by arbitration.
    pub conflicts: ConflictReport,
}

/// Resolves a project's dependencies through injected collaborators.
pub struct Resolver<'a> {
    declarations: &'a dyn DeclarationSource,
    versions: &'a dyn VersionLister,
    metadata: &'a dyn MetadataProvider,
    store: &'a dyn GraphStore,
}

impl<'a> Resolver<'a> {
    pub fn new(
        declarations: &'a dyn DeclarationSource,
        versions: &'a dyn VersionLister,
        metadata: &'a dyn MetadataProvider,
        store: &'a dyn GraphStore,
    ) -> Self {
        Self {
            declarations,
            versions,
            metadata,
            store,
        }
    }

    /// Produce the dependencies-first ordering for `mode`.
    ///
    /// The graph is stored only after analysis and arbitration succeed, so a
    /// failed run leaves the previous graph in place.
    pub fn resolve(&self, mode: ResolveMode) -> Result<Resolution, ResolveError> {
        tracing::info!("resolving dependencies ({mode})");
        let graph = match mode {
            ResolveMode::Analyse => self
                .store
                .load()
                .map_err(persistence)?
                .ok_or(ResolveError::MissingGraph)?,
            ResolveMode::CreateAndAnalyse | ResolveMode::UpdateAndAnalyse => self.build_graph()?,
        };

        let ordering = graph.analyse()?;
        let (artifacts, conflicts) = arbitrate(&ordering);
        self.store.store(&graph).map_err(persistence)?;

        tracing::debug!(
            "{} vertices, {} artifacts after arbitration",
            graph.len(),
            artifacts.len()
        );
        Ok(Resolution {
            artifacts,
            conflicts,
        })
    }

    fn build_graph(&self) -> Result<DependencyGraph, ResolveError> {
        let declared = self
            .declarations
            .declared_dependencies()
            .map_err(|e| ResolveError::MalformedDeclaration {
                message: e.to_string(),
            })?;
        let direct = sanitize(&declared)?;
        for dep in &direct {
            self.validate(dep)?;
        }

        let mut ids = IdGenerator::new();
        let mut graph = DependencyGraph::new();
        let roots: Vec<_> = direct
            .into_iter()
            .map(|dep| {
                let id = ids.allocate();
                graph.add_vertex(id, dep.clone());
                (dep, id)
            })
            .collect();

        let mut explorer = Explorer::new(self.metadata, &mut ids, &mut graph);
        for (dep, id) in &roots {
            explorer.explore(dep, *id)?;
        }
        Ok(graph)
    }

    /// The declared version must appear in the published version listing.
    fn validate(&self, dep: &Artifact) -> Result<(), ResolveError> {
        let invalid = |message: String| ResolveError::InvalidVersion {
            key: dep.key(),
            version: dep.version().to_string(),
            message,
        };
        let listing = self
            .versions
            .query_versions(dep.group_id(), dep.artifact_id())
            .map_err(|e| invalid(format!("version listing unavailable: {e}")))?;
        if !listing.contains(dep.version()) {
            return Err(invalid("not a published version".to_string()));
        }
        Ok(())
    }
}

fn persistence(err: StoreError) -> ResolveError {
    ResolveError::Persistence {
        message: err.to_string(),
    }
}

/// Turn raw declarations into artifacts, failing on the first malformed one.
pub fn sanitize(declared: &DeclaredDependencies) -> Result<Vec<Artifact>, ResolveError> {
    declared
        .iter()
        .map(|(key, components)| {
            let (group, name) =
                artifact::split_key(key).ok_or_else(|| ResolveError::MalformedDeclaration {
                    message: format!("`{key}` is not of the form group/artifact"),
                })?;
            let version = version_string(components).ok_or_else(|| {
                ResolveError::MalformedDeclaration {
                    message: format!("`{key}` has no major version"),
                }
            })?;
            Ok(Artifact::new(group, name, version))
        })
        .collect()
}

/// `MAJOR[.MINOR][.PATCH][-PRERELEASE][+BUILD]` from the first value of each
/// component. `None` without a non-empty major component.
pub fn version_string(components: &VersionComponents) -> Option<String> {
    let first = |key: SemverKey| {
        components
            .get(&key)
            .and_then(|values| values.first())
            .map(String::as_str)
            .filter(|value| !value.is_empty())
    };

    let mut version = first(SemverKey::Major)?.to_string();
    for key in [SemverKey::Minor, SemverKey::Patch] {
        if let Some(part) = first(key) {
            version.push('.');
            version.push_str(part);
        }
    }
    if let Some(pre) = first(SemverKey::Prerelease) {
        version.push('-');
        version.push_str(pre);
    }
    if let Some(build) = first(SemverKey::Build) {
        version.push('+');
        version.push_str(build);
    }
    Some(version)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn components(pairs: &[(SemverKey, &str)]) -> VersionComponents {
        pairs
            .iter()
            .map(|(k, v)| (*k, vec![v.to_string()]))
            .collect()
    }

    #[test]
    fn version_string_from_all_components() {
        let c = components(&[
            (SemverKey::Major, "1"),
            (SemverKey::Minor, "2"),
            (SemverKey::Patch, "3"),
            (SemverKey::Prerelease, "rc.1"),
            (SemverKey::Build, "42"),
        ]);
        assert_eq!(version_string(&c).as_deref(), Some("1.2.3-rc.1+42"));
    }

    #[test]
    fn version_string_uses_first_value_only() {
        let mut c = components(&[(SemverKey::Major, "4")]);
        c.insert(SemverKey::Minor, vec!["13".to_string(), "99".to_string()]);
        assert_eq!(version_string(&c).as_deref(), Some("4.13"));
    }

    #[test]
    fn version_string_requires_major() {
        assert_eq!(version_string(&components(&[(SemverKey::Minor, "2")])), None);
        assert_eq!(version_string(&components(&[(SemverKey::Major, "")])), None);
        assert_eq!(version_string(&VersionComponents::new()), None);
    }

    #[test]
    fn sanitize_builds_artifacts() {
        let mut declared = DeclaredDependencies::new();
        declared.insert(
            "org.slf4j/slf4j-api".to_string(),
            components(&[
                (SemverKey::Major, "1"),
                (SemverKey::Minor, "7"),
                (SemverKey::Patch, "25"),
            ]),
        );
        let artifacts = sanitize(&declared).unwrap();
        assert_eq!(artifacts, vec![Artifact::new("org.slf4j", "slf4j-api", "1.7.25")]);
    }

    #[test]
    fn sanitize_rejects_bad_keys() {
        for key in ["slf4j-api", "org.slf4j/", "a/b/c"] {
            let mut declared = DeclaredDependencies::new();
            declared.insert(key.to_string(), components(&[(SemverKey::Major, "1")]));
            let err = sanitize(&declared).unwrap_err();
            assert!(matches!(err, ResolveError::MalformedDeclaration { .. }), "{key}");
        }
    }

    #[test]
    fn sanitize_rejects_missing_major() {
        let mut declared = DeclaredDependencies::new();
        declared.insert("g/a".to_string(), components(&[(SemverKey::Minor, "1")]));
        assert!(matches!(
            sanitize(&declared).unwrap_err(),
            ResolveError::MalformedDeclaration { .. }
        ));
    }
}
