//! Maven-repository implementations of the resolver capabilities.

use std::collections::BTreeMap;

use jargo_core::artifact::Artifact;
use jargo_core::manifest::RepositoryEntry;
use jargo_maven::cache::PomCache;
use jargo_maven::download::Downloader;
use jargo_maven::metadata;
use jargo_maven::pom::{Pom, PomDependency};
use jargo_maven::repository::MavenRepository;

use crate::provider::{
    Exclusion, Locator, MetadataProvider, ProviderError, TransitiveDependency, VersionLister,
};

/// Parent POM chains longer than this are cut off with a warning.
const MAX_PARENT_DEPTH: usize = 16;

/// Project repositories, then globally configured ones not already named,
/// then Maven Central unless something already points at it.
pub fn build_repos(
    project: &BTreeMap<String, RepositoryEntry>,
    global: &BTreeMap<String, String>,
) -> Vec<MavenRepository> {
    let mut repos: Vec<MavenRepository> = project
        .iter()
        .map(|(name, entry)| MavenRepository::from_entry(name, entry))
        .collect();
    for (name, url) in global {
        if !repos.iter().any(|r| r.name == *name) {
            repos.push(MavenRepository::from_url(name, url));
        }
    }
    if !repos
        .iter()
        .any(|r| r.url.contains("repo.maven.apache.org"))
    {
        repos.push(MavenRepository::maven_central());
    }
    repos
}

/// Version listings from `maven-metadata.xml`.
#[derive(Debug, Clone)]
pub struct MavenVersionLister {
    downloader: Downloader,
    repos: Vec<MavenRepository>,
}

impl MavenVersionLister {
    pub fn new(downloader: Downloader, repos: Vec<MavenRepository>) -> Self {
        Self { downloader, repos }
    }
}

impl VersionLister for MavenVersionLister {
    /// Newline-separated versions from the first repository that knows the
    /// artifact, followed by its `latest` and `release` markers.
    fn query_versions(&self, group: &str, artifact: &str) -> Result<String, ProviderError> {
        for repo in &self.repos {
            let url = repo.metadata_url(group, artifact);
            let text = self
                .downloader
                .text(repo, &url)
                .map_err(|e| ProviderError::Failed(e.to_string()))?;
            let Some(text) = text else {
                tracing::debug!("{group}/{artifact} not in {}", repo.name);
                continue;
            };
            let meta = metadata::parse_metadata(&text)
                .map_err(|e| ProviderError::Failed(e.to_string()))?;

            let mut listing = meta.listing();
            for marker in [&meta.latest, &meta.release].into_iter().flatten() {
                if !meta.versions.contains(marker) {
                    listing.push('\n');
                    listing.push_str(marker);
                }
            }
            return Ok(listing);
        }
        Err(ProviderError::NotFound(format!("{group}/{artifact}")))
    }
}

/// Dependencies read from POM files, with parent inheritance.
#[derive(Debug, Clone)]
pub struct MavenMetadataProvider {
    downloader: Downloader,
    repos: Vec<MavenRepository>,
    cache: PomCache,
}

impl MavenMetadataProvider {
    pub fn new(downloader: Downloader, repos: Vec<MavenRepository>, cache: PomCache) -> Self {
        Self {
            downloader,
            repos,
            cache,
        }
    }

    fn fetch_pom(&self, artifact: &Artifact) -> Result<Option<Pom>, ProviderError> {
        self.cache
            .fetch(&self.downloader, &self.repos, artifact)
            .map_err(|e| ProviderError::Failed(e.to_string()))
    }

    /// The POM with every reachable parent merged in and properties resolved.
    fn effective_pom(&self, artifact: &Artifact) -> Result<Option<Pom>, ProviderError> {
        let Some(mut pom) = self.fetch_pom(artifact)? else {
            return Ok(None);
        };

        let mut next = pom.parent.clone();
        let mut depth = 0;
        while let Some(parent_ref) = next.take() {
            if depth == MAX_PARENT_DEPTH {
                tracing::warn!("{artifact}: parent chain deeper than {MAX_PARENT_DEPTH}, ignoring the rest");
                break;
            }
            depth += 1;
            let parent = Artifact::new(
                parent_ref.group_id,
                parent_ref.artifact_id,
                parent_ref.version,
            );
            match self.fetch_pom(&parent)? {
                Some(parent_pom) => {
                    next = parent_pom.parent.clone();
                    pom.apply_parent(&parent_pom);
                }
                None => tracing::warn!("{artifact}: parent POM {parent} not found"),
            }
        }

        pom.resolve_properties();
        Ok(Some(pom))
    }
}

impl MetadataProvider for MavenMetadataProvider {
    fn locate(&self, group: &str, artifact: &str, version: &str) -> Result<Locator, ProviderError> {
        for (what, part) in [("group", group), ("artifact", artifact), ("version", version)] {
            if part.is_empty() || part.contains('/') || part.chars().any(char::is_whitespace) {
                return Err(ProviderError::Failed(format!(
                    "invalid {what} `{part}` in {group}:{artifact}:{version}"
                )));
            }
        }
        Ok(Locator {
            artifact: Artifact::new(group, artifact, version),
            location: MavenRepository::pom_path(group, artifact, version),
        })
    }

    fn fetch_dependencies(
        &self,
        locator: &Locator,
    ) -> Result<Option<Vec<TransitiveDependency>>, ProviderError> {
        let Some(pom) = self.effective_pom(&locator.artifact)? else {
            return Err(ProviderError::NotFound(locator.location.clone()));
        };

        let mut deps = Vec::new();
        for dep in pom.dependencies.iter().filter(|d| d.is_transitive()) {
            let managed = pom.managed(&dep.group_id, &dep.artifact_id);
            let declared = dep
                .version
                .as_deref()
                .or_else(|| managed.and_then(|m| m.version.as_deref()));
            let coord = format!("{}:{}", dep.group_id, dep.artifact_id);
            let Some(version) = declared.and_then(pin_version) else {
                tracing::warn!(
                    "{}: skipping {coord}, no usable version ({})",
                    locator.artifact,
                    declared.unwrap_or("none")
                );
                continue;
            };
            if dep.group_id.contains("${") || dep.artifact_id.contains("${") {
                tracing::warn!("{}: skipping unresolved coordinate {coord}", locator.artifact);
                continue;
            }
            deps.push(TransitiveDependency {
                artifact: Artifact::new(&dep.group_id, &dep.artifact_id, version),
                exclusions: exclusions(dep, managed),
            });
        }
        Ok(Some(deps))
    }
}

/// Exclusions declared on `dep` plus those its management entry adds.
/// A missing group or artifact counts as `*`.
fn exclusions(dep: &PomDependency, managed: Option<&PomDependency>) -> Vec<Exclusion> {
    let mut out: Vec<Exclusion> = Vec::new();
    let declared = dep.exclusions.iter();
    let inherited = managed.into_iter().flat_map(|m| m.exclusions.iter());
    for e in declared.chain(inherited) {
        let part = |s: &str| if s.is_empty() { "*".to_string() } else { s.to_string() };
        let exclusion = Exclusion::new(part(&e.group_id), part(&e.artifact_id));
        if !out.contains(&exclusion) {
            out.push(exclusion);
        }
    }
    out
}

/// A concrete version for a POM version spec.
///
/// Plain versions pass through. A range is pinned to its inclusive lower
/// bound (`[1.0,2.0)` gives `1.0`); exclusive or open lower bounds and
/// unresolved `${…}` references give `None`.
pub fn pin_version(spec: &str) -> Option<String> {
    let spec = spec.trim();
    if spec.is_empty() || spec.contains("${") {
        return None;
    }
    if !spec.starts_with('[') && !spec.starts_with('(') {
        return Some(spec.to_string());
    }
    let lower = spec
        .strip_prefix('[')?
        .split([',', ']'])
        .next()?
        .trim();
    (!lower.is_empty()).then(|| lower.to_string())
}
