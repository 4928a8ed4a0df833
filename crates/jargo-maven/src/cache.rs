//! Project-local POM cache mirroring repository layout.

use std::fs;
use std::path::{Path, PathBuf};

use jargo_core::artifact::Artifact;
use jargo_util::errors::JargoError;

use crate::download::Downloader;
use crate::pom::{self, Pom};
use crate::repository::MavenRepository;

/// POM cache at `<project>/.jargo/poms/`.
///
/// SNAPSHOT POMs are never cached: the same coordinate can be republished.
#[derive(Debug, Clone)]
pub struct PomCache {
    root: PathBuf,
}

impl PomCache {
    /// Create a cache rooted at `project_root/.jargo/poms/`.
    pub fn new(project_root: &Path) -> Self {
        Self::at(project_root.join(jargo_core::STATE_DIR).join("poms"))
    }

    /// Create a cache rooted at an explicit directory.
    pub fn at(root: PathBuf) -> Self {
        Self { root }
    }

    /// The root directory of this cache.
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Path within the cache for a given artifact's POM.
    pub fn pom_path(&self, artifact: &Artifact) -> PathBuf {
        self.root.join(MavenRepository::pom_path(
            artifact.group_id(),
            artifact.artifact_id(),
            artifact.version(),
        ))
    }

    /// Cached POM text. A missing file is a miss; any other read failure is
    /// an error rather than a reason to download again.
    pub fn get(&self, artifact: &Artifact) -> miette::Result<Option<String>> {
        if artifact.is_snapshot() {
            return Ok(None);
        }
        match fs::read_to_string(self.pom_path(artifact)) {
            Ok(content) => Ok(Some(content)),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(JargoError::Io(e).into()),
        }
    }

    /// Store POM text in the cache, creating directories as needed.
    pub fn put(&self, artifact: &Artifact, content: &str) -> miette::Result<PathBuf> {
        let path = self.pom_path(artifact);
        jargo_util::fs::write_atomic(&path, content.as_bytes()).map_err(JargoError::Io)?;
        Ok(path)
    }

    /// Fetch a POM from the cache, or from the first repository that has it.
    ///
    /// `Ok(None)` means no repository knows the coordinate.
    pub fn fetch(
        &self,
        downloader: &Downloader,
        repos: &[MavenRepository],
        artifact: &Artifact,
    ) -> miette::Result<Option<Pom>> {
        if let Some(content) = self.get(artifact)? {
            tracing::trace!("POM cache hit for {artifact}");
            return pom::parse_pom(&content).map(Some);
        }

        for repo in repos {
            let url = repo.pom_url(
                artifact.group_id(),
                artifact.artifact_id(),
                artifact.version(),
            );
            tracing::debug!("fetching {url}");
            let Some(content) = downloader.text(repo, &url)? else {
                continue;
            };
            let parsed = pom::parse_pom(&content)?;
            if !artifact.is_snapshot() {
                self.put(artifact, &content)?;
            }
            return Ok(Some(parsed));
        }
        Ok(None)
    }
}
