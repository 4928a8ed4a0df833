//! Operation: resolve a project's dependencies.
//!
//! Wires the Maven-backed collaborators into a [`Resolver`] for one project
//! and picks the resolution mode from what is already on disk.

use std::path::{Path, PathBuf};
use std::time::Duration;

use jargo_core::config::GlobalConfig;
use jargo_core::manifest::Manifest;
use jargo_core::{MANIFEST_FILE, STATE_DIR};
use jargo_maven::cache::PomCache;
use jargo_maven::download::Downloader;
use jargo_maven::repository::MavenRepository;
use jargo_resolver::maven::{self, MavenMetadataProvider, MavenVersionLister};
use jargo_resolver::store::JsonGraphStore;
use jargo_resolver::{Resolution, ResolveMode, Resolver};
use jargo_util::errors::JargoError;

/// Default graph location, relative to the state directory.
pub const GRAPH_FILE: &str = "deps/dependency-graph.json";

/// Fingerprint of the declarations the stored graph was built from.
pub const FINGERPRINT_FILE: &str = "deps/declarations.sha256";

/// A project on disk together with the configuration that applies to it.
#[derive(Debug, Clone)]
pub struct Project {
    pub root: PathBuf,
    pub manifest: Manifest,
    pub config: GlobalConfig,
}

impl Project {
    /// Find the nearest `Jargo.toml` at or above `start` and load it with the
    /// user's global configuration.
    pub fn discover(start: &Path) -> miette::Result<Self> {
        let root = jargo_util::fs::find_ancestor_with(start, MANIFEST_FILE).ok_or_else(|| {
            JargoError::Manifest {
                message: format!(
                    "Could not find {MANIFEST_FILE} in {} or any parent directory",
                    start.display()
                ),
            }
        })?;
        Self::load(&root, GlobalConfig::load_or_default())
    }

    /// Load the manifest in `root` with an explicit configuration.
    pub fn load(root: &Path, config: GlobalConfig) -> miette::Result<Self> {
        let manifest = Manifest::from_path(&root.join(MANIFEST_FILE))?;
        Ok(Self {
            root: root.to_path_buf(),
            manifest,
            config,
        })
    }

    pub fn graph_path(&self) -> PathBuf {
        match &self.config.resolver.graph_file {
            Some(relative) => self.root.join(relative),
            None => self.root.join(STATE_DIR).join(GRAPH_FILE),
        }
    }

    pub fn fingerprint_path(&self) -> PathBuf {
        self.root.join(STATE_DIR).join(FINGERPRINT_FILE)
    }

    pub fn graph_store(&self) -> JsonGraphStore {
        JsonGraphStore::new(self.graph_path())
    }

    pub fn repositories(&self) -> Vec<MavenRepository> {
        maven::build_repos(&self.manifest.repositories, &self.config.repositories)
    }
}

/// HTTP client configured from `[network]`.
pub fn downloader(config: &GlobalConfig) -> miette::Result<Downloader> {
    Downloader::new(
        Duration::from_secs(config.network.timeout_secs),
        config.network.retries,
    )
}

/// SHA-256 over the declared `key=version` pairs, in key order.
pub fn declarations_fingerprint(manifest: &Manifest) -> String {
    jargo_util::hash::sha256_lines(
        manifest
            .dependencies
            .iter()
            .map(|(key, dep)| format!("{key}={}", dep.version())),
    )
}

/// Pick the cheapest mode that still reflects the current declarations.
///
/// No stored graph means create; a fingerprint that is missing or differs
/// means update; otherwise the stored graph is analysed as is.
pub fn select_mode(project: &Project) -> ResolveMode {
    if !project.graph_store().exists() {
        return ResolveMode::CreateAndAnalyse;
    }
    let stored = std::fs::read_to_string(project.fingerprint_path()).ok();
    let current = declarations_fingerprint(&project.manifest);
    if stored.as_deref().map(str::trim) == Some(current.as_str()) {
        ResolveMode::Analyse
    } else {
        ResolveMode::UpdateAndAnalyse
    }
}

/// Resolve the project, selecting the mode automatically unless `mode` is given.
///
/// The declarations fingerprint is written only after the resolver succeeds.
pub fn resolve(project: &Project, mode: Option<ResolveMode>) -> miette::Result<Resolution> {
    let mode = mode.unwrap_or_else(|| select_mode(project));
    tracing::info!("resolving {} in {mode} mode", project.manifest.package.name);

    let downloader = downloader(&project.config)?;
    let repos = project.repositories();
    let lister = MavenVersionLister::new(downloader.clone(), repos.clone());
    let provider = MavenMetadataProvider::new(downloader, repos, PomCache::new(&project.root));
    let store = project.graph_store();

    let sp = jargo_util::progress::spinner("Resolving dependencies...");
    let result = Resolver::new(&project.manifest, &lister, &provider, &store).resolve(mode);
    sp.finish_and_clear();
    let resolution = result?;

    let fingerprint = declarations_fingerprint(&project.manifest);
    jargo_util::fs::write_atomic(&project.fingerprint_path(), fingerprint.as_bytes())
        .map_err(JargoError::Io)?;
    Ok(resolution)
}

/// Status lines for a finished resolution. Conflicts are listed only when verbose.
pub fn report(resolution: &Resolution, verbose: bool) {
    let count = resolution.artifacts.len();
    let noun = if count == 1 { "dependency" } else { "dependencies" };
    jargo_util::progress::status("Resolved", &format!("{count} {noun}"));
    if verbose {
        for conflict in resolution.conflicts.iter() {
            jargo_util::progress::status_info("Arbitrated", &conflict.to_string());
        }
    } else if !resolution.conflicts.is_empty() {
        tracing::debug!("{} version conflicts arbitrated", resolution.conflicts.len());
    }
}
