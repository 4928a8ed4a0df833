//! Operation: list the published versions of an artifact.

use std::path::Path;

use jargo_core::artifact;
use jargo_core::config::GlobalConfig;
use jargo_resolver::maven::{self, MavenVersionLister};
use jargo_resolver::provider::{ProviderError, VersionLister};
use jargo_resolver::ResolveError;
use jargo_util::errors::JargoError;

use crate::ops_resolve::{self, Project};

/// Known versions of `key` (`group/artifact`), in listing order.
pub fn list_versions(lister: &dyn VersionLister, key: &str) -> miette::Result<Vec<String>> {
    let (group, name) = artifact::split_key(key).ok_or_else(|| ResolveError::MalformedDeclaration {
        message: format!("`{key}` is not of the form group/artifact"),
    })?;
    let listing = lister.query_versions(group, name).map_err(|e| match e {
        ProviderError::NotFound(_) => JargoError::Resolution {
            message: format!("No versions of {key} found in any repository"),
        },
        ProviderError::Failed(message) => JargoError::Network { message },
    })?;

    let mut versions: Vec<String> = Vec::new();
    for line in listing.lines().map(str::trim).filter(|l| !l.is_empty()) {
        if !versions.iter().any(|v| v == line) {
            versions.push(line.to_string());
        }
    }
    Ok(versions)
}

/// Print the versions of `key`, one per line.
///
/// Inside a project its repositories are searched first; elsewhere only the
/// global ones and Maven Central.
pub fn dep(cwd: &Path, key: &str) -> miette::Result<()> {
    let (config, repos) = match jargo_util::fs::find_ancestor_with(cwd, jargo_core::MANIFEST_FILE) {
        Some(root) => {
            let project = Project::load(&root, GlobalConfig::load_or_default())?;
            let repos = project.repositories();
            (project.config, repos)
        }
        None => {
            let config = GlobalConfig::load_or_default();
            let repos = maven::build_repos(&Default::default(), &config.repositories);
            (config, repos)
        }
    };
    tracing::debug!("querying {} repositories for {key}", repos.len());

    let lister = MavenVersionLister::new(ops_resolve::downloader(&config)?, repos);
    let sp = jargo_util::progress::spinner(&format!("Fetching versions of {key}..."));
    let versions = list_versions(&lister, key);
    sp.finish_and_clear();

    for version in versions? {
        println!("{version}");
    }
    Ok(())
}
