//! Maven repository abstraction: URL layout and configuration.

use jargo_core::manifest::RepositoryEntry;

/// Maven Central base URL.
pub const MAVEN_CENTRAL_URL: &str = "https://repo.maven.apache.org/maven2";

/// A configured Maven repository with optional credentials.
#[derive(Debug, Clone)]
pub struct MavenRepository {
    pub name: String,
    pub url: String,
    pub username: Option<String>,
    pub password: Option<String>,
}

impl MavenRepository {
    /// Build a `MavenRepository` from a name and a manifest `RepositoryEntry`.
    pub fn from_entry(name: &str, entry: &RepositoryEntry) -> Self {
        match entry {
            RepositoryEntry::Url(url) => Self::from_url(name, url),
            RepositoryEntry::Detailed {
                url,
                username,
                password,
            } => Self {
                username: username.clone(),
                password: password.clone(),
                ..Self::from_url(name, url)
            },
        }
    }

    /// An anonymous repository at `url`.
    pub fn from_url(name: &str, url: &str) -> Self {
        Self {
            name: name.to_string(),
            url: url.trim_end_matches('/').to_string(),
            username: None,
            password: None,
        }
    }

    /// Construct the default Maven Central repository.
    pub fn maven_central() -> Self {
        Self::from_url("maven-central", MAVEN_CENTRAL_URL)
    }

    /// Standard Maven layout path for a given coordinate.
    ///
    /// `org.slf4j:slf4j-api:1.7.25` becomes `org/slf4j/slf4j-api/1.7.25`
    pub fn coordinate_path(group: &str, artifact: &str, version: &str) -> String {
        format!("{}/{}/{}", group.replace('.', "/"), artifact, version)
    }

    /// Repository-relative path of the POM for a coordinate.
    pub fn pom_path(group: &str, artifact: &str, version: &str) -> String {
        format!(
            "{}/{artifact}-{version}.pom",
            Self::coordinate_path(group, artifact, version)
        )
    }

    /// Absolute URL for a repository-relative path.
    pub fn resolve(&self, relative: &str) -> String {
        format!("{}/{}", self.url, relative.trim_start_matches('/'))
    }

    /// URL to the POM file for a given coordinate.
    pub fn pom_url(&self, group: &str, artifact: &str, version: &str) -> String {
        self.resolve(&Self::pom_path(group, artifact, version))
    }

    /// URL to the `maven-metadata.xml` at the artifact level (version listing).
    pub fn metadata_url(&self, group: &str, artifact: &str) -> String {
        self.resolve(&format!(
            "{}/{}/maven-metadata.xml",
            group.replace('.', "/"),
            artifact
        ))
    }

    /// Whether this repository has authentication configured.
    pub fn has_auth(&self) -> bool {
        self.username.is_some() || self.password.is_some()
    }
}
