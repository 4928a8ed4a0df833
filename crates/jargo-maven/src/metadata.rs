//! maven-metadata.xml parsing for version discovery.

use jargo_util::errors::JargoError;

use crate::xml::{self, Node};

/// Artifact-level Maven metadata listing available versions.
#[derive(Debug, Clone, Default)]
pub struct MavenMetadata {
    pub latest: Option<String>,
    pub release: Option<String>,
    pub versions: Vec<String>,
}

impl MavenMetadata {
    /// All published versions, one per line, in repository order.
    pub fn listing(&self) -> String {
        self.versions.join("\n")
    }
}

/// Parse an artifact-level `maven-metadata.xml` that lists available versions.
pub fn parse_metadata(content: &str) -> miette::Result<MavenMetadata> {
    let mut meta = MavenMetadata::default();

    xml::walk(content, |node| {
        let Node::Close(ctx, text) = node else {
            return;
        };
        match ctx {
            "metadata>versioning>latest" => meta.latest = Some(text.to_string()),
            "metadata>versioning>release" => meta.release = Some(text.to_string()),
            "metadata>versioning>versions>version" => meta.versions.push(text.to_string()),
            _ => {}
        }
    })
    .map_err(|e| JargoError::Document {
        document: "maven-metadata.xml".to_string(),
        message: e.to_string(),
    })?;

    Ok(meta)
}
