//! Vertex visitors for [`crate::topo::analyse`].

use std::collections::BTreeMap;

use jargo_core::artifact::Artifact;

use crate::graph::VertexId;
use crate::topo::VertexVisitor;

/// Collects artifacts in finishing (dependencies-first) order.
pub struct ArtifactCollector<'a> {
    artifacts: &'a BTreeMap<VertexId, Artifact>,
    ordering: Vec<Artifact>,
}

impl<'a> ArtifactCollector<'a> {
    pub fn new(artifacts: &'a BTreeMap<VertexId, Artifact>) -> Self {
        Self {
            artifacts,
            ordering: Vec::with_capacity(artifacts.len()),
        }
    }
}

impl VertexVisitor for ArtifactCollector<'_> {
    type Output = Vec<Artifact>;

    fn invoke(&mut self, vertex: VertexId) {
        if let Some(artifact) = self.artifacts.get(&vertex) {
            self.ordering.push(artifact.clone());
        }
    }

    fn finish(self) -> Vec<Artifact> {
        self.ordering
    }
}

/// Renders the search tree, one `+ group:artifact:version` line per vertex,
/// indented by `| ` per level.
pub struct TreePrinter<'a> {
    artifacts: &'a BTreeMap<VertexId, Artifact>,
    depth: usize,
    out: String,
}

impl<'a> TreePrinter<'a> {
    pub fn new(artifacts: &'a BTreeMap<VertexId, Artifact>) -> Self {
        Self {
            artifacts,
            depth: 0,
            out: String::new(),
        }
    }
}

impl VertexVisitor for TreePrinter<'_> {
    type Output = String;

    fn pre(&mut self, vertex: VertexId) {
        let indent = "| ".repeat(self.depth);
        match self.artifacts.get(&vertex) {
            Some(artifact) => self.out.push_str(&format!("{indent}+ {artifact}\n")),
            None => self.out.push_str(&format!("{indent}+ {vertex}\n")),
        }
        self.depth += 1;
    }

    fn invoke(&mut self, _vertex: VertexId) {}

    fn post(&mut self, _vertex: VertexId) {
        self.depth = self.depth.saturating_sub(1);
    }

    fn finish(self) -> String {
        self.out
    }
}
