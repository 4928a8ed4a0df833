//! The persisted unit of resolution: a [`Digraph`] plus the artifact at
//! every vertex.

use std::collections::BTreeMap;

use jargo_core::artifact::Artifact;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::error::ResolveError;
use crate::graph::{Digraph, VertexId};
use crate::topo::{self, CycleError};
use crate::visit::{ArtifactCollector, TreePrinter};

/// Every vertex of `graph` has exactly one entry in `artifacts` and vice versa.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "PersistedGraph", into = "PersistedGraph")]
pub struct DependencyGraph {
    graph: Digraph,
    artifacts: BTreeMap<VertexId, Artifact>,
}

impl DependencyGraph {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a vertex together with its artifact.
    pub fn add_vertex(&mut self, id: VertexId, artifact: Artifact) {
        self.graph.add_vertex(id);
        self.artifacts.insert(id, artifact);
    }

    /// Record that the artifact at `from` depends on the artifact at `to`.
    pub fn add_edge(&mut self, from: VertexId, to: VertexId) {
        self.graph.add_edge(from, to);
    }

    pub fn artifact(&self, id: VertexId) -> Option<&Artifact> {
        self.artifacts.get(&id)
    }

    pub fn graph(&self) -> &Digraph {
        &self.graph
    }

    pub fn len(&self) -> usize {
        self.artifacts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.artifacts.is_empty()
    }

    /// All artifacts, dependencies before dependents. Duplicates across
    /// vertices are kept.
    pub fn analyse(&self) -> Result<Vec<Artifact>, ResolveError> {
        topo::analyse(&self.graph, ArtifactCollector::new(&self.artifacts))
            .map_err(|e| self.cycle_error(e))
    }

    /// Human-readable tree, one `+ group:artifact:version` line per vertex.
    pub fn render_tree(&self) -> Result<String, ResolveError> {
        topo::analyse(&self.graph, TreePrinter::new(&self.artifacts))
            .map_err(|e| self.cycle_error(e))
    }

    fn cycle_error(&self, err: CycleError) -> ResolveError {
        let cycle = err
            .cycle
            .iter()
            .map(|id| match self.artifacts.get(id) {
                Some(artifact) => artifact.to_string(),
                None => id.to_string(),
            })
            .collect();
        ResolveError::CyclicDependency { cycle }
    }
}

/// On-disk shape of a [`DependencyGraph`]: vertices and edges in insertion
/// order, so reloading reproduces the same traversal order.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PersistedGraph {
    pub vertices: Vec<PersistedVertex>,
    pub edges: Vec<(VertexId, VertexId)>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PersistedVertex {
    pub id: VertexId,
    pub artifact: Artifact,
}

/// A persisted graph that breaks the vertex/artifact invariant.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum InvalidGraph {
    #[error("vertex {0} is listed more than once")]
    DuplicateVertex(VertexId),
    #[error("edge {0} -> {1} refers to a vertex that does not exist")]
    DanglingEdge(VertexId, VertexId),
}

impl From<DependencyGraph> for PersistedGraph {
    fn from(graph: DependencyGraph) -> Self {
        let vertices = graph
            .graph
            .vertices()
            .filter_map(|id| {
                graph.artifacts.get(&id).map(|artifact| PersistedVertex {
                    id,
                    artifact: artifact.clone(),
                })
            })
            .collect();
        let edges = graph.graph.edges().collect();
        Self { vertices, edges }
    }
}

impl TryFrom<PersistedGraph> for DependencyGraph {
    type Error = InvalidGraph;

    fn try_from(persisted: PersistedGraph) -> Result<Self, InvalidGraph> {
        let mut graph = DependencyGraph::new();
        for PersistedVertex { id, artifact } in persisted.vertices {
            if graph.artifacts.contains_key(&id) {
                return Err(InvalidGraph::DuplicateVertex(id));
            }
            graph.add_vertex(id, artifact);
        }
        for (from, to) in persisted.edges {
            if !graph.graph.contains_vertex(from) || !graph.graph.contains_vertex(to) {
                return Err(InvalidGraph::DanglingEdge(from, to));
            }
            graph.add_edge(from, to);
        }
        Ok(graph)
    }
}
