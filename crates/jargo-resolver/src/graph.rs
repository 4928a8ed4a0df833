//! Minimal directed graph over integer vertex ids.

use std::collections::BTreeSet;
use std::fmt;

use petgraph::graphmap::DiGraphMap;
use serde::{Deserialize, Serialize};

/// Identifier of one vertex in a [`Digraph`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct VertexId(pub u32);

impl fmt::Display for VertexId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Directed graph where edge `(u, v)` reads "u depends on v".
///
/// Vertices and each vertex's out-neighbors enumerate in insertion order, so
/// every traversal over the same graph visits vertices in the same order.
#[derive(Debug, Clone, Default)]
pub struct Digraph {
    inner: DiGraphMap<VertexId, ()>,
}

impl Digraph {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_vertex(&mut self, id: VertexId) {
        self.inner.add_node(id);
    }

    /// Add an edge. Both endpoints must already be vertices.
    pub fn add_edge(&mut self, from: VertexId, to: VertexId) {
        debug_assert!(
            self.contains_vertex(from) && self.contains_vertex(to),
            "edge {from} -> {to} added before its endpoints"
        );
        self.inner.add_edge(from, to, ());
    }

    pub fn contains_vertex(&self, id: VertexId) -> bool {
        self.inner.contains_node(id)
    }

    /// Out-neighbors of `id`: the vertices it depends on.
    pub fn neighbors(&self, id: VertexId) -> impl Iterator<Item = VertexId> + '_ {
        self.inner.neighbors(id)
    }

    pub fn vertices(&self) -> impl Iterator<Item = VertexId> + '_ {
        self.inner.nodes()
    }

    pub fn edges(&self) -> impl Iterator<Item = (VertexId, VertexId)> + '_ {
        self.inner.all_edges().map(|(from, to, _)| (from, to))
    }

    pub fn vertex_count(&self) -> usize {
        self.inner.node_count()
    }

    pub fn edge_count(&self) -> usize {
        self.inner.edge_count()
    }
}

/// Two graphs are equal when they have the same vertex and edge sets,
/// regardless of insertion order.
impl PartialEq for Digraph {
    fn eq(&self, other: &Self) -> bool {
        self.vertex_count() == other.vertex_count()
            && self.edge_count() == other.edge_count()
            && self.vertices().collect::<BTreeSet<_>>() == other.vertices().collect::<BTreeSet<_>>()
            && self.edges().collect::<BTreeSet<_>>() == other.edges().collect::<BTreeSet<_>>()
    }
}

impl Eq for Digraph {}
