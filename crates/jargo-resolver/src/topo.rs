//! Depth-first topological analysis with three-colour cycle detection.
//!
//! Vertices finish in post-order. Because edges point from dependent to
//! dependency, a vertex always finishes after everything it depends on, so
//! the finishing order is already dependencies-first.

use std::collections::HashMap;

use thiserror::Error;

use crate::graph::{Digraph, VertexId};

/// Callbacks driven by [`analyse`].
///
/// `pre` fires when a vertex is first reached, `invoke` exactly once per
/// vertex in finishing order, and `post` right after `invoke` as the search
/// backtracks. Implementations decide what each vertex contributes.
pub trait VertexVisitor {
    type Output;

    fn pre(&mut self, _vertex: VertexId) {}

    fn invoke(&mut self, vertex: VertexId);

    fn post(&mut self, _vertex: VertexId) {}

    fn finish(self) -> Self::Output;
}

/// A back edge was found. `cycle` starts and ends on the same vertex.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("dependency cycle through {} vertices", .cycle.len().saturating_sub(1))]
pub struct CycleError {
    pub cycle: Vec<VertexId>,
}

#[derive(Clone, Copy, PartialEq, Eq)]
enum Mark {
    InProgress,
    Done,
}

/// Walk every vertex of `graph`, feeding `visitor`.
///
/// Stops at the first back edge; the visitor's partial state is dropped and
/// no output is produced.
pub fn analyse<V: VertexVisitor>(graph: &Digraph, mut visitor: V) -> Result<V::Output, CycleError> {
    let mut marks: HashMap<VertexId, Mark> = HashMap::with_capacity(graph.vertex_count());

    for root in graph.vertices() {
        if marks.contains_key(&root) {
            continue;
        }
        marks.insert(root, Mark::InProgress);
        visitor.pre(root);
        let mut stack = vec![(root, graph.neighbors(root))];

        while let Some((vertex, neighbors)) = stack.last_mut() {
            let vertex = *vertex;
            match neighbors.next() {
                Some(next) => match marks.get(&next) {
                    None => {
                        marks.insert(next, Mark::InProgress);
                        visitor.pre(next);
                        stack.push((next, graph.neighbors(next)));
                    }
                    Some(Mark::InProgress) => {
                        let start = stack.iter().position(|(v, _)| *v == next).unwrap_or(0);
                        let mut cycle: Vec<VertexId> = stack[start..].iter().map(|(v, _)| *v).collect();
                        cycle.push(next);
                        return Err(CycleError { cycle });
                    }
                    Some(Mark::Done) => {}
                },
                None => {
                    stack.pop();
                    marks.insert(vertex, Mark::Done);
                    visitor.invoke(vertex);
                    visitor.post(vertex);
                }
            }
        }
    }

    Ok(visitor.finish())
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Records the raw callback sequence.
    #[derive(Default)]
    struct Trace(Vec<String>);

    impl VertexVisitor for Trace {
        type Output = Vec<String>;

        fn pre(&mut self, v: VertexId) {
            self.0.push(format!("pre {}", v.0));
        }

        fn invoke(&mut self, v: VertexId) {
            self.0.push(format!("invoke {}", v.0));
        }

        fn post(&mut self, v: VertexId) {
            self.0.push(format!("post {}", v.0));
        }

        fn finish(self) -> Vec<String> {
            self.0
        }
    }

    struct Order(Vec<VertexId>);

    impl VertexVisitor for Order {
        type Output = Vec<VertexId>;

        fn invoke(&mut self, v: VertexId) {
            self.0.push(v);
        }

        fn finish(self) -> Vec<VertexId> {
            self.0
        }
    }

    fn graph(vertices: u32, edges: &[(u32, u32)]) -> Digraph {
        let mut g = Digraph::new();
        for n in 0..vertices {
            g.add_vertex(VertexId(n));
        }
        for &(a, b) in edges {
            g.add_edge(VertexId(a), VertexId(b));
        }
        g
    }

    #[test]
    fn callbacks_fire_in_dfs_order() {
        let g = graph(3, &[(0, 1), (1, 2)]);
        let trace = analyse(&g, Trace::default()).unwrap();
        assert_eq!(
            trace,
            vec![
                "pre 0", "pre 1", "pre 2", "invoke 2", "post 2", "invoke 1", "post 1", "invoke 0",
                "post 0"
            ]
        );
    }

    #[test]
    fn ordering_puts_dependencies_first() {
        let edges = [(0, 1), (0, 2), (1, 3), (2, 3), (4, 0), (5, 3)];
        let g = graph(6, &edges);
        let order = analyse(&g, Order(Vec::new())).unwrap();
        assert_eq!(order.len(), 6);

        let pos = |v: u32| order.iter().position(|x| x.0 == v).unwrap();
        for (u, v) in edges {
            assert!(pos(v) < pos(u), "{v} must precede {u}");
        }
    }

    #[test]
    fn each_vertex_invoked_once() {
        let g = graph(4, &[(0, 3), (1, 3), (2, 3)]);
        let order = analyse(&g, Order(Vec::new())).unwrap();
        assert_eq!(order.iter().filter(|v| v.0 == 3).count(), 1);
    }

    #[test]
    fn cycle_is_reported_with_its_vertices() {
        let g = graph(4, &[(3, 0), (0, 1), (1, 2), (2, 0)]);
        let err = analyse(&g, Order(Vec::new())).unwrap_err();
        assert_eq!(
            err.cycle,
            vec![VertexId(0), VertexId(1), VertexId(2), VertexId(0)]
        );
    }

    #[test]
    fn self_loop_is_a_cycle() {
        let g = graph(1, &[(0, 0)]);
        let err = analyse(&g, Order(Vec::new())).unwrap_err();
        assert_eq!(err.cycle, vec![VertexId(0), VertexId(0)]);
    }

    #[test]
    fn empty_graph_produces_empty_output() {
        let order = analyse(&Digraph::new(), Order(Vec::new())).unwrap();
        assert!(order.is_empty());
    }
}
