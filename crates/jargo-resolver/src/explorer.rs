//! Transitive expansion of declared dependencies into the graph.
//!
//! Expansion is depth-first with no memoization: an artifact reached along
//! two paths is expanded twice and gets two vertices. The coordinates on
//! the current path are tracked, and meeting one of them again fails with
//! [`ResolveError::CyclicDependency`] instead of recursing forever.
//!
//! Exclusions declared on a dependency apply to its whole subtree: a child
//! matched by any exclusion on the path above it gets no vertex and is not
//! expanded.

use jargo_core::artifact::Artifact;

use crate::dependency_graph::DependencyGraph;
use crate::error::ResolveError;
use crate::graph::VertexId;
use crate::ids::IdGenerator;
use crate::provider::{Exclusion, MetadataProvider, ProviderError, TransitiveDependency};

/// One exploration session over a graph under construction.
pub struct Explorer<'a> {
    provider: &'a dyn MetadataProvider,
    ids: &'a mut IdGenerator,
    graph: &'a mut DependencyGraph,
    path: Vec<Artifact>,
    excluded: Vec<Exclusion>,
}

impl<'a> Explorer<'a> {
    pub fn new(
        provider: &'a dyn MetadataProvider,
        ids: &'a mut IdGenerator,
        graph: &'a mut DependencyGraph,
    ) -> Self {
        Self {
            provider,
            ids,
            graph,
            path: Vec::new(),
            excluded: Vec::new(),
        }
    }

    /// Expand `dep`, already present in the graph at `source`.
    pub fn explore(&mut self, dep: &Artifact, source: VertexId) -> Result<(), ResolveError> {
        if let Some(start) = self.path.iter().position(|a| a == dep) {
            let mut cycle: Vec<String> = self.path[start..].iter().map(|a| a.to_string()).collect();
            cycle.push(dep.to_string());
            return Err(ResolveError::CyclicDependency { cycle });
        }

        let Some(children) = self.declared_by(dep)? else {
            return Ok(());
        };
        tracing::debug!("{dep}: {} declared dependencies", children.len());

        self.path.push(dep.clone());
        for TransitiveDependency { artifact: child, exclusions } in children {
            if let Some(by) = self.excluded.iter().find(|e| e.matches(&child)) {
                tracing::debug!("{dep}: {child} excluded by {by}");
                continue;
            }
            let id = self.ids.allocate();
            self.graph.add_vertex(id, child.clone());
            self.graph.add_edge(source, id);

            let active = self.excluded.len();
            self.excluded.extend(exclusions);
            let explored = self.explore(&child, id);
            self.excluded.truncate(active);
            explored?;
        }
        self.path.pop();
        Ok(())
    }

    /// Dependencies `dep` declares, or `None` when there is nothing to expand.
    fn declared_by(&self, dep: &Artifact) -> Result<Option<Vec<TransitiveDependency>>, ResolveError> {
        let fetched = self
            .provider
            .locate(dep.group_id(), dep.artifact_id(), dep.version())
            .and_then(|locator| self.provider.fetch_dependencies(&locator));

        match fetched {
            Ok(Some(children)) if !children.is_empty() => Ok(Some(children)),
            Ok(_) => Ok(None),
            Err(ProviderError::NotFound(what)) if dep.is_snapshot() => {
                tracing::warn!("no metadata for snapshot {dep} ({what}), assuming no dependencies");
                Ok(None)
            }
            Err(e) => Err(ResolveError::Metadata {
                artifact: dep.to_string(),
                message: e.to_string(),
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;
    use crate::provider::Locator;

    /// Metadata keyed by `g:a:v`.
    #[derive(Default)]
    struct Table(HashMap<String, Result<Vec<TransitiveDependency>, ProviderError>>);

    impl Table {
        fn with(mut self, parent: &str, children: &[&str]) -> Self {
            self.0.insert(
                parent.to_string(),
                Ok(children.iter().map(|c| parse(c).into()).collect()),
            );
            self
        }

        /// Declare `child` under `parent` with `g:a` exclusions.
        fn excluding(mut self, parent: &str, child: &str, exclusions: &[&str]) -> Self {
            let exclusions = exclusions
                .iter()
                .map(|e| {
                    let (g, a) = e.split_once(':').unwrap();
                    Exclusion::new(g, a)
                })
                .collect();
            let entry = self.0.entry(parent.to_string()).or_insert_with(|| Ok(Vec::new()));
            if let Ok(children) = entry {
                children.push(TransitiveDependency {
                    artifact: parse(child),
                    exclusions,
                });
            }
            self
        }
    }

    fn vertices(graph: &DependencyGraph) -> Vec<String> {
        let mut names: Vec<String> = graph
            .analyse()
            .unwrap()
            .iter()
            .map(|a| a.to_string())
            .collect();
        names.sort();
        names
    }

    fn parse(coord: &str) -> Artifact {
        let parts: Vec<&str> = coord.split(':').collect();
        Artifact::new(parts[0], parts[1], parts[2])
    }

    impl MetadataProvider for Table {
        fn locate(&self, g: &str, a: &str, v: &str) -> Result<Locator, ProviderError> {
            Ok(Locator {
                artifact: Artifact::new(g, a, v),
                location: format!("{g}:{a}:{v}"),
            })
        }

        fn fetch_dependencies(
            &self,
            locator: &Locator,
        ) -> Result<Option<Vec<TransitiveDependency>>, ProviderError> {
            match self.0.get(&locator.location) {
                Some(result) => result.clone().map(Some),
                None => Err(ProviderError::NotFound(locator.location.clone())),
            }
        }
    }

    fn run(table: &Table, root: &str) -> Result<DependencyGraph, ResolveError> {
        let mut ids = IdGenerator::new();
        let mut graph = DependencyGraph::new();
        let root = parse(root);
        let id = ids.allocate();
        graph.add_vertex(id, root.clone());
        Explorer::new(table, &mut ids, &mut graph).explore(&root, id)?;
        Ok(graph)
    }

    #[test]
    fn diamond_expands_shared_dependency_twice() {
        let table = Table::default()
            .with("g:app:1", &["g:left:1", "g:right:1"])
            .with("g:left:1", &["g:base:1"])
            .with("g:right:1", &["g:base:1"])
            .with("g:base:1", &[]);
        let graph = run(&table, "g:app:1").unwrap();
        assert_eq!(graph.len(), 5);
        assert_eq!(graph.graph().edge_count(), 4);
    }

    #[test]
    fn missing_snapshot_metadata_means_no_dependencies() {
        let table = Table::default().with("g:app:1", &["g:wip:2.0-SNAPSHOT"]);
        let graph = run(&table, "g:app:1").unwrap();
        assert_eq!(graph.len(), 2);
    }

    #[test]
    fn missing_release_metadata_is_fatal() {
        let table = Table::default().with("g:app:1", &["g:gone:2.0"]);
        let err = run(&table, "g:app:1").unwrap_err();
        assert!(matches!(err, ResolveError::Metadata { ref artifact, .. } if artifact == "g:gone:2.0"));
    }

    #[test]
    fn snapshot_failure_other_than_not_found_is_fatal() {
        let mut table = Table::default().with("g:app:1", &["g:wip:1-SNAPSHOT"]);
        table.0.insert(
            "g:wip:1-SNAPSHOT".to_string(),
            Err(ProviderError::Failed("connection reset".to_string())),
        );
        assert!(matches!(
            run(&table, "g:app:1").unwrap_err(),
            ResolveError::Metadata { .. }
        ));
    }

    #[test]
    fn metadata_cycle_fails_instead_of_recursing() {
        let table = Table::default()
            .with("g:a:1", &["g:b:1"])
            .with("g:b:1", &["g:c:1"])
            .with("g:c:1", &["g:a:1"]);
        match run(&table, "g:a:1").unwrap_err() {
            ResolveError::CyclicDependency { cycle } => {
                assert_eq!(cycle, vec!["g:a:1", "g:b:1", "g:c:1", "g:a:1"]);
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn exclusion_prunes_the_subtree_below_it() {
        let table = Table::default()
            .excluding("g:app:1", "g:x:1", &["g:y"])
            .with("g:x:1", &["g:y:1", "g:z:1"])
            .with("g:y:1", &["g:deep:1"])
            .with("g:z:1", &["g:y:1"])
            .with("g:deep:1", &[]);
        let graph = run(&table, "g:app:1").unwrap();
        assert_eq!(vertices(&graph), vec!["g:app:1", "g:x:1", "g:z:1"]);
    }

    #[test]
    fn exclusion_does_not_apply_to_siblings() {
        let table = Table::default()
            .excluding("g:app:1", "g:x:1", &["g:y"])
            .with("g:x:1", &["g:y:1"])
            .with("g:y:1", &[])
            .excluding("g:app:1", "g:other:1", &[])
            .with("g:other:1", &["g:y:1"]);
        let graph = run(&table, "g:app:1").unwrap();
        assert_eq!(
            vertices(&graph),
            vec!["g:app:1", "g:other:1", "g:x:1", "g:y:1"]
        );
    }

    #[test]
    fn wildcard_exclusion_drops_every_transitive_dependency() {
        let table = Table::default()
            .excluding("g:app:1", "g:x:1", &["*:*"])
            .with("g:x:1", &["g:y:1", "h:z:1"]);
        let graph = run(&table, "g:app:1").unwrap();
        assert_eq!(vertices(&graph), vec!["g:app:1", "g:x:1"]);
    }

    #[test]
    fn same_identity_at_other_version_is_not_a_cycle() {
        let table = Table::default()
            .with("g:a:1", &["g:b:1"])
            .with("g:b:1", &["g:a:2"])
            .with("g:a:2", &[]);
        assert_eq!(run(&table, "g:a:1").unwrap().len(), 3);
    }
}
