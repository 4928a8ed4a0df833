//! Persistence of the resolved [`DependencyGraph`].

use std::path::{Path, PathBuf};

use thiserror::Error;

use crate::dependency_graph::DependencyGraph;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("I/O error on {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("{} does not hold a valid dependency graph: {source}", .path.display())]
    Format {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

/// Whole-graph storage. The on-disk format only has to round-trip.
pub trait GraphStore {
    fn store(&self, graph: &DependencyGraph) -> Result<(), StoreError>;

    /// `Ok(None)` when no graph has been stored yet.
    fn load(&self) -> Result<Option<DependencyGraph>, StoreError>;
}

/// JSON file store, written atomically.
#[derive(Debug, Clone)]
pub struct JsonGraphStore {
    path: PathBuf,
}

impl JsonGraphStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn exists(&self) -> bool {
        self.path.is_file()
    }

    fn io_error(&self, source: std::io::Error) -> StoreError {
        StoreError::Io {
            path: self.path.clone(),
            source,
        }
    }

    fn format_error(&self, source: serde_json::Error) -> StoreError {
        StoreError::Format {
            path: self.path.clone(),
            source,
        }
    }
}

impl GraphStore for JsonGraphStore {
    fn store(&self, graph: &DependencyGraph) -> Result<(), StoreError> {
        let json = serde_json::to_vec_pretty(graph).map_err(|e| self.format_error(e))?;
        jargo_util::fs::write_atomic(&self.path, &json).map_err(|e| self.io_error(e))?;
        tracing::debug!(
            "stored dependency graph ({} vertices) at {}",
            graph.len(),
            self.path.display()
        );
        Ok(())
    }

    fn load(&self) -> Result<Option<DependencyGraph>, StoreError> {
        let bytes = match std::fs::read(&self.path) {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(self.io_error(e)),
        };
        let graph = serde_json::from_slice(&bytes).map_err(|e| self.format_error(e))?;
        Ok(Some(graph))
    }
}
