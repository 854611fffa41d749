// src/dag/shared.rs

//! Whole-engine locking for callers that share one graph across threads.

use std::sync::{Arc, RwLock};

use crate::dag::ProjectGraph;
use crate::errors::{ProjdagError, Result};

/// A [`ProjectGraph`] behind a single reader/writer lock.
///
/// Queries run under the read lock and may overlap each other; every
/// mutation holds the write lock for its full duration, so no reader ever
/// observes a half-applied change.
#[derive(Debug, Clone, Default)]
pub struct SharedGraph {
    inner: Arc<RwLock<ProjectGraph>>,
}

impl SharedGraph {
    pub fn new(graph: ProjectGraph) -> Self {
        Self {
            inner: Arc::new(RwLock::new(graph)),
        }
    }

    pub fn read<T>(&self, f: impl FnOnce(&ProjectGraph) -> T) -> Result<T> {
        let guard = self.inner.read().map_err(|_| poisoned())?;
        Ok(f(&guard))
    }

    /// Run a mutation under the write lock.
    ///
    /// Each engine operation is atomic on its own; a closure that performs
    /// several and fails halfway keeps the ones that already succeeded.
    pub fn write<T>(&self, f: impl FnOnce(&mut ProjectGraph) -> Result<T>) -> Result<T> {
        let mut guard = self.inner.write().map_err(|_| poisoned())?;
        f(&mut guard)
    }

    /// Clone the current state out of the lock.
    pub fn snapshot(&self) -> Result<ProjectGraph> {
        self.read(|g| g.clone())
    }
}

fn poisoned() -> ProjdagError {
    ProjdagError::InternalInvariantViolation(
        "graph lock poisoned by a panicking writer".to_string(),
    )
}
