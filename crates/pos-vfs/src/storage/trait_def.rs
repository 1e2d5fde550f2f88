//! NodeStore trait definition.

use async_trait::async_trait;

use crate::core::{FsNode, StoreError};

/// One write inside an atomic batch.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum StoreOp {
    /// Insert or overwrite a node under its own path
    Put(FsNode),
    /// Remove the node at a path (no-op if absent)
    Delete(String),
}

impl StoreOp {
    /// The key this operation touches.
    pub fn path(&self) -> &str {
        match self {
            StoreOp::Put(node) => &node.path,
            StoreOp::Delete(path) => path,
        }
    }
}

/// Persistent table of nodes keyed by canonical path.
///
/// Every call is atomic on its own. Backends run on a single thread and
/// may suspend on I/O, so the returned futures are not `Send`.
#[async_trait(?Send)]
pub trait NodeStore {
    // ========== Single-key Operations ==========

    /// Fetch the node stored at `path`.
    async fn get(&self, path: &str) -> Result<Option<FsNode>, StoreError>;

    /// Insert or overwrite a node.
    async fn put(&self, node: FsNode) -> Result<(), StoreError>;

    /// Remove the node at `path`. Absent keys are not an error.
    async fn delete(&self, path: &str) -> Result<(), StoreError>;

    // ========== Index Queries ==========

    /// All nodes whose `parent` equals `parent`, via the parent index.
    async fn list_by_parent(&self, parent: &str) -> Result<Vec<FsNode>, StoreError>;

    /// All strict descendants of `path`, via an ordered key range.
    async fn list_subtree(&self, path: &str) -> Result<Vec<FsNode>, StoreError>;

    /// Every node in the store.
    async fn get_all(&self) -> Result<Vec<FsNode>, StoreError>;

    // ========== Bulk Operations ==========

    /// Apply every operation in order, or none of them.
    async fn apply(&self, batch: Vec<StoreOp>) -> Result<(), StoreError>;

    /// Number of stored nodes.
    async fn count(&self) -> Result<usize, StoreError>;

    /// Remove every node.
    async fn clear(&self) -> Result<(), StoreError>;

    /// Check whether a node exists at `path`.
    async fn contains(&self, path: &str) -> Result<bool, StoreError> {
        Ok(self.get(path).await?.is_some())
    }
}
