//! In-memory node store.
//!
//! BTreeMap-backed store used by tests and native hosts. Nothing persists
//! past the lifetime of the value.

use std::cell::{Cell, RefCell};
use std::collections::{BTreeMap, BTreeSet};

use async_trait::async_trait;

use super::{NodeStore, StoreOp};
use crate::core::{subtree_prefix, FsNode, StoreError};

/// Primary table plus parent index, mutated together.
#[derive(Default)]
struct Tables {
    /// Node storage (path -> node)
    nodes: BTreeMap<String, FsNode>,
    /// Parent index (parent path -> child paths)
    by_parent: BTreeMap<String, BTreeSet<String>>,
}

impl Tables {
    fn insert(&mut self, node: FsNode) {
        if let Some(old) = self.nodes.get(&node.path) {
            if old.parent != node.parent {
                let old_parent = old.parent.clone();
                self.unindex(&old_parent, &node.path);
            }
        }
        self.by_parent
            .entry(node.parent.clone())
            .or_default()
            .insert(node.path.clone());
        self.nodes.insert(node.path.clone(), node);
    }

    fn remove(&mut self, path: &str) {
        if let Some(node) = self.nodes.remove(path) {
            self.unindex(&node.parent, path);
        }
    }

    fn unindex(&mut self, parent: &str, path: &str) {
        if let Some(children) = self.by_parent.get_mut(parent) {
            children.remove(path);
            if children.is_empty() {
                self.by_parent.remove(parent);
            }
        }
    }
}

/// In-memory node store.
#[derive(Default)]
pub struct MemoryStore {
    tables: RefCell<Tables>,
    /// When set, every write fails with `StoreError::Unavailable`
    read_only: Cell<bool>,
}

impl MemoryStore {
    /// Create a new empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Make every write fail (for testing error propagation).
    pub fn set_read_only(&self, read_only: bool) {
        self.read_only.set(read_only);
    }

    fn check_writable(&self) -> Result<(), StoreError> {
        if self.read_only.get() {
            Err(StoreError::Unavailable)
        } else {
            Ok(())
        }
    }
}

#[async_trait(?Send)]
impl NodeStore for MemoryStore {
    async fn get(&self, path: &str) -> Result<Option<FsNode>, StoreError> {
        Ok(self.tables.borrow().nodes.get(path).cloned())
    }

    async fn put(&self, node: FsNode) -> Result<(), StoreError> {
        self.check_writable()?;
        self.tables.borrow_mut().insert(node);
        Ok(())
    }

    async fn delete(&self, path: &str) -> Result<(), StoreError> {
        self.check_writable()?;
        self.tables.borrow_mut().remove(path);
        Ok(())
    }

    async fn list_by_parent(&self, parent: &str) -> Result<Vec<FsNode>, StoreError> {
        let tables = self.tables.borrow();
        let children = match tables.by_parent.get(parent) {
            Some(children) => children,
            None => return Ok(Vec::new()),
        };
        Ok(children
            .iter()
            .filter_map(|path| tables.nodes.get(path).cloned())
            .collect())
    }

    async fn list_subtree(&self, path: &str) -> Result<Vec<FsNode>, StoreError> {
        let prefix = subtree_prefix(path);
        let tables = self.tables.borrow();
        Ok(tables
            .nodes
            .range(prefix.clone()..)
            .take_while(|(key, _)| key.starts_with(&prefix))
            .map(|(_, node)| node.clone())
            .collect())
    }

    async fn get_all(&self) -> Result<Vec<FsNode>, StoreError> {
        Ok(self.tables.borrow().nodes.values().cloned().collect())
    }

    async fn apply(&self, batch: Vec<StoreOp>) -> Result<(), StoreError> {
        self.check_writable()?;
        // Validate the whole batch before touching the tables
        if let Some(op) = batch.iter().find(|op| op.path().is_empty()) {
            return Err(StoreError::corrupt(op.path(), "batch entry has an empty key"));
        }

        let mut tables = self.tables.borrow_mut();
        for op in batch {
            match op {
                StoreOp::Put(node) => tables.insert(node),
                StoreOp::Delete(path) => tables.remove(&path),
            }
        }
        Ok(())
    }

    async fn count(&self) -> Result<usize, StoreError> {
        Ok(self.tables.borrow().nodes.len())
    }

    async fn clear(&self) -> Result<(), StoreError> {
        self.check_writable()?;
        *self.tables.borrow_mut() = Tables::default();
        Ok(())
    }
}
