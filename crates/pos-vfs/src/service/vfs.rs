//! Filesystem operations over a node store.

use tracing::debug;

use super::actions::FileActions;
use crate::bootstrap;
use crate::clock::Clock;
use crate::constants::DEFAULT_DRIVE;
use crate::core::{
    is_under, join_path, normalize_path_on, parse_path_on, rebase, validate_name, FileAttributes,
    FsNode, NodeKind, ParsedPath, Result, VfsError,
};
use crate::storage::{NodeStore, StoreOp};

/// Windows-style virtual filesystem.
///
/// Owns its store and clock; there is no global instance. Path arguments
/// may be in any accepted form and are normalized on the way in.
pub struct Vfs<S, C> {
    store: S,
    clock: C,
    drive: char,
}

impl<S: NodeStore, C: Clock> Vfs<S, C> {
    /// Create a VFS over `store`, defaulting to the `C:` drive.
    pub fn new(store: S, clock: C) -> Self {
        Self {
            store,
            clock,
            drive: DEFAULT_DRIVE,
        }
    }

    /// Use `drive` for paths without a drive prefix.
    pub fn with_default_drive(mut self, drive: char) -> Self {
        self.drive = drive.to_ascii_uppercase();
        self
    }

    /// The drive substituted for paths without a prefix.
    pub fn default_drive(&self) -> char {
        self.drive
    }

    /// The underlying store.
    pub fn store(&self) -> &S {
        &self.store
    }

    /// The clock stamping node metadata.
    pub fn clock(&self) -> &C {
        &self.clock
    }

    /// Canonical form of `path`.
    pub fn normalize(&self, path: &str) -> String {
        normalize_path_on(path, self.drive)
    }

    /// Canonical form of `path`, split into parent and leaf.
    pub fn parse(&self, path: &str) -> ParsedPath {
        parse_path_on(path, self.drive)
    }

    /// Fail with `MissingParent` unless `parent` is an existing directory.
    async fn require_parent_dir(&self, parent: &str) -> Result<()> {
        match self.store.get(parent).await? {
            Some(node) if node.is_directory() => Ok(()),
            _ => Err(VfsError::MissingParent(String::from(parent))),
        }
    }

    /// Shared preconditions of `mkdir` and `create_symlink`.
    async fn check_new_entry(&self, parsed: &ParsedPath) -> Result<()> {
        if !parsed.is_drive_root() {
            validate_name(&parsed.name)?;
        }

        if self.store.contains(&parsed.normalized).await? {
            return Err(VfsError::AlreadyExists(parsed.normalized.clone()));
        }

        // Drive roots have no parent to check
        if !parsed.name.is_empty() && !parsed.parent.is_empty() {
            self.require_parent_dir(&parsed.parent).await?;
        }
        Ok(())
    }

    // ========== Queries ==========

    /// Check if a node exists at `path`.
    pub async fn exists(&self, path: &str) -> Result<bool> {
        Ok(self.store.contains(&self.normalize(path)).await?)
    }

    /// Get the node stored at `path`, without following symlinks.
    pub async fn stat(&self, path: &str) -> Result<Option<FsNode>> {
        Ok(self.store.get(&self.normalize(path)).await?)
    }

    /// Follow one level of symlink.
    ///
    /// Returns the link's target verbatim if `path` is a symlink, otherwise
    /// the normalized `path`. Chains are not followed.
    pub async fn resolve_symlink(&self, path: &str) -> Result<String> {
        let normalized = self.normalize(path);
        match self.store.get(&normalized).await? {
            Some(FsNode {
                kind: NodeKind::Symlink { target },
                ..
            }) if !target.is_empty() => Ok(target),
            _ => Ok(normalized),
        }
    }

    /// Read a file's content, following one level of symlink.
    ///
    /// Anything other than a file (including nothing at all) reads as `None`.
    pub async fn read_file(&self, path: &str) -> Result<Option<Vec<u8>>> {
        let resolved = self.normalize(&self.resolve_symlink(path).await?);
        match self.store.get(&resolved).await? {
            Some(FsNode {
                kind: NodeKind::File { content },
                ..
            }) => Ok(Some(content)),
            _ => Ok(None),
        }
    }

    /// List the children of a directory, following one level of symlink.
    ///
    /// A missing directory lists as empty.
    pub async fn readdir(&self, path: &str) -> Result<Vec<FsNode>> {
        let resolved = self.normalize(&self.resolve_symlink(path).await?);
        Ok(self.store.list_by_parent(&resolved).await?)
    }

    // ========== Creation ==========

    /// Write a file, creating it or replacing its content.
    ///
    /// An existing file keeps its `created_at` and attributes.
    pub async fn write_file(&self, path: &str, content: &[u8]) -> Result<()> {
        let parsed = self.parse(path);
        validate_name(&parsed.name)?;
        self.require_parent_dir(&parsed.parent).await?;

        let now = self.clock.now();
        let node = match self.store.get(&parsed.normalized).await? {
            Some(mut existing) => {
                // Types never change in place
                if !existing.is_file() {
                    return Err(VfsError::NotAFile(parsed.normalized));
                }
                existing.kind = NodeKind::File {
                    content: content.to_vec(),
                };
                existing.modified_at = now;
                existing
            }
            None => FsNode::new_file(
                parsed.normalized,
                parsed.parent,
                parsed.name,
                content.to_vec(),
                now,
            ),
        };

        debug!(path = %node.path, size = content.len(), "write_file");
        self.store.put(node).await?;
        Ok(())
    }

    /// Create a directory. Drive roots (`X:\`) need no parent.
    pub async fn mkdir(&self, path: &str) -> Result<()> {
        let parsed = self.parse(path);
        self.check_new_entry(&parsed).await?;

        let node = FsNode::new_directory(
            parsed.normalized,
            parsed.parent,
            parsed.name,
            self.clock.now(),
        );
        debug!(path = %node.path, "mkdir");
        self.store.put(node).await?;
        Ok(())
    }

    /// Create a symbolic link at `link_path` pointing to `target`.
    ///
    /// The target is stored verbatim and never checked for reachability.
    pub async fn create_symlink(&self, link_path: &str, target: &str) -> Result<()> {
        let parsed = self.parse(link_path);
        self.check_new_entry(&parsed).await?;

        let node = FsNode::new_symlink(
            parsed.normalized,
            parsed.parent,
            parsed.name,
            String::from(target),
            self.clock.now(),
        );
        debug!(path = %node.path, link_target = target, "create_symlink");
        self.store.put(node).await?;
        Ok(())
    }

    /// Initialize a drive with the desktop layout. Idempotent.
    pub async fn initialize_drive(&self, letter: char) -> Result<()> {
        bootstrap::initialize_drive(self, letter).await
    }

    /// Bulk file actions over this VFS.
    pub fn actions(&self) -> FileActions<'_, S, C> {
        FileActions::new(self)
    }

    /// Replace a node's attributes.
    pub async fn set_attributes(&self, path: &str, attributes: FileAttributes) -> Result<()> {
        let normalized = self.normalize(path);
        let mut node = self
            .store
            .get(&normalized)
            .await?
            .ok_or(VfsError::NotFound(normalized))?;

        node.attributes = attributes;
        node.modified_at = self.clock.now();
        debug!(path = %node.path, ?attributes, "set_attributes");
        self.store.put(node).await?;
        Ok(())
    }

    // ========== Removal ==========

    /// Delete a file.
    pub async fn rm(&self, path: &str) -> Result<()> {
        let normalized = self.normalize(path);
        match self.store.get(&normalized).await? {
            Some(node) if node.is_file() => {
                debug!(path = %normalized, "rm");
                self.store.delete(&normalized).await?;
                Ok(())
            }
            _ => Err(VfsError::NotAFile(normalized)),
        }
    }

    /// Delete a file or symlink.
    pub async fn unlink(&self, path: &str) -> Result<()> {
        let normalized = self.normalize(path);
        match self.store.get(&normalized).await? {
            Some(node) if node.is_directory() => Err(VfsError::IsADirectory(normalized)),
            Some(_) => {
                debug!(path = %normalized, "unlink");
                self.store.delete(&normalized).await?;
                Ok(())
            }
            None => Err(VfsError::NotFound(normalized)),
        }
    }

    /// Delete a directory.
    ///
    /// Without `recursive`, a directory with children fails with `NotEmpty`.
    /// With it, the subtree is removed depth-first (children before their
    /// parents) in a single store batch.
    pub async fn rmdir(&self, path: &str, recursive: bool) -> Result<()> {
        let normalized = self.normalize(path);
        match self.store.get(&normalized).await? {
            Some(node) if node.is_directory() => {}
            Some(_) => return Err(VfsError::NotADirectory(normalized)),
            None => return Err(VfsError::NotFound(normalized)),
        }

        let children = self.store.list_by_parent(&normalized).await?;
        if !children.is_empty() && !recursive {
            return Err(VfsError::NotEmpty(normalized));
        }

        let doomed = self.collect_post_order(&normalized, children).await?;
        debug!(path = %normalized, removed = doomed.len(), "rmdir");
        let batch = doomed.into_iter().map(StoreOp::Delete).collect();
        self.store.apply(batch).await?;
        Ok(())
    }

    /// Paths of `root` and everything below it, children before parents.
    async fn collect_post_order(&self, root: &str, children: Vec<FsNode>) -> Result<Vec<String>> {
        // Pre-order walk; reversing it puts every node ahead of its parent
        let mut order = vec![String::from(root)];
        let mut stack: Vec<String> = Vec::new();
        let mut listed = Some(children);

        loop {
            let children = match listed.take() {
                Some(children) => children,
                None => match stack.pop() {
                    Some(dir) => {
                        let children = self.store.list_by_parent(&dir).await?;
                        order.push(dir);
                        children
                    }
                    None => break,
                },
            };

            for child in children {
                if child.is_directory() {
                    stack.push(child.path);
                } else {
                    order.push(child.path);
                }
            }
        }

        order.reverse();
        Ok(order)
    }

    // ========== Move / Copy ==========

    /// Move (rename) a node, and its whole subtree if it is a directory.
    ///
    /// The source and every descendant are re-keyed under the destination
    /// in one atomic store batch. The moved node gets a fresh `modified_at`;
    /// `created_at`, payload and attributes carry over.
    pub async fn rename(&self, from: &str, to: &str) -> Result<()> {
        let src = self.parse(from);
        let dst = self.parse(to);

        let mut node = self
            .store
            .get(&src.normalized)
            .await?
            .ok_or_else(|| VfsError::SourceMissing(src.normalized.clone()))?;
        if self.store.contains(&dst.normalized).await? {
            return Err(VfsError::DestExists(dst.normalized));
        }

        if src.is_drive_root()
            || dst.is_drive_root()
            || (node.is_directory() && is_under(&dst.normalized, &src.normalized))
        {
            return Err(VfsError::invalid_move(src.normalized, dst.normalized));
        }
        validate_name(&dst.name)?;
        self.require_parent_dir(&dst.parent).await?;

        let descendants = if node.is_directory() {
            self.store.list_subtree(&src.normalized).await?
        } else {
            Vec::new()
        };

        let mut batch = Vec::with_capacity(2 + descendants.len() * 2);
        batch.push(StoreOp::Delete(src.normalized.clone()));
        node.path = dst.normalized.clone();
        node.parent = dst.parent.clone();
        node.name = dst.name.clone();
        node.modified_at = self.clock.now();
        batch.push(StoreOp::Put(node));

        for mut child in descendants {
            let new_path = rebase(&child.path, &src.normalized, &dst.normalized)
                .ok_or_else(|| VfsError::invalid_move(child.path.clone(), dst.normalized.clone()))?;
            let parsed = parse_path_on(&new_path, self.drive);
            batch.push(StoreOp::Delete(std::mem::replace(&mut child.path, new_path)));
            child.parent = parsed.parent;
            batch.push(StoreOp::Put(child));
        }

        debug!(from = %src.normalized, to = %dst.normalized, nodes = batch.len() / 2, "rename");
        self.store.apply(batch).await?;
        Ok(())
    }

    /// Copy a node, recursively for directories.
    ///
    /// Copies are new entries: fresh timestamps, default attributes, and
    /// their own content buffers. The whole copy lands in one store batch.
    pub async fn copy(&self, from: &str, to: &str) -> Result<()> {
        let src = self.parse(from);
        let dst = self.parse(to);

        let node = self
            .store
            .get(&src.normalized)
            .await?
            .ok_or_else(|| VfsError::SourceMissing(src.normalized.clone()))?;
        if self.store.contains(&dst.normalized).await? {
            return Err(VfsError::DestExists(dst.normalized));
        }

        if dst.is_drive_root() || (node.is_directory() && is_under(&dst.normalized, &src.normalized))
        {
            return Err(VfsError::invalid_move(src.normalized, dst.normalized));
        }
        validate_name(&dst.name)?;
        self.require_parent_dir(&dst.parent).await?;

        let now = self.clock.now();
        let mut batch = Vec::new();
        // (source node, destination path, destination parent, destination name)
        let mut pending = vec![(node, dst.normalized.clone(), dst.parent, dst.name)];

        while let Some((source, path, parent, name)) = pending.pop() {
            let copy = match source.kind {
                NodeKind::File { content } => FsNode::new_file(path, parent, name, content, now),
                NodeKind::Symlink { target } => FsNode::new_symlink(path, parent, name, target, now),
                NodeKind::Directory => {
                    for child in self.store.list_by_parent(&source.path).await? {
                        let child_path = join_path(&path, &child.name);
                        let child_name = child.name.clone();
                        pending.push((child, child_path, path.clone(), child_name));
                    }
                    FsNode::new_directory(path, parent, name, now)
                }
            };
            batch.push(StoreOp::Put(copy));
        }

        debug!(from = %src.normalized, to = %dst.normalized, nodes = batch.len(), "copy");
        self.store.apply(batch).await?;
        Ok(())
    }
}

#[cfg(test)]
#[path = "vfs_tests.rs"]
mod vfs_tests;
