//! Bulk file actions used by the desktop and the file explorer.
//!
//! Thin helpers over [`Vfs`] that take a directory plus a leaf name, or a
//! list of paths, and stop at the first failure.

use tracing::{debug, warn};

use super::Vfs;
use crate::clock::Clock;
use crate::constants::COPY_SUFFIX;
use crate::core::{filename, join_path, parent_path, Result, VfsError};
use crate::storage::NodeStore;

/// What `copy_items` does with each source.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum TransferMode {
    /// Duplicate, naming the copy `<name> - Copy`
    #[default]
    Copy,
    /// Relocate, keeping the name
    Move,
}

fn require_name(name: &str) -> Result<()> {
    if name.trim().is_empty() {
        Err(VfsError::invalid_name(name, "name cannot be empty"))
    } else {
        Ok(())
    }
}

/// File actions bound to one VFS.
pub struct FileActions<'a, S, C> {
    vfs: &'a Vfs<S, C>,
}

impl<'a, S: NodeStore, C: Clock> FileActions<'a, S, C> {
    /// Wrap a VFS.
    pub fn new(vfs: &'a Vfs<S, C>) -> Self {
        Self { vfs }
    }

    /// Create an empty file named `name` inside `dir`.
    pub async fn create_file(&self, dir: &str, name: &str) -> Result<()> {
        require_name(name)?;
        self.vfs.write_file(&join_path(dir, name), &[]).await
    }

    /// Create a directory named `name` inside `dir`.
    pub async fn create_directory(&self, dir: &str, name: &str) -> Result<()> {
        require_name(name)?;
        self.vfs.mkdir(&join_path(dir, name)).await
    }

    /// Delete every listed path. Directories go recursively.
    ///
    /// Paths that no longer exist are skipped.
    pub async fn delete_items<P: AsRef<str>>(&self, paths: &[P]) -> Result<()> {
        for path in paths {
            let path = path.as_ref();
            let node = match self.vfs.stat(path).await? {
                Some(node) => node,
                None => {
                    warn!(path, "delete skipped: not found");
                    continue;
                }
            };

            if node.is_directory() {
                self.vfs.rmdir(&node.path, true).await?;
            } else {
                self.vfs.unlink(&node.path).await?;
            }
        }
        debug!(count = paths.len(), "delete_items");
        Ok(())
    }

    /// Give a node a new leaf name within its current directory.
    pub async fn rename_item(&self, old_path: &str, new_name: &str) -> Result<()> {
        require_name(new_name)?;
        let old = self.vfs.normalize(old_path);
        let new_path = join_path(&parent_path(&old), new_name);
        self.vfs.rename(&old, &new_path).await
    }

    /// Copy or move every listed source into `dest_dir`.
    ///
    /// Sources that no longer exist are skipped.
    pub async fn copy_items<P: AsRef<str>>(
        &self,
        sources: &[P],
        dest_dir: &str,
        mode: TransferMode,
    ) -> Result<()> {
        for source in sources {
            let source = source.as_ref();
            let node = match self.vfs.stat(source).await? {
                Some(node) => node,
                None => {
                    warn!(path = source, "transfer skipped: not found");
                    continue;
                }
            };

            match mode {
                TransferMode::Move => {
                    let dest = join_path(dest_dir, filename(&node.path));
                    self.vfs.rename(&node.path, &dest).await?;
                }
                TransferMode::Copy => {
                    let name = format!("{}{}", filename(&node.path), COPY_SUFFIX);
                    self.vfs.copy(&node.path, &join_path(dest_dir, &name)).await?;
                }
            }
        }
        Ok(())
    }
}
