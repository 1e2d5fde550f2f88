//! Filesystem bootstrap for the VFS layer.
//!
//! Handles initialization of drive roots and the desktop layout on first open.

use tracing::info;

use crate::clock::Clock;
use crate::config::VfsConfig;
use crate::constants::{DESKTOP_DIR, FILE_EXPLORER_LINK, FILE_EXPLORER_TARGET, SYSTEM_DIR};
use crate::core::{join_path, Result, VfsError};
use crate::service::Vfs;
use crate::storage::NodeStore;

/// Canonical root path of a drive (`X:\`).
pub fn drive_root_path(letter: char) -> String {
    format!("{}:\\", letter.to_ascii_uppercase())
}

fn check_drive_letter(letter: char) -> Result<()> {
    if letter.is_ascii_alphabetic() {
        Ok(())
    } else {
        Err(VfsError::invalid_path(format!(
            "drive letter '{}' is not a letter",
            letter
        )))
    }
}

/// Create the root of a drive if it is missing.
///
/// Returns the canonical root path.
pub async fn ensure_drive_root<S: NodeStore, C: Clock>(vfs: &Vfs<S, C>, letter: char) -> Result<String> {
    check_drive_letter(letter)?;
    let root = drive_root_path(letter);
    if !vfs.exists(&root).await? {
        vfs.mkdir(&root).await?;
        info!(root = %root, "created drive root");
    }
    Ok(root)
}

/// Initialize a drive with the desktop layout.
///
/// Creates, each only when absent:
/// ```text
/// X:\
/// └── System\
///     └── Desktop\
///         └── File Explorer.lnk -> fileexplorer://
/// ```
///
/// This function is idempotent: running it again on an initialized drive
/// changes nothing.
pub async fn initialize_drive<S: NodeStore, C: Clock>(vfs: &Vfs<S, C>, letter: char) -> Result<()> {
    let root = ensure_drive_root(vfs, letter).await?;

    let system = join_path(&root, SYSTEM_DIR);
    if !vfs.exists(&system).await? {
        vfs.mkdir(&system).await?;
    }

    let desktop = join_path(&system, DESKTOP_DIR);
    if !vfs.exists(&desktop).await? {
        vfs.mkdir(&desktop).await?;
    }

    let explorer = join_path(&desktop, FILE_EXPLORER_LINK);
    if !vfs.exists(&explorer).await? {
        vfs.create_symlink(&explorer, FILE_EXPLORER_TARGET).await?;
    }

    info!(drive = %root, "drive initialized");
    Ok(())
}

/// Bootstrap the configured default drive.
///
/// With `bootstrap_desktop` off only the drive root is created.
pub async fn bootstrap<S: NodeStore, C: Clock>(vfs: &Vfs<S, C>, config: &VfsConfig) -> Result<()> {
    config.validate()?;
    if config.bootstrap_desktop {
        initialize_drive(vfs, config.drive()).await
    } else {
        ensure_drive_root(vfs, config.drive()).await.map(|_| ())
    }
}
