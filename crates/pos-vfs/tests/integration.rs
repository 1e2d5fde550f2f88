//! VFS Integration Tests
//!
//! End-to-end scenarios through the public API: bootstrap a drive, work on
//! the desktop, and check the store stays consistent.

use pos_vfs::bootstrap;
use pos_vfs::{
    normalize_path, FileAttributes, ManualClock, MemoryStore, NodeStore, SortConfig, SortField,
    TransferMode, Vfs, VfsConfig, VfsError,
};

const DESKTOP: &str = "C:\\System\\Desktop";

async fn booted() -> Vfs<MemoryStore, ManualClock> {
    let vfs = Vfs::new(MemoryStore::new(), ManualClock::new(1_700_000_000_000));
    bootstrap::bootstrap(&vfs, &VfsConfig::default()).await.unwrap();
    vfs
}

/// Every stored node's parent exists and is a directory (roots aside).
async fn assert_tree_consistent(vfs: &Vfs<MemoryStore, ManualClock>) {
    for node in vfs.store().get_all().await.unwrap() {
        if node.is_drive_root() {
            continue;
        }
        let parent = vfs.stat(&node.parent).await.unwrap();
        assert!(
            parent.map_or(false, |p| p.is_directory()),
            "orphaned node {}",
            node.path
        );
        assert_eq!(normalize_path(&node.path), node.path);
    }
}

// ============================================================================
// Bootstrap
// ============================================================================

#[tokio::test]
async fn test_fresh_desktop_has_explorer_shortcut() {
    let vfs = booted().await;

    let entries = vfs.readdir(DESKTOP).await.unwrap();
    assert_eq!(entries.len(), 1);
    assert_eq!(entries[0].name, "File Explorer.lnk");
    assert_eq!(
        vfs.resolve_symlink("C:\\System\\Desktop\\File Explorer.lnk")
            .await
            .unwrap(),
        "fileexplorer://"
    );
    assert_tree_consistent(&vfs).await;
}

#[tokio::test]
async fn test_bootstrap_twice_keeps_user_data() {
    let vfs = booted().await;
    vfs.write_file("C:\\System\\Desktop\\todo.txt", b"ship it")
        .await
        .unwrap();

    bootstrap::bootstrap(&vfs, &VfsConfig::default()).await.unwrap();

    assert_eq!(
        vfs.read_file("C:\\System\\Desktop\\todo.txt").await.unwrap(),
        Some(b"ship it".to_vec())
    );
    assert_eq!(vfs.store().count().await.unwrap(), 5);
}

// ============================================================================
// Desktop workflow
// ============================================================================

#[tokio::test]
async fn test_desktop_workflow() {
    let vfs = booted().await;
    let actions = vfs.actions();

    actions.create_directory(DESKTOP, "Projects").await.unwrap();
    actions.create_file(DESKTOP, "readme.txt").await.unwrap();
    vfs.write_file("C:/System/Desktop/Projects/plan.md", b"# Plan")
        .await
        .unwrap();

    // Duplicate the folder next to itself
    actions
        .copy_items(&["C:\\System\\Desktop\\Projects"], DESKTOP, TransferMode::Copy)
        .await
        .unwrap();
    assert_eq!(
        vfs.read_file("C:\\System\\Desktop\\Projects - Copy\\plan.md")
            .await
            .unwrap(),
        Some(b"# Plan".to_vec())
    );

    // Rename the copy, then move it to the drive root
    actions
        .rename_item("C:\\System\\Desktop\\Projects - Copy", "Archive")
        .await
        .unwrap();
    actions
        .copy_items(&["C:\\System\\Desktop\\Archive"], "C:\\", TransferMode::Move)
        .await
        .unwrap();
    assert!(vfs.exists("C:\\Archive\\plan.md").await.unwrap());
    assert!(!vfs.exists("C:\\System\\Desktop\\Archive").await.unwrap());

    // Explorer view of the desktop
    let mut listing = vfs.readdir(DESKTOP).await.unwrap();
    SortConfig::default().sort_nodes(&mut listing);
    let names: Vec<&str> = listing.iter().map(|n| n.name.as_str()).collect();
    assert_eq!(names, vec!["Projects", "readme.txt", "File Explorer.lnk"]);

    let mut by_size = SortConfig::default();
    by_size.toggle(SortField::Size);
    by_size.toggle(SortField::Size);
    by_size.sort_nodes(&mut listing);
    assert_eq!(listing[0].name, "Projects");

    // Clean up everything that was created
    actions
        .delete_items(&[
            "C:\\System\\Desktop\\Projects",
            "C:\\System\\Desktop\\readme.txt",
            "C:\\Archive",
        ])
        .await
        .unwrap();
    assert_eq!(vfs.store().count().await.unwrap(), 4);
    assert_tree_consistent(&vfs).await;
}

#[tokio::test]
async fn test_hidden_attribute_survives_move() {
    let vfs = booted().await;
    vfs.write_file("C:\\secret.txt", b"42").await.unwrap();
    vfs.set_attributes("C:\\secret.txt", FileAttributes::hidden())
        .await
        .unwrap();

    vfs.rename("C:\\secret.txt", "C:\\System\\secret.txt")
        .await
        .unwrap();

    let node = vfs.stat("C:\\System\\secret.txt").await.unwrap().unwrap();
    assert!(node.attributes.hidden);
    assert!(!node.attributes.read_only);
}

#[tokio::test]
async fn test_deep_tree_move_and_delete() {
    let vfs = booted().await;
    let mut dir = String::from("C:\\Deep");
    vfs.mkdir(&dir).await.unwrap();
    for level in 0..20 {
        vfs.write_file(&format!("{}\\file{}.txt", dir, level), b"x")
            .await
            .unwrap();
        dir = format!("{}\\L{}", dir, level);
        vfs.mkdir(&dir).await.unwrap();
    }
    let before = vfs.store().count().await.unwrap();

    vfs.rename("C:\\Deep", "C:\\System\\Deeper").await.unwrap();
    assert_eq!(vfs.store().count().await.unwrap(), before);
    assert!(vfs
        .exists("C:\\System\\Deeper\\L0\\L1\\L2\\file3.txt")
        .await
        .unwrap());
    assert!(vfs.store().list_subtree("C:\\Deep").await.unwrap().is_empty());
    assert_tree_consistent(&vfs).await;

    vfs.rmdir("C:\\System\\Deeper", true).await.unwrap();
    assert_eq!(vfs.store().count().await.unwrap(), 4);
    assert_tree_consistent(&vfs).await;
}

#[tokio::test]
async fn test_errors_expose_kind_and_message() {
    let vfs = booted().await;

    let err = vfs.mkdir("C:\\System").await.unwrap_err();
    assert_eq!(err.kind(), "AlreadyExists");
    assert_eq!(err.to_string(), "path 'C:\\System' already exists");

    let err = vfs.rmdir("C:\\System", false).await.unwrap_err();
    assert_eq!(err, VfsError::NotEmpty(String::from("C:\\System")));
}
