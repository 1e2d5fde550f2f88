//! Core types for the VFS layer.
//!
//! Defines FsNode, NodeKind, and file attributes.

use serde::{Deserialize, Serialize};

/// Windows-style file attributes.
///
/// Metadata only: nothing in the VFS refuses a write because of them.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileAttributes {
    /// Read-only flag
    pub read_only: bool,
    /// Hidden flag
    pub hidden: bool,
}

impl FileAttributes {
    /// Attributes with only the hidden flag set.
    pub fn hidden() -> Self {
        Self {
            read_only: false,
            hidden: true,
        }
    }

    /// Attributes with only the read-only flag set.
    pub fn read_only() -> Self {
        Self {
            read_only: true,
            hidden: false,
        }
    }
}

/// Type of filesystem entry, together with the data only that type carries.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum NodeKind {
    /// Regular file
    File {
        /// File content
        content: Vec<u8>,
    },

    /// Directory
    Directory,

    /// Symbolic link
    Symlink {
        /// Link destination: another path or a virtual `scheme://` URI
        target: String,
    },
}

impl NodeKind {
    /// The persisted type tag.
    pub fn type_name(&self) -> &'static str {
        match self {
            NodeKind::File { .. } => "file",
            NodeKind::Directory => "directory",
            NodeKind::Symlink { .. } => "symlink",
        }
    }
}

/// One filesystem entry as stored.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct FsNode {
    /// Canonical path (primary key)
    pub path: String,

    /// Parent directory path (empty for drive roots)
    pub parent: String,

    /// Entry name (empty for drive roots)
    pub name: String,

    /// Type of entry and its payload
    #[serde(flatten)]
    pub kind: NodeKind,

    /// Creation timestamp (millis since epoch), never changes
    pub created_at: u64,

    /// Last content or metadata change
    pub modified_at: u64,

    /// Read-only/hidden flags
    pub attributes: FileAttributes,
}

impl FsNode {
    fn new(path: String, parent: String, name: String, kind: NodeKind, now: u64) -> Self {
        Self {
            path,
            parent,
            name,
            kind,
            created_at: now,
            modified_at: now,
            attributes: FileAttributes::default(),
        }
    }

    /// Create a new directory node.
    pub fn new_directory(path: String, parent: String, name: String, now: u64) -> Self {
        Self::new(path, parent, name, NodeKind::Directory, now)
    }

    /// Create a new file node.
    pub fn new_file(path: String, parent: String, name: String, content: Vec<u8>, now: u64) -> Self {
        Self::new(path, parent, name, NodeKind::File { content }, now)
    }

    /// Create a new symlink node.
    pub fn new_symlink(path: String, parent: String, name: String, target: String, now: u64) -> Self {
        Self::new(path, parent, name, NodeKind::Symlink { target }, now)
    }

    /// Check if this is a directory.
    pub fn is_directory(&self) -> bool {
        matches!(self.kind, NodeKind::Directory)
    }

    /// Check if this is a file.
    pub fn is_file(&self) -> bool {
        matches!(self.kind, NodeKind::File { .. })
    }

    /// Check if this is a symlink.
    pub fn is_symlink(&self) -> bool {
        matches!(self.kind, NodeKind::Symlink { .. })
    }

    /// Check if this is a drive root.
    pub fn is_drive_root(&self) -> bool {
        self.parent.is_empty() && self.name.is_empty()
    }

    /// File content, if this is a file.
    pub fn content(&self) -> Option<&[u8]> {
        match &self.kind {
            NodeKind::File { content } => Some(content),
            _ => None,
        }
    }

    /// Link target, if this is a symlink.
    pub fn target(&self) -> Option<&str> {
        match &self.kind {
            NodeKind::Symlink { target } => Some(target),
            _ => None,
        }
    }

    /// Content length for files, 0 otherwise.
    pub fn size(&self) -> u64 {
        self.content().map_or(0, |c| c.len() as u64)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_node_kinds() {
        let dir = FsNode::new_directory(
            String::from("C:\\A"),
            String::from("C:\\"),
            String::from("A"),
            1000,
        );
        assert!(dir.is_directory());
        assert!(!dir.is_file());
        assert_eq!(dir.content(), None);
        assert_eq!(dir.kind.type_name(), "directory");

        let file = FsNode::new_file(
            String::from("C:\\A\\f.txt"),
            String::from("C:\\A"),
            String::from("f.txt"),
            b"hello".to_vec(),
            1000,
        );
        assert!(file.is_file());
        assert_eq!(file.content(), Some(&b"hello"[..]));
        assert_eq!(file.size(), 5);
        assert_eq!(file.target(), None);

        let link = FsNode::new_symlink(
            String::from("C:\\Link.lnk"),
            String::from("C:\\"),
            String::from("Link.lnk"),
            String::from("fileexplorer://"),
            1000,
        );
        assert!(link.is_symlink());
        assert_eq!(link.target(), Some("fileexplorer://"));
        assert_eq!(link.size(), 0);
    }

    #[test]
    fn test_new_node_defaults() {
        let dir = FsNode::new_directory(String::from("C:\\"), String::new(), String::new(), 42);
        assert!(dir.is_drive_root());
        assert_eq!(dir.created_at, 42);
        assert_eq!(dir.modified_at, 42);
        assert_eq!(dir.attributes, FileAttributes::default());
    }

    #[test]
    fn test_node_json_shape() {
        let link = FsNode::new_symlink(
            String::from("C:\\Link.lnk"),
            String::from("C:\\"),
            String::from("Link.lnk"),
            String::from("fileexplorer://"),
            7,
        );
        let value = serde_json::to_value(&link).unwrap();
        assert_eq!(value["type"], "symlink");
        assert_eq!(value["target"], "fileexplorer://");
        assert!(value.get("content").is_none());
    }
}
