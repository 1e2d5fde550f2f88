//! Error types for the VFS layer.

use serde::{Deserialize, Serialize};

/// Result alias used throughout the VFS layer.
pub type Result<T> = core::result::Result<T, VfsError>;

/// Failures reported by a [`NodeStore`](crate::storage::NodeStore) backend.
///
/// These are kept apart from [`VfsError`]'s logic errors so callers can tell
/// "the path was wrong" from "the database went away".
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, thiserror::Error)]
pub enum StoreError {
    /// Backend is not reachable (not opened, blocked, or write-locked)
    #[error("storage backend unavailable")]
    Unavailable,

    /// Backend raised an error while executing a request
    #[error("storage backend error: {0}")]
    Backend(String),

    /// A persisted record could not be decoded into a node
    #[error("corrupt record at '{path}': {reason}")]
    Corrupt {
        /// Key of the offending record (empty if unknown)
        path: String,
        /// What was wrong with it
        reason: String,
    },
}

impl StoreError {
    /// Create a backend error with message.
    pub fn backend(msg: impl Into<String>) -> Self {
        Self::Backend(msg.into())
    }

    /// Create a corrupt-record error.
    pub fn corrupt(path: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::Corrupt {
            path: path.into(),
            reason: reason.into(),
        }
    }
}

/// Errors from VFS operations.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, thiserror::Error)]
pub enum VfsError {
    /// Leaf name breaks the Windows naming rules
    #[error("invalid name '{name}': {reason}")]
    InvalidName {
        /// The rejected name
        name: String,
        /// Which rule it broke
        reason: String,
    },

    /// Parent directory is absent or not a directory
    #[error("parent directory '{0}' does not exist")]
    MissingParent(String),

    /// Creation target is already occupied
    #[error("path '{0}' already exists")]
    AlreadyExists(String),

    /// Move/copy source does not exist
    #[error("source path '{0}' does not exist")]
    SourceMissing(String),

    /// Move/copy destination is already occupied
    #[error("destination path '{0}' already exists")]
    DestExists(String),

    /// Not a file (or nothing there)
    #[error("'{0}' is not a file or does not exist")]
    NotAFile(String),

    /// Directory still has children
    #[error("directory '{0}' is not empty")]
    NotEmpty(String),

    /// Not a directory
    #[error("'{0}' is not a directory")]
    NotADirectory(String),

    /// Operation needs a non-directory entry
    #[error("'{0}' is a directory")]
    IsADirectory(String),

    /// Path not found
    #[error("path '{0}' does not exist")]
    NotFound(String),

    /// Move/copy of a drive root, or of a directory into its own subtree
    #[error("cannot move or copy '{from}' to '{to}'")]
    InvalidMove {
        /// Canonical source path
        from: String,
        /// Canonical destination path
        to: String,
    },

    /// Invalid path format
    #[error("invalid path: {0}")]
    InvalidPath(String),

    /// Malformed config, sort order or argument list
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    /// Storage backend failure, passed through unchanged
    #[error(transparent)]
    Storage(#[from] StoreError),
}

impl VfsError {
    /// Create an invalid name error.
    pub fn invalid_name(name: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::InvalidName {
            name: name.into(),
            reason: reason.into(),
        }
    }

    /// Create an invalid move error.
    pub fn invalid_move(from: impl Into<String>, to: impl Into<String>) -> Self {
        Self::InvalidMove {
            from: from.into(),
            to: to.into(),
        }
    }

    /// Create an invalid path error with message.
    pub fn invalid_path(msg: impl Into<String>) -> Self {
        Self::InvalidPath(msg.into())
    }

    /// Create an invalid argument error with message.
    pub fn invalid_argument(msg: impl Into<String>) -> Self {
        Self::InvalidArgument(msg.into())
    }

    /// Stable short name of the error kind, used as the JS `Error.name`.
    pub fn kind(&self) -> &'static str {
        match self {
            VfsError::InvalidName { .. } => "InvalidName",
            VfsError::MissingParent(_) => "MissingParent",
            VfsError::AlreadyExists(_) => "AlreadyExists",
            VfsError::SourceMissing(_) => "SourceMissing",
            VfsError::DestExists(_) => "DestExists",
            VfsError::NotAFile(_) => "NotAFile",
            VfsError::NotEmpty(_) => "NotEmpty",
            VfsError::NotADirectory(_) => "NotADirectory",
            VfsError::IsADirectory(_) => "IsADirectory",
            VfsError::NotFound(_) => "NotFound",
            VfsError::InvalidMove { .. } => "InvalidMove",
            VfsError::InvalidPath(_) => "InvalidPath",
            VfsError::InvalidArgument(_) => "InvalidArgument",
            VfsError::Storage(_) => "StorageError",
        }
    }

    /// Check if this is a "not found" style error.
    pub fn is_not_found(&self) -> bool {
        matches!(
            self,
            VfsError::NotFound(_) | VfsError::SourceMissing(_) | VfsError::MissingParent(_)
        )
    }

    /// Check if this came from the storage backend rather than path logic.
    pub fn is_storage(&self) -> bool {
        matches!(self, VfsError::Storage(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        let err = VfsError::invalid_name("a|b", "contains '|'");
        assert_eq!(err.to_string(), "invalid name 'a|b': contains '|'");

        let err = VfsError::MissingParent(String::from("C:\\NoParent"));
        assert_eq!(
            err.to_string(),
            "parent directory 'C:\\NoParent' does not exist"
        );
    }

    #[test]
    fn test_storage_error_is_transparent() {
        let err: VfsError = StoreError::backend("quota exceeded").into();
        assert!(err.is_storage());
        assert_eq!(err.kind(), "StorageError");
        assert_eq!(err.to_string(), "storage backend error: quota exceeded");
    }

    #[test]
    fn test_invalid_argument_kind() {
        let err = VfsError::invalid_argument("config JSON: expected value");
        assert_eq!(err.kind(), "InvalidArgument");
        assert_eq!(err.to_string(), "invalid argument: config JSON: expected value");
        assert!(!err.is_not_found());
    }

    #[test]
    fn test_is_not_found() {
        assert!(VfsError::NotFound(String::from("C:\\x")).is_not_found());
        assert!(VfsError::SourceMissing(String::from("C:\\x")).is_not_found());
        assert!(!VfsError::NotEmpty(String::from("C:\\x")).is_not_found());
        assert!(!VfsError::Storage(StoreError::Unavailable).is_not_found());
    }

    #[test]
    fn test_error_serialization() {
        let err = VfsError::invalid_move("C:\\A", "C:\\A\\B");
        let json = serde_json::to_string(&err).unwrap();
        let restored: VfsError = serde_json::from_str(&json).unwrap();
        assert_eq!(restored, err);
    }
}
