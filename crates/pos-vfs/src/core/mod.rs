//! Core VFS types and utilities

mod error;
mod name;
mod path;
mod types;

pub use error::{Result, StoreError, VfsError};
pub use name::{is_valid_windows_name, validate_name};
pub use path::{
    filename, is_under, join_path, normalize_path, normalize_path_on, parent_path, parse_path,
    parse_path_on, rebase, subtree_prefix, ParsedPath,
};
pub use types::{FileAttributes, FsNode, NodeKind};
