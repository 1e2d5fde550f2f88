//! VFS operations and the bulk actions built on them

mod actions;
mod vfs;

pub use actions::{FileActions, TransferMode};
pub use vfs::Vfs;
