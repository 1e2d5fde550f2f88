//! Pseudo OS Virtual Filesystem Layer
//!
//! The VFS layer provides a Windows-style hierarchical filesystem for the
//! Pseudo OS desktop:
//!
//! - **Types**: FsNode, NodeKind, FileAttributes for filesystem entries
//! - **Path**: Drive-letter path normalization and parsing
//! - **Name**: Windows leaf-name validation
//! - **Storage**: NodeStore trait with a parent index and atomic batches
//! - **Service**: Vfs operations and bulk file actions
//! - **Listing**: Explorer sort order
//! - **Bootstrap**: Drive initialization and the desktop layout
//!
//! # Design Principles
//!
//! 1. **Canonical paths**: `C:\path\to\file`, case-preserving and case-sensitive
//! 2. **Flat storage**: One record per node keyed by path, indexed by parent
//! 3. **Atomic subtrees**: Move, copy and recursive delete commit as one batch
//! 4. **Injected state**: The store and clock are owned by the `Vfs` value
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────────┐
//! │                            VFS Layer                                         │
//! │                                                                              │
//! │  ┌──────────────────────────────────────────────────────────────────────┐   │
//! │  │                     FileActions / Listing                              │   │
//! │  │  • Create / delete items     • Copy or move into a folder             │   │
//! │  │  • Rename in place           • Explorer sort order                    │   │
//! │  └────────────────────────────────┬──────────────────────────────────────┘   │
//! │                                   │                                          │
//! │                                   ▼                                          │
//! │  ┌──────────────────────────────────────────────────────────────────────┐   │
//! │  │                          Vfs<S, C>                                     │   │
//! │  │  • Path normalization   • Name validation                             │   │
//! │  │  • File read/write      • Directory operations                        │   │
//! │  │  • Symlinks             • Subtree move/copy                           │   │
//! │  └────────────────────────────────┬──────────────────────────────────────┘   │
//! │                                   │                                          │
//! │                                   ▼                                          │
//! │  ┌──────────────────────────────────────────────────────────────────────┐   │
//! │  │                         NodeStore                                      │   │
//! │  │  ┌─────────────────────────┐  ┌─────────────────────────┐            │   │
//! │  │  │   MemoryStore           │  │   IndexedDbStore        │            │   │
//! │  │  │  • BTreeMap by path     │  │  • `nodes` object store │            │   │
//! │  │  │  • Parent index         │  │  • `by-parent` index    │            │   │
//! │  │  └─────────────────────────┘  └─────────────────────────┘            │   │
//! │  └──────────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! `IndexedDbStore` lives in the `pos-vfs-web` crate.

pub mod bootstrap;
pub mod clock;
pub mod config;
pub mod constants;
pub mod core;
pub mod listing;
pub mod service;
pub mod storage;

// Convenient re-exports at crate root
pub use clock::{Clock, ManualClock};
#[cfg(not(target_arch = "wasm32"))]
pub use clock::SystemClock;
pub use config::VfsConfig;
pub use crate::core::{is_valid_windows_name, normalize_path, parent_path, parse_path, validate_name};
pub use crate::core::{FileAttributes, FsNode, NodeKind, ParsedPath, Result, StoreError, VfsError};
pub use listing::{SortConfig, SortDirection, SortField};
pub use service::{FileActions, TransferMode, Vfs};
pub use storage::{MemoryStore, NodeStore, StoreOp};
