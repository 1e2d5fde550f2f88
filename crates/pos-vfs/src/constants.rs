//! Fixed names and limits shared by the VFS layer and its browser binding.

/// Path separator used in canonical paths.
pub const SEPARATOR: char = '\\';

/// Drive letter substituted when a path has no drive prefix.
pub const DEFAULT_DRIVE: char = 'C';

/// Maximum leaf name length, in UTF-16 code units.
pub const MAX_NAME_LEN: usize = 255;

/// Characters that may not appear in a leaf name.
pub const INVALID_NAME_CHARS: [char; 7] = ['<', '>', ':', '"', '|', '?', '*'];

/// Device names that may not be used as a leaf name (with or without extension).
pub const RESERVED_DEVICE_NAMES: [&str; 4] = ["CON", "PRN", "AUX", "NUL"];

/// Numbered device prefixes (`COM1`-`COM9`, `LPT1`-`LPT9`).
pub const RESERVED_NUMBERED_DEVICES: [&str; 2] = ["COM", "LPT"];

// =============================================================================
// Persisted layout
// =============================================================================

/// IndexedDB database name. Bump when the node shape changes.
pub const DATABASE_NAME: &str = "pseudo-os-fs-v5-windows";

/// Object store holding every node, keyed by `path`.
pub const NODE_STORE_NAME: &str = "nodes";

/// Secondary index on `parent`.
pub const PARENT_INDEX_NAME: &str = "by-parent";

// =============================================================================
// Desktop bootstrap layout
// =============================================================================

/// System directory created under each initialized drive.
pub const SYSTEM_DIR: &str = "System";

/// Desktop directory created under the system directory.
pub const DESKTOP_DIR: &str = "Desktop";

/// Name of the explorer shortcut placed on the desktop.
pub const FILE_EXPLORER_LINK: &str = "File Explorer.lnk";

/// Virtual target of the explorer shortcut.
pub const FILE_EXPLORER_TARGET: &str = "fileexplorer://";

/// Suffix appended to names produced by a copy action.
pub const COPY_SUFFIX: &str = " - Copy";
