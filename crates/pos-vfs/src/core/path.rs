//! Path utilities for the VFS layer.
//!
//! Canonical paths look like `C:\Users\Public\file.txt`: a drive letter, a
//! colon, backslash separators. Case is preserved and two paths name the
//! same node only when their canonical strings are byte-for-byte equal.

use crate::constants::{DEFAULT_DRIVE, SEPARATOR};

/// A canonical path split into its parent and leaf.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ParsedPath {
    /// Canonical form of the whole path
    pub normalized: String,
    /// Canonical parent path (`""` for drive roots)
    pub parent: String,
    /// Leaf name (`""` for drive roots)
    pub name: String,
}

impl ParsedPath {
    /// Drive roots have neither parent nor name.
    pub fn is_drive_root(&self) -> bool {
        self.name.is_empty()
    }
}

/// Check whether `path` already starts with `X:\`.
fn has_drive_prefix(path: &str) -> bool {
    let bytes = path.as_bytes();
    bytes.len() >= 3 && bytes[0].is_ascii_alphabetic() && bytes[1] == b':' && bytes[2] == b'\\'
}

/// Normalize a path onto the default `C:` drive.
pub fn normalize_path(path: &str) -> String {
    normalize_path_on(path, DEFAULT_DRIVE)
}

/// Normalize a path, substituting `drive` when it has no drive prefix.
///
/// Forward slashes become backslashes. A path without `X:\` loses its
/// leading separators and gains `drive:\`. Nothing else is rewritten.
pub fn normalize_path_on(path: &str, drive: char) -> String {
    let path = path.replace('/', "\\");
    if has_drive_prefix(&path) {
        return path;
    }

    let rest = path.trim_start_matches(SEPARATOR);
    let mut result = String::with_capacity(rest.len() + 3);
    result.push(drive);
    result.push(':');
    result.push(SEPARATOR);
    result.push_str(rest);
    result
}

/// Parse a path on the default `C:` drive.
pub fn parse_path(path: &str) -> ParsedPath {
    parse_path_on(path, DEFAULT_DRIVE)
}

/// Normalize `path` and split it at the last separator.
///
/// A path with no separator, or whose last separator is its final
/// character, is treated as a drive root.
pub fn parse_path_on(path: &str, drive: char) -> ParsedPath {
    let normalized = normalize_path_on(path, drive);

    match normalized.rfind(SEPARATOR) {
        Some(pos) if pos + 1 < normalized.len() => {
            let parent = &normalized[..pos];
            let name = String::from(&normalized[pos + 1..]);
            // "C:" alone is not a path; its root is "C:\"
            let parent = if parent.len() == 2 && parent.ends_with(':') {
                drive_root(parent)
            } else {
                String::from(parent)
            };
            ParsedPath {
                normalized,
                parent,
                name,
            }
        }
        _ => ParsedPath {
            normalized,
            parent: String::new(),
            name: String::new(),
        },
    }
}

fn drive_root(drive: &str) -> String {
    let mut root = String::from(drive);
    root.push(SEPARATOR);
    root
}

/// Get the parent path of a canonical path.
pub fn parent_path(path: &str) -> String {
    parse_path(path).parent
}

/// Get the leaf name of a canonical path.
pub fn filename(path: &str) -> &str {
    match path.rfind(SEPARATOR) {
        Some(pos) if pos + 1 < path.len() => &path[pos + 1..],
        Some(_) => "",
        None => path,
    }
}

/// Join a directory path and a leaf name.
pub fn join_path(base: &str, name: &str) -> String {
    if base.ends_with(SEPARATOR) {
        format!("{}{}", base, name)
    } else {
        format!("{}{}{}", base, SEPARATOR, name)
    }
}

/// The key prefix shared by every strict descendant of `path`.
pub fn subtree_prefix(path: &str) -> String {
    if path.ends_with(SEPARATOR) {
        String::from(path)
    } else {
        format!("{}{}", path, SEPARATOR)
    }
}

/// Check if `path` is strictly below `base`.
pub fn is_under(path: &str, base: &str) -> bool {
    path.len() > base.len() && path.starts_with(&subtree_prefix(base))
}

/// Replace the `from` prefix of `path` with `to`.
///
/// Returns `None` when `path` is neither `from` nor below it.
pub fn rebase(path: &str, from: &str, to: &str) -> Option<String> {
    if path == from {
        return Some(String::from(to));
    }
    if !is_under(path, from) {
        return None;
    }
    let rest = &path[from.len()..];
    // A root prefix ("C:\") already swallowed the separator
    if from.ends_with(SEPARATOR) {
        Some(join_path(to, rest))
    } else {
        Some(format!("{}{}", to, rest))
    }
}
