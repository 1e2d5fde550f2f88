//! Sorting of directory listings for the explorer views.

use std::cmp::Ordering;

use serde::{Deserialize, Serialize};

use crate::core::{FsNode, NodeKind};

/// Column a listing is sorted by.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortField {
    #[default]
    Name,
    Date,
    Type,
    Size,
}

impl SortField {
    /// Column header text.
    pub fn label(self) -> &'static str {
        match self {
            SortField::Name => "Name",
            SortField::Date => "Date Modified",
            SortField::Type => "Type",
            SortField::Size => "Size",
        }
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortDirection {
    #[default]
    Asc,
    Desc,
}

impl SortDirection {
    fn flipped(self) -> Self {
        match self {
            SortDirection::Asc => SortDirection::Desc,
            SortDirection::Desc => SortDirection::Asc,
        }
    }
}

/// Current sort of a listing. Defaults to name, ascending.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SortConfig {
    pub field: SortField,
    pub direction: SortDirection,
}

impl SortConfig {
    /// Select a column: the current one flips direction, a new one starts ascending.
    pub fn toggle(&mut self, field: SortField) {
        if self.field == field {
            self.direction = self.direction.flipped();
        } else {
            *self = SortConfig {
                field,
                direction: SortDirection::Asc,
            };
        }
    }

    /// Order two nodes under this config.
    ///
    /// Directories always come first, then files, then symlinks. The
    /// direction only reverses the order inside each group.
    pub fn compare(&self, a: &FsNode, b: &FsNode) -> Ordering {
        let group = kind_rank(&a.kind).cmp(&kind_rank(&b.kind));
        if group != Ordering::Equal {
            return group;
        }

        let ordering = match self.field {
            SortField::Name => natural_cmp(&a.name, &b.name),
            SortField::Date => a.modified_at.cmp(&b.modified_at),
            SortField::Type => type_label(a).cmp(&type_label(b)),
            SortField::Size => sort_size(a).cmp(&sort_size(b)),
        };

        match self.direction {
            SortDirection::Asc => ordering,
            SortDirection::Desc => ordering.reverse(),
        }
    }

    /// Sort `nodes` in place.
    pub fn sort_nodes(&self, nodes: &mut [FsNode]) {
        nodes.sort_by(|a, b| self.compare(a, b));
    }
}

fn kind_rank(kind: &NodeKind) -> u8 {
    match kind {
        NodeKind::Directory => 0,
        NodeKind::File { .. } => 1,
        NodeKind::Symlink { .. } => 2,
    }
}

/// `folder`, `shortcut`, or the lower-cased text after the last dot.
///
/// A file whose name has no dot is labelled by its whole lower-cased name;
/// `file` is only used when that text is empty.
pub fn type_label(node: &FsNode) -> String {
    match node.kind {
        NodeKind::Directory => String::from("folder"),
        NodeKind::Symlink { .. } => String::from("shortcut"),
        NodeKind::File { .. } => {
            let ext = node.name.rsplit('.').next().unwrap_or_default();
            if ext.is_empty() {
                String::from("file")
            } else {
                ext.to_lowercase()
            }
        }
    }
}

fn sort_size(node: &FsNode) -> i64 {
    match &node.kind {
        NodeKind::Directory => -1,
        NodeKind::File { content } => content.len() as i64,
        NodeKind::Symlink { .. } => 0,
    }
}

/// Case-insensitive comparison treating digit runs as numbers.
///
/// `file2` sorts before `file10`. Names equal apart from case fall back to
/// a plain comparison so the order stays total.
pub fn natural_cmp(a: &str, b: &str) -> Ordering {
    let mut left = a.chars().peekable();
    let mut right = b.chars().peekable();

    loop {
        let (l, r) = match (left.peek().copied(), right.peek().copied()) {
            (None, None) => return a.cmp(b),
            (None, Some(_)) => return Ordering::Less,
            (Some(_), None) => return Ordering::Greater,
            (Some(l), Some(r)) => (l, r),
        };

        if l.is_ascii_digit() && r.is_ascii_digit() {
            let ln = take_digits(&mut left);
            let rn = take_digits(&mut right);
            let ordering = compare_digit_runs(&ln, &rn);
            if ordering != Ordering::Equal {
                return ordering;
            }
            continue;
        }

        let ordering = l.to_lowercase().cmp(r.to_lowercase());
        if ordering != Ordering::Equal {
            return ordering;
        }
        left.next();
        right.next();
    }
}

fn take_digits(chars: &mut std::iter::Peekable<std::str::Chars<'_>>) -> String {
    let mut run = String::new();
    while let Some(c) = chars.next_if(char::is_ascii_digit) {
        run.push(c);
    }
    run
}

/// Numeric comparison of two digit strings of any length.
fn compare_digit_runs(a: &str, b: &str) -> Ordering {
    let a = a.trim_start_matches('0');
    let b = b.trim_start_matches('0');
    a.len().cmp(&b.len()).then_with(|| a.cmp(b))
}
