//! Windows naming rules for leaf names.

use crate::constants::{
    INVALID_NAME_CHARS, MAX_NAME_LEN, RESERVED_DEVICE_NAMES, RESERVED_NUMBERED_DEVICES,
};

use super::error::VfsError;

/// Check a leaf name against the Windows restrictions.
pub fn is_valid_windows_name(name: &str) -> bool {
    check_name(name).is_ok()
}

/// Validate a leaf name, returning a descriptive `InvalidName` error.
pub fn validate_name(name: &str) -> Result<(), VfsError> {
    check_name(name).map_err(|reason| VfsError::invalid_name(name, reason))
}

fn check_name(name: &str) -> Result<(), String> {
    if name.trim().is_empty() {
        return Err(String::from("name cannot be empty"));
    }

    if name.encode_utf16().count() > MAX_NAME_LEN {
        return Err(format!("name is longer than {} characters", MAX_NAME_LEN));
    }

    if let Some(c) = name.chars().find(|c| INVALID_NAME_CHARS.contains(c)) {
        return Err(format!("names cannot contain '{}'", c));
    }

    if is_reserved_device(name) {
        return Err(String::from("name is reserved for a device"));
    }

    if name.ends_with('.') || name.ends_with(' ') {
        return Err(String::from("names cannot end with '.' or a space"));
    }

    Ok(())
}

/// `CON`, `con.txt`, `Com3.log`, `LPT9` and friends.
fn is_reserved_device(name: &str) -> bool {
    // Only the part before the first dot matters
    let stem = match name.find('.') {
        Some(pos) => &name[..pos],
        None => name,
    };
    let stem = stem.to_ascii_uppercase();

    if RESERVED_DEVICE_NAMES.contains(&stem.as_str()) {
        return true;
    }

    let bytes = stem.as_bytes();
    bytes.len() == 4
        && matches!(bytes[3], b'1'..=b'9')
        && RESERVED_NUMBERED_DEVICES
            .iter()
            .any(|prefix| prefix.as_bytes() == &bytes[..3])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_names() {
        assert!(is_valid_windows_name("file.txt"));
        assert!(is_valid_windows_name("File Explorer.lnk"));
        assert!(is_valid_windows_name("CONSOLE"));
        assert!(is_valid_windows_name("COM0"));
        assert!(is_valid_windows_name("LPT10"));
        assert!(is_valid_windows_name(".hidden"));
        assert!(is_valid_windows_name("naïve – résumé"));
    }

    #[test]
    fn test_empty_and_blank_names() {
        assert!(!is_valid_windows_name(""));
        assert!(!is_valid_windows_name("   "));
        assert!(!is_valid_windows_name("\t"));
    }

    #[test]
    fn test_invalid_characters() {
        for c in INVALID_NAME_CHARS {
            let name = format!("Test{}Folder", c);
            assert!(!is_valid_windows_name(&name), "{:?} accepted", name);
        }
    }

    #[test]
    fn test_reserved_names() {
        let reserved = [
            "CON", "PRN", "AUX", "NUL", "COM1", "COM9", "LPT1", "LPT9", "con", "Nul", "com5",
            "CON.txt", "aux.tar.gz", "lpt3.log",
        ];
        for name in reserved {
            assert!(!is_valid_windows_name(name), "{:?} accepted", name);
        }
    }

    #[test]
    fn test_trailing_dot_or_space() {
        assert!(!is_valid_windows_name("name."));
        assert!(!is_valid_windows_name("name "));
        assert!(is_valid_windows_name(" name"));
    }

    #[test]
    fn test_length_limit() {
        let max = "a".repeat(MAX_NAME_LEN);
        assert!(is_valid_windows_name(&max));
        let too_long = "a".repeat(MAX_NAME_LEN + 1);
        assert!(!is_valid_windows_name(&too_long));
    }

    #[test]
    fn test_validate_name_error() {
        match validate_name("a?b") {
            Err(VfsError::InvalidName { name, reason }) => {
                assert_eq!(name, "a?b");
                assert!(reason.contains('?'));
            }
            other => panic!("Expected InvalidName, got {:?}", other),
        }
        assert!(validate_name("ok.txt").is_ok());
    }
}
