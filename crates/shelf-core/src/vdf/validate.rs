//! Checks for trees the encoder can write but the decoder cannot read back.

use super::{KeyValue, Section};
use crate::error::{Result, ShelfError};

/// Validate a tree before encoding.
///
/// Rejects scalar entries with an empty key (the decoder drops them), and
/// keys or string values containing a NUL byte (the decoder would split
/// them). Sections may have empty keys; they decode under a placeholder.
pub fn validate(root: &Section) -> Result<()> {
    validate_section(root, &mut Vec::new())
}

fn validate_section<'a>(section: &'a Section, path: &mut Vec<&'a str>) -> Result<()> {
    for (key, value) in section {
        path.push(key);

        if key.contains('\0') {
            return Err(invalid(path, "key contains a NUL byte"));
        }

        match value {
            KeyValue::Section(children) => validate_section(children, path)?,
            _ if key.is_empty() => {
                return Err(invalid(path, "empty key is only allowed on sections"));
            }
            KeyValue::String(s) if s.contains('\0') => {
                return Err(invalid(path, "string value contains a NUL byte"));
            }
            _ => {}
        }

        path.pop();
    }
    Ok(())
}

fn invalid(path: &[&str], message: &str) -> ShelfError {
    ShelfError::Validation {
        field: path.join("."),
        message: message.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_tree_passes() {
        let mut inner = Section::new();
        inner.insert("AppName".into(), "Celeste".into());
        let mut root = Section::new();
        root.insert("shortcuts".into(), inner.into());
        assert!(validate(&root).is_ok());
    }

    #[test]
    fn test_empty_section_key_is_allowed() {
        let mut root = Section::new();
        root.insert(String::new(), Section::new().into());
        assert!(validate(&root).is_ok());
    }

    #[test]
    fn test_empty_scalar_key_is_rejected_with_path() {
        let mut inner = Section::new();
        inner.insert(String::new(), 1u32.into());
        let mut root = Section::new();
        root.insert("shortcuts".into(), inner.into());

        match validate(&root) {
            Err(ShelfError::Validation { field, .. }) => assert_eq!(field, "shortcuts."),
            other => panic!("expected validation error, got {other:?}"),
        }
    }

    #[test]
    fn test_nul_in_value_is_rejected() {
        let mut root = Section::new();
        root.insert("Exe".into(), "game\0.exe".into());
        assert!(matches!(
            validate(&root),
            Err(ShelfError::Validation { field, .. }) if field == "Exe"
        ));
    }
}
