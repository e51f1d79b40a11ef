//! Atomic file operations for binary VDF persistence.
//!
//! Writes go through a temp file in the destination directory:
//! 1. Encode the tree and write it to the temp file
//! 2. fsync so the data reaches disk
//! 3. Optionally copy the current file to a `.vdf.bak` backup
//! 4. Atomically rename the temp file over the target

use std::fs;
use std::io::Write;
use std::path::Path;

use tempfile::NamedTempFile;
use tracing::{debug, warn};

use crate::config::PathsConfig;
use crate::error::{Result, ShelfError};
use crate::vdf::{self, Section};

/// Read a whole file into memory.
///
/// Missing files and permission problems surface as
/// [`ShelfError::FileNotFound`] and [`ShelfError::PermissionDenied`].
pub fn read_bytes(path: &Path) -> Result<Vec<u8>> {
    fs::read(path).map_err(|e| ShelfError::io_with_path(e, path))
}

/// Read and decode a binary VDF file.
pub fn read_vdf(path: &Path) -> Result<Section> {
    let bytes = read_bytes(path)?;
    debug!("Read {} bytes from {}", bytes.len(), path.display());
    Ok(vdf::decode(&bytes))
}

/// Read and decode a binary VDF file, failing on the first abnormality.
pub fn read_vdf_strict(path: &Path) -> Result<Section> {
    let bytes = read_bytes(path)?;
    vdf::decode_strict(&bytes)
}

/// Encode a tree and write it atomically.
pub fn write_vdf_atomic(path: &Path, root: &Section, keep_backup: bool) -> Result<()> {
    write_bytes_atomic(path, &vdf::encode(root), keep_backup)
}

/// Write a buffer atomically, optionally keeping a backup of the old file.
pub fn write_bytes_atomic(path: &Path, bytes: &[u8], keep_backup: bool) -> Result<()> {
    let parent = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };

    // Ensure parent directory exists
    if !parent.exists() {
        fs::create_dir_all(parent).map_err(|e| ShelfError::Io {
            message: format!("Failed to create directory {}", parent.display()),
            path: Some(parent.to_path_buf()),
            source: Some(e),
        })?;
    }

    let mut temp = tempfile::Builder::new()
        .prefix(PathsConfig::TEMP_PREFIX)
        .suffix(".tmp")
        .tempfile_in(parent)
        .map_err(|e| ShelfError::Io {
            message: format!("Failed to create temp file in {}", parent.display()),
            path: Some(parent.to_path_buf()),
            source: Some(e),
        })?;

    write_and_sync(&mut temp, bytes).map_err(|e| ShelfError::Io {
        message: format!("Failed to write temp file {}", temp.path().display()),
        path: Some(temp.path().to_path_buf()),
        source: Some(e),
    })?;

    if keep_backup && path.exists() {
        let backup_path = path.with_extension(PathsConfig::BACKUP_EXTENSION);
        if let Err(e) = fs::copy(path, &backup_path) {
            warn!("Failed to create backup {}: {}", backup_path.display(), e);
        } else {
            debug!("Created backup: {}", backup_path.display());
        }
    }

    temp.persist(path).map_err(|e| ShelfError::Io {
        message: format!("Failed to rename temp file to {}", path.display()),
        path: Some(path.to_path_buf()),
        source: Some(e.error),
    })?;

    debug!("Atomically wrote {} bytes to {}", bytes.len(), path.display());
    Ok(())
}

fn write_and_sync(temp: &mut NamedTempFile, bytes: &[u8]) -> std::io::Result<()> {
    temp.write_all(bytes)?;
    temp.flush()?;
    temp.as_file().sync_all()
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn sample_tree() -> Section {
        let mut root = Section::new();
        root.insert("name".into(), "test".into());
        root
    }

    #[test]
    fn test_atomic_write_and_read() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("shortcuts.vdf");

        write_vdf_atomic(&path, &sample_tree(), false).unwrap();
        assert_eq!(fs::read(&path).unwrap(), b"\x01name\x00test\x00\x08");
        assert_eq!(read_vdf(&path).unwrap(), sample_tree());
    }

    #[test]
    fn test_atomic_write_creates_backup() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("shortcuts.vdf");

        write_bytes_atomic(&path, b"\x08", true).unwrap();
        write_vdf_atomic(&path, &sample_tree(), true).unwrap();

        let backup_path = temp_dir.path().join("shortcuts.vdf.bak");
        assert_eq!(fs::read(&backup_path).unwrap(), b"\x08");
        assert_eq!(read_vdf(&path).unwrap(), sample_tree());
    }

    #[test]
    fn test_atomic_write_leaves_no_temp_files() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("shortcuts.vdf");

        write_vdf_atomic(&path, &sample_tree(), false).unwrap();

        let names: Vec<_> = fs::read_dir(temp_dir.path())
            .unwrap()
            .map(|entry| entry.unwrap().file_name())
            .collect();
        assert_eq!(names, vec![std::ffi::OsString::from("shortcuts.vdf")]);
    }

    #[test]
    fn test_read_nonexistent_is_file_not_found() {
        let temp_dir = TempDir::new().unwrap();
        let err = read_vdf(&temp_dir.path().join("missing.vdf")).unwrap_err();
        assert!(err.is_not_found());
    }

    #[test]
    fn test_atomic_write_creates_directories() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("userdata").join("42").join("config").join("shortcuts.vdf");

        write_vdf_atomic(&path, &sample_tree(), false).unwrap();
        assert!(path.exists());
    }

    #[test]
    fn test_read_strict_rejects_truncated_file() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("broken.vdf");
        fs::write(&path, b"\x01name\x00incomplete").unwrap();

        assert!(read_vdf(&path).is_ok());
        assert!(matches!(
            read_vdf_strict(&path),
            Err(ShelfError::Malformed { .. })
        ));
    }
}
