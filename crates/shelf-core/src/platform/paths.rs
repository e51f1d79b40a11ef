//! Platform-specific Steam paths.
//!
//! Steam keeps one `shortcuts.vdf` per local account:
//! `{steam_root}/userdata/{account_id}/config/shortcuts.vdf`.

use std::fs;
use std::path::{Path, PathBuf};

use tracing::debug;

use crate::config::PathsConfig;
use crate::error::{Result, ShelfError};

/// Candidate Steam installation roots for the current platform, most likely
/// first.
///
/// # Platform Behavior
/// - **Linux**: `~/.steam/steam`, `~/.local/share/Steam`, then the Flatpak
///   install under `~/.var/app/com.valvesoftware.Steam`
/// - **Windows**: `C:\Program Files (x86)\Steam`, `C:\Program Files\Steam`
/// - **macOS**: `~/Library/Application Support/Steam`
pub fn steam_root_candidates() -> Vec<PathBuf> {
    #[cfg(target_os = "linux")]
    {
        match dirs::home_dir() {
            Some(home) => vec![
                home.join(".steam").join("steam"),
                home.join(".local").join("share").join("Steam"),
                home.join(".var")
                    .join("app")
                    .join("com.valvesoftware.Steam")
                    .join(".local")
                    .join("share")
                    .join("Steam"),
            ],
            None => Vec::new(),
        }
    }

    #[cfg(target_os = "windows")]
    {
        vec![
            PathBuf::from(r"C:\Program Files (x86)\Steam"),
            PathBuf::from(r"C:\Program Files\Steam"),
        ]
    }

    #[cfg(target_os = "macos")]
    {
        match dirs::data_dir() {
            Some(data) => vec![data.join("Steam")],
            None => Vec::new(),
        }
    }

    #[cfg(not(any(target_os = "linux", target_os = "windows", target_os = "macos")))]
    {
        Vec::new()
    }
}

/// Locate the Steam installation root.
///
/// The `STEAM_ROOT` environment variable wins when set; otherwise the first
/// existing platform candidate is used.
pub fn steam_root() -> Result<PathBuf> {
    if let Some(root) = std::env::var_os(PathsConfig::STEAM_ROOT_ENV) {
        let root = PathBuf::from(root);
        debug!("Using Steam root from environment: {}", root.display());
        return Ok(root);
    }

    steam_root_candidates()
        .into_iter()
        .find(|candidate| candidate.is_dir())
        .ok_or_else(|| ShelfError::Config {
            message: format!(
                "Could not find a Steam installation on {}; set {}",
                super::current_platform(),
                PathsConfig::STEAM_ROOT_ENV
            ),
        })
}

/// `{steam_root}/userdata`
pub fn userdata_dir(steam_root: &Path) -> PathBuf {
    steam_root.join(PathsConfig::USERDATA_DIR_NAME)
}

/// `{steam_root}/userdata/{user_id}/config/shortcuts.vdf`
pub fn shortcuts_path(steam_root: &Path, user_id: u32) -> PathBuf {
    userdata_dir(steam_root)
        .join(user_id.to_string())
        .join(PathsConfig::CONFIG_DIR_NAME)
        .join(PathsConfig::SHORTCUTS_FILE_NAME)
}

/// Account ids with a userdata directory, sorted ascending.
///
/// Non-numeric entries (such as `anonymous` or `0`) are skipped.
pub fn list_user_ids(steam_root: &Path) -> Result<Vec<u32>> {
    let userdata = userdata_dir(steam_root);
    if !userdata.is_dir() {
        return Err(ShelfError::NotADirectory(userdata));
    }

    let entries = fs::read_dir(&userdata).map_err(|e| ShelfError::io_with_path(e, &userdata))?;

    let mut ids: Vec<u32> = entries
        .filter_map(|entry| entry.ok())
        .filter(|entry| entry.path().is_dir())
        .filter_map(|entry| entry.file_name().to_str()?.parse().ok())
        .filter(|&id| id != 0)
        .collect();
    ids.sort_unstable();
    Ok(ids)
}
