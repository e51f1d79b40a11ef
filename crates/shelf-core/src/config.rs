//! Centralized configuration for Steam Shelf.
//!
//! Constants for file naming, the shortcut list layout and Steam directory
//! conventions, plus the runtime options accepted by the shortcut store.

/// Application-level configuration.
pub struct ShelfConfig;

impl ShelfConfig {
    pub const APP_NAME: &'static str = "Steam Shelf";
    /// Name of the top-level section holding the shortcut list.
    pub const ROOT_SECTION: &'static str = "shortcuts";
    /// High bit forced on every generated shortcut appid.
    pub const SHORTCUT_APPID_FLAG: u32 = 0x8000_0000;
    /// Process names Steam runs under on the supported platforms.
    pub const STEAM_PROCESS_NAMES: &'static [&'static str] = &["steam", "steam.exe", "steam_osx"];
    /// Deepest section nesting the decoder will build. Deeper sections are
    /// skipped and left empty.
    pub const MAX_SECTION_DEPTH: usize = 256;
}

/// Shared directory and path configurations.
pub struct PathsConfig;

impl PathsConfig {
    pub const SHORTCUTS_FILE_NAME: &'static str = "shortcuts.vdf";
    pub const USERDATA_DIR_NAME: &'static str = "userdata";
    pub const CONFIG_DIR_NAME: &'static str = "config";
    pub const BACKUP_EXTENSION: &'static str = "vdf.bak";
    pub const TEMP_PREFIX: &'static str = ".shortcuts-";
    /// Environment variable overriding Steam root detection.
    pub const STEAM_ROOT_ENV: &'static str = "STEAM_ROOT";
}

/// Options controlling how a [`crate::ShortcutStore`] reads and writes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StoreOptions {
    /// Copy the previous file to `shortcuts.vdf.bak` before replacing it.
    pub keep_backup: bool,
    /// Fail on the first decode abnormality instead of substituting defaults.
    pub strict: bool,
}

impl Default for StoreOptions {
    fn default() -> Self {
        Self {
            keep_backup: true,
            strict: false,
        }
    }
}

impl StoreOptions {
    pub fn strict(mut self, strict: bool) -> Self {
        self.strict = strict;
        self
    }

    pub fn keep_backup(mut self, keep_backup: bool) -> Self {
        self.keep_backup = keep_backup;
        self
    }
}
