//! Platform abstraction layer.
//!
//! All `#[cfg]` blocks for OS-specific behavior live here:
//! - `paths` - Steam installation and userdata locations
//! - `process` - detecting and stopping the Steam client

pub mod paths;
pub mod process;

pub use paths::{list_user_ids, shortcuts_path, steam_root, userdata_dir};
pub use process::{ensure_steam_closed, is_steam_running, terminate_steam};

/// Returns the current platform name.
pub fn current_platform() -> &'static str {
    #[cfg(target_os = "linux")]
    {
        "linux"
    }
    #[cfg(target_os = "windows")]
    {
        "windows"
    }
    #[cfg(target_os = "macos")]
    {
        "macos"
    }
    #[cfg(not(any(target_os = "linux", target_os = "windows", target_os = "macos")))]
    {
        "unknown"
    }
}
