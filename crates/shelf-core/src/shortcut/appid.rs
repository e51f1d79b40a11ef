//! Shortcut appid derivation.

use crate::config::ShelfConfig;

/// Generate the appid Steam assigns to a non-Steam shortcut.
///
/// CRC-32 of `exe_path` followed by `name`, with the high bit forced on.
/// The concatenation order matches Steam's own derivation; swapping it
/// produces ids Steam will not recognise.
pub fn generate_id(name: &str, exe_path: &str) -> u32 {
    let mut hasher = crc32fast::Hasher::new();
    hasher.update(exe_path.as_bytes());
    hasher.update(name.as_bytes());
    hasher.finalize() | ShelfConfig::SHORTCUT_APPID_FLAG
}
