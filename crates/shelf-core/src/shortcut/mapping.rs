//! Conversion between [`ShortcutRecord`] and the generic KeyValues tree.
//!
//! Field order on write matches what Steam itself produces. Reading is
//! lenient: missing fields take their defaults and unknown keys are ignored,
//! so files written by newer Steam builds still load.

use tracing::warn;

use super::record::ShortcutRecord;
use crate::config::ShelfConfig;
use crate::vdf::{KeyValue, Section};

/// Convert a record into its section form.
pub fn to_section(record: &ShortcutRecord) -> Section {
    let mut section = Section::with_capacity(17);
    let mut put = |key: &str, value: KeyValue| {
        section.insert(key.to_string(), value);
    };

    put("appid", KeyValue::Int32(record.appid));
    put("AppName", record.app_name.as_str().into());
    put("Exe", record.exe.as_str().into());
    put("StartDir", record.start_dir.as_str().into());
    put("icon", record.icon.as_str().into());
    put("ShortcutPath", record.shortcut_path.as_str().into());
    put("LaunchOptions", record.launch_options.as_str().into());
    put("IsHidden", KeyValue::Int32(record.is_hidden));
    put("AllowDesktopConfig", KeyValue::Int32(record.allow_desktop_config));
    put("AllowOverlay", KeyValue::Int32(record.allow_overlay));
    put("OpenVR", KeyValue::Int32(record.open_vr));
    put("Devkit", KeyValue::Int32(record.devkit));
    put("DevkitGameID", record.devkit_game_id.as_str().into());
    put("DevkitOverrideAppID", KeyValue::Int32(record.devkit_override_app_id));
    put("LastPlayTime", KeyValue::Int32(record.last_play_time));
    put("FlatpakAppID", record.flatpak_app_id.as_str().into());
    put("tags", KeyValue::Section(record.tags.clone()));

    section
}

/// Read a record from its section form, substituting defaults.
pub fn from_section(section: &Section) -> ShortcutRecord {
    let text = |key: &str| string_field(section, key);
    let int = |key: &str, default: u32| int_field(section, key, default);

    ShortcutRecord {
        appid: int("appid", 0),
        app_name: text("AppName"),
        exe: text("Exe"),
        start_dir: text("StartDir"),
        icon: text("icon"),
        shortcut_path: text("ShortcutPath"),
        launch_options: text("LaunchOptions"),
        is_hidden: int("IsHidden", 0),
        allow_desktop_config: int("AllowDesktopConfig", 1),
        allow_overlay: int("AllowOverlay", 1),
        open_vr: int("OpenVR", 0),
        devkit: int("Devkit", 0),
        devkit_game_id: text("DevkitGameID"),
        devkit_override_app_id: int("DevkitOverrideAppID", 0),
        last_play_time: int("LastPlayTime", 0),
        flatpak_app_id: text("FlatpakAppID"),
        tags: section
            .get("tags")
            .and_then(KeyValue::as_section)
            .cloned()
            .unwrap_or_default(),
    }
}

/// Build the full file tree: `{"shortcuts": {"0": ..., "1": ...}}`.
///
/// Positional keys are recomputed from slice order on every call.
pub fn to_list(records: &[ShortcutRecord]) -> Section {
    let shortcuts: Section = records
        .iter()
        .enumerate()
        .map(|(index, record)| (index.to_string(), KeyValue::Section(to_section(record))))
        .collect();

    let mut root = Section::new();
    root.insert(ShelfConfig::ROOT_SECTION.to_string(), KeyValue::Section(shortcuts));
    root
}

/// Read every record under the `shortcuts` section, in stored order.
///
/// A missing `shortcuts` section yields an empty list; non-section children
/// are skipped.
pub fn from_list(root: &Section) -> Vec<ShortcutRecord> {
    let Some(shortcuts) = root
        .get(ShelfConfig::ROOT_SECTION)
        .and_then(KeyValue::as_section)
    else {
        return Vec::new();
    };

    shortcuts
        .iter()
        .filter_map(|(key, value)| match value.as_section() {
            Some(entry) => Some(from_section(entry)),
            None => {
                warn!("Skipping non-section shortcut entry {:?}", key);
                None
            }
        })
        .collect()
}

fn string_field(section: &Section, key: &str) -> String {
    match section.get(key) {
        None | Some(KeyValue::Section(_)) => String::new(),
        Some(KeyValue::String(s)) => s.clone(),
        Some(other) => other.to_string(),
    }
}

fn int_field(section: &Section, key: &str, default: u32) -> u32 {
    match section.get(key) {
        None => default,
        Some(value) => value.as_u32().unwrap_or_else(|| {
            warn!("Field {} holds {:?}, using default {}", key, value, default);
            default
        }),
    }
}
