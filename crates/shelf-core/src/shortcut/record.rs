//! Typed shortcut entry.

use serde::Serialize;
use std::path::PathBuf;

use super::appid::generate_id;
use crate::vdf::{KeyValue, Section};

/// One entry of `shortcuts.vdf`.
///
/// Field names serialize under the keys Steam uses on disk.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ShortcutRecord {
    /// Stable identity of the shortcut.
    pub appid: u32,
    #[serde(rename = "AppName")]
    pub app_name: String,
    #[serde(rename = "Exe")]
    pub exe: String,
    #[serde(rename = "StartDir")]
    pub start_dir: String,
    pub icon: String,
    #[serde(rename = "ShortcutPath")]
    pub shortcut_path: String,
    #[serde(rename = "LaunchOptions")]
    pub launch_options: String,
    #[serde(rename = "IsHidden")]
    pub is_hidden: u32,
    #[serde(rename = "AllowDesktopConfig")]
    pub allow_desktop_config: u32,
    #[serde(rename = "AllowOverlay")]
    pub allow_overlay: u32,
    #[serde(rename = "OpenVR")]
    pub open_vr: u32,
    #[serde(rename = "Devkit")]
    pub devkit: u32,
    #[serde(rename = "DevkitGameID")]
    pub devkit_game_id: String,
    #[serde(rename = "DevkitOverrideAppID")]
    pub devkit_override_app_id: u32,
    /// Unix timestamp of the last launch, 0 if never launched.
    #[serde(rename = "LastPlayTime")]
    pub last_play_time: u32,
    #[serde(rename = "FlatpakAppID")]
    pub flatpak_app_id: String,
    /// Collections the shortcut belongs to, keyed `"0"`, `"1"`, ...
    pub tags: Section,
}

impl ShortcutRecord {
    /// Create a shortcut with a generated appid and default settings.
    pub fn new(
        name: impl Into<String>,
        exe: impl Into<String>,
        start_dir: impl Into<String>,
    ) -> Self {
        let name = name.into();
        let exe = exe.into();
        let appid = generate_id(&name, &exe);
        Self::with_appid(appid, name, exe, start_dir)
    }

    /// Create a shortcut with an explicit appid and default settings.
    pub fn with_appid(
        appid: u32,
        name: impl Into<String>,
        exe: impl Into<String>,
        start_dir: impl Into<String>,
    ) -> Self {
        Self {
            appid,
            app_name: name.into(),
            exe: exe.into(),
            start_dir: start_dir.into(),
            icon: String::new(),
            shortcut_path: String::new(),
            launch_options: String::new(),
            is_hidden: 0,
            allow_desktop_config: 1,
            allow_overlay: 1,
            open_vr: 0,
            devkit: 0,
            devkit_game_id: String::new(),
            devkit_override_app_id: 0,
            last_play_time: 0,
            flatpak_app_id: String::new(),
            tags: Section::new(),
        }
    }

    /// Build a shortcut from a discovered game.
    pub fn from_candidate(candidate: &ShortcutCandidate) -> Self {
        Self::with_appid(
            candidate.shortcut_id(),
            candidate.name.clone(),
            candidate.exe_string(),
            candidate.start_dir.to_string_lossy(),
        )
    }

    pub fn is_hidden(&self) -> bool {
        self.is_hidden != 0
    }

    /// Collection names in stored order.
    pub fn tag_names(&self) -> impl Iterator<Item = &str> {
        self.tags.values().filter_map(KeyValue::as_str)
    }

    /// Append a collection name under the next free positional key.
    ///
    /// Does nothing if the shortcut is already tagged with `tag`.
    pub fn add_tag(&mut self, tag: impl Into<String>) {
        let tag = tag.into();
        if self.tag_names().any(|existing| existing == tag) {
            return;
        }
        let mut index = self.tags.len();
        while self.tags.contains_key(&index.to_string()) {
            index += 1;
        }
        self.tags.insert(index.to_string(), KeyValue::String(tag));
    }
}

/// A game found by discovery, ready to become a shortcut.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShortcutCandidate {
    pub name: String,
    pub exe_path: PathBuf,
    pub start_dir: PathBuf,
}

impl ShortcutCandidate {
    pub fn new(
        name: impl Into<String>,
        exe_path: impl Into<PathBuf>,
        start_dir: impl Into<PathBuf>,
    ) -> Self {
        Self {
            name: name.into(),
            exe_path: exe_path.into(),
            start_dir: start_dir.into(),
        }
    }

    fn exe_string(&self) -> String {
        self.exe_path.to_string_lossy().into_owned()
    }

    /// The appid Steam will assign to this shortcut.
    pub fn shortcut_id(&self) -> u32 {
        generate_id(&self.name, &self.exe_string())
    }
}
