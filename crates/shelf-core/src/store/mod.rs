//! Shortcut storage bound to a `shortcuts.vdf` file.
//!
//! [`ShortcutStore`] owns the in-memory list and is the only component that
//! touches the file: it reads all bytes before decoding and writes the whole
//! buffer after encoding.

pub mod atomic;

use std::path::{Path, PathBuf};

use tracing::{debug, info};

use crate::config::StoreOptions;
use crate::error::Result;
use crate::shortcut::{self, ShortcutCandidate, ShortcutRecord};
use crate::vdf;

pub use atomic::{read_vdf, read_vdf_strict, write_vdf_atomic};

/// Ordered collection of shortcuts persisted to one file.
#[derive(Debug, Clone)]
pub struct ShortcutStore {
    path: PathBuf,
    options: StoreOptions,
    records: Vec<ShortcutRecord>,
}

impl ShortcutStore {
    /// Create an empty store that will save to `path`.
    pub fn new(path: impl Into<PathBuf>, options: StoreOptions) -> Self {
        Self {
            path: path.into(),
            options,
            records: Vec::new(),
        }
    }

    /// Create a store and load `path` if it exists.
    ///
    /// A missing file is not an error; the store starts empty.
    pub fn open(path: impl Into<PathBuf>, options: StoreOptions) -> Result<Self> {
        let mut store = Self::new(path, options);
        if store.path.exists() {
            store.load()?;
        } else {
            info!(
                "No shortcuts file at {}, starting with an empty list",
                store.path.display()
            );
        }
        Ok(store)
    }

    /// Read the file and append its shortcuts to the list.
    pub fn load(&mut self) -> Result<usize> {
        let root = if self.options.strict {
            atomic::read_vdf_strict(&self.path)?
        } else {
            atomic::read_vdf(&self.path)?
        };
        let loaded = shortcut::from_list(&root);
        let count = loaded.len();
        self.records.extend(loaded);
        debug!("Loaded {} shortcuts from {}", count, self.path.display());
        Ok(count)
    }

    /// Encode the list and atomically replace the file.
    pub fn save(&self) -> Result<()> {
        let root = shortcut::to_list(&self.records);
        vdf::validate(&root)?;
        atomic::write_vdf_atomic(&self.path, &root, self.options.keep_backup)?;
        info!(
            "Saved {} shortcuts to {}",
            self.records.len(),
            self.path.display()
        );
        Ok(())
    }

    /// Append a shortcut.
    pub fn add(&mut self, record: ShortcutRecord) {
        self.records.push(record);
    }

    /// Append a shortcut for a discovered game unless one with the same
    /// appid already exists. Returns the appid either way.
    pub fn add_candidate(&mut self, candidate: &ShortcutCandidate) -> u32 {
        let appid = candidate.shortcut_id();
        if self.find(appid).is_none() {
            self.add(ShortcutRecord::from_candidate(candidate));
        } else {
            debug!("Shortcut {} already present for {}", appid, candidate.name);
        }
        appid
    }

    /// Remove the first shortcut with `appid`.
    pub fn remove(&mut self, appid: u32) -> Option<ShortcutRecord> {
        let index = self.records.iter().position(|r| r.appid == appid)?;
        Some(self.records.remove(index))
    }

    pub fn find(&self, appid: u32) -> Option<&ShortcutRecord> {
        self.records.iter().find(|r| r.appid == appid)
    }

    /// Whether any shortcut is displayed under `name`.
    pub fn contains_name(&self, name: &str) -> bool {
        self.records.iter().any(|r| r.app_name == name)
    }

    pub fn clear(&mut self) {
        self.records.clear();
    }

    pub fn records(&self) -> &[ShortcutRecord] {
        &self.records
    }

    pub fn iter(&self) -> std::slice::Iter<'_, ShortcutRecord> {
        self.records.iter()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl<'a> IntoIterator for &'a ShortcutStore {
    type Item = &'a ShortcutRecord;
    type IntoIter = std::slice::Iter<'a, ShortcutRecord>;

    fn into_iter(self) -> Self::IntoIter {
        self.records.iter()
    }
}

impl From<ShortcutStore> for Vec<ShortcutRecord> {
    fn from(store: ShortcutStore) -> Self {
        store.records
    }
}
