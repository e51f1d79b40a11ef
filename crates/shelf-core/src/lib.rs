//! Shelf Core - binary VDF codec and Steam shortcut storage.
//!
//! Steam records user-added ("non-Steam") games in a binary KeyValues file,
//! `shortcuts.vdf`. This crate decodes that format into an ordered tree,
//! encodes trees back byte-for-byte, maps entries to typed
//! [`ShortcutRecord`]s and persists them atomically.
//!
//! # Example
//!
//! ```rust,no_run
//! use shelf_core::{ShortcutRecord, ShortcutStore, StoreOptions};
//!
//! fn main() -> shelf_core::Result<()> {
//!     let root = shelf_core::platform::steam_root()?;
//!     let path = shelf_core::platform::shortcuts_path(&root, 12345678);
//!
//!     let mut store = ShortcutStore::open(path, StoreOptions::default())?;
//!     store.add(ShortcutRecord::new("Celeste", "/games/celeste/Celeste", "/games/celeste"));
//!     store.save()?;
//!     Ok(())
//! }
//! ```

pub mod config;
pub mod error;
pub mod platform;
pub mod shortcut;
pub mod store;
pub mod vdf;

// Re-export commonly used types
pub use config::{PathsConfig, ShelfConfig, StoreOptions};
pub use error::{Result, ShelfError};
pub use shortcut::{generate_id, ShortcutCandidate, ShortcutRecord};
pub use store::ShortcutStore;
pub use vdf::{decode, decode_strict, decode_with_diagnostics, encode, KeyValue, Section};
