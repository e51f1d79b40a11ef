//! Steam non-Steam game shortcuts.
//!
//! - `record` - the typed [`ShortcutRecord`] and discovery input
//! - `mapping` - conversion to and from the KeyValues tree
//! - `appid` - deterministic appid derivation

mod appid;
mod mapping;
mod record;

pub use appid::generate_id;
pub use mapping::{from_list, from_section, to_list, to_section};
pub use record::{ShortcutCandidate, ShortcutRecord};
