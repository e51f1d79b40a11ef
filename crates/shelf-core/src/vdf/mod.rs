//! Binary KeyValues ("binary VDF") codec.
//!
//! The format is a recursive, type-tagged byte stream with no header:
//!
//! | tag    | meaning        | payload                                   |
//! |--------|----------------|-------------------------------------------|
//! | `0x00` | section start  | cstring key, children, terminated by `0x08` |
//! | `0x01` | string         | cstring key, cstring value                |
//! | `0x02` | int32          | cstring key, 4 bytes little-endian        |
//! | `0x03` | float32        | cstring key, 4 bytes little-endian IEEE-754 |
//! | `0x07` | int64          | cstring key, 8 bytes little-endian        |
//! | `0x08` | end of section | none                                      |
//!
//! A whole file is the concatenation of its top-level entries followed by a
//! single `0x08`.
//!
//! Decoding is permissive by default: truncated or unknown data degrades to
//! documented defaults instead of failing. [`decode_with_diagnostics`] and
//! [`decode_strict`] expose every substitution for callers that care.

mod cursor;
mod decode;
mod diagnostic;
mod encode;
mod tag;
mod validate;

pub use decode::{decode, decode_strict, decode_with_diagnostics, Decoded};
pub use diagnostic::{Diagnostic, DiagnosticKind};
pub use encode::encode;
pub use tag::Tag;
pub use validate::validate;

use indexmap::IndexMap;
use serde::Serialize;
use std::fmt;

/// An ordered mapping of keys to values.
///
/// Insertion order is significant and preserved when re-encoding. Inserting
/// an existing key replaces its value in place.
pub type Section = IndexMap<String, KeyValue>;

/// A single value in a KeyValues tree.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum KeyValue {
    Section(Section),
    String(String),
    /// Raw 32-bit payload. Negative integers are stored in their wrapped
    /// two's-complement form.
    Int32(u32),
    Int64(u64),
    Float32(f32),
}

impl KeyValue {
    /// Build an integer value, choosing the wire width by range.
    ///
    /// Values in `-2^31..=2^32-1` become [`KeyValue::Int32`] holding the low
    /// 32 bits, so `-1` is stored as `0xFFFF_FFFF`. Everything else becomes
    /// [`KeyValue::Int64`] holding the low 64 bits.
    pub fn integer(value: impl Into<i128>) -> Self {
        let value = value.into();
        if (i128::from(i32::MIN)..=i128::from(u32::MAX)).contains(&value) {
            KeyValue::Int32((value & 0xFFFF_FFFF) as u32)
        } else {
            KeyValue::Int64((value & 0xFFFF_FFFF_FFFF_FFFF) as u64)
        }
    }

    /// Tag byte this value is written with.
    pub fn tag(&self) -> Tag {
        match self {
            KeyValue::Section(_) => Tag::Section,
            KeyValue::String(_) => Tag::String,
            KeyValue::Int32(_) => Tag::Int32,
            KeyValue::Int64(_) => Tag::Int64,
            KeyValue::Float32(_) => Tag::Float32,
        }
    }

    pub fn as_section(&self) -> Option<&Section> {
        match self {
            KeyValue::Section(section) => Some(section),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            KeyValue::String(s) => Some(s),
            _ => None,
        }
    }

    /// Integer value if it fits in 32 bits.
    pub fn as_u32(&self) -> Option<u32> {
        match *self {
            KeyValue::Int32(v) => Some(v),
            KeyValue::Int64(v) => u32::try_from(v).ok(),
            _ => None,
        }
    }

    pub fn as_u64(&self) -> Option<u64> {
        match *self {
            KeyValue::Int32(v) => Some(u64::from(v)),
            KeyValue::Int64(v) => Some(v),
            _ => None,
        }
    }

    pub fn as_f32(&self) -> Option<f32> {
        match *self {
            KeyValue::Float32(v) => Some(v),
            _ => None,
        }
    }

    pub fn is_section(&self) -> bool {
        matches!(self, KeyValue::Section(_))
    }
}

impl fmt::Display for KeyValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            KeyValue::Section(section) => write!(f, "{{{} entries}}", section.len()),
            KeyValue::String(s) => f.write_str(s),
            KeyValue::Int32(v) => write!(f, "{}", v),
            KeyValue::Int64(v) => write!(f, "{}", v),
            KeyValue::Float32(v) => write!(f, "{}", v),
        }
    }
}

impl From<Section> for KeyValue {
    fn from(section: Section) -> Self {
        KeyValue::Section(section)
    }
}

impl From<String> for KeyValue {
    fn from(s: String) -> Self {
        KeyValue::String(s)
    }
}

impl From<&str> for KeyValue {
    fn from(s: &str) -> Self {
        KeyValue::String(s.to_string())
    }
}

impl From<f32> for KeyValue {
    fn from(v: f32) -> Self {
        KeyValue::Float32(v)
    }
}

macro_rules! impl_from_integer {
    ($($ty:ty),*) => {
        $(
            impl From<$ty> for KeyValue {
                fn from(v: $ty) -> Self {
                    KeyValue::integer(v)
                }
            }
        )*
    };
}

impl_from_integer!(i32, u32, i64, u64);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_integer_width_selection() {
        assert_eq!(KeyValue::integer(0), KeyValue::Int32(0));
        assert_eq!(KeyValue::integer(u32::MAX), KeyValue::Int32(u32::MAX));
        assert_eq!(KeyValue::integer(i32::MIN), KeyValue::Int32(0x8000_0000));
        assert_eq!(KeyValue::integer(-1i64), KeyValue::Int32(0xFFFF_FFFF));
        assert_eq!(
            KeyValue::integer(i64::from(u32::MAX) + 1),
            KeyValue::Int64(1 << 32)
        );
        assert_eq!(
            KeyValue::integer(i64::from(i32::MIN) - 1),
            KeyValue::Int64(0xFFFF_FFFF_7FFF_FFFF)
        );
        assert_eq!(KeyValue::integer(i64::MAX), KeyValue::Int64(i64::MAX as u64));
    }

    #[test]
    fn test_accessors() {
        assert_eq!(KeyValue::Int64(7).as_u32(), Some(7));
        assert_eq!(KeyValue::Int64(u64::MAX).as_u32(), None);
        assert_eq!(KeyValue::from("x").as_str(), Some("x"));
        assert_eq!(KeyValue::from(1.5f32).as_f32(), Some(1.5));
        assert!(KeyValue::from(Section::new()).is_section());
        assert_eq!(KeyValue::from("x").as_u64(), None);
    }

    #[test]
    fn test_display() {
        assert_eq!(KeyValue::from(42u32).to_string(), "42");
        assert_eq!(KeyValue::from("Favorites").to_string(), "Favorites");
        assert_eq!(KeyValue::from(Section::new()).to_string(), "{0 entries}");
    }

    #[test]
    fn test_serializes_untagged() {
        let mut section = Section::new();
        section.insert("AppName".into(), "Celeste".into());
        section.insert("appid".into(), 3_000_000_000u32.into());
        let json = serde_json::to_string(&KeyValue::Section(section)).unwrap();
        assert_eq!(json, r#"{"AppName":"Celeste","appid":3000000000}"#);
    }
}
