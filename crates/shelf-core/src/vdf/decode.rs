//! Recursive-descent decoder.
//!
//! The decoder is total: malformed input is turned into the closest sensible
//! tree and each substitution is recorded as a [`Diagnostic`].

use std::borrow::Cow;

use tracing::debug;

use super::cursor::{Cursor, RawStr};
use super::diagnostic::{Diagnostic, DiagnosticKind};
use super::{KeyValue, Section, Tag};
use crate::config::ShelfConfig;
use crate::error::{Result, ShelfError};

/// Result of a diagnostic decode.
#[derive(Debug, Clone, PartialEq)]
pub struct Decoded {
    pub section: Section,
    pub diagnostics: Vec<Diagnostic>,
}

impl Decoded {
    /// Whether the buffer decoded without any substitutions.
    pub fn is_clean(&self) -> bool {
        self.diagnostics.is_empty()
    }

    /// Fail with the first diagnostic, if any.
    pub fn into_strict(self) -> Result<Section> {
        match self.diagnostics.into_iter().next() {
            None => Ok(self.section),
            Some(first) => Err(ShelfError::Malformed {
                offset: first.offset,
                path: first.path,
                kind: first.kind,
            }),
        }
    }
}

/// Decode a buffer into its root section.
///
/// Never fails: truncated integers read as `0`, truncated floats as `0.0`,
/// unterminated strings keep their remaining bytes and unknown tags are read
/// as strings. End of buffer closes every open section.
pub fn decode(bytes: &[u8]) -> Section {
    let decoded = decode_with_diagnostics(bytes);
    if !decoded.is_clean() {
        debug!(
            "Decoded {} bytes with {} substitutions",
            bytes.len(),
            decoded.diagnostics.len()
        );
    }
    decoded.section
}

/// Decode a buffer and report every abnormality found along the way.
///
/// The returned section is identical to what [`decode`] produces.
pub fn decode_with_diagnostics(bytes: &[u8]) -> Decoded {
    let mut decoder = Decoder::new(bytes);
    let section = decoder.parse_section();

    let trailing = decoder.cursor.remaining();
    if trailing > 0 {
        let offset = decoder.cursor.position();
        decoder.report(offset, String::new(), DiagnosticKind::TrailingBytes(trailing));
    }

    Decoded {
        section,
        diagnostics: decoder.diagnostics,
    }
}

/// Decode a buffer, failing on the first abnormality.
pub fn decode_strict(bytes: &[u8]) -> Result<Section> {
    decode_with_diagnostics(bytes).into_strict()
}

struct Decoder<'a> {
    cursor: Cursor<'a>,
    /// Keys of the sections currently open, outermost first.
    path: Vec<String>,
    diagnostics: Vec<Diagnostic>,
}

impl<'a> Decoder<'a> {
    fn new(bytes: &'a [u8]) -> Self {
        Self {
            cursor: Cursor::new(bytes),
            path: Vec::new(),
            diagnostics: Vec::new(),
        }
    }

    fn report(&mut self, offset: usize, path: String, kind: DiagnosticKind) {
        self.diagnostics.push(Diagnostic { offset, path, kind });
    }

    fn path_of(&self, key: &str) -> String {
        if self.path.is_empty() {
            key.to_string()
        } else {
            format!("{}.{}", self.path.join("."), key)
        }
    }

    /// Parse entries until this section's end marker or end of buffer.
    fn parse_section(&mut self) -> Section {
        let mut section = Section::new();

        loop {
            let entry_offset = self.cursor.position();
            let Some(byte) = self.cursor.read_u8() else {
                let path = self.path.join(".");
                self.report(entry_offset, path, DiagnosticKind::MissingEnd);
                break;
            };

            let tag = match Tag::from_byte(byte) {
                Some(Tag::End) => break,
                Some(tag) => tag,
                None => {
                    let path = self.path.join(".");
                    self.report(entry_offset, path, DiagnosticKind::UnknownTag(byte));
                    Tag::String
                }
            };

            let key_offset = self.cursor.position();
            let mut key = self.read_string(key_offset, None);

            if key.is_empty() && tag == Tag::Section {
                key = format!("_subsection_{}", section.len());
                let path = self.path_of(&key);
                self.report(entry_offset, path, DiagnosticKind::SyntheticKey(key.clone()));
            }

            let value = self.parse_value(tag, &key);

            if key.is_empty() {
                let path = self.path_of(&key);
                self.report(entry_offset, path, DiagnosticKind::EmptyKey { tag: byte });
                continue;
            }

            if section.contains_key(&key) {
                let path = self.path_of(&key);
                self.report(entry_offset, path, DiagnosticKind::DuplicateKey);
            }
            section.insert(key, value);
        }

        section
    }

    /// Read the payload for `tag`. The key has already been consumed.
    fn parse_value(&mut self, tag: Tag, key: &str) -> KeyValue {
        let offset = self.cursor.position();
        match tag {
            Tag::Section if self.path.len() >= ShelfConfig::MAX_SECTION_DEPTH => {
                let path = self.path_of(key);
                let limit = ShelfConfig::MAX_SECTION_DEPTH;
                self.report(offset, path, DiagnosticKind::NestingTooDeep { limit });
                self.skip_section();
                KeyValue::Section(Section::new())
            }
            Tag::Section => {
                self.path.push(key.to_string());
                let child = self.parse_section();
                self.path.pop();
                KeyValue::Section(child)
            }
            // End never reaches here; parse_section stops on it.
            Tag::String | Tag::End => KeyValue::String(self.read_string(offset, Some(key))),
            Tag::Int32 => {
                let value = self.cursor.read_u32_le();
                let kind = DiagnosticKind::TruncatedInteger { width: 4 };
                KeyValue::Int32(self.or_default(value, offset, key, kind))
            }
            Tag::Int64 => {
                let value = self.cursor.read_u64_le();
                let kind = DiagnosticKind::TruncatedInteger { width: 8 };
                KeyValue::Int64(self.or_default(value, offset, key, kind))
            }
            Tag::Float32 => {
                let value = self.cursor.read_f32_le();
                let kind = DiagnosticKind::TruncatedFloat;
                KeyValue::Float32(self.or_default(value, offset, key, kind))
            }
        }
    }

    /// Consume a section body without building it, up to and including its
    /// end marker. Iterative, so depth is bounded only by the buffer.
    fn skip_section(&mut self) {
        let mut depth = 1usize;
        while depth > 0 {
            let Some(byte) = self.cursor.read_u8() else {
                return;
            };
            match Tag::from_byte(byte) {
                Some(Tag::End) => depth -= 1,
                Some(Tag::Section) => {
                    self.cursor.read_cstring();
                    depth += 1;
                }
                Some(Tag::Int32) => {
                    self.cursor.read_cstring();
                    self.cursor.read_u32_le();
                }
                Some(Tag::Int64) => {
                    self.cursor.read_cstring();
                    self.cursor.read_u64_le();
                }
                Some(Tag::Float32) => {
                    self.cursor.read_cstring();
                    self.cursor.read_f32_le();
                }
                Some(Tag::String) | None => {
                    self.cursor.read_cstring();
                    self.cursor.read_cstring();
                }
            }
        }
    }

    fn or_default<T: Default>(
        &mut self,
        value: Option<T>,
        offset: usize,
        key: &str,
        kind: DiagnosticKind,
    ) -> T {
        value.unwrap_or_else(|| {
            let path = self.path_of(key);
            self.report(offset, path, kind);
            T::default()
        })
    }

    /// Read a cstring. `key` is the entry key when reading a value, `None`
    /// when reading the key itself.
    fn read_string(&mut self, offset: usize, key: Option<&str>) -> String {
        let RawStr { bytes, terminated } = self.cursor.read_cstring();
        let text = String::from_utf8_lossy(bytes);

        let mut problems = Vec::new();
        if !terminated {
            problems.push(DiagnosticKind::UnterminatedString);
        }
        if matches!(text, Cow::Owned(_)) {
            problems.push(DiagnosticKind::InvalidUtf8);
        }
        if !problems.is_empty() {
            let path = match key {
                Some(key) => self.path_of(key),
                None => self.path_of(&text),
            };
            for kind in problems {
                self.report(offset, path.clone(), kind);
            }
        }

        text.into_owned()
    }
}
