//! Structured reports of the substitutions made by the permissive decoder.

use std::fmt;

/// What went wrong at a given point of the stream.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DiagnosticKind {
    /// Fewer than `width` bytes remained for an integer payload; `0` was used.
    TruncatedInteger { width: usize },
    /// Fewer than four bytes remained for a float payload; `0.0` was used.
    TruncatedFloat,
    /// The buffer ended inside a string; the remaining bytes were used.
    UnterminatedString,
    /// A string held invalid UTF-8; replacement characters were substituted.
    InvalidUtf8,
    /// Unknown tag byte; the entry was read as a string.
    UnknownTag(u8),
    /// A non-section entry had an empty key and was dropped.
    EmptyKey { tag: u8 },
    /// A section had an empty key and was stored under this placeholder.
    SyntheticKey(String),
    /// A key appeared twice in one section; the later value won.
    DuplicateKey,
    /// The buffer ended before this section's `0x08` marker.
    MissingEnd,
    /// Bytes followed the root section's end marker and were ignored.
    TrailingBytes(usize),
    /// A section opened below `limit` levels; its contents were skipped and
    /// it was stored empty.
    NestingTooDeep { limit: usize },
}

impl fmt::Display for DiagnosticKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DiagnosticKind::TruncatedInteger { width } => {
                write!(f, "{}-byte integer truncated, read as 0", width)
            }
            DiagnosticKind::TruncatedFloat => write!(f, "float truncated, read as 0.0"),
            DiagnosticKind::UnterminatedString => {
                write!(f, "string is missing its NUL terminator")
            }
            DiagnosticKind::InvalidUtf8 => write!(f, "string is not valid UTF-8"),
            DiagnosticKind::UnknownTag(byte) => {
                write!(f, "unknown type tag {:#04x}, read as string", byte)
            }
            DiagnosticKind::EmptyKey { tag } => {
                write!(f, "entry with tag {:#04x} has an empty key and was dropped", tag)
            }
            DiagnosticKind::SyntheticKey(key) => {
                write!(f, "section with empty key stored as {:?}", key)
            }
            DiagnosticKind::DuplicateKey => write!(f, "duplicate key, last value kept"),
            DiagnosticKind::MissingEnd => write!(f, "section ended without an end marker"),
            DiagnosticKind::TrailingBytes(count) => {
                write!(f, "{} bytes after the final end marker", count)
            }
            DiagnosticKind::NestingTooDeep { limit } => {
                write!(f, "section nested deeper than {} levels, contents skipped", limit)
            }
        }
    }
}

/// One abnormality found while decoding.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Diagnostic {
    /// Byte offset where the offending item starts.
    pub offset: usize,
    /// Dotted key path, e.g. `shortcuts.0.AppName`.
    pub path: String,
    pub kind: DiagnosticKind,
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "offset {} ({}): {}", self.offset, self.path, self.kind)
    }
}
