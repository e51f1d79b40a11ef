/// Type marker preceding every entry in the stream.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum Tag {
    Section = 0x00,
    String = 0x01,
    Int32 = 0x02,
    Float32 = 0x03,
    Int64 = 0x07,
    End = 0x08,
}

impl Tag {
    /// Look up a tag byte. Returns `None` for bytes outside the known set.
    pub fn from_byte(byte: u8) -> Option<Self> {
        match byte {
            0x00 => Some(Tag::Section),
            0x01 => Some(Tag::String),
            0x02 => Some(Tag::Int32),
            0x03 => Some(Tag::Float32),
            0x07 => Some(Tag::Int64),
            0x08 => Some(Tag::End),
            _ => None,
        }
    }

    pub const fn byte(self) -> u8 {
        self as u8
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Tag::Section => "section",
            Tag::String => "string",
            Tag::Int32 => "int32",
            Tag::Float32 => "float32",
            Tag::Int64 => "int64",
            Tag::End => "end",
        }
    }
}

impl std::fmt::Display for Tag {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tag_roundtrip() {
        for tag in [
            Tag::Section,
            Tag::String,
            Tag::Int32,
            Tag::Float32,
            Tag::Int64,
            Tag::End,
        ] {
            assert_eq!(Tag::from_byte(tag.byte()), Some(tag));
        }
    }

    #[test]
    fn test_unknown_bytes() {
        for byte in [0x04, 0x05, 0x06, 0x09, 0xFF] {
            assert_eq!(Tag::from_byte(byte), None);
        }
    }
}
