//! Encoder for KeyValues trees.

use super::{KeyValue, Section, Tag};

/// Encode a root section.
///
/// The root has no tag or key of its own: the output is its children's
/// encodings followed by a single end marker. Output is deterministic for a
/// given tree since sections keep insertion order.
pub fn encode(root: &Section) -> Vec<u8> {
    let mut writer = Writer::default();
    writer.write_entries(root);
    writer.write_tag(Tag::End);
    writer.into_inner()
}

#[derive(Default)]
struct Writer {
    buf: Vec<u8>,
}

impl Writer {
    fn into_inner(self) -> Vec<u8> {
        self.buf
    }

    fn write_tag(&mut self, tag: Tag) {
        self.buf.push(tag.byte());
    }

    fn write_cstring(&mut self, s: &str) {
        self.buf.extend_from_slice(s.as_bytes());
        self.buf.push(0);
    }

    fn write_entries(&mut self, section: &Section) {
        for (key, value) in section {
            self.write_entry(key, value);
        }
    }

    fn write_entry(&mut self, key: &str, value: &KeyValue) {
        self.write_tag(value.tag());
        self.write_cstring(key);
        match value {
            KeyValue::Section(children) => {
                self.write_entries(children);
                self.write_tag(Tag::End);
            }
            KeyValue::String(s) => self.write_cstring(s),
            KeyValue::Int32(v) => self.buf.extend_from_slice(&v.to_le_bytes()),
            KeyValue::Int64(v) => self.buf.extend_from_slice(&v.to_le_bytes()),
            KeyValue::Float32(v) => self.buf.extend_from_slice(&v.to_le_bytes()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::super::decode;
    use super::*;

    fn single(key: &str, value: KeyValue) -> Section {
        let mut section = Section::new();
        section.insert(key.to_string(), value);
        section
    }

    #[test]
    fn test_encode_single_string() {
        let bytes = encode(&single("name", "test".into()));
        assert_eq!(bytes, b"\x01name\x00test\x00\x08");
        assert_eq!(decode(&bytes), single("name", "test".into()));
    }

    #[test]
    fn test_encode_empty_root() {
        assert_eq!(encode(&Section::new()), vec![0x08]);
    }

    #[test]
    fn test_encode_zero_as_int32() {
        let bytes = encode(&single("zero_int", 0u32.into()));
        assert_eq!(bytes, b"\x02zero_int\x00\x00\x00\x00\x00\x08");
    }

    #[test]
    fn test_encode_large_value_as_int64() {
        let bytes = encode(&single("t", KeyValue::integer(i64::MAX)));
        assert_eq!(bytes[0], Tag::Int64.byte());
        assert_eq!(&bytes[3..11], &(i64::MAX as u64).to_le_bytes());
        assert_eq!(bytes.len(), 1 + 2 + 8 + 1);
    }

    #[test]
    fn test_negative_one_wraps_to_unsigned() {
        let bytes = encode(&single("n", KeyValue::integer(-1)));
        assert_eq!(bytes, b"\x02n\x00\xFF\xFF\xFF\xFF\x08");
        assert_eq!(decode(&bytes)["n"].as_u64(), Some(4_294_967_295));
    }

    #[test]
    fn test_encode_float() {
        let bytes = encode(&single("rating", 4.5f32.into()));
        let mut expected = b"\x03rating\x00".to_vec();
        expected.extend_from_slice(&4.5f32.to_le_bytes());
        expected.push(0x08);
        assert_eq!(bytes, expected);
    }

    #[test]
    fn test_empty_nested_section_roundtrips() {
        let root = single("tags", Section::new().into());
        let bytes = encode(&root);
        assert_eq!(bytes, b"\x00tags\x00\x08\x08");

        let decoded = decode(&bytes);
        assert_eq!(decoded["tags"], KeyValue::Section(Section::new()));
    }

    #[test]
    fn test_roundtrip_preserves_order_and_types() {
        let mut tags = Section::new();
        tags.insert("0".into(), "Favorites".into());
        tags.insert("1".into(), "Platformer".into());

        let mut game = Section::new();
        game.insert("appid".into(), 2_789_567_361u32.into());
        game.insert("AppName".into(), "isaac-ng".into());
        game.insert("LastPlayTime".into(), KeyValue::Int64(1 << 40));
        game.insert("Rating".into(), 0.25f32.into());
        game.insert("tags".into(), tags.into());

        let mut root = Section::new();
        root.insert("shortcuts".into(), single("0", game.into()).into());
        root.insert("zz".into(), "last".into());

        let decoded = decode(&encode(&root));
        assert_eq!(decoded, root);
        let order: Vec<_> = decoded.keys().collect();
        assert_eq!(order, vec!["shortcuts", "zz"]);
    }
}
