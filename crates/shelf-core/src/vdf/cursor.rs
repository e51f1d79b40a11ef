//! Forward-only reader over a borrowed byte buffer.
//!
//! Every read either succeeds or reports exhaustion; the cursor never panics
//! and never moves backwards.

/// A NUL-terminated string as it appears in the buffer.
#[derive(Debug, Clone, Copy)]
pub(crate) struct RawStr<'a> {
    pub bytes: &'a [u8],
    /// `false` when the buffer ended before a `0x00` was found.
    pub terminated: bool,
}

pub(crate) struct Cursor<'a> {
    data: &'a [u8],
    pos: usize,
}

impl<'a> Cursor<'a> {
    pub fn new(data: &'a [u8]) -> Self {
        Self { data, pos: 0 }
    }

    pub fn position(&self) -> usize {
        self.pos
    }

    pub fn remaining(&self) -> usize {
        self.data.len() - self.pos
    }

    pub fn read_u8(&mut self) -> Option<u8> {
        let byte = *self.data.get(self.pos)?;
        self.pos += 1;
        Some(byte)
    }

    /// Read up to the next `0x00`, consuming the terminator.
    ///
    /// Without a terminator the rest of the buffer is returned and the
    /// cursor moves to the end.
    pub fn read_cstring(&mut self) -> RawStr<'a> {
        let data = self.data;
        let rest = &data[self.pos..];
        match rest.iter().position(|&b| b == 0) {
            Some(nul) => {
                self.pos += nul + 1;
                RawStr {
                    bytes: &rest[..nul],
                    terminated: true,
                }
            }
            None => {
                self.pos = self.data.len();
                RawStr {
                    bytes: rest,
                    terminated: false,
                }
            }
        }
    }

    /// Take exactly `N` bytes. A short read consumes what is left and
    /// returns `None`.
    // Deliberately not a zero-width read: a cut number means the stream is
    // cut, so parking at the end closes every open section.
    fn read_array<const N: usize>(&mut self) -> Option<[u8; N]> {
        if self.remaining() < N {
            self.pos = self.data.len();
            return None;
        }
        let mut out = [0u8; N];
        out.copy_from_slice(&self.data[self.pos..self.pos + N]);
        self.pos += N;
        Some(out)
    }

    pub fn read_u32_le(&mut self) -> Option<u32> {
        self.read_array::<4>().map(u32::from_le_bytes)
    }

    pub fn read_u64_le(&mut self) -> Option<u64> {
        self.read_array::<8>().map(u64::from_le_bytes)
    }

    pub fn read_f32_le(&mut self) -> Option<f32> {
        self.read_array::<4>().map(f32::from_le_bytes)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_read_cstring_terminated() {
        let mut cursor = Cursor::new(b"abc\0rest");
        let s = cursor.read_cstring();
        assert_eq!(s.bytes, b"abc");
        assert!(s.terminated);
        assert_eq!(cursor.position(), 4);
    }

    #[test]
    fn test_read_cstring_unterminated_moves_to_end() {
        let mut cursor = Cursor::new(b"partial");
        let s = cursor.read_cstring();
        assert_eq!(s.bytes, b"partial");
        assert!(!s.terminated);
        assert_eq!(cursor.remaining(), 0);
    }

    #[test]
    fn test_read_integers_little_endian() {
        let mut cursor = Cursor::new(&[0xB8, 0x01, 0x00, 0x00, 1, 0, 0, 0, 0, 0, 0, 0x80]);
        assert_eq!(cursor.read_u32_le(), Some(440));
        assert_eq!(cursor.read_u64_le(), Some(0x8000_0000_0000_0001));
        assert_eq!(cursor.remaining(), 0);
    }

    #[test]
    fn test_short_read_consumes_rest() {
        let mut cursor = Cursor::new(&[1, 2]);
        assert_eq!(cursor.read_u32_le(), None);
        assert_eq!(cursor.remaining(), 0);
        assert_eq!(cursor.read_u8(), None);
    }

    #[test]
    fn test_read_f32() {
        let bytes = 4.5f32.to_le_bytes();
        let mut cursor = Cursor::new(&bytes);
        assert_eq!(cursor.read_f32_le(), Some(4.5));
    }
}
