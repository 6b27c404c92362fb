//! Byte-order codec for 32-bit message words.
//!
//! Every MD32 algorithm fixes one byte order for its message words and for the
//! trailing length field (big-endian for SHA-1, SHA-2 and SM3, little-endian
//! for MD5). The order is a property of the algorithm, never of the host, so
//! both implementations below produce the same bytes on any machine.
//!
//! When the configured order matches the host order the word is moved with a
//! plain native load/store; otherwise the portable shift-based conversion is
//! used. The two paths are interchangeable and are checked against each other
//! in the tests.

/// Conversion between 32-bit words and their 4-byte encoding.
pub trait ByteOrder {
    /// Whether the high half of the 64-bit bit length is written first.
    const LENGTH_HIGH_FIRST: bool;

    /// Compose a word from 4 bytes in this order.
    fn load(bytes: [u8; 4]) -> u32;

    /// Encode a word as 4 bytes in this order.
    fn store(word: u32) -> [u8; 4];

    /// Read the word at `*cursor` and advance the cursor by 4.
    ///
    /// Panics if fewer than 4 bytes remain after `*cursor`.
    #[inline(always)]
    fn read_word(buf: &[u8], cursor: &mut usize) -> u32 {
        let at = *cursor;
        let word = Self::load([buf[at], buf[at + 1], buf[at + 2], buf[at + 3]]);
        *cursor = at + 4;
        word
    }

    /// Write `word` at `*cursor` and advance the cursor by 4.
    ///
    /// Panics if fewer than 4 bytes remain after `*cursor`.
    #[inline(always)]
    fn write_word(word: u32, buf: &mut [u8], cursor: &mut usize) {
        let at = *cursor;
        buf[at..at + 4].copy_from_slice(&Self::store(word));
        *cursor = at + 4;
    }

    /// Decode `words.len()` consecutive words from the front of `src`.
    #[inline(always)]
    fn load_words(src: &[u8], words: &mut [u32]) {
        let mut cursor = 0;
        for w in words.iter_mut() {
            *w = Self::read_word(src, &mut cursor);
        }
    }

    /// Encode `words` into the front of `out`.
    #[inline(always)]
    fn store_words(words: &[u32], out: &mut [u8]) {
        let mut cursor = 0;
        for &w in words {
            Self::write_word(w, out, &mut cursor);
        }
    }

    /// Write the 64-bit bit length `(hi, lo)` into the 8 bytes at `*cursor`.
    #[inline]
    fn write_bit_length(hi: u32, lo: u32, buf: &mut [u8], cursor: &mut usize) {
        if Self::LENGTH_HIGH_FIRST {
            Self::write_word(hi, buf, cursor);
            Self::write_word(lo, buf, cursor);
        } else {
            Self::write_word(lo, buf, cursor);
            Self::write_word(hi, buf, cursor);
        }
    }
}

/// Most significant byte first (SHA-1, SHA-2, SM3).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BigEndian {}

/// Least significant byte first (MD5).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LittleEndian {}

impl ByteOrder for BigEndian {
    const LENGTH_HIGH_FIRST: bool = true;

    #[inline(always)]
    fn load(bytes: [u8; 4]) -> u32 {
        if cfg!(target_endian = "big") {
            u32::from_ne_bytes(bytes)
        } else {
            portable::load_be(bytes)
        }
    }

    #[inline(always)]
    fn store(word: u32) -> [u8; 4] {
        if cfg!(target_endian = "big") {
            word.to_ne_bytes()
        } else {
            portable::store_be(word)
        }
    }
}

impl ByteOrder for LittleEndian {
    const LENGTH_HIGH_FIRST: bool = false;

    #[inline(always)]
    fn load(bytes: [u8; 4]) -> u32 {
        if cfg!(target_endian = "little") {
            u32::from_ne_bytes(bytes)
        } else {
            portable::load_le(bytes)
        }
    }

    #[inline(always)]
    fn store(word: u32) -> [u8; 4] {
        if cfg!(target_endian = "little") {
            word.to_ne_bytes()
        } else {
            portable::store_le(word)
        }
    }
}

/// Shift-based conversions that never look at the host byte order.
pub(crate) mod portable {
    #[inline(always)]
    pub(crate) fn load_be(b: [u8; 4]) -> u32 {
        (u32::from(b[0]) << 24) | (u32::from(b[1]) << 16) | (u32::from(b[2]) << 8) | u32::from(b[3])
    }

    #[inline(always)]
    pub(crate) fn load_le(b: [u8; 4]) -> u32 {
        u32::from(b[0]) | (u32::from(b[1]) << 8) | (u32::from(b[2]) << 16) | (u32::from(b[3]) << 24)
    }

    #[inline(always)]
    pub(crate) fn store_be(w: u32) -> [u8; 4] {
        [(w >> 24) as u8, (w >> 16) as u8, (w >> 8) as u8, w as u8]
    }

    #[inline(always)]
    pub(crate) fn store_le(w: u32) -> [u8; 4] {
        [w as u8, (w >> 8) as u8, (w >> 16) as u8, (w >> 24) as u8]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_big_endian_word_layout() {
        let mut buf = [0u8; 4];
        let mut cursor = 0;
        BigEndian::write_word(0x0102_0304, &mut buf, &mut cursor);
        assert_eq!(buf, [0x01, 0x02, 0x03, 0x04]);
        assert_eq!(cursor, 4);

        let mut cursor = 0;
        assert_eq!(BigEndian::read_word(&buf, &mut cursor), 0x0102_0304);
        assert_eq!(cursor, 4);
    }

    #[test]
    fn test_little_endian_word_layout() {
        let mut buf = [0u8; 4];
        let mut cursor = 0;
        LittleEndian::write_word(0x0102_0304, &mut buf, &mut cursor);
        assert_eq!(buf, [0x04, 0x03, 0x02, 0x01]);

        let mut cursor = 0;
        assert_eq!(LittleEndian::read_word(&buf, &mut cursor), 0x0102_0304);
    }

    #[test]
    fn test_native_and_portable_paths_agree() {
        let samples = [0u32, 1, 0x80, 0xdead_beef, 0x0102_0304, u32::MAX, 0x8000_0001];
        for &w in &samples {
            assert_eq!(BigEndian::store(w), portable::store_be(w));
            assert_eq!(LittleEndian::store(w), portable::store_le(w));
            assert_eq!(BigEndian::store(w), w.to_be_bytes());
            assert_eq!(LittleEndian::store(w), w.to_le_bytes());

            let be = w.to_be_bytes();
            let le = w.to_le_bytes();
            assert_eq!(BigEndian::load(be), portable::load_be(be));
            assert_eq!(LittleEndian::load(le), portable::load_le(le));
            assert_eq!(BigEndian::load(be), w);
            assert_eq!(LittleEndian::load(le), w);
        }
    }

    #[test]
    fn test_bulk_words() {
        let bytes: Vec<u8> = (0u8..16).collect();
        let mut words = [0u32; 4];
        BigEndian::load_words(&bytes, &mut words);
        assert_eq!(words, [0x0001_0203, 0x0405_0607, 0x0809_0a0b, 0x0c0d_0e0f]);

        LittleEndian::load_words(&bytes, &mut words);
        assert_eq!(words, [0x0302_0100, 0x0706_0504, 0x0b0a_0908, 0x0f0e_0d0c]);

        let mut out = [0u8; 16];
        LittleEndian::store_words(&words, &mut out);
        assert_eq!(&out[..], &bytes[..]);
    }

    #[test]
    fn test_bit_length_half_order() {
        let mut buf = [0u8; 8];
        let mut cursor = 0;
        BigEndian::write_bit_length(0x0000_0001, 0x0000_0018, &mut buf, &mut cursor);
        assert_eq!(buf, [0, 0, 0, 1, 0, 0, 0, 0x18]);
        assert_eq!(cursor, 8);

        let mut buf = [0u8; 8];
        let mut cursor = 0;
        LittleEndian::write_bit_length(0x0000_0001, 0x0000_0018, &mut buf, &mut cursor);
        assert_eq!(buf, [0x18, 0, 0, 0, 1, 0, 0, 0]);
    }

    #[test]
    #[should_panic]
    fn test_read_past_end_panics() {
        let buf = [0u8; 6];
        let mut cursor = 4;
        BigEndian::read_word(&buf, &mut cursor);
    }
}
