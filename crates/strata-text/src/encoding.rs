//! Character encodings for [`StringBuffer`](crate::StringBuffer).
//!
//! An [`Encoding`] is a pair of pure functions between `char` and a byte
//! stream. Both sides work through closures so a buffer can feed bytes
//! straight into arena memory without an intermediate allocation.

/// Byte encoding policy.
pub trait Encoding {
    /// Emit the bytes of `ch` to `sink`.
    fn encode<F: FnMut(u8)>(ch: char, sink: F);

    /// Read one character from `source`.
    ///
    /// Returns `None` only if `source` is exhausted before the first
    /// byte. A malformed or truncated sequence decodes to
    /// [`char::REPLACEMENT_CHARACTER`].
    fn decode<F: FnMut() -> Option<u8>>(source: F) -> Option<char>;
}

/// UTF-8 as specified by RFC 3629.
#[derive(Clone, Copy, Debug, Default)]
pub struct Utf8;

impl Utf8 {
    fn continuation(byte: Option<u8>) -> Option<u32> {
        match byte {
            Some(b) if b & 0xC0 == 0x80 => Some(u32::from(b & 0x3F)),
            _ => None,
        }
    }
}

impl Encoding for Utf8 {
    fn encode<F: FnMut(u8)>(ch: char, mut sink: F) {
        let mut buf = [0u8; 4];
        for &b in ch.encode_utf8(&mut buf).as_bytes() {
            sink(b);
        }
    }

    fn decode<F: FnMut() -> Option<u8>>(mut source: F) -> Option<char> {
        let first = source()?;
        let (extra, init, min) = match first {
            0x00..=0x7F => return Some(char::from(first)),
            0xC2..=0xDF => (1, u32::from(first & 0x1F), 0x80),
            0xE0..=0xEF => (2, u32::from(first & 0x0F), 0x800),
            0xF0..=0xF4 => (3, u32::from(first & 0x07), 0x1_0000),
            // Stray continuation byte, overlong lead (C0/C1) or > U+10FFFF.
            _ => return Some(char::REPLACEMENT_CHARACTER),
        };
        let mut code = init;
        for _ in 0..extra {
            match Self::continuation(source()) {
                Some(bits) => code = (code << 6) | bits,
                None => return Some(char::REPLACEMENT_CHARACTER),
            }
        }
        if code < min {
            return Some(char::REPLACEMENT_CHARACTER);
        }
        // Rejects surrogates and anything above U+10FFFF.
        Some(char::from_u32(code).unwrap_or(char::REPLACEMENT_CHARACTER))
    }
}

/// 7-bit ASCII. Characters outside the range encode as `?`.
#[derive(Clone, Copy, Debug, Default)]
pub struct Ascii;

impl Encoding for Ascii {
    fn encode<F: FnMut(u8)>(ch: char, mut sink: F) {
        if ch.is_ascii() {
            sink(ch as u8);
        } else {
            sink(b'?');
        }
    }

    fn decode<F: FnMut() -> Option<u8>>(mut source: F) -> Option<char> {
        let byte = source()?;
        if byte.is_ascii() {
            Some(char::from(byte))
        } else {
            Some(char::REPLACEMENT_CHARACTER)
        }
    }
}
