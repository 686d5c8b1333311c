//! Fixed-capacity text buffer over arena memory.
//!
//! A [`StringBuffer`] claims one region from a [`StackAllocator`] at
//! construction and writes encoded text into it through a cursor, the way
//! a stream would. It never grows: bytes that do not fit are dropped and
//! the buffer remembers that it was truncated. The region is released by
//! whatever marker or rollback scope the caller used around the buffer.

use std::io::SeekFrom;
use std::marker::PhantomData;

use strata_core::{Region, StackAllocator};
use strata_sid::StringId;

use crate::encoding::{Encoding, Utf8};
use crate::error::TextError;

/// Most fractional digits [`StringBuffer::format_f32`] prints.
pub const MAX_FLOAT_PRECISION: u8 = 9;

/// Encoded text in a fixed arena region.
///
/// `len` is the high-water mark of written bytes; `position` is where
/// the next write or [`take`](StringBuffer::take) happens.
pub struct StringBuffer<'a, A: StackAllocator + ?Sized, E: Encoding = Utf8> {
    alloc: &'a mut A,
    region: Region,
    position: u32,
    len: u32,
    truncated: bool,
    _encoding: PhantomData<E>,
}

impl<'a, A: StackAllocator + ?Sized, E: Encoding> StringBuffer<'a, A, E> {
    /// Claim `capacity` bytes from `alloc`.
    pub fn new(alloc: &'a mut A, capacity: u32) -> Result<Self, TextError> {
        let remaining = alloc.remaining();
        let region = alloc.alloc(capacity).ok_or(TextError::OutOfSpace {
            requested: capacity,
            remaining,
        })?;
        Ok(Self {
            alloc,
            region,
            position: 0,
            len: 0,
            truncated: false,
            _encoding: PhantomData,
        })
    }

    // ── Input ───────────────────────────────────────────────────

    /// Write one raw byte at the cursor. Dropped if the buffer is full.
    pub fn put_byte(&mut self, byte: u8) -> &mut Self {
        if self.position < self.region.len() {
            let at = self.position as usize;
            self.alloc.slice_mut(self.region)[at] = byte;
            self.position += 1;
            self.len = self.len.max(self.position);
        } else {
            self.truncated = true;
        }
        self
    }

    /// Encode `ch` at the cursor.
    ///
    /// A partially fitting character is cut mid-sequence, as with any
    /// other overflow.
    pub fn put_char(&mut self, ch: char) -> &mut Self {
        E::encode(ch, |b| {
            self.put_byte(b);
        });
        self
    }

    /// Encode every character of `text`.
    pub fn put_str(&mut self, text: &str) -> &mut Self {
        for ch in text.chars() {
            self.put_char(ch);
        }
        self
    }

    /// Write `true` or `false`.
    pub fn format_bool(&mut self, value: bool) -> &mut Self {
        self.put_str(if value { "true" } else { "false" })
    }

    /// Write `value` in decimal, with a leading `-` when negative.
    pub fn format_i32(&mut self, value: i32) -> &mut Self {
        if value < 0 {
            self.put_char('-');
        }
        self.put_digits(u64::from(value.unsigned_abs()), 0)
    }

    /// Write `value` as `<integer part>.<precision digits>`.
    ///
    /// The fraction is truncated, not rounded, and `precision` is capped
    /// at [`MAX_FLOAT_PRECISION`]. An integer part above `u64::MAX`
    /// saturates. Non-finite values are written as `NaN`, `inf` or `-inf`.
    pub fn format_f32(&mut self, value: f32, precision: u8) -> &mut Self {
        if value.is_nan() {
            return self.put_str("NaN");
        }
        if value.is_infinite() {
            return self.put_str(if value > 0.0 { "inf" } else { "-inf" });
        }
        if value < 0.0 {
            self.put_char('-');
        }
        let magnitude = value.abs();
        self.put_digits(magnitude.trunc() as u64, 0);
        self.put_char('.');

        let precision = precision.min(MAX_FLOAT_PRECISION);
        if precision == 0 {
            return self;
        }
        let scale = 10u64.pow(u32::from(precision));
        let digits = (f64::from(magnitude.fract()) * scale as f64) as u64;
        self.put_digits(digits, usize::from(precision))
    }

    /// Decimal digits of `value`, zero-padded to at least `width`.
    fn put_digits(&mut self, value: u64, width: usize) -> &mut Self {
        let mut digits = [0u8; 20];
        let mut count = 0;
        let mut rest = value;
        loop {
            digits[count] = b'0' + (rest % 10) as u8;
            count += 1;
            rest /= 10;
            if rest == 0 {
                break;
            }
        }
        for _ in count..width {
            self.put_char('0');
        }
        for &d in digits[..count].iter().rev() {
            self.put_char(char::from(d));
        }
        self
    }

    // ── Cursor ──────────────────────────────────────────────────

    /// Current cursor position in bytes.
    pub fn tell(&self) -> u32 {
        self.position
    }

    /// Move the cursor. `End` is relative to the capacity. The result is
    /// clamped to `[0, capacity]`.
    pub fn seek(&mut self, pos: SeekFrom) -> u32 {
        let capacity = i64::from(self.capacity());
        let target = match pos {
            SeekFrom::Start(offset) => i64::try_from(offset).unwrap_or(i64::MAX),
            SeekFrom::Current(delta) => i64::from(self.position).saturating_add(delta),
            SeekFrom::End(delta) => capacity.saturating_add(delta),
        };
        self.position = target.clamp(0, capacity) as u32;
        self.position
    }

    /// Read the written byte at the cursor and advance.
    ///
    /// `None` at or past the end of the written text.
    pub fn take(&mut self) -> Option<u8> {
        if self.position >= self.len {
            return None;
        }
        let byte = self.as_bytes()[self.position as usize];
        self.position += 1;
        Some(byte)
    }

    /// Forget the contents. The region stays claimed.
    pub fn clear(&mut self) {
        self.position = 0;
        self.len = 0;
        self.truncated = false;
    }

    // ── Output ──────────────────────────────────────────────────

    /// The written bytes, `[0, len)`.
    pub fn as_bytes(&self) -> &[u8] {
        &self.alloc.slice(self.region)[..self.len as usize]
    }

    /// Decode the written bytes.
    pub fn chars(&self) -> Chars<'_, E> {
        Chars {
            bytes: self.as_bytes(),
            pos: 0,
            _encoding: PhantomData,
        }
    }

    /// The written bytes as text.
    pub fn as_str(&self) -> Result<&str, TextError> {
        std::str::from_utf8(self.as_bytes()).map_err(|_| TextError::InvalidUtf8)
    }

    /// Intern the written text.
    pub fn intern(&self) -> Result<StringId, TextError> {
        self.as_str().map(strata_sid::intern)
    }

    /// Number of bytes written.
    pub fn len(&self) -> u32 {
        self.len
    }

    /// Whether nothing has been written.
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Capacity in bytes.
    pub fn capacity(&self) -> u32 {
        self.region.len()
    }

    /// Whether any write was dropped for lack of space.
    pub fn is_truncated(&self) -> bool {
        self.truncated
    }

    /// The arena region backing this buffer.
    pub fn region(&self) -> Region {
        self.region
    }
}

impl<A: StackAllocator + ?Sized, E: Encoding> std::fmt::Debug for StringBuffer<'_, A, E> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StringBuffer")
            .field("region", &self.region)
            .field("position", &self.position)
            .field("len", &self.len)
            .field("truncated", &self.truncated)
            .finish()
    }
}

/// Iterator over the decoded characters of a [`StringBuffer`].
pub struct Chars<'b, E: Encoding> {
    bytes: &'b [u8],
    pos: usize,
    _encoding: PhantomData<E>,
}

impl<E: Encoding> Iterator for Chars<'_, E> {
    type Item = char;

    fn next(&mut self) -> Option<char> {
        let bytes = self.bytes;
        let pos = &mut self.pos;
        E::decode(|| {
            let b = bytes.get(*pos).copied()?;
            *pos += 1;
            Some(b)
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::encoding::Ascii;
    use strata_arena::{Arena, DualArena};

    fn formatted(f: impl FnOnce(&mut StringBuffer<'_, Arena>)) -> String {
        let mut arena = Arena::new(64);
        let mut buf = StringBuffer::new(&mut arena, 64).unwrap();
        f(&mut buf);
        buf.as_str().unwrap().to_owned()
    }

    #[test]
    fn put_str_writes_utf8() {
        assert_eq!(formatted(|b| { b.put_str("gr\u{fc}n"); }), "gr\u{fc}n");
    }

    #[test]
    fn overflow_is_dropped_and_flagged() {
        let mut arena = Arena::new(8);
        let mut buf: StringBuffer<'_, Arena> = StringBuffer::new(&mut arena, 4).unwrap();
        buf.put_str("abcdef");
        assert_eq!(buf.as_bytes(), b"abcd");
        assert!(buf.is_truncated());
        assert_eq!(buf.len(), 4);
    }

    #[test]
    fn new_reports_out_of_space() {
        let mut arena = Arena::new(8);
        let err = StringBuffer::<'_, Arena, Utf8>::new(&mut arena, 9).unwrap_err();
        assert_eq!(
            err,
            TextError::OutOfSpace {
                requested: 9,
                remaining: 8
            }
        );
    }

    #[test]
    fn format_bool_words() {
        assert_eq!(formatted(|b| { b.format_bool(true).format_bool(false); }), "truefalse");
    }

    #[test]
    fn format_i32_cases() {
        assert_eq!(formatted(|b| { b.format_i32(-17); }), "-17");
        assert_eq!(formatted(|b| { b.format_i32(0); }), "0");
        assert_eq!(formatted(|b| { b.format_i32(42); }), "42");
        assert_eq!(formatted(|b| { b.format_i32(i32::MIN); }), "-2147483648");
        assert_eq!(formatted(|b| { b.format_i32(i32::MAX); }), "2147483647");
    }

    #[test]
    fn format_f32_truncates_fraction() {
        assert_eq!(formatted(|b| { b.format_f32(3.14, 2); }), "3.14");
        assert_eq!(formatted(|b| { b.format_f32(2.999, 2); }), "2.99");
        assert_eq!(formatted(|b| { b.format_f32(-1.5, 3); }), "-1.500");
        assert_eq!(formatted(|b| { b.format_f32(-0.25, 2); }), "-0.25");
        assert_eq!(formatted(|b| { b.format_f32(7.0, 0); }), "7.");
        assert_eq!(formatted(|b| { b.format_f32(0.05, 2); }), "0.05");
    }

    #[test]
    fn format_f32_beyond_i32_range() {
        assert_eq!(formatted(|b| { b.format_f32(1e10, 2); }), "10000000000.00");
        assert_eq!(formatted(|b| { b.format_f32(-3e9, 2); }), "-3000000000.00");
        assert_eq!(formatted(|b| { b.format_f32(2147483648.0, 3); }), "2147483648.000");
        assert_eq!(
            formatted(|b| { b.format_f32(f32::MAX, 2); }),
            "18446744073709551615.00"
        );
    }

    #[test]
    fn format_f32_non_finite() {
        assert_eq!(formatted(|b| { b.format_f32(f32::NAN, 2); }), "NaN");
        assert_eq!(formatted(|b| { b.format_f32(f32::INFINITY, 2); }), "inf");
        assert_eq!(formatted(|b| { b.format_f32(f32::NEG_INFINITY, 2); }), "-inf");
    }

    #[test]
    fn seek_and_take() {
        let mut arena = Arena::new(16);
        let mut buf: StringBuffer<'_, Arena> = StringBuffer::new(&mut arena, 8).unwrap();
        buf.put_str("hello");
        assert_eq!(buf.tell(), 5);
        assert_eq!(buf.take(), None);

        assert_eq!(buf.seek(SeekFrom::Start(1)), 1);
        assert_eq!(buf.take(), Some(b'e'));
        assert_eq!(buf.seek(SeekFrom::Current(-2)), 0);
        assert_eq!(buf.take(), Some(b'h'));
        assert_eq!(buf.seek(SeekFrom::End(-1)), 7);
        assert_eq!(buf.seek(SeekFrom::Current(100)), 8);
        assert_eq!(buf.seek(SeekFrom::Current(-100)), 0);
    }

    #[test]
    fn overwrite_after_seek_keeps_length() {
        let mut arena = Arena::new(16);
        let mut buf: StringBuffer<'_, Arena> = StringBuffer::new(&mut arena, 8).unwrap();
        buf.put_str("hello");
        buf.seek(SeekFrom::Start(0));
        buf.put_char('j');
        assert_eq!(buf.as_str().unwrap(), "jello");
    }

    #[test]
    fn chars_decodes_through_encoding() {
        let mut arena = Arena::new(32);
        let mut buf: StringBuffer<'_, Arena> = StringBuffer::new(&mut arena, 32).unwrap();
        buf.put_str("a\u{20ac}b");
        let decoded: String = buf.chars().collect();
        assert_eq!(decoded, "a\u{20ac}b");
    }

    #[test]
    fn ascii_buffer_replaces_non_ascii() {
        let mut arena = Arena::new(32);
        let mut buf: StringBuffer<'_, Arena, Ascii> = StringBuffer::new(&mut arena, 32).unwrap();
        buf.put_str("stra\u{df}e");
        assert_eq!(buf.as_str().unwrap(), "stra?e");
    }

    #[test]
    fn truncated_multibyte_char_decodes_to_replacement() {
        let mut arena = Arena::new(8);
        let mut buf: StringBuffer<'_, Arena> = StringBuffer::new(&mut arena, 2).unwrap();
        buf.put_char('a').put_char('\u{20ac}');
        assert!(buf.is_truncated());
        assert_eq!(buf.as_str(), Err(TextError::InvalidUtf8));
        let decoded: String = buf.chars().collect();
        assert_eq!(decoded, "a\u{FFFD}");
    }

    #[test]
    fn buffer_works_on_dual_back_side() {
        let mut arena = DualArena::new(32);
        arena.swap_buffers();
        {
            let mut buf: StringBuffer<'_, DualArena> = StringBuffer::new(&mut arena, 16).unwrap();
            buf.format_i32(-17);
            assert_eq!(buf.region().offset(), 16);
            assert_eq!(buf.as_str().unwrap(), "-17");
        }
        assert_eq!(arena.used_back(), 16);
    }

    #[test]
    fn clear_resets_cursor() {
        let mut arena = Arena::new(8);
        let mut buf: StringBuffer<'_, Arena> = StringBuffer::new(&mut arena, 2).unwrap();
        buf.put_str("abc");
        buf.clear();
        assert!(buf.is_empty());
        assert!(!buf.is_truncated());
        buf.put_str("z");
        assert_eq!(buf.as_bytes(), b"z");
    }

    mod proptests {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            #[test]
            fn format_i32_matches_display(value in any::<i32>()) {
                prop_assert_eq!(formatted(|b| { b.format_i32(value); }), value.to_string());
            }

            #[test]
            fn never_writes_past_capacity(cap in 0u32..16, text in "\\PC{0,24}") {
                let mut arena = Arena::new(16);
                let mut buf: StringBuffer<'_, Arena> = StringBuffer::new(&mut arena, cap).unwrap();
                buf.put_str(&text);
                prop_assert!(buf.len() <= cap);
                prop_assert_eq!(buf.is_truncated(), text.len() > cap as usize);
                prop_assert_eq!(buf.as_bytes(), &text.as_bytes()[..buf.len() as usize]);
            }
        }
    }
}
