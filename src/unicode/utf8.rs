//! Incremental UTF-8 decoding from a byte cursor.
//!
//! The styled-text renderer consumes raw network bytes, so it cannot assume
//! valid UTF-8. [`decode`] reads exactly one scalar value from the front of
//! a byte slice and reports how many bytes it spanned, rejecting overlong
//! encodings, surrogates, and truncated sequences without consuming past
//! the offending lead byte.

use std::fmt;

/// The byte cursor does not start a well-formed UTF-8 sequence.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct InvalidUtf8;

impl fmt::Display for InvalidUtf8 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "invalid UTF-8 sequence")
    }
}

impl std::error::Error for InvalidUtf8 {}

/// Decode one codepoint from the front of `bytes`.
///
/// Returns the scalar value and the number of bytes it occupied (1-4).
///
/// # Errors
///
/// [`InvalidUtf8`] when `bytes` is empty or does not begin with a
/// well-formed sequence (bad lead byte, wrong continuation, overlong form,
/// surrogate, out-of-range scalar, or truncation).
pub fn decode(bytes: &[u8]) -> Result<(char, usize), InvalidUtf8> {
    let &b0 = bytes.first().ok_or(InvalidUtf8)?;

    let (len, init, first_range): (usize, u32, std::ops::RangeInclusive<u8>) = match b0 {
        0x00..=0x7F => return Ok((b0 as char, 1)),
        // Two-byte lead; 0xC0/0xC1 would be overlong and are excluded.
        0xC2..=0xDF => (2, u32::from(b0 & 0x1F), 0x80..=0xBF),
        // Three-byte leads with their restricted first continuations:
        // 0xE0 excludes overlong forms, 0xED excludes surrogates.
        0xE0 => (3, 0, 0xA0..=0xBF),
        0xE1..=0xEC | 0xEE..=0xEF => (3, u32::from(b0 & 0x0F), 0x80..=0xBF),
        0xED => (3, 0x0D, 0x80..=0x9F),
        // Four-byte leads; 0xF0 excludes overlong, 0xF4 caps at U+10FFFF.
        0xF0 => (4, 0, 0x90..=0xBF),
        0xF1..=0xF3 => (4, u32::from(b0 & 0x07), 0x80..=0xBF),
        0xF4 => (4, 4, 0x80..=0x8F),
        _ => return Err(InvalidUtf8),
    };

    if bytes.len() < len {
        return Err(InvalidUtf8);
    }

    let mut cp = init;
    for (i, &b) in bytes[1..len].iter().enumerate() {
        let ok = if i == 0 {
            first_range.contains(&b)
        } else {
            (0x80..=0xBF).contains(&b)
        };
        if !ok {
            return Err(InvalidUtf8);
        }
        cp = (cp << 6) | u32::from(b & 0x3F);
    }

    char::from_u32(cp).map(|c| (c, len)).ok_or(InvalidUtf8)
}
