//! Unicode helpers: byte-cursor decoding, display width, text splicing.

pub mod utf8;
pub mod width;

pub use utf8::{InvalidUtf8, decode};
pub use width::{char_width, display_width, is_wide, is_zero_width};

/// Insert `insertion` after `char_index` characters of `s`.
///
/// Offsets past the end of the string append. Used by the input layer to
/// splice completions into the edit line at a cursor position counted in
/// characters, not bytes.
#[must_use]
pub fn insert_at_char(s: &str, char_index: usize, insertion: &str) -> String {
    let byte = s
        .char_indices()
        .nth(char_index)
        .map_or(s.len(), |(i, _)| i);

    let mut out = String::with_capacity(s.len() + insertion.len());
    out.push_str(&s[..byte]);
    out.push_str(insertion);
    out.push_str(&s[byte..]);
    out
}
