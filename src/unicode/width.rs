//! Display width lookup for terminal rendering.
//!
//! Wraps the `unicode-width` tables with the conventions the grid writer
//! relies on: control characters and unassigned/zero-width codepoints
//! report 0 columns, everything printable reports 1 or 2.

use unicode_width::UnicodeWidthChar;

/// Terminal columns occupied by one codepoint (0, 1, or 2).
///
/// Includes a fast path for printable ASCII, which is the overwhelmingly
/// common case in chat traffic.
#[inline]
#[must_use]
pub fn char_width(c: char) -> usize {
    if (' '..='~').contains(&c) {
        return 1;
    }
    if c < ' ' {
        return 0;
    }
    UnicodeWidthChar::width(c).unwrap_or(0)
}

/// Display width of a whole string, summed per codepoint.
///
/// The per-codepoint sum matches what the grid writer will consume column
/// by column, which is what the prompt arithmetic in the input layer needs.
#[must_use]
pub fn display_width(s: &str) -> usize {
    s.chars().map(char_width).sum()
}

/// Check if a codepoint occupies no columns (combining marks, ZWJ).
#[must_use]
pub fn is_zero_width(c: char) -> bool {
    char_width(c) == 0
}

/// Check if a codepoint is double-width.
#[must_use]
pub fn is_wide(c: char) -> bool {
    char_width(c) == 2
}
