//! The styled-text scanning state machine.
//!
//! [`StyledChars`] walks a byte string left to right, alternating between
//! control-code interpretation and literal UTF-8 decoding, and yields one
//! `(codepoint, style)` pair per printable codepoint. The working style is
//! seeded from the carry-over state of the previous line and can be read
//! back after the scan to persist it.
//!
//! Malformed input never fails the scan: a color code with no digits
//! behaves as a style reset, short digit runs parse as far as they go, and
//! invalid UTF-8 is skipped one byte at a time.

use crate::palette::Palette;
use crate::render::codes::ControlCode;
use crate::style::{StyleState, TextAttributes};
use crate::unicode::utf8;

/// One decoded codepoint together with the style in effect for it.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct StyledChar {
    /// The codepoint.
    pub ch: char,
    /// Style snapshot for this codepoint.
    pub style: StyleState,
}

/// Iterator over `(codepoint, style)` pairs of a styled byte string.
#[derive(Clone, Debug)]
pub struct StyledChars<'a> {
    input: &'a [u8],
    pos: usize,
    style: StyleState,
    palette: &'a Palette,
}

impl<'a> StyledChars<'a> {
    /// Begin a scan over `input`, starting from the carried-over `style`.
    #[must_use]
    pub fn new(input: &'a [u8], style: StyleState, palette: &'a Palette) -> Self {
        Self {
            input,
            pos: 0,
            style,
            palette,
        }
    }

    /// The working style at the current scan position.
    ///
    /// After the iterator is exhausted (or abandoned at a truncation
    /// point) this is the style to carry over to the next line.
    #[must_use]
    pub fn style(&self) -> StyleState {
        self.style
    }

    fn peek(&self) -> Option<u8> {
        self.input.get(self.pos).copied()
    }

    /// Read 1-2 ASCII digits into a color index. The caller has verified
    /// that the byte at the cursor is a digit.
    fn read_index(&mut self) -> u16 {
        let mut index = u16::from(self.input[self.pos] - b'0');
        self.pos += 1;
        if let Some(b) = self.peek() {
            if b.is_ascii_digit() {
                index = index * 10 + u16::from(b - b'0');
                self.pos += 1;
            }
        }
        index
    }

    /// Interpret a color code at the cursor (the code byte itself already
    /// consumed).
    fn apply_color(&mut self) {
        // No digit after the code means "reset", not an error. The
        // non-digit byte is left for the main scan to re-examine.
        match self.peek() {
            Some(b) if b.is_ascii_digit() => {}
            _ => {
                self.style.reset();
                return;
            }
        }

        let fg = self.read_index();
        self.style.fg = self.palette.resolve(fg);

        // A background clause needs a comma immediately followed by a
        // digit; anything else belongs to the literal text that follows.
        if self.peek() == Some(b',')
            && self
                .input
                .get(self.pos + 1)
                .is_some_and(u8::is_ascii_digit)
        {
            self.pos += 1;
            let bg = self.read_index();
            self.style.bg = self.palette.resolve(bg);
        }
    }

    /// Interpret an extended-color code: a window of up to three bytes,
    /// of which the leading digits form the index. Missing digits degrade
    /// to index 0; the whole window is consumed either way.
    fn apply_extended(&mut self) {
        let end = (self.pos + 3).min(self.input.len());
        let mut index: u16 = 0;
        for &b in &self.input[self.pos..end] {
            if !b.is_ascii_digit() {
                break;
            }
            index = index * 10 + u16::from(b - b'0');
        }
        self.style.fg = self.palette.resolve(index);
        self.pos = end;
    }

    fn apply(&mut self, code: ControlCode) {
        match code {
            ControlCode::Bold => self.style.toggle(TextAttributes::BOLD),
            ControlCode::Underline => self.style.toggle(TextAttributes::UNDERLINE),
            ControlCode::Invert => self.style.toggle(TextAttributes::REVERSE),
            ControlCode::Italic | ControlCode::Blink => {}
            ControlCode::Reset => self.style.reset(),
            ControlCode::Color => self.apply_color(),
            ControlCode::ExtendedColor => self.apply_extended(),
        }
    }
}

impl Iterator for StyledChars<'_> {
    type Item = StyledChar;

    fn next(&mut self) -> Option<StyledChar> {
        loop {
            let b = self.peek()?;

            if let Some(code) = ControlCode::classify(b) {
                self.pos += 1;
                self.apply(code);
                continue;
            }

            match utf8::decode(&self.input[self.pos..]) {
                Ok((ch, len)) => {
                    self.pos += len;
                    return Some(StyledChar {
                        ch,
                        style: self.style,
                    });
                }
                // Skip one byte and keep going.
                Err(_) => self.pos += 1,
            }
        }
    }
}
