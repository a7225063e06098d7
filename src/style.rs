//! Text attributes and the render carry-over state.
//!
//! Styling in chat text is cumulative: attributes toggled or colors set on
//! one line stay in effect on the next unless explicitly reset. That
//! persistent piece of state lives in [`StyleState`], owned by the renderer
//! and mutated only while a line is being rasterized.

use crate::palette::Color;
use bitflags::bitflags;

bitflags! {
    /// Text rendering attributes.
    ///
    /// Attributes are represented as bitflags and can be combined using
    /// bitwise OR. Italic and blink control codes are accepted by the
    /// parser but deliberately have no corresponding flag: they produce no
    /// visual change.
    #[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Hash)]
    pub struct TextAttributes: u8 {
        /// Bold/increased intensity.
        const BOLD      = 0x01;
        /// Underlined text.
        const UNDERLINE = 0x02;
        /// Swapped foreground/background.
        const REVERSE   = 0x04;
    }
}

/// The style in effect at a point in the styled-text stream.
///
/// One instance persists inside the renderer between `render_line` calls so
/// that multi-line colored text carries its formatting forward. Attribute
/// bits survive plain color changes; only a reset clears them.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct StyleState {
    /// Foreground terminal color.
    pub fg: Color,
    /// Background terminal color.
    pub bg: Color,
    /// Active attributes.
    pub attrs: TextAttributes,
}

impl StyleState {
    /// Create a style with the given colors and no attributes.
    #[must_use]
    pub const fn new(fg: Color, bg: Color) -> Self {
        Self {
            fg,
            bg,
            attrs: TextAttributes::empty(),
        }
    }

    /// Flip one attribute: apply if absent, remove if present.
    pub fn toggle(&mut self, attr: TextAttributes) {
        self.attrs.toggle(attr);
    }

    /// Apply a style reset: bright default foreground, background 0,
    /// all attributes cleared.
    pub fn reset(&mut self) {
        self.fg = Color::BRIGHT;
        self.bg = Color::BACKGROUND;
        self.attrs = TextAttributes::empty();
    }
}
