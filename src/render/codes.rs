//! Classification of in-band styling control codes.
//!
//! Chat text embeds single non-printable bytes that change the rendering
//! style instead of producing a glyph. The byte values are a closed,
//! versioned set; extending them is a compatibility-affecting change.

/// Byte values of the styling control codes.
pub mod byte {
    /// Toggle bold.
    pub const BOLD: u8 = 0x02;
    /// Toggle underline.
    pub const UNDERLINE: u8 = 0x1F;
    /// Italic; accepted but produces no attribute change.
    pub const ITALIC: u8 = 0x1D;
    /// Toggle reverse video.
    pub const INVERT: u8 = 0x16;
    /// Blink; accepted but produces no attribute change.
    pub const BLINK: u8 = 0x06;
    /// Reset style to defaults.
    pub const RESET: u8 = 0x0F;
    /// Set foreground (and optionally background) color; followed by
    /// 1-2 ASCII digits, optionally `,` and 1-2 more digits.
    pub const COLOR: u8 = 0x03;
    /// Set extended (256-color) foreground; followed by exactly 3 digits.
    pub const EXTENDED_COLOR: u8 = 0x04;
}

/// One recognized control code.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ControlCode {
    Bold,
    Underline,
    Italic,
    Invert,
    Blink,
    Reset,
    Color,
    ExtendedColor,
}

impl ControlCode {
    /// Classify a byte as a control code, or `None` for literal text.
    #[must_use]
    pub fn classify(b: u8) -> Option<Self> {
        match b {
            byte::BOLD => Some(Self::Bold),
            byte::UNDERLINE => Some(Self::Underline),
            byte::ITALIC => Some(Self::Italic),
            byte::INVERT => Some(Self::Invert),
            byte::BLINK => Some(Self::Blink),
            byte::RESET => Some(Self::Reset),
            byte::COLOR => Some(Self::Color),
            byte::EXTENDED_COLOR => Some(Self::ExtendedColor),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_classify_codes() {
        assert_eq!(ControlCode::classify(0x02), Some(ControlCode::Bold));
        assert_eq!(ControlCode::classify(0x1F), Some(ControlCode::Underline));
        assert_eq!(ControlCode::classify(0x1D), Some(ControlCode::Italic));
        assert_eq!(ControlCode::classify(0x16), Some(ControlCode::Invert));
        assert_eq!(ControlCode::classify(0x06), Some(ControlCode::Blink));
        assert_eq!(ControlCode::classify(0x0F), Some(ControlCode::Reset));
        assert_eq!(ControlCode::classify(0x03), Some(ControlCode::Color));
        assert_eq!(
            ControlCode::classify(0x04),
            Some(ControlCode::ExtendedColor)
        );
    }

    #[test]
    fn test_literal_bytes_unclassified() {
        assert_eq!(ControlCode::classify(b'a'), None);
        assert_eq!(ControlCode::classify(0x00), None);
        assert_eq!(ControlCode::classify(0x1B), None);
        assert_eq!(ControlCode::classify(0xFF), None);
    }
}
