//! Rasterization of styled chat text into grid rows.
//!
//! [`Renderer`] ties the pieces together: it owns the carry-over
//! [`StyleState`], runs the control-code scanner over the input bytes, and
//! writes width-aware cells into one row of a [`Grid`].
//!
//! # Carry-over
//!
//! After rendering a row, the renderer's state reflects the style in effect
//! where the scan stopped, so the next row starts with the same visual
//! style unless the text overrides it. This is what lets a multi-line
//! colored message stay colored without re-specifying its codes on every
//! line.

mod codes;
mod parser;

pub use codes::{ControlCode, byte};
pub use parser::{StyledChar, StyledChars};

use crate::cell::Cell;
use crate::error::{Error, Result};
use crate::grid::Grid;
use crate::palette::Palette;
use crate::style::StyleState;
use crate::unicode::char_width;

/// Styled-text renderer with persistent carry-over state.
#[derive(Clone, Debug, Default)]
pub struct Renderer {
    palette: Palette,
    state: StyleState,
}

impl Renderer {
    /// Create a renderer with the standard palette and dark initial state.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// The style that will seed the next `render_line` call.
    #[must_use]
    pub fn state(&self) -> StyleState {
        self.state
    }

    /// Rasterize `text` into row `line` of `grid`.
    ///
    /// The row is first cleared to blank cells (color 0 on color 0,
    /// independent of carry-over), then filled left to right. Control
    /// codes update the working style; printable codepoints become cells,
    /// with double-width glyphs occupying a head cell plus a continuation
    /// cell. Zero-width codepoints produce no cell and no column advance.
    /// Input past the last column that fits is discarded.
    ///
    /// # Errors
    ///
    /// [`Error::OutOfBounds`] if `line` is not a row of `grid`. This is a
    /// caller contract violation; malformed `text` never fails.
    pub fn render_line(&mut self, grid: &mut Grid, line: u32, text: &[u8]) -> Result<()> {
        let height = grid.height();
        if line >= height {
            return Err(Error::OutOfBounds { line, height });
        }

        let width = grid.width();
        for x in 0..width {
            grid.set(x, line, Cell::blank());
        }

        let mut chars = StyledChars::new(text, self.state, &self.palette);
        let mut col: u32 = 0;

        for StyledChar { ch, style } in chars.by_ref() {
            let w = char_width(ch) as u32;
            if w == 0 {
                continue;
            }
            if col + w > width {
                break;
            }
            grid.set(col, line, Cell::new(ch, style));
            if w == 2 {
                grid.set(col + 1, line, Cell::continuation(style));
            }
            col += w;
            if col >= width {
                break;
            }
        }

        self.state = chars.style();
        Ok(())
    }
}
