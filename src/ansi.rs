//! Translation of grid rows into terminal escape sequences.
//!
//! This is the thin presentation edge: indexed-color SGR plus absolute
//! cursor positioning, nothing more. Style sequences are emitted once per
//! run of identically-styled cells rather than per cell.

use std::fmt::Write as _;

use crate::error::{Error, Result};
use crate::grid::Grid;
use crate::palette::Color;
use crate::style::TextAttributes;

/// Reset all attributes to default.
pub const RESET: &str = "\x1b[0m";

/// Clear entire screen.
pub const CLEAR_SCREEN: &str = "\x1b[2J";

/// Move cursor to home position (1,1).
pub const CURSOR_HOME: &str = "\x1b[H";

/// Hide cursor.
pub const CURSOR_HIDE: &str = "\x1b[?25l";

/// Show cursor.
pub const CURSOR_SHOW: &str = "\x1b[?25h";

/// Append an absolute cursor position sequence (0-based coordinates).
pub fn cursor_position(out: &mut String, x: u32, y: u32) {
    let _ = write!(out, "\x1b[{};{}H", y + 1, x + 1);
}

/// Renders grid contents into an internal escape-sequence buffer.
#[derive(Clone, Debug, Default)]
pub struct AnsiPresenter {
    out: String,
    current: Option<(Color, Color, TextAttributes)>,
}

impl AnsiPresenter {
    /// Create a presenter with an empty buffer.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Render one grid row into the buffer and return it.
    ///
    /// # Errors
    ///
    /// [`Error::OutOfBounds`] if `y` is not a row of `grid`.
    pub fn present_row(&mut self, grid: &Grid, y: u32) -> Result<&str> {
        if y >= grid.height() {
            return Err(Error::OutOfBounds {
                line: y,
                height: grid.height(),
            });
        }
        self.out.clear();
        self.append_row(grid, y);
        Ok(&self.out)
    }

    /// Render the whole grid, ending with the grid's cursor position (or a
    /// hidden cursor when none is placed), and return the buffer.
    pub fn present(&mut self, grid: &Grid) -> &str {
        self.out.clear();
        for y in 0..grid.height() {
            self.append_row(grid, y);
        }
        match grid.cursor() {
            Some((x, y)) => {
                cursor_position(&mut self.out, x, y);
                self.out.push_str(CURSOR_SHOW);
            }
            None => self.out.push_str(CURSOR_HIDE),
        }
        &self.out
    }

    fn append_row(&mut self, grid: &Grid, y: u32) {
        cursor_position(&mut self.out, 0, y);
        self.current = None;

        let Some(row) = grid.row(y) else { return };
        for cell in row {
            if cell.is_continuation() {
                continue;
            }
            self.set_style(cell.fg, cell.bg, cell.attrs);
            match cell.content.as_char() {
                Some(c) => self.out.push(c),
                None => self.out.push(' '),
            }
        }
        self.out.push_str(RESET);
        self.current = None;
    }

    fn set_style(&mut self, fg: Color, bg: Color, attrs: TextAttributes) {
        if self.current == Some((fg, bg, attrs)) {
            return;
        }
        self.out.push_str("\x1b[0");
        if attrs.contains(TextAttributes::BOLD) {
            self.out.push_str(";1");
        }
        if attrs.contains(TextAttributes::UNDERLINE) {
            self.out.push_str(";4");
        }
        if attrs.contains(TextAttributes::REVERSE) {
            self.out.push_str(";7");
        }
        let _ = write!(self.out, ";38;5;{};48;5;{}m", fg.0, bg.0);
        self.current = Some((fg, bg, attrs));
    }
}
