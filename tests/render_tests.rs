//! Integration tests for the styling renderer.
//!
//! Exercises the public surface: control-code interpretation, carry-over
//! across rows, width-aware cell placement, and graceful handling of
//! malformed input.

use tuirc::{
    Cell, CellContent, Color, Error, Grid, Renderer, StyleState, TextAttributes, display_width,
};

fn occupied_columns(grid: &Grid, y: u32) -> usize {
    grid.row(y)
        .unwrap()
        .iter()
        .filter(|c| !c.is_empty())
        .count()
}

// =============================================================================
// Width and placement
// =============================================================================

#[test]
fn test_plain_text_occupies_sum_of_widths() {
    let mut grid = Grid::new(40, 1);
    let mut renderer = Renderer::new();

    for text in ["hello", "a b c", "漢字かな", "mixed 漢 width"] {
        renderer.render_line(&mut grid, 0, text.as_bytes()).unwrap();
        assert_eq!(
            occupied_columns(&grid, 0),
            display_width(text),
            "width mismatch for {text:?}"
        );
    }
}

#[test]
fn test_untouched_columns_are_blank() {
    let mut grid = Grid::new(10, 1);
    let mut renderer = Renderer::new();
    renderer.render_line(&mut grid, 0, b"ab").unwrap();

    for x in 2..10 {
        assert_eq!(*grid.get(x, 0).unwrap(), Cell::blank());
    }
}

#[test]
fn test_wide_glyph_consumes_two_columns() {
    let mut grid = Grid::new(10, 1);
    let mut renderer = Renderer::new();
    renderer.render_line(&mut grid, 0, "漢x".as_bytes()).unwrap();

    assert_eq!(grid.get(0, 0).unwrap().content, CellContent::Char('漢'));
    assert!(grid.get(1, 0).unwrap().is_continuation());
    assert_eq!(grid.get(2, 0).unwrap().content, CellContent::Char('x'));
}

#[test]
fn test_zero_width_codepoints_produce_no_cell() {
    let mut grid = Grid::new(10, 1);
    let mut renderer = Renderer::new();
    renderer
        .render_line(&mut grid, 0, "e\u{0301}\u{200D}f".as_bytes())
        .unwrap();

    assert_eq!(grid.get(0, 0).unwrap().content, CellContent::Char('e'));
    assert_eq!(grid.get(1, 0).unwrap().content, CellContent::Char('f'));
    assert_eq!(occupied_columns(&grid, 0), 2);
}

#[test]
fn test_input_past_row_width_is_discarded() {
    let mut grid = Grid::new(4, 2);
    let mut renderer = Renderer::new();
    renderer.render_line(&mut grid, 0, b"abcdefgh").unwrap();

    assert_eq!(occupied_columns(&grid, 0), 4);
    assert_eq!(grid.get(3, 0).unwrap().content, CellContent::Char('d'));
    // No wraparound into the next row.
    assert_eq!(occupied_columns(&grid, 1), 0);
}

#[test]
fn test_row_index_out_of_bounds_is_the_only_failure() {
    let mut grid = Grid::new(4, 2);
    let mut renderer = Renderer::new();

    let err = renderer.render_line(&mut grid, 5, b"x").unwrap_err();
    assert!(matches!(err, Error::OutOfBounds { line: 5, height: 2 }));

    // Arbitrarily malformed styling input never fails.
    renderer
        .render_line(&mut grid, 0, b"\x03\x04\xff\x03,\x041")
        .unwrap();
}

// =============================================================================
// Control codes
// =============================================================================

#[test]
fn test_bold_toggle_applies_and_clears() {
    let mut grid = Grid::new(10, 1);
    let mut renderer = Renderer::new();
    renderer.render_line(&mut grid, 0, b"\x02a\x02b").unwrap();

    assert!(grid.get(0, 0).unwrap().attrs.contains(TextAttributes::BOLD));
    assert!(!grid.get(1, 0).unwrap().attrs.contains(TextAttributes::BOLD));
}

#[test]
fn test_double_toggle_restores_prior_state() {
    let mut renderer = Renderer::new();
    let mut grid = Grid::new(10, 1);
    let before = renderer.state().attrs;
    renderer.render_line(&mut grid, 0, b"\x02\x02").unwrap();
    assert_eq!(renderer.state().attrs, before);
}

#[test]
fn test_color_code_without_digits_resets() {
    let mut grid = Grid::new(10, 1);
    let mut renderer = Renderer::new();
    // Establish bold and colors, then a bare color code.
    renderer.render_line(&mut grid, 0, b"\x02\x034,5\x03x").unwrap();

    let cell = grid.get(0, 0).unwrap();
    assert_eq!(cell.fg, Color::BRIGHT);
    assert_eq!(cell.bg, Color::BACKGROUND);
    assert!(cell.attrs.is_empty());
}

#[test]
fn test_color_code_merges_prior_attributes() {
    let mut grid = Grid::new(10, 1);
    let mut renderer = Renderer::new();
    renderer.render_line(&mut grid, 0, b"\x02\x034x").unwrap();

    let cell = grid.get(0, 0).unwrap();
    // mIRC index 4 (light red) maps to terminal color 9.
    assert_eq!(cell.fg, Color(9));
    assert!(cell.attrs.contains(TextAttributes::BOLD));
}

#[test]
fn test_foreground_and_background_pair() {
    let mut grid = Grid::new(10, 1);
    let mut renderer = Renderer::new();
    renderer.render_line(&mut grid, 0, b"\x0301,08x").unwrap();

    let cell = grid.get(0, 0).unwrap();
    assert_eq!(cell.fg, Color(0)); // mIRC black
    assert_eq!(cell.bg, Color(11)); // mIRC light yellow
}

#[test]
fn test_extended_color_passes_through_unmapped() {
    let mut grid = Grid::new(10, 1);
    let mut renderer = Renderer::new();
    renderer.render_line(&mut grid, 0, b"\x04100x").unwrap();

    assert_eq!(grid.get(0, 0).unwrap().fg, Color(100));
}

#[test]
fn test_italic_and_blink_accepted_without_effect() {
    let mut grid = Grid::new(10, 1);
    let mut renderer = Renderer::new();
    renderer.render_line(&mut grid, 0, b"\x1da\x06b").unwrap();

    assert_eq!(grid.get(0, 0).unwrap().attrs, TextAttributes::empty());
    assert_eq!(grid.get(1, 0).unwrap().attrs, TextAttributes::empty());
    assert_eq!(occupied_columns(&grid, 0), 2);
}

#[test]
fn test_reverse_and_underline_toggles() {
    let mut grid = Grid::new(10, 1);
    let mut renderer = Renderer::new();
    renderer.render_line(&mut grid, 0, b"\x16\x1fx").unwrap();

    let attrs = grid.get(0, 0).unwrap().attrs;
    assert!(attrs.contains(TextAttributes::REVERSE));
    assert!(attrs.contains(TextAttributes::UNDERLINE));
}

// =============================================================================
// Carry-over
// =============================================================================

#[test]
fn test_bold_carries_to_next_row() {
    let mut grid = Grid::new(10, 3);
    let mut renderer = Renderer::new();

    renderer.render_line(&mut grid, 0, b"\x02red").unwrap();
    renderer.render_line(&mut grid, 1, b"").unwrap();
    renderer.render_line(&mut grid, 2, b"still").unwrap();

    // The empty row changed nothing; the third row starts bold.
    assert!(grid.get(0, 2).unwrap().attrs.contains(TextAttributes::BOLD));
}

#[test]
fn test_colors_carry_until_reset() {
    let mut grid = Grid::new(10, 2);
    let mut renderer = Renderer::new();

    renderer.render_line(&mut grid, 0, b"\x033,5hi").unwrap();
    renderer.render_line(&mut grid, 1, b"more").unwrap();

    let cell = grid.get(0, 1).unwrap();
    assert_eq!(cell.fg, Color(2));
    assert_eq!(cell.bg, Color(1));

    renderer.render_line(&mut grid, 1, b"\x0fplain").unwrap();
    let cell = grid.get(0, 1).unwrap();
    assert_eq!(cell.fg, Color::BRIGHT);
    assert_eq!(cell.bg, Color::BACKGROUND);
}

#[test]
fn test_carry_state_reflects_truncation_point() {
    let mut grid = Grid::new(2, 1);
    let mut renderer = Renderer::new();
    // The bold toggle sits beyond the last column that fits and is
    // discarded along with the rest of the input.
    renderer.render_line(&mut grid, 0, b"abc\x02d").unwrap();
    assert!(renderer.state().attrs.is_empty());
}

#[test]
fn test_state_survives_renderer_queries() {
    let mut grid = Grid::new(10, 1);
    let mut renderer = Renderer::new();
    renderer.render_line(&mut grid, 0, b"\x02").unwrap();

    let state: StyleState = renderer.state();
    assert!(state.attrs.contains(TextAttributes::BOLD));
}

// =============================================================================
// Malformed input
// =============================================================================

#[test]
fn test_invalid_utf8_skipped_without_corrupting_columns() {
    let mut grid = Grid::new(10, 1);
    let mut renderer = Renderer::new();
    renderer
        .render_line(&mut grid, 0, b"ab\xff\xfe\x80cd")
        .unwrap();

    assert_eq!(grid.get(0, 0).unwrap().content, CellContent::Char('a'));
    assert_eq!(grid.get(1, 0).unwrap().content, CellContent::Char('b'));
    assert_eq!(grid.get(2, 0).unwrap().content, CellContent::Char('c'));
    assert_eq!(grid.get(3, 0).unwrap().content, CellContent::Char('d'));
    assert_eq!(occupied_columns(&grid, 0), 4);
}

#[test]
fn test_truncated_multibyte_at_end_of_input() {
    let mut grid = Grid::new(10, 1);
    let mut renderer = Renderer::new();
    // "漢" with its last byte missing.
    renderer
        .render_line(&mut grid, 0, &"漢".as_bytes()[..2])
        .unwrap();
    assert_eq!(occupied_columns(&grid, 0), 0);
}
