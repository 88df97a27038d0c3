//! Text, HTML and SVG renderers for an [`AsciiGrid`].
//!
//! All three walk the same grid, so they differ only in decoration. Removing
//! tags and decoding entities from the markup or vector output gives back
//! the plain text exactly.

use std::fmt::Write;

use super::grid::{AsciiGrid, Cell};
use super::options::ColorMode;

/// Width of one character cell in SVG user units.
pub const CELL_WIDTH: u32 = 6;

/// Height of one character cell (and the row baseline step) in SVG user units.
pub const CELL_HEIGHT: u32 = 12;

/// SVG font size matching [`CELL_WIDTH`] x [`CELL_HEIGHT`] monospace cells.
pub const FONT_SIZE: u32 = 10;

/// Inline style of the `<pre>` wrapping the markup.
pub const PRE_STYLE: &str = "font-family: monospace; line-height: 1; margin: 0; padding: 0;";

/// Entity written for blank cells in markup.
pub const NBSP: &str = "&nbsp;";

/// Fill used for vector rows in grayscale mode.
const MONO_FILL: &str = "#000";

/// Plain text: one line per row, joined by `\n`, no trailing newline.
pub fn render_text(grid: &AsciiGrid) -> String {
    let mut out = String::with_capacity(grid.cells().len() + grid.rows() as usize);
    for (i, row) in grid.row_iter().enumerate() {
        if i > 0 {
            out.push('\n');
        }
        out.extend(row.iter().map(|c| c.glyph));
    }
    out
}

/// HTML fragment: a `<pre>` block with rows separated by `<br>`.
///
/// In colored mode every opaque cell is wrapped in a `<span>` carrying its
/// source colour. Transparent cells are always a bare `&nbsp;`.
pub fn render_markup(grid: &AsciiGrid, mode: ColorMode) -> String {
    let mut out = format!(r#"<pre style="{}">"#, PRE_STYLE);

    for (i, row) in grid.row_iter().enumerate() {
        if i > 0 {
            out.push_str("<br>");
        }
        for cell in row {
            push_markup_cell(&mut out, cell, mode);
        }
    }

    out.push_str("</pre>");
    out
}

fn push_markup_cell(out: &mut String, cell: &Cell, mode: ColorMode) {
    match cell.color {
        Some(color) if mode.is_colored() => {
            let _ = write!(out, r#"<span style="color: {}">"#, color.hex());
            push_html_glyph(out, cell.glyph);
            out.push_str("</span>");
        }
        Some(_) => push_html_glyph(out, cell.glyph),
        None => out.push_str(NBSP),
    }
}

fn push_html_glyph(out: &mut String, glyph: char) {
    match glyph {
        ' ' => out.push_str(NBSP),
        other => push_escaped(out, other),
    }
}

/// Append `glyph`, escaping the three markup-significant characters.
fn push_escaped(out: &mut String, glyph: char) {
    match glyph {
        '&' => out.push_str("&amp;"),
        '<' => out.push_str("&lt;"),
        '>' => out.push_str("&gt;"),
        other => out.push(other),
    }
}

/// SVG document with one `<text>` element per row.
///
/// The document is `columns * 6` by `rows * 12` user units and row `n` sits
/// on baseline `(n + 1) * 12`. `xml:space="preserve"` keeps runs of blank
/// cells from collapsing.
///
/// Grayscale rows are a single run filled `#000`. Colored rows place every
/// opaque cell in its own `<tspan>` at `x = column * 6` with the cell's
/// fill, so colour survives per character.
pub fn render_vector(grid: &AsciiGrid, mode: ColorMode) -> String {
    let mut out = format!(
        r#"<svg xmlns="http://www.w3.org/2000/svg" viewBox="0 0 {} {}" xml:space="preserve" style="font-family: monospace; font-size: {}px;">"#,
        grid.columns() * CELL_WIDTH,
        grid.rows() * CELL_HEIGHT,
        FONT_SIZE,
    );

    for (y, row) in grid.row_iter().enumerate() {
        let baseline = (y as u32 + 1) * CELL_HEIGHT;
        if mode.is_colored() {
            let _ = write!(
                out,
                r#"<text x="0" y="{}" font-family="monospace" font-size="{}">"#,
                baseline, FONT_SIZE
            );
            for (x, cell) in row.iter().enumerate() {
                match cell.color {
                    Some(color) => {
                        let _ = write!(
                            out,
                            r#"<tspan x="{}" fill="{}">"#,
                            x as u32 * CELL_WIDTH,
                            color.hex()
                        );
                        push_escaped(&mut out, cell.glyph);
                        out.push_str("</tspan>");
                    }
                    None => out.push(cell.glyph),
                }
            }
        } else {
            let _ = write!(
                out,
                r#"<text x="0" y="{}" font-family="monospace" font-size="{}" fill="{}">"#,
                baseline, FONT_SIZE, MONO_FILL
            );
            for cell in row {
                push_escaped(&mut out, cell.glyph);
            }
        }
        out.push_str("</text>");
    }

    out.push_str("</svg>");
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ascii::options::ConversionOptions;
    use crate::bitmap::Bitmap;

    fn grid_of(bitmap: &Bitmap, width: u32, characters: &str) -> AsciiGrid {
        let options = ConversionOptions {
            width,
            characters: characters.to_string(),
            ..Default::default()
        };
        AsciiGrid::build(bitmap, &options)
    }

    #[test]
    fn test_text_rows_joined_without_trailing_newline() {
        let bitmap = Bitmap::filled(2, 4, [0, 0, 0, 255]).unwrap();
        let grid = grid_of(&bitmap, 2, "ab");
        assert_eq!(render_text(&grid), "bb\nbb");
    }

    #[test]
    fn test_markup_grayscale_bare_glyphs() {
        let bitmap = Bitmap::filled(2, 4, [0, 0, 0, 255]).unwrap();
        let grid = grid_of(&bitmap, 2, "ab");
        assert_eq!(
            render_markup(&grid, ColorMode::Grayscale),
            format!(r#"<pre style="{}">bb<br>bb</pre>"#, PRE_STYLE)
        );
    }

    #[test]
    fn test_markup_colored_wraps_spans() {
        let bitmap = Bitmap::filled(1, 2, [255, 0, 0, 255]).unwrap();
        let grid = grid_of(&bitmap, 1, "xy");
        let markup = render_markup(&grid, ColorMode::Colored);
        assert!(markup.contains(r#"<span style="color: #ff0000">x</span>"#));
    }

    #[test]
    fn test_markup_escapes_significant_characters() {
        // Black maps to the last glyph of the ramp
        let bitmap = Bitmap::filled(1, 2, [0, 0, 0, 255]).unwrap();
        let grid = grid_of(&bitmap, 1, "a<");
        let markup = render_markup(&grid, ColorMode::Grayscale);
        assert_eq!(markup, format!(r#"<pre style="{}">&lt;</pre>"#, PRE_STYLE));
    }

    #[test]
    fn test_markup_ramp_space_is_nbsp() {
        let bitmap = Bitmap::filled(1, 2, [255, 255, 255, 255]).unwrap();
        let grid = grid_of(&bitmap, 1, " #");
        let markup = render_markup(&grid, ColorMode::Colored);
        assert!(markup.contains(r#"<span style="color: #ffffff">&nbsp;</span>"#));
    }

    #[test]
    fn test_vector_grayscale_rows() {
        let bitmap = Bitmap::filled(2, 4, [0, 0, 0, 255]).unwrap();
        let grid = grid_of(&bitmap, 2, "a&");
        let svg = render_vector(&grid, ColorMode::Grayscale);
        assert!(svg.starts_with(
            r#"<svg xmlns="http://www.w3.org/2000/svg" viewBox="0 0 12 24""#
        ));
        assert!(svg.contains(
            r##"<text x="0" y="12" font-family="monospace" font-size="10" fill="#000">&amp;&amp;</text>"##
        ));
        assert!(svg.contains(r#"y="24""#));
        assert!(svg.ends_with("</svg>"));
    }

    #[test]
    fn test_vector_colored_emits_tspans_per_cell() {
        let bitmap = Bitmap::from_rgba(
            2,
            4,
            [[255, 0, 0, 255], [0, 0, 255, 0]].repeat(4).concat(),
        )
        .unwrap();
        let grid = grid_of(&bitmap, 2, "ab");
        let svg = render_vector(&grid, ColorMode::Colored);
        assert!(svg.contains(r##"<tspan x="0" fill="#ff0000">a</tspan> </text>"##));
        assert!(!svg.contains("#0000ff"));
    }
}
