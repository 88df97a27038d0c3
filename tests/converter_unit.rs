//! Property tests for the image to ASCII converter.
//!
//! These tests verify the converter as a whole:
//! - Determinism
//! - Grid geometry
//! - Transparency handling
//! - Tone monotonicity and clamping
//! - Agreement between text, markup and vector renderings

use glyphgrid::ascii::*;
use glyphgrid::bitmap::Bitmap;

const SPARSE: &str = " .:-=+*#%@";

fn options(width: u32, characters: &str) -> ConversionOptions {
    ConversionOptions {
        width,
        characters: characters.to_string(),
        ..ConversionOptions::default()
    }
}

/// A horizontal gradient with a transparent band and a few saturated pixels.
fn test_image(width: u32, height: u32) -> Bitmap {
    let mut data = Vec::with_capacity((width * height * 4) as usize);
    for y in 0..height {
        for x in 0..width {
            let v = (x * 255 / width.max(1)) as u8;
            let alpha = if y % 7 == 3 { 40 } else { 255 };
            let rgba = match (x + y) % 11 {
                0 => [255, 0, 0, alpha],
                5 => [0, 0, 255, alpha],
                _ => [v, v, v, alpha],
            };
            data.extend_from_slice(&rgba);
        }
    }
    Bitmap::from_rgba(width, height, data).unwrap()
}

fn strip_tags(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    let mut in_tag = false;
    for c in s.chars() {
        match c {
            '<' => in_tag = true,
            '>' if in_tag => in_tag = false,
            _ if !in_tag => out.push(c),
            _ => {}
        }
    }
    out
}

fn decode_entities(s: &str) -> String {
    s.replace("&nbsp;", " ")
        .replace("&lt;", "<")
        .replace("&gt;", ">")
        .replace("&amp;", "&")
}

/// Plain text recovered from the `<pre>` markup.
fn markup_to_text(markup: &str) -> String {
    let rows: Vec<String> = markup
        .split("<br>")
        .map(|row| decode_entities(&strip_tags(row)))
        .collect();
    rows.join("\n")
}

/// Plain text recovered from the SVG, one `<text>` element per row.
fn vector_to_text(vector: &str) -> String {
    let rows: Vec<String> = vector
        .split("</text>")
        .filter(|chunk| chunk.contains("<text"))
        .map(|row| decode_entities(&strip_tags(row)))
        .collect();
    rows.join("\n")
}

// ==================== Determinism ====================

#[test]
fn test_conversion_is_deterministic() {
    let bitmap = test_image(64, 48);
    for mode in [ColorMode::Grayscale, ColorMode::Colored] {
        let opts = ConversionOptions {
            color_mode: mode,
            ..options(40, MEDIUM_CHARSET)
        };
        assert_eq!(convert(&bitmap, &opts), convert(&bitmap, &opts));
    }
}

// ==================== Geometry ====================

#[test]
fn test_text_grid_shape_matches_dimensions() {
    for (w, h, width) in [(64, 48, 40), (10, 100, 7), (300, 20, 120), (3, 3, 9)] {
        let bitmap = test_image(w, h);
        let result = convert(&bitmap, &options(width, SPARSE));
        let expected_rows = output_rows(width, w, h);

        assert_eq!(result.columns, width);
        assert_eq!(result.rows, expected_rows);
        if expected_rows == 0 {
            assert!(result.text.is_empty());
            continue;
        }
        let lines: Vec<&str> = result.text.split('\n').collect();
        assert_eq!(lines.len() as u32, expected_rows);
        for line in lines {
            assert_eq!(line.chars().count() as u32, width);
        }
    }
}

#[test]
fn test_vector_viewbox_matches_grid() {
    let bitmap = test_image(64, 48);
    let result = convert(&bitmap, &options(40, SPARSE));
    let expected = format!(
        r#"viewBox="0 0 {} {}""#,
        result.columns * CELL_WIDTH,
        result.rows * CELL_HEIGHT
    );
    assert!(result.vector.contains(&expected));
    assert_eq!(
        result.vector.matches("<text ").count() as u32,
        result.rows
    );
}

// ==================== Transparency ====================

#[test]
fn test_transparent_pixels_render_blank_everywhere() {
    let bitmap = Bitmap::filled(1, 2, [200, 10, 10, 0]).unwrap();
    for mode in [ColorMode::Grayscale, ColorMode::Colored] {
        let opts = ConversionOptions {
            color_mode: mode,
            ..options(1, "@")
        };
        let result = convert(&bitmap, &opts);
        assert_eq!(result.text, " ");
        assert_eq!(
            result.markup,
            format!(r#"<pre style="{}">&nbsp;</pre>"#, PRE_STYLE)
        );
        assert!(!result.markup.contains("<span"));
        assert!(!result.vector.contains("<tspan"));
    }
}

#[test]
fn test_transparent_square_uses_row_formula() {
    // A 1x1 image at width 2 gets floor(2 * 1 * 0.5) = 1 row
    let bitmap = Bitmap::filled(1, 1, [0, 0, 0, 0]).unwrap();
    let result = convert(&bitmap, &options(2, SPARSE));
    assert_eq!(result.text, "  ");
    assert_eq!(
        result.markup,
        format!(r#"<pre style="{}">&nbsp;&nbsp;</pre>"#, PRE_STYLE)
    );
}

#[test]
fn test_alpha_threshold_boundary() {
    let below = Bitmap::filled(2, 4, [0, 0, 0, ALPHA_THRESHOLD - 1]).unwrap();
    let at = Bitmap::filled(2, 4, [0, 0, 0, ALPHA_THRESHOLD]).unwrap();
    assert_eq!(convert(&below, &options(2, ".#")).text, "  \n  ");
    assert_eq!(convert(&at, &options(2, ".#")).text, "##\n##");
}

// ==================== Tone mapping ====================

#[test]
fn test_darker_pixels_never_map_to_lighter_glyphs() {
    let ramp: Vec<char> = SPARSE.chars().collect();
    let position = |glyph: char| ramp.iter().position(|&c| c == glyph).unwrap();

    let mut previous = 0;
    for v in (0..=255u8).rev() {
        let bitmap = Bitmap::filled(2, 2, [v, v, v, 255]).unwrap();
        let result = convert(&bitmap, &options(2, SPARSE));
        let glyph = result.text.chars().next().unwrap();
        let index = position(glyph);
        assert!(
            index >= previous,
            "value {} mapped to index {} after {}",
            v,
            index,
            previous
        );
        previous = index;
    }
    assert_eq!(previous, ramp.len() - 1);
}

#[test]
fn test_extreme_adjustments_clamp_to_ramp_ends() {
    let bitmap = Bitmap::filled(2, 2, [128, 128, 128, 255]).unwrap();

    let bright = ConversionOptions {
        brightness: 100.0,
        ..options(2, SPARSE)
    };
    assert_eq!(convert(&bitmap, &bright).text, "  ");

    let dark = ConversionOptions {
        brightness: 1e-9,
        ..options(2, SPARSE)
    };
    assert_eq!(convert(&bitmap, &dark).text, "@@");

    // Grey 128 sits just above the midpoint, so huge contrast pushes it to white
    let harsh = ConversionOptions {
        contrast: 1e9,
        ..options(2, SPARSE)
    };
    assert_eq!(convert(&bitmap, &harsh).text, "  ");
}

#[test]
fn test_two_by_two_reference_image() {
    let data = vec![
        0, 0, 0, 255, //
        255, 255, 255, 255, //
        128, 128, 128, 255, //
        255, 0, 0, 255,
    ];
    let bitmap = Bitmap::from_rgba(2, 2, data).unwrap();
    let result = convert(&bitmap, &options(2, SPARSE));

    assert_eq!(result.rows, 1);
    assert_eq!(result.columns, 2);
    assert_eq!(result.text, "=*");
    assert_eq!(
        result.markup,
        format!(r#"<pre style="{}">=*</pre>"#, PRE_STYLE)
    );
}

#[test]
fn test_empty_ramp_renders_blanks() {
    let bitmap = Bitmap::filled(4, 4, [10, 20, 30, 255]).unwrap();
    let opts = options(4, "");
    assert!(opts.validate().is_err());
    assert_eq!(convert(&bitmap, &opts).text, "    \n    ");
}

// ==================== Output agreement ====================

#[test]
fn test_markup_and_vector_carry_the_text() {
    let bitmap = test_image(80, 60);
    for charset in CharSet::ALL {
        for mode in [ColorMode::Grayscale, ColorMode::Colored] {
            let opts = ConversionOptions {
                color_mode: mode,
                ..ConversionOptions::with_charset(charset)
            };
            let opts = ConversionOptions { width: 50, ..opts };
            let result = convert(&bitmap, &opts);

            assert_eq!(markup_to_text(&result.markup), result.text, "{} {}", charset, mode);
            assert_eq!(vector_to_text(&result.vector), result.text, "{} {}", charset, mode);
        }
    }
}

#[test]
fn test_colored_markup_uses_source_colors() {
    let bitmap = Bitmap::filled(2, 2, [255, 0, 0, 255]).unwrap();
    let opts = ConversionOptions {
        color_mode: ColorMode::Colored,
        ..options(2, SPARSE)
    };
    let result = convert(&bitmap, &opts);

    assert_eq!(result.markup.matches(r#"<span style="color: #ff0000">"#).count(), 2);
    assert_eq!(result.vector.matches(r##"fill="#ff0000""##).count(), 2);
    assert!(result.vector.contains(r#"<tspan x="6""#));
}

#[test]
fn test_grayscale_outputs_have_no_per_cell_color() {
    let bitmap = test_image(32, 32);
    let result = convert(&bitmap, &options(16, SPARSE));
    assert!(!result.markup.contains("<span"));
    assert!(!result.vector.contains("<tspan"));
    assert_eq!(
        result.vector.matches(r##"fill="#000""##).count() as u32,
        result.rows
    );
}
