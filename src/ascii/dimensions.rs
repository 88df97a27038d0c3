//! Character grid geometry.

/// Vertical squash applied to the row count.
///
/// Monospace glyphs are roughly twice as tall as they are wide, so mapping
/// one source pixel row to one text row would stretch the picture
/// vertically. Halving the row count compensates.
pub const CHAR_ASPECT_CORRECTION: f64 = 0.5;

/// Number of text rows for an image rendered `columns` characters wide.
///
/// `rows = floor(columns * (img_height / img_width) * 0.5)`
///
/// A zero-sized image or zero columns yields zero rows. Very wide images may
/// also round down to zero rows; that is a valid, empty result.
///
/// # Example
/// ```ignore
/// // A 640x480 (4:3) image at 100 columns
/// assert_eq!(output_rows(100, 640, 480), 37);
/// ```
pub fn output_rows(columns: u32, img_width: u32, img_height: u32) -> u32 {
    if columns == 0 || img_width == 0 || img_height == 0 {
        return 0;
    }

    let aspect = img_height as f64 / img_width as f64;
    (columns as f64 * aspect * CHAR_ASPECT_CORRECTION).floor() as u32
}

/// Grid dimensions `(columns, rows)` for an image.
pub fn grid_dimensions(columns: u32, img_width: u32, img_height: u32) -> (u32, u32) {
    (columns, output_rows(columns, img_width, img_height))
}
