//! Bitmap to ASCII art conversion.

use serde::{Deserialize, Serialize};

use crate::bitmap::Bitmap;

use super::grid::AsciiGrid;
use super::options::ConversionOptions;
use super::render::{render_markup, render_text, render_vector};

/// The three renderings of one character grid.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConversionResult {
    /// Rows of glyphs joined by `\n`
    pub text: String,
    /// `<pre>` HTML fragment, optionally colourised per character
    pub markup: String,
    /// Self-contained SVG document
    pub vector: String,
    pub columns: u32,
    pub rows: u32,
}

impl ConversionResult {
    /// Render every output format from an already-built grid.
    pub fn from_grid(grid: &AsciiGrid, options: &ConversionOptions) -> Self {
        Self {
            text: render_text(grid),
            markup: render_markup(grid, options.color_mode),
            vector: render_vector(grid, options.color_mode),
            columns: grid.columns(),
            rows: grid.rows(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.rows == 0 || self.columns == 0
    }
}

/// Convert a bitmap to text, HTML and SVG renderings.
///
/// The conversion is pure and deterministic. It never fails: options that
/// [`ConversionOptions::validate`] would reject still produce a defined
/// result (an empty ramp renders blanks, zero width renders nothing).
///
/// # Example
/// ```ignore
/// let bitmap = decode_bytes(&std::fs::read("photo.png")?)?;
/// let result = convert(&bitmap, &ConversionOptions::default());
/// println!("{}", result.text);
/// ```
pub fn convert(bitmap: &Bitmap, options: &ConversionOptions) -> ConversionResult {
    let grid = AsciiGrid::build(bitmap, options);
    log::debug!(
        "Converted {}x{} bitmap to {}x{} grid",
        bitmap.width(),
        bitmap.height(),
        grid.columns(),
        grid.rows()
    );
    ConversionResult::from_grid(&grid, options)
}
