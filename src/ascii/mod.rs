//! ASCII art converter.
//!
//! Turns a decoded bitmap into a character grid and renders it three ways:
//!
//! 1. **Geometry** - columns from the options, rows halved for glyph aspect
//! 2. **Resampling** - nearest-neighbour, one source pixel per cell
//! 3. **Luminance** - ITU-R BT.601 weights, then brightness and contrast
//! 4. **Mapping** - luminance to a glyph of the character ramp
//! 5. **Rendering** - plain text, HTML `<pre>` markup and an SVG document
//!
//! # Character Sets
//!
//! Built-in ramps are available via [`CharSet`]:
//! - `Dense` - short 10-level ramp, densest first
//! - `Medium` - long 70-level ramp (default)
//! - `Sparse` - short 10-level ramp, space first
//! - `Blocks` - Unicode block shading
//! - `Simple` - two glyphs and a blank

mod charset;
mod converter;
mod dimensions;
mod grayscale;
mod grid;
mod mapping;
mod options;
mod render;
mod resample;

pub use charset::{
    CharSet, BLOCKS_CHARSET, DENSE_CHARSET, MEDIUM_CHARSET, SIMPLE_CHARSET, SPARSE_CHARSET,
};
pub use converter::{convert, ConversionResult};
pub use dimensions::{grid_dimensions, output_rows, CHAR_ASPECT_CORRECTION};
pub use grayscale::{adjust, luminance, LUMA_B, LUMA_G, LUMA_R};
pub use grid::{AsciiGrid, Cell, CellColor, ALPHA_THRESHOLD};
pub use mapping::{map_to_char, ramp_index, BLANK};
pub use options::{
    is_positive_finite, ColorMode, ConversionOptions, OptionsError, DEFAULT_WIDTH, MAX_WIDTH,
};
pub use render::{
    render_markup, render_text, render_vector, CELL_HEIGHT, CELL_WIDTH, FONT_SIZE, NBSP,
    PRE_STYLE,
};
pub use resample::resample;
