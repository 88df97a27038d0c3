//! The sampled character grid shared by every renderer.

use crate::bitmap::Bitmap;

use super::dimensions::grid_dimensions;
use super::grayscale::{adjust, luminance};
use super::mapping::{map_to_char, BLANK};
use super::options::ConversionOptions;
use super::resample::resample;

/// Samples with alpha below this are treated as empty cells.
pub const ALPHA_THRESHOLD: u8 = 128;

/// RGB colour of a grid cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct CellColor {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl CellColor {
    /// Lowercase `#rrggbb` form.
    pub fn hex(&self) -> String {
        format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }
}

/// One character cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Cell {
    pub glyph: char,
    /// Source colour, `None` for a transparent cell
    pub color: Option<CellColor>,
}

impl Cell {
    /// An empty (transparent) cell.
    pub const EMPTY: Cell = Cell {
        glyph: BLANK,
        color: None,
    };

    pub fn is_transparent(&self) -> bool {
        self.color.is_none()
    }
}

/// Character grid produced from a bitmap, `columns * rows` cells, row-major.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AsciiGrid {
    columns: u32,
    rows: u32,
    cells: Vec<Cell>,
}

impl AsciiGrid {
    /// Sample `bitmap` onto a grid and map every cell to a glyph.
    ///
    /// This is the single pass over the image; every output format is
    /// rendered from the returned grid so their characters cannot diverge.
    pub fn build(bitmap: &Bitmap, options: &ConversionOptions) -> Self {
        let (columns, rows) = grid_dimensions(options.width, bitmap.width(), bitmap.height());
        let ramp = options.ramp();

        let cells = resample(bitmap, columns, rows)
            .into_iter()
            .map(|[r, g, b, a]| {
                if a < ALPHA_THRESHOLD {
                    return Cell::EMPTY;
                }
                let luma = adjust(luminance(r, g, b), options.brightness, options.contrast);
                Cell {
                    glyph: map_to_char(luma, &ramp),
                    color: Some(CellColor { r, g, b }),
                }
            })
            .collect();

        Self {
            columns,
            rows,
            cells,
        }
    }

    pub fn columns(&self) -> u32 {
        self.columns
    }

    pub fn rows(&self) -> u32 {
        self.rows
    }

    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    /// Iterate over rows of cells, top to bottom.
    pub fn row_iter(&self) -> impl Iterator<Item = &[Cell]> {
        // chunks_exact panics on 0; a zero-column grid has no cells anyway
        self.cells.chunks_exact(self.columns.max(1) as usize)
    }
}
