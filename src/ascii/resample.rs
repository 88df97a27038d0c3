//! Resampling a bitmap onto the character grid.

use crate::bitmap::Bitmap;

/// Source coordinate for destination index `dst` when scaling `src_len`
/// samples to `dst_len` samples, sampling at the destination cell centre.
#[inline]
fn source_index(dst: u32, dst_len: u32, src_len: u32) -> u32 {
    let pos = ((dst as f64 + 0.5) * src_len as f64 / dst_len as f64).floor() as u32;
    pos.min(src_len - 1)
}

/// Resample a bitmap to exactly `columns x rows` RGBA samples.
///
/// Uses nearest-neighbour sampling at cell centres: every output cell takes
/// exactly one source pixel, no area averaging. This works for both
/// shrinking and enlarging.
///
/// # Returns
/// One RGBA sample per cell, row-major, `columns * rows` long. Empty when
/// either dimension is zero.
pub fn resample(bitmap: &Bitmap, columns: u32, rows: u32) -> Vec<[u8; 4]> {
    if columns == 0 || rows == 0 {
        return Vec::new();
    }

    let src_w = bitmap.width();
    let src_h = bitmap.height();

    // Column lookup is shared by every row
    let xs: Vec<u32> = (0..columns)
        .map(|cx| source_index(cx, columns, src_w))
        .collect();

    let mut cells = Vec::with_capacity(columns as usize * rows as usize);
    for cy in 0..rows {
        let sy = source_index(cy, rows, src_h);
        cells.extend(xs.iter().map(|&sx| bitmap.pixel(sx, sy)));
    }

    cells
}
