//! Luminance to character mapping.

/// Glyph used for transparent cells and for an empty ramp.
pub const BLANK: char = ' ';

/// Ramp index for an adjusted luminance value.
///
/// `index = floor((1 - luma) * (levels - 1))`, clamped to `[0, levels - 1]`.
/// The brightest cells land on index 0, the darkest on the last index.
///
/// # Returns
/// `None` when the ramp is empty.
#[inline]
pub fn ramp_index(luma: f64, levels: usize) -> Option<usize> {
    if levels == 0 {
        return None;
    }

    let last = levels - 1;
    let raw = ((1.0 - luma) * last as f64).floor();
    // `as usize` saturates, so NaN and negatives become 0
    Some((raw as usize).min(last))
}

/// Map an adjusted luminance value to a glyph from `ramp`.
///
/// An empty ramp maps every value to [`BLANK`].
#[inline]
pub fn map_to_char(luma: f64, ramp: &[char]) -> char {
    ramp_index(luma, ramp.len())
        .map(|idx| ramp[idx])
        .unwrap_or(BLANK)
}

#[cfg(test)]
mod tests {
    use super::*;

    const RAMP: &[char] = &[' ', '.', ':', '-', '=', '+', '*', '#', '%', '@'];

    #[test]
    fn test_brightest_maps_to_first() {
        assert_eq!(ramp_index(1.0, 10), Some(0));
        assert_eq!(map_to_char(1.0, RAMP), ' ');
    }

    #[test]
    fn test_darkest_maps_to_last() {
        assert_eq!(ramp_index(0.0, 10), Some(9));
        assert_eq!(map_to_char(0.0, RAMP), '@');
    }

    #[test]
    fn test_midpoint() {
        // floor(0.5 * 9) = 4
        assert_eq!(ramp_index(0.5, 10), Some(4));
        assert_eq!(map_to_char(0.5, RAMP), '=');
    }

    #[test]
    fn test_single_glyph_ramp() {
        for v in [0.0, 0.3, 1.0] {
            assert_eq!(ramp_index(v, 1), Some(0));
        }
    }

    #[test]
    fn test_empty_ramp() {
        assert_eq!(ramp_index(0.5, 0), None);
        assert_eq!(map_to_char(0.5, &[]), BLANK);
    }

    #[test]
    fn test_out_of_range_luma_is_clamped() {
        assert_eq!(ramp_index(-4.0, 10), Some(9));
        assert_eq!(ramp_index(7.0, 10), Some(0));
        assert_eq!(ramp_index(f64::NAN, 10), Some(0));
    }
}
