//! Luminance and tone adjustment.

/// ITU-R BT.601 red weight.
pub const LUMA_R: f64 = 0.299;
/// ITU-R BT.601 green weight.
pub const LUMA_G: f64 = 0.587;
/// ITU-R BT.601 blue weight.
pub const LUMA_B: f64 = 0.114;

/// Relative luminance of an RGB sample using the ITU-R BT.601 weights.
///
/// The formula is: Y = (0.299*R + 0.587*G + 0.114*B) / 255
///
/// Floating point is used throughout (unlike a byte-quantised grayscale
/// pass) because the result feeds brightness/contrast arithmetic and a
/// floor into the ramp index; rounding to a byte first shifts cells across
/// bucket boundaries.
///
/// # Returns
/// A value in `[0.0, 1.0]`.
#[inline]
pub fn luminance(r: u8, g: u8, b: u8) -> f64 {
    (r as f64 * LUMA_R + g as f64 * LUMA_G + b as f64 * LUMA_B) / 255.0
}

/// Apply the brightness offset then the contrast gain.
///
/// Brightness is additive with 1.0 meaning "unchanged":
/// `L' = clamp(L + (brightness - 1), 0, 1)`.
/// Contrast scales around the midpoint:
/// `L'' = clamp((L' - 0.5) * contrast + 0.5, 0, 1)`.
///
/// The result always lies in `[0.0, 1.0]`, whatever the inputs.
#[inline]
pub fn adjust(luma: f64, brightness: f64, contrast: f64) -> f64 {
    let l = clamp_unit(luma + (brightness - 1.0));
    clamp_unit((l - 0.5) * contrast + 0.5)
}

// NaN maps to 0 so a bogus contrast can never escape the unit range.
#[inline]
fn clamp_unit(v: f64) -> f64 {
    if v.is_nan() {
        0.0
    } else {
        v.clamp(0.0, 1.0)
    }
}
