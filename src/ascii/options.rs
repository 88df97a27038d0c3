//! Conversion options and their validation.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::charset::CharSet;

/// Default number of output columns.
pub const DEFAULT_WIDTH: u32 = 100;

/// Largest accepted output width in characters.
pub const MAX_WIDTH: u32 = 1000;

/// Whether markup and vector output keep per-character colour.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ColorMode {
    #[default]
    Grayscale,
    Colored,
}

impl ColorMode {
    pub fn name(&self) -> &'static str {
        match self {
            ColorMode::Grayscale => "grayscale",
            ColorMode::Colored => "colored",
        }
    }

    pub fn is_colored(&self) -> bool {
        matches!(self, ColorMode::Colored)
    }
}

impl fmt::Display for ColorMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for ColorMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "grayscale" | "greyscale" | "gray" | "grey" => Ok(ColorMode::Grayscale),
            "colored" | "coloured" | "color" | "colour" => Ok(ColorMode::Colored),
            other => Err(format!(
                "Unknown color mode '{}'. Use grayscale or colored",
                other
            )),
        }
    }
}

/// Parameters for one conversion.
///
/// `characters` is the ramp, iterated by `char`. Index 0 receives the
/// brightest cells; see [`CharSet`] for the polarity convention.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConversionOptions {
    /// Number of character columns
    pub width: u32,
    /// Character ramp, brightest cell first
    pub characters: String,
    pub color_mode: ColorMode,
    /// Gain around the 0.5 midpoint, 1.0 = unchanged
    pub contrast: f64,
    /// Additive offset, 1.0 = unchanged
    pub brightness: f64,
}

impl Default for ConversionOptions {
    fn default() -> Self {
        Self {
            width: DEFAULT_WIDTH,
            characters: CharSet::default().characters().to_string(),
            color_mode: ColorMode::default(),
            contrast: 1.0,
            brightness: 1.0,
        }
    }
}

impl ConversionOptions {
    /// Options using a preset ramp, all other fields default.
    pub fn with_charset(charset: CharSet) -> Self {
        Self {
            characters: charset.characters().to_string(),
            ..Self::default()
        }
    }

    /// The ramp as a glyph slice.
    pub fn ramp(&self) -> Vec<char> {
        self.characters.chars().collect()
    }

    /// The preset matching the current ramp, if any.
    pub fn charset(&self) -> Option<CharSet> {
        CharSet::find(&self.characters)
    }

    /// Check that the options describe a meaningful conversion.
    ///
    /// The converter tolerates every value (an empty ramp renders blanks, a
    /// zero width renders nothing), so this is for callers that want to
    /// reject bad input before converting.
    pub fn validate(&self) -> Result<(), OptionsError> {
        if self.width == 0 {
            return Err(OptionsError::ZeroWidth);
        }
        if self.width > MAX_WIDTH {
            return Err(OptionsError::WidthTooLarge {
                width: self.width,
                max: MAX_WIDTH,
            });
        }
        if self.characters.is_empty() {
            return Err(OptionsError::EmptyCharacters);
        }
        if !is_positive_finite(self.contrast) {
            return Err(OptionsError::NonPositiveContrast(self.contrast));
        }
        if !is_positive_finite(self.brightness) {
            return Err(OptionsError::NonPositiveBrightness(self.brightness));
        }
        Ok(())
    }
}

/// True for finite values above zero (NaN and infinities fail).
pub fn is_positive_finite(v: f64) -> bool {
    v.is_finite() && v > 0.0
}

/// Rejected conversion options.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum OptionsError {
    #[error("character ramp is empty")]
    EmptyCharacters,

    #[error("width must be at least 1 column")]
    ZeroWidth,

    #[error("width must be at most {max} columns, got {width}")]
    WidthTooLarge { width: u32, max: u32 },

    #[error("contrast must be a positive number, got {0}")]
    NonPositiveContrast(f64),

    #[error("brightness must be a positive number, got {0}")]
    NonPositiveBrightness(f64),
}
