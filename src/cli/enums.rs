//! CLI enum types for character set, color mode and output format options.

use clap::ValueEnum;

use crate::ascii;
use crate::export::ExportFormat;

/// ASCII character ramp preset.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum CharacterSet {
    Dense,
    #[default]
    Medium,
    Sparse,
    Blocks,
    Simple,
}

impl From<CharacterSet> for ascii::CharSet {
    fn from(c: CharacterSet) -> Self {
        match c {
            CharacterSet::Dense => ascii::CharSet::Dense,
            CharacterSet::Medium => ascii::CharSet::Medium,
            CharacterSet::Sparse => ascii::CharSet::Sparse,
            CharacterSet::Blocks => ascii::CharSet::Blocks,
            CharacterSet::Simple => ascii::CharSet::Simple,
        }
    }
}

/// Per-character colour handling.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum Color {
    #[default]
    Grayscale,
    Colored,
}

impl From<Color> for ascii::ColorMode {
    fn from(c: Color) -> Self {
        match c {
            Color::Grayscale => ascii::ColorMode::Grayscale,
            Color::Colored => ascii::ColorMode::Colored,
        }
    }
}

/// Output format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum Format {
    #[default]
    Txt,
    Html,
    Svg,
    Json,
}

impl From<Format> for ExportFormat {
    fn from(f: Format) -> Self {
        match f {
            Format::Txt => ExportFormat::Txt,
            Format::Html => ExportFormat::Html,
            Format::Svg => ExportFormat::Svg,
            Format::Json => ExportFormat::Json,
        }
    }
}
