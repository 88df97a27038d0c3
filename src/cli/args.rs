//! CLI argument parsing with clap.

use clap::{Args as ClapArgs, Parser, Subcommand};
use std::path::PathBuf;

use super::enums::{CharacterSet, Color, Format};
use crate::ascii::{is_positive_finite, ConversionOptions, MAX_WIDTH};

/// Parse and validate output width (1-1000 columns)
pub fn parse_width(s: &str) -> Result<u32, String> {
    let width: u32 = s
        .parse()
        .map_err(|_| format!("'{}' is not a valid width", s))?;
    if !(1..=MAX_WIDTH).contains(&width) {
        return Err(format!(
            "Width must be between 1 and {} columns, got {}",
            MAX_WIDTH, width
        ));
    }
    Ok(width)
}

/// Parse and validate a contrast or brightness factor (> 0)
pub fn parse_factor(s: &str) -> Result<f64, String> {
    let v: f64 = s
        .parse()
        .map_err(|_| format!("'{}' is not a valid number", s))?;
    if !is_positive_finite(v) {
        return Err(format!("Value must be greater than 0, got {}", v));
    }
    Ok(v)
}

/// Parse a non-empty character ramp
pub fn parse_characters(s: &str) -> Result<String, String> {
    if s.is_empty() {
        return Err("Character ramp must not be empty".to_string());
    }
    Ok(s.to_string())
}

/// Convert images to ASCII art as text, HTML or SVG
#[derive(Parser, Debug)]
#[command(name = "glyphgrid")]
#[command(version, about = "Convert images to ASCII art", long_about = None)]
#[command(after_help = "EXAMPLES:
    # Print a photo as text, 120 columns wide
    glyphgrid convert photo.jpg --width 120

    # Colored HTML export with a block ramp
    glyphgrid convert photo.jpg --color colored --charset blocks -o art.html

    # Tune settings live (type 'contrast 1.4', 'next', ...)
    glyphgrid interactive https://example.com/cat.png")]
pub struct Args {
    #[command(subcommand)]
    pub command: Command,

    /// Config file path
    #[arg(long, short, global = true)]
    pub config: Option<PathBuf>,
}

/// Rendering options shared by `convert` and `interactive`.
///
/// Every flag is optional; unset flags fall back to the config file.
#[derive(ClapArgs, Debug, Clone, Default, PartialEq)]
pub struct RenderArgs {
    /// Output width in characters (1-1000)
    #[arg(long, short, value_parser = parse_width)]
    pub width: Option<u32>,

    /// Character ramp preset
    #[arg(long)]
    pub charset: Option<CharacterSet>,

    /// Custom character ramp, brightest cell first (overrides --charset)
    #[arg(long, value_parser = parse_characters, allow_hyphen_values = true)]
    pub characters: Option<String>,

    /// Color mode for HTML and SVG output
    #[arg(long)]
    pub color: Option<Color>,

    /// Contrast gain around mid-gray (1.0 = unchanged)
    #[arg(long, value_parser = parse_factor)]
    pub contrast: Option<f64>,

    /// Brightness offset (1.0 = unchanged)
    #[arg(long, value_parser = parse_factor)]
    pub brightness: Option<f64>,
}

impl RenderArgs {
    /// Override `options` with every flag that was given.
    pub fn apply_to(&self, options: &mut ConversionOptions) {
        if let Some(width) = self.width {
            options.width = width;
        }
        if let Some(charset) = self.charset {
            options.characters = crate::ascii::CharSet::from(charset)
                .characters()
                .to_string();
        }
        if let Some(characters) = &self.characters {
            options.characters = characters.clone();
        }
        if let Some(color) = self.color {
            options.color_mode = color.into();
        }
        if let Some(contrast) = self.contrast {
            options.contrast = contrast;
        }
        if let Some(brightness) = self.brightness {
            options.brightness = brightness;
        }
    }
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Convert an image file or URL
    Convert {
        /// Image file path or http(s) URL
        source: String,

        #[command(flatten)]
        render: RenderArgs,

        /// Output format (default: from --output extension, else txt)
        #[arg(long, short)]
        format: Option<Format>,

        /// Output file or directory ('-' or omitted = stdout)
        #[arg(long, short)]
        output: Option<PathBuf>,
    },
    /// Live preview: read option changes from stdin and re-render
    Interactive {
        /// Image file path or http(s) URL
        source: String,

        #[command(flatten)]
        render: RenderArgs,
    },
    /// List built-in character ramps
    Charsets,
    /// Configuration management
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

#[derive(Subcommand, Debug, Clone)]
pub enum ConfigAction {
    /// Show current configuration
    Show,
    /// Create default config file
    Init,
}
