//! Built-in character ramp catalogue.
//!
//! # Polarity
//!
//! The converter maps the *brightest* cells to index 0 of a ramp and the
//! darkest cells to the last index. A ramp that lists its densest glyph first
//! (like [`DENSE_CHARSET`]) therefore draws dark pixels with sparse glyphs,
//! which reads correctly as dark ink on a light page. A ramp that starts with
//! a space (like [`SPARSE_CHARSET`]) gives the inverse look. The converter
//! never reorders a ramp; picking the glyph order picks the polarity.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Short dense ramp (10 levels), densest glyph first.
pub const DENSE_CHARSET: &str = "@%#*+=-:. ";

/// Long fine-grained ramp (70 levels), densest glyph first.
pub const MEDIUM_CHARSET: &str =
    "$@B%8&WM#*oahkbdpqwmZO0QLCJUYXzcvunxrjft/\\|()1{}[]?-_+~<>i!lI;:,\"^'`";

/// Short sparse ramp (10 levels), space first.
pub const SPARSE_CHARSET: &str = " .:-=+*#%@";

/// Unicode block shading (5 levels), full block first.
pub const BLOCKS_CHARSET: &str = "█▓▒░ ";

/// Minimal ramp (2 glyphs plus blank).
pub const SIMPLE_CHARSET: &str = ".# ";

/// Named character ramp presets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CharSet {
    /// Short dense ramp
    Dense,
    /// Long fine-grained ramp
    #[default]
    Medium,
    /// Short sparse ramp
    Sparse,
    /// Unicode block shading
    Blocks,
    /// Minimal two-glyph ramp
    Simple,
}

impl CharSet {
    /// Every preset, in catalogue order.
    pub const ALL: [CharSet; 5] = [
        CharSet::Dense,
        CharSet::Medium,
        CharSet::Sparse,
        CharSet::Blocks,
        CharSet::Simple,
    ];

    /// Stable identifier used in config files and on the command line.
    pub fn id(&self) -> &'static str {
        match self {
            CharSet::Dense => "dense",
            CharSet::Medium => "medium",
            CharSet::Sparse => "sparse",
            CharSet::Blocks => "blocks",
            CharSet::Simple => "simple",
        }
    }

    /// Display name.
    pub fn name(&self) -> &'static str {
        match self {
            CharSet::Dense => "Dense",
            CharSet::Medium => "Medium",
            CharSet::Sparse => "Sparse",
            CharSet::Blocks => "Blocks",
            CharSet::Simple => "Simple",
        }
    }

    /// The ramp itself.
    pub fn characters(&self) -> &'static str {
        match self {
            CharSet::Dense => DENSE_CHARSET,
            CharSet::Medium => MEDIUM_CHARSET,
            CharSet::Sparse => SPARSE_CHARSET,
            CharSet::Blocks => BLOCKS_CHARSET,
            CharSet::Simple => SIMPLE_CHARSET,
        }
    }

    /// Number of glyphs in the ramp.
    pub fn levels(&self) -> usize {
        self.characters().chars().count()
    }

    /// Cycle to the next preset.
    ///
    /// Order: Dense -> Medium -> Sparse -> Blocks -> Simple -> Dense
    pub fn next(&self) -> Self {
        match self {
            CharSet::Dense => CharSet::Medium,
            CharSet::Medium => CharSet::Sparse,
            CharSet::Sparse => CharSet::Blocks,
            CharSet::Blocks => CharSet::Simple,
            CharSet::Simple => CharSet::Dense,
        }
    }

    /// Find the preset whose ramp is exactly `characters`.
    pub fn find(characters: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|c| c.characters() == characters)
    }
}

impl fmt::Display for CharSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.id())
    }
}

impl FromStr for CharSet {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_ascii_lowercase();
        Self::ALL
            .into_iter()
            .find(|c| c.id() == wanted)
            .ok_or_else(|| {
                let ids: Vec<&str> = Self::ALL.iter().map(|c| c.id()).collect();
                format!("Unknown charset '{}'. Available: {}", s, ids.join(", "))
            })
    }
}
