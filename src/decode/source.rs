//! Image references accepted by the loader.

use std::fmt;
use std::path::PathBuf;

/// Where an image comes from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ImageSource {
    /// Encoded image bytes already in memory
    Bytes(Vec<u8>),
    /// Local file
    File(PathBuf),
    /// Remote `http://` or `https://` URL
    Url(String),
}

impl ImageSource {
    /// Interpret a command-line style reference.
    ///
    /// Anything starting with `http://` or `https://` (case-insensitive) is a
    /// URL, everything else is a file path.
    pub fn parse(reference: &str) -> Self {
        let trimmed = reference.trim();
        let lower = trimmed.to_ascii_lowercase();
        if lower.starts_with("http://") || lower.starts_with("https://") {
            ImageSource::Url(trimmed.to_string())
        } else {
            ImageSource::File(PathBuf::from(reference))
        }
    }

    pub fn is_remote(&self) -> bool {
        matches!(self, ImageSource::Url(_))
    }
}

impl fmt::Display for ImageSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ImageSource::Bytes(bytes) => write!(f, "<{} bytes>", bytes.len()),
            ImageSource::File(path) => write!(f, "{}", path.display()),
            ImageSource::Url(url) => f.write_str(url),
        }
    }
}
