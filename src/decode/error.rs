//! Decode error types

/// An image reference could not be turned into a bitmap.
#[derive(Debug, thiserror::Error)]
pub enum DecodeError {
    #[error("Failed to read image: {0}")]
    Io(#[from] std::io::Error),

    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Image download from {url} failed with status {status}")]
    HttpStatus {
        /// HTTP status code returned by the server
        status: u16,
        url: String,
    },

    #[error("Image download failed: {message} (after {attempts} attempts)")]
    Network {
        /// Human-readable network error message
        message: String,
        /// Number of attempts made before giving up
        attempts: u32,
    },

    #[error("Image exceeds the {limit} byte download limit")]
    TooLarge { limit: usize },

    #[error("Unsupported or corrupt image: {0}")]
    Image(#[from] image::ImageError),

    #[error("Invalid image dimensions {width}x{height}")]
    InvalidDimensions { width: u32, height: u32 },

    #[error("Pixel buffer holds {actual} bytes, expected {expected}")]
    BufferSize { expected: usize, actual: usize },

    #[error("Decode task failed: {0}")]
    TaskJoin(#[from] tokio::task::JoinError),
}
