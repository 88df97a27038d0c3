//! Image acquisition and decoding.
//!
//! Turns an image reference (in-memory bytes, a local file or a remote URL)
//! into a [`Bitmap`](crate::bitmap::Bitmap). Loading is the only async step
//! of a conversion; the converter itself stays synchronous.

mod error;
mod fetch;
mod loader;
mod retry;
mod source;

pub use error::DecodeError;
pub use fetch::{
    FetchSettings, ImageFetcher, DEFAULT_CONNECT_TIMEOUT, DEFAULT_MAX_BYTES, DEFAULT_TIMEOUT,
};
pub use loader::{decode_bytes, load};
pub use retry::{
    calculate_backoff, is_transient_network_error, is_transient_status, DEFAULT_BACKOFF_BASE,
    DEFAULT_BACKOFF_MAX, DEFAULT_NETWORK_RETRIES,
};
pub use source::ImageSource;
