//! Turning image references into bitmaps.

use crate::bitmap::Bitmap;

use super::error::DecodeError;
use super::fetch::ImageFetcher;
use super::source::ImageSource;

/// Decode encoded image bytes (PNG, JPEG, GIF, WebP, ...) to an RGBA bitmap.
///
/// The container format is sniffed from the bytes. Animated formats yield
/// their first frame.
pub fn decode_bytes(bytes: &[u8]) -> Result<Bitmap, DecodeError> {
    let img = image::load_from_memory(bytes)?;
    log::debug!(
        "Decoded {:?} image {}x{}",
        img.color(),
        img.width(),
        img.height()
    );
    Bitmap::try_from(img.to_rgba8())
}

/// Load and decode an image from any supported source.
///
/// Files are read with `tokio::fs`, URLs are downloaded with `fetcher`, and
/// decoding runs on the blocking pool so callers on the async runtime never
/// stall on a large image.
pub async fn load(source: &ImageSource, fetcher: &ImageFetcher) -> Result<Bitmap, DecodeError> {
    log::info!("Loading image from {}", source);

    let bytes = match source {
        ImageSource::Bytes(bytes) => bytes.clone(),
        ImageSource::File(path) => tokio::fs::read(path).await?,
        ImageSource::Url(url) => fetcher.fetch(url).await?,
    };

    let bitmap = tokio::task::spawn_blocking(move || decode_bytes(&bytes)).await??;
    log::info!("Loaded {}x{} bitmap", bitmap.width(), bitmap.height());
    Ok(bitmap)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    fn encode_png(img: &image::RgbaImage) -> Vec<u8> {
        let mut bytes = Vec::new();
        img.write_to(&mut Cursor::new(&mut bytes), image::ImageFormat::Png)
            .unwrap();
        bytes
    }

    #[test]
    fn test_decode_png_bytes() {
        let img = image::RgbaImage::from_pixel(3, 2, image::Rgba([1, 2, 3, 4]));
        let bitmap = decode_bytes(&encode_png(&img)).unwrap();
        assert_eq!(bitmap.width(), 3);
        assert_eq!(bitmap.height(), 2);
        assert_eq!(bitmap.pixel(2, 1), [1, 2, 3, 4]);
    }

    #[test]
    fn test_decode_garbage_fails() {
        let result = decode_bytes(b"definitely not an image");
        assert!(matches!(result, Err(DecodeError::Image(_))));
    }

    #[tokio::test]
    async fn test_load_from_bytes() {
        let img = image::RgbaImage::from_pixel(5, 5, image::Rgba([9, 9, 9, 255]));
        let fetcher = ImageFetcher::new().unwrap();
        let bitmap = load(&ImageSource::Bytes(encode_png(&img)), &fetcher)
            .await
            .unwrap();
        assert_eq!(bitmap.width(), 5);
    }

    #[tokio::test]
    async fn test_load_missing_file_is_io_error() {
        let fetcher = ImageFetcher::new().unwrap();
        let source = ImageSource::File("/nonexistent/glyphgrid/none.png".into());
        let result = load(&source, &fetcher).await;
        assert!(matches!(result, Err(DecodeError::Io(_))));
    }
}
