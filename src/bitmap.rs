//! Decoded pixel source consumed by the converter.

use std::fmt;

use crate::decode::DecodeError;

/// Bytes per RGBA sample.
pub const BYTES_PER_PIXEL: usize = 4;

/// A decoded RGBA bitmap.
///
/// Samples are stored row-major, four bytes per pixel (R, G, B, A). Width and
/// height are always at least 1 and `data.len() == width * height * 4`.
#[derive(Clone, PartialEq, Eq)]
pub struct Bitmap {
    width: u32,
    height: u32,
    data: Vec<u8>,
}

impl Bitmap {
    /// Build a bitmap from raw RGBA samples.
    ///
    /// # Errors
    ///
    /// Returns `DecodeError::InvalidDimensions` for a zero width or height and
    /// `DecodeError::BufferSize` when `data` does not hold exactly
    /// `width * height` samples.
    pub fn from_rgba(width: u32, height: u32, data: Vec<u8>) -> Result<Self, DecodeError> {
        if width == 0 || height == 0 {
            return Err(DecodeError::InvalidDimensions { width, height });
        }

        let expected = width as usize * height as usize * BYTES_PER_PIXEL;
        if data.len() != expected {
            return Err(DecodeError::BufferSize {
                expected,
                actual: data.len(),
            });
        }

        Ok(Self {
            width,
            height,
            data,
        })
    }

    /// Build a bitmap by filling every pixel with the same sample.
    pub fn filled(width: u32, height: u32, rgba: [u8; 4]) -> Result<Self, DecodeError> {
        let count = width as usize * height as usize;
        let data = rgba.repeat(count);
        Self::from_rgba(width, height, data)
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    /// RGBA sample at `(x, y)`.
    ///
    /// Coordinates outside the bitmap are clamped to the nearest edge pixel.
    pub fn pixel(&self, x: u32, y: u32) -> [u8; 4] {
        let x = x.min(self.width - 1) as usize;
        let y = y.min(self.height - 1) as usize;
        let idx = (y * self.width as usize + x) * BYTES_PER_PIXEL;
        [
            self.data[idx],
            self.data[idx + 1],
            self.data[idx + 2],
            self.data[idx + 3],
        ]
    }
}

// Pixel data is elided; a 200x200 image would otherwise print 160k numbers.
impl fmt::Debug for Bitmap {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Bitmap")
            .field("width", &self.width)
            .field("height", &self.height)
            .field("bytes", &self.data.len())
            .finish()
    }
}

impl TryFrom<image::RgbaImage> for Bitmap {
    type Error = DecodeError;

    fn try_from(img: image::RgbaImage) -> Result<Self, Self::Error> {
        let (width, height) = img.dimensions();
        Self::from_rgba(width, height, img.into_raw())
    }
}
