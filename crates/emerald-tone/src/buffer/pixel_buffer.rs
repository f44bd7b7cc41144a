//! Interleaved RGBA8 pixel grid.

use std::fmt;

use super::BufferError;

/// Bytes per pixel (R, G, B, A).
const CHANNELS: usize = 4;

/// A decoded image as interleaved 8-bit RGBA samples.
///
/// The constructor enforces `data.len() == width * height * 4` and rejects
/// zero-sized images, so every other stage can index without checks.
///
/// Buffers are never mutated in place by the pipeline. Each stage returns
/// a fresh buffer and the caller decides when to drop the old one.
///
/// # Example
///
/// ```
/// use emerald_tone::PixelBuffer;
///
/// let buffer = PixelBuffer::new(1, 2, vec![10, 20, 30, 255, 40, 50, 60, 255]).unwrap();
/// assert_eq!(buffer.pixel(0, 1), [40, 50, 60, 255]);
/// ```
#[derive(Clone, PartialEq, Eq)]
pub struct PixelBuffer {
    width: u32,
    height: u32,
    data: Vec<u8>,
}

impl PixelBuffer {
    /// Wrap raw RGBA samples.
    ///
    /// # Errors
    ///
    /// [`BufferError::ZeroDimension`] if either dimension is zero,
    /// [`BufferError::LengthMismatch`] if `data` has the wrong length.
    pub fn new(width: u32, height: u32, data: Vec<u8>) -> Result<Self, BufferError> {
        if width == 0 || height == 0 {
            return Err(BufferError::ZeroDimension { width, height });
        }
        let expected = width as usize * height as usize * CHANNELS;
        if data.len() != expected {
            return Err(BufferError::LengthMismatch {
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

    /// Create a buffer where every pixel has the same RGBA value.
    pub fn filled(width: u32, height: u32, rgba: [u8; 4]) -> Result<Self, BufferError> {
        let count = width as usize * height as usize;
        let data = rgba.iter().copied().cycle().take(count * CHANNELS).collect();
        Self::new(width, height, data)
    }

    /// Build a buffer from row-major RGBA pixels.
    pub fn from_pixels(width: u32, height: u32, pixels: &[[u8; 4]]) -> Result<Self, BufferError> {
        let data = pixels.iter().flat_map(|p| p.iter().copied()).collect();
        Self::new(width, height, data)
    }

    /// New buffer with this buffer's dimensions and the given samples.
    pub(crate) fn with_samples(&self, data: Vec<u8>) -> Self {
        debug_assert_eq!(data.len(), self.data.len());
        Self {
            width: self.width,
            height: self.height,
            data,
        }
    }

    #[inline]
    pub fn width(&self) -> u32 {
        self.width
    }

    #[inline]
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Number of pixels (`width * height`).
    #[inline]
    pub fn pixel_count(&self) -> usize {
        self.width as usize * self.height as usize
    }

    /// Raw interleaved RGBA samples.
    #[inline]
    pub fn as_bytes(&self) -> &[u8] {
        &self.data
    }

    /// Consume the buffer and return its samples.
    #[inline]
    pub fn into_raw(self) -> Vec<u8> {
        self.data
    }

    /// RGBA value at `(x, y)`.
    ///
    /// # Panics
    ///
    /// Panics if the coordinates are outside the image.
    #[inline]
    pub fn pixel(&self, x: u32, y: u32) -> [u8; 4] {
        assert!(x < self.width && y < self.height, "pixel out of bounds");
        let i = (y as usize * self.width as usize + x as usize) * CHANNELS;
        [
            self.data[i],
            self.data[i + 1],
            self.data[i + 2],
            self.data[i + 3],
        ]
    }

    /// Iterate over pixels in row-major order as 4-byte slices.
    #[inline]
    pub fn pixels(&self) -> std::slice::ChunksExact<'_, u8> {
        self.data.chunks_exact(CHANNELS)
    }
}

impl fmt::Debug for PixelBuffer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PixelBuffer")
            .field("width", &self.width)
            .field("height", &self.height)
            .field("bytes", &self.data.len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_accepts_matching_length() {
        let buffer = PixelBuffer::new(2, 3, vec![0; 24]).unwrap();
        assert_eq!(buffer.width(), 2);
        assert_eq!(buffer.height(), 3);
        assert_eq!(buffer.pixel_count(), 6);
        assert_eq!(buffer.as_bytes().len(), 24);
    }

    #[test]
    fn test_new_rejects_length_mismatch() {
        let err = PixelBuffer::new(2, 2, vec![0; 15]).unwrap_err();
        assert_eq!(
            err,
            BufferError::LengthMismatch {
                expected: 16,
                actual: 15
            }
        );
    }

    #[test]
    fn test_new_rejects_zero_dimension() {
        assert_eq!(
            PixelBuffer::new(0, 5, Vec::new()).unwrap_err(),
            BufferError::ZeroDimension {
                width: 0,
                height: 5
            }
        );
        assert!(PixelBuffer::new(5, 0, Vec::new()).is_err());
    }

    #[test]
    fn test_filled_repeats_pixel() {
        let buffer = PixelBuffer::filled(3, 2, [1, 2, 3, 4]).unwrap();
        assert!(buffer.pixels().all(|p| p == [1, 2, 3, 4]));
        assert_eq!(buffer.pixels().count(), 6);
    }

    #[test]
    fn test_from_pixels_row_major() {
        let buffer = PixelBuffer::from_pixels(
            2,
            2,
            &[[1, 0, 0, 255], [2, 0, 0, 255], [3, 0, 0, 255], [4, 0, 0, 255]],
        )
        .unwrap();
        assert_eq!(buffer.pixel(1, 0)[0], 2);
        assert_eq!(buffer.pixel(0, 1)[0], 3);
        assert_eq!(buffer.pixel(1, 1)[0], 4);
    }

    #[test]
    #[should_panic(expected = "pixel out of bounds")]
    fn test_pixel_out_of_bounds_panics() {
        let buffer = PixelBuffer::filled(2, 2, [0, 0, 0, 255]).unwrap();
        let _ = buffer.pixel(2, 0);
    }

    #[test]
    fn test_debug_omits_samples() {
        let buffer = PixelBuffer::filled(2, 2, [0, 0, 0, 255]).unwrap();
        assert_eq!(
            format!("{:?}", buffer),
            "PixelBuffer { width: 2, height: 2, bytes: 16 }"
        );
    }
}
