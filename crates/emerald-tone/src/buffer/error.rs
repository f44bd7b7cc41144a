//! Error type for pixel buffer construction.

use std::fmt;

/// Error returned when a [`PixelBuffer`](super::PixelBuffer) cannot be built.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BufferError {
    /// Width or height is zero
    ZeroDimension {
        /// Requested width
        width: u32,
        /// Requested height
        height: u32,
    },
    /// Sample count does not equal `width * height * 4`
    LengthMismatch {
        /// Expected number of bytes
        expected: usize,
        /// Number of bytes supplied
        actual: usize,
    },
}

impl fmt::Display for BufferError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BufferError::ZeroDimension { width, height } => {
                write!(f, "image has zero dimension ({}x{})", width, height)
            }
            BufferError::LengthMismatch { expected, actual } => write!(
                f,
                "pixel data length {} does not match dimensions (expected {})",
                actual, expected
            ),
        }
    }
}

impl std::error::Error for BufferError {}
