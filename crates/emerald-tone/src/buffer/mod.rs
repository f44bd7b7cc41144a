//! RGBA8 pixel storage.
//!
//! [`PixelBuffer`] is the value type every stage of the pipeline consumes
//! and produces. [`BufferError`] reports construction failures.

mod error;
mod pixel_buffer;

pub use error::BufferError;
pub use pixel_buffer::PixelBuffer;
