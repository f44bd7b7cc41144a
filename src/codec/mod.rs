//! Conversion between encoded image files and [`PixelBuffer`]s.
//!
//! [`PixelBuffer`]: emerald_tone::PixelBuffer

pub mod data_uri;
pub mod decode;
pub mod encode;
pub mod source;

pub use decode::{decode, load_pixels, sniff_mime};
pub use encode::{encode, EncodeOptions, OutputFormat, UPLOAD_MAX_DIMENSION};
pub use source::ImageSource;
