use std::fmt;
use std::str::FromStr;

use emerald_tone::PixelBuffer;
use image::codecs::jpeg::JpegEncoder;
use image::codecs::png::PngEncoder;
use image::imageops::{self, FilterType};
use image::{DynamicImage, ExtendedColorType, ImageEncoder, RgbaImage};
use serde::{Deserialize, Serialize};

use crate::error::EncodeError;

/// Longest side of an upload-sized image.
pub const UPLOAD_MAX_DIMENSION: u32 = 1200;

/// Output container format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    #[default]
    Jpeg,
    Png,
}

impl OutputFormat {
    pub fn mime_type(self) -> &'static str {
        match self {
            OutputFormat::Jpeg => "image/jpeg",
            OutputFormat::Png => "image/png",
        }
    }

    pub fn extension(self) -> &'static str {
        match self {
            OutputFormat::Jpeg => "jpg",
            OutputFormat::Png => "png",
        }
    }
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OutputFormat::Jpeg => f.write_str("JPEG"),
            OutputFormat::Png => f.write_str("PNG"),
        }
    }
}

impl FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "jpeg" | "jpg" => Ok(OutputFormat::Jpeg),
            "png" => Ok(OutputFormat::Png),
            other => Err(format!("unknown output format '{other}' (expected jpeg or png)")),
        }
    }
}

/// How a normalized buffer is written out.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EncodeOptions {
    pub format: OutputFormat,
    /// JPEG quality, 1-100. Ignored for PNG.
    pub quality: u8,
    /// Downscale so the longest side fits, never upscale.
    pub max_dimension: Option<u32>,
}

impl EncodeOptions {
    /// Full-size JPEG at quality 92, the studio's final output.
    pub const fn final_output() -> Self {
        Self {
            format: OutputFormat::Jpeg,
            quality: 92,
            max_dimension: None,
        }
    }

    /// JPEG at quality 85 with the longest side capped for upload.
    pub const fn upload() -> Self {
        Self {
            format: OutputFormat::Jpeg,
            quality: 85,
            max_dimension: Some(UPLOAD_MAX_DIMENSION),
        }
    }

    pub fn format(mut self, format: OutputFormat) -> Self {
        self.format = format;
        self
    }

    pub fn quality(mut self, quality: u8) -> Self {
        self.quality = quality;
        self
    }

    pub fn max_dimension(mut self, max: Option<u32>) -> Self {
        self.max_dimension = max;
        self
    }
}

impl Default for EncodeOptions {
    fn default() -> Self {
        Self::final_output()
    }
}

/// Encode a pixel buffer. JPEG output drops the alpha channel.
pub fn encode(buffer: &PixelBuffer, options: &EncodeOptions) -> Result<Vec<u8>, EncodeError> {
    if options.format == OutputFormat::Jpeg && !(1..=100).contains(&options.quality) {
        return Err(EncodeError::InvalidQuality(options.quality));
    }

    let image = RgbaImage::from_raw(buffer.width(), buffer.height(), buffer.as_bytes().to_vec())
        .ok_or_else(|| codec_error(options.format, "buffer does not match its dimensions"))?;

    let image = match options.max_dimension {
        Some(max) => {
            let (width, height) = fit_within(image.width(), image.height(), max);
            if (width, height) == image.dimensions() {
                image
            } else {
                imageops::resize(&image, width, height, FilterType::Lanczos3)
            }
        }
        None => image,
    };

    let (width, height) = image.dimensions();
    let mut out = Vec::new();
    match options.format {
        OutputFormat::Jpeg => {
            let rgb = DynamicImage::ImageRgba8(image).into_rgb8();
            JpegEncoder::new_with_quality(&mut out, options.quality)
                .write_image(rgb.as_raw(), width, height, ExtendedColorType::Rgb8)
                .map_err(|e| codec_error(options.format, e))?;
        }
        OutputFormat::Png => {
            PngEncoder::new(&mut out)
                .write_image(image.as_raw(), width, height, ExtendedColorType::Rgba8)
                .map_err(|e| codec_error(options.format, e))?;
        }
    }

    tracing::trace!(
        format = %options.format,
        width,
        height,
        bytes = out.len(),
        "Encoded image"
    );
    Ok(out)
}

/// Dimensions scaled so the longest side is at most `max`, aspect
/// ratio preserved. Images already within bounds are returned unchanged.
fn fit_within(width: u32, height: u32, max: u32) -> (u32, u32) {
    let longest = width.max(height);
    if max == 0 || longest <= max {
        return (width, height);
    }
    let scale = max as f64 / longest as f64;
    let scaled = |v: u32| ((v as f64 * scale).round() as u32).max(1);
    (scaled(width), scaled(height))
}

fn codec_error(format: OutputFormat, err: impl fmt::Display) -> EncodeError {
    let format = match format {
        OutputFormat::Jpeg => "JPEG",
        OutputFormat::Png => "PNG",
    };
    EncodeError::Codec {
        format,
        message: err.to_string(),
    }
}
