//! Test fixtures: small encoded images generated in memory.

use std::io::Cursor;
use std::path::{Path, PathBuf};

use image::{ImageFormat, Rgba, RgbaImage};
use tierra_studio::codec::ImageSource;

/// Representative product-shot colors
pub mod colors {
    /// Mid-saturation emerald green
    pub const EMERALD: [u8; 4] = [40, 140, 90, 255];

    /// Warm gold setting
    pub const GOLD: [u8; 4] = [200, 150, 100, 255];

    /// Underexposed gray backdrop
    pub const DIM_GRAY: [u8; 4] = [60, 60, 60, 255];
}

/// Emerald on a gray backdrop with a soft gradient, like a product shot.
pub fn product_shot(width: u32, height: u32) -> RgbaImage {
    RgbaImage::from_fn(width, height, |x, y| {
        let cx = x as i64 - width as i64 / 2;
        let cy = y as i64 - height as i64 / 2;
        let r2 = (width.min(height) as i64 / 4).pow(2);
        if cx * cx + cy * cy < r2 {
            Rgba(colors::EMERALD)
        } else {
            let v = (70 + (x + y) * 60 / (width + height)) as u8;
            Rgba([v, v, v.saturating_sub(5), 255])
        }
    })
}

pub fn encode(image: &RgbaImage, format: ImageFormat) -> Vec<u8> {
    let mut out = Cursor::new(Vec::new());
    match format {
        ImageFormat::Jpeg => image::DynamicImage::ImageRgba8(image.clone())
            .into_rgb8()
            .write_to(&mut out, format)
            .unwrap(),
        _ => image.write_to(&mut out, format).unwrap(),
    }
    out.into_inner()
}

pub fn png_bytes(width: u32, height: u32) -> Vec<u8> {
    encode(&product_shot(width, height), ImageFormat::Png)
}

pub fn jpeg_bytes(width: u32, height: u32) -> Vec<u8> {
    encode(&product_shot(width, height), ImageFormat::Jpeg)
}

pub fn solid_png(color: [u8; 4]) -> Vec<u8> {
    encode(&RgbaImage::from_pixel(8, 6, Rgba(color)), ImageFormat::Png)
}

/// Bytes with a JPEG signature but a garbage body.
pub fn corrupt_jpeg() -> Vec<u8> {
    let mut bytes = vec![0xFF, 0xD8, 0xFF, 0xE0];
    bytes.extend_from_slice(b"this is not really a jpeg at all");
    bytes
}

pub fn png_source(name: &str) -> ImageSource {
    ImageSource::bytes(name, png_bytes(32, 24))
}

pub fn corrupt_source(name: &str) -> ImageSource {
    ImageSource::bytes(name, corrupt_jpeg())
}

/// Write `bytes` to `dir/name` and return the path.
pub fn write_file(dir: &Path, name: &str, bytes: &[u8]) -> PathBuf {
    let path = dir.join(name);
    std::fs::write(&path, bytes).unwrap();
    path
}
