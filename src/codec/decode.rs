use emerald_tone::PixelBuffer;
use image::ImageError;

use crate::codec::ImageSource;
use crate::error::DecodeError;

/// Decode an encoded image into RGBA8 pixels at its natural size.
///
/// The format is sniffed from the leading bytes; file extensions and
/// declared MIME types are not trusted.
pub fn decode(bytes: &[u8]) -> Result<PixelBuffer, DecodeError> {
    if bytes.is_empty() {
        return Err(DecodeError::Empty);
    }

    let format = image::guess_format(bytes)
        .map_err(|_| DecodeError::UnsupportedFormat("unrecognized file signature".to_string()))?;

    let image = image::load_from_memory_with_format(bytes, format).map_err(|e| match e {
        ImageError::Unsupported(u) => DecodeError::UnsupportedFormat(u.to_string()),
        other => DecodeError::Corrupt(other.to_string()),
    })?;

    let rgba = image.into_rgba8();
    let (width, height) = rgba.dimensions();
    Ok(PixelBuffer::new(width, height, rgba.into_raw())?)
}

/// MIME type of an encoded image, if the format is recognized.
pub fn sniff_mime(bytes: &[u8]) -> Option<&'static str> {
    image::guess_format(bytes).ok().map(|f| f.to_mime_type())
}

/// Read a source and decode it on the blocking pool.
pub async fn load_pixels(source: &ImageSource) -> Result<PixelBuffer, DecodeError> {
    let bytes = source.read().await?;
    tokio::task::spawn_blocking(move || decode(&bytes))
        .await
        .map_err(|e| DecodeError::Io(std::io::Error::other(format!("Decode task failed: {e}"))))?
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{ImageFormat, Rgba, RgbaImage};
    use std::io::Cursor;

    fn png_bytes(width: u32, height: u32, color: [u8; 4]) -> Vec<u8> {
        let image = RgbaImage::from_pixel(width, height, Rgba(color));
        let mut out = Cursor::new(Vec::new());
        image.write_to(&mut out, ImageFormat::Png).unwrap();
        out.into_inner()
    }

    #[test]
    fn test_decode_png() {
        let buffer = decode(&png_bytes(3, 2, [10, 200, 30, 128])).unwrap();
        assert_eq!(buffer.width(), 3);
        assert_eq!(buffer.height(), 2);
        assert_eq!(buffer.pixel(2, 1), [10, 200, 30, 128]);
    }

    #[test]
    fn test_decode_empty() {
        assert!(matches!(decode(&[]), Err(DecodeError::Empty)));
    }

    #[test]
    fn test_decode_unknown_signature() {
        let err = decode(b"definitely not an image").unwrap_err();
        assert!(matches!(err, DecodeError::UnsupportedFormat(_)));
    }

    #[test]
    fn test_decode_truncated_png() {
        let mut bytes = png_bytes(8, 8, [1, 2, 3, 255]);
        bytes.truncate(40);
        let err = decode(&bytes).unwrap_err();
        assert!(matches!(err, DecodeError::Corrupt(_)), "got {err:?}");
    }

    #[test]
    fn test_sniff_mime() {
        assert_eq!(sniff_mime(&png_bytes(1, 1, [0; 4])), Some("image/png"));
        assert_eq!(sniff_mime(b"nope"), None);
    }

    #[tokio::test]
    async fn test_load_pixels_from_bytes() {
        let source = ImageSource::bytes("dot.png", png_bytes(1, 1, [9, 8, 7, 255]));
        let buffer = load_pixels(&source).await.unwrap();
        assert_eq!(buffer.pixel(0, 0), [9, 8, 7, 255]);
    }
}
