//! Assertion helpers for tests.

use emerald_tone::PixelBuffer;
use pretty_assertions::assert_eq;
use tierra_studio::models::ProcessedImage;

/// Assert bytes start with the JPEG SOI marker
pub fn assert_jpeg(bytes: &[u8]) {
    assert!(
        bytes.starts_with(&[0xFF, 0xD8]),
        "Expected JPEG, got {} bytes starting with {:?}",
        bytes.len(),
        &bytes[..4.min(bytes.len())]
    );
}

/// Assert every channel of every pixel is within `tolerance` of the other
pub fn assert_buffers_close(a: &PixelBuffer, b: &PixelBuffer, tolerance: u8) {
    assert_eq!((a.width(), a.height()), (b.width(), b.height()));
    for (i, (pa, pb)) in a.pixels().zip(b.pixels()).enumerate() {
        for c in 0..4 {
            assert!(
                pa[c].abs_diff(pb[c]) <= tolerance,
                "pixel {i} channel {c}: {} vs {}",
                pa[c],
                pb[c]
            );
        }
    }
}

/// Assert a result is internally consistent
pub fn assert_valid_result(result: &ProcessedImage) {
    assert_jpeg(&result.normalized.bytes);
    assert_eq!(result.normalized.mime_type, "image/jpeg");
    assert_eq!(result.id.as_str().len(), 16);
    assert!(result.normalized.to_data_uri().starts_with("data:image/jpeg;base64,"));
    assert_eq!(
        result.analysis.histograms.luminance.total(),
        result.output.pixel_count() as u64
    );
}
