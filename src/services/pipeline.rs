use std::time::Instant;

use chrono::Utc;
use emerald_tone::{analyze, NormalizationSettings, Normalizer};

use crate::codec::{decode, encode, sniff_mime, EncodeOptions, ImageSource};
use crate::error::PipelineError;
use crate::models::{EncodedImage, ImageId, ProcessedImage};

/// Turns one input image into a [`ProcessedImage`].
#[derive(Debug, Clone, Default)]
pub struct ImagePipeline {
    encode_options: EncodeOptions,
}

impl ImagePipeline {
    pub fn new(encode_options: EncodeOptions) -> Self {
        Self { encode_options }
    }

    pub fn encode_options(&self) -> &EncodeOptions {
        &self.encode_options
    }

    /// Read, decode, analyze, normalize and encode a single image.
    ///
    /// Uses spawn_blocking so decoding and the per-pixel pass do not stall
    /// the async runtime.
    pub async fn process(
        &self,
        source: &ImageSource,
        settings: &NormalizationSettings,
    ) -> Result<ProcessedImage, PipelineError> {
        let name = source.name();
        let bytes = source.read().await?;
        self.process_in_blocking_context(name, bytes, *settings)
            .await
    }

    async fn process_in_blocking_context(
        &self,
        name: String,
        bytes: Vec<u8>,
        settings: NormalizationSettings,
    ) -> Result<ProcessedImage, PipelineError> {
        let options = self.encode_options;

        tokio::task::spawn_blocking(move || process_bytes(name, bytes, &settings, &options))
            .await
            .map_err(|e| PipelineError::Task(e.to_string()))?
    }
}

/// Synchronous body of [`ImagePipeline::process`].
pub fn process_bytes(
    name: String,
    bytes: Vec<u8>,
    settings: &NormalizationSettings,
    options: &EncodeOptions,
) -> Result<ProcessedImage, PipelineError> {
    let start = Instant::now();

    let pixels = decode(&bytes)?;
    let decode_time = start.elapsed();

    let analysis = analyze(&pixels);
    let output = Normalizer::new(*settings).process(&pixels, &analysis);
    let normalize_time = start.elapsed() - decode_time;

    let normalized = encode(&output, options)?;
    let total_time = start.elapsed();

    tracing::debug!(
        name = %name,
        width = pixels.width(),
        height = pixels.height(),
        brightness = %format!("{:.1}", analysis.brightness),
        contrast = %format!("{:.1}", analysis.contrast),
        decode_ms = decode_time.as_millis() as u64,
        normalize_ms = normalize_time.as_millis() as u64,
        total_ms = total_time.as_millis() as u64,
        "Normalized image"
    );

    let original_mime = sniff_mime(&bytes).unwrap_or("application/octet-stream");

    Ok(ProcessedImage {
        id: ImageId::from_content(&normalized),
        name,
        original: EncodedImage::new(original_mime, bytes),
        normalized: EncodedImage::new(options.format.mime_type(), normalized),
        analysis,
        output,
        processed_at: Utc::now(),
    })
}
