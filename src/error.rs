use emerald_tone::BufferError;
use thiserror::Error;

use crate::services::BatchReport;

/// An input could not be turned into a pixel buffer.
#[derive(Debug, Error)]
pub enum DecodeError {
    #[error("Image source is empty")]
    Empty,

    #[error("Unsupported image format: {0}")]
    UnsupportedFormat(String),

    #[error("Corrupt image data: {0}")]
    Corrupt(String),

    #[error("Invalid data URI: {0}")]
    InvalidDataUri(String),

    #[error("Invalid pixel buffer: {0}")]
    Buffer(#[from] BufferError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// A normalized buffer could not be re-encoded.
#[derive(Debug, Error)]
pub enum EncodeError {
    #[error("{format} encode error: {message}")]
    Codec {
        format: &'static str,
        message: String,
    },

    #[error("Invalid quality {0} (expected 1-100)")]
    InvalidQuality(u8),
}

/// Failure while processing a single image.
#[derive(Debug, Error)]
pub enum PipelineError {
    #[error("Decode error: {0}")]
    Decode(#[from] DecodeError),

    #[error("Encode error: {0}")]
    Encode(#[from] EncodeError),

    #[error("Processing task failed: {0}")]
    Task(String),
}

/// Failure of a whole batch run.
#[derive(Debug, Error)]
pub enum BatchError {
    #[error("Batch aborted at file {} ({name}): {source}", .index + 1)]
    Failed {
        /// Zero-based position of the failing input
        index: usize,
        name: String,
        source: PipelineError,
    },

    #[error("Batch cancelled after {} of {total} files", .report.total())]
    Cancelled {
        /// Everything that finished before the cancel was seen
        report: BatchReport,
        total: usize,
    },
}

/// Failure reading or writing the stored settings.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("Settings file error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Settings parse error: {0}")]
    Parse(#[from] serde_yaml::Error),
}
