//! Typed errors for the note pipeline.
//!
//! Uses `thiserror` for library errors; the binary wraps them with `anyhow`.

use std::path::PathBuf;

use thiserror::Error;

use crate::types::format::SupportedFormat;

/// Errors raised while processing a run or a single file.
#[derive(Debug, Error)]
pub enum PipelineError {
    /// Input directory could not be listed
    #[error("failed to read directory {path}: {source}")]
    ReadDir {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Text extraction failed
    #[error("extraction failed: {0}")]
    Extract(#[from] ExtractError),

    /// AI service unavailable or failed
    #[error("AI service error: {0}")]
    AI(#[source] Box<dyn std::error::Error + Send + Sync>),

    /// The generation service answered outside the agreed response shape
    #[error("formatter contract violation: {0}")]
    ContractViolation(String),

    /// An extractor was registered for a format it does not handle
    #[error("{found} extractor placed in the {slot} slot")]
    MisplacedExtractor {
        slot: SupportedFormat,
        found: SupportedFormat,
    },

    /// Natural-language request could not be resolved to a directory
    #[error("invalid request: {0}")]
    InvalidRequest(String),

    /// Note could not be written
    #[error("failed to write {path}: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Errors raised by extractors.
#[derive(Debug, Error)]
pub enum ExtractError {
    /// File could not be read
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// PDF could not be parsed
    #[error("PDF error: {0}")]
    Pdf(String),

    /// OCR engine missing or failed
    #[error("OCR error: {0}")]
    Ocr(String),

    /// Remote transcription failed
    #[error("transcription error: {0}")]
    Transcription(#[source] Box<dyn std::error::Error + Send + Sync>),
}

/// Result type alias for pipeline operations.
pub type Result<T> = std::result::Result<T, PipelineError>;

/// Result type alias for extractor operations.
pub type ExtractResult<T> = std::result::Result<T, ExtractError>;
