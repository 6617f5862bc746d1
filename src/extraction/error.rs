use std::path::PathBuf;

use thiserror::Error;

/// Errors that can occur while extracting text from a document or
/// persisting the corpus.
#[derive(Debug, Error)]
pub enum ExtractionError {
    /// The document could not be opened or read.
    #[error("failed to read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The PDF could not be parsed.
    #[error("invalid PDF: {0}")]
    Pdf(#[source] lopdf::Error),

    /// The image could not be decoded.
    #[error("invalid image: {0}")]
    Image(#[source] image::ImageError),

    /// A plain-text document is not valid UTF-8.
    #[error("file is not valid UTF-8: {0}")]
    Decode(#[source] std::string::FromUtf8Error),

    /// The OCR executable could not be started.
    #[error("OCR engine `{command}` could not be started: {source}")]
    OcrUnavailable {
        command: String,
        #[source]
        source: std::io::Error,
    },

    /// The OCR executable ran but reported a failure.
    #[error("OCR failed (exit status {}): {stderr}", status.map_or_else(|| "unknown".to_string(), |s| s.to_string()))]
    Ocr { status: Option<i32>, stderr: String },

    /// The corpus could not be written to or read from the cache artifact.
    #[error("cache artifact {} is not accessible: {source}", path.display())]
    Cache {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}
