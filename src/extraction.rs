//! Document text extraction.
//!
//! Turns an ordered list of uploaded files (PDF, image, plain text) into a
//! single corpus string and persists it to the cache artifact.
mod cache;
mod document;
mod error;
mod ocr;
mod pdf;
mod picture;
mod pipeline;
mod text;

pub use cache::CorpusCache;
pub use document::{Document, DocumentKind};
pub use error::ExtractionError;
pub use ocr::{DEFAULT_TESSERACT_COMMAND, OcrEngine, TesseractOcr};
pub use pipeline::{DocumentFailure, ExtractionReport, Extractor, FailurePolicy};
