use std::process::Command;

use image::{ImageFormat, RgbImage};
use tracing::debug;

use super::ExtractionError;

/// Default name of the OCR executable, resolved through `PATH`.
pub const DEFAULT_TESSERACT_COMMAND: &str = "tesseract";

/// Optical character recognition over a decoded image.
///
/// This trait lets the pipeline run against a stub engine in tests instead
/// of the external executable.
pub trait OcrEngine {
    /// Recognizes the text in an RGB image.
    ///
    /// Returns the raw recognized text; trimming is left to the caller.
    fn recognize(&self, image: &RgbImage) -> Result<String, ExtractionError>;
}

/// OCR engine backed by the `tesseract` command-line program.
///
/// The image is written to a temporary PNG and passed to
/// `tesseract <file> stdout`.
#[derive(Debug, Clone)]
pub struct TesseractOcr {
    command: String,
}

impl TesseractOcr {
    /// Creates an engine that runs the given executable.
    pub fn new(command: impl Into<String>) -> Self {
        Self {
            command: command.into(),
        }
    }

    /// Returns the executable this engine runs.
    pub fn command(&self) -> &str {
        &self.command
    }
}

impl Default for TesseractOcr {
    fn default() -> Self {
        Self::new(DEFAULT_TESSERACT_COMMAND)
    }
}

impl OcrEngine for TesseractOcr {
    fn recognize(&self, image: &RgbImage) -> Result<String, ExtractionError> {
        let scratch = tempfile::Builder::new()
            .prefix("prompt-chat-ocr-")
            .suffix(".png")
            .tempfile()
            .map_err(|source| ExtractionError::Io {
                path: std::env::temp_dir(),
                source,
            })?;

        image
            .save_with_format(scratch.path(), ImageFormat::Png)
            .map_err(ExtractionError::Image)?;

        debug!(command = %self.command, input = %scratch.path().display(), "running OCR");
        let output = Command::new(&self.command)
            .arg(scratch.path())
            .arg("stdout")
            .output()
            .map_err(|source| ExtractionError::OcrUnavailable {
                command: self.command.clone(),
                source,
            })?;

        if !output.status.success() {
            return Err(ExtractionError::Ocr {
                status: output.status.code(),
                stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
            });
        }

        Ok(String::from_utf8_lossy(&output.stdout).into_owned())
    }
}
