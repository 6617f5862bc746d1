use std::io;
use std::path::Path;

use image::{ImageError, ImageReader};

use super::{ExtractionError, OcrEngine};

/// Decodes an image, converts it to 8-bit RGB and runs OCR on it.
///
/// The format is sniffed from the file contents, so a PNG saved with a
/// `.jpg` suffix still decodes. The recognized text is trimmed of
/// surrounding whitespace.
pub(crate) fn extract_image_text(
    path: &Path,
    ocr: &dyn OcrEngine,
) -> Result<String, ExtractionError> {
    let io_error = |source: io::Error| ExtractionError::Io {
        path: path.to_path_buf(),
        source,
    };
    let decoded = ImageReader::open(path)
        .and_then(ImageReader::with_guessed_format)
        .map_err(io_error)?
        .decode()
        .map_err(|err| match err {
            ImageError::IoError(source) => io_error(source),
            other => ExtractionError::Image(other),
        })?;

    let rgb = decoded.to_rgb8();
    let text = ocr.recognize(&rgb)?;
    Ok(text.trim().to_string())
}
