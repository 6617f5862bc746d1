use std::path::Path;

use lopdf::Document;
use tracing::debug;

use super::ExtractionError;

/// Extracts the text layer of every page, in page order.
///
/// A page whose text cannot be extracted contributes an empty string rather
/// than failing the document.
pub(crate) fn extract_pdf_text(path: &Path) -> Result<String, ExtractionError> {
    let document = Document::load(path).map_err(|err| match err {
        lopdf::Error::IO(source) => ExtractionError::Io {
            path: path.to_path_buf(),
            source,
        },
        other => ExtractionError::Pdf(other),
    })?;

    // get_pages is keyed by page number, so iteration is already in page order
    let page_numbers: Vec<u32> = document.get_pages().keys().copied().collect();

    let mut text = String::new();
    for page in page_numbers {
        match document.extract_text(&[page]) {
            Ok(page_text) => text.push_str(&page_text),
            Err(err) => debug!(page, error = %err, "page yielded no text"),
        }
    }

    Ok(text)
}
