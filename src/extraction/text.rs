use std::path::Path;

use super::ExtractionError;

/// Reads a plain-text document as UTF-8.
///
/// Invalid UTF-8 is reported as [`ExtractionError::Decode`] instead of being
/// replaced or skipped.
pub(crate) fn extract_plain_text(path: &Path) -> Result<String, ExtractionError> {
    let bytes = std::fs::read(path).map_err(|source| ExtractionError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    String::from_utf8(bytes).map_err(ExtractionError::Decode)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn content_is_returned_unchanged() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("notes.txt");
        std::fs::write(&path, "  Mitochondria are the powerhouse.\n\n").unwrap();

        let text = extract_plain_text(&path).unwrap();
        assert_eq!(text, "  Mitochondria are the powerhouse.\n\n");
    }

    #[test]
    fn invalid_utf8_is_a_decode_error() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("latin1.txt");
        std::fs::write(&path, [b'c', b'a', b'f', 0xe9]).unwrap();

        let err = extract_plain_text(&path).unwrap_err();
        assert!(matches!(err, ExtractionError::Decode(_)));
    }

    #[test]
    fn missing_file_is_an_io_error() {
        let dir = tempdir().unwrap();
        let err = extract_plain_text(&dir.path().join("absent.txt")).unwrap_err();
        assert!(matches!(err, ExtractionError::Io { .. }));
    }
}
