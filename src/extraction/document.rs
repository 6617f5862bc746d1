use std::fmt;
use std::path::{Path, PathBuf};

/// Kind of document, inferred from the file suffix.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DocumentKind {
    /// Portable Document Format; text is read page by page.
    Pdf,
    /// Raster image; text is recovered with OCR.
    Image,
    /// UTF-8 plain text, read as-is.
    PlainText,
}

impl DocumentKind {
    /// Infers the kind from a file suffix, ignoring case.
    ///
    /// Returns `None` for unsupported suffixes.
    ///
    /// # Examples
    ///
    /// ```
    /// use prompt_chat::extraction::DocumentKind;
    ///
    /// assert_eq!(DocumentKind::from_extension("PDF"), Some(DocumentKind::Pdf));
    /// assert_eq!(DocumentKind::from_extension("jpeg"), Some(DocumentKind::Image));
    /// assert_eq!(DocumentKind::from_extension("docx"), None);
    /// ```
    #[must_use]
    pub fn from_extension(extension: &str) -> Option<Self> {
        match extension.to_ascii_lowercase().as_str() {
            "pdf" => Some(Self::Pdf),
            "jpg" | "jpeg" | "png" => Some(Self::Image),
            "txt" => Some(Self::PlainText),
            _ => None,
        }
    }

    /// Human-readable noun used in failure descriptions.
    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Self::Pdf => "PDF",
            Self::Image => "image",
            Self::PlainText => "text file",
        }
    }
}

impl fmt::Display for DocumentKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Pdf => write!(f, "pdf"),
            Self::Image => write!(f, "image"),
            Self::PlainText => write!(f, "plain_text"),
        }
    }
}

/// A file queued for extraction together with its inferred kind.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Document {
    path: PathBuf,
    kind: DocumentKind,
}

impl Document {
    /// Classifies a path by its suffix.
    ///
    /// Returns `None` when the suffix is missing or unsupported; such files
    /// are skipped by the pipeline.
    pub fn from_path(path: impl Into<PathBuf>) -> Option<Self> {
        let path = path.into();
        let kind = path
            .extension()
            .and_then(|ext| ext.to_str())
            .and_then(DocumentKind::from_extension)?;
        Some(Self { path, kind })
    }

    /// Returns the path of the document.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Returns the inferred kind.
    pub fn kind(&self) -> DocumentKind {
        self.kind
    }

    /// Returns the file name for display, falling back to the full path.
    pub fn file_name(&self) -> String {
        self.path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_else(|| self.path.display().to_string())
    }
}
