use std::fmt;
use std::path::{Path, PathBuf};

use tracing::{debug, info, warn};

use super::pdf::extract_pdf_text;
use super::picture::extract_image_text;
use super::text::extract_plain_text;
use super::{CorpusCache, Document, DocumentKind, ExtractionError, OcrEngine, TesseractOcr};

/// What to do with a document whose extraction failed.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum FailurePolicy {
    /// Leave the document out of the corpus and report the failure in
    /// [`ExtractionReport::failures`].
    #[default]
    Exclude,
    /// Also write a line such as `Error reading PDF: ...` into the corpus at
    /// the document's position.
    Inline,
}

/// A document that could not be extracted.
#[derive(Debug)]
pub struct DocumentFailure {
    document: Document,
    error: ExtractionError,
}

impl DocumentFailure {
    /// Returns the document that failed.
    pub fn document(&self) -> &Document {
        &self.document
    }

    /// Returns the underlying error.
    pub fn error(&self) -> &ExtractionError {
        &self.error
    }

    /// The description written into the corpus under [`FailurePolicy::Inline`].
    pub fn inline_description(&self) -> String {
        format!("Error reading {}: {}", self.document.kind().label(), self.error)
    }
}

impl fmt::Display for DocumentFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.document.file_name(), self.error)
    }
}

/// Outcome of one extraction run.
#[derive(Debug, Default)]
pub struct ExtractionReport {
    corpus: String,
    documents: Vec<Document>,
    skipped: Vec<PathBuf>,
    failures: Vec<DocumentFailure>,
}

impl ExtractionReport {
    /// The concatenated text, one trailing newline per extracted document.
    pub fn corpus(&self) -> &str {
        &self.corpus
    }

    /// Consumes the report and returns the corpus.
    pub fn into_corpus(self) -> String {
        self.corpus
    }

    /// Supported documents in upload order, including those that failed.
    pub fn documents(&self) -> &[Document] {
        &self.documents
    }

    /// Paths skipped because their type is not supported.
    pub fn skipped(&self) -> &[PathBuf] {
        &self.skipped
    }

    /// Documents whose extraction failed.
    pub fn failures(&self) -> &[DocumentFailure] {
        &self.failures
    }
}

/// Converts uploaded files into a corpus and persists it to the cache.
///
/// # Examples
///
/// ```no_run
/// use prompt_chat::extraction::{CorpusCache, Extractor};
///
/// # fn main() -> Result<(), prompt_chat::extraction::ExtractionError> {
/// let extractor = Extractor::new(CorpusCache::new("extracted_text.txt"));
/// let report = extractor.extract(&["chapter1.pdf", "diagram.png", "summary.txt"])?;
/// println!("{}", report.corpus());
/// # Ok(())
/// # }
/// ```
pub struct Extractor {
    cache: CorpusCache,
    ocr: Box<dyn OcrEngine>,
    policy: FailurePolicy,
}

impl Extractor {
    /// Creates an extractor writing to `cache`, using the `tesseract`
    /// executable for OCR and excluding failures from the corpus.
    pub fn new(cache: CorpusCache) -> Self {
        Self {
            cache,
            ocr: Box::new(TesseractOcr::default()),
            policy: FailurePolicy::default(),
        }
    }

    /// Replaces the OCR engine used for images.
    #[must_use]
    pub fn with_ocr(mut self, ocr: Box<dyn OcrEngine>) -> Self {
        self.ocr = ocr;
        self
    }

    /// Sets how failed documents are reflected in the corpus.
    #[must_use]
    pub fn with_failure_policy(mut self, policy: FailurePolicy) -> Self {
        self.policy = policy;
        self
    }

    /// Returns the cache this extractor writes to.
    pub fn cache(&self) -> &CorpusCache {
        &self.cache
    }

    /// Returns the configured failure policy.
    pub fn failure_policy(&self) -> FailurePolicy {
        self.policy
    }

    /// Extracts every supported document in order and writes the corpus to
    /// the cache artifact, replacing its previous content.
    ///
    /// Unsupported files are skipped. A failing document never aborts the
    /// batch; only a failed cache write is returned as an error.
    pub fn extract<P: AsRef<Path>>(&self, paths: &[P]) -> Result<ExtractionReport, ExtractionError> {
        let mut report = ExtractionReport::default();

        for path in paths {
            let path = path.as_ref();
            let Some(document) = Document::from_path(path) else {
                debug!(path = %path.display(), "skipping unsupported file type");
                report.skipped.push(path.to_path_buf());
                continue;
            };

            debug!(path = %path.display(), kind = %document.kind(), "extracting");
            match self.extract_document(&document) {
                Ok(text) => {
                    report.corpus.push_str(&text);
                    report.corpus.push('\n');
                }
                Err(error) => {
                    warn!(path = %path.display(), error = %error, "extraction failed");
                    let failure = DocumentFailure {
                        document: document.clone(),
                        error,
                    };
                    if self.policy == FailurePolicy::Inline {
                        report.corpus.push_str(&failure.inline_description());
                        report.corpus.push('\n');
                    }
                    report.failures.push(failure);
                }
            }
            report.documents.push(document);
        }

        self.cache.write(&report.corpus)?;
        info!(
            documents = report.documents.len(),
            skipped = report.skipped.len(),
            failed = report.failures.len(),
            bytes = report.corpus.len(),
            "extraction finished"
        );

        Ok(report)
    }

    fn extract_document(&self, document: &Document) -> Result<String, ExtractionError> {
        match document.kind() {
            DocumentKind::Pdf => extract_pdf_text(document.path()),
            DocumentKind::Image => extract_image_text(document.path(), self.ocr.as_ref()),
            DocumentKind::PlainText => extract_plain_text(document.path()),
        }
    }
}
