use std::path::Path;

use anyhow::{Context, Result};
use tracing::{debug, info};

use crate::answerer::CorpusIndex;
use crate::extraction::{CorpusCache, ExtractionReport, Extractor};

/// Answer given when a question arrives before any corpus exists.
pub const UPLOAD_FIRST_MESSAGE: &str = "Please upload files first.";

/// A study-assistant session.
///
/// Holds the corpus of the last upload in memory and falls back to the cache
/// artifact when nothing has been uploaded in this session. This layer is
/// UI-independent: the CLI drives it, and so could any other front end.
///
/// # Examples
///
/// ```no_run
/// use prompt_chat::extraction::{CorpusCache, Extractor};
/// use prompt_chat::StudySession;
///
/// # fn main() -> anyhow::Result<()> {
/// let mut session = StudySession::new(Extractor::new(CorpusCache::new("extracted_text.txt")));
/// session.upload(&["biology.pdf"])?;
/// println!("{}", session.ask("What do mitochondria do?")?);
/// # Ok(())
/// # }
/// ```
pub struct StudySession {
    extractor: Extractor,
    index: Option<CorpusIndex>,
    uploaded_files: Vec<String>,
}

impl StudySession {
    /// Creates a session that extracts with `extractor` and reads back from
    /// its cache.
    pub fn new(extractor: Extractor) -> Self {
        Self {
            extractor,
            index: None,
            uploaded_files: Vec::new(),
        }
    }

    /// Returns the cache artifact this session uses.
    pub fn cache(&self) -> &CorpusCache {
        self.extractor.cache()
    }

    /// File names of the last upload, in upload order.
    pub fn uploaded_files(&self) -> &[String] {
        &self.uploaded_files
    }

    /// Extracts `paths` and makes the result the session corpus.
    ///
    /// An empty list leaves the session unchanged, like a cancelled file
    /// picker.
    pub fn upload<P: AsRef<Path>>(&mut self, paths: &[P]) -> Result<Option<ExtractionReport>> {
        if paths.is_empty() {
            debug!("upload called without files");
            return Ok(None);
        }

        let report = self
            .extractor
            .extract(paths)
            .context("Failed to extract text from uploaded files")?;

        self.uploaded_files = paths
            .iter()
            .map(|path| {
                let path = path.as_ref();
                path.file_name()
                    .map(|name| name.to_string_lossy().into_owned())
                    .unwrap_or_else(|| path.display().to_string())
            })
            .collect();
        self.index = Some(CorpusIndex::new(report.corpus()));
        info!(files = self.uploaded_files.len(), "corpus loaded");

        Ok(Some(report))
    }

    /// Answers `question` against the session corpus.
    ///
    /// When no non-empty corpus is held in memory the cache artifact is read
    /// instead; if that does not exist either, [`UPLOAD_FIRST_MESSAGE`] is
    /// returned.
    pub fn ask(&mut self, question: &str) -> Result<String> {
        if self.index.as_ref().is_none_or(CorpusIndex::is_empty) {
            let cached = self
                .cache()
                .read()
                .context("Failed to read cached corpus")?;
            match cached {
                Some(corpus) => {
                    debug!(path = %self.cache().path().display(), "loaded corpus from cache");
                    self.index = Some(CorpusIndex::new(&corpus));
                }
                None => return Ok(UPLOAD_FIRST_MESSAGE.to_string()),
            }
        }

        let index = self.index.get_or_insert_with(CorpusIndex::default);
        Ok(index.answer(question))
    }
}
