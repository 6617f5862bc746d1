use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use tracing::debug;

use super::ExtractionError;

/// The on-disk copy of the last extracted corpus.
///
/// The file is plain UTF-8 text and is overwritten on every extraction run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CorpusCache {
    path: PathBuf,
}

impl CorpusCache {
    /// Creates a handle for the cache artifact at `path`.
    ///
    /// Nothing is touched on disk until [`write`](Self::write) or
    /// [`read`](Self::read) is called.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Returns the location of the cache artifact.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Replaces the cache contents with `corpus`.
    ///
    /// Missing parent directories are created.
    pub fn write(&self, corpus: &str) -> Result<(), ExtractionError> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent).map_err(|source| self.error(source))?;
        }
        std::fs::write(&self.path, corpus).map_err(|source| self.error(source))?;
        debug!(path = %self.path.display(), bytes = corpus.len(), "corpus cached");
        Ok(())
    }

    /// Reads the cached corpus back.
    ///
    /// Returns `Ok(None)` when no cache artifact has been written yet.
    pub fn read(&self) -> Result<Option<String>, ExtractionError> {
        match std::fs::read_to_string(&self.path) {
            Ok(corpus) => Ok(Some(corpus)),
            Err(source) if source.kind() == ErrorKind::NotFound => Ok(None),
            Err(source) => Err(self.error(source)),
        }
    }

    fn error(&self, source: std::io::Error) -> ExtractionError {
        ExtractionError::Cache {
            path: self.path.clone(),
            source,
        }
    }
}
