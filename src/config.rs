//! Application configuration.
//!
//! Every setting resolves in the same order: a value set on the builder
//! (usually from a command-line flag), then an environment variable, then a
//! built-in default.

use std::path::{Path, PathBuf};

use thiserror::Error;

use crate::chat::{ResponseTable, ResponseTableError};
use crate::extraction::{
    CorpusCache, DEFAULT_TESSERACT_COMMAND, Extractor, FailurePolicy, TesseractOcr,
};

/// Overrides the cache artifact location.
pub const CACHE_PATH_VAR: &str = "PROMPT_CHAT_CACHE";
/// Points at a JSON response table to use instead of the bundled one.
pub const RESPONSES_PATH_VAR: &str = "PROMPT_CHAT_RESPONSES";
/// Overrides the OCR executable.
pub const TESSERACT_VAR: &str = "PROMPT_CHAT_TESSERACT";
/// When truthy, extraction failures are written into the corpus.
pub const INLINE_ERRORS_VAR: &str = "PROMPT_CHAT_INLINE_ERRORS";

/// File name of the cache artifact inside the data directory.
pub const CACHE_FILE_NAME: &str = "extracted_text.txt";

/// Errors that can occur while resolving configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// No cache path was given and the platform data directory is unknown.
    #[error("Failed to determine data directory; set PROMPT_CHAT_CACHE or pass --cache")]
    NoDataDir,

    /// An environment variable holds a value that is not a boolean.
    #[error("{var} must be a boolean (true/false), got {value:?}")]
    InvalidFlag { var: &'static str, value: String },
}

/// Resolved application settings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    cache_path: PathBuf,
    responses_path: Option<PathBuf>,
    tesseract_command: String,
    failure_policy: FailurePolicy,
}

impl Config {
    /// Resolves configuration from the environment and defaults only.
    pub fn from_env() -> Result<Self, ConfigError> {
        ConfigBuilder::new().build()
    }

    /// Returns the location of the cache artifact.
    pub fn cache_path(&self) -> &Path {
        &self.cache_path
    }

    /// Returns the custom response table file, if one is configured.
    pub fn responses_path(&self) -> Option<&Path> {
        self.responses_path.as_deref()
    }

    /// Returns the OCR executable.
    pub fn tesseract_command(&self) -> &str {
        &self.tesseract_command
    }

    /// Returns how extraction failures are reflected in the corpus.
    pub fn failure_policy(&self) -> FailurePolicy {
        self.failure_policy
    }

    /// Returns a handle on the configured cache artifact.
    pub fn cache(&self) -> CorpusCache {
        CorpusCache::new(&self.cache_path)
    }

    /// Builds an extractor wired to the configured cache, OCR engine and
    /// failure policy.
    pub fn extractor(&self) -> Extractor {
        Extractor::new(self.cache())
            .with_ocr(Box::new(TesseractOcr::new(&self.tesseract_command)))
            .with_failure_policy(self.failure_policy)
    }

    /// Loads the configured response table, or the bundled one.
    pub fn response_table(&self) -> Result<ResponseTable, ResponseTableError> {
        match &self.responses_path {
            Some(path) => ResponseTable::from_file(path),
            None => ResponseTable::bundled(),
        }
    }
}

/// Builder for [`Config`].
///
/// # Examples
///
/// ```
/// use prompt_chat::config::ConfigBuilder;
///
/// let config = ConfigBuilder::new()
///     .cache_path("/tmp/prompt-chat/extracted_text.txt")
///     .tesseract_command("/usr/local/bin/tesseract")
///     .build()
///     .expect("explicit settings always resolve");
/// assert_eq!(config.tesseract_command(), "/usr/local/bin/tesseract");
/// ```
#[derive(Debug, Default)]
pub struct ConfigBuilder {
    cache_path: Option<PathBuf>,
    responses_path: Option<PathBuf>,
    tesseract_command: Option<String>,
    inline_errors: Option<bool>,
}

impl ConfigBuilder {
    /// Creates a builder with nothing set explicitly.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the cache artifact location.
    pub fn cache_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.cache_path = Some(path.into());
        self
    }

    /// Sets a JSON response table file.
    pub fn responses_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.responses_path = Some(path.into());
        self
    }

    /// Sets the OCR executable.
    pub fn tesseract_command(mut self, command: impl Into<String>) -> Self {
        self.tesseract_command = Some(command.into());
        self
    }

    /// Sets whether extraction failures are written into the corpus.
    pub fn inline_errors(mut self, inline: bool) -> Self {
        self.inline_errors = Some(inline);
        self
    }

    /// Resolves every unset value from the environment or its default.
    pub fn build(self) -> Result<Config, ConfigError> {
        let cache_path = match self.cache_path.or_else(|| env_path(CACHE_PATH_VAR)) {
            Some(path) => path,
            None => default_cache_path()?,
        };

        let responses_path = self.responses_path.or_else(|| env_path(RESPONSES_PATH_VAR));

        let tesseract_command = self
            .tesseract_command
            .or_else(|| env_value(TESSERACT_VAR))
            .unwrap_or_else(|| DEFAULT_TESSERACT_COMMAND.to_string());

        let inline_errors = match self.inline_errors {
            Some(inline) => inline,
            None => match env_value(INLINE_ERRORS_VAR) {
                Some(value) => parse_flag(INLINE_ERRORS_VAR, &value)?,
                None => false,
            },
        };

        Ok(Config {
            cache_path,
            responses_path,
            tesseract_command,
            failure_policy: if inline_errors {
                FailurePolicy::Inline
            } else {
                FailurePolicy::Exclude
            },
        })
    }
}

/// Gets the cross-platform cache artifact path.
///
/// Returns `{data_dir}/prompt-chat/extracted_text.txt` where `data_dir` is:
/// - Linux: `~/.local/share`
/// - macOS: `~/Library/Application Support`
/// - Windows: `C:\Users\<user>\AppData\Roaming`
pub fn default_cache_path() -> Result<PathBuf, ConfigError> {
    let data_dir = dirs::data_dir().ok_or(ConfigError::NoDataDir)?;
    Ok(data_dir.join("prompt-chat").join(CACHE_FILE_NAME))
}

/// Reads a non-empty environment variable.
fn env_value(var: &str) -> Option<String> {
    std::env::var(var).ok().filter(|value| !value.trim().is_empty())
}

fn env_path(var: &str) -> Option<PathBuf> {
    env_value(var).map(PathBuf::from)
}

fn parse_flag(var: &'static str, value: &str) -> Result<bool, ConfigError> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" => Ok(false),
        _ => Err(ConfigError::InvalidFlag {
            var,
            value: value.to_string(),
        }),
    }
}
