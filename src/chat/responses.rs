use std::fmt;
use std::path::{Path, PathBuf};

use serde::de::{Deserialize, Deserializer, MapAccess, Visitor};
use thiserror::Error;

/// Response table compiled into the binary.
const BUNDLED_RESPONSES: &str = include_str!("../../data/responses.json");

/// Errors that can occur when loading a response table.
#[derive(Debug, Error)]
pub enum ResponseTableError {
    /// The table file could not be read.
    #[error("failed to read response table {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The table is not a JSON object of string lists.
    #[error("invalid response table: {0}")]
    Parse(#[source] serde_json::Error),
}

/// Immutable mapping from trigger keyword to candidate replies.
///
/// Keys keep the order in which they were defined; the matcher scans them in
/// that order and the first key contained in a message wins. The reserved
/// [`DEFAULT_KEY`](Self::DEFAULT_KEY) entry is used when nothing matches.
///
/// # Examples
///
/// ```
/// use prompt_chat::chat::ResponseTable;
///
/// let table = ResponseTable::from_json(r#"{"hello": ["Hi!"], "default": ["Hmm?"]}"#)?;
/// assert_eq!(table.keys().collect::<Vec<_>>(), vec!["hello", "default"]);
/// assert_eq!(table.default_replies(), Some(&["Hmm?".to_string()][..]));
/// # Ok::<(), prompt_chat::chat::ResponseTableError>(())
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ResponseTable {
    entries: Vec<(String, Vec<String>)>,
}

impl ResponseTable {
    /// Key of the entry used when no trigger keyword matches.
    pub const DEFAULT_KEY: &'static str = "default";

    /// Builds a table from `(keyword, replies)` pairs, keeping their order.
    pub fn new<K, R, I>(entries: I) -> Self
    where
        K: Into<String>,
        R: IntoIterator,
        R::Item: Into<String>,
        I: IntoIterator<Item = (K, R)>,
    {
        Self {
            entries: entries
                .into_iter()
                .map(|(key, replies)| (key.into(), replies.into_iter().map(Into::into).collect()))
                .collect(),
        }
    }

    /// Parses a JSON object mapping keywords to lists of replies.
    pub fn from_json(json: &str) -> Result<Self, ResponseTableError> {
        serde_json::from_str(json).map_err(ResponseTableError::Parse)
    }

    /// Loads a table from a JSON file.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ResponseTableError> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path).map_err(|source| ResponseTableError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json(&json)
    }

    /// Returns the table shipped with the application.
    pub fn bundled() -> Result<Self, ResponseTableError> {
        Self::from_json(BUNDLED_RESPONSES)
    }

    /// Iterates over the trigger keywords in definition order.
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(key, _)| key.as_str())
    }

    /// Iterates over `(keyword, replies)` pairs in definition order.
    pub fn entries(&self) -> impl Iterator<Item = (&str, &[String])> {
        self.entries
            .iter()
            .map(|(key, replies)| (key.as_str(), replies.as_slice()))
    }

    /// Returns the replies of the first entry named `key`.
    pub fn replies(&self, key: &str) -> Option<&[String]> {
        self.entries().find(|(k, _)| *k == key).map(|(_, r)| r)
    }

    /// Returns the replies of the `default` entry, if present.
    pub fn default_replies(&self) -> Option<&[String]> {
        self.replies(Self::DEFAULT_KEY)
    }

    /// Returns the number of entries, including `default`.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns true if the table has no entries.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<'de> Deserialize<'de> for ResponseTable {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        struct TableVisitor;

        impl<'de> Visitor<'de> for TableVisitor {
            type Value = ResponseTable;

            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str("an object mapping keywords to lists of replies")
            }

            fn visit_map<A>(self, mut map: A) -> Result<Self::Value, A::Error>
            where
                A: MapAccess<'de>,
            {
                // visit entries one by one so definition order survives
                let mut entries = Vec::with_capacity(map.size_hint().unwrap_or(0));
                while let Some((key, replies)) = map.next_entry::<String, Vec<String>>()? {
                    entries.push((key, replies));
                }
                Ok(ResponseTable { entries })
            }
        }

        deserializer.deserialize_map(TableVisitor)
    }
}
