//! Question answering over an extracted corpus.
//!
//! This module provides [`CorpusIndex`], which splits a corpus into
//! sentences, counts word frequencies once, and answers questions by
//! returning the single sentence with the highest frequency-weighted token
//! overlap.

mod query_answerer;
mod tokenize;
mod types;

pub use query_answerer::{CorpusIndex, NO_MATCH_ANSWER, answer};
pub use tokenize::{sentences, words};
pub use types::ScoredSentence;
