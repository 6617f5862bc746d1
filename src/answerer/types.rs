//! Types for sentence-relevance results.

/// The sentence chosen as the answer to a question.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScoredSentence {
    /// Position of the sentence in the corpus
    index: usize,
    /// The sentence text, as it appears in the corpus
    sentence: String,
    /// Sum of corpus frequencies of the sentence tokens found in the question
    score: usize,
}

impl ScoredSentence {
    /// Creates a new scored sentence.
    pub fn new(index: usize, sentence: impl Into<String>, score: usize) -> Self {
        Self {
            index,
            sentence: sentence.into(),
            score,
        }
    }

    /// Returns the position of the sentence in the corpus.
    pub fn index(&self) -> usize {
        self.index
    }

    /// Returns the sentence text.
    pub fn sentence(&self) -> &str {
        &self.sentence
    }

    /// Returns the relevance score.
    pub fn score(&self) -> usize {
        self.score
    }

    /// Consumes the result and returns the sentence text.
    pub fn into_sentence(self) -> String {
        self.sentence
    }
}
