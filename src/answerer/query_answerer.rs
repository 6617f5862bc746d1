//! Frequency-weighted sentence selection.

use std::collections::{HashMap, HashSet};

use tracing::debug;

use super::tokenize::{sentences, words};
use super::types::ScoredSentence;

/// Answer returned when no sentence mentions any question token.
pub const NO_MATCH_ANSWER: &str = "Sorry, I couldn't find anything related.";

/// A corpus prepared for answering questions.
///
/// Sentences and word frequencies are computed once, so one index can answer
/// any number of questions about the same corpus.
#[derive(Debug, Clone, Default)]
pub struct CorpusIndex {
    sentences: Vec<String>,
    frequencies: HashMap<String, usize>,
}

impl CorpusIndex {
    /// Splits `corpus` into sentences and counts every word token.
    pub fn new(corpus: &str) -> Self {
        let mut frequencies = HashMap::new();
        for word in words(corpus) {
            *frequencies.entry(word).or_insert(0) += 1;
        }

        Self {
            sentences: sentences(corpus).into_iter().map(String::from).collect(),
            frequencies,
        }
    }

    /// Returns true if the corpus contains no sentences.
    pub fn is_empty(&self) -> bool {
        self.sentences.is_empty()
    }

    /// Returns the sentences of the corpus in order.
    pub fn sentences(&self) -> &[String] {
        &self.sentences
    }

    /// Returns how often the lowercased `word` occurs in the corpus.
    pub fn frequency(&self, word: &str) -> usize {
        self.frequencies.get(word).copied().unwrap_or(0)
    }

    /// Finds the most relevant sentence for `question`.
    ///
    /// A sentence is relevant when its lowercased text contains any question
    /// token as a substring. Relevant sentences are scored by summing the
    /// corpus frequency of each of their tokens that also occurs in the
    /// question, counting repeats. The earliest sentence wins a tie.
    ///
    /// Returns `None` when no sentence is relevant, which includes an empty
    /// corpus or a question without tokens.
    pub fn best_match(&self, question: &str) -> Option<ScoredSentence> {
        let query: HashSet<String> = words(question).into_iter().collect();
        if query.is_empty() {
            return None;
        }

        let mut best: Option<ScoredSentence> = None;
        for (index, sentence) in self.sentences.iter().enumerate() {
            let lowered = sentence.to_lowercase();
            if !query.iter().any(|token| lowered.contains(token.as_str())) {
                continue;
            }

            let score: usize = words(sentence)
                .iter()
                .filter(|word| query.contains(*word))
                .map(|word| self.frequency(word))
                .sum();

            if best.as_ref().is_none_or(|current| score > current.score()) {
                best = Some(ScoredSentence::new(index, sentence.as_str(), score));
            }
        }

        debug!(
            question,
            matched = best.as_ref().map(ScoredSentence::index),
            score = best.as_ref().map(ScoredSentence::score),
            "answered question"
        );
        best
    }

    /// Answers `question` with the most relevant sentence, or
    /// [`NO_MATCH_ANSWER`] if nothing in the corpus is related.
    pub fn answer(&self, question: &str) -> String {
        self.best_match(question)
            .map(ScoredSentence::into_sentence)
            .unwrap_or_else(|| NO_MATCH_ANSWER.to_string())
    }
}

/// Answers `question` against `corpus` in one call.
///
/// Prefer [`CorpusIndex`] when asking several questions about one corpus.
///
/// # Examples
///
/// ```
/// use prompt_chat::answerer::{answer, NO_MATCH_ANSWER};
///
/// let corpus = "The cat sat on the mat. Dogs bark loudly at night.";
/// assert_eq!(answer("Where does the cat sit?", corpus), "The cat sat on the mat.");
/// assert_eq!(answer("moon", corpus), NO_MATCH_ANSWER);
/// ```
pub fn answer(question: &str, corpus: &str) -> String {
    CorpusIndex::new(corpus).answer(question)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cat_question_selects_mat_sentence() {
        let corpus = "The cat sat on the mat. Dogs bark loudly at night.";
        assert_eq!(
            answer("Where does the cat sit?", corpus),
            "The cat sat on the mat."
        );
    }

    #[test]
    fn unrelated_question_gets_fallback() {
        assert_eq!(answer("moon", "Hello world. Goodbye world."), NO_MATCH_ANSWER);
    }

    #[test]
    fn empty_corpus_gets_fallback() {
        assert_eq!(answer("anything at all?", ""), NO_MATCH_ANSWER);
        assert!(CorpusIndex::new("").is_empty());
    }

    #[test]
    fn empty_question_gets_fallback() {
        assert_eq!(answer("", "Hello world. Goodbye world."), NO_MATCH_ANSWER);
        assert_eq!(answer("   ", "Hello world. Goodbye world."), NO_MATCH_ANSWER);
    }

    #[test]
    fn frequent_terms_outweigh_single_mentions() {
        let corpus = "Rust is fast. Rust is safe and rust is fun. Python is slow.";
        let index = CorpusIndex::new(corpus);

        assert_eq!(index.frequency("rust"), 3);
        let best = index.best_match("rust").unwrap();
        assert_eq!(best.sentence(), "Rust is safe and rust is fun.");
        assert_eq!(best.index(), 1);
        assert_eq!(best.score(), 6);
    }

    #[test]
    fn ties_go_to_the_earliest_sentence() {
        let index = CorpusIndex::new("Cats purr. Cats nap.");
        let best = index.best_match("cats").unwrap();
        assert_eq!(best.sentence(), "Cats purr.");
        assert_eq!(best.score(), 2);
    }

    #[test]
    fn substring_relevance_with_zero_score_still_answers() {
        let corpus = "Photosynthesis happens in leaves. Water boils at sea level.";
        let best = CorpusIndex::new(corpus).best_match("photo").unwrap();
        assert_eq!(best.sentence(), "Photosynthesis happens in leaves.");
        assert_eq!(best.score(), 0);
    }

    #[test]
    fn matching_ignores_case() {
        let corpus = "MITOSIS produces two cells. Meiosis produces four.";
        assert_eq!(answer("what is mitosis", corpus), "MITOSIS produces two cells.");
    }

    #[test]
    fn answering_is_deterministic() {
        let corpus = "Alpha beta. Beta gamma. Gamma alpha beta.";
        let index = CorpusIndex::new(corpus);
        let first = index.answer("beta gamma");
        for _ in 0..5 {
            assert_eq!(index.answer("beta gamma"), first);
            assert_eq!(answer("beta gamma", corpus), first);
        }
    }

    #[test]
    fn unknown_words_have_zero_frequency() {
        let index = CorpusIndex::new("One sentence only.");
        assert_eq!(index.frequency("sentence"), 1);
        assert_eq!(index.frequency("missing"), 0);
        assert_eq!(index.sentences(), &["One sentence only.".to_string()]);
    }

    #[test]
    fn decimal_question_does_not_match_on_periods() {
        assert_eq!(answer("2.0", "Hello world. Goodbye world."), NO_MATCH_ANSWER);
        assert_eq!(
            answer("what changed in 2.0", "Version 2.0 added plugins. Version 1.0 did not."),
            "Version 2.0 added plugins."
        );
    }

    #[test]
    fn possessive_question_matches_the_noun() {
        let corpus = "The sun is yellow. The sun is hot. Grass is the colour green.";
        assert_eq!(answer("sun's colour", corpus), "The sun is yellow.");
    }

    #[test]
    fn hyphenated_question_matches_whole_word() {
        let corpus = "Some facts are obscure. This is a well-known fact.";
        assert_eq!(answer("well-known", corpus), "This is a well-known fact.");
    }
}
