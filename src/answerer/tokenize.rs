//! Sentence and word tokenization.

use std::sync::LazyLock;

use regex::Regex;

/// In order of preference: a number with internal periods or thousands
/// separators, a word with internal hyphens, periods or apostrophes, an
/// ellipsis or double dash, or any other single non-space character.
static WORD: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\d+(?:[.,]\d+)+|\w+(?:[-.'’]\w+)*|\.\.\.|--|[^\w\s]")
        .expect("word pattern is valid")
});

/// Contraction suffixes split off the word they end, as `'s` in `sun's`.
const CLITICS: &[&str] = &["n't", "'s", "'m", "'d", "'ll", "'re", "'ve"];

/// Sentence-final punctuation, optional closing quotes or brackets, then
/// whitespace or the end of the text.
static SENTENCE_END: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"[.!?]+["'”’)\]]*(?:\s+|$)"#).expect("sentence pattern is valid")
});

/// Lowercased words that end in a period without ending the sentence.
const ABBREVIATIONS: &[&str] = &[
    "mr", "mrs", "ms", "dr", "prof", "sr", "jr", "st", "vs", "e.g", "i.e", "fig", "approx", "dept",
];

/// Splits text into sentences, in order, with surrounding whitespace removed.
///
/// # Examples
///
/// ```
/// use prompt_chat::answerer::sentences;
///
/// let text = "Dr. Smith arrived. Was he late? No!";
/// assert_eq!(sentences(text), vec!["Dr. Smith arrived.", "Was he late?", "No!"]);
/// ```
#[must_use]
pub fn sentences(text: &str) -> Vec<&str> {
    let mut found = Vec::new();
    let mut start = 0;

    for end in SENTENCE_END.find_iter(text) {
        let terminator = end.as_str().trim_end();
        let body = &text[start..end.start()];
        if terminator == "." && end.end() < text.len() && ends_with_abbreviation(body) {
            continue;
        }

        let sentence = text[start..end.start() + terminator.len()].trim();
        if !sentence.is_empty() {
            found.push(sentence);
        }
        start = end.end();
    }

    let rest = text[start..].trim();
    if !rest.is_empty() {
        found.push(rest);
    }
    found
}

/// Splits text into lowercased word and punctuation tokens, following
/// Penn Treebank conventions.
///
/// Numbers and hyphenated words stay whole, contractions lose their clitic
/// (`don't` becomes `do` and `n't`) and double quotes become ``` `` ``` or
/// `''` depending on whether they open or close.
///
/// # Examples
///
/// ```
/// use prompt_chat::answerer::words;
///
/// assert_eq!(words("Where does the cat sit?"), vec!["where", "does", "the", "cat", "sit", "?"]);
/// assert_eq!(words("The sun's 2.5 lives"), vec!["the", "sun", "'s", "2.5", "lives"]);
/// ```
#[must_use]
pub fn words(text: &str) -> Vec<String> {
    let mut tokens = Vec::new();
    for found in WORD.find_iter(text) {
        let token = found.as_str();
        if token == "\"" {
            tokens.push(quote_token(&text[..found.start()]).to_string());
            continue;
        }

        let lowered = token.to_lowercase();
        match clitic_start(&lowered) {
            Some(at) => {
                tokens.push(lowered[..at].to_string());
                tokens.push(lowered[at..].to_string());
            }
            None => tokens.push(lowered),
        }
    }
    tokens
}

/// Byte offset where a trailing clitic begins, if the word has one and
/// something precedes it.
fn clitic_start(word: &str) -> Option<usize> {
    let normalized: String = word
        .chars()
        .map(|c| if c == '’' { '\'' } else { c })
        .collect();
    let clitic = CLITICS
        .iter()
        .copied()
        .find(|clitic| normalized.len() > clitic.len() && normalized.ends_with(clitic))?;
    let width = clitic.chars().count();
    word.char_indices().rev().nth(width - 1).map(|(at, _)| at)
}

/// Opening quotes follow whitespace, an opening bracket or the start of text.
fn quote_token(before: &str) -> &'static str {
    match before.chars().last() {
        None => "``",
        Some(c) if c.is_whitespace() || "([{<".contains(c) => "``",
        Some(_) => "''",
    }
}

fn ends_with_abbreviation(body: &str) -> bool {
    let Some(last) = body.split_whitespace().last() else {
        return false;
    };
    let last = last.trim_start_matches(|c: char| !c.is_alphanumeric());

    // single-letter initials such as "J. Smith"
    let mut chars = last.chars();
    if let (Some(first), None) = (chars.next(), chars.next()) {
        return first.is_uppercase();
    }

    let lowered = last.to_lowercase();
    ABBREVIATIONS.contains(&lowered.as_str())
}
