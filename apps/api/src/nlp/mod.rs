//! Text normalization: lowercase, alphabetic word tokens, stop-word removal,
//! lemmatization.

pub mod lemmatizer;
pub mod stop_words;

use std::collections::HashSet;

use unicode_segmentation::UnicodeSegmentation;

use crate::nlp::lemmatizer::Lemmatizer;
use crate::nlp::stop_words::ENGLISH_STOP_WORDS;

/// Clitics split off a word before the alphabetic check, in either apostrophe style.
const CLITIC_SUFFIXES: &[&str] = &[
    "'s", "\u{2019}s", "n't", "n\u{2019}t", "'re", "\u{2019}re", "'ve", "\u{2019}ve", "'ll",
    "\u{2019}ll", "'d", "\u{2019}d", "'m", "\u{2019}m",
];

/// Holds the stop-word set and lemmatizer tables. Built once at startup.
pub struct Normalizer {
    stop_words: HashSet<&'static str>,
    lemmatizer: Lemmatizer,
}

impl Default for Normalizer {
    fn default() -> Self {
        Self::new()
    }
}

impl Normalizer {
    pub fn new() -> Self {
        Self {
            stop_words: ENGLISH_STOP_WORDS.iter().copied().collect(),
            lemmatizer: Lemmatizer::new(),
        }
    }

    /// Returns the lemmas of the alphabetic, non-stop-word tokens of `text`,
    /// in document order. Stop words are matched on the surface token, so a
    /// lemma may still coincide with one (`makes` -> `make`).
    pub fn normalize(&self, text: &str) -> Vec<String> {
        let lowered = text.to_lowercase();
        lowered
            .unicode_words()
            .map(strip_clitic)
            .filter(|token| !token.is_empty() && token.chars().all(char::is_alphabetic))
            .filter(|token| !self.stop_words.contains(token))
            .map(|token| self.lemmatizer.lemma(token))
            .collect()
    }

    /// Normalized lemmas joined by single spaces.
    pub fn clean(&self, text: &str) -> String {
        self.normalize(text).join(" ")
    }
}

/// `bachelor's` -> `bachelor`, `don't` -> `do`.
fn strip_clitic(word: &str) -> &str {
    CLITIC_SUFFIXES
        .iter()
        .find_map(|suffix| word.strip_suffix(suffix))
        .unwrap_or(word)
}
