//! Process-wide resources handed to stage constructors.

use std::collections::{HashMap, HashSet};

const ENGLISH_STOPWORDS: &[&str] = &[
    "a", "an", "and", "are", "as", "at", "be", "but", "by", "for", "from", "has", "have", "he",
    "her", "his", "i", "if", "in", "into", "is", "it", "its", "of", "on", "or", "our", "she",
    "such", "that", "the", "their", "them", "then", "there", "these", "they", "this", "those",
    "to", "was", "we", "were", "which", "while", "who", "will", "with", "you", "your",
];

/// Shared, read-only lookup data for stages (stop-word lists per language).
///
/// Build it once, wrap it in an `Arc` and pass it to every stage that needs
/// it; nothing in the crate keeps hidden global state.
#[derive(Debug, Clone, Default)]
pub struct ResourceContext {
    stopwords: HashMap<String, HashSet<String>>,
}

impl ResourceContext {
    pub fn new() -> Self {
        Self::default()
    }

    /// A context preloaded with the built-in English stop-word list under `en`.
    pub fn with_defaults() -> Self {
        Self::new().with_stopwords("en", ENGLISH_STOPWORDS.iter().copied())
    }

    /// Register (or extend) the stop-word list of a language. Words are
    /// stored lower-cased.
    pub fn with_stopwords<I, S>(mut self, language: &str, words: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.add_stopwords(language, words);
        self
    }

    pub fn add_stopwords<I, S>(&mut self, language: &str, words: I)
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.stopwords
            .entry(language.to_string())
            .or_default()
            .extend(words.into_iter().map(|w| w.as_ref().to_lowercase()));
    }

    pub fn is_stopword(&self, language: &str, word: &str) -> bool {
        self.stopwords
            .get(language)
            .map_or(false, |words| words.contains(&word.to_lowercase()))
    }

    pub fn has_language(&self, language: &str) -> bool {
        self.stopwords.contains_key(language)
    }

    /// Forget every loaded resource.
    pub fn reset(&mut self) {
        self.stopwords.clear();
    }
}
