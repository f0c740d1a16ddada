//! Candidate generation from part-of-speech tag patterns.
//!
//! Each token contributes its tag followed by one space, so a span of tokens
//! is described by a string like `"JJ NN NNS "`. A span becomes a candidate
//! when that string fully matches the generator's pattern.

use std::sync::Arc;

use layered_keyphrase::{
    Board, Gram, KeyphraseError, KeyphraseResult, Phase, ResourceContext, Scope, Stage, Token,
};
use once_cell::sync::Lazy;
use regex::Regex;
use tracing::debug;

/// Adjectives and nouns, ending in a noun.
pub const DEFAULT_NOUN_PHRASE_PATTERN: &str = r"(?:(?:JJ[RS]?|NN[PS]*) )*NN[PS]* ";

/// Longest candidate, in tokens, considered by default.
pub const DEFAULT_MAX_TOKENS: usize = 4;

/// Tag used for tokens the tagger left untagged.
const UNTAGGED: &str = "X";

static NOUN_PHRASE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(&anchored(DEFAULT_NOUN_PHRASE_PATTERN)).expect("Invalid noun phrase regex")
});

fn anchored(pattern: &str) -> String {
    format!("^(?:{})$", pattern)
}

/// Inserts every token span whose tag sequence matches a pattern.
///
/// Spans that start or end with a stop-word of the document language are
/// skipped. Overlapping and nested spans are all generated; de-duplication
/// is left to selection stages.
#[derive(Debug, Clone)]
pub struct PatternGenerator {
    pattern: Regex,
    max_tokens: usize,
    default_language: String,
    resources: Arc<ResourceContext>,
}

impl PatternGenerator {
    pub fn new(resources: Arc<ResourceContext>) -> Self {
        Self {
            pattern: NOUN_PHRASE.clone(),
            max_tokens: DEFAULT_MAX_TOKENS,
            default_language: "en".to_string(),
            resources,
        }
    }

    /// Replace the tag pattern. Tags in the pattern are each followed by one
    /// space; the pattern must match the whole span.
    pub fn with_pattern(mut self, pattern: &str) -> KeyphraseResult<Self> {
        self.pattern = Regex::new(&anchored(pattern)).map_err(|err| {
            KeyphraseError::configuration(format!("invalid tag pattern `{}`: {}", pattern, err))
        })?;
        Ok(self)
    }

    pub fn with_max_tokens(mut self, max_tokens: usize) -> Self {
        self.max_tokens = max_tokens.max(1);
        self
    }

    /// Language whose stop-words apply when the document has no language tag.
    pub fn with_default_language(mut self, language: impl Into<String>) -> Self {
        self.default_language = language.into();
        self
    }

    fn matches(&self, tokens: &[Token]) -> bool {
        let mut tags = String::new();
        for token in tokens {
            tags.push_str(token.tag.as_deref().unwrap_or(UNTAGGED));
            tags.push(' ');
        }
        self.pattern.is_match(&tags)
    }

    fn is_bounded_by_stopword(&self, language: &str, tokens: &[Token]) -> bool {
        let is_stop = |token: Option<&Token>| {
            token.map_or(false, |t| self.resources.is_stopword(language, t.text()))
        };
        is_stop(tokens.first()) || is_stop(tokens.last())
    }
}

impl Stage for PatternGenerator {
    fn name(&self) -> &str {
        "pattern_generator"
    }

    fn phase(&self) -> Phase {
        Phase::Generation
    }

    fn run(&self, board: &mut Board, scope: Scope) -> KeyphraseResult<()> {
        let language = board
            .document()
            .language()
            .unwrap_or(&self.default_language)
            .to_string();

        let mut found = Vec::new();
        for (unit, sentence) in board.sentences(scope)? {
            let tokens = sentence.tokens();
            for start in 0..tokens.len() {
                let longest = (start + self.max_tokens).min(tokens.len());
                for end in (start + 1)..=longest {
                    let span = &tokens[start..end];
                    if self.matches(span) && !self.is_bounded_by_stopword(&language, span) {
                        found.push((unit, Gram::new(span.to_vec())));
                    }
                }
            }
        }

        let occurrences = found.len();
        for (unit, gram) in found {
            board.add_gram(unit, &gram)?;
        }
        debug!(occurrences, candidates = board.gram_count(), "generated candidates");
        Ok(())
    }
}
