//! Candidate phrases and their canonical identity.

use crate::feature::names;
use crate::{ComponentId, FeatureBag, Token};

/// One observed surface form of a gram together with its tokens.
#[derive(Debug, Clone, PartialEq)]
pub struct Surface {
    pub text: String,
    pub tokens: Vec<Token>,
    /// How many times this exact surface was observed.
    pub count: usize,
}

impl Surface {
    pub fn from_tokens(tokens: Vec<Token>) -> Self {
        let text = join_text(&tokens);
        Self {
            text,
            tokens,
            count: 1,
        }
    }
}

/// Where a gram was observed: the unit plus the inclusive token range inside it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Occurrence {
    pub unit: ComponentId,
    pub start_idx: usize,
    pub end_idx: usize,
}

/// A candidate phrase: every occurrence of the same canonical key folded into
/// one entity.
///
/// Grams are built by a candidate generator from the tokens of one
/// occurrence, then handed to [`crate::Board::add_gram`], which either stores
/// a copy or merges the occurrence into the existing entity.
#[derive(Debug, Clone, PartialEq)]
pub struct Gram {
    key: String,
    template: Vec<Token>,
    surfaces: Vec<Surface>,
    appearances: Vec<ComponentId>,
    occurrences: Vec<Occurrence>,
    pub features: FeatureBag,
}

/// A gram that carries scoring features. Scoring lives in the feature bag, so
/// the same type serves both roles.
pub type Keyphrase = Gram;

impl Gram {
    /// Build a gram from the tokens of one occurrence, deriving the canonical
    /// key with [`canonical_key`].
    pub fn new(tokens: Vec<Token>) -> Self {
        let key = canonical_key(&tokens);
        Self::with_key(key, tokens)
    }

    /// Build a gram with a key assigned by the generator.
    pub fn with_key(key: impl Into<String>, tokens: Vec<Token>) -> Self {
        let surfaces = if tokens.is_empty() {
            Vec::new()
        } else {
            vec![Surface::from_tokens(tokens.clone())]
        };
        Self {
            key: key.into(),
            template: tokens,
            surfaces,
            appearances: Vec::new(),
            occurrences: Vec::new(),
            features: FeatureBag::new(),
        }
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    /// The canonical token sequence: the tokens of the first occurrence.
    pub fn template(&self) -> &[Token] {
        &self.template
    }

    pub fn surfaces(&self) -> &[Surface] {
        &self.surfaces
    }

    /// The most frequently observed surface; the earliest one wins ties.
    pub fn best_surface(&self) -> Option<&str> {
        let mut best: Option<&Surface> = None;
        for surface in &self.surfaces {
            if best.map_or(true, |b| surface.count > b.count) {
                best = Some(surface);
            }
        }
        best.map(|s| s.text.as_str())
    }

    /// Units this gram appears in, in first-appearance order.
    pub fn appearances(&self) -> &[ComponentId] {
        &self.appearances
    }

    pub fn occurrences(&self) -> &[Occurrence] {
        &self.occurrences
    }

    /// Signature used for containment tests: stems joined and wrapped by a
    /// delimiter that never occurs in text, so `a b` only matches whole tokens.
    pub fn signature(&self) -> String {
        let mut out = String::from(SIGNATURE_DELIMITER);
        for token in &self.template {
            out.push_str(&token.stem());
            out.push(SIGNATURE_DELIMITER);
        }
        out
    }

    pub fn score(&self) -> Option<f64> {
        self.features.get(names::SCORE)
    }

    pub fn set_score(&mut self, score: f64) {
        self.features.set(names::SCORE, score);
    }

    /// Fold another occurrence of the same key into this entity.
    ///
    /// Surfaces are merged by exact text; features and annotations of
    /// `other` are ignored.
    pub(crate) fn merge_surfaces(&mut self, other: &Gram) {
        for incoming in &other.surfaces {
            match self.surfaces.iter_mut().find(|s| s.text == incoming.text) {
                Some(existing) => existing.count += incoming.count,
                None => self.surfaces.push(incoming.clone()),
            }
        }
    }

    /// Returns `false` when this exact span was already recorded.
    pub(crate) fn record_appearance(&mut self, unit: ComponentId, tokens: &[Token]) -> bool {
        if !self.appearances.contains(&unit) {
            self.appearances.push(unit);
        }
        let (Some(first), Some(last)) = (tokens.first(), tokens.last()) else {
            return false;
        };
        let occurrence = Occurrence {
            unit,
            start_idx: first.index(),
            end_idx: last.index(),
        };
        if self.occurrences.contains(&occurrence) {
            return false;
        }
        self.occurrences.push(occurrence);
        true
    }

    /// Fresh copy carrying identity, surfaces and features but no
    /// appearance bookkeeping; the board re-registers the appearance itself.
    pub(crate) fn detached(&self) -> Gram {
        Gram {
            appearances: Vec::new(),
            occurrences: Vec::new(),
            ..self.clone()
        }
    }
}

const SIGNATURE_DELIMITER: char = '\u{1f}';

/// Default identity: lower-cased stems joined by single spaces.
pub fn canonical_key(tokens: &[Token]) -> String {
    tokens
        .iter()
        .map(Token::stem)
        .collect::<Vec<_>>()
        .join(" ")
}

fn join_text(tokens: &[Token]) -> String {
    tokens.iter().map(Token::text).collect::<Vec<_>>().join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tokens(words: &[&str]) -> Vec<Token> {
        words.iter().map(|w| Token::new(*w)).collect()
    }

    #[test]
    fn key_uses_lemmas_when_present() {
        let gram = Gram::new(vec![
            Token::new("Neural"),
            Token::new("Networks").with_lemma("network"),
        ]);
        assert_eq!(gram.key(), "neural network");
        assert_eq!(gram.best_surface(), Some("Neural Networks"));
    }

    #[test]
    fn merge_counts_repeated_surfaces() {
        let mut gram = Gram::new(tokens(&["rust", "crate"]));
        gram.merge_surfaces(&Gram::new(tokens(&["Rust", "crate"])));
        gram.merge_surfaces(&Gram::new(tokens(&["Rust", "crate"])));

        let surfaces: Vec<(&str, usize)> = gram
            .surfaces()
            .iter()
            .map(|s| (s.text.as_str(), s.count))
            .collect();
        assert_eq!(surfaces, vec![("rust crate", 1), ("Rust crate", 2)]);
        assert_eq!(gram.best_surface(), Some("Rust crate"));
    }

    #[test]
    fn signature_is_token_bounded() {
        let long = Gram::new(tokens(&["ab", "c"]));
        let short = Gram::new(tokens(&["b", "c"]));
        assert!(!long.signature().contains(&short.signature()));

        let tail = Gram::new(tokens(&["c"]));
        assert!(long.signature().contains(&tail.signature()));
    }
}
