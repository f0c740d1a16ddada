//! The per-document workspace shared by every stage.

use std::collections::HashMap;

use tracing::trace;

use crate::document::unknown;
use crate::{
    Annotation, ComponentId, Document, Gram, KeyphraseError, KeyphraseResult, Scope, Sentence,
};

/// Document tree, canonical candidate table and document-wide annotations for
/// exactly one document.
///
/// The candidate table holds at most one [`Gram`] per canonical key.
/// Iteration follows first-insertion order, which every ranking stage uses to
/// break score ties.
#[derive(Debug)]
pub struct Board {
    document: Document,
    grams: HashMap<String, Gram>,
    order: Vec<String>,
    annotations: Vec<Annotation>,
}

impl Board {
    pub fn new(document: Document) -> Self {
        Self {
            document,
            grams: HashMap::new(),
            order: Vec::new(),
            annotations: Vec::new(),
        }
    }

    /// Drop all state and start over with a new document.
    pub fn reset(&mut self, document: Document) {
        *self = Board::new(document);
    }

    pub fn document(&self) -> &Document {
        &self.document
    }

    pub fn document_mut(&mut self) -> &mut Document {
        &mut self.document
    }

    /// Sentences under `scope`, in document order.
    pub fn sentences(&self, scope: Scope) -> KeyphraseResult<Vec<(ComponentId, &Sentence)>> {
        self.document.sentences(scope)
    }

    /// Insert one occurrence of a candidate found in `unit`.
    ///
    /// An unseen key stores an independent copy of `candidate`. A known key
    /// only merges the incoming surfaces into the stored entity: features and
    /// annotations of `candidate` are ignored, so enrichment must wait until
    /// every occurrence has been merged. Either way the appearance is linked
    /// in both directions.
    pub fn add_gram(&mut self, unit: ComponentId, candidate: &Gram) -> KeyphraseResult<&Gram> {
        if candidate.template().is_empty() {
            return Err(KeyphraseError::malformed("candidate has no tokens"));
        }
        if candidate.key().trim().is_empty() {
            return Err(KeyphraseError::malformed("candidate has an empty canonical key"));
        }
        let tokens = candidate.template();
        if tokens
            .windows(2)
            .any(|pair| pair[1].index() != pair[0].index() + 1)
        {
            return Err(KeyphraseError::malformed(
                "candidate tokens are not a contiguous ascending span",
            ));
        }
        let component = self
            .document
            .component_mut(unit)
            .ok_or_else(|| unknown(unit))?;
        if let (Some(sentence), Some(last)) = (component.as_sentence(), tokens.last()) {
            if last.index() >= sentence.len() {
                return Err(KeyphraseError::malformed(format!(
                    "token {} is past the end of a {}-token sentence",
                    last.index(),
                    sentence.len()
                )));
            }
        }
        component.link_gram(candidate.key());

        let key = candidate.key().to_string();
        let is_new = !self.grams.contains_key(&key);
        if is_new {
            trace!(key = %key, "new candidate");
            self.order.push(key.clone());
        } else {
            trace!(key = %key, "merging occurrence");
        }
        let gram = self
            .grams
            .entry(key)
            .or_insert_with(|| candidate.detached());
        let fresh_span = gram.record_appearance(unit, candidate.template());
        if !is_new && fresh_span {
            gram.merge_surfaces(candidate);
        }
        Ok(gram)
    }

    /// Delete a candidate and unlink it from every unit of the document.
    ///
    /// All components are scanned, not only the recorded appearances, so no
    /// unit can keep a dangling key.
    pub fn remove_gram(&mut self, key: &str) -> Option<Gram> {
        let removed = self.grams.remove(key)?;
        self.order.retain(|k| k != key);
        for component in self.document.components_mut() {
            component.unlink_gram(key);
        }
        Some(removed)
    }

    /// Remove every candidate for which `keep` returns `false`.
    ///
    /// Returns the removed keys in table order.
    pub fn retain_grams(&mut self, mut keep: impl FnMut(&Gram) -> bool) -> Vec<String> {
        let doomed: Vec<String> = self
            .grams()
            .filter(|gram| !keep(*gram))
            .map(|gram| gram.key().to_string())
            .collect();
        for key in &doomed {
            self.remove_gram(key);
        }
        doomed
    }

    pub fn gram(&self, key: &str) -> Option<&Gram> {
        self.grams.get(key)
    }

    pub fn gram_mut(&mut self, key: &str) -> Option<&mut Gram> {
        self.grams.get_mut(key)
    }

    pub fn contains_gram(&self, key: &str) -> bool {
        self.grams.contains_key(key)
    }

    pub fn gram_count(&self) -> usize {
        self.order.len()
    }

    /// Canonical keys in first-insertion order.
    pub fn gram_keys(&self) -> &[String] {
        &self.order
    }

    /// Candidates in first-insertion order.
    pub fn grams(&self) -> impl Iterator<Item = &Gram> {
        self.order.iter().filter_map(move |key| self.grams.get(key))
    }

    /// Mutable access to every candidate, in no particular order.
    pub fn grams_mut(&mut self) -> impl Iterator<Item = &mut Gram> {
        self.grams.values_mut()
    }

    /// Candidates registered in `unit`, in the unit's registration order.
    pub fn grams_in(&self, unit: ComponentId) -> Vec<&Gram> {
        self.document
            .component(unit)
            .map(|component| {
                component
                    .gram_keys()
                    .iter()
                    .filter_map(|key| self.grams.get(key))
                    .collect()
            })
            .unwrap_or_default()
    }

    pub fn add_annotation(&mut self, annotation: Annotation) {
        self.annotations.push(annotation);
    }

    /// Document-wide annotations stored under `key`.
    pub fn annotations<'a>(&'a self, key: &str) -> impl Iterator<Item = &'a Annotation> + 'a {
        let key = key.to_owned();
        self.annotations.iter().filter(move |a| a.key == key)
    }

    pub fn all_annotations(&self) -> &[Annotation] {
        &self.annotations
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Token;

    fn board() -> (Board, ComponentId, ComponentId) {
        let mut doc = Document::new("");
        let section = doc.add_section(doc.root(), None).unwrap();
        let s1 = doc
            .add_sentence(section, Sentence::from_tagged("Rust/NNP crates/NNS"))
            .unwrap();
        let s2 = doc
            .add_sentence(section, Sentence::from_tagged("rust/NN crates/NNS rock/VBP"))
            .unwrap();
        (Board::new(doc), s1, s2)
    }

    fn gram_at(board: &Board, unit: ComponentId, start: usize, end: usize) -> Gram {
        let tokens = board.document().sentence(unit).unwrap().tokens()[start..=end].to_vec();
        Gram::new(tokens)
    }

    #[test]
    fn same_key_is_merged() {
        let (mut board, s1, s2) = board();
        let first = gram_at(&board, s1, 0, 1);
        let second = gram_at(&board, s2, 0, 1);
        board.add_gram(s1, &first).unwrap();
        board.add_gram(s2, &second).unwrap();
        board.add_gram(s2, &second).unwrap();

        assert_eq!(board.gram_count(), 1);
        let gram = board.gram("rust crates").unwrap();
        assert_eq!(gram.surfaces().len(), 2);
        assert_eq!(gram.appearances(), &[s1, s2]);
        assert_eq!(gram.occurrences().len(), 2);
    }

    #[test]
    fn repeated_span_does_not_inflate_surface_counts() {
        let (mut board, s1, s2) = board();
        let first = gram_at(&board, s1, 0, 1);
        let second = gram_at(&board, s2, 0, 1);
        board.add_gram(s1, &first).unwrap();
        board.add_gram(s2, &second).unwrap();
        // a second generator pass over the same sentences
        board.add_gram(s2, &second).unwrap();
        board.add_gram(s2, &second).unwrap();

        let gram = board.gram("rust crates").unwrap();
        let counts: Vec<(&str, usize)> = gram
            .surfaces()
            .iter()
            .map(|s| (s.text.as_str(), s.count))
            .collect();
        assert_eq!(counts, vec![("Rust crates", 1), ("rust crates", 1)]);
        assert_eq!(gram.best_surface(), Some("Rust crates"));
        assert_eq!(gram.occurrences().len(), 2);
    }

    #[test]
    fn scattered_or_out_of_range_tokens_are_malformed() {
        let (mut board, s1, s2) = board();
        let tokens = board.document().sentence(s2).unwrap().tokens().to_vec();

        let reversed = Gram::new(vec![tokens[1].clone(), tokens[0].clone()]);
        assert!(matches!(
            board.add_gram(s2, &reversed),
            Err(KeyphraseError::MalformedCandidate { .. })
        ));
        let gapped = Gram::new(vec![tokens[0].clone(), tokens[2].clone()]);
        assert!(board.add_gram(s2, &gapped).is_err());

        // "rock" is token 2, but the first sentence only has two tokens
        let elsewhere = Gram::new(vec![tokens[2].clone()]);
        assert!(matches!(
            board.add_gram(s1, &elsewhere),
            Err(KeyphraseError::MalformedCandidate { .. })
        ));
        assert_eq!(board.gram_count(), 0);
        assert!(board.grams_in(s1).is_empty());
    }

    #[test]
    fn insertion_copies_the_candidate() {
        let (mut board, s1, _) = board();
        let mut local = gram_at(&board, s1, 0, 1);
        board.add_gram(s1, &local).unwrap();

        local.features.set("frequency", 99.0);
        local.set_score(1.0);
        assert_eq!(board.gram("rust crates").unwrap().features.feature_count(), 0);
    }

    #[test]
    fn merge_ignores_incoming_features() {
        let (mut board, s1, s2) = board();
        board.add_gram(s1, &gram_at(&board, s1, 0, 1)).unwrap();
        let mut second = gram_at(&board, s2, 0, 1);
        second.features.set("frequency", 3.0);
        board.add_gram(s2, &second).unwrap();
        assert!(!board.gram("rust crates").unwrap().features.contains("frequency"));
    }

    #[test]
    fn malformed_candidates_fail_fast() {
        let (mut board, s1, _) = board();
        let empty = Gram::new(Vec::new());
        assert!(matches!(
            board.add_gram(s1, &empty),
            Err(KeyphraseError::MalformedCandidate { .. })
        ));

        let blank_key = Gram::with_key("  ", vec![Token::new("x")]);
        assert!(board.add_gram(s1, &blank_key).is_err());
        assert_eq!(board.gram_count(), 0);
    }

    #[test]
    fn removal_unlinks_every_unit() {
        let (mut board, s1, s2) = board();
        board.add_gram(s1, &gram_at(&board, s1, 0, 1)).unwrap();
        board.add_gram(s2, &gram_at(&board, s2, 0, 1)).unwrap();
        board.add_gram(s2, &gram_at(&board, s2, 2, 2)).unwrap();

        assert!(board.remove_gram("rust crates").is_some());
        for (id, _) in board.sentences(Scope::Document).unwrap() {
            let component = board.document().component(id).unwrap();
            assert!(!component.gram_keys().iter().any(|k| k == "rust crates"));
        }
        let left: Vec<&str> = board.grams_in(s2).iter().map(|g| g.key()).collect();
        assert_eq!(left, vec!["rock"]);
        assert!(board.remove_gram("rust crates").is_none());
    }

    #[test]
    fn grams_keep_insertion_order() {
        let (mut board, s1, s2) = board();
        board.add_gram(s2, &gram_at(&board, s2, 2, 2)).unwrap();
        board.add_gram(s1, &gram_at(&board, s1, 0, 1)).unwrap();
        board.add_gram(s1, &gram_at(&board, s1, 1, 1)).unwrap();
        let keys: Vec<&str> = board.grams().map(Gram::key).collect();
        assert_eq!(keys, vec!["rock", "rust crates", "crates"]);

        let removed = board.retain_grams(|g| g.key().contains(' '));
        assert_eq!(removed, vec!["rock".to_string(), "crates".to_string()]);
        assert_eq!(board.gram_keys(), &["rust crates".to_string()]);
    }

    #[test]
    fn reset_clears_everything() {
        let (mut board, s1, _) = board();
        board.add_gram(s1, &gram_at(&board, s1, 0, 0)).unwrap();
        board.add_annotation(Annotation::text("lang", "en"));
        board.reset(Document::new("next"));
        assert_eq!(board.gram_count(), 0);
        assert!(board.all_annotations().is_empty());
        assert_eq!(board.document().raw_text(), "next");
    }

    #[test]
    fn unknown_unit_is_rejected() {
        let (mut board, s1, _) = board();
        let gram = gram_at(&board, s1, 0, 0);
        let bogus = {
            let mut other = Document::new("");
            let section = other.add_section(other.root(), None).unwrap();
            for _ in 0..10 {
                other.add_sentence(section, Sentence::default()).unwrap();
            }
            other.sentence_ids(Scope::Document).unwrap()[9]
        };
        assert!(matches!(
            board.add_gram(bogus, &gram),
            Err(KeyphraseError::InvalidComponent { .. })
        ));
    }
}
