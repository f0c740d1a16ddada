//! Where in the document a candidate lives.
//!
//! With `S` sentences in the document and `i` the 1-based index of a
//! sentence in document order:
//! - `height` is `1 - i / S` of the first sentence containing the candidate,
//!   written once and never overwritten,
//! - `depth` is `i / S` of the last one,
//! - `lifespan` is `depth + height - 1`,
//! - `frequency_per_sentence` adds `1 / S` per distinct sentence.
//!
//! Positions are always relative to the whole document. A narrower scope
//! only limits which candidates are updated: those found in a sentence under
//! the scope.

use std::collections::{HashMap, HashSet};

use layered_keyphrase::feature::names;
use layered_keyphrase::{Board, KeyphraseResult, Phase, Scope, Stage};
use tracing::debug;

#[derive(Debug, Clone, Copy, Default)]
pub struct PositionFeatures;

impl PositionFeatures {
    pub fn new() -> Self {
        Self
    }
}

struct Span {
    depth: f64,
    height: f64,
    per_sentence: f64,
}

impl Stage for PositionFeatures {
    fn name(&self) -> &str {
        "position_features"
    }

    fn phase(&self) -> Phase {
        Phase::Enrichment
    }

    /// Running twice, or over any sub-scope, gives the same values as one
    /// whole-document run.
    fn run(&self, board: &mut Board, scope: Scope) -> KeyphraseResult<()> {
        let document = board.document();
        let in_scope: HashSet<_> = document.sentence_ids(scope)?.into_iter().collect();
        let sentences = document.sentence_ids(Scope::Document)?;
        if in_scope.is_empty() {
            return Ok(());
        }
        let total = sentences.len() as f64;

        let mut touched: Vec<String> = Vec::new();
        let mut spans: HashMap<String, Span> = HashMap::new();
        for (i, id) in sentences.iter().enumerate() {
            let position = (i + 1) as f64 / total;
            let keys = document
                .component(*id)
                .map(|component| component.gram_keys())
                .unwrap_or_default();
            for key in keys {
                let span = spans.entry(key.clone()).or_insert_with(|| Span {
                    depth: position,
                    height: 1.0 - position,
                    per_sentence: 0.0,
                });
                span.depth = position;
                span.per_sentence += 1.0 / total;
                if in_scope.contains(id) && !touched.contains(key) {
                    touched.push(key.clone());
                }
            }
        }

        for key in &touched {
            let (Some(span), Some(gram)) = (spans.get(key), board.gram_mut(key)) else {
                continue;
            };
            gram.features.set_if_absent(names::HEIGHT, span.height);
            let height = gram.features.get(names::HEIGHT).unwrap_or(span.height);
            gram.features.set(names::DEPTH, span.depth);
            gram.features
                .set(names::LIFESPAN, span.depth + height - 1.0);
            gram.features
                .set(names::FREQUENCY_PER_SENTENCE, span.per_sentence);
        }
        debug!(candidates = touched.len(), sentences = sentences.len(), "position features");
        Ok(())
    }
}
