use std::collections::HashMap;

use layered_keyphrase::feature::names;
use layered_keyphrase::{Board, Gram, KeyphraseResult, Phase, Scope, Stage};

use crate::rank::{discard, rank};

/// Per-label top-`K` cut.
///
/// Candidates carrying an annotation under `key` are grouped by the label of
/// their first such annotation (text, URI or concept). Each group keeps its
/// `keep` best-ranked members. Candidates without the annotation are left
/// alone.
#[derive(Debug, Clone)]
pub struct AnnotationCut {
    key: String,
    keep: usize,
    feature: String,
}

impl AnnotationCut {
    pub fn new(key: impl Into<String>, keep: usize) -> Self {
        Self {
            key: key.into(),
            keep,
            feature: names::SCORE.to_string(),
        }
    }

    pub fn by_feature(mut self, feature: impl Into<String>) -> Self {
        self.feature = feature.into();
        self
    }

    fn label<'a>(&self, gram: &'a Gram) -> Option<&'a str> {
        gram.features
            .annotations(&self.key)
            .next()
            .map(|annotation| annotation.value.label())
    }
}

impl Stage for AnnotationCut {
    fn name(&self) -> &str {
        "annotation_cut"
    }

    fn phase(&self) -> Phase {
        Phase::Selection
    }

    fn run(&self, board: &mut Board, _scope: Scope) -> KeyphraseResult<()> {
        let mut groups: Vec<(String, Vec<&Gram>)> = Vec::new();
        let mut index: HashMap<String, usize> = HashMap::new();
        for gram in board.grams() {
            let Some(label) = self.label(gram) else {
                continue;
            };
            let slot = *index.entry(label.to_string()).or_insert_with(|| {
                groups.push((label.to_string(), Vec::new()));
                groups.len() - 1
            });
            groups[slot].1.push(gram);
        }

        let doomed: Vec<String> = groups
            .into_iter()
            .flat_map(|(_, members)| {
                rank(members, &self.feature)
                    .into_iter()
                    .skip(self.keep)
                    .map(|(key, _)| key)
            })
            .collect();
        discard(board, &doomed, self.name());
        Ok(())
    }
}
