//! Weighted sum of named features.

use std::collections::BTreeMap;

use layered_keyphrase::feature::names;
use layered_keyphrase::{Board, FeatureBag, KeyphraseResult, Phase, Scope, Stage};
use tracing::{debug, warn};

/// Scores each candidate as `Σ weight[name] * feature[name]` over the
/// features it carries that have a weight.
///
/// Features without a weight and weights without a feature contribute
/// nothing. The output feature is never read as an input.
#[derive(Debug, Clone)]
pub struct LinearScorer {
    weights: BTreeMap<String, f64>,
    output: String,
}

impl LinearScorer {
    pub fn new<I, S>(weights: I) -> Self
    where
        I: IntoIterator<Item = (S, f64)>,
        S: Into<String>,
    {
        Self {
            weights: weights
                .into_iter()
                .map(|(name, weight)| (name.into(), weight))
                .collect(),
            output: names::SCORE.to_string(),
        }
    }

    /// Write the result under `name` instead of `score`.
    pub fn with_output(mut self, name: impl Into<String>) -> Self {
        self.output = name.into();
        self
    }

    pub fn weights(&self) -> &BTreeMap<String, f64> {
        &self.weights
    }

    pub fn score(&self, features: &FeatureBag) -> f64 {
        features
            .features()
            .filter(|(name, _)| *name != self.output)
            .filter_map(|(name, value)| self.weights.get(name).map(|weight| weight * value))
            .sum()
    }
}

impl Stage for LinearScorer {
    fn name(&self) -> &str {
        "linear_score"
    }

    fn phase(&self) -> Phase {
        Phase::Enrichment
    }

    fn run(&self, board: &mut Board, _scope: Scope) -> KeyphraseResult<()> {
        if self.weights.is_empty() {
            warn!("linear scorer has no weights, every score will be 0");
        }
        let mut scored = 0;
        for gram in board.grams_mut() {
            let score = self.score(&gram.features);
            gram.features.set(self.output.as_str(), score);
            scored += 1;
        }
        debug!(scored, output = %self.output, "linear score");
        Ok(())
    }
}
