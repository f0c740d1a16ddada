use layered_keyphrase::feature::names;
use layered_keyphrase::{Board, KeyphraseResult, Phase, Scope, Stage};

use crate::rank::{discard, rank};

/// Keeps the `keep` best-ranked candidates and removes the rest.
#[derive(Debug, Clone)]
pub struct RankCut {
    keep: usize,
    feature: String,
}

impl RankCut {
    pub fn new(keep: usize) -> Self {
        Self {
            keep,
            feature: names::SCORE.to_string(),
        }
    }

    pub fn by_feature(mut self, feature: impl Into<String>) -> Self {
        self.feature = feature.into();
        self
    }
}

impl Stage for RankCut {
    fn name(&self) -> &str {
        "cut"
    }

    fn phase(&self) -> Phase {
        Phase::Selection
    }

    fn run(&self, board: &mut Board, _scope: Scope) -> KeyphraseResult<()> {
        let doomed: Vec<String> = rank(board.grams(), &self.feature)
            .into_iter()
            .skip(self.keep)
            .map(|(key, _)| key)
            .collect();
        discard(board, &doomed, self.name());
        Ok(())
    }
}
