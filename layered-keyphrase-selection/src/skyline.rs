//! Elbow cut over the ranked score curve.

use layered_keyphrase::feature::names;
use layered_keyphrase::{Board, KeyphraseResult, Phase, Scope, Stage};
use tracing::warn;

use crate::rank::{discard, rank};

/// Number of leading ranks to keep for scores sorted highest first.
///
/// The top `ceil(5% of N)` ranks are always kept. After them, the gaps
/// between consecutive scores are scanned over a window of
/// `ceil(25% of N)` ranks; the largest gap marks the elbow and everything
/// above it is kept. The earliest of equally large gaps wins. When there is
/// no gap to scan (tiny inputs) everything is kept.
pub fn skyline_keep(scores: &[f64]) -> usize {
    let n = scores.len();
    if n <= 1 {
        return n;
    }
    let keep_best = (5 * n + 99) / 100;
    let window = (n + 3) / 4;

    let mut elbow: Option<(usize, f64)> = None;
    for k in 1..window {
        let boundary = keep_best + k;
        if boundary >= n {
            break;
        }
        let gap = scores[boundary - 1] - scores[boundary];
        if elbow.map_or(true, |(_, widest)| gap > widest) {
            elbow = Some((k, gap));
        }
    }

    match elbow {
        Some((k, _)) => keep_best + k,
        None => n,
    }
}

/// Keeps the candidates above the elbow of the score curve.
#[derive(Debug, Clone)]
pub struct SkylineCut {
    feature: String,
}

impl Default for SkylineCut {
    fn default() -> Self {
        Self::new()
    }
}

impl SkylineCut {
    pub fn new() -> Self {
        Self {
            feature: names::SCORE.to_string(),
        }
    }

    /// Rank by `feature` instead of `score`.
    pub fn by_feature(mut self, feature: impl Into<String>) -> Self {
        self.feature = feature.into();
        self
    }
}

impl Stage for SkylineCut {
    fn name(&self) -> &str {
        "skyline"
    }

    fn phase(&self) -> Phase {
        Phase::Selection
    }

    fn run(&self, board: &mut Board, _scope: Scope) -> KeyphraseResult<()> {
        if board.grams().all(|gram| !gram.features.contains(&self.feature)) && board.gram_count() > 0 {
            warn!(feature = %self.feature, "no candidate is scored, skyline ranks by insertion order");
        }
        let ranked = rank(board.grams(), &self.feature);
        let scores: Vec<f64> = ranked.iter().map(|(_, score)| *score).collect();
        let keep = skyline_keep(&scores);
        let doomed: Vec<String> = ranked.into_iter().skip(keep).map(|(key, _)| key).collect();
        discard(board, &doomed, self.name());
        Ok(())
    }
}
