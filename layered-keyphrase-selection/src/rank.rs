use std::cmp::Ordering;

use layered_keyphrase::{Board, Gram};
use tracing::debug;

/// Score of `gram` under `feature`, `0.0` when absent.
pub(crate) fn score_of(gram: &Gram, feature: &str) -> f64 {
    gram.features.get(feature).unwrap_or(0.0)
}

/// Sort `grams` by `feature`, highest first. The sort is stable, so equal
/// scores keep the order they came in.
pub(crate) fn rank<'a>(grams: impl IntoIterator<Item = &'a Gram>, feature: &str) -> Vec<(String, f64)> {
    let mut ranked: Vec<(String, f64)> = grams
        .into_iter()
        .map(|gram| (gram.key().to_string(), score_of(gram, feature)))
        .collect();
    ranked.sort_by(|a, b| b.1.partial_cmp(&a.1).unwrap_or(Ordering::Equal));
    ranked
}

/// Every candidate key of the board ranked by `feature`.
pub fn ranked_keys(board: &Board, feature: &str) -> Vec<String> {
    rank(board.grams(), feature)
        .into_iter()
        .map(|(key, _)| key)
        .collect()
}

/// Remove `keys` from the board, returning how many were present.
pub(crate) fn discard<'a>(board: &mut Board, keys: impl IntoIterator<Item = &'a String>, stage: &str) -> usize {
    let removed = keys
        .into_iter()
        .filter(|key| board.remove_gram(key).is_some())
        .count();
    debug!(stage, removed, kept = board.gram_count(), "discarded candidates");
    removed
}
