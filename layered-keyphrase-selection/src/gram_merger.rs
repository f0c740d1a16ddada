use layered_keyphrase::{Board, KeyphraseResult, Phase, Scope, Stage};

use crate::rank::discard;

/// Separates accepted keys; never occurs inside a key.
const DELIMITER: &str = "\u{1f}\u{1f}";

/// Removes every candidate whose key is a substring of a longer kept key.
///
/// Keys are visited longest first (by character count, insertion order among
/// equal lengths). A key is kept unless it already occurs in the text of the
/// keys kept before it, so of two identical-length overlapping keys the
/// earlier one survives.
#[derive(Debug, Clone, Copy, Default)]
pub struct GramMerger;

impl GramMerger {
    pub fn new() -> Self {
        Self
    }
}

impl Stage for GramMerger {
    fn name(&self) -> &str {
        "gram_merger"
    }

    fn phase(&self) -> Phase {
        Phase::Selection
    }

    fn run(&self, board: &mut Board, _scope: Scope) -> KeyphraseResult<()> {
        let mut keys: Vec<String> = board.gram_keys().to_vec();
        keys.sort_by(|a, b| b.chars().count().cmp(&a.chars().count()));

        let mut accepted = String::new();
        let mut doomed = Vec::new();
        for key in keys {
            if accepted.contains(key.as_str()) {
                doomed.push(key);
            } else {
                accepted.push_str(DELIMITER);
                accepted.push_str(&key);
                accepted.push_str(DELIMITER);
            }
        }
        discard(board, &doomed, self.name());
        Ok(())
    }
}
