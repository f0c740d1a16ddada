//! Whole-document frequency of each candidate.

use layered_keyphrase::feature::names;
use layered_keyphrase::{Board, Gram, KeyphraseError, KeyphraseResult, Phase, Scope, Stage};
use regex::Regex;
use tracing::debug;

/// Counts case-insensitive whole-word matches of every observed surface of a
/// candidate in the raw document text.
///
/// A candidate that already carries `frequency` keeps it. The count never
/// drops below the number of recorded occurrences: a surface rebuilt from
/// tokens (`"fast ."`) may not appear verbatim in the raw text.
#[derive(Debug, Clone, Copy, Default)]
pub struct FrequencyFeature;

impl FrequencyFeature {
    pub fn new() -> Self {
        Self
    }

    /// Number of whole-word, case-insensitive matches of `gram`'s surfaces.
    pub fn count(text: &str, gram: &Gram) -> KeyphraseResult<usize> {
        let mut seen: Vec<String> = Vec::new();
        let mut total = 0;
        for surface in gram.surfaces() {
            let folded = surface.text.to_lowercase();
            if seen.contains(&folded) {
                continue;
            }
            total += surface_regex(&surface.text)?.find_iter(text).count();
            seen.push(folded);
        }
        Ok(total)
    }
}

/// Whitespace inside the surface matches any whitespace run; word boundaries
/// are only required where the surface starts or ends with a word character.
fn surface_regex(surface: &str) -> KeyphraseResult<Regex> {
    let body = surface
        .split_whitespace()
        .map(regex::escape)
        .collect::<Vec<_>>()
        .join(r"\s+");
    let is_word = |c: Option<char>| c.map_or(false, |c| c.is_alphanumeric() || c == '_');
    let lead = if is_word(surface.trim().chars().next()) { r"\b" } else { "" };
    let trail = if is_word(surface.trim().chars().last()) { r"\b" } else { "" };
    Regex::new(&format!("(?i){}{}{}", lead, body, trail)).map_err(|err| {
        KeyphraseError::configuration(format!("cannot match surface `{}`: {}", surface, err))
    })
}

impl Stage for FrequencyFeature {
    fn name(&self) -> &str {
        "frequency"
    }

    fn phase(&self) -> Phase {
        Phase::Enrichment
    }

    fn run(&self, board: &mut Board, _scope: Scope) -> KeyphraseResult<()> {
        let mut counts = Vec::new();
        for gram in board.grams() {
            if gram.features.contains(names::FREQUENCY) {
                continue;
            }
            let count = Self::count(board.document().raw_text(), gram)?;
            let count = count.max(gram.occurrences().len());
            counts.push((gram.key().to_string(), count as f64));
        }

        let written = counts.len();
        for (key, count) in counts {
            if let Some(gram) = board.gram_mut(&key) {
                gram.features.set(names::FREQUENCY, count);
            }
        }
        debug!(written, "frequency");
        Ok(())
    }
}
