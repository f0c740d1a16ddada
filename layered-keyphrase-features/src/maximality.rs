//! How often a candidate occurs on its own rather than inside a longer one.

use layered_keyphrase::feature::names;
use layered_keyphrase::{Board, KeyphraseError, KeyphraseResult, Phase, Scope, Stage};
use tracing::debug;

/// `maximality = 1 - max(subsumer.frequency / candidate.frequency)`, where a
/// subsumer is any other candidate whose token signature contains this one's.
/// Candidates without a subsumer get `1.0`.
///
/// Runs over the whole candidate table and requires `frequency` on every
/// candidate.
#[derive(Debug, Clone, Copy, Default)]
pub struct MaximalityFeature;

impl MaximalityFeature {
    pub fn new() -> Self {
        Self
    }
}

struct Entry {
    key: String,
    signature: String,
    frequency: f64,
}

impl Stage for MaximalityFeature {
    fn name(&self) -> &str {
        "maximality"
    }

    fn phase(&self) -> Phase {
        Phase::Enrichment
    }

    fn run(&self, board: &mut Board, _scope: Scope) -> KeyphraseResult<()> {
        let mut entries = Vec::with_capacity(board.gram_count());
        for gram in board.grams() {
            let frequency = gram.features.get(names::FREQUENCY).ok_or_else(|| {
                KeyphraseError::configuration(format!(
                    "maximality needs `{}` on every candidate, `{}` has none",
                    names::FREQUENCY,
                    gram.key()
                ))
            })?;
            entries.push(Entry {
                key: gram.key().to_string(),
                signature: gram.signature(),
                frequency,
            });
        }

        let mut subsumed = 0;
        for entry in &entries {
            let ratio = entries
                .iter()
                .filter(|other| other.key != entry.key && other.signature.contains(&entry.signature))
                .map(|other| {
                    if entry.frequency > 0.0 {
                        other.frequency / entry.frequency
                    } else {
                        0.0
                    }
                })
                .fold(None, |best: Option<f64>, r| Some(best.map_or(r, |b| b.max(r))));
            let maximality = match ratio {
                Some(ratio) => {
                    subsumed += 1;
                    1.0 - ratio
                }
                None => 1.0,
            };
            if let Some(gram) = board.gram_mut(&entry.key) {
                gram.features.set(names::MAXIMALITY, maximality);
            }
        }
        debug!(candidates = entries.len(), subsumed, "maximality");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use layered_keyphrase::{Document, Gram};

    fn board_with(frequencies: &[(&str, f64)]) -> Board {
        let mut board = Board::new(Document::from_tagged_text(
            "deep/JJ learning/NN models/NNS\nmachine/NN learning/NN",
        ));
        let ids = board.document().sentence_ids(Scope::Document).unwrap();
        let spans = [(0, 0, 1), (0, 0, 2), (0, 1, 1), (1, 0, 1), (0, 2, 2)];
        for (sentence, start, end) in spans {
            let id = ids[sentence];
            let tokens = board.document().sentence(id).unwrap().tokens()[start..=end].to_vec();
            board.add_gram(id, &Gram::new(tokens)).unwrap();
        }
        for (key, frequency) in frequencies {
            board
                .gram_mut(key)
                .unwrap()
                .features
                .set(names::FREQUENCY, *frequency);
        }
        board
    }

    fn maximality(board: &Board, key: &str) -> f64 {
        board.gram(key).unwrap().features.get(names::MAXIMALITY).unwrap()
    }

    #[test]
    fn strongest_subsumer_wins() {
        let mut board = board_with(&[
            ("deep learning", 2.0),
            ("deep learning models", 1.0),
            ("learning", 4.0),
            ("machine learning", 1.0),
            ("models", 1.0),
        ]);
        MaximalityFeature.run(&mut board, Scope::Document).unwrap();

        // "learning" is inside "deep learning" (2/4) and "machine learning" (1/4)
        assert_eq!(maximality(&board, "learning"), 0.5);
        assert_eq!(maximality(&board, "deep learning"), 0.5);
        // "models" only ever occurs inside "deep learning models"
        assert_eq!(maximality(&board, "models"), 0.0);
        assert_eq!(maximality(&board, "deep learning models"), 1.0);
        assert_eq!(maximality(&board, "machine learning"), 1.0);
    }

    #[test]
    fn missing_frequency_is_a_configuration_error() {
        let mut board = board_with(&[("learning", 4.0)]);
        let err = MaximalityFeature.run(&mut board, Scope::Document).unwrap_err();
        assert!(matches!(err, KeyphraseError::Configuration(_)));
        assert!(board.grams().all(|g| !g.features.contains(names::MAXIMALITY)));
    }
}
