//! Ranked keyphrases in a serializable shape.

use std::collections::BTreeMap;

use layered_keyphrase::feature::names;
use layered_keyphrase::{Annotation, AnnotationValue, Board};
use layered_keyphrase_selection::ranked_keys;
use serde::{Deserialize, Serialize};

/// What downstream consumers read from a finished board.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct KeyphraseReport {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub language: Option<String>,
    pub keyphrases: Vec<ReportEntry>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReportEntry {
    pub key: String,
    /// Most frequent surface form.
    pub surface: String,
    pub score: f64,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub features: BTreeMap<String, f64>,
    /// Only inference annotations are exported.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub inferences: Vec<Annotation>,
}

impl KeyphraseReport {
    /// Candidates ranked by `score`, highest first, ties in insertion order.
    pub fn from_board(board: &Board) -> Self {
        let keyphrases = ranked_keys(board, names::SCORE)
            .iter()
            .filter_map(|key| board.gram(key))
            .map(|gram| ReportEntry {
                key: gram.key().to_string(),
                surface: gram.best_surface().unwrap_or(gram.key()).to_string(),
                score: gram.score().unwrap_or(0.0),
                features: gram
                    .features
                    .features()
                    .filter(|(name, _)| *name != names::SCORE)
                    .map(|(name, value)| (name.to_string(), value))
                    .collect(),
                inferences: gram
                    .features
                    .all_annotations()
                    .iter()
                    .filter(|a| matches!(a.value, AnnotationValue::Inference { .. }))
                    .cloned()
                    .collect(),
            })
            .collect();
        Self {
            language: board.document().language().map(str::to_string),
            keyphrases,
        }
    }

    /// Keep only the first `n` entries.
    pub fn top(mut self, n: usize) -> Self {
        self.keyphrases.truncate(n);
        self
    }

    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string(self)
    }

    pub fn to_json_pretty(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use layered_keyphrase::{Document, Gram, Scope};

    fn board() -> Board {
        let mut board =
            Board::new(Document::from_tagged_text("Rust/NNP crates/NNS compile/VBP").with_language("en"));
        let unit = board.document().sentence_ids(Scope::Document).unwrap()[0];
        let tokens = board.document().sentence(unit).unwrap().tokens().to_vec();
        board.add_gram(unit, &Gram::new(tokens[0..1].to_vec())).unwrap();
        board.add_gram(unit, &Gram::new(tokens[0..2].to_vec())).unwrap();

        let pair = board.gram_mut("rust crates").unwrap();
        pair.set_score(2.5);
        pair.features.set("frequency", 1.0);
        pair.features
            .add_annotation(Annotation::inference("wiki", "Rust (programming language)", 0.9, "urn:rust"));
        pair.features.add_annotation(Annotation::text("ner", "PRODUCT"));
        board
    }

    #[test]
    fn report_is_ranked_json() {
        let report = KeyphraseReport::from_board(&board());
        insta::assert_snapshot!(report.to_json_pretty().unwrap(), @r###"
        {
          "language": "en",
          "keyphrases": [
            {
              "key": "rust crates",
              "surface": "Rust crates",
              "score": 2.5,
              "features": {
                "frequency": 1.0
              },
              "inferences": [
                {
                  "key": "wiki",
                  "value": {
                    "kind": "inference",
                    "data": {
                      "concept": "Rust (programming language)",
                      "score": 0.9,
                      "uri": "urn:rust"
                    }
                  }
                }
              ]
            },
            {
              "key": "rust",
              "surface": "Rust",
              "score": 0.0
            }
          ]
        }
        "###);
    }

    #[test]
    fn json_reads_back() {
        let report = KeyphraseReport::from_board(&board()).top(1);
        let json = report.to_json().unwrap();
        let back: KeyphraseReport = serde_json::from_str(&json).unwrap();
        assert_eq!(back, report);
        assert_eq!(back.keyphrases.len(), 1);
    }
}
