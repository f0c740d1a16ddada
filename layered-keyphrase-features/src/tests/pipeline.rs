use std::sync::Arc;

use layered_keyphrase::feature::names;
use layered_keyphrase::{
    Board, Document, KeyphraseError, Pipeline, ResourceContext, Scope, Stage,
};
use layered_keyphrase_candidates::PatternGenerator;

use crate::{FrequencyFeature, LinearScorer, MaximalityFeature, PositionFeatures};

const TEXT: &str = "Deep/JJ learning/NN models/NNS need/VBP data/NNS
Deep/JJ learning/NN works/VBZ
Machine/NN learning/NN helps/VBZ";

fn feature(board: &Board, key: &str, name: &str) -> f64 {
    board
        .gram(key)
        .and_then(|gram| gram.features.get(name))
        .unwrap_or_else(|| panic!("{key} has no {name}"))
}

fn close(actual: f64, expected: f64) {
    assert!(
        (actual - expected).abs() < 1e-9,
        "expected {expected}, got {actual}"
    );
}

fn enrich() -> Pipeline {
    Pipeline::new("en")
        .with_stage(PatternGenerator::new(Arc::new(ResourceContext::with_defaults())))
        .unwrap()
        .with_stage(PositionFeatures)
        .unwrap()
        .with_stage(FrequencyFeature)
        .unwrap()
        .with_stage(MaximalityFeature)
        .unwrap()
        .with_stage(LinearScorer::new([
            (names::FREQUENCY, 1.0),
            (names::MAXIMALITY, 2.0),
        ]))
        .unwrap()
}

#[test]
fn features_flow_into_the_score() {
    let mut board = Board::new(Document::from_tagged_text(TEXT));
    enrich().run(&mut board, Scope::Document).unwrap();

    let keys: Vec<&str> = board.grams().map(|g| g.key()).collect();
    assert_eq!(
        keys,
        vec![
            "deep learning",
            "deep learning models",
            "learning",
            "learning models",
            "models",
            "data",
            "machine",
            "machine learning",
        ]
    );

    close(feature(&board, "learning", names::FREQUENCY), 3.0);
    close(feature(&board, "learning", names::MAXIMALITY), 1.0 / 3.0);
    close(feature(&board, "learning", names::SCORE), 3.0 + 2.0 / 3.0);
    close(feature(&board, "learning", names::HEIGHT), 2.0 / 3.0);
    close(feature(&board, "learning", names::DEPTH), 1.0);

    close(feature(&board, "deep learning", names::MAXIMALITY), 0.5);
    close(feature(&board, "deep learning", names::SCORE), 3.0);
    close(feature(&board, "learning models", names::SCORE), 1.0);
    close(feature(&board, "machine learning", names::SCORE), 3.0);
}

#[test]
fn rerunning_enrichment_changes_nothing() {
    let mut board = Board::new(Document::from_tagged_text(TEXT));
    enrich().run(&mut board, Scope::Document).unwrap();
    let before: Vec<_> = board.grams().map(|g| g.features.clone()).collect();

    let again = Pipeline::new("again")
        .with_stage(PositionFeatures)
        .unwrap()
        .with_stage(FrequencyFeature)
        .unwrap()
        .with_stage(MaximalityFeature)
        .unwrap()
        .with_stage(LinearScorer::new([
            (names::FREQUENCY, 1.0),
            (names::MAXIMALITY, 2.0),
        ]))
        .unwrap();
    again.run(&mut board, Scope::Document).unwrap();

    let after: Vec<_> = board.grams().map(|g| g.features.clone()).collect();
    assert_eq!(before, after);
}

#[test]
fn maximality_without_frequency_names_the_stage() {
    let pipeline = Pipeline::new("broken")
        .with_stage(PatternGenerator::new(Arc::new(ResourceContext::with_defaults())))
        .unwrap()
        .with_stage(MaximalityFeature)
        .unwrap();

    let mut board = Board::new(Document::from_tagged_text(TEXT));
    match pipeline.run(&mut board, Scope::Document).unwrap_err() {
        KeyphraseError::Stage { stage, source } => {
            assert_eq!(stage, "maximality");
            assert!(matches!(*source, KeyphraseError::Configuration(_)));
        }
        other => panic!("unexpected error: {other}"),
    }
}
