//! End-to-end behaviour of the board under a small pipeline.

use crate::feature::names;
use crate::{
    Annotation, Board, Document, FnStage, Gram, KeyphraseResult, Phase, Pipeline, Scope, Stage,
};

/// Every single token that is not punctuation becomes a candidate.
fn unigram_generator(board: &mut Board, scope: Scope) -> KeyphraseResult<()> {
    let found: Vec<_> = board
        .sentences(scope)?
        .into_iter()
        .flat_map(|(id, sentence)| {
            sentence
                .tokens()
                .iter()
                .filter(|t| t.text().chars().any(char::is_alphanumeric))
                .map(move |t| (id, Gram::new(vec![t.clone()])))
        })
        .collect();
    for (id, gram) in found {
        board.add_gram(id, &gram)?;
    }
    Ok(())
}

/// Counts occurrences once every occurrence has been merged.
fn occurrence_counter(board: &mut Board, _scope: Scope) -> KeyphraseResult<()> {
    for gram in board.grams_mut() {
        let count = gram.occurrences().len() as f64;
        gram.features.set(names::FREQUENCY, count);
    }
    Ok(())
}

#[test]
fn repeated_words_fold_into_one_candidate() {
    let doc = Document::from_text("Rust is fast. Rust is safe.\n\nFast code is good code.");
    let mut board = Board::new(doc);

    let pipeline = Pipeline::new("unigrams")
        .with_stage(FnStage::new("generate", Phase::Generation, unigram_generator))
        .unwrap()
        .with_stage(FnStage::new("count", Phase::Enrichment, occurrence_counter))
        .unwrap();
    pipeline.run(&mut board, Scope::Document).unwrap();

    let keys: Vec<&str> = board.grams().map(Gram::key).collect();
    assert_eq!(keys, vec!["rust", "is", "fast", "safe", "code", "good"]);
    assert_eq!(board.gram_count(), keys.len());

    let frequency = |key: &str| board.gram(key).and_then(|g| g.features.get(names::FREQUENCY));
    assert_eq!(frequency("is"), Some(3.0));
    assert_eq!(frequency("fast"), Some(2.0));
    // "code" occurs twice in one sentence
    assert_eq!(frequency("code"), Some(2.0));
    assert_eq!(board.gram("code").unwrap().appearances().len(), 1);

    let fast = board.gram("fast").unwrap();
    let surfaces: Vec<&str> = fast.surfaces().iter().map(|s| s.text.as_str()).collect();
    assert_eq!(surfaces, vec!["fast", "Fast"]);
}

#[test]
fn scoped_run_only_touches_the_subtree() {
    let doc = Document::from_text("Alpha beta.\n\nGamma delta.");
    let mut board = Board::new(doc);
    let second_section = board.document().component(board.document().root()).unwrap().children()[1];

    FnStage::new("generate", Phase::Generation, unigram_generator)
        .run(&mut board, Scope::Component(second_section))
        .unwrap();

    let keys: Vec<&str> = board.grams().map(Gram::key).collect();
    assert_eq!(keys, vec!["gamma", "delta"]);
}

#[test]
fn document_annotations_live_on_the_board() {
    let mut board = Board::new(Document::from_text("Hello world."));
    board.add_annotation(Annotation::text("language", "en"));
    board.add_annotation(Annotation::scored("topic", 0.7, "urn:greeting"));
    board.add_annotation(Annotation::scored("topic", 0.2, "urn:planet"));

    let topics: Vec<&str> = board.annotations("topic").map(|a| a.value.label()).collect();
    assert_eq!(topics, vec!["urn:greeting", "urn:planet"]);
    assert_eq!(board.all_annotations().len(), 3);
}
