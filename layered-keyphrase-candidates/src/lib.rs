#![doc(
    html_logo_url = "https://raw.githubusercontent.com/storyscript/layered-nlp/main/assets/layered-nlp.svg",
    issue_tracker_base_url = "https://github.com/storyscript/layered-nlp/issues/"
)]

//! Candidate generation for layered-keyphrase.
//!
//! Generators are the only stages that insert [`layered_keyphrase::Gram`]s
//! into a board. They run in the `Generation` phase, before any stage that
//! reads candidate features.
//!
//! ## Usage
//!
//! ```
//! use std::sync::Arc;
//! use layered_keyphrase::{Board, Document, ResourceContext, Scope, Stage};
//! use layered_keyphrase_candidates::PatternGenerator;
//!
//! let doc = Document::from_tagged_text("Deep/JJ learning/NN needs/VBZ data/NNS");
//! let mut board = Board::new(doc);
//! PatternGenerator::new(Arc::new(ResourceContext::with_defaults()))
//!     .run(&mut board, Scope::Document)
//!     .unwrap();
//! assert!(board.contains_gram("deep learning"));
//! ```

mod pattern;

pub use pattern::{PatternGenerator, DEFAULT_MAX_TOKENS, DEFAULT_NOUN_PHRASE_PATTERN};
