#![doc(
    html_logo_url = "https://raw.githubusercontent.com/storyscript/layered-nlp/main/assets/layered-nlp.svg",
    issue_tracker_base_url = "https://github.com/storyscript/layered-nlp/issues/"
)]

//! Board-based keyphrase extraction.
//!
//! A document is loaded into a [`Board`], then an ordered [`Pipeline`] of
//! [`Stage`]s runs over it: upstream stages fill sentences with tokens,
//! generators insert candidate [`Gram`]s (repeated occurrences are merged by
//! canonical key), enrichment stages attach features, and selection stages
//! prune the candidate table down to the final ranked keyphrases.
//!
//! ## Core Types
//!
//! - [`Document`] / [`DocumentComponent`] - section and sentence tree
//! - [`FeatureBag`] / [`Annotation`] - per-unit features and typed annotations
//! - [`Gram`] - canonical candidate phrase
//! - [`Board`] - the shared per-document workspace
//! - [`Stage`] / [`Pipeline`] - ordered analysis stages
//!
//! ## Example
//!
//! ```
//! use layered_keyphrase::{Board, Document, Gram, Scope};
//!
//! let doc = Document::from_tagged_text("Rust/NNP crates/NNS\nrust/NN crates/NNS rock/VBP");
//! let mut board = Board::new(doc);
//! for (id, tokens) in board
//!     .sentences(Scope::Document)
//!     .unwrap()
//!     .into_iter()
//!     .map(|(id, s)| (id, s.tokens()[..2].to_vec()))
//!     .collect::<Vec<_>>()
//! {
//!     board.add_gram(id, &Gram::new(tokens)).unwrap();
//! }
//! assert_eq!(board.gram_count(), 1);
//! assert_eq!(board.gram("rust crates").unwrap().appearances().len(), 2);
//! ```

mod board;
mod display;
mod document;
mod error;
pub mod feature;
mod gram;
mod resources;
mod stage;

pub use board::Board;
pub use display::BoardDisplay;
pub use document::{
    ComponentId, ComponentKind, Document, DocumentComponent, Scope, Sentence, Token,
};
pub use error::{KeyphraseError, KeyphraseResult};
pub use feature::{Annotation, AnnotationValue, FeatureBag};
pub use gram::{canonical_key, Gram, Keyphrase, Occurrence, Surface};
pub use resources::ResourceContext;
pub use stage::{FnStage, Phase, Pipeline, Stage};

#[cfg(test)]
mod tests {
    mod display;
    mod scenarios;
}
