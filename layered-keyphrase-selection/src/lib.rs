#![doc(
    html_logo_url = "https://raw.githubusercontent.com/storyscript/layered-nlp/main/assets/layered-nlp.svg",
    issue_tracker_base_url = "https://github.com/storyscript/layered-nlp/issues/"
)]

//! Selection stages for layered-keyphrase.
//!
//! Selection stages only ever remove candidates, always through
//! [`layered_keyphrase::Board::remove_gram`] so no sentence keeps a key that
//! left the table. Rankings sort by a score feature (`score` unless
//! configured otherwise), highest first; candidates without it rank as `0.0`
//! and equal scores keep board insertion order.
//!
//! ## Usage
//!
//! ```
//! use layered_keyphrase::{Board, Document, Gram, Scope, Stage};
//! use layered_keyphrase_selection::RankCut;
//!
//! let mut board = Board::new(Document::from_tagged_text("graph/NN data/NNS model/NN"));
//! let unit = board.document().sentence_ids(Scope::Document).unwrap()[0];
//! let tokens = board.document().sentence(unit).unwrap().tokens().to_vec();
//! for (token, score) in tokens.into_iter().zip([0.2, 0.9, 0.5]) {
//!     board.add_gram(unit, &Gram::new(vec![token])).unwrap();
//!     let key = board.gram_keys().last().unwrap().clone();
//!     board.gram_mut(&key).unwrap().set_score(score);
//! }
//!
//! RankCut::new(2).run(&mut board, Scope::Document).unwrap();
//! assert_eq!(board.gram_keys(), &["data".to_string(), "model".to_string()]);
//! ```

mod annotation_cut;
mod cut;
mod gram_merger;
mod rank;
mod skyline;

pub use annotation_cut::AnnotationCut;
pub use cut::RankCut;
pub use gram_merger::GramMerger;
pub use rank::ranked_keys;
pub use skyline::{skyline_keep, SkylineCut};

#[cfg(test)]
mod tests {
    mod selection;
}
