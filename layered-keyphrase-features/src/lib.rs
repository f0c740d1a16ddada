#![doc(
    html_logo_url = "https://raw.githubusercontent.com/storyscript/layered-nlp/main/assets/layered-nlp.svg",
    issue_tracker_base_url = "https://github.com/storyscript/layered-nlp/issues/"
)]

//! Candidate features for layered-keyphrase.
//!
//! Every stage here runs in the `Enrichment` phase: it reads the merged
//! candidate table and writes named features into each candidate's bag.
//!
//! | Stage | Features |
//! |-------|----------|
//! | [`PositionFeatures`] | `depth`, `height`, `lifespan`, `frequency_per_sentence` |
//! | [`FrequencyFeature`] | `frequency` |
//! | [`MaximalityFeature`] | `maximality` (needs `frequency`) |
//! | [`LinearScorer`] | `score` |

mod frequency;
mod linear;
mod maximality;
mod position;

pub use frequency::FrequencyFeature;
pub use linear::LinearScorer;
pub use maximality::MaximalityFeature;
pub use position::PositionFeatures;
