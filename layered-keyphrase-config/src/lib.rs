#![doc(
    html_logo_url = "https://raw.githubusercontent.com/storyscript/layered-nlp/main/assets/layered-nlp.svg",
    issue_tracker_base_url = "https://github.com/storyscript/layered-nlp/issues/"
)]

//! Configured keyphrase extraction.
//!
//! An [`ExtractorConfig`] (usually read from TOML) lists one pipeline per
//! language. [`Extractor`] builds those pipelines once and runs the one
//! matching each document's language; [`KeyphraseReport`] turns the finished
//! board into JSON for downstream consumers.
//!
//! ## Usage
//!
//! ```
//! use layered_keyphrase::Document;
//! use layered_keyphrase_config::{Extractor, KeyphraseReport};
//!
//! let extractor = Extractor::standard().unwrap();
//! let board = extractor
//!     .extract(Document::from_tagged_text("Vector/NN search/NN is/VBZ fast/JJ"))
//!     .unwrap();
//! let report = KeyphraseReport::from_board(&board);
//! assert_eq!(report.keyphrases[0].key, "vector search");
//! ```

mod config;
mod errors;
mod extractor;
mod registry;
mod report;

pub use config::{ExtractorConfig, PipelineConfig, StageConfig};
pub use errors::{ConfigError, ConfigResult};
pub use extractor::Extractor;
pub use registry::{build_pipeline, build_stage};
pub use report::{KeyphraseReport, ReportEntry};

#[cfg(test)]
mod tests {
    mod extraction;
}
