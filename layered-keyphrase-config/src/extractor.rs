use std::collections::BTreeMap;
use std::sync::Arc;

use layered_keyphrase::{
    Board, Document, KeyphraseError, KeyphraseResult, Pipeline, ResourceContext, Scope, Stage,
};
use tracing::{debug, info_span};

use crate::{build_pipeline, ExtractorConfig};

/// One pipeline per language, sharing a single [`ResourceContext`].
#[derive(Debug)]
pub struct Extractor {
    default_language: String,
    pipelines: BTreeMap<String, Pipeline>,
    resources: Arc<ResourceContext>,
}

impl Extractor {
    pub fn from_config(config: &ExtractorConfig) -> KeyphraseResult<Self> {
        let resources = Arc::new(config.resources());
        let mut pipelines = BTreeMap::new();
        for (language, pipeline) in &config.pipelines {
            pipelines.insert(
                language.clone(),
                build_pipeline(language, pipeline, &resources)?,
            );
        }
        Ok(Self {
            default_language: config.default_language.clone(),
            pipelines,
            resources,
        })
    }

    /// Extractor running [`ExtractorConfig::standard`].
    pub fn standard() -> KeyphraseResult<Self> {
        Self::from_config(&ExtractorConfig::standard())
    }

    pub fn default_language(&self) -> &str {
        &self.default_language
    }

    pub fn languages(&self) -> impl Iterator<Item = &str> {
        self.pipelines.keys().map(String::as_str)
    }

    pub fn pipeline(&self, language: &str) -> Option<&Pipeline> {
        self.pipelines.get(language)
    }

    pub fn resources(&self) -> &Arc<ResourceContext> {
        &self.resources
    }

    /// Run the pipeline of the document's language (the default language
    /// when it has none) on a fresh board and return the board.
    ///
    /// A document whose language has no pipeline is a configuration error.
    pub fn extract(&self, document: Document) -> KeyphraseResult<Board> {
        let language = document
            .language()
            .unwrap_or(&self.default_language)
            .to_string();
        let pipeline = self.pipelines.get(&language).ok_or_else(|| {
            KeyphraseError::configuration(format!(
                "no pipeline registered for language `{}`",
                language
            ))
        })?;

        let _span = info_span!("extract", language = %language).entered();
        let mut board = Board::new(document);
        pipeline.run(&mut board, Scope::Document)?;
        debug!(keyphrases = board.gram_count(), "extracted");
        Ok(board)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{PipelineConfig, StageConfig};

    #[test]
    fn missing_language_falls_back_to_default() {
        let extractor = Extractor::standard().unwrap();
        let board = extractor
            .extract(Document::from_tagged_text("Graph/NN databases/NNS scale/VBP"))
            .unwrap();
        assert!(board.contains_gram("graph databases"));
    }

    #[test]
    fn unregistered_language_is_a_configuration_error() {
        let extractor = Extractor::standard().unwrap();
        let document = Document::from_tagged_text("Graphdatenbanken/NN").with_language("de");
        let err = extractor.extract(document).unwrap_err();
        assert!(matches!(err, KeyphraseError::Configuration(_)));
    }

    #[test]
    fn language_selects_the_pipeline() {
        let mut config = ExtractorConfig::standard();
        config.pipelines.insert(
            "de".to_string(),
            PipelineConfig {
                stages: vec![StageConfig::Generate {
                    max_tokens: 1,
                    pattern: Some("NN ".to_string()),
                }],
            },
        );
        config
            .stopwords
            .insert("de".to_string(), vec!["jahr".to_string()]);
        let extractor = Extractor::from_config(&config).unwrap();
        assert_eq!(extractor.languages().collect::<Vec<_>>(), vec!["de", "en"]);

        let document = Document::from_tagged_text("Jahr/NN Daten/NN wachsen/VVFIN").with_language("de");
        let board = extractor.extract(document).unwrap();
        assert_eq!(board.gram_keys(), &["daten".to_string()]);
    }
}
