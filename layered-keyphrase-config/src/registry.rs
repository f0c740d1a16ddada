//! Turns configured stages into runnable ones.

use std::sync::Arc;

use layered_keyphrase::{KeyphraseResult, Pipeline, ResourceContext, Stage};
use layered_keyphrase_candidates::PatternGenerator;
use layered_keyphrase_features::{
    FrequencyFeature, LinearScorer, MaximalityFeature, PositionFeatures,
};
use layered_keyphrase_selection::{AnnotationCut, GramMerger, RankCut, SkylineCut};
use tracing::debug;

use crate::{ConfigError, ConfigResult, PipelineConfig, StageConfig};

/// Build one stage. `language` is the pipeline's language, used by the
/// generator for documents without a language tag.
pub fn build_stage(
    config: &StageConfig,
    language: &str,
    resources: &Arc<ResourceContext>,
) -> ConfigResult<Box<dyn Stage>> {
    let stage: Box<dyn Stage> = match config {
        StageConfig::Generate {
            max_tokens,
            pattern,
        } => {
            let mut generator = PatternGenerator::new(Arc::clone(resources))
                .with_max_tokens(*max_tokens)
                .with_default_language(language);
            if let Some(pattern) = pattern {
                generator = generator.with_pattern(pattern).map_err(|e| {
                    ConfigError::InvalidPattern {
                        pattern: pattern.clone(),
                        message: e.to_string(),
                    }
                })?;
            }
            Box::new(generator)
        }
        StageConfig::Position => Box::new(PositionFeatures),
        StageConfig::Frequency => Box::new(FrequencyFeature),
        StageConfig::Maximality => Box::new(MaximalityFeature),
        StageConfig::LinearScore { weights, output } => {
            let scorer = LinearScorer::new(weights.iter().map(|(name, w)| (name.clone(), *w)));
            match output {
                Some(output) => Box::new(scorer.with_output(output.as_str())),
                None => Box::new(scorer),
            }
        }
        StageConfig::Skyline { feature } => match feature {
            Some(feature) => Box::new(SkylineCut::new().by_feature(feature.as_str())),
            None => Box::new(SkylineCut::new()),
        },
        StageConfig::Cut { keep, feature } => {
            let cut = RankCut::new(*keep);
            match feature {
                Some(feature) => Box::new(cut.by_feature(feature.as_str())),
                None => Box::new(cut),
            }
        }
        StageConfig::AnnotationCut { key, keep, feature } => {
            let cut = AnnotationCut::new(key.as_str(), *keep);
            match feature {
                Some(feature) => Box::new(cut.by_feature(feature.as_str())),
                None => Box::new(cut),
            }
        }
        StageConfig::GramMerger => Box::new(GramMerger),
    };
    Ok(stage)
}

/// Build the pipeline for `language`, checking stage order as it goes.
pub fn build_pipeline(
    language: &str,
    config: &PipelineConfig,
    resources: &Arc<ResourceContext>,
) -> KeyphraseResult<Pipeline> {
    let mut pipeline = Pipeline::new(language);
    for stage in &config.stages {
        pipeline.push_boxed(build_stage(stage, language, resources)?)?;
    }
    debug!(language, stages = pipeline.len(), "built pipeline");
    Ok(pipeline)
}
