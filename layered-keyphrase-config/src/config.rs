//! Extractor configuration, read from TOML.
//!
//! ```toml
//! default_language = "en"
//!
//! [pipelines.en]
//! stages = [
//!   { stage = "generate", max_tokens = 4 },
//!   { stage = "position" },
//!   { stage = "frequency" },
//!   { stage = "maximality" },
//!   { stage = "linear_score", weights = { frequency = 1.0, maximality = 2.0 } },
//!   { stage = "skyline" },
//!   { stage = "gram_merger" },
//! ]
//!
//! [stopwords]
//! en = ["the", "a", "of"]
//! ```

use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

use layered_keyphrase::feature::names;
use layered_keyphrase::ResourceContext;
use layered_keyphrase_candidates::DEFAULT_MAX_TOKENS;
use serde::{Deserialize, Serialize};

use crate::{ConfigError, ConfigResult};

fn default_language() -> String {
    "en".to_string()
}

fn default_max_tokens() -> usize {
    DEFAULT_MAX_TOKENS
}

/// Languages, their pipelines and extra stop-words.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExtractorConfig {
    /// Pipeline used for documents without a language tag.
    #[serde(default = "default_language")]
    pub default_language: String,
    #[serde(default)]
    pub pipelines: BTreeMap<String, PipelineConfig>,
    /// Stop-words per language, added to the built-in lists.
    #[serde(default)]
    pub stopwords: BTreeMap<String, Vec<String>>,
}

/// Stages of one language's pipeline, in run order.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PipelineConfig {
    #[serde(default)]
    pub stages: Vec<StageConfig>,
}

/// One configured stage.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "stage", rename_all = "snake_case")]
pub enum StageConfig {
    /// Part-of-speech pattern candidate generator.
    Generate {
        #[serde(default = "default_max_tokens")]
        max_tokens: usize,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        pattern: Option<String>,
    },
    Position,
    Frequency,
    Maximality,
    LinearScore {
        #[serde(default)]
        weights: BTreeMap<String, f64>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        output: Option<String>,
    },
    Skyline {
        #[serde(default, skip_serializing_if = "Option::is_none")]
        feature: Option<String>,
    },
    Cut {
        keep: usize,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        feature: Option<String>,
    },
    AnnotationCut {
        key: String,
        keep: usize,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        feature: Option<String>,
    },
    GramMerger,
}

impl StageConfig {
    /// Every value accepted for the `stage` field.
    pub const NAMES: &'static [&'static str] = &[
        "generate",
        "position",
        "frequency",
        "maximality",
        "linear_score",
        "skyline",
        "cut",
        "annotation_cut",
        "gram_merger",
    ];
}

impl ExtractorConfig {
    /// The built-in English pipeline.
    pub fn standard() -> Self {
        let stages = vec![
            StageConfig::Generate {
                max_tokens: DEFAULT_MAX_TOKENS,
                pattern: None,
            },
            StageConfig::Position,
            StageConfig::Frequency,
            StageConfig::Maximality,
            StageConfig::LinearScore {
                weights: [(names::FREQUENCY, 1.0), (names::MAXIMALITY, 2.0)]
                    .into_iter()
                    .map(|(name, weight)| (name.to_string(), weight))
                    .collect(),
                output: None,
            },
            StageConfig::Skyline { feature: None },
            StageConfig::GramMerger,
        ];
        let mut pipelines = BTreeMap::new();
        pipelines.insert(default_language(), PipelineConfig { stages });
        Self {
            default_language: default_language(),
            pipelines,
            stopwords: BTreeMap::new(),
        }
    }

    /// Parse a TOML configuration.
    pub fn from_toml_str(content: &str) -> ConfigResult<Self> {
        let table: toml::Table = toml::from_str(content).map_err(|e| ConfigError::Parse {
            message: e.to_string(),
        })?;
        check_stage_names(&table)?;
        toml::from_str(content).map_err(|e| ConfigError::Parse {
            message: e.to_string(),
        })
    }

    /// Load from a TOML file.
    pub fn load(path: &Path) -> ConfigResult<Self> {
        let content = fs::read_to_string(path).map_err(|e| ConfigError::Load {
            path: path.display().to_string(),
            message: e.to_string(),
        })?;
        Self::from_toml_str(&content)
    }

    pub fn to_toml_string(&self) -> ConfigResult<String> {
        toml::to_string(self).map_err(|e| ConfigError::Parse {
            message: e.to_string(),
        })
    }

    /// Built-in stop-word lists extended with the configured ones.
    pub fn resources(&self) -> ResourceContext {
        let mut resources = ResourceContext::with_defaults();
        for (language, words) in &self.stopwords {
            resources.add_stopwords(language, words);
        }
        resources
    }
}

impl Default for ExtractorConfig {
    fn default() -> Self {
        Self::standard()
    }
}

/// Report an unknown `stage` by name instead of as a generic enum mismatch.
fn check_stage_names(table: &toml::Table) -> ConfigResult<()> {
    let Some(pipelines) = table.get("pipelines").and_then(toml::Value::as_table) else {
        return Ok(());
    };
    for (pipeline, config) in pipelines {
        let stages = config.get("stages").and_then(toml::Value::as_array);
        for stage in stages.into_iter().flatten() {
            let Some(name) = stage.get("stage").and_then(toml::Value::as_str) else {
                continue;
            };
            if !StageConfig::NAMES.contains(&name) {
                return Err(ConfigError::UnknownStage {
                    pipeline: pipeline.clone(),
                    name: name.to_string(),
                });
            }
        }
    }
    Ok(())
}
