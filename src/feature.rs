//! Named features and typed annotations attachable to any unit.
//!
//! A [`FeatureBag`] lives on tokens, document components, candidate grams and
//! (for annotations) on the board itself. Features are plain `f64` values keyed
//! by name; annotations are richer records from a small closed set of shapes.

use std::collections::BTreeMap;

/// Well-known feature names written by the bundled stages.
pub mod names {
    pub const DEPTH: &str = "depth";
    pub const HEIGHT: &str = "height";
    pub const LIFESPAN: &str = "lifespan";
    pub const FREQUENCY: &str = "frequency";
    pub const FREQUENCY_PER_SENTENCE: &str = "frequency_per_sentence";
    pub const MAXIMALITY: &str = "maximality";
    pub const SCORE: &str = "score";
}

/// Payload of an [`Annotation`].
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(tag = "kind", content = "data", rename_all = "snake_case")]
pub enum AnnotationValue {
    /// Free text, e.g. a named-entity class.
    Text(String),
    /// A scored link to an external resource.
    Scored { score: f64, uri: String },
    /// A concept inferred by a model or lookup service.
    Inference {
        concept: String,
        score: f64,
        uri: String,
    },
}

impl AnnotationValue {
    /// The score carried by this value, if any.
    pub fn score(&self) -> Option<f64> {
        match self {
            AnnotationValue::Text(_) => None,
            AnnotationValue::Scored { score, .. } | AnnotationValue::Inference { score, .. } => {
                Some(*score)
            }
        }
    }

    /// The label used to group annotations of the same kind:
    /// the text, the URI, or the inferred concept.
    pub fn label(&self) -> &str {
        match self {
            AnnotationValue::Text(text) => text,
            AnnotationValue::Scored { uri, .. } => uri,
            AnnotationValue::Inference { concept, .. } => concept,
        }
    }
}

/// A typed record identified by a producer-defined key.
///
/// Several annotations may share a key.
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Annotation {
    pub key: String,
    pub value: AnnotationValue,
}

impl Annotation {
    pub fn new(key: impl Into<String>, value: AnnotationValue) -> Self {
        Self {
            key: key.into(),
            value,
        }
    }

    pub fn text(key: impl Into<String>, text: impl Into<String>) -> Self {
        Self::new(key, AnnotationValue::Text(text.into()))
    }

    pub fn scored(key: impl Into<String>, score: f64, uri: impl Into<String>) -> Self {
        Self::new(
            key,
            AnnotationValue::Scored {
                score,
                uri: uri.into(),
            },
        )
    }

    pub fn inference(
        key: impl Into<String>,
        concept: impl Into<String>,
        score: f64,
        uri: impl Into<String>,
    ) -> Self {
        Self::new(
            key,
            AnnotationValue::Inference {
                concept: concept.into(),
                score,
                uri: uri.into(),
            },
        )
    }
}

/// Per-unit store of scalar features and annotations.
#[derive(Debug, Clone, Default, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct FeatureBag {
    features: BTreeMap<String, f64>,
    /// Sample counts for features maintained as running averages.
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    samples: BTreeMap<String, u32>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    annotations: Vec<Annotation>,
}

impl FeatureBag {
    pub fn new() -> Self {
        Self::default()
    }

    /// Write a feature, overwriting any previous value.
    pub fn set(&mut self, name: impl Into<String>, value: f64) {
        self.features.insert(name.into(), value);
    }

    /// Write a feature only if it is not present yet.
    ///
    /// Returns `true` when the value was written.
    pub fn set_if_absent(&mut self, name: &str, value: f64) -> bool {
        if self.features.contains_key(name) {
            return false;
        }
        self.features.insert(name.to_string(), value);
        true
    }

    /// Add `delta` to a feature, treating a missing feature as `0.0`.
    pub fn accumulate(&mut self, name: &str, delta: f64) -> f64 {
        let value = self.features.entry(name.to_string()).or_insert(0.0);
        *value += delta;
        *value
    }

    /// Fold `sample` into the running mean stored under `name`.
    pub fn average(&mut self, name: &str, sample: f64) -> f64 {
        let count = self.samples.entry(name.to_string()).or_insert(0);
        let previous = self.features.get(name).copied().unwrap_or(0.0);
        *count += 1;
        let mean = previous + (sample - previous) / f64::from(*count);
        self.features.insert(name.to_string(), mean);
        mean
    }

    pub fn get(&self, name: &str) -> Option<f64> {
        self.features.get(name).copied()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.features.contains_key(name)
    }

    pub fn remove(&mut self, name: &str) -> Option<f64> {
        self.samples.remove(name);
        self.features.remove(name)
    }

    /// Iterate features ordered by name.
    pub fn features(&self) -> impl Iterator<Item = (&str, f64)> {
        self.features.iter().map(|(name, value)| (name.as_str(), *value))
    }

    pub fn feature_count(&self) -> usize {
        self.features.len()
    }

    pub fn add_annotation(&mut self, annotation: Annotation) {
        self.annotations.push(annotation);
    }

    /// All annotations stored under `key`, in insertion order.
    pub fn annotations<'a>(&'a self, key: &str) -> impl Iterator<Item = &'a Annotation> + 'a {
        let key = key.to_owned();
        self.annotations.iter().filter(move |a| a.key == key)
    }

    pub fn all_annotations(&self) -> &[Annotation] {
        &self.annotations
    }
}
