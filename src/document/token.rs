use crate::FeatureBag;

/// A single token of a sentence.
///
/// The surface text is fixed at construction; tag, lemma and features are
/// filled in by upstream collaborators.
#[derive(Debug, Clone, PartialEq)]
pub struct Token {
    text: String,
    /// Position within the owning sentence, assigned by [`crate::Sentence::push`].
    index: usize,
    pub tag: Option<String>,
    pub lemma: Option<String>,
    pub features: FeatureBag,
}

impl Token {
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            index: 0,
            tag: None,
            lemma: None,
            features: FeatureBag::new(),
        }
    }

    pub fn tagged(text: impl Into<String>, tag: impl Into<String>) -> Self {
        Self::new(text).with_tag(tag)
    }

    pub fn with_tag(mut self, tag: impl Into<String>) -> Self {
        self.tag = Some(tag.into());
        self
    }

    pub fn with_lemma(mut self, lemma: impl Into<String>) -> Self {
        self.lemma = Some(lemma.into());
        self
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn index(&self) -> usize {
        self.index
    }

    pub(crate) fn set_index(&mut self, index: usize) {
        self.index = index;
    }

    /// The stemmed form used for identity: the lemma when present, otherwise
    /// the lower-cased surface text.
    pub fn stem(&self) -> String {
        match &self.lemma {
            Some(lemma) => lemma.to_lowercase(),
            None => self.text.to_lowercase(),
        }
    }
}
