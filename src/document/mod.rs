//! The document tree: composites (document, sections) over sentence leaves.
//!
//! Nodes live in an arena owned by [`Document`] and are addressed by
//! [`ComponentId`]. Only sentences hold tokens and only composites hold
//! children; children can only be attached to existing composites, so the
//! tree is acyclic by construction.

mod builder;
mod sentence;
mod token;

pub use sentence::Sentence;
pub use token::Token;

use crate::{FeatureBag, KeyphraseError, KeyphraseResult};

/// Handle to a node of a [`Document`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ComponentId(usize);

impl ComponentId {
    pub fn index(self) -> usize {
        self.0
    }
}

/// What a node holds.
#[derive(Debug, Clone)]
pub enum ComponentKind {
    /// Document or section: ordered children.
    Composite(Vec<ComponentId>),
    /// Leaf: ordered tokens.
    Sentence(Sentence),
}

/// One node of the document tree.
#[derive(Debug, Clone)]
pub struct DocumentComponent {
    id: ComponentId,
    parent: Option<ComponentId>,
    label: Option<String>,
    kind: ComponentKind,
    pub features: FeatureBag,
    /// Canonical keys of the candidates found in this unit.
    grams: Vec<String>,
}

impl DocumentComponent {
    pub fn id(&self) -> ComponentId {
        self.id
    }

    pub fn parent(&self) -> Option<ComponentId> {
        self.parent
    }

    pub fn label(&self) -> Option<&str> {
        self.label.as_deref()
    }

    pub fn kind(&self) -> &ComponentKind {
        &self.kind
    }

    pub fn is_sentence(&self) -> bool {
        matches!(self.kind, ComponentKind::Sentence(_))
    }

    pub fn as_sentence(&self) -> Option<&Sentence> {
        match &self.kind {
            ComponentKind::Sentence(sentence) => Some(sentence),
            ComponentKind::Composite(_) => None,
        }
    }

    pub fn as_sentence_mut(&mut self) -> Option<&mut Sentence> {
        match &mut self.kind {
            ComponentKind::Sentence(sentence) => Some(sentence),
            ComponentKind::Composite(_) => None,
        }
    }

    /// Children of a composite; empty for sentences.
    pub fn children(&self) -> &[ComponentId] {
        match &self.kind {
            ComponentKind::Composite(children) => children,
            ComponentKind::Sentence(_) => &[],
        }
    }

    /// Canonical keys of the candidates registered in this unit, in
    /// first-registration order.
    pub fn gram_keys(&self) -> &[String] {
        &self.grams
    }

    pub(crate) fn link_gram(&mut self, key: &str) {
        if !self.grams.iter().any(|k| k == key) {
            self.grams.push(key.to_string());
        }
    }

    pub(crate) fn unlink_gram(&mut self, key: &str) -> bool {
        let before = self.grams.len();
        self.grams.retain(|k| k != key);
        before != self.grams.len()
    }
}

/// Restricts a stage to a sub-tree.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Scope {
    #[default]
    Document,
    Component(ComponentId),
}

/// A document tree plus the raw text it was built from.
#[derive(Debug, Clone)]
pub struct Document {
    nodes: Vec<DocumentComponent>,
    language: Option<String>,
    raw_text: String,
}

impl Document {
    /// Create a document holding only an empty root composite.
    pub fn new(raw_text: impl Into<String>) -> Self {
        Self {
            nodes: vec![DocumentComponent {
                id: ComponentId(0),
                parent: None,
                label: None,
                kind: ComponentKind::Composite(Vec::new()),
                features: FeatureBag::new(),
                grams: Vec::new(),
            }],
            language: None,
            raw_text: raw_text.into(),
        }
    }

    pub fn root(&self) -> ComponentId {
        ComponentId(0)
    }

    pub fn language(&self) -> Option<&str> {
        self.language.as_deref()
    }

    pub fn set_language(&mut self, language: impl Into<String>) {
        self.language = Some(language.into());
    }

    pub fn with_language(mut self, language: impl Into<String>) -> Self {
        self.set_language(language);
        self
    }

    pub fn raw_text(&self) -> &str {
        &self.raw_text
    }

    pub fn component(&self, id: ComponentId) -> Option<&DocumentComponent> {
        self.nodes.get(id.0)
    }

    pub fn component_mut(&mut self, id: ComponentId) -> Option<&mut DocumentComponent> {
        self.nodes.get_mut(id.0)
    }

    /// Every node, in creation order.
    pub fn components(&self) -> &[DocumentComponent] {
        &self.nodes
    }

    pub(crate) fn components_mut(&mut self) -> &mut [DocumentComponent] {
        &mut self.nodes
    }

    pub fn sentence(&self, id: ComponentId) -> Option<&Sentence> {
        self.component(id).and_then(DocumentComponent::as_sentence)
    }

    pub fn sentence_mut(&mut self, id: ComponentId) -> Option<&mut Sentence> {
        self.component_mut(id)
            .and_then(DocumentComponent::as_sentence_mut)
    }

    /// Attach a new, empty section under a composite.
    pub fn add_section(
        &mut self,
        parent: ComponentId,
        label: Option<String>,
    ) -> KeyphraseResult<ComponentId> {
        self.attach(parent, label, ComponentKind::Composite(Vec::new()))
    }

    /// Attach a sentence under a composite.
    pub fn add_sentence(
        &mut self,
        parent: ComponentId,
        sentence: Sentence,
    ) -> KeyphraseResult<ComponentId> {
        self.attach(parent, None, ComponentKind::Sentence(sentence))
    }

    fn attach(
        &mut self,
        parent: ComponentId,
        label: Option<String>,
        kind: ComponentKind,
    ) -> KeyphraseResult<ComponentId> {
        let id = ComponentId(self.nodes.len());
        match self.nodes.get_mut(parent.0).map(|node| &mut node.kind) {
            Some(ComponentKind::Composite(children)) => children.push(id),
            Some(ComponentKind::Sentence(_)) => {
                return Err(KeyphraseError::InvalidComponent {
                    id: parent.0,
                    reason: "sentences cannot hold children".to_string(),
                })
            }
            None => return Err(unknown(parent)),
        }
        self.nodes.push(DocumentComponent {
            id,
            parent: Some(parent),
            label,
            kind,
            features: FeatureBag::new(),
            grams: Vec::new(),
        });
        Ok(id)
    }

    /// Ids of the sentences under `scope`, in document order.
    pub fn sentence_ids(&self, scope: Scope) -> KeyphraseResult<Vec<ComponentId>> {
        let start = self.scope_root(scope)?;
        let mut out = Vec::new();
        let mut stack = vec![start];
        while let Some(id) = stack.pop() {
            let node = &self.nodes[id.0];
            match &node.kind {
                ComponentKind::Sentence(_) => out.push(id),
                ComponentKind::Composite(children) => stack.extend(children.iter().rev()),
            }
        }
        Ok(out)
    }

    /// Sentences under `scope`, in document order.
    pub fn sentences(&self, scope: Scope) -> KeyphraseResult<Vec<(ComponentId, &Sentence)>> {
        Ok(self
            .sentence_ids(scope)?
            .into_iter()
            .filter_map(|id| self.sentence(id).map(|sentence| (id, sentence)))
            .collect())
    }

    pub fn sentence_count(&self) -> usize {
        self.nodes.iter().filter(|node| node.is_sentence()).count()
    }

    /// Resolve a scope to the id of its root node, validating it.
    pub fn scope_root(&self, scope: Scope) -> KeyphraseResult<ComponentId> {
        match scope {
            Scope::Document => Ok(self.root()),
            Scope::Component(id) if id.0 < self.nodes.len() => Ok(id),
            Scope::Component(id) => Err(unknown(id)),
        }
    }
}

pub(crate) fn unknown(id: ComponentId) -> KeyphraseError {
    KeyphraseError::InvalidComponent {
        id: id.0,
        reason: "no such component".to_string(),
    }
}
