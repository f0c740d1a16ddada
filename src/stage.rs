//! Stages and the pipeline that runs them in order.
//!
//! A [`Stage`] gets exclusive access to the [`Board`] while it runs. A
//! [`Pipeline`] is itself a stage: it runs its children sequentially, each to
//! completion, against the same board.

use tracing::{debug, info_span, warn};

use crate::{Board, KeyphraseError, KeyphraseResult, Scope};

/// Where a stage sits in the processing order.
///
/// Stages that create sentences or candidates must not follow stages that
/// read them: features computed before every occurrence has been merged would
/// be attached per occurrence instead of per phrase.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Phase {
    /// Tokenizing, tagging, language identification.
    Preparation,
    /// Inserting candidates into the board.
    Generation,
    /// Attaching features and annotations to existing candidates.
    Enrichment,
    /// Pruning the candidate table.
    Selection,
}

/// One unit of analysis run against the board.
pub trait Stage {
    /// Name used in logs and error messages.
    fn name(&self) -> &str;

    fn phase(&self) -> Phase;

    /// Earliest and latest phase this stage covers. Composite stages report
    /// the span of their children.
    fn phase_range(&self) -> (Phase, Phase) {
        (self.phase(), self.phase())
    }

    fn run(&self, board: &mut Board, scope: Scope) -> KeyphraseResult<()>;
}

/// Adapter turning a closure into a [`Stage`].
pub struct FnStage<F> {
    name: String,
    phase: Phase,
    f: F,
}

impl<F> FnStage<F>
where
    F: Fn(&mut Board, Scope) -> KeyphraseResult<()>,
{
    pub fn new(name: impl Into<String>, phase: Phase, f: F) -> Self {
        Self {
            name: name.into(),
            phase,
            f,
        }
    }
}

impl<F> Stage for FnStage<F>
where
    F: Fn(&mut Board, Scope) -> KeyphraseResult<()>,
{
    fn name(&self) -> &str {
        &self.name
    }

    fn phase(&self) -> Phase {
        self.phase
    }

    fn run(&self, board: &mut Board, scope: Scope) -> KeyphraseResult<()> {
        (self.f)(board, scope)
    }
}

/// An ordered sequence of stages.
pub struct Pipeline {
    name: String,
    stages: Vec<Box<dyn Stage>>,
}

impl std::fmt::Debug for Pipeline {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Pipeline")
            .field("name", &self.name)
            .field("stages", &self.stage_names())
            .finish()
    }
}

impl Pipeline {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            stages: Vec::new(),
        }
    }

    /// Append a stage.
    ///
    /// Fails if the stage produces sentences or candidates but a stage of a
    /// later phase has already been registered.
    pub fn push(&mut self, stage: impl Stage + 'static) -> KeyphraseResult<&mut Self> {
        self.push_boxed(Box::new(stage))
    }

    pub fn push_boxed(&mut self, stage: Box<dyn Stage>) -> KeyphraseResult<&mut Self> {
        let (first, _) = stage.phase_range();
        if let Some(latest) = self.latest_phase() {
            if first <= Phase::Generation && latest > first {
                return Err(KeyphraseError::configuration(format!(
                    "pipeline `{}`: {:?} stage `{}` cannot run after a {:?} stage",
                    self.name,
                    first,
                    stage.name(),
                    latest
                )));
            }
        }
        self.stages.push(stage);
        Ok(self)
    }

    /// Builder form of [`push`](Self::push).
    pub fn with_stage(mut self, stage: impl Stage + 'static) -> KeyphraseResult<Self> {
        self.push(stage)?;
        Ok(self)
    }

    pub fn pipeline_name(&self) -> &str {
        &self.name
    }

    pub fn stage_names(&self) -> Vec<&str> {
        self.stages.iter().map(|stage| stage.name()).collect()
    }

    pub fn len(&self) -> usize {
        self.stages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.stages.is_empty()
    }

    fn latest_phase(&self) -> Option<Phase> {
        self.stages.iter().map(|stage| stage.phase_range().1).max()
    }
}

impl Stage for Pipeline {
    fn name(&self) -> &str {
        &self.name
    }

    fn phase(&self) -> Phase {
        self.phase_range().0
    }

    fn phase_range(&self) -> (Phase, Phase) {
        let first = self.stages.iter().map(|stage| stage.phase_range().0).min();
        let last = self.latest_phase();
        match (first, last) {
            (Some(first), Some(last)) => (first, last),
            // an empty pipeline constrains nothing
            _ => (Phase::Selection, Phase::Preparation),
        }
    }

    fn run(&self, board: &mut Board, scope: Scope) -> KeyphraseResult<()> {
        if self.stages.is_empty() {
            warn!(pipeline = %self.name, "running an empty pipeline");
        }
        for stage in &self.stages {
            let _span = info_span!("stage", pipeline = %self.name, name = stage.name()).entered();
            stage.run(board, scope).map_err(|source| match source {
                already @ KeyphraseError::Stage { .. } => already,
                source => KeyphraseError::Stage {
                    stage: stage.name().to_string(),
                    source: Box::new(source),
                },
            })?;
            debug!(candidates = board.gram_count(), "stage finished");
        }
        Ok(())
    }
}
