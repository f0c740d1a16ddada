//! Error types shared by the board and every stage.

use thiserror::Error;

/// Errors that abort a pipeline run.
///
/// None of these are recovered from inside the core: a stage either completes
/// or the whole run fails with one of these.
#[derive(Debug, Error)]
pub enum KeyphraseError {
    /// The pipeline or one of its stages is mis-configured.
    #[error("configuration error: {0}")]
    Configuration(String),

    /// A candidate could not be inserted without breaking the
    /// one-entity-per-key rule of the board.
    #[error("malformed candidate: {reason}")]
    MalformedCandidate { reason: String },

    /// A component id did not name a node of the right kind.
    #[error("invalid component {id}: {reason}")]
    InvalidComponent { id: usize, reason: String },

    /// A stage failed; `source` carries the underlying failure.
    #[error("stage `{stage}` failed: {source}")]
    Stage {
        stage: String,
        #[source]
        source: Box<KeyphraseError>,
    },

    /// A failure reported by an external collaborator (I/O, lookups, models).
    #[error("collaborator error: {0}")]
    Collaborator(#[source] Box<dyn std::error::Error + Send + Sync>),
}

impl KeyphraseError {
    pub fn configuration(message: impl Into<String>) -> Self {
        KeyphraseError::Configuration(message.into())
    }

    pub fn malformed(reason: impl Into<String>) -> Self {
        KeyphraseError::MalformedCandidate {
            reason: reason.into(),
        }
    }

    /// Wrap any collaborator error so it can travel through `?`.
    pub fn collaborator<E>(err: E) -> Self
    where
        E: std::error::Error + Send + Sync + 'static,
    {
        KeyphraseError::Collaborator(Box::new(err))
    }
}

/// Result type for board and stage operations.
pub type KeyphraseResult<T> = Result<T, KeyphraseError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn stage_error_names_the_stage_and_cause() {
        let err = KeyphraseError::Stage {
            stage: "maximality".to_string(),
            source: Box::new(KeyphraseError::configuration("frequency missing")),
        };
        assert_eq!(
            err.to_string(),
            "stage `maximality` failed: configuration error: frequency missing"
        );
    }

    #[test]
    fn collaborator_error_keeps_source() {
        let io = std::io::Error::new(std::io::ErrorKind::NotFound, "model.bin");
        let err = KeyphraseError::collaborator(io);
        assert!(std::error::Error::source(&err).is_some());
        assert_eq!(err.to_string(), "collaborator error: model.bin");
    }
}
