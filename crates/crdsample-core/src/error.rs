//! Error types for crdsample-core

use thiserror::Error;

/// Result type for crdsample-core operations
pub type Result<T> = std::result::Result<T, SampleError>;

/// Errors that can occur while loading a CRD or generating output from it
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum SampleError {
    /// The document is not a usable CustomResourceDefinition
    #[error("invalid CRD: {0}")]
    InvalidCrd(String),

    /// YAML or JSON could not be decoded
    #[error("serialization error: {0}")]
    Serialization(String),

    /// Schema nesting deeper than the configured limit
    #[error("schema nesting exceeds maximum depth of {max} at '{path}'")]
    DepthExceeded { path: String, max: usize },

    /// The sink rejected a write while emitting the sample document
    #[error("failed to write sample document: {0}")]
    Write(#[source] std::io::Error),

    /// The sink could not be closed after emitting
    #[error("failed to close output: {0}")]
    Close(#[source] std::io::Error),

    /// Several failures that all need reporting (e.g. a write error followed by a close error)
    #[error("{}", join_messages(.0))]
    Joined(Vec<SampleError>),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

fn join_messages(errors: &[SampleError]) -> String {
    errors
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("\n")
}

impl From<serde_yaml::Error> for SampleError {
    fn from(e: serde_yaml::Error) -> Self {
        SampleError::Serialization(e.to_string())
    }
}

impl SampleError {
    /// Combine an optional pending error with another one, keeping both
    pub fn join(pending: Option<SampleError>, next: SampleError) -> SampleError {
        match pending {
            None => next,
            Some(SampleError::Joined(mut errors)) => {
                errors.push(next);
                SampleError::Joined(errors)
            }
            Some(first) => SampleError::Joined(vec![first, next]),
        }
    }

    /// Whether this error (or any joined error) came from the output sink
    pub fn is_output_error(&self) -> bool {
        match self {
            SampleError::Write(_) | SampleError::Close(_) => true,
            SampleError::Joined(errors) => errors.iter().any(SampleError::is_output_error),
            _ => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io;

    #[test]
    fn test_join_without_pending() {
        let err = SampleError::join(None, SampleError::InvalidCrd("x".to_string()));
        assert!(matches!(err, SampleError::InvalidCrd(_)));
    }

    #[test]
    fn test_join_keeps_both_messages() {
        let write = SampleError::Write(io::Error::new(io::ErrorKind::BrokenPipe, "pipe gone"));
        let close = SampleError::Close(io::Error::other("flush failed"));
        let err = SampleError::join(Some(write), close);

        let msg = err.to_string();
        assert!(msg.contains("pipe gone"));
        assert!(msg.contains("flush failed"));
        assert!(err.is_output_error());
    }

    #[test]
    fn test_join_flattens() {
        let first = SampleError::join(
            Some(SampleError::InvalidCrd("a".to_string())),
            SampleError::InvalidCrd("b".to_string()),
        );
        let all = SampleError::join(Some(first), SampleError::InvalidCrd("c".to_string()));
        match all {
            SampleError::Joined(errors) => assert_eq!(errors.len(), 3),
            other => panic!("expected joined error, got {other:?}"),
        }
    }
}
