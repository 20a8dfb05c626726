//! Error types.
//!
//! Business-logic conditions (infeasible tasks, degenerate inputs,
//! non-converging IRR) are reported inside result values. The errors here
//! are for the host layer: malformed requests, bad configuration, and a
//! failing advisory collaborator.

use crate::validation::ValidationError;

/// Top-level engine error.
#[derive(Debug, thiserror::Error)]
pub enum EngineError {
    #[error("invalid input: {}", summarize(.0))]
    Validation(Vec<ValidationError>),

    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Advisory(#[from] AdvisoryError),

    #[error("serialization failed: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Configuration errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("config parse error: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("config value out of range: {field} {reason}")]
    OutOfRange { field: &'static str, reason: String },
}

/// Errors raised by an advisory collaborator.
#[derive(Debug, thiserror::Error)]
pub enum AdvisoryError {
    #[error("advisory service unavailable: {0}")]
    Unavailable(String),

    #[error("advisory response malformed: {0}")]
    MalformedResponse(String),

    #[error("advisory payload has no options")]
    EmptyPayload,
}

impl From<Vec<ValidationError>> for EngineError {
    fn from(errors: Vec<ValidationError>) -> Self {
        EngineError::Validation(errors)
    }
}

/// Convenience alias.
pub type EngineResult<T> = Result<T, EngineError>;

fn summarize(errors: &[ValidationError]) -> String {
    errors
        .iter()
        .map(|e| e.message.as_str())
        .collect::<Vec<_>>()
        .join("; ")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::validation::ValidationErrorKind;

    #[test]
    fn test_validation_message_joins_errors() {
        let err = EngineError::from(vec![
            ValidationError::new(ValidationErrorKind::DuplicateId, "Duplicate task ID: A"),
            ValidationError::new(ValidationErrorKind::InvalidRange, "bad probability"),
        ]);
        assert_eq!(
            err.to_string(),
            "invalid input: Duplicate task ID: A; bad probability"
        );
    }

    #[test]
    fn test_advisory_error_is_transparent() {
        let err = EngineError::from(AdvisoryError::Unavailable("timeout".into()));
        assert_eq!(err.to_string(), "advisory service unavailable: timeout");
    }
}
