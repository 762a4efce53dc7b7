//! Domain errors. Used by ports and use cases.
//!
//! Adapters map infrastructure errors into these.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum DomainError {
    /// Required credentials or endpoints are missing. Fatal at start-up.
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// A source document yielded no usable text.
    #[error("Input extraction failed: {0}")]
    InputExtraction(String),

    /// The generation service reply holds no usable structured data.
    #[error("Malformed model reply: {0}")]
    MalformedReply(String),

    /// The single repair round-trip did not produce parseable data.
    #[error("JSON repair failed: {0}")]
    RepairFailed(String),

    /// OCR or generation service unreachable or returned a non-success status.
    #[error("Transport error: {0}")]
    Transport(String),

    #[error("Artifact store error: {0}")]
    Artifact(String),

    #[error("UI error: {0}")]
    Ui(String),
}

impl DomainError {
    /// True when the failure is caused by the caller's input rather than the server side.
    pub fn is_client_error(&self) -> bool {
        matches!(self, Self::InputExtraction(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_client_error_classification() {
        assert!(DomainError::InputExtraction("empty".into()).is_client_error());
        assert!(!DomainError::RepairFailed("x".into()).is_client_error());
        assert!(!DomainError::Transport("x".into()).is_client_error());
    }

    #[test]
    fn test_display_is_descriptive() {
        let e = DomainError::MalformedReply("no JSON object found".into());
        assert_eq!(e.to_string(), "Malformed model reply: no JSON object found");
    }
}
