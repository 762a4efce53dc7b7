//! Outbound ports. Application calls into infrastructure.
//!
//! Implemented by adapters.

use crate::domain::{DomainError, EvaluationResult, OcrTranscript};
use std::path::{Path, PathBuf};

/// One instruction pair sent to the text-generation service.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GenerationRequest {
    pub system: String,
    pub user: String,
}

impl GenerationRequest {
    pub fn new(system: impl Into<String>, user: impl Into<String>) -> Self {
        Self {
            system: system.into(),
            user: user.into(),
        }
    }
}

/// Text-generation service. Returns the text of a single reply message.
///
/// Implementations run deterministically (temperature 0) and own the model choice.
#[async_trait::async_trait]
pub trait GenerationPort: Send + Sync {
    async fn complete(&self, request: &GenerationRequest) -> Result<String, DomainError>;
}

/// OCR service for scanned, handwritten answer papers.
#[async_trait::async_trait]
pub trait OcrPort: Send + Sync {
    async fn transcribe(&self, document: &Path) -> Result<OcrTranscript, DomainError>;
}

/// Best-effort plain-text extraction from a document (pages without text contribute nothing).
#[async_trait::async_trait]
pub trait TextExtractorPort: Send + Sync {
    async fn extract_text(&self, document: &Path) -> Result<String, DomainError>;
}

/// Run artifacts (raw OCR output, extracted texts, results) written next to the reports.
#[async_trait::async_trait]
pub trait ArtifactPort: Send + Sync {
    async fn save_text(&self, name: &str, contents: &str) -> Result<PathBuf, DomainError>;

    async fn save_json(&self, name: &str, value: &serde_json::Value)
    -> Result<PathBuf, DomainError>;
}

/// Renders a grading result into human-readable documents. Returns written paths.
#[async_trait::async_trait]
pub trait ReportPort: Send + Sync {
    async fn render(&self, result: &EvaluationResult) -> Result<Vec<PathBuf>, DomainError>;
}
