//! Answer-key service. Turns an answer-key document into a structured JSON key.
//!
//! extract text -> normalize -> segment/keywords -> pretty JSON file.

use crate::domain::text::normalize;
use crate::domain::{AnswerKeyDocument, DomainError, parse_answer_key_with};
use crate::ports::TextExtractorPort;
use crate::shared::atomic_file::write_atomic;
use std::path::Path;
use std::sync::Arc;
use tokio::fs;
use tracing::{info, warn};

pub struct AnswerKeyService {
    extractor: Arc<dyn TextExtractorPort>,
    keyword_count: usize,
}

impl AnswerKeyService {
    pub fn new(extractor: Arc<dyn TextExtractorPort>, keyword_count: usize) -> Self {
        Self {
            extractor,
            keyword_count,
        }
    }

    /// Parse the answer key found in `document`.
    pub async fn parse_document(&self, document: &Path) -> Result<AnswerKeyDocument, DomainError> {
        let raw = self.extractor.extract_text(document).await?;
        let key = parse_answer_key_with(&normalize(&raw), self.keyword_count);
        info!(
            path = %document.display(),
            questions = key.len(),
            "answer key parsed"
        );
        Ok(key)
    }

    /// Parse `document` and write the key as pretty JSON to `output`, atomically.
    ///
    /// Returns the number of questions written. Nothing is written when no
    /// question could be parsed.
    pub async fn export_json(&self, document: &Path, output: &Path) -> Result<usize, DomainError> {
        let key = self.parse_document(document).await?;
        if key.is_empty() {
            warn!(path = %document.display(), "no questions parsed, check the document format");
            return Ok(0);
        }

        let json = serde_json::to_string_pretty(&key)
            .map_err(|e| DomainError::Artifact(format!("serialize answer key: {}", e)))?;
        if let Some(parent) = output.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)
                .await
                .map_err(|e| DomainError::Artifact(format!("create output dir: {}", e)))?;
        }
        write_atomic(output, json.as_bytes())
            .await
            .map_err(|e| DomainError::Artifact(format!("write answer key: {}", e)))?;

        info!(path = %output.display(), questions = key.len(), "answer key JSON written");
        Ok(key.len())
    }
}
