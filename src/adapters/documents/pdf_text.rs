//! PDF text extraction with `pdf-extract` (pure Rust, no external libs).
//!
//! Extraction is CPU-bound and blocking, so it runs on the blocking pool.

use crate::domain::DomainError;
use crate::ports::TextExtractorPort;
use std::path::Path;
use tracing::debug;

/// Best-effort PDF text extractor. Pages without a text layer contribute nothing.
#[derive(Debug, Default, Clone, Copy)]
pub struct PdfTextExtractor;

impl PdfTextExtractor {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait::async_trait]
impl TextExtractorPort for PdfTextExtractor {
    async fn extract_text(&self, document: &Path) -> Result<String, DomainError> {
        if !document.is_file() {
            return Err(DomainError::InputExtraction(format!(
                "document not found: {}",
                document.display()
            )));
        }
        let path = document.to_path_buf();
        let text = tokio::task::spawn_blocking(move || pdf_extract::extract_text(&path))
            .await
            .map_err(|e| DomainError::InputExtraction(format!("PDF extraction task: {}", e)))?
            .map_err(|e| {
                DomainError::InputExtraction(format!(
                    "Failed to extract text from PDF {}: {}",
                    document.display(),
                    e
                ))
            })?;
        debug!(path = %document.display(), chars = text.len(), "PDF text extracted");
        Ok(text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[tokio::test]
    async fn test_missing_document_is_input_error() {
        let err = PdfTextExtractor::new()
            .extract_text(Path::new("/no/such/key.pdf"))
            .await
            .unwrap_err();
        assert!(err.is_client_error());
    }

    #[tokio::test]
    async fn test_non_pdf_is_input_error() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(b"plain text, not a PDF").unwrap();
        let err = PdfTextExtractor::new()
            .extract_text(file.path())
            .await
            .unwrap_err();
        assert!(matches!(err, DomainError::InputExtraction(_)));
    }
}
