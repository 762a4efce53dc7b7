//! HTTP OCR adapter. Uploads a scanned paper as multipart `file` and reads
//! `combined_output` from the JSON reply.

use crate::domain::{DomainError, OcrTranscript};
use crate::ports::OcrPort;
use reqwest::Client;
use reqwest::multipart::{Form, Part};
use std::path::Path;
use std::time::Duration;
use tokio::fs;
use tracing::{info, warn};

pub struct HttpOcrAdapter {
    client: Client,
    api_url: String,
}

impl HttpOcrAdapter {
    /// Create a new OCR adapter.
    ///
    /// # Errors
    /// Returns `DomainError::Configuration` if the HTTP client cannot be built.
    pub fn new(api_url: String, timeout: Duration) -> Result<Self, DomainError> {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| DomainError::Configuration(format!("OCR HTTP client: {}", e)))?;
        Ok(Self { client, api_url })
    }
}

/// Reads the transcript out of the service's JSON reply. A missing
/// `combined_output` field yields an empty transcript.
pub fn transcript_from_json(raw: serde_json::Value) -> Result<OcrTranscript, DomainError> {
    let mut transcript: OcrTranscript = serde_json::from_value(raw.clone())
        .map_err(|e| DomainError::Transport(format!("unexpected OCR response shape: {}", e)))?;
    transcript.raw = raw;
    Ok(transcript)
}

#[async_trait::async_trait]
impl OcrPort for HttpOcrAdapter {
    async fn transcribe(&self, document: &Path) -> Result<OcrTranscript, DomainError> {
        let bytes = fs::read(document).await.map_err(|e| {
            DomainError::InputExtraction(format!("read {}: {}", document.display(), e))
        })?;
        let file_name = document
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| "answer_paper.pdf".to_string());

        info!(
            path = %document.display(),
            size = bytes.len(),
            "uploading answer paper to OCR service"
        );

        let form = Form::new().part("file", Part::bytes(bytes).file_name(file_name));
        let response = self
            .client
            .post(&self.api_url)
            .multipart(form)
            .send()
            .await
            .map_err(|e| DomainError::Transport(format!("OCR request failed: {}", e)))?;

        if !response.status().is_success() {
            let status = response.status();
            let text = response.text().await.unwrap_or_default();
            warn!(status = %status, body = %text, "OCR service returned error");
            return Err(DomainError::Transport(format!(
                "OCR service failed with {}: {}",
                status,
                text.chars().take(200).collect::<String>()
            )));
        }

        let raw: serde_json::Value = response
            .json()
            .await
            .map_err(|e| DomainError::Transport(format!("Failed to parse OCR response: {}", e)))?;
        let transcript = transcript_from_json(raw)?;

        info!(lines = transcript.combined_output.len(), "OCR complete");
        Ok(transcript)
    }
}
