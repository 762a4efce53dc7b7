//! Grading workflow. One full paper-grading run.
//!
//! OCR the answer paper, extract the answer-key text, persist the run
//! artifacts, evaluate, then render reports. Steps run sequentially.

use crate::domain::{DomainError, EvaluationResult};
use crate::ports::{ArtifactPort, OcrPort, ReportPort, TextExtractorPort};
use crate::usecases::EvaluationService;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::info;

/// Result of a grading run.
#[derive(Debug, Clone)]
pub struct GradingOutcome {
    pub result: EvaluationResult,
    pub reports: Vec<PathBuf>,
}

pub struct GradingWorkflow {
    ocr: Arc<dyn OcrPort>,
    extractor: Arc<dyn TextExtractorPort>,
    evaluator: Arc<EvaluationService>,
    artifacts: Arc<dyn ArtifactPort>,
    reports: Arc<dyn ReportPort>,
}

impl GradingWorkflow {
    pub fn new(
        ocr: Arc<dyn OcrPort>,
        extractor: Arc<dyn TextExtractorPort>,
        evaluator: Arc<EvaluationService>,
        artifacts: Arc<dyn ArtifactPort>,
        reports: Arc<dyn ReportPort>,
    ) -> Self {
        Self {
            ocr,
            extractor,
            evaluator,
            artifacts,
            reports,
        }
    }

    /// Grade the scanned `answer_paper` against the `answer_key` document.
    ///
    /// # Errors
    /// `InputExtraction` when either document yields no text; otherwise whatever
    /// the OCR, generation, artifact or report collaborators return.
    pub async fn grade_paper(
        &self,
        answer_key: &Path,
        answer_paper: &Path,
    ) -> Result<GradingOutcome, DomainError> {
        info!(
            answer_key = %answer_key.display(),
            answer_paper = %answer_paper.display(),
            "grading run started"
        );

        let transcript = self.ocr.transcribe(answer_paper).await?;
        let student_text = transcript.text();
        if student_text.is_empty() {
            return Err(DomainError::InputExtraction(
                "OCR returned empty text".to_string(),
            ));
        }
        self.artifacts
            .save_json("ocr_raw.json", &transcript.raw)
            .await?;
        self.artifacts
            .save_text("handwritten_text.txt", &student_text)
            .await?;

        let answer_key_text = self.extractor.extract_text(answer_key).await?;
        let answer_key_text = answer_key_text.trim();
        if answer_key_text.is_empty() {
            return Err(DomainError::InputExtraction(
                "answer key extraction failed: no text found".to_string(),
            ));
        }
        self.artifacts
            .save_text("answer_key_text.txt", answer_key_text)
            .await?;

        let result = self
            .evaluator
            .evaluate(answer_key_text, &student_text)
            .await?;

        let result_json = serde_json::to_value(&result)
            .map_err(|e| DomainError::Artifact(format!("serialize result: {}", e)))?;
        self.artifacts
            .save_json("evaluation_result.json", &result_json)
            .await?;

        let reports = self.reports.render(&result).await?;
        info!(
            total_marks = result.total_marks,
            reports = reports.len(),
            "grading run complete"
        );
        Ok(GradingOutcome { result, reports })
    }
}
