//! Evaluation service. Orchestrates one grading request.
//!
//! compose prompt -> generation call -> self-healing parse -> schema check.

use crate::domain::{DomainError, EvaluationResult};
use crate::ports::GenerationPort;
use crate::usecases::grading_prompt::compose_grading_request;
use crate::usecases::reply_parser::ReplyParser;
use std::sync::Arc;
use tracing::{info, warn};

/// Service for grading a student transcript against an answer key.
///
/// Holds no per-request state; concurrent `evaluate` calls are independent.
pub struct EvaluationService {
    generator: Arc<dyn GenerationPort>,
}

impl EvaluationService {
    /// Create a new evaluation service around an injected generation client.
    pub fn new(generator: Arc<dyn GenerationPort>) -> Self {
        Self { generator }
    }

    /// Grade `student_text` against `answer_key_text`. Both are passed through verbatim.
    ///
    /// Makes one grading call and at most one repair call, sequentially.
    pub async fn evaluate(
        &self,
        answer_key_text: &str,
        student_text: &str,
    ) -> Result<EvaluationResult, DomainError> {
        let request = compose_grading_request(answer_key_text, student_text);
        info!(
            answer_key_len = answer_key_text.len(),
            student_len = student_text.len(),
            prompt_len = request.user.len(),
            "sending grading request"
        );

        let raw = self.generator.complete(&request).await?;
        let value = ReplyParser::new(self.generator.as_ref())
            .parse(raw.trim())
            .await?;

        let result: EvaluationResult = serde_json::from_value(value).map_err(|e| {
            DomainError::MalformedReply(format!("reply does not match the grading schema: {}", e))
        })?;

        for anomaly in result.audit() {
            warn!(%anomaly, "grading result anomaly");
        }

        info!(
            questions = result.question_wise_results.len(),
            total_marks = result.total_marks,
            "evaluation complete"
        );
        Ok(result)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::ai::MockAiAdapter;
    use crate::usecases::grading_prompt::GRADING_SYSTEM_PROMPT;

    const GRADED: &str = r#"{
        "total_marks": 11,
        "question_wise_results": {
            "1a": {"marks_awarded": 4, "max_marks": 5, "missing_points": ["mention semi-permeable membrane"]},
            "2": {"marks_awarded": 7, "max_marks": 10, "missing_points": []}
        }
    }"#;

    #[tokio::test]
    async fn test_evaluate_happy_path() {
        let ai = Arc::new(MockAiAdapter::new([GRADED]));
        let service = EvaluationService::new(ai.clone());

        let result = service.evaluate("ANSWER KEY TEXT", "STUDENT TEXT").await.unwrap();
        assert_eq!(result.total_marks, 11.0);
        assert_eq!(result.question_wise_results.len(), 2);
        assert_eq!(result.question_wise_results["1a"].missing_points.len(), 1);

        let requests = ai.requests();
        assert_eq!(requests.len(), 1);
        assert_eq!(requests[0].system, GRADING_SYSTEM_PROMPT);
        assert!(requests[0].user.contains("ANSWER KEY TEXT"));
        assert!(requests[0].user.contains("STUDENT TEXT"));
    }

    #[tokio::test]
    async fn test_evaluate_repairs_once() {
        let broken = GRADED.replacen("\"missing_points\": []", "\"missing_points\": [],", 1);
        let ai = Arc::new(MockAiAdapter::new([broken.as_str(), GRADED]));
        let service = EvaluationService::new(ai.clone());

        let result = service.evaluate("key", "student").await.unwrap();
        assert_eq!(result.total_marks, 11.0);
        assert_eq!(ai.call_count(), 2);
    }

    #[tokio::test]
    async fn test_evaluate_schema_mismatch_is_malformed() {
        let ai = Arc::new(MockAiAdapter::new([r#"{"score": "A+"}"#]));
        let err = EvaluationService::new(ai.clone())
            .evaluate("key", "student")
            .await
            .unwrap_err();
        assert!(matches!(err, DomainError::MalformedReply(_)));
        assert_eq!(ai.call_count(), 1);
    }

    #[tokio::test]
    async fn test_evaluate_reply_without_question_mapping_is_malformed() {
        let ai = Arc::new(MockAiAdapter::new([
            r#"{"total_marks": 0, "error": "could not read paper"}"#,
        ]));
        let err = EvaluationService::new(ai.clone())
            .evaluate("key", "student")
            .await
            .unwrap_err();
        assert!(matches!(err, DomainError::MalformedReply(_)));
        assert_eq!(ai.call_count(), 1);
    }

    #[tokio::test]
    async fn test_evaluate_accepts_explicitly_empty_mapping() {
        let ai = Arc::new(MockAiAdapter::new([
            r#"{"total_marks": 0, "question_wise_results": {}}"#,
        ]));
        let result = EvaluationService::new(ai)
            .evaluate("key", "student")
            .await
            .unwrap();
        assert!(result.question_wise_results.is_empty());
    }

    #[tokio::test]
    async fn test_evaluate_transport_error_surfaces() {
        let ai = Arc::new(MockAiAdapter::new(Vec::<String>::new()));
        ai.push_failure("API error 401 Unauthorized");
        let err = EvaluationService::new(ai)
            .evaluate("key", "student")
            .await
            .unwrap_err();
        assert!(matches!(err, DomainError::Transport(_)));
    }
}
