//! Self-healing reply parser.
//!
//! Pulls the brace-bounded region out of a free-form model reply and parses it.
//! On a syntax error it asks the same generation service, once, to repair the
//! candidate, then parses the repaired reply. There is never a second repair.
//!
//! States: `AwaitingFirstParse` -> (`AwaitingRepairParse`) -> done or failed.

use crate::domain::DomainError;
use crate::ports::{GenerationPort, GenerationRequest};
use serde_json::Value;
use tracing::{debug, info, warn};

/// System instruction for the repair call.
pub const REPAIR_SYSTEM_PROMPT: &str =
    "You are a strict JSON repair agent. You repair broken JSON. Output ONLY valid JSON.";

/// Build the repair instruction; the malformed candidate is embedded verbatim.
pub fn repair_user_prompt(candidate: &str) -> String {
    format!(
        "Fix the following text so it becomes VALID JSON.

Rules:
- Use double quotes only
- Add missing commas
- No trailing commas
- No explanations
- Output ONLY JSON

TEXT:
{candidate}
"
    )
}

/// Slice from the first `{` to the last `}`, inclusive.
///
/// `None` only when a brace is missing. When the last `}` precedes the first `{`
/// the region is empty and goes through the parse/repair path like any bad candidate.
pub fn json_region(raw: &str) -> Option<&str> {
    let start = raw.find('{')?;
    let end = raw.rfind('}')?;
    Some(if start < end { &raw[start..=end] } else { "" })
}

enum ParseState {
    AwaitingFirstParse { reply: String },
    AwaitingRepairParse { reply: String },
}

/// Parses a model reply into JSON, using at most one repair round-trip.
pub struct ReplyParser<'a> {
    generator: &'a dyn GenerationPort,
}

impl<'a> ReplyParser<'a> {
    pub fn new(generator: &'a dyn GenerationPort) -> Self {
        Self { generator }
    }

    /// Runs the two-step state machine over `raw`.
    ///
    /// # Errors
    /// - `MalformedReply` when the first reply lacks an opening or closing brace (no repair).
    /// - `RepairFailed` when the repair reply has no region or still does not parse.
    /// - Whatever the generation port returns for the repair call.
    pub async fn parse(&self, raw: &str) -> Result<Value, DomainError> {
        let mut state = ParseState::AwaitingFirstParse {
            reply: raw.to_string(),
        };
        loop {
            state = match state {
                ParseState::AwaitingFirstParse { reply } => {
                    let candidate = json_region(&reply).ok_or_else(|| {
                        DomainError::MalformedReply(
                            "no JSON object found in model output".to_string(),
                        )
                    })?;
                    match serde_json::from_str::<Value>(candidate) {
                        Ok(value) => {
                            debug!("model reply parsed on first attempt");
                            return Ok(value);
                        }
                        Err(e) => {
                            warn!(error = %e, candidate_len = candidate.len(), "model reply is not valid JSON, requesting repair");
                            let repaired = self.request_repair(candidate).await?;
                            ParseState::AwaitingRepairParse { reply: repaired }
                        }
                    }
                }
                ParseState::AwaitingRepairParse { reply } => {
                    let candidate = json_region(&reply).ok_or_else(|| {
                        DomainError::RepairFailed(
                            "no JSON object found in repair output".to_string(),
                        )
                    })?;
                    return serde_json::from_str::<Value>(candidate)
                        .map(|value| {
                            info!("repaired model reply parsed");
                            value
                        })
                        .map_err(|e| {
                            warn!(error = %e, "repaired reply is still not valid JSON");
                            DomainError::RepairFailed(format!("repaired output is not valid JSON: {}", e))
                        });
                }
            };
        }
    }

    async fn request_repair(&self, candidate: &str) -> Result<String, DomainError> {
        let request = GenerationRequest::new(REPAIR_SYSTEM_PROMPT, repair_user_prompt(candidate));
        let reply = self.generator.complete(&request).await?;
        Ok(reply.trim().to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::ai::MockAiAdapter;

    const VALID: &str = r#"{"total_marks": 7, "question_wise_results": {}}"#;
    const TRAILING_COMMA: &str = r#"{"total_marks": 7, "question_wise_results": {},}"#;

    #[test]
    fn test_json_region_bounds() {
        assert_eq!(json_region("Here you go: {\"a\": {\"b\": 1}} thanks"), Some("{\"a\": {\"b\": 1}}"));
        assert_eq!(json_region("no braces"), None);
        assert_eq!(json_region("only { open"), None);
        assert_eq!(json_region("} reversed {"), Some(""));
    }

    #[tokio::test]
    async fn test_valid_reply_parses_without_repair() {
        let ai = MockAiAdapter::new(Vec::<String>::new());
        let value = ReplyParser::new(&ai)
            .parse(&format!("Sure!\n{}\n", VALID))
            .await
            .unwrap();
        assert_eq!(value["total_marks"], 7);
        assert_eq!(ai.call_count(), 0);
    }

    #[tokio::test]
    async fn test_trailing_comma_triggers_one_repair() {
        let ai = MockAiAdapter::new([format!("```json\n{}\n```", VALID)]);
        let value = ReplyParser::new(&ai).parse(TRAILING_COMMA).await.unwrap();
        assert_eq!(value["total_marks"], 7);
        assert_eq!(ai.call_count(), 1);

        let repair = &ai.requests()[0];
        assert_eq!(repair.system, REPAIR_SYSTEM_PROMPT);
        assert!(repair.user.contains(TRAILING_COMMA));
    }

    #[tokio::test]
    async fn test_malformed_repair_fails_without_third_call() {
        let ai = MockAiAdapter::new([TRAILING_COMMA, VALID]);
        let err = ReplyParser::new(&ai).parse(TRAILING_COMMA).await.unwrap_err();
        assert!(matches!(err, DomainError::RepairFailed(_)));
        assert_eq!(ai.call_count(), 1);
    }

    #[tokio::test]
    async fn test_no_brace_fails_fast() {
        let ai = MockAiAdapter::new([VALID]);
        let err = ReplyParser::new(&ai)
            .parse("I cannot grade this paper.")
            .await
            .unwrap_err();
        assert!(matches!(err, DomainError::MalformedReply(_)));
        assert_eq!(ai.call_count(), 0);
    }

    #[tokio::test]
    async fn test_reversed_braces_request_one_repair() {
        let ai = MockAiAdapter::new([VALID]);
        let value = ReplyParser::new(&ai)
            .parse("} sorry, here: {")
            .await
            .unwrap();
        assert_eq!(value["total_marks"], 7);
        assert_eq!(ai.call_count(), 1);
        assert_eq!(ai.requests()[0].system, REPAIR_SYSTEM_PROMPT);
    }

    #[tokio::test]
    async fn test_repair_reply_with_reversed_braces_is_repair_failed() {
        let ai = MockAiAdapter::new(["} still broken {"]);
        let err = ReplyParser::new(&ai).parse(TRAILING_COMMA).await.unwrap_err();
        assert!(matches!(err, DomainError::RepairFailed(_)));
        assert_eq!(ai.call_count(), 1);
    }

    #[tokio::test]
    async fn test_repair_reply_without_brace_is_repair_failed() {
        let ai = MockAiAdapter::new(["Sorry, I can't fix that."]);
        let err = ReplyParser::new(&ai).parse(TRAILING_COMMA).await.unwrap_err();
        assert!(matches!(err, DomainError::RepairFailed(_)));
        assert_eq!(ai.call_count(), 1);
    }

    #[tokio::test]
    async fn test_repair_transport_error_propagates() {
        let ai = MockAiAdapter::new(Vec::<String>::new());
        ai.push_failure("connection reset");
        let err = ReplyParser::new(&ai).parse(TRAILING_COMMA).await.unwrap_err();
        assert!(matches!(err, DomainError::Transport(_)));
    }
}
