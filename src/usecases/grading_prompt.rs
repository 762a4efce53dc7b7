//! Grading prompt composer.
//!
//! Injects the raw answer key and the raw student transcript into a fixed
//! instruction template. The grading policy lives in the rule constants below and
//! is present verbatim in every composed prompt.

use crate::ports::GenerationRequest;

/// System instruction for the grading call.
pub const GRADING_SYSTEM_PROMPT: &str = "You are a strict JSON generator.
Rules:
- Output ONLY valid JSON
- Use double quotes only
- No trailing commas
- No extra text";

/// Non-negotiable grading rules, in order.
pub const GRADING_RULES: [&str; 8] = [
    "Identify ALL questions and sub-questions (1, 1a, 1b, 2a, 2b, etc.)",
    "Match student answers ONLY to the correct questions",
    "Evaluate the student's answers using the answer key. If an answer does not directly match, assess whether it is still conceptually correct and accept equivalent wording",
    "Be lenient and do NOT hallucinate content",
    "NEVER award less than 70% of max marks for a question",
    "If the answer is weak or incorrect, list at most 2-3 missing points from the answer key, never more",
    "Sum all the marks you have awarded accurately and always return the total marks for the answer paper",
    "Reply with syntactically valid JSON only",
];

/// Output-format rules appended after the documents.
pub const OUTPUT_RULES: [&str; 5] = [
    "Output ONLY valid JSON",
    "Use double quotes for every key and string",
    "No trailing commas",
    "No explanations or prose",
    "No markdown or code fences",
];

/// The exact reply shape the service must return.
pub const OUTPUT_SHAPE: &str = r#"{
  "total_marks": number,
  "question_wise_results": {
    "1a": {
      "marks_awarded": number,
      "max_marks": number,
      "missing_points": []
    },
    "2b": {
      "marks_awarded": number,
      "max_marks": number,
      "missing_points": []
    }
  }
}"#;

/// Build the user instruction for one grading call.
pub fn grading_user_prompt(answer_key_text: &str, student_text: &str) -> String {
    let rules = GRADING_RULES
        .iter()
        .enumerate()
        .map(|(i, rule)| format!("{}. {}", i + 1, rule))
        .collect::<Vec<_>>()
        .join("\n");
    let output_rules = OUTPUT_RULES
        .iter()
        .map(|rule| format!("- {}", rule))
        .collect::<Vec<_>>()
        .join("\n");

    format!(
        "You are an automated exam evaluator.

MANDATORY GRADING RULES:
{rules}

ANSWER KEY:
------------
{answer_key_text}

STUDENT ANSWERS:
----------------
{student_text}

OUTPUT RULES:
{output_rules}

RETURN JSON in EXACT format:
{OUTPUT_SHAPE}
"
    )
}

/// Compose the full grading request.
pub fn compose_grading_request(answer_key_text: &str, student_text: &str) -> GenerationRequest {
    GenerationRequest::new(
        GRADING_SYSTEM_PROMPT,
        grading_user_prompt(answer_key_text, student_text),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_rule_present_verbatim() {
        let req = compose_grading_request("Q1. (Max Marks : 5) Osmosis", "1. osmosis is...");
        for rule in GRADING_RULES.iter().chain(OUTPUT_RULES.iter()) {
            assert!(req.user.contains(rule), "missing rule: {rule}");
        }
        assert!(req.user.contains(OUTPUT_SHAPE));
        assert_eq!(req.system, GRADING_SYSTEM_PROMPT);
    }

    #[test]
    fn test_documents_injected_verbatim() {
        let key = "Q1.  (Max Marks : 5)\n\nweird   spacing";
        let student = "1a) {not json} \"quoted\"";
        let prompt = grading_user_prompt(key, student);
        assert!(prompt.contains(key));
        assert!(prompt.contains(student));
        assert!(prompt.find("ANSWER KEY:").unwrap() < prompt.find("STUDENT ANSWERS:").unwrap());
    }

    #[test]
    fn test_floor_rule_states_seventy_percent() {
        assert!(grading_user_prompt("", "").contains("70% of max marks"));
    }
}
