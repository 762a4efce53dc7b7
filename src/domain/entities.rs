//! Domain entities. Pure data structures for the grading core.
//!
//! No HTTP/PDF types here; adapters map into these.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Share of a question's max marks the grading policy never goes below.
pub const GRADING_FLOOR_RATIO: f64 = 0.7;

/// Tolerance when comparing the reported total against the per-question sum.
const TOTAL_TOLERANCE: f64 = 0.01;

/// One question of the answer key, built by the record builder.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnswerKeyEntry {
    pub max_marks: u32,
    pub model_answer: String,
    pub keywords: Vec<String>,
}

/// Question identifier ("Q1", "Q12") -> entry. Identifiers are unique.
pub type AnswerKeyDocument = BTreeMap<String, AnswerKeyEntry>;

/// Grade for a single question or sub-part ("1a") as produced by the generation service.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QuestionResult {
    pub marks_awarded: f64,
    pub max_marks: f64,
    #[serde(default)]
    pub missing_points: Vec<String>,
}

/// Whole-paper grading result. Request-scoped, never persisted by the core.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EvaluationResult {
    pub total_marks: f64,
    pub question_wise_results: BTreeMap<String, QuestionResult>,
}

/// Something off about a grading result. Reported, never corrected.
#[derive(Debug, Clone, PartialEq)]
pub enum ScoreAnomaly {
    AboveMax {
        question: String,
        awarded: f64,
        max: f64,
    },
    Negative {
        question: String,
        awarded: f64,
    },
    BelowFloor {
        question: String,
        awarded: f64,
        floor: f64,
    },
    TotalMismatch {
        reported: f64,
        summed: f64,
    },
}

impl std::fmt::Display for ScoreAnomaly {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::AboveMax {
                question,
                awarded,
                max,
            } => write!(f, "{question}: awarded {awarded} exceeds max {max}"),
            Self::Negative { question, awarded } => {
                write!(f, "{question}: negative award {awarded}")
            }
            Self::BelowFloor {
                question,
                awarded,
                floor,
            } => write!(f, "{question}: awarded {awarded} is below the floor {floor}"),
            Self::TotalMismatch { reported, summed } => {
                write!(f, "total_marks {reported} differs from summed awards {summed}")
            }
        }
    }
}

impl EvaluationResult {
    /// Sum of `marks_awarded` over all questions.
    pub fn summed_marks(&self) -> f64 {
        self.question_wise_results
            .values()
            .map(|q| q.marks_awarded)
            .sum()
    }

    /// Sum of `max_marks` over all questions.
    pub fn max_total(&self) -> f64 {
        self.question_wise_results.values().map(|q| q.max_marks).sum()
    }

    /// Checks the result against the marking invariants and the grading floor.
    ///
    /// The floor is a prompt instruction enforced by the generation service; this
    /// only surfaces violations so callers can log them.
    pub fn audit(&self) -> Vec<ScoreAnomaly> {
        let mut anomalies = Vec::new();
        for (id, q) in &self.question_wise_results {
            if q.marks_awarded < 0.0 {
                anomalies.push(ScoreAnomaly::Negative {
                    question: id.clone(),
                    awarded: q.marks_awarded,
                });
            } else if q.marks_awarded > q.max_marks {
                anomalies.push(ScoreAnomaly::AboveMax {
                    question: id.clone(),
                    awarded: q.marks_awarded,
                    max: q.max_marks,
                });
            } else {
                let floor = q.max_marks * GRADING_FLOOR_RATIO;
                if q.marks_awarded + TOTAL_TOLERANCE < floor {
                    anomalies.push(ScoreAnomaly::BelowFloor {
                        question: id.clone(),
                        awarded: q.marks_awarded,
                        floor,
                    });
                }
            }
        }
        let summed = self.summed_marks();
        if (summed - self.total_marks).abs() > TOTAL_TOLERANCE {
            anomalies.push(ScoreAnomaly::TotalMismatch {
                reported: self.total_marks,
                summed,
            });
        }
        anomalies
    }
}

/// OCR output for a scanned answer paper.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct OcrTranscript {
    #[serde(default)]
    pub combined_output: Vec<String>,
    /// Full service response, kept for the run artifacts.
    #[serde(skip)]
    pub raw: serde_json::Value,
}

impl OcrTranscript {
    /// Recognized lines joined with newlines, trimmed.
    pub fn text(&self) -> String {
        self.combined_output.join("\n").trim().to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn result(total: f64, questions: &[(&str, f64, f64)]) -> EvaluationResult {
        EvaluationResult {
            total_marks: total,
            question_wise_results: questions
                .iter()
                .map(|(id, awarded, max)| {
                    (
                        id.to_string(),
                        QuestionResult {
                            marks_awarded: *awarded,
                            max_marks: *max,
                            missing_points: vec![],
                        },
                    )
                })
                .collect(),
        }
    }

    #[test]
    fn test_evaluation_result_deserializes_service_shape() {
        let json = r#"{
            "total_marks": 12.5,
            "question_wise_results": {
                "1a": {"marks_awarded": 4.5, "max_marks": 5, "missing_points": ["units"]},
                "2": {"marks_awarded": 8, "max_marks": 10}
            }
        }"#;
        let parsed: EvaluationResult = serde_json::from_str(json).unwrap();
        assert_eq!(parsed.total_marks, 12.5);
        assert_eq!(parsed.question_wise_results["1a"].missing_points, vec!["units"]);
        assert!(parsed.question_wise_results["2"].missing_points.is_empty());
    }

    #[test]
    fn test_evaluation_result_requires_question_mapping() {
        let missing = serde_json::from_str::<EvaluationResult>(r#"{"total_marks": 0}"#);
        assert!(missing.is_err());
        let empty: EvaluationResult =
            serde_json::from_str(r#"{"total_marks": 0, "question_wise_results": {}}"#).unwrap();
        assert!(empty.question_wise_results.is_empty());
    }

    #[test]
    fn test_audit_clean_result() {
        let r = result(17.0, &[("1", 8.0, 10.0), ("2", 9.0, 10.0)]);
        assert!(r.audit().is_empty());
    }

    #[test]
    fn test_audit_reports_every_kind() {
        let r = result(
            50.0,
            &[("1", 12.0, 10.0), ("2", -1.0, 10.0), ("3", 5.0, 10.0)],
        );
        let anomalies = r.audit();
        assert_eq!(anomalies.len(), 4);
        assert!(anomalies.iter().any(|a| matches!(a, ScoreAnomaly::AboveMax { .. })));
        assert!(anomalies.iter().any(|a| matches!(a, ScoreAnomaly::Negative { .. })));
        assert!(anomalies.iter().any(|a| matches!(a, ScoreAnomaly::BelowFloor { .. })));
        assert!(anomalies.iter().any(|a| matches!(a, ScoreAnomaly::TotalMismatch { .. })));
    }

    #[test]
    fn test_ocr_transcript_text_joins_lines() {
        let t = OcrTranscript {
            combined_output: vec!["1a) Osmosis".into(), "is diffusion of water ".into()],
            raw: serde_json::Value::Null,
        };
        assert_eq!(t.text(), "1a) Osmosis\nis diffusion of water");
        assert_eq!(OcrTranscript::default().text(), "");
    }
}
