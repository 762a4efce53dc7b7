//! exam-grader: answer-key segmentation and LLM-backed paper grading with Hexagonal Architecture.
//!
//! - `parse_answer_key(text)` turns normalized answer-key text into a keyed document.
//! - `EvaluationService::evaluate(key_text, student_text)` grades a transcript through an
//!   injected generation client, repairing a malformed reply at most once.

pub mod adapters;
pub mod domain;
pub mod ports;
pub mod shared;
pub mod usecases;

pub use domain::{AnswerKeyDocument, DomainError, EvaluationResult, parse_answer_key};
pub use usecases::EvaluationService;
