//! Core domain layer. No external I/O dependencies.
//!
//! Entities, the error taxonomy and the pure answer-key pipeline
//! (normalize -> segment -> keywords -> records) live here.

pub mod answer_key;
pub mod entities;
pub mod errors;
pub mod keywords;
pub mod segmenter;
pub mod text;

pub use answer_key::{parse_answer_key, parse_answer_key_with};
pub use entities::{
    AnswerKeyDocument, AnswerKeyEntry, EvaluationResult, OcrTranscript, QuestionResult,
    ScoreAnomaly,
};
pub use errors::DomainError;
