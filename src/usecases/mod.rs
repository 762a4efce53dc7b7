//! Application use cases. Orchestrate domain logic via ports.

pub mod answer_key_service;
pub mod evaluation_service;
pub mod grading_prompt;
pub mod grading_workflow;
pub mod reply_parser;

pub use answer_key_service::AnswerKeyService;
pub use evaluation_service::EvaluationService;
pub use grading_workflow::{GradingOutcome, GradingWorkflow};
pub use reply_parser::ReplyParser;
