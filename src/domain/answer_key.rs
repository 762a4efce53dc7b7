//! Answer-key record builder: normalized text -> AnswerKeyDocument.

use super::entities::{AnswerKeyDocument, AnswerKeyEntry};
use super::keywords::{DEFAULT_KEYWORD_COUNT, extract_keywords};
use super::segmenter::segment;
use tracing::debug;

/// Parses normalized answer-key text with the default keyword count.
pub fn parse_answer_key(text: &str) -> AnswerKeyDocument {
    parse_answer_key_with(text, DEFAULT_KEYWORD_COUNT)
}

/// Parses normalized answer-key text, keeping `keyword_count` keywords per answer.
///
/// Blocks without a marks annotation are skipped. A repeated identifier replaces
/// the earlier entry.
pub fn parse_answer_key_with(text: &str, keyword_count: usize) -> AnswerKeyDocument {
    let mut document = AnswerKeyDocument::new();
    for block in segment(text) {
        let keywords = extract_keywords(&block.model_answer, keyword_count);
        let entry = AnswerKeyEntry {
            max_marks: block.max_marks,
            model_answer: block.model_answer,
            keywords,
        };
        if document.insert(block.identifier.clone(), entry).is_some() {
            debug!(question = %block.identifier, "duplicate question identifier, last one wins");
        }
    }
    document
}
