//! Question block segmenter.
//!
//! Finds every `Q<digits>.` marker in one linear pass and cuts the text into
//! non-overlapping spans, each running from one marker up to the next marker
//! (or end of text). Text before the first marker is discarded.

use regex::Regex;
use std::sync::LazyLock;
use tracing::debug;

static QUESTION_MARKER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"Q\d+\.").expect("valid regex"));
static MAX_MARKS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"Max Marks\s*:\s*(\d+)").expect("valid regex"));
/// Marks annotation wrapped in parentheses, e.g. `(Max Marks : 5)`. Single line only.
static WRAPPED_MAX_MARKS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\(.*?Max Marks\s*:\s*\d+.*?\)").expect("valid regex"));

/// A marked question block with its marks annotation resolved.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuestionBlock {
    /// Marker without its trailing period, e.g. `Q3`.
    pub identifier: String,
    pub max_marks: u32,
    /// Block text with the marker and marks annotation removed, trimmed.
    pub model_answer: String,
}

/// Raw spans of `text`, one per question marker, in document order.
pub fn split_blocks(text: &str) -> Vec<&str> {
    let starts: Vec<usize> = QUESTION_MARKER.find_iter(text).map(|m| m.start()).collect();
    starts
        .iter()
        .enumerate()
        .map(|(i, &start)| {
            let end = starts.get(i + 1).copied().unwrap_or(text.len());
            &text[start..end]
        })
        .collect()
}

/// Resolves one raw span. Returns `None` when the block carries no usable marks
/// annotation or nothing is left of the answer; such blocks are skipped, not errors.
pub fn parse_block(block: &str) -> Option<QuestionBlock> {
    let marker = QUESTION_MARKER.find(block)?;
    let identifier = marker.as_str().trim_end_matches('.').to_string();

    let Some(caps) = MAX_MARKS.captures(block) else {
        debug!(question = %identifier, "no Max Marks annotation, skipping block");
        return None;
    };
    let max_marks = match caps[1].parse::<u32>() {
        Ok(0) => {
            debug!(question = %identifier, "zero Max Marks, skipping block");
            return None;
        }
        Ok(n) => n,
        Err(e) => {
            debug!(question = %identifier, marks = &caps[1], error = %e, "Max Marks value overflows u32, skipping block");
            return None;
        }
    };

    let answer = QUESTION_MARKER.replace_all(block, "");
    let answer = WRAPPED_MAX_MARKS.replace_all(&answer, "");
    let answer = MAX_MARKS.replace_all(&answer, "");
    let model_answer = answer.trim().to_string();
    if model_answer.is_empty() {
        debug!(question = %identifier, "empty model answer, skipping block");
        return None;
    }

    Some(QuestionBlock {
        identifier,
        max_marks,
        model_answer,
    })
}

/// Segments normalized answer-key text into resolved question blocks, in order.
/// Duplicate identifiers are kept here; the record builder decides which wins.
pub fn segment(text: &str) -> Vec<QuestionBlock> {
    split_blocks(text).into_iter().filter_map(parse_block).collect()
}
