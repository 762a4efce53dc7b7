//! Text normalizer for extracted document text.

use regex::Regex;
use std::sync::LazyLock;

static NEWLINE_RUNS: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\n+").expect("valid regex"));
static BLANK_RUNS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[ \t]+").expect("valid regex"));

/// Collapses newline runs to one newline, space/tab runs to one space, then trims.
pub fn normalize(raw: &str) -> String {
    let text = NEWLINE_RUNS.replace_all(raw, "\n");
    let text = BLANK_RUNS.replace_all(&text, " ");
    text.trim().to_string()
}
