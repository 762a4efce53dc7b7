//! Implements InputPort. Inquire-based interactive menu.
//!
//! Grade paper / Parse answer key / Exit.

use super::progress::Spinner;
use crate::domain::DomainError;
use crate::ports::InputPort;
use crate::usecases::{AnswerKeyService, GradingWorkflow};
use async_trait::async_trait;
use inquire::ui::{Color, RenderConfig, StyleSheet, Styled};
use inquire::{Select, Text};
use std::fmt;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::error;

/// Applies the neon color theme to every inquire prompt.
pub fn apply_theme() {
    let purple = Color::Rgb {
        r: 0xbc,
        g: 0x13,
        b: 0xfe,
    };
    let green = Color::Rgb {
        r: 0x0f,
        g: 0xf0,
        b: 0xfc,
    };
    let config = RenderConfig::default()
        .with_prompt_prefix(Styled::new(">").with_fg(purple))
        .with_highlighted_option_prefix(Styled::new(">").with_fg(green))
        .with_selected_option(Some(StyleSheet::new().with_fg(green)))
        .with_answer(StyleSheet::new().with_fg(green));
    inquire::set_global_render_config(config);
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum MenuAction {
    GradePaper,
    ParseAnswerKey,
    Exit,
}

impl MenuAction {
    const ALL: [MenuAction; 3] = [Self::GradePaper, Self::ParseAnswerKey, Self::Exit];
}

impl fmt::Display for MenuAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::GradePaper => "Grade answer paper",
            Self::ParseAnswerKey => "Parse answer key to JSON",
            Self::Exit => "Exit",
        };
        f.write_str(label)
    }
}

/// TUI adapter. Inquire prompts.
pub struct TuiInputPort {
    answer_keys: Arc<AnswerKeyService>,
    /// `None` when the OCR service is not configured.
    grading: Option<Arc<GradingWorkflow>>,
    output_dir: PathBuf,
}

impl TuiInputPort {
    pub fn new(
        answer_keys: Arc<AnswerKeyService>,
        grading: Option<Arc<GradingWorkflow>>,
        output_dir: PathBuf,
    ) -> Self {
        Self {
            answer_keys,
            grading,
            output_dir,
        }
    }

    fn prompt_path(message: &str) -> Result<PathBuf, DomainError> {
        let answer = Text::new(message)
            .prompt()
            .map_err(|e| DomainError::Ui(e.to_string()))?;
        Ok(PathBuf::from(answer.trim()))
    }

    async fn grade_paper(&self) -> Result<(), DomainError> {
        let Some(grading) = &self.grading else {
            println!("Grading needs the OCR service: set GRADER_OCR_API_URL (or OCR_API_URL).");
            return Ok(());
        };
        let key = Self::prompt_path("Answer key PDF:")?;
        let paper = Self::prompt_path("Scanned answer paper:")?;

        let spinner = Spinner::start("Running OCR and grading...");
        let outcome = grading.grade_paper(&key, &paper).await?;
        spinner.finish(format!(
            "Total marks: {} / {}",
            outcome.result.total_marks,
            outcome.result.max_total()
        ));

        for (question, q) in &outcome.result.question_wise_results {
            println!("  {:<6} {:>5} / {:<5}", question, q.marks_awarded, q.max_marks);
        }
        for path in &outcome.reports {
            println!("Report: {}", path.display());
        }
        Ok(())
    }

    async fn parse_answer_key(&self) -> Result<(), DomainError> {
        let key = Self::prompt_path("Answer key PDF:")?;
        let default_out = self.output_dir.join(default_key_json_name(&key));
        let out = Text::new("Output JSON file:")
            .with_default(&default_out.display().to_string())
            .prompt()
            .map_err(|e| DomainError::Ui(e.to_string()))?;

        let spinner = Spinner::start("Parsing answer key...");
        let count = self.answer_keys.export_json(&key, Path::new(out.trim())).await?;
        if count == 0 {
            spinner.finish("No questions parsed. Check the PDF format.");
        } else {
            spinner.finish(format!("{} questions written to {}", count, out.trim()));
        }
        Ok(())
    }
}

/// `biology_key.pdf` -> `biology_key.json`.
fn default_key_json_name(key: &Path) -> String {
    key.file_stem()
        .map(|s| format!("{}.json", s.to_string_lossy()))
        .unwrap_or_else(|| "answer_key.json".to_string())
}

#[async_trait]
impl InputPort for TuiInputPort {
    async fn run(&self) -> Result<(), DomainError> {
        loop {
            let action = Select::new("What do you want to do?", MenuAction::ALL.to_vec())
                .prompt()
                .map_err(|e| DomainError::Ui(e.to_string()))?;

            let outcome = match action {
                MenuAction::GradePaper => self.grade_paper().await,
                MenuAction::ParseAnswerKey => self.parse_answer_key().await,
                MenuAction::Exit => return Ok(()),
            };

            // Per-run failures go back to the menu; aborted prompts end the session.
            match outcome {
                Err(DomainError::Ui(msg)) => return Err(DomainError::Ui(msg)),
                Err(e) => {
                    error!(error = %e, client_error = e.is_client_error(), "run failed");
                    println!("Failed: {}", e);
                }
                Ok(()) => {}
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_key_json_name() {
        assert_eq!(default_key_json_name(Path::new("in/bio_key.pdf")), "bio_key.json");
        assert_eq!(default_key_json_name(Path::new("")), "answer_key.json");
    }

    #[test]
    fn test_menu_labels() {
        assert_eq!(MenuAction::Exit.to_string(), "Exit");
        assert_eq!(MenuAction::ALL.len(), 3);
    }
}
