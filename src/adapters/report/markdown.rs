//! Markdown + CSV report renderer. Implements ReportPort.

use super::csv_export::results_to_csv;
use crate::domain::{DomainError, EvaluationResult};
use crate::ports::ReportPort;
use chrono::{DateTime, Utc};
use std::path::{Path, PathBuf};
use tokio::fs;
use tracing::info;

pub const MARKDOWN_REPORT_FILE: &str = "evaluation_report.md";
pub const CSV_REPORT_FILE: &str = "question_results.csv";

/// Writes `evaluation_report.md` and `question_results.csv` into `reports_dir`.
pub struct MarkdownReportAdapter {
    reports_dir: PathBuf,
}

impl MarkdownReportAdapter {
    pub fn new(reports_dir: impl AsRef<Path>) -> Self {
        Self {
            reports_dir: reports_dir.as_ref().to_path_buf(),
        }
    }

    /// Build the Markdown report text.
    pub fn render_markdown(result: &EvaluationResult, generated_at: DateTime<Utc>) -> String {
        let mut md = String::new();

        md.push_str("# Handwritten Answer Evaluation Report\n\n");
        md.push_str(&format!(
            "**Total Marks:** {} / {} | **Generated:** {}\n\n",
            result.total_marks,
            result.max_total(),
            generated_at.format("%Y-%m-%d %H:%M UTC")
        ));
        md.push_str("---\n\n");

        md.push_str("## Question-wise Results\n\n");
        if result.question_wise_results.is_empty() {
            md.push_str("_No questions were graded._\n\n");
        } else {
            md.push_str("| Question | Awarded | Max | Missing Points |\n");
            md.push_str("|---|---|---|---|\n");
            for (question, q) in &result.question_wise_results {
                let missing = if q.missing_points.is_empty() {
                    "-".to_string()
                } else {
                    q.missing_points
                        .iter()
                        .map(|p| p.replace('|', "\\|").replace('\n', " "))
                        .collect::<Vec<_>>()
                        .join("<br>")
                };
                md.push_str(&format!(
                    "| {} | {} | {} | {} |\n",
                    question, q.marks_awarded, q.max_marks, missing
                ));
            }
            md.push('\n');
        }

        let anomalies = result.audit();
        if !anomalies.is_empty() {
            md.push_str("## Review Notes\n\n");
            for anomaly in &anomalies {
                md.push_str(&format!("- {}\n", anomaly));
            }
            md.push('\n');
        }

        md.push_str("---\n");
        md.push_str("*Generated by exam-grader*\n");
        md
    }

    async fn write(&self, name: &str, contents: &str) -> Result<PathBuf, DomainError> {
        let path = self.reports_dir.join(name);
        fs::write(&path, contents)
            .await
            .map_err(|e| DomainError::Artifact(format!("Failed to write report: {}", e)))?;
        info!(path = %path.display(), "report generated");
        Ok(path)
    }
}

#[async_trait::async_trait]
impl ReportPort for MarkdownReportAdapter {
    async fn render(&self, result: &EvaluationResult) -> Result<Vec<PathBuf>, DomainError> {
        fs::create_dir_all(&self.reports_dir)
            .await
            .map_err(|e| DomainError::Artifact(format!("Failed to create reports dir: {}", e)))?;

        let markdown = Self::render_markdown(result, Utc::now());
        let csv = results_to_csv(result)
            .map_err(|e| DomainError::Artifact(format!("Failed to generate CSV: {}", e)))?;

        Ok(vec![
            self.write(MARKDOWN_REPORT_FILE, &markdown).await?,
            self.write(CSV_REPORT_FILE, &csv).await?,
        ])
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::QuestionResult;
    use chrono::TimeZone;

    fn sample() -> EvaluationResult {
        let mut result = EvaluationResult {
            total_marks: 12.0,
            question_wise_results: Default::default(),
        };
        result.question_wise_results.insert(
            "1a".into(),
            QuestionResult {
                marks_awarded: 4.0,
                max_marks: 5.0,
                missing_points: vec!["define osmosis".into(), "a|b".into()],
            },
        );
        result.question_wise_results.insert(
            "2".into(),
            QuestionResult {
                marks_awarded: 8.0,
                max_marks: 10.0,
                missing_points: vec![],
            },
        );
        result
    }

    #[test]
    fn test_render_markdown_contents() {
        let at = Utc.with_ymd_and_hms(2024, 1, 1, 9, 30, 0).unwrap();
        let md = MarkdownReportAdapter::render_markdown(&sample(), at);
        assert!(md.contains("**Total Marks:** 12 / 15"));
        assert!(md.contains("2024-01-01 09:30 UTC"));
        assert!(md.contains("| 1a | 4 | 5 | define osmosis<br>a\\|b |"));
        assert!(md.contains("| 2 | 8 | 10 | - |"));
        assert!(!md.contains("Review Notes"));
    }

    #[test]
    fn test_render_markdown_lists_anomalies() {
        let mut result = sample();
        result.total_marks = 30.0;
        let md = MarkdownReportAdapter::render_markdown(&result, Utc::now());
        assert!(md.contains("## Review Notes"));
        assert!(md.contains("differs from summed awards 12"));
    }

    #[tokio::test]
    async fn test_render_writes_both_files() {
        let dir = tempfile::tempdir().unwrap();
        let adapter = MarkdownReportAdapter::new(dir.path().join("reports"));
        let paths = adapter.render(&sample()).await.unwrap();
        assert_eq!(paths.len(), 2);
        assert!(paths[0].ends_with(MARKDOWN_REPORT_FILE));
        assert!(std::fs::read_to_string(&paths[1]).unwrap().starts_with("Question,"));
    }
}
