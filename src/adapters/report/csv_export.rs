//! CSV export of question-wise results. Uses the `csv` crate for safe quoting.

use crate::domain::EvaluationResult;

/// Convert a grading result to CSV.
///
/// Format: `Question,Marks Awarded,Max Marks,Missing Points`, one row per
/// question, missing points joined with `; `.
pub fn results_to_csv(result: &EvaluationResult) -> Result<String, csv::Error> {
    let mut wtr = csv::WriterBuilder::new()
        .has_headers(true)
        .from_writer(Vec::new());

    wtr.write_record(["Question", "Marks Awarded", "Max Marks", "Missing Points"])?;

    for (question, q) in &result.question_wise_results {
        // Newlines inside points would break one-row-per-question readers
        let missing = q
            .missing_points
            .iter()
            .map(|p| p.replace(['\n', '\r'], " "))
            .collect::<Vec<_>>()
            .join("; ");
        let awarded = q.marks_awarded.to_string();
        let max = q.max_marks.to_string();
        wtr.write_record([question.as_str(), awarded.as_str(), max.as_str(), missing.as_str()])?;
    }

    wtr.flush()?;
    let bytes = wtr
        .into_inner()
        .map_err(|e| csv::Error::from(std::io::Error::other(e.to_string())))?;

    String::from_utf8(bytes).map_err(|e| {
        csv::Error::from(std::io::Error::new(
            std::io::ErrorKind::InvalidData,
            e.to_string(),
        ))
    })
}
