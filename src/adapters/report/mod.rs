//! Report adapters. Implement ReportPort.
//!
//! Markdown report for reading, CSV for spreadsheets.

pub mod csv_export;
pub mod markdown;

pub use csv_export::results_to_csv;
pub use markdown::MarkdownReportAdapter;
