//! Infrastructure adapters. Implement outbound ports.
//!
//! Generation service, OCR, PDF text, filesystem, reports, terminal UI.
//! Map errors to DomainError.

pub mod ai;
pub mod documents;
pub mod ocr;
pub mod persistence;
pub mod report;
pub mod ui;
