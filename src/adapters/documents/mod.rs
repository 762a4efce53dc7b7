//! Document adapters. Implement TextExtractorPort.

pub mod pdf_text;

pub use pdf_text::PdfTextExtractor;
