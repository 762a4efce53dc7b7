//! OCR adapter. Implements OcrPort against an HTTP OCR service.

pub mod http_ocr;

pub use http_ocr::HttpOcrAdapter;
