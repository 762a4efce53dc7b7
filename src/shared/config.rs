//! Application configuration. Service credentials, endpoints, paths.

use crate::domain::DomainError;
use crate::domain::keywords::DEFAULT_KEYWORD_COUNT;
use serde::Deserialize;

/// Default chat completions endpoint (Groq, OpenAI-compatible).
pub const DEFAULT_AI_API_URL: &str = "https://api.groq.com/openai/v1/chat/completions";
pub const DEFAULT_AI_MODEL: &str = "openai/gpt-oss-120b";
pub const DEFAULT_OUTPUT_DIR: &str = "./outputs";
pub const DEFAULT_OCR_TIMEOUT_SECS: u64 = 600;

#[derive(Debug, Deserialize, Default)]
pub struct AppConfig {
    // ─────────────────────────────────────────────────────────────────────────
    // Generation service
    // ─────────────────────────────────────────────────────────────────────────
    /// API key. Read from GRADER_AI_API_KEY, falls back to GROQ_API_KEY.
    #[serde(default)]
    pub ai_api_key: Option<String>,

    /// Chat completions URL. Read from GRADER_AI_API_URL.
    #[serde(default)]
    pub ai_api_url: Option<String>,

    /// Model name. Read from GRADER_AI_MODEL.
    #[serde(default)]
    pub ai_model: Option<String>,

    // ─────────────────────────────────────────────────────────────────────────
    // OCR service
    // ─────────────────────────────────────────────────────────────────────────
    /// OCR endpoint. Read from GRADER_OCR_API_URL, falls back to OCR_API_URL.
    #[serde(default)]
    pub ocr_api_url: Option<String>,

    /// Upper bound for one OCR call, in seconds. Read from GRADER_OCR_TIMEOUT_SECS.
    #[serde(default)]
    pub ocr_timeout_secs: Option<u64>,

    // ─────────────────────────────────────────────────────────────────────────
    // Pipeline
    // ─────────────────────────────────────────────────────────────────────────
    /// Directory for run artifacts and reports. Read from GRADER_OUTPUT_DIR.
    #[serde(default)]
    pub output_dir: Option<String>,

    /// Keywords kept per answer-key entry. Read from GRADER_KEYWORD_COUNT.
    #[serde(default)]
    pub keyword_count: Option<usize>,
}

/// Non-empty trimmed value or `None`.
fn non_empty(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

impl AppConfig {
    pub fn load() -> Result<Self, config::ConfigError> {
        dotenv::dotenv().ok();
        let mut c = config::Config::builder();
        c = c.add_source(config::Environment::with_prefix("GRADER"));
        if let Ok(path) = std::env::var("GRADER_CONFIG") {
            c = c.add_source(config::File::with_name(&path));
        }
        c.build()?.try_deserialize()
    }

    /// Returns the generation API key if configured (GRADER_AI_API_KEY or GROQ_API_KEY).
    pub fn ai_api_key(&self) -> Option<String> {
        non_empty(self.ai_api_key.clone()).or_else(|| non_empty(std::env::var("GROQ_API_KEY").ok()))
    }

    /// Returns the API key or a configuration error naming the variables to set.
    pub fn require_ai_api_key(&self) -> Result<String, DomainError> {
        self.ai_api_key().ok_or_else(|| {
            DomainError::Configuration(
                "GRADER_AI_API_KEY (or GROQ_API_KEY) is not set. Put it in .env".to_string(),
            )
        })
    }

    /// Returns the chat completions URL. Defaults to Groq.
    pub fn ai_api_url_or_default(&self) -> String {
        non_empty(self.ai_api_url.clone()).unwrap_or_else(|| DEFAULT_AI_API_URL.to_string())
    }

    /// Returns the model name. Defaults to "openai/gpt-oss-120b".
    pub fn ai_model_or_default(&self) -> String {
        non_empty(self.ai_model.clone()).unwrap_or_else(|| DEFAULT_AI_MODEL.to_string())
    }

    /// Returns the OCR endpoint if configured (GRADER_OCR_API_URL or OCR_API_URL).
    pub fn ocr_api_url(&self) -> Option<String> {
        non_empty(self.ocr_api_url.clone()).or_else(|| non_empty(std::env::var("OCR_API_URL").ok()))
    }

    /// Returns the OCR endpoint or a configuration error.
    pub fn require_ocr_api_url(&self) -> Result<String, DomainError> {
        self.ocr_api_url().ok_or_else(|| {
            DomainError::Configuration(
                "GRADER_OCR_API_URL (or OCR_API_URL) is not set. Put it in .env".to_string(),
            )
        })
    }

    /// Returns the OCR timeout in seconds. Defaults to 600.
    pub fn ocr_timeout_secs_or_default(&self) -> u64 {
        self.ocr_timeout_secs
            .filter(|s| *s > 0)
            .unwrap_or(DEFAULT_OCR_TIMEOUT_SECS)
    }

    /// Returns the output directory. Defaults to "./outputs".
    pub fn output_dir_or_default(&self) -> String {
        non_empty(self.output_dir.clone()).unwrap_or_else(|| DEFAULT_OUTPUT_DIR.to_string())
    }

    /// Returns the keyword count. Defaults to 5; zero is treated as unset.
    pub fn keyword_count_or_default(&self) -> usize {
        self.keyword_count
            .filter(|n| *n > 0)
            .unwrap_or(DEFAULT_KEYWORD_COUNT)
    }
}
