//! OpenAI-compatible chat-completions adapter.
//!
//! Works with Groq, OpenAI, Azure OpenAI, local Ollama or any compatible API.
//! Implements `GenerationPort` with temperature fixed at 0.

use crate::domain::DomainError;
use crate::ports::{GenerationPort, GenerationRequest};
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

/// Sampling temperature used for every call (maximal reproducibility).
const TEMPERATURE: f32 = 0.0;

/// OpenAI-compatible generation adapter.
pub struct OpenAiAdapter {
    client: reqwest::Client,
    api_url: String,
    api_key: String,
    model: String,
}

impl OpenAiAdapter {
    /// Create a new adapter.
    ///
    /// # Arguments
    /// * `api_url` - Chat completions endpoint (e.g., "https://api.groq.com/openai/v1/chat/completions")
    /// * `api_key` - API key (can be empty for local Ollama)
    /// * `model` - Model name (e.g., "openai/gpt-oss-120b")
    pub fn new(api_url: String, api_key: String, model: String) -> Self {
        Self {
            client: reqwest::Client::new(),
            api_url,
            api_key,
            model,
        }
    }

    fn chat_request(&self, request: &GenerationRequest) -> ChatRequest {
        ChatRequest {
            model: self.model.clone(),
            messages: vec![
                ChatMessage {
                    role: "system".to_string(),
                    content: request.system.clone(),
                },
                ChatMessage {
                    role: "user".to_string(),
                    content: request.user.clone(),
                },
            ],
            temperature: TEMPERATURE,
        }
    }
}

/// OpenAI API request structure.
#[derive(Serialize)]
struct ChatRequest {
    model: String,
    messages: Vec<ChatMessage>,
    temperature: f32,
}

#[derive(Serialize)]
struct ChatMessage {
    role: String,
    content: String,
}

/// OpenAI API response structure.
#[derive(Deserialize)]
struct ChatResponse {
    choices: Vec<Choice>,
}

#[derive(Deserialize)]
struct Choice {
    message: MessageContent,
}

#[derive(Deserialize)]
struct MessageContent {
    #[serde(default)]
    content: Option<String>,
}

impl ChatResponse {
    fn first_content(self) -> Option<String> {
        self.choices
            .into_iter()
            .next()
            .and_then(|c| c.message.content)
            .map(|c| c.trim().to_string())
    }
}

#[async_trait::async_trait]
impl GenerationPort for OpenAiAdapter {
    async fn complete(&self, request: &GenerationRequest) -> Result<String, DomainError> {
        info!(
            model = %self.model,
            system_len = request.system.len(),
            user_len = request.user.len(),
            "sending request to generation service"
        );

        let response = self
            .client
            .post(&self.api_url)
            .header("Authorization", format!("Bearer {}", self.api_key))
            .header("Content-Type", "application/json")
            .json(&self.chat_request(request))
            .send()
            .await
            .map_err(|e| DomainError::Transport(format!("HTTP request failed: {}", e)))?;

        if !response.status().is_success() {
            let status = response.status();
            let text = response.text().await.unwrap_or_default();
            warn!(status = %status, body = %text, "generation API returned error");
            return Err(DomainError::Transport(format!(
                "API error {}: {}",
                status,
                text.chars().take(200).collect::<String>()
            )));
        }

        let chat_response: ChatResponse = response
            .json()
            .await
            .map_err(|e| DomainError::Transport(format!("Failed to parse API response: {}", e)))?;

        let content = chat_response
            .first_content()
            .ok_or_else(|| DomainError::Transport("No response choices returned".to_string()))?;

        debug!(reply_len = content.len(), "received generation reply");
        Ok(content)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_chat_request_shape() {
        let adapter = OpenAiAdapter::new(
            "http://localhost/v1/chat/completions".into(),
            "key".into(),
            "openai/gpt-oss-120b".into(),
        );
        let body =
            serde_json::to_value(adapter.chat_request(&GenerationRequest::new("sys", "usr")))
                .unwrap();
        assert_eq!(body["model"], "openai/gpt-oss-120b");
        assert_eq!(body["temperature"], 0.0);
        assert_eq!(body["messages"][0]["role"], "system");
        assert_eq!(body["messages"][0]["content"], "sys");
        assert_eq!(body["messages"][1]["role"], "user");
        assert_eq!(body["messages"][1]["content"], "usr");
    }

    #[test]
    fn test_first_content_trims() {
        let resp: ChatResponse = serde_json::from_str(
            r#"{"choices": [{"message": {"role": "assistant", "content": "  {\"a\": 1}\n"}}]}"#,
        )
        .unwrap();
        assert_eq!(resp.first_content().as_deref(), Some("{\"a\": 1}"));
    }

    #[test]
    fn test_first_content_empty_choices() {
        let resp: ChatResponse = serde_json::from_str(r#"{"choices": []}"#).unwrap();
        assert_eq!(resp.first_content(), None);
    }
}
