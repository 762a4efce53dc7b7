//! Mock generation adapter for testing without API calls.
//!
//! Replays scripted replies in order and records every request it receives.

use crate::domain::DomainError;
use crate::ports::{GenerationPort, GenerationRequest};
use std::collections::VecDeque;
use std::sync::Mutex;
use std::time::Duration;
use tracing::info;

/// Mock AI adapter for testing.
///
/// Each `complete` call pops the next scripted reply. When the script runs out
/// the call fails with a transport error, so an unexpected extra call shows up
/// as a test failure.
pub struct MockAiAdapter {
    replies: Mutex<VecDeque<Result<String, String>>>,
    requests: Mutex<Vec<GenerationRequest>>,
    /// Simulated network delay in milliseconds.
    delay_ms: u64,
}

impl MockAiAdapter {
    /// Create a mock that answers with `replies`, in order.
    pub fn new<I, S>(replies: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            replies: Mutex::new(replies.into_iter().map(|r| Ok(r.into())).collect()),
            requests: Mutex::new(Vec::new()),
            delay_ms: 0,
        }
    }

    /// Set a simulated network delay.
    pub fn with_delay(mut self, delay_ms: u64) -> Self {
        self.delay_ms = delay_ms;
        self
    }

    /// Queue a transport failure as the next reply.
    pub fn push_failure(&self, message: impl Into<String>) {
        if let Ok(mut replies) = self.replies.lock() {
            replies.push_back(Err(message.into()));
        }
    }

    /// Requests received so far, in call order.
    pub fn requests(&self) -> Vec<GenerationRequest> {
        self.requests
            .lock()
            .map(|r| r.clone())
            .unwrap_or_default()
    }

    /// Number of `complete` calls made so far.
    pub fn call_count(&self) -> usize {
        self.requests.lock().map(|r| r.len()).unwrap_or(0)
    }
}

#[async_trait::async_trait]
impl GenerationPort for MockAiAdapter {
    async fn complete(&self, request: &GenerationRequest) -> Result<String, DomainError> {
        info!(
            system_len = request.system.len(),
            user_len = request.user.len(),
            "[MOCK] Simulating generation call"
        );

        if self.delay_ms > 0 {
            tokio::time::sleep(Duration::from_millis(self.delay_ms)).await;
        }

        self.requests
            .lock()
            .map_err(|e| DomainError::Transport(format!("mock poisoned: {}", e)))?
            .push(request.clone());

        let next = self
            .replies
            .lock()
            .map_err(|e| DomainError::Transport(format!("mock poisoned: {}", e)))?
            .pop_front();

        match next {
            Some(Ok(reply)) => Ok(reply),
            Some(Err(message)) => Err(DomainError::Transport(message)),
            None => Err(DomainError::Transport(
                "[MOCK] no scripted reply left".to_string(),
            )),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_mock_adapter_replays_in_order() {
        let adapter = MockAiAdapter::new(["first", "second"]).with_delay(1);
        let req = GenerationRequest::new("sys", "user");

        assert_eq!(adapter.complete(&req).await.unwrap(), "first");
        assert_eq!(adapter.complete(&req).await.unwrap(), "second");
        assert!(matches!(
            adapter.complete(&req).await,
            Err(DomainError::Transport(_))
        ));
        assert_eq!(adapter.call_count(), 3);
        assert_eq!(adapter.requests()[0], req);
    }

    #[tokio::test]
    async fn test_mock_adapter_scripted_failure() {
        let adapter = MockAiAdapter::new(Vec::<String>::new());
        adapter.push_failure("503 Service Unavailable");
        let err = adapter
            .complete(&GenerationRequest::new("s", "u"))
            .await
            .unwrap_err();
        assert_eq!(err.to_string(), "Transport error: 503 Service Unavailable");
    }
}
