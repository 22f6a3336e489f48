//! Free-text questions from the chat branch
//!
//! Forwards one question to the answering service and always comes back
//! with displayable text. Failures are logged with their classification and
//! replaced by a fixed apology; they are never retried.

use crate::llm::{LlmError, LlmRequest, LlmService};
use std::sync::Arc;
use std::time::Duration;
use thiserror::Error;
use tokio::time::timeout;

/// Shown to the user whenever the answering service cannot help
pub const FALLBACK_ANSWER: &str =
    "An error occurred while processing your request. Please try again.";

const SYSTEM_PROMPT: &str = "You are pesa AI, an assistant for smallholder farmers using MamaPesa \
on a basic mobile phone. Answer questions about agriculture, farm finance, savings and loans. \
Your answer is shown on a USSD screen: reply in plain text, no markdown, in at most three short \
sentences.";

const MAX_ANSWER_TOKENS: u32 = 150;
const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Why a question went unanswered
#[derive(Debug, Error)]
pub enum BridgeFailure {
    #[error("No answering service configured")]
    Unavailable,
    #[error("Answering service timed out after {0:?}")]
    Timeout(Duration),
    #[error("Answering service failed: {0}")]
    Service(#[from] LlmError),
}

/// Bridge between the chat gateway and the answering service
pub struct AiQueryBridge {
    service: Option<Arc<dyn LlmService>>,
    timeout: Duration,
}

impl AiQueryBridge {
    pub fn new(service: Option<Arc<dyn LlmService>>) -> Self {
        Self {
            service,
            timeout: DEFAULT_TIMEOUT,
        }
    }

    /// Budget for one question, including the network round trip
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Timeout budget from an `AI_TIMEOUT_SECS` value, in whole seconds
    pub fn timeout_from(value: Option<String>) -> Duration {
        value
            .and_then(|s| s.parse().ok())
            .map_or(DEFAULT_TIMEOUT, Duration::from_secs)
    }

    /// Ask one question, classifying any failure
    pub async fn ask(&self, question: &str) -> Result<String, BridgeFailure> {
        let service = self.service.as_ref().ok_or(BridgeFailure::Unavailable)?;

        let request = LlmRequest::question(Some(SYSTEM_PROMPT), question)
            .with_max_tokens(MAX_ANSWER_TOKENS);

        let response = timeout(self.timeout, service.complete(&request))
            .await
            .map_err(|_| BridgeFailure::Timeout(self.timeout))??;

        Ok(response.text)
    }

    /// Ask one question and return the text to show, answer or apology
    pub async fn answer(&self, question: &str) -> String {
        match self.ask(question).await {
            Ok(text) => text,
            Err(e) => {
                tracing::warn!(error = %e, "AI query failed, sending fallback");
                FALLBACK_ANSWER.to_string()
            }
        }
    }
}
