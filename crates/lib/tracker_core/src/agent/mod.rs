//! Conversational fallback — free-text replies when no coin was resolved.
//!
//! The agent itself is remote and may hang, so every call goes through
//! [`ConversationalFallback`], which races it against a fixed deadline.

pub mod openai;

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use thiserror::Error;
use tokio::time::timeout;
use tracing::warn;

/// Default deadline for a fallback reply.
pub const DEFAULT_FALLBACK_TIMEOUT: Duration = Duration::from_secs(7);

/// Instructions given to the chat model.
pub const SYSTEM_INSTRUCTIONS: &str = "You are a helpful cryptocurrency assistant. \
You can answer general crypto-related questions, provide insights about Bitcoin, Ethereum, \
and other coins, and guide users about the crypto market. \
If the user asks for a price, the data will be fetched from an API, so just confirm it politely. \
Keep your responses short, clear, and friendly.";

/// Errors that can occur when talking to a chat agent.
#[derive(Debug, Error)]
pub enum AgentError {
    #[error("Config error: {0}")]
    Config(String),

    #[error("Request failed: {0}")]
    Request(#[from] reqwest::Error),

    #[error("Provider error: {0}")]
    Provider(String),
}

/// A remote conversational agent.
#[async_trait]
pub trait ChatAgent: Send + Sync {
    /// Reply to `text`. `Ok(None)` means the agent answered with no text.
    async fn converse(&self, text: &str) -> Result<Option<String>, AgentError>;
}

/// Why a fallback call produced no reply.
#[derive(Debug, Error)]
pub enum FallbackError {
    #[error("agent did not reply within {0:?}")]
    Timeout(Duration),

    #[error("agent returned no text")]
    Empty,

    #[error(transparent)]
    Agent(#[from] AgentError),
}

/// Deadline-bounded wrapper around a [`ChatAgent`].
#[derive(Clone)]
pub struct ConversationalFallback {
    agent: Arc<dyn ChatAgent>,
    timeout: Duration,
}

impl ConversationalFallback {
    pub fn new(agent: Arc<dyn ChatAgent>, timeout: Duration) -> Self {
        Self { agent, timeout }
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    /// Ask the agent for a reply, giving up after the configured deadline.
    ///
    /// The agent future is dropped when the deadline fires, which abandons
    /// the in-flight request.
    pub async fn try_converse(&self, text: &str) -> Result<String, FallbackError> {
        let reply = timeout(self.timeout, self.agent.converse(text))
            .await
            .map_err(|_| FallbackError::Timeout(self.timeout))??;

        reply
            .map(|r| r.trim().to_string())
            .filter(|r| !r.is_empty())
            .ok_or(FallbackError::Empty)
    }

    /// Like [`try_converse`](Self::try_converse) but logs and swallows failures.
    pub async fn converse(&self, text: &str) -> Option<String> {
        match self.try_converse(text).await {
            Ok(reply) => Some(reply),
            Err(e) => {
                warn!("conversational fallback failed: {e}");
                None
            }
        }
    }
}
