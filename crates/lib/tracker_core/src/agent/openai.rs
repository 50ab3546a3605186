//! OpenAI chat-completions agent.
//!
//! Single request per call (`/chat/completions`), no retry; the caller's
//! deadline bounds the total time.

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};

use super::{AgentError, ChatAgent, SYSTEM_INSTRUCTIONS};

/// Default OpenAI API root.
pub const DEFAULT_BASE_URL: &str = "https://api.openai.com/v1";

/// Default chat model.
pub const DEFAULT_MODEL: &str = "gpt-4o-mini";

#[derive(Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: [ChatMessage<'a>; 2],
}

#[derive(Serialize)]
struct ChatMessage<'a> {
    role: &'a str,
    content: &'a str,
}

#[derive(Deserialize)]
struct ChatResponse {
    #[serde(default)]
    choices: Vec<ChatChoice>,
}

#[derive(Deserialize)]
struct ChatChoice {
    message: ChatReply,
}

#[derive(Deserialize)]
struct ChatReply {
    #[serde(default)]
    content: Option<String>,
}

/// Chat agent backed by the OpenAI chat-completions API.
#[derive(Debug, Clone)]
pub struct OpenAiAgent {
    http: Client,
    base_url: String,
    model: String,
    api_key: Option<String>,
}

impl OpenAiAgent {
    pub fn new(base_url: &str, model: &str, api_key: Option<String>) -> Self {
        Self {
            http: Client::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
            model: model.to_string(),
            api_key: api_key.filter(|k| !k.is_empty()),
        }
    }
}

#[async_trait]
impl ChatAgent for OpenAiAgent {
    async fn converse(&self, text: &str) -> Result<Option<String>, AgentError> {
        let api_key = self
            .api_key
            .as_deref()
            .ok_or_else(|| AgentError::Config("OPENAI_API_KEY is not set".to_string()))?;

        let resp = self
            .http
            .post(format!("{}/chat/completions", self.base_url))
            .header("Authorization", format!("Bearer {api_key}"))
            .json(&ChatRequest {
                model: &self.model,
                messages: [
                    ChatMessage {
                        role: "system",
                        content: SYSTEM_INSTRUCTIONS,
                    },
                    ChatMessage {
                        role: "user",
                        content: text,
                    },
                ],
            })
            .send()
            .await?;

        if !resp.status().is_success() {
            let status = resp.status();
            let body = resp
                .text()
                .await
                .unwrap_or_else(|_| "<no body>".to_string());
            return Err(AgentError::Provider(format!(
                "OpenAI chat failed: {status} {body}"
            )));
        }

        let data: ChatResponse = resp
            .json()
            .await
            .map_err(|e| AgentError::Provider(format!("OpenAI response parse error: {e}")))?;

        Ok(first_reply(data))
    }
}

fn first_reply(data: ChatResponse) -> Option<String> {
    data.choices.into_iter().next()?.message.content
}
