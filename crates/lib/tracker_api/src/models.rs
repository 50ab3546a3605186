//! Request/response envelopes for the `/a2a` endpoint.
//!
//! Inbound bodies are parsed loosely as JSON and validated field by field
//! so that every failure maps onto a specific [`RpcError`].

use serde::Serialize;
use serde_json::{Map, Value};

use crate::error::RpcError;

/// Protocol version echoed on every response.
pub const JSONRPC_VERSION: &str = "2.0";

/// Method names accepted for a chat message.
pub const ACCEPTED_METHODS: [&str; 2] = ["sendMessage", "message/send"];

/// A validated "send message" request.
#[derive(Debug, Clone, PartialEq)]
pub struct SendMessage {
    /// Correlation token, echoed verbatim.
    pub id: Value,
    pub channel_id: Value,
    /// Message text as sent (not yet lowercased).
    pub text: String,
}

/// A request that failed validation, with the id to echo (or `null`).
#[derive(Debug, Clone, PartialEq)]
pub struct Rejected {
    pub id: Value,
    pub error: RpcError,
}

/// Validate a raw request body.
pub fn parse_request(body: &[u8]) -> Result<SendMessage, Rejected> {
    let reject = |id: Value, error| Rejected { id, error };

    let Ok(Value::Object(envelope)) = serde_json::from_slice::<Value>(body) else {
        return Err(reject(Value::Null, RpcError::InvalidRequest));
    };

    let id = envelope.get("id").cloned().unwrap_or(Value::Null);

    let (Some(method), Some(params)) = (present(&envelope, "method"), present(&envelope, "params"))
    else {
        return Err(reject(id, RpcError::InvalidRequest));
    };

    let method_ok = method
        .as_str()
        .is_some_and(|m| ACCEPTED_METHODS.contains(&m));
    let text = params.as_object().and_then(message_text);

    match (method_ok, text) {
        (true, Some(text)) => {
            let channel_id = params.get("channelId").cloned().unwrap_or(Value::Null);
            Ok(SendMessage {
                id,
                channel_id,
                text,
            })
        }
        _ => Err(reject(id, RpcError::InvalidMethodOrParams)),
    }
}

/// Field lookup treating an explicit `null` as absent.
fn present<'a>(obj: &'a Map<String, Value>, key: &str) -> Option<&'a Value> {
    obj.get(key).filter(|v| !v.is_null())
}

/// Message text from `params.text`, else `params.message`.
///
/// `message` may be a plain string or an A2A-style object whose `parts`
/// carry `text` fields. Whitespace-only text counts as missing.
fn message_text(params: &Map<String, Value>) -> Option<String> {
    let from_text = params
        .get("text")
        .and_then(Value::as_str)
        .filter(|t| !t.trim().is_empty())
        .map(str::to_string);
    let text = from_text.or_else(|| match params.get("message")? {
        Value::String(s) => Some(s.clone()),
        Value::Object(msg) => {
            let parts: Vec<&str> = msg
                .get("parts")?
                .as_array()?
                .iter()
                .filter_map(|p| p.get("text").and_then(Value::as_str))
                .collect();
            Some(parts.join(" "))
        }
        _ => None,
    })?;

    if text.trim().is_empty() {
        None
    } else {
        Some(text)
    }
}

/// Outbound envelope.
#[derive(Debug, Clone, Serialize)]
pub struct RpcResponse {
    pub jsonrpc: &'static str,
    pub id: Value,
    #[serde(flatten)]
    pub outcome: RpcOutcome,
}

/// Either a `result` or an `error` member.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum RpcOutcome {
    Result(MessageResult),
    Error(RpcErrorObject),
}

/// Successful reply payload.
#[derive(Debug, Clone, Serialize)]
pub struct MessageResult {
    #[serde(rename = "type")]
    pub kind: &'static str,
    #[serde(rename = "channelId")]
    pub channel_id: Value,
    pub text: String,
}

/// JSON-RPC error object.
#[derive(Debug, Clone, Serialize)]
pub struct RpcErrorObject {
    pub code: i64,
    pub message: String,
}

impl RpcResponse {
    pub fn message(id: Value, channel_id: Value, text: String) -> Self {
        Self {
            jsonrpc: JSONRPC_VERSION,
            id,
            outcome: RpcOutcome::Result(MessageResult {
                kind: "message",
                channel_id,
                text,
            }),
        }
    }

    pub fn error(id: Value, error: RpcError) -> Self {
        Self {
            jsonrpc: JSONRPC_VERSION,
            id,
            outcome: RpcOutcome::Error(error.into()),
        }
    }
}

impl From<Rejected> for RpcResponse {
    fn from(r: Rejected) -> Self {
        RpcResponse::error(r.id, r.error)
    }
}
