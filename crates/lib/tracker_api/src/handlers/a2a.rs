//! `POST /a2a` — chat message bridge.
//!
//! Always answers 200 with a JSON-RPC envelope: validation failures and
//! internal faults are reported in the body's `error` member.

use std::any::Any;
use std::panic::AssertUnwindSafe;

use axum::Json;
use axum::body::Bytes;
use axum::extract::State;
use futures::FutureExt;
use tracing::{debug, error, warn};

use crate::AppState;
use crate::error::RpcError;
use crate::models::{RpcResponse, SendMessage, parse_request};

/// `POST /a2a` — answer a "send message" request.
pub async fn a2a_handler(State(state): State<AppState>, body: Bytes) -> Json<RpcResponse> {
    debug!(body = %String::from_utf8_lossy(&body), "incoming request");

    let response = match parse_request(&body) {
        Ok(message) => respond(&state, message).await,
        Err(rejected) => {
            warn!(id = %rejected.id, "rejected request: {}", rejected.error);
            rejected.into()
        }
    };

    if let Ok(json) = serde_json::to_string(&response) {
        debug!(response = %json, "response sent");
    }
    Json(response)
}

/// Run the reply pipeline, converting any panic into an internal error.
async fn respond(state: &AppState, message: SendMessage) -> RpcResponse {
    let SendMessage {
        id,
        channel_id,
        text,
    } = message;

    match AssertUnwindSafe(state.replies.reply_to(&text))
        .catch_unwind()
        .await
    {
        Ok(reply) => RpcResponse::message(id, channel_id, reply),
        Err(panic) => {
            let description = panic_description(panic.as_ref());
            error!(id = %id, "error handling a2a request: {description}");
            RpcResponse::error(id, RpcError::Internal(description))
        }
    }
}

fn panic_description(panic: &(dyn Any + Send)) -> String {
    if let Some(s) = panic.downcast_ref::<&str>() {
        (*s).to_string()
    } else if let Some(s) = panic.downcast_ref::<String>() {
        s.clone()
    } else {
        "unknown fault".to_string()
    }
}
