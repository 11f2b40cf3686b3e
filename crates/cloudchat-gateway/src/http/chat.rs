//! Chat endpoint — POST /chat
//!
//! Request:  `{"message": "hello"}`
//! Response: `{"response": "..."}`
//! Error:    `{"error": "..."}`
//!
//! Every outcome is HTTP 200; the page tells success from failure by which
//! field is present.

use axum::{
    extract::{rejection::JsonRejection, State},
    response::{IntoResponse, Response},
    Json,
};
use cloudchat_core::CloudChatError;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::any::Any;
use std::sync::Arc;
use tracing::{debug, error, warn};

use crate::app::AppState;

pub const NO_MESSAGE: &str = "No message provided";

#[derive(Deserialize)]
pub struct ChatRequest {
    /// Any JSON value; only a non-empty string is answered. Empty values
    /// (`null`, `false`, `0`, `""`, `[]`, `{}`) count as no message.
    #[serde(default)]
    pub message: Option<Value>,
}

#[derive(Serialize)]
pub struct ChatReply {
    pub response: String,
}

#[derive(Serialize)]
pub struct ChatError {
    pub error: String,
}

impl ChatError {
    fn new(error: impl Into<String>) -> Self {
        Self {
            error: error.into(),
        }
    }
}

impl From<CloudChatError> for ChatError {
    fn from(err: CloudChatError) -> Self {
        Self::new(err.to_string())
    }
}

/// POST /chat — classify the message and return a canned reply.
pub async fn chat_handler(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<ChatRequest>, JsonRejection>,
) -> Result<Json<ChatReply>, Json<ChatError>> {
    let Json(req) = payload.map_err(|rejection| {
        let err = CloudChatError::Processing(rejection.body_text());
        warn!(code = err.code(), error = %err, "POST /chat rejected");
        Json(ChatError::from(err))
    })?;

    let message = match req.message {
        Some(Value::String(m)) if !m.is_empty() => m,
        Some(other) if !is_empty_value(&other) => {
            let err = CloudChatError::Processing(format!(
                "message must be a string, got {}",
                value_kind(&other)
            ));
            warn!(code = err.code(), error = %err, "POST /chat rejected");
            return Err(Json(ChatError::from(err)));
        }
        _ => return Err(Json(ChatError::new(NO_MESSAGE))),
    };

    let response = state.selector.classify_and_respond(&message);
    debug!(user = %message, reply = %response, "chat exchange");

    Ok(Json(ChatReply { response }))
}

fn is_empty_value(value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::Bool(b) => !b,
        Value::Number(n) => n.as_f64() == Some(0.0),
        Value::String(s) => s.is_empty(),
        Value::Array(a) => a.is_empty(),
        Value::Object(o) => o.is_empty(),
    }
}

fn value_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

/// Panic hook for `CatchPanicLayer`: report the panic as a processing error
/// in the same JSON shape as every other /chat failure.
pub fn panic_response(panic: Box<dyn Any + Send + 'static>) -> Response {
    let detail = if let Some(s) = panic.downcast_ref::<String>() {
        s.clone()
    } else if let Some(s) = panic.downcast_ref::<&str>() {
        s.to_string()
    } else {
        "unknown panic".to_string()
    };

    let err = CloudChatError::Processing(detail);
    error!(code = err.code(), error = %err, "handler panicked");
    Json(ChatError::from(err)).into_response()
}
