use axum::{extract::State, Json};
use cloudchat_core::config::MODEL_NAME;
use serde_json::{json, Value};
use std::sync::Arc;

use crate::app::AppState;

/// GET /status — static service descriptor polled by the page and by uptime checks.
pub async fn status_handler(State(state): State<Arc<AppState>>) -> Json<Value> {
    Json(json!({
        "status": "active",
        "model": MODEL_NAME,
        "restrictions": "None",
        "services": state.config.services.len(),
    }))
}
