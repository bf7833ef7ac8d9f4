use axum::{extract::State, response::IntoResponse, Json};
use serde_json::json;

use crate::AppState;

// GET /tools: same catalog as the `tools/list` MCP method.
pub async fn list_tools_handler(State(state): State<AppState>) -> impl IntoResponse {
    Json(json!({ "tools": state.dispatcher.list_tools() }))
}
