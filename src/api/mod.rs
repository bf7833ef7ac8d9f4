//! # API Module
//!
//! HTTP surface of the server, used when it is not running over stdio.
//!
//! ## Available Endpoints
//! - `GET /api/health` - Liveness check
//! - `GET /api/tools` - The tool catalog
//! - `POST /api/rpc` - JSON-RPC endpoint for MCP requests

use axum::{
    routing::{get, post},
    Router,
};
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::AppState;

pub mod health;
pub mod rpc;
pub mod tools;

/// Builds the full application router, with every route nested under `/api`.
pub fn router(state: AppState) -> Router {
    let api_router = Router::new()
        .route("/health", get(health::health_handler))
        .route("/tools", get(tools::list_tools_handler))
        .route("/rpc", post(rpc::rpc_handler));

    Router::new()
        .nest("/api", api_router)
        .with_state(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
}
