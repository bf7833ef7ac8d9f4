// src/lib.rs

use std::sync::Arc;

use anyhow::Result;

// Re-export modules
pub mod api;
pub mod blockchain;
pub mod config;
pub mod mcp;

use blockchain::client::ApiClient;
use mcp::dispatcher::ToolDispatcher;

/// Application state shared across all request handlers
#[derive(Clone)]
pub struct AppState {
    /// Application configuration
    pub config: config::Config,
    /// Routes tool calls to the blockchain data API
    pub dispatcher: Arc<ToolDispatcher>,
}

impl AppState {
    /// Builds the state from configuration; the API token is read per call.
    pub fn from_config(config: config::Config) -> Result<Self> {
        let client = ApiClient::from_config(&config)?;
        Ok(Self::with_client(config, client))
    }

    pub fn with_client(config: config::Config, client: ApiClient) -> Self {
        Self {
            config,
            dispatcher: Arc::new(ToolDispatcher::new(client)),
        }
    }
}
