//! Routing of tool invocations.
//!
//! [`ToolDispatcher`] owns the API client, advertises the catalog and turns an
//! `(name, arguments)` pair into either the serialized result text or a
//! [`DispatchError`]. It holds no mutable state, so one instance can serve any
//! number of concurrent calls.

use serde_json::Value;
use thiserror::Error;
use tracing::{info, warn};

use crate::blockchain::{client::ApiClient, errors::ApiError};
use crate::mcp::schema::Violation;
use crate::mcp::tools::Tool;

#[derive(Error, Debug)]
pub enum DispatchError {
    #[error("Arguments are required")]
    MissingArguments,

    #[error("Unknown tool: {0}")]
    UnknownTool(String),

    #[error("Invalid input: {}", join_violations(.0))]
    InvalidInput(Vec<Violation>),

    /// A classified failure from the blockchain data API.
    #[error("{}", .0.render())]
    Api(ApiError),

    /// Anything else; kept with its original message.
    #[error(transparent)]
    Unexpected(anyhow::Error),
}

fn join_violations(violations: &[Violation]) -> String {
    violations
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}

impl From<Vec<Violation>> for DispatchError {
    fn from(violations: Vec<Violation>) -> Self {
        DispatchError::InvalidInput(violations)
    }
}

impl From<anyhow::Error> for DispatchError {
    fn from(err: anyhow::Error) -> Self {
        match ApiError::find(&err) {
            Some(api_error) => DispatchError::Api(api_error.clone()),
            None => DispatchError::Unexpected(err),
        }
    }
}

#[derive(Clone, Debug)]
pub struct ToolDispatcher {
    client: ApiClient,
}

impl ToolDispatcher {
    pub fn new(client: ApiClient) -> Self {
        Self { client }
    }

    /// The full catalog, one entry per tool.
    pub fn list_tools(&self) -> Vec<Value> {
        Tool::ALL.iter().map(|tool| tool.definition()).collect()
    }

    /// Run the named tool and return its result serialized as JSON text.
    pub async fn invoke(
        &self,
        name: &str,
        arguments: Option<&Value>,
    ) -> Result<String, DispatchError> {
        let args = arguments.ok_or(DispatchError::MissingArguments)?;
        let tool =
            Tool::from_name(name).ok_or_else(|| DispatchError::UnknownTool(name.to_string()))?;

        info!("Invoking tool: {}", name);
        match tool.execute(&self.client, args).await {
            Ok(result) => Ok(serde_json::to_string_pretty(&result)
                .map_err(|e| DispatchError::Unexpected(e.into()))?),
            Err(err) => {
                warn!("Tool {} failed: {}", name, err);
                Err(err)
            }
        }
    }
}
