//! # MCP Handler Module
//!
//! This module implements the Model Context Protocol (MCP) for the server.
//! It handles incoming JSON-RPC requests and hands tool calls to the
//! [`ToolDispatcher`](crate::mcp::dispatcher::ToolDispatcher).
//!
//! ## Supported Methods
//! - `initialize` - Server info and capabilities
//! - `ping` - Liveness check
//! - `tools/list` - The tool catalog with input schemas
//! - `tools/call` - Invoke a tool by name
//!
//! Any tool name may also be used directly as the method; its params are
//! then treated as the tool arguments.

use serde_json::{json, Value};
use tracing::{error, info};

use crate::{
    mcp::{
        dispatcher::DispatchError,
        protocol::{error_codes, Request, Response},
        tools::Tool,
    },
    AppState,
};

pub const PROTOCOL_VERSION: &str = "2025-06-18";

/// This is the main dispatcher for all incoming MCP requests.
pub async fn handle_mcp_request(req: Request, state: AppState) -> Option<Response> {
    info!("Handling MCP request for method: {}", req.method);

    if req.is_notification() {
        return None;
    }

    let response = match req.method.as_str() {
        "initialize" => handle_initialize(&req),
        "ping" => Response::success(req.id, json!({})),
        "tools/list" => handle_tools_list(&req, &state),
        "tools/call" => handle_tool_call(req, state).await,
        // Convenience aliases to support direct method calls from CLI
        // They are rewritten into tools/call internally to reuse the same logic
        method if Tool::from_name(method).is_some() => {
            let wrapped = Request {
                jsonrpc: req.jsonrpc.clone(),
                id: req.id.clone(),
                method: "tools/call".to_string(),
                params: Some(json!({
                    "name": req.method.clone(),
                    "arguments": req.params.clone().unwrap_or(Value::Null)
                })),
            };
            handle_tool_call(wrapped, state).await
        }
        _ => Response::error(
            req.id,
            error_codes::METHOD_NOT_FOUND,
            format!("Method not found: {}", req.method),
        ),
    };

    Some(response)
}

/// Handle one line read from the stdio transport.
///
/// Blank lines and notifications produce nothing; a line that is not a
/// JSON-RPC request is answered with a parse error carrying a null id.
pub async fn handle_line(line: &str, state: AppState) -> Option<Response> {
    let line = line.trim();
    if line.is_empty() {
        return None;
    }

    match serde_json::from_str::<Request>(line) {
        Ok(req) => handle_mcp_request(req, state).await,
        Err(parse_error) => {
            error!("JSON parse error on stdin: {}", parse_error);
            Some(Response::error(
                Value::Null,
                error_codes::PARSE_ERROR,
                format!("Parse error: {}", parse_error),
            ))
        }
    }
}

/// Handles a 'tools/call' request by dispatching it to the correct tool logic.
async fn handle_tool_call(req: Request, state: AppState) -> Response {
    let params = match req.params.as_ref() {
        Some(p) => p,
        None => {
            return Response::error(
                req.id,
                error_codes::INVALID_PARAMS,
                "Missing 'params' object".into(),
            )
        }
    };

    let tool_name = match params.get("name").and_then(|n| n.as_str()) {
        Some(name) => name,
        None => {
            return Response::error(
                req.id,
                error_codes::INVALID_PARAMS,
                "Missing 'name' field in params".into(),
            )
        }
    };

    let args = params.get("arguments").filter(|a| !a.is_null());

    match state.dispatcher.invoke(tool_name, args).await {
        Ok(text) => Response::tool_text(req.id, text),
        Err(err) => dispatch_error_response(req.id, err),
    }
}

/// Maps a failed invocation onto the JSON-RPC response the caller sees.
pub fn dispatch_error_response(id: Value, err: DispatchError) -> Response {
    match err {
        DispatchError::MissingArguments => {
            Response::error(id, error_codes::INVALID_PARAMS, err.to_string())
        }
        DispatchError::UnknownTool(_) => {
            Response::error(id, error_codes::METHOD_NOT_FOUND, err.to_string())
        }
        DispatchError::InvalidInput(ref violations) => {
            let data = json!(violations);
            Response::error_with_data(id, error_codes::INVALID_PARAMS, err.to_string(), data)
        }
        DispatchError::Api(api_error) => Response::tool_failure(id, api_error.render()),
        DispatchError::Unexpected(cause) => {
            error!("Unexpected tool failure: {:?}", cause);
            Response::error(id, error_codes::INTERNAL_ERROR, cause.to_string())
        }
    }
}

/// Handles the 'initialize' request.
fn handle_initialize(req: &Request) -> Response {
    let server_info = json!({
        "name": "onchain_mcp",
        "version": env!("CARGO_PKG_VERSION")
    });
    let capabilities = json!({ "tools": { "listChanged": false } });
    let instructions =
        "Blockchain data MCP server: contract reads, proxy resolution, ABIs and sources, event logs, transaction history and balances.";

    Response::success(
        req.id.clone(),
        json!({
            "serverInfo": server_info,
            "protocolVersion": PROTOCOL_VERSION,
            "capabilities": capabilities,
            "instructions": instructions
        }),
    )
}

/// Handles the 'tools/list' request by returning the definition of every tool.
fn handle_tools_list(req: &Request, state: &AppState) -> Response {
    Response::success(
        req.id.clone(),
        json!({ "tools": state.dispatcher.list_tools() }),
    )
}
