//! Tests for the JSON-RPC surface and the HTTP router

use axum::{
    body::{to_bytes, Body},
    http::{Method, Request as HttpRequest, StatusCode},
};
use mockito::{Matcher, Server};
use serde_json::{json, Value};
use tower::ServiceExt;

use onchain_mcp_server::{
    api,
    blockchain::client::ApiClient,
    config::Config,
    mcp::{
        handler::{handle_line, handle_mcp_request},
        protocol::{error_codes, Request, Response},
    },
    AppState,
};

const WALLET: &str = "0xd8dA6BF26964aF9D7eEd9e03E53415D37aA96045";

fn test_state(base_url: &str) -> AppState {
    AppState::with_client(
        Config::default(),
        ApiClient::with_token(base_url, Some("test-token")),
    )
}

fn request(method: &str, params: Value) -> Request {
    Request {
        jsonrpc: "2.0".into(),
        id: json!(1),
        method: method.into(),
        params: Some(params),
    }
}

async fn call(state: &AppState, req: Request) -> Response {
    handle_mcp_request(req, state.clone())
        .await
        .expect("request with an id must get a response")
}

#[tokio::test]
async fn test_initialize_advertises_tools() {
    let state = test_state("http://127.0.0.1:1");
    let resp = call(&state, request("initialize", json!({}))).await;

    let result = resp.result.unwrap();
    assert_eq!(result["serverInfo"]["name"], "onchain_mcp");
    assert_eq!(result["capabilities"]["tools"]["listChanged"], false);
}

#[tokio::test]
async fn test_tools_list_returns_catalog() {
    let state = test_state("http://127.0.0.1:1");
    let resp = call(&state, request("tools/list", json!({}))).await;

    let tools = resp.result.unwrap()["tools"].as_array().unwrap().clone();
    assert_eq!(tools.len(), 9);
    for tool in &tools {
        assert!(tool["inputSchema"]["properties"]["network"].is_object());
    }
}

#[tokio::test]
async fn test_notifications_get_no_response() {
    let state = test_state("http://127.0.0.1:1");
    let mut req = request("notifications/initialized", json!({}));
    req.id = Value::Null;
    assert!(handle_mcp_request(req, state).await.is_none());
}

#[tokio::test]
async fn test_malformed_line_is_a_parse_error() {
    let state = test_state("http://127.0.0.1:1");
    let resp = handle_line("{\"jsonrpc\": \"2.0\", \"id\": 3, oops", state)
        .await
        .expect("a malformed line must be answered");

    assert_eq!(resp.id, Value::Null);
    assert!(resp.result.is_none());
    let err = resp.error.unwrap();
    assert_eq!(err.code, error_codes::PARSE_ERROR);
    assert!(err.message.starts_with("Parse error"));
}

#[tokio::test]
async fn test_notification_and_blank_lines_get_no_reply() {
    let state = test_state("http://127.0.0.1:1");
    let notification = r#"{"jsonrpc":"2.0","method":"notifications/initialized"}"#;
    assert!(handle_line(notification, state.clone()).await.is_none());
    assert!(handle_line("   \n", state).await.is_none());
}

#[tokio::test]
async fn test_stdio_line_is_handled_like_a_request() {
    let state = test_state("http://127.0.0.1:1");
    let resp = handle_line("{\"jsonrpc\":\"2.0\",\"id\":5,\"method\":\"ping\"}\n", state)
        .await
        .unwrap();
    assert_eq!(resp.id, json!(5));
    assert_eq!(resp.result, Some(json!({})));
}

#[tokio::test]
async fn test_unknown_method_and_unknown_tool_are_distinct() {
    let state = test_state("http://127.0.0.1:1");

    let resp = call(&state, request("resources/list", json!({}))).await;
    let err = resp.error.unwrap();
    assert_eq!(err.code, error_codes::METHOD_NOT_FOUND);
    assert!(err.message.starts_with("Method not found"));

    let resp = call(
        &state,
        request("tools/call", json!({"name": "get_block", "arguments": {}})),
    )
    .await;
    let err = resp.error.unwrap();
    assert_eq!(err.code, error_codes::METHOD_NOT_FOUND);
    assert_eq!(err.message, "Unknown tool: get_block");
}

#[tokio::test]
async fn test_tool_call_without_arguments() {
    let state = test_state("http://127.0.0.1:1");
    let resp = call(&state, request("tools/call", json!({"name": "get_abi"}))).await;

    let err = resp.error.unwrap();
    assert_eq!(err.code, error_codes::INVALID_PARAMS);
    assert_eq!(err.message, "Arguments are required");
}

#[tokio::test]
async fn test_invalid_input_carries_violations() {
    let state = test_state("http://127.0.0.1:1");
    let resp = call(
        &state,
        request(
            "tools/call",
            json!({"name": "get_native_balance", "arguments": {"network": 1}}),
        ),
    )
    .await;

    let err = resp.error.unwrap();
    assert_eq!(err.code, error_codes::INVALID_PARAMS);
    assert!(err.message.starts_with("Invalid input"));
    let data = err.data.unwrap();
    let paths: Vec<&str> = data
        .as_array()
        .unwrap()
        .iter()
        .map(|v| v["path"].as_str().unwrap())
        .collect();
    assert_eq!(paths, vec!["network", "address"]);
}

#[tokio::test]
async fn test_domain_errors_are_rendered_as_tool_failures() {
    let mut server = Server::new_async().await;
    let _mock = server
        .mock("GET", Matcher::Any)
        .with_status(429)
        .create_async()
        .await;
    let state = test_state(&server.url());

    let resp = call(
        &state,
        request(
            "tools/call",
            json!({
                "name": "get_token_balances",
                "arguments": {"network": "ethereum", "address": WALLET}
            }),
        ),
    )
    .await;

    assert!(resp.error.is_none());
    let result = resp.result.unwrap();
    assert_eq!(result["isError"], true);
    let text = result["content"][0]["text"].as_str().unwrap();
    assert!(text.starts_with("Rate Limit Exceeded:"));
    assert!(text.contains("Try again after"));
}

#[tokio::test]
async fn test_tool_name_as_method_is_an_alias() {
    let mut server = Server::new_async().await;
    let mock = server
        .mock("GET", format!("/chains/ethereum/balance/{}", WALLET).as_str())
        .with_status(200)
        .with_body("\"42\"")
        .create_async()
        .await;
    let state = test_state(&server.url());

    let resp = call(
        &state,
        request(
            "get_native_balance",
            json!({"network": "ethereum", "address": WALLET}),
        ),
    )
    .await;

    mock.assert_async().await;
    let result = resp.result.unwrap();
    assert_eq!(result["content"][0]["type"], "text");
    assert_eq!(result["content"][0]["text"], "42");
}

#[tokio::test]
async fn test_http_health_and_tools_routes() {
    let app = api::router(test_state("http://127.0.0.1:1"));

    let response = app
        .clone()
        .oneshot(
            HttpRequest::builder()
                .uri("/api/health")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let health: Value = serde_json::from_slice(&body).unwrap();
    assert_eq!(health["status"], "ok");

    let response = app
        .oneshot(
            HttpRequest::builder()
                .uri("/api/tools")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let catalog: Value = serde_json::from_slice(&body).unwrap();
    assert_eq!(catalog["tools"].as_array().unwrap().len(), 9);
}

#[tokio::test]
async fn test_http_rpc_route() {
    let app = api::router(test_state("http://127.0.0.1:1"));

    let response = app
        .oneshot(
            HttpRequest::builder()
                .method(Method::POST)
                .uri("/api/rpc")
                .header("Content-Type", "application/json")
                .body(Body::from(
                    serde_json::to_vec(&json!({
                        "jsonrpc": "2.0",
                        "id": 7,
                        "method": "ping"
                    }))
                    .unwrap(),
                ))
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let resp: Value = serde_json::from_slice(&body).unwrap();
    assert_eq!(resp["id"], 7);
    assert_eq!(resp["result"], json!({}));
}

#[tokio::test]
async fn test_http_rpc_route_rejects_notifications() {
    let app = api::router(test_state("http://127.0.0.1:1"));

    let response = app
        .oneshot(
            HttpRequest::builder()
                .method(Method::POST)
                .uri("/api/rpc")
                .header("Content-Type", "application/json")
                .body(Body::from(
                    serde_json::to_vec(&json!({
                        "jsonrpc": "2.0",
                        "method": "notifications/initialized"
                    }))
                    .unwrap(),
                ))
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let resp: Value = serde_json::from_slice(&body).unwrap();
    assert_eq!(resp["id"], Value::Null);
    assert_eq!(resp["error"]["code"], error_codes::INVALID_REQUEST);
    assert!(resp["error"]["message"]
        .as_str()
        .unwrap()
        .starts_with("Request has no id"));
}
