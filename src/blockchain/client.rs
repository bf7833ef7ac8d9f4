//! HTTP adapter for the blockchain data API.
//!
//! Every tool ends up in [`ApiClient::call`]: one authenticated request, no
//! retries, and any failure classified into an [`ApiError`].

use std::env;

use anyhow::Result;
use reqwest::{header::CONTENT_TYPE, Client};
use secrecy::{ExposeSecret, SecretString};
use serde_json::Value;
use tracing::{debug, warn};

use crate::blockchain::errors::ApiError;
use crate::config::Config;

/// Header carrying the API token on every outbound call.
pub const AUTH_HEADER: &str = "x-bankless-token";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HttpMethod {
    Get,
    Post,
}

impl HttpMethod {
    fn as_reqwest(self) -> reqwest::Method {
        match self {
            HttpMethod::Get => reqwest::Method::GET,
            HttpMethod::Post => reqwest::Method::POST,
        }
    }
}

/// Where the API token comes from.
#[derive(Clone, Debug)]
pub enum AuthTokenSource {
    /// Read from the named environment variable on every call.
    Env(String),
    /// A token fixed at construction. `None` means no token is configured.
    Fixed(Option<SecretString>),
}

impl AuthTokenSource {
    fn resolve(&self) -> Option<SecretString> {
        match self {
            AuthTokenSource::Env(var) => env::var(var)
                .ok()
                .filter(|token| !token.trim().is_empty())
                .map(SecretString::new),
            AuthTokenSource::Fixed(token) => token.clone(),
        }
    }

    fn describe(&self) -> String {
        match self {
            AuthTokenSource::Env(var) => format!("{} is not set", var),
            AuthTokenSource::Fixed(_) => "no API token configured".to_string(),
        }
    }
}

#[derive(Clone, Debug)]
pub struct ApiClient {
    http: Client,
    base_url: String,
    token: AuthTokenSource,
}

impl ApiClient {
    /// Build a client from the loaded configuration. The token is taken from
    /// the configured environment variable at call time.
    pub fn from_config(config: &Config) -> Result<Self> {
        let mut builder = Client::builder();
        if let Some(timeout) = config.request_timeout {
            builder = builder.timeout(timeout);
        }
        let http = builder
            .build()
            .map_err(|e| anyhow::anyhow!("Failed to build HTTP client: {}", e))?;
        Ok(Self {
            http,
            base_url: config.api_base_url.trim_end_matches('/').to_string(),
            token: AuthTokenSource::Env(config.api_token_var.clone()),
        })
    }

    pub fn new(base_url: &str, token: AuthTokenSource) -> Self {
        Self {
            http: Client::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
            token,
        }
    }

    /// Convenience constructor with a fixed token.
    pub fn with_token(base_url: &str, token: Option<&str>) -> Self {
        Self::new(
            base_url,
            AuthTokenSource::Fixed(token.map(|t| SecretString::new(t.to_string()))),
        )
    }

    /// Issue one request against `base_url + path`.
    ///
    /// Fails with [`ApiError::Authentication`] before touching the network if
    /// no token is available. GET requests never carry a body.
    pub async fn call(
        &self,
        method: HttpMethod,
        path: &str,
        payload: Option<&Value>,
    ) -> Result<Value, ApiError> {
        let token = self
            .token
            .resolve()
            .ok_or_else(|| ApiError::authentication(self.token.describe()))?;

        let url = format!("{}{}", self.base_url, path);
        debug!("{:?} {}", method, url);

        let mut request = self
            .http
            .request(method.as_reqwest(), &url)
            .header(CONTENT_TYPE, "application/json")
            .header(AUTH_HEADER, token.expose_secret());
        if method == HttpMethod::Post {
            if let Some(body) = payload {
                request = request.json(body);
            }
        }

        let res = request.send().await.map_err(|e| {
            warn!("Transport failure calling {}: {}", path, e);
            ApiError::generic(format!("request to {} failed: {}", path, e))
        })?;

        let status = res.status();
        let body = res.text().await.map_err(|e| {
            ApiError::generic(format!(
                "failed to read response from {} (status {}): {}",
                path,
                status.as_u16(),
                e
            ))
        })?;
        let body = parse_body(&body);

        if !status.is_success() {
            let err = ApiError::from_status(status.as_u16(), path, Some(body));
            warn!("{} returned {}: {}", path, status.as_u16(), err);
            return Err(err);
        }

        Ok(body)
    }
}

// JSON when it parses, the raw text otherwise; empty bodies become null.
fn parse_body(body: &str) -> Value {
    if body.trim().is_empty() {
        return Value::Null;
    }
    serde_json::from_str::<Value>(body).unwrap_or_else(|_| Value::String(body.to_string()))
}
