//! Error taxonomy for calls against the blockchain data API.
//!
//! Every failure the remote service can produce is folded into one of five
//! kinds. The MCP layer renders them with [`ApiError::render`]; anything that
//! is not an `ApiError` is treated as an unexpected failure and surfaced as-is.

use chrono::{DateTime, Duration, Utc};
use serde_json::Value;
use thiserror::Error;

/// Cooldown applied when the upstream answers 429. The service does not send
/// a reliable reset time, so this is a fixed guess.
pub const RATE_LIMIT_COOLDOWN_SECS: i64 = 60;

const RESET_TIME_FORMAT: &str = "%Y-%m-%dT%H:%M:%SZ";

#[derive(Error, Debug, Clone, PartialEq)]
pub enum ApiError {
    #[error("authentication failed: {message}")]
    Authentication { message: String },

    #[error("validation failed: {message}")]
    Validation {
        message: String,
        details: Option<Value>,
    },

    #[error("resource not found: {message}")]
    ResourceNotFound { message: String },

    #[error("rate limit exceeded: {message}")]
    RateLimit {
        message: String,
        reset_at: DateTime<Utc>,
    },

    #[error("{message}")]
    Generic { message: String },
}

impl ApiError {
    pub fn authentication(message: impl Into<String>) -> Self {
        Self::Authentication {
            message: message.into(),
        }
    }

    pub fn validation(message: impl Into<String>, details: Option<Value>) -> Self {
        Self::Validation {
            message: message.into(),
            details,
        }
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        Self::ResourceNotFound {
            message: message.into(),
        }
    }

    pub fn rate_limit(message: impl Into<String>, reset_at: DateTime<Utc>) -> Self {
        Self::RateLimit {
            message: message.into(),
            reset_at,
        }
    }

    pub fn generic(message: impl Into<String>) -> Self {
        Self::Generic {
            message: message.into(),
        }
    }

    /// Classify a non-success HTTP status returned for `path`.
    ///
    /// `body` is the parsed response body, if any; it is only kept for 422s.
    pub fn from_status(status: u16, path: &str, body: Option<Value>) -> Self {
        match status {
            401 | 403 => Self::authentication(format!(
                "the API token was rejected for {} (status {})",
                path, status
            )),
            404 => Self::not_found(path.to_string()),
            422 => Self::validation(
                format!("the service rejected the arguments for {}", path),
                body.filter(|details| !details.is_null()),
            ),
            429 => Self::rate_limit(
                format!("too many requests to {}", path),
                Utc::now() + Duration::seconds(RATE_LIMIT_COOLDOWN_SECS),
            ),
            other => Self::generic(format!(
                "request to {} failed with status code {}",
                path, other
            )),
        }
    }

    /// Returns the `ApiError` behind an `anyhow::Error`, if that is what it is.
    pub fn find(err: &anyhow::Error) -> Option<&ApiError> {
        err.downcast_ref::<ApiError>()
    }

    /// Short label naming the kind.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Authentication { .. } => "Authentication",
            Self::Validation { .. } => "Validation",
            Self::ResourceNotFound { .. } => "ResourceNotFound",
            Self::RateLimit { .. } => "RateLimit",
            Self::Generic { .. } => "Generic",
        }
    }

    pub fn message(&self) -> &str {
        match self {
            Self::Authentication { message }
            | Self::Validation { message, .. }
            | Self::ResourceNotFound { message }
            | Self::RateLimit { message, .. }
            | Self::Generic { message } => message,
        }
    }

    /// Single-line, caller-facing description of the error.
    pub fn render(&self) -> String {
        match self {
            Self::Authentication { message } => format!("Authentication Failed: {}", message),
            Self::Validation { message, details } => match details {
                Some(details) => format!("Validation Error: {} Details: {}", message, details),
                None => format!("Validation Error: {}", message),
            },
            Self::ResourceNotFound { message } => format!("Resource Not Found: {}", message),
            Self::RateLimit { message, reset_at } => format!(
                "Rate Limit Exceeded: {}. Try again after {}",
                message,
                reset_at.format(RESET_TIME_FORMAT)
            ),
            Self::Generic { message } => format!("Error: {}", message),
        }
    }
}
