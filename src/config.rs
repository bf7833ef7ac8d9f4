// src/config.rs

use std::env;
use std::time::Duration;

use anyhow::{Context, Result};
use url::Url;

pub const DEFAULT_API_BASE_URL: &str = "https://api.bankless.com/internal";
pub const DEFAULT_TOKEN_VAR: &str = "BANKLESS_API_TOKEN";

// A struct to hold all configuration, loaded once at startup from the .env file.
// The API token is deliberately not part of it: it is looked up on every call.
#[derive(Clone, Debug)]
pub struct Config {
    // Server settings
    pub port: u16,

    /// Base URL of the blockchain data API, without a trailing slash
    pub api_base_url: String,
    /// Name of the environment variable holding the API token
    pub api_token_var: String,
    /// Transport timeout for outbound calls; `None` leaves reqwest's default
    pub request_timeout: Option<Duration>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            port: 8080,
            api_base_url: DEFAULT_API_BASE_URL.to_string(),
            api_token_var: DEFAULT_TOKEN_VAR.to_string(),
            request_timeout: None,
        }
    }
}

impl Config {
    /// Loads configuration from environment variables.
    pub fn from_env() -> Result<Self> {
        // Load variables from the .env file into the environment
        dotenvy::dotenv().ok();

        let api_base_url = env::var("BANKLESS_API_BASE_URL")
            .unwrap_or_else(|_| DEFAULT_API_BASE_URL.to_string());
        Url::parse(&api_base_url)
            .with_context(|| format!("BANKLESS_API_BASE_URL is not a valid URL: {}", api_base_url))?;

        let request_timeout = match env::var("HTTP_TIMEOUT_SECS") {
            Ok(raw) => Some(Duration::from_secs(
                raw.parse()
                    .context("HTTP_TIMEOUT_SECS must be a whole number of seconds")?,
            )),
            Err(_) => None,
        };

        Ok(Config {
            port: env::var("PORT")
                .unwrap_or_else(|_| "8080".to_string())
                .parse()
                .context("PORT must be a valid number")?,
            api_base_url: api_base_url.trim_end_matches('/').to_string(),
            api_token_var: DEFAULT_TOKEN_VAR.to_string(),
            request_timeout,
        })
    }
}
