// src/blockchain/mod.rs

// HTTP adapter for the blockchain data API and its error taxonomy
pub mod client;
pub mod errors;
pub use client::{ApiClient, AuthTokenSource, HttpMethod};
pub use errors::ApiError;

// Shared shapes and per-tool service calls
pub mod models;
pub mod services;
