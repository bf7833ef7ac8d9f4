//! One module per family of tools. Each function turns validated arguments
//! into an endpoint path and payload and hands them to the [`ApiClient`].
//!
//! [`ApiClient`]: crate::blockchain::client::ApiClient

pub mod balance;
pub mod contract;
pub mod event;
pub mod history;
