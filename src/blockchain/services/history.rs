use anyhow::Result;
use serde_json::Value;
use tracing::info;

use crate::blockchain::{
    client::{ApiClient, HttpMethod},
    models::{TransactionHistoryArgs, TransactionHistoryPayload},
};

pub fn transaction_history_path(network: &str) -> String {
    format!("/chains/{}/transaction-history", network)
}

/// Fetches transactions sent by `user`, optionally narrowed to one contract,
/// one method selector, or blocks from `startBlock` on.
pub async fn get_transaction_history(
    client: &ApiClient,
    args: &TransactionHistoryArgs,
) -> Result<Value> {
    info!(
        "Transaction history for address: {} on {}",
        args.user, args.network
    );
    let payload = TransactionHistoryPayload {
        user: &args.user,
        contract: args.contract.as_deref(),
        method_id: args.method_id.as_deref(),
        start_block: args.start_block,
        include_data: args.include_data.unwrap_or(true),
    };
    let body = serde_json::to_value(&payload)?;
    Ok(client
        .call(
            HttpMethod::Post,
            &transaction_history_path(&args.network),
            Some(&body),
        )
        .await?)
}
