// src/blockchain/services/contract.rs

use anyhow::Result;
use serde_json::Value;
use tracing::info;

use crate::blockchain::{
    client::{ApiClient, HttpMethod},
    models::{ContractArgs, ReadContractArgs, ReadContractPayload},
};

pub fn read_contract_path(network: &str) -> String {
    format!("/chains/{}/contract/read", network)
}

pub fn find_proxy_path(network: &str, contract: &str) -> String {
    format!("/chains/{}/contract/{}/find-proxy", network, contract)
}

pub fn abi_path(network: &str, contract: &str) -> String {
    format!("/chains/{}/get_abi/{}", network, contract)
}

pub fn source_path(network: &str, contract: &str) -> String {
    format!("/chains/{}/get_source/{}", network, contract)
}

/// Calls a view method. The API answers with an ordered list of
/// `{value, type}` entries, one per requested output.
pub async fn read_contract(client: &ApiClient, args: &ReadContractArgs) -> Result<Value> {
    info!(
        "Reading {}.{} on {}",
        args.contract, args.method, args.network
    );
    let payload = ReadContractPayload {
        contract: &args.contract,
        method: &args.method,
        inputs: &args.inputs,
        outputs: &args.outputs,
    };
    let body = serde_json::to_value(&payload)?;
    Ok(client
        .call(HttpMethod::Post, &read_contract_path(&args.network), Some(&body))
        .await?)
}

/// Resolves the implementation behind a proxy contract.
pub async fn get_proxy(client: &ApiClient, args: &ContractArgs) -> Result<Value> {
    Ok(client
        .call(
            HttpMethod::Get,
            &find_proxy_path(&args.network, &args.contract),
            None,
        )
        .await?)
}

pub async fn get_abi(client: &ApiClient, args: &ContractArgs) -> Result<Value> {
    Ok(client
        .call(HttpMethod::Get, &abi_path(&args.network, &args.contract), None)
        .await?)
}

/// Verified source plus the proxy/implementation hints the API attaches.
pub async fn get_source(client: &ApiClient, args: &ContractArgs) -> Result<Value> {
    Ok(client
        .call(
            HttpMethod::Get,
            &source_path(&args.network, &args.contract),
            None,
        )
        .await?)
}
