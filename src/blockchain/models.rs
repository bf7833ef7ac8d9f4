// src/blockchain/models.rs
use serde::{Deserialize, Serialize};
use serde_json::Value;

// --- Shared shapes ---

/// One contract call input: an ABI-like type name and the value to pass.
/// The type is not checked against the value here; the API does that.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TypedValue {
    #[serde(rename = "type")]
    pub kind: String,
    pub value: Value,
}

/// Expected return (or event argument) type.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TypedOutput {
    #[serde(rename = "type")]
    pub kind: String,
}

// --- Tool arguments ---
//
// These are only ever built from arguments that already passed schema
// validation, so field names mirror the advertised schemas.

#[derive(Debug, Clone, Deserialize)]
pub struct ReadContractArgs {
    pub network: String,
    pub contract: String,
    pub method: String,
    pub inputs: Vec<TypedValue>,
    pub outputs: Vec<TypedOutput>,
}

/// Arguments shared by every tool that addresses a single contract.
#[derive(Debug, Clone, Deserialize)]
pub struct ContractArgs {
    pub network: String,
    pub contract: String,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EventLogsArgs {
    pub network: String,
    pub addresses: Vec<String>,
    pub topic: String,
    #[serde(default)]
    pub optional_topics: Option<Vec<Option<String>>>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct BuildEventTopicArgs {
    pub network: String,
    pub name: String,
    pub arguments: Vec<TypedOutput>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TransactionHistoryArgs {
    pub network: String,
    pub user: String,
    #[serde(default)]
    pub contract: Option<String>,
    #[serde(default)]
    pub method_id: Option<String>,
    #[serde(default)]
    pub start_block: Option<u64>,
    #[serde(default)]
    pub include_data: Option<bool>,
}

/// Arguments for the balance lookups.
#[derive(Debug, Clone, Deserialize)]
pub struct AddressArgs {
    pub network: String,
    pub address: String,
}

// --- Request payloads ---

#[derive(Debug, Serialize)]
pub struct ReadContractPayload<'a> {
    pub contract: &'a str,
    pub method: &'a str,
    pub inputs: &'a [TypedValue],
    pub outputs: &'a [TypedOutput],
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EventLogsPayload<'a> {
    pub addresses: &'a [String],
    pub topic: &'a str,
    pub optional_topics: &'a [Option<String>],
}

#[derive(Debug, Serialize)]
pub struct BuildEventTopicPayload<'a> {
    pub name: &'a str,
    pub arguments: &'a [TypedOutput],
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TransactionHistoryPayload<'a> {
    pub user: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub contract: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub method_id: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub start_block: Option<u64>,
    pub include_data: bool,
}
