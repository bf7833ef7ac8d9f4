use std::str::FromStr;

use anyhow::Result;
use num_bigint::BigInt;
use serde_json::{Number, Value};
use tracing::info;

use crate::blockchain::{
    client::{ApiClient, HttpMethod},
    errors::ApiError,
    models::AddressArgs,
};

pub fn native_balance_path(network: &str, address: &str) -> String {
    format!("/chains/{}/balance/{}", network, address)
}

// Note the order: address first, network last.
pub fn token_balances_path(network: &str, address: &str) -> String {
    format!("/token/balance/{}/{}", address, network)
}

/// Native balance in the chain's smallest unit, returned as an exact integer.
pub async fn get_native_balance(client: &ApiClient, args: &AddressArgs) -> Result<Value> {
    info!("Fetching native balance of {} on {}", args.address, args.network);
    let path = native_balance_path(&args.network, &args.address);
    let raw = client.call(HttpMethod::Get, &path, None).await?;
    let balance = parse_native_balance(&raw).ok_or_else(|| {
        ApiError::generic(format!("unexpected balance response from {}: {}", path, raw))
    })?;
    bigint_to_json(&balance)
}

/// Per-token balances, prices and dollar values plus an aggregate total.
pub async fn get_token_balances(client: &ApiClient, args: &AddressArgs) -> Result<Value> {
    info!("Fetching token balances of {} on {}", args.address, args.network);
    Ok(client
        .call(
            HttpMethod::Get,
            &token_balances_path(&args.network, &args.address),
            None,
        )
        .await?)
}

/// Accepts the balance as a decimal string, a JSON number, or an object with
/// a `balance` field holding either.
pub fn parse_native_balance(raw: &Value) -> Option<BigInt> {
    match raw {
        Value::String(s) => BigInt::from_str(s.trim()).ok(),
        Value::Number(n) => BigInt::from_str(&n.to_string()).ok(),
        Value::Object(map) => map.get("balance").and_then(parse_native_balance),
        _ => None,
    }
}

// serde_json keeps every digit thanks to `arbitrary_precision`.
fn bigint_to_json(value: &BigInt) -> Result<Value> {
    let number = Number::from_str(&value.to_string())
        .map_err(|e| anyhow::anyhow!("balance {} is not representable as JSON: {}", value, e))?;
    Ok(Value::Number(number))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    const LARGE: &str =
        "115792089237316195423570985008687907853269984665640564039457584007913129639935";

    #[test]
    fn parses_decimal_strings_exactly() {
        assert_eq!(LARGE.len(), 78);
        let parsed = parse_native_balance(&json!(LARGE)).unwrap();
        assert_eq!(parsed.to_string(), LARGE);
    }

    #[test]
    fn parses_wrapped_balance() {
        let parsed = parse_native_balance(&json!({"balance": "1000000000000000000"})).unwrap();
        assert_eq!(parsed, BigInt::from(1_000_000_000_000_000_000u64));
    }

    #[test]
    fn rejects_non_numeric_balances() {
        assert!(parse_native_balance(&json!("0xzz")).is_none());
        assert!(parse_native_balance(&json!(null)).is_none());
        assert!(parse_native_balance(&json!([1])).is_none());
    }

    #[test]
    fn json_rendering_keeps_every_digit() {
        let value = bigint_to_json(&BigInt::from_str(LARGE).unwrap()).unwrap();
        assert_eq!(serde_json::to_string(&value).unwrap(), LARGE);
    }

    #[test]
    fn token_balance_path_puts_network_last() {
        assert_eq!(
            token_balances_path("base", "0xabc"),
            "/token/balance/0xabc/base"
        );
    }
}
