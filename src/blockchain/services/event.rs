use anyhow::Result;
use serde_json::Value;
use tracing::info;

use crate::blockchain::{
    client::{ApiClient, HttpMethod},
    models::{BuildEventTopicArgs, BuildEventTopicPayload, EventLogsArgs, EventLogsPayload},
};

pub fn event_logs_path(network: &str) -> String {
    format!("/chains/{}/events/logs", network)
}

pub fn build_event_topic_path(network: &str) -> String {
    format!("/chains/{}/contract/build-event-topic", network)
}

/// Fetches logs emitted by `addresses` matching `topic`. Missing optional
/// topics are sent as an empty list; `null` entries act as wildcards.
pub async fn get_event_logs(client: &ApiClient, args: &EventLogsArgs) -> Result<Value> {
    info!(
        "Fetching {} logs for {} address(es) on {}",
        args.topic,
        args.addresses.len(),
        args.network
    );
    let payload = EventLogsPayload {
        addresses: &args.addresses,
        topic: &args.topic,
        optional_topics: args.optional_topics.as_deref().unwrap_or(&[]),
    };
    let body = serde_json::to_value(&payload)?;
    Ok(client
        .call(HttpMethod::Post, &event_logs_path(&args.network), Some(&body))
        .await?)
}

/// Derives the topic hash for an event signature. The API returns the hash
/// as a bare string, passed back untouched.
pub async fn build_event_topic(client: &ApiClient, args: &BuildEventTopicArgs) -> Result<Value> {
    let payload = BuildEventTopicPayload {
        name: &args.name,
        arguments: &args.arguments,
    };
    let body = serde_json::to_value(&payload)?;
    Ok(client
        .call(
            HttpMethod::Post,
            &build_event_topic_path(&args.network),
            Some(&body),
        )
        .await?)
}
