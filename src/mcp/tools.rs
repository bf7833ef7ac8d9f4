//! The fixed tool catalog.
//!
//! ### Contract Interaction
//! - `read_contract` - Call a view method and decode its outputs
//! - `get_proxy` - Resolve the implementation behind a proxy
//! - `get_abi` - Fetch a contract's ABI
//! - `get_source` - Fetch verified source code
//!
//! ### Events
//! - `get_event_logs` - Query logs by emitter and topics
//! - `build_event_topic` - Hash an event signature into its topic
//!
//! ### Accounts
//! - `get_transaction_history` - Transactions sent by an address
//! - `get_native_balance` - Native coin balance as an exact integer
//! - `get_token_balances` - Token holdings with prices and a total

use serde_json::{json, Value};

use crate::blockchain::{client::ApiClient, services};
use crate::mcp::dispatcher::DispatchError;
use crate::mcp::schema::{Field, FieldKind, ToolSchema};

const NETWORK: Field = Field::required(
    "network",
    FieldKind::String,
    "The blockchain network (e.g. \"ethereum\", \"base\", \"polygon\")",
);
const CONTRACT: Field = Field::required("contract", FieldKind::String, "The contract address");
const ADDRESS: Field = Field::required("address", FieldKind::String, "The wallet address");

static CONTRACT_SCHEMA: ToolSchema = ToolSchema::new(&[NETWORK, CONTRACT]);
static ADDRESS_SCHEMA: ToolSchema = ToolSchema::new(&[NETWORK, ADDRESS]);

static READ_CONTRACT_SCHEMA: ToolSchema = ToolSchema::new(&[
    NETWORK,
    CONTRACT,
    Field::required("method", FieldKind::String, "The contract method to call"),
    Field::required(
        "inputs",
        FieldKind::TypedValueArray,
        "Method arguments as {type, value} pairs, in order",
    ),
    Field::required(
        "outputs",
        FieldKind::TypedOutputArray,
        "Expected return types as {type} entries, in order",
    ),
]);

static EVENT_LOGS_SCHEMA: ToolSchema = ToolSchema::new(&[
    NETWORK,
    Field::required(
        "addresses",
        FieldKind::StringArray,
        "Contract addresses whose logs to fetch",
    ),
    Field::required("topic", FieldKind::String, "Primary topic (topic0) to match"),
    Field::optional(
        "optionalTopics",
        FieldKind::NullableStringArray,
        "Further topics to match; null entries match anything",
    ),
]);

static BUILD_EVENT_TOPIC_SCHEMA: ToolSchema = ToolSchema::new(&[
    NETWORK,
    Field::required(
        "name",
        FieldKind::String,
        "Event signature, e.g. \"Transfer(address,address,uint256)\"",
    ),
    Field::required(
        "arguments",
        FieldKind::TypedOutputArray,
        "Event argument types as {type} entries",
    ),
]);

static TRANSACTION_HISTORY_SCHEMA: ToolSchema = ToolSchema::new(&[
    NETWORK,
    Field::required("user", FieldKind::String, "Address whose transactions to list"),
    Field::optional("contract", FieldKind::String, "Only transactions to this contract"),
    Field::optional("methodId", FieldKind::String, "Only calls with this method selector"),
    Field::optional("startBlock", FieldKind::Integer, "First block to include"),
    Field::optional(
        "includeData",
        FieldKind::Boolean,
        "Include transaction input data (default true)",
    ),
]);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tool {
    ReadContract,
    GetProxy,
    GetAbi,
    GetSource,
    GetEventLogs,
    BuildEventTopic,
    GetTransactionHistory,
    GetNativeBalance,
    GetTokenBalances,
}

impl Tool {
    /// Every tool, in the order they are advertised.
    pub const ALL: [Tool; 9] = [
        Tool::ReadContract,
        Tool::GetProxy,
        Tool::GetAbi,
        Tool::GetSource,
        Tool::GetEventLogs,
        Tool::BuildEventTopic,
        Tool::GetTransactionHistory,
        Tool::GetNativeBalance,
        Tool::GetTokenBalances,
    ];

    pub fn from_name(name: &str) -> Option<Tool> {
        Self::ALL.iter().copied().find(|tool| tool.name() == name)
    }

    pub fn name(self) -> &'static str {
        match self {
            Tool::ReadContract => "read_contract",
            Tool::GetProxy => "get_proxy",
            Tool::GetAbi => "get_abi",
            Tool::GetSource => "get_source",
            Tool::GetEventLogs => "get_event_logs",
            Tool::BuildEventTopic => "build_event_topic",
            Tool::GetTransactionHistory => "get_transaction_history",
            Tool::GetNativeBalance => "get_native_balance",
            Tool::GetTokenBalances => "get_token_balances",
        }
    }

    pub fn description(self) -> &'static str {
        match self {
            Tool::ReadContract => {
                "Read contract state by calling a view method. Returns the decoded outputs as an ordered list of {value, type}."
            }
            Tool::GetProxy => "Get the implementation address behind a proxy contract.",
            Tool::GetAbi => "Get the ABI of a contract.",
            Tool::GetSource => {
                "Get the verified source code of a contract, including proxy and implementation hints."
            }
            Tool::GetEventLogs => {
                "Get event logs emitted by the given contracts, filtered by topic and optional extra topics."
            }
            Tool::BuildEventTopic => {
                "Build the topic hash for an event signature, for use with get_event_logs."
            }
            Tool::GetTransactionHistory => {
                "Get the transaction history of an address, optionally filtered by contract, method id and start block."
            }
            Tool::GetNativeBalance => {
                "Get the native coin balance of an address, in the chain's smallest unit."
            }
            Tool::GetTokenBalances => {
                "Get the token balances of an address with prices, dollar values and a total."
            }
        }
    }

    pub fn schema(self) -> &'static ToolSchema {
        match self {
            Tool::ReadContract => &READ_CONTRACT_SCHEMA,
            Tool::GetProxy | Tool::GetAbi | Tool::GetSource => &CONTRACT_SCHEMA,
            Tool::GetEventLogs => &EVENT_LOGS_SCHEMA,
            Tool::BuildEventTopic => &BUILD_EVENT_TOPIC_SCHEMA,
            Tool::GetTransactionHistory => &TRANSACTION_HISTORY_SCHEMA,
            Tool::GetNativeBalance | Tool::GetTokenBalances => &ADDRESS_SCHEMA,
        }
    }

    /// Catalog entry as advertised by `tools/list`.
    pub fn definition(self) -> Value {
        json!({
            "name": self.name(),
            "description": self.description(),
            "inputSchema": self.schema().describe(),
        })
    }

    /// Validate `args` against this tool's schema, then run its handler.
    pub async fn execute(self, client: &ApiClient, args: &Value) -> Result<Value, DispatchError> {
        let schema = self.schema();
        let result = match self {
            Tool::ReadContract => {
                services::contract::read_contract(client, &schema.validate(args)?).await
            }
            Tool::GetProxy => services::contract::get_proxy(client, &schema.validate(args)?).await,
            Tool::GetAbi => services::contract::get_abi(client, &schema.validate(args)?).await,
            Tool::GetSource => {
                services::contract::get_source(client, &schema.validate(args)?).await
            }
            Tool::GetEventLogs => {
                services::event::get_event_logs(client, &schema.validate(args)?).await
            }
            Tool::BuildEventTopic => {
                services::event::build_event_topic(client, &schema.validate(args)?).await
            }
            Tool::GetTransactionHistory => {
                services::history::get_transaction_history(client, &schema.validate(args)?).await
            }
            Tool::GetNativeBalance => {
                services::balance::get_native_balance(client, &schema.validate(args)?).await
            }
            Tool::GetTokenBalances => {
                services::balance::get_token_balances(client, &schema.validate(args)?).await
            }
        };
        result.map_err(DispatchError::from)
    }
}
