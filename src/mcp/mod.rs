// JSON-RPC surface, tool catalog and invocation routing
pub mod dispatcher;
pub mod handler;
pub mod protocol;
pub mod schema;
pub mod tools;
